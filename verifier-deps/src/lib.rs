//! Pins `solana-program` to the toolchain used for verifiable builds.
