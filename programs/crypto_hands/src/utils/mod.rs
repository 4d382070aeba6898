pub mod accounts;
pub mod economics;
pub mod engine;
pub mod randomness;
pub mod transfers;

pub use economics::*;
pub use randomness::*;
