use anchor_lang::prelude::*;
use std::fmt::Debug;

use crate::errors::CryptoHandsError;
use crate::state::Config;

pub fn default_config() -> Config {
    let mut cfg = Config::default();
    cfg.authority = Pubkey::new_unique();
    cfg.set_defaults();
    cfg
}

/// Fails unless `res` is exactly `expected`.
pub fn assert_err<T: Debug>(res: Result<T>, expected: CryptoHandsError) {
    match res {
        Ok(v) => panic!("expected {expected:?}, got Ok({v:?})"),
        Err(e) => assert_eq!(e, anchor_lang::error::Error::from(expected)),
    }
}

/// Borsh encoding of an account body (no discriminator).
pub fn to_bytes<T: AnchorSerialize>(value: &T) -> Vec<u8> {
    let mut buf = Vec::new();
    value.serialize(&mut buf).unwrap();
    buf
}
