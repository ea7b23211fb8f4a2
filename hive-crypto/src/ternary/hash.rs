// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use hive_ternary::{Trit, TritBuf, TryteString};

use thiserror::Error;

use std::{convert::TryFrom, fmt};

/// The length of a hash, in trits.
pub const HASH_LENGTH: usize = 243;

/// Errors occurring while constructing a hash.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum Error {
    /// A hash holds exactly 243 trits.
    #[error("Invalid hash length {0}.")]
    InvalidLength(usize),
}

/// A 243-trit digest.
#[derive(Clone, Eq, Hash, PartialEq)]
pub struct Hash(TritBuf);

impl Hash {
    /// The all-zero hash.
    pub fn zeros() -> Self {
        Self(TritBuf::zeros(HASH_LENGTH))
    }

    /// The trits of the hash.
    pub fn as_trits(&self) -> &[Trit] {
        &self.0
    }

    /// The trits of the hash, mutably.
    pub fn as_trits_mut(&mut self) -> &mut [Trit] {
        self.0.as_slice_mut()
    }

    /// The weight of the hash: how many zero trits it ends with.
    pub fn weight(&self) -> u8 {
        let mut weight = 0;
        for trit in self.0.iter().rev() {
            if *trit != Trit::Zero {
                break;
            }
            weight += 1;
        }
        weight
    }
}

impl<'a> TryFrom<&'a [Trit]> for Hash {
    type Error = Error;

    fn try_from(trits: &'a [Trit]) -> Result<Self, Self::Error> {
        if trits.len() != HASH_LENGTH {
            return Err(Error::InvalidLength(trits.len()));
        }
        Ok(Self(TritBuf::from(trits)))
    }
}

impl From<Hash> for TritBuf {
    fn from(hash: Hash) -> Self {
        hash.0
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // A hash length is a multiple of three.
        match TryteString::from_trits(&self.0) {
            Ok(trytes) => write!(f, "{}", trytes),
            Err(_) => unreachable!(),
        }
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({})", self)
    }
}
