// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Seeds from which private keys are deterministically derived.

use hive_crypto::ternary::{sponge::{CurlP27, Sponge}, HASH_LENGTH};
use hive_ternary::{convert, Trit, TritBuf, TryteString};

use rand::Rng;
use thiserror::Error;
use zeroize::Zeroize;

use std::fmt;

/// The length of a seed, in trits.
pub const SEED_LENGTH: usize = HASH_LENGTH;

/// The maximum length of a seed, in trytes.
pub const MAX_SEED_TRYTES: usize = SEED_LENGTH / 3;

/// Errors occurring while constructing seeds.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum Error {
    /// A seed was created from more entropy than it can hold.
    #[error("Invalid seed length {0}.")]
    InvalidLength(usize),
    /// A seed was created from characters outside of the tryte alphabet.
    #[error("Invalid seed trytes.")]
    InvalidTrytes,
}

/// The entropy at the root of a key hierarchy.
///
/// Seeds shorter than 81 trytes are right-padded with nines. The buffer is
/// zeroed on drop.
#[derive(Clone)]
pub struct Seed(TritBuf);

impl Seed {
    /// Creates a random seed.
    pub fn rand() -> Self {
        let mut rng = rand::thread_rng();
        let trits = (0..SEED_LENGTH)
            .map(|_| match rng.gen_range(0..3u8) {
                0 => Trit::NegOne,
                1 => Trit::Zero,
                _ => Trit::PlusOne,
            })
            .collect();
        Self(trits)
    }

    /// Parses a seed from up to 81 trytes, padding shorter input with nines.
    pub fn from_str(s: &str) -> Result<Self, Error> {
        if s.len() > MAX_SEED_TRYTES {
            return Err(Error::InvalidLength(s.len() * 3));
        }
        let mut trytes = TryteString::try_from_str(s).map_err(|_| Error::InvalidTrytes)?;
        trytes.pad_right(MAX_SEED_TRYTES);
        Ok(Self(trytes.as_trits()))
    }

    /// Creates a seed from up to 243 trits, padding shorter input with zeros.
    pub fn from_trits(mut buf: TritBuf) -> Result<Self, Error> {
        if buf.len() > SEED_LENGTH || buf.len() % 3 != 0 {
            return Err(Error::InvalidLength(buf.len()));
        }
        while buf.len() < SEED_LENGTH {
            buf.push(Trit::Zero);
        }
        Ok(Self(buf))
    }

    /// Interprets the seed as trits.
    pub fn as_trits(&self) -> &[Trit] {
        &self.0
    }

    /// Derives the subseed at `index`.
    ///
    /// The seed is incremented by `index` in balanced ternary, absorbed into
    /// a fresh sponge and squeezed once; key material is then extracted from
    /// a sponge re-seeded with that squeeze.
    pub fn subseed(&self, index: u64) -> Seed {
        let mut incremented = self.0.clone();
        convert::add_assign_int(&mut incremented, index as i64);

        let mut sponge = CurlP27::default();
        let mut subseed = TritBuf::zeros(SEED_LENGTH);
        // `CurlP` is infallible.
        let _ = sponge.absorb(&incremented);
        let _ = sponge.squeeze_into(&mut subseed);

        incremented.fill(Trit::Zero);

        Seed(subseed)
    }
}

impl Zeroize for Seed {
    fn zeroize(&mut self) {
        self.0.fill(Trit::Zero);
    }
}

impl Drop for Seed {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seed(<redacted>)")
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<redacted>")
    }
}
