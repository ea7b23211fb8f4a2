// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! The ternary sponge construction and its permutations.

mod curlp;

pub use curlp::{CurlP, CurlP27, CurlP81, CurlPRounds};

use super::HASH_LENGTH;

use hive_ternary::{Trit, TritBuf};

/// A cryptographic hash function built from a permutation over a ternary
/// state, fed and drained one rate block at a time.
///
/// Implementations are deterministic: two instances given the same absorb
/// sequence squeeze identical output.
pub trait Sponge {
    /// The failure reported by the underlying permutation.
    type Error;

    /// Returns the sponge to its initial state.
    fn reset(&mut self);

    /// Feeds `input` into the state.
    fn absorb(&mut self, input: &[Trit]) -> Result<(), Self::Error>;

    /// Drains output from the state into `buf`.
    fn squeeze_into(&mut self, buf: &mut [Trit]) -> Result<(), Self::Error>;

    /// Drains one hash worth of output.
    fn squeeze(&mut self) -> Result<TritBuf, Self::Error> {
        let mut output = TritBuf::zeros(HASH_LENGTH);
        self.squeeze_into(&mut output)?;
        Ok(output)
    }

    /// Hashes `input` into `buf`, leaving the sponge reset.
    fn digest_into(&mut self, input: &[Trit], buf: &mut [Trit]) -> Result<(), Self::Error> {
        self.absorb(input)?;
        self.squeeze_into(buf)?;
        self.reset();
        Ok(())
    }

    /// Hashes `input` into an owned digest, leaving the sponge reset.
    fn digest(&mut self, input: &[Trit]) -> Result<TritBuf, Self::Error> {
        let mut output = TritBuf::zeros(HASH_LENGTH);
        self.digest_into(input, &mut output)?;
        Ok(output)
    }
}
