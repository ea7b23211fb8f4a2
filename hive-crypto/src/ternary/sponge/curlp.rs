// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use crate::ternary::{sponge::Sponge, HASH_LENGTH};

use hive_ternary::{Trit, TritBuf};

use std::convert::Infallible;

/// Three hash blocks of state: one rate block and two capacity blocks.
const STATE_LENGTH: usize = 3 * HASH_LENGTH;

/// Step of the read-index walk. Coprime with the state length, so one round
/// reads every cell; congruent to `-365`, so consecutive outputs combine
/// cells from opposite halves of the state.
const INDEX_ROTATION: usize = 364;

/// The substitution box, indexed by the two trits read per output cell.
const SBOX: [[Trit; 3]; 3] = [
    [Trit::PlusOne, Trit::PlusOne, Trit::NegOne],
    [Trit::Zero, Trit::NegOne, Trit::PlusOne],
    [Trit::NegOne, Trit::Zero, Trit::Zero],
];

/// Round counts `CurlP` is specified for.
#[derive(Clone, Copy)]
pub enum CurlPRounds {
    /// 27 rounds.
    Rounds27 = 27,
    /// 81 rounds.
    Rounds81 = 81,
}

/// The `CurlP` sponge, a substitution-permutation network over 729 trits.
pub struct CurlP {
    rounds: CurlPRounds,
    state: TritBuf,
    scratch: TritBuf,
}

impl CurlP {
    /// Creates a zero-state `CurlP` running `rounds` rounds per transformation.
    pub fn new(rounds: CurlPRounds) -> Self {
        Self {
            rounds,
            state: TritBuf::zeros(STATE_LENGTH),
            scratch: TritBuf::zeros(STATE_LENGTH),
        }
    }

    /// Runs the permutation.
    ///
    /// Each round rewrites the whole state: output cell `n` substitutes the
    /// pair of cells reached after `n` and `n + 1` steps of the index walk,
    /// starting from cell zero.
    fn transform(&mut self) {
        for _ in 0..self.rounds as usize {
            let mut index = 0;
            for slot in 0..STATE_LENGTH {
                let first = self.state[index];
                index = (index + INDEX_ROTATION) % STATE_LENGTH;
                let second = self.state[index];
                self.scratch[slot] = SBOX[(first.value() + 1) as usize][(second.value() + 1) as usize];
            }
            std::mem::swap(&mut self.state, &mut self.scratch);
        }
    }
}

impl Sponge for CurlP {
    type Error = Infallible;

    fn reset(&mut self) {
        self.state.fill(Trit::Zero);
    }

    /// Consumes `input` one rate block at a time, transforming after each.
    /// A short final block overwrites only the leading trits of the state;
    /// whatever the previous transformation left in the remaining cells
    /// carries over.
    fn absorb(&mut self, input: &[Trit]) -> Result<(), Self::Error> {
        for block in input.chunks(HASH_LENGTH) {
            self.state[..block.len()].copy_from_slice(block);
            self.transform();
        }
        Ok(())
    }

    /// Emits one rate block per transformation until `buf` is full. A short
    /// final block receives only the fraction that fits.
    fn squeeze_into(&mut self, buf: &mut [Trit]) -> Result<(), Self::Error> {
        for block in buf.chunks_mut(HASH_LENGTH) {
            block.copy_from_slice(&self.state[..block.len()]);
            self.transform();
        }
        Ok(())
    }
}

macro_rules! fixed_rounds_curlp {
    ($(#[$doc:meta])* $name:ident, $rounds:expr) => {
        $(#[$doc])*
        pub struct $name(CurlP);

        impl $name {
            /// Creates the sponge with a zero state.
            pub fn new() -> Self {
                Self(CurlP::new($rounds))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Sponge for $name {
            type Error = Infallible;

            fn reset(&mut self) {
                self.0.reset()
            }

            fn absorb(&mut self, input: &[Trit]) -> Result<(), Self::Error> {
                self.0.absorb(input)
            }

            fn squeeze_into(&mut self, buf: &mut [Trit]) -> Result<(), Self::Error> {
                self.0.squeeze_into(buf)
            }
        }
    };
}

fixed_rounds_curlp!(
    /// `CurlP` fixed at 27 rounds, the parameterization of all bundle digests.
    CurlP27,
    CurlPRounds::Rounds27
);

fixed_rounds_curlp!(
    /// `CurlP` fixed at 81 rounds.
    CurlP81,
    CurlPRounds::Rounds81
);
