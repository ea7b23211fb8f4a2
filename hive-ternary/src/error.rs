// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Ternary construction errors.

use thiserror::Error;

/// Errors occurring while constructing ternary values.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum Error {
    /// A value outside of `[-1, 1]` was interpreted as a trit.
    #[error("Invalid trit value {0}.")]
    InvalidTrit(i8),
    /// A value outside of `[-13, 13]` was interpreted as a tryte.
    #[error("Invalid tryte value {0}.")]
    InvalidTryteValue(i8),
    /// A character outside of the tryte alphabet `9A..Z`.
    #[error("Invalid tryte character '{0}'.")]
    InvalidTryteChar(char),
    /// A trit slice whose length is not a multiple of three was interpreted as trytes.
    #[error("Trit length {0} is not a multiple of three.")]
    InvalidTritsLength(usize),
}
