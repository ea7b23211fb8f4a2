// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use crate::Error;

use std::{convert::TryFrom, fmt};

/// A balanced trit, the fundamental unit of ternary arithmetic.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(i8)]
pub enum Trit {
    /// The value `-1`.
    NegOne = -1,
    /// The value `0`.
    Zero = 0,
    /// The value `1`.
    PlusOne = 1,
}

impl Trit {
    /// Returns the numeric value of the trit.
    pub fn value(self) -> i8 {
        self as i8
    }
}

impl TryFrom<i8> for Trit {
    type Error = Error;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Trit::NegOne),
            0 => Ok(Trit::Zero),
            1 => Ok(Trit::PlusOne),
            _ => Err(Error::InvalidTrit(value)),
        }
    }
}

impl From<Trit> for i8 {
    fn from(trit: Trit) -> Self {
        trit.value()
    }
}

impl fmt::Display for Trit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}
