// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Conversions between integers, byte strings and balanced trits.

use crate::{Trit, TritBuf};

use num_traits::{CheckedAdd, CheckedMul, FromPrimitive, Zero};
use thiserror::Error;

/// Errors occurring while converting between trits and integers.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum Error {
    /// The trit slice was empty.
    #[error("Empty trit slice.")]
    Empty,
    /// The trit slice does not fit into the target integer type.
    #[error("Trit slice overflows the target integer.")]
    Overflow,
}

/// Interprets a trit slice, least significant first, as an integer.
pub fn trits_to_int<I>(trits: &[Trit]) -> Result<I, Error>
where
    I: Copy + Zero + CheckedAdd + CheckedMul + FromPrimitive,
{
    if trits.is_empty() {
        return Err(Error::Empty);
    }

    let three = I::from_i8(3).ok_or(Error::Overflow)?;
    let mut accumulator = I::zero();

    for trit in trits.iter().rev() {
        let value = I::from_i8(trit.value()).ok_or(Error::Overflow)?;
        accumulator = accumulator
            .checked_mul(&three)
            .ok_or(Error::Overflow)?
            .checked_add(&value)
            .ok_or(Error::Overflow)?;
    }

    Ok(accumulator)
}

impl From<i64> for TritBuf {
    /// Encodes an integer in balanced ternary, least significant trit first.
    /// Zero encodes as a single zero trit.
    fn from(value: i64) -> Self {
        let mut n = value;
        let mut buf = TritBuf::new();

        loop {
            let mut rem = n % 3;
            n /= 3;
            if rem == 2 {
                rem = -1;
                n += 1;
            } else if rem == -2 {
                rem = 1;
                n -= 1;
            }
            buf.push(match rem {
                -1 => Trit::NegOne,
                0 => Trit::Zero,
                _ => Trit::PlusOne,
            });
            if n == 0 {
                break;
            }
        }

        buf
    }
}

/// Encodes an integer in balanced ternary, zero-padded to exactly `length` trits.
pub fn trits_from_int_padded(value: i64, length: usize) -> TritBuf {
    let mut buf = TritBuf::from(value);
    while buf.len() < length {
        buf.push(Trit::Zero);
    }
    buf.iter().take(length).copied().collect()
}

/// Interprets a byte string as a big-endian unsigned integer and encodes it
/// in balanced ternary, least significant trit first.
pub fn trits_from_bytes(bytes: &[u8]) -> TritBuf {
    let mut num: Vec<u8> = bytes.iter().skip_while(|b| **b == 0).copied().collect();
    let mut digits = Vec::new();

    while !num.is_empty() {
        // One round of big-endian long division by three.
        let mut rem = 0u32;
        for b in num.iter_mut() {
            let current = (rem << 8) + u32::from(*b);
            *b = (current / 3) as u8;
            rem = current % 3;
        }
        while num.first() == Some(&0) {
            num.remove(0);
        }
        digits.push(rem as u8);
    }

    // Rebalance unbalanced digits: a two becomes minus one with a carry.
    let mut buf = TritBuf::new();
    let mut carry = 0u8;
    for digit in digits {
        match digit + carry {
            0 => {
                buf.push(Trit::Zero);
                carry = 0;
            }
            1 => {
                buf.push(Trit::PlusOne);
                carry = 0;
            }
            2 => {
                buf.push(Trit::NegOne);
                carry = 1;
            }
            _ => {
                buf.push(Trit::Zero);
                carry = 1;
            }
        }
    }
    if carry == 1 {
        buf.push(Trit::PlusOne);
    }

    if buf.is_empty() {
        buf.push(Trit::Zero);
    }

    buf
}

/// Adds an integer to a fixed-width trit slice in place, least significant
/// trit first. A carry out of the most significant trit is discarded.
pub fn add_assign_int(trits: &mut [Trit], value: i64) {
    let addend = TritBuf::from(value);
    let mut carry = 0i8;

    for i in 0..trits.len() {
        let a = trits[i].value();
        let b = if i < addend.len() { addend[i].value() } else { 0 };
        let (trit, next_carry) = match a + b + carry {
            -3 => (Trit::Zero, -1),
            -2 => (Trit::PlusOne, -1),
            -1 => (Trit::NegOne, 0),
            0 => (Trit::Zero, 0),
            1 => (Trit::PlusOne, 0),
            2 => (Trit::NegOne, 1),
            _ => (Trit::Zero, 1),
        };
        trits[i] = trit;
        carry = next_carry;
        if carry == 0 && i + 1 >= addend.len() {
            break;
        }
    }
}
