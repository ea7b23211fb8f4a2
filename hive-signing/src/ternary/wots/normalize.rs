// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use hive_crypto::ternary::HASH_LENGTH;
use hive_ternary::{Trit, TritBuf, Tryte};

use thiserror::Error;

/// The number of trytes in one normalization window.
const WINDOW_TRYTES: usize = HASH_LENGTH / 9;

/// Errors occurring while normalizing a hash.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum NormalizeError {
    /// A message of a length other than one hash was normalized.
    #[error("Invalid message length {0}.")]
    InvalidMessageLength(usize),
}

/// Normalizes a hash so that it is safe to sign.
///
/// Each of the three 27-tryte windows is adjusted until its values sum to
/// zero, saturating individual trytes at plus or minus thirteen. The
/// operation is idempotent.
pub fn normalize(hash: &[Trit]) -> Result<TritBuf, NormalizeError> {
    if hash.len() != HASH_LENGTH {
        return Err(NormalizeError::InvalidMessageLength(hash.len()));
    }

    let values = normalized_tryte_values(hash);
    let mut buf = TritBuf::with_capacity(HASH_LENGTH);
    for value in values {
        // Normalized values stay within the tryte range.
        let tryte = Tryte::try_from(value).unwrap();
        buf.extend_from_slice(&tryte.as_trits());
    }

    Ok(buf)
}

/// Returns the normalized tryte values of a hash, assumed to be `HASH_LENGTH` trits.
pub(crate) fn normalized_tryte_values(hash: &[Trit]) -> Vec<i8> {
    let mut values: Vec<i8> = hash
        .chunks(3)
        .map(|chunk| Tryte::from_trits([chunk[0], chunk[1], chunk[2]]).value())
        .collect();

    for window in values.chunks_mut(WINDOW_TRYTES) {
        let mut sum: i32 = window.iter().map(|v| i32::from(*v)).sum();

        while sum > 0 {
            for value in window.iter_mut() {
                if *value > Tryte::MIN_VALUE {
                    *value -= 1;
                    break;
                }
            }
            sum -= 1;
        }

        while sum < 0 {
            for value in window.iter_mut() {
                if *value < Tryte::MAX_VALUE {
                    *value += 1;
                    break;
                }
            }
            sum += 1;
        }
    }

    values
}
