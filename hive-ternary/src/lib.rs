// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Ergonomic balanced-ternary manipulation utilities.

#![warn(missing_docs)]

pub mod convert;

mod error;
mod trit;
mod trits;
mod tryte;
mod tryte_string;

pub use error::Error;
pub use trit::Trit;
pub use trits::TritBuf;
pub use tryte::{Tryte, TRYTE_ALPHABET};
pub use tryte_string::{DecodeError, ErrorPolicy, TryteString};
