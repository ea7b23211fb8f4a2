// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Construction, serialization, signing and validation of value-transfer
//! bundles on the ternary tangle.

pub mod constants;
pub mod unit;

mod bundle;
mod proposed;
mod transaction;
mod validator;

pub use bundle::Bundle;
pub use proposed::{Error as BundleBuilderError, Input, ProposedBundle, ProposedTransaction};
pub use transaction::{
    Address, BundleHash, Error as TransactionError, Fragment, Nonce, Tag, Transaction, TransactionBuilder,
    TransactionHash, TransactionTrytes,
};
pub use validator::BundleValidator;
