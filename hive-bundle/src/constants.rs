// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Lengths and offsets of the canonical transaction wire layout.

/// The total number of tokens in circulation, `(3^33 - 1) / 2`.
pub const IOTA_SUPPLY: i64 = 2_779_530_283_277_761;

/// The length of a serialized transaction, in trytes.
pub const TRANSACTION_TRYT_LEN: usize = 2673;

/// The length of a signature or message fragment, in trytes.
pub const FRAGMENT_TRYT_LEN: usize = 2187;

/// The length of an address, in trytes.
pub const ADDRESS_TRYT_LEN: usize = 81;

/// The length of an address checksum, in trytes.
pub const CHECKSUM_TRYT_LEN: usize = 9;

/// The length of a tag, in trytes.
pub const TAG_TRYT_LEN: usize = 27;

/// The length of a nonce, in trytes.
pub const NONCE_TRYT_LEN: usize = 27;

/// The length of a hash, in trytes.
pub const HASH_TRYT_LEN: usize = 81;

/// The length of the value field, in trits.
pub const VALUE_TRIT_LEN: usize = 81;

/// The length of the timestamp and index fields, in trits.
pub const TIMESTAMP_TRIT_LEN: usize = 27;

/// The length of one transaction's bundle essence, in trits.
pub const ESSENCE_TRIT_LEN: usize = 486;

/// Tryte offsets of the fields of a serialized transaction.
pub(crate) mod offset {
    pub const SIGNATURE_MESSAGE_FRAGMENT: usize = 0;
    pub const ADDRESS: usize = 2187;
    pub const VALUE: usize = 2268;
    pub const OBSOLETE_TAG: usize = 2295;
    pub const TIMESTAMP: usize = 2322;
    pub const CURRENT_INDEX: usize = 2331;
    pub const LAST_INDEX: usize = 2340;
    pub const BUNDLE_HASH: usize = 2349;
    pub const TRUNK_TRANSACTION_HASH: usize = 2430;
    pub const BRANCH_TRANSACTION_HASH: usize = 2511;
    pub const TAG: usize = 2592;
    pub const ATTACHMENT_TIMESTAMP: usize = 2619;
    pub const ATTACHMENT_TIMESTAMP_LOWER_BOUND: usize = 2628;
    pub const ATTACHMENT_TIMESTAMP_UPPER_BOUND: usize = 2637;
    pub const NONCE: usize = 2646;
}
