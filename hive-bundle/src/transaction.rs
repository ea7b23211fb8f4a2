// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use crate::constants::{
    offset, ADDRESS_TRYT_LEN, CHECKSUM_TRYT_LEN, ESSENCE_TRIT_LEN, FRAGMENT_TRYT_LEN, HASH_TRYT_LEN, IOTA_SUPPLY,
    NONCE_TRYT_LEN, TAG_TRYT_LEN, TIMESTAMP_TRIT_LEN, TRANSACTION_TRYT_LEN, VALUE_TRIT_LEN,
};

use hive_crypto::ternary::{
    sponge::{CurlP27, Sponge},
    HASH_LENGTH,
};
use hive_ternary::{convert, Trit, TritBuf, Tryte, TryteString};

use thiserror::Error;

use std::fmt;

/// Errors occurring while constructing transactions and their fields.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum Error {
    /// A typed field was created from more trytes than it can hold.
    #[error("Invalid {field} length {length}.")]
    InvalidFieldLength {
        /// The name of the field.
        field: &'static str,
        /// The offending length, in trytes.
        length: usize,
    },
    /// A typed field was created from invalid trytes or trits.
    #[error(transparent)]
    InvalidTrytes(#[from] hive_ternary::Error),
    /// A numeric field does not fit its domain.
    #[error("Invalid numeric field {0}.")]
    InvalidNumericField(&'static str),
    /// A value outside of the token supply.
    #[error("Invalid value {0}.")]
    InvalidValue(i64),
    /// An address whose checksum does not match its content.
    #[error("Invalid address checksum.")]
    InvalidChecksum,
}

macro_rules! fixed_trytes {
    ($(#[$doc:meta])* $name:ident, $len:expr) => {
        $(#[$doc])*
        #[derive(Clone, Eq, Hash, PartialEq)]
        pub struct $name(TryteString);

        impl $name {
            /// The length of the field, in trytes.
            pub const LENGTH: usize = $len;

            /// Creates a field of all nines.
            pub fn zeros() -> Self {
                Self(TryteString::nines($len))
            }

            /// Creates the field from trytes, right-padding shorter input with nines.
            pub fn try_from_inner(mut trytes: TryteString) -> Result<Self, Error> {
                if trytes.len() > $len {
                    return Err(Error::InvalidFieldLength {
                        field: stringify!($name),
                        length: trytes.len(),
                    });
                }
                trytes.pad_right($len);
                Ok(Self(trytes))
            }

            /// Creates the field from trytes assumed to have the exact length.
            pub fn from_inner_unchecked(trytes: TryteString) -> Self {
                Self(trytes)
            }

            /// Parses the field from its character representation, padding shorter input.
            pub fn try_from_str(s: &str) -> Result<Self, Error> {
                Self::try_from_inner(TryteString::try_from_str(s)?)
            }

            /// Views the field as a tryte string.
            pub fn to_inner(&self) -> &TryteString {
                &self.0
            }

            /// Decomposes the field into trits.
            pub fn as_trits(&self) -> TritBuf {
                self.0.as_trits()
            }

            /// Recomposes the field from trits assumed to span the exact length.
            pub fn from_trits_unchecked(trits: &[Trit]) -> Self {
                Self(
                    trits
                        .chunks(3)
                        .map(|c| Tryte::from_trits([c[0], c[1], c[2]]))
                        .collect(),
                )
            }

            /// Whether the field consists only of nines.
            pub fn is_all_nines(&self) -> bool {
                self.0.is_all_nines()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}(\"{}\")", stringify!($name), self.0)
            }
        }
    };
}

fixed_trytes!(
    /// The owner identifier of a transaction, without checksum.
    Address,
    ADDRESS_TRYT_LEN
);
fixed_trytes!(
    /// An arbitrary user-facing label.
    Tag,
    TAG_TRYT_LEN
);
fixed_trytes!(
    /// The output of the attachment proof of work.
    Nonce,
    NONCE_TRYT_LEN
);
fixed_trytes!(
    /// One signature or message fragment.
    Fragment,
    FRAGMENT_TRYT_LEN
);
fixed_trytes!(
    /// The hash binding all transactions of a bundle.
    BundleHash,
    HASH_TRYT_LEN
);
fixed_trytes!(
    /// The hash of a single transaction.
    TransactionHash,
    HASH_TRYT_LEN
);
fixed_trytes!(
    /// A fully serialized transaction.
    TransactionTrytes,
    TRANSACTION_TRYT_LEN
);

impl Address {
    /// Computes the 9-tryte checksum of the address.
    pub fn checksum(&self) -> TryteString {
        let mut sponge = CurlP27::default();
        let mut digest = TritBuf::zeros(HASH_LENGTH);
        // `CurlP` is infallible.
        let _ = sponge.absorb(&self.as_trits());
        let _ = sponge.squeeze_into(&mut digest);

        let trytes: TryteString = digest
            .chunks(3)
            .map(|c| Tryte::from_trits([c[0], c[1], c[2]]))
            .collect();
        TryteString::from(&trytes.as_trytes()[HASH_TRYT_LEN - CHECKSUM_TRYT_LEN..])
    }

    /// Returns the 90-tryte form of the address, checksum appended.
    pub fn with_checksum(&self) -> TryteString {
        let mut trytes = self.0.clone();
        trytes.extend_from_slice(self.checksum().as_trytes());
        trytes
    }

    /// Parses a 90-tryte address and verifies its checksum.
    pub fn try_from_inner_with_checksum(trytes: TryteString) -> Result<Self, Error> {
        if trytes.len() != ADDRESS_TRYT_LEN + CHECKSUM_TRYT_LEN {
            return Err(Error::InvalidFieldLength {
                field: "Address",
                length: trytes.len(),
            });
        }
        let address = Self(TryteString::from(&trytes.as_trytes()[..ADDRESS_TRYT_LEN]));
        let checksum = TryteString::from(&trytes.as_trytes()[ADDRESS_TRYT_LEN..]);
        if address.checksum() != checksum {
            return Err(Error::InvalidChecksum);
        }
        Ok(address)
    }
}

/// Builds the 486-trit bundle essence of one transaction.
pub(crate) fn essence_trits(
    address: &Address,
    value: i64,
    obsolete_tag: &Tag,
    timestamp: u64,
    current_index: usize,
    last_index: usize,
) -> TritBuf {
    let mut essence = TritBuf::with_capacity(ESSENCE_TRIT_LEN);
    essence.extend_from_slice(&address.as_trits());
    essence.extend_from_slice(&convert::trits_from_int_padded(value, VALUE_TRIT_LEN));
    essence.extend_from_slice(&obsolete_tag.as_trits());
    essence.extend_from_slice(&convert::trits_from_int_padded(timestamp as i64, TIMESTAMP_TRIT_LEN));
    essence.extend_from_slice(&convert::trits_from_int_padded(current_index as i64, TIMESTAMP_TRIT_LEN));
    essence.extend_from_slice(&convert::trits_from_int_padded(last_index as i64, TIMESTAMP_TRIT_LEN));
    essence
}

/// A single transaction of a bundle, with its canonical 2673-tryte wire form.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Transaction {
    signature_message_fragment: Fragment,
    address: Address,
    value: i64,
    obsolete_tag: Tag,
    timestamp: u64,
    current_index: usize,
    last_index: usize,
    bundle_hash: BundleHash,
    trunk_transaction_hash: TransactionHash,
    branch_transaction_hash: TransactionHash,
    tag: Tag,
    attachment_timestamp: u64,
    attachment_timestamp_lower_bound: u64,
    attachment_timestamp_upper_bound: u64,
    nonce: Nonce,
    hash: TransactionHash,
}

impl Transaction {
    /// The signature fragment of an input, or the message fragment otherwise.
    pub fn signature_message_fragment(&self) -> &Fragment {
        &self.signature_message_fragment
    }

    /// The address the transaction spends to or draws from.
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// The transferred value; negative for inputs.
    pub fn value(&self) -> i64 {
        self.value
    }

    /// The tag covered by the bundle hash.
    pub fn obsolete_tag(&self) -> &Tag {
        &self.obsolete_tag
    }

    /// Creation time, in seconds since the epoch.
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// The position of the transaction inside its bundle.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The position of the last transaction of the bundle.
    pub fn last_index(&self) -> usize {
        self.last_index
    }

    /// The hash binding the bundle the transaction belongs to.
    pub fn bundle_hash(&self) -> &BundleHash {
        &self.bundle_hash
    }

    /// The first transaction the transaction approves.
    pub fn trunk_transaction_hash(&self) -> &TransactionHash {
        &self.trunk_transaction_hash
    }

    /// The second transaction the transaction approves.
    pub fn branch_transaction_hash(&self) -> &TransactionHash {
        &self.branch_transaction_hash
    }

    /// The user-facing tag.
    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    /// Attachment time, in milliseconds since the epoch.
    pub fn attachment_timestamp(&self) -> u64 {
        self.attachment_timestamp
    }

    /// Lower bound of the attachment time window.
    pub fn attachment_timestamp_lower_bound(&self) -> u64 {
        self.attachment_timestamp_lower_bound
    }

    /// Upper bound of the attachment time window.
    pub fn attachment_timestamp_upper_bound(&self) -> u64 {
        self.attachment_timestamp_upper_bound
    }

    /// The proof-of-work nonce.
    pub fn nonce(&self) -> &Nonce {
        &self.nonce
    }

    /// The transaction hash.
    pub fn hash(&self) -> &TransactionHash {
        &self.hash
    }

    /// Whether the transaction draws value from its address.
    pub fn is_input(&self) -> bool {
        self.value < 0
    }

    /// The 486 trits of the transaction covered by the bundle hash.
    pub fn essence(&self) -> TritBuf {
        essence_trits(
            &self.address,
            self.value,
            &self.obsolete_tag,
            self.timestamp,
            self.current_index,
            self.last_index,
        )
    }

    /// Serializes the transaction into its canonical 2673-tryte form.
    pub fn as_trytes(&self) -> TransactionTrytes {
        let mut trytes = TryteString::new();
        trytes.extend_from_slice(self.signature_message_fragment.to_inner().as_trytes());
        trytes.extend_from_slice(self.address.to_inner().as_trytes());
        push_int_trytes(&mut trytes, self.value, VALUE_TRIT_LEN);
        trytes.extend_from_slice(self.obsolete_tag.to_inner().as_trytes());
        push_int_trytes(&mut trytes, self.timestamp as i64, TIMESTAMP_TRIT_LEN);
        push_int_trytes(&mut trytes, self.current_index as i64, TIMESTAMP_TRIT_LEN);
        push_int_trytes(&mut trytes, self.last_index as i64, TIMESTAMP_TRIT_LEN);
        trytes.extend_from_slice(self.bundle_hash.to_inner().as_trytes());
        trytes.extend_from_slice(self.trunk_transaction_hash.to_inner().as_trytes());
        trytes.extend_from_slice(self.branch_transaction_hash.to_inner().as_trytes());
        trytes.extend_from_slice(self.tag.to_inner().as_trytes());
        push_int_trytes(&mut trytes, self.attachment_timestamp as i64, TIMESTAMP_TRIT_LEN);
        push_int_trytes(&mut trytes, self.attachment_timestamp_lower_bound as i64, TIMESTAMP_TRIT_LEN);
        push_int_trytes(&mut trytes, self.attachment_timestamp_upper_bound as i64, TIMESTAMP_TRIT_LEN);
        trytes.extend_from_slice(self.nonce.to_inner().as_trytes());

        TransactionTrytes::from_inner_unchecked(trytes)
    }

    /// Deserializes a transaction from its canonical 2673-tryte form.
    ///
    /// The transaction hash is computed over the whole serialized form unless
    /// a pre-computed `hash` is supplied.
    pub fn from_trytes(trytes: &TransactionTrytes, hash: Option<TransactionHash>) -> Result<Self, Error> {
        let inner = trytes.to_inner().as_trytes();
        let trits = trytes.as_trits();

        let field = |start: usize, len: usize| TryteString::from(&inner[start..start + len]);
        let numeric = |start: usize, len: usize, name: &'static str| -> Result<i64, Error> {
            convert::trits_to_int::<i64>(&trits[start * 3..(start + len) * 3])
                .map_err(|_| Error::InvalidNumericField(name))
        };
        let unsigned = |value: i64, name: &'static str| -> Result<u64, Error> {
            u64::try_from(value).map_err(|_| Error::InvalidNumericField(name))
        };

        let value = numeric(offset::VALUE, 27, "value")?;
        if value.abs() > IOTA_SUPPLY {
            return Err(Error::InvalidValue(value));
        }

        let current_index = unsigned(numeric(offset::CURRENT_INDEX, 9, "current_index")?, "current_index")? as usize;
        let last_index = unsigned(numeric(offset::LAST_INDEX, 9, "last_index")?, "last_index")? as usize;

        let hash = hash.unwrap_or_else(|| transaction_hash(trytes));

        Ok(Self {
            signature_message_fragment: Fragment::from_inner_unchecked(field(
                offset::SIGNATURE_MESSAGE_FRAGMENT,
                FRAGMENT_TRYT_LEN,
            )),
            address: Address::from_inner_unchecked(field(offset::ADDRESS, ADDRESS_TRYT_LEN)),
            value,
            obsolete_tag: Tag::from_inner_unchecked(field(offset::OBSOLETE_TAG, TAG_TRYT_LEN)),
            timestamp: unsigned(numeric(offset::TIMESTAMP, 9, "timestamp")?, "timestamp")?,
            current_index,
            last_index,
            bundle_hash: BundleHash::from_inner_unchecked(field(offset::BUNDLE_HASH, HASH_TRYT_LEN)),
            trunk_transaction_hash: TransactionHash::from_inner_unchecked(field(
                offset::TRUNK_TRANSACTION_HASH,
                HASH_TRYT_LEN,
            )),
            branch_transaction_hash: TransactionHash::from_inner_unchecked(field(
                offset::BRANCH_TRANSACTION_HASH,
                HASH_TRYT_LEN,
            )),
            tag: Tag::from_inner_unchecked(field(offset::TAG, TAG_TRYT_LEN)),
            attachment_timestamp: unsigned(
                numeric(offset::ATTACHMENT_TIMESTAMP, 9, "attachment_timestamp")?,
                "attachment_timestamp",
            )?,
            attachment_timestamp_lower_bound: unsigned(
                numeric(
                    offset::ATTACHMENT_TIMESTAMP_LOWER_BOUND,
                    9,
                    "attachment_timestamp_lower_bound",
                )?,
                "attachment_timestamp_lower_bound",
            )?,
            attachment_timestamp_upper_bound: unsigned(
                numeric(
                    offset::ATTACHMENT_TIMESTAMP_UPPER_BOUND,
                    9,
                    "attachment_timestamp_upper_bound",
                )?,
                "attachment_timestamp_upper_bound",
            )?,
            nonce: Nonce::from_inner_unchecked(field(offset::NONCE, NONCE_TRYT_LEN)),
            hash,
        })
    }
}

fn push_int_trytes(trytes: &mut TryteString, value: i64, trit_len: usize) {
    let trits = convert::trits_from_int_padded(value, trit_len);
    for chunk in trits.chunks(3) {
        trytes.push(Tryte::from_trits([chunk[0], chunk[1], chunk[2]]));
    }
}

/// Computes the hash of a serialized transaction.
pub(crate) fn transaction_hash(trytes: &TransactionTrytes) -> TransactionHash {
    let mut sponge = CurlP27::default();
    let mut digest = TritBuf::zeros(HASH_LENGTH);
    // `CurlP` is infallible.
    let _ = sponge.absorb(&trytes.as_trits());
    let _ = sponge.squeeze_into(&mut digest);
    TransactionHash::from_trits_unchecked(&digest)
}

/// An incremental builder of [`Transaction`]s. Unset fields default to zeros.
#[derive(Default)]
pub struct TransactionBuilder {
    signature_message_fragment: Option<Fragment>,
    address: Option<Address>,
    value: Option<i64>,
    obsolete_tag: Option<Tag>,
    timestamp: Option<u64>,
    current_index: Option<usize>,
    last_index: Option<usize>,
    bundle_hash: Option<BundleHash>,
    trunk_transaction_hash: Option<TransactionHash>,
    branch_transaction_hash: Option<TransactionHash>,
    tag: Option<Tag>,
    attachment_timestamp: Option<u64>,
    attachment_timestamp_lower_bound: Option<u64>,
    attachment_timestamp_upper_bound: Option<u64>,
    nonce: Option<Nonce>,
    hash: Option<TransactionHash>,
}

impl TransactionBuilder {
    /// Creates a builder with every field unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the signature or message fragment.
    pub fn with_signature_message_fragment(mut self, fragment: Fragment) -> Self {
        self.signature_message_fragment.replace(fragment);
        self
    }

    /// Sets the address.
    pub fn with_address(mut self, address: Address) -> Self {
        self.address.replace(address);
        self
    }

    /// Sets the value.
    pub fn with_value(mut self, value: i64) -> Self {
        self.value.replace(value);
        self
    }

    /// Sets the obsolete tag.
    pub fn with_obsolete_tag(mut self, obsolete_tag: Tag) -> Self {
        self.obsolete_tag.replace(obsolete_tag);
        self
    }

    /// Sets the timestamp.
    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp.replace(timestamp);
        self
    }

    /// Sets the position of the transaction inside its bundle.
    pub fn with_current_index(mut self, current_index: usize) -> Self {
        self.current_index.replace(current_index);
        self
    }

    /// Sets the position of the last transaction of the bundle.
    pub fn with_last_index(mut self, last_index: usize) -> Self {
        self.last_index.replace(last_index);
        self
    }

    /// Sets the bundle hash.
    pub fn with_bundle_hash(mut self, bundle_hash: BundleHash) -> Self {
        self.bundle_hash.replace(bundle_hash);
        self
    }

    /// Sets the trunk transaction hash.
    pub fn with_trunk_transaction_hash(mut self, trunk: TransactionHash) -> Self {
        self.trunk_transaction_hash.replace(trunk);
        self
    }

    /// Sets the branch transaction hash.
    pub fn with_branch_transaction_hash(mut self, branch: TransactionHash) -> Self {
        self.branch_transaction_hash.replace(branch);
        self
    }

    /// Sets the tag.
    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tag.replace(tag);
        self
    }

    /// Sets the attachment timestamp.
    pub fn with_attachment_timestamp(mut self, attachment_timestamp: u64) -> Self {
        self.attachment_timestamp.replace(attachment_timestamp);
        self
    }

    /// Sets the lower bound of the attachment time window.
    pub fn with_attachment_timestamp_lower_bound(mut self, bound: u64) -> Self {
        self.attachment_timestamp_lower_bound.replace(bound);
        self
    }

    /// Sets the upper bound of the attachment time window.
    pub fn with_attachment_timestamp_upper_bound(mut self, bound: u64) -> Self {
        self.attachment_timestamp_upper_bound.replace(bound);
        self
    }

    /// Sets the nonce.
    pub fn with_nonce(mut self, nonce: Nonce) -> Self {
        self.nonce.replace(nonce);
        self
    }

    /// Sets a pre-computed transaction hash, skipping its computation.
    pub fn with_hash(mut self, hash: TransactionHash) -> Self {
        self.hash.replace(hash);
        self
    }

    /// Builds the transaction, computing its hash unless one was supplied.
    pub fn build(self) -> Result<Transaction, Error> {
        let value = self.value.unwrap_or(0);
        if value.abs() > IOTA_SUPPLY {
            return Err(Error::InvalidValue(value));
        }

        let current_index = self.current_index.unwrap_or(0);
        let last_index = self.last_index.unwrap_or(0);

        let mut transaction = Transaction {
            signature_message_fragment: self.signature_message_fragment.unwrap_or_else(Fragment::zeros),
            address: self.address.unwrap_or_else(Address::zeros),
            value,
            obsolete_tag: self.obsolete_tag.unwrap_or_else(Tag::zeros),
            timestamp: self.timestamp.unwrap_or(0),
            current_index,
            last_index,
            bundle_hash: self.bundle_hash.unwrap_or_else(BundleHash::zeros),
            trunk_transaction_hash: self.trunk_transaction_hash.unwrap_or_else(TransactionHash::zeros),
            branch_transaction_hash: self.branch_transaction_hash.unwrap_or_else(TransactionHash::zeros),
            tag: self.tag.unwrap_or_else(Tag::zeros),
            attachment_timestamp: self.attachment_timestamp.unwrap_or(0),
            attachment_timestamp_lower_bound: self.attachment_timestamp_lower_bound.unwrap_or(0),
            attachment_timestamp_upper_bound: self.attachment_timestamp_upper_bound.unwrap_or(0),
            nonce: self.nonce.unwrap_or_else(Nonce::zeros),
            hash: TransactionHash::zeros(),
        };

        transaction.hash = match self.hash {
            Some(hash) => hash,
            None => transaction_hash(&transaction.as_trytes()),
        };

        Ok(transaction)
    }
}
