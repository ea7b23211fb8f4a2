// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use crate::transaction::{BundleHash, Transaction};

use hive_crypto::ternary::{
    sponge::{CurlP27, Sponge},
    HASH_LENGTH,
};
use hive_ternary::{DecodeError, ErrorPolicy, TritBuf, TryteString};

use std::ops::Index;

/// An ordered, immutable sequence of transactions forming one atomic transfer.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Bundle(Vec<Transaction>);

impl Bundle {
    /// Creates an empty bundle.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// The number of transactions in the bundle.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the bundle contains no transactions.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The transaction at `index`, in `current_index` order.
    pub fn get(&self, index: usize) -> Option<&Transaction> {
        self.0.get(index)
    }

    /// Iterates the transactions in `current_index` order.
    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.0.iter()
    }

    /// The bundle hash carried by the head transaction, if any.
    pub fn hash(&self) -> Option<&BundleHash> {
        self.0.first().map(|t| t.bundle_hash())
    }

    /// Recomputes the bundle hash over the essences of all transactions.
    pub fn calculate_hash(&self) -> BundleHash {
        bundle_hash(self.0.iter().map(|t| t.essence()))
    }

    /// Decodes the human-readable messages carried by the bundle.
    ///
    /// Transactions are grouped into consecutive runs sharing an address;
    /// runs led by an input are signatures and are skipped, and runs whose
    /// concatenated fragments are all padding carry no message. The
    /// remaining runs decode through the byte codec and UTF-8 under
    /// `policy`; [`ErrorPolicy::Drop`] silently omits undecodable messages.
    pub fn messages(&self, policy: ErrorPolicy) -> Result<Vec<String>, DecodeError> {
        let mut messages = Vec::new();

        for group in self.group_by_address() {
            if group[0].is_input() {
                continue;
            }

            let mut trytes = TryteString::new();
            for transaction in group {
                trytes.extend_from_slice(transaction.signature_message_fragment().to_inner().as_trytes());
            }
            if trytes.is_all_nines() {
                continue;
            }

            match trytes.as_utf8_string(policy) {
                Ok(message) => messages.push(message),
                Err(_) if policy == ErrorPolicy::Drop => continue,
                Err(e) => return Err(e),
            }
        }

        Ok(messages)
    }

    /// Splits the bundle into consecutive runs of transactions sharing an address.
    fn group_by_address(&self) -> Vec<&[Transaction]> {
        let mut groups = Vec::new();
        if self.0.is_empty() {
            return groups;
        }

        let mut start = 0;
        for i in 1..self.0.len() {
            if self.0[i].address() != self.0[i - 1].address() {
                groups.push(&self.0[start..i]);
                start = i;
            }
        }
        groups.push(&self.0[start..]);

        groups
    }
}

impl From<Vec<Transaction>> for Bundle {
    fn from(transactions: Vec<Transaction>) -> Self {
        Self(transactions)
    }
}

impl Index<usize> for Bundle {
    type Output = Transaction;

    fn index(&self, index: usize) -> &Transaction {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a Bundle {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Absorbs transaction essences into a shared sponge and squeezes the bundle hash.
pub(crate) fn bundle_hash(essences: impl Iterator<Item = TritBuf>) -> BundleHash {
    let mut sponge = CurlP27::default();
    let mut digest = TritBuf::zeros(HASH_LENGTH);

    // `CurlP` is infallible.
    for essence in essences {
        let _ = sponge.absorb(&essence);
    }
    let _ = sponge.squeeze_into(&mut digest);

    BundleHash::from_trits_unchecked(&digest)
}
