// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use crate::{
    bundle::Bundle,
    transaction::BundleHash,
};

use hive_crypto::ternary::sponge::CurlP27;
use hive_signing::ternary::{
    wots::WotsSignature, PublicKey, RecoverableSignature, Signature,
};
use hive_ternary::{Trit, TritBuf};

/// Checks a bundle for structural consistency and authentic signatures.
///
/// Errors are accumulated as human-readable messages; an empty list means the
/// bundle is valid. Each failing tier of checks stops all deeper tiers, so
/// the expensive signature verification only runs on structurally sound
/// bundles.
#[derive(Debug)]
pub struct BundleValidator {
    errors: Vec<String>,
}

impl BundleValidator {
    /// Validates `bundle`, eagerly collecting every error of the first failing tier.
    pub fn new(bundle: &Bundle) -> Self {
        let mut validator = Self { errors: Vec::new() };
        validator.validate(bundle);
        validator
    }

    /// The accumulated error messages, in check order.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Whether the bundle passed every check.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn validate(&mut self, bundle: &Bundle) {
        if bundle.is_empty() {
            return;
        }

        self.check_indices(bundle);
        if !self.errors.is_empty() {
            return;
        }

        if !self.check_balance(bundle) {
            return;
        }

        let hash = bundle.calculate_hash();
        if !self.check_bundle_hash(bundle, &hash) {
            return;
        }

        self.check_signatures(bundle, &hash);
    }

    fn check_indices(&mut self, bundle: &Bundle) {
        let last_index = bundle.len() - 1;

        for (i, transaction) in bundle.iter().enumerate() {
            if transaction.current_index() != i {
                self.errors.push(format!(
                    "Transaction {} has invalid current index value (expected {}, actual {}).",
                    i,
                    i,
                    transaction.current_index()
                ));
            }
            if transaction.last_index() != last_index {
                self.errors.push(format!(
                    "Transaction {} has invalid last index value (expected {}, actual {}).",
                    i,
                    last_index,
                    transaction.last_index()
                ));
            }
        }
    }

    fn check_balance(&mut self, bundle: &Bundle) -> bool {
        let balance: i64 = bundle.iter().map(|t| t.value()).sum();
        if balance != 0 {
            self.errors
                .push(format!("Bundle has invalid balance (expected 0, actual {}).", balance));
            return false;
        }
        true
    }

    fn check_bundle_hash(&mut self, bundle: &Bundle, expected: &BundleHash) -> bool {
        let mut consistent = true;
        for (i, transaction) in bundle.iter().enumerate() {
            if transaction.bundle_hash() != expected {
                self.errors.push(format!("Transaction {} has invalid bundle hash.", i));
                consistent = false;
            }
        }
        consistent
    }

    fn check_signatures(&mut self, bundle: &Bundle, hash: &BundleHash) {
        let message = hash.as_trits();
        let mut i = 0;

        while i < bundle.len() {
            if !bundle[i].is_input() {
                i += 1;
                continue;
            }

            let address = bundle[i].address().clone();
            let mut fragments = TritBuf::new();
            fragments.extend_from_slice(&bundle[i].signature_message_fragment().as_trits());
            let mut fragment_count = 1;
            let mut amount_error = false;

            let mut j = i + 1;
            while j < bundle.len() && bundle[j].address() == &address {
                if bundle[j].value() != 0 {
                    self.errors.push(format!(
                        "Transaction {} has invalid amount (expected 0, actual {}).",
                        j,
                        bundle[j].value()
                    ));
                    amount_error = true;
                    break;
                }
                fragments.extend_from_slice(&bundle[j].signature_message_fragment().as_trits());
                fragment_count += 1;
                j += 1;
            }

            if amount_error {
                // The run is unusable; skip the rest of it without verifying.
                while j < bundle.len() && bundle[j].address() == &address {
                    j += 1;
                }
                i = j;
                continue;
            }

            if !verify_fragments(fragments, &message, &address.as_trits()) {
                self.errors.push(format!(
                    "Transaction {} has invalid signature (using {} fragments).",
                    i, fragment_count
                ));
            }

            i = j;
        }
    }
}

fn verify_fragments(fragments: TritBuf, message: &[Trit], address: &[Trit]) -> bool {
    match WotsSignature::<CurlP27>::from_trits(fragments) {
        Ok(signature) => match signature.recover_public_key(message) {
            Ok(public_key) => public_key.as_trits() == address,
            Err(_) => false,
        },
        Err(_) => false,
    }
}
