// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use crate::{
    bundle::{bundle_hash, Bundle},
    constants::IOTA_SUPPLY,
    transaction::{
        essence_trits, Address, BundleHash, Error as TransactionError, Fragment, Tag, TransactionBuilder,
    },
};

use hive_crypto::ternary::sponge::CurlP27;
use hive_signing::ternary::{
    seed::Seed,
    wots::{
        self, normalize, WotsPrivateKey, WotsSecurityLevel, WotsSpongePrivateKeyGeneratorBuilder,
        SIGNATURE_FRAGMENT_LENGTH,
    },
    PrivateKey, PrivateKeyGenerator, PublicKey, Signature,
};
use hive_ternary::{convert, Trit, Tryte, TryteString};

use thiserror::Error;

use std::time::{SystemTime, UNIX_EPOCH};

/// Errors occurring while staging, finalizing and signing a proposed bundle.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum Error {
    /// A mutating operation was attempted on a finalized bundle.
    #[error("Bundle is already finalized.")]
    AlreadyFinalized,
    /// A finalization-dependent operation was attempted on a staging bundle.
    #[error("Bundle is not finalized.")]
    NotFinalized,
    /// A bundle without transactions was finalized.
    #[error("Bundle has no transactions.")]
    Empty,
    /// A user spend with a negative value was added.
    #[error("Negative value {0}; use add_inputs for inputs.")]
    NegativeValue(i64),
    /// The inputs do not cover the spends.
    #[error("Insufficient inputs; bundle balance is {0}.")]
    InsufficientInputs(i64),
    /// The inputs exceed the spends and no change address is set.
    #[error("Unspent inputs with no change address; bundle balance is {0}.")]
    UnspentInputs(i64),
    /// A value outside of the token supply.
    #[error("Invalid value {0}.")]
    InvalidValue(i64),
    /// A transaction index outside of the bundle.
    #[error("Index {0} is out of range.")]
    IndexOutOfRange(usize),
    /// A transaction index that is not the head of an input.
    #[error("Transaction {0} is not an input.")]
    NotAnInput(usize),
    /// An input that already carries a signature.
    #[error("Transaction {0} is already signed.")]
    AlreadySigned(usize),
    /// A private key that does not belong to the input's address.
    #[error("Private key does not match the address of transaction {0}.")]
    InvalidAddress(usize),
    /// A private key whose security level differs from the input's.
    #[error("Invalid security level (expected {expected}, actual {actual}).")]
    InvalidSecurityLevel {
        /// The input's security level.
        expected: u8,
        /// The private key's security level.
        actual: u8,
    },
    /// A transaction field could not be constructed.
    #[error(transparent)]
    Transaction(#[from] TransactionError),
    /// A signing operation failed.
    #[error(transparent)]
    Signing(#[from] wots::Error),
}

/// A single proposed transfer: a recipient, a value and an optional message.
///
/// Staging and finalization progressively fill in the remaining record
/// fields; user code only supplies the constructor arguments.
#[derive(Clone, Debug)]
pub struct ProposedTransaction {
    address: Address,
    value: i64,
    tag: Option<Tag>,
    message: Option<TryteString>,
    pub(crate) obsolete_tag: Tag,
    pub(crate) fragment: Option<Fragment>,
    pub(crate) current_index: usize,
    pub(crate) last_index: usize,
    pub(crate) timestamp: u64,
    pub(crate) bundle_hash: Option<BundleHash>,
}

impl ProposedTransaction {
    /// Creates a proposed transfer of `value` to `address`.
    pub fn new(address: Address, value: i64) -> Self {
        Self {
            address,
            value,
            tag: None,
            message: None,
            obsolete_tag: Tag::zeros(),
            fragment: None,
            current_index: 0,
            last_index: 0,
            timestamp: 0,
            bundle_hash: None,
        }
    }

    /// Attaches a tag to the transfer.
    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.obsolete_tag = tag.clone();
        self.tag.replace(tag);
        self
    }

    /// Attaches a message to the transfer.
    pub fn with_message(mut self, message: TryteString) -> Self {
        self.message.replace(message);
        self
    }

    /// The recipient address.
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// The transferred value.
    pub fn value(&self) -> i64 {
        self.value
    }

    /// The tag, if one was attached.
    pub fn tag(&self) -> Option<&Tag> {
        self.tag.as_ref()
    }

    /// The message carried by this record, if any.
    pub fn message(&self) -> Option<&TryteString> {
        self.message.as_ref()
    }
}

/// An address owned by the signer, with the attributes needed to draw from it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Input {
    address: Address,
    balance: u64,
    key_index: u64,
    security_level: WotsSecurityLevel,
}

impl Input {
    /// Describes an owned address holding `balance` tokens.
    pub fn new(address: Address, balance: u64, key_index: u64, security_level: WotsSecurityLevel) -> Self {
        Self {
            address,
            balance,
            key_index,
            security_level,
        }
    }

    /// The owned address.
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// The balance drawn from the address.
    pub fn balance(&self) -> u64 {
        self.balance
    }

    /// The key index the address was derived from.
    pub fn key_index(&self) -> u64 {
        self.key_index
    }

    /// The security level the address was derived with.
    pub fn security_level(&self) -> WotsSecurityLevel {
        self.security_level
    }
}

/// A staged bundle under construction: spends, inputs and an optional change
/// target, finalized into a hash-bound sequence and signed per input.
#[derive(Debug, Default)]
pub struct ProposedBundle {
    records: Vec<ProposedTransaction>,
    inputs: Vec<(usize, Input)>,
    change_address: Option<Address>,
    hash: Option<BundleHash>,
}

impl ProposedBundle {
    /// Creates an empty staging bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of transaction records currently staged.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no records are staged.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The record at `index`.
    pub fn get(&self, index: usize) -> Option<&ProposedTransaction> {
        self.records.get(index)
    }

    /// The sum of all staged values; zero when the bundle is balanced.
    pub fn balance(&self) -> i64 {
        self.records.iter().map(|r| r.value).sum()
    }

    /// The bundle hash, once finalized.
    pub fn hash(&self) -> Option<&BundleHash> {
        self.hash.as_ref()
    }

    /// Whether the bundle has been finalized.
    pub fn is_finalized(&self) -> bool {
        self.hash.is_some()
    }

    /// The tag of the most recently staged record carrying one.
    ///
    /// Drives the tag of the change transaction.
    pub fn tag(&self) -> Tag {
        self.records
            .iter()
            .rev()
            .find_map(|r| r.tag.clone().filter(|t| !t.is_all_nines()))
            .unwrap_or_else(Tag::zeros)
    }

    /// Stages a spend. Messages longer than one fragment are split across
    /// consecutive records sharing the spend's address and tag, with the
    /// value carried by the first record only.
    pub fn add_transaction(&mut self, transaction: ProposedTransaction) -> Result<(), Error> {
        if self.is_finalized() {
            return Err(Error::AlreadyFinalized);
        }
        if transaction.value < 0 {
            return Err(Error::NegativeValue(transaction.value));
        }
        if transaction.value > IOTA_SUPPLY {
            return Err(Error::InvalidValue(transaction.value));
        }

        match &transaction.message {
            Some(message) if message.len() > Fragment::LENGTH => {
                let chunks: Vec<TryteString> = message
                    .as_trytes()
                    .chunks(Fragment::LENGTH)
                    .map(TryteString::from)
                    .collect();
                for (i, chunk) in chunks.into_iter().enumerate() {
                    let mut record = transaction.clone();
                    record.value = if i == 0 { transaction.value } else { 0 };
                    record.message = Some(chunk);
                    self.records.push(record);
                }
            }
            _ => self.records.push(transaction),
        }

        Ok(())
    }

    /// Stages inputs. Every input expands into `security_level` consecutive
    /// records at its address, the first drawing the whole balance.
    pub fn add_inputs(&mut self, inputs: &[Input]) -> Result<(), Error> {
        if self.is_finalized() {
            return Err(Error::AlreadyFinalized);
        }

        for input in inputs {
            let balance = i64::try_from(input.balance).unwrap_or(i64::MAX);
            if balance > IOTA_SUPPLY {
                return Err(Error::InvalidValue(balance));
            }
            let value = -balance;

            self.inputs.push((self.records.len(), input.clone()));
            for fragment_index in 0..input.security_level.fragments() {
                let mut record = ProposedTransaction::new(input.address.clone(), 0);
                if fragment_index == 0 {
                    record.value = value;
                }
                self.records.push(record);
            }
        }

        Ok(())
    }

    /// Records the address receiving any surplus input balance.
    pub fn send_unspent_inputs_to(&mut self, address: Address) -> Result<(), Error> {
        if self.is_finalized() {
            return Err(Error::AlreadyFinalized);
        }
        self.change_address.replace(address);
        Ok(())
    }

    /// Seals the bundle: balances it with a change transaction, assigns
    /// indices and one timestamp, and computes the bundle hash.
    ///
    /// The hash is recomputed with a stepped obsolete tag until its
    /// normalized form is free of the maximum tryte value, keeping every
    /// later signature sound.
    pub fn finalize(&mut self) -> Result<(), Error> {
        if self.is_finalized() {
            return Err(Error::AlreadyFinalized);
        }
        if self.records.is_empty() {
            return Err(Error::Empty);
        }

        let balance = self.balance();
        if balance > 0 {
            return Err(Error::InsufficientInputs(balance));
        }
        if balance < 0 {
            let change_address = self.change_address.clone().ok_or(Error::UnspentInputs(balance))?;
            let tag = self.tag();
            let change = ProposedTransaction::new(change_address, -balance).with_tag(tag);
            self.records.push(change);
        }

        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let last_index = self.records.len() - 1;

        for (i, record) in self.records.iter_mut().enumerate() {
            record.current_index = i;
            record.last_index = last_index;
            record.timestamp = timestamp;
        }

        let hash = loop {
            let hash = bundle_hash(self.records.iter().map(|r| {
                essence_trits(
                    &r.address,
                    r.value,
                    &r.obsolete_tag,
                    r.timestamp,
                    r.current_index,
                    r.last_index,
                )
            }));

            // A maximum tryte in the normalized hash would leave part of the
            // private key unhashed while signing.
            if !normalized_hash_has_max_tryte(&hash) {
                break hash;
            }

            let mut tag_trits = self.records[0].obsolete_tag.as_trits();
            convert::add_assign_int(&mut tag_trits, 1);
            self.records[0].obsolete_tag = Tag::from_trits_unchecked(&tag_trits);
        };

        for record in self.records.iter_mut() {
            record.bundle_hash = Some(hash.clone());
        }
        self.hash = Some(hash);

        Ok(())
    }

    /// Signs every staged input with keys derived from `seed`, writing one
    /// signature fragment into each of the input's records.
    pub fn sign_inputs(&mut self, seed: &Seed) -> Result<(), Error> {
        let hash = self.hash.clone().ok_or(Error::NotFinalized)?;
        let message = hash.as_trits();

        let inputs = self.inputs.clone();
        for (position, input) in inputs {
            let generator = WotsSpongePrivateKeyGeneratorBuilder::<CurlP27>::default()
                .security_level(input.security_level)
                .build()?;
            let mut private_key = generator.generate(seed, input.key_index)?;
            let signature = private_key.sign(&message)?;
            self.write_fragments(position, signature.as_trits());
        }

        Ok(())
    }

    /// Signs the input whose records start at `index` with a caller-supplied
    /// private key.
    pub fn sign_input_at(&mut self, index: usize, private_key: &mut WotsPrivateKey<CurlP27>) -> Result<(), Error> {
        let hash = self.hash.clone().ok_or(Error::NotFinalized)?;

        if index >= self.records.len() {
            return Err(Error::IndexOutOfRange(index));
        }

        let input = self
            .inputs
            .iter()
            .find(|(position, _)| *position == index)
            .map(|(_, input)| input.clone())
            .ok_or(Error::NotAnInput(index))?;

        if private_key.security_level() != input.security_level {
            return Err(Error::InvalidSecurityLevel {
                expected: input.security_level.fragments() as u8,
                actual: private_key.security_level().fragments() as u8,
            });
        }

        if self.records[index]
            .fragment
            .as_ref()
            .map(|f| !f.is_all_nines())
            .unwrap_or(false)
        {
            return Err(Error::AlreadySigned(index));
        }

        let public_key = private_key.generate_public_key()?;
        if *public_key.as_trits() != *input.address.as_trits() {
            return Err(Error::InvalidAddress(index));
        }

        let signature = private_key.sign(&hash.as_trits())?;
        self.write_fragments(index, signature.as_trits());

        Ok(())
    }

    /// Converts the finalized bundle into its immutable transaction sequence.
    ///
    /// Attachment fields stay zeroed; attachment is performed elsewhere.
    pub fn transactions(&self) -> Result<Bundle, Error> {
        let hash = self.hash.clone().ok_or(Error::NotFinalized)?;
        let mut transactions = Vec::with_capacity(self.records.len());

        for record in &self.records {
            let fragment = match &record.fragment {
                Some(fragment) => fragment.clone(),
                None => match &record.message {
                    Some(message) => Fragment::try_from_inner(message.clone())?,
                    None => Fragment::zeros(),
                },
            };

            transactions.push(
                TransactionBuilder::new()
                    .with_signature_message_fragment(fragment)
                    .with_address(record.address.clone())
                    .with_value(record.value)
                    .with_obsolete_tag(record.obsolete_tag.clone())
                    .with_timestamp(record.timestamp)
                    .with_current_index(record.current_index)
                    .with_last_index(record.last_index)
                    .with_bundle_hash(hash.clone())
                    .with_tag(record.tag.clone().unwrap_or_else(Tag::zeros))
                    .build()?,
            );
        }

        Ok(Bundle::from(transactions))
    }

    fn write_fragments(&mut self, position: usize, signature_trits: &[Trit]) {
        for (i, chunk) in signature_trits.chunks(SIGNATURE_FRAGMENT_LENGTH).enumerate() {
            self.records[position + i].fragment = Some(Fragment::from_trits_unchecked(chunk));
        }
    }
}

/// Whether the normalized form of `hash` contains a tryte of the maximum value.
fn normalized_hash_has_max_tryte(hash: &BundleHash) -> bool {
    // The hash has the exact length, so normalization cannot fail.
    match normalize(&hash.as_trits()) {
        Ok(normalized) => normalized
            .chunks(3)
            .any(|c| Tryte::from_trits([c[0], c[1], c[2]]).value() == Tryte::MAX_VALUE),
        Err(_) => false,
    }
}
