// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Ternary signing scheme primitives.

pub mod seed;
pub mod wots;

use hive_ternary::{Trit, TritBuf};

use self::seed::Seed;

/// A deterministic generator of private keys from a seed.
pub trait PrivateKeyGenerator {
    /// The type of the generated private keys.
    type PrivateKey: PrivateKey;
    /// Errors occurring while generating private keys.
    type Error;

    /// Derives a private key from a seed and a key index.
    fn generate(&self, seed: &Seed, index: u64) -> Result<Self::PrivateKey, Self::Error>;

    /// Derives a private key from pre-derived entropy such as a subseed.
    fn generate_from_entropy(&self, entropy: &[Trit]) -> Result<Self::PrivateKey, Self::Error>;
}

/// A private key able to sign messages.
pub trait PrivateKey {
    /// The matching public key type.
    type PublicKey: PublicKey;
    /// The produced signature type.
    type Signature: Signature;
    /// Errors occurring while using the private key.
    type Error;

    /// Derives the public key matching the private key.
    fn generate_public_key(&self) -> Result<Self::PublicKey, Self::Error>;

    /// Generates a signature binding a message to the private key.
    fn sign(&mut self, message: &[Trit]) -> Result<Self::Signature, Self::Error>;
}

/// A public key able to verify signatures.
pub trait PublicKey {
    /// The signature type verified by the public key.
    type Signature: Signature;
    /// Errors occurring while using the public key.
    type Error;

    /// Checks a signature over a message against the public key.
    fn verify(&self, message: &[Trit], signature: &Self::Signature) -> Result<bool, Self::Error>;

    /// The size of the public key, in trits.
    fn size(&self) -> usize;

    /// Creates a public key from trits.
    fn from_trits(buf: TritBuf) -> Result<Self, Self::Error>
    where
        Self: Sized;

    /// Interprets the public key as trits.
    fn as_trits(&self) -> &[Trit];
}

/// A signature over a message.
pub trait Signature {
    /// Errors occurring while constructing the signature.
    type Error;

    /// The size of the signature, in trits.
    fn size(&self) -> usize;

    /// Creates a signature from trits.
    fn from_trits(buf: TritBuf) -> Result<Self, Self::Error>
    where
        Self: Sized;

    /// Interprets the signature as trits.
    fn as_trits(&self) -> &[Trit];
}

/// A signature from which the signing public key can be recovered.
pub trait RecoverableSignature: Signature {
    /// The recovered public key type.
    type PublicKey: PublicKey;
    /// Errors occurring while recovering the public key.
    type Error;

    /// Recovers the public key that produced the signature over `message`.
    fn recover_public_key(
        &self,
        message: &[Trit],
    ) -> Result<Self::PublicKey, <Self as RecoverableSignature>::Error>;
}
