// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Winternitz one-time signatures over ternary messages.

mod normalize;
mod sponge;

pub use normalize::{normalize, NormalizeError};
pub use sponge::{WotsSpongePrivateKeyGenerator, WotsSpongePrivateKeyGeneratorBuilder};

use crate::ternary::{PrivateKey, PublicKey, RecoverableSignature, Signature};

use hive_crypto::ternary::{sponge::Sponge, HASH_LENGTH};
use hive_ternary::{Trit, TritBuf};

use thiserror::Error;
use zeroize::Zeroize;

use std::{convert::TryFrom, fmt, marker::PhantomData};

/// The length of a signature fragment and of a private key fragment, in trits.
pub const SIGNATURE_FRAGMENT_LENGTH: usize = 6561;

/// The number of hash-sized chunks in one fragment.
pub const CHUNKS_PER_FRAGMENT: usize = SIGNATURE_FRAGMENT_LENGTH / HASH_LENGTH;

/// The largest tryte value, driving the per-chunk hashing counts.
const MAX_TRYTE_VALUE: i8 = 13;

/// Errors occurring with Winternitz one-time signatures.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum Error {
    /// A generator was built without a security level.
    #[error("Missing security level.")]
    MissingSecurityLevel,
    /// A security level outside of `[1, 3]`.
    #[error("Invalid security level {0}.")]
    InvalidSecurityLevel(u8),
    /// A message of a length other than one hash was signed or verified.
    #[error("Invalid message length {0}.")]
    InvalidMessageLength(usize),
    /// Entropy of a length other than one hash was used for key derivation.
    #[error("Invalid entropy length {0}.")]
    InvalidEntropyLength(usize),
    /// A public key of a length other than one hash.
    #[error("Invalid public key length {0}.")]
    InvalidPublicKeyLength(usize),
    /// A signature whose length is not a positive multiple of a fragment.
    #[error("Invalid signature length {0}.")]
    InvalidSignatureLength(usize),
    /// An underlying sponge operation failed.
    #[error("Failed sponge operation.")]
    FailedSpongeOperation,
}

/// The number of fragments composing a private key and its signatures.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum WotsSecurityLevel {
    /// One fragment.
    Low = 1,
    /// Two fragments.
    Medium = 2,
    /// Three fragments.
    High = 3,
}

impl WotsSecurityLevel {
    /// The number of private key and signature fragments at this level.
    pub fn fragments(self) -> usize {
        self as usize
    }
}

impl TryFrom<u8> for WotsSecurityLevel {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(WotsSecurityLevel::Low),
            2 => Ok(WotsSecurityLevel::Medium),
            3 => Ok(WotsSecurityLevel::High),
            _ => Err(Error::InvalidSecurityLevel(value)),
        }
    }
}

/// Hashes a chunk in place the given number of times with a fresh sponge state.
fn hash_chunk<S: Sponge + Default>(sponge: &mut S, chunk: &mut [Trit], times: usize) -> Result<(), Error> {
    let mut output = TritBuf::zeros(HASH_LENGTH);
    for _ in 0..times {
        sponge.absorb(chunk).map_err(|_| Error::FailedSpongeOperation)?;
        sponge
            .squeeze_into(&mut output)
            .map_err(|_| Error::FailedSpongeOperation)?;
        sponge.reset();
        chunk.copy_from_slice(&output);
    }
    Ok(())
}

/// Folds hashed fragments into the digest sequence an address is derived from.
fn fold_digests<S: Sponge + Default>(sponge: &mut S, fragments: &TritBuf) -> Result<TritBuf, Error> {
    let mut digests = TritBuf::with_capacity(fragments.len() / SIGNATURE_FRAGMENT_LENGTH * HASH_LENGTH);
    let mut digest = TritBuf::zeros(HASH_LENGTH);

    for fragment in fragments.chunks(SIGNATURE_FRAGMENT_LENGTH) {
        sponge
            .digest_into(fragment, &mut digest)
            .map_err(|_| Error::FailedSpongeOperation)?;
        digests.extend_from_slice(&digest);
    }

    let mut key = TritBuf::zeros(HASH_LENGTH);
    sponge
        .digest_into(&digests, &mut key)
        .map_err(|_| Error::FailedSpongeOperation)?;

    Ok(key)
}

/// A Winternitz one-time private key.
///
/// The key material is zeroed on drop. Signing the same key twice leaks
/// private material; callers are expected to sign once.
pub struct WotsPrivateKey<S> {
    pub(crate) security_level: WotsSecurityLevel,
    pub(crate) state: TritBuf,
    pub(crate) marker: PhantomData<S>,
}

impl<S> WotsPrivateKey<S> {
    /// The security level the key was derived with.
    pub fn security_level(&self) -> WotsSecurityLevel {
        self.security_level
    }

    /// Interprets the private key as trits.
    pub fn as_trits(&self) -> &[Trit] {
        &self.state
    }
}

impl<S: Sponge + Default> PrivateKey for WotsPrivateKey<S> {
    type PublicKey = WotsPublicKey<S>;
    type Signature = WotsSignature<S>;
    type Error = Error;

    fn generate_public_key(&self) -> Result<Self::PublicKey, Self::Error> {
        let mut sponge = S::default();
        let mut hashed = self.state.clone();

        for chunk in hashed.chunks_mut(HASH_LENGTH) {
            hash_chunk(&mut sponge, chunk, (2 * MAX_TRYTE_VALUE) as usize)?;
        }

        let state = fold_digests(&mut sponge, &hashed)?;
        hashed.fill(Trit::Zero);

        Ok(WotsPublicKey {
            state,
            marker: PhantomData,
        })
    }

    fn sign(&mut self, message: &[Trit]) -> Result<Self::Signature, Self::Error> {
        if message.len() != HASH_LENGTH {
            return Err(Error::InvalidMessageLength(message.len()));
        }

        let normalized = normalize::normalized_tryte_values(message);
        let mut sponge = S::default();
        let mut state = self.state.clone();

        for (fragment_index, fragment) in state.chunks_mut(SIGNATURE_FRAGMENT_LENGTH).enumerate() {
            let window = &normalized[(fragment_index % 3) * CHUNKS_PER_FRAGMENT..][..CHUNKS_PER_FRAGMENT];
            for (chunk_index, chunk) in fragment.chunks_mut(HASH_LENGTH).enumerate() {
                hash_chunk(&mut sponge, chunk, (MAX_TRYTE_VALUE - window[chunk_index]) as usize)?;
            }
        }

        Ok(WotsSignature {
            state,
            marker: PhantomData,
        })
    }
}

impl<S> Zeroize for WotsPrivateKey<S> {
    fn zeroize(&mut self) {
        self.state.fill(Trit::Zero);
    }
}

impl<S> Drop for WotsPrivateKey<S> {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl<S> fmt::Debug for WotsPrivateKey<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WotsPrivateKey(<redacted>)")
    }
}

/// A Winternitz one-time public key, the ternary form of an address.
#[derive(Clone)]
pub struct WotsPublicKey<S> {
    state: TritBuf,
    marker: PhantomData<S>,
}

impl<S: Sponge + Default> PublicKey for WotsPublicKey<S> {
    type Signature = WotsSignature<S>;
    type Error = Error;

    fn verify(&self, message: &[Trit], signature: &Self::Signature) -> Result<bool, Self::Error> {
        let recovered = signature.recover_public_key(message)?;
        Ok(recovered.state == self.state)
    }

    fn size(&self) -> usize {
        self.state.len()
    }

    fn from_trits(buf: TritBuf) -> Result<Self, Self::Error> {
        if buf.len() != HASH_LENGTH {
            return Err(Error::InvalidPublicKeyLength(buf.len()));
        }
        Ok(Self {
            state: buf,
            marker: PhantomData,
        })
    }

    fn as_trits(&self) -> &[Trit] {
        &self.state
    }
}

impl<S> PartialEq for WotsPublicKey<S> {
    fn eq(&self, other: &Self) -> bool {
        self.state == other.state
    }
}

impl<S> Eq for WotsPublicKey<S> {}

impl<S> fmt::Debug for WotsPublicKey<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("WotsPublicKey").field(&self.state).finish()
    }
}

/// A Winternitz one-time signature, one fragment per security level.
#[derive(Clone)]
pub struct WotsSignature<S> {
    state: TritBuf,
    marker: PhantomData<S>,
}

impl<S: Sponge + Default> Signature for WotsSignature<S> {
    type Error = Error;

    fn size(&self) -> usize {
        self.state.len()
    }

    fn from_trits(buf: TritBuf) -> Result<Self, Self::Error> {
        if buf.is_empty() || buf.len() % SIGNATURE_FRAGMENT_LENGTH != 0 {
            return Err(Error::InvalidSignatureLength(buf.len()));
        }
        Ok(Self {
            state: buf,
            marker: PhantomData,
        })
    }

    fn as_trits(&self) -> &[Trit] {
        &self.state
    }
}

impl<S: Sponge + Default> RecoverableSignature for WotsSignature<S> {
    type PublicKey = WotsPublicKey<S>;
    type Error = Error;

    fn recover_public_key(
        &self,
        message: &[Trit],
    ) -> Result<Self::PublicKey, <Self as RecoverableSignature>::Error> {
        if message.len() != HASH_LENGTH {
            return Err(Error::InvalidMessageLength(message.len()));
        }

        let normalized = normalize::normalized_tryte_values(message);
        let mut sponge = S::default();
        let mut hashed = self.state.clone();

        for (fragment_index, fragment) in hashed.chunks_mut(SIGNATURE_FRAGMENT_LENGTH).enumerate() {
            let window = &normalized[(fragment_index % 3) * CHUNKS_PER_FRAGMENT..][..CHUNKS_PER_FRAGMENT];
            for (chunk_index, chunk) in fragment.chunks_mut(HASH_LENGTH).enumerate() {
                hash_chunk(&mut sponge, chunk, (MAX_TRYTE_VALUE + window[chunk_index]) as usize)?;
            }
        }

        let state = fold_digests(&mut sponge, &hashed)?;

        Ok(WotsPublicKey {
            state,
            marker: PhantomData,
        })
    }
}

impl<S> fmt::Debug for WotsSignature<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("WotsSignature").field(&self.state).finish()
    }
}
