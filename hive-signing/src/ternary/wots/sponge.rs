// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use crate::ternary::{
    seed::Seed,
    wots::{Error, WotsPrivateKey, WotsSecurityLevel, SIGNATURE_FRAGMENT_LENGTH},
    PrivateKeyGenerator,
};

use hive_crypto::ternary::{sponge::Sponge, HASH_LENGTH};
use hive_ternary::{Trit, TritBuf};

use std::marker::PhantomData;

/// Builder for a sponge-based Winternitz private key generator.
pub struct WotsSpongePrivateKeyGeneratorBuilder<S> {
    security_level: Option<WotsSecurityLevel>,
    marker: PhantomData<S>,
}

impl<S> Default for WotsSpongePrivateKeyGeneratorBuilder<S> {
    fn default() -> Self {
        Self {
            security_level: None,
            marker: PhantomData,
        }
    }
}

impl<S: Sponge + Default> WotsSpongePrivateKeyGeneratorBuilder<S> {
    /// Sets the security level of the generated private keys.
    pub fn security_level(mut self, security_level: WotsSecurityLevel) -> Self {
        self.security_level.replace(security_level);
        self
    }

    /// Builds the generator, failing without a security level.
    pub fn build(self) -> Result<WotsSpongePrivateKeyGenerator<S>, Error> {
        Ok(WotsSpongePrivateKeyGenerator {
            security_level: self.security_level.ok_or(Error::MissingSecurityLevel)?,
            marker: PhantomData,
        })
    }
}

/// A deterministic, sponge-based Winternitz private key generator.
pub struct WotsSpongePrivateKeyGenerator<S> {
    security_level: WotsSecurityLevel,
    marker: PhantomData<S>,
}

impl<S: Sponge + Default> PrivateKeyGenerator for WotsSpongePrivateKeyGenerator<S> {
    type PrivateKey = WotsPrivateKey<S>;
    type Error = Error;

    fn generate(&self, seed: &Seed, index: u64) -> Result<Self::PrivateKey, Self::Error> {
        let subseed = seed.subseed(index);
        self.generate_from_entropy(subseed.as_trits())
    }

    /// Derives the private key from entropy, one sponge squeeze per key chunk.
    fn generate_from_entropy(&self, entropy: &[Trit]) -> Result<Self::PrivateKey, Self::Error> {
        if entropy.len() != HASH_LENGTH {
            return Err(Error::InvalidEntropyLength(entropy.len()));
        }

        let mut sponge = S::default();
        let mut state = TritBuf::zeros(self.security_level.fragments() * SIGNATURE_FRAGMENT_LENGTH);

        sponge.absorb(entropy).map_err(|_| Error::FailedSpongeOperation)?;
        for chunk in state.chunks_mut(HASH_LENGTH) {
            sponge
                .squeeze_into(chunk)
                .map_err(|_| Error::FailedSpongeOperation)?;
        }

        Ok(WotsPrivateKey {
            security_level: self.security_level,
            state,
            marker: PhantomData,
        })
    }
}
