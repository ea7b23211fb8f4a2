// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use hive_crypto::ternary::sponge::CurlP27;
use hive_signing::ternary::{
    seed::Seed,
    wots::{
        Error as WotsError, WotsPublicKey, WotsSecurityLevel, WotsSignature, WotsSpongePrivateKeyGeneratorBuilder,
        SIGNATURE_FRAGMENT_LENGTH,
    },
    PrivateKey, PrivateKeyGenerator, PublicKey, RecoverableSignature, Signature,
};
use hive_ternary::{Trit, TritBuf, TryteString};

const ENTROPY: &str = "CEFLDDLMF9TO9ZLLTYXIPVFIJKAOFRIQLGNYIDZCTDYSWMNXPYNGFAKHQDY9ABGGQZHEFTXKWKWZXEIUD";
const MESSAGE: &str = "YSQMIFUQFJNLFAPAETRWNWUX9LSTTCERCIOBDZIDHVRVNPQNHTSNWYKSRFDOCQGXFTJY9HIGNND9RBHYF";
const OTHER_MESSAGE: &str = "FLMLSYHTEIXHEKZKABOVAZBEZNRAAM99KYXHR9IZZTF9DXNS9GNZDEZZACQTS9EPYNZYUFWFVQS9UOGFR";

fn trits_of(trytes: &str) -> TritBuf {
    TryteString::try_from_str(trytes).unwrap().as_trits()
}

#[test]
fn generator_missing_security_level() {
    match WotsSpongePrivateKeyGeneratorBuilder::<CurlP27>::default().build() {
        Ok(_) => unreachable!(),
        Err(err) => assert_eq!(err, WotsError::MissingSecurityLevel),
    }
}

#[test]
fn generator_valid() {
    let security_levels = vec![
        WotsSecurityLevel::Low,
        WotsSecurityLevel::Medium,
        WotsSecurityLevel::High,
    ];
    for security in security_levels {
        assert!(WotsSpongePrivateKeyGeneratorBuilder::<CurlP27>::default()
            .security_level(security)
            .build()
            .is_ok());
    }
}

#[test]
fn private_key_length_follows_security_level() {
    for (security, fragments) in [
        (WotsSecurityLevel::Low, 1),
        (WotsSecurityLevel::Medium, 2),
        (WotsSecurityLevel::High, 3),
    ] {
        let private_key = WotsSpongePrivateKeyGeneratorBuilder::<CurlP27>::default()
            .security_level(security)
            .build()
            .unwrap()
            .generate_from_entropy(&trits_of(ENTROPY))
            .unwrap();

        assert_eq!(private_key.as_trits().len(), fragments * SIGNATURE_FRAGMENT_LENGTH);
    }
}

#[test]
fn sign_and_verify_round_trip() {
    for security in [
        WotsSecurityLevel::Low,
        WotsSecurityLevel::Medium,
        WotsSecurityLevel::High,
    ] {
        let mut private_key = WotsSpongePrivateKeyGeneratorBuilder::<CurlP27>::default()
            .security_level(security)
            .build()
            .unwrap()
            .generate_from_entropy(&trits_of(ENTROPY))
            .unwrap();

        let public_key = private_key.generate_public_key().unwrap();
        let message = trits_of(MESSAGE);
        let signature = private_key.sign(&message).unwrap();

        assert_eq!(signature.size(), security.fragments() * SIGNATURE_FRAGMENT_LENGTH);
        assert!(public_key.verify(&message, &signature).unwrap());
        assert_eq!(
            signature.recover_public_key(&message).unwrap().as_trits(),
            public_key.as_trits()
        );
    }
}

#[test]
fn verify_rejects_mutated_signature() {
    let mut private_key = WotsSpongePrivateKeyGeneratorBuilder::<CurlP27>::default()
        .security_level(WotsSecurityLevel::Medium)
        .build()
        .unwrap()
        .generate_from_entropy(&trits_of(ENTROPY))
        .unwrap();

    let public_key = private_key.generate_public_key().unwrap();
    let message = trits_of(MESSAGE);
    let signature = private_key.sign(&message).unwrap();

    let mut mutated = TritBuf::from(signature.as_trits());
    mutated[42] = match mutated[42] {
        Trit::Zero => Trit::PlusOne,
        _ => Trit::Zero,
    };
    let mutated = WotsSignature::<CurlP27>::from_trits(mutated).unwrap();

    assert!(!public_key.verify(&message, &mutated).unwrap());
}

#[test]
fn verify_rejects_wrong_message() {
    let mut private_key = WotsSpongePrivateKeyGeneratorBuilder::<CurlP27>::default()
        .security_level(WotsSecurityLevel::Low)
        .build()
        .unwrap()
        .generate_from_entropy(&trits_of(ENTROPY))
        .unwrap();

    let public_key = private_key.generate_public_key().unwrap();
    let signature = private_key.sign(&trits_of(MESSAGE)).unwrap();

    assert!(!public_key.verify(&trits_of(OTHER_MESSAGE), &signature).unwrap());
}

#[test]
fn keys_from_seed_indices_differ() {
    let seed = Seed::from_str(ENTROPY).unwrap();
    let generator = WotsSpongePrivateKeyGeneratorBuilder::<CurlP27>::default()
        .security_level(WotsSecurityLevel::Low)
        .build()
        .unwrap();

    let a = generator.generate(&seed, 0).unwrap();
    let b = generator.generate(&seed, 1).unwrap();
    let c = generator.generate(&seed, 0).unwrap();

    assert_eq!(a.as_trits(), c.as_trits());
    assert_ne!(a.as_trits(), b.as_trits());
}

#[test]
fn invalid_message_length() {
    let message = TryteString::try_from_str("CEFLDDLMF9TO9ZNYIDZCTHQDY9ABGGQZHEFTXKWKWZ")
        .unwrap()
        .as_trits();
    let mut private_key = WotsSpongePrivateKeyGeneratorBuilder::<CurlP27>::default()
        .security_level(WotsSecurityLevel::Medium)
        .build()
        .unwrap()
        .generate_from_entropy(&trits_of(ENTROPY))
        .unwrap();

    match private_key.sign(&message) {
        Err(WotsError::InvalidMessageLength(len)) => assert_eq!(len, message.len()),
        _ => unreachable!(),
    }

    let signature = private_key.sign(&trits_of(MESSAGE)).unwrap();

    match signature.recover_public_key(&message) {
        Err(WotsError::InvalidMessageLength(len)) => assert_eq!(len, message.len()),
        _ => unreachable!(),
    }

    let public_key = private_key.generate_public_key().unwrap();

    match public_key.verify(&message, &signature) {
        Err(WotsError::InvalidMessageLength(len)) => assert_eq!(len, message.len()),
        _ => unreachable!(),
    }
}

#[test]
fn invalid_entropy_length() {
    let entropy = trits_of("YSWMNXPYNGFAKHQDY9ABGGQZHEFTXKWKWZXEIUD");
    let generator = WotsSpongePrivateKeyGeneratorBuilder::<CurlP27>::default()
        .security_level(WotsSecurityLevel::Low)
        .build()
        .unwrap();

    match generator.generate_from_entropy(&entropy) {
        Err(WotsError::InvalidEntropyLength(len)) => assert_eq!(len, entropy.len()),
        _ => unreachable!(),
    }
}

#[test]
fn invalid_public_key_length() {
    let trits = trits_of("YSWMNXPYNGFAKHQDY9ABGGQZHEFTXKWKWZXEIUD");

    match WotsPublicKey::<CurlP27>::from_trits(trits.clone()) {
        Err(WotsError::InvalidPublicKeyLength(len)) => assert_eq!(len, trits.len()),
        _ => unreachable!(),
    }
}

#[test]
fn invalid_signature_length() {
    let trits = trits_of("YSWMNXPYNGFAKHQDY9ABGGQZHEFTXKWKWZXEIUD");

    match WotsSignature::<CurlP27>::from_trits(trits.clone()) {
        Err(WotsError::InvalidSignatureLength(len)) => assert_eq!(len, trits.len()),
        _ => unreachable!(),
    }

    assert!(matches!(
        WotsSignature::<CurlP27>::from_trits(TritBuf::new()),
        Err(WotsError::InvalidSignatureLength(0))
    ));
}
