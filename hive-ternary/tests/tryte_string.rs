// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use hive_ternary::{DecodeError, Error, ErrorPolicy, TryteString};

use rand::prelude::*;

#[test]
fn from_str_round_trip() {
    let s = "RBTC9D9DCDQAEASBYBCCKBFA";
    let trytes = TryteString::try_from_str(s).unwrap();
    assert_eq!(trytes.to_string(), s);
    assert_eq!(trytes.len(), s.len());
}

#[test]
fn from_str_rejects_invalid_characters() {
    assert_eq!(
        TryteString::try_from_str("HELLO1WORLD").unwrap_err(),
        Error::InvalidTryteChar('1')
    );
    assert_eq!(
        TryteString::try_from_str("lowercase").unwrap_err(),
        Error::InvalidTryteChar('l')
    );
}

#[test]
fn bytes_round_trip() {
    let bytes: Vec<u8> = (0u8..=255).collect();
    let trytes = TryteString::from_bytes(&bytes);
    assert_eq!(trytes.len(), bytes.len() * 2);
    assert_eq!(trytes.as_bytes(ErrorPolicy::Strict).unwrap(), bytes);
}

#[test]
fn utf8_round_trip() {
    for s in ["Hello, world!", "I can haz change?", "祝你好运", ""] {
        let trytes = TryteString::from_utf8_str(s);
        assert_eq!(trytes.as_utf8_string(ErrorPolicy::Strict).unwrap(), s);
    }
}

#[test]
fn known_encoding() {
    // 'A' is byte 65 = 11 + 2 * 27, so it encodes as the trytes at
    // alphabet positions 11 and 2.
    assert_eq!(TryteString::from_bytes(b"A").to_string(), "KB");
    assert_eq!(TryteString::from_utf8_str("Z").to_string(), "IC");
}

#[test]
fn trailing_padding_is_stripped() {
    let mut trytes = TryteString::from_utf8_str("Hello, world!");
    trytes.pad_right(81);
    assert_eq!(trytes.len(), 81);
    assert_eq!(trytes.as_utf8_string(ErrorPolicy::Strict).unwrap(), "Hello, world!");
}

#[test]
fn lone_trailing_tryte_is_a_byte() {
    // A final byte below 27 encodes with a trailing nine which is lost to
    // padding removal; the leftover tryte decodes to its own alphabet
    // position.
    let trytes = TryteString::from_bytes(&[0x15]);
    assert_eq!(trytes.to_string(), "U9");
    assert_eq!(trytes.as_bytes(ErrorPolicy::Strict).unwrap(), vec![0x15]);
}

#[test]
fn undecodable_sequence_policies() {
    let trytes = TryteString::try_from_str("OHCFVELH9GYEMHCF9GPHBGIEWHZFU").unwrap();

    assert_eq!(
        trytes.as_bytes(ErrorPolicy::Strict).unwrap(),
        vec![0xE7, 0xA5, 0x9D, 0xE4, 0xBD, 0xA0, 0xE5, 0xA5, 0xBD, 0xE8, 0xBF, 0x90, 0xEF, 0xBC, 0x15]
    );

    assert!(matches!(
        trytes.as_utf8_string(ErrorPolicy::Strict),
        Err(DecodeError::InvalidUtf8(_))
    ));
    assert!(matches!(
        trytes.as_utf8_string(ErrorPolicy::Drop),
        Err(DecodeError::InvalidUtf8(_))
    ));
    assert_eq!(trytes.as_utf8_string(ErrorPolicy::Ignore).unwrap(), "祝你好运\u{15}");
    assert_eq!(
        trytes.as_utf8_string(ErrorPolicy::Replace).unwrap(),
        "祝你好运\u{FFFD}\u{15}"
    );
}

#[test]
fn byte_pair_out_of_range() {
    // 'ZJ' decodes to 26 + 27 * 10 = 296, outside of the byte range.
    let trytes = TryteString::try_from_str("ZJ").unwrap();
    assert_eq!(
        trytes.as_bytes(ErrorPolicy::Strict).unwrap_err(),
        DecodeError::InvalidBytePair(0)
    );
    assert_eq!(trytes.as_bytes(ErrorPolicy::Ignore).unwrap(), Vec::<u8>::new());
    assert_eq!(trytes.as_bytes(ErrorPolicy::Replace).unwrap(), vec![b'?']);
}

#[test]
fn from_trits_length_checked() {
    let trytes = TryteString::try_from_str("AZ9").unwrap();
    let trits = trytes.as_trits();
    assert_eq!(TryteString::from_trits(&trits).unwrap(), trytes);
    assert_eq!(
        TryteString::from_trits(&trits[..4]).unwrap_err(),
        Error::InvalidTritsLength(4)
    );
}

#[test]
fn random_bytes_round_trip() {
    let mut rng = thread_rng();
    for _ in 0..100 {
        let len = rng.gen_range(0..200);
        let mut bytes = vec![0u8; len];
        rng.fill_bytes(&mut bytes);
        // Trailing zero bytes are indistinguishable from padding.
        while bytes.last() == Some(&0) {
            bytes.pop();
        }

        let trytes = TryteString::from_bytes(&bytes);
        assert_eq!(trytes.as_bytes(ErrorPolicy::Strict).unwrap(), bytes);
        assert_eq!(TryteString::from_trits(&trytes.as_trits()).unwrap(), trytes);
    }
}

#[test]
fn is_all_nines() {
    assert!(TryteString::nines(27).is_all_nines());
    assert!(TryteString::new().is_all_nines());
    assert!(!TryteString::try_from_str("A9").unwrap().is_all_nines());
}
