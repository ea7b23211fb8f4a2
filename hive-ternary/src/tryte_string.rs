// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use crate::{Error, Trit, TritBuf, Tryte};

use thiserror::Error;

use std::{fmt, iter::FromIterator, str};

/// Recovery policy applied while decoding tryte-encoded text.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorPolicy {
    /// Fail on the first undecodable sequence.
    Strict,
    /// Skip undecodable sequences.
    Ignore,
    /// Substitute undecodable sequences with a replacement marker.
    Replace,
    /// Fail like [`ErrorPolicy::Strict`]; callers discard the whole message.
    Drop,
}

/// Errors occurring while decoding tryte-encoded text.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum DecodeError {
    /// A tryte pair encodes a value outside of the byte range.
    #[error("Invalid byte pair at tryte offset {0}.")]
    InvalidBytePair(usize),
    /// The decoded bytes are not valid UTF-8.
    #[error("Invalid UTF-8 sequence at byte offset {0}.")]
    InvalidUtf8(usize),
}

/// An ordered, growable sequence of trytes.
#[derive(Clone, Default, Eq, Hash, PartialEq)]
pub struct TryteString(Vec<Tryte>);

impl TryteString {
    /// Creates an empty tryte string.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Creates a tryte string of `len` nines.
    pub fn nines(len: usize) -> Self {
        Self(vec![Tryte::NINE; len])
    }

    /// Parses a tryte string from its character representation.
    pub fn try_from_str(s: &str) -> Result<Self, Error> {
        s.chars().map(Tryte::from_char).collect()
    }

    /// Encodes a byte string, two trytes per byte.
    ///
    /// Each byte `b` becomes the alphabet characters at positions `b % 27`
    /// and `b / 27`, in that order.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut trytes = Vec::with_capacity(bytes.len() * 2);
        for b in bytes {
            // Safe to unwrap since both positions are below 27.
            trytes.push(Tryte::from_alphabet_index(*b as usize % 27).unwrap());
            trytes.push(Tryte::from_alphabet_index(*b as usize / 27).unwrap());
        }
        Self(trytes)
    }

    /// Encodes a UTF-8 string through the byte codec.
    pub fn from_utf8_str(s: &str) -> Self {
        Self::from_bytes(s.as_bytes())
    }

    /// Creates a tryte string from a trit slice whose length is a multiple of three.
    pub fn from_trits(trits: &[Trit]) -> Result<Self, Error> {
        if trits.len() % 3 != 0 {
            return Err(Error::InvalidTritsLength(trits.len()));
        }
        Ok(trits.chunks(3).map(|c| Tryte::from_trits([c[0], c[1], c[2]])).collect())
    }

    /// Decomposes the tryte string into trits, three per tryte.
    pub fn as_trits(&self) -> TritBuf {
        let mut buf = TritBuf::with_capacity(self.0.len() * 3);
        for tryte in &self.0 {
            buf.extend_from_slice(&tryte.as_trits());
        }
        buf
    }

    /// The number of trytes in the string.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the string contains no trytes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the string is empty or consists only of nines.
    pub fn is_all_nines(&self) -> bool {
        self.0.iter().all(|t| *t == Tryte::NINE)
    }

    /// Views the string as a tryte slice.
    pub fn as_trytes(&self) -> &[Tryte] {
        &self.0
    }

    /// Appends a tryte.
    pub fn push(&mut self, tryte: Tryte) {
        self.0.push(tryte);
    }

    /// Appends all trytes of `other`.
    pub fn extend_from_slice(&mut self, other: &[Tryte]) {
        self.0.extend_from_slice(other);
    }

    /// Right-pads the string with nines up to `len`. Longer strings are left untouched.
    pub fn pad_right(&mut self, len: usize) {
        while self.0.len() < len {
            self.0.push(Tryte::NINE);
        }
    }

    /// Returns the string without its trailing nines.
    pub fn trimmed_right(&self) -> &[Tryte] {
        let end = self
            .0
            .iter()
            .rposition(|t| *t != Tryte::NINE)
            .map(|p| p + 1)
            .unwrap_or(0);
        &self.0[..end]
    }

    /// Decodes the string back into bytes, inverting [`TryteString::from_bytes`].
    ///
    /// Trailing nine padding is stripped first. Trytes are then consumed in
    /// pairs; a lone trailing tryte decodes to the byte equal to its own
    /// alphabet position.
    pub fn as_bytes(&self, policy: ErrorPolicy) -> Result<Vec<u8>, DecodeError> {
        let trytes = self.trimmed_right();
        let mut bytes = Vec::with_capacity(trytes.len() / 2 + 1);
        let mut offset = 0;

        while offset + 1 < trytes.len() {
            let value = trytes[offset].alphabet_index() + 27 * trytes[offset + 1].alphabet_index();
            if value > u8::MAX as usize {
                match policy {
                    ErrorPolicy::Strict | ErrorPolicy::Drop => return Err(DecodeError::InvalidBytePair(offset)),
                    ErrorPolicy::Ignore => {}
                    ErrorPolicy::Replace => bytes.push(b'?'),
                }
            } else {
                bytes.push(value as u8);
            }
            offset += 2;
        }

        if offset < trytes.len() {
            bytes.push(trytes[offset].alphabet_index() as u8);
        }

        Ok(bytes)
    }

    /// Decodes the string into UTF-8 text under the given recovery policy.
    pub fn as_utf8_string(&self, policy: ErrorPolicy) -> Result<String, DecodeError> {
        let bytes = self.as_bytes(policy)?;

        match policy {
            ErrorPolicy::Strict | ErrorPolicy::Drop => String::from_utf8(bytes)
                .map_err(|e| DecodeError::InvalidUtf8(e.utf8_error().valid_up_to())),
            ErrorPolicy::Replace => Ok(String::from_utf8_lossy(&bytes).into_owned()),
            ErrorPolicy::Ignore => {
                let mut out = String::with_capacity(bytes.len());
                let mut rest = bytes.as_slice();
                loop {
                    match str::from_utf8(rest) {
                        Ok(s) => {
                            out.push_str(s);
                            break;
                        }
                        Err(e) => {
                            let (valid, after) = rest.split_at(e.valid_up_to());
                            out.push_str(&String::from_utf8_lossy(valid));
                            match e.error_len() {
                                Some(invalid) => rest = &after[invalid..],
                                None => break,
                            }
                        }
                    }
                }
                Ok(out)
            }
        }
    }
}

impl FromIterator<Tryte> for TryteString {
    fn from_iter<I: IntoIterator<Item = Tryte>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<Vec<Tryte>> for TryteString {
    fn from(trytes: Vec<Tryte>) -> Self {
        Self(trytes)
    }
}

impl<'a> From<&'a [Tryte]> for TryteString {
    fn from(trytes: &'a [Tryte]) -> Self {
        Self(trytes.to_vec())
    }
}

impl fmt::Display for TryteString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for tryte in &self.0 {
            write!(f, "{}", tryte.as_char())?;
        }
        Ok(())
    }
}

impl fmt::Debug for TryteString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TryteString(\"{}\")", self)
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::TryteString;

    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for TryteString {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&self.to_string())
        }
    }

    impl<'de> Deserialize<'de> for TryteString {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let s = String::deserialize(deserializer)?;
            TryteString::try_from_str(&s).map_err(de::Error::custom)
        }
    }
}
