// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use crate::{Error, Trit};

use std::{
    convert::TryFrom,
    fmt,
    iter::FromIterator,
    ops::{Deref, DerefMut},
};

/// A growable, owned buffer of balanced trits.
///
/// Dereferences to `[Trit]`, so slicing, chunking and iteration follow the
/// standard slice API.
#[derive(Clone, Default, Eq, Hash, PartialEq)]
pub struct TritBuf(Vec<Trit>);

impl TritBuf {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Creates an empty buffer with room for `capacity` trits.
    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    /// Creates a buffer of `len` zero trits.
    pub fn zeros(len: usize) -> Self {
        Self(vec![Trit::Zero; len])
    }

    /// Creates a buffer of `len` copies of `trit`.
    pub fn filled(len: usize, trit: Trit) -> Self {
        Self(vec![trit; len])
    }

    /// Creates a buffer from a slice of numeric trit values.
    pub fn from_i8s(values: &[i8]) -> Result<Self, Error> {
        values.iter().map(|v| Trit::try_from(*v)).collect()
    }

    /// Returns the numeric values of the trits.
    pub fn as_i8s(&self) -> Vec<i8> {
        self.0.iter().map(|t| t.value()).collect()
    }

    /// Appends a trit to the buffer.
    pub fn push(&mut self, trit: Trit) {
        self.0.push(trit);
    }

    /// Appends all trits of `slice` to the buffer.
    pub fn extend_from_slice(&mut self, slice: &[Trit]) {
        self.0.extend_from_slice(slice);
    }

    /// Overwrites every trit of the buffer with `trit`.
    pub fn fill(&mut self, trit: Trit) {
        for t in self.0.iter_mut() {
            *t = trit;
        }
    }

    /// Views the buffer as a trit slice.
    pub fn as_slice(&self) -> &[Trit] {
        &self.0
    }

    /// Views the buffer as a mutable trit slice.
    pub fn as_slice_mut(&mut self) -> &mut [Trit] {
        &mut self.0
    }
}

impl Deref for TritBuf {
    type Target = [Trit];

    fn deref(&self) -> &[Trit] {
        &self.0
    }
}

impl DerefMut for TritBuf {
    fn deref_mut(&mut self) -> &mut [Trit] {
        &mut self.0
    }
}

impl From<Vec<Trit>> for TritBuf {
    fn from(trits: Vec<Trit>) -> Self {
        Self(trits)
    }
}

impl<'a> From<&'a [Trit]> for TritBuf {
    fn from(trits: &'a [Trit]) -> Self {
        Self(trits.to_vec())
    }
}

impl FromIterator<Trit> for TritBuf {
    fn from_iter<I: IntoIterator<Item = Trit>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Debug for TritBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter().map(|t| t.value())).finish()
    }
}
