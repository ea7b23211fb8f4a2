// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Cryptographic primitives of the IOTA protocol.

#![warn(missing_docs)]

pub mod ternary;
