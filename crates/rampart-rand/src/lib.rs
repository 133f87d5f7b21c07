// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! # rampart_rand
//!
//! Key material for `rampart-cipher`.
//!
//! `CipherContext::random_key` draws from an [`EntropySource`] whenever the
//! bound driver cannot generate keys itself. [`SystemEntropySource`] is the
//! default; tests inject a mock through `random_key_with`.
//!
//! [`EntropySource::fill_key`] zeroizes the buffer when the source fails, so
//! a half-written key never escapes.
//!
//! ## Example
//!
//! ```rust
//! use rampart_rand::{EntropySource, SystemEntropySource};
//!
//! let mut key = [0u8; 32];
//! SystemEntropySource {}
//!     .fill_key(&mut key)
//!     .expect("Failed to fill_key(..)");
//! ```

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

#[cfg(test)]
mod tests;

mod error;
mod support;
mod system;
mod traits;

pub use error::EntropyError;
pub use system::SystemEntropySource;
pub use traits::EntropySource;

#[cfg(any(test, feature = "test-utils"))]
pub use support::test_utils;
