// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! # rampart_pkey
//!
//! Generic asymmetric key object.
//!
//! A [`KeyObject`] is a reference-counted handle holding an algorithm tag,
//! the [`KeyMethod`] table implementing that algorithm, the algorithm's own
//! key data and a list of attributes. Every algorithm-specific operation
//! is dispatched through the method table; operations the method does not
//! implement report "not supported for this key type" instead of failing
//! in some other way.
//!
//! ## Example
//!
//! ```rust,ignore
//! use rampart_pkey::{KeyObject, KeyType, KeyMethodRegistry};
//! use rampart_pkey::test_utils::{MockKeyCapabilities, MockKeyMethod};
//!
//! let mut registry = KeyMethodRegistry::new();
//! registry.register(MockKeyMethod::new(KeyType::X25519, MockKeyCapabilities::all()).into_method());
//!
//! let key = KeyObject::from_raw_private(&registry, KeyType::X25519, &[7u8; 32])?;
//! assert_eq!(key.id(), KeyType::X25519);
//! assert_eq!(&key.raw_private()?[..], &[7u8; 32]);
//!
//! let shared = key.up_ref();
//! assert_eq!(key.ref_count(), 2);
//! shared.release();
//! assert_eq!(key.ref_count(), 1);
//! # Ok::<(), rampart_pkey::KeyError>(())
//! ```
//!
//! `MockKeyMethod` is a test fixture exported with the `test-utils`
//! feature; real method tables live with their algorithms.

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

extern crate alloc;

#[cfg(test)]
mod tests;

mod attribute;
mod compare;
mod error;
mod key_type;
mod material;
mod method;
mod object;
mod print;
mod support;

pub use attribute::KeyAttribute;
pub use compare::KeyComparison;
pub use error::{AssignError, KeyError, MethodError};
pub use key_type::KeyType;
pub use material::KeyMaterial;
pub use method::{KeyMethod, KeyMethodRegistry, KeyMethodResolver};
pub use object::KeyObject;
pub use print::MAX_PRINT_INDENT;

#[cfg(any(test, feature = "test-utils"))]
pub use support::test_utils;
