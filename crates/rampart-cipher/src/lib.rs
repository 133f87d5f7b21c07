// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! # rampart_cipher
//!
//! Algorithm-agnostic streaming engine for symmetric ciphers.
//!
//! A [`CipherContext`] is bound to a [`CipherDriver`] (block size, IV length,
//! mode and the transform itself) and then fed arbitrary-sized chunks. The
//! context buffers partial blocks between calls, applies PKCS#7 padding on
//! encryption and withholds the last decrypted block until the padding has
//! been validated.
//!
//! ## Example
//!
//! ```rust,ignore
//! use rampart_cipher::CipherContext;
//! use rampart_cipher::test_utils::ToyBlockCipher;
//!
//! let driver = ToyBlockCipher::cbc(16).into_driver();
//! let key = [7u8; 16];
//! let iv = [9u8; 16];
//!
//! let mut ctx = CipherContext::new();
//! ctx.encrypt_init(Some(driver.clone()), Some(&key), Some(&iv))?;
//!
//! let mut ciphertext = Vec::new();
//! ctx.update(b"attack at ", &mut ciphertext)?;
//! ctx.update(b"dawn", &mut ciphertext)?;
//! ctx.finalize(&mut ciphertext)?;
//! assert_eq!(ciphertext.len(), 16);
//!
//! ctx.decrypt_init(Some(driver), Some(&key), Some(&iv))?;
//!
//! let mut plaintext = Vec::new();
//! ctx.update(&ciphertext, &mut plaintext)?;
//! ctx.finalize(&mut plaintext)?;
//! assert_eq!(plaintext, b"attack at dawn");
//! # Ok::<(), rampart_cipher::CipherError>(())
//! ```
//!
//! The `ToyBlockCipher` above is a test fixture exported with the
//! `test-utils` feature; real drivers live with their algorithms.

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

extern crate alloc;

#[cfg(test)]
mod tests;

mod block;
mod codec;
mod consts;
mod context;
mod driver;
mod error;
mod flags;
mod limits;
mod padding;
mod state;
mod support;

pub use consts::{MAX_BLOCK_LENGTH, MAX_IV_LENGTH};
pub use context::CipherContext;
pub use driver::{CipherDriver, CtrlOp};
pub use error::{CipherError, DriverError};
pub use flags::{CipherFlags, CipherMode, ContextFlags, Direction};
pub use limits::CodecLimits;
pub use state::CipherState;

#[cfg(any(test, feature = "test-utils"))]
pub use support::test_utils;
