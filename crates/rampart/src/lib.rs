// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! <p align="center"><em>Streaming cipher contexts and reference-counted asymmetric keys.</em></p>
//!
//! ---
//!
//! Rampart bundles two building blocks of a crypto toolkit:
//!
//! - [`cipher`]: a driver-agnostic streaming cipher context. It buffers
//!   partial blocks, applies PKCS#7 padding, holds back the last decrypted
//!   block until the padding can be checked, and wipes its state on every
//!   reset.
//! - [`pkey`]: a reference-counted asymmetric key object that dispatches
//!   every algorithm-specific operation through a per-type method table.
//!
//! Both are `no_std` with `alloc`.
//!
//! # Quick Start
//!
//! ```rust
//! use rampart::cipher::CipherContext;
//! use rampart::cipher::test_utils::ToyBlockCipher;
//!
//! let driver = ToyBlockCipher::cbc(16).into_driver();
//! let key = [0x11u8; 16];
//! let iv = [0x22u8; 16];
//!
//! let mut ctx = CipherContext::new();
//! ctx.encrypt_init(Some(driver.clone()), Some(&key), Some(&iv))?;
//!
//! let mut ciphertext = Vec::new();
//! ctx.update(b"attack at dawn", &mut ciphertext)?;
//! ctx.finalize(&mut ciphertext)?;
//! assert_eq!(ciphertext.len(), 16);
//!
//! ctx.decrypt_init(Some(driver), Some(&key), Some(&iv))?;
//! let mut plaintext = Vec::new();
//! ctx.update(&ciphertext, &mut plaintext)?;
//! ctx.finalize(&mut plaintext)?;
//! assert_eq!(plaintext, b"attack at dawn");
//! # Ok::<(), rampart::cipher::CipherError>(())
//! ```
//!
//! # Feature flags
//!
//! - `test-utils`: exposes toy drivers, mock key methods and mock entropy
//!   sources under [`support::test_utils`].

#![cfg_attr(not(test), no_std)]

pub mod support;

pub use rampart_cipher as cipher;
pub use rampart_pkey as pkey;
pub use rampart_rand as rand;
pub use rampart_util as util;
