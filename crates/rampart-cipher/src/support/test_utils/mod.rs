// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Test drivers.
//!
//! None of these are ciphers in any cryptographic sense. They are small,
//! invertible transforms that exercise every code path of the context.

mod mock_driver;
mod toy_block_cipher;
mod toy_stream_aead;

pub use mock_driver::{MockDriver, MockDriverBehaviour};
pub use toy_block_cipher::ToyBlockCipher;
pub use toy_stream_aead::ToyStreamAead;
