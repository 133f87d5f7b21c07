// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::sync::Arc;

use crate::context::CipherContext;
use crate::driver::CipherDriver;
use crate::error::CipherError;
use crate::support::test_utils::ToyBlockCipher;

pub fn create_key(len: usize, pattern: u8) -> Vec<u8> {
    let mut vec = Vec::<u8>::new();
    vec.resize_with(len, || pattern);
    vec
}

pub fn create_plaintext(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i as u8).wrapping_mul(7).wrapping_add(3)).collect()
}

/// One driver per mode/block-size combination the codec distinguishes.
pub fn all_drivers() -> Vec<Arc<dyn CipherDriver>> {
    vec![
        ToyBlockCipher::ecb(8).into_driver(),
        ToyBlockCipher::ecb(16).into_driver(),
        ToyBlockCipher::cbc(8).into_driver(),
        ToyBlockCipher::cbc(16).into_driver(),
        ToyBlockCipher::ctr().into_driver(),
        ToyBlockCipher::ofb().into_driver(),
        ToyBlockCipher::stream().into_driver(),
    ]
}

pub fn assert_holdback_invariant(ctx: &CipherContext) {
    assert!(
        !(ctx.final_used && !ctx.buf.is_empty()),
        "held-back block alongside a partial block"
    );
}

pub fn encrypt_chunks(
    driver: &Arc<dyn CipherDriver>,
    key: &[u8],
    iv: &[u8],
    chunks: &[&[u8]],
) -> Result<Vec<u8>, CipherError> {
    let mut ctx = CipherContext::new();
    ctx.encrypt_init(Some(Arc::clone(driver)), Some(key), Some(iv))?;

    let mut out = Vec::new();
    for chunk in chunks {
        ctx.update(chunk, &mut out)?;
    }
    ctx.finalize(&mut out)?;

    Ok(out)
}

pub fn decrypt_chunks(
    driver: &Arc<dyn CipherDriver>,
    key: &[u8],
    iv: &[u8],
    chunks: &[&[u8]],
) -> Result<Vec<u8>, CipherError> {
    let mut ctx = CipherContext::new();
    ctx.decrypt_init(Some(Arc::clone(driver)), Some(key), Some(iv))?;

    let mut out = Vec::new();
    for chunk in chunks {
        ctx.update(chunk, &mut out)?;
        assert_holdback_invariant(&ctx);
    }
    ctx.finalize(&mut out)?;

    Ok(out)
}

pub fn encrypt_all(
    driver: &Arc<dyn CipherDriver>,
    key: &[u8],
    iv: &[u8],
    plaintext: &[u8],
) -> Vec<u8> {
    encrypt_chunks(driver, key, iv, &[plaintext]).expect("Failed to encrypt_chunks(..)")
}

/// Encrypts `plaintext` with padding disabled, producing ciphertext whose
/// decryption ends in exactly these bytes.
pub fn encrypt_raw_blocks(
    driver: &Arc<dyn CipherDriver>,
    key: &[u8],
    iv: &[u8],
    plaintext: &[u8],
) -> Vec<u8> {
    let mut ctx = CipherContext::new();
    ctx.encrypt_init(Some(Arc::clone(driver)), Some(key), Some(iv))
        .expect("Failed to encrypt_init(..)");
    ctx.set_padding(false);

    let mut out = Vec::new();
    ctx.update(plaintext, &mut out).expect("Failed to update(..)");
    ctx.finalize(&mut out).expect("Failed to finalize(..)");

    out
}
