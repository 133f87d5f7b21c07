// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use zeroize::Zeroize;

use crate::error::EntropyError;

/// Source of key material for ciphers that cannot generate their own keys.
pub trait EntropySource {
    /// Fills `dest` with random bytes.
    ///
    /// The contents of `dest` are unspecified on error; use
    /// [`fill_key`](Self::fill_key) when `dest` is secret.
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), EntropyError>;

    /// Fills `key` with fresh key material.
    ///
    /// On error `key` is zeroized, so a partially written key is never
    /// handed back to the caller.
    fn fill_key(&self, key: &mut [u8]) -> Result<(), EntropyError> {
        if let Err(err) = self.fill_bytes(key) {
            key.zeroize();
            return Err(err);
        }

        Ok(())
    }
}
