// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::fmt;

use zeroize::Zeroize;

use crate::consts::MAX_BLOCK_LENGTH;
use crate::error::CipherError;

/// Fixed-capacity byte buffer holding at most one block.
///
/// Every write is bounds-checked against [`MAX_BLOCK_LENGTH`]. Contents are
/// zeroized when cleared and on drop.
#[derive(Clone)]
pub(crate) struct BlockBuffer {
    bytes: [u8; MAX_BLOCK_LENGTH],
    len: usize,
}

impl BlockBuffer {
    pub(crate) const fn new() -> Self {
        Self {
            bytes: [0u8; MAX_BLOCK_LENGTH],
            len: 0,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub(crate) fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    pub(crate) fn extend_from_slice(&mut self, data: &[u8]) -> Result<(), CipherError> {
        let end = self
            .len
            .checked_add(data.len())
            .filter(|end| *end <= MAX_BLOCK_LENGTH)
            .ok_or(CipherError::BadBlockLength)?;

        self.bytes[self.len..end].copy_from_slice(data);
        self.len = end;

        Ok(())
    }

    pub(crate) fn replace(&mut self, data: &[u8]) -> Result<(), CipherError> {
        self.clear();
        self.extend_from_slice(data)
    }

    pub(crate) fn clear(&mut self) {
        self.bytes.zeroize();
        self.len = 0;
    }

    #[cfg(test)]
    pub(crate) fn raw_bytes(&self) -> &[u8; MAX_BLOCK_LENGTH] {
        &self.bytes
    }
}

impl Default for BlockBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for BlockBuffer {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl fmt::Debug for BlockBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockBuffer")
            .field("bytes", &"[REDACTED]")
            .field("len", &self.len)
            .finish()
    }
}
