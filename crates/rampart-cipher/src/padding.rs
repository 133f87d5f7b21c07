// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! PKCS#7 padding.

use rampart_util::fill_bytes_with_pattern;
use subtle::{Choice, ConstantTimeEq, ConstantTimeGreater};

use crate::block::BlockBuffer;
use crate::consts::MAX_BLOCK_LENGTH;
use crate::error::CipherError;

/// Completes `block` to `block_size` bytes with `n` copies of `n`.
///
/// A block that is already empty receives a full block of padding.
pub(crate) fn pad_block(block: &mut BlockBuffer, block_size: usize) -> Result<(), CipherError> {
    let n = block_size
        .checked_sub(block.len())
        .filter(|n| *n > 0 && *n <= MAX_BLOCK_LENGTH)
        .ok_or(CipherError::BadBlockLength)?;

    let mut pad = [0u8; MAX_BLOCK_LENGTH];
    fill_bytes_with_pattern(&mut pad[..n], n as u8);

    block.extend_from_slice(&pad[..n])
}

/// Length of the plaintext left after stripping PKCS#7 padding from the
/// final `block`, or `None` when the padding is malformed.
///
/// Every byte of the block is inspected regardless of the pad value.
pub(crate) fn unpadded_len(block: &[u8]) -> Option<usize> {
    let block_size = block.len();
    if block_size == 0 || block_size > MAX_BLOCK_LENGTH {
        return None;
    }

    let bl = block_size as u8;
    let pad = block[block_size - 1];

    let mut valid: Choice = !pad.ct_eq(&0) & !pad.ct_gt(&bl);

    for (i, byte) in block.iter().enumerate() {
        // 1 for the last byte, `bl` for the first one.
        let distance = bl - i as u8;
        let in_padding = !distance.ct_gt(&pad);
        valid &= !in_padding | byte.ct_eq(&pad);
    }

    if bool::from(valid) {
        Some(block_size - pad as usize)
    } else {
        None
    }
}
