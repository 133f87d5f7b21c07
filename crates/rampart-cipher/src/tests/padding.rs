// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::block::BlockBuffer;
use crate::error::CipherError;
use crate::padding::{pad_block, unpadded_len};

fn padded(data: &[u8], pad: u8, block_size: usize) -> Vec<u8> {
    let mut block = data.to_vec();
    block.resize(block_size, pad);
    block
}

#[test]
fn test_pad_block_partial() {
    let mut block = BlockBuffer::new();
    block
        .extend_from_slice(&[1, 2, 3])
        .expect("Failed to extend_from_slice(..)");

    pad_block(&mut block, 8).expect("Failed to pad_block(..)");

    assert_eq!(block.as_slice(), &[1, 2, 3, 5, 5, 5, 5, 5]);
}

#[test]
fn test_pad_block_empty_gets_full_block() {
    let mut block = BlockBuffer::new();

    pad_block(&mut block, 16).expect("Failed to pad_block(..)");

    assert_eq!(block.as_slice(), &[16u8; 16]);
}

#[test]
fn test_pad_block_rejects_full_block() {
    let mut block = BlockBuffer::new();
    block
        .extend_from_slice(&[9u8; 8])
        .expect("Failed to extend_from_slice(..)");

    let result = pad_block(&mut block, 8);

    assert!(matches!(result, Err(CipherError::BadBlockLength)));
}

#[test]
fn test_unpadded_len_every_valid_pad() {
    for block_size in [8usize, 16] {
        for pad in 1..=block_size {
            let data = vec![0xEEu8; block_size - pad];
            let block = padded(&data, pad as u8, block_size);

            assert_eq!(
                unpadded_len(&block),
                Some(block_size - pad),
                "pad {} in block of {}",
                pad,
                block_size
            );
        }
    }
}

#[test]
fn test_unpadded_len_rejects_zero_pad() {
    for block_size in [8usize, 16] {
        let block = vec![0u8; block_size];
        assert_eq!(unpadded_len(&block), None);
    }
}

#[test]
fn test_unpadded_len_rejects_pad_larger_than_block() {
    for block_size in [8usize, 16] {
        let block = vec![block_size as u8 + 1; block_size];
        assert_eq!(unpadded_len(&block), None);

        let block = vec![0xFFu8; block_size];
        assert_eq!(unpadded_len(&block), None);
    }
}

#[test]
fn test_unpadded_len_rejects_any_single_corrupted_pad_byte() {
    for block_size in [8usize, 16] {
        for pad in 2..=block_size {
            let data = vec![0x11u8; block_size - pad];
            let block = padded(&data, pad as u8, block_size);

            // Every padding byte except the last one, which defines the pad.
            for pos in (block_size - pad)..(block_size - 1) {
                let mut corrupted = block.clone();
                corrupted[pos] ^= 0x01;

                assert_eq!(
                    unpadded_len(&corrupted),
                    None,
                    "pad {} corrupted at {} in block of {}",
                    pad,
                    pos,
                    block_size
                );
            }
        }
    }
}

#[test]
fn test_unpadded_len_ignores_data_bytes() {
    let block = [3u8, 3, 3, 3, 3, 2, 2, 2];
    // Only the trailing two bytes are padding; the rest is data.
    assert_eq!(unpadded_len(&block), Some(6));

    let block = [0xFFu8, 0, 0, 0, 0, 0, 0, 1];
    assert_eq!(unpadded_len(&block), Some(7));
}

#[test]
fn test_unpadded_len_rejects_invalid_block_lengths() {
    assert_eq!(unpadded_len(&[]), None);
    assert_eq!(unpadded_len(&[1u8; 17]), None);
}
