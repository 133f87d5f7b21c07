// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Byte helpers shared by the rampart crates.
//!
//! Padding fills, zeroization checks and wipe-before-release helpers for
//! buffers that may hold key material or plaintext.

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

extern crate alloc;

use alloc::vec::Vec;

use subtle::ConstantTimeEq;
use zeroize::Zeroize;

#[cfg(test)]
mod tests;

/// Fills a byte slice with a repeating pattern byte.
///
/// # Example
///
/// ```
/// use rampart_util::fill_bytes_with_pattern;
///
/// let mut block = [0u8; 8];
/// fill_bytes_with_pattern(&mut block[5..], 3);
/// assert_eq!(block, [0, 0, 0, 0, 0, 3, 3, 3]);
/// ```
#[inline]
pub fn fill_bytes_with_pattern(slice: &mut [u8], pattern: u8) {
    for byte in slice.iter_mut() {
        *byte = pattern;
    }
}

/// Returns `true` if every byte of `slice` is zero.
///
/// # Example
///
/// ```
/// use rampart_util::is_slice_zeroized;
///
/// assert!(is_slice_zeroized(&[0u8; 16]));
/// assert!(!is_slice_zeroized(&[0u8, 0, 1]));
/// ```
#[inline(always)]
pub fn is_slice_zeroized(slice: &[u8]) -> bool {
    slice.iter().all(|&b| b == 0)
}

/// Constant-time equality comparison for byte slices.
///
/// Slices of different length compare unequal without inspecting contents.
///
/// # Example
///
/// ```
/// use rampart_util::constant_time_eq;
///
/// assert!(constant_time_eq(&[1, 2, 3], &[1, 2, 3]));
/// assert!(!constant_time_eq(&[1, 2, 3], &[1, 2, 4]));
/// ```
#[inline]
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    bool::from(a.ct_eq(b))
}

/// Zeroizes `vec[len..]` and truncates the vector to `len`.
///
/// Used to roll back output that was appended by a failed operation so that
/// no partially transformed bytes remain in the caller's buffer. A `len`
/// greater than the current length leaves the vector untouched.
///
/// # Example
///
/// ```
/// use rampart_util::wipe_and_truncate;
///
/// let mut out = vec![1u8, 2, 3, 4, 5];
/// wipe_and_truncate(&mut out, 2);
/// assert_eq!(out, vec![1, 2]);
/// ```
#[inline]
pub fn wipe_and_truncate(vec: &mut Vec<u8>, len: usize) {
    if len >= vec.len() {
        return;
    }

    vec[len..].zeroize();
    vec.truncate(len);
}

/// Zeroizes a byte vector including its spare capacity and releases it.
///
/// # Example
///
/// ```
/// use rampart_util::wipe_vec;
///
/// let mut state = vec![0xAAu8; 32];
/// wipe_vec(&mut state);
/// assert!(state.is_empty());
/// ```
#[inline]
pub fn wipe_vec(vec: &mut Vec<u8>) {
    vec.zeroize();
    *vec = Vec::new();
}
