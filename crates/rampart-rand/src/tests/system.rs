// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use getrandom::Error as GetRandomError;
use proptest::prelude::*;

use crate::error::EntropyError;
use crate::system::SystemEntropySource;
use crate::traits::EntropySource;

#[test]
fn test_getrandom_failure_maps_to_entropy_error() {
    let mut key = [0u8; 32];
    let result = SystemEntropySource::fill_bytes_with(|_| Err(GetRandomError::UNSUPPORTED), &mut key);

    assert_eq!(result, Err(EntropyError::EntropyNotAvailable));
}

#[test]
fn test_getrandom_output_lands_in_key() {
    let mut key = [0u8; 16];
    SystemEntropySource::fill_bytes_with(
        |dest| {
            dest.copy_from_slice(&[0x42; 16]);
            Ok(())
        },
        &mut key,
    )
    .expect("Failed to fill_bytes_with(..)");

    assert_eq!(key, [0x42; 16]);
}

#[test]
fn test_fill_key_system_source() {
    let source = SystemEntropySource {};
    let mut first = [0u8; 32];
    let mut second = [0u8; 32];

    source.fill_key(&mut first).expect("Failed to fill_key(..)");
    source.fill_key(&mut second).expect("Failed to fill_key(..)");

    // Two 256-bit draws colliding means the source is broken.
    assert_ne!(first, second);
}

#[test]
fn test_fill_key_zero_length_key() {
    let source = SystemEntropySource {};
    let mut key: [u8; 0] = [];

    assert!(source.fill_key(&mut key).is_ok());
}

proptest! {
    #[test]
    fn prop_fill_key_cipher_key_lengths(len in prop::sample::select(vec![5usize, 8, 16, 24, 32, 64])) {
        let source = SystemEntropySource {};
        let mut key = vec![0u8; len];

        prop_assert!(source.fill_key(&mut key).is_ok());
        prop_assert_eq!(key.len(), len);
    }
}
