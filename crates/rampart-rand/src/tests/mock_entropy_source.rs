// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::error::EntropyError;
use crate::support::test_utils::{MockEntropySource, MockEntropySourceBehaviour};
use crate::traits::EntropySource;

#[test]
fn test_mock_none_delegates() {
    let mock = MockEntropySource::new(MockEntropySourceBehaviour::None);
    let mut key = [0u8; 16];

    assert!(mock.fill_key(&mut key).is_ok());
    assert_eq!(mock.call_count(), 1);
}

#[test]
fn test_fill_key_failure_wipes_partial_key() {
    let mock = MockEntropySource::new(MockEntropySourceBehaviour::FailAfterPartialFill(10));
    let mut key = [0u8; 16];

    // Raw fill leaves the partial write behind.
    assert_eq!(mock.fill_bytes(&mut key), Err(EntropyError::EntropyNotAvailable));
    assert_eq!(&key[..10], &[0xFF; 10]);

    assert_eq!(mock.fill_key(&mut key), Err(EntropyError::EntropyNotAvailable));

    // Assert zeroization!
    assert_eq!(key, [0u8; 16]);
}

#[test]
fn test_fill_key_failure_wipes_previous_key() {
    let mock = MockEntropySource::new(MockEntropySourceBehaviour::FailAlways);
    let mut key = [0xAB; 24];

    assert_eq!(mock.fill_key(&mut key), Err(EntropyError::EntropyNotAvailable));

    // Assert zeroization!
    assert_eq!(key, [0u8; 24]);
}

#[test]
fn test_mock_fail_at_nth() {
    let mock = MockEntropySource::new(MockEntropySourceBehaviour::FailAtNthFillBytes(2));
    let mut key = [0u8; 16];

    assert!(mock.fill_key(&mut key).is_ok());
    assert!(mock.fill_key(&mut key).is_err());
    assert!(mock.fill_key(&mut key).is_ok());
    assert_eq!(mock.call_count(), 3);
}

#[test]
fn test_mock_constant_key() {
    let mut mock = MockEntropySource::new(MockEntropySourceBehaviour::None);
    mock.change_behaviour(MockEntropySourceBehaviour::Constant(0x5A));

    let mut key = [0u8; 8];
    mock.fill_key(&mut key).expect("Failed to fill_key(..)");

    assert_eq!(key, [0x5A; 8]);
}
