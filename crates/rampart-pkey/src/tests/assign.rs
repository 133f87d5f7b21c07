// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::any::Any;

use crate::error::KeyError;
use crate::key_type::KeyType;
use crate::material::KeyMaterial;
use crate::object::KeyObject;
use crate::support::test_utils::RawKey;

use super::utils::{assigned_key, create_private, free_count, full_registry};

struct OtherKey {
    secret: [u8; 4],
}

impl KeyMaterial for OtherKey {
    fn key_type(&self) -> KeyType {
        KeyType::X25519
    }

    fn wipe(&mut self) {
        self.secret = [0; 4];
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[test]
fn test_assign_takes_ownership() {
    let (registry, frees) = full_registry(KeyType::X25519);
    let private = create_private(32, 8);

    let key = assigned_key(&registry, KeyType::X25519, &private, None);

    assert_eq!(key.id(), KeyType::X25519);
    let raw = key.data::<RawKey>().expect("Failed to data::<RawKey>()");
    assert_eq!(raw.private(), Some(private.as_slice()));

    key.release();
    assert_eq!(free_count(&frees), 1);
}

#[test]
fn test_assign_replaces_previous_data() {
    let (registry, frees) = full_registry(KeyType::X25519);
    let mut key = assigned_key(&registry, KeyType::X25519, &[1; 32], None);

    key.assign(
        &registry,
        KeyType::X25519,
        RawKey::from_private(KeyType::X25519, &[2; 32]).into_material(),
    )
    .expect("Failed to assign(..)");

    assert_eq!(free_count(&frees), 1);
    assert_eq!(
        key.data::<RawKey>()
            .expect("Failed to data::<RawKey>()")
            .private(),
        Some([2u8; 32].as_slice())
    );
}

#[test]
fn test_assign_mismatched_data_is_returned() {
    let (registry, frees) = full_registry(KeyType::X25519);
    let mut key = KeyObject::new();

    let result = key.assign(
        &registry,
        KeyType::X25519,
        RawKey::from_private(KeyType::Ed25519, &[3; 32]).into_material(),
    );

    let err = result.expect_err("Expected assign(..) to fail");
    assert_eq!(err.error, KeyError::KeyDataMismatch);
    assert_eq!(err.into_data().key_type(), KeyType::Ed25519);

    assert_eq!(key.id(), KeyType::None);
    assert!(!key.has_data());
    assert_eq!(free_count(&frees), 0);
}

#[test]
fn test_assign_unknown_type_is_returned() {
    let (registry, frees) = full_registry(KeyType::X25519);
    let mut key = assigned_key(&registry, KeyType::X25519, &[4; 32], None);

    let err = key
        .assign(
            &registry,
            KeyType::Dh,
            RawKey::from_private(KeyType::Dh, &[5; 32]).into_material(),
        )
        .expect_err("Expected assign(..) to fail");

    assert_eq!(err.error, KeyError::UnsupportedAlgorithm);
    assert_eq!(err.data.key_type(), KeyType::Dh);

    // The previous key is untouched.
    assert_eq!(key.id(), KeyType::X25519);
    assert!(key.has_data());
    assert_eq!(free_count(&frees), 0);
}

#[test]
fn test_assign_on_shared_handle_is_returned() {
    let (registry, _frees) = full_registry(KeyType::X25519);
    let mut key = KeyObject::new();
    let _other = key.up_ref();

    let err = key
        .assign(
            &registry,
            KeyType::X25519,
            RawKey::from_private(KeyType::X25519, &[6; 32]).into_material(),
        )
        .expect_err("Expected assign(..) to fail");

    assert_eq!(err.error, KeyError::Shared);
    assert!(format!("{:?}", err).contains("REDACTED"));
    assert_eq!(err.to_string(), KeyError::Shared.to_string());
}

#[test]
fn test_data_access_errors() {
    let (registry, _frees) = full_registry(KeyType::X25519);

    let mut empty = KeyObject::new();
    assert!(matches!(empty.data::<RawKey>(), Err(KeyError::MissingKeyData)));
    assert!(matches!(empty.data_mut::<RawKey>(), Err(KeyError::MissingKeyData)));

    let mut key = KeyObject::new();
    key.assign(&registry, KeyType::X25519, Box::new(OtherKey { secret: [9; 4] }))
        .expect("Failed to assign(..)");

    assert!(matches!(key.data::<RawKey>(), Err(KeyError::KeyDataMismatch)));
    assert_eq!(
        key.data::<OtherKey>()
            .expect("Failed to data::<OtherKey>()")
            .secret,
        [9; 4]
    );

    let other = key.up_ref();
    assert!(matches!(key.data_mut::<OtherKey>(), Err(KeyError::Shared)));
    other.release();
}

#[test]
fn test_data_mut_updates_key() {
    let (registry, _frees) = full_registry(KeyType::Ec);
    let mut key = assigned_key(&registry, KeyType::Ec, &[7; 32], None);
    assert!(key.missing_parameters());

    key.data_mut::<RawKey>()
        .expect("Failed to data_mut::<RawKey>()")
        .set_parameters(Some(vec![0x2a; 8]));

    assert!(!key.missing_parameters());
}
