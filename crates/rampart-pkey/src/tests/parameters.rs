// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::compare::KeyComparison;
use crate::error::KeyError;
use crate::key_type::KeyType;
use crate::object::KeyObject;
use crate::support::test_utils::{MockKeyCapabilities, MockKeyMethod, MockKeyMethodBehaviour, RawKey};

use super::utils::{assigned_key, full_registry, registry_with};

#[test]
fn test_missing_parameters() {
    let (registry, _frees) = full_registry(KeyType::Dsa);

    assert!(!KeyObject::new().missing_parameters());

    let mut typed = KeyObject::new();
    typed
        .set_type(&registry, KeyType::Dsa)
        .expect("Failed to set_type(..)");
    assert!(typed.missing_parameters());

    let bare = assigned_key(&registry, KeyType::Dsa, &[1; 20], None);
    assert!(bare.missing_parameters());

    let full = assigned_key(&registry, KeyType::Dsa, &[1; 20], Some(b"pqg".as_slice()));
    assert!(!full.missing_parameters());

    let registry = registry_with(vec![MockKeyMethod::new(
        KeyType::X25519,
        MockKeyCapabilities::RAW_PRIVATE,
    )]);
    let no_hook = assigned_key(&registry, KeyType::X25519, &[1; 32], None);
    assert!(!no_hook.missing_parameters());
}

#[test]
fn test_copy_parameters_fills_destination() {
    let (registry, _frees) = full_registry(KeyType::Ec);
    let from = assigned_key(&registry, KeyType::Ec, &[1; 32], Some(b"p256".as_slice()));
    let mut to = assigned_key(&registry, KeyType::Ec, &[2; 32], None);

    to.copy_parameters(&from)
        .expect("Failed to copy_parameters(..)");

    assert!(!to.missing_parameters());
    assert_eq!(to.compare_parameters(&from), Ok(KeyComparison::Equal));
    assert_eq!(
        to.data::<RawKey>()
            .expect("Failed to data::<RawKey>()")
            .parameters(),
        Some(b"p256".as_slice())
    );
}

#[test]
fn test_copy_parameters_checks_existing_parameters() {
    let (registry, _frees) = full_registry(KeyType::Ec);
    let from = assigned_key(&registry, KeyType::Ec, &[1; 32], Some(b"p256".as_slice()));

    let mut same = assigned_key(&registry, KeyType::Ec, &[2; 32], Some(b"p256".as_slice()));
    same.copy_parameters(&from)
        .expect("Failed to copy_parameters(..)");

    let mut different = assigned_key(&registry, KeyType::Ec, &[2; 32], Some(b"p384".as_slice()));
    assert_eq!(
        different.copy_parameters(&from),
        Err(KeyError::DifferentParameters)
    );
    assert_eq!(
        different
            .data::<RawKey>()
            .expect("Failed to data::<RawKey>()")
            .parameters(),
        Some(b"p384".as_slice())
    );
}

#[test]
fn test_copy_parameters_errors() {
    let registry = registry_with(vec![
        MockKeyMethod::new(KeyType::Ec, MockKeyCapabilities::all()),
        MockKeyMethod::new(KeyType::Dsa, MockKeyCapabilities::all()),
    ]);
    let ec = assigned_key(&registry, KeyType::Ec, &[1; 32], Some(b"p256".as_slice()));
    let mut dsa = assigned_key(&registry, KeyType::Dsa, &[1; 20], None);
    assert_eq!(dsa.copy_parameters(&ec), Err(KeyError::DifferentKeyTypes));

    let bare = assigned_key(&registry, KeyType::Ec, &[1; 32], None);
    let mut to = assigned_key(&registry, KeyType::Ec, &[2; 32], None);
    assert_eq!(to.copy_parameters(&bare), Err(KeyError::MissingParameters));

    assert_eq!(
        to.copy_parameters(&KeyObject::new()),
        Err(KeyError::OperationNotSupportedForKeyType)
    );

    let shared = to.up_ref();
    assert_eq!(to.copy_parameters(&ec), Err(KeyError::Shared));
    shared.release();

    let failing = registry_with(vec![
        MockKeyMethod::new(KeyType::Ec, MockKeyCapabilities::all())
            .with_behaviour(MockKeyMethodBehaviour::FailCopyParameters),
    ]);
    let from = assigned_key(&failing, KeyType::Ec, &[1; 32], Some(b"p256".as_slice()));
    let mut to = assigned_key(&failing, KeyType::Ec, &[2; 32], None);
    assert_eq!(to.copy_parameters(&from), Err(KeyError::CopyParametersFailed));
}

#[test]
fn test_copy_parameters_untyped_destination_is_left_untouched() {
    let (registry, _frees) = full_registry(KeyType::Ec);
    let from = assigned_key(&registry, KeyType::Ec, &[1; 32], Some(b"p256".as_slice()));
    let mut to = KeyObject::new();

    assert_eq!(to.copy_parameters(&from), Err(KeyError::MissingKeyData));
    assert_eq!(to.id(), KeyType::None);
    assert!(to.method().is_none());
    assert!(!to.has_data());

    // A typed destination without data fails the same way and keeps its type.
    let mut to = KeyObject::new();
    to.set_type(&registry, KeyType::Ec).expect("Failed to set_type(..)");

    assert_eq!(to.copy_parameters(&from), Err(KeyError::MissingKeyData));
    assert_eq!(to.id(), KeyType::Ec);
    assert!(!to.has_data());
}

#[test]
fn test_save_parameters_only_for_dsa_and_ec() {
    let registry = registry_with(vec![
        MockKeyMethod::new(KeyType::Ec, MockKeyCapabilities::all()),
        MockKeyMethod::new(KeyType::Rsa, MockKeyCapabilities::all()),
    ]);

    let mut ec = assigned_key(&registry, KeyType::Ec, &[1; 32], None);
    assert!(ec.save_parameters());
    assert_eq!(ec.set_save_parameters(false), Ok(true));
    assert!(!ec.save_parameters());
    assert_eq!(ec.set_save_parameters(true), Ok(false));
    assert!(ec.save_parameters());

    let mut rsa = assigned_key(&registry, KeyType::Rsa, &[1; 32], None);
    assert!(!rsa.save_parameters());
    assert_eq!(rsa.set_save_parameters(true), Ok(false));
    assert!(!rsa.save_parameters());
}

#[test]
fn test_default_digest_and_sizes() {
    let (registry, _frees) = full_registry(KeyType::Rsa);
    let key = assigned_key(&registry, KeyType::Rsa, &[1; 64], None);
    assert_eq!(key.default_digest(), Some(MockKeyMethod::DEFAULT_DIGEST));
    assert_eq!(key.size(), 64);
    assert_eq!(key.bits(), 512);

    let registry = registry_with(vec![MockKeyMethod::new(
        KeyType::Rsa,
        MockKeyCapabilities::empty(),
    )]);
    let key = assigned_key(&registry, KeyType::Rsa, &[1; 64], None);
    assert_eq!(key.default_digest(), None);
    assert_eq!(key.size(), 0);
    assert_eq!(key.bits(), 0);
    assert_eq!(key.security_bits(), None);

    let untyped = KeyObject::new();
    assert_eq!(untyped.size(), 0);
    assert_eq!(untyped.default_digest(), None);
}
