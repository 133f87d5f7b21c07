// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::sync::Arc;

use crate::key_type::KeyType;
use crate::method::{KeyMethod, KeyMethodRegistry, KeyMethodResolver};
use crate::object::KeyObject;
use crate::support::test_utils::{MockKeyCapabilities, MockKeyMethod};

use super::utils::registry_with;

#[test]
fn test_registry_lookup() {
    let registry = registry_with(vec![
        MockKeyMethod::new(KeyType::Rsa, MockKeyCapabilities::all()),
        MockKeyMethod::new(KeyType::RsaPss, MockKeyCapabilities::all()),
    ]);

    assert_eq!(registry.len(), 2);
    assert!(!registry.is_empty());
    assert!(KeyMethodRegistry::new().is_empty());

    let rsa = registry.find(KeyType::Rsa).expect("Failed to find(..)");
    assert_eq!(rsa.key_type(), KeyType::Rsa);

    let pss = registry
        .find_by_name("rsa-pss")
        .expect("Failed to find_by_name(..)");
    assert_eq!(pss.key_type(), KeyType::RsaPss);

    assert!(registry.find(KeyType::Dh).is_none());
    assert!(registry.find_by_name("RSA-").is_none());
    assert_eq!(format!("{:?}", registry), "[\"RSA\", \"RSA-PSS\"]");
}

#[test]
fn test_registry_first_registration_wins() {
    let first = MockKeyMethod::new(KeyType::Hmac, MockKeyCapabilities::all()).with_name("first");
    let second = MockKeyMethod::new(KeyType::Hmac, MockKeyCapabilities::all()).with_name("second");
    let registry = registry_with(vec![first, second]);

    let found = registry.find(KeyType::Hmac).expect("Failed to find(..)");
    assert_eq!(found.name(), "first");
    assert_eq!(
        registry
            .find_by_name("second")
            .expect("Failed to find_by_name(..)")
            .name(),
        "second"
    );
}

#[test]
fn test_slice_resolver() {
    let methods: Vec<Arc<dyn KeyMethod>> = vec![
        MockKeyMethod::new(KeyType::Dh, MockKeyCapabilities::all()).into_method(),
    ];
    let mut key = KeyObject::new();

    key.set_type(methods.as_slice(), KeyType::Dh)
        .expect("Failed to set_type(..)");
    assert_eq!(key.id(), KeyType::Dh);

    key.set_type_by_name(methods.as_slice(), "dh")
        .expect("Failed to set_type_by_name(..)");
    assert_eq!(key.id(), KeyType::Dh);
}
