// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::attribute::KeyAttribute;
use crate::key_type::KeyType;
use crate::object::KeyObject;

use super::utils::{assigned_key, free_count, full_registry};

#[test]
fn test_attributes_are_kept_in_order() {
    let mut key = KeyObject::new();

    key.add_attribute(KeyAttribute::new("friendlyName").with_value(b"signing key".to_vec()))
        .expect("Failed to add_attribute(..)");
    key.add_attribute(
        KeyAttribute::new("localKeyID")
            .with_value(vec![0x01, 0x02])
            .with_value(vec![0x03]),
    )
    .expect("Failed to add_attribute(..)");

    let names: Vec<&str> = key.attributes().iter().map(KeyAttribute::name).collect();
    assert_eq!(names, ["friendlyName", "localKeyID"]);

    let local = key
        .attribute("localKeyID")
        .expect("Failed to attribute(..)");
    assert_eq!(local.values(), [vec![0x01, 0x02], vec![0x03]]);
    assert!(key.attribute("missing").is_none());
}

#[test]
fn test_attributes_are_visible_through_every_reference() {
    let mut key = KeyObject::new();
    key.add_attribute(KeyAttribute::new("friendlyName").with_value(b"a".to_vec()))
        .expect("Failed to add_attribute(..)");

    let other = key.up_ref();
    assert_eq!(other.attributes().len(), 1);
    assert_eq!(other.attributes()[0].name(), "friendlyName");
}

#[test]
fn test_attribute_debug_hides_values() {
    let attribute = KeyAttribute::new("localKeyID").with_value(b"secret-id".to_vec());
    let debug = format!("{:?}", attribute);

    assert!(debug.contains("localKeyID"));
    assert!(!debug.contains("secret"));
}

#[test]
fn test_destroy_with_attributes_frees_data_once() {
    let (registry, frees) = full_registry(KeyType::X25519);
    let mut key = assigned_key(&registry, KeyType::X25519, &[1; 32], None);
    key.add_attribute(KeyAttribute::new("friendlyName").with_value(b"k".to_vec()))
        .expect("Failed to add_attribute(..)");

    let shared = key.up_ref();
    key.release();
    assert_eq!(free_count(&frees), 0);
    assert_eq!(shared.attributes().len(), 1);

    shared.release();
    assert_eq!(free_count(&frees), 1);
}
