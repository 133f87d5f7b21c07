// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::key_type::KeyType;
use crate::method::KeyMethodRegistry;
use crate::object::KeyObject;
use crate::support::test_utils::{MockKeyCapabilities, MockKeyMethod, RawKey};

pub(crate) fn registry_with(methods: Vec<MockKeyMethod>) -> KeyMethodRegistry {
    let mut registry = KeyMethodRegistry::new();
    for method in methods {
        registry.register(method.into_method());
    }
    registry
}

/// Registry with a single full-featured method, plus its free counter.
pub(crate) fn full_registry(key_type: KeyType) -> (KeyMethodRegistry, Arc<AtomicUsize>) {
    let method = MockKeyMethod::new(key_type, MockKeyCapabilities::all());
    let frees = method.free_counter();
    (registry_with(vec![method]), frees)
}

pub(crate) fn free_count(counter: &Arc<AtomicUsize>) -> usize {
    counter.load(Ordering::SeqCst)
}

pub(crate) fn create_private(len: usize, seed: u8) -> Vec<u8> {
    (0..len).map(|i| (i as u8).wrapping_mul(13).wrapping_add(seed)).collect()
}

/// Assigns a `RawKey` with optional parameters to a fresh key object.
pub(crate) fn assigned_key(
    registry: &KeyMethodRegistry,
    key_type: KeyType,
    private: &[u8],
    parameters: Option<&[u8]>,
) -> KeyObject {
    let mut raw = RawKey::from_private(key_type, private);
    if let Some(parameters) = parameters {
        raw = raw.with_parameters(parameters);
    }

    let mut key = KeyObject::new();
    key.assign(registry, key_type, raw.into_material())
        .expect("Failed to assign(..)");
    key
}
