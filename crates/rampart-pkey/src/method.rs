// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Per-algorithm method tables and their lookup.

use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use zeroize::Zeroizing;

use crate::error::MethodError;
use crate::key_type::KeyType;
use crate::material::KeyMaterial;

/// Table of algorithm-specific operations for one [`KeyType`].
///
/// Every hook except [`key_type`](Self::key_type) is optional. The default
/// bodies return [`MethodError::Unsupported`], which the key object turns
/// into [`KeyError::OperationNotSupportedForKeyType`](crate::KeyError::OperationNotSupportedForKeyType)
/// or its documented fallback.
pub trait KeyMethod: Send + Sync {
    /// Algorithm implemented by this table.
    fn key_type(&self) -> KeyType;

    /// Name used by [`KeyMethodResolver::find_by_name`].
    fn name(&self) -> &'static str {
        self.key_type().short_name()
    }

    /// Largest output (signature, ciphertext) this key produces, in bytes.
    fn size(&self, _key: &dyn KeyMaterial) -> Result<usize, MethodError> {
        Err(MethodError::Unsupported)
    }

    /// Key size in bits.
    fn bits(&self, _key: &dyn KeyMaterial) -> Result<usize, MethodError> {
        Err(MethodError::Unsupported)
    }

    /// Security strength in bits.
    fn security_bits(&self, _key: &dyn KeyMaterial) -> Result<u32, MethodError> {
        Err(MethodError::Unsupported)
    }

    /// Whether the key lacks its domain parameters.
    fn parameters_missing(&self, _key: &dyn KeyMaterial) -> Result<bool, MethodError> {
        Err(MethodError::Unsupported)
    }

    /// Copies domain parameters from `from` into `to`.
    fn copy_parameters(
        &self,
        _to: &mut dyn KeyMaterial,
        _from: &dyn KeyMaterial,
    ) -> Result<(), MethodError> {
        Err(MethodError::Unsupported)
    }

    /// Whether both keys carry the same domain parameters.
    fn compare_parameters(
        &self,
        _a: &dyn KeyMaterial,
        _b: &dyn KeyMaterial,
    ) -> Result<bool, MethodError> {
        Err(MethodError::Unsupported)
    }

    /// Whether both keys carry the same public component.
    fn compare_public(&self, _a: &dyn KeyMaterial, _b: &dyn KeyMaterial) -> Result<bool, MethodError> {
        Err(MethodError::Unsupported)
    }

    /// Builds key data from raw private key bytes.
    fn private_from_raw(&self, _bytes: &[u8]) -> Result<Box<dyn KeyMaterial>, MethodError> {
        Err(MethodError::Unsupported)
    }

    /// Builds key data from raw public key bytes.
    fn public_from_raw(&self, _bytes: &[u8]) -> Result<Box<dyn KeyMaterial>, MethodError> {
        Err(MethodError::Unsupported)
    }

    /// Exports the raw private key.
    fn raw_private(&self, _key: &dyn KeyMaterial) -> Result<Zeroizing<Vec<u8>>, MethodError> {
        Err(MethodError::Unsupported)
    }

    /// Exports the raw public key.
    fn raw_public(&self, _key: &dyn KeyMaterial) -> Result<Vec<u8>, MethodError> {
        Err(MethodError::Unsupported)
    }

    /// Prints the public component.
    fn print_public(
        &self,
        _out: &mut dyn fmt::Write,
        _key: &dyn KeyMaterial,
        _indent: usize,
    ) -> Result<(), MethodError> {
        Err(MethodError::Unsupported)
    }

    /// Prints the private component.
    fn print_private(
        &self,
        _out: &mut dyn fmt::Write,
        _key: &dyn KeyMaterial,
        _indent: usize,
    ) -> Result<(), MethodError> {
        Err(MethodError::Unsupported)
    }

    /// Prints the domain parameters.
    fn print_parameters(
        &self,
        _out: &mut dyn fmt::Write,
        _key: &dyn KeyMaterial,
        _indent: usize,
    ) -> Result<(), MethodError> {
        Err(MethodError::Unsupported)
    }

    /// Name of the default digest for signatures with this key.
    fn default_digest(&self, _key: &dyn KeyMaterial) -> Result<&'static str, MethodError> {
        Err(MethodError::Unsupported)
    }

    /// Releases key data. Called exactly once per piece of data the key
    /// object owned.
    fn free(&self, mut key: Box<dyn KeyMaterial>) {
        key.wipe();
    }
}

/// Lookup of method tables by type or by name.
pub trait KeyMethodResolver {
    /// Method registered for `key_type`.
    fn find(&self, key_type: KeyType) -> Option<Arc<dyn KeyMethod>>;

    /// Method whose [`name`](KeyMethod::name) matches, ignoring ASCII case.
    fn find_by_name(&self, name: &str) -> Option<Arc<dyn KeyMethod>>;
}

impl KeyMethodResolver for [Arc<dyn KeyMethod>] {
    fn find(&self, key_type: KeyType) -> Option<Arc<dyn KeyMethod>> {
        self.iter()
            .find(|method| method.key_type() == key_type)
            .cloned()
    }

    fn find_by_name(&self, name: &str) -> Option<Arc<dyn KeyMethod>> {
        self.iter()
            .find(|method| method.name().eq_ignore_ascii_case(name))
            .cloned()
    }
}

/// Ordered collection of method tables. The first registration for a
/// type wins.
#[derive(Clone, Default)]
pub struct KeyMethodRegistry {
    methods: Vec<Arc<dyn KeyMethod>>,
}

impl KeyMethodRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a method table.
    pub fn register(&mut self, method: Arc<dyn KeyMethod>) {
        tracing::trace!(key_type = ?method.key_type(), method_name = method.name(), "key method registered");
        self.methods.push(method);
    }

    /// Number of registered tables.
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

impl KeyMethodResolver for KeyMethodRegistry {
    fn find(&self, key_type: KeyType) -> Option<Arc<dyn KeyMethod>> {
        self.methods.as_slice().find(key_type)
    }

    fn find_by_name(&self, name: &str) -> Option<Arc<dyn KeyMethod>> {
        self.methods.as_slice().find_by_name(name)
    }
}

impl fmt::Debug for KeyMethodRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.methods.iter().map(|method| method.name()))
            .finish()
    }
}
