// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Reference-counted key object.

use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use zeroize::Zeroizing;

use crate::attribute::KeyAttribute;
use crate::compare::KeyComparison;
use crate::error::{AssignError, KeyError, MethodError};
use crate::key_type::KeyType;
use crate::material::KeyMaterial;
use crate::method::{KeyMethod, KeyMethodResolver};
use crate::print::{MAX_PRINT_INDENT, PrintKind, write_unsupported};

struct KeyInner {
    key_type: KeyType,
    requested_type: KeyType,
    method: Option<Arc<dyn KeyMethod>>,
    data: Option<Box<dyn KeyMaterial>>,
    attributes: Vec<KeyAttribute>,
    save_parameters: bool,
}

impl KeyInner {
    fn new() -> Self {
        Self {
            key_type: KeyType::None,
            requested_type: KeyType::None,
            method: None,
            data: None,
            attributes: Vec::new(),
            save_parameters: true,
        }
    }

    fn bound(method: Arc<dyn KeyMethod>, requested_type: KeyType) -> Self {
        let mut inner = Self::new();
        inner.bind(method, requested_type);
        inner
    }

    /// Hands the data to the method's free hook, or wipes it if untyped.
    fn free_data(&mut self) {
        let Some(mut data) = self.data.take() else {
            return;
        };

        match &self.method {
            Some(method) => method.free(data),
            None => data.wipe(),
        }
    }

    fn bind(&mut self, method: Arc<dyn KeyMethod>, requested_type: KeyType) {
        self.free_data();
        self.key_type = method.key_type();
        self.requested_type = requested_type;
        self.method = Some(method);
    }

    fn unbind(&mut self) {
        self.free_data();
        self.key_type = KeyType::None;
        self.requested_type = KeyType::None;
        self.method = None;
    }
}

impl Drop for KeyInner {
    fn drop(&mut self) {
        self.free_data();
        self.attributes.clear();
        tracing::trace!(key_type = ?self.key_type, "key object destroyed");
    }
}

/// Handle to a shared asymmetric key.
///
/// Cloning (or [`up_ref`](Self::up_ref)) takes another reference; dropping
/// (or [`release`](Self::release)) gives one back. The last release frees
/// the key data through the method's free hook, then wipes the attributes.
///
/// Mutating operations require the handle to be the only reference and
/// fail with [`KeyError::Shared`] otherwise.
pub struct KeyObject {
    inner: Arc<KeyInner>,
}

enum RawKind {
    Private,
    Public,
}

fn not_supported_or(error: MethodError, failed: KeyError) -> KeyError {
    match error {
        MethodError::Unsupported => KeyError::OperationNotSupportedForKeyType,
        MethodError::Failed => failed,
    }
}

impl KeyObject {
    /// Creates an untyped key object with a single reference.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(KeyInner::new()),
        }
    }

    /// Takes another reference to the same key.
    pub fn up_ref(&self) -> KeyObject {
        tracing::trace!(key_type = ?self.inner.key_type, "key object up_ref");

        KeyObject {
            inner: Arc::clone(&self.inner),
        }
    }

    /// Gives this reference back. The last release destroys the key.
    pub fn release(self) {
        drop(self);
    }

    /// Number of live references.
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Whether both handles refer to the same key.
    pub fn ptr_eq(&self, other: &KeyObject) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Algorithm of the bound method, [`KeyType::None`] if untyped.
    pub fn id(&self) -> KeyType {
        self.inner.key_type
    }

    /// Type the caller asked for when the method was bound.
    pub fn requested_type(&self) -> KeyType {
        self.inner.requested_type
    }

    /// Bound method table.
    pub fn method(&self) -> Option<&Arc<dyn KeyMethod>> {
        self.inner.method.as_ref()
    }

    /// Whether the object holds key data.
    pub fn has_data(&self) -> bool {
        self.inner.data.is_some()
    }

    fn inner_mut(&mut self) -> Result<&mut KeyInner, KeyError> {
        let key_type = self.inner.key_type;

        Arc::get_mut(&mut self.inner).ok_or_else(|| {
            tracing::debug!(key_type = ?key_type, "mutation on shared key object");
            KeyError::Shared
        })
    }

    fn method_and_data(&self) -> Result<(&dyn KeyMethod, &dyn KeyMaterial), KeyError> {
        let method = self
            .inner
            .method
            .as_deref()
            .ok_or(KeyError::OperationNotSupportedForKeyType)?;
        let data = self.inner.data.as_deref().ok_or(KeyError::MissingKeyData)?;

        Ok((method, data))
    }

    fn query<T>(
        &self,
        hook: impl FnOnce(&dyn KeyMethod, &dyn KeyMaterial) -> Result<T, MethodError>,
    ) -> Option<T> {
        let method = self.inner.method.as_deref()?;
        let data = self.inner.data.as_deref()?;

        hook(method, data).ok()
    }

    /// Binds the method registered for `key_type`, freeing any current
    /// key data first.
    ///
    /// Re-requesting the type already bound keeps the method without a
    /// lookup. If no method is registered the object ends up untyped.
    pub fn set_type<R>(&mut self, methods: &R, key_type: KeyType) -> Result<(), KeyError>
    where
        R: KeyMethodResolver + ?Sized,
    {
        let inner = self.inner_mut()?;
        inner.free_data();

        if inner.method.is_some() && inner.requested_type == key_type {
            return Ok(());
        }

        match methods.find(key_type) {
            Some(method) => {
                inner.bind(method, key_type);
                Ok(())
            }
            None => {
                tracing::debug!(key_type = ?key_type, "no key method registered");
                inner.unbind();
                Err(KeyError::UnsupportedAlgorithm)
            }
        }
    }

    /// Same as [`set_type`](Self::set_type) but looks the method up by
    /// name, ignoring ASCII case.
    pub fn set_type_by_name<R>(&mut self, methods: &R, name: &str) -> Result<(), KeyError>
    where
        R: KeyMethodResolver + ?Sized,
    {
        let inner = self.inner_mut()?;
        inner.free_data();

        match methods.find_by_name(name) {
            Some(method) => {
                let key_type = method.key_type();
                inner.bind(method, key_type);
                Ok(())
            }
            None => {
                tracing::debug!(method_name = name, "no key method registered");
                inner.unbind();
                Err(KeyError::UnsupportedAlgorithm)
            }
        }
    }

    /// Binds `method` directly, freeing any current key data first.
    pub fn set_method(&mut self, method: Arc<dyn KeyMethod>) -> Result<(), KeyError> {
        let key_type = method.key_type();
        self.inner_mut()?.bind(method, key_type);
        Ok(())
    }

    fn from_raw<R>(methods: &R, key_type: KeyType, bytes: &[u8], kind: RawKind) -> Result<KeyObject, KeyError>
    where
        R: KeyMethodResolver + ?Sized,
    {
        let method = methods.find(key_type).ok_or_else(|| {
            tracing::debug!(key_type = ?key_type, "no key method registered");
            KeyError::UnsupportedAlgorithm
        })?;

        let imported = match kind {
            RawKind::Private => method.private_from_raw(bytes),
            RawKind::Public => method.public_from_raw(bytes),
        };

        let data = imported.map_err(|error| {
            tracing::debug!(key_type = ?key_type, ?error, "raw key import failed");
            not_supported_or(error, KeyError::KeySetupFailed)
        })?;

        if data.key_type() != method.key_type() {
            method.free(data);
            return Err(KeyError::KeySetupFailed);
        }

        let mut inner = KeyInner::bound(method, key_type);
        inner.data = Some(data);

        Ok(KeyObject {
            inner: Arc::new(inner),
        })
    }

    /// Builds a key of `key_type` from raw private key bytes.
    pub fn from_raw_private<R>(methods: &R, key_type: KeyType, bytes: &[u8]) -> Result<KeyObject, KeyError>
    where
        R: KeyMethodResolver + ?Sized,
    {
        Self::from_raw(methods, key_type, bytes, RawKind::Private)
    }

    /// Builds a key of `key_type` from raw public key bytes.
    pub fn from_raw_public<R>(methods: &R, key_type: KeyType, bytes: &[u8]) -> Result<KeyObject, KeyError>
    where
        R: KeyMethodResolver + ?Sized,
    {
        Self::from_raw(methods, key_type, bytes, RawKind::Public)
    }

    /// Exports the raw private key. The buffer is wiped on drop.
    pub fn raw_private(&self) -> Result<Zeroizing<Vec<u8>>, KeyError> {
        let (method, data) = self.method_and_data()?;

        method.raw_private(data).map_err(|error| {
            tracing::debug!(key_type = ?self.inner.key_type, ?error, "raw private key export failed");
            not_supported_or(error, KeyError::GetRawKeyFailed)
        })
    }

    /// Exports the raw public key.
    pub fn raw_public(&self) -> Result<Vec<u8>, KeyError> {
        let (method, data) = self.method_and_data()?;

        method.raw_public(data).map_err(|error| {
            tracing::debug!(key_type = ?self.inner.key_type, ?error, "raw public key export failed");
            not_supported_or(error, KeyError::GetRawKeyFailed)
        })
    }

    /// Binds the method for `key_type` and takes ownership of `data`.
    ///
    /// On failure nothing changes and `data` is returned inside the error.
    pub fn assign<R>(&mut self, methods: &R, key_type: KeyType, data: Box<dyn KeyMaterial>) -> Result<(), AssignError>
    where
        R: KeyMethodResolver + ?Sized,
    {
        let Some(inner) = Arc::get_mut(&mut self.inner) else {
            return Err(AssignError::new(KeyError::Shared, data));
        };

        let Some(method) = methods.find(key_type) else {
            tracing::debug!(key_type = ?key_type, "no key method registered");
            return Err(AssignError::new(KeyError::UnsupportedAlgorithm, data));
        };

        if data.key_type() != method.key_type() {
            tracing::debug!(
                key_type = ?key_type,
                data_type = ?data.key_type(),
                "key data does not match key type"
            );
            return Err(AssignError::new(KeyError::KeyDataMismatch, data));
        }

        inner.bind(method, key_type);
        inner.data = Some(data);

        Ok(())
    }

    /// Borrows the key data as its concrete type.
    pub fn data<T: KeyMaterial>(&self) -> Result<&T, KeyError> {
        self.inner
            .data
            .as_deref()
            .ok_or(KeyError::MissingKeyData)?
            .as_any()
            .downcast_ref::<T>()
            .ok_or(KeyError::KeyDataMismatch)
    }

    /// Mutably borrows the key data as its concrete type.
    pub fn data_mut<T: KeyMaterial>(&mut self) -> Result<&mut T, KeyError> {
        self.inner_mut()?
            .data
            .as_deref_mut()
            .ok_or(KeyError::MissingKeyData)?
            .as_any_mut()
            .downcast_mut::<T>()
            .ok_or(KeyError::KeyDataMismatch)
    }

    /// Maximum encoded output size in bytes, 0 if unknown.
    pub fn size(&self) -> usize {
        self.query(|method, data| method.size(data)).unwrap_or(0)
    }

    /// Key size in bits, 0 if unknown.
    pub fn bits(&self) -> usize {
        self.query(|method, data| method.bits(data)).unwrap_or(0)
    }

    /// Security strength in bits.
    pub fn security_bits(&self) -> Option<u32> {
        self.query(|method, data| method.security_bits(data))
    }

    /// Name of the default signature digest.
    pub fn default_digest(&self) -> Option<&'static str> {
        self.query(|method, data| method.default_digest(data))
    }

    /// Whether the key lacks domain parameters.
    ///
    /// Untyped keys and methods without parameters report `false`; a typed
    /// key with no data reports `true`.
    pub fn missing_parameters(&self) -> bool {
        let Some(method) = self.inner.method.as_deref() else {
            return false;
        };

        match self.inner.data.as_deref() {
            Some(data) => method.parameters_missing(data).unwrap_or(false),
            None => true,
        }
    }

    /// Copies domain parameters from `from`.
    ///
    /// The destination must already hold key data of the source's type; an
    /// untyped destination never does and fails with `MissingKeyData`. If
    /// the destination already has parameters they must match the source's.
    /// Nothing is changed unless the hook itself runs.
    pub fn copy_parameters(&mut self, from: &KeyObject) -> Result<(), KeyError> {
        let from_method = from
            .inner
            .method
            .clone()
            .ok_or(KeyError::OperationNotSupportedForKeyType)?;

        if self.inner.key_type == KeyType::None {
            tracing::debug!(from = ?from.inner.key_type, "parameter copy into untyped key");
            return Err(KeyError::MissingKeyData);
        }

        if self.inner.key_type != from.inner.key_type {
            tracing::debug!(
                to = ?self.inner.key_type,
                from = ?from.inner.key_type,
                "parameter copy between different key types"
            );
            return Err(KeyError::DifferentKeyTypes);
        }

        if from.missing_parameters() {
            tracing::debug!(key_type = ?from.inner.key_type, "parameter copy source has no parameters");
            return Err(KeyError::MissingParameters);
        }

        if !self.missing_parameters() {
            return match self.compare_parameters(from)? {
                KeyComparison::Equal => Ok(()),
                KeyComparison::Unsupported => Err(KeyError::OperationNotSupportedForKeyType),
                _ => Err(KeyError::DifferentParameters),
            };
        }

        let from_data = from.inner.data.as_deref().ok_or(KeyError::MissingParameters)?;
        let to_data = self
            .inner_mut()?
            .data
            .as_deref_mut()
            .ok_or(KeyError::MissingKeyData)?;

        from_method.copy_parameters(to_data, from_data).map_err(|error| {
            tracing::debug!(key_type = ?from_method.key_type(), ?error, "parameter copy failed");
            not_supported_or(error, KeyError::CopyParametersFailed)
        })
    }

    fn data_pair<'a>(&'a self, other: &'a KeyObject) -> Result<(&'a dyn KeyMaterial, &'a dyn KeyMaterial), KeyError> {
        let a = self.inner.data.as_deref().ok_or(KeyError::MissingKeyData)?;
        let b = other.inner.data.as_deref().ok_or(KeyError::MissingKeyData)?;

        Ok((a, b))
    }

    /// Compares domain parameters.
    pub fn compare_parameters(&self, other: &KeyObject) -> Result<KeyComparison, KeyError> {
        if self.inner.key_type != other.inner.key_type {
            return Ok(KeyComparison::Incomparable);
        }

        let Some(method) = self.inner.method.as_deref() else {
            return Ok(KeyComparison::Unsupported);
        };

        let (a, b) = self.data_pair(other)?;

        match method.compare_parameters(a, b) {
            Ok(true) => Ok(KeyComparison::Equal),
            Ok(false) => Ok(KeyComparison::Different),
            Err(MethodError::Unsupported) => Ok(KeyComparison::Unsupported),
            Err(MethodError::Failed) => {
                tracing::debug!(key_type = ?self.inner.key_type, "parameter comparison failed");
                Err(KeyError::ComparisonFailed)
            }
        }
    }

    /// Compares two keys: parameters first when the method has them, then
    /// the public component.
    pub fn compare(&self, other: &KeyObject) -> Result<KeyComparison, KeyError> {
        if self.inner.key_type != other.inner.key_type {
            return Ok(KeyComparison::Incomparable);
        }

        let Some(method) = self.inner.method.as_deref() else {
            return Ok(KeyComparison::Unsupported);
        };

        let (a, b) = self.data_pair(other)?;

        match method.compare_parameters(a, b) {
            Ok(false) => return Ok(KeyComparison::Different),
            Err(MethodError::Failed) => {
                tracing::debug!(key_type = ?self.inner.key_type, "parameter comparison failed");
                return Err(KeyError::ComparisonFailed);
            }
            Ok(true) | Err(MethodError::Unsupported) => {}
        }

        match method.compare_public(a, b) {
            Ok(true) => Ok(KeyComparison::Equal),
            Ok(false) => Ok(KeyComparison::Different),
            Err(MethodError::Unsupported) => Ok(KeyComparison::Unsupported),
            Err(MethodError::Failed) => {
                tracing::debug!(key_type = ?self.inner.key_type, "public key comparison failed");
                Err(KeyError::ComparisonFailed)
            }
        }
    }

    /// Whether parameters are saved with the key. Only DSA and EC keys
    /// track this; every other type reports `false`.
    pub fn save_parameters(&self) -> bool {
        self.inner.key_type.tracks_save_parameters() && self.inner.save_parameters
    }

    /// Sets the save-parameters flag and returns the previous value.
    /// A no-op returning `false` for types that do not track it.
    pub fn set_save_parameters(&mut self, enabled: bool) -> Result<bool, KeyError> {
        if !self.inner.key_type.tracks_save_parameters() {
            return Ok(false);
        }

        let inner = self.inner_mut()?;
        let previous = inner.save_parameters;
        inner.save_parameters = enabled;

        Ok(previous)
    }

    /// Attaches an attribute.
    pub fn add_attribute(&mut self, attribute: KeyAttribute) -> Result<(), KeyError> {
        self.inner_mut()?.attributes.push(attribute);
        Ok(())
    }

    /// Attributes in insertion order.
    pub fn attributes(&self) -> &[KeyAttribute] {
        &self.inner.attributes
    }

    /// First attribute named `name`.
    pub fn attribute(&self, name: &str) -> Option<&KeyAttribute> {
        self.inner
            .attributes
            .iter()
            .find(|attribute| attribute.name() == name)
    }

    fn print(&self, out: &mut dyn fmt::Write, indent: usize, kind: PrintKind) -> Result<(), KeyError> {
        let indent = indent.min(MAX_PRINT_INDENT);

        if let Ok((method, data)) = self.method_and_data() {
            let printed = match kind {
                PrintKind::Public => method.print_public(out, data, indent),
                PrintKind::Private => method.print_private(out, data, indent),
                PrintKind::Parameters => method.print_parameters(out, data, indent),
            };

            match printed {
                Ok(()) => return Ok(()),
                Err(MethodError::Failed) => {
                    tracing::debug!(key_type = ?self.inner.key_type, label = kind.label(), "key print failed");
                    return Err(KeyError::PrintFailed);
                }
                Err(MethodError::Unsupported) => {}
            }
        }

        write_unsupported(out, indent, kind, self.inner.key_type).map_err(|_| KeyError::PrintFailed)
    }

    /// Prints the public component, or an "unsupported" notice.
    pub fn print_public(&self, out: &mut dyn fmt::Write, indent: usize) -> Result<(), KeyError> {
        self.print(out, indent, PrintKind::Public)
    }

    /// Prints the private component, or an "unsupported" notice.
    pub fn print_private(&self, out: &mut dyn fmt::Write, indent: usize) -> Result<(), KeyError> {
        self.print(out, indent, PrintKind::Private)
    }

    /// Prints the domain parameters, or an "unsupported" notice.
    pub fn print_parameters(&self, out: &mut dyn fmt::Write, indent: usize) -> Result<(), KeyError> {
        self.print(out, indent, PrintKind::Parameters)
    }
}

impl Default for KeyObject {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for KeyObject {
    fn clone(&self) -> Self {
        self.up_ref()
    }
}

impl fmt::Debug for KeyObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyObject")
            .field("key_type", &self.inner.key_type)
            .field("requested_type", &self.inner.requested_type)
            .field("data", &self.inner.data.as_ref().map(|_| "[REDACTED]"))
            .field("attributes", &self.inner.attributes.len())
            .field("ref_count", &self.ref_count())
            .finish()
    }
}
