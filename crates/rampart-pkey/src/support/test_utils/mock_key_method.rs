// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use core::sync::atomic::{AtomicUsize, Ordering};

use bitflags::bitflags;
use rampart_util::constant_time_eq;
use zeroize::Zeroizing;

use crate::error::MethodError;
use crate::key_type::KeyType;
use crate::material::KeyMaterial;
use crate::method::KeyMethod;

use super::raw_key::RawKey;

bitflags! {
    /// Hooks a [`MockKeyMethod`] implements. Everything else reports
    /// [`MethodError::Unsupported`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MockKeyCapabilities: u32 {
        /// `private_from_raw` and `raw_private`.
        const RAW_PRIVATE = 1 << 0;
        /// `public_from_raw` and `raw_public`.
        const RAW_PUBLIC = 1 << 1;
        /// `parameters_missing`, `copy_parameters` and `compare_parameters`.
        const PARAMETERS = 1 << 2;
        /// `compare_public`.
        const COMPARE = 1 << 3;
        /// `size`, `bits` and `security_bits`.
        const SIZE = 1 << 4;
        /// The three print hooks.
        const PRINT = 1 << 5;
        /// `default_digest`.
        const DIGEST = 1 << 6;
    }
}

/// Controls which hook of [`MockKeyMethod`] fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockKeyMethodBehaviour {
    /// No injected failures.
    None,
    /// Raw imports fail.
    FailImport,
    /// Raw exports fail.
    FailExport,
    /// Comparisons fail.
    FailCompare,
    /// Parameter copies fail.
    FailCopyParameters,
    /// Print hooks fail.
    FailPrint,
}

/// Method table over [`RawKey`] data with selectable hooks, injectable
/// failures and a free-hook counter.
#[derive(Debug, Clone)]
pub struct MockKeyMethod {
    key_type: KeyType,
    name: Option<&'static str>,
    capabilities: MockKeyCapabilities,
    behaviour: MockKeyMethodBehaviour,
    free_count: Arc<AtomicUsize>,
}

impl MockKeyMethod {
    /// Longest raw key accepted by the import hooks.
    pub const MAX_RAW_LENGTH: usize = 64;

    /// Digest reported by `default_digest`.
    pub const DEFAULT_DIGEST: &'static str = "SHA256";

    /// Method for `key_type` implementing `capabilities`.
    pub fn new(key_type: KeyType, capabilities: MockKeyCapabilities) -> Self {
        Self {
            key_type,
            name: None,
            capabilities,
            behaviour: MockKeyMethodBehaviour::None,
            free_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Replaces the injected behaviour.
    pub fn with_behaviour(mut self, behaviour: MockKeyMethodBehaviour) -> Self {
        self.behaviour = behaviour;
        self
    }

    /// Overrides the lookup name.
    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = Some(name);
        self
    }

    /// Shared counter of free-hook calls, usable after the method has
    /// been moved into a registry.
    pub fn free_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.free_count)
    }

    /// Free-hook calls so far.
    pub fn free_count(&self) -> usize {
        self.free_count.load(Ordering::SeqCst)
    }

    /// Wraps the method for registration.
    pub fn into_method(self) -> Arc<dyn KeyMethod> {
        Arc::new(self)
    }

    fn require(&self, capability: MockKeyCapabilities) -> Result<(), MethodError> {
        if self.capabilities.contains(capability) {
            Ok(())
        } else {
            Err(MethodError::Unsupported)
        }
    }

    fn fail_on(&self, behaviour: MockKeyMethodBehaviour) -> Result<(), MethodError> {
        if self.behaviour == behaviour {
            Err(MethodError::Failed)
        } else {
            Ok(())
        }
    }

    fn raw_key(key: &dyn KeyMaterial) -> Result<&RawKey, MethodError> {
        key.as_any().downcast_ref::<RawKey>().ok_or(MethodError::Failed)
    }

    fn import(&self, bytes: &[u8]) -> Result<(), MethodError> {
        self.fail_on(MockKeyMethodBehaviour::FailImport)?;

        if bytes.is_empty() || bytes.len() > Self::MAX_RAW_LENGTH {
            return Err(MethodError::Failed);
        }

        Ok(())
    }

    fn print_hex(
        &self,
        out: &mut dyn fmt::Write,
        indent: usize,
        label: &str,
        bytes: Option<&[u8]>,
    ) -> Result<(), MethodError> {
        self.require(MockKeyCapabilities::PRINT)?;
        self.fail_on(MockKeyMethodBehaviour::FailPrint)?;

        write_hex(out, indent, label, bytes).map_err(|_| MethodError::Failed)
    }
}

fn write_hex(out: &mut dyn fmt::Write, indent: usize, label: &str, bytes: Option<&[u8]>) -> fmt::Result {
    write!(out, "{:indent$}{}:", "", label, indent = indent)?;

    match bytes {
        Some(bytes) => {
            for byte in bytes {
                write!(out, "{:02x}", byte)?;
            }
        }
        None => write!(out, "none")?,
    }

    writeln!(out)
}

impl KeyMethod for MockKeyMethod {
    fn key_type(&self) -> KeyType {
        self.key_type
    }

    fn name(&self) -> &'static str {
        self.name.unwrap_or_else(|| self.key_type.short_name())
    }

    fn size(&self, key: &dyn KeyMaterial) -> Result<usize, MethodError> {
        self.require(MockKeyCapabilities::SIZE)?;
        Ok(Self::raw_key(key)?.public().len())
    }

    fn bits(&self, key: &dyn KeyMaterial) -> Result<usize, MethodError> {
        Ok(self.size(key)? * 8)
    }

    fn security_bits(&self, key: &dyn KeyMaterial) -> Result<u32, MethodError> {
        let bits = u32::try_from(self.bits(key)?).map_err(|_| MethodError::Failed)?;
        Ok(bits / 2)
    }

    fn parameters_missing(&self, key: &dyn KeyMaterial) -> Result<bool, MethodError> {
        self.require(MockKeyCapabilities::PARAMETERS)?;
        Ok(Self::raw_key(key)?.parameters().is_none())
    }

    fn copy_parameters(&self, to: &mut dyn KeyMaterial, from: &dyn KeyMaterial) -> Result<(), MethodError> {
        self.require(MockKeyCapabilities::PARAMETERS)?;
        self.fail_on(MockKeyMethodBehaviour::FailCopyParameters)?;

        let parameters = Self::raw_key(from)?.parameters().map(<[u8]>::to_vec);
        let to = to.as_any_mut().downcast_mut::<RawKey>().ok_or(MethodError::Failed)?;
        to.set_parameters(parameters);

        Ok(())
    }

    fn compare_parameters(&self, a: &dyn KeyMaterial, b: &dyn KeyMaterial) -> Result<bool, MethodError> {
        self.require(MockKeyCapabilities::PARAMETERS)?;
        self.fail_on(MockKeyMethodBehaviour::FailCompare)?;

        Ok(Self::raw_key(a)?.parameters() == Self::raw_key(b)?.parameters())
    }

    fn compare_public(&self, a: &dyn KeyMaterial, b: &dyn KeyMaterial) -> Result<bool, MethodError> {
        self.require(MockKeyCapabilities::COMPARE)?;
        self.fail_on(MockKeyMethodBehaviour::FailCompare)?;

        Ok(constant_time_eq(Self::raw_key(a)?.public(), Self::raw_key(b)?.public()))
    }

    fn private_from_raw(&self, bytes: &[u8]) -> Result<Box<dyn KeyMaterial>, MethodError> {
        self.require(MockKeyCapabilities::RAW_PRIVATE)?;
        self.import(bytes)?;

        Ok(RawKey::from_private(self.key_type, bytes).into_material())
    }

    fn public_from_raw(&self, bytes: &[u8]) -> Result<Box<dyn KeyMaterial>, MethodError> {
        self.require(MockKeyCapabilities::RAW_PUBLIC)?;
        self.import(bytes)?;

        Ok(RawKey::from_public(self.key_type, bytes).into_material())
    }

    fn raw_private(&self, key: &dyn KeyMaterial) -> Result<Zeroizing<Vec<u8>>, MethodError> {
        self.require(MockKeyCapabilities::RAW_PRIVATE)?;
        self.fail_on(MockKeyMethodBehaviour::FailExport)?;

        let private = Self::raw_key(key)?.private().ok_or(MethodError::Failed)?;
        Ok(Zeroizing::new(private.to_vec()))
    }

    fn raw_public(&self, key: &dyn KeyMaterial) -> Result<Vec<u8>, MethodError> {
        self.require(MockKeyCapabilities::RAW_PUBLIC)?;
        self.fail_on(MockKeyMethodBehaviour::FailExport)?;

        Ok(Self::raw_key(key)?.public().to_vec())
    }

    fn print_public(&self, out: &mut dyn fmt::Write, key: &dyn KeyMaterial, indent: usize) -> Result<(), MethodError> {
        self.print_hex(out, indent, "pub", Some(Self::raw_key(key)?.public()))
    }

    fn print_private(&self, out: &mut dyn fmt::Write, key: &dyn KeyMaterial, indent: usize) -> Result<(), MethodError> {
        self.print_hex(out, indent, "priv", Self::raw_key(key)?.private())
    }

    fn print_parameters(
        &self,
        out: &mut dyn fmt::Write,
        key: &dyn KeyMaterial,
        indent: usize,
    ) -> Result<(), MethodError> {
        self.print_hex(out, indent, "params", Self::raw_key(key)?.parameters())
    }

    fn default_digest(&self, _key: &dyn KeyMaterial) -> Result<&'static str, MethodError> {
        self.require(MockKeyCapabilities::DIGEST)?;
        Ok(Self::DEFAULT_DIGEST)
    }

    fn free(&self, mut key: Box<dyn KeyMaterial>) {
        self.free_count.fetch_add(1, Ordering::SeqCst);
        key.wipe();
    }
}
