// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::Any;
use core::fmt;

use zeroize::Zeroize;

use crate::key_type::KeyType;
use crate::material::KeyMaterial;

/// Opaque byte-string key.
///
/// The public half is derived from the private half by XOR with
/// [`RawKey::PUBLIC_MASK`], so tests can predict it.
#[derive(Clone, PartialEq, Eq)]
pub struct RawKey {
    key_type: KeyType,
    private: Option<Vec<u8>>,
    public: Vec<u8>,
    parameters: Option<Vec<u8>>,
}

impl RawKey {
    /// Mask applied to private bytes to derive the public bytes.
    pub const PUBLIC_MASK: u8 = 0xA5;

    /// Key holding both halves.
    pub fn from_private(key_type: KeyType, private: &[u8]) -> Self {
        Self {
            key_type,
            private: Some(private.to_vec()),
            public: Self::derive_public(private),
            parameters: None,
        }
    }

    /// Key holding only the public half.
    pub fn from_public(key_type: KeyType, public: &[u8]) -> Self {
        Self {
            key_type,
            private: None,
            public: public.to_vec(),
            parameters: None,
        }
    }

    /// Attaches domain parameters.
    pub fn with_parameters(mut self, parameters: &[u8]) -> Self {
        self.parameters = Some(parameters.to_vec());
        self
    }

    /// Public bytes for the given private bytes.
    pub fn derive_public(private: &[u8]) -> Vec<u8> {
        private.iter().map(|byte| byte ^ Self::PUBLIC_MASK).collect()
    }

    /// Private half, if present.
    pub fn private(&self) -> Option<&[u8]> {
        self.private.as_deref()
    }

    /// Public half.
    pub fn public(&self) -> &[u8] {
        &self.public
    }

    /// Domain parameters, if present.
    pub fn parameters(&self) -> Option<&[u8]> {
        self.parameters.as_deref()
    }

    /// Replaces the domain parameters.
    pub fn set_parameters(&mut self, parameters: Option<Vec<u8>>) {
        if let Some(old) = self.parameters.as_mut() {
            old.zeroize();
        }
        self.parameters = parameters;
    }

    /// Boxes the key for [`KeyObject::assign`](crate::KeyObject::assign).
    pub fn into_material(self) -> Box<dyn KeyMaterial> {
        Box::new(self)
    }
}

impl KeyMaterial for RawKey {
    fn key_type(&self) -> KeyType {
        self.key_type
    }

    fn wipe(&mut self) {
        self.private.zeroize();
        self.public.zeroize();
        self.parameters.zeroize();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl Drop for RawKey {
    fn drop(&mut self) {
        self.wipe();
    }
}

impl fmt::Debug for RawKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawKey")
            .field("key_type", &self.key_type)
            .field("private", &self.private.as_ref().map(|_| "[REDACTED]"))
            .field("public_len", &self.public.len())
            .field("parameters", &self.parameters.is_some())
            .finish()
    }
}
