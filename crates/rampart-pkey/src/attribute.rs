// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use zeroize::Zeroize;

/// Named, multi-valued attribute attached to a key object
/// (friendly name, local key id, ...). Wiped on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyAttribute {
    name: String,
    values: Vec<Vec<u8>>,
}

impl KeyAttribute {
    /// Creates an attribute with no values.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }

    /// Appends a value.
    pub fn with_value(mut self, value: impl Into<Vec<u8>>) -> Self {
        self.values.push(value.into());
        self
    }

    /// Attribute name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attribute values in insertion order.
    pub fn values(&self) -> &[Vec<u8>] {
        &self.values
    }
}

impl Drop for KeyAttribute {
    fn drop(&mut self) {
        self.name.zeroize();
        self.values.zeroize();
    }
}

impl fmt::Debug for KeyAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyAttribute")
            .field("name", &self.name)
            .field("values", &self.values.len())
            .finish()
    }
}
