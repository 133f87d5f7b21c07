// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::any::Any;

use crate::key_type::KeyType;

/// Algorithm-specific key data stored inside a [`KeyObject`](crate::KeyObject).
///
/// The object never looks inside; it only checks [`key_type`](Self::key_type)
/// against its own tag and hands the data to the method table.
pub trait KeyMaterial: Any + Send + Sync {
    /// Algorithm this data belongs to.
    fn key_type(&self) -> KeyType;

    /// Overwrites every secret held by this data.
    fn wipe(&mut self);

    /// Upcast for downcasting to the concrete type.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for downcasting to the concrete type.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
