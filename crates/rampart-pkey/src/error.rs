// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Key object error types.

use alloc::boxed::Box;
use core::fmt;

use thiserror::Error;

use crate::material::KeyMaterial;

/// Errors reported by [`KeyObject`](crate::KeyObject) operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum KeyError {
    /// No method is registered for the requested key type or name.
    #[error("unsupported algorithm")]
    UnsupportedAlgorithm,

    /// The key's method does not implement the operation.
    #[error("operation not supported for this key type")]
    OperationNotSupportedForKeyType,

    /// The method rejected the raw key bytes.
    #[error("key setup failed")]
    KeySetupFailed,

    /// The method failed to export the raw key.
    #[error("failed to get raw key")]
    GetRawKeyFailed,

    /// The two keys have different types.
    #[error("different key types")]
    DifferentKeyTypes,

    /// The source key has no domain parameters to copy.
    #[error("missing parameters")]
    MissingParameters,

    /// Both keys carry parameters and they differ.
    #[error("different parameters")]
    DifferentParameters,

    /// Key data does not belong to the key's type.
    #[error("key data does not match key type")]
    KeyDataMismatch,

    /// The key object holds no key data.
    #[error("key object has no key data")]
    MissingKeyData,

    /// Mutation requested on a handle that is not the only reference.
    #[error("key object is shared")]
    Shared,

    /// The method failed to copy domain parameters.
    #[error("parameter copy failed")]
    CopyParametersFailed,

    /// The method failed to compare the keys.
    #[error("comparison failed")]
    ComparisonFailed,

    /// The method or the output sink failed while printing.
    #[error("print failed")]
    PrintFailed,
}

/// Errors reported by [`KeyMethod`](crate::KeyMethod) hooks.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MethodError {
    /// The method does not implement this hook.
    #[error("hook not implemented")]
    Unsupported,

    /// The hook ran and failed.
    #[error("hook failed")]
    Failed,
}

/// Failure of [`KeyObject::assign`](crate::KeyObject::assign).
///
/// Ownership of the key data was never taken; it is handed back in `data`.
#[derive(Error)]
#[error("{error}")]
pub struct AssignError {
    /// Why the assignment failed.
    pub error: KeyError,
    /// The rejected key data.
    pub data: Box<dyn KeyMaterial>,
}

impl AssignError {
    pub(crate) fn new(error: KeyError, data: Box<dyn KeyMaterial>) -> Self {
        Self { error, data }
    }

    /// Takes the rejected key data back.
    pub fn into_data(self) -> Box<dyn KeyMaterial> {
        self.data
    }
}

impl fmt::Debug for AssignError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssignError")
            .field("error", &self.error)
            .field("data", &"[REDACTED]")
            .finish()
    }
}
