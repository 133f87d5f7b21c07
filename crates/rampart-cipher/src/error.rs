// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Cipher context error types.

use rampart_rand::EntropyError;
use thiserror::Error;

/// Errors reported by [`CipherContext`](crate::CipherContext) operations.
///
/// Padding failures on decryption are deliberately folded into the single
/// [`CipherError::BadDecrypt`] variant.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CipherError {
    /// The context has no driver bound.
    #[error("no cipher set")]
    NoCipherSet,

    /// The driver declares a block size outside of {1, 8, 16}.
    #[error("bad block length")]
    BadBlockLength,

    /// Wrap-mode driver bound without [`ContextFlags::WRAP_ALLOW`](crate::ContextFlags::WRAP_ALLOW).
    #[error("wrap mode not allowed")]
    WrapModeNotAllowed,

    /// The driver's IV length exceeds [`MAX_IV_LENGTH`](crate::MAX_IV_LENGTH).
    #[error("iv too large")]
    IvTooLarge,

    /// The supplied IV is shorter than the driver's IV length.
    #[error("invalid iv length")]
    InvalidIvLength,

    /// The driver rejected the key, IV or its own initialisation control.
    #[error("initialization error")]
    InitializationError,

    /// Key length is not acceptable for the bound driver.
    #[error("invalid key length")]
    InvalidKeyLength,

    /// The driver has no control hook at all.
    #[error("ctrl not implemented")]
    CtrlNotImplemented,

    /// The driver's control hook does not implement the requested operation.
    #[error("ctrl operation not implemented")]
    CtrlOperationNotImplemented,

    /// The driver's control hook failed.
    #[error("ctrl operation failed")]
    CtrlFailed,

    /// Final called without padding while a partial block is buffered.
    #[error("data not multiple of block length")]
    DataNotMultipleOfBlockLength,

    /// The output of one update call would exceed the configured limit.
    #[error("too large")]
    TooLarge,

    /// Decryption produced invalid padding.
    #[error("bad decrypt")]
    BadDecrypt,

    /// Decrypt final called without exactly one held-back block.
    #[error("wrong final block length")]
    WrongFinalBlockLength,

    /// Copy source has no driver bound.
    #[error("input not initialized")]
    InputNotInitialized,

    /// The driver's transform failed.
    #[error("cipher transform failed")]
    TransformFailed,

    /// The driver's custom copy hook failed.
    #[error("custom copy failed")]
    CopyFailed,

    /// Could not reserve memory for driver state or output.
    #[error("allocation failed")]
    AllocationFailed,

    /// Entropy source failed while generating a random key.
    #[error("EntropyError: {0}")]
    Entropy(#[from] EntropyError),
}

/// Errors reported by [`CipherDriver`](crate::CipherDriver) hooks.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DriverError {
    /// The hook ran and failed.
    #[error("driver operation failed")]
    Failed,

    /// The control hook does not implement the requested operation.
    #[error("control operation not implemented")]
    OperationNotImplemented,

    /// The driver has no control hook.
    #[error("driver has no control hook")]
    ControlNotImplemented,
}
