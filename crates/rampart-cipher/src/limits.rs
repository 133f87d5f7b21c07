// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

/// Size limits applied by the streaming codec.
///
/// `max_update_output` bounds the number of bytes a single update call may
/// emit, including carried-over and held-back blocks. Calls that would go
/// past it fail with [`CipherError::TooLarge`](crate::CipherError::TooLarge)
/// before any output is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecLimits {
    /// Maximum bytes emitted by one update call.
    pub max_update_output: usize,
}

impl CodecLimits {
    /// Default bound, the largest length a signed 32-bit length field can carry.
    pub const DEFAULT_MAX_UPDATE_OUTPUT: usize = i32::MAX as usize;

    /// Creates limits with the given update output bound.
    pub const fn new(max_update_output: usize) -> Self {
        Self { max_update_output }
    }
}

impl Default for CodecLimits {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_UPDATE_OUTPUT)
    }
}
