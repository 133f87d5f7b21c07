// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

/// Largest block size a driver may declare, and the capacity of the partial
/// block and held-back block buffers.
pub const MAX_BLOCK_LENGTH: usize = 16;

/// Capacity of the original and working IV slots.
pub const MAX_IV_LENGTH: usize = 16;

/// Block sizes the codec accepts. The buffering arithmetic relies on these
/// being powers of two.
pub(crate) const SUPPORTED_BLOCK_SIZES: [usize; 3] = [1, 8, 16];

/// Scratch space reserved past the input length for one update call: one
/// block of buffered carry-over plus one held-back block.
pub(crate) const UPDATE_SLACK: usize = 2 * MAX_BLOCK_LENGTH;

/// Scratch space reserved for one final call (padded block or custom tag).
pub(crate) const FINAL_CAPACITY: usize = 2 * MAX_BLOCK_LENGTH;
