// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

/// Outcome of comparing two key objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyComparison {
    /// Same key (or same parameters).
    Equal,
    /// Same type, different key.
    Different,
    /// The keys have different types.
    Incomparable,
    /// The method cannot compare keys of this type.
    Unsupported,
}

impl KeyComparison {
    /// Returns `true` for [`KeyComparison::Equal`].
    #[inline]
    pub const fn is_equal(self) -> bool {
        matches!(self, KeyComparison::Equal)
    }
}
