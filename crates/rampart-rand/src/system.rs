// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use getrandom::Error as GetRandomError;

use crate::error::EntropyError;
use crate::traits::EntropySource;

/// Operating system CSPRNG, reached through `getrandom`.
///
/// This is the source `CipherContext::random_key` uses when the bound
/// driver does not generate keys itself.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemEntropySource {}

impl SystemEntropySource {
    pub(crate) fn fill_bytes_with<F>(fill: F, dest: &mut [u8]) -> Result<(), EntropyError>
    where
        F: FnOnce(&mut [u8]) -> Result<(), GetRandomError>,
    {
        fill(&mut *dest).map_err(|err| {
            tracing::debug!(len = dest.len(), error = %err, "system entropy unavailable");
            EntropyError::EntropyNotAvailable
        })
    }
}

impl EntropySource for SystemEntropySource {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), EntropyError> {
        Self::fill_bytes_with(getrandom::fill, dest)
    }
}
