// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Test utilities re-exported from rampart-cipher, rampart-pkey and rampart-rand

#[cfg(feature = "test-utils")]
pub mod cipher {
    pub use rampart_cipher::test_utils::*;
}
#[cfg(feature = "test-utils")]
pub mod pkey {
    pub use rampart_pkey::test_utils::*;
}
#[cfg(feature = "test-utils")]
pub mod rand {
    pub use rampart_rand::test_utils::*;
}
