// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Test key material and a configurable method table.

mod mock_key_method;
mod raw_key;

pub use mock_key_method::{MockKeyCapabilities, MockKeyMethod, MockKeyMethodBehaviour};
pub use raw_key::RawKey;
