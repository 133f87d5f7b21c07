// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Test utilities for rampart crates.
//!
//! ## License
//!
//! GPL-3.0-only

mod chunking;

pub use chunking::{chunk_lengths, lengths_from_cuts, split_by_lengths};
