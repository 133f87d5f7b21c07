// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use bitflags::bitflags;

/// Direction a context transforms data in.
///
/// A freshly created context defaults to [`Direction::Decrypt`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Plaintext in, ciphertext out.
    Encrypt,
    /// Ciphertext in, plaintext out.
    #[default]
    Decrypt,
}

impl Direction {
    /// Returns `true` for [`Direction::Encrypt`].
    #[inline]
    pub const fn is_encrypt(self) -> bool {
        matches!(self, Direction::Encrypt)
    }
}

/// Mode of operation declared by a driver. Decides how the context manages
/// the IV slots on init.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherMode {
    /// Stream cipher, no IV state.
    Stream,
    /// Electronic codebook, no IV state.
    Ecb,
    /// Cipher block chaining.
    Cbc,
    /// Cipher feedback.
    Cfb,
    /// Output feedback.
    Ofb,
    /// Counter mode.
    Ctr,
    /// Key wrap. Requires [`ContextFlags::WRAP_ALLOW`].
    Wrap,
    /// Driver manages its own IV.
    Custom,
}

bitflags! {
    /// Behaviour flags declared by a [`CipherDriver`](crate::CipherDriver).
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CipherFlags: u32 {
        /// The driver handles IVs itself; the context leaves the IV slots alone.
        const CUSTOM_IV          = 1 << 0;
        /// Call the driver's init hook even when no key is supplied.
        const ALWAYS_CALL_INIT   = 1 << 1;
        /// Send [`CtrlOp::Init`](crate::CtrlOp::Init) right after binding.
        const CTRL_INIT          = 1 << 2;
        /// Key length changes go through [`CtrlOp::SetKeyLength`](crate::CtrlOp::SetKeyLength).
        const CUSTOM_KEY_LENGTH  = 1 << 3;
        /// Any positive key length is accepted.
        const VARIABLE_LENGTH    = 1 << 4;
        /// Random keys come from [`CtrlOp::RandKey`](crate::CtrlOp::RandKey).
        const RAND_KEY           = 1 << 5;
        /// Run the driver's copy hook after a context copy.
        const CUSTOM_COPY        = 1 << 6;
        /// The driver does its own buffering; update and final delegate to it.
        const CUSTOM_CIPHER      = 1 << 7;
        /// Zero-length updates still reach the transform.
        const ZERO_LENGTH_UPDATE = 1 << 8;
        /// Padding starts disabled after binding; `set_padding(true)` overrides.
        const NO_PADDING         = 1 << 9;
    }
}

bitflags! {
    /// Per-context flags.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ContextFlags: u32 {
        /// Padding disabled: final requires block-aligned input.
        const NO_PADDING = 1 << 0;
        /// Wrap-mode drivers may be bound. Survives rebinding.
        const WRAP_ALLOW = 1 << 1;
    }
}
