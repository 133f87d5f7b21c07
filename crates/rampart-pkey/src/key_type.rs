// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

/// Asymmetric algorithm tag.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    /// Untyped key object.
    #[default]
    None,
    /// RSA.
    Rsa,
    /// RSA restricted to PSS signatures.
    RsaPss,
    /// DSA.
    Dsa,
    /// Finite-field Diffie-Hellman.
    Dh,
    /// Elliptic curve keys.
    Ec,
    /// X25519 key agreement.
    X25519,
    /// Ed25519 signatures.
    Ed25519,
    /// HMAC secret.
    Hmac,
    /// CMAC secret.
    Cmac,
    /// Algorithm identified by a numeric id outside this list.
    Other(u32),
}

impl KeyType {
    /// Short name, also the lookup key for
    /// [`KeyMethodResolver::find_by_name`](crate::KeyMethodResolver::find_by_name).
    pub const fn short_name(self) -> &'static str {
        match self {
            KeyType::None => "UNDEF",
            KeyType::Rsa => "RSA",
            KeyType::RsaPss => "RSA-PSS",
            KeyType::Dsa => "DSA",
            KeyType::Dh => "DH",
            KeyType::Ec => "EC",
            KeyType::X25519 => "X25519",
            KeyType::Ed25519 => "ED25519",
            KeyType::Hmac => "HMAC",
            KeyType::Cmac => "CMAC",
            KeyType::Other(_) => "UNKNOWN",
        }
    }

    /// Long name, used in printed output.
    pub const fn long_name(self) -> &'static str {
        match self {
            KeyType::None => "undefined",
            KeyType::Rsa => "rsaEncryption",
            KeyType::RsaPss => "rsassaPss",
            KeyType::Dsa => "dsaEncryption",
            KeyType::Dh => "dhKeyAgreement",
            KeyType::Ec => "id-ecPublicKey",
            KeyType::X25519 => "X25519",
            KeyType::Ed25519 => "ED25519",
            KeyType::Hmac => "hmac",
            KeyType::Cmac => "cmac",
            KeyType::Other(_) => "unknown",
        }
    }

    /// Only DSA and EC keys track whether parameters are saved with them.
    pub(crate) const fn tracks_save_parameters(self) -> bool {
        matches!(self, KeyType::Dsa | KeyType::Ec)
    }
}
