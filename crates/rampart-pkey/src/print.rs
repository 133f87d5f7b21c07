// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::fmt;

use crate::key_type::KeyType;

/// Indentation is clamped to this many spaces.
pub const MAX_PRINT_INDENT: usize = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PrintKind {
    Public,
    Private,
    Parameters,
}

impl PrintKind {
    pub(crate) const fn label(self) -> &'static str {
        match self {
            PrintKind::Public => "Public Key",
            PrintKind::Private => "Private Key",
            PrintKind::Parameters => "Parameters",
        }
    }
}

/// Writes `<indent><label> algorithm "<long name>" unsupported`.
pub(crate) fn write_unsupported(
    out: &mut dyn fmt::Write,
    indent: usize,
    kind: PrintKind,
    key_type: KeyType,
) -> fmt::Result {
    writeln!(
        out,
        "{:indent$}{} algorithm \"{}\" unsupported",
        "",
        kind.label(),
        key_type.long_name(),
        indent = indent.min(MAX_PRINT_INDENT)
    )
}
