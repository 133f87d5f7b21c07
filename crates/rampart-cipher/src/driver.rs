// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Per-algorithm driver trait.

use crate::error::DriverError;
use crate::flags::{CipherFlags, CipherMode, Direction};
use crate::state::CipherState;

/// Control operations forwarded to [`CipherDriver::control`].
pub enum CtrlOp<'a> {
    /// Sent once after binding when the driver declares
    /// [`CipherFlags::CTRL_INIT`].
    Init,
    /// Change the effective key length (drivers with
    /// [`CipherFlags::CUSTOM_KEY_LENGTH`]).
    SetKeyLength(usize),
    /// Fill the buffer with a fresh key (drivers with
    /// [`CipherFlags::RAND_KEY`]).
    RandKey(&'a mut [u8]),
    /// Driver-specific operation.
    Custom {
        /// Operation code, interpreted by the driver.
        op: u32,
        /// Integer argument.
        arg: i32,
        /// Optional in/out buffer.
        data: Option<&'a mut [u8]>,
    },
}

/// One symmetric algorithm as seen by [`CipherContext`](crate::CipherContext).
///
/// The context owns all buffering and padding. A non-custom driver only ever
/// sees whole blocks in [`transform`](CipherDriver::transform), with `out`
/// exactly as long as `input`.
///
/// Drivers declaring [`CipherFlags::CUSTOM_CIPHER`] receive every update
/// verbatim and produce the final output through
/// [`finalize`](CipherDriver::finalize).
pub trait CipherDriver: Send + Sync {
    /// Human-readable algorithm name, used in log events.
    fn name(&self) -> &'static str;

    /// Block size in bytes. Must be 1, 8 or 16.
    fn block_size(&self) -> usize;

    /// IV length in bytes.
    fn iv_length(&self) -> usize;

    /// Default key length in bytes.
    fn key_length(&self) -> usize;

    /// Mode of operation.
    fn mode(&self) -> CipherMode;

    /// Behaviour flags.
    fn flags(&self) -> CipherFlags {
        CipherFlags::empty()
    }

    /// Bytes of opaque per-context storage this driver needs.
    fn state_size(&self) -> usize {
        0
    }

    /// Sets up key schedule and any IV-derived state.
    fn init(
        &self,
        state: &mut CipherState,
        key: Option<&[u8]>,
        iv: Option<&[u8]>,
        direction: Direction,
    ) -> Result<(), DriverError>;

    /// Transforms `input` into `out` and returns the number of bytes written.
    fn transform(
        &self,
        state: &mut CipherState,
        out: &mut [u8],
        input: &[u8],
    ) -> Result<usize, DriverError>;

    /// Final output of a custom cipher (tag emission or verification).
    fn finalize(&self, _state: &mut CipherState, _out: &mut [u8]) -> Result<usize, DriverError> {
        Ok(0)
    }

    /// Releases driver-held resources. Failures are logged and ignored.
    fn cleanup(&self, _state: &mut CipherState) -> Result<(), DriverError> {
        Ok(())
    }

    /// Control channel.
    fn control(&self, _state: &mut CipherState, _op: CtrlOp<'_>) -> Result<i32, DriverError> {
        Err(DriverError::ControlNotImplemented)
    }

    /// Fixes up `dst` after the context copied `src` field by field. Only
    /// called for drivers with [`CipherFlags::CUSTOM_COPY`].
    fn copy_state(&self, _src: &CipherState, _dst: &mut CipherState) -> Result<(), DriverError> {
        Ok(())
    }
}
