// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use alloc::sync::Arc;

use rampart_util::constant_time_eq;

use crate::driver::{CipherDriver, CtrlOp};
use crate::error::DriverError;
use crate::flags::{CipherFlags, CipherMode, Direction};
use crate::state::CipherState;

const KEY: core::ops::Range<usize> = 0..16;
const CHECKSUM: core::ops::Range<usize> = 16..20;
const EXPECTED_TAG: core::ops::Range<usize> = 20..24;
const EXPECTED_TAG_SET: usize = 24;
const STATE_SIZE: usize = 25;

/// Custom-cipher driver with a 4-byte integrity tag.
///
/// Does its own buffering ([`CipherFlags::CUSTOM_CIPHER`]): every update is
/// passed through verbatim and the tag is produced or verified in
/// [`CipherDriver::finalize`]. On encryption the tag is emitted as final
/// output. On decryption the expected tag must be provided first with
/// [`ToyStreamAead::CTRL_SET_TAG`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ToyStreamAead;

impl ToyStreamAead {
    /// Key length in bytes.
    pub const KEY_LENGTH: usize = 16;

    /// IV length in bytes. The IV is ignored.
    pub const IV_LENGTH: usize = 12;

    /// Tag length in bytes.
    pub const TAG_LENGTH: usize = 4;

    /// Custom control code storing the expected tag from `data`.
    pub const CTRL_SET_TAG: u32 = 0x20;

    /// Custom control code copying the running tag into `data`.
    pub const CTRL_GET_TAG: u32 = 0x21;

    /// Wraps the driver for binding.
    pub fn into_driver(self) -> Arc<dyn CipherDriver> {
        Arc::new(self)
    }

    fn checksum(state: &CipherState) -> Result<[u8; 4], DriverError> {
        let bytes = state.data().get(CHECKSUM).ok_or(DriverError::Failed)?;
        let mut checksum = [0u8; 4];
        checksum.copy_from_slice(bytes);
        Ok(checksum)
    }

    fn absorb(state: &mut CipherState, byte: u8) -> Result<(), DriverError> {
        let current = u32::from_le_bytes(Self::checksum(state)?);
        let next = current.rotate_left(5).wrapping_mul(0x0100_0193) ^ u32::from(byte);

        state
            .data_mut()
            .get_mut(CHECKSUM)
            .ok_or(DriverError::Failed)?
            .copy_from_slice(&next.to_le_bytes());

        Ok(())
    }
}

impl CipherDriver for ToyStreamAead {
    fn name(&self) -> &'static str {
        "toy-stream-aead"
    }

    fn block_size(&self) -> usize {
        1
    }

    fn iv_length(&self) -> usize {
        Self::IV_LENGTH
    }

    fn key_length(&self) -> usize {
        Self::KEY_LENGTH
    }

    fn mode(&self) -> CipherMode {
        CipherMode::Custom
    }

    fn flags(&self) -> CipherFlags {
        CipherFlags::CUSTOM_CIPHER
            | CipherFlags::CUSTOM_IV
            | CipherFlags::ALWAYS_CALL_INIT
            | CipherFlags::ZERO_LENGTH_UPDATE
    }

    fn state_size(&self) -> usize {
        STATE_SIZE
    }

    fn init(
        &self,
        state: &mut CipherState,
        key: Option<&[u8]>,
        _iv: Option<&[u8]>,
        _direction: Direction,
    ) -> Result<(), DriverError> {
        let data = state.data_mut();
        if data.len() != STATE_SIZE {
            return Err(DriverError::Failed);
        }

        if let Some(key) = key {
            let key = key.get(..Self::KEY_LENGTH).ok_or(DriverError::Failed)?;
            data[KEY].copy_from_slice(key);
        }

        data[CHECKSUM].fill(0);
        data[EXPECTED_TAG].fill(0);
        data[EXPECTED_TAG_SET] = 0;
        state.set_num(0);

        Ok(())
    }

    fn transform(
        &self,
        state: &mut CipherState,
        out: &mut [u8],
        input: &[u8],
    ) -> Result<usize, DriverError> {
        if out.len() < input.len() {
            return Err(DriverError::Failed);
        }

        let encrypt = state.is_encrypting();

        for (src, dst) in input.iter().zip(out.iter_mut()) {
            let num = state.num();
            let key_byte = *state
                .data()
                .get(num % Self::KEY_LENGTH)
                .ok_or(DriverError::Failed)?;

            *dst = src ^ key_byte ^ (num as u8);

            let ciphertext = if encrypt { *dst } else { *src };
            Self::absorb(state, ciphertext)?;
            state.set_num(num.wrapping_add(1));
        }

        Ok(input.len())
    }

    fn finalize(&self, state: &mut CipherState, out: &mut [u8]) -> Result<usize, DriverError> {
        let checksum = Self::checksum(state)?;

        if state.is_encrypting() {
            let dest = out.get_mut(..Self::TAG_LENGTH).ok_or(DriverError::Failed)?;
            dest.copy_from_slice(&checksum);
            return Ok(Self::TAG_LENGTH);
        }

        let data = state.data();
        if data.len() != STATE_SIZE {
            return Err(DriverError::Failed);
        }

        if data[EXPECTED_TAG_SET] != 1 || !constant_time_eq(&data[EXPECTED_TAG], &checksum) {
            return Err(DriverError::Failed);
        }

        Ok(0)
    }

    fn control(&self, state: &mut CipherState, op: CtrlOp<'_>) -> Result<i32, DriverError> {
        match op {
            CtrlOp::Custom {
                op: Self::CTRL_SET_TAG,
                data: Some(tag),
                ..
            } => {
                let data = state.data_mut();
                if tag.len() != Self::TAG_LENGTH || data.len() != STATE_SIZE {
                    return Err(DriverError::Failed);
                }

                data[EXPECTED_TAG].copy_from_slice(tag);
                data[EXPECTED_TAG_SET] = 1;

                Ok(1)
            }
            CtrlOp::Custom {
                op: Self::CTRL_GET_TAG,
                data: Some(tag),
                ..
            } => {
                let dest = tag.get_mut(..Self::TAG_LENGTH).ok_or(DriverError::Failed)?;
                dest.copy_from_slice(&Self::checksum(state)?);
                Ok(1)
            }
            _ => Err(DriverError::OperationNotImplemented),
        }
    }
}
