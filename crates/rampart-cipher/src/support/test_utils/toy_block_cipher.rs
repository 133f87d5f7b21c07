// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use alloc::sync::Arc;

use rampart_util::fill_bytes_with_pattern;
use zeroize::Zeroize;

use crate::consts::MAX_BLOCK_LENGTH;
use crate::driver::{CipherDriver, CtrlOp};
use crate::error::DriverError;
use crate::flags::{CipherFlags, CipherMode, Direction};
use crate::state::CipherState;

const SCHEDULE: core::ops::Range<usize> = 0..MAX_BLOCK_LENGTH;
const KEYSTREAM: core::ops::Range<usize> = MAX_BLOCK_LENGTH..2 * MAX_BLOCK_LENGTH;

/// Configurable keyed permutation usable in every [`CipherMode`].
///
/// Each block is XORed with a key schedule and rotated by one byte.
/// Chaining, counter and feedback modes are layered on top of that
/// permutation using the context's IV slots and `num`.
#[derive(Debug, Clone)]
pub struct ToyBlockCipher {
    name: &'static str,
    block_size: usize,
    iv_length: usize,
    key_length: usize,
    mode: CipherMode,
    flags: CipherFlags,
    has_control: bool,
}

impl ToyBlockCipher {
    /// Default key length.
    pub const KEY_LENGTH: usize = 16;

    /// Largest key length accepted through [`CtrlOp::SetKeyLength`].
    pub const MAX_KEY_LENGTH: usize = 32;

    /// Custom control code returning the current `num`.
    pub const CTRL_GET_NUM: u32 = 0x10;

    /// Byte written by [`CtrlOp::RandKey`].
    pub const RAND_KEY_BYTE: u8 = 0x42;

    fn with_defaults(mode: CipherMode, block_size: usize, iv_length: usize) -> Self {
        Self {
            name: "toy-block",
            block_size,
            iv_length,
            key_length: Self::KEY_LENGTH,
            mode,
            flags: CipherFlags::empty(),
            has_control: true,
        }
    }

    /// Codebook mode with the given block size.
    pub fn ecb(block_size: usize) -> Self {
        Self::with_defaults(CipherMode::Ecb, block_size, 0)
    }

    /// Chained mode with the given block size; the IV is one block.
    pub fn cbc(block_size: usize) -> Self {
        Self::with_defaults(CipherMode::Cbc, block_size, block_size)
    }

    /// Counter mode: block size 1, 16-byte counter block.
    pub fn ctr() -> Self {
        Self::with_defaults(CipherMode::Ctr, 1, MAX_BLOCK_LENGTH)
    }

    /// Output feedback mode: block size 1, 16-byte IV.
    pub fn ofb() -> Self {
        Self::with_defaults(CipherMode::Ofb, 1, MAX_BLOCK_LENGTH)
    }

    /// Cipher feedback mode. Shares the feedback keystream of [`ofb`](Self::ofb).
    pub fn cfb() -> Self {
        Self::with_defaults(CipherMode::Cfb, 1, MAX_BLOCK_LENGTH)
    }

    /// Keystream cipher: block size 1, no IV.
    pub fn stream() -> Self {
        Self::with_defaults(CipherMode::Stream, 1, 0)
    }

    /// Key-wrap mode over 8-byte blocks.
    pub fn wrap() -> Self {
        Self::with_defaults(CipherMode::Wrap, 8, 8)
    }

    /// Overrides the name.
    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Adds driver flags.
    pub fn with_flags(mut self, flags: CipherFlags) -> Self {
        self.flags |= flags;
        self
    }

    /// Overrides the declared mode while keeping the block layout.
    pub fn with_mode(mut self, mode: CipherMode) -> Self {
        self.mode = mode;
        self
    }

    /// Overrides the declared block size. Values outside {1, 8, 16} are
    /// accepted here so that rejection paths can be exercised.
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    /// Overrides the declared IV length.
    pub fn with_iv_length(mut self, iv_length: usize) -> Self {
        self.iv_length = iv_length;
        self
    }

    /// Overrides the default key length.
    pub fn with_key_length(mut self, key_length: usize) -> Self {
        self.key_length = key_length;
        self
    }

    /// Removes the control hook entirely.
    pub fn without_control(mut self) -> Self {
        self.has_control = false;
        self
    }

    /// Wraps the driver for binding.
    pub fn into_driver(self) -> Arc<dyn CipherDriver> {
        Arc::new(self)
    }

    fn schedule(state: &CipherState) -> Result<[u8; MAX_BLOCK_LENGTH], DriverError> {
        let bytes = state.data().get(SCHEDULE).ok_or(DriverError::Failed)?;
        let mut schedule = [0u8; MAX_BLOCK_LENGTH];
        schedule.copy_from_slice(bytes);
        Ok(schedule)
    }

    fn encrypt_block(schedule: &[u8], input: &[u8], out: &mut [u8]) {
        let bl = input.len();
        for i in 0..bl {
            let j = (i + 1) % bl;
            out[i] = (input[j] ^ schedule[j]).rotate_left(1);
        }
    }

    fn decrypt_block(schedule: &[u8], input: &[u8], out: &mut [u8]) {
        let bl = input.len();
        for j in 0..bl {
            let i = (j + bl - 1) % bl;
            out[j] = input[i].rotate_right(1) ^ schedule[j];
        }
    }

    fn ecb_transform(&self, schedule: &[u8], encrypt: bool, out: &mut [u8], input: &[u8]) {
        let bl = self.block_size;
        for (src, dst) in input.chunks_exact(bl).zip(out.chunks_exact_mut(bl)) {
            if encrypt {
                Self::encrypt_block(&schedule[..bl], src, dst);
            } else {
                Self::decrypt_block(&schedule[..bl], src, dst);
            }
        }
    }

    fn cbc_transform(
        &self,
        state: &mut CipherState,
        schedule: &[u8],
        out: &mut [u8],
        input: &[u8],
    ) {
        let bl = self.block_size;
        let encrypt = state.is_encrypting();

        for (src, dst) in input.chunks_exact(bl).zip(out.chunks_exact_mut(bl)) {
            let mut block = [0u8; MAX_BLOCK_LENGTH];

            if encrypt {
                for (b, (s, v)) in block.iter_mut().zip(src.iter().zip(state.iv().iter())) {
                    *b = s ^ v;
                }
                Self::encrypt_block(&schedule[..bl], &block[..bl], dst);
                state.iv_mut()[..bl].copy_from_slice(dst);
            } else {
                Self::decrypt_block(&schedule[..bl], src, &mut block[..bl]);
                for (d, (b, v)) in dst.iter_mut().zip(block.iter().zip(state.iv().iter())) {
                    *d = b ^ v;
                }
                state.iv_mut()[..bl].copy_from_slice(src);
            }

            block.zeroize();
        }
    }

    fn ctr_transform(
        state: &mut CipherState,
        schedule: &[u8],
        out: &mut [u8],
        input: &[u8],
    ) -> Result<(), DriverError> {
        for (src, dst) in input.iter().zip(out.iter_mut()) {
            let num = state.num();

            if num == 0 {
                let mut keystream = [0u8; MAX_BLOCK_LENGTH];
                Self::encrypt_block(schedule, state.iv(), &mut keystream);
                state
                    .data_mut()
                    .get_mut(KEYSTREAM)
                    .ok_or(DriverError::Failed)?
                    .copy_from_slice(&keystream);
                keystream.zeroize();

                for byte in state.iv_mut().iter_mut().rev() {
                    *byte = byte.wrapping_add(1);
                    if *byte != 0 {
                        break;
                    }
                }
            }

            let keystream = state.data().get(KEYSTREAM).ok_or(DriverError::Failed)?;
            *dst = src ^ keystream[num];
            state.set_num((num + 1) % MAX_BLOCK_LENGTH);
        }

        Ok(())
    }

    fn ofb_transform(state: &mut CipherState, schedule: &[u8], out: &mut [u8], input: &[u8]) {
        for (src, dst) in input.iter().zip(out.iter_mut()) {
            let num = state.num();

            if num == 0 {
                let mut next = [0u8; MAX_BLOCK_LENGTH];
                Self::encrypt_block(schedule, state.iv(), &mut next);
                state.iv_mut().copy_from_slice(&next);
                next.zeroize();
            }

            *dst = src ^ state.iv()[num];
            state.set_num((num + 1) % MAX_BLOCK_LENGTH);
        }
    }

    fn stream_transform(state: &mut CipherState, schedule: &[u8], out: &mut [u8], input: &[u8]) {
        for (src, dst) in input.iter().zip(out.iter_mut()) {
            let num = state.num();
            *dst = src ^ schedule[num % MAX_BLOCK_LENGTH] ^ (num as u8);
            state.set_num(num.wrapping_add(1));
        }
    }
}

impl CipherDriver for ToyBlockCipher {
    fn name(&self) -> &'static str {
        self.name
    }

    fn block_size(&self) -> usize {
        self.block_size
    }

    fn iv_length(&self) -> usize {
        self.iv_length
    }

    fn key_length(&self) -> usize {
        self.key_length
    }

    fn mode(&self) -> CipherMode {
        self.mode
    }

    fn flags(&self) -> CipherFlags {
        self.flags
    }

    fn state_size(&self) -> usize {
        2 * MAX_BLOCK_LENGTH
    }

    fn init(
        &self,
        state: &mut CipherState,
        key: Option<&[u8]>,
        _iv: Option<&[u8]>,
        _direction: Direction,
    ) -> Result<(), DriverError> {
        let Some(key) = key else {
            return Ok(());
        };

        let key_len = state.key_length();
        if key_len == 0 || key.len() < key_len {
            return Err(DriverError::Failed);
        }

        let schedule = state.data_mut().get_mut(SCHEDULE).ok_or(DriverError::Failed)?;
        for (i, byte) in schedule.iter_mut().enumerate() {
            *byte = key[i % key_len] ^ (i as u8).wrapping_mul(0x1d) ^ (key_len as u8);
        }

        Ok(())
    }

    fn transform(
        &self,
        state: &mut CipherState,
        out: &mut [u8],
        input: &[u8],
    ) -> Result<usize, DriverError> {
        if out.len() < input.len() || input.len() % self.block_size.max(1) != 0 {
            return Err(DriverError::Failed);
        }

        let mut schedule = Self::schedule(state)?;
        let encrypt = state.is_encrypting();

        let result = match self.mode {
            CipherMode::Ecb | CipherMode::Wrap | CipherMode::Custom => {
                self.ecb_transform(&schedule, encrypt, out, input);
                Ok(())
            }
            CipherMode::Cbc => {
                self.cbc_transform(state, &schedule, out, input);
                Ok(())
            }
            CipherMode::Ctr => Self::ctr_transform(state, &schedule, out, input),
            CipherMode::Ofb | CipherMode::Cfb => {
                Self::ofb_transform(state, &schedule, out, input);
                Ok(())
            }
            CipherMode::Stream => {
                Self::stream_transform(state, &schedule, out, input);
                Ok(())
            }
        };

        schedule.zeroize();
        result.map(|()| input.len())
    }

    fn control(&self, state: &mut CipherState, op: CtrlOp<'_>) -> Result<i32, DriverError> {
        if !self.has_control {
            return Err(DriverError::ControlNotImplemented);
        }

        match op {
            CtrlOp::Init => Ok(1),
            CtrlOp::SetKeyLength(key_len) => {
                if key_len == 0 || key_len > Self::MAX_KEY_LENGTH {
                    return Err(DriverError::Failed);
                }
                state.set_key_length(key_len);
                Ok(1)
            }
            CtrlOp::RandKey(key) => {
                let dest = key
                    .get_mut(..state.key_length())
                    .ok_or(DriverError::Failed)?;
                fill_bytes_with_pattern(dest, Self::RAND_KEY_BYTE);
                Ok(1)
            }
            CtrlOp::Custom {
                op: Self::CTRL_GET_NUM,
                ..
            } => i32::try_from(state.num()).map_err(|_| DriverError::Failed),
            CtrlOp::Custom { .. } => Err(DriverError::OperationNotImplemented),
        }
    }
}
