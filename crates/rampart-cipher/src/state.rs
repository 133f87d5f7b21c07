// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use alloc::vec::Vec;
use core::fmt;

use rampart_util::wipe_vec;
use zeroize::Zeroize;

use crate::consts::MAX_IV_LENGTH;
use crate::error::CipherError;
use crate::flags::Direction;

/// Driver-visible part of a [`CipherContext`](crate::CipherContext).
///
/// Drivers receive `&mut CipherState` in every hook. It carries the
/// direction, the effective key length, both IV slots, the feedback/counter
/// position and the driver's opaque per-instance storage, sized by
/// [`CipherDriver::state_size`](crate::CipherDriver::state_size) and zeroed
/// on allocation.
pub struct CipherState {
    pub(crate) direction: Direction,
    pub(crate) key_len: usize,
    pub(crate) original_iv: [u8; MAX_IV_LENGTH],
    pub(crate) iv: [u8; MAX_IV_LENGTH],
    pub(crate) num: usize,
    pub(crate) data: Vec<u8>,
}

impl CipherState {
    pub(crate) const fn new() -> Self {
        Self {
            direction: Direction::Decrypt,
            key_len: 0,
            original_iv: [0u8; MAX_IV_LENGTH],
            iv: [0u8; MAX_IV_LENGTH],
            num: 0,
            data: Vec::new(),
        }
    }

    /// Direction the context was initialised for.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Shorthand for `direction().is_encrypt()`.
    #[inline]
    pub fn is_encrypting(&self) -> bool {
        self.direction.is_encrypt()
    }

    /// Effective key length in bytes.
    #[inline]
    pub fn key_length(&self) -> usize {
        self.key_len
    }

    /// Updates the effective key length. Intended for drivers handling
    /// [`CtrlOp::SetKeyLength`](crate::CtrlOp::SetKeyLength).
    #[inline]
    pub fn set_key_length(&mut self, key_len: usize) {
        self.key_len = key_len;
    }

    /// IV as supplied at init.
    #[inline]
    pub fn original_iv(&self) -> &[u8; MAX_IV_LENGTH] {
        &self.original_iv
    }

    /// Working IV (chaining value or counter block).
    #[inline]
    pub fn iv(&self) -> &[u8; MAX_IV_LENGTH] {
        &self.iv
    }

    /// Mutable working IV.
    #[inline]
    pub fn iv_mut(&mut self) -> &mut [u8; MAX_IV_LENGTH] {
        &mut self.iv
    }

    /// Feedback/counter position for stream-like modes.
    #[inline]
    pub fn num(&self) -> usize {
        self.num
    }

    /// Sets the feedback/counter position.
    #[inline]
    pub fn set_num(&mut self, num: usize) {
        self.num = num;
    }

    /// Driver-private storage.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable driver-private storage.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Replaces the opaque storage with `size` zeroed bytes, wiping the old one.
    pub(crate) fn allocate(&mut self, size: usize) -> Result<(), CipherError> {
        wipe_vec(&mut self.data);

        if size == 0 {
            return Ok(());
        }

        let mut data = Vec::new();
        data.try_reserve_exact(size)
            .map_err(|_| CipherError::AllocationFailed)?;
        data.resize(size, 0);
        self.data = data;

        Ok(())
    }

    /// Bulk copy of every field, with a deep copy of the opaque storage.
    pub(crate) fn copy_from(&mut self, other: &CipherState) -> Result<(), CipherError> {
        self.direction = other.direction;
        self.key_len = other.key_len;
        self.original_iv = other.original_iv;
        self.iv = other.iv;
        self.num = other.num;

        self.allocate(other.data.len())?;
        self.data.copy_from_slice(&other.data);

        Ok(())
    }

    pub(crate) fn wipe(&mut self) {
        self.direction = Direction::Decrypt;
        self.key_len = 0;
        self.original_iv.zeroize();
        self.iv.zeroize();
        self.num = 0;
        wipe_vec(&mut self.data);
    }
}

impl Drop for CipherState {
    fn drop(&mut self) {
        self.wipe();
    }
}

impl fmt::Debug for CipherState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CipherState")
            .field("direction", &self.direction)
            .field("key_len", &self.key_len)
            .field("iv", &"[REDACTED]")
            .field("num", &self.num)
            .field("data", &"[REDACTED]")
            .finish()
    }
}
