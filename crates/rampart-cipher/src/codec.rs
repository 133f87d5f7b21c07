// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Streaming update/final.
//!
//! Public entry points append to a caller-owned `Vec<u8>` and return the
//! number of bytes appended. On error the vector is wiped back to its
//! previous length, so a failed call never leaves partial output behind.
//!
//! Growing the vector reallocates it and the previous buffer is not wiped.
//! Reserve enough capacity up front when the output is sensitive.

use alloc::vec::Vec;

use rampart_util::wipe_and_truncate;
use zeroize::Zeroize;

use crate::consts::{FINAL_CAPACITY, SUPPORTED_BLOCK_SIZES, UPDATE_SLACK};
use crate::context::CipherContext;
use crate::driver::CipherDriver;
use crate::error::CipherError;
use crate::flags::{CipherFlags, ContextFlags, Direction};
use crate::padding::{pad_block, unpadded_len};

impl CipherContext {
    /// Processes `input` in the context's current direction.
    pub fn update(&mut self, input: &[u8], out: &mut Vec<u8>) -> Result<usize, CipherError> {
        match self.state.direction {
            Direction::Encrypt => self.encrypt_update(input, out),
            Direction::Decrypt => self.decrypt_update(input, out),
        }
    }

    /// Completes the stream in the context's current direction.
    pub fn finalize(&mut self, out: &mut Vec<u8>) -> Result<usize, CipherError> {
        match self.state.direction {
            Direction::Encrypt => self.encrypt_final(out),
            Direction::Decrypt => self.decrypt_final(out),
        }
    }

    /// Encrypts `input`, emitting only whole blocks and buffering the rest.
    pub fn encrypt_update(&mut self, input: &[u8], out: &mut Vec<u8>) -> Result<usize, CipherError> {
        let driver = self.bound_driver()?;
        let capacity = self.update_capacity(input.len())?;

        append_output(out, capacity, |window| {
            self.encrypt_update_into(&*driver, input, window)
        })
    }

    /// Decrypts `input`. With padding enabled the last whole block is held
    /// back until [`decrypt_final`](Self::decrypt_final) can validate it.
    pub fn decrypt_update(&mut self, input: &[u8], out: &mut Vec<u8>) -> Result<usize, CipherError> {
        let driver = self.bound_driver()?;
        let capacity = self.update_capacity(input.len())?;

        append_output(out, capacity, |window| {
            self.decrypt_update_into(&*driver, input, window)
        })
    }

    /// Pads and encrypts the buffered remainder.
    pub fn encrypt_final(&mut self, out: &mut Vec<u8>) -> Result<usize, CipherError> {
        let driver = self.bound_driver()?;

        append_output(out, FINAL_CAPACITY, |window| {
            self.encrypt_final_into(&*driver, window)
        })
    }

    /// Validates and strips the padding of the held-back block.
    pub fn decrypt_final(&mut self, out: &mut Vec<u8>) -> Result<usize, CipherError> {
        let driver = self.bound_driver()?;

        append_output(out, FINAL_CAPACITY, |window| {
            self.decrypt_final_into(&*driver, window)
        })
    }

    fn update_capacity(&self, input_len: usize) -> Result<usize, CipherError> {
        if input_len > self.limits.max_update_output {
            tracing::debug!(input_len, "update input exceeds limit");
            return Err(CipherError::TooLarge);
        }

        input_len
            .checked_add(UPDATE_SLACK)
            .ok_or(CipherError::TooLarge)
    }

    /// `out` must hold at least `input.len() + UPDATE_SLACK` bytes.
    pub(crate) fn encrypt_update_into(
        &mut self,
        driver: &dyn CipherDriver,
        input: &[u8],
        out: &mut [u8],
    ) -> Result<usize, CipherError> {
        let flags = driver.flags();

        if input.is_empty() && !flags.contains(CipherFlags::ZERO_LENGTH_UPDATE) {
            return Ok(0);
        }

        let limit = self.limits.max_update_output;
        if input.len() > limit {
            return Err(CipherError::TooLarge);
        }

        if flags.contains(CipherFlags::CUSTOM_CIPHER) {
            return self.custom_transform(driver, out, input);
        }

        let bl = checked_block_size(driver)?;
        let mask = bl - 1;

        if self.buf.is_empty() && (input.len() & mask) == 0 {
            self.transform(driver, &mut out[..input.len()], input)?;
            return Ok(input.len());
        }

        let mut input = input;
        let mut written = 0;

        let buffered = self.buf.len();
        if buffered != 0 {
            let needed = bl - buffered;

            if needed > input.len() {
                self.buf.extend_from_slice(input)?;
                return Ok(0);
            }

            if ((input.len() - needed) & !mask) > limit.saturating_sub(bl) {
                tracing::debug!(driver = driver.name(), "update output exceeds limit");
                return Err(CipherError::TooLarge);
            }

            // Dropped (and wiped) on every exit, so `self.buf` only changes
            // once the whole call has succeeded.
            let mut block = self.buf.clone();
            block.extend_from_slice(&input[..needed])?;
            self.transform(driver, &mut out[..bl], block.as_slice())?;

            input = &input[needed..];
            written = bl;
        }

        let tail = input.len() & mask;
        let whole = input.len() - tail;

        if whole > 0 {
            self.transform(driver, &mut out[written..written + whole], &input[..whole])?;
            written += whole;
        }

        self.buf.replace(&input[whole..])?;

        Ok(written)
    }

    /// `out` must hold at least `input.len() + UPDATE_SLACK` bytes.
    pub(crate) fn decrypt_update_into(
        &mut self,
        driver: &dyn CipherDriver,
        input: &[u8],
        out: &mut [u8],
    ) -> Result<usize, CipherError> {
        debug_assert!(
            !self.final_used || self.buf.is_empty(),
            "held-back block alongside a partial block"
        );

        let flags = driver.flags();

        if input.is_empty() && !flags.contains(CipherFlags::ZERO_LENGTH_UPDATE) {
            return Ok(0);
        }

        if flags.contains(CipherFlags::CUSTOM_CIPHER) || self.flags.contains(ContextFlags::NO_PADDING) {
            return self.encrypt_update_into(driver, input, out);
        }

        // Flagged drivers still see the empty transform; the held-back block stays put.
        if input.is_empty() {
            return self.encrypt_update_into(driver, input, out);
        }

        let limit = self.limits.max_update_output;
        if input.len() > limit {
            return Err(CipherError::TooLarge);
        }

        let bl = checked_block_size(driver)?;

        let mut offset = 0;
        if self.final_used {
            if (input.len() & !(bl - 1)) > limit.saturating_sub(bl) {
                tracing::debug!(driver = driver.name(), "update output exceeds limit");
                return Err(CipherError::TooLarge);
            }

            out[..bl].copy_from_slice(self.final_block.as_slice());
            offset = bl;
        }

        let mut written = self.encrypt_update_into(driver, input, &mut out[offset..])?;

        if bl > 1 && self.buf.is_empty() && written >= bl {
            written -= bl;

            let held = &mut out[offset + written..offset + written + bl];
            self.final_block.replace(held)?;
            held.zeroize();
            self.final_used = true;
        } else {
            self.final_block.clear();
            self.final_used = false;
        }

        Ok(offset + written)
    }

    /// `out` must hold at least `FINAL_CAPACITY` bytes.
    pub(crate) fn encrypt_final_into(
        &mut self,
        driver: &dyn CipherDriver,
        out: &mut [u8],
    ) -> Result<usize, CipherError> {
        if driver.flags().contains(CipherFlags::CUSTOM_CIPHER) {
            return self.custom_finalize(driver, out);
        }

        let bl = checked_block_size(driver)?;
        if bl == 1 {
            return Ok(0);
        }

        if self.flags.contains(ContextFlags::NO_PADDING) {
            if !self.buf.is_empty() {
                tracing::debug!(driver = driver.name(), "unpadded data not block aligned");
                return Err(CipherError::DataNotMultipleOfBlockLength);
            }
            return Ok(0);
        }

        let mut block = self.buf.clone();
        pad_block(&mut block, bl)?;
        self.transform(driver, &mut out[..bl], block.as_slice())?;
        self.buf.clear();

        Ok(bl)
    }

    /// `out` must hold at least `FINAL_CAPACITY` bytes.
    pub(crate) fn decrypt_final_into(
        &mut self,
        driver: &dyn CipherDriver,
        out: &mut [u8],
    ) -> Result<usize, CipherError> {
        debug_assert!(
            !self.final_used || self.buf.is_empty(),
            "held-back block alongside a partial block"
        );

        if driver.flags().contains(CipherFlags::CUSTOM_CIPHER) {
            return self.custom_finalize(driver, out);
        }

        let bl = checked_block_size(driver)?;

        if self.flags.contains(ContextFlags::NO_PADDING) {
            if !self.buf.is_empty() {
                tracing::debug!(driver = driver.name(), "unpadded data not block aligned");
                return Err(CipherError::DataNotMultipleOfBlockLength);
            }
            return Ok(0);
        }

        if bl == 1 {
            return Ok(0);
        }

        if !self.buf.is_empty() || !self.final_used {
            tracing::debug!(driver = driver.name(), "wrong final block length");
            return Err(CipherError::WrongFinalBlockLength);
        }

        let Some(len) = unpadded_len(self.final_block.as_slice()) else {
            tracing::debug!(driver = driver.name(), "bad decrypt");
            return Err(CipherError::BadDecrypt);
        };

        out[..len].copy_from_slice(&self.final_block.as_slice()[..len]);
        self.final_block.clear();
        self.final_used = false;

        Ok(len)
    }

    fn transform(
        &mut self,
        driver: &dyn CipherDriver,
        out: &mut [u8],
        input: &[u8],
    ) -> Result<usize, CipherError> {
        driver.transform(&mut self.state, out, input).map_err(|err| {
            tracing::debug!(driver = driver.name(), error = %err, "transform failed");
            CipherError::TransformFailed
        })
    }

    fn custom_transform(
        &mut self,
        driver: &dyn CipherDriver,
        out: &mut [u8],
        input: &[u8],
    ) -> Result<usize, CipherError> {
        let produced = self.transform(driver, out, input)?;

        if produced > out.len() {
            tracing::debug!(driver = driver.name(), produced, "driver overran output");
            return Err(CipherError::TransformFailed);
        }

        Ok(produced)
    }

    fn custom_finalize(
        &mut self,
        driver: &dyn CipherDriver,
        out: &mut [u8],
    ) -> Result<usize, CipherError> {
        let produced = driver.finalize(&mut self.state, out).map_err(|err| {
            tracing::debug!(driver = driver.name(), error = %err, "custom final failed");
            CipherError::TransformFailed
        })?;

        if produced > out.len() {
            tracing::debug!(driver = driver.name(), produced, "driver overran output");
            return Err(CipherError::TransformFailed);
        }

        Ok(produced)
    }
}

fn checked_block_size(driver: &dyn CipherDriver) -> Result<usize, CipherError> {
    let bl = driver.block_size();

    if !SUPPORTED_BLOCK_SIZES.contains(&bl) {
        tracing::debug!(driver = driver.name(), block_size = bl, "unsupported block size");
        return Err(CipherError::BadBlockLength);
    }

    Ok(bl)
}

/// Runs `f` over `capacity` fresh bytes appended to `out`, then trims `out`
/// to what `f` reported as written. Anything past that, and everything on
/// error, is wiped before truncation.
///
/// If `out` has to grow, the old allocation is released without being wiped.
/// Callers streaming plaintext should pre-size `out` (`Vec::with_capacity`)
/// to cover the whole stream plus [`FINAL_CAPACITY`].
fn append_output<F>(out: &mut Vec<u8>, capacity: usize, f: F) -> Result<usize, CipherError>
where
    F: FnOnce(&mut [u8]) -> Result<usize, CipherError>,
{
    let start = out.len();
    out.try_reserve(capacity)
        .map_err(|_| CipherError::AllocationFailed)?;
    out.resize(start + capacity, 0);

    match f(&mut out[start..]) {
        Ok(written) => {
            wipe_and_truncate(out, start + written);
            Ok(written)
        }
        Err(err) => {
            wipe_and_truncate(out, start);
            Err(err)
        }
    }
}
