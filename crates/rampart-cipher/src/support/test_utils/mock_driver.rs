// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::sync::atomic::{AtomicUsize, Ordering};

use crate::driver::{CipherDriver, CtrlOp};
use crate::error::DriverError;
use crate::flags::{CipherFlags, CipherMode, Direction};
use crate::state::CipherState;

use super::toy_block_cipher::ToyBlockCipher;

/// Controls which hook of [`MockDriver`] fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockDriverBehaviour {
    /// Delegate everything.
    None,
    /// Fail the nth call to `init` (0-indexed).
    FailInitAt(usize),
    /// Fail the nth call to `transform` (0-indexed).
    FailTransformAt(usize),
    /// Fail every `cleanup`.
    FailCleanup,
    /// Fail every `copy_state`.
    FailCopy,
    /// Fail every `control`.
    FailControl,
}

/// [`ToyBlockCipher`] wrapper with injectable failures and call counters.
#[derive(Debug)]
pub struct MockDriver {
    inner: ToyBlockCipher,
    behaviour: MockDriverBehaviour,
    init_count: AtomicUsize,
    transform_count: AtomicUsize,
    cleanup_count: AtomicUsize,
    copy_count: AtomicUsize,
    control_count: AtomicUsize,
}

impl MockDriver {
    /// Wraps `inner` with the given behaviour.
    pub fn new(inner: ToyBlockCipher, behaviour: MockDriverBehaviour) -> Self {
        Self {
            inner,
            behaviour,
            init_count: AtomicUsize::new(0),
            transform_count: AtomicUsize::new(0),
            cleanup_count: AtomicUsize::new(0),
            copy_count: AtomicUsize::new(0),
            control_count: AtomicUsize::new(0),
        }
    }

    /// Calls to `init` so far.
    pub fn init_count(&self) -> usize {
        self.init_count.load(Ordering::Relaxed)
    }

    /// Calls to `transform` so far.
    pub fn transform_count(&self) -> usize {
        self.transform_count.load(Ordering::Relaxed)
    }

    /// Calls to `cleanup` so far.
    pub fn cleanup_count(&self) -> usize {
        self.cleanup_count.load(Ordering::Relaxed)
    }

    /// Calls to `copy_state` so far.
    pub fn copy_count(&self) -> usize {
        self.copy_count.load(Ordering::Relaxed)
    }

    /// Calls to `control` so far.
    pub fn control_count(&self) -> usize {
        self.control_count.load(Ordering::Relaxed)
    }
}

impl CipherDriver for MockDriver {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn block_size(&self) -> usize {
        self.inner.block_size()
    }

    fn iv_length(&self) -> usize {
        self.inner.iv_length()
    }

    fn key_length(&self) -> usize {
        self.inner.key_length()
    }

    fn mode(&self) -> CipherMode {
        self.inner.mode()
    }

    fn flags(&self) -> CipherFlags {
        self.inner.flags()
    }

    fn state_size(&self) -> usize {
        self.inner.state_size()
    }

    fn init(
        &self,
        state: &mut CipherState,
        key: Option<&[u8]>,
        iv: Option<&[u8]>,
        direction: Direction,
    ) -> Result<(), DriverError> {
        let call = self.init_count.fetch_add(1, Ordering::Relaxed);

        if let MockDriverBehaviour::FailInitAt(idx) = self.behaviour {
            if call == idx {
                return Err(DriverError::Failed);
            }
        }

        self.inner.init(state, key, iv, direction)
    }

    fn transform(
        &self,
        state: &mut CipherState,
        out: &mut [u8],
        input: &[u8],
    ) -> Result<usize, DriverError> {
        let call = self.transform_count.fetch_add(1, Ordering::Relaxed);

        if let MockDriverBehaviour::FailTransformAt(idx) = self.behaviour {
            if call == idx {
                return Err(DriverError::Failed);
            }
        }

        self.inner.transform(state, out, input)
    }

    fn cleanup(&self, state: &mut CipherState) -> Result<(), DriverError> {
        self.cleanup_count.fetch_add(1, Ordering::Relaxed);

        if self.behaviour == MockDriverBehaviour::FailCleanup {
            return Err(DriverError::Failed);
        }

        self.inner.cleanup(state)
    }

    fn control(&self, state: &mut CipherState, op: CtrlOp<'_>) -> Result<i32, DriverError> {
        self.control_count.fetch_add(1, Ordering::Relaxed);

        if self.behaviour == MockDriverBehaviour::FailControl {
            return Err(DriverError::Failed);
        }

        self.inner.control(state, op)
    }

    fn copy_state(&self, src: &CipherState, dst: &mut CipherState) -> Result<(), DriverError> {
        self.copy_count.fetch_add(1, Ordering::Relaxed);

        if self.behaviour == MockDriverBehaviour::FailCopy {
            return Err(DriverError::Failed);
        }

        self.inner.copy_state(src, dst)
    }
}
