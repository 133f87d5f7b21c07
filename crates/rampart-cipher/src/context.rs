// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Cipher context lifecycle: binding, init, control, copy and cleanup.

use alloc::sync::Arc;
use core::fmt;

use rampart_rand::{EntropySource, SystemEntropySource};
use rampart_util::wipe_vec;
use zeroize::Zeroize;

use crate::block::BlockBuffer;
use crate::consts::{MAX_IV_LENGTH, SUPPORTED_BLOCK_SIZES};
use crate::driver::{CipherDriver, CtrlOp};
use crate::error::{CipherError, DriverError};
use crate::flags::{CipherFlags, CipherMode, ContextFlags, Direction};
use crate::limits::CodecLimits;
use crate::state::CipherState;

/// Streaming symmetric cipher context.
///
/// Owns one bound [`CipherDriver`], the driver's state, the partial-block
/// buffer and the held-back final block of a padded decryption. All of it is
/// wiped on [`reset`](CipherContext::reset) and on drop.
///
/// A context is `Send` but meant to be driven by one owner at a time.
pub struct CipherContext {
    pub(crate) driver: Option<Arc<dyn CipherDriver>>,
    pub(crate) state: CipherState,
    pub(crate) flags: ContextFlags,
    pub(crate) buf: BlockBuffer,
    pub(crate) final_block: BlockBuffer,
    pub(crate) final_used: bool,
    pub(crate) limits: CodecLimits,
}

impl CipherContext {
    /// Creates an unbound context with default [`CodecLimits`].
    pub fn new() -> Self {
        Self::with_limits(CodecLimits::default())
    }

    /// Creates an unbound context with the given limits.
    pub fn with_limits(limits: CodecLimits) -> Self {
        Self {
            driver: None,
            state: CipherState::new(),
            flags: ContextFlags::empty(),
            buf: BlockBuffer::new(),
            final_block: BlockBuffer::new(),
            final_used: false,
            limits,
        }
    }

    /// Initialises the context for `direction`.
    ///
    /// When a driver is given the context is reset first, so flags and any
    /// previous binding are discarded. Passing `None` re-keys or re-IVs the
    /// driver already bound.
    pub fn init(
        &mut self,
        driver: Option<Arc<dyn CipherDriver>>,
        key: Option<&[u8]>,
        iv: Option<&[u8]>,
        direction: Direction,
    ) -> Result<(), CipherError> {
        if driver.is_some() {
            self.reset();
        }

        self.init_with_direction(driver, key, iv, Some(direction))
    }

    /// [`init`](Self::init) for encryption.
    pub fn encrypt_init(
        &mut self,
        driver: Option<Arc<dyn CipherDriver>>,
        key: Option<&[u8]>,
        iv: Option<&[u8]>,
    ) -> Result<(), CipherError> {
        self.init(driver, key, iv, Direction::Encrypt)
    }

    /// [`init`](Self::init) for decryption.
    pub fn decrypt_init(
        &mut self,
        driver: Option<Arc<dyn CipherDriver>>,
        key: Option<&[u8]>,
        iv: Option<&[u8]>,
    ) -> Result<(), CipherError> {
        self.init(driver, key, iv, Direction::Decrypt)
    }

    /// Core init routine.
    ///
    /// `direction: None` keeps the previous direction. A new driver replaces
    /// the current one; only the direction and [`ContextFlags::WRAP_ALLOW`]
    /// survive the swap. Whenever `key` or `iv` is given the corresponding
    /// state is refreshed, and both buffers are cleared on success.
    ///
    /// If the driver's init hook fails the IV slots are restored; the driver
    /// binding itself stays in place.
    pub fn init_with_direction(
        &mut self,
        driver: Option<Arc<dyn CipherDriver>>,
        key: Option<&[u8]>,
        iv: Option<&[u8]>,
        direction: Option<Direction>,
    ) -> Result<(), CipherError> {
        match &driver {
            Some(driver) => self.validate(&**driver)?,
            None => {
                let bound = self.bound_driver()?;
                self.validate(&*bound)?;
            }
        }

        if let Some(direction) = direction {
            self.state.direction = direction;
        }

        if let Some(driver) = driver {
            self.bind(driver)?;
        }

        let driver = self.bound_driver()?;

        let mut saved_original_iv = self.state.original_iv;
        let mut saved_iv = self.state.iv;
        let saved_num = self.state.num;

        let result = self
            .setup_iv(&*driver, iv)
            .and_then(|()| self.run_driver_init(&*driver, key, iv));

        if result.is_err() {
            self.state.original_iv = saved_original_iv;
            self.state.iv = saved_iv;
            self.state.num = saved_num;
        }

        saved_original_iv.zeroize();
        saved_iv.zeroize();
        result?;

        self.buf.clear();
        self.final_block.clear();
        self.final_used = false;

        tracing::trace!(
            driver = driver.name(),
            direction = ?self.state.direction,
            "cipher context initialised"
        );

        Ok(())
    }

    /// Unbinds the driver and wipes every piece of state.
    ///
    /// The driver's cleanup hook runs first; its failure is logged and does
    /// not stop the wipe. Limits are kept. Calling this on an unbound context
    /// is a no-op.
    pub fn reset(&mut self) {
        if let Some(driver) = self.driver.take() {
            if driver.cleanup(&mut self.state).is_err() {
                tracing::debug!(
                    driver = driver.name(),
                    "cleanup hook failed, wiping state anyway"
                );
            }

            tracing::trace!(driver = driver.name(), "cipher context unbound");
        }

        self.state.wipe();
        self.flags = ContextFlags::empty();
        self.buf.clear();
        self.final_block.clear();
        self.final_used = false;
    }

    /// Copies `src` into `self`, including buffered data.
    ///
    /// `self` is reset first. When the driver declares
    /// [`CipherFlags::CUSTOM_COPY`] its copy hook runs last; if it fails the
    /// freshly copied state is wiped and `self` is left unbound.
    pub fn copy_from(&mut self, src: &CipherContext) -> Result<(), CipherError> {
        let Some(driver) = src.driver.clone() else {
            tracing::debug!("copy source has no cipher bound");
            return Err(CipherError::InputNotInitialized);
        };

        self.reset();
        self.state.copy_from(&src.state)?;
        self.flags = src.flags;
        self.buf = src.buf.clone();
        self.final_block = src.final_block.clone();
        self.final_used = src.final_used;
        self.limits = src.limits;
        self.driver = Some(Arc::clone(&driver));

        if driver.flags().contains(CipherFlags::CUSTOM_COPY)
            && driver.copy_state(&src.state, &mut self.state).is_err()
        {
            tracing::debug!(driver = driver.name(), "custom copy hook failed");

            wipe_vec(&mut self.state.data);
            // The hook may have half-initialised the copy; skip its cleanup.
            self.driver = None;
            self.reset();

            return Err(CipherError::CopyFailed);
        }

        Ok(())
    }

    /// Returns an independent copy of this context.
    pub fn try_clone(&self) -> Result<CipherContext, CipherError> {
        let mut ctx = CipherContext::with_limits(self.limits);
        ctx.copy_from(self)?;
        Ok(ctx)
    }

    /// Enables or disables PKCS#7 padding.
    ///
    /// Binding a new driver clears this setting, so call it after init.
    pub fn set_padding(&mut self, enabled: bool) {
        self.flags.set(ContextFlags::NO_PADDING, !enabled);
    }

    /// Returns `true` when padding is applied.
    pub fn padding(&self) -> bool {
        !self.flags.contains(ContextFlags::NO_PADDING)
    }

    /// Sets context flags.
    pub fn set_flags(&mut self, flags: ContextFlags) {
        self.flags.insert(flags);
    }

    /// Clears context flags.
    pub fn clear_flags(&mut self, flags: ContextFlags) {
        self.flags.remove(flags);
    }

    /// Current context flags.
    pub fn flags(&self) -> ContextFlags {
        self.flags
    }

    /// Replaces the codec limits.
    pub fn set_limits(&mut self, limits: CodecLimits) {
        self.limits = limits;
    }

    /// Current codec limits.
    pub fn limits(&self) -> CodecLimits {
        self.limits
    }

    /// Changes the effective key length.
    ///
    /// Drivers with [`CipherFlags::CUSTOM_KEY_LENGTH`] handle the request
    /// through their control hook. Otherwise the current length is always
    /// accepted, and any positive length is accepted by
    /// [`CipherFlags::VARIABLE_LENGTH`] drivers.
    pub fn set_key_length(&mut self, key_len: usize) -> Result<(), CipherError> {
        let driver = self.bound_driver()?;

        if driver.flags().contains(CipherFlags::CUSTOM_KEY_LENGTH) {
            return self.control(CtrlOp::SetKeyLength(key_len)).map(|_| ());
        }

        if self.state.key_len == key_len {
            return Ok(());
        }

        if key_len > 0 && driver.flags().contains(CipherFlags::VARIABLE_LENGTH) {
            self.state.key_len = key_len;
            return Ok(());
        }

        tracing::debug!(
            driver = driver.name(),
            key_len,
            "key length rejected"
        );

        Err(CipherError::InvalidKeyLength)
    }

    /// Forwards a control operation to the bound driver.
    pub fn control(&mut self, op: CtrlOp<'_>) -> Result<i32, CipherError> {
        let driver = self.bound_driver()?;

        driver.control(&mut self.state, op).map_err(|err| {
            tracing::debug!(driver = driver.name(), error = %err, "control failed");

            match err {
                DriverError::ControlNotImplemented => CipherError::CtrlNotImplemented,
                DriverError::OperationNotImplemented => CipherError::CtrlOperationNotImplemented,
                DriverError::Failed => CipherError::CtrlFailed,
            }
        })
    }

    /// Fills `key[..key_length()]` with a fresh key from the system entropy
    /// source, or from the driver when it declares [`CipherFlags::RAND_KEY`].
    pub fn random_key(&mut self, key: &mut [u8]) -> Result<(), CipherError> {
        self.random_key_with(&SystemEntropySource {}, key)
    }

    /// [`random_key`](Self::random_key) with an explicit entropy source.
    pub fn random_key_with<E>(&mut self, entropy: &E, key: &mut [u8]) -> Result<(), CipherError>
    where
        E: EntropySource + ?Sized,
    {
        let driver = self.bound_driver()?;

        if driver.flags().contains(CipherFlags::RAND_KEY) {
            return self.control(CtrlOp::RandKey(key)).map(|_| ());
        }

        let Some(dest) = key.get_mut(..self.state.key_len) else {
            return Err(CipherError::InvalidKeyLength);
        };

        entropy.fill_key(dest).map_err(|err| {
            tracing::debug!(driver = driver.name(), error = %err, "random key generation failed");
            CipherError::from(err)
        })
    }

    /// Bound driver, if any.
    pub fn driver(&self) -> Option<&Arc<dyn CipherDriver>> {
        self.driver.as_ref()
    }

    /// Block size of the bound driver.
    pub fn block_size(&self) -> Option<usize> {
        self.driver.as_ref().map(|driver| driver.block_size())
    }

    /// IV length of the bound driver.
    pub fn iv_length(&self) -> Option<usize> {
        self.driver.as_ref().map(|driver| driver.iv_length())
    }

    /// Mode of the bound driver.
    pub fn mode(&self) -> Option<CipherMode> {
        self.driver.as_ref().map(|driver| driver.mode())
    }

    /// Effective key length; 0 when unbound.
    pub fn key_length(&self) -> usize {
        self.state.key_len
    }

    /// Current direction.
    pub fn direction(&self) -> Direction {
        self.state.direction
    }

    /// Returns `true` when initialised for encryption.
    pub fn is_encrypting(&self) -> bool {
        self.state.is_encrypting()
    }

    /// Driver-visible state.
    pub fn state(&self) -> &CipherState {
        &self.state
    }

    pub(crate) fn bound_driver(&self) -> Result<Arc<dyn CipherDriver>, CipherError> {
        self.driver.clone().ok_or_else(|| {
            tracing::debug!("no cipher bound to context");
            CipherError::NoCipherSet
        })
    }

    fn validate(&self, driver: &dyn CipherDriver) -> Result<(), CipherError> {
        if !SUPPORTED_BLOCK_SIZES.contains(&driver.block_size()) {
            tracing::debug!(
                driver = driver.name(),
                block_size = driver.block_size(),
                "unsupported block size"
            );
            return Err(CipherError::BadBlockLength);
        }

        if driver.mode() == CipherMode::Wrap && !self.flags.contains(ContextFlags::WRAP_ALLOW) {
            tracing::debug!(driver = driver.name(), "wrap mode not allowed");
            return Err(CipherError::WrapModeNotAllowed);
        }

        Ok(())
    }

    fn bind(&mut self, driver: Arc<dyn CipherDriver>) -> Result<(), CipherError> {
        if self.driver.is_some() {
            let flags = self.flags;
            let direction = self.state.direction;

            self.reset();

            self.flags = flags;
            self.state.direction = direction;
        }

        self.state.allocate(driver.state_size())?;
        self.state.key_len = driver.key_length();

        self.flags &= ContextFlags::WRAP_ALLOW;
        if driver.flags().contains(CipherFlags::NO_PADDING) {
            self.flags |= ContextFlags::NO_PADDING;
        }

        tracing::trace!(driver = driver.name(), "cipher context bound");

        let ctrl_init = driver.flags().contains(CipherFlags::CTRL_INIT);
        self.driver = Some(driver);

        if ctrl_init {
            self.control(CtrlOp::Init)
                .map_err(|_| CipherError::InitializationError)?;
        }

        Ok(())
    }

    fn setup_iv(&mut self, driver: &dyn CipherDriver, iv: Option<&[u8]>) -> Result<(), CipherError> {
        if driver.flags().contains(CipherFlags::CUSTOM_IV) {
            return Ok(());
        }

        match driver.mode() {
            CipherMode::Stream | CipherMode::Ecb | CipherMode::Wrap | CipherMode::Custom => Ok(()),
            CipherMode::Cfb | CipherMode::Ofb => {
                self.state.num = 0;
                self.setup_chained_iv(driver, iv)
            }
            CipherMode::Cbc => self.setup_chained_iv(driver, iv),
            CipherMode::Ctr => {
                self.state.num = 0;

                let iv_len = checked_iv_length(driver)?;
                if let Some(iv) = iv {
                    let src = iv.get(..iv_len).ok_or(CipherError::InvalidIvLength)?;
                    self.state.iv[..iv_len].copy_from_slice(src);
                }

                Ok(())
            }
        }
    }

    fn setup_chained_iv(
        &mut self,
        driver: &dyn CipherDriver,
        iv: Option<&[u8]>,
    ) -> Result<(), CipherError> {
        let iv_len = checked_iv_length(driver)?;

        if let Some(iv) = iv {
            let src = iv.get(..iv_len).ok_or(CipherError::InvalidIvLength)?;
            self.state.original_iv[..iv_len].copy_from_slice(src);
        }

        let (original, working) = (&self.state.original_iv, &mut self.state.iv);
        working[..iv_len].copy_from_slice(&original[..iv_len]);

        Ok(())
    }

    fn run_driver_init(
        &mut self,
        driver: &dyn CipherDriver,
        key: Option<&[u8]>,
        iv: Option<&[u8]>,
    ) -> Result<(), CipherError> {
        if key.is_none() && !driver.flags().contains(CipherFlags::ALWAYS_CALL_INIT) {
            return Ok(());
        }

        let direction = self.state.direction;
        driver
            .init(&mut self.state, key, iv, direction)
            .map_err(|err| {
                tracing::debug!(driver = driver.name(), error = %err, "driver init failed");
                CipherError::InitializationError
            })
    }
}

fn checked_iv_length(driver: &dyn CipherDriver) -> Result<usize, CipherError> {
    let iv_len = driver.iv_length();

    if iv_len > MAX_IV_LENGTH {
        tracing::debug!(driver = driver.name(), iv_len, "iv too large");
        return Err(CipherError::IvTooLarge);
    }

    Ok(iv_len)
}

impl Default for CipherContext {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CipherContext {
    fn drop(&mut self) {
        self.reset();
    }
}

impl fmt::Debug for CipherContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CipherContext")
            .field("driver", &self.driver.as_ref().map(|driver| driver.name()))
            .field("direction", &self.state.direction)
            .field("flags", &self.flags)
            .field("state", &"[REDACTED]")
            .finish()
    }
}
