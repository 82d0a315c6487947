//! The process-wide installed runtime.
//!
//! Used when an accelerated runtime cannot be owned by a scoped runner. The
//! bundled [`MultiThreadRuntime`](crate::MultiThreadRuntime) always can, so
//! this path serves other [`AcceleratedRuntime`](crate::AcceleratedRuntime)
//! implementations. The runtime is installed once and lives until the process
//! exits. Installing is not reentrant: a second [`install`] fails with
//! [`RuntimeError::AlreadyInstalled`].

use std::sync::OnceLock;

use tokio::runtime::{Handle, Runtime};

use crate::error::{Result, RuntimeError};

static INSTALLED: OnceLock<Runtime> = OnceLock::new();

/// Installs `runtime` as the process-wide runtime.
pub fn install(runtime: Runtime) -> Result<&'static Runtime> {
    INSTALLED
        .set(runtime)
        .map_err(|_| RuntimeError::AlreadyInstalled)?;
    INSTALLED.get().ok_or(RuntimeError::AlreadyInstalled)
}

/// The installed runtime, if any.
pub fn installed() -> Option<&'static Runtime> {
    INSTALLED.get()
}

/// A handle to the installed runtime, for spawning from outside it.
pub fn installed_handle() -> Option<Handle> {
    INSTALLED.get().map(|runtime| runtime.handle().clone())
}
