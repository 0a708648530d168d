// crates/runtime/src/lib.rs

//! Contracts between the fork-safety layer and the native networking runtime.

use std::env;

use thiserror::Error;

/// Error type for process-start bootstrap.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BootstrapError {
    /// The runtime initialized before fork support was enabled.
    #[error(
        "networking runtime already initialized without fork support; \
         enable fork support before the runtime starts"
    )]
    InitializationOrder,
}

/// Fork-lifecycle operations exposed by the native networking runtime.
///
/// `prefork` suspends the runtime's background threads and connections ahead
/// of a fork and must be called at most once without a matching postfork.
/// `postfork_parent` resumes the runtime in the process that called
/// `prefork`; `postfork_child` resumes it in the forked child. The runtime
/// enforces the pairing itself and a violation is fatal: it means the
/// interception glue is broken, not that anything is recoverable.
pub trait NetRuntime {
    fn prefork(&self);
    fn postfork_parent(&self);
    fn postfork_child(&self);
}

/// Environment gate a concrete runtime reads once at initialization.
pub trait RuntimeEnv {
    /// Variable that enables the runtime's fork support.
    fn fork_support_var(&self) -> &'static str;

    /// Whether the runtime has already initialized in this process.
    fn initialized(&self) -> bool;
}

/// Enables the runtime's fork support in the process environment.
///
/// Must run before the runtime initializes: the runtime reads the toggle
/// once at startup, and fork support cannot be retrofitted afterward.
///
/// # Errors
///
/// Returns [`BootstrapError::InitializationOrder`] if the runtime reports it
/// has already initialized.
pub fn enable_fork_support(runtime: &dyn RuntimeEnv) -> Result<(), BootstrapError> {
    if runtime.initialized() {
        return Err(BootstrapError::InitializationOrder);
    }
    // SAFETY: bootstrap runs during single-threaded process setup, before
    // the runtime or anything else spawns threads that read the environment.
    unsafe { env::set_var(runtime.fork_support_var(), "1") };
    Ok(())
}

/// Whether this platform can suspend the runtime around `fork`.
///
/// The native runtime's fork handlers are only functional on Linux;
/// everywhere else the no-op coordinator stands in.
pub const fn fork_support_available() -> bool {
    cfg!(target_os = "linux")
}
