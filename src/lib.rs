// src/lib.rs

//! Fork-safety coordination for a native networking runtime.
//!
//! Forking while a networking runtime holds live connections, background
//! threads, and file descriptors leaves the child with inconsistent thread
//! and lock state. This crate suspends the runtime immediately before the
//! fork and resumes it on both sides, distinguishing the parent from the
//! child by process identity and supporting indefinite suspension.
//!
//! Construct one [`ForkSafety`] at process start and fork through
//! [`ForkSafety::fork`]; callers wrapping a different fork primitive invoke
//! the [`Coordinator`] interception points around it themselves. On
//! platforms where the runtime has no working fork support the constructor
//! binds a no-op coordinator with the same API.
//!
//! # Examples
//!
//! ```no_run
//! use forksafe::{ForkSafety, NetRuntime};
//!
//! struct Runtime;
//!
//! impl NetRuntime for Runtime {
//!     fn prefork(&self) { /* suspend native threads */ }
//!     fn postfork_parent(&self) { /* resume in the parent */ }
//!     fn postfork_child(&self) { /* resume in the child */ }
//! }
//!
//! let mut guard = ForkSafety::new(Runtime);
//! guard.on_after_resume(|is_child| {
//!     if is_child {
//!         // re-open per-process resources
//!     }
//! });
//! # #[cfg(unix)]
//! match guard.fork().expect("fork") {
//!     forksafe::ForkResult::Parent { .. } => { /* ... */ }
//!     forksafe::ForkResult::Child => { /* ... */ }
//! }
//! ```

#[cfg(unix)]
use lifecycle::ForkCoordinator;
use lifecycle::NoopCoordinator;

pub use lifecycle::{AfterResumeHook, BeforeSuspendHook, Coordinator};
#[cfg(unix)]
pub use lifecycle::{PidSource, SystemPid};
#[cfg(unix)]
pub use nix::unistd::ForkResult;
pub use runtime::{
    BootstrapError, NetRuntime, RuntimeEnv, enable_fork_support, fork_support_available,
};

#[cfg(unix)]
mod os;

/// Process-wide owner of the fork-safety coordinator.
///
/// Constructed once at process start; the platform selection gate is
/// evaluated in the constructor and the chosen coordinator is bound for the
/// process lifetime. All mutating operations take `&mut self`: the host is
/// expected to serialize fork attempts, and sharing across threads requires
/// an explicit wrapper of the caller's choosing.
pub struct ForkSafety {
    coordinator: Box<dyn Coordinator + Send>,
}

impl ForkSafety {
    /// Binds a coordinator for `runtime`, or the no-op stand-in on platforms
    /// without fork-interruption support.
    pub fn new<R>(runtime: R) -> Self
    where
        R: NetRuntime + Send + 'static,
    {
        #[cfg(unix)]
        if fork_support_available() {
            return Self {
                coordinator: Box::new(ForkCoordinator::new(runtime)),
            };
        }
        let _ = runtime;
        Self {
            coordinator: Box::new(NoopCoordinator::new()),
        }
    }

    /// Registers a hook run the moment a suspension window opens, before the
    /// runtime is told to suspend. Hooks run in registration order and
    /// cannot be unregistered.
    pub fn on_before_suspend<F>(&mut self, hook: F)
    where
        F: FnMut() + Send + 'static,
    {
        self.coordinator.register_before_suspend(Box::new(hook));
    }

    /// Registers a hook run when the runtime transitions back to active; the
    /// argument is true in a forked child.
    pub fn on_after_resume<F>(&mut self, hook: F)
    where
        F: FnMut(bool) + Send + 'static,
    {
        self.coordinator.register_after_resume(Box::new(hook));
    }

    /// Suspends the runtime until [`resume`](Self::resume), surviving any
    /// forks in between. With `resume_in_child` set, a forked child still
    /// auto-resumes; otherwise children inherit the suspension and must call
    /// [`resume`](Self::resume) themselves.
    pub fn force_suspend(&mut self, resume_in_child: bool) {
        self.coordinator.force_suspend(resume_in_child);
    }

    /// Lifts a forced suspension and resumes the runtime.
    pub fn resume(&mut self) {
        self.coordinator.resume();
    }

    pub fn is_suspended(&self) -> bool {
        self.coordinator.is_suspended()
    }

    /// Direct access to the interception points, for callers wrapping a fork
    /// primitive other than [`fork`](Self::fork).
    pub fn coordinator(&mut self) -> &mut dyn Coordinator {
        self.coordinator.as_mut()
    }

    /// Forks with the runtime suspended across the syscall.
    ///
    /// The suspension window opens immediately before the fork and both
    /// continuations resolve it immediately after: the parent resumes the
    /// runtime (unless force-suspended), the child resumes or inherits the
    /// suspension per the configured policy. If `fork(2)` itself fails, the
    /// suspension is resolved in the surviving process before the error is
    /// returned.
    ///
    /// # Errors
    ///
    /// Propagates the `fork(2)` failure untouched.
    #[cfg(unix)]
    pub fn fork(&mut self) -> nix::Result<ForkResult> {
        os::guarded_fork(self.coordinator.as_mut())
    }
}
