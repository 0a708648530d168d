// crates/lifecycle/src/lib.rs

//! Pause/resume coordination for a networking runtime around process forks.
//!
//! [`ForkCoordinator`] owns the suspension window: it pauses the runtime
//! before a fork, decides in each continuation whether it is the parent or
//! the child, and resumes the runtime (or keeps it down) accordingly.
//! [`NoopCoordinator`] satisfies the same contract with empty effects for
//! platforms without fork-interruption support.

#[cfg(unix)]
mod coordinator;
mod noop;
#[cfg(unix)]
mod pid;

#[cfg(unix)]
pub use coordinator::ForkCoordinator;
pub use noop::NoopCoordinator;
#[cfg(unix)]
pub use pid::{PidSource, SystemPid};

/// Callback run when a suspension window opens.
pub type BeforeSuspendHook = Box<dyn FnMut() + Send>;

/// Callback run when the runtime resumes; the argument is true in the child.
pub type AfterResumeHook = Box<dyn FnMut(bool) + Send>;

/// Pause/resume contract shared by the coordinator and its no-op twin.
///
/// Callers wrapping a fork primitive must invoke [`begin_suspension`] once
/// immediately before the fork and [`resolve_suspension`] once immediately
/// after, in both the parent's and the child's continuation. At most one
/// fork may be in flight at a time; the host serializes fork attempts.
///
/// [`begin_suspension`]: Coordinator::begin_suspension
/// [`resolve_suspension`]: Coordinator::resolve_suspension
pub trait Coordinator {
    /// Appends a hook fired the moment a suspension window opens.
    ///
    /// Hooks run in registration order, exactly once per window, and cannot
    /// be unregistered.
    fn register_before_suspend(&mut self, hook: BeforeSuspendHook);

    /// Appends a hook fired when the runtime transitions back to active.
    fn register_after_resume(&mut self, hook: AfterResumeHook);

    /// Opens a suspension window; a no-op while one is already open.
    fn begin_suspension(&mut self);

    /// Closes the current window, resuming the runtime in the parent or the
    /// child; a no-op while no window is open.
    fn resolve_suspension(&mut self);

    /// Suspends the runtime until [`resume`](Coordinator::resume), surviving
    /// any forks in between. With `resume_in_child` set, a forked child still
    /// auto-resumes; otherwise children inherit the suspension.
    fn force_suspend(&mut self, resume_in_child: bool);

    /// Lifts a forced suspension and resumes the runtime.
    fn resume(&mut self);

    fn is_suspended(&self) -> bool;
}
