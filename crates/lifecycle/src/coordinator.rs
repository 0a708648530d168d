// crates/lifecycle/src/coordinator.rs

use nix::unistd::Pid;
use runtime::NetRuntime;

use crate::pid::{PidSource, SystemPid};
use crate::{AfterResumeHook, BeforeSuspendHook, Coordinator};

/// Coordinates suspension of the networking runtime around a process fork.
///
/// One instance per process, alive for the process lifetime. `suspended_by`
/// records which process opened the window; after a fork only the parent's
/// pid still matches it, which is the entire parent/child decision.
pub struct ForkCoordinator<R: NetRuntime, P: PidSource = SystemPid> {
    runtime: R,
    pids: P,
    suspended_by: Option<Pid>,
    keep_disabled: bool,
    resume_in_child: bool,
    before_suspend: Vec<BeforeSuspendHook>,
    after_resume: Vec<AfterResumeHook>,
}

impl<R: NetRuntime> ForkCoordinator<R> {
    pub fn new(runtime: R) -> Self {
        Self::with_pid_source(runtime, SystemPid)
    }
}

impl<R: NetRuntime, P: PidSource> ForkCoordinator<R, P> {
    /// Builds a coordinator reading process identity from `pids` instead of
    /// the real `getpid`.
    pub fn with_pid_source(runtime: R, pids: P) -> Self {
        Self {
            runtime,
            pids,
            suspended_by: None,
            keep_disabled: false,
            resume_in_child: true,
            before_suspend: Vec::new(),
            after_resume: Vec::new(),
        }
    }

    /// Whether the runtime is to stay down past the current window.
    pub fn keep_disabled(&self) -> bool {
        self.keep_disabled
    }
}

impl<R: NetRuntime, P: PidSource> Coordinator for ForkCoordinator<R, P> {
    fn register_before_suspend(&mut self, hook: BeforeSuspendHook) {
        self.before_suspend.push(hook);
    }

    fn register_after_resume(&mut self, hook: AfterResumeHook) {
        self.after_resume.push(hook);
    }

    fn begin_suspension(&mut self) {
        if self.suspended_by.is_some() {
            return;
        }

        for hook in &mut self.before_suspend {
            hook();
        }

        tracing::debug!("suspending networking runtime ahead of fork");
        self.runtime.prefork();
        self.suspended_by = Some(self.pids.pid());
    }

    fn resolve_suspension(&mut self) {
        let Some(owner) = self.suspended_by else {
            return;
        };

        if owner == self.pids.pid() {
            // Parent: the window stays open while keep_disabled is set.
            if self.keep_disabled {
                return;
            }
            self.runtime.postfork_parent();
            self.suspended_by = None;
            tracing::debug!("networking runtime resumed in parent");
            for hook in &mut self.after_resume {
                hook(false);
            }
        } else if self.resume_in_child {
            self.keep_disabled = false;
            self.suspended_by = None;
            self.runtime.postfork_child();
            tracing::debug!("networking runtime resumed in child");
            for hook in &mut self.after_resume {
                hook(true);
            }
        } else {
            // Child inherits the suspension and must resume() explicitly.
            self.keep_disabled = true;
            tracing::debug!("networking runtime kept suspended in child");
        }
    }

    fn force_suspend(&mut self, resume_in_child: bool) {
        self.keep_disabled = true;
        self.resume_in_child = resume_in_child;
        self.begin_suspension();
    }

    fn resume(&mut self) {
        self.keep_disabled = false;
        self.resume_in_child = true;
        self.resolve_suspension();
    }

    fn is_suspended(&self) -> bool {
        self.suspended_by.is_some()
    }
}
