use crate::{AfterResumeHook, BeforeSuspendHook, Coordinator};

/// Stand-in coordinator for platforms without fork-interruption support.
///
/// Registration still stores hooks so callers keep a uniform API, but
/// suspension and resolution never touch a runtime and never fire them;
/// `force_suspend`/`resume` only track the requested state.
#[derive(Default)]
pub struct NoopCoordinator {
    keep_disabled: bool,
    before_suspend: Vec<BeforeSuspendHook>,
    after_resume: Vec<AfterResumeHook>,
}

impl NoopCoordinator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Coordinator for NoopCoordinator {
    fn register_before_suspend(&mut self, hook: BeforeSuspendHook) {
        self.before_suspend.push(hook);
    }

    fn register_after_resume(&mut self, hook: AfterResumeHook) {
        self.after_resume.push(hook);
    }

    fn begin_suspension(&mut self) {}

    fn resolve_suspension(&mut self) {}

    fn force_suspend(&mut self, resume_in_child: bool) {
        let _ = resume_in_child;
        self.keep_disabled = true;
    }

    fn resume(&mut self) {
        self.keep_disabled = false;
    }

    fn is_suspended(&self) -> bool {
        self.keep_disabled
    }
}
