use nix::unistd::{Pid, getpid};

/// Source of the current process identity.
///
/// Injectable so the parent/child decision can be exercised without forking.
pub trait PidSource {
    fn pid(&self) -> Pid;
}

/// Reads the real process id.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemPid;

impl PidSource for SystemPid {
    fn pid(&self) -> Pid {
        getpid()
    }
}
