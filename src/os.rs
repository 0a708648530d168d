// src/os.rs
#![allow(unsafe_code)]

use lifecycle::Coordinator;
use nix::unistd::{ForkResult, fork};

/// Fork with `coordinator`'s suspension window wrapped around the syscall.
///
/// # Safety
/// This wrapper is safe because the runtime's background threads are
/// suspended before the raw `fork(2)` and nothing runs between the syscall
/// and `resolve_suspension`. In a parent with other live threads the child
/// must still restrict itself to async-signal-safe operations until it has
/// resumed its runtimes or exec'd.
pub(crate) fn guarded_fork(coordinator: &mut dyn Coordinator) -> nix::Result<ForkResult> {
    coordinator.begin_suspension();
    // SAFETY: see the `Safety` section above; the suspension window is
    // already open when the syscall runs.
    let result = unsafe { fork() };
    // On failure only the parent continues; resolving there reopens the
    // runtime instead of stranding it suspended.
    coordinator.resolve_suspension();
    result
}
