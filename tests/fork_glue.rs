// tests/fork_glue.rs
#![cfg(unix)]

use std::sync::{Arc, Mutex};

use forksafe::{ForkResult, ForkSafety, NetRuntime};
use nix::sys::wait::{WaitStatus, waitpid};

#[derive(Clone, Default)]
struct RecordingRuntime {
    events: Arc<Mutex<Vec<&'static str>>>,
}

impl RecordingRuntime {
    fn events(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().clone()
    }
}

impl NetRuntime for RecordingRuntime {
    fn prefork(&self) {
        self.events.lock().unwrap().push("prefork");
    }

    fn postfork_parent(&self) {
        self.events.lock().unwrap().push("postfork_parent");
    }

    fn postfork_child(&self) {
        self.events.lock().unwrap().push("postfork_child");
    }
}

/// The child reports its assertions through the exit status; panicking in a
/// forked copy of the test harness would unwind into harness state that is
/// not ours to run.
fn exit_child(ok: bool) -> ! {
    unsafe { libc::_exit(if ok { 0 } else { 1 }) }
}

fn assert_child_succeeded(child: nix::unistd::Pid) {
    match waitpid(child, None).expect("waitpid") {
        WaitStatus::Exited(_, code) => assert_eq!(code, 0, "child-side assertions failed"),
        status => panic!("unexpected child status: {status:?}"),
    }
}

#[cfg(target_os = "linux")]
#[test]
fn fork_resumes_parent_and_child() {
    let runtime = RecordingRuntime::default();
    let mut guard = ForkSafety::new(runtime.clone());

    let resumed = Arc::new(Mutex::new(Vec::new()));
    let seen = resumed.clone();
    guard.on_after_resume(move |is_child| {
        seen.lock().unwrap().push(is_child);
    });

    match guard.fork().expect("fork") {
        ForkResult::Child => {
            let ok = runtime.events() == ["prefork", "postfork_child"]
                && *resumed.lock().unwrap() == [true]
                && !guard.is_suspended();
            exit_child(ok);
        }
        ForkResult::Parent { child } => {
            assert_eq!(runtime.events(), ["prefork", "postfork_parent"]);
            assert_eq!(*resumed.lock().unwrap(), [false]);
            assert!(!guard.is_suspended());
            assert_child_succeeded(child);
        }
    }
}

#[cfg(target_os = "linux")]
#[test]
fn forced_suspension_survives_real_fork() {
    let runtime = RecordingRuntime::default();
    let mut guard = ForkSafety::new(runtime.clone());

    guard.force_suspend(false);
    assert_eq!(runtime.events(), ["prefork"]);

    match guard.fork().expect("fork") {
        ForkResult::Child => {
            // the child inherits the suspension and resumes explicitly
            let inherited = guard.is_suspended() && runtime.events() == ["prefork"];
            guard.resume();
            let ok = inherited
                && runtime.events() == ["prefork", "postfork_child"]
                && !guard.is_suspended();
            exit_child(ok);
        }
        ForkResult::Parent { child } => {
            assert!(guard.is_suspended());
            assert_eq!(runtime.events(), ["prefork"]);

            guard.resume();
            assert_eq!(runtime.events(), ["prefork", "postfork_parent"]);
            assert!(!guard.is_suspended());
            assert_child_succeeded(child);
        }
    }
}

#[cfg(not(target_os = "linux"))]
#[test]
fn fork_is_inert_without_platform_support() {
    let runtime = RecordingRuntime::default();
    let mut guard = ForkSafety::new(runtime.clone());

    match guard.fork().expect("fork") {
        ForkResult::Child => exit_child(runtime.events().is_empty()),
        ForkResult::Parent { child } => {
            assert!(runtime.events().is_empty());
            assert!(!guard.is_suspended());
            assert_child_succeeded(child);
        }
    }
}
