//! Hard process termination for the `/crash` endpoint
//!
//! A crash is not a shutdown: no signal handlers, no graceful drain,
//! no destructors, no atexit hooks. The process just stops.

/// Exit code reported to the supervisor after a simulated crash
pub const CRASH_EXIT_CODE: i32 = 1;

/// Terminates the current process
///
/// Production code uses `ProcessAbort`. Tests use `RecordingTerminator`
/// so the handler can be exercised without killing the test binary.
pub trait Terminator: Send + Sync {
    fn terminate(&self, exit_code: i32);
}

/// Immediate exit that bypasses all cleanup
pub struct ProcessAbort;

impl Terminator for ProcessAbort {
    fn terminate(&self, exit_code: i32) {
        // SAFETY: _exit(2) takes no pointers and never returns.
        #[cfg(unix)]
        unsafe {
            libc::_exit(exit_code);
        }

        #[cfg(not(unix))]
        std::process::exit(exit_code);
    }
}

/// Test terminator that records exit codes instead of exiting
#[cfg(test)]
#[derive(Default)]
pub struct RecordingTerminator {
    codes: std::sync::Mutex<Vec<i32>>,
}

#[cfg(test)]
impl RecordingTerminator {
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(clippy::unwrap_used)]
    pub fn exit_codes(&self) -> Vec<i32> {
        self.codes.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl Terminator for RecordingTerminator {
    fn terminate(&self, exit_code: i32) {
        #[allow(clippy::unwrap_used)]
        self.codes.lock().unwrap().push(exit_code);
    }
}
