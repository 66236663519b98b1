use std::io;
use std::net::TcpStream;
use std::process::{Child, Command, Stdio};
use std::sync::{Mutex, PoisonError};
use std::thread;
use std::time::Duration;

use bridge_logging::{bridge_info, bridge_warn};
use thiserror::Error;

use crate::locate::{BackendTarget, LaunchMode};

/// Interpreter used for `LaunchMode::Interpret`; resolved from PATH.
pub const INTERPRETER: &str = "python";

#[derive(Debug, Error)]
pub enum SpawnError {
    #[error("failed to launch backend via {command}: {source}")]
    Launch {
        command: String,
        #[source]
        source: io::Error,
    },
}

/// Owns the one backend process for the application lifetime. The process is
/// killed exactly once; `stop` is an idempotent no-op afterwards.
#[derive(Debug)]
pub struct BackendHandle {
    child: Mutex<Option<Child>>,
}

/// Launch the backend described by `target`. Must be called once, before any
/// job is accepted; a launch failure is fatal to startup.
pub fn start(target: &BackendTarget) -> Result<BackendHandle, SpawnError> {
    let mut command = match target.launch {
        LaunchMode::Execute => Command::new(&target.executable),
        LaunchMode::Interpret => {
            let mut command = Command::new(INTERPRETER);
            command.arg(&target.executable);
            command
        }
    };
    command.stdin(Stdio::null());

    let child = command.spawn().map_err(|source| SpawnError::Launch {
        command: format!("{command:?}"),
        source,
    })?;
    bridge_info!("backend started, pid={}", child.id());

    Ok(BackendHandle {
        child: Mutex::new(Some(child)),
    })
}

impl BackendHandle {
    /// Whether the backend process is still running.
    pub fn is_alive(&self) -> bool {
        let mut guard = self.child.lock().unwrap_or_else(PoisonError::into_inner);
        match guard.as_mut() {
            Some(child) => matches!(child.try_wait(), Ok(None)),
            None => false,
        }
    }

    /// Best-effort termination. Safe to call any number of times; errors are
    /// logged, never propagated.
    pub fn stop(&self) {
        let child = self
            .child
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        let Some(mut child) = child else {
            return;
        };
        let pid = child.id();
        if let Err(err) = child.kill() {
            // The process already exited on its own.
            bridge_warn!("backend kill pid={pid}: {err}");
        }
        // Reap promptly; after a kill this does not block for long.
        let _ = child.wait();
        bridge_info!("backend stopped, pid={pid}");
    }
}

impl Drop for BackendHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Bounded readiness probe: attempt a TCP connection to the backend until it
/// accepts or the attempts run out. Failure is a warning, not fatal; jobs
/// submitted too early surface their own failures.
pub fn wait_ready(addr: &str, max_attempts: u32, interval: Duration) -> bool {
    for attempt in 0..max_attempts {
        if TcpStream::connect(addr).is_ok() {
            bridge_info!("backend ready at {addr} after {} attempt(s)", attempt + 1);
            return true;
        }
        thread::sleep(interval);
    }
    bridge_warn!("backend at {addr} not accepting connections after {max_attempts} attempts");
    false
}
