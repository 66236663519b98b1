use std::path::{Path, PathBuf};

use thiserror::Error;

/// Name of the packaged-distribution directory checked at startup.
pub const DIST_DIR: &str = "appdist";
/// Directory holding the backend source tree in a development checkout.
pub const BACKEND_DIR: &str = "backend";
/// Module name of the backend entry point.
pub const BACKEND_MODULE: &str = "app";

/// How the backend ships. Decided once per process from filesystem state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeploymentMode {
    Development,
    Packaged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchMode {
    /// Run the source entry point through an interpreter on PATH.
    Interpret,
    /// Run the packaged binary directly.
    Execute,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendTarget {
    pub executable: PathBuf,
    pub launch: LaunchMode,
}

#[derive(Debug, Error)]
pub enum LocateError {
    #[error("backend source entry point not found at {0:?}")]
    SourceMissing(PathBuf),
    #[error("packaged backend executable not found at {0:?}")]
    ExecutableMissing(PathBuf),
}

/// Packaged deployments are detected by the presence of the distribution
/// directory next to the application root.
pub fn deployment_mode(app_root: &Path) -> DeploymentMode {
    if app_root.join(DIST_DIR).exists() {
        DeploymentMode::Packaged
    } else {
        DeploymentMode::Development
    }
}

/// Pure path construction; all platform-suffix handling lives here.
pub fn target_for(app_root: &Path, mode: DeploymentMode, windows: bool) -> BackendTarget {
    match mode {
        DeploymentMode::Development => BackendTarget {
            executable: app_root
                .join(BACKEND_DIR)
                .join(format!("{BACKEND_MODULE}.py")),
            launch: LaunchMode::Interpret,
        },
        DeploymentMode::Packaged => {
            let name = if windows {
                format!("{BACKEND_MODULE}.exe")
            } else {
                BACKEND_MODULE.to_string()
            };
            BackendTarget {
                executable: app_root.join(DIST_DIR).join(BACKEND_MODULE).join(name),
                launch: LaunchMode::Execute,
            }
        }
    }
}

/// Resolve the backend for this host. Fails when the expected entry point is
/// not on disk; the application cannot start without a backend.
pub fn resolve(app_root: &Path) -> Result<BackendTarget, LocateError> {
    let mode = deployment_mode(app_root);
    let target = target_for(app_root, mode, cfg!(windows));
    if !target.executable.exists() {
        return Err(match mode {
            DeploymentMode::Development => LocateError::SourceMissing(target.executable),
            DeploymentMode::Packaged => LocateError::ExecutableMissing(target.executable),
        });
    }
    Ok(target)
}
