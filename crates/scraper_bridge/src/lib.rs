//! Scraper bridge: backend process lifecycle and HTTP request dispatch.
mod bridge;
mod locate;
mod submit;
mod supervise;
mod types;

pub use bridge::{BridgeHandle, BridgeSender};
pub use locate::{
    deployment_mode, resolve, target_for, BackendTarget, DeploymentMode, LaunchMode, LocateError,
    BACKEND_DIR, BACKEND_MODULE, DIST_DIR,
};
pub use submit::{ReqwestSubmitter, SubmitSettings, Submitter, DEFAULT_BACKEND_ADDR};
pub use supervise::{start, wait_ready, BackendHandle, SpawnError, INTERPRETER};
pub use types::{BridgeEvent, JobOutcome, JobRequest, RequestId};
