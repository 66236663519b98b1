use std::path::PathBuf;

use serde_json::Value;

pub type RequestId = u64;

/// Parameters of one scraping job, immutable once submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRequest {
    pub site: String,
    pub keywords: String,
    pub max_pages: Option<u32>,
    pub output_path: PathBuf,
}

/// Exactly one of these is produced for every submitted request.
#[derive(Debug, Clone, PartialEq)]
pub enum JobOutcome {
    Success {
        status: u16,
        payload: Option<Value>,
    },
    Failure {
        status: Option<u16>,
        payload: Option<Value>,
        detail: Option<String>,
    },
}

impl JobOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, JobOutcome::Success { .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            JobOutcome::Success { status, .. } => Some(*status),
            JobOutcome::Failure { status, .. } => *status,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BridgeEvent {
    JobCompleted {
        request_id: RequestId,
        outcome: JobOutcome,
    },
}
