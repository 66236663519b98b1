use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use crate::{JobOutcome, JobRequest};

/// Host/port the locally launched backend listens on.
pub const DEFAULT_BACKEND_ADDR: &str = "127.0.0.1:5000";

/// Where and how the bridge talks to the backend.
#[derive(Debug, Clone)]
pub struct SubmitSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    /// No overall deadline by default: a scraping job may legitimately run
    /// for minutes. A hung backend keeps the window in progress.
    pub request_timeout: Option<Duration>,
}

impl Default for SubmitSettings {
    fn default() -> Self {
        Self {
            base_url: format!("http://{DEFAULT_BACKEND_ADDR}"),
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
        }
    }
}

/// Wire body of a job submission, as the backend's request parser expects it.
#[derive(Debug, Serialize)]
struct JobBody<'a> {
    filename: &'a str,
    keywords: &'a str,
    one_search_page_only: bool,
}

#[async_trait::async_trait]
pub trait Submitter: Send + Sync {
    async fn submit(&self, request: &JobRequest) -> JobOutcome;
}

#[derive(Debug, Clone)]
pub struct ReqwestSubmitter {
    settings: SubmitSettings,
}

impl ReqwestSubmitter {
    pub fn new(settings: SubmitSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, reqwest::Error> {
        let mut builder = reqwest::Client::builder().connect_timeout(self.settings.connect_timeout);
        if let Some(timeout) = self.settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }

    fn endpoint(&self, site: &str) -> String {
        format!(
            "{}/messages/{site}",
            self.settings.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait::async_trait]
impl Submitter for ReqwestSubmitter {
    /// Issues exactly one POST per call and always comes back with an
    /// outcome; errors on every code path fold into `JobOutcome::Failure`.
    async fn submit(&self, request: &JobRequest) -> JobOutcome {
        let client = match self.build_client() {
            Ok(client) => client,
            Err(err) => return failure_from_error(&err),
        };

        let filename = request.output_path.to_string_lossy();
        let body = JobBody {
            filename: filename.as_ref(),
            keywords: &request.keywords,
            one_search_page_only: request.max_pages == Some(1),
        };

        let response = match client
            .post(self.endpoint(&request.site))
            .json(&body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => return failure_from_error(&err),
        };

        let status = response.status();
        let payload = response.json::<Value>().await.ok();
        if status == reqwest::StatusCode::CREATED {
            JobOutcome::Success {
                status: status.as_u16(),
                payload,
            }
        } else {
            JobOutcome::Failure {
                status: Some(status.as_u16()),
                payload,
                detail: None,
            }
        }
    }
}

fn failure_from_error(err: &reqwest::Error) -> JobOutcome {
    JobOutcome::Failure {
        status: err.status().map(|status| status.as_u16()),
        payload: None,
        detail: Some(describe_error(err)),
    }
}

fn describe_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        format!("timeout: {err}")
    } else if err.is_connect() {
        format!("connection failed: {err}")
    } else {
        err.to_string()
    }
}
