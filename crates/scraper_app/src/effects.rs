use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc;
use std::thread;

use bridge_logging::{bridge_info, bridge_warn};
use scraper_bridge::{BridgeEvent, BridgeHandle, BridgeSender, JobOutcome, JobRequest, SubmitSettings};
use scraper_core::{Effect, JobVerdict, Msg};

/// Routes core effects to the bridge and bridge completions back into the
/// message loop.
pub struct EffectRunner {
    bridge: BridgeSender,
    next_request_id: AtomicU64,
}

impl EffectRunner {
    pub fn new(msg_tx: mpsc::Sender<Msg>, settings: SubmitSettings) -> Self {
        let handle = BridgeHandle::new(settings);
        let bridge = handle.sender();
        spawn_event_loop(handle, msg_tx);
        Self {
            bridge,
            next_request_id: AtomicU64::new(1),
        }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::DispatchJob(job) => {
                    let request_id = self.next_request_id.fetch_add(1, Ordering::Relaxed);
                    bridge_info!(
                        "DispatchJob request_id={} site={} max_pages={} output={:?}",
                        request_id,
                        job.site,
                        job.max_pages,
                        job.output_path
                    );
                    self.bridge.submit(
                        request_id,
                        JobRequest {
                            site: job.site,
                            keywords: job.keywords,
                            max_pages: Some(job.max_pages),
                            output_path: job.output_path,
                        },
                    );
                }
            }
        }
    }
}

fn spawn_event_loop(handle: BridgeHandle, msg_tx: mpsc::Sender<Msg>) {
    thread::spawn(move || {
        while let Some(event) = handle.recv() {
            let BridgeEvent::JobCompleted {
                request_id,
                outcome,
            } = event;
            let verdict = match &outcome {
                JobOutcome::Success { status, .. } => {
                    bridge_info!("request {request_id} succeeded, status={status}");
                    JobVerdict::Success
                }
                JobOutcome::Failure {
                    status,
                    payload,
                    detail,
                } => {
                    // Diagnostics go to the log; the form only shows a
                    // generic failure indicator.
                    bridge_warn!(
                        "request {request_id} failed: status={status:?} payload={payload:?} detail={detail:?}"
                    );
                    JobVerdict::Failed
                }
            };
            if msg_tx.send(Msg::JobDone { verdict }).is_err() {
                break;
            }
        }
    });
}
