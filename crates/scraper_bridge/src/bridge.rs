use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use crate::submit::{ReqwestSubmitter, SubmitSettings, Submitter};
use crate::{BridgeEvent, JobRequest, RequestId};

enum BridgeCommand {
    Submit {
        request_id: RequestId,
        request: JobRequest,
    },
}

/// Submit-only half of the bridge; cheap to clone into every window.
#[derive(Clone)]
pub struct BridgeSender {
    cmd_tx: mpsc::Sender<BridgeCommand>,
}

impl BridgeSender {
    pub fn submit(&self, request_id: RequestId, request: JobRequest) {
        let _ = self.cmd_tx.send(BridgeCommand::Submit {
            request_id,
            request,
        });
    }
}

pub struct BridgeHandle {
    cmd_tx: mpsc::Sender<BridgeCommand>,
    event_rx: mpsc::Receiver<BridgeEvent>,
}

impl BridgeHandle {
    pub fn new(settings: SubmitSettings) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let submitter = Arc::new(ReqwestSubmitter::new(settings));

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let submitter = submitter.clone();
                let event_tx = event_tx.clone();
                // Submissions from different windows proceed independently.
                runtime.spawn(async move {
                    handle_command(submitter.as_ref(), command, event_tx).await;
                });
            }
        });

        Self { cmd_tx, event_rx }
    }

    pub fn sender(&self) -> BridgeSender {
        BridgeSender {
            cmd_tx: self.cmd_tx.clone(),
        }
    }

    pub fn submit(&self, request_id: RequestId, request: JobRequest) {
        let _ = self.cmd_tx.send(BridgeCommand::Submit {
            request_id,
            request,
        });
    }

    /// Blocks until the next completion event; `None` once the bridge thread
    /// is gone.
    pub fn recv(&self) -> Option<BridgeEvent> {
        self.event_rx.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<BridgeEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    submitter: &dyn Submitter,
    command: BridgeCommand,
    event_tx: mpsc::Sender<BridgeEvent>,
) {
    match command {
        BridgeCommand::Submit {
            request_id,
            request,
        } => {
            // The submitter never fails past its boundary, so every command
            // sends exactly one completion event.
            let outcome = submitter.submit(&request).await;
            let _ = event_tx.send(BridgeEvent::JobCompleted {
                request_id,
                outcome,
            });
        }
    }
}
