use std::sync::mpsc;
use std::time::{Duration, Instant};

use scraper_bridge::SubmitSettings;
use scraper_core::{update, AppState, FormViewModel, JobVerdict, Msg, Phase};

use crate::effects::EffectRunner;

/// Message pump for one window: owns the form state, applies messages
/// through the pure update function, and routes effects to the runner.
pub struct Shell {
    state: AppState,
    msg_tx: mpsc::Sender<Msg>,
    msg_rx: mpsc::Receiver<Msg>,
    effects: EffectRunner,
}

impl Shell {
    pub fn new(settings: SubmitSettings) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();
        let effects = EffectRunner::new(msg_tx.clone(), settings);
        Self {
            state: AppState::new(),
            msg_tx,
            msg_rx,
            effects,
        }
    }

    /// Sender half for external event sources (UI callbacks, timers).
    pub fn msg_sender(&self) -> mpsc::Sender<Msg> {
        self.msg_tx.clone()
    }

    /// Applies one message and runs whatever effects it produced.
    pub fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.effects.run(effects);
    }

    /// Pumps queued messages until the in-flight job completes or `timeout`
    /// passes. Returns the verdict if one arrived.
    pub fn pump_until_outcome(&mut self, timeout: Duration) -> Option<JobVerdict> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.checked_duration_since(Instant::now())?;
            let msg = match self.msg_rx.recv_timeout(remaining) {
                Ok(msg) => msg,
                Err(_) => return None,
            };
            let verdict = match &msg {
                Msg::JobDone { verdict } => Some(*verdict),
                _ => None,
            };
            self.dispatch(msg);
            if verdict.is_some() {
                return verdict;
            }
        }
    }

    pub fn view(&self) -> FormViewModel {
        self.state.view()
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }
}
