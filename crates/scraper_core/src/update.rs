use crate::{AppState, Effect, JobSpec, JobVerdict, Msg, Phase};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::SiteSelected(site) => {
            state.set_site(site);
            Vec::new()
        }
        Msg::KeywordsChanged(text) => {
            state.set_keywords(text);
            Vec::new()
        }
        Msg::MaxPagesChanged(pages) => {
            state.set_max_pages(pages);
            Vec::new()
        }
        Msg::SubmitConfirmed { output_path } => {
            // Invariant: at most one request in flight per window. The submit
            // control is disabled while Submitting; a stray confirm is dropped.
            if state.phase() == Phase::Submitting {
                return (state, Vec::new());
            }
            let Some(site) = state.site().map(ToOwned::to_owned) else {
                // Client-side validation: without a site nothing leaves the form.
                return (state, Vec::new());
            };
            let job = JobSpec {
                site,
                keywords: state.keywords().to_owned(),
                max_pages: state.max_pages(),
                output_path,
            };
            state.begin_submission();
            vec![Effect::DispatchJob(job)]
        }
        Msg::JobDone { verdict } => {
            // Outcomes are only meaningful for the request this window has
            // outstanding.
            if state.phase() != Phase::Submitting {
                return (state, Vec::new());
            }
            match verdict {
                JobVerdict::Success => state.finish_success(),
                JobVerdict::Failed => state.finish_failure(),
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
