//! Scraper core: pure job-form state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, JobSpec};
pub use msg::Msg;
pub use state::{AppState, JobVerdict, Phase, DEFAULT_MAX_PAGES};
pub use update::update;
pub use view_model::FormViewModel;
