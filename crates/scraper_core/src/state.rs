use crate::view_model::FormViewModel;

/// Default value of the page-limit field, restored whenever the form resets.
pub const DEFAULT_MAX_PAGES: u32 = 100;

/// Lifecycle of the job form. One instance per window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// What the form needs to know about a finished job. Status codes and
/// payloads stay with the effect runner, which logs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobVerdict {
    Success,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    site: Option<String>,
    keywords: String,
    max_pages: u32,
    phase: Phase,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            site: None,
            keywords: String::new(),
            max_pages: DEFAULT_MAX_PAGES,
            phase: Phase::Idle,
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> FormViewModel {
        FormViewModel {
            phase: self.phase,
            site: self.site.clone(),
            keywords: self.keywords.clone(),
            max_pages: self.max_pages,
            submit_enabled: self.phase != Phase::Submitting,
            progress_visible: self.phase == Phase::Submitting,
            success_visible: self.phase == Phase::Succeeded,
            failure_visible: self.phase == Phase::Failed,
            dirty: self.dirty,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn site(&self) -> Option<&str> {
        self.site.as_deref()
    }

    pub fn keywords(&self) -> &str {
        &self.keywords
    }

    pub fn max_pages(&self) -> u32 {
        self.max_pages
    }

    /// Returns whether a render is pending and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_site(&mut self, site: String) {
        self.site = Some(site);
        self.dirty = true;
    }

    pub(crate) fn set_keywords(&mut self, keywords: String) {
        self.keywords = keywords;
        self.dirty = true;
    }

    pub(crate) fn set_max_pages(&mut self, pages: u32) {
        // Page limit is a positive integer; zero never leaves the form.
        if pages == 0 {
            return;
        }
        self.max_pages = pages;
        self.dirty = true;
    }

    pub(crate) fn begin_submission(&mut self) {
        self.phase = Phase::Submitting;
        self.dirty = true;
    }

    /// Success clears the form back to its defaults for the next job.
    pub(crate) fn finish_success(&mut self) {
        self.phase = Phase::Succeeded;
        self.site = None;
        self.keywords.clear();
        self.max_pages = DEFAULT_MAX_PAGES;
        self.dirty = true;
    }

    /// Failure keeps the entered values so the user can resubmit as-is.
    pub(crate) fn finish_failure(&mut self) {
        self.phase = Phase::Failed;
        self.dirty = true;
    }
}
