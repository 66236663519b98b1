use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked a site radio button.
    SiteSelected(String),
    /// User edited the keyword text area (debounced text).
    KeywordsChanged(String),
    /// User edited the page-limit field.
    MaxPagesChanged(u32),
    /// User confirmed the save dialog with a destination path. A cancelled
    /// dialog sends nothing at all.
    SubmitConfirmed { output_path: PathBuf },
    /// Bridge completion for the in-flight job.
    JobDone { verdict: crate::JobVerdict },
    /// Fallback for placeholder wiring.
    NoOp,
}
