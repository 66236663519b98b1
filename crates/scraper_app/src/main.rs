use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context};
use bridge_logging::{bridge_info, bridge_warn};
use clap::Parser;
use scraper_app::logging::{self, LogDestination};
use scraper_app::shell::Shell;
use scraper_bridge::{SubmitSettings, DEFAULT_BACKEND_ADDR};
use scraper_core::{JobVerdict, Msg};

/// Headless driver for the scraper shell: starts the local backend, submits
/// one job through the form state machine, and reports the outcome.
#[derive(Debug, Parser)]
#[command(name = "scraper_app", version, about)]
struct Args {
    /// Site adapter understood by the backend (e.g. "vk").
    #[arg(long)]
    site: String,
    /// Search keywords forwarded verbatim to the backend.
    #[arg(long, default_value = "")]
    keywords: String,
    /// Page limit for the search; 1 restricts the backend to a single page.
    #[arg(long)]
    max_pages: Option<u32>,
    /// Destination file for the exported results.
    #[arg(long)]
    output: PathBuf,
    /// Application root containing either `backend/` or `appdist/`.
    #[arg(long, default_value = ".")]
    backend_root: PathBuf,
    /// Log destination: terminal, file or both.
    #[arg(long, default_value = "terminal")]
    log: String,
    /// How long to wait for the job before giving up, in seconds.
    #[arg(long, default_value_t = 600)]
    wait_secs: u64,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::initialize(match args.log.as_str() {
        "file" => LogDestination::File,
        "both" => LogDestination::Both,
        _ => LogDestination::Terminal,
    });

    // Startup sequence: locate, launch, probe. Locate and launch failures are
    // fatal; nothing can succeed without a live backend.
    let target =
        scraper_bridge::resolve(&args.backend_root).context("no usable backend found")?;
    bridge_info!(
        "backend target {:?} ({:?})",
        target.executable,
        target.launch
    );
    let backend = scraper_bridge::start(&target).context("backend failed to launch")?;

    if !scraper_bridge::wait_ready(DEFAULT_BACKEND_ADDR, 20, Duration::from_millis(500)) {
        bridge_warn!("backend not answering yet; the first job may fail");
    }

    let mut shell = Shell::new(SubmitSettings::default());
    shell.dispatch(Msg::SiteSelected(args.site));
    shell.dispatch(Msg::KeywordsChanged(args.keywords));
    if let Some(pages) = args.max_pages {
        shell.dispatch(Msg::MaxPagesChanged(pages));
    }
    shell.dispatch(Msg::SubmitConfirmed {
        output_path: args.output,
    });

    let verdict = shell.pump_until_outcome(Duration::from_secs(args.wait_secs));
    backend.stop();

    match verdict {
        Some(JobVerdict::Success) => {
            println!("done: results written");
            Ok(())
        }
        Some(JobVerdict::Failed) => bail!("job failed, see log for details"),
        None => bail!("no response from backend within {} seconds", args.wait_secs),
    }
}
