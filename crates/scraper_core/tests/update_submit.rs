use std::path::PathBuf;
use std::sync::Once;

use scraper_core::{update, AppState, Effect, JobSpec, Msg, Phase, DEFAULT_MAX_PAGES};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(bridge_logging::initialize_for_tests);
}

fn fill_form(state: AppState, site: &str, keywords: &str) -> AppState {
    let (state, _) = update(state, Msg::SiteSelected(site.to_string()));
    let (state, _) = update(state, Msg::KeywordsChanged(keywords.to_string()));
    state
}

#[test]
fn confirmed_submission_dispatches_one_job() {
    init_logging();
    let state = fill_form(AppState::new(), "vk", "concert tickets");

    let (mut next, effects) = update(
        state,
        Msg::SubmitConfirmed {
            output_path: PathBuf::from("/tmp/out.xlsx"),
        },
    );

    assert_eq!(next.phase(), Phase::Submitting);
    assert_eq!(
        effects,
        vec![Effect::DispatchJob(JobSpec {
            site: "vk".to_string(),
            keywords: "concert tickets".to_string(),
            max_pages: DEFAULT_MAX_PAGES,
            output_path: PathBuf::from("/tmp/out.xlsx"),
        })]
    );

    let view = next.view();
    assert!(!view.submit_enabled);
    assert!(view.progress_visible);
    assert!(!view.success_visible);
    assert!(!view.failure_visible);
    assert!(next.consume_dirty());
}

#[test]
fn submission_without_site_is_rejected_client_side() {
    init_logging();
    let state = AppState::new();
    let (state, _) = update(state, Msg::KeywordsChanged("concert tickets".to_string()));

    let (mut next, effects) = update(
        state,
        Msg::SubmitConfirmed {
            output_path: PathBuf::from("/tmp/out.xlsx"),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(next.phase(), Phase::Idle);
    assert!(next.view().submit_enabled);
    // Keyword edit marked the state dirty, the rejected submit did not.
    assert!(next.consume_dirty());
    let (mut again, effects) = update(
        next,
        Msg::SubmitConfirmed {
            output_path: PathBuf::from("/tmp/out.xlsx"),
        },
    );
    assert!(effects.is_empty());
    assert!(!again.consume_dirty());
}

#[test]
fn submit_while_submitting_is_dropped() {
    init_logging();
    let state = fill_form(AppState::new(), "bhf", "rust jobs");
    let (state, _) = update(
        state,
        Msg::SubmitConfirmed {
            output_path: PathBuf::from("/tmp/a.xlsx"),
        },
    );
    assert_eq!(state.phase(), Phase::Submitting);

    let (state, effects) = update(
        state,
        Msg::SubmitConfirmed {
            output_path: PathBuf::from("/tmp/b.xlsx"),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.phase(), Phase::Submitting);
}

#[test]
fn max_pages_accepts_positive_values_only() {
    init_logging();
    let state = fill_form(AppState::new(), "vk", "tickets");
    let (state, _) = update(state, Msg::MaxPagesChanged(3));
    assert_eq!(state.view().max_pages, 3);

    let (state, _) = update(state, Msg::MaxPagesChanged(0));
    assert_eq!(state.view().max_pages, 3);

    let (state, effects) = update(
        state,
        Msg::SubmitConfirmed {
            output_path: PathBuf::from("/tmp/out.xlsx"),
        },
    );
    match &effects[..] {
        [Effect::DispatchJob(job)] => assert_eq!(job.max_pages, 3),
        other => panic!("expected a single dispatch, got {other:?}"),
    }
}
