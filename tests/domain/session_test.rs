use chrono::Utc;

use newssense::domain::{
    AnalysisResult, AnalysisSession, Document, EntitySet, FacetOutcome, FakeNewsVerdict,
    NewsLabel, PipelineState, Sentiment, SessionError, SourceLanguage, SourceModality,
};

fn document() -> Document {
    Document::new(
        "Markets rose on Tuesday.".to_string(),
        SourceModality::Text,
        SourceLanguage::English,
    )
}

fn result_for(document: &Document) -> AnalysisResult {
    AnalysisResult {
        document_id: document.id,
        category: FacetOutcome::Available("business".to_string()),
        summary: FacetOutcome::Available("Markets rose.".to_string()),
        topics: FacetOutcome::Available(Vec::new()),
        entities: FacetOutcome::Available(EntitySet::new()),
        sentiment: FacetOutcome::Available(Sentiment::Positive),
        fake_news: FacetOutcome::Available(FakeNewsVerdict::new(NewsLabel::Real, 0.8).unwrap()),
        completed_at: Utc::now(),
    }
}

fn aggregated_session() -> AnalysisSession {
    let mut session = AnalysisSession::new();
    let doc = document();
    session.begin_pass().unwrap();
    session.set_document(doc.clone());
    session.enter(PipelineState::Analyzing);
    session.complete_pass(result_for(&doc)).unwrap();
    session
}

#[test]
fn given_new_session_when_created_then_is_idle_without_result() {
    let session = AnalysisSession::new();

    assert_eq!(session.state(), PipelineState::Idle);
    assert!(session.result().is_none());
    assert!(session.document().is_none());
}

#[test]
fn given_completed_pass_when_querying_then_result_is_exposed() {
    let session = aggregated_session();

    assert_eq!(session.state(), PipelineState::Aggregated);
    assert!(session.result().is_some());
}

#[test]
fn given_pass_in_flight_when_beginning_another_then_rejects() {
    let mut session = AnalysisSession::new();
    session.begin_pass().unwrap();

    assert_eq!(session.begin_pass(), Err(SessionError::PassInFlight));
}

#[test]
fn given_result_for_other_document_when_completing_then_fails_pass() {
    let mut session = AnalysisSession::new();
    session.begin_pass().unwrap();
    session.set_document(document());

    let stale = result_for(&document());
    let outcome = session.complete_pass(stale);

    assert_eq!(outcome, Err(SessionError::StaleResult));
    assert_eq!(session.state(), PipelineState::Idle);
    assert!(session.result().is_none());
    assert!(session.last_error().is_some());
}

#[test]
fn given_failed_pass_when_querying_then_previous_result_is_gone() {
    let mut session = aggregated_session();

    session.begin_pass().unwrap();
    session.fail_pass("extraction failed");

    assert_eq!(session.state(), PipelineState::Idle);
    assert!(session.result().is_none());
    assert_eq!(session.last_error(), Some("extraction failed"));
}

#[test]
fn given_idle_session_when_exporting_then_no_analysis_available() {
    let mut session = AnalysisSession::new();

    assert_eq!(
        session.begin_export().unwrap_err(),
        SessionError::NoAnalysisAvailable
    );
}

#[test]
fn given_aggregated_session_when_exporting_then_round_trips_through_exporting() {
    let mut session = aggregated_session();

    let snapshot = session.begin_export().unwrap();
    assert_eq!(session.state(), PipelineState::Exporting);
    assert_eq!(Some(&snapshot), session.result());

    session.finish_export();
    assert_eq!(session.state(), PipelineState::Aggregated);
}

#[test]
fn given_exporting_session_when_beginning_pass_then_rejects() {
    let mut session = aggregated_session();
    session.begin_export().unwrap();

    assert_eq!(session.begin_pass(), Err(SessionError::PassInFlight));
}

#[test]
fn given_notes_when_resetting_then_notes_survive() {
    let mut session = aggregated_session();
    session.notes_mut().set("Check the inflation figure.");

    session.reset();

    assert_eq!(session.state(), PipelineState::Idle);
    assert!(session.result().is_none());
    assert_eq!(session.notes().as_str(), "Check the inflation figure.");
}

#[test]
fn given_whitespace_notes_when_checking_then_blank() {
    let mut session = AnalysisSession::new();
    session.notes_mut().set("  \n ");

    assert!(session.notes().is_blank());
}

#[test]
fn given_observed_session_when_transitioning_then_publishes_each_state() {
    let (mut session, states) = AnalysisSession::observed();
    assert_eq!(*states.borrow(), PipelineState::Idle);

    session.begin_pass().unwrap();
    assert_eq!(*states.borrow(), PipelineState::Ingesting);

    session.enter(PipelineState::Analyzing);
    assert_eq!(*states.borrow(), PipelineState::Analyzing);

    session.fail_pass("extractor offline");
    assert_eq!(*states.borrow(), PipelineState::Idle);
}
