/// Query view state
///
/// Holds everything the main page shows (query text, answer, images,
/// sources, loading flag) and the transitions the UI drives through it.
/// Network calls happen elsewhere; each operation is split into a `begin_*`
/// step that decides whether a request goes out and a `finish_*` step that
/// folds the result back in.

use crate::api::schema::{ActionResponse, HealthResponse, QueryResponse};
use crate::api::ApiError;

use super::data::{ImageEntry, SourceLink};
use super::notify::{Notifier, ToastKind};

/// Shown when the health check fails for any reason
pub const BACKEND_UNAVAILABLE: &str = "Backend is unavailable";

/// Server-side actions triggered from the toolbar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Scrape,
    Clear,
}

impl Action {
    pub fn name(self) -> &'static str {
        match self {
            Action::Scrape => "scrape",
            Action::Clear => "clear",
        }
    }

    /// Used when the server sends no `detail`
    pub fn default_success(self) -> &'static str {
        match self {
            Action::Scrape => "Scraping complete",
            Action::Clear => "Chat history cleared",
        }
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            Action::Scrape => "Failed to scrape articles",
            Action::Clear => "Failed to clear history",
        }
    }
}

/// State of the main page
#[derive(Debug, Default)]
pub struct QueryView {
    query: String,
    answer: String,
    images: Vec<ImageEntry>,
    sources: Vec<SourceLink>,
    loading: bool,
    /// Bumped on every search so late image downloads can be discarded
    generation: u64,
}

impl QueryView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_query(&mut self, query: String) {
        self.query = query;
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn images(&self) -> &[ImageEntry] {
        &self.images
    }

    pub fn sources(&self) -> &[SourceLink] {
        &self.sources
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Start a search.
    ///
    /// Returns the query to send, or None when nothing should be sent:
    /// the query is blank, or another request is still outstanding.
    /// On success the previous results are cleared immediately.
    pub fn begin_search(&mut self) -> Option<String> {
        if self.query.trim().is_empty() {
            return None;
        }
        if self.loading {
            tracing::debug!("search ignored, a request is already in flight");
            return None;
        }

        self.loading = true;
        self.answer.clear();
        self.images.clear();
        self.sources.clear();
        self.generation += 1;

        Some(self.query.clone())
    }

    /// Fold a query response into the view.
    ///
    /// Failures only reach the log; the results stay empty since they were
    /// cleared when the search began.
    pub fn finish_search(&mut self, result: Result<QueryResponse, ApiError>) {
        self.loading = false;

        match result {
            Ok(response) => {
                let image_count = response.images.len();
                self.answer = response.answer;
                self.images = response
                    .images
                    .into_iter()
                    .filter_map(ImageEntry::from_payload)
                    .collect();
                self.sources = response.sources.into_iter().map(SourceLink::from).collect();

                if self.images.len() < image_count {
                    tracing::debug!(
                        dropped = image_count - self.images.len(),
                        "images without a location were dropped"
                    );
                }
                tracing::info!(
                    images = self.images.len(),
                    sources = self.sources.len(),
                    "answer received"
                );
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to fetch answer");
            }
        }
    }

    /// Start a scrape or clear. Returns false if another request is in flight.
    pub fn begin_action(&mut self, action: Action) -> bool {
        if self.loading {
            tracing::debug!(action = action.name(), "action ignored, a request is already in flight");
            return false;
        }

        self.loading = true;
        true
    }

    /// Report a scrape or clear outcome through `notifier`
    pub fn finish_action(
        &mut self,
        action: Action,
        result: Result<ActionResponse, ApiError>,
        notifier: &mut dyn Notifier,
    ) {
        self.loading = false;

        match result {
            Ok(response) => {
                let message = response
                    .detail
                    .filter(|detail| !detail.is_empty())
                    .unwrap_or_else(|| action.default_success().to_string());
                notifier.notify(ToastKind::Success, &message);
            }
            Err(err) => {
                tracing::error!(action = action.name(), error = %err, "backend action failed");
                notifier.notify(ToastKind::Failure, action.failure_message());
            }
        }
    }
}

/// Report a health check outcome.
///
/// Anything but a decoded status of "ok" raises a single failure toast.
/// Returns whether the backend looked healthy.
pub fn report_health(result: Result<HealthResponse, ApiError>, notifier: &mut dyn Notifier) -> bool {
    match result {
        Ok(health) if health.is_ok() => {
            tracing::info!("✅ Backend is healthy");
            true
        }
        Ok(health) => {
            tracing::warn!(status = %health.status, "backend reported unhealthy status");
            notifier.notify(ToastKind::Failure, BACKEND_UNAVAILABLE);
            false
        }
        Err(err) => {
            tracing::warn!(error = %err, "health check failed");
            notifier.notify(ToastKind::Failure, BACKEND_UNAVAILABLE);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::schema::SourcePayload;
    use crate::state::data::ImageSource;

    /// Notifier that remembers everything it was told
    #[derive(Default)]
    struct RecordingNotifier {
        seen: Vec<(ToastKind, String)>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&mut self, kind: ToastKind, message: &str) {
            self.seen.push((kind, message.to_string()));
        }
    }

    fn view_with(query: &str) -> QueryView {
        let mut view = QueryView::new();
        view.set_query(query.to_string());
        view
    }

    fn photosynthesis_response() -> QueryResponse {
        serde_json::from_str(
            r#"{"answer":"Photosynthesis is...","sources":[{"url":"https://x.test","title":"Bio 101"}]}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_blank_query_is_noop() {
        for blank in ["", "   ", "\t\n"] {
            let mut view = view_with(blank);
            assert_eq!(view.begin_search(), None);
            assert!(!view.is_loading());
            assert_eq!(view.generation(), 0);
        }
    }

    #[test]
    fn test_blank_query_keeps_previous_results() {
        let mut view = view_with("what is photosynthesis");
        view.begin_search();
        view.finish_search(Ok(photosynthesis_response()));

        view.set_query("   ".to_string());
        assert_eq!(view.begin_search(), None);

        assert!(!view.is_loading());
        assert_eq!(view.generation(), 1);
        assert_eq!(view.answer(), "Photosynthesis is...");
        assert_eq!(view.sources().len(), 1);
        assert_eq!(view.sources()[0].label, "Bio 101");
    }

    #[test]
    fn test_search_lifecycle() {
        let mut view = view_with("what is photosynthesis");

        assert_eq!(view.begin_search().as_deref(), Some("what is photosynthesis"));
        assert!(view.is_loading());

        view.finish_search(Ok(photosynthesis_response()));

        assert!(!view.is_loading());
        assert_eq!(view.answer(), "Photosynthesis is...");
        assert!(view.images().is_empty());
        assert_eq!(
            view.sources(),
            &[SourceLink {
                url: "https://x.test".to_string(),
                label: "Bio 101".to_string(),
            }]
        );
    }

    #[test]
    fn test_query_is_sent_untrimmed() {
        let mut view = view_with("  leaves  ");
        assert_eq!(view.begin_search().as_deref(), Some("  leaves  "));
    }

    #[test]
    fn test_new_search_clears_previous_results() {
        let mut view = view_with("first");
        view.begin_search();
        view.finish_search(Ok(photosynthesis_response()));

        view.set_query("second".to_string());
        view.begin_search();

        assert_eq!(view.answer(), "");
        assert!(view.sources().is_empty());
        assert_eq!(view.generation(), 2);
        assert_eq!(view.query(), "second");
    }

    #[test]
    fn test_failed_search_leaves_results_empty() {
        let mut view = view_with("first");
        view.begin_search();
        view.finish_search(Ok(photosynthesis_response()));

        view.begin_search();
        view.finish_search(Err(ApiError::Transport("connection refused".to_string())));

        assert!(!view.is_loading());
        assert_eq!(view.answer(), "");
        assert!(view.images().is_empty());
        assert!(view.sources().is_empty());
    }

    #[test]
    fn test_images_are_mapped() {
        let mut view = view_with("leaf");
        view.begin_search();
        view.finish_search(Ok(serde_json::from_str(
            r#"{"answer":"a","images":[
                {"image_url":"https://x.test/a.png","caption":"Leaf"},
                {"caption":"nowhere"},
                {"local_path":"data/b.png"}
            ]}"#,
        )
        .unwrap()));

        let sources: Vec<_> = view.images().iter().map(|i| i.source.clone()).collect();
        assert_eq!(
            sources,
            vec![
                ImageSource::Remote("https://x.test/a.png".to_string()),
                ImageSource::Local("data/b.png".into()),
            ]
        );
    }

    #[test]
    fn test_single_flight() {
        let mut view = view_with("leaf");

        assert!(view.begin_action(Action::Scrape));
        assert_eq!(view.begin_search(), None);
        assert!(!view.begin_action(Action::Clear));
        assert_eq!(view.generation(), 0);

        let mut notifier = RecordingNotifier::default();
        view.finish_action(Action::Scrape, Ok(ActionResponse::default()), &mut notifier);

        assert!(view.begin_search().is_some());
    }

    #[test]
    fn test_scrape_success_uses_detail() {
        let mut view = QueryView::new();
        let mut notifier = RecordingNotifier::default();

        view.begin_action(Action::Scrape);
        view.finish_action(
            Action::Scrape,
            Ok(ActionResponse {
                detail: Some("Articles scraped and indexed.".to_string()),
            }),
            &mut notifier,
        );

        assert!(!view.is_loading());
        assert_eq!(
            notifier.seen,
            vec![(ToastKind::Success, "Articles scraped and indexed.".to_string())]
        );
    }

    #[test]
    fn test_action_success_default_message() {
        let mut view = QueryView::new();
        let mut notifier = RecordingNotifier::default();

        view.begin_action(Action::Scrape);
        view.finish_action(Action::Scrape, Ok(ActionResponse::default()), &mut notifier);
        view.begin_action(Action::Clear);
        view.finish_action(Action::Clear, Ok(ActionResponse::default()), &mut notifier);

        assert_eq!(
            notifier.seen,
            vec![
                (ToastKind::Success, "Scraping complete".to_string()),
                (ToastKind::Success, "Chat history cleared".to_string()),
            ]
        );
    }

    #[test]
    fn test_action_failure_message_ignores_cause() {
        let errors = [
            ApiError::Transport("connection refused".to_string()),
            ApiError::Decode("expected value".to_string()),
            ApiError::Status(500),
        ];

        for err in errors {
            let mut view = QueryView::new();
            let mut notifier = RecordingNotifier::default();

            view.begin_action(Action::Scrape);
            view.finish_action(Action::Scrape, Err(err), &mut notifier);

            assert!(!view.is_loading());
            assert_eq!(
                notifier.seen,
                vec![(ToastKind::Failure, "Failed to scrape articles".to_string())]
            );
        }
    }

    #[test]
    fn test_clear_failure_message() {
        let mut view = QueryView::new();
        let mut notifier = RecordingNotifier::default();

        view.begin_action(Action::Clear);
        view.finish_action(Action::Clear, Err(ApiError::Status(502)), &mut notifier);

        assert_eq!(
            notifier.seen,
            vec![(ToastKind::Failure, "Failed to clear history".to_string())]
        );
    }

    #[test]
    fn test_health_ok_is_silent() {
        let mut notifier = RecordingNotifier::default();

        let healthy = report_health(
            Ok(HealthResponse {
                status: "ok".to_string(),
            }),
            &mut notifier,
        );

        assert!(healthy);
        assert!(notifier.seen.is_empty());
    }

    #[test]
    fn test_health_failures_notify_once() {
        let outcomes = [
            Ok(HealthResponse {
                status: "degraded".to_string(),
            }),
            Ok(HealthResponse {
                status: "OK".to_string(),
            }),
            Err(ApiError::Status(503)),
            Err(ApiError::Transport("connection refused".to_string())),
        ];

        for outcome in outcomes {
            let mut notifier = RecordingNotifier::default();

            assert!(!report_health(outcome, &mut notifier));
            assert_eq!(
                notifier.seen,
                vec![(ToastKind::Failure, BACKEND_UNAVAILABLE.to_string())]
            );
        }
    }

    #[test]
    fn test_untitled_source_uses_url() {
        let mut view = view_with("q");
        view.begin_search();
        view.finish_search(Ok(QueryResponse {
            answer: String::new(),
            images: Vec::new(),
            sources: vec![SourcePayload {
                url: "https://x.test".to_string(),
                title: None,
            }],
        }));

        assert_eq!(view.sources()[0].label, "https://x.test");
    }
}
