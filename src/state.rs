use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;

use eframe::egui;

use crate::color::ClassColors;
use crate::data::client::{ApiConfig, ApiError, MeteoriteSource};
use crate::data::model::MeteoriteRecord;
use crate::data::query::{FilterState, SoqlQuery, DEFAULT_DESCRIPTION};
use crate::ui::table::{render_rows, TableRow};

// ---------------------------------------------------------------------------
// UI events
// ---------------------------------------------------------------------------

/// Actions raised by the search form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    Submit,
    Reset,
}

/// What an in-flight request was for; decides how its reply is rendered.
#[derive(Debug, Clone)]
enum Request {
    Default,
    Search(FilterState),
}

type FetchResult = Result<Vec<MeteoriteRecord>, ApiError>;

struct PendingFetch {
    request: Request,
    rx: Receiver<FetchResult>,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Search form contents.
    pub form: FilterState,

    /// Heading above the table.
    pub description: String,

    /// Formatted rows of the most recent successful fetch.
    pub rows: Vec<TableRow>,

    /// Tint per composition class in `rows`.
    pub class_colors: ClassColors,

    /// Error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a request is in flight.
    pub loading: bool,

    config: ApiConfig,
    source: Arc<dyn MeteoriteSource>,
    /// Woken when a reply lands so the UI polls it without user input.
    repaint: Option<egui::Context>,
    /// At most one request is tracked; a newer one replaces it.
    pending: Option<PendingFetch>,
}

impl AppState {
    pub fn new(
        config: ApiConfig,
        source: Arc<dyn MeteoriteSource>,
        repaint: Option<egui::Context>,
    ) -> Self {
        Self {
            form: FilterState::default(),
            description: DEFAULT_DESCRIPTION.to_string(),
            rows: Vec::new(),
            class_colors: ClassColors::default(),
            status_message: None,
            loading: false,
            config,
            source,
            repaint,
            pending: None,
        }
    }

    pub fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Submit => self.submit_search(),
            UiEvent::Reset => {
                self.form.reset();
                self.default_load();
            }
        }
    }

    /// Request the heaviest meteorites with no name or class filter.
    pub fn default_load(&mut self) {
        let query = SoqlQuery::top_by_mass(self.config.default_limit);
        self.dispatch(Request::Default, query);
    }

    /// Search with the current form contents.
    pub fn submit_search(&mut self) {
        let filter = self.form.clone();
        if filter.name_pattern.is_empty() {
            self.pending = None;
            self.loading = false;
            self.show_no_records(&filter);
            return;
        }
        let query = SoqlQuery::search(&filter, self.config.search_limit);
        self.dispatch(Request::Search(filter), query);
    }

    /// Apply a finished reply, if one has arrived. Called once per frame.
    pub fn poll(&mut self) {
        let Some(pending) = &self.pending else {
            return;
        };
        let result = match pending.rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => {
                Err(ApiError::Network("request worker exited without a reply".to_string()))
            }
        };
        if let Some(pending) = self.pending.take() {
            self.loading = false;
            self.apply(pending.request, result);
        }
    }

    /// Replace every row with `records`.
    pub fn render(&mut self, records: &[MeteoriteRecord]) {
        self.rows = render_rows(records);
        self.class_colors = ClassColors::new(self.rows.iter().map(|r| r.class.as_str()));
        log::info!("Rendered {} meteorites", self.rows.len());
    }

    fn dispatch(&mut self, request: Request, query: SoqlQuery) {
        log::info!(
            "Requesting up to {} meteorites where {} order by {}",
            query.limit,
            query.filter,
            query.order
        );

        let (tx, rx) = mpsc::channel();
        let source = Arc::clone(&self.source);
        let repaint = self.repaint.clone();
        thread::spawn(move || {
            let result = source.fetch(&query);
            if tx.send(result).is_err() {
                log::warn!("Dropping reply for a superseded request");
            }
            if let Some(ctx) = repaint {
                ctx.request_repaint();
            }
        });

        self.pending = Some(PendingFetch { request, rx });
        self.loading = true;
    }

    fn apply(&mut self, request: Request, result: FetchResult) {
        let records = match result {
            Ok(records) => records,
            Err(e) => {
                log::error!("Failed to fetch meteorites: {e}");
                self.status_message = Some(format!("Error: {e}"));
                return;
            }
        };
        self.status_message = None;

        match request {
            Request::Default => {
                self.render(&records);
                self.description = DEFAULT_DESCRIPTION.to_string();
            }
            Request::Search(filter) if !records.is_empty() => {
                self.render(&records);
                self.description = filter.description();
            }
            Request::Search(filter) => self.show_no_records(&filter),
        }
    }

    fn show_no_records(&mut self, filter: &FilterState) {
        self.render(&[]);
        self.description = filter.no_records_message();
        self.form.reset();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use super::*;
    use crate::data::model::Geolocation;

    /// Answers every query with the next canned reply and records what it
    /// was asked.
    #[derive(Default)]
    struct FakeSource {
        replies: Mutex<Vec<FetchResult>>,
        queries: Mutex<Vec<SoqlQuery>>,
    }

    impl FakeSource {
        fn with_replies(mut replies: Vec<FetchResult>) -> Arc<Self> {
            replies.reverse();
            Arc::new(Self {
                replies: Mutex::new(replies),
                queries: Mutex::default(),
            })
        }

        fn queries(&self) -> Vec<SoqlQuery> {
            self.queries.lock().unwrap().clone()
        }
    }

    impl MeteoriteSource for FakeSource {
        fn fetch(&self, query: &SoqlQuery) -> FetchResult {
            self.queries.lock().unwrap().push(query.clone());
            self.replies.lock().unwrap().pop().unwrap_or_else(|| Ok(Vec::new()))
        }
    }

    fn meteorite(name: &str, class: &str, mass: f64) -> MeteoriteRecord {
        MeteoriteRecord {
            name: name.to_string(),
            recclass: class.to_string(),
            mass: Some(mass),
            fall: "Found".to_string(),
            geolocation: Some(Geolocation {
                latitude: 10.0,
                longitude: 20.0,
            }),
        }
    }

    fn state_with(source: Arc<FakeSource>) -> AppState {
        AppState::new(ApiConfig::default(), source, None)
    }

    /// Block until the in-flight request (if any) has been applied.
    fn settle(state: &mut AppState) {
        if let Some(pending) = state.pending.take() {
            let result = pending
                .rx
                .recv_timeout(Duration::from_secs(5))
                .expect("fake source replies");
            state.loading = false;
            state.apply(pending.request, result);
        }
    }

    #[test]
    fn default_load_requests_top_ten_and_renders() {
        let source = FakeSource::with_replies(vec![Ok(vec![
            meteorite("Hoba", "Iron, IVB", 6e7),
            meteorite("Cape York", "Iron, IIIAB", 5.8e7),
        ])]);
        let mut state = state_with(source.clone());

        state.default_load();
        assert!(state.loading);
        settle(&mut state);

        let queries = source.queries();
        assert_eq!(queries, vec![SoqlQuery::top_by_mass(10)]);
        assert_eq!(state.description, "The Top 10 Densest Known Meteorites");
        assert_eq!(state.rows.len(), 2);
        assert_eq!(state.rows[0].name, "Hoba");
        assert_eq!(state.rows[0].location, "(10, 20)");
        assert!(!state.loading);
    }

    #[test]
    fn search_renders_matches_with_description() {
        let source = FakeSource::with_replies(vec![Ok(vec![meteorite("Gibeon", "Iron, IVA", 2.6e7)])]);
        let mut state = state_with(source.clone());
        state.form = FilterState::new("Gib", Some("Iron"));

        state.handle_event(UiEvent::Submit);
        settle(&mut state);

        let queries = source.queries();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].limit, 50);
        assert_eq!(queries[0].order, "mass DESC");
        assert!(queries[0].filter.contains("recclass LIKE '%Iron%'"));
        assert_eq!(state.description, "Known Iron Meteorites with Names Like 'Gib'");
        assert_eq!(state.rows.len(), 1);
        assert_eq!(state.form, FilterState::new("Gib", Some("Iron")));
    }

    #[test]
    fn empty_result_clears_table_and_form() {
        let source = FakeSource::with_replies(vec![
            Ok(vec![meteorite("Hoba", "Iron, IVB", 6e7)]),
            Ok(Vec::new()),
        ]);
        let mut state = state_with(source);
        state.default_load();
        settle(&mut state);
        assert_eq!(state.rows.len(), 1);

        state.form = FilterState::new("zzz", Some("LL"));
        state.submit_search();
        settle(&mut state);

        assert!(state.rows.is_empty());
        assert_eq!(
            state.description,
            "No recorded LL meteorite landings with names like 'zzz'"
        );
        assert_eq!(state.form, FilterState::default());
    }

    #[test]
    fn empty_name_clears_table_without_request() {
        let source = FakeSource::with_replies(vec![Ok(vec![meteorite("Hoba", "Iron, IVB", 6e7)])]);
        let mut state = state_with(source.clone());
        state.default_load();
        settle(&mut state);
        assert!(!state.rows.is_empty());

        state.form = FilterState::new("", Some("H"));
        state.handle_event(UiEvent::Submit);

        assert!(state.rows.is_empty());
        assert!(!state.loading);
        assert_eq!(state.description, "No recorded meteorite landings");
        assert_eq!(source.queries().len(), 1);
    }

    #[test]
    fn empty_name_discards_pending_default_load() {
        let source = FakeSource::with_replies(vec![Ok(vec![meteorite("Hoba", "Iron, IVB", 6e7)])]);
        let mut state = state_with(source);
        state.default_load();
        state.submit_search();
        settle(&mut state);
        assert!(state.rows.is_empty());
    }

    #[test]
    fn failure_keeps_previous_rows() {
        let source = FakeSource::with_replies(vec![
            Ok(vec![meteorite("Hoba", "Iron, IVB", 6e7)]),
            Err(ApiError::Status(503)),
        ]);
        let mut state = state_with(source);
        state.default_load();
        settle(&mut state);

        state.form = FilterState::new("Ho", None);
        state.submit_search();
        settle(&mut state);

        assert_eq!(state.rows.len(), 1);
        assert_eq!(state.description, "The Top 10 Densest Known Meteorites");
        assert_eq!(
            state.status_message.as_deref(),
            Some("Error: server returned HTTP 503")
        );
    }

    #[test]
    fn reset_clears_form_and_reloads_default() {
        let source = FakeSource::with_replies(vec![Ok(vec![meteorite("Hoba", "Iron, IVB", 6e7)])]);
        let mut state = state_with(source.clone());
        state.form = FilterState::new("Ho", Some("H"));

        state.handle_event(UiEvent::Reset);
        settle(&mut state);

        assert_eq!(state.form, FilterState::default());
        assert_eq!(source.queries(), vec![SoqlQuery::top_by_mass(10)]);
        assert_eq!(state.rows.len(), 1);
    }

    #[test]
    fn poll_applies_reply_once_it_arrives() {
        let source = FakeSource::with_replies(vec![Ok(vec![meteorite("Hoba", "Iron, IVB", 6e7)])]);
        let mut state = state_with(source);
        state.default_load();

        for _ in 0..500 {
            state.poll();
            if !state.loading {
                break;
            }
            thread::sleep(Duration::from_millis(10));
        }
        assert!(!state.loading);
        assert_eq!(state.rows.len(), 1);
    }
}
