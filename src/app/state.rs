//! Application state and view model computation.
//!
//! [`AppState`] is the controller of the search screen. It owns the
//! [`ViewStateStore`] and the injected [`Catalog`], and keeps the transient UI
//! state that is not part of a request outcome: the query being typed, focus,
//! selection and the notice bar.
//!
//! # Presentation
//!
//! The results pane is only rewritten from the store through
//! [`AppState::sync_presentation`], which runs the projector. A failed
//! request turns into a notice and leaves the last list on screen.
//!
//! # Example
//!
//! ```rust
//! use bookfinder::app::AppState;
//! use bookfinder::request::HttpCatalog;
//! use bookfinder::ui::Theme;
//!
//! let catalog = HttpCatalog::new("https://example.org/book", "titulo");
//! let mut state = AppState::new(Box::new(catalog), Theme::default(), 2000);
//! let actions = state.submit_query("  dom   casmurro ");
//! assert!(state.store().loading());
//! assert_eq!(actions.len(), 1);
//! ```

use super::modes::InputMode;
use super::store::ViewStateStore;
use crate::app::Action;
use crate::domain::SearchResponse;
use crate::request::{normalize, Catalog, RequestOutcome};
use crate::ui::projector::{project, BookRow, RenderBranch};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    BookCard, EmptyState, FooterInfo, HeaderInfo, NoticeInfo, SearchBarInfo, UIViewModel,
};
use crate::ui::helpers::{compute_highlight_ranges, truncate_with_ellipsis, wrap_with_ellipsis};
use fuzzy_matcher::skim::SkimMatcherV2;
use std::cell::Cell;
use std::rc::Rc;

/// Label above the query input.
pub const INPUT_LABEL: &str = "DIGITE AUTOR OU NOME DO LIVRO";
/// Action control label while idle.
pub const SEARCH_LABEL: &str = "Procurar";
/// Action control label while a request is in flight.
pub const BUSY_LABEL: &str = "Procurando...";

const EMPTY_QUERY_NOTICE: &str = "Digite um autor ou título para procurar";
const NO_WEB_ACCESS_NOTICE: &str = "Permissão de acesso à rede negada";

/// Rows taken by one book card: title, author, two synopsis lines, spacer.
pub const CARD_HEIGHT: usize = 5;

/// Rows used by everything except the card list.
const CHROME_ROWS: usize = 10;

/// Synopsis lines shown per card.
const SYNOPSIS_LINES: usize = 2;

/// What the result area currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResultsPane {
    /// No search has completed.
    #[default]
    Empty,
    /// Books from the last successful search.
    Books(Vec<BookRow>),
    /// Last search found nothing; carries the message to show.
    NoRecords(String),
}

/// Collapses runs of whitespace and trims both ends.
///
/// ```rust
/// use bookfinder::app::state::normalize_query;
///
/// assert_eq!(normalize_query("  dom \t casmurro "), "dom casmurro");
/// assert_eq!(normalize_query("   "), "");
/// ```
#[must_use]
pub fn normalize_query(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Central application state container.
#[derive(Debug)]
pub struct AppState {
    catalog: Box<dyn Catalog>,
    store: ViewStateStore<SearchResponse>,

    /// Text currently in the query input.
    pub query_input: String,

    /// Normalized text of the last submitted search; drives match highlighting.
    pub last_query: Option<String>,

    /// Which part of the screen has keyboard focus.
    pub input_mode: InputMode,

    /// Content of the result area, derived from the store.
    pub results: ResultsPane,

    /// Zero-based index of the selected card.
    pub selected_index: usize,

    /// Transient message shown above the footer.
    pub notice: Option<String>,

    /// Number of armed notice timers; the notice clears when the last fires.
    pending_notice_timers: usize,
    notice_ms: u64,

    /// Busy flag from the last projection; drives the action control label.
    busy: bool,

    /// `false` once the user denied the web access permission.
    pub web_access: bool,

    pub theme: Theme,

    /// Set by the store subscription on every publish.
    render_requested: Rc<Cell<bool>>,
}

impl AppState {
    /// Creates the controller with an injected catalog.
    ///
    /// # Parameters
    ///
    /// * `catalog` - Builds the HTTP requests for searches
    /// * `theme` - Color scheme for rendering
    /// * `notice_ms` - How long transient notices stay visible
    #[must_use]
    pub fn new(catalog: Box<dyn Catalog>, theme: Theme, notice_ms: u64) -> Self {
        let render_requested = Rc::new(Cell::new(false));
        let mut store = ViewStateStore::new();

        let flag = Rc::clone(&render_requested);
        store.subscribe(move |event| {
            tracing::debug!(event = ?event, "view state published");
            flag.set(true);
        });

        Self {
            catalog,
            store,
            query_input: String::new(),
            last_query: None,
            input_mode: InputMode::default(),
            results: ResultsPane::default(),
            selected_index: 0,
            notice: None,
            pending_notice_timers: 0,
            busy: false,
            notice_ms,
            web_access: true,
            theme,
            render_requested,
        }
    }

    /// Read access to the observable store.
    #[must_use]
    pub const fn store(&self) -> &ViewStateStore<SearchResponse> {
        &self.store
    }

    /// Mutable access to the store, for additional subscribers.
    pub fn store_mut(&mut self) -> &mut ViewStateStore<SearchResponse> {
        &mut self.store
    }

    /// Returns whether the store published since the last call, and resets it.
    pub fn take_render_request(&self) -> bool {
        self.render_requested.replace(false)
    }

    /// Submits a search for `text`.
    ///
    /// The query is normalized first. Empty queries and searches without web
    /// access only raise a notice. Otherwise the store enters the loading
    /// state and the returned actions carry the request for the host. A
    /// request that cannot even be built completes immediately as a failure.
    pub fn submit_query(&mut self, text: &str) -> Vec<Action> {
        let query = normalize_query(text);
        let _span = tracing::debug_span!("submit_query", query = %query).entered();

        if query.is_empty() {
            tracing::debug!("empty query rejected");
            return self.show_notice(EMPTY_QUERY_NOTICE);
        }

        if !self.web_access {
            tracing::debug!("web access not granted, search skipped");
            return self.show_notice(NO_WEB_ACCESS_NOTICE);
        }

        self.last_query = Some(query.clone());
        self.store.start_request();
        self.busy = project(self.store.loading(), self.store.state()).busy;

        match normalize(|| self.catalog.search_request(&query)) {
            RequestOutcome::Success(request) => {
                tracing::debug!(url = %request.url, "catalog request built");
                vec![Action::FetchBooks(request)]
            }
            RequestOutcome::Failure(message) => self.complete_request(RequestOutcome::Failure(message)),
        }
    }

    /// Delivers a request outcome to the store and refreshes the screen.
    pub fn complete_request(&mut self, outcome: RequestOutcome<SearchResponse>) -> Vec<Action> {
        self.store.apply(outcome);
        self.sync_presentation()
    }

    /// Re-derives the result area from the store.
    ///
    /// Returns the timer action when the projection produced a notice.
    pub fn sync_presentation(&mut self) -> Vec<Action> {
        let projection = project(self.store.loading(), self.store.state());
        tracing::debug!(busy = projection.busy, "presentation synced");
        self.busy = projection.busy;

        match projection.branch {
            RenderBranch::Books(rows) => {
                self.results = ResultsPane::Books(rows);
                self.selected_index = 0;
                vec![]
            }
            RenderBranch::NoRecords { message } => {
                self.results = ResultsPane::NoRecords(message);
                self.selected_index = 0;
                vec![]
            }
            RenderBranch::Notice { message } => self.show_notice(message),
            RenderBranch::Nothing => vec![],
        }
    }

    /// Shows `message` in the notice bar and arms its expiry timer.
    pub fn show_notice(&mut self, message: impl Into<String>) -> Vec<Action> {
        let message = message.into();
        tracing::debug!(notice = %message, "notice shown");
        self.notice = Some(message);
        self.pending_notice_timers += 1;
        vec![Action::ScheduleNoticeExpiry {
            millis: self.notice_ms,
        }]
    }

    /// Handles a notice timer firing. Returns `true` if the notice was cleared.
    ///
    /// A newer notice keeps its full duration: only the last armed timer
    /// clears the bar.
    pub fn expire_notice(&mut self) -> bool {
        self.pending_notice_timers = self.pending_notice_timers.saturating_sub(1);
        if self.pending_notice_timers == 0 && self.notice.is_some() {
            self.notice = None;
            return true;
        }
        false
    }

    #[must_use]
    pub fn book_count(&self) -> usize {
        match &self.results {
            ResultsPane::Books(rows) => rows.len(),
            ResultsPane::Empty | ResultsPane::NoRecords(_) => 0,
        }
    }

    #[must_use]
    pub fn selected_book(&self) -> Option<&BookRow> {
        match &self.results {
            ResultsPane::Books(rows) => rows.get(self.selected_index),
            ResultsPane::Empty | ResultsPane::NoRecords(_) => None,
        }
    }

    /// Moves the selection down, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        let count = self.book_count();
        if count == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % count;
    }

    /// Moves the selection up, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        let count = self.book_count();
        if count == 0 {
            return;
        }
        self.selected_index = if self.selected_index == 0 {
            count - 1
        } else {
            self.selected_index - 1
        };
    }

    /// Computes a renderable view model for a pane of `rows` x `cols`.
    ///
    /// # Windowing
    ///
    /// Cards have a fixed height. The visible window is centered on the
    /// selected card and pulled back when it would run past the end of the
    /// list.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let cards = match &self.results {
            ResultsPane::Books(books) => self.compute_cards(books, rows, cols),
            ResultsPane::Empty | ResultsPane::NoRecords(_) => (vec![], 0),
        };

        UIViewModel {
            header: self.compute_header(),
            search_bar: self.compute_search_bar(),
            cards: cards.0,
            selected_index: cards.1,
            empty_state: self.compute_empty_state(),
            notice: self.notice.as_ref().map(|message| NoticeInfo {
                message: message.clone(),
            }),
            footer: self.compute_footer(),
        }
    }

    fn compute_cards(&self, books: &[BookRow], rows: usize, cols: usize) -> (Vec<BookCard>, usize) {
        let visible_cards = (rows.saturating_sub(CHROME_ROWS) / CARD_HEIGHT).max(1);

        let mut visible_start = self.selected_index.saturating_sub(visible_cards / 2);
        let visible_end = (visible_start + visible_cards).min(books.len());
        if visible_end - visible_start < visible_cards && books.len() >= visible_cards {
            visible_start = visible_end.saturating_sub(visible_cards);
        }

        let matcher = self
            .last_query
            .as_ref()
            .filter(|query| !query.is_empty())
            .map(|_| SkimMatcherV2::default());

        let cards = books[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(relative_idx, book)| {
                let is_selected = visible_start + relative_idx == self.selected_index;
                self.compute_card(book, is_selected, cols, matcher.as_ref())
            })
            .collect();

        (cards, self.selected_index.saturating_sub(visible_start))
    }

    /// Formats one book for display: labels, truncation and highlights.
    fn compute_card(&self, book: &BookRow, is_selected: bool, cols: usize, matcher: Option<&SkimMatcherV2>) -> BookCard {
        const LABEL_WIDTH: usize = 12;
        const MARGIN: usize = 4;

        let value_width = cols.saturating_sub(LABEL_WIDTH + MARGIN).max(1);
        let title = truncate_with_ellipsis(&book.title, value_width);
        let author = truncate_with_ellipsis(&book.author, value_width);
        let synopsis = book
            .synopsis
            .as_deref()
            .map(|text| wrap_with_ellipsis(text, value_width, SYNOPSIS_LINES))
            .unwrap_or_default();

        let cover = book
            .cover_url
            .as_deref()
            .filter(|_| is_selected)
            .map(|url| truncate_with_ellipsis(url, value_width));

        let query = self.last_query.as_deref().unwrap_or_default();
        let (title_highlights, author_highlights) = matcher.map_or_else(
            || (vec![], vec![]),
            |m| {
                (
                    compute_highlight_ranges(&title, query, m),
                    compute_highlight_ranges(&author, query, m),
                )
            },
        );

        BookCard {
            title,
            author,
            synopsis,
            cover,
            is_selected,
            title_highlights,
            author_highlights,
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let title = match (&self.results, self.last_query.as_deref()) {
            (ResultsPane::Books(rows), Some(query)) => format!(" Bookfinder: \"{query}\" ({}) ", rows.len()),
            _ => " Bookfinder ".to_string(),
        };
        HeaderInfo { title }
    }

    fn compute_search_bar(&self) -> SearchBarInfo {
        let busy = self.busy;
        SearchBarInfo {
            label: INPUT_LABEL.to_string(),
            query: self.query_input.clone(),
            button_label: if busy { BUSY_LABEL } else { SEARCH_LABEL }.to_string(),
            busy,
            focused: self.input_mode.is_typing(),
        }
    }

    fn compute_empty_state(&self) -> Option<EmptyState> {
        match &self.results {
            ResultsPane::NoRecords(message) => Some(EmptyState {
                message: message.clone(),
                subtitle: "Tente outro autor ou título".to_string(),
            }),
            ResultsPane::Empty | ResultsPane::Books(_) => None,
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.input_mode {
            InputMode::Typing => "Enter: procurar  Esc/Tab: resultados  Ctrl+n/p: navegar",
            InputMode::Browsing => "j/k: navegar  Enter or /: editar busca  q: fechar",
        };
        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::store::ViewState;
    use crate::domain::{Book, BookfinderError, ResponseStatus};
    use crate::request::{CatalogRequest, HttpCatalog};

    #[derive(Debug)]
    struct BrokenCatalog;

    impl Catalog for BrokenCatalog {
        fn search_request(&self, _query: &str) -> crate::domain::Result<CatalogRequest> {
            Err(BookfinderError::Config("sem endpoint".to_string()))
        }
    }

    fn state() -> AppState {
        AppState::new(
            Box::new(HttpCatalog::new("https://example.org/book", "titulo")),
            Theme::default(),
            1500,
        )
    }

    fn found(titles: &[&str]) -> SearchResponse {
        SearchResponse {
            status: ResponseStatus {
                success: Some(true),
                message: None,
            },
            books: Some(
                titles
                    .iter()
                    .map(|t| {
                        Some(Book {
                            title: Some((*t).to_string()),
                            ..Book::default()
                        })
                    })
                    .collect(),
            ),
        }
    }

    #[test]
    fn normalizes_whitespace_in_queries() {
        assert_eq!(normalize_query("a  b\n c"), "a b c");
        assert_eq!(normalize_query(""), "");
    }

    #[test]
    fn submit_starts_loading_and_requests_books() {
        let mut state = state();
        let actions = state.submit_query(" dom   casmurro ");

        assert!(state.store().loading());
        assert_eq!(state.last_query.as_deref(), Some("dom casmurro"));
        let [Action::FetchBooks(request)] = actions.as_slice() else {
            panic!("expected a single fetch, got {actions:?}");
        };
        assert_eq!(request.query(), Some("dom casmurro"));
        assert!(state.take_render_request());
        assert!(!state.take_render_request());
    }

    #[test]
    fn empty_query_only_raises_a_notice() {
        let mut state = state();
        let actions = state.submit_query("   ");

        assert!(!state.store().loading());
        assert_eq!(*state.store().state(), ViewState::Idle);
        assert_eq!(actions, vec![Action::ScheduleNoticeExpiry { millis: 1500 }]);
        assert!(state.notice.is_some());
    }

    #[test]
    fn denied_web_access_skips_the_request() {
        let mut state = state();
        state.web_access = false;
        let actions = state.submit_query("joyce");

        assert!(!state.store().loading());
        assert!(matches!(actions.as_slice(), [Action::ScheduleNoticeExpiry { .. }]));
    }

    #[test]
    fn unbuildable_request_completes_as_failure() {
        let mut state = AppState::new(Box::new(BrokenCatalog), Theme::default(), 1000);
        let actions = state.submit_query("joyce");

        assert!(!state.store().loading());
        assert!(matches!(state.store().state(), ViewState::Error(_)));
        assert!(state.notice.as_deref().is_some_and(|n| n.contains("sem endpoint")));
        assert_eq!(actions, vec![Action::ScheduleNoticeExpiry { millis: 1000 }]);
    }

    #[test]
    fn failure_keeps_previous_books_on_screen() {
        let mut state = state();
        state.submit_query("joyce");
        state.complete_request(RequestOutcome::Success(found(&["Ulysses"])));
        assert_eq!(state.book_count(), 1);

        state.submit_query("joyce");
        state.complete_request(RequestOutcome::Failure("offline".to_string()));

        assert_eq!(state.book_count(), 1);
        assert_eq!(state.notice.as_deref(), Some("offline"));
    }

    #[test]
    fn only_the_last_timer_clears_the_notice() {
        let mut state = state();
        state.show_notice("first");
        state.show_notice("second");

        assert!(!state.expire_notice());
        assert_eq!(state.notice.as_deref(), Some("second"));
        assert!(state.expire_notice());
        assert_eq!(state.notice, None);
        assert!(!state.expire_notice());
    }

    #[test]
    fn selection_wraps_in_both_directions() {
        let mut state = state();
        state.complete_request(RequestOutcome::Success(found(&["a", "b", "c"])));

        state.move_selection_up();
        assert_eq!(state.selected_index, 2);
        state.move_selection_down();
        assert_eq!(state.selected_index, 0);
        assert_eq!(state.selected_book().map(|b| b.title.as_str()), Some("a"));
    }

    #[test]
    fn viewmodel_shows_busy_label_while_loading() {
        let mut state = state();
        state.submit_query("joyce");
        let vm = state.compute_viewmodel(30, 80);

        assert!(vm.search_bar.busy);
        assert_eq!(vm.search_bar.button_label, BUSY_LABEL);
        assert_eq!(vm.search_bar.label, INPUT_LABEL);
    }

    #[test]
    fn busy_label_clears_once_the_outcome_is_projected() {
        let mut state = state();
        state.submit_query("joyce");
        state.complete_request(RequestOutcome::Failure("offline".to_string()));

        let vm = state.compute_viewmodel(30, 80);
        assert!(!vm.search_bar.busy);
        assert_eq!(vm.search_bar.button_label, SEARCH_LABEL);
    }

    #[test]
    fn cover_is_shown_only_on_the_selected_card() {
        let mut state = state();
        let mut response = found(&["Ulysses", "Dubliners"]);
        for book in response.books.iter_mut().flatten().flatten() {
            book.images = Some(crate::domain::book::Images {
                front_cover: Some(crate::domain::book::Cover {
                    small: Some(format!("https://img/{}.jpg", book.title_line())),
                    medium: None,
                    large: None,
                }),
            });
        }
        state.complete_request(RequestOutcome::Success(response));
        state.move_selection_down();

        let vm = state.compute_viewmodel(30, 80);
        assert_eq!(vm.cards[0].cover, None);
        assert_eq!(vm.cards[1].cover.as_deref(), Some("https://img/Dubliners.jpg"));
    }

    #[test]
    fn viewmodel_windows_cards_around_selection() {
        let mut state = state();
        let titles: Vec<String> = (0..10).map(|i| format!("Livro {i}")).collect();
        let refs: Vec<&str> = titles.iter().map(String::as_str).collect();
        state.complete_request(RequestOutcome::Success(found(&refs)));
        state.selected_index = 9;

        // 25 rows leave room for three cards.
        let vm = state.compute_viewmodel(25, 80);
        assert_eq!(vm.cards.len(), 3);
        assert_eq!(vm.cards[2].title, "Livro 9");
        assert_eq!(vm.selected_index, 2);
        assert!(vm.cards[2].is_selected);
    }

    #[test]
    fn viewmodel_highlights_the_submitted_query() {
        let mut state = state();
        state.submit_query("uly");
        state.complete_request(RequestOutcome::Success(found(&["Ulysses"])));

        let vm = state.compute_viewmodel(30, 80);
        assert_eq!(vm.cards[0].title_highlights, vec![(0, 3)]);
    }

    #[test]
    fn no_records_becomes_empty_state() {
        let mut state = state();
        state.complete_request(RequestOutcome::Success(SearchResponse {
            status: ResponseStatus {
                success: Some(false),
                message: Some("Nenhum registro foi encontrado".to_string()),
            },
            books: None,
        }));

        let vm = state.compute_viewmodel(30, 80);
        assert!(vm.cards.is_empty());
        assert_eq!(
            vm.empty_state.map(|e| e.message),
            Some("Nenhum registro foi encontrado".to_string())
        );
    }
}
