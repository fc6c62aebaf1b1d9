use crate::api::{perform, ApiEvent, DirectoryApi};
use crate::app::platform::{TerminalFocus, TerminalLocation};
use org_directory_core::directory::PageSize;
use org_directory_core::{
    ClickEvent, DetailPopup, DirectoryState, Endpoint, Key, ListenerSet, OrgId, Organization,
    PopupElement,
};
use std::sync::Arc;
use throbber_widgets_tui::ThrobberState;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info};

pub struct App {
    pub running: bool,
    pub directory: DirectoryState,
    pub popup: DetailPopup,
    pub location: TerminalLocation,
    pub focus: TerminalFocus,
    pub keyboard: ListenerSet,
    /// Cursor within the rows of the current page
    pub selected_row: usize,
    pub status_message: String,
    pub show_help: bool,
    pub throbber_state: ThrobberState,
    api: Arc<dyn DirectoryApi>,
    events_tx: UnboundedSender<ApiEvent>,
    events_rx: UnboundedReceiver<ApiEvent>,
    in_flight: usize,
}

impl App {
    pub fn new(
        organizations: Vec<Organization>,
        page_size: PageSize,
        location: TerminalLocation,
        api: Arc<dyn DirectoryApi>,
    ) -> Self {
        let directory = DirectoryState::new(organizations, page_size, &location);
        let (events_tx, events_rx) = unbounded_channel();

        Self {
            running: true,
            directory,
            popup: DetailPopup::new(),
            location,
            focus: TerminalFocus::default(),
            keyboard: ListenerSet::new(),
            selected_row: 0,
            status_message: String::new(),
            show_help: false,
            throbber_state: ThrobberState::default(),
            api,
            events_tx,
            events_rx,
            in_flight: 0,
        }
    }

    /// Fires the lookup table requests.
    pub fn mount(&mut self) {
        info!(
            organizations = self.directory.organizations().len(),
            page = self.directory.current_page(),
            "directory mounted"
        );
        for endpoint in self.directory.mount() {
            self.dispatch(endpoint);
        }
    }

    /// Performs `endpoint` in the background; the result comes back through
    /// [`App::update`] or [`App::next_event`].
    fn dispatch(&mut self, endpoint: Endpoint) {
        debug!(%endpoint, "dispatching");
        self.in_flight += 1;

        let api = Arc::clone(&self.api);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let event = perform(api.as_ref(), endpoint).await;
            // The receiver only goes away when the app shuts down
            let _ = tx.send(event);
        });
    }

    pub const fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Waits for the next completed request and applies it.
    pub async fn next_event(&mut self) -> bool {
        match self.events_rx.recv().await {
            Some(event) => {
                self.apply_event(event);
                true
            }
            None => false,
        }
    }

    /// Per-frame housekeeping: apply finished requests and advance the throbber.
    pub fn update(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply_event(event);
        }
        if self.popup.is_loading() {
            self.throbber_state.calc_next();
        }
    }

    pub fn apply_event(&mut self, event: ApiEvent) {
        self.in_flight = self.in_flight.saturating_sub(1);

        match event {
            ApiEvent::FundingRoundChoices(result) => {
                self.directory.receive_funding_round_choices(result);
            }
            ApiEvent::RtoPolicyChoices(result) => {
                self.directory.receive_rto_policy_choices(result);
            }
            ApiEvent::OrganizationDetail(id, result) => {
                self.directory.receive_organization_detail(id, result);
                if self.directory.pending_detail().is_none() {
                    self.status_message.clear();
                }
                self.sync_popup();
            }
            ApiEvent::OrganizationScores(id, result) => {
                self.popup.receive_scores(id, result);
            }
        }
    }

    /// Hands the popup the current selection and visibility.
    fn sync_popup(&mut self) {
        let request = self.popup.sync(
            self.directory.selected_organization(),
            self.directory.popup_visible(),
            &mut self.keyboard,
        );
        if let Some(endpoint) = request {
            self.dispatch(endpoint);
        }
    }

    pub fn page_rows(&self) -> Vec<&Organization> {
        self.directory.page_rows()
    }

    pub fn selected_org_id(&self) -> Option<OrgId> {
        self.page_rows().get(self.selected_row).map(|org| org.id)
    }

    pub fn select_previous_row(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(1);
    }

    pub fn select_next_row(&mut self) {
        let rows = self.page_rows().len();
        if self.selected_row + 1 < rows {
            self.selected_row += 1;
        }
    }

    pub fn select_row(&mut self, index: usize) {
        let rows = self.page_rows().len();
        self.selected_row = index.min(rows.saturating_sub(1));
    }

    pub fn activate_row(&mut self, id: OrgId) {
        match self.directory.activate_row(id) {
            Some(endpoint) => {
                self.status_message = "Loading organization...".to_string();
                self.dispatch(endpoint);
            }
            None => self.sync_popup(),
        }
    }

    pub fn activate_selected_row(&mut self) {
        if let Some(id) = self.selected_org_id() {
            self.activate_row(id);
        }
    }

    pub fn change_page(&mut self, page: usize) {
        self.directory.change_page(page, &mut self.location);
        self.selected_row = 0;
    }

    pub fn toggle_accelerated_vesting(&mut self) {
        self.directory.toggle_accelerated_vesting();
        self.selected_row = 0;
    }

    pub fn set_search_term(&mut self, term: String) {
        self.directory.set_search_term(term);
        self.selected_row = 0;
    }

    pub fn push_search_char(&mut self, ch: char) {
        let mut term = self.directory.search_term().to_string();
        term.push(ch);
        self.set_search_term(term);
    }

    pub fn pop_search_char(&mut self) {
        let mut term = self.directory.search_term().to_string();
        if term.pop().is_some() {
            self.set_search_term(term);
        }
    }

    pub fn clear_search(&mut self) {
        if !self.directory.search_term().is_empty() {
            self.set_search_term(String::new());
        }
    }

    pub fn focus_search(&mut self) {
        self.focus.focus_search();
    }

    pub fn end_search(&mut self) {
        use org_directory_core::FocusController as _;
        self.focus.blur_active_element();
    }

    /// Escape (and any other key) while the popup is open.
    pub fn popup_key(&mut self, key: Key) {
        let directory = &mut self.directory;
        let closed = self
            .popup
            .key_down(key, &mut self.focus, || directory.close_popup());
        if closed {
            self.sync_popup();
        }
    }

    pub fn click_close_button(&mut self) {
        let directory = &mut self.directory;
        self.popup
            .click_close_button(&mut self.focus, || directory.close_popup());
        self.sync_popup();
    }

    pub fn click_popup(&mut self, target: PopupElement) {
        if target == PopupElement::CloseButton {
            self.click_close_button();
            return;
        }

        let event = ClickEvent {
            target,
            current_target: PopupElement::Overlay,
        };
        let directory = &mut self.directory;
        if self
            .popup
            .click_overlay(event, &mut self.focus, || directory.close_popup())
        {
            self.sync_popup();
        }
    }

    pub fn popup_visible(&self) -> bool {
        self.directory.popup_visible()
    }

    /// Releases the popup's keyboard listener before exit.
    pub fn shutdown(&mut self) {
        self.popup.teardown(&mut self.keyboard);
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use async_trait::async_trait;
    use org_directory_core::{ChoiceMap, OrganizationDetail, ScoreDetail, ScoresView};
    use reqwest::Url;
    use std::sync::Mutex;

    #[derive(Default)]
    struct StubApi {
        requests: Mutex<Vec<Endpoint>>,
    }

    #[async_trait]
    impl DirectoryApi for StubApi {
        async fn organization_payload(&self) -> Result<Option<String>, ApiError> {
            Ok(None)
        }

        async fn funding_round_choices(&self) -> Result<ChoiceMap, ApiError> {
            self.requests.lock().unwrap().push(Endpoint::FundingRoundChoices);
            Ok(ChoiceMap::from([("S".to_string(), "Seed".to_string())]))
        }

        async fn rto_policy_choices(&self) -> Result<ChoiceMap, ApiError> {
            self.requests.lock().unwrap().push(Endpoint::RtoPolicyChoices);
            Err(ApiError::Status {
                status: 500,
                path: Endpoint::RtoPolicyChoices.path(),
            })
        }

        async fn organization_detail(&self, id: OrgId) -> Result<OrganizationDetail, ApiError> {
            self.requests
                .lock()
                .unwrap()
                .push(Endpoint::OrganizationDetail(id));
            Ok(OrganizationDetail {
                org_type: Some("C".into()),
                url: Some(format!("https://org{id}.example")),
                ..OrganizationDetail::default()
            })
        }

        async fn organization_scores(&self, id: OrgId) -> Result<Vec<ScoreDetail>, ApiError> {
            self.requests
                .lock()
                .unwrap()
                .push(Endpoint::OrganizationScores(id));
            Ok(vec![ScoreDetail {
                type_name: "Culture".into(),
                avg_score: 4.25,
            }])
        }
    }

    fn org(id: OrgId, name: &str) -> Organization {
        Organization {
            id,
            name: name.to_string(),
            ranking: id,
            avg_score: 4.0,
            funding_round: "S".into(),
            rto_policy: "R".into(),
            profile_completeness: 50.0,
            accelerated_vesting: id % 2 == 0,
            url: None,
            org_type: None,
            gives_ratings: None,
            public: None,
            avg_scores: None,
        }
    }

    fn app_with(api: Arc<StubApi>, url: &str) -> App {
        let organizations = (1..=20).map(|id| org(id, &format!("Org {id}"))).collect();
        let location = TerminalLocation::new(Url::parse(url).unwrap());
        App::new(organizations, PageSize::default(), location, api)
    }

    #[tokio::test]
    async fn mount_loads_lookup_tables_and_tolerates_failures() {
        let api = Arc::new(StubApi::default());
        let mut app = app_with(Arc::clone(&api), "http://localhost:8000/");

        app.mount();
        assert_eq!(app.in_flight(), 2);
        assert!(app.next_event().await);
        assert!(app.next_event().await);

        assert_eq!(app.directory.funding_round_label("S"), "Seed");
        assert!(app.directory.rto_policy_choices().is_empty());
        assert_eq!(app.in_flight(), 0);
    }

    #[tokio::test]
    async fn activating_a_row_fetches_detail_then_scores() {
        let api = Arc::new(StubApi::default());
        let mut app = app_with(Arc::clone(&api), "http://localhost:8000/");

        app.select_row(2);
        app.activate_selected_row();
        assert!(!app.popup_visible());
        assert_eq!(app.status_message, "Loading organization...");

        assert!(app.next_event().await);
        assert!(app.popup_visible());
        assert!(app.popup.is_loading());
        assert!(app.keyboard.active_count() == 1);

        assert!(app.next_event().await);
        let view = app
            .popup
            .view(app.directory.selected_organization(), app.popup_visible())
            .unwrap();
        assert_eq!(view.url.as_deref(), Some("https://org3.example"));
        match view.scores {
            ScoresView::Rows(rows) => assert_eq!(rows[0].score, "4.25"),
            ScoresView::Loading => panic!("scores should have loaded"),
        }

        let requests = api.requests.lock().unwrap().clone();
        assert_eq!(
            requests,
            [Endpoint::OrganizationDetail(3), Endpoint::OrganizationScores(3)]
        );
    }

    #[tokio::test]
    async fn escape_closes_the_popup_and_clears_focus() {
        let api = Arc::new(StubApi::default());
        let mut app = app_with(api, "http://localhost:8000/");

        app.focus_search();
        app.activate_row(1);
        app.next_event().await;
        app.next_event().await;
        assert!(app.popup_visible());

        app.popup_key(Key::Char('a'));
        assert!(app.popup_visible());

        app.popup_key(Key::Escape);
        assert!(!app.popup_visible());
        assert!(!app.focus.search_focused());
        assert_eq!(app.keyboard.active_count(), 0);
    }

    #[tokio::test]
    async fn clicks_inside_the_content_keep_the_popup_open() {
        let api = Arc::new(StubApi::default());
        let mut app = app_with(api, "http://localhost:8000/");

        app.activate_row(1);
        app.next_event().await;

        app.click_popup(PopupElement::Content);
        assert!(app.popup_visible());

        app.click_popup(PopupElement::Overlay);
        assert!(!app.popup_visible());

        // A detail-complete organization opens straight away
        app.activate_row(1);
        assert!(app.popup_visible());
        app.click_popup(PopupElement::CloseButton);
        assert!(!app.popup_visible());
    }

    #[tokio::test]
    async fn page_changes_are_pushed_to_the_location() {
        let api = Arc::new(StubApi::default());
        let mut app = app_with(api, "http://localhost:8000/?page=2");
        assert_eq!(app.directory.current_page(), 2);
        assert_eq!(app.page_rows().len(), 5);

        app.select_row(3);
        app.change_page(1);
        assert_eq!(app.selected_row, 0);
        assert_eq!(app.location.current().as_str(), "http://localhost:8000/?page=1");
        assert_eq!(app.page_rows().len(), 15);
    }

    #[tokio::test]
    async fn search_edits_filter_the_directory() {
        let api = Arc::new(StubApi::default());
        let mut app = app_with(api, "http://localhost:8000/");

        app.push_search_char('1');
        app.push_search_char('2');
        assert_eq!(app.directory.filtered_len(), 1);

        app.pop_search_char();
        assert_eq!(app.directory.search_term(), "1");
        assert_eq!(app.directory.filtered_len(), 11);

        app.clear_search();
        app.toggle_accelerated_vesting();
        assert_eq!(app.directory.filtered_len(), 10);
    }
}
