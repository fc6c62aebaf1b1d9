use crate::animation::{advance_animation_counter, AnimationMode};
use org_directory_core::directory::PageSize;
use org_directory_core::{
    ChoiceMap, DetailPopup, DirectoryState, Endpoint, FetchError, FocusController, Key, ListenerSet,
    LocationController, OrgId, Organization, OrganizationDetail, ScoreDetail,
};

/// Focus as the dashboard sees it: the virtual search box plus whatever
/// element the page itself has focused.
pub trait SearchFocus: FocusController {
    fn focus_search(&mut self);
    fn search_focused(&self) -> bool;
}

/// A finished request.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched {
    FundingRoundChoices(Result<ChoiceMap, FetchError>),
    RtoPolicyChoices(Result<ChoiceMap, FetchError>),
    OrganizationDetail(OrgId, Result<OrganizationDetail, FetchError>),
    OrganizationScores(OrgId, Result<Vec<ScoreDetail>, FetchError>),
}

/// Keys the dashboard reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Char(char),
    Backspace,
    Enter,
    Escape,
    Left,
    Right,
    Up,
    Down,
    Other,
}

impl From<Input> for Key {
    fn from(input: Input) -> Self {
        match input {
            Input::Escape => Self::Escape,
            Input::Enter => Self::Enter,
            Input::Char(ch) => Self::Char(ch),
            _ => Self::Other,
        }
    }
}

pub struct WebApp<L, F> {
    pub directory: DirectoryState,
    pub popup: DetailPopup,
    pub keyboard: ListenerSet,
    pub location: L,
    pub focus: F,
    pub selected_row: usize,
    pub spinner_counter: f64,
    last_tick: Option<f64>,
}

impl<L: LocationController, F: SearchFocus> WebApp<L, F> {
    pub fn new(
        organizations: Vec<Organization>,
        page_size: PageSize,
        location: L,
        focus: F,
    ) -> Self {
        let directory = DirectoryState::new(organizations, page_size, &location);

        Self {
            directory,
            popup: DetailPopup::new(),
            keyboard: ListenerSet::new(),
            location,
            focus,
            selected_row: 0,
            spinner_counter: 0.0,
            last_tick: None,
        }
    }

    pub fn mount(&self) -> Vec<Endpoint> {
        self.directory.mount().to_vec()
    }

    /// Applies a finished request; returns any follow-up request.
    pub fn apply(&mut self, fetched: Fetched) -> Option<Endpoint> {
        match fetched {
            Fetched::FundingRoundChoices(result) => {
                self.directory.receive_funding_round_choices(result);
                None
            }
            Fetched::RtoPolicyChoices(result) => {
                self.directory.receive_rto_policy_choices(result);
                None
            }
            Fetched::OrganizationDetail(id, result) => {
                self.directory.receive_organization_detail(id, result);
                self.sync_popup()
            }
            Fetched::OrganizationScores(id, result) => {
                self.popup.receive_scores(id, result);
                None
            }
        }
    }

    fn sync_popup(&mut self) -> Option<Endpoint> {
        self.popup.sync(
            self.directory.selected_organization(),
            self.directory.popup_visible(),
            &mut self.keyboard,
        )
    }

    /// Handles a key press; returns the request it triggered, if any.
    pub fn handle_input(&mut self, input: Input) -> Option<Endpoint> {
        if self.directory.popup_visible() {
            return self.handle_popup_input(input);
        }
        if self.focus.search_focused() {
            self.handle_search_input(input);
            return None;
        }
        self.handle_directory_input(input)
    }

    fn handle_popup_input(&mut self, input: Input) -> Option<Endpoint> {
        let directory = &mut self.directory;
        if input == Input::Char('x') {
            self.popup
                .click_close_button(&mut self.focus, || directory.close_popup());
            return self.sync_popup();
        }

        let closed = self
            .popup
            .key_down(input.into(), &mut self.focus, || directory.close_popup());
        if closed {
            self.sync_popup()
        } else {
            None
        }
    }

    fn handle_search_input(&mut self, input: Input) {
        let mut term = self.directory.search_term().to_string();
        match input {
            Input::Char(ch) => term.push(ch),
            Input::Backspace => {
                if term.pop().is_none() {
                    return;
                }
            }
            Input::Enter | Input::Escape | Input::Down => {
                self.focus.blur_active_element();
                return;
            }
            _ => return,
        }
        self.directory.set_search_term(term);
        self.selected_row = 0;
    }

    fn handle_directory_input(&mut self, input: Input) -> Option<Endpoint> {
        let page_count = self.directory.page_numbers().len();
        let current = self.directory.current_page();
        let rows = self.directory.page_rows().len();

        match input {
            Input::Char('/' | 's') => self.focus.focus_search(),
            Input::Char('v') => {
                self.directory.toggle_accelerated_vesting();
                self.selected_row = 0;
            }
            Input::Left if current > 1 => self.change_page(current - 1),
            Input::Right if current < page_count => self.change_page(current + 1),
            Input::Char(digit @ '1'..='9') => {
                let page = digit as usize - '0' as usize;
                if page <= page_count {
                    self.change_page(page);
                }
            }
            Input::Up => self.selected_row = self.selected_row.saturating_sub(1),
            Input::Down if self.selected_row + 1 < rows => self.selected_row += 1,
            Input::Enter => return self.activate_selected_row(),
            _ => {}
        }
        None
    }

    fn change_page(&mut self, page: usize) {
        self.directory.change_page(page, &mut self.location);
        self.selected_row = 0;
    }

    pub fn activate_selected_row(&mut self) -> Option<Endpoint> {
        let id = self.directory.page_rows().get(self.selected_row)?.id;
        self.directory
            .activate_row(id)
            .or_else(|| self.sync_popup())
    }

    /// Advances the loading spinner to `now_seconds`.
    pub fn tick(&mut self, now_seconds: f64) {
        let mode = if self.popup.is_loading() {
            AnimationMode::Running
        } else {
            AnimationMode::Paused
        };
        let (counter, last_tick) =
            advance_animation_counter(self.spinner_counter, self.last_tick, now_seconds, mode);
        self.spinner_counter = counter;
        self.last_tick = last_tick;
    }
}
