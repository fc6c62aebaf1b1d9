use crate::directory::filter::Filters;
use crate::directory::pagination::{page_bounds, page_numbers, parse_page, PageSize};
use crate::directory::Endpoint;
use crate::domain::{ChoiceMap, OrgId, Organization, OrganizationDetail};
use crate::error::FetchError;
use crate::format::{format_percent, format_score};
use crate::ports::LocationController;
use tracing::{debug, error, warn};

pub const PAGE_PARAM: &str = "page";

pub const NO_MATCHES_MESSAGE: &str = "There are no organizations that match the selected filters.";

/// Everything the directory table owns.
///
/// Mutated only through the transition methods below; each returns the
/// request (if any) the host has to perform next.
#[derive(Debug, Clone)]
pub struct DirectoryState {
    organizations: Vec<Organization>,
    filtered: Vec<usize>,
    funding_round_choices: ChoiceMap,
    rto_policy_choices: ChoiceMap,
    current_page: usize,
    page_size: PageSize,
    filters: Filters,
    selected: Option<OrgId>,
    popup_visible: bool,
    pending_detail: Option<OrgId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageButton {
    pub number: usize,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: OrgId,
    pub ranking: String,
    pub name: String,
    pub link: String,
    pub avg_score: String,
    pub funding_round: String,
    pub rto_policy: String,
    pub profile_completeness: String,
}

/// Render-ready snapshot of the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryView {
    pub search_term: String,
    pub accelerated_vesting_only: bool,
    pub current_page: usize,
    pub pages: Vec<PageButton>,
    pub rows: Vec<RowView>,
    pub total_matches: usize,
    pub no_matches: bool,
}

impl DirectoryState {
    pub fn new(
        organizations: Vec<Organization>,
        page_size: PageSize,
        location: &impl LocationController,
    ) -> Self {
        let current_page = parse_page(location.query_param(PAGE_PARAM).as_deref());
        let filtered = (0..organizations.len()).collect();

        Self {
            organizations,
            filtered,
            funding_round_choices: ChoiceMap::new(),
            rto_policy_choices: ChoiceMap::new(),
            current_page,
            page_size,
            filters: Filters::default(),
            selected: None,
            popup_visible: false,
            pending_detail: None,
        }
    }

    /// Requests to issue once the directory is on screen.
    pub const fn mount(&self) -> [Endpoint; 2] {
        [Endpoint::FundingRoundChoices, Endpoint::RtoPolicyChoices]
    }

    pub fn receive_funding_round_choices(&mut self, result: Result<ChoiceMap, FetchError>) {
        match result {
            Ok(choices) => self.funding_round_choices = choices,
            Err(e) => error!("Error fetching funding round choices: {e}"),
        }
    }

    pub fn receive_rto_policy_choices(&mut self, result: Result<ChoiceMap, FetchError>) {
        match result {
            Ok(choices) => self.rto_policy_choices = choices,
            Err(e) => error!("Error fetching RTO policy choices: {e}"),
        }
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.filters.search_term = term.into();
        self.apply_filters();
    }

    pub fn set_accelerated_vesting(&mut self, only: bool) {
        self.filters.accelerated_vesting_only = only;
        self.apply_filters();
    }

    pub fn toggle_accelerated_vesting(&mut self) {
        self.set_accelerated_vesting(!self.filters.accelerated_vesting_only);
    }

    // The current page is left alone on purpose: a page that falls past the
    // end of the new result set renders empty.
    fn apply_filters(&mut self) {
        self.filtered = self.filters.apply(&self.organizations);
        debug!(
            matches = self.filtered.len(),
            page = self.current_page,
            "directory filters applied"
        );
    }

    pub fn change_page(&mut self, page: usize, location: &mut impl LocationController) {
        self.current_page = page;
        location.push_query_param(PAGE_PARAM, &page.to_string());
    }

    /// Selects a row. Returns the detail request to perform when the
    /// organization has not been enriched yet.
    pub fn activate_row(&mut self, id: OrgId) -> Option<Endpoint> {
        let Some(org) = self.organization(id) else {
            warn!(id, "activated an organization that is not in the directory");
            return None;
        };

        if org.has_detail() {
            self.pending_detail = None;
            self.open_popup(id);
            return None;
        }

        self.pending_detail = Some(id);
        Some(Endpoint::OrganizationDetail(id))
    }

    pub fn receive_organization_detail(
        &mut self,
        id: OrgId,
        result: Result<OrganizationDetail, FetchError>,
    ) {
        match result {
            Ok(detail) => {
                if let Some(org) = self.organizations.iter_mut().find(|org| org.id == id) {
                    org.merge_detail(detail);
                }
            }
            Err(e) => error!("Error fetching organization details: {e}"),
        }

        if self.pending_detail == Some(id) {
            self.pending_detail = None;
            self.open_popup(id);
        } else {
            debug!(id, "ignoring detail response that is no longer pending");
        }
    }

    fn open_popup(&mut self, id: OrgId) {
        self.selected = Some(id);
        self.popup_visible = true;
    }

    pub fn close_popup(&mut self) {
        self.selected = None;
        self.popup_visible = false;
    }

    pub fn organizations(&self) -> &[Organization] {
        &self.organizations
    }

    pub fn organization(&self, id: OrgId) -> Option<&Organization> {
        self.organizations.iter().find(|org| org.id == id)
    }

    pub fn filtered(&self) -> impl Iterator<Item = &Organization> + '_ {
        self.filtered.iter().map(|&index| &self.organizations[index])
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    pub fn page_rows(&self) -> Vec<&Organization> {
        self.filtered[page_bounds(self.current_page, self.page_size, self.filtered.len())]
            .iter()
            .map(|&index| &self.organizations[index])
            .collect()
    }

    pub fn page_numbers(&self) -> Vec<usize> {
        page_numbers(self.filtered.len(), self.page_size)
    }

    pub const fn current_page(&self) -> usize {
        self.current_page
    }

    pub const fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn search_term(&self) -> &str {
        &self.filters.search_term
    }

    pub const fn accelerated_vesting_only(&self) -> bool {
        self.filters.accelerated_vesting_only
    }

    pub const fn funding_round_choices(&self) -> &ChoiceMap {
        &self.funding_round_choices
    }

    pub const fn rto_policy_choices(&self) -> &ChoiceMap {
        &self.rto_policy_choices
    }

    pub fn funding_round_label(&self, code: &str) -> &str {
        self.funding_round_choices.get(code).map_or("", String::as_str)
    }

    pub fn rto_policy_label(&self, code: &str) -> &str {
        self.rto_policy_choices.get(code).map_or("", String::as_str)
    }

    pub const fn popup_visible(&self) -> bool {
        self.popup_visible
    }

    pub const fn pending_detail(&self) -> Option<OrgId> {
        self.pending_detail
    }

    pub fn selected_organization(&self) -> Option<&Organization> {
        self.selected.and_then(|id| self.organization(id))
    }

    pub fn view(&self) -> DirectoryView {
        let rows = self
            .page_rows()
            .into_iter()
            .map(|org| RowView {
                id: org.id,
                ranking: org.ranking.to_string(),
                name: org.name.clone(),
                link: format!("/organization/{}", org.id),
                avg_score: format_score(org.avg_score),
                funding_round: self.funding_round_label(&org.funding_round).to_string(),
                rto_policy: self.rto_policy_label(&org.rto_policy).to_string(),
                profile_completeness: format_percent(org.profile_completeness),
            })
            .collect();

        let pages = self
            .page_numbers()
            .into_iter()
            .map(|number| PageButton {
                number,
                active: number == self.current_page,
            })
            .collect();

        DirectoryView {
            search_term: self.filters.search_term.clone(),
            accelerated_vesting_only: self.filters.accelerated_vesting_only,
            current_page: self.current_page,
            pages,
            rows,
            total_matches: self.filtered.len(),
            no_matches: self.filtered.is_empty(),
        }
    }
}
