//! The organization detail popup.
//!
//! The parent decides which organization is shown and whether the popup is
//! visible; the popup owns its score request, its Escape listener and the
//! dismissal gestures.

use crate::directory::Endpoint;
use crate::domain::{FundingRound, OrgId, Organization, OrganizationType, RtoPolicy, ScoreDetail};
use crate::error::FetchError;
use crate::format::{format_percent, format_score, yes_no};
use crate::ports::{clear_focus, FocusController, KeyboardHost, ListenerId};
use tracing::{debug, error};

pub const OVERALL_SCORE_LABEL: &str = "Overall Score";
pub const LOADING_SCORES_LABEL: &str = "Loading scores...";

#[derive(Debug, Clone, PartialEq)]
enum ScoresState {
    Idle,
    Loading(OrgId),
    Loaded(OrgId, Vec<ScoreDetail>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
    Char(char),
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupElement {
    Overlay,
    Content,
    CloseButton,
}

/// A click as seen by the overlay's handler: `target` is where the click
/// landed, `current_target` is the element whose handler is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickEvent {
    pub target: PopupElement,
    pub current_target: PopupElement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    Continue,
    Stop,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreRow {
    pub name: String,
    pub score: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoresView {
    Loading,
    Rows(Vec<ScoreRow>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupView {
    pub name: String,
    pub url: Option<String>,
    pub org_type: String,
    pub funding_round: String,
    pub rto_policy: String,
    pub gives_ratings: Option<&'static str>,
    pub accelerated_vesting: &'static str,
    pub ranking: String,
    pub profile_completeness: String,
    pub scores: ScoresView,
}

#[derive(Debug)]
pub struct DetailPopup {
    scores: ScoresState,
    escape_listener: Option<ListenerId>,
    visible: bool,
}

impl Default for DetailPopup {
    fn default() -> Self {
        Self::new()
    }
}

impl DetailPopup {
    pub const fn new() -> Self {
        Self {
            scores: ScoresState::Idle,
            escape_listener: None,
            visible: false,
        }
    }

    /// Reconciles the popup with what the parent wants on screen.
    ///
    /// Returns the score request to perform when the organization came
    /// without scores and none has been requested for it during the
    /// current showing.
    pub fn sync(
        &mut self,
        organization: Option<&Organization>,
        visible: bool,
        keyboard: &mut impl KeyboardHost,
    ) -> Option<Endpoint> {
        self.visible = visible;

        if visible {
            if self.escape_listener.is_none() {
                self.escape_listener = Some(keyboard.add_keydown_listener());
            }
        } else {
            if let Some(listener) = self.escape_listener.take() {
                keyboard.remove_keydown_listener(listener);
            }
            // Every showing loads its scores afresh
            self.scores = ScoresState::Idle;
        }

        let org = organization.filter(|_| visible)?;
        if org.known_scores().is_some() {
            return None;
        }

        match &self.scores {
            ScoresState::Loading(id) | ScoresState::Loaded(id, _) if *id == org.id => None,
            _ => {
                self.scores = ScoresState::Loading(org.id);
                Some(Endpoint::OrganizationScores(org.id))
            }
        }
    }

    pub fn receive_scores(&mut self, id: OrgId, result: Result<Vec<ScoreDetail>, FetchError>) {
        if self.scores != ScoresState::Loading(id) {
            debug!(id, "ignoring score response that is no longer pending");
            return;
        }

        let scores = result.unwrap_or_else(|e| {
            error!("Error fetching organization scores: {e}");
            Vec::new()
        });
        self.scores = ScoresState::Loaded(id, scores);
    }

    /// Detaches the Escape listener when the popup leaves the view.
    pub fn teardown(&mut self, keyboard: &mut impl KeyboardHost) {
        if let Some(listener) = self.escape_listener.take() {
            keyboard.remove_keydown_listener(listener);
        }
        self.scores = ScoresState::Idle;
        self.visible = false;
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.scores, ScoresState::Loading(_))
    }

    pub const fn escape_listener(&self) -> Option<ListenerId> {
        self.escape_listener
    }

    pub fn click_close_button(
        &mut self,
        focus: &mut impl FocusController,
        on_close: impl FnOnce(),
    ) -> Propagation {
        if self.visible {
            Self::dismiss(focus, on_close);
        }
        Propagation::Stop
    }

    /// Dismisses only for clicks that land on the overlay itself.
    pub fn click_overlay(
        &mut self,
        event: ClickEvent,
        focus: &mut impl FocusController,
        on_close: impl FnOnce(),
    ) -> bool {
        let on_overlay =
            event.target == PopupElement::Overlay && event.current_target == PopupElement::Overlay;
        if !self.visible || !on_overlay {
            return false;
        }

        Self::dismiss(focus, on_close);
        true
    }

    /// Document-level keydown. Only Escape dismisses, and only while visible.
    pub fn key_down(
        &mut self,
        key: Key,
        focus: &mut impl FocusController,
        on_close: impl FnOnce(),
    ) -> bool {
        if key != Key::Escape || !self.visible || self.escape_listener.is_none() {
            return false;
        }

        Self::dismiss(focus, on_close);
        true
    }

    fn dismiss(focus: &mut impl FocusController, on_close: impl FnOnce()) {
        clear_focus(focus);
        on_close();
    }

    pub fn view(&self, organization: Option<&Organization>, visible: bool) -> Option<PopupView> {
        let org = organization.filter(|_| visible)?;

        Some(PopupView {
            name: org.name.clone(),
            url: org.url.clone(),
            org_type: org
                .org_type
                .as_deref()
                .and_then(OrganizationType::parse)
                .map_or_else(String::new, |kind| kind.label().to_string()),
            funding_round: FundingRound::parse(&org.funding_round)
                .map_or_else(String::new, |round| round.label().to_string()),
            rto_policy: RtoPolicy::parse(&org.rto_policy)
                .map_or_else(String::new, |policy| policy.label().to_string()),
            gives_ratings: org.gives_ratings.map(yes_no),
            accelerated_vesting: yes_no(org.accelerated_vesting),
            ranking: org.ranking.to_string(),
            profile_completeness: format_percent(org.profile_completeness),
            scores: self.scores_view(org),
        })
    }

    fn scores_view(&self, org: &Organization) -> ScoresView {
        let fetched: &[ScoreDetail] = match &self.scores {
            ScoresState::Loading(id) if *id == org.id => return ScoresView::Loading,
            ScoresState::Loaded(id, scores) if *id == org.id => scores.as_slice(),
            _ => &[],
        };

        let scores = org.known_scores().unwrap_or(fetched);
        if scores.is_empty() {
            return ScoresView::Rows(vec![ScoreRow {
                name: OVERALL_SCORE_LABEL.to_string(),
                score: format_score(org.avg_score),
            }]);
        }

        ScoresView::Rows(
            scores
                .iter()
                .map(|score| ScoreRow {
                    name: score.type_name.clone(),
                    score: format_score(score.avg_score),
                })
                .collect(),
        )
    }
}
