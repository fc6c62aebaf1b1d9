//! State management for the organization directory.
//!
//! Everything in this crate is rendering-agnostic: the terminal and web
//! clients drive [`DirectoryState`] and [`DetailPopup`] through their
//! transition functions, perform the returned [`Endpoint`] requests, and
//! feed the results back in.

pub mod bootstrap;
pub mod directory;
pub mod domain;
pub mod error;
pub mod format;
pub mod popup;
pub mod ports;

pub use directory::{DirectoryState, DirectoryView, Endpoint, PageSize, RowView};
pub use domain::{
    ChoiceMap, FundingRound, OrgId, Organization, OrganizationDetail, OrganizationType, RtoPolicy,
    ScoreDetail,
};
pub use error::{BootstrapError, FetchError};
pub use popup::{
    ClickEvent, DetailPopup, Key, PopupElement, PopupView, Propagation, ScoreRow, ScoresView,
};
pub use ports::{
    ActiveElement, FocusController, KeyboardHost, ListenerId, ListenerSet, LocationController,
};
