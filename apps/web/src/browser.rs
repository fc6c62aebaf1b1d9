use crate::app::{Fetched, SearchFocus};
use org_directory_core::bootstrap::{CONTAINER_ELEMENT_ID, DATA_ELEMENT_ID};
use org_directory_core::{ActiveElement, Endpoint, FetchError, FocusController, LocationController};
use serde::de::DeserializeOwned;
use tracing::{debug, error};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Element, HtmlElement, Request, RequestInit, RequestMode, Response, Url, UrlSearchParams,
};

/// Text of the embedded organization payload, and whether the list
/// container is on the page.
pub fn embedded_payload() -> (Option<String>, bool) {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return (None, false);
    };

    let payload = document
        .get_element_by_id(DATA_ELEMENT_ID)
        .and_then(|element| element.text_content());
    let container = document.get_element_by_id(CONTAINER_ELEMENT_ID).is_some();
    (payload, container)
}

/// The page's address bar.
#[derive(Debug, Default)]
pub struct WebLocation;

impl LocationController for WebLocation {
    fn query_param(&self, key: &str) -> Option<String> {
        let search = web_sys::window()?.location().search().ok()?;
        UrlSearchParams::new_with_str(&search).ok()?.get(key)
    }

    fn push_query_param(&mut self, key: &str, value: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Ok(url) = window.location().href().and_then(|href| Url::new(&href)) else {
            return;
        };
        url.search_params().set(key, value);

        let href = url.href();
        let pushed = window
            .history()
            .and_then(|history| history.push_state_with_url(&JsValue::NULL, "", Some(&href)));
        if let Err(e) = pushed {
            error!("Failed to update history: {e:?}");
        }
    }
}

/// Virtual search box focus plus the document's real active element.
#[derive(Debug, Default)]
pub struct WebFocus {
    search_focused: bool,
}

fn document_active_element() -> Option<Element> {
    web_sys::window()?.document()?.active_element()
}

impl FocusController for WebFocus {
    fn active_element(&self) -> ActiveElement {
        if self.search_focused {
            return ActiveElement::Focusable;
        }
        match document_active_element() {
            None => ActiveElement::None,
            Some(element)
                if element.is_instance_of::<HtmlElement>() && element.tag_name() != "BODY" =>
            {
                ActiveElement::Focusable
            }
            Some(_) => ActiveElement::Inert,
        }
    }

    fn blur_active_element(&mut self) {
        self.search_focused = false;
        if let Some(element) =
            document_active_element().and_then(|element| element.dyn_into::<HtmlElement>().ok())
        {
            if let Err(e) = element.blur() {
                debug!("blur failed: {e:?}");
            }
        }
    }
}

impl SearchFocus for WebFocus {
    fn focus_search(&mut self) {
        self.search_focused = true;
    }

    fn search_focused(&self) -> bool {
        self.search_focused
    }
}

fn transport_error(value: JsValue) -> FetchError {
    FetchError::Transport(format!("{value:?}"))
}

/// GETs a same-origin JSON endpoint.
pub async fn fetch_json<T: DeserializeOwned>(path: &str) -> Result<T, FetchError> {
    let window =
        web_sys::window().ok_or_else(|| FetchError::Transport("no window".to_string()))?;

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::SameOrigin);

    let request = Request::new_with_str_and_init(path, &opts).map_err(transport_error)?;
    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(transport_error)?
        .dyn_into()
        .map_err(transport_error)?;

    if !response.ok() {
        return Err(FetchError::Status(response.status()));
    }

    let json = JsFuture::from(response.json().map_err(transport_error)?)
        .await
        .map_err(transport_error)?;
    serde_wasm_bindgen::from_value(json).map_err(|e| FetchError::Decode(e.to_string()))
}

pub async fn perform(endpoint: Endpoint) -> Fetched {
    let path = endpoint.path();
    debug!(%path, "fetching");

    match endpoint {
        Endpoint::FundingRoundChoices => Fetched::FundingRoundChoices(fetch_json(&path).await),
        Endpoint::RtoPolicyChoices => Fetched::RtoPolicyChoices(fetch_json(&path).await),
        Endpoint::OrganizationDetail(id) => {
            Fetched::OrganizationDetail(id, fetch_json(&path).await)
        }
        Endpoint::OrganizationScores(id) => {
            Fetched::OrganizationScores(id, fetch_json(&path).await)
        }
    }
}
