use async_trait::async_trait;
use org_directory_core::bootstrap::{CONTAINER_ELEMENT_ID, DATA_ELEMENT_ID};
use org_directory_core::directory::Endpoint;
use org_directory_core::{ChoiceMap, OrgId, OrganizationDetail, ScoreDetail};
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{ApiError, DirectoryApi};

/// Talks to the directory's HTTP API.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base_url: Url,
    page_url: Url,
}

impl HttpApi {
    /// `page_url` is the directory page whose embedded data seeds the list.
    pub fn new(base_url: Url, page_url: Url) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(concat!("org-directory/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url,
            page_url,
        })
    }

    fn url_for(&self, endpoint: Endpoint) -> Result<Url, ApiError> {
        self.base_url
            .join(&endpoint.path())
            .map_err(|e| ApiError::InvalidUrl(e.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T, ApiError> {
        let url = self.url_for(endpoint)?;
        debug!(%url, "GET");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            if let Endpoint::OrganizationDetail(id) | Endpoint::OrganizationScores(id) = endpoint {
                return Err(ApiError::NotFound(id));
            }
        }
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                path: endpoint.path(),
            });
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl DirectoryApi for HttpApi {
    async fn organization_payload(&self) -> Result<Option<String>, ApiError> {
        let response = self.client.get(self.page_url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                path: self.page_url.path().to_string(),
            });
        }

        let html = response.text().await?;
        if !has_element(&html, CONTAINER_ELEMENT_ID) {
            debug!("Directory page has no #{CONTAINER_ELEMENT_ID} container");
            return Ok(None);
        }
        Ok(element_text(&html, DATA_ELEMENT_ID).map(str::to_string))
    }

    async fn funding_round_choices(&self) -> Result<ChoiceMap, ApiError> {
        self.get_json(Endpoint::FundingRoundChoices).await
    }

    async fn rto_policy_choices(&self) -> Result<ChoiceMap, ApiError> {
        self.get_json(Endpoint::RtoPolicyChoices).await
    }

    async fn organization_detail(&self, id: OrgId) -> Result<OrganizationDetail, ApiError> {
        self.get_json(Endpoint::OrganizationDetail(id)).await
    }

    async fn organization_scores(&self, id: OrgId) -> Result<Vec<ScoreDetail>, ApiError> {
        self.get_json(Endpoint::OrganizationScores(id)).await
    }
}

fn id_attribute_at(html: &str, id: &str) -> Option<usize> {
    [format!("id=\"{id}\""), format!("id='{id}'")]
        .iter()
        .find_map(|needle| html.find(needle.as_str()))
}

fn has_element(html: &str, id: &str) -> bool {
    id_attribute_at(html, id).is_some()
}

/// Text content of the first element carrying `id`, trimmed.
fn element_text<'a>(html: &'a str, id: &str) -> Option<&'a str> {
    let attribute = id_attribute_at(html, id)?;
    let tag_start = html[..attribute].rfind('<')?;
    let tag_name: String = html[tag_start + 1..]
        .chars()
        .take_while(char::is_ascii_alphanumeric)
        .collect();
    if tag_name.is_empty() {
        return None;
    }

    let content_start = attribute + html[attribute..].find('>')? + 1;
    let closing = format!("</{tag_name}");
    let content_len = html[content_start..].find(closing.as_str())?;
    Some(html[content_start..content_start + content_len].trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body>
        <div id="organization-list"></div>
        <script id="organization-data" type="application/json">
            [{"id": 1, "name": "Org 1"}]
        </script>
    </body></html>"#;

    #[test]
    fn extracts_the_embedded_payload() {
        assert!(has_element(PAGE, CONTAINER_ELEMENT_ID));
        assert_eq!(
            element_text(PAGE, DATA_ELEMENT_ID),
            Some(r#"[{"id": 1, "name": "Org 1"}]"#)
        );
    }

    #[test]
    fn missing_elements_yield_nothing() {
        assert!(!has_element("<html></html>", CONTAINER_ELEMENT_ID));
        assert_eq!(element_text("<div id='organization-list'></div>", DATA_ELEMENT_ID), None);
        assert_eq!(
            element_text("<script id='organization-data'></script>", DATA_ELEMENT_ID),
            Some("")
        );
    }

    #[test]
    fn endpoints_resolve_against_the_origin() {
        let api = HttpApi::new(
            Url::parse("http://localhost:8000/directory/").unwrap(),
            Url::parse("http://localhost:8000/directory/").unwrap(),
        )
        .unwrap();
        assert_eq!(
            api.url_for(Endpoint::OrganizationScores(7)).unwrap().as_str(),
            "http://localhost:8000/api/organizations/7/scores/"
        );
    }
}
