//! Reading the organization list the server embeds in the page.

use crate::domain::Organization;
use crate::error::BootstrapError;
use tracing::error;

pub const DATA_ELEMENT_ID: &str = "organization-data";
pub const CONTAINER_ELEMENT_ID: &str = "organization-list";

pub fn parse_organizations(payload: &str) -> Result<Vec<Organization>, BootstrapError> {
    Ok(serde_json::from_str(payload)?)
}

/// Returns the organizations to mount, or `None` when there is nothing to
/// mount into. A malformed payload is logged, never propagated.
pub fn bootstrap(payload: Option<&str>, container_present: bool) -> Option<Vec<Organization>> {
    let payload = payload.filter(|text| !text.is_empty())?;

    match parse_organizations(payload) {
        Ok(organizations) => container_present.then_some(organizations),
        Err(e) => {
            error!("Error parsing organization data: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"[
        {"id":1,"name":"Org 1","ranking":1,"avg_score":4.5,"funding_round":"S",
         "rto_policy":"R","profile_completeness":80,"accelerated_vesting":true},
        {"id":2,"name":"Org 2","ranking":2,"avg_score":3.5,"funding_round":"A",
         "rto_policy":"H","profile_completeness":70,"accelerated_vesting":false}
    ]"#;

    #[test]
    fn parses_the_embedded_payload() {
        let organizations = bootstrap(Some(PAYLOAD), true).unwrap();
        assert_eq!(organizations.len(), 2);
        assert_eq!(organizations[1].name, "Org 2");
    }

    #[test]
    fn missing_data_or_container_is_a_no_op() {
        assert!(bootstrap(None, true).is_none());
        assert!(bootstrap(Some(""), true).is_none());
        assert!(bootstrap(Some(PAYLOAD), false).is_none());
    }

    #[test]
    fn malformed_payload_is_swallowed() {
        assert!(bootstrap(Some("[{\"id\": 1,"), true).is_none());
        assert!(parse_organizations("{}").is_err());
    }
}
