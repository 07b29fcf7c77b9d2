//! Catalog record types, mirroring the fields GraceDB serves.

use serde::Deserialize;

/// A superevent record as returned by `GET /superevents/{id}/`.
///
/// Only the fields the filter consumes are mapped; unknown fields in the
/// payload are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Superevent {
    /// Canonical superevent ID (e.g. `S190425z`).
    pub superevent_id: String,
    /// Catalog category, e.g. `Production` or `MDC`.
    #[serde(default)]
    pub category: Option<String>,
    /// Graceid of the preferred constituent event.
    #[serde(default)]
    pub preferred_event: Option<String>,
    /// Graceids of all constituent events.
    #[serde(default)]
    pub gw_events: Vec<String>,
    /// False-alarm rate of the preferred event, Hz.
    #[serde(default)]
    pub far: Option<f64>,
    /// GPS time of the start of the coincidence window.
    #[serde(default)]
    pub t_start: Option<f64>,
    /// GPS time of the preferred event.
    #[serde(default)]
    pub t_0: Option<f64>,
    /// GPS time of the end of the coincidence window.
    #[serde(default)]
    pub t_end: Option<f64>,
    /// Submission timestamp, server-formatted.
    #[serde(default)]
    pub created: Option<String>,
    /// Labels applied by follow-up pipelines.
    #[serde(default)]
    pub labels: Vec<String>,
}

/// Whether an ID names a mock-data-challenge superevent (`M` prefix).
/// Those have no real sky map worth fetching.
pub fn is_mock_id(event_id: &str) -> bool {
    event_id.starts_with('M')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_catalog_payload() {
        // Trimmed from a real /superevents/{id}/ response.
        let body = r#"{
            "superevent_id": "S190425z",
            "alias": [],
            "category": "Production",
            "submitter": "emfollow",
            "created": "2019-04-25 08:18:26 UTC",
            "t_start": 1240215500.011549,
            "t_0": 1240215503.011549,
            "t_end": 1240215506.011549,
            "preferred_event": "G330561",
            "gw_events": ["G330561"],
            "far": 4.538513736505966e-13,
            "labels": ["ADVOK", "GCN_PRELIM_SENT"],
            "links": {"files": "https://gracedb.ligo.org/api/superevents/S190425z/files/"}
        }"#;
        let record: Superevent = serde_json::from_str(body).unwrap();
        assert_eq!(record.superevent_id, "S190425z");
        assert_eq!(record.preferred_event.as_deref(), Some("G330561"));
        assert_eq!(record.gw_events, vec!["G330561"]);
        assert!(record.far.unwrap() < 1e-12);
        assert!(record.labels.contains(&"ADVOK".to_string()));
    }

    #[test]
    fn minimal_payload_is_enough() {
        let record: Superevent = serde_json::from_str(r#"{"superevent_id": "S200105ae"}"#).unwrap();
        assert_eq!(record.superevent_id, "S200105ae");
        assert!(record.category.is_none());
        assert!(record.gw_events.is_empty());
    }

    #[test]
    fn mock_ids_are_recognized() {
        assert!(is_mock_id("MS181101ab"));
        assert!(is_mock_id("M123456"));
        assert!(!is_mock_id("S190425z"));
        assert!(!is_mock_id("T190425"));
        assert!(!is_mock_id(""));
    }
}
