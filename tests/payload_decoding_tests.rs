use certstat::ChartError;
use certstat::stats::{MetricKind, MetricValue, StatisticsBundle};
use serde_json::json;

#[test]
fn numeric_leaves_accept_numbers_strings_and_null() {
    let bundle = StatisticsBundle::from_json_value(json!({
        "years": [2022, "2023", null, "  "],
        "sessions": [{
            "key": 1,
            "series": {
                "applicants": [10, "20", null, "n/a", true]
            },
            "metrics": {
                "2023": { "applicants": "1,000", "passers": " 12 ", "pass_rate": 33.3 }
            }
        }]
    }))
    .expect("lenient bundle");

    assert_eq!(bundle.years, vec!["2022", "2023"]);
    let session = bundle.session("1").expect("numeric key coerced to string");
    assert_eq!(
        session.series.applicants,
        vec![Some(10.0), Some(20.0), None, None, None]
    );

    let metrics = session.metrics.get("2023").expect("year metrics");
    assert_eq!(metrics.applicants, None);
    assert_eq!(metrics.metric(MetricKind::Passers), Some(MetricValue::Count(12.0)));
    assert_eq!(metrics.metric(MetricKind::PassRate), Some(MetricValue::Rate(33.3)));
}

#[test]
fn malformed_records_are_dropped_individually() {
    let bundle = StatisticsBundle::from_json_value(json!({
        "years": ["2023"],
        "sessions": [
            { "key": "s1" },
            { "series": {} },
            "not-an-object",
            { "key": "", "series": {} },
            { "key": "s2", "series": "broken", "metrics": [] }
        ],
        "tagComparisons": [
            { "id": "t1", "name": "보안", "sessions": [
                { "key": "s1", "years": ["2023"], "metrics": {
                    "2023": [
                        { "title": "A", "isPrimary": "true", "applicants": 5 },
                        42,
                        { "title": "B", "isPrimary": 0, "applicants": "7" }
                    ],
                    "2024": "broken"
                }},
                { "label": "no key" }
            ]},
            { "name": "missing id" }
        ]
    }))
    .expect("lenient bundle");

    let keys: Vec<&str> = bundle.sessions.iter().map(|s| s.key.as_str()).collect();
    assert_eq!(keys, vec!["s1", "s2"]);
    assert!(bundle.sessions[1].series.applicants.is_empty());
    assert!(bundle.sessions[1].metrics.is_empty());

    assert_eq!(bundle.tag_comparisons.len(), 1);
    let tag = bundle.tag("t1").expect("tag");
    assert_eq!(tag.sessions.len(), 1);

    let session = tag.session("s1").expect("tag session");
    let peers = session.peers("2023");
    assert_eq!(peers.len(), 2);
    assert!(peers[0].is_primary);
    assert!(!peers[1].is_primary);
    assert_eq!(peers[1].applicants, Some(7.0));
    assert!(session.peers("2024").is_empty());
    assert!(session.peers("1999").is_empty());
}

#[test]
fn missing_sections_default_to_empty() {
    let bundle = StatisticsBundle::from_json_str("{}").expect("empty object is valid");
    assert!(bundle.years.is_empty());
    assert!(bundle.sessions.is_empty());
    assert!(bundle.tag_comparisons.is_empty());
    assert_eq!(bundle.latest_year(), None);
}

#[test]
fn tag_defaults_and_labels_are_read() {
    let bundle = StatisticsBundle::from_json_str(
        r#"{
            "years": ["2022", "2023"],
            "tagComparisons": [{
                "id": "t1",
                "name": "정보보안",
                "defaultSessionKey": "s2",
                "defaultYear": 2023,
                "sessions": [
                    { "key": "s1", "label": "1회" },
                    { "key": "s2" }
                ]
            }]
        }"#,
    )
    .expect("bundle");

    let tag = bundle.tag("t1").expect("tag");
    assert_eq!(tag.default_session_key.as_deref(), Some("s2"));
    assert_eq!(tag.default_year.as_deref(), Some("2023"));
    assert_eq!(tag.sessions[0].display_label(), "1회");
    assert_eq!(tag.sessions[1].display_label(), "s2");
    assert_eq!(bundle.latest_year(), Some("2023"));
}

#[test]
fn non_json_payload_is_a_payload_error() {
    let err = StatisticsBundle::from_json_str("<html>oops</html>").expect_err("must fail");
    assert!(matches!(err, ChartError::Payload(_)));

    let err = StatisticsBundle::from_json_str("\"ok\"").expect_err("string is not a bundle");
    assert!(matches!(err, ChartError::Payload(_)));
}
