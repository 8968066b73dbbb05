use vizlegend::models::{ChatResponse, TraceKind, parse_chart_payload};
use vizlegend::viz::derive;

#[test]
fn visualization_is_pulled_from_chat_response() {
    let body = r#"{
        "response": "Here is the breakdown.",
        "chat_history": [
            {"role": "user", "content": "show sales by region as a pie"},
            {"role": "bot", "content": "Here is the breakdown."}
        ],
        "visualization": {
            "data": [{"type": "pie", "labels": ["a", "b"], "values": [1, 3]}],
            "layout": {"title": {"text": "Sales"}}
        }
    }"#;
    let resp: ChatResponse = serde_json::from_str(body).unwrap();
    assert_eq!(resp.chat_history.len(), 2);

    let spec = parse_chart_payload(body).unwrap().expect("chart present");
    let d = derive(&spec).unwrap();
    assert_eq!(d.primary_kind, TraceKind::Pie);
    assert_eq!(d.legend[1].percent, Some(75.0));
}

#[test]
fn malformed_transcript_does_not_discard_chart() {
    let body = r#"{
        "response": "ok",
        "chat_history": [{"role": "bot", "content": null}, "stray"],
        "visualization": {"data": [{"type": "pie", "labels": ["a"], "values": [1]}]}
    }"#;
    let spec = parse_chart_payload(body).unwrap().expect("chart present");
    let d = derive(&spec).unwrap();
    assert_eq!(d.legend.len(), 1);
    assert_eq!(d.legend[0].percent, Some(100.0));
}

#[test]
fn missing_visualization_means_no_chart() {
    let body = r#"{"response": "No chart needed.", "chat_history": []}"#;
    assert!(parse_chart_payload(body).unwrap().is_none());
}

#[test]
fn empty_traces_means_no_chart() {
    let spec = parse_chart_payload(r#"{"data": [], "layout": {}}"#)
        .unwrap()
        .unwrap();
    assert!(derive(&spec).is_none());
}

#[test]
fn invalid_json_is_an_error() {
    let err = parse_chart_payload("{not json").unwrap_err();
    assert!(format!("{err:#}").contains("decode json"));
}
