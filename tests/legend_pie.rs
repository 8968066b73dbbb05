use serde_json::json;
use vizlegend::models::{ChartSpec, Trace};
use vizlegend::viz::{GUARDRAIL, PALETTE, derive, legend_lines};

#[test]
fn pie_duplicates_end_to_end() {
    let spec = ChartSpec::new(vec![Trace::pie(["x", "x", "y"], [5, 5, 10])]);
    let d = derive(&spec).unwrap();

    assert!(!d.show_native_legend());
    assert_eq!(d.legend.len(), 2);
    assert_eq!(d.legend[0].label, "x");
    assert_eq!(d.legend[0].value, 10.0);
    assert_eq!(d.legend[0].percent, Some(50.0));
    assert_eq!(d.legend[0].color, PALETTE[0]);
    assert_eq!(d.legend[1].label, "y");
    assert_eq!(d.legend[1].value, 10.0);
    assert_eq!(d.legend[1].percent, Some(50.0));
    assert_eq!(d.legend[1].color, PALETTE[1]);

    let trace = &d.render.traces[0].raw;
    assert_eq!(trace["labels"], json!(["x", "y"]));
    assert_eq!(trace["values"], json!([10.0, 10.0]));
    assert_eq!(trace["marker"]["colors"], json!([PALETTE[0], PALETTE[1]]));

    assert_eq!(legend_lines(&d, "en"), vec!["x: 10 (50.0%)", "y: 10 (50.0%)"]);
}

#[test]
fn pie_over_guardrail_truncates_legend_only() {
    let n = GUARDRAIL + 5;
    let labels: Vec<String> = (0..n).map(|i| format!("slice{i}")).collect();
    let spec = ChartSpec::new(vec![Trace::pie(labels, vec![1; n])]);
    let d = derive(&spec).unwrap();

    assert!(!d.show_native_legend());
    assert_eq!(d.legend.len(), GUARDRAIL);
    assert_eq!(d.legend[0].label, "slice0");
    assert_eq!(d.legend[GUARDRAIL - 1].label, format!("slice{}", GUARDRAIL - 1));
    assert_eq!(d.render.traces[0].raw["labels"].as_array().unwrap().len(), n);
    assert_eq!(
        d.render.traces[0].raw["marker"]["colors"].as_array().unwrap().len(),
        n
    );
    // Shares are relative to the full total, not the displayed subset.
    let share = d.legend[0].percent.unwrap();
    assert!((share - 100.0 / n as f64).abs() < 1e-9);
}

#[test]
fn pie_with_bad_values_coerces_to_zero() {
    let spec = ChartSpec::new(vec![Trace::pie(
        ["a", "b", "c"],
        [json!(3), json!(null), json!("n/a")],
    )]);
    let d = derive(&spec).unwrap();
    let values: Vec<f64> = d.legend.iter().map(|e| e.value).collect();
    assert_eq!(values, vec![3.0, 0.0, 0.0]);
    assert_eq!(d.legend[0].percent, Some(100.0));
    assert_eq!(d.legend[1].percent, Some(0.0));
}

#[test]
fn pie_all_zero_has_zero_shares() {
    let spec = ChartSpec::new(vec![Trace::pie(["a", "b"], [0, 0])]);
    let d = derive(&spec).unwrap();
    assert!(d.legend.iter().all(|e| e.percent == Some(0.0)));
}

#[test]
fn pie_length_mismatch_falls_back() {
    let trace = Trace::pie(["a", "b", "c"], [1, 2]);
    let d = derive(&ChartSpec::new(vec![trace.clone()])).unwrap();
    assert!(d.show_native_legend());
    assert!(d.legend.is_empty());
    assert_eq!(d.render.traces, vec![trace]);
}

#[test]
fn pie_keeps_other_fields() {
    let trace = Trace::pie(["a", "a"], [1, 1])
        .with_field("hole", 0.4)
        .with_field("name", "share");
    let d = derive(&ChartSpec::new(vec![trace])).unwrap();
    let raw = &d.render.traces[0].raw;
    assert_eq!(raw["hole"], json!(0.4));
    assert_eq!(raw["name"], json!("share"));
    assert_eq!(raw["labels"], json!(["a"]));
}

#[test]
fn pie_from_backend_json() {
    let body = r##"{
        "data": [{
            "type": "pie",
            "labels": ["North", "South", "North", "East"],
            "values": [1200000, 300000, 800000, 2500],
            "domain": {"x": [0, 1], "y": [0, 1]}
        }],
        "layout": {"title": {"text": "Revenue by region"}, "legend": {"tracegroupgap": 0}}
    }"##;
    let spec: ChartSpec = serde_json::from_str(body).unwrap();
    let d = derive(&spec).unwrap();
    let lines = legend_lines(&d, "en");
    assert_eq!(lines[0], "North: 2M (86.9%)");
    assert_eq!(lines[1], "South: 300k (13.0%)");
    assert_eq!(lines[2], "East: 3k (0.1%)");
    assert_eq!(d.render.layout, spec.layout);
}

#[test]
fn pie_explicit_colors_with_unique_labels_pass_through() {
    let trace = Trace::pie(["a", "b"], [1, 3]).with_colors(["#111111", "#222222"]);
    let d = derive(&ChartSpec::new(vec![trace])).unwrap();
    let colors: Vec<&str> = d.legend.iter().map(|e| e.color.as_str()).collect();
    assert_eq!(colors, vec!["#111111", "#222222"]);
    assert_eq!(
        d.render.traces[0].raw["marker"]["colors"],
        json!(["#111111", "#222222"])
    );
    assert_eq!(d.legend[1].percent, Some(75.0));
}

#[test]
fn pie_malformed_explicit_colors_use_palette() {
    for bad in [
        json!(["banana", "#12"]),
        json!(["#111111"]),
        json!(["#111111", 7]),
    ] {
        let mut trace = Trace::pie(["a", "b"], [1, 1]);
        trace.set_marker_field("colors", bad.clone());
        let d = derive(&ChartSpec::new(vec![trace])).unwrap();
        let colors: Vec<&str> = d.legend.iter().map(|e| e.color.as_str()).collect();
        assert_eq!(colors, vec![PALETTE[0], PALETTE[1]], "colors {bad}");
        assert_eq!(
            d.render.traces[0].raw["marker"]["colors"],
            json!([PALETTE[0], PALETTE[1]])
        );
    }
}

#[test]
fn pie_with_overflowing_total_keeps_finite_shares() {
    let spec = ChartSpec::new(vec![Trace::pie(["a", "b"], [1e308, 1e308])]);
    let d = derive(&spec).unwrap();
    for e in &d.legend {
        let share = e.percent.unwrap();
        assert!((share - 50.0).abs() < 1e-9, "share {share}");
    }
}
