//! End-to-end tests of record collection and chart layout on benchmark logs.
//!
//! The logs mirror what the message-broker benchmark binaries print: one run
//! per line, target name and throughput mixed in with the run parameters.

use throughput_chart::{
    Error, GroupedBarLayout, LayoutConfig, RecordCollector, RecordError, THROUGHPUT_KEY, collect,
    layout,
};

// =============================================================================
// Helper functions
// =============================================================================

const SCENARIO: &str = "\
Id = tokio, Throughput (messages/sec) = 100, QoS = 0
Id = smol, Throughput (messages/sec) = 200, QoS = 0
Id = tokio, Throughput (messages/sec) = 150, QoS = 1
";

/// A realistic log: two payload sizes, two window sizes, three targets.
fn broker_log() -> String {
    let mut log = String::new();
    for payload in [100, 1024] {
        for window in [10, 100] {
            for (target, base) in [("tokio", 90_000), ("smol", 85_000), ("async-std", 80_000)] {
                log.push_str(&format!(
                    "Id = {target}, Total = 1000000, Payload size (bytes) = {payload}, \
                     Flow control window len = {window}, Throughput (messages/sec) = {}\n",
                    base + payload + window
                ));
            }
        }
    }
    log
}

fn assert_close(left: f64, right: f64) {
    assert!((left - right).abs() < 1e-9, "{left} != {right}");
}

// =============================================================================
// Collection
// =============================================================================

#[test]
fn test_concrete_scenario() {
    let collection = collect(SCENARIO.lines()).unwrap();
    assert_eq!(collection.labels, ["QoS = 0", "QoS = 1"]);
    assert_eq!(collection.series.len(), 2);
    assert_eq!(collection.series["tokio"], [100, 150]);
    assert_eq!(collection.series["smol"], [200]);
}

#[test]
fn test_concrete_scenario_layout_mismatch() {
    let collection = collect(SCENARIO.lines()).unwrap();
    let err = collection.layout(LayoutConfig::default()).unwrap_err();
    assert_eq!(
        err,
        Error::ValueCountMismatch {
            target: "smol".into(),
            labels: 2,
            values: 1,
        }
    );
}

#[test]
fn test_empty_input() {
    let collection = collect("".lines()).unwrap();
    assert!(collection.labels.is_empty());
    assert!(collection.series.is_empty());
}

#[test]
fn test_labels_match_distinct_parameter_combinations() {
    let log = broker_log();
    let collection = collect(log.lines()).unwrap();
    assert_eq!(collection.labels.len(), 4);
    assert_eq!(
        collection.labels[0],
        "Total = 1000000\nPayload size (bytes) = 100\nFlow control window len = 10"
    );
    assert_eq!(
        collection.labels[3],
        "Total = 1000000\nPayload size (bytes) = 1024\nFlow control window len = 100"
    );
}

#[test]
fn test_series_follow_line_order() {
    let log = broker_log();
    let collection = collect(log.lines()).unwrap();
    for values in collection.series.values() {
        assert_eq!(values.len(), 4);
    }
    assert_eq!(
        collection.series["smol"],
        [85_110, 85_200, 86_034, 86_124]
    );
    let targets: Vec<&str> = collection.series.keys().map(String::as_str).collect();
    assert_eq!(targets, ["tokio", "smol", "async-std"]);
}

#[test]
fn test_collection_is_deterministic() {
    let log = broker_log();
    let first = collect(log.lines()).unwrap();
    let second = collect(log.lines()).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.labels, second.labels);
}

#[test]
fn test_missing_id_aborts_collection() {
    let err = collect([
        "Id = tokio, Throughput (messages/sec) = 100, QoS = 0",
        "Throughput (messages/sec) = 100, QoS = 0",
    ])
    .unwrap_err();
    assert_eq!(
        err,
        Error::MalformedRecord {
            line: 2,
            source: RecordError::MissingField("Id"),
        }
    );
}

#[test]
fn test_missing_throughput_aborts_collection() {
    let err = collect(["Id = tokio, QoS = 0"]).unwrap_err();
    assert_eq!(
        err,
        Error::MalformedRecord {
            line: 1,
            source: RecordError::MissingField(THROUGHPUT_KEY),
        }
    );
}

#[test]
fn test_unparsable_field_aborts_collection() {
    let err = collect(["Id = tokio, Throughput (messages/sec) = 1, QoS: 0"]).unwrap_err();
    assert!(matches!(
        err,
        Error::MalformedRecord {
            line: 1,
            source: RecordError::InvalidField(_),
        }
    ));
    assert_eq!(
        err.to_string(),
        "Malformed record on line 1: Field `QoS: 0` is not a `key = value` pair"
    );
}

#[test]
fn test_windows_line_endings() {
    let collection = collect("Id = a, Throughput (messages/sec) = 3, X = y\r\n".lines()).unwrap();
    assert_eq!(collection.labels, ["X = y"]);
    assert_eq!(collection.series["a"], [3]);
}

// =============================================================================
// Layout
// =============================================================================

#[test]
fn test_full_layout_of_broker_log() {
    let log = broker_log();
    let collection = collect(log.lines()).unwrap();
    let config = LayoutConfig::default();
    let chart = collection.layout(config).unwrap();

    assert_eq!(chart.target_count(), 3);
    assert_eq!(
        chart.legend().collect::<Vec<_>>(),
        ["tokio", "smol", "async-std"]
    );

    let positions = chart.label_positions();
    for group in chart.groups() {
        assert_eq!(group.bars.len(), 4);
        for bar in &group.bars {
            assert_close(
                bar.offset,
                positions[bar.label_index] + group.target_index as f64 * config.band_height,
            );
            assert_close(bar.thickness, config.band_height);
        }
    }
}

#[test]
fn test_bands_never_overlap() {
    let log = broker_log();
    let collection = collect(log.lines()).unwrap();
    let chart = collection.layout(LayoutConfig::default()).unwrap();

    let mut spans: Vec<(f64, f64)> = chart
        .groups()
        .iter()
        .flat_map(|group| group.bars.iter())
        .map(|bar| {
            let ((_, lo), (_, hi)) = bar.bounds();
            (lo, hi)
        })
        .collect();
    spans.sort_by(|a, b| a.0.total_cmp(&b.0));
    for pair in spans.windows(2) {
        assert!(pair[0].1 <= pair[1].0 + 1e-12, "{pair:?} overlap");
    }
}

#[test]
fn test_incremental_targets() {
    let mut chart = GroupedBarLayout::new(
        vec!["QoS = 0".to_owned(), "QoS = 1".to_owned()],
        LayoutConfig::default(),
    );
    let a = chart.add_target("A", &[10, 20]).unwrap().clone();
    let b = chart.add_target("B", &[30, 40]).unwrap().clone();
    for (bar_a, bar_b) in a.bars.iter().zip(&b.bars) {
        assert_close(bar_a.offset, chart.label_positions()[bar_a.label_index]);
        assert_close(bar_b.offset, bar_a.offset + 0.025);
    }
    assert_eq!(
        chart.add_target("A", &[1, 2]).unwrap_err(),
        Error::DuplicateTarget("A".into())
    );
}

#[test]
fn test_explicit_target_order() {
    let log = broker_log();
    let collection = collect(log.lines()).unwrap();
    let chart = layout(
        &collection.labels,
        &collection.series,
        ["async-std", "tokio"],
        LayoutConfig::default(),
    )
    .unwrap();
    assert_eq!(chart.legend().collect::<Vec<_>>(), ["async-std", "tokio"]);
    assert_eq!(chart.groups()[0].bars[0].value, 80_110);
}

#[test]
fn test_incremental_collection_matches_batch() {
    let log = broker_log();
    let mut collector = RecordCollector::new();
    for line in log.lines() {
        collector.push_line(line).unwrap();
    }
    assert_eq!(collector.finish(), collect(log.lines()).unwrap());
}
