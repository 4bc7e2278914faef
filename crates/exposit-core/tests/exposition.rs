//! Exact text output and float formatting.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use exposit_core::{encode, format_float, MetricSnapshot, MetricValue, Registry};

/// Replace the trailing value of every `_created` sample with a fixed token.
fn mask_created(text: &str) -> String {
    text.lines()
        .map(|l| match l.split_once("_created ") {
            Some((name, v)) if !l.starts_with('#') => {
                let ts: f64 = v.parse().unwrap();
                assert!(ts > 1.0e9, "created={v}");
                format!("{name}_created <ts>")
            }
            _ => l.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
        + "\n"
}

#[test]
fn single_counter_layout() {
    let reg = Registry::new();
    reg.counter("hello_requests_total", "Total hello requests").unwrap();

    let expected = "\
# HELP hello_requests_total Total hello requests
# TYPE hello_requests_total counter
hello_requests_total 0.0
# HELP hello_requests_total_created Total hello requests
# TYPE hello_requests_total_created gauge
hello_requests_total_created <ts>
";
    assert_eq!(mask_created(&reg.render()), expected);
}

#[test]
fn summary_and_counter_in_registration_order() {
    let reg = Registry::new();
    let s = reg
        .summary("hello_request_processing_seconds", "Time spent processing hello requests")
        .unwrap();
    let c = reg.counter("hello_exceptions_total", "Total number of exceptions").unwrap();
    s.observe(0.25).unwrap();
    c.inc();

    let expected = "\
# HELP hello_request_processing_seconds Time spent processing hello requests
# TYPE hello_request_processing_seconds summary
hello_request_processing_seconds_count 1.0
hello_request_processing_seconds_sum 0.25
# HELP hello_request_processing_seconds_created Time spent processing hello requests
# TYPE hello_request_processing_seconds_created gauge
hello_request_processing_seconds_created <ts>
# HELP hello_exceptions_total Total number of exceptions
# TYPE hello_exceptions_total counter
hello_exceptions_total 1.0
# HELP hello_exceptions_total_created Total number of exceptions
# TYPE hello_exceptions_total_created gauge
hello_exceptions_total_created <ts>
";
    assert_eq!(mask_created(&reg.render()), expected);
}

#[test]
fn empty_registry_renders_nothing() {
    assert_eq!(Registry::new().render(), "");
}

#[test]
fn encode_is_pure() {
    let snaps = vec![MetricSnapshot {
        name: "jobs_total".into(),
        help: "multi\nline \\ help".into(),
        created: 1756800541.6254878,
        value: MetricValue::Counter(12.0),
    }];

    let a = encode(&snaps);
    assert_eq!(a, encode(&snaps));
    assert_eq!(
        a,
        "# HELP jobs_total multi\\nline \\\\ help\n\
         # TYPE jobs_total counter\n\
         jobs_total 12.0\n\
         # HELP jobs_total_created multi\\nline \\\\ help\n\
         # TYPE jobs_total_created gauge\n\
         jobs_total_created 1.7568005416254878e+09\n"
    );
}

#[test]
fn float_formatting() {
    let cases: &[(f64, &str)] = &[
        (0.0, "0.0"),
        (1.0, "1.0"),
        (3.5, "3.5"),
        (0.05, "0.05"),
        (100.0, "100.0"),
        (123.456, "123.456"),
        (999_999.0, "999999.0"),
        (1_000_000.0, "1e+06"),
        (1_234_567.0, "1.234567e+06"),
        (1756800541.6254878, "1.7568005416254878e+09"),
        (1.5e10, "1.5e+10"),
        (123_456_789_012.0, "1.23456789012e+11"),
        (1e16, "1e+16"),
        (0.0001, "0.0001"),
        (0.00001, "1e-05"),
        (1.5e-7, "1.5e-07"),
        (-2.5, "-2.5"),
        (-1_234_567.0, "-1234567.0"),
        (f64::INFINITY, "+Inf"),
        (f64::NEG_INFINITY, "-Inf"),
        (f64::NAN, "NaN"),
    ];
    for (v, want) in cases {
        assert_eq!(format_float(*v), *want, "value={v}");
    }
}
