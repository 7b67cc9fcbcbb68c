#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use monstack_app::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
server:
  listen: "0.0.0.0:5000"
simulation:
  eror_rate: 0.2 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_REQUEST");
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.server.listen, "0.0.0.0:5000");
    assert_eq!(
        cfg.metrics.latency_buckets,
        [0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    );
    assert!(!cfg.metrics.track_metrics_endpoint);
    assert_eq!(cfg.simulation.data_delay_ms, config::DelayRange { min: 10, max: 100 });
    assert_eq!(cfg.simulation.slow_delay_ms, config::DelayRange { min: 500, max: 2000 });
    assert_eq!(cfg.simulation.error_rate, 0.5);
}

#[test]
fn unsupported_version() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert_eq!(err.code().as_str(), "UNSUPPORTED_VERSION");
}

#[test]
fn rejects_out_of_range_values() {
    let cases = [
        "version: 1\nserver: { listen: \"not-an-addr\" }\n",
        "version: 1\nmetrics: { latency_buckets: [] }\n",
        "version: 1\nmetrics: { latency_buckets: [0.5, 0.1] }\n",
        "version: 1\nmetrics: { latency_buckets: [0.0, 0.1] }\n",
        "version: 1\nsimulation: { error_rate: 1.5 }\n",
        "version: 1\nsimulation: { slow_delay_ms: { min: 10, max: 5 } }\n",
        "version: 1\nsimulation: { slow_delay_ms: { min: 10, max: 600000 } }\n",
    ];
    for c in cases {
        let err = config::load_from_str(c).expect_err(c);
        assert_eq!(err.code().as_str(), "BAD_REQUEST", "case={c}");
    }
}

#[test]
fn port_override_keeps_host() {
    let mut cfg =
        config::load_from_str("version: 1\nserver: { listen: \"127.0.0.1:5000\" }\n").unwrap();
    config::override_port(&mut cfg, 8081).unwrap();
    assert_eq!(cfg.server.listen, "127.0.0.1:8081");
}

#[test]
fn load_from_missing_file_is_io_error() {
    let err = config::load_from_file("/definitely/not/here.yaml").expect_err("must fail");
    assert_eq!(err.code().as_str(), "IO");
}
