#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::time::Duration;

use hitcount_core::CounterMode;
use hitcount_server::config::{self, StoreBackend};

fn load(vars: &[(&str, &str)]) -> hitcount_core::Result<config::ServerConfig> {
    config::load_from_vars(vars.iter().copied())
}

#[test]
fn defaults_when_unset() {
    let cfg = load(&[]).expect("must parse");
    assert_eq!(cfg.server.port, 80);
    assert_eq!(cfg.server.listen_addr(), "0.0.0.0:80");
    assert_eq!(cfg.server.slow_start(), Duration::ZERO);
    assert_eq!(cfg.server.extra_text, None);
    assert_eq!(cfg.store.backend, StoreBackend::Redis);
    assert_eq!(cfg.store.redis_url(), "redis://127.0.0.1:6379/");
    assert_eq!(cfg.store.timeout(), Duration::from_millis(2000));
    assert_eq!(cfg.counter.mode, CounterMode::ReadModifyWrite);
}

#[test]
fn reads_every_variable() {
    let cfg = load(&[
        ("PORT", "8080"),
        ("REDIS", "redis.internal"),
        ("REDIS_PORT", "6380"),
        ("SLOW_START", "3"),
        ("EXTRA_TEXT", "blue"),
        ("STORE_BACKEND", "memory"),
        ("STORE_TIMEOUT_MS", "250"),
        ("COUNTER_MODE", "atomic"),
    ])
    .expect("must parse");
    assert_eq!(cfg.server.port, 8080);
    assert_eq!(cfg.server.slow_start(), Duration::from_secs(3));
    assert_eq!(cfg.server.extra_text.as_deref(), Some("blue"));
    assert_eq!(cfg.store.backend, StoreBackend::Memory);
    assert_eq!(cfg.store.redis_url(), "redis://redis.internal:6380/");
    assert_eq!(cfg.store.timeout_ms, 250);
    assert_eq!(cfg.counter.mode, CounterMode::Atomic);
}

#[test]
fn empty_values_count_as_unset() {
    let cfg = load(&[("PORT", ""), ("SLOW_START", ""), ("EXTRA_TEXT", "")]).expect("must parse");
    assert_eq!(cfg.server.port, 80);
    assert_eq!(cfg.server.extra_text, None);
}

#[test]
fn negative_slow_start_means_no_delay() {
    let cfg = load(&[("SLOW_START", "-5")]).expect("must parse");
    assert_eq!(cfg.server.slow_start(), Duration::ZERO);
}

#[test]
fn invalid_values_are_config_errors() {
    let bad: &[(&str, &str)] = &[
        ("SLOW_START", "soon"),
        ("SLOW_START", "1.5"),
        ("PORT", "http"),
        ("PORT", "70000"),
        ("REDIS_PORT", "-1"),
        ("COUNTER_MODE", "locked"),
        ("STORE_BACKEND", "etcd"),
        ("STORE_TIMEOUT_MS", "0"),
        ("STORE_TIMEOUT_MS", "600000"),
        ("REDIS", "   "),
    ];
    for &(k, v) in bad {
        let err = load(&[(k, v)]).expect_err("must fail");
        assert_eq!(err.client_code().as_str(), "CONFIG", "{k}={v}");
    }
}
