//! Minimal metrics registry.
//!
//! Label sets are a single `name="value"` pair, keyed by `&'static str` so the
//! hot path never allocates. Latency buckets are fixed in microseconds.

use dashmap::DashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

/// Counter family with one label dimension.
pub struct LabeledCounter {
    label: &'static str,
    map: DashMap<&'static str, AtomicU64>,
}

impl LabeledCounter {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            map: DashMap::new(),
        }
    }

    pub fn inc(&self, value: &'static str) {
        self.map
            .entry(value)
            .or_insert_with(|| AtomicU64::new(0))
            .fetch_add(1, Ordering::Relaxed);
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {name} counter");
        let mut rows: Vec<(&'static str, u64)> = self
            .map
            .iter()
            .map(|r| (*r.key(), r.value().load(Ordering::Relaxed)))
            .collect();
        rows.sort_unstable();
        for (v, n) in rows {
            let _ = writeln!(out, "{name}{{{}=\"{}\"}} {n}", self.label, escape_label(v));
        }
    }
}

// 100us, 500us, 1ms, 5ms, 10ms, 50ms, 100ms, 500ms, 1s
const BUCKETS_MICROS: [u64; 9] = [
    100, 500, 1_000, 5_000, 10_000, 50_000, 100_000, 500_000, 1_000_000,
];

#[derive(Default)]
pub struct LatencyHistogram {
    count: AtomicU64,
    sum_micros: AtomicU64,
    buckets: [AtomicU64; 9],
}

impl LatencyHistogram {
    pub fn observe(&self, d: Duration) {
        let micros = u64::try_from(d.as_micros()).unwrap_or(u64::MAX);
        self.count.fetch_add(1, Ordering::Relaxed);
        self.sum_micros.fetch_add(micros, Ordering::Relaxed);
        for (bucket, &le) in self.buckets.iter().zip(BUCKETS_MICROS.iter()) {
            if micros <= le {
                bucket.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {name} histogram");
        for (bucket, le) in self.buckets.iter().zip(BUCKETS_MICROS) {
            let _ = writeln!(out, "{name}_bucket{{le=\"{le}\"}} {}", bucket.load(Ordering::Relaxed));
        }
        let count = self.count();
        let _ = writeln!(out, "{name}_bucket{{le=\"+Inf\"}} {count}");
        let _ = writeln!(out, "{name}_sum {}", self.sum_micros.load(Ordering::Relaxed));
        let _ = writeln!(out, "{name}_count {count}");
    }
}

pub struct ServerMetrics {
    /// outcome = ok | failed
    pub counts: LabeledCounter,
    /// kind = STORE_UNAVAILABLE | STORE_PROTOCOL | ...
    pub count_errors: LabeledCounter,
    pub count_duration: LatencyHistogram,
    pub http_requests: LabeledCounter,
}

impl Default for ServerMetrics {
    fn default() -> Self {
        Self {
            counts: LabeledCounter::new("outcome"),
            count_errors: LabeledCounter::new("kind"),
            count_duration: LatencyHistogram::default(),
            http_requests: LabeledCounter::new("route"),
        }
    }
}

impl ServerMetrics {
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.counts.render("hitcount_counts_total", &mut out);
        self.count_errors.render("hitcount_count_errors_total", &mut out);
        self.count_duration.render("hitcount_count_duration_micros", &mut out);
        self.http_requests.render("hitcount_http_requests_total", &mut out);
        out
    }
}
