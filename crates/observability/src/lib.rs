use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use metrics::{counter, histogram};
use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

static TRACING_INIT: OnceCell<()> = OnceCell::new();

#[derive(Debug, Default)]
pub struct AppMetrics {
    requests_total: AtomicU64,
    generated_total: AtomicU64,
    failures_total: AtomicU64,
    rejected_total: AtomicU64,
    days_planned_total: AtomicU64,
    latency_samples: AtomicU64,
    total_latency_millis: AtomicU64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub requests_total: u64,
    pub generated_total: u64,
    pub failures_total: u64,
    pub rejected_total: u64,
    pub days_planned_total: u64,
    pub avg_latency_millis: f64,
}

impl AppMetrics {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn inc_request(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
        counter!("itinera_requests_total").increment(1);
    }

    pub fn record_generated(&self, days: usize) {
        self.generated_total.fetch_add(1, Ordering::Relaxed);
        self.days_planned_total
            .fetch_add(days as u64, Ordering::Relaxed);
        counter!("itinera_itineraries_total").increment(1);
        counter!("itinera_days_planned_total").increment(days as u64);
    }

    pub fn inc_failure(&self) {
        self.failures_total.fetch_add(1, Ordering::Relaxed);
        counter!("itinera_failures_total").increment(1);
    }

    /// Counts a request refused at the boundary before any generation ran.
    pub fn record_rejection(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
        self.rejected_total.fetch_add(1, Ordering::Relaxed);
        counter!("itinera_requests_total").increment(1);
        counter!("itinera_rejected_total").increment(1);
    }

    pub fn observe_latency(&self, duration: Duration) {
        self.latency_samples.fetch_add(1, Ordering::Relaxed);
        self.total_latency_millis
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
        histogram!("itinera_generation_seconds").record(duration.as_secs_f64());
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let samples = self.latency_samples.load(Ordering::Relaxed);
        let latency = self.total_latency_millis.load(Ordering::Relaxed);

        MetricsSnapshot {
            requests_total: self.requests_total.load(Ordering::Relaxed),
            generated_total: self.generated_total.load(Ordering::Relaxed),
            failures_total: self.failures_total.load(Ordering::Relaxed),
            rejected_total: self.rejected_total.load(Ordering::Relaxed),
            days_planned_total: self.days_planned_total.load(Ordering::Relaxed),
            avg_latency_millis: if samples == 0 {
                0.0
            } else {
                latency as f64 / samples as f64
            },
        }
    }
}

pub fn init_tracing(service_name: &str) {
    TRACING_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}=info,itinera_api=info,itinera_agents=info",
                service_name
            ))
        });

        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(true)
            .with_span_list(true)
            .with_writer(std::io::stderr)
            .init();
    });
}
