use std::any::Any;
use std::env;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use itinera_core::{
    assemble, build_tips, resolve, validate_request, BudgetTier, DestinationProfile, ErrorNotice,
    Itinerary, Locale, RandomSource, RequestError, RequestLimits, RngSource, TipsBlock,
    TravelRequest,
};
use itinera_observability::AppMetrics;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// Suspends the caller for the simulated backend latency.
pub trait Pacer: Send + Sync {
    fn pause(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TokioPacer;

impl Pacer for TokioPacer {
    fn pause(&self, duration: Duration) -> impl Future<Output = ()> + Send {
        tokio::time::sleep(duration)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InstantPacer;

impl Pacer for InstantPacer {
    fn pause(&self, _duration: Duration) -> impl Future<Output = ()> + Send {
        std::future::ready(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayWindow {
    pub min: Duration,
    pub max: Duration,
}

impl DelayWindow {
    pub fn simulated() -> Self {
        Self {
            min: Duration::from_millis(2_000),
            max: Duration::from_millis(4_000),
        }
    }

    pub fn none() -> Self {
        Self {
            min: Duration::ZERO,
            max: Duration::ZERO,
        }
    }

    /// Uniform over whole milliseconds in `min..=max`.
    pub fn sample<R>(&self, rng: &mut R) -> Duration
    where
        R: RandomSource + ?Sized,
    {
        let min = self.min.as_millis() as u64;
        let max = (self.max.as_millis() as u64).max(min);
        let span = (max - min) as usize;
        let offset = if span == 0 { 0 } else { rng.pick(span + 1) };
        Duration::from_millis(min + offset as u64)
    }
}

#[derive(Debug, Clone)]
pub struct GeneratorSettings {
    pub delay: DelayWindow,
    pub limits: RequestLimits,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            delay: DelayWindow::simulated(),
            limits: RequestLimits::default(),
        }
    }
}

impl GeneratorSettings {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let min_ms = env_parse::<u64>("ITINERA_DELAY_MIN_MS")
            .unwrap_or(defaults.delay.min.as_millis() as u64);
        let max_ms = env_parse::<u64>("ITINERA_DELAY_MAX_MS")
            .unwrap_or(defaults.delay.max.as_millis() as u64);
        let max_days = env_parse::<u32>("ITINERA_MAX_DAYS")
            .filter(|value| *value > 0)
            .unwrap_or(defaults.limits.max_days);

        Self {
            delay: DelayWindow {
                min: Duration::from_millis(min_ms),
                max: Duration::from_millis(max_ms.max(min_ms)),
            },
            limits: RequestLimits {
                max_days,
                ..defaults.limits
            },
        }
    }

    pub fn without_delay(mut self) -> Self {
        self.delay = DelayWindow::none();
        self
    }
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse::<T>().ok())
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] RequestError),
    #[error("itinerary assembly panicked: {0}")]
    Panicked(String),
}

/// Presentation states around one generation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifecycle {
    Loading,
    Ready,
    Failed,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub request_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub delay_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GenerationOutcome {
    Ready {
        report: GenerationReport,
        itinerary: Itinerary,
    },
    Failed {
        report: GenerationReport,
        notice: ErrorNotice,
        reason: String,
    },
}

impl GenerationOutcome {
    pub fn lifecycle(&self) -> Lifecycle {
        match self {
            Self::Ready { .. } => Lifecycle::Ready,
            Self::Failed { .. } => Lifecycle::Failed,
        }
    }

    pub fn report(&self) -> &GenerationReport {
        match self {
            Self::Ready { report, .. } | Self::Failed { report, .. } => report,
        }
    }

    pub fn itinerary(&self) -> Option<&Itinerary> {
        match self {
            Self::Ready { itinerary, .. } => Some(itinerary),
            Self::Failed { .. } => None,
        }
    }
}

/// Wraps the pure assembler with the simulated latency and the
/// failure-to-notice substitution. Calls are independent; nothing guards
/// against overlapping submissions.
#[derive(Clone)]
pub struct ItineraryAgent<P = TokioPacer>
where
    P: Pacer,
{
    pacer: P,
    settings: GeneratorSettings,
    metrics: Arc<AppMetrics>,
}

impl<P> ItineraryAgent<P>
where
    P: Pacer,
{
    pub fn new(pacer: P, settings: GeneratorSettings, metrics: Arc<AppMetrics>) -> Self {
        Self {
            pacer,
            settings,
            metrics,
        }
    }

    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    pub fn metrics(&self) -> &Arc<AppMetrics> {
        &self.metrics
    }

    pub async fn generate(&self, request: TravelRequest) -> GenerationOutcome {
        let mut rng = RngSource::from_entropy();
        self.generate_with(request, &mut rng).await
    }

    #[instrument(skip(self, request, rng), fields(destination = %request.destination, days = request.days))]
    pub async fn generate_with<R>(&self, request: TravelRequest, rng: &mut R) -> GenerationOutcome
    where
        R: RandomSource + Send + ?Sized,
    {
        let started = Instant::now();
        self.metrics.inc_request();
        let request_id = Uuid::new_v4();
        info!(request_id = %request_id, lifecycle = ?Lifecycle::Loading, "generation started");

        let mut delay = Duration::ZERO;
        let result = match validate_request(&request, &self.settings.limits) {
            Ok(()) => {
                delay = self.settings.delay.sample(rng);
                self.pacer.pause(delay).await;
                assemble_guarded(&request, rng)
            }
            Err(error) => Err(error.into()),
        };
        let report = GenerationReport {
            request_id,
            generated_at: Utc::now(),
            delay_ms: delay.as_millis() as u64,
        };

        let outcome = match result {
            Ok(itinerary) => {
                self.metrics.record_generated(itinerary.days.len());
                info!(
                    request_id = %request_id,
                    locale = %request.locale.as_code(),
                    days = itinerary.days.len(),
                    tips = itinerary.tips.len(),
                    delay_ms = report.delay_ms,
                    "itinerary generated"
                );
                GenerationOutcome::Ready { report, itinerary }
            }
            Err(error) => {
                self.metrics.inc_failure();
                warn!(request_id = %request_id, error = %error, "itinerary generation failed");
                GenerationOutcome::Failed {
                    report,
                    notice: ErrorNotice::for_locale(request.locale),
                    reason: error.to_string(),
                }
            }
        };

        self.metrics.observe_latency(started.elapsed());
        info!(request_id = %request_id, lifecycle = ?outcome.lifecycle(), "generation finished");
        outcome
    }

    /// Validation plus assembly, without the delay. A panic inside the
    /// assembler is reported as an error rather than unwinding further.
    pub fn try_assemble<R>(
        &self,
        request: &TravelRequest,
        rng: &mut R,
    ) -> Result<Itinerary, GenerationError>
    where
        R: RandomSource + ?Sized,
    {
        validate_request(request, &self.settings.limits)?;
        assemble_guarded(request, rng)
    }

    pub fn resolve_destination(&self, destination: &str, locale: Locale) -> DestinationProfile {
        self.metrics.inc_request();
        resolve(destination, locale)
    }

    pub fn sample_tips(&self, budget: Option<BudgetTier>, locale: Locale) -> TipsBlock {
        self.metrics.inc_request();
        build_tips(budget, locale, &mut RngSource::from_entropy())
    }
}

fn assemble_guarded<R>(request: &TravelRequest, rng: &mut R) -> Result<Itinerary, GenerationError>
where
    R: RandomSource + ?Sized,
{
    panic::catch_unwind(AssertUnwindSafe(|| assemble(request, rng)))
        .map_err(|payload| GenerationError::Panicked(panic_message(payload.as_ref())))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itinera_core::ScriptedSource;

    fn agent() -> ItineraryAgent<InstantPacer> {
        ItineraryAgent::new(
            InstantPacer,
            GeneratorSettings::default().without_delay(),
            AppMetrics::shared(),
        )
    }

    fn request(days: u32) -> TravelRequest {
        TravelRequest {
            destination: "오사카".to_string(),
            party_size: 3,
            gender: "남성".to_string(),
            age_bracket: "30대".to_string(),
            days,
            budget: "200만원 이상".to_string(),
            styles: vec!["휴양여행".to_string()],
            locale: Locale::Ko,
        }
    }

    #[tokio::test]
    async fn generates_ready_outcome() {
        let agent = agent();
        let outcome = agent
            .generate_with(request(3), &mut ScriptedSource::new([0, 1, 2, 3]))
            .await;

        assert_eq!(outcome.lifecycle(), Lifecycle::Ready);
        assert_eq!(outcome.report().delay_ms, 0);
        let itinerary = outcome.itinerary().expect("itinerary should be present");
        assert_eq!(itinerary.days.len(), 3);
        assert_eq!(itinerary.profile.country, "일본");
        assert_eq!(itinerary.days[1].entries[2].description, "여유로운 휴식과 관광");

        let snapshot = agent.metrics().snapshot();
        assert_eq!(snapshot.requests_total, 1);
        assert_eq!(snapshot.generated_total, 1);
        assert_eq!(snapshot.days_planned_total, 3);
    }

    #[tokio::test]
    async fn invalid_request_becomes_error_notice() {
        let agent = agent();
        let outcome = agent.generate(request(0)).await;

        assert_eq!(outcome.lifecycle(), Lifecycle::Failed);
        match outcome {
            GenerationOutcome::Failed { notice, reason, .. } => {
                assert_eq!(notice, ErrorNotice::for_locale(Locale::Ko));
                assert!(reason.contains("trip length"));
            }
            GenerationOutcome::Ready { .. } => panic!("expected failure"),
        }
        assert_eq!(agent.metrics().snapshot().failures_total, 1);
    }

    #[tokio::test]
    async fn invalid_request_fails_without_delay() {
        let agent = ItineraryAgent::new(InstantPacer, GeneratorSettings::default(), AppMetrics::shared());

        let rejected = agent
            .generate_with(request(0), &mut ScriptedSource::new([1_500]))
            .await;
        assert_eq!(rejected.lifecycle(), Lifecycle::Failed);
        assert_eq!(rejected.report().delay_ms, 0);

        let accepted = agent
            .generate_with(request(2), &mut ScriptedSource::new([1_500]))
            .await;
        assert_eq!(accepted.lifecycle(), Lifecycle::Ready);
        assert_eq!(accepted.report().delay_ms, 3_500);
    }

    #[tokio::test]
    async fn lookups_do_not_count_as_timed_generations() {
        let agent = agent();
        agent.resolve_destination("파리", Locale::Ko);
        agent.sample_tips(Some(BudgetTier::Under1M), Locale::Ko);
        agent.generate(request(2)).await;

        let snapshot = agent.metrics().snapshot();
        assert_eq!(snapshot.requests_total, 3);
        assert_eq!(snapshot.generated_total, 1);
    }

    #[tokio::test]
    async fn outcome_serializes_with_status_tag() {
        let outcome = agent().generate(request(2)).await;
        let value = serde_json::to_value(&outcome).unwrap();

        assert_eq!(value["status"], "ready");
        assert_eq!(value["itinerary"]["days"].as_array().unwrap().len(), 2);
        assert!(value["report"]["request_id"].is_string());
    }

    #[test]
    fn delay_sample_stays_in_window() {
        let window = DelayWindow::simulated();
        assert_eq!(
            window.sample(&mut ScriptedSource::new([0])),
            Duration::from_millis(2_000)
        );
        assert_eq!(
            window.sample(&mut ScriptedSource::new([2_000])),
            Duration::from_millis(4_000)
        );
        assert_eq!(
            window.sample(&mut ScriptedSource::new([2_001])),
            Duration::from_millis(2_000)
        );
        assert_eq!(DelayWindow::none().sample(&mut ScriptedSource::default()), Duration::ZERO);
    }

    #[test]
    fn panics_are_reported_as_errors() {
        struct Exploding;
        impl RandomSource for Exploding {
            fn pick(&mut self, _len: usize) -> usize {
                panic!("entropy exhausted")
            }
        }

        let error = agent()
            .try_assemble(&request(2), &mut Exploding)
            .expect_err("assembly should fail");
        assert!(matches!(error, GenerationError::Panicked(ref message) if message == "entropy exhausted"));
    }
}
