use chrono::{DateTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use postulacion_docente::clock::{Clock, SystemClock};
use postulacion_docente::hiring::{demo_seed, HiringServices, InMemoryHiringRepository};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type Services = HiringServices<InMemoryHiringRepository>;

/// In-memory services, optionally loaded with the demo data set relative to `now`.
pub(crate) fn in_memory_services(
    seed_demo_data: bool,
    now: DateTime<Utc>,
    clock: Arc<dyn Clock>,
) -> Arc<Services> {
    let repository = if seed_demo_data {
        InMemoryHiringRepository::from_seed(demo_seed(now))
    } else {
        InMemoryHiringRepository::new()
    };
    Arc::new(HiringServices::new(Arc::new(repository), clock))
}

pub(crate) fn demo_services() -> Arc<Services> {
    let clock = Arc::new(SystemClock);
    in_memory_services(true, clock.now(), clock)
}
