//! Update scheduler: one recurring task per non-empty instrument kind.
//!
//! Tasks are independent (no cross-kind synchronization) and stop when the
//! shutdown signal flips. The first update happens one interval after start.

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use promsynth_core::{MetricKind, Registry};

pub struct Scheduler {
    shutdown: watch::Sender<bool>,
    tasks: Vec<(MetricKind, JoinHandle<()>)>,
}

impl Scheduler {
    /// Start with entropy-seeded generators.
    pub fn start(registry: Arc<Registry>, every: Duration) -> Self {
        Self::start_with(registry, every, |_| StdRng::from_entropy())
    }

    /// Start with a caller-supplied generator per kind.
    pub fn start_with<R, F>(registry: Arc<Registry>, every: Duration, mut make_rng: F) -> Self
    where
        R: Rng + Send + 'static,
        F: FnMut(MetricKind) -> R,
    {
        let (shutdown, rx) = watch::channel(false);
        let mut tasks = Vec::new();

        if every.is_zero() {
            tracing::warn!("zero update interval, scheduler not started");
            return Self { shutdown, tasks };
        }

        for kind in MetricKind::ALL {
            if registry.len(kind) == 0 {
                continue;
            }
            let handle = tokio::spawn(run_kind(
                Arc::clone(&registry),
                kind,
                every,
                make_rng(kind),
                rx.clone(),
            ));
            tasks.push((kind, handle));
        }

        tracing::info!(
            interval_secs = every.as_secs_f64(),
            loops = tasks.len(),
            "update scheduler started"
        );
        Self { shutdown, tasks }
    }

    /// Kinds with a running update loop.
    pub fn kinds(&self) -> Vec<MetricKind> {
        self.tasks.iter().map(|(k, _)| *k).collect()
    }

    /// Signal every loop and wait for them to exit.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        for (kind, handle) in self.tasks {
            if let Err(e) = handle.await {
                tracing::warn!(%kind, error = %e, "update loop ended abnormally");
            }
        }
        tracing::info!("update scheduler stopped");
    }
}

async fn run_kind<R: Rng>(
    registry: Arc<Registry>,
    kind: MetricKind,
    every: Duration,
    mut rng: R,
    mut shutdown: watch::Receiver<bool>,
) {
    let Some(first) = Instant::now().checked_add(every) else {
        tracing::warn!(%kind, interval_secs = every.as_secs_f64(), "update interval out of range");
        return;
    };
    let mut tick = interval_at(first, every);
    tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = tick.tick() => {
                let report = registry.update(kind, &mut rng);
                tracing::debug!(
                    %kind,
                    instruments = report.instruments,
                    observations = report.observations,
                    "metrics updated"
                );
            }
            _ = shutdown.changed() => {
                tracing::debug!(%kind, "update loop stopping");
                break;
            }
        }
    }
}
