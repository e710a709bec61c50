//! Startup population of the registry from resolved settings.

use rand::Rng;

use promsynth_core::error::Result;
use promsynth_core::sample::plan_random;
use promsynth_core::{KindSelection, MetricKind, Registry};

use crate::config::Settings;

/// Create every instrument the settings ask for.
/// Returns the created count per kind, in creation order.
pub fn populate<R: Rng + ?Sized>(
    registry: &Registry,
    settings: &Settings,
    rng: &mut R,
) -> Result<Vec<(MetricKind, usize)>> {
    let plan: Vec<(MetricKind, i64)> = match settings.selection {
        KindSelection::All if settings.random => plan_random(rng)
            .into_iter()
            .map(|(kind, n)| (kind, n as i64))
            .collect(),
        selection => {
            if settings.random {
                tracing::warn!(%selection, "random mode only applies to type all; ignoring");
            }
            selection
                .kinds()
                .into_iter()
                .map(|kind| (kind, settings.count))
                .collect()
        }
    };

    let naming = settings.naming();
    let mut created = Vec::with_capacity(plan.len());
    for (kind, count) in plan {
        let descs = registry.create_instruments(kind, count, &naming)?;
        tracing::info!(%kind, count = descs.len(), "instruments created");
        created.push((kind, descs.len()));
    }
    Ok(created)
}
