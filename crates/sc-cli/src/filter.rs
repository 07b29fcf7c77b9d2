//! `skycut filter` orchestration: run a batch of superevents through one
//! sky-map source and partition them by credible area.

use sc_core::{Error, Result, SkyMapSource};
use sc_healpix::credible_area_deg2;
use serde::Serialize;

/// Default retention threshold, square degrees.
pub const DEFAULT_AREA_LIMIT_DEG2: f64 = 300.0;

/// Default credible-region probability mass.
pub const DEFAULT_MASS_FRACTION: f64 = 0.9;

/// Batch configuration. An explicit value, passed where needed; there is
/// no global default to mutate.
#[derive(Debug, Clone, Copy)]
pub struct FilterOptions {
    /// Keep events with credible area strictly below this many deg^2.
    pub area_limit: f64,
    /// Probability mass the credible region must contain, in (0, 1].
    pub mass_fraction: f64,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self { area_limit: DEFAULT_AREA_LIMIT_DEG2, mass_fraction: DEFAULT_MASS_FRACTION }
    }
}

impl FilterOptions {
    /// Reject configurations the evaluator would refuse on every event.
    pub fn validate(&self) -> Result<()> {
        if !(self.mass_fraction > 0.0 && self.mass_fraction <= 1.0) {
            return Err(Error::InvalidArgument(format!(
                "mass fraction must be in (0, 1], got {}",
                self.mass_fraction
            )));
        }
        if !self.area_limit.is_finite() || self.area_limit <= 0.0 {
            return Err(Error::InvalidArgument(format!(
                "area limit must be positive and finite, got {}",
                self.area_limit
            )));
        }
        Ok(())
    }
}

/// Outcome of one superevent check.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EventStatus {
    /// Credible area below the limit; the event is retained.
    Kept {
        /// Area of the credible region, deg^2.
        area_deg2: f64,
    },
    /// Credible area at or above the limit.
    Rejected {
        /// Area of the credible region, deg^2.
        area_deg2: f64,
    },
    /// Mock-data-challenge ID; the source is never consulted.
    SkippedMock,
    /// Fetch or evaluation failed; the batch moved on.
    SkippedError {
        /// Human-readable failure reason.
        reason: String,
    },
}

/// Per-event record in the batch report.
#[derive(Debug, Clone, Serialize)]
pub struct EventResult {
    /// The ID as it appeared in the input list.
    pub event_id: String,
    /// What happened to it.
    #[serde(flatten)]
    pub status: EventStatus,
}

/// Everything one batch run produced, in input order.
#[derive(Debug, Clone, Serialize)]
pub struct FilterReport {
    /// Threshold the batch ran with, deg^2.
    pub area_limit: f64,
    /// Credible-region mass fraction the batch ran with.
    pub mass_fraction: f64,
    /// Diagnostic label of the sky-map source.
    pub source: String,
    /// One entry per input ID.
    pub events: Vec<EventResult>,
}

impl FilterReport {
    /// IDs of retained events, in input order.
    pub fn kept_ids(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match &e.status {
                EventStatus::Kept { .. } => Some(e.event_id.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Number of retained events.
    pub fn n_kept(&self) -> usize {
        self.events.iter().filter(|e| matches!(e.status, EventStatus::Kept { .. })).count()
    }

    /// Number of events rejected for being too coarse.
    pub fn n_rejected(&self) -> usize {
        self.events.iter().filter(|e| matches!(e.status, EventStatus::Rejected { .. })).count()
    }

    /// Number of events skipped (mock IDs and failures).
    pub fn n_skipped(&self) -> usize {
        self.events
            .iter()
            .filter(|e| {
                matches!(e.status, EventStatus::SkippedMock | EventStatus::SkippedError { .. })
            })
            .count()
    }
}

/// Check every ID against `source`, sequentially and in input order.
///
/// Per-event failures are recorded and skipped; the batch never aborts.
/// `opts` is assumed valid (see [`FilterOptions::validate`]); an invalid
/// mass fraction would surface as a per-event failure on every event.
pub fn filter_events(
    source: &dyn SkyMapSource,
    ids: &[String],
    opts: &FilterOptions,
) -> FilterReport {
    let mut events = Vec::with_capacity(ids.len());
    for id in ids {
        let status = check_event(source, id, opts);
        match &status {
            EventStatus::Kept { area_deg2 } => {
                tracing::info!(event = %id, area_deg2, "kept");
            }
            EventStatus::Rejected { area_deg2 } => {
                tracing::info!(event = %id, area_deg2, "rejected");
            }
            EventStatus::SkippedMock => {
                tracing::debug!(event = %id, "skipping mock event");
            }
            EventStatus::SkippedError { reason } => {
                tracing::warn!(event = %id, %reason, "skipping event");
            }
        }
        events.push(EventResult { event_id: id.clone(), status });
    }
    FilterReport {
        area_limit: opts.area_limit,
        mass_fraction: opts.mass_fraction,
        source: source.name().to_string(),
        events,
    }
}

fn check_event(source: &dyn SkyMapSource, event_id: &str, opts: &FilterOptions) -> EventStatus {
    if sc_gracedb::is_mock_id(event_id) {
        return EventStatus::SkippedMock;
    }
    let map = match source.fetch_map(event_id) {
        Ok(map) => map,
        Err(e) => return EventStatus::SkippedError { reason: e.to_string() },
    };
    match credible_area_deg2(&map.prob, map.nside, opts.mass_fraction) {
        Ok(area_deg2) => {
            if area_deg2 < opts.area_limit {
                EventStatus::Kept { area_deg2 }
            } else {
                EventStatus::Rejected { area_deg2 }
            }
        }
        Err(e) => EventStatus::SkippedError { reason: e.to_string() },
    }
}
