//! Score normalization and weighted aggregation.
//!
//! Every raw score carries its scale tag (`RawScore`), so normalization is a
//! fixed transform per tag rather than a lookup on the metric name. Metrics
//! without a configured weight are silently excluded from aggregation.

use std::collections::HashMap;
use std::io;
use std::path::Path;

use once_cell::sync::Lazy;
use tracing::{info, warn};

use crate::schema::{Metric, RawScore};

use super::round2;

/// Mapping from metric to its share of the final score.
pub type WeightTable = HashMap<Metric, f64>;

/// Built-in weights; sum to 1.0.
pub static DEFAULT_WEIGHTS: Lazy<WeightTable> = Lazy::new(|| {
    HashMap::from([
        (Metric::Coverage, 0.35),
        (Metric::Relevance, 0.25),
        (Metric::Clarity, 0.10),
        (Metric::Coherence, 0.10),
        (Metric::Conciseness, 0.10),
        (Metric::Grammar, 0.10),
    ])
});

/// Default location of the optional weight override file.
pub const DEFAULT_WEIGHTS_PATH: &str = "config/weights.json";

/// Load a weight table from a JSON file shaped like
/// `{"coverage": 0.35, "relevance": 0.25, ...}`.
pub fn load_weight_table(path: &Path) -> io::Result<WeightTable> {
    let bytes = std::fs::read(path)?;
    serde_json::from_slice(&bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Weight table from disk if the override file exists, built-in defaults
/// otherwise. Read once at startup; the table is constant afterwards.
pub fn weight_table_from_disk(path: &Path) -> WeightTable {
    match load_weight_table(path) {
        Ok(table) => {
            info!(path = %path.display(), "loaded scoring weights from file");
            table
        }
        Err(_) => DEFAULT_WEIGHTS.clone(),
    }
}

impl RawScore {
    /// Deterministic linear transform onto the common [0, 10] scale.
    pub fn normalized(self) -> f64 {
        match self {
            RawScore::Unit(value) => value * 10.0,
            RawScore::FivePoint(value) => rescale(value, 1.0, 5.0),
        }
    }
}

/// Linear rescale from `[scale_min, scale_max]` to [0, 10]. A degenerate
/// scale yields a neutral 5.0 (unreachable with the current tags).
fn rescale(value: f64, scale_min: f64, scale_max: f64) -> f64 {
    if (scale_max - scale_min).abs() < f64::EPSILON {
        return 5.0;
    }
    (value - scale_min) / (scale_max - scale_min) * 10.0
}

/// Combines heterogeneous raw scores into one weighted final score.
pub struct ScoringEngine {
    weights: WeightTable,
}

impl ScoringEngine {
    /// A table not summing to 1.0 is a configuration smell, not an error:
    /// the engine still aggregates with whatever weights it was given.
    pub fn new(weights: WeightTable) -> Self {
        let total: f64 = weights.values().sum();
        if (total - 1.0).abs() > 1e-6 {
            warn!(total, "scoring weights do not sum to 1.0; final score scale will be affected");
        }
        Self { weights }
    }

    /// Returns the weighted final score and the per-metric normalized scores,
    /// both rounded to 2 decimals. The final score is accumulated from the
    /// unrounded normalized values. Metrics absent from the weight table are
    /// skipped; a partial metric set is not re-normalized to sum to 1.
    pub fn calculate_final_score(
        &self,
        raw_scores: &HashMap<Metric, RawScore>,
    ) -> (f64, HashMap<Metric, f64>) {
        let mut final_score = 0.0;
        let mut normalized = HashMap::new();

        for (&metric, &raw) in raw_scores {
            let Some(weight) = self.weights.get(&metric) else {
                continue;
            };
            let value = raw.normalized();
            final_score += value * weight;
            normalized.insert(metric, round2(value));
        }

        (round2(final_score), normalized)
    }
}
