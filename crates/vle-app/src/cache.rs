//! Content-fingerprinted cache of fit results.

use std::collections::HashMap;

use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::debug;
use vle_models::{FitOptions, FitResult, ModelKind};

#[derive(Serialize)]
struct FitKey<'a, D: Serialize> {
    model: ModelKind,
    constants: &'a [f64],
    initial_energy: f64,
    max_evaluations: usize,
    data: &'a D,
}

/// SHA-256 over the model, its constants, the regression settings and the data.
pub fn fit_fingerprint<D: Serialize>(
    model: ModelKind,
    constants: &[f64],
    options: &FitOptions,
    data: &D,
) -> String {
    let key = FitKey {
        model,
        constants,
        initial_energy: options.initial_energy,
        max_evaluations: options.solver.max_evaluations,
        data,
    };

    let mut hasher = Sha256::new();
    let key_json = serde_json::to_string(&key).unwrap_or_default();
    hasher.update(key_json.as_bytes());

    let result = hasher.finalize();
    format!("{:x}", result)
}

/// Fit results keyed by [`fit_fingerprint`]. Failed fits are not stored.
#[derive(Debug, Default)]
pub struct FitCache {
    entries: HashMap<String, FitResult>,
    hits: usize,
    misses: usize,
}

impl FitCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, key: &str) -> Option<FitResult> {
        match self.entries.get(key) {
            Some(fit) => {
                self.hits += 1;
                debug!(model = %fit.model, "fit cache hit");
                Some(fit.clone())
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    pub fn insert(&mut self, key: String, fit: FitResult) {
        self.entries.insert(key, fit);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
