//! Role prediction summaries: what each player guessed beside the truth.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::parse::RolePrediction;

/// Each player's parsed prediction beside the ground truth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionSummary {
    /// Predictor name and their parsed prediction, in speak order.
    pub predictions: Vec<(String, RolePrediction)>,
    /// Alive Spies.
    pub true_spies: BTreeSet<String>,
    /// Alive Blanks; empty when blanks are disabled.
    pub true_blanks: BTreeSet<String>,
}

impl PredictionSummary {
    /// How many of a player's spy guesses were right.
    pub fn spy_hits(&self, predictor: &str) -> usize {
        self.predictions
            .iter()
            .find(|(name, _)| name == predictor)
            .map(|(_, p)| p.spies.intersection(&self.true_spies).count())
            .unwrap_or(0)
    }
}
