use chrono::Utc;
use rayon::prelude::*;
use scoring_core::{ComprehensiveInput, CompositeScore};
use std::cmp::Ordering;

use crate::CompositeScoringEngine;

impl CompositeScoringEngine<'_> {
    /// Score many symbols in parallel. Results keep input order and share one
    /// `calculated_at` timestamp.
    pub fn score_batch(&self, inputs: &[ComprehensiveInput]) -> Vec<CompositeScore> {
        let calculated_at = Utc::now();
        tracing::info!("Scoring batch of {} symbols", inputs.len());

        inputs
            .par_iter()
            .map(|input| self.score_at(input, calculated_at))
            .collect()
    }
}

/// Sort by composite score, highest first. Equal scores keep their order.
pub fn rank_by_total(scores: &mut [CompositeScore]) {
    scores.sort_by(|a, b| {
        b.total_score
            .partial_cmp(&a.total_score)
            .unwrap_or(Ordering::Equal)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::blue_chip;

    #[test]
    fn test_batch_matches_single_scoring_and_order() {
        let engine = CompositeScoringEngine::new();
        let inputs = vec![
            blue_chip("AAPL"),
            ComprehensiveInput {
                symbol: "EMPTY".to_string(),
                ..Default::default()
            },
            blue_chip("MSFT"),
        ];

        let batch = engine.score_batch(&inputs);
        let symbols: Vec<&str> = batch.iter().map(|s| s.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["AAPL", "EMPTY", "MSFT"]);

        for (input, scored) in inputs.iter().zip(&batch) {
            let single = engine.score_at(input, scored.calculated_at);
            assert_eq!(&single, scored);
        }
        assert!(batch.iter().all(|s| s.calculated_at == batch[0].calculated_at));
    }

    #[test]
    fn test_rank_by_total() {
        let engine = CompositeScoringEngine::new();
        let mut scores = engine.score_batch(&[
            ComprehensiveInput {
                symbol: "EMPTY".to_string(),
                ..Default::default()
            },
            blue_chip("AAPL"),
        ]);
        rank_by_total(&mut scores);
        assert_eq!(scores[0].symbol, "AAPL");
        assert!(scores[0].total_score >= scores[1].total_score);
    }

    #[test]
    fn test_empty_batch() {
        assert!(CompositeScoringEngine::new().score_batch(&[]).is_empty());
    }
}
