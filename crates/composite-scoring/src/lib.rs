//! Composite scoring: runs the five pillar scorers and folds them into one
//! weighted score, a letter grade and a ranked insight summary.

pub mod batch;
pub mod insights;

use chrono::{DateTime, Utc};
use fundamental_scoring::{GrowthScorer, MoatScorer, QualityScorer, ValueScorer};
use scoring_core::{
    ComprehensiveInput, CompositeScore, Grade, Pillar, PillarScorer, SectorAverages,
};
use technical_scoring::MomentumScorer;

use crate::insights::PillarSummary;

pub use batch::rank_by_total;

/// Weighted sum of pillar totals using the fixed pillar weights.
pub fn weighted_total(totals: &[(Pillar, f64)]) -> f64 {
    totals.iter().map(|(pillar, total)| total * pillar.weight()).sum()
}

/// Score one symbol with the built-in sector table.
pub fn calculate_composite_score(input: &ComprehensiveInput) -> CompositeScore {
    CompositeScoringEngine::new().score(input)
}

pub struct CompositeScoringEngine<'a> {
    quality: QualityScorer,
    moat: MoatScorer,
    value: ValueScorer<'a>,
    growth: GrowthScorer,
    momentum: MomentumScorer,
}

impl CompositeScoringEngine<'static> {
    pub fn new() -> Self {
        Self::with_sectors(SectorAverages::builtin())
    }
}

impl<'a> CompositeScoringEngine<'a> {
    pub fn with_sectors(sectors: &'a SectorAverages) -> Self {
        Self {
            quality: QualityScorer::new(),
            moat: MoatScorer::new(),
            value: ValueScorer::with_sectors(sectors),
            growth: GrowthScorer::new(),
            momentum: MomentumScorer::new(),
        }
    }

    pub fn score(&self, input: &ComprehensiveInput) -> CompositeScore {
        self.score_at(input, Utc::now())
    }

    /// Score with an explicit `calculated_at`; everything else depends only on `input`.
    pub fn score_at(&self, input: &ComprehensiveInput, calculated_at: DateTime<Utc>) -> CompositeScore {
        let quality = self.quality.score(&input.quality);
        let moat = self.moat.score(&input.moat);
        let value = self.value.score(&input.value);
        let growth = self.growth.score(&input.growth);
        let momentum = self.momentum.score(&input.momentum);

        tracing::debug!(
            symbol = %input.symbol,
            quality = quality.total,
            moat = moat.total,
            value = value.total,
            growth = growth.total,
            momentum = momentum.total,
            "Pillar scores computed"
        );

        let pillars = [
            PillarSummary::of(QualityScorer::PILLAR, &quality),
            PillarSummary::of(MoatScorer::PILLAR, &moat),
            PillarSummary::of(ValueScorer::PILLAR, &value),
            PillarSummary::of(GrowthScorer::PILLAR, &growth),
            PillarSummary::of(MomentumScorer::PILLAR, &momentum),
        ];
        let totals: Vec<(Pillar, f64)> = pillars.iter().map(|p| (p.pillar, p.total)).collect();

        let total_score = weighted_total(&totals);
        let grade = Grade::from_score(total_score);
        let insights = insights::synthesize(grade, total_score, &pillars);

        tracing::debug!(symbol = %input.symbol, total_score, %grade, "Composite score computed");

        CompositeScore {
            total_score,
            grade,
            quality,
            moat,
            value,
            growth,
            momentum,
            insights,
            calculated_at,
            symbol: input.symbol.clone(),
        }
    }
}

impl Default for CompositeScoringEngine<'static> {
    fn default() -> Self {
        Self::new()
    }
}
