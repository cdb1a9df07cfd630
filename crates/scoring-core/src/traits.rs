use crate::{GrowthScore, Insight, MomentumScore, MoatScore, Pillar, QualityScore, ValueScore};

/// Common view over the five sub-score records
pub trait PillarScore {
    fn total(&self) -> f64;
    fn insights(&self) -> &[Insight];
}

/// A scorer for one pillar. Scorers are stateless and must be deterministic.
pub trait PillarScorer: Send + Sync {
    const PILLAR: Pillar;

    type Input;
    type Output: PillarScore;

    fn score(&self, input: &Self::Input) -> Self::Output;
}

impl PillarScore for QualityScore {
    fn total(&self) -> f64 {
        self.total
    }

    fn insights(&self) -> &[Insight] {
        &self.insights
    }
}

impl PillarScore for MoatScore {
    fn total(&self) -> f64 {
        self.total
    }

    fn insights(&self) -> &[Insight] {
        &self.insights
    }
}

impl PillarScore for ValueScore {
    fn total(&self) -> f64 {
        self.total
    }

    fn insights(&self) -> &[Insight] {
        &self.insights
    }
}

impl PillarScore for GrowthScore {
    fn total(&self) -> f64 {
        self.total
    }

    fn insights(&self) -> &[Insight] {
        &self.insights
    }
}

impl PillarScore for MomentumScore {
    fn total(&self) -> f64 {
        self.total
    }

    fn insights(&self) -> &[Insight] {
        &self.insights
    }
}
