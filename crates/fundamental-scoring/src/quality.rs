use scoring_core::{
    capped, safe_number, share, Insight, Ladder, Pillar, PillarScorer, QualityInput, QualityScore,
    Step,
};

pub const PROFITABILITY_MAX: f64 = 40.0;
pub const FINANCIAL_HEALTH_MAX: f64 = 30.0;
pub const GROWTH_CONSISTENCY_MAX: f64 = 30.0;

/// Substitute for a missing debt-to-equity ratio: scores 0 on the inverted ladder.
const UNKNOWN_RATIO: f64 = 999.0;

const ROE: Ladder = Ladder::new(&[
    Step::at_least(20.0, 15.0),
    Step::at_least(15.0, 12.0),
    Step::at_least(10.0, 8.0),
    Step::at_least(5.0, 4.0),
]);

const ROA: Ladder = Ladder::new(&[
    Step::at_least(10.0, 10.0),
    Step::at_least(7.0, 8.0),
    Step::at_least(5.0, 6.0),
    Step::at_least(3.0, 3.0),
]);

const NET_MARGIN: Ladder = Ladder::new(&[
    Step::at_least(20.0, 8.0),
    Step::at_least(15.0, 6.0),
    Step::at_least(10.0, 4.0),
    Step::at_least(5.0, 2.0),
]);

const OPERATING_MARGIN: Ladder = Ladder::new(&[
    Step::at_least(20.0, 7.0),
    Step::at_least(15.0, 5.0),
    Step::at_least(10.0, 3.0),
    Step::at_least(5.0, 1.0),
]);

// Lower leverage is better
const DEBT_TO_EQUITY: Ladder = Ladder::new(&[
    Step::below(0.3, 15.0),
    Step::below(0.5, 12.0),
    Step::below(1.0, 8.0),
    Step::below(2.0, 4.0),
]);

const CURRENT_RATIO: Ladder = Ladder::new(&[
    Step::at_least(2.0, 15.0),
    Step::at_least(1.5, 12.0),
    Step::at_least(1.2, 8.0),
    Step::at_least(1.0, 4.0),
]);

/// Shared by revenue and earnings YoY growth.
const YOY_GROWTH: Ladder = Ladder::new(&[
    Step::at_least(20.0, 15.0),
    Step::at_least(10.0, 12.0),
    Step::at_least(5.0, 8.0),
    Step::above(0.0, 4.0),
]);

/// Profitability, balance-sheet health and growth consistency.
pub struct QualityScorer;

impl QualityScorer {
    pub fn new() -> Self {
        Self
    }

    fn profitability(&self, input: &QualityInput) -> f64 {
        let points = ROE.score(safe_number(input.roe, 0.0))
            + ROA.score(safe_number(input.roa, 0.0))
            + NET_MARGIN.score(safe_number(input.net_margin, 0.0))
            + OPERATING_MARGIN.score(safe_number(input.operating_margin, 0.0));
        capped(points, PROFITABILITY_MAX)
    }

    fn financial_health(&self, input: &QualityInput) -> f64 {
        let points = DEBT_TO_EQUITY.score(safe_number(input.debt_to_equity, UNKNOWN_RATIO))
            + CURRENT_RATIO.score(safe_number(input.current_ratio, 0.0));
        capped(points, FINANCIAL_HEALTH_MAX)
    }

    fn growth_consistency(&self, input: &QualityInput) -> f64 {
        let points = YOY_GROWTH.score(safe_number(input.quarterly_revenue_growth_yoy, 0.0))
            + YOY_GROWTH.score(safe_number(input.quarterly_earnings_growth_yoy, 0.0));
        capped(points, GROWTH_CONSISTENCY_MAX)
    }

    fn insights(
        &self,
        input: &QualityInput,
        profitability: f64,
        financial_health: f64,
        growth_consistency: f64,
    ) -> Vec<Insight> {
        let mut insights = Vec::new();
        let roe = safe_number(input.roe, 0.0);
        let net_margin = safe_number(input.net_margin, 0.0);
        let profitability_share = share(profitability, PROFITABILITY_MAX);
        let health_share = share(financial_health, FINANCIAL_HEALTH_MAX);
        let growth_share = share(growth_consistency, GROWTH_CONSISTENCY_MAX);

        if roe >= 15.0 || net_margin >= 15.0 {
            insights.push(
                Insight::positive(format!(
                    "High profitability: ROE {:.1}%, net margin {:.1}%",
                    roe, net_margin
                ))
                .with_score(profitability_share),
            );
        }
        if roe < 5.0 {
            insights.push(
                Insight::negative(format!("Low return on equity ({:.1}%)", roe))
                    .with_score(profitability_share),
            );
        }

        // Balance-sheet call-outs only fire on reported values
        if let Some(d2e) = input.debt_to_equity {
            if d2e < 0.5 {
                insights.push(
                    Insight::positive(format!("Conservative balance sheet (D/E {:.2})", d2e))
                        .with_score(health_share),
                );
            } else if d2e > 2.0 {
                insights.push(
                    Insight::warning(format!("High leverage (D/E {:.2})", d2e))
                        .with_score(health_share),
                );
            }
        }
        if let Some(current_ratio) = input.current_ratio {
            if current_ratio >= 2.0 {
                insights.push(
                    Insight::positive(format!("Strong liquidity (current ratio {:.2})", current_ratio))
                        .with_score(health_share),
                );
            } else if current_ratio < 1.0 {
                insights.push(
                    Insight::warning(format!(
                        "Liquidity risk (current ratio {:.2})",
                        current_ratio
                    ))
                    .with_score(health_share),
                );
            }
        }

        let revenue_growth = safe_number(input.quarterly_revenue_growth_yoy, 0.0);
        let earnings_growth = safe_number(input.quarterly_earnings_growth_yoy, 0.0);
        if revenue_growth > 0.0 && earnings_growth > 0.0 {
            insights.push(
                Insight::positive(format!(
                    "Consistent growth: revenue {:+.1}%, earnings {:+.1}% YoY",
                    revenue_growth, earnings_growth
                ))
                .with_score(growth_share),
            );
        } else if revenue_growth < 0.0 && earnings_growth < 0.0 {
            insights.push(
                Insight::negative("Revenue and earnings both declining YoY")
                    .with_score(growth_share),
            );
        }

        insights
    }
}

impl PillarScorer for QualityScorer {
    const PILLAR: Pillar = Pillar::Quality;

    type Input = QualityInput;
    type Output = QualityScore;

    fn score(&self, input: &QualityInput) -> QualityScore {
        let profitability = self.profitability(input);
        let financial_health = self.financial_health(input);
        let growth_consistency = self.growth_consistency(input);

        QualityScore {
            total: profitability + financial_health + growth_consistency,
            profitability,
            financial_health,
            growth_consistency,
            insights: self.insights(input, profitability, financial_health, growth_consistency),
        }
    }
}

impl Default for QualityScorer {
    fn default() -> Self {
        Self::new()
    }
}
