use scoring_core::{
    capped, pct_diff, safe_number, share, GrowthInput, GrowthScore, Insight, Ladder, Pillar,
    PillarScorer, Step,
};

pub const HISTORICAL_GROWTH_MAX: f64 = 40.0;
pub const ANALYST_EXPECTATIONS_MAX: f64 = 30.0;
pub const GROWTH_QUALITY_MAX: f64 = 30.0;

/// Shared by revenue and earnings YoY growth; contraction earns nothing.
const YOY_GROWTH: Ladder = Ladder::new(&[
    Step::at_least(25.0, 20.0),
    Step::at_least(15.0, 16.0),
    Step::at_least(10.0, 12.0),
    Step::at_least(5.0, 8.0),
    Step::above(0.0, 4.0),
]);

/// Percent by which forward P/E sits below trailing P/E.
const FORWARD_PE_IMPROVEMENT: Ladder = Ladder::new(&[
    Step::at_least(30.0, 15.0),
    Step::at_least(20.0, 12.0),
    Step::at_least(10.0, 8.0),
    Step::above(0.0, 4.0),
]);

const ANALYST_UPSIDE: Ladder = Ladder::new(&[
    Step::at_least(30.0, 15.0),
    Step::at_least(20.0, 12.0),
    Step::at_least(10.0, 8.0),
    Step::above(0.0, 4.0),
]);

const NET_MARGIN: Ladder = Ladder::new(&[
    Step::at_least(20.0, 15.0),
    Step::at_least(15.0, 12.0),
    Step::at_least(10.0, 8.0),
    Step::at_least(5.0, 4.0),
]);

const OPERATING_MARGIN: Ladder = Ladder::new(&[
    Step::at_least(25.0, 15.0),
    Step::at_least(20.0, 12.0),
    Step::at_least(15.0, 8.0),
    Step::at_least(10.0, 4.0),
]);

/// Historical growth, analyst expectations and the margin quality behind growth.
pub struct GrowthScorer;

impl GrowthScorer {
    pub fn new() -> Self {
        Self
    }

    /// `(trailing - forward) / trailing` in percent, when both P/Es are positive.
    fn forward_pe_improvement(input: &GrowthInput) -> Option<f64> {
        let trailing = safe_number(input.trailing_pe, 0.0);
        let forward = safe_number(input.forward_pe, 0.0);
        if trailing > 0.0 && forward > 0.0 {
            Some(((trailing - forward) / trailing) * 100.0)
        } else {
            None
        }
    }

    fn analyst_upside(input: &GrowthInput) -> Option<f64> {
        let price = safe_number(input.current_price, 0.0);
        let target = safe_number(input.analyst_target_price, 0.0);
        if price > 0.0 && target > 0.0 {
            Some(pct_diff(target, price))
        } else {
            None
        }
    }

    fn historical_growth(&self, input: &GrowthInput) -> f64 {
        let points = YOY_GROWTH.score(safe_number(input.quarterly_revenue_growth_yoy, 0.0))
            + YOY_GROWTH.score(safe_number(input.quarterly_earnings_growth_yoy, 0.0));
        capped(points, HISTORICAL_GROWTH_MAX)
    }

    fn analyst_expectations(&self, input: &GrowthInput) -> f64 {
        let points = Self::forward_pe_improvement(input).map_or(0.0, |v| FORWARD_PE_IMPROVEMENT.score(v))
            + Self::analyst_upside(input).map_or(0.0, |v| ANALYST_UPSIDE.score(v));
        capped(points, ANALYST_EXPECTATIONS_MAX)
    }

    fn growth_quality(&self, input: &GrowthInput) -> f64 {
        let points = NET_MARGIN.score(safe_number(input.net_margin, 0.0))
            + OPERATING_MARGIN.score(safe_number(input.operating_margin, 0.0));
        capped(points, GROWTH_QUALITY_MAX)
    }

    fn insights(
        &self,
        input: &GrowthInput,
        historical_growth: f64,
        analyst_expectations: f64,
        growth_quality: f64,
    ) -> Vec<Insight> {
        let mut insights = Vec::new();
        let historical_share = share(historical_growth, HISTORICAL_GROWTH_MAX);
        let expectations_share = share(analyst_expectations, ANALYST_EXPECTATIONS_MAX);
        let quality_share = share(growth_quality, GROWTH_QUALITY_MAX);

        let revenue_growth = safe_number(input.quarterly_revenue_growth_yoy, 0.0);
        let earnings_growth = safe_number(input.quarterly_earnings_growth_yoy, 0.0);
        let combined = (revenue_growth + earnings_growth) / 2.0;
        if combined >= 20.0 {
            insights.push(
                Insight::positive(format!(
                    "Strong growth: revenue {:+.1}%, earnings {:+.1}% YoY",
                    revenue_growth, earnings_growth
                ))
                .with_score(historical_share),
            );
        } else if combined >= 10.0 {
            insights.push(
                Insight::positive(format!(
                    "Solid growth: revenue {:+.1}%, earnings {:+.1}% YoY",
                    revenue_growth, earnings_growth
                ))
                .with_score(historical_share),
            );
        } else if revenue_growth < 0.0 && earnings_growth < 0.0 {
            insights.push(
                Insight::negative(format!(
                    "Shrinking business: revenue {:+.1}%, earnings {:+.1}% YoY",
                    revenue_growth, earnings_growth
                ))
                .with_score(historical_share),
            );
        }

        if let Some(upside) = Self::analyst_upside(input) {
            if upside >= 20.0 {
                insights.push(
                    Insight::positive(format!("Analyst target implies {:.1}% upside", upside))
                        .with_score(expectations_share),
                );
            } else if upside < 0.0 {
                insights.push(
                    Insight::warning(format!(
                        "Trading above analyst target ({:.1}% downside)",
                        upside.abs()
                    ))
                    .with_score(expectations_share),
                );
            }
        }

        if let Some(improvement) = Self::forward_pe_improvement(input) {
            if improvement >= 10.0 {
                insights.push(
                    Insight::positive(format!(
                        "Earnings expected to grow: forward P/E {:.1}% below trailing",
                        improvement
                    ))
                    .with_score(expectations_share),
                );
            } else if improvement <= -10.0 {
                insights.push(
                    Insight::warning(format!(
                        "Earnings expected to shrink: forward P/E {:.1}% above trailing",
                        improvement.abs()
                    ))
                    .with_score(expectations_share),
                );
            }
        }

        let net_margin = safe_number(input.net_margin, 0.0);
        let operating_margin = safe_number(input.operating_margin, 0.0);
        if net_margin >= 20.0 && operating_margin >= 25.0 {
            insights.push(
                Insight::positive("High-margin growth: profits scale with revenue")
                    .with_score(quality_share),
            );
        } else if net_margin < 5.0 || operating_margin < 5.0 {
            insights.push(
                Insight::warning("Low-margin growth: thin profits behind revenue gains")
                    .with_score(quality_share),
            );
        }

        insights
    }
}

impl PillarScorer for GrowthScorer {
    const PILLAR: Pillar = Pillar::Growth;

    type Input = GrowthInput;
    type Output = GrowthScore;

    fn score(&self, input: &GrowthInput) -> GrowthScore {
        let historical_growth = self.historical_growth(input);
        let analyst_expectations = self.analyst_expectations(input);
        let growth_quality = self.growth_quality(input);

        GrowthScore {
            total: historical_growth + analyst_expectations + growth_quality,
            historical_growth,
            analyst_expectations,
            growth_quality,
            insights: self.insights(input, historical_growth, analyst_expectations, growth_quality),
        }
    }
}

impl Default for GrowthScorer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scoring_core::InsightKind;

    #[test]
    fn test_high_growth_company() {
        let input = GrowthInput {
            quarterly_revenue_growth_yoy: Some(30.0),
            quarterly_earnings_growth_yoy: Some(40.0),
            trailing_pe: Some(40.0),
            forward_pe: Some(26.0),
            analyst_target_price: Some(135.0),
            current_price: Some(100.0),
            net_margin: Some(24.0),
            operating_margin: Some(30.0),
        };
        let score = GrowthScorer::new().score(&input);
        assert_eq!(score.historical_growth, 40.0);
        // 35% forward improvement -> 15, 35% upside -> 15
        assert_eq!(score.analyst_expectations, 30.0);
        assert_eq!(score.growth_quality, 30.0);
        assert_eq!(score.total, 100.0);

        assert_eq!(score.insights.len(), 4);
        assert!(score.insights.iter().all(|i| i.kind == InsightKind::Positive));
        assert!(score.insights[0].message.starts_with("Strong growth"));
    }

    #[test]
    fn test_analyst_components_need_positive_inputs() {
        let input = GrowthInput {
            trailing_pe: Some(-12.0),
            forward_pe: Some(10.0),
            analyst_target_price: Some(50.0),
            current_price: None,
            ..Default::default()
        };
        let score = GrowthScorer::new().score(&input);
        assert_eq!(score.analyst_expectations, 0.0);
        assert!(!score.insights.iter().any(|i| i.message.contains("analyst")));
        assert!(!score.insights.iter().any(|i| i.message.contains("forward P/E")));
    }

    #[test]
    fn test_declining_low_margin_company() {
        let input = GrowthInput {
            quarterly_revenue_growth_yoy: Some(-8.0),
            quarterly_earnings_growth_yoy: Some(-20.0),
            trailing_pe: Some(15.0),
            forward_pe: Some(19.0),
            analyst_target_price: Some(45.0),
            current_price: Some(50.0),
            net_margin: Some(2.0),
            operating_margin: Some(6.0),
        };
        let score = GrowthScorer::new().score(&input);
        assert_eq!(score.historical_growth, 0.0);
        assert_eq!(score.analyst_expectations, 0.0);
        assert_eq!(score.growth_quality, 0.0);

        let kinds: Vec<InsightKind> = score.insights.iter().map(|i| i.kind).collect();
        assert_eq!(
            kinds,
            vec![
                InsightKind::Negative,
                InsightKind::Warning,
                InsightKind::Warning,
                InsightKind::Warning,
            ]
        );
    }

    #[test]
    fn test_solid_growth_tier() {
        let input = GrowthInput {
            quarterly_revenue_growth_yoy: Some(8.0),
            quarterly_earnings_growth_yoy: Some(14.0),
            net_margin: Some(12.0),
            operating_margin: Some(16.0),
            ..Default::default()
        };
        let score = GrowthScorer::new().score(&input);
        assert_eq!(score.historical_growth, 8.0 + 12.0);
        assert_eq!(score.growth_quality, 8.0 + 8.0);
        assert_eq!(score.insights.len(), 1);
        assert!(score.insights[0].message.starts_with("Solid growth"));
    }

    #[test]
    fn test_all_null_input() {
        let score = GrowthScorer::new().score(&GrowthInput::default());
        assert_eq!(score.total, 0.0);
        // Zero margins read as low-margin growth
        assert_eq!(score.insights.len(), 1);
        assert_eq!(score.insights[0].kind, InsightKind::Warning);
    }
}
