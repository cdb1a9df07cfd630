use scoring_core::{
    capped, pct_diff, safe_number, share, Insight, Ladder, Pillar, PillarScorer, SectorAverage,
    SectorAverages, Step, ValueInput, ValueScore, DEFAULT_SECTOR,
};

pub const VALUATION_MULTIPLES_MAX: f64 = 50.0;
pub const PRICE_POSITION_MAX: f64 = 30.0;
pub const MARGIN_OF_SAFETY_MAX: f64 = 20.0;

/// Substitute for a missing PEG ratio: scores 0 on the inverted ladder.
const UNKNOWN_RATIO: f64 = 999.0;

const PEG: Ladder = Ladder::new(&[
    Step::below(0.5, 20.0),
    Step::below(1.0, 16.0),
    Step::below(1.5, 10.0),
    Step::below(2.0, 5.0),
]);

/// P/E divided by the sector P/E.
const PE_VS_SECTOR: Ladder = Ladder::new(&[
    Step::below(0.7, 15.0),
    Step::below(0.85, 12.0),
    Step::below(1.0, 9.0),
    Step::below(1.15, 6.0),
    Step::below(1.3, 3.0),
]);

const PB_VS_SECTOR: Ladder = Ladder::new(&[
    Step::below(0.7, 8.0),
    Step::below(1.0, 6.0),
    Step::below(1.3, 3.0),
]);

const EV_EBITDA_VS_SECTOR: Ladder = Ladder::new(&[
    Step::below(0.7, 7.0),
    Step::below(1.0, 5.0),
    Step::below(1.3, 2.0),
]);

/// Position of the price inside its 52-week range, 0.0 = at the low.
const RANGE_POSITION: Ladder = Ladder::with_fallback(
    &[
        Step::at_most(0.2, 30.0),
        Step::at_most(0.4, 25.0),
        Step::at_most(0.6, 18.0),
        Step::at_most(0.8, 10.0),
    ],
    5.0,
);

const PEG_SAFETY: Ladder = Ladder::new(&[
    Step::below(0.8, 10.0),
    Step::below(1.0, 7.0),
    Step::below(1.5, 4.0),
]);

/// Percent above the 52-week low.
const DISTANCE_FROM_LOW: Ladder = Ladder::new(&[
    Step::at_most(10.0, 10.0),
    Step::at_most(20.0, 7.0),
    Step::at_most(35.0, 4.0),
    Step::at_most(50.0, 2.0),
]);

/// Price, 52-week high and 52-week low, all strictly positive.
struct PriceRange {
    price: f64,
    high: f64,
    low: f64,
}

impl PriceRange {
    fn from_input(input: &ValueInput) -> Option<Self> {
        let price = safe_number(input.current_price, 0.0);
        let high = safe_number(input.fifty_two_week_high, 0.0);
        let low = safe_number(input.fifty_two_week_low, 0.0);
        if price <= 0.0 || high <= 0.0 || low <= 0.0 {
            return None;
        }
        Some(Self { price, high, low })
    }

    /// `None` for a degenerate range (high <= low).
    fn position(&self) -> Option<f64> {
        let width = self.high - self.low;
        if width <= 0.0 {
            return None;
        }
        Some((self.price - self.low) / width)
    }

    fn pct_above_low(&self) -> f64 {
        pct_diff(self.price, self.low)
    }
}

/// Multiples against sector averages, 52-week price position and margin of safety.
pub struct ValueScorer<'a> {
    sectors: &'a SectorAverages,
}

impl ValueScorer<'static> {
    pub fn new() -> Self {
        Self::with_sectors(SectorAverages::builtin())
    }
}

impl<'a> ValueScorer<'a> {
    pub fn with_sectors(sectors: &'a SectorAverages) -> Self {
        Self { sectors }
    }

    fn sector_average(&self, input: &ValueInput) -> &SectorAverage {
        self.sectors.lookup(input.sector.as_deref())
    }

    /// Name of the row `sector_average` resolved to.
    fn sector_label<'i>(&self, input: &'i ValueInput) -> &'i str {
        input
            .sector
            .as_deref()
            .filter(|name| self.sectors.contains(name))
            .unwrap_or(DEFAULT_SECTOR)
    }

    /// PEG ratio when it is strictly positive, else the "unknown" sentinel.
    fn effective_peg(input: &ValueInput) -> f64 {
        let peg = safe_number(input.peg_ratio, UNKNOWN_RATIO);
        if peg > 0.0 {
            peg
        } else {
            UNKNOWN_RATIO
        }
    }

    fn relative_points(ladder: &Ladder, value: Option<f64>, sector_value: f64) -> f64 {
        let value = safe_number(value, 0.0);
        if value > 0.0 && sector_value > 0.0 {
            ladder.score(value / sector_value)
        } else {
            0.0
        }
    }

    fn valuation_multiples(&self, input: &ValueInput) -> f64 {
        let sector = self.sector_average(input);
        let points = PEG.score(Self::effective_peg(input))
            + Self::relative_points(&PE_VS_SECTOR, input.pe_ratio, sector.pe)
            + Self::relative_points(&PB_VS_SECTOR, input.pb_ratio, sector.pb)
            + Self::relative_points(&EV_EBITDA_VS_SECTOR, input.ev_to_ebitda, sector.ev_to_ebitda);
        capped(points, VALUATION_MULTIPLES_MAX)
    }

    fn price_position(&self, input: &ValueInput) -> f64 {
        let points = PriceRange::from_input(input)
            .and_then(|range| range.position())
            .map_or(0.0, |position| RANGE_POSITION.score(position));
        capped(points, PRICE_POSITION_MAX)
    }

    fn margin_of_safety(&self, input: &ValueInput) -> f64 {
        let Some(range) = PriceRange::from_input(input) else {
            return 0.0;
        };
        let points = PEG_SAFETY.score(Self::effective_peg(input))
            + DISTANCE_FROM_LOW.score(range.pct_above_low());
        capped(points, MARGIN_OF_SAFETY_MAX)
    }

    fn insights(
        &self,
        input: &ValueInput,
        valuation_multiples: f64,
        price_position: f64,
        margin_of_safety: f64,
    ) -> Vec<Insight> {
        let mut insights = Vec::new();
        let multiples_share = share(valuation_multiples, VALUATION_MULTIPLES_MAX);

        let peg = Self::effective_peg(input);
        if peg < 1.0 {
            insights.push(
                Insight::positive(format!(
                    "Undervalued relative to growth (PEG {:.2}): growth at a reasonable price",
                    peg
                ))
                .with_score(multiples_share),
            );
        } else if peg > 2.0 && peg != UNKNOWN_RATIO {
            insights.push(
                Insight::warning(format!("Overvalued relative to growth (PEG {:.2})", peg))
                    .with_score(multiples_share),
            );
        }

        let sector = self.sector_average(input);
        let pe = safe_number(input.pe_ratio, 0.0);
        if pe > 0.0 && sector.pe > 0.0 {
            let deviation = pct_diff(pe, sector.pe);
            let sector_name = self.sector_label(input);
            if deviation <= -30.0 {
                insights.push(
                    Insight::positive(format!(
                        "P/E {:.1} is {:.0}% below the {} average",
                        pe,
                        deviation.abs(),
                        sector_name
                    ))
                    .with_score(multiples_share),
                );
            } else if deviation <= -15.0 {
                insights.push(
                    Insight::positive(format!(
                        "P/E {:.1} trades below the {} average",
                        pe, sector_name
                    ))
                    .with_score(multiples_share),
                );
            } else if deviation >= 30.0 {
                insights.push(
                    Insight::warning(format!(
                        "P/E {:.1} is {:.0}% above the {} average",
                        pe, deviation, sector_name
                    ))
                    .with_score(multiples_share),
                );
            } else if deviation >= 15.0 {
                insights.push(
                    Insight::warning(format!(
                        "P/E {:.1} trades above the {} average",
                        pe, sector_name
                    ))
                    .with_score(multiples_share),
                );
            }
        }

        if let Some(position) = PriceRange::from_input(input).and_then(|r| r.position()) {
            let position_pct = position * 100.0;
            if position_pct <= 25.0 {
                insights.push(
                    Insight::positive(format!(
                        "Near 52-week low ({:.0}% of range): potential buying opportunity",
                        position_pct
                    ))
                    .with_score(share(price_position, PRICE_POSITION_MAX)),
                );
            } else if position_pct >= 85.0 {
                insights.push(
                    Insight::warning(format!(
                        "Near 52-week high ({:.0}% of range): limited upside, use caution",
                        position_pct
                    ))
                    .with_score(share(price_position, PRICE_POSITION_MAX)),
                );
            }
        }

        if margin_of_safety >= 15.0 {
            insights.push(
                Insight::positive("Strong margin of safety")
                    .with_score(share(margin_of_safety, MARGIN_OF_SAFETY_MAX)),
            );
        } else if margin_of_safety < 8.0 {
            insights.push(
                Insight::warning("Thin margin of safety")
                    .with_score(share(margin_of_safety, MARGIN_OF_SAFETY_MAX)),
            );
        }

        insights
    }
}

impl PillarScorer for ValueScorer<'_> {
    const PILLAR: Pillar = Pillar::Value;

    type Input = ValueInput;
    type Output = ValueScore;

    fn score(&self, input: &ValueInput) -> ValueScore {
        let valuation_multiples = self.valuation_multiples(input);
        let price_position = self.price_position(input);
        let margin_of_safety = self.margin_of_safety(input);

        ValueScore {
            total: valuation_multiples + price_position + margin_of_safety,
            valuation_multiples,
            price_position,
            margin_of_safety,
            insights: self.insights(input, valuation_multiples, price_position, margin_of_safety),
        }
    }
}

impl Default for ValueScorer<'static> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scoring_core::InsightKind;

    fn base_input() -> ValueInput {
        ValueInput {
            pe_ratio: Some(13.0),
            peg_ratio: Some(0.9),
            pb_ratio: Some(3.0),
            ev_to_ebitda: Some(12.0),
            current_price: Some(105.0),
            fifty_two_week_high: Some(150.0),
            fifty_two_week_low: Some(100.0),
            sector: Some("Default".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_undervalued_stock_near_low() {
        let score = ValueScorer::new().score(&base_input());
        // PEG 16 + P/E 0.65x -> 15 + P/B 0.86x -> 6 + EV/EBITDA 0.86x -> 5
        assert_eq!(score.valuation_multiples, 42.0);
        // (105 - 100) / 50 = 0.1
        assert_eq!(score.price_position, 30.0);
        // PEG 0.9 -> 7, 5% above the low -> 10
        assert_eq!(score.margin_of_safety, 17.0);
        assert_eq!(score.total, 89.0);

        let messages: Vec<&str> = score.insights.iter().map(|i| i.message.as_str()).collect();
        assert!(messages[0].contains("PEG 0.90"));
        assert!(messages[1].contains("35% below"));
        assert!(messages[2].contains("buying opportunity"));
        assert_eq!(messages[3], "Strong margin of safety");
    }

    #[test]
    fn test_unknown_sector_uses_default_row() {
        let mut input = base_input();
        input.sector = Some("NonexistentSector".to_string());
        let unknown = ValueScorer::new().score(&input);
        input.sector = None;
        let absent = ValueScorer::new().score(&input);
        let baseline = ValueScorer::new().score(&base_input());

        assert_eq!(unknown.valuation_multiples, baseline.valuation_multiples);
        assert_eq!(absent.total, baseline.total);
    }

    #[test]
    fn test_custom_sector_table() {
        let mut row = *SectorAverages::builtin().default_row();
        row.pe = 10.0;
        let mut rows = std::collections::HashMap::new();
        rows.insert("Default".to_string(), row);
        let table = SectorAverages::from_rows(rows).unwrap();

        let score = ValueScorer::with_sectors(&table).score(&base_input());
        // P/E 13 is 1.3x the custom average: no points, and a warning
        assert_eq!(score.valuation_multiples, 27.0);
        assert!(score
            .insights
            .iter()
            .any(|i| i.kind == InsightKind::Warning && i.message.contains("above the Default average")));
    }

    #[test]
    fn test_unknown_sector_is_labelled_default() {
        let input = ValueInput {
            pe_ratio: Some(10.0),
            sector: Some("NonexistentSector".to_string()),
            ..Default::default()
        };
        let score = ValueScorer::new().score(&input);
        // Default P/E is 20
        assert!(score
            .insights
            .iter()
            .any(|i| i.message == "P/E 10.0 is 50% below the Default average"));
        assert!(!score.insights.iter().any(|i| i.message.contains("NonexistentSector")));

        let no_sector = ValueScorer::new().score(&ValueInput {
            pe_ratio: Some(10.0),
            ..Default::default()
        });
        assert_eq!(no_sector.insights, score.insights);
    }

    #[test]
    fn test_non_positive_prices_zero_out_range_components() {
        let mut input = base_input();
        input.fifty_two_week_low = Some(0.0);
        let score = ValueScorer::new().score(&input);
        assert_eq!(score.price_position, 0.0);
        // The PEG half of margin of safety is dropped too
        assert_eq!(score.margin_of_safety, 0.0);
        assert!(!score.insights.iter().any(|i| i.message.contains("52-week")));
    }

    #[test]
    fn test_degenerate_range() {
        let mut input = base_input();
        input.current_price = Some(100.0);
        input.fifty_two_week_high = Some(100.0);
        input.fifty_two_week_low = Some(100.0);
        let score = ValueScorer::new().score(&input);
        assert_eq!(score.price_position, 0.0);
        assert_eq!(score.margin_of_safety, 17.0);
    }

    #[test]
    fn test_expensive_stock_near_high() {
        let input = ValueInput {
            pe_ratio: Some(45.0),
            peg_ratio: Some(2.6),
            pb_ratio: Some(12.0),
            ev_to_ebitda: Some(30.0),
            current_price: Some(198.0),
            fifty_two_week_high: Some(200.0),
            fifty_two_week_low: Some(100.0),
            sector: Some("Technology".to_string()),
            ..Default::default()
        };
        let score = ValueScorer::new().score(&input);
        assert_eq!(score.valuation_multiples, 0.0);
        assert_eq!(score.price_position, 5.0);
        assert_eq!(score.margin_of_safety, 0.0);

        let warnings = score
            .insights
            .iter()
            .filter(|i| i.kind == InsightKind::Warning)
            .count();
        assert_eq!(warnings, 4);
        assert!(score.insights.iter().any(|i| i.message.contains("Technology")));
    }

    #[test]
    fn test_negative_peg_is_treated_as_unknown() {
        let input = ValueInput {
            peg_ratio: Some(-0.4),
            ..Default::default()
        };
        let score = ValueScorer::new().score(&input);
        assert_eq!(score.valuation_multiples, 0.0);
        assert!(!score.insights.iter().any(|i| i.message.contains("PEG")));
    }

    #[test]
    fn test_all_null_input() {
        let score = ValueScorer::new().score(&ValueInput::default());
        assert_eq!(score.total, 0.0);
        assert_eq!(score.insights.len(), 1);
        assert_eq!(score.insights[0].message, "Thin margin of safety");
    }
}
