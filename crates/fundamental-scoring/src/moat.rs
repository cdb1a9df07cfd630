use scoring_core::{
    capped, safe_number, share, Insight, Ladder, MoatClassification, MoatInput, MoatScore, Pillar,
    PillarScorer, Step,
};

pub const PRICING_POWER_MAX: f64 = 40.0;
pub const MARKET_POSITION_MAX: f64 = 30.0;
pub const DURABILITY_MAX: f64 = 30.0;

/// Market beta assumed when none is reported.
const NEUTRAL_BETA: f64 = 1.0;
const MEGA_CAP_BILLIONS: f64 = 200.0;

const GROSS_MARGIN: Ladder = Ladder::new(&[
    Step::at_least(60.0, 20.0),
    Step::at_least(40.0, 15.0),
    Step::at_least(30.0, 10.0),
    Step::at_least(20.0, 5.0),
]);

const OPERATING_MARGIN: Ladder = Ladder::new(&[
    Step::at_least(30.0, 20.0),
    Step::at_least(20.0, 15.0),
    Step::at_least(15.0, 10.0),
    Step::at_least(10.0, 5.0),
]);

/// Mega / large / mid / small cap, in billions.
const MARKET_CAP_BILLIONS: Ladder = Ladder::new(&[
    Step::at_least(MEGA_CAP_BILLIONS, 15.0),
    Step::at_least(10.0, 12.0),
    Step::at_least(2.0, 8.0),
    Step::at_least(0.3, 4.0),
]);

// Lower volatility is better
const BETA: Ladder = Ladder::new(&[
    Step::below(0.8, 15.0),
    Step::below(1.0, 12.0),
    Step::below(1.2, 8.0),
    Step::below(1.5, 4.0),
]);

const ROE: Ladder = Ladder::new(&[
    Step::at_least(20.0, 15.0),
    Step::at_least(15.0, 12.0),
    Step::at_least(10.0, 8.0),
    Step::at_least(5.0, 4.0),
]);

const ROA: Ladder = Ladder::new(&[
    Step::at_least(10.0, 15.0),
    Step::at_least(7.0, 12.0),
    Step::at_least(5.0, 8.0),
    Step::at_least(3.0, 4.0),
]);

/// Pricing power, market position and durability of returns.
pub struct MoatScorer;

impl MoatScorer {
    pub fn new() -> Self {
        Self
    }

    fn pricing_power(&self, input: &MoatInput) -> f64 {
        let points = GROSS_MARGIN.score(safe_number(input.gross_margin, 0.0))
            + OPERATING_MARGIN.score(safe_number(input.operating_margin, 0.0));
        capped(points, PRICING_POWER_MAX)
    }

    fn market_position(&self, input: &MoatInput) -> f64 {
        let cap_billions = safe_number(input.market_cap, 0.0) / 1e9;
        let points = MARKET_CAP_BILLIONS.score(cap_billions)
            + BETA.score(safe_number(input.beta, NEUTRAL_BETA));
        capped(points, MARKET_POSITION_MAX)
    }

    fn durability(&self, input: &MoatInput) -> f64 {
        let points = ROE.score(safe_number(input.roe, 0.0)) + ROA.score(safe_number(input.roa, 0.0));
        capped(points, DURABILITY_MAX)
    }

    fn insights(
        &self,
        input: &MoatInput,
        total: f64,
        classification: MoatClassification,
        pricing_power: f64,
        market_position: f64,
        durability: f64,
    ) -> Vec<Insight> {
        let mut insights = Vec::with_capacity(5);

        insights.push(match classification {
            MoatClassification::Wide => Insight::positive(format!(
                "Wide Moat: durable competitive advantage (moat score {:.0})",
                total
            )),
            MoatClassification::Narrow => Insight::positive(format!(
                "Narrow Moat: some competitive advantage (moat score {:.0})",
                total
            )),
            MoatClassification::NoMoat => Insight::warning(format!(
                "No Moat: limited competitive advantage (moat score {:.0})",
                total
            )),
        }
        .with_score(total));

        let gross_margin = safe_number(input.gross_margin, 0.0);
        if gross_margin >= 60.0 {
            insights.push(
                Insight::positive(format!(
                    "Strong pricing power: gross margin {:.1}%",
                    gross_margin
                ))
                .with_score(share(pricing_power, PRICING_POWER_MAX)),
            );
        }

        let cap_billions = safe_number(input.market_cap, 0.0) / 1e9;
        if cap_billions >= MEGA_CAP_BILLIONS {
            insights.push(
                Insight::positive(format!(
                    "Dominant scale: ${:.0}B market cap",
                    cap_billions
                ))
                .with_score(share(market_position, MARKET_POSITION_MAX)),
            );
        }

        let beta = safe_number(input.beta, NEUTRAL_BETA);
        if beta > 1.5 {
            insights.push(
                Insight::warning(format!("High volatility: beta {:.2}", beta))
                    .with_score(share(market_position, MARKET_POSITION_MAX)),
            );
        }

        let roe = safe_number(input.roe, 0.0);
        if roe >= 15.0 {
            insights.push(
                Insight::positive(format!("Durable returns: ROE {:.1}%", roe))
                    .with_score(share(durability, DURABILITY_MAX)),
            );
        }

        insights
    }
}

impl PillarScorer for MoatScorer {
    const PILLAR: Pillar = Pillar::Moat;

    type Input = MoatInput;
    type Output = MoatScore;

    fn score(&self, input: &MoatInput) -> MoatScore {
        let pricing_power = self.pricing_power(input);
        let market_position = self.market_position(input);
        let durability = self.durability(input);
        let total = pricing_power + market_position + durability;
        let moat_classification = MoatClassification::from_score(total);

        MoatScore {
            total,
            pricing_power,
            market_position,
            durability,
            moat_classification,
            insights: self.insights(
                input,
                total,
                moat_classification,
                pricing_power,
                market_position,
                durability,
            ),
        }
    }
}

impl Default for MoatScorer {
    fn default() -> Self {
        Self::new()
    }
}
