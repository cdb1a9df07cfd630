use scoring_core::{
    capped, pct_diff, safe_number, share, Insight, Ladder, MomentumInput, MomentumScore, Pillar,
    PillarScorer, Step,
};

pub const TREND_MAX: f64 = 40.0;
pub const INDICATORS_MAX: f64 = 30.0;
pub const VOLUME_MAX: f64 = 30.0;

/// RSI assumed when none is reported.
const NEUTRAL_RSI: f64 = 50.0;
/// MACD points when there is no usable MACD reading.
pub const MACD_NO_SIGNAL_POINTS: f64 = 7.0;
/// Volume points when either volume figure is missing.
pub const VOLUME_NO_DATA_POINTS: f64 = 15.0;

/// Percent above (or below) the 200-day SMA.
const PRICE_VS_SMA200: Ladder = Ladder::new(&[
    Step::at_least(10.0, 15.0),
    Step::at_least(5.0, 12.0),
    Step::at_least(0.0, 9.0),
    Step::at_least(-5.0, 5.0),
    Step::at_least(-10.0, 2.0),
]);

const PRICE_VS_SMA50: Ladder = Ladder::new(&[
    Step::at_least(5.0, 10.0),
    Step::at_least(2.0, 8.0),
    Step::at_least(0.0, 6.0),
    Step::at_least(-3.0, 3.0),
]);

/// Gap between SMA50 and SMA200 in percent; positive is a golden cross.
const CROSS_GAP: Ladder = Ladder::new(&[
    Step::at_least(5.0, 15.0),
    Step::at_least(2.0, 12.0),
    Step::above(0.0, 9.0),
    Step::at_least(-2.0, 5.0),
    Step::at_least(-5.0, 2.0),
]);

/// Healthy 40-60 zone, falling off symmetrically toward the extremes.
const RSI: Ladder = Ladder::new(&[
    Step::between(40.0, 60.0, 15.0),
    Step::between(30.0, 70.0, 10.0),
    Step::between(20.0, 80.0, 5.0),
]);

/// Current volume divided by average volume.
const VOLUME_RATIO: Ladder = Ladder::new(&[
    Step::at_least(2.0, 30.0),
    Step::at_least(1.5, 25.0),
    Step::at_least(1.0, 20.0),
    Step::at_least(0.8, 15.0),
    Step::at_least(0.6, 10.0),
    Step::at_least(0.4, 5.0),
]);

/// Trend, oscillator and volume momentum.
pub struct MomentumScorer;

impl MomentumScorer {
    pub fn new() -> Self {
        Self
    }

    /// Percent difference of `value` over `base`, when both are positive.
    fn relative(value: Option<f64>, base: Option<f64>) -> Option<f64> {
        let value = safe_number(value, 0.0);
        let base = safe_number(base, 0.0);
        if value > 0.0 && base > 0.0 {
            Some(pct_diff(value, base))
        } else {
            None
        }
    }

    /// `(macd, signal)` when both are non-zero after defaulting.
    ///
    /// A reading of exactly 0.0 is indistinguishable from a missing one here.
    fn macd_pair(input: &MomentumInput) -> Option<(f64, f64)> {
        let macd = safe_number(input.macd, 0.0);
        let signal = safe_number(input.macd_signal, 0.0);
        if macd != 0.0 && signal != 0.0 {
            Some((macd, signal))
        } else {
            None
        }
    }

    fn volume_ratio(input: &MomentumInput) -> Option<f64> {
        let current = safe_number(input.current_volume, 0.0);
        let average = safe_number(input.average_volume, 0.0);
        if current > 0.0 && average > 0.0 {
            Some(current / average)
        } else {
            None
        }
    }

    fn trend(&self, input: &MomentumInput) -> f64 {
        let points = Self::relative(input.current_price, input.sma200)
            .map_or(0.0, |pct| PRICE_VS_SMA200.score(pct))
            + Self::relative(input.current_price, input.sma50)
                .map_or(0.0, |pct| PRICE_VS_SMA50.score(pct))
            + Self::relative(input.sma50, input.sma200).map_or(0.0, |gap| CROSS_GAP.score(gap));
        capped(points, TREND_MAX)
    }

    fn indicators(&self, input: &MomentumInput) -> f64 {
        let rsi_points = RSI.score(safe_number(input.rsi, NEUTRAL_RSI));
        let macd_points = match Self::macd_pair(input) {
            Some((macd, signal)) => match (macd > signal, macd > 0.0) {
                (true, true) => 15.0,
                (true, false) => 10.0,
                (false, true) => 5.0,
                (false, false) => 0.0,
            },
            None => MACD_NO_SIGNAL_POINTS,
        };
        capped(rsi_points + macd_points, INDICATORS_MAX)
    }

    fn volume(&self, input: &MomentumInput) -> f64 {
        let points = Self::volume_ratio(input).map_or(VOLUME_NO_DATA_POINTS, |r| VOLUME_RATIO.score(r));
        capped(points, VOLUME_MAX)
    }

    fn insights(&self, input: &MomentumInput, trend: f64, indicators: f64, volume: f64) -> Vec<Insight> {
        let mut insights = Vec::new();
        let trend_share = share(trend, TREND_MAX);
        let indicators_share = share(indicators, INDICATORS_MAX);
        let volume_share = share(volume, VOLUME_MAX);

        if let Some(gap) = Self::relative(input.sma50, input.sma200) {
            if gap > 0.0 {
                insights.push(
                    Insight::positive("Golden cross: 50-day SMA above 200-day SMA")
                        .with_score(trend_share),
                );
            } else if gap < 0.0 {
                insights.push(
                    Insight::warning("Death cross: 50-day SMA below 200-day SMA")
                        .with_score(trend_share),
                );
            }
        }

        if let Some(pct) = Self::relative(input.current_price, input.sma200) {
            if pct >= 10.0 {
                insights.push(
                    Insight::positive(format!(
                        "Strong long-term uptrend: {:.1}% above 200-day SMA",
                        pct
                    ))
                    .with_score(trend_share),
                );
            } else if pct <= -10.0 {
                insights.push(
                    Insight::negative(format!(
                        "Long-term downtrend: {:.1}% below 200-day SMA",
                        pct.abs()
                    ))
                    .with_score(trend_share),
                );
            }
        }

        if let Some(rsi) = input.rsi {
            if rsi < 30.0 {
                insights.push(
                    Insight::positive(format!("RSI {:.0}: oversold, potential rebound", rsi))
                        .with_score(indicators_share),
                );
            } else if rsi > 70.0 {
                insights.push(
                    Insight::warning(format!("RSI {:.0}: overbought, pullback risk", rsi))
                        .with_score(indicators_share),
                );
            } else if (40.0..=60.0).contains(&rsi) {
                insights.push(
                    Insight::positive(format!("RSI {:.0}: healthy momentum", rsi))
                        .with_score(indicators_share),
                );
            }
        }

        if let Some((macd, signal)) = Self::macd_pair(input) {
            if macd > signal {
                insights.push(
                    Insight::positive("MACD bullish: above signal line").with_score(indicators_share),
                );
            } else if macd < signal {
                insights.push(
                    Insight::warning("MACD bearish: below signal line").with_score(indicators_share),
                );
            }
        }

        if let Some(ratio) = Self::volume_ratio(input) {
            if ratio >= 1.5 {
                insights.push(
                    Insight::positive(format!("Strong volume: {:.1}x average", ratio))
                        .with_score(volume_share),
                );
            } else if ratio < 0.6 {
                insights.push(
                    Insight::warning(format!("Weak volume: {:.1}x average", ratio))
                        .with_score(volume_share),
                );
            }
        }

        insights
    }
}

impl PillarScorer for MomentumScorer {
    const PILLAR: Pillar = Pillar::Momentum;

    type Input = MomentumInput;
    type Output = MomentumScore;

    fn score(&self, input: &MomentumInput) -> MomentumScore {
        let trend = self.trend(input);
        let indicators = self.indicators(input);
        let volume = self.volume(input);

        MomentumScore {
            total: trend + indicators + volume,
            trend,
            indicators,
            volume,
            insights: self.insights(input, trend, indicators, volume),
        }
    }
}

impl Default for MomentumScorer {
    fn default() -> Self {
        Self::new()
    }
}
