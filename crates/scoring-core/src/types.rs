use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Profitability, balance-sheet and growth-consistency facts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityInput {
    #[serde(default, deserialize_with = "crate::parse::lenient_metric")]
    pub roe: Option<f64>,
    #[serde(default, deserialize_with = "crate::parse::lenient_metric")]
    pub roa: Option<f64>,
    #[serde(default, deserialize_with = "crate::parse::lenient_metric")]
    pub net_margin: Option<f64>,
    #[serde(default, deserialize_with = "crate::parse::lenient_metric")]
    pub operating_margin: Option<f64>,
    #[serde(default, deserialize_with = "crate::parse::lenient_metric")]
    pub gross_margin: Option<f64>,
    #[serde(default, deserialize_with = "crate::parse::lenient_metric")]
    pub debt_to_equity: Option<f64>,
    #[serde(default, deserialize_with = "crate::parse::lenient_metric")]
    pub current_ratio: Option<f64>,
    #[serde(
        rename = "quarterlyRevenueGrowthYoY",
        default,
        deserialize_with = "crate::parse::lenient_metric"
    )]
    pub quarterly_revenue_growth_yoy: Option<f64>,
    #[serde(
        rename = "quarterlyEarningsGrowthYoY",
        default,
        deserialize_with = "crate::parse::lenient_metric"
    )]
    pub quarterly_earnings_growth_yoy: Option<f64>,
}

/// Competitive-advantage facts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoatInput {
    #[serde(default, deserialize_with = "crate::parse::lenient_metric")]
    pub gross_margin: Option<f64>,
    #[serde(default, deserialize_with = "crate::parse::lenient_metric")]
    pub operating_margin: Option<f64>,
    /// Market capitalization in US dollars.
    #[serde(default, deserialize_with = "crate::parse::lenient_metric")]
    pub market_cap: Option<f64>,
    #[serde(default, deserialize_with = "crate::parse::lenient_metric")]
    pub beta: Option<f64>,
    #[serde(default, deserialize_with = "crate::parse::lenient_metric")]
    pub roe: Option<f64>,
    #[serde(default, deserialize_with = "crate::parse::lenient_metric")]
    pub roa: Option<f64>,
}

/// Valuation multiples and 52-week price range.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueInput {
    #[serde(default, deserialize_with = "crate::parse::lenient_metric")]
    pub pe_ratio: Option<f64>,
    #[serde(default, deserialize_with = "crate::parse::lenient_metric")]
    pub peg_ratio: Option<f64>,
    #[serde(default, deserialize_with = "crate::parse::lenient_metric")]
    pub pb_ratio: Option<f64>,
    #[serde(default, deserialize_with = "crate::parse::lenient_metric")]
    pub ps_ratio: Option<f64>,
    #[serde(default, deserialize_with = "crate::parse::lenient_metric")]
    pub ev_to_ebitda: Option<f64>,
    #[serde(default, deserialize_with = "crate::parse::lenient_metric")]
    pub ev_to_revenue: Option<f64>,
    #[serde(default, deserialize_with = "crate::parse::lenient_metric")]
    pub current_price: Option<f64>,
    #[serde(default, deserialize_with = "crate::parse::lenient_metric")]
    pub fifty_two_week_high: Option<f64>,
    #[serde(default, deserialize_with = "crate::parse::lenient_metric")]
    pub fifty_two_week_low: Option<f64>,
    /// Key into the sector-average table; unknown or absent sectors use `Default`.
    #[serde(default)]
    pub sector: Option<String>,
}

/// Historical and forward-looking growth facts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthInput {
    #[serde(
        rename = "quarterlyRevenueGrowthYoY",
        default,
        deserialize_with = "crate::parse::lenient_metric"
    )]
    pub quarterly_revenue_growth_yoy: Option<f64>,
    #[serde(
        rename = "quarterlyEarningsGrowthYoY",
        default,
        deserialize_with = "crate::parse::lenient_metric"
    )]
    pub quarterly_earnings_growth_yoy: Option<f64>,
    #[serde(default, deserialize_with = "crate::parse::lenient_metric")]
    pub trailing_pe: Option<f64>,
    #[serde(default, deserialize_with = "crate::parse::lenient_metric")]
    pub forward_pe: Option<f64>,
    #[serde(default, deserialize_with = "crate::parse::lenient_metric")]
    pub analyst_target_price: Option<f64>,
    #[serde(default, deserialize_with = "crate::parse::lenient_metric")]
    pub current_price: Option<f64>,
    #[serde(default, deserialize_with = "crate::parse::lenient_metric")]
    pub net_margin: Option<f64>,
    #[serde(default, deserialize_with = "crate::parse::lenient_metric")]
    pub operating_margin: Option<f64>,
}

/// Moving averages, oscillators and volume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MomentumInput {
    #[serde(default, deserialize_with = "crate::parse::lenient_metric")]
    pub current_price: Option<f64>,
    #[serde(default, deserialize_with = "crate::parse::lenient_metric")]
    pub sma20: Option<f64>,
    #[serde(default, deserialize_with = "crate::parse::lenient_metric")]
    pub sma50: Option<f64>,
    #[serde(default, deserialize_with = "crate::parse::lenient_metric")]
    pub sma200: Option<f64>,
    #[serde(default, deserialize_with = "crate::parse::lenient_metric")]
    pub rsi: Option<f64>,
    #[serde(default, deserialize_with = "crate::parse::lenient_metric")]
    pub macd: Option<f64>,
    #[serde(default, deserialize_with = "crate::parse::lenient_metric")]
    pub macd_signal: Option<f64>,
    #[serde(default, deserialize_with = "crate::parse::lenient_metric")]
    pub current_volume: Option<f64>,
    #[serde(default, deserialize_with = "crate::parse::lenient_metric")]
    pub average_volume: Option<f64>,
}

/// Everything the engine needs to score one symbol.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComprehensiveInput {
    pub symbol: String,
    #[serde(default)]
    pub quality: QualityInput,
    #[serde(default)]
    pub moat: MoatInput,
    #[serde(default)]
    pub value: ValueInput,
    #[serde(default)]
    pub growth: GrowthInput,
    #[serde(default)]
    pub momentum: MomentumInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Positive,
    Warning,
    Negative,
}

/// A unit of explanation attached to a sub-score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub message: String,
    /// Ranking key (0-100) used when insights are merged across pillars.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl Insight {
    pub fn positive(message: impl Into<String>) -> Self {
        Self::new(InsightKind::Positive, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(InsightKind::Warning, message)
    }

    pub fn negative(message: impl Into<String>) -> Self {
        Self::new(InsightKind::Negative, message)
    }

    fn new(kind: InsightKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            score: None,
        }
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    pub fn is_positive(&self) -> bool {
        self.kind == InsightKind::Positive
    }
}

/// Quality pillar: 40 profitability + 30 financial health + 30 growth consistency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityScore {
    pub total: f64,
    pub profitability: f64,
    pub financial_health: f64,
    pub growth_consistency: f64,
    pub insights: Vec<Insight>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoatClassification {
    Wide,
    Narrow,
    #[serde(rename = "None")]
    NoMoat,
}

impl MoatClassification {
    pub fn from_score(total: f64) -> Self {
        if total >= 80.0 {
            MoatClassification::Wide
        } else if total >= 60.0 {
            MoatClassification::Narrow
        } else {
            MoatClassification::NoMoat
        }
    }
}

/// Moat pillar: 40 pricing power + 30 market position + 30 durability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoatScore {
    pub total: f64,
    pub pricing_power: f64,
    pub market_position: f64,
    pub durability: f64,
    pub moat_classification: MoatClassification,
    pub insights: Vec<Insight>,
}

/// Value pillar: 50 valuation multiples + 30 price position + 20 margin of safety.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueScore {
    pub total: f64,
    pub valuation_multiples: f64,
    pub price_position: f64,
    pub margin_of_safety: f64,
    pub insights: Vec<Insight>,
}

/// Growth pillar: 40 historical + 30 analyst expectations + 30 growth quality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthScore {
    pub total: f64,
    pub historical_growth: f64,
    pub analyst_expectations: f64,
    pub growth_quality: f64,
    pub insights: Vec<Insight>,
}

/// Momentum pillar: 40 trend + 30 indicators + 30 volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MomentumScore {
    pub total: f64,
    pub trend: f64,
    pub indicators: f64,
    pub volume: f64,
    pub insights: Vec<Insight>,
}

/// Letter grade derived from the composite score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 90.0 => Grade::APlus,
            s if s >= 80.0 => Grade::A,
            s if s >= 70.0 => Grade::B,
            s if s >= 60.0 => Grade::C,
            s if s >= 50.0 => Grade::D,
            _ => Grade::F,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The five scoring dimensions, in aggregation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pillar {
    Quality,
    Moat,
    Value,
    Growth,
    Momentum,
}

impl Pillar {
    pub const ALL: [Pillar; 5] = [
        Pillar::Quality,
        Pillar::Moat,
        Pillar::Value,
        Pillar::Growth,
        Pillar::Momentum,
    ];

    /// Fixed composite weight. Weights across `ALL` sum to 1.0.
    pub fn weight(&self) -> f64 {
        match self {
            Pillar::Quality => 0.30,
            Pillar::Moat => 0.25,
            Pillar::Value => 0.20,
            Pillar::Growth => 0.15,
            Pillar::Momentum => 0.10,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Pillar::Quality => "Quality",
            Pillar::Moat => "Moat",
            Pillar::Value => "Value",
            Pillar::Growth => "Growth",
            Pillar::Momentum => "Momentum",
        }
    }
}

impl fmt::Display for Pillar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Combined result across all five pillars
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeScore {
    pub total_score: f64,
    pub grade: Grade,
    pub quality: QualityScore,
    pub moat: MoatScore,
    pub value: ValueScore,
    pub growth: GrowthScore,
    pub momentum: MomentumScore,
    pub insights: Vec<Insight>,
    pub calculated_at: DateTime<Utc>,
    pub symbol: String,
}

impl CompositeScore {
    /// Pillar totals in aggregation order.
    pub fn pillar_totals(&self) -> [(Pillar, f64); 5] {
        [
            (Pillar::Quality, self.quality.total),
            (Pillar::Moat, self.moat.total),
            (Pillar::Value, self.value.total),
            (Pillar::Growth, self.growth.total),
            (Pillar::Momentum, self.momentum.total),
        ]
    }
}
