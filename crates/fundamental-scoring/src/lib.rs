//! Fundamental pillars of the composite score: Quality, Moat, Value and Growth.
//!
//! Each scorer is a stateless engine that turns one nullable input record into
//! a bounded sub-score plus the insights that explain it.

pub mod growth;
pub mod moat;
pub mod quality;
pub mod value;

pub use growth::GrowthScorer;
pub use moat::MoatScorer;
pub use quality::QualityScorer;
pub use value::ValueScorer;
