use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::ScoringError;

pub const DEFAULT_SECTOR: &str = "Default";

/// Reference multiples and returns for one sector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorAverage {
    pub pe: f64,
    pub pb: f64,
    pub ps: f64,
    pub ev_to_ebitda: f64,
    pub roe: f64,
    pub roa: f64,
    pub gross_margin: f64,
    pub net_margin: f64,
}

/// Sector name -> reference row. The `Default` row is held separately so a
/// lookup always resolves.
#[derive(Debug, Clone, PartialEq)]
pub struct SectorAverages {
    default: SectorAverage,
    sectors: HashMap<String, SectorAverage>,
}

static BUILTIN: LazyLock<SectorAverages> = LazyLock::new(|| {
    let row = |pe, pb, ps, ev_to_ebitda, roe, roa, gross_margin, net_margin| SectorAverage {
        pe,
        pb,
        ps,
        ev_to_ebitda,
        roe,
        roa,
        gross_margin,
        net_margin,
    };

    let sectors = [
        ("Technology", row(28.0, 6.5, 6.0, 20.0, 20.0, 10.0, 55.0, 18.0)),
        ("Healthcare", row(22.0, 4.5, 4.0, 16.0, 15.0, 7.0, 55.0, 12.0)),
        ("Financial Services", row(14.0, 1.5, 3.0, 10.0, 12.0, 1.2, 50.0, 20.0)),
        ("Consumer Cyclical", row(20.0, 4.0, 1.5, 13.0, 18.0, 7.0, 38.0, 7.0)),
        ("Consumer Defensive", row(22.0, 4.5, 1.5, 15.0, 20.0, 8.0, 35.0, 8.0)),
        ("Energy", row(12.0, 1.8, 1.2, 6.0, 14.0, 6.0, 30.0, 9.0)),
        ("Industrials", row(20.0, 4.0, 2.0, 14.0, 16.0, 6.0, 30.0, 8.0)),
        ("Utilities", row(18.0, 1.8, 2.5, 12.0, 9.0, 3.0, 40.0, 11.0)),
        ("Real Estate", row(35.0, 2.0, 7.0, 20.0, 7.0, 3.0, 60.0, 20.0)),
        ("Basic Materials", row(15.0, 2.2, 1.5, 9.0, 12.0, 6.0, 28.0, 8.0)),
        ("Communication Services", row(20.0, 3.5, 3.0, 11.0, 14.0, 7.0, 50.0, 12.0)),
    ];

    SectorAverages {
        default: row(20.0, 3.5, 2.5, 14.0, 15.0, 7.0, 40.0, 10.0),
        sectors: sectors
            .into_iter()
            .map(|(name, avg)| (name.to_string(), avg))
            .collect(),
    }
});

impl SectorAverages {
    /// Built-in reference table.
    pub fn builtin() -> &'static SectorAverages {
        &BUILTIN
    }

    /// Build a custom table. Fails when `rows` has no `Default` entry.
    pub fn from_rows(mut rows: HashMap<String, SectorAverage>) -> Result<Self, ScoringError> {
        let default = rows
            .remove(DEFAULT_SECTOR)
            .ok_or_else(|| ScoringError::MissingDefaultSector(DEFAULT_SECTOR.to_string()))?;
        Ok(Self {
            default,
            sectors: rows,
        })
    }

    /// Row for `sector`, or the `Default` row when absent or unknown.
    pub fn lookup(&self, sector: Option<&str>) -> &SectorAverage {
        sector
            .and_then(|name| self.sectors.get(name))
            .unwrap_or(&self.default)
    }

    pub fn default_row(&self) -> &SectorAverage {
        &self.default
    }

    pub fn contains(&self, sector: &str) -> bool {
        sector == DEFAULT_SECTOR || self.sectors.contains_key(sector)
    }
}
