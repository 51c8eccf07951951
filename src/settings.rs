use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{BidError, Result};

/// Pay rates applied to every line in a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rates {
    /// Pay per credit hour.
    pub hourly_rate: Decimal,
    /// Flat add-on for FMP lines.
    pub purser_premium: Decimal,
    /// Additional pay per credit hour on FMP lines.
    pub purser_hourly_rate: Decimal,
    /// Flat add-on for lines flagged international.
    pub international_premium: Decimal,
    /// Pay per hour of TAFB.
    pub per_diem_rate: Decimal,
    /// Minimum credit hours paid for a line.
    pub guarantee_hours: Decimal,
}

impl Default for Rates {
    fn default() -> Self {
        Self {
            hourly_rate: Decimal::new(6579, 2),
            purser_premium: Decimal::ZERO,
            purser_hourly_rate: Decimal::ONE,
            international_premium: Decimal::ZERO,
            per_diem_rate: Decimal::new(240, 2),
            guarantee_hours: Decimal::from(70),
        }
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("bidline")
}

pub fn rates_path() -> PathBuf {
    config_dir().join("rates.json")
}

pub fn parse_rates(content: &str) -> Result<Rates> {
    let rates: Rates =
        serde_json::from_str(content).map_err(|e| BidError::Rates(e.to_string()))?;
    let fields = [
        ("hourly_rate", rates.hourly_rate),
        ("purser_premium", rates.purser_premium),
        ("purser_hourly_rate", rates.purser_hourly_rate),
        ("international_premium", rates.international_premium),
        ("per_diem_rate", rates.per_diem_rate),
        ("guarantee_hours", rates.guarantee_hours),
    ];
    if let Some((name, _)) = fields.iter().find(|(_, v)| v.is_sign_negative() && !v.is_zero()) {
        return Err(BidError::Rates(format!("{name} must not be negative")));
    }
    Ok(rates)
}

/// Resolve rates from an explicit file, then the user config file, then defaults.
pub fn load_rates(explicit: Option<&Path>) -> Result<Rates> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => {
            let default = rates_path();
            if !default.exists() {
                tracing::debug!("no rates file at {}, using defaults", default.display());
                return Ok(Rates::default());
            }
            default
        }
    };
    let content = std::fs::read_to_string(&path)
        .map_err(|e| BidError::Rates(format!("cannot read {}: {e}", path.display())))?;
    let rates = parse_rates(&content)
        .map_err(|e| BidError::Rates(format!("{}: {e}", path.display())))?;
    tracing::debug!("loaded rates from {}", path.display());
    Ok(rates)
}

pub fn save_rates(rates: &Rates, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(rates).map_err(|e| BidError::Rates(e.to_string()))?;
    std::fs::write(path, format!("{json}\n"))?;
    Ok(())
}
