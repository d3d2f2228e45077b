use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

/// One project row of a participatory budget report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetProject {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_manual: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<u64>,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepted: Option<bool>,
    #[serde(flatten)]
    pub coordinates: Option<Coordinates>,
    /// Keys this crate does not know about (`value`, `votes`...), written back untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `lat` and `lon` only ever travel together.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    const PRECISION: f64 = 100_000.0;

    /// Rounds both values to 5 decimal places (roughly a metre).
    pub fn rounded(lat: f64, lon: f64) -> Self {
        Self {
            lat: (lat * Self::PRECISION).round() / Self::PRECISION,
            lon: (lon * Self::PRECISION).round() / Self::PRECISION,
        }
    }
}

impl BudgetProject {
    pub fn new(name: String, cost: u64, description: String) -> Self {
        Self {
            name,
            location: None,
            address: String::new(),
            address_manual: None,
            category: String::new(),
            cost: Some(cost),
            description,
            accepted: None,
            coordinates: None,
            extra: Map::new(),
        }
    }

    /// `cost`, or the legacy `value` key older selected-projects files carry.
    pub fn cost(&self) -> Option<u64> {
        self.cost
            .or_else(|| self.extra.get("value").and_then(Value::as_u64))
    }

    pub fn is_geocoded(&self) -> bool {
        self.coordinates.is_some()
    }

    /// The address to geocode: a non-blank manual address wins over the extracted one.
    pub fn effective_address(&self) -> &str {
        self.address_manual
            .as_deref()
            .map(str::trim)
            .filter(|manual| !manual.is_empty())
            .unwrap_or_else(|| self.address.trim())
    }
}

/// Pretty printed JSON, two space indent, non-ASCII left as is.
pub fn to_pretty_json(projects: &[BudgetProject]) -> anyhow::Result<String> {
    serde_json::to_string_pretty(projects).context("Failed to serialize projects")
}

#[tracing::instrument(err, level = "info")]
pub fn read_projects(path: &Path) -> anyhow::Result<Vec<BudgetProject>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", path.display()))
}

#[tracing::instrument(err, skip(projects), level = "info")]
pub fn write_projects(path: &Path, projects: &[BudgetProject]) -> anyhow::Result<()> {
    let json = to_pretty_json(projects)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}
