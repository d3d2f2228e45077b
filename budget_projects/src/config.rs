use anyhow::Context;
use lazy_static::lazy_static;
use serde::Deserialize;
use shared_kernel::configuration::config;
use std::path::PathBuf;

use crate::row_mapping::ProjectLayout;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ExtractionSettings {
    pub results_2024_pdf: PathBuf,
    pub results_2025_pdf: PathBuf,
    pub results_2026_pdf: PathBuf,
    pub selected_2024_pdf: PathBuf,
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            results_2024_pdf: "bo/2024/bo_2024_wyniki_komplet_13-10-2023_int_ok.pdf".into(),
            results_2025_pdf: "data/2025/bo_2025_wyniki_glosowania_komplet_16-10-2024.pdf".into(),
            results_2026_pdf: "data/2026/bo_2026_wyniki_zestawienie_20-10-2025_podpis.pdf".into(),
            selected_2024_pdf:
                "noupload/2024/Projekty wybrane przez mieszkancow w procedurze budzetu obywatelskiego.pdf"
                    .into(),
        }
    }
}

impl ExtractionSettings {
    pub fn default_pdf(&self, layout: ProjectLayout) -> &PathBuf {
        match layout {
            ProjectLayout::Results2024 => &self.results_2024_pdf,
            ProjectLayout::Results2025 => &self.results_2025_pdf,
            ProjectLayout::Results2026 => &self.results_2026_pdf,
            ProjectLayout::Selected2024 => &self.selected_2024_pdf,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AddressSettings {
    /// Used when nothing more specific can be read from a location.
    pub city: String,
}

impl Default for AddressSettings {
    fn default() -> Self {
        Self {
            city: "Toruń".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub extraction: ExtractionSettings,
    #[serde(default)]
    pub address: AddressSettings,
}

impl Settings {
    pub fn parse() -> anyhow::Result<Settings> {
        config::<Settings>().context("Failed to deserialize settings to budget_projects settings")
    }
}

lazy_static! {
    pub static ref SETTINGS_CONFIG: Settings = Settings::parse().unwrap();
}
