//! Year specific mapping of table rows to [`BudgetProject`]s.
//!
//! Every report names its columns differently, so each layout knows which
//! headers to look up, which of them are required and how the description is
//! assembled.

mod results_2024;
mod results_2025;
mod results_2026;
mod selected_2024;

use std::path::Path;

use tracing::{debug, info};

use crate::pdf_reader::{PdfReader, TableExtractionError, TableRow};
use crate::project::BudgetProject;

pub trait RowMapper {
    /// `None` when the row is not a project (blank required column, unparseable cost).
    fn map_row(&self, row: &TableRow) -> Option<BudgetProject>;

    /// Headers to use instead of each table's first row.
    fn fixed_headers(&self) -> Option<&'static [&'static str]> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectLayout {
    Results2024,
    Results2025,
    Results2026,
    Selected2024,
}

impl RowMapper for ProjectLayout {
    fn map_row(&self, row: &TableRow) -> Option<BudgetProject> {
        match self {
            ProjectLayout::Results2024 => results_2024::map_row(row),
            ProjectLayout::Results2025 => results_2025::map_row(row),
            ProjectLayout::Results2026 => results_2026::map_row(row),
            ProjectLayout::Selected2024 => selected_2024::map_row(row),
        }
    }

    fn fixed_headers(&self) -> Option<&'static [&'static str]> {
        match self {
            ProjectLayout::Results2026 => Some(&results_2026::HEADERS),
            _ => None,
        }
    }
}

#[tracing::instrument(err, skip(mapper), level = "info")]
pub fn extract_projects<M: RowMapper>(
    path: &Path,
    mapper: &M,
) -> Result<Vec<BudgetProject>, TableExtractionError> {
    let reader = match mapper.fixed_headers() {
        Some(headers) => PdfReader::with_headers(headers.iter().copied()),
        None => PdfReader::new(),
    };

    let projects = reader
        .extract_rows(path)?
        .iter()
        .filter_map(|row| mapper.map_row(row))
        .inspect(|project| {
            debug!(
                "Extracted: {}...",
                project.name.chars().take(50).collect::<String>()
            )
        })
        .collect::<Vec<_>>();

    info!("Total entries extracted: {}", projects.len());
    Ok(projects)
}

/// `text` without its `Zakres:` (scope) section.
fn before_scope(text: &str) -> &str {
    text.split_once("\nZakres:")
        .map_or(text, |(before, _)| before)
}
