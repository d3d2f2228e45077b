use anyhow::Context;
use budget_projects::config::SETTINGS_CONFIG;
use budget_projects::project::to_pretty_json;
use budget_projects::row_mapping::{extract_projects, ProjectLayout};
use std::path::{Path, PathBuf};

/// The first command line argument, or `default` when none was given.
pub fn path_argument_or(mut args: impl Iterator<Item = String>, default: &Path) -> PathBuf {
    args.nth(1).map(PathBuf::from).unwrap_or_else(|| default.to_path_buf())
}

pub fn required_path_argument(
    mut args: impl Iterator<Item = String>,
    usage: &str,
) -> anyhow::Result<PathBuf> {
    args.nth(1)
        .map(PathBuf::from)
        .with_context(|| format!("Usage: {usage}"))
}

/// Extracts the projects of one yearly report and prints them as JSON on stdout.
/// The report path is the first argument, or the configured default for `layout`.
pub fn run_extraction(layout: ProjectLayout) -> anyhow::Result<()> {
    let default = SETTINGS_CONFIG.extraction.default_pdf(layout);
    let path = path_argument_or(std::env::args(), default);

    let projects = extract_projects(&path, &layout)
        .with_context(|| format!("Failed to extract projects from {}", path.display()))?;
    println!("{}", to_pretty_json(&projects)?);
    Ok(())
}
