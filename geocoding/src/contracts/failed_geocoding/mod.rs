use budget_projects::project::BudgetProject;
use itertools::Itertools;
use tracing::info;

/// Projects split by whether geocoding found them, rendered as lines ready to be
/// pasted into the manual address table (failed) and the known good locations
/// table (succeeded).
#[derive(Debug, Default, PartialEq)]
pub struct FailedGeocodingReport {
    pub total_entries: usize,
    pub failed: Vec<String>,
    pub succeeded: Vec<String>,
}

pub fn failed_geocoding_report(projects: &[BudgetProject]) -> FailedGeocodingReport {
    let (succeeded, failed): (Vec<_>, Vec<_>) = projects
        .iter()
        .partition_map(|project| {
            let key = format!(
                r#"("{}", "{}")"#,
                project.name,
                project.location.as_deref().unwrap_or_default()
            );
            match project.coordinates {
                Some(coordinates) => itertools::Either::Left(format!(
                    "        {key}: ({}, {}),",
                    coordinates.lat, coordinates.lon
                )),
                None => itertools::Either::Right(format!(r#"        {key}: "","#)),
            }
        });

    FailedGeocodingReport {
        total_entries: projects.len(),
        failed,
        succeeded,
    }
}

impl FailedGeocodingReport {
    pub fn log_summary(&self) {
        info!("Total entries: {}", self.total_entries);
        info!("Succeeded geocoding: {}", self.succeeded.len());
        info!("Failed geocoding: {}", self.failed.len());
    }
}
