use anyhow::Context;
use budget_projects::project::{read_projects, write_projects, BudgetProject};
use std::path::Path;
use tracing::info;

use crate::contracts::address_search::Geocoder;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GeocodingSummary {
    pub newly_geocoded: usize,
    pub already_geocoded: usize,
    pub total_with_coordinates: usize,
    pub total_entries: usize,
}

/// Adds coordinates to every project that has an address but no coordinates yet.
/// Projects that already carry coordinates are never queried again.
pub async fn geocode_projects(projects: &mut [BudgetProject], geocoder: &Geocoder) -> GeocodingSummary {
    let mut summary = GeocodingSummary {
        total_entries: projects.len(),
        ..Default::default()
    };

    for project in projects.iter_mut() {
        if project.is_geocoded() {
            summary.already_geocoded += 1;
            continue;
        }
        if let Some(coordinates) = geocoder.geocode(project.effective_address()).await {
            project.coordinates = Some(coordinates);
            summary.newly_geocoded += 1;
        }
    }

    summary.total_with_coordinates = summary.newly_geocoded + summary.already_geocoded;
    summary
}

/// Geocodes the projects stored in `path`, rewriting the file only when
/// something new was found.
#[tracing::instrument(err, skip(geocoder), level = "info")]
pub async fn geocode_file(path: &Path, geocoder: &Geocoder) -> anyhow::Result<GeocodingSummary> {
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }
    let mut projects = read_projects(path)?;

    let summary = geocode_projects(&mut projects, geocoder).await;

    if summary.newly_geocoded > 0 {
        write_projects(path, &projects)
            .with_context(|| format!("Failed to save geocoded projects to {}", path.display()))?;
        info!(
            "Successfully geocoded {} out of {} entries ({} new, {} already geocoded) - updated {}",
            summary.total_with_coordinates,
            summary.total_entries,
            summary.newly_geocoded,
            summary.already_geocoded,
            path.display()
        );
    } else {
        info!(
            "Successfully geocoded {} out of {} entries (all already geocoded) - no changes needed",
            summary.total_with_coordinates, summary.total_entries
        );
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::{geocode_file, geocode_projects, GeocodingSummary};
    use crate::config::GeocodingSettings;
    use crate::contracts::address_search::Geocoder;
    use budget_projects::project::{read_projects, write_projects, BudgetProject, Coordinates};
    use httpmock::prelude::*;
    use serde_json::json;

    fn geocoder(server: &MockServer) -> Geocoder {
        Geocoder::new(GeocodingSettings {
            host: server.base_url(),
            delay_millis: 0,
            ..Default::default()
        })
    }

    fn project(address: &str, coordinates: Option<Coordinates>) -> BudgetProject {
        let mut project = BudgetProject::new(format!("Projekt {address}"), 10000, String::new());
        project.address = address.to_string();
        project.accepted = Some(true);
        project.coordinates = coordinates;
        project
    }

    fn mock_found<'a>(server: &'a MockServer, address: &str) -> httpmock::Mock<'a> {
        let query = format!("{address}, Toruń, Poland");
        server.mock(|when, then| {
            when.method(GET).path("/search").query_param("q", query.as_str());
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!([{ "lat": "53.0101", "lon": "18.6012" }]));
        })
    }

    #[tokio::test]
    async fn test_only_missing_coordinates_are_looked_up() {
        let server = MockServer::start();
        let found = mock_found(&server, "Reja 1");
        let not_found = server.mock(|when, then| {
            when.method(GET)
                .path("/search")
                .query_param("q", "Gdzieś 0, Toruń, Poland");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!([]));
        });
        let mut projects = vec![
            project("Reja 1", None),
            project("Szeroka 5", Some(Coordinates { lat: 53.0, lon: 18.6 })),
            project("", None),
            project("Gdzieś 0", None),
        ];

        let summary = geocode_projects(&mut projects, &geocoder(&server)).await;

        found.assert_hits(1);
        not_found.assert_hits(1);
        assert_eq!(
            summary,
            GeocodingSummary {
                newly_geocoded: 1,
                already_geocoded: 1,
                total_with_coordinates: 2,
                total_entries: 4,
            }
        );
        assert_eq!(projects[0].coordinates, Some(Coordinates { lat: 53.0101, lon: 18.6012 }));
        assert!(!projects[2].is_geocoded());
        assert!(!projects[3].is_geocoded());
    }

    #[tokio::test]
    async fn test_manual_address_is_used_for_the_query() {
        let server = MockServer::start();
        let found = mock_found(&server, "Bulwar Filadelfijski");
        let mut manual = project("Toruń", None);
        manual.address_manual = Some("Bulwar Filadelfijski".to_string());
        let mut projects = vec![manual];

        geocode_projects(&mut projects, &geocoder(&server)).await;

        found.assert();
        assert!(projects[0].is_geocoded());
    }

    #[tokio::test]
    async fn test_file_is_rewritten_only_when_something_new_was_found() {
        let server = MockServer::start();
        mock_found(&server, "Reja 1");
        let file = tempfile::NamedTempFile::new().unwrap();
        write_projects(file.path(), &[project("Reja 1", None)]).unwrap();

        let first = geocode_file(file.path(), &geocoder(&server)).await.unwrap();
        let modified = std::fs::metadata(file.path()).unwrap().modified().unwrap();
        let second = geocode_file(file.path(), &geocoder(&server)).await.unwrap();

        assert_eq!(first.newly_geocoded, 1);
        assert_eq!(second.newly_geocoded, 0);
        assert_eq!(second.already_geocoded, 1);
        assert_eq!(
            std::fs::metadata(file.path()).unwrap().modified().unwrap(),
            modified
        );
        assert!(read_projects(file.path()).unwrap()[0].is_geocoded());
    }

    #[tokio::test]
    async fn test_rewritten_file_keeps_keys_it_does_not_know() {
        let server = MockServer::start();
        mock_found(&server, "Reja 1");
        let file = tempfile::NamedTempFile::new().unwrap();
        let original = json!([{ "name": "Skwer", "address": "Reja 1", "value": 1, "votes": 3 }]);
        std::fs::write(file.path(), original.to_string()).unwrap();

        let summary = geocode_file(file.path(), &geocoder(&server)).await.unwrap();

        assert_eq!(summary.newly_geocoded, 1);
        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(file.path()).unwrap()).unwrap();
        assert_eq!(written[0]["value"], json!(1));
        assert_eq!(written[0]["votes"], json!(3));
        assert_eq!(written[0]["lat"], json!(53.0101));
        assert_eq!(written[0]["lon"], json!(18.6012));
    }

    #[tokio::test]
    async fn test_missing_file_is_reported() {
        let server = MockServer::start();
        let result = geocode_file(
            std::path::Path::new("no/such/budzet_obywatelski.json"),
            &geocoder(&server),
        )
        .await;

        assert!(result.is_err());
    }
}
