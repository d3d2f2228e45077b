use budget_projects::project::read_projects;
use geocoding::contracts::failed_geocoding::failed_geocoding_report;
use preprocessing_jobs::path_argument_or;
use std::path::Path;
use tracing::info;

const DEFAULT_JSON: &str = "budzet_obywatelski.json";

fn main() -> anyhow::Result<()> {
    shared_kernel::tracing::config_tracing();
    let path = path_argument_or(std::env::args(), Path::new(DEFAULT_JSON));

    let report = failed_geocoding_report(&read_projects(&path)?);
    report.log_summary();

    info!("FAILED ENTRIES (add these to the manual addresses):");
    for line in &report.failed {
        println!("{line}");
    }

    info!("SUCCEEDED ENTRIES (add these to the known good locations):");
    for line in &report.succeeded {
        println!("{line}");
    }
    Ok(())
}
