use geocoding::contracts::address_search::Geocoder;
use geocoding::contracts::geocode_projects::geocode_file;
use preprocessing_jobs::required_path_argument;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    shared_kernel::tracing::config_tracing();
    let path = required_path_argument(std::env::args(), "perform_geolocation <json_file>")?;

    geocode_file(&path, &Geocoder::default()).await?;
    Ok(())
}
