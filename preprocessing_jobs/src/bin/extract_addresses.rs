use budget_projects::address::fill_addresses;
use budget_projects::config::SETTINGS_CONFIG;
use budget_projects::project::{read_projects, write_projects};
use preprocessing_jobs::required_path_argument;

fn main() -> anyhow::Result<()> {
    shared_kernel::tracing::config_tracing();
    let path = required_path_argument(std::env::args(), "extract_addresses <json_file>")?;

    let mut projects = read_projects(&path)?;
    fill_addresses(&mut projects, &SETTINGS_CONFIG.address.city);
    write_projects(&path, &projects)
}
