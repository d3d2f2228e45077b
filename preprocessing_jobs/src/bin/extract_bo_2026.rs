use budget_projects::row_mapping::ProjectLayout;

fn main() -> anyhow::Result<()> {
    shared_kernel::tracing::config_tracing();
    preprocessing_jobs::run_extraction(ProjectLayout::Results2026)
}
