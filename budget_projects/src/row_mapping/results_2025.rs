use crate::normalization::{extract_cost_from_string, extract_first_sentence, is_project_accepted};
use crate::pdf_reader::TableRow;
use crate::project::BudgetProject;

const TITLE_LOCATION_SCOPE: &str = "Tytuł / lokalizacja / zakres";
const COST: &str = "Koszt projektu";
const ACCEPTED: &str = "Czy projekt został wybrany?";

/// The whole title/location/scope cell is the description; the name is its
/// first line.
pub(super) fn map_row(row: &TableRow) -> Option<BudgetProject> {
    let description = row.get(TITLE_LOCATION_SCOPE)?;
    let cost = extract_cost_from_string(row.get(COST))?;
    let accepted = is_project_accepted(row.get(ACCEPTED));

    let name = extract_first_sentence(super::before_scope(description));

    let mut project = BudgetProject::new(name, cost, description.to_string());
    project.accepted = Some(accepted);
    Some(project)
}
