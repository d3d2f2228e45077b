use crate::normalization::{extract_cost_from_string, is_project_accepted, single_line};
use crate::pdf_reader::TableRow;
use crate::project::BudgetProject;

const TITLE: &str = "Tytuł projektu";
const COST: &str = "Szacowany\nkoszt realizacji";
const ACCEPTED: &str = "Czy projekt\nzostał wybrany?";
const LOCATION: &str = "Lokalizacja";
const SCOPE: &str = "Zakres";

pub(super) fn map_row(row: &TableRow) -> Option<BudgetProject> {
    let title = row.get(TITLE)?;
    let cost = extract_cost_from_string(row.get(COST))?;
    let accepted = is_project_accepted(row.get(ACCEPTED));

    let name = single_line(title);
    let description = [
        Some(name.clone()),
        row.get(LOCATION).map(|location| format!("Lokalizacja: {location}")),
        row.get(SCOPE).map(|scope| format!("Zakres: {scope}")),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join("\n");

    let mut project = BudgetProject::new(name, cost, description);
    project.accepted = Some(accepted);
    Some(project)
}
