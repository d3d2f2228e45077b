use crate::normalization::{extract_cost_from_string, is_project_accepted, single_line};
use crate::pdf_reader::TableRow;
use crate::project::BudgetProject;

const TITLE: &str = "Tytuł";
const LOCATION: &str = "Lokalizacja";
const COST: &str = "Koszt projektu";
const ACCEPTED: &str = "Czy projekt został\nwybrany?";

/// The 2026 report repeats no header row on later pages, so the columns are fixed.
pub(super) const HEADERS: [&str; 8] = [
    "Lp.",
    "Nr projektu",
    TITLE,
    LOCATION,
    "Liczba\ngłosów",
    ACCEPTED,
    COST,
    "Pula/dostępne srodki",
];

/// District header rows have no title and are skipped with the other incomplete rows.
pub(super) fn map_row(row: &TableRow) -> Option<BudgetProject> {
    let title = row.get(TITLE)?;
    let cost = extract_cost_from_string(row.get(COST))?;
    let accepted = is_project_accepted(row.get(ACCEPTED));

    let name = single_line(title);
    let description = match row.get(LOCATION) {
        Some(location) => format!("{name}\nLokalizacja: {location}"),
        None => name.clone(),
    };

    let mut project = BudgetProject::new(name, cost, description);
    project.accepted = Some(accepted);
    Some(project)
}
