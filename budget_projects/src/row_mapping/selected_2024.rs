use crate::normalization::{extract_digits, split_sentences};
use crate::pdf_reader::TableRow;
use crate::project::BudgetProject;

const NAME_LOCATION_SCOPE: &str = "Nazwa zadania/ lokalizacja/zakres";
const COST: &str = "Koszty po\nweryfikacji (zł)";
const SECTION: &str = "Dział";

/// Projects chosen by residents. The cost is printed without a decimal part and
/// the category is the budget section number. The name and location are the
/// first two sentences of the text before `Zakres:`.
pub(super) fn map_row(row: &TableRow) -> Option<BudgetProject> {
    let description = row.get(NAME_LOCATION_SCOPE)?;
    let cost = extract_digits(row.get(COST))?.parse().ok()?;
    let category = extract_digits(row.get(SECTION))?;

    let mut sentences = split_sentences(&super::before_scope(description).replace('\n', " "))
        .into_iter();
    let name = sentences.next().unwrap_or_default();
    let location = sentences.next().unwrap_or_default();

    let mut project = BudgetProject::new(name, cost, description.to_string());
    project.location = Some(location);
    project.category = category;
    Some(project)
}
