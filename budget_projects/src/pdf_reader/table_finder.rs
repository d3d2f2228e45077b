use itertools::Itertools;

use crate::pdf_reader::content_extractor::{Edge, PageLayout, TextFragment};
use crate::pdf_reader::Table;

/// Rules closer than this (in points) are treated as the same rule.
const SNAP_TOLERANCE: f64 = 3.0;
/// Horizontal gap, relative to the font size, above which two fragments on a
/// line are separated by a space.
const WORD_GAP_RATIO: f64 = 0.15;

/// The horizontal strip between two consecutive row rules, with the x position
/// of every vertical rule that crosses it from top to bottom.
#[derive(Debug)]
struct Band {
    top: f64,
    bottom: f64,
    columns: Vec<f64>,
}

impl Band {
    fn has_same_extent(&self, other: &Band) -> bool {
        match (
            self.columns.first().zip(self.columns.last()),
            other.columns.first().zip(other.columns.last()),
        ) {
            (Some((left, right)), Some((other_left, other_right))) => {
                (left - other_left).abs() <= SNAP_TOLERANCE
                    && (right - other_right).abs() <= SNAP_TOLERANCE
            }
            _ => false,
        }
    }
}

/// Finds ruled tables on a page.
///
/// Row boundaries come from horizontal rules and cell boundaries from the
/// vertical rules crossing each row. Consecutive rows spanning the same width
/// form one table. A cell that spans several columns keeps its text in its
/// leftmost column; the columns it covers are `None`.
pub(crate) fn find_tables(layout: &PageLayout) -> Vec<Table> {
    let (horizontals, verticals): (Vec<_>, Vec<_>) =
        layout.edges.iter().partition(|edge| matches!(edge, Edge::Horizontal { .. }));

    let row_rules = cluster(
        horizontals
            .iter()
            .filter_map(|edge| match edge {
                Edge::Horizontal { y, .. } => Some(*y),
                Edge::Vertical { .. } => None,
            })
            .collect(),
    );
    let column_rules = cluster(
        verticals
            .iter()
            .filter_map(|edge| match edge {
                Edge::Vertical { x, .. } => Some(*x),
                Edge::Horizontal { .. } => None,
            })
            .collect(),
    );

    let verticals: Vec<(f64, f64, f64)> = verticals
        .iter()
        .filter_map(|edge| match edge {
            Edge::Vertical { x, y0, y1 } => Some((snap(*x, &column_rules), *y0, *y1)),
            Edge::Horizontal { .. } => None,
        })
        .collect();

    let bands = row_rules
        .iter()
        .rev()
        .tuple_windows()
        .map(|(top, bottom)| {
            let columns = column_rules
                .iter()
                .copied()
                .filter(|column| {
                    verticals.iter().any(|(x, y0, y1)| {
                        x == column
                            && *y0 <= bottom + SNAP_TOLERANCE
                            && *y1 >= top - SNAP_TOLERANCE
                    })
                })
                .collect::<Vec<_>>();
            Band {
                top: *top,
                bottom: *bottom,
                columns,
            }
        })
        .collect::<Vec<_>>();

    let mut groups: Vec<Vec<&Band>> = vec![];
    let mut previous: Option<&Band> = None;
    for band in bands.iter() {
        if band.columns.len() < 2 {
            previous = None;
            continue;
        }
        match (previous, groups.last_mut()) {
            (Some(previous), Some(group)) if previous.has_same_extent(band) => group.push(band),
            _ => groups.push(vec![band]),
        }
        previous = Some(band);
    }

    groups
        .into_iter()
        .map(|group| build_table(&group, &layout.fragments))
        .collect()
}

fn build_table(bands: &[&Band], fragments: &[TextFragment]) -> Table {
    let mut columns = bands
        .iter()
        .flat_map(|band| band.columns.iter().copied())
        .collect::<Vec<_>>();
    columns.sort_by(f64::total_cmp);
    columns.dedup_by(|a, b| (*a - *b).abs() <= SNAP_TOLERANCE);

    let rows = bands
        .iter()
        .map(|band| {
            let mut row = vec![None; columns.len().saturating_sub(1)];
            for (left, right) in band.columns.iter().tuple_windows() {
                let index = columns
                    .iter()
                    .position(|column| (column - left).abs() <= SNAP_TOLERANCE);
                if let Some(cell) = index.and_then(|index| row.get_mut(index)) {
                    *cell = cell_text(fragments, *left, *right, band.top, band.bottom);
                }
            }
            row
        })
        .collect();

    Table { rows }
}

fn cell_text(
    fragments: &[TextFragment],
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
) -> Option<String> {
    let mut inside = fragments
        .iter()
        .filter(|fragment| {
            let center = fragment.x + fragment.width / 2.0;
            center > left && center < right && fragment.y > bottom && fragment.y < top
        })
        .collect::<Vec<_>>();
    inside.sort_by(|a, b| b.y.total_cmp(&a.y).then(a.x.total_cmp(&b.x)));

    let mut lines: Vec<Vec<&TextFragment>> = vec![];
    for fragment in inside {
        match lines.last_mut() {
            Some(line) if is_same_line(line[0], fragment) => line.push(fragment),
            _ => lines.push(vec![fragment]),
        }
    }

    let text = lines
        .into_iter()
        .map(|mut line| {
            line.sort_by(|a, b| a.x.total_cmp(&b.x));
            join_line(&line)
        })
        .filter(|line| !line.is_empty())
        .join("\n");

    (!text.is_empty()).then_some(text)
}

fn is_same_line(first: &TextFragment, fragment: &TextFragment) -> bool {
    let tolerance = (first.font_size.min(fragment.font_size) * 0.5).max(1.0);
    (first.y - fragment.y).abs() <= tolerance
}

fn join_line(line: &[&TextFragment]) -> String {
    let mut text = String::new();
    let mut previous: Option<&TextFragment> = None;
    for fragment in line.iter().copied() {
        if let Some(previous) = previous {
            let gap = fragment.x - previous.end_x();
            let already_spaced = text.ends_with(char::is_whitespace)
                || fragment.text.starts_with(char::is_whitespace);
            if !already_spaced && gap > fragment.font_size * WORD_GAP_RATIO {
                text.push(' ');
            }
        }
        text.push_str(&fragment.text);
        previous = Some(fragment);
    }
    text.split_whitespace().join(" ")
}

/// Merges sorted positions lying within the snap tolerance of their neighbour
/// into their mean.
fn cluster(mut values: Vec<f64>) -> Vec<f64> {
    values.sort_by(f64::total_cmp);
    let mut clusters: Vec<Vec<f64>> = vec![];
    for value in values {
        match clusters.last_mut() {
            Some(cluster)
                if cluster
                    .last()
                    .map_or(false, |last| value - last <= SNAP_TOLERANCE) =>
            {
                cluster.push(value)
            }
            _ => clusters.push(vec![value]),
        }
    }
    clusters
        .into_iter()
        .map(|cluster| cluster.iter().sum::<f64>() / cluster.len() as f64)
        .collect()
}

fn snap(value: f64, positions: &[f64]) -> f64 {
    positions
        .iter()
        .copied()
        .min_by(|a, b| (a - value).abs().total_cmp(&(b - value).abs()))
        .unwrap_or(value)
}
