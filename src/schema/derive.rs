use tracing::debug;

use super::parsers::CELL_PARSERS;
use super::types::{Column, DataType};

/// Count, for every parser in priority order, how many `cells` it accepts.
pub fn tally<S: AsRef<str>>(cells: &[S]) -> Vec<(DataType, usize)> {
    CELL_PARSERS
        .iter()
        .map(|parser| {
            let hits = cells
                .iter()
                .filter(|cell| parser.parse(cell.as_ref()).is_ok())
                .count();
            (parser.datatype, hits)
        })
        .collect()
}

/// Pick the winner of a tally: scanning left to right, a later candidate
/// only takes over with a strictly greater count, so ties go to the
/// higher-priority parser.
pub fn select_winner(votes: &[(DataType, usize)]) -> DataType {
    let mut best: Option<(DataType, usize)> = None;
    for &(ty, hits) in votes {
        match best {
            Some((_, best_hits)) if hits <= best_hits => {}
            _ => best = Some((ty, hits)),
        }
    }
    best.map_or(DataType::Text, |(ty, _)| ty)
}

/// Competitive parsing over one column's cells.
///
/// An empty column has all counts at zero and therefore resolves to the
/// first parser (`number+eu`).
pub fn infer_datatype<S: AsRef<str>>(cells: &[S]) -> DataType {
    let votes = tally(cells);
    let winner = select_winner(&votes);
    if cells.is_empty() {
        debug!("infer_datatype: empty column, defaulting to {}", winner);
    } else {
        debug!(cells = cells.len(), ?votes, %winner, "infer_datatype");
    }
    winner
}

/// Cells at position `idx` across `rows`. Rows shorter than `idx` contribute
/// nothing; callers are expected to pass rectangular rows.
pub fn column_cells(rows: &[Vec<String>], idx: usize) -> Vec<&str> {
    rows.iter()
        .filter_map(|row| row.get(idx).map(String::as_str))
        .collect()
}

/// Overwrite every column's `datatype` with the type inferred from `rows`.
/// Names and roles are left alone.
pub fn derive_types(columns: &mut [Column], rows: &[Vec<String>]) {
    for (idx, column) in columns.iter_mut().enumerate() {
        let cells = column_cells(rows, idx);
        let ty = infer_datatype(&cells);
        if ty != column.datatype {
            debug!(
                "derive_types: column {} (`{}`) {} -> {}",
                idx, column.name, column.datatype, ty
            );
        }
        column.datatype = ty;
    }
}
