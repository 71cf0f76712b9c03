//! Bulk roster import from CSV (`name[,rating]`, no header).

use crate::models::{Tournament, TournamentError};

/// Register participants from CSV data. Each row is `name` or `name,rating`;
/// blank rows are skipped. Every row goes through the normal registration
/// validation (trimmed, unique name). Returns how many were added; the first
/// failing row aborts with its error, leaving earlier rows registered.
pub fn import_participants_csv(
    tournament: &mut Tournament,
    data: &str,
) -> Result<usize, TournamentError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(data.as_bytes());

    let mut added = 0;
    for result in reader.records() {
        let record = result.map_err(|e| TournamentError::InvalidCsvRow {
            line: e.position().map_or(0, csv::Position::line),
        })?;
        let line = record.position().map_or(0, csv::Position::line);
        let name = record.get(0).unwrap_or("");
        if name.is_empty() && record.iter().all(str::is_empty) {
            continue;
        }
        let rating = match record.get(1) {
            None | Some("") => None,
            Some(s) => Some(
                s.parse::<i32>()
                    .map_err(|_| TournamentError::InvalidCsvRow { line })?,
            ),
        };
        tournament.add_participant(name, rating)?;
        added += 1;
    }
    Ok(added)
}
