use std::collections::HashSet;
use std::path::PathBuf;

use crate::config::FilterConfig;
use crate::error::StageResult;
use crate::records::PerformanceRecord;
use crate::table::{read_table, write_records};

#[derive(Debug, Clone)]
pub struct FilterSummary {
    pub output: PathBuf,
    pub rows_read: usize,
    pub rows_kept: usize,
    /// Input columns outside the performance schema; not written to the output.
    pub dropped_columns: Vec<String>,
}

/// Keeps rows whose competition and season are both allow-listed.
pub fn filter_performances(
    rows: Vec<PerformanceRecord>,
    leagues: &[String],
    seasons: &[String],
) -> Vec<PerformanceRecord> {
    let leagues = leagues.iter().map(String::as_str).collect::<HashSet<_>>();
    let seasons = seasons.iter().map(String::as_str).collect::<HashSet<_>>();
    rows.into_iter()
        .filter(|row| {
            leagues.contains(row.competition_name.as_str())
                && seasons.contains(row.season_name.as_str())
        })
        .collect()
}

pub fn run(cfg: &FilterConfig) -> StageResult<FilterSummary> {
    let table = read_table::<PerformanceRecord>(&cfg.input)?;
    let rows = table.rows;
    let rows_read = rows.len();
    if !table.extra_columns.is_empty() {
        log::warn!(
            "{} columns of {} are not carried through: {}",
            table.extra_columns.len(),
            cfg.input.display(),
            table.extra_columns.join(", ")
        );
    }

    let kept = filter_performances(rows, &cfg.leagues, &cfg.seasons);
    log::info!(
        "kept {}/{} rows for {} leagues and {} seasons",
        kept.len(),
        rows_read,
        cfg.leagues.len(),
        cfg.seasons.len()
    );
    write_records(&cfg.output, &kept)?;

    Ok(FilterSummary {
        output: cfg.output.clone(),
        rows_read,
        rows_kept: kept.len(),
        dropped_columns: table.extra_columns,
    })
}
