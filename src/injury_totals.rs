use std::collections::HashMap;
use std::path::PathBuf;

use crate::config::InjuryConfig;
use crate::error::StageResult;
use crate::market_value::SeasonKey;
use crate::records::{InjuryAdjustedRow, InjuryRecord, InjuryTotals, ValuedPerformance};
use crate::table::{read_records, write_records};

#[derive(Debug, Clone)]
pub struct InjurySummary {
    pub output: PathBuf,
    pub rows: usize,
    pub injury_groups: usize,
    pub rows_with_injuries: usize,
}

/// Sums days and games missed per (player, season). Blank cells add nothing.
pub fn aggregate_injuries(records: Vec<InjuryRecord>) -> HashMap<SeasonKey, InjuryTotals> {
    let mut totals: HashMap<SeasonKey, InjuryTotals> = HashMap::new();
    for record in records {
        let entry = totals
            .entry((record.player_id, record.season_name))
            .or_default();
        entry.days_missed += record.days_missed.unwrap_or(0.0);
        entry.games_missed += record.games_missed.unwrap_or(0.0);
    }
    totals
}

/// Left-joins injury totals; seasons without injuries get zeros.
pub fn attach_injuries(
    rows: Vec<ValuedPerformance>,
    totals: &HashMap<SeasonKey, InjuryTotals>,
) -> Vec<InjuryAdjustedRow> {
    rows.into_iter()
        .map(|row| {
            let found = totals
                .get(&(row.player_id, row.season_name.clone()))
                .copied()
                .unwrap_or_default();
            InjuryAdjustedRow::new(row, found)
        })
        .collect()
}

pub fn run(cfg: &InjuryConfig) -> StageResult<InjurySummary> {
    let rows = read_records::<ValuedPerformance>(&cfg.performances)?;
    let injuries = read_records::<InjuryRecord>(&cfg.injuries)?;
    let totals = aggregate_injuries(injuries);
    log::info!("{} injury groups after aggregation", totals.len());

    let rows_with_injuries = rows
        .iter()
        .filter(|row| totals.contains_key(&(row.player_id, row.season_name.clone())))
        .count();
    let merged = attach_injuries(rows, &totals);
    write_records(&cfg.output, &merged)?;

    Ok(InjurySummary {
        output: cfg.output.clone(),
        rows: merged.len(),
        injury_groups: totals.len(),
        rows_with_injuries,
    })
}
