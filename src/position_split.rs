use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use crate::config::SplitConfig;
use crate::error::StageResult;
use crate::join::first_by_key;
use crate::position::Position;
use crate::records::{PerformanceRecord, PositionedPerformance, ProfilePosition};
use crate::table::{read_records, read_table, write_records};

#[derive(Debug, Clone)]
pub struct SplitFile {
    pub position: Position,
    pub path: PathBuf,
    pub rows: usize,
}

#[derive(Debug, Clone)]
pub struct SplitSummary {
    pub merged_rows: usize,
    pub unique_profiles: usize,
    pub files: Vec<SplitFile>,
    /// Rows with no profile, a blank position or one outside the allow-list.
    pub missing: usize,
    /// Performance columns outside the schema; not written to the split files.
    pub dropped_columns: Vec<String>,
}

#[derive(Debug, Default)]
pub struct PositionSplit {
    pub groups: BTreeMap<Position, Vec<PositionedPerformance>>,
    pub merged_rows: usize,
    pub missing: usize,
}

/// Left-joins each row to its player's main position and buckets the result.
///
/// Input order is kept inside each bucket.
pub fn split_by_position(
    rows: Vec<PerformanceRecord>,
    positions: &HashMap<u32, ProfilePosition>,
    allowed: &[Position],
) -> PositionSplit {
    let mut split = PositionSplit {
        merged_rows: rows.len(),
        ..PositionSplit::default()
    };
    for row in rows {
        let position = positions
            .get(&row.player_id)
            .and_then(|profile| profile.main_position.as_deref())
            .and_then(Position::from_profile)
            .filter(|p| allowed.contains(p));
        match position {
            Some(p) => split
                .groups
                .entry(p)
                .or_default()
                .push(PositionedPerformance::new(row, p.as_str().to_string())),
            None => split.missing += 1,
        }
    }
    split
}

pub fn run(cfg: &SplitConfig) -> StageResult<SplitSummary> {
    let table = read_table::<PerformanceRecord>(&cfg.performances)?;
    let rows = table.rows;
    log::info!("{} performance rows", rows.len());
    if !table.extra_columns.is_empty() {
        log::warn!(
            "{} columns of {} are not carried through: {}",
            table.extra_columns.len(),
            cfg.performances.display(),
            table.extra_columns.join(", ")
        );
    }
    let profiles = read_records::<ProfilePosition>(&cfg.profiles)?;
    let positions = first_by_key(profiles, |p| p.player_id);
    log::info!("{} unique players in profiles", positions.len());

    let split = split_by_position(rows, &positions, &cfg.positions);

    let mut files = Vec::with_capacity(split.groups.len());
    for (position, group) in &split.groups {
        let path = cfg.output_path(*position);
        write_records(&path, group)?;
        files.push(SplitFile {
            position: *position,
            path,
            rows: group.len(),
        });
    }
    if split.missing > 0 {
        log::warn!(
            "{} rows had no profile or a position outside {:?}",
            split.missing,
            cfg.positions
        );
    }

    Ok(SplitSummary {
        merged_rows: split.merged_rows,
        unique_profiles: positions.len(),
        files,
        missing: split.missing,
        dropped_columns: table.extra_columns,
    })
}
