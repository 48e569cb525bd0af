use std::collections::HashMap;
use std::path::PathBuf;

use chrono::Datelike;

use crate::config::AgeConfig;
use crate::error::StageResult;
use crate::join::first_by_key;
use crate::records::{AgedRow, InjuryAdjustedRow, ProfileBirthDate};
use crate::season::{parse_birth_date, season_end_year};
use crate::table::{read_records, write_records};

#[derive(Debug, Clone)]
pub struct AgeSummary {
    pub output: PathBuf,
    pub rows: usize,
    pub unknown_ages: usize,
}

/// Age in the calendar year a season ends: "23/24" and 2000-05-15 give 24.
///
/// `None` when either the season or the birth date can't be read, or the
/// difference doesn't fit an `i32`.
pub fn age_for_season(season_name: &str, date_of_birth: Option<&str>) -> Option<i32> {
    let end_year = season_end_year(season_name)?;
    let birth_year = parse_birth_date(date_of_birth?)?.year();
    end_year.checked_sub(birth_year)
}

pub fn attach_ages(
    rows: Vec<InjuryAdjustedRow>,
    births: &HashMap<u32, ProfileBirthDate>,
) -> Vec<AgedRow> {
    rows.into_iter()
        .map(|row| {
            let dob = births
                .get(&row.player_id)
                .and_then(|p| p.date_of_birth.as_deref());
            let age = age_for_season(&row.season_name, dob);
            AgedRow::new(row, age)
        })
        .collect()
}

pub fn run(cfg: &AgeConfig) -> StageResult<AgeSummary> {
    let rows = read_records::<InjuryAdjustedRow>(&cfg.input)?;
    let profiles = read_records::<ProfileBirthDate>(&cfg.profiles)?;
    let births = first_by_key(profiles, |p| p.player_id);

    let aged = attach_ages(rows, &births);
    let unknown_ages = aged.iter().filter(|row| row.age.is_none()).count();
    if unknown_ages > 0 {
        log::warn!("{unknown_ages} rows without a computable age");
    }
    write_records(&cfg.output, &aged)?;

    Ok(AgeSummary {
        output: cfg.output.clone(),
        rows: aged.len(),
        unknown_ages,
    })
}
