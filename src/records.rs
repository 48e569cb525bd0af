//! Row types for every table the pipeline reads or writes.
//!
//! Output types serialize in the declared field order, which matches their
//! `COLUMNS` list. Counting stats stay `Option` so blank cells survive a
//! round trip unchanged.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::table::CsvRecord;

/// Reads a counting stat, accepting integral floats ("25.0") as written for
/// integer columns that contain blanks. Blank cells stay `None`.
fn count_cell<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    parse_count(&raw).map_err(D::Error::custom)
}

fn parse_count(raw: &str) -> Result<Option<u32>, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if let Ok(n) = trimmed.parse::<u32>() {
        return Ok(Some(n));
    }
    let value = trimmed
        .parse::<f64>()
        .map_err(|_| format!("invalid count `{trimmed}`"))?;
    if value.is_finite() && value.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&value)
    {
        Ok(Some(value as u32))
    } else {
        Err(format!("count out of range or fractional: `{trimmed}`"))
    }
}

const PERFORMANCE_COLUMNS: [&str; 20] = [
    "player_id",
    "season_name",
    "competition_id",
    "competition_name",
    "team_id",
    "team_name",
    "nb_in_group",
    "nb_on_pitch",
    "goals",
    "assists",
    "own_goals",
    "subed_in",
    "subed_out",
    "yellow_cards",
    "second_yellow_cards",
    "direct_red_cards",
    "penalty_goals",
    "minutes_played",
    "goals_conceded",
    "clean_sheets",
];

/// One player's line in one competition, season and team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRecord {
    pub player_id: u32,
    pub season_name: String,
    pub competition_id: String,
    pub competition_name: String,
    pub team_id: u32,
    pub team_name: String,
    #[serde(deserialize_with = "count_cell")]
    pub nb_in_group: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub nb_on_pitch: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub goals: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub assists: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub own_goals: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub subed_in: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub subed_out: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub yellow_cards: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub second_yellow_cards: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub direct_red_cards: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub penalty_goals: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub minutes_played: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub goals_conceded: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub clean_sheets: Option<u32>,
}

impl CsvRecord for PerformanceRecord {
    const COLUMNS: &'static [&'static str] = &PERFORMANCE_COLUMNS;
}

/// Performance line tagged with the player's main position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedPerformance {
    pub player_id: u32,
    pub season_name: String,
    pub competition_id: String,
    pub competition_name: String,
    pub team_id: u32,
    pub team_name: String,
    #[serde(deserialize_with = "count_cell")]
    pub nb_in_group: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub nb_on_pitch: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub goals: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub assists: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub own_goals: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub subed_in: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub subed_out: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub yellow_cards: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub second_yellow_cards: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub direct_red_cards: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub penalty_goals: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub minutes_played: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub goals_conceded: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub clean_sheets: Option<u32>,
    pub main_position: String,
}

impl CsvRecord for PositionedPerformance {
    const COLUMNS: &'static [&'static str] = &[
        "player_id",
        "season_name",
        "competition_id",
        "competition_name",
        "team_id",
        "team_name",
        "nb_in_group",
        "nb_on_pitch",
        "goals",
        "assists",
        "own_goals",
        "subed_in",
        "subed_out",
        "yellow_cards",
        "second_yellow_cards",
        "direct_red_cards",
        "penalty_goals",
        "minutes_played",
        "goals_conceded",
        "clean_sheets",
        "main_position",
    ];
}

impl PositionedPerformance {
    pub fn new(p: PerformanceRecord, main_position: String) -> Self {
        Self {
            player_id: p.player_id,
            season_name: p.season_name,
            competition_id: p.competition_id,
            competition_name: p.competition_name,
            team_id: p.team_id,
            team_name: p.team_name,
            nb_in_group: p.nb_in_group,
            nb_on_pitch: p.nb_on_pitch,
            goals: p.goals,
            assists: p.assists,
            own_goals: p.own_goals,
            subed_in: p.subed_in,
            subed_out: p.subed_out,
            yellow_cards: p.yellow_cards,
            second_yellow_cards: p.second_yellow_cards,
            direct_red_cards: p.direct_red_cards,
            penalty_goals: p.penalty_goals,
            minutes_played: p.minutes_played,
            goals_conceded: p.goals_conceded,
            clean_sheets: p.clean_sheets,
            main_position,
        }
    }
}

/// Positioned performance joined to the season's market value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuedPerformance {
    pub player_id: u32,
    pub season_name: String,
    pub competition_id: String,
    pub competition_name: String,
    pub team_id: u32,
    pub team_name: String,
    #[serde(deserialize_with = "count_cell")]
    pub nb_in_group: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub nb_on_pitch: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub goals: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub assists: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub own_goals: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub subed_in: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub subed_out: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub yellow_cards: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub second_yellow_cards: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub direct_red_cards: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub penalty_goals: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub minutes_played: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub goals_conceded: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub clean_sheets: Option<u32>,
    pub main_position: String,
    pub value: f64,
}

impl CsvRecord for ValuedPerformance {
    const COLUMNS: &'static [&'static str] = &[
        "player_id",
        "season_name",
        "competition_id",
        "competition_name",
        "team_id",
        "team_name",
        "nb_in_group",
        "nb_on_pitch",
        "goals",
        "assists",
        "own_goals",
        "subed_in",
        "subed_out",
        "yellow_cards",
        "second_yellow_cards",
        "direct_red_cards",
        "penalty_goals",
        "minutes_played",
        "goals_conceded",
        "clean_sheets",
        "main_position",
        "value",
    ];
}

impl ValuedPerformance {
    pub fn new(p: PositionedPerformance, value: f64) -> Self {
        Self {
            player_id: p.player_id,
            season_name: p.season_name,
            competition_id: p.competition_id,
            competition_name: p.competition_name,
            team_id: p.team_id,
            team_name: p.team_name,
            nb_in_group: p.nb_in_group,
            nb_on_pitch: p.nb_on_pitch,
            goals: p.goals,
            assists: p.assists,
            own_goals: p.own_goals,
            subed_in: p.subed_in,
            subed_out: p.subed_out,
            yellow_cards: p.yellow_cards,
            second_yellow_cards: p.second_yellow_cards,
            direct_red_cards: p.direct_red_cards,
            penalty_goals: p.penalty_goals,
            minutes_played: p.minutes_played,
            goals_conceded: p.goals_conceded,
            clean_sheets: p.clean_sheets,
            main_position: p.main_position,
            value,
        }
    }
}

/// Per-season analysis row: competition and team context dropped, injury
/// totals added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InjuryAdjustedRow {
    pub player_id: u32,
    pub season_name: String,
    #[serde(deserialize_with = "count_cell")]
    pub nb_in_group: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub nb_on_pitch: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub goals: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub assists: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub own_goals: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub subed_in: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub subed_out: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub yellow_cards: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub second_yellow_cards: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub direct_red_cards: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub penalty_goals: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub minutes_played: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub goals_conceded: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub clean_sheets: Option<u32>,
    pub value: f64,
    pub days_missed: f64,
    pub games_missed: f64,
}

const INJURY_ADJUSTED_COLUMNS: [&str; 19] = [
    "player_id",
    "season_name",
    "nb_in_group",
    "nb_on_pitch",
    "goals",
    "assists",
    "own_goals",
    "subed_in",
    "subed_out",
    "yellow_cards",
    "second_yellow_cards",
    "direct_red_cards",
    "penalty_goals",
    "minutes_played",
    "goals_conceded",
    "clean_sheets",
    "value",
    "days_missed",
    "games_missed",
];

impl CsvRecord for InjuryAdjustedRow {
    const COLUMNS: &'static [&'static str] = &INJURY_ADJUSTED_COLUMNS;
}

impl InjuryAdjustedRow {
    pub fn new(p: ValuedPerformance, totals: InjuryTotals) -> Self {
        Self {
            player_id: p.player_id,
            season_name: p.season_name,
            nb_in_group: p.nb_in_group,
            nb_on_pitch: p.nb_on_pitch,
            goals: p.goals,
            assists: p.assists,
            own_goals: p.own_goals,
            subed_in: p.subed_in,
            subed_out: p.subed_out,
            yellow_cards: p.yellow_cards,
            second_yellow_cards: p.second_yellow_cards,
            direct_red_cards: p.direct_red_cards,
            penalty_goals: p.penalty_goals,
            minutes_played: p.minutes_played,
            goals_conceded: p.goals_conceded,
            clean_sheets: p.clean_sheets,
            value: p.value,
            days_missed: totals.days_missed,
            games_missed: totals.games_missed,
        }
    }
}

/// Final table: the analysis row plus the player's age at season end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgedRow {
    pub player_id: u32,
    pub season_name: String,
    #[serde(deserialize_with = "count_cell")]
    pub nb_in_group: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub nb_on_pitch: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub goals: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub assists: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub own_goals: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub subed_in: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub subed_out: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub yellow_cards: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub second_yellow_cards: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub direct_red_cards: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub penalty_goals: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub minutes_played: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub goals_conceded: Option<u32>,
    #[serde(deserialize_with = "count_cell")]
    pub clean_sheets: Option<u32>,
    pub value: f64,
    pub days_missed: f64,
    pub games_missed: f64,
    pub age: Option<i32>,
}

impl CsvRecord for AgedRow {
    const COLUMNS: &'static [&'static str] = &[
        "player_id",
        "season_name",
        "nb_in_group",
        "nb_on_pitch",
        "goals",
        "assists",
        "own_goals",
        "subed_in",
        "subed_out",
        "yellow_cards",
        "second_yellow_cards",
        "direct_red_cards",
        "penalty_goals",
        "minutes_played",
        "goals_conceded",
        "clean_sheets",
        "value",
        "days_missed",
        "games_missed",
        "age",
    ];
}

impl AgedRow {
    pub fn new(p: InjuryAdjustedRow, age: Option<i32>) -> Self {
        Self {
            player_id: p.player_id,
            season_name: p.season_name,
            nb_in_group: p.nb_in_group,
            nb_on_pitch: p.nb_on_pitch,
            goals: p.goals,
            assists: p.assists,
            own_goals: p.own_goals,
            subed_in: p.subed_in,
            subed_out: p.subed_out,
            yellow_cards: p.yellow_cards,
            second_yellow_cards: p.second_yellow_cards,
            direct_red_cards: p.direct_red_cards,
            penalty_goals: p.penalty_goals,
            minutes_played: p.minutes_played,
            goals_conceded: p.goals_conceded,
            clean_sheets: p.clean_sheets,
            value: p.value,
            days_missed: p.days_missed,
            games_missed: p.games_missed,
            age,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InjuryTotals {
    pub days_missed: f64,
    pub games_missed: f64,
}

// Secondary tables. Only the columns a stage needs are read.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfilePosition {
    pub player_id: u32,
    pub main_position: Option<String>,
}

impl CsvRecord for ProfilePosition {
    const COLUMNS: &'static [&'static str] = &["player_id", "main_position"];
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileBirthDate {
    pub player_id: u32,
    pub date_of_birth: Option<String>,
}

impl CsvRecord for ProfileBirthDate {
    const COLUMNS: &'static [&'static str] = &["player_id", "date_of_birth"];
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketValueRecord {
    pub player_id: u32,
    pub date_unix: String,
    pub value: Option<f64>,
}

impl CsvRecord for MarketValueRecord {
    const COLUMNS: &'static [&'static str] = &["player_id", "date_unix", "value"];
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InjuryRecord {
    pub player_id: u32,
    pub season_name: String,
    pub days_missed: Option<f64>,
    pub games_missed: Option<f64>,
}

impl CsvRecord for InjuryRecord {
    const COLUMNS: &'static [&'static str] =
        &["player_id", "season_name", "days_missed", "games_missed"];
}
