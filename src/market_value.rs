use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Result, anyhow};
use chrono::NaiveDate;

use crate::config::MarketValueConfig;
use crate::error::StageResult;
use crate::records::{MarketValueRecord, PositionedPerformance, ValuedPerformance};
use crate::season::{parse_valuation_date, season_for_date};
use crate::table::{read_records, write_records};

/// How several valuations of one player in one season become one value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValuePolicy {
    #[default]
    Mean,
    /// Most recent valuation; on equal dates the later row wins.
    Latest,
}

impl FromStr for ValuePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mean" => Ok(ValuePolicy::Mean),
            "latest" => Ok(ValuePolicy::Latest),
            other => Err(anyhow!("unknown value policy: {other}")),
        }
    }
}

impl fmt::Display for ValuePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValuePolicy::Mean => f.write_str("mean"),
            ValuePolicy::Latest => f.write_str("latest"),
        }
    }
}

pub type SeasonKey = (u32, String);

#[derive(Debug, Clone)]
pub struct MarketValueSummary {
    pub output: PathBuf,
    pub valuations: usize,
    /// Valuations with a blank `date_unix`, skipped like blank values.
    pub undated: usize,
    pub season_values: usize,
    pub rows_before_drop: usize,
    pub rows_after_drop: usize,
}

impl MarketValueSummary {
    pub fn dropped(&self) -> usize {
        self.rows_before_drop - self.rows_after_drop
    }
}

/// Reduces dated valuations to one value per (player, season).
///
/// Rows with a blank value or a blank date are skipped; any other date text
/// must parse.
pub fn season_values(
    records: Vec<MarketValueRecord>,
    policy: ValuePolicy,
) -> Result<HashMap<SeasonKey, f64>> {
    let mut by_season: HashMap<SeasonKey, Vec<(NaiveDate, f64)>> = HashMap::new();
    for record in records {
        if record.date_unix.trim().is_empty() {
            continue;
        }
        let date = parse_valuation_date(&record.date_unix).ok_or_else(|| {
            anyhow!(
                "unparseable date_unix `{}` for player {}",
                record.date_unix,
                record.player_id
            )
        })?;
        let Some(value) = record.value else {
            continue;
        };
        by_season
            .entry((record.player_id, season_for_date(date)))
            .or_default()
            .push((date, value));
    }

    Ok(by_season
        .into_iter()
        .filter_map(|(key, entries)| reduce(&entries, policy).map(|v| (key, v)))
        .collect())
}

fn reduce(entries: &[(NaiveDate, f64)], policy: ValuePolicy) -> Option<f64> {
    match policy {
        ValuePolicy::Mean => {
            if entries.is_empty() {
                return None;
            }
            let sum = entries.iter().map(|(_, v)| v).sum::<f64>();
            Some(sum / entries.len() as f64)
        }
        ValuePolicy::Latest => entries
            .iter()
            .fold(None::<(NaiveDate, f64)>, |best, &(date, value)| match best {
                Some((best_date, _)) if best_date > date => best,
                _ => Some((date, value)),
            })
            .map(|(_, value)| value),
    }
}

/// Attaches season values and drops rows without one.
pub fn join_market_values(
    rows: Vec<PositionedPerformance>,
    values: &HashMap<SeasonKey, f64>,
) -> Vec<ValuedPerformance> {
    rows.into_iter()
        .filter_map(|row| {
            let value = *values.get(&(row.player_id, row.season_name.clone()))?;
            Some(ValuedPerformance::new(row, value))
        })
        .collect()
}

pub fn run(cfg: &MarketValueConfig) -> StageResult<MarketValueSummary> {
    let rows = read_records::<PositionedPerformance>(&cfg.performances)?;
    let rows_before_drop = rows.len();
    let records = read_records::<MarketValueRecord>(&cfg.market_values)?;
    let valuations = records.len();
    let undated = records
        .iter()
        .filter(|r| r.date_unix.trim().is_empty())
        .count();
    if undated > 0 {
        log::warn!("skipping {undated} valuations without a date");
    }

    let values = season_values(records, cfg.policy)?;
    log::info!(
        "{} valuations reduced to {} season values ({})",
        valuations,
        values.len(),
        cfg.policy
    );

    let joined = join_market_values(rows, &values);
    if joined.len() < rows_before_drop {
        log::info!(
            "dropped {} rows without a market value",
            rows_before_drop - joined.len()
        );
    }
    write_records(&cfg.output, &joined)?;

    Ok(MarketValueSummary {
        output: cfg.output.clone(),
        valuations,
        undated,
        season_values: values.len(),
        rows_before_drop,
        rows_after_drop: joined.len(),
    })
}
