//! Console output shared by the binaries.

use std::process::ExitCode;

use env_logger::Env;

use crate::error::StageError;
use crate::injury_totals::InjurySummary;
use crate::league_filter::FilterSummary;
use crate::market_value::MarketValueSummary;
use crate::player_age::AgeSummary;
use crate::position_split::SplitSummary;

pub fn init_logging() {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("warn")).try_init();
}

fn dropped_columns(columns: &[String]) {
    if !columns.is_empty() {
        println!("Columns not carried through: {}", columns.join(", "));
    }
}

pub fn filter(summary: &FilterSummary) {
    println!("League/season filter complete");
    println!("Rows read: {}", summary.rows_read);
    println!("Rows kept: {}", summary.rows_kept);
    dropped_columns(&summary.dropped_columns);
    println!("Saved: {}", summary.output.display());
}

pub fn split(summary: &SplitSummary) {
    println!("Position split complete");
    println!("Merged rows: {}", summary.merged_rows);
    println!("Unique profiles: {}", summary.unique_profiles);
    dropped_columns(&summary.dropped_columns);
    for file in &summary.files {
        println!(
            " - {}: {} rows -> {}",
            file.position,
            file.rows,
            file.path.display()
        );
    }
    if summary.missing > 0 {
        println!(
            "Not written: {} rows had no profile or an unlisted main_position",
            summary.missing
        );
    }
}

pub fn market_value(summary: &MarketValueSummary) {
    println!("Market value join complete");
    println!(
        "Valuations: {} ({} player-seasons)",
        summary.valuations, summary.season_values
    );
    if summary.undated > 0 {
        println!("Skipped undated valuations: {}", summary.undated);
    }
    println!("Rows before drop: {}", summary.rows_before_drop);
    println!("Rows after drop: {}", summary.rows_after_drop);
    println!("Dropped without value: {}", summary.dropped());
    println!("Saved: {}", summary.output.display());
}

pub fn injuries(summary: &InjurySummary) {
    println!("Injury aggregation complete");
    println!("Injury groups: {}", summary.injury_groups);
    println!(
        "Rows: {} ({} with injuries)",
        summary.rows, summary.rows_with_injuries
    );
    println!("Saved: {}", summary.output.display());
}

pub fn age(summary: &AgeSummary) {
    println!("Age calculation complete");
    println!("Rows: {}", summary.rows);
    if summary.unknown_ages > 0 {
        println!(
            "Unknown age: {} rows (missing birth date or season)",
            summary.unknown_ages
        );
    }
    println!("Saved: {}", summary.output.display());
}

/// Prints a stage failure and returns the process exit code for it.
pub fn failure(stage: &str, err: &StageError) -> ExitCode {
    match err {
        StageError::Other(inner) => eprintln!("error: {stage}: {inner:#}"),
        other => eprintln!("error: {stage}: {} ({other})", other.kind_label()),
    }
    ExitCode::FAILURE
}

pub fn config_failure(err: &anyhow::Error) -> ExitCode {
    eprintln!("error: configuration: {err:#}");
    ExitCode::FAILURE
}
