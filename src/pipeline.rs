use thiserror::Error;

use crate::config::PipelineConfig;
use crate::error::StageError;
use crate::injury_totals::{self, InjurySummary};
use crate::league_filter::{self, FilterSummary};
use crate::market_value::{self, MarketValueSummary};
use crate::player_age::{self, AgeSummary};
use crate::position_split::{self, SplitSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    LeagueFilter,
    PositionSplit,
    MarketValue,
    Injuries,
    Age,
}

impl Stage {
    pub fn label(self) -> &'static str {
        match self {
            Stage::LeagueFilter => "league/season filter",
            Stage::PositionSplit => "position split",
            Stage::MarketValue => "market value join",
            Stage::Injuries => "injury aggregation",
            Stage::Age => "age calculation",
        }
    }
}

#[derive(Debug, Error)]
#[error("{} failed: {source}", .stage.label())]
pub struct PipelineError {
    pub stage: Stage,
    #[source]
    pub source: StageError,
}

#[derive(Debug, Clone)]
pub struct PipelineSummary {
    pub filter: FilterSummary,
    pub split: SplitSummary,
    pub market_value: MarketValueSummary,
    pub injuries: InjurySummary,
    pub age: AgeSummary,
}

/// Runs the five stages in order, stopping at the first failure.
///
/// Outputs of stages that already finished stay on disk.
pub fn run_all(cfg: &PipelineConfig) -> Result<PipelineSummary, PipelineError> {
    let at = |stage: Stage| move |source: StageError| PipelineError { stage, source };

    let filter = league_filter::run(&cfg.filter).map_err(at(Stage::LeagueFilter))?;
    let split = position_split::run(&cfg.split).map_err(at(Stage::PositionSplit))?;
    log::info!("following position {}", cfg.position);
    let market_value = market_value::run(&cfg.market_value).map_err(at(Stage::MarketValue))?;
    let injuries = injury_totals::run(&cfg.injury).map_err(at(Stage::Injuries))?;
    let age = player_age::run(&cfg.age).map_err(at(Stage::Age))?;

    Ok(PipelineSummary {
        filter,
        split,
        market_value,
        injuries,
        age,
    })
}
