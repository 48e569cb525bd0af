pub mod config;
pub mod error;
pub mod injury_totals;
pub mod join;
pub mod league_filter;
pub mod market_value;
pub mod pipeline;
pub mod player_age;
pub mod position;
pub mod position_split;
pub mod records;
pub mod report;
pub mod season;
pub mod table;

pub use config::PipelineConfig;
pub use error::{StageError, StageResult};
pub use position::Position;
