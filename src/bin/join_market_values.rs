use std::process::ExitCode;

use player_dataset::config::PipelineConfig;
use player_dataset::{market_value, report};

fn main() -> ExitCode {
    report::init_logging();
    let cfg = match PipelineConfig::load() {
        Ok(cfg) => cfg,
        Err(err) => return report::config_failure(&err),
    };

    match market_value::run(&cfg.market_value) {
        Ok(summary) => {
            report::market_value(&summary);
            ExitCode::SUCCESS
        }
        Err(err) => report::failure("market value join", &err),
    }
}
