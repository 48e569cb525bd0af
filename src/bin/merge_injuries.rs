use std::process::ExitCode;

use player_dataset::config::PipelineConfig;
use player_dataset::{injury_totals, report};

fn main() -> ExitCode {
    report::init_logging();
    let cfg = match PipelineConfig::load() {
        Ok(cfg) => cfg,
        Err(err) => return report::config_failure(&err),
    };

    match injury_totals::run(&cfg.injury) {
        Ok(summary) => {
            report::injuries(&summary);
            ExitCode::SUCCESS
        }
        Err(err) => report::failure("injury aggregation", &err),
    }
}
