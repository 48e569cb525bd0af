use std::process::ExitCode;

use player_dataset::config::PipelineConfig;
use player_dataset::{position_split, report};

fn main() -> ExitCode {
    report::init_logging();
    let cfg = match PipelineConfig::load() {
        Ok(cfg) => cfg,
        Err(err) => return report::config_failure(&err),
    };

    match position_split::run(&cfg.split) {
        Ok(summary) => {
            report::split(&summary);
            ExitCode::SUCCESS
        }
        Err(err) => report::failure("position split", &err),
    }
}
