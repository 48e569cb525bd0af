use std::process::ExitCode;

use player_dataset::config::PipelineConfig;
use player_dataset::{player_age, report};

fn main() -> ExitCode {
    report::init_logging();
    let cfg = match PipelineConfig::load() {
        Ok(cfg) => cfg,
        Err(err) => return report::config_failure(&err),
    };

    match player_age::run(&cfg.age) {
        Ok(summary) => {
            report::age(&summary);
            ExitCode::SUCCESS
        }
        Err(err) => report::failure("age calculation", &err),
    }
}
