use std::process::ExitCode;

use player_dataset::config::PipelineConfig;
use player_dataset::{league_filter, report};

fn main() -> ExitCode {
    report::init_logging();
    let cfg = match PipelineConfig::load() {
        Ok(cfg) => cfg,
        Err(err) => return report::config_failure(&err),
    };

    match league_filter::run(&cfg.filter) {
        Ok(summary) => {
            report::filter(&summary);
            ExitCode::SUCCESS
        }
        Err(err) => report::failure("league/season filter", &err),
    }
}
