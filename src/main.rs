use std::process::ExitCode;

use player_dataset::config::PipelineConfig;
use player_dataset::pipeline::{self, PipelineSummary};
use player_dataset::report;

fn main() -> ExitCode {
    report::init_logging();
    let cfg = match PipelineConfig::load() {
        Ok(cfg) => cfg,
        Err(err) => return report::config_failure(&err),
    };

    println!(
        "Building {} dataset in {}",
        cfg.position,
        cfg.data_dir.display()
    );
    match pipeline::run_all(&cfg) {
        Ok(summary) => {
            print_summary(&summary);
            ExitCode::SUCCESS
        }
        Err(err) => report::failure(err.stage.label(), &err.source),
    }
}

fn print_summary(summary: &PipelineSummary) {
    report::filter(&summary.filter);
    println!();
    report::split(&summary.split);
    println!();
    report::market_value(&summary.market_value);
    println!();
    report::injuries(&summary.injuries);
    println!();
    report::age(&summary.age);
}
