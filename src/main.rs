use std::path::PathBuf;

use paddle_oracle::pipeline::CleaningService;
use paddle_oracle::{BotError, Configuration};
use tracing::{info, Level};

fn init_logging() {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();
}

fn main() -> Result<(), BotError> {
    init_logging();

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let configuration = Configuration::load(config_path.as_deref())?;
    info!("Cleaning captured episodes in {}", configuration.training_dir.display());

    let report = CleaningService::new(&configuration).run()?;
    info!(
        "Final dataset: {} rows (MOVE: {}, NONE: {}), {} relabeled rows disagreed with the live policy",
        report.after.moves + report.after.none,
        report.after.moves,
        report.after.none,
        report.disagreements
    );
    info!(
        "Training split: {} train / {} test rows",
        report.train_rows, report.test_rows
    );
    Ok(())
}
