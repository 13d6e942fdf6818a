use std::{env, process::ExitCode};

use anyhow::Result;
use cubespin::app::{run, AppConfig, RunSummary};
use log::{error, info};

fn start() -> Result<RunSummary> {
    let config = match env::args_os().nth(1) {
        Some(path) => {
            info!("config: {}", path.to_string_lossy());
            AppConfig::from_path(path)?
        }
        None => {
            info!("config: built-in seven cubes");
            AppConfig::default()
        }
    };
    run(&config)
}

fn main() -> ExitCode {
    env_logger::init();

    match start() {
        Ok(summary) => {
            println!(
                "Success! {} frames, {:.2}s simulated, stopped by {:?}",
                summary.frames, summary.seconds, summary.reason
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{:#}", err);
            println!("{:?}", err);
            ExitCode::FAILURE
        }
    }
}
