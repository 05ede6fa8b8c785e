mod app;

use std::process::ExitCode;

use crate::app::models::RunOutcome;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match app::run() {
        Ok(RunOutcome::Completed) => ExitCode::SUCCESS,
        Ok(RunOutcome::Aborted) => ExitCode::from(1),
        Err(err) => {
            log::error!("{err:#}");
            ExitCode::from(1)
        }
    }
}
