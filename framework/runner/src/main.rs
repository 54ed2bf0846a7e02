use std::process::ExitCode;

use tsperf_core::prelude::Env;
use tsperf_runner::prelude::*;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = init();

    match run(cli.command, &Env::from_process()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => match e.downcast_ref::<ToolExitError>() {
            // The tool has already reported why it failed, pass its exit code on
            Some(exit) => {
                log::error!("{exit}");
                exit.code()
                    .and_then(|code| u8::try_from(code).ok())
                    .filter(|code| *code != 0)
                    .map_or(ExitCode::FAILURE, ExitCode::from)
            }
            None => {
                eprintln!("Error: {e:?}");
                ExitCode::FAILURE
            }
        },
    }
}
