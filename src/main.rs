use bounded_hashmap::Shell;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = Shell::new(stdin.lock(), stdout.lock());

    let config = match shell.configure() {
        Ok(Some(config)) => config,
        Ok(None) => return ExitCode::SUCCESS,
        Err(e) => {
            log::error!("failed to read configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    match shell.run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
