//! plugshell - interactive plugin command shell

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = plugshell::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
