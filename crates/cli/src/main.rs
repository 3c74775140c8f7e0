use std::process::ExitCode;

fn main() -> ExitCode {
    ops_cli::run()
}
