use clap::Parser;
use stockpick::cli::{Cli, run};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
