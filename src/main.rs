use clap::Parser;
use warelog::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
