use KiPES::cli::cli_args::Cli;
use KiPES::cli::cli_main::run;
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    run(cli)
}
