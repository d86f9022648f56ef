use super::cli_args::{Cli, Commands};
use super::cli_errors::CliError;
use super::cli_pes::{pes_menu, run_pes};
use super::cli_plot::{plot_menu, run_plot, run_template, template_menu};
use log::{debug, error, info};
use simplelog::{
    ColorChoice, CombinedLogger, Config, LevelFilter, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

/// Terminal logger, plus a file logger when a path is given. The file always gets debug messages.
pub fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<(), CliError> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    if let Some(path) = log_file {
        loggers.push(WriteLogger::new(
            LevelFilter::Debug,
            Config::default(),
            File::create(path)?,
        ));
    }
    CombinedLogger::init(loggers).map_err(|e| CliError::Logger(e.to_string()))
}

pub fn dispatch(command: &Commands) -> Result<(), CliError> {
    match command {
        Commands::Pes(args) => {
            info!("Dispatching to 'pes' command.");
            run_pes(args).map(|_| ())
        }
        Commands::Plot(args) => {
            info!("Dispatching to 'plot' command.");
            run_plot(args).map(|_| ())
        }
        Commands::Template(args) => {
            info!("Dispatching to 'template' command.");
            run_template(args)
        }
    }
}

pub fn run(cli: Cli) -> ExitCode {
    if let Err(e) = init_logging(cli.verbose, cli.log_file.as_deref()) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }
    debug!("CLI arguments: {:?}", cli);
    match &cli.command {
        Some(command) => match dispatch(command) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!("Command failed: {}", e);
                ExitCode::FAILURE
            }
        },
        None => {
            run_interactive_menu();
            ExitCode::SUCCESS
        }
    }
}

pub fn run_interactive_menu() {
    loop {
        show_main_menu();
        let choice = get_user_input();

        match choice.trim() {
            "1" => pes_menu(),
            "2" => plot_menu(),
            "3" => template_menu(),
            "0" | "" => {
                println!("Goodbye!");
                break;
            }
            _ => println!("Invalid choice. Please try again."),
        }
    }
}
/* colors
Blue (\x1b[34m) - header
Yellow (\x1b[33m) - menu options
Cyan (\x1b[36m) - prompts
Red (\x1b[31m) - errors
*/
fn show_main_menu() {
    println!(
        "\x1b[34m\n KiPES: potential energy surfaces of reaction mechanisms \n\x1b[0m"
    );
    println!("\x1b[33m1. Group mechanism into PES and sub-PES\x1b[0m");
    println!("\x1b[33m2. Energy diagram of a surface\x1b[0m");
    println!("\x1b[33m3. Write plot settings template\x1b[0m");
    println!("\x1b[33m0. Exit\x1b[0m");
    print!("\x1b[36mEnter your choice: \x1b[0m");
    let _ = io::stdout().flush();
}

/// end of input reads as an empty line
fn get_user_input() -> String {
    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        input.clear();
    }
    input
}

pub(crate) fn prompt(message: &str) -> String {
    print!("\x1b[36m{}\x1b[0m", message);
    let _ = io::stdout().flush();
    get_user_input().trim().to_string()
}
