/// command line arguments
pub mod cli_args;
pub mod cli_errors;
/// entry point: logging, dispatch of subcommands and the interactive menu
pub mod cli_main;
/// `pes` subcommand
pub mod cli_pes;
/// `plot` and `template` subcommands
pub mod cli_plot;
