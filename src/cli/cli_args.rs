use crate::Kinetics::mechanism_parser::MechanismFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "kipes",
    version,
    about = "KiPES - potential energy surfaces of reaction mechanisms: grouping by formula, connected sub-surfaces and energy diagrams"
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Without a subcommand the interactive menu is started
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Show debug messages
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write logs to a file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Group the reactions of a mechanism into PES and sub-PES
    Pes(PesArgs),
    /// Draw the energy diagram of a surface file
    Plot(PlotArgs),
    /// Write the default plot settings to a JSON file
    Template(TemplateArgs),
}

#[derive(Args, Debug, Clone)]
pub struct PesArgs {
    /// Mechanism file
    #[arg(short, long, value_name = "PATH")]
    pub mech: PathBuf,

    /// CSV file with `name` and `formula` columns
    #[arg(short, long, value_name = "PATH")]
    pub species: Option<PathBuf>,

    /// Mechanism format, only chemkin is supported
    #[arg(short, long, default_value = "chemkin")]
    pub format: MechanismFormat,

    /// Sort reactions by formula before grouping
    #[arg(long)]
    pub sort: bool,

    /// Write the grouped mechanism to this file
    #[arg(short, long, value_name = "PATH")]
    pub write: Option<PathBuf>,

    /// Mark sub-PES in the written mechanism
    #[arg(long, requires = "write")]
    pub with_subpes: bool,
}

#[derive(Args, Debug, Clone)]
pub struct PlotArgs {
    /// Surface file with ENERGIES and CONNECTIONS sections
    #[arg(short = 'i', long, value_name = "PATH")]
    pub surface: PathBuf,

    /// JSON file with plot settings
    #[arg(short, long, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// Output SVG file, overrides the settings
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Print energies under the species lines
    #[arg(long)]
    pub show_energies: bool,
}

#[derive(Args, Debug, Clone)]
pub struct TemplateArgs {
    /// Where to write the settings
    #[arg(short, long, value_name = "PATH", default_value = "plot_settings.json")]
    pub settings: PathBuf,
}
