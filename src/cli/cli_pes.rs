use super::cli_args::PesArgs;
use super::cli_errors::CliError;
use super::cli_main::prompt;
use crate::Kinetics::mechanism_parser::MechanismFormat;
use crate::Kinetics::pes_analysis::PesAnalysis;
use log::info;
use std::path::PathBuf;

/// reads, groups and partitions the mechanism, prints the tables and writes the grouped file
pub fn run_pes(args: &PesArgs) -> Result<PesAnalysis, CliError> {
    let analysis = PesAnalysis::from_files(
        &args.mech,
        args.species.as_deref(),
        &args.format,
        args.sort,
    )?;
    analysis.print_summary();
    if let Some(out) = &args.write {
        analysis.write_mechanism(out, args.with_subpes)?;
        info!("grouped mechanism written to '{}'", out.display());
    }
    Ok(analysis)
}

pub fn pes_menu() {
    println!("\n=== PES of a mechanism ===");
    let mech = prompt("Mechanism file: ");
    if mech.is_empty() {
        println!("No mechanism file given");
        return;
    }
    let species = prompt("Species CSV (empty to parse names as formulas): ");
    let sort = prompt("Sort reactions by formula? (y/n): ").eq_ignore_ascii_case("y");
    let write = prompt("Write grouped mechanism to (empty to skip): ");
    let with_subpes =
        !write.is_empty() && prompt("Mark sub-PES in the output? (y/n): ").eq_ignore_ascii_case("y");
    let args = PesArgs {
        mech: PathBuf::from(mech),
        species: (!species.is_empty()).then(|| PathBuf::from(species)),
        format: MechanismFormat::Chemkin,
        sort,
        write: (!write.is_empty()).then(|| PathBuf::from(write)),
        with_subpes,
    };
    if let Err(e) = run_pes(&args) {
        println!("\x1b[31mError: {}\x1b[0m", e);
    }
}
