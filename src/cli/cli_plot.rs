use super::cli_args::{PlotArgs, TemplateArgs};
use super::cli_errors::CliError;
use super::cli_main::prompt;
use crate::PESplot::pes_plotter::plot_surface;
use crate::PESplot::plot_order::resort_names;
use crate::PESplot::plot_settings::PlotSettings;
use crate::PESplot::surface::PesSurface;
use log::info;
use prettytable::{Cell, Row, Table};
use std::path::PathBuf;

pub fn run_plot(args: &PlotArgs) -> Result<PathBuf, CliError> {
    let mut settings = match &args.settings {
        Some(path) => PlotSettings::load(path)?,
        None => PlotSettings::default(),
    };
    if args.show_energies {
        settings.show_energies = true;
    }
    let surface = PesSurface::from_file(&args.surface)?;
    print_order_table(&surface)?;
    let path = plot_surface(&surface, &settings, args.output.as_deref())?;
    println!("Energy diagram written to {}", path.display());
    Ok(path)
}

pub fn run_template(args: &TemplateArgs) -> Result<(), CliError> {
    PlotSettings::save_template(&args.settings)?;
    info!("edit '{}' and pass it with --settings", args.settings.display());
    Ok(())
}

fn print_order_table(surface: &PesSurface) -> Result<(), CliError> {
    let order = resort_names(surface)?;
    let mut table = Table::new();
    table.set_titles(Row::new(vec![
        Cell::new("position"),
        Cell::new("species"),
        Cell::new("kind"),
        Cell::new("energy"),
    ]));
    for (position, (name, energy)) in order.entries.iter().enumerate() {
        let kind = surface
            .kind(name)
            .map(|k| format!("{:?}", k))
            .unwrap_or_default();
        let name = if order.unreachable.contains(name) {
            format!("{} (unreachable)", name)
        } else {
            name.clone()
        };
        table.add_row(Row::new(vec![
            Cell::new(&position.to_string()),
            Cell::new(&name),
            Cell::new(&kind),
            Cell::new(&format!("{:.2}", energy)),
        ]));
    }
    table.printstd();
    Ok(())
}

pub fn plot_menu() {
    println!("\n=== Energy diagram ===");
    let surface = prompt("Surface file: ");
    if surface.is_empty() {
        println!("No surface file given");
        return;
    }
    let settings = prompt("Settings JSON (empty for defaults): ");
    let output = prompt("Output SVG (empty for the settings value): ");
    let show_energies = prompt("Show energies? (y/n): ").eq_ignore_ascii_case("y");
    let args = PlotArgs {
        surface: PathBuf::from(surface),
        settings: (!settings.is_empty()).then(|| PathBuf::from(settings)),
        output: (!output.is_empty()).then(|| PathBuf::from(output)),
        show_energies,
    };
    if let Err(e) = run_plot(&args) {
        println!("\x1b[31mError: {}\x1b[0m", e);
    }
}

pub fn template_menu() {
    let path = prompt("Settings file to write [plot_settings.json]: ");
    let settings = if path.is_empty() {
        PathBuf::from("plot_settings.json")
    } else {
        PathBuf::from(path)
    };
    if let Err(e) = run_template(&TemplateArgs { settings }) {
        println!("\x1b[31mError: {}\x1b[0m", e);
    }
}
