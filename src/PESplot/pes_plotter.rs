//! # Energy diagram
//!
//! ## Purpose
//! Draws a potential energy surface as an SVG image: one horizontal bar per species at its
//! relative energy, species laid out left to right in plot order, dashed connectors between
//! linked species and a single y axis with the energy scale.
//!
//! ## Main steps
//! 1. `resort_names` gives the left-to-right order
//! 2. `format_coords` turns the order into bar coordinates
//! 3. `ranges`, `calc_vshifts`, `calc_axis_limits` set up label offsets and axis limits
//! 4. `build_elements` collects the drawable elements, `render_svg` writes them out
//!
//! ```rust,no_run
//! use KiPES::PESplot::pes_plotter::plot_surface;
//! use KiPES::PESplot::plot_settings::PlotSettings;
//! use KiPES::PESplot::surface::PesSurface;
//! use std::path::Path;
//! let surface = PesSurface::from_file(Path::new("surface.txt")).unwrap();
//! let svg_path = plot_surface(&surface, &PlotSettings::default(), None).unwrap();
//! ```
use crate::PESplot::plot_errors::PlotError;
use crate::PESplot::plot_order::{PlotOrder, resort_names};
use crate::PESplot::plot_settings::PlotSettings;
use crate::PESplot::surface::PesSurface;
use crate::PESplot::svg_elements::{
    AxisLine, AxisTick, Connector, DataText, Frame, FrameText, PlotElement, SpeciesLine,
    SvgElement, fmt_px,
};
use log::{debug, info};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// bar of one species: name, (x1, x2), energy
#[derive(Debug, Clone, PartialEq)]
pub struct SpeciesCoords {
    pub name: String,
    pub x1: f64,
    pub x2: f64,
    pub energy: f64,
}

pub fn format_coords(order: &PlotOrder, settings: &PlotSettings) -> Vec<SpeciesCoords> {
    order
        .entries
        .iter()
        .enumerate()
        .map(|(idx, (name, energy))| {
            let x1 = settings.spc_line_spacing * idx as f64 + settings.spc_line_base;
            SpeciesCoords {
                name: name.clone(),
                x1,
                x2: x1 + settings.spc_line_len,
                energy: *energy,
            }
        })
        .collect()
}

/// max energy, min energy, number of species
pub fn ranges(entries: &[(String, f64)]) -> (f64, f64, usize) {
    let max = entries
        .iter()
        .map(|(_, e)| *e)
        .fold(f64::NEG_INFINITY, f64::max);
    let min = entries.iter().map(|(_, e)| *e).fold(f64::INFINITY, f64::min);
    (max, min, entries.len())
}

/// vertical offsets of the name label (above the bar) and the energy label (below the bar)
pub fn calc_vshifts(max_ene: f64, min_ene: f64, settings: &PlotSettings) -> (f64, f64) {
    let energy_range = max_ene - min_ene;
    (
        settings.name_vshift_scalef * energy_range,
        settings.ene_vshift_scalef * energy_range,
    )
}

/// x right limit, y top limit, y bottom limit
pub fn calc_axis_limits(
    max_ene: f64,
    min_ene: f64,
    spc_cnt: usize,
    settings: &PlotSettings,
) -> (f64, f64, f64) {
    let x_axis_rlim = spc_cnt as f64 + settings.x_axis_right_extend;
    let y_axis_tlim = max_ene + settings.y_axis_top_extend;
    let y_axis_blim = min_ene - settings.y_axis_bot_extend;
    (x_axis_rlim, y_axis_tlim, y_axis_blim)
}

/// ticks from the bottom limit in steps of `interval`, the last one at or above the top limit
pub fn y_ticks(y_axis_blim: f64, y_axis_tlim: f64, interval: f64) -> Vec<f64> {
    let n = ((y_axis_tlim + interval - y_axis_blim) / interval - 1e-9).ceil();
    let n = if n > 0.0 { n as usize } else { 0 };
    (0..n).map(|k| y_axis_blim + k as f64 * interval).collect()
}

pub fn build_elements(
    order: &PlotOrder,
    connections: &[(String, String)],
    settings: &PlotSettings,
) -> Result<(Frame, Vec<PlotElement>), PlotError> {
    if order.is_empty() {
        return Err(PlotError::EmptySurface);
    }
    let coords = format_coords(order, settings);
    let (max_ene, min_ene, spc_cnt) = ranges(&order.entries);
    let (name_vshift, ene_vshift) = calc_vshifts(max_ene, min_ene, settings);
    let (x_axis_rlim, y_axis_tlim, y_axis_blim) =
        calc_axis_limits(max_ene, min_ene, spc_cnt, settings);
    let ticks = y_ticks(y_axis_blim, y_axis_tlim, settings.tick_interval);
    // the axis grows to show the last tick
    let y_top = ticks.last().copied().unwrap_or(y_axis_tlim).max(y_axis_tlim);
    let x_right = x_axis_rlim.max(coords.last().map(|c| c.x2).unwrap_or(0.0));
    let frame = Frame::new(settings, x_right, y_axis_blim, y_top);
    debug!(
        "axis limits: x [0, {}], y [{}, {}], {} ticks",
        x_right,
        y_axis_blim,
        y_top,
        ticks.len()
    );

    let mut elements: Vec<PlotElement> = Vec::new();
    elements.push(
        FrameText::Title {
            text: settings.title.clone(),
            font_size: settings.title_font_size,
        }
        .into(),
    );
    elements.push(
        FrameText::YLabel {
            text: settings.y_axis_label.clone(),
            font_size: settings.label_font_size,
        }
        .into(),
    );
    elements.push(AxisLine.into());
    for value in ticks {
        elements.push(
            AxisTick {
                value,
                font_size: settings.tick_font_size,
            }
            .into(),
        );
    }

    for spc in &coords {
        elements.push(
            SpeciesLine {
                x1: spc.x1,
                x2: spc.x2,
                energy: spc.energy,
                color: settings.spc_line_color.clone(),
                width: settings.spc_line_width,
            }
            .into(),
        );
        let label_x = (spc.x1 + spc.x2) / 2.0;
        elements.push(
            DataText {
                x: label_x,
                y: spc.energy + name_vshift,
                dy: -settings.spc_line_width,
                text: spc.name.clone(),
                font_size: settings.name_font_size,
                bold: true,
            }
            .into(),
        );
        if settings.show_energies {
            elements.push(
                DataText {
                    x: label_x,
                    y: spc.energy - ene_vshift,
                    dy: settings.ene_font_size,
                    text: format!("{:.1}", spc.energy),
                    font_size: settings.ene_font_size,
                    bold: false,
                }
                .into(),
            );
        }
    }

    let by_name: HashMap<&str, &SpeciesCoords> =
        coords.iter().map(|c| (c.name.as_str(), c)).collect();
    for (index, (first, second)) in connections.iter().enumerate() {
        let lookup = |species: &String| {
            by_name
                .get(species.as_str())
                .copied()
                .ok_or_else(|| PlotError::UnknownSpecies {
                    index,
                    species: species.clone(),
                    first: first.clone(),
                    second: second.clone(),
                })
        };
        let (spc1, spc2) = (lookup(first)?, lookup(second)?);
        elements.push(
            Connector {
                x1: spc1.x2,
                y1: spc1.energy,
                x2: spc2.x1,
                y2: spc2.energy,
                color: settings.conn_line_color.clone(),
                width: settings.conn_line_width,
            }
            .into(),
        );
    }
    Ok((frame, elements))
}

pub fn render_svg(
    order: &PlotOrder,
    connections: &[(String, String)],
    settings: &PlotSettings,
) -> Result<String, PlotError> {
    let (frame, elements) = build_elements(order, connections, settings)?;
    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{0}\" height=\"{1}\" viewBox=\"0 0 {0} {1}\">\n",
        fmt_px(frame.width_px),
        fmt_px(frame.height_px)
    ));
    svg.push_str("<rect width=\"100%\" height=\"100%\" fill=\"white\" />\n");
    svg.push_str("<g>\n");
    for element in &elements {
        svg.push_str(&element.to_svg(&frame));
    }
    svg.push_str("</g>\n");
    svg.push_str("</svg>\n");
    Ok(svg)
}

/// Orders the surface, renders it and writes the image. `output` overrides `settings.output`.
pub fn plot_surface(
    surface: &PesSurface,
    settings: &PlotSettings,
    output: Option<&Path>,
) -> Result<PathBuf, PlotError> {
    let order = resort_names(surface)?;
    let svg = render_svg(&order, &surface.connections, settings)?;
    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&settings.output));
    fs::write(&path, svg)?;
    info!(
        "energy diagram with {} species written to '{}'",
        order.len(),
        path.display()
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use tempfile::tempdir;

    fn surface() -> PesSurface {
        PesSurface::from_energies(
            &[("W1", -10.0), ("B1", 5.0), ("W2", -2.0), ("B2", 8.0), ("P1", 3.0)],
            &[("W1", "B1"), ("B1", "W2"), ("W1", "B2"), ("B2", "P1")],
        )
    }

    #[test]
    fn test_format_coords() {
        let order = resort_names(&surface()).unwrap();
        let coords = format_coords(&order, &PlotSettings::default());
        assert_eq!(coords.len(), 5);
        assert_relative_eq!(coords[0].x1, 0.25);
        assert_relative_eq!(coords[0].x2, 0.75);
        assert_relative_eq!(coords[2].x1, 2.0 * 1.15 + 0.25);
        assert_eq!(coords[2].name, order.anchor);
    }

    #[test]
    fn test_ranges_and_limits() {
        let order = resort_names(&surface()).unwrap();
        let settings = PlotSettings::default();
        let (max, min, cnt) = ranges(&order.entries);
        assert_relative_eq!(max, 8.0);
        assert_relative_eq!(min, -10.0);
        assert_eq!(cnt, 5);
        let (name_vshift, ene_vshift) = calc_vshifts(max, min, &settings);
        assert_relative_eq!(name_vshift, 0.9);
        assert_relative_eq!(ene_vshift, 0.9);
        let (xr, top, bottom) = calc_axis_limits(max, min, cnt, &settings);
        assert_relative_eq!(xr, 5.75);
        assert_relative_eq!(top, 10.5);
        assert_relative_eq!(bottom, -12.5);
    }

    #[test]
    fn test_y_ticks() {
        let ticks = y_ticks(-12.5, 10.5, 5.0);
        assert_eq!(ticks, vec![-12.5, -7.5, -2.5, 2.5, 7.5, 12.5]);
        assert_eq!(y_ticks(0.0, 10.0, 5.0), vec![0.0, 5.0, 10.0]);
    }

    #[test]
    fn test_render_svg() {
        let surface = surface();
        let order = resort_names(&surface).unwrap();
        let settings = PlotSettings {
            show_energies: true,
            ..PlotSettings::default()
        };
        let svg = render_svg(&order, &surface.connections, &settings).unwrap();
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"1600\" height=\"900\""));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("class=\"pes-species\"").count(), 5);
        assert_eq!(svg.matches("class=\"pes-connector\"").count(), 4);
        assert_eq!(svg.matches("class=\"pes-tick\"").count(), 6);
        assert!(svg.contains(">W1</text>"));
        assert!(svg.contains(">-10.0</text>"));
        assert!(svg.contains("Potential Energy surface"));
    }

    #[test]
    fn test_unknown_connection_species() {
        let order = resort_names(&surface()).unwrap();
        let conns = vec![("W1".to_string(), "W7".to_string())];
        let result = render_svg(&order, &conns, &PlotSettings::default());
        assert!(matches!(result, Err(PlotError::UnknownSpecies { index: 0, .. })));
    }

    #[test]
    fn test_plot_surface_writes_file() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("c2h5o.svg");
        let path = plot_surface(&surface(), &PlotSettings::default(), Some(&out)).unwrap();
        assert_eq!(path, out);
        let text = fs::read_to_string(&out).unwrap();
        assert!(text.contains("pes-connector"));
    }
}
