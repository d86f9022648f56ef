//! # Plot settings
//!
//! All constants of the energy diagram. Stored as JSON; every field is optional in the file
//! and missing ones take the default value.
//!
//! ```json
//! { "spc_line_spacing": 1.3, "show_energies": true, "output": "c2h5o.svg" }
//! ```
use crate::PESplot::plot_errors::PlotError;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotSettings {
    // species lines, in plot units
    pub spc_line_spacing: f64,
    pub spc_line_base: f64,
    pub spc_line_len: f64,
    /// pixels
    pub spc_line_width: f64,
    pub spc_line_color: String,
    pub conn_line_width: f64,
    pub conn_line_color: String,
    // labels
    pub name_font_size: f64,
    pub name_vshift_scalef: f64,
    pub ene_font_size: f64,
    pub ene_vshift_scalef: f64,
    pub show_energies: bool,
    pub tick_font_size: f64,
    pub label_font_size: f64,
    pub title_font_size: f64,
    // axes
    pub x_axis_right_extend: f64,
    pub y_axis_top_extend: f64,
    pub y_axis_bot_extend: f64,
    pub tick_interval: f64,
    pub y_axis_label: String,
    pub title: String,
    // image, inches
    pub width: f64,
    pub height: f64,
    pub px_per_inch: f64,
    pub output: String,
}

impl Default for PlotSettings {
    fn default() -> Self {
        PlotSettings {
            spc_line_spacing: 1.15,
            spc_line_base: 0.25,
            spc_line_len: 0.50,
            spc_line_width: 4.5,
            spc_line_color: "black".to_string(),
            conn_line_width: 1.5,
            conn_line_color: "black".to_string(),
            name_font_size: 18.0,
            name_vshift_scalef: 0.05,
            ene_font_size: 16.0,
            ene_vshift_scalef: 0.05,
            show_energies: false,
            tick_font_size: 18.0,
            label_font_size: 24.0,
            title_font_size: 24.0,
            x_axis_right_extend: 0.75,
            y_axis_top_extend: 2.5,
            y_axis_bot_extend: 2.5,
            tick_interval: 5.0,
            y_axis_label: "Relative Enthalpy at 0 K (kcal/mol)".to_string(),
            title: "Potential Energy surface".to_string(),
            width: 16.0,
            height: 9.0,
            px_per_inch: 100.0,
            output: "surface.svg".to_string(),
        }
    }
}

impl PlotSettings {
    pub fn from_json_str(text: &str) -> Result<Self, PlotError> {
        let settings: PlotSettings = serde_json::from_str(text)?;
        settings.check()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self, PlotError> {
        let text = fs::read_to_string(path)?;
        let settings = Self::from_json_str(&text)?;
        info!("plot settings loaded from '{}'", path.display());
        Ok(settings)
    }

    /// writes the default settings so they can be edited by hand
    pub fn save_template(path: &Path) -> Result<(), PlotError> {
        let text = serde_json::to_string_pretty(&PlotSettings::default())?;
        fs::write(path, text)?;
        info!("plot settings template written to '{}'", path.display());
        Ok(())
    }

    pub fn width_px(&self) -> f64 {
        self.width * self.px_per_inch
    }

    pub fn height_px(&self) -> f64 {
        self.height * self.px_per_inch
    }

    fn check(&self) -> Result<(), PlotError> {
        let positive = [
            ("tick_interval", self.tick_interval),
            ("width", self.width),
            ("height", self.height),
            ("px_per_inch", self.px_per_inch),
            ("spc_line_len", self.spc_line_len),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(PlotError::InvalidSetting {
                    name: name.to_string(),
                    value,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use serde_json::json;
    use tempfile::NamedTempFile;

    #[test]
    fn test_partial_settings_fall_back_to_defaults() {
        let text = json!({"spc_line_spacing": 1.3, "show_energies": true}).to_string();
        let settings = PlotSettings::from_json_str(&text).unwrap();
        assert_relative_eq!(settings.spc_line_spacing, 1.3);
        assert!(settings.show_energies);
        assert_relative_eq!(settings.tick_interval, 5.0);
        assert_eq!(settings.output, "surface.svg");
        assert_relative_eq!(settings.width_px(), 1600.0);
        assert_relative_eq!(settings.height_px(), 900.0);
    }

    #[test]
    fn test_template_round_trip() {
        let temp_file = NamedTempFile::new().unwrap();
        PlotSettings::save_template(temp_file.path()).unwrap();
        let loaded = PlotSettings::load(temp_file.path()).unwrap();
        assert_eq!(loaded, PlotSettings::default());
    }

    #[test]
    fn test_rejects_zero_tick_interval() {
        let text = json!({"tick_interval": 0.0}).to_string();
        assert!(matches!(
            PlotSettings::from_json_str(&text),
            Err(PlotError::InvalidSetting { .. })
        ));
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(
            PlotSettings::from_json_str("{\"width\": }"),
            Err(PlotError::Json(_))
        ));
    }
}
