//! # SVG elements of the energy diagram
//!
//! Every drawable piece is a small struct implementing [`SvgElement`]; [`PlotElement`] bundles
//! them so the renderer can keep one list and emit it in order. Positions are stored in plot
//! units (species index along x, energy along y) and mapped to pixels by [`Frame`].
use crate::PESplot::plot_settings::PlotSettings;
use enum_dispatch::enum_dispatch;

const LEFT_MARGIN: f64 = 0.075;
const RIGHT_MARGIN: f64 = 0.02;
const TOP_MARGIN: f64 = 0.08;
const BOTTOM_MARGIN: f64 = 0.075;
const FONT_FAMILY: &str = "Arial, Helvetica, sans-serif";

pub fn escape_xml_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    result
}

/// pixel values with two decimals are plenty for a 100 px/inch image
pub fn fmt_px(v: f64) -> String {
    let s = format!("{:.2}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

/// Maps plot units onto the pixel area inside the margins
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub width_px: f64,
    pub height_px: f64,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Frame {
    pub fn new(settings: &PlotSettings, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Frame {
            width_px: settings.width_px(),
            height_px: settings.height_px(),
            x_min: 0.0,
            x_max,
            y_min,
            y_max,
        }
    }

    pub fn left(&self) -> f64 {
        LEFT_MARGIN * self.width_px
    }

    pub fn right(&self) -> f64 {
        (1.0 - RIGHT_MARGIN) * self.width_px
    }

    pub fn top(&self) -> f64 {
        TOP_MARGIN * self.height_px
    }

    pub fn bottom(&self) -> f64 {
        (1.0 - BOTTOM_MARGIN) * self.height_px
    }

    pub fn x(&self, v: f64) -> f64 {
        let span = self.x_max - self.x_min;
        let span = if span > 0.0 { span } else { 1.0 };
        self.left() + (v - self.x_min) / span * (self.right() - self.left())
    }

    /// y grows downwards in SVG
    pub fn y(&self, v: f64) -> f64 {
        let span = self.y_max - self.y_min;
        let span = if span > 0.0 { span } else { 1.0 };
        self.top() + (self.y_max - v) / span * (self.bottom() - self.top())
    }
}

#[enum_dispatch]
pub trait SvgElement {
    fn to_svg(&self, frame: &Frame) -> String;
}

/// horizontal bar of one species
#[derive(Debug, Clone, PartialEq)]
pub struct SpeciesLine {
    pub x1: f64,
    pub x2: f64,
    pub energy: f64,
    pub color: String,
    pub width: f64,
}

impl SvgElement for SpeciesLine {
    fn to_svg(&self, frame: &Frame) -> String {
        let y = fmt_px(frame.y(self.energy));
        format!(
            "<line class=\"pes-species\" x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\" stroke-width=\"{}\" />\n",
            fmt_px(frame.x(self.x1)),
            y,
            fmt_px(frame.x(self.x2)),
            y,
            escape_xml_text(&self.color),
            fmt_px(self.width)
        )
    }
}

/// dashed line between two species
#[derive(Debug, Clone, PartialEq)]
pub struct Connector {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub color: String,
    pub width: f64,
}

impl SvgElement for Connector {
    fn to_svg(&self, frame: &Frame) -> String {
        format!(
            "<line class=\"pes-connector\" x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\" stroke-width=\"{}\" stroke-dasharray=\"6,4\" />\n",
            fmt_px(frame.x(self.x1)),
            fmt_px(frame.y(self.y1)),
            fmt_px(frame.x(self.x2)),
            fmt_px(frame.y(self.y2)),
            escape_xml_text(&self.color),
            fmt_px(self.width)
        )
    }
}

/// the left spine, the only visible axis
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLine;

impl SvgElement for AxisLine {
    fn to_svg(&self, frame: &Frame) -> String {
        format!(
            "<line class=\"pes-axis\" x1=\"{0}\" y1=\"{1}\" x2=\"{0}\" y2=\"{2}\" stroke=\"black\" stroke-width=\"1\" />\n",
            fmt_px(frame.left()),
            fmt_px(frame.top()),
            fmt_px(frame.bottom())
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    pub value: f64,
    pub font_size: f64,
}

impl SvgElement for AxisTick {
    fn to_svg(&self, frame: &Frame) -> String {
        let x = frame.left();
        let y = frame.y(self.value);
        format!(
            "<line class=\"pes-tick\" x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"black\" stroke-width=\"1\" />\n\
             <text x=\"{}\" y=\"{}\" font-family=\"{}\" font-size=\"{}\" text-anchor=\"end\" dominant-baseline=\"middle\">{:.1}</text>\n",
            fmt_px(x - 6.0),
            fmt_px(y),
            fmt_px(x),
            fmt_px(y),
            fmt_px(x - 10.0),
            fmt_px(y),
            FONT_FAMILY,
            fmt_px(self.font_size),
            self.value
        )
    }
}

/// text anchored at a point in plot units, `dy` is an extra pixel offset
#[derive(Debug, Clone, PartialEq)]
pub struct DataText {
    pub x: f64,
    pub y: f64,
    pub dy: f64,
    pub text: String,
    pub font_size: f64,
    pub bold: bool,
}

impl SvgElement for DataText {
    fn to_svg(&self, frame: &Frame) -> String {
        let weight = if self.bold { "bold" } else { "normal" };
        format!(
            "<text x=\"{}\" y=\"{}\" font-family=\"{}\" font-size=\"{}\" font-weight=\"{}\" text-anchor=\"middle\">{}</text>\n",
            fmt_px(frame.x(self.x)),
            fmt_px(frame.y(self.y) + self.dy),
            FONT_FAMILY,
            fmt_px(self.font_size),
            weight,
            escape_xml_text(&self.text)
        )
    }
}

/// text placed relative to the frame: the title and the rotated y label
#[derive(Debug, Clone, PartialEq)]
pub enum FrameText {
    Title { text: String, font_size: f64 },
    YLabel { text: String, font_size: f64 },
}

impl SvgElement for FrameText {
    fn to_svg(&self, frame: &Frame) -> String {
        match self {
            FrameText::Title { text, font_size } => format!(
                "<text x=\"{}\" y=\"{}\" font-family=\"{}\" font-size=\"{}\" text-anchor=\"middle\">{}</text>\n",
                fmt_px((frame.left() + frame.right()) / 2.0),
                fmt_px(frame.top() / 2.0 + font_size / 2.0),
                FONT_FAMILY,
                fmt_px(*font_size),
                escape_xml_text(text)
            ),
            FrameText::YLabel { text, font_size } => {
                let x = frame.left() / 4.0;
                let y = (frame.top() + frame.bottom()) / 2.0;
                format!(
                    "<text x=\"{0}\" y=\"{1}\" font-family=\"{2}\" font-size=\"{3}\" text-anchor=\"middle\" transform=\"rotate(-90 {0} {1})\">{4}</text>\n",
                    fmt_px(x),
                    fmt_px(y),
                    FONT_FAMILY,
                    fmt_px(*font_size),
                    escape_xml_text(text)
                )
            }
        }
    }
}

#[enum_dispatch(SvgElement)]
#[derive(Debug, Clone, PartialEq)]
pub enum PlotElement {
    SpeciesLine(SpeciesLine),
    Connector(Connector),
    AxisLine(AxisLine),
    AxisTick(AxisTick),
    DataText(DataText),
    FrameText(FrameText),
}
