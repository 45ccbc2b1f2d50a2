//! TikZ backend: accepts canvas-style drawing calls and accumulates them as
//! TikZ statements instead of rasterizing. Call [`TikzCanvas::to_latex`] once
//! the drawing is complete to obtain a standalone LaTeX document.
//!
//! Only straight segments, full circles, arcs and text labels are supported.
//! Transforms, clipping and rectangles are accepted as no-ops so that any
//! diagram traversal written against [`DrawingSurface`](crate::api::DrawingSurface)
//! can drive this backend unchanged.

use std::f64::consts::TAU;
use std::fmt;

use log::{debug, trace};

use crate::api::{
    CanvasFillStrokeStyles, CanvasLineStyles, CanvasPaths, CanvasRectangles, CanvasState,
    CanvasText, CanvasTransforms, MonospaceMetrics, TextMeasure,
};
use crate::error::Result;

const DOCUMENT_HEAD: &str = "\\documentclass[12pt]{article}\n\
\\usepackage{tikz}\n\
\n\
\\begin{document}\n\
\n\
\\begin{center}\n";

const DOCUMENT_TAIL: &str = "\\end{tikzpicture}\n\
\\end{center}\n\
\n\
\\end{document}\n";

/// Digits after the decimal point for coordinates and radii.
const POSITION_DIGITS: usize = 3;
/// Digits after the decimal point for angles in degrees.
const ANGLE_DIGITS: usize = 5;

/// Settings fixed for the lifetime of a [`TikzCanvas`].
#[derive(Clone, Debug, PartialEq)]
pub struct TikzOptions {
    /// Document units per surface pixel. TikZ becomes unreliable once
    /// coordinates exceed a few hundred units, so size this against the
    /// largest expected pixel extent of the drawing.
    pub scale: f64,
    /// Value of the `scale` option on the emitted `tikzpicture`.
    pub picture_scale: f64,
    /// Vertical distance, in surface pixels, between a point and a label
    /// placed above or below it.
    pub label_offset: f64,
}

impl Default for TikzOptions {
    fn default() -> Self {
        Self {
            scale: 0.1,
            picture_scale: 0.2,
            label_offset: 10.0,
        }
    }
}

/// A point in document space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({},{})",
            fixed(self.x, POSITION_DIGITS),
            fixed(self.y, POSITION_DIGITS)
        )
    }
}

/// Maps surface space (pixels, y down) to document space (scaled, y up).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordinateTransform {
    scale: f64,
}

impl CoordinateTransform {
    pub fn new(scale: f64) -> Self {
        Self { scale }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn to_document(&self, x: f64, y: f64) -> Point {
        Point {
            x: x * self.scale,
            y: -y * self.scale,
        }
    }

    pub fn length(&self, value: f64) -> f64 {
        value * self.scale
    }
}

/// Side of its anchor point on which a label is placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelSide {
    Right,
    Left,
    Below,
    Above,
}

impl LabelSide {
    /// Picks the side facing `angle` (radians, surface space).
    pub fn from_direction(angle: f64) -> Self {
        Self::from_components(angle.cos(), angle.sin())
    }

    /// Picks the side facing the direction `(dx, dy)`. Equal magnitudes
    /// resolve to the vertical sides.
    pub fn from_components(dx: f64, dy: f64) -> Self {
        if dx.abs() > dy.abs() {
            if dx > 0.0 {
                LabelSide::Right
            } else {
                LabelSide::Left
            }
        } else if dy > 0.0 {
            LabelSide::Below
        } else {
            LabelSide::Above
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LabelSide::Right => "right",
            LabelSide::Left => "left",
            LabelSide::Below => "below",
            LabelSide::Above => "above",
        }
    }
}

/// Canvas adapter that records drawing calls as TikZ statements.
pub struct TikzCanvas<M: TextMeasure = MonospaceMetrics> {
    options: TikzOptions,
    transform: CoordinateTransform,
    measure: M,
    points: Vec<Point>,
    body: String,
    primitives: usize,
    stroke_style: String,
    fill_style: String,
    line_width: f64,
    font: String,
}

impl TikzCanvas {
    /// Creates a canvas with default options and approximate text metrics.
    pub fn new() -> Self {
        Self::with_options(TikzOptions::default())
    }

    pub fn with_options(options: TikzOptions) -> Self {
        TikzCanvas::with_measure(options, MonospaceMetrics::default())
    }
}

impl Default for TikzCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: TextMeasure> TikzCanvas<M> {
    /// Creates a canvas that measures label text with `measure`.
    pub fn with_measure(options: TikzOptions, measure: M) -> Self {
        Self {
            transform: CoordinateTransform::new(options.scale),
            options,
            measure,
            points: Vec::new(),
            body: String::new(),
            primitives: 0,
            stroke_style: String::from("black"),
            fill_style: String::from("black"),
            line_width: 1.0,
            font: String::new(),
        }
    }

    pub fn options(&self) -> &TikzOptions {
        &self.options
    }

    pub fn transform(&self) -> CoordinateTransform {
        self.transform
    }

    /// Vertices of the path under construction, in document space.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Statements emitted so far, without the document wrapper.
    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn primitive_count(&self) -> usize {
        self.primitives
    }

    /// Wraps everything emitted so far in the LaTeX document preamble and
    /// postamble. Does not modify the canvas; calling it before drawing has
    /// finished yields a partial document.
    pub fn to_latex(&self) -> String {
        debug!(primitives = self.primitives; "Assembling TikZ document");
        let mut doc = String::with_capacity(DOCUMENT_HEAD.len() + self.body.len() + 128);
        doc.push_str(DOCUMENT_HEAD);
        doc.push_str(&format!(
            "\\begin{{tikzpicture}}[scale={}]\n",
            self.options.picture_scale
        ));
        doc.push_str("\\tikzstyle{every node}+=[inner sep=0pt]\n");
        doc.push_str(&self.body);
        doc.push_str(DOCUMENT_TAIL);
        doc
    }

    fn emit(&mut self, primitive: &'static str, statement: String) {
        trace!(primitive, statement:% = statement.trim_end(); "Emitted TikZ primitive");
        self.body.push_str(&statement);
        self.primitives += 1;
    }

    fn emit_path(&mut self, command: &'static str) {
        if self.points.is_empty() {
            debug!(command; "Skipping empty path");
            return;
        }
        let color = if command == "fill" {
            &self.fill_style
        } else {
            &self.stroke_style
        };
        let mut statement = format!("\\{command} [{color}]");
        for (i, point) in self.points.iter().enumerate() {
            if i > 0 {
                statement.push_str(" --");
            }
            statement.push_str(&format!(" {point}"));
        }
        statement.push_str(";\n");
        self.emit("path", statement);
    }
}

/// Brings an arc's angles into the orientation and range TikZ draws reliably.
///
/// Input angles are in surface space. The result is the `(start, end)` pair in
/// document space, swept from start to end through at most one full turn,
/// with both angles inside `[-2π, 2π]` when the inputs are.
fn normalize_sweep(start_angle: f64, end_angle: f64, reversed: bool) -> (f64, f64) {
    let (mut start, mut end) = if reversed {
        (end_angle, start_angle)
    } else {
        (start_angle, end_angle)
    };
    let span = end - start;
    if span < 0.0 {
        end += TAU;
        if end < start {
            end = start + span.rem_euclid(TAU);
        }
    } else if span > TAU {
        end = start + span.rem_euclid(TAU);
    }
    if start.min(end) < -TAU {
        start += TAU;
        end += TAU;
    } else if start.max(end) > TAU {
        start -= TAU;
        end -= TAU;
    }
    (-start, -end)
}

/// Fixed-point formatting that never prints a negative zero.
fn fixed(value: f64, digits: usize) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{value:.digits$}")
}

/// Makes spaces survive TikZ math mode.
fn escape_label(text: &str) -> String {
    text.replace(' ', "\\mbox{ }")
}

impl<M: TextMeasure> CanvasState for TikzCanvas<M> {
    fn save(&mut self) -> Result<()> {
        Ok(())
    }

    fn restore(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<M: TextMeasure> CanvasTransforms for TikzCanvas<M> {
    fn translate(&mut self, _x: f64, _y: f64) -> Result<()> {
        Ok(())
    }
}

impl<M: TextMeasure> CanvasLineStyles for TikzCanvas<M> {
    fn set_line_width(&mut self, value: f64) -> Result<()> {
        self.line_width = value;
        Ok(())
    }

    fn line_width(&self) -> Result<f64> {
        Ok(self.line_width)
    }
}

impl<M: TextMeasure> CanvasFillStrokeStyles for TikzCanvas<M> {
    fn set_fill_style(&mut self, color: String) -> Result<()> {
        self.fill_style = color;
        Ok(())
    }

    fn fill_style(&self) -> Result<String> {
        Ok(self.fill_style.clone())
    }

    fn set_stroke_style(&mut self, color: String) -> Result<()> {
        self.stroke_style = color;
        Ok(())
    }

    fn stroke_style(&self) -> Result<String> {
        Ok(self.stroke_style.clone())
    }
}

impl<M: TextMeasure> CanvasRectangles for TikzCanvas<M> {
    fn clear_rect(&mut self, _x: f64, _y: f64, _w: f64, _h: f64) -> Result<()> {
        Ok(())
    }
}

impl<M: TextMeasure> CanvasPaths for TikzCanvas<M> {
    fn begin_path(&mut self) -> Result<()> {
        self.points.clear();
        Ok(())
    }

    // Subpaths are not tracked: a move appends a vertex exactly like a line.
    fn move_to(&mut self, x: f64, y: f64) -> Result<()> {
        let point = self.transform.to_document(x, y);
        self.points.push(point);
        Ok(())
    }

    fn line_to(&mut self, x: f64, y: f64) -> Result<()> {
        let point = self.transform.to_document(x, y);
        self.points.push(point);
        Ok(())
    }

    #[allow(clippy::float_cmp)]
    fn arc(
        &mut self,
        x: f64,
        y: f64,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        ccw: bool,
    ) -> Result<()> {
        let center = self.transform.to_document(x, y);
        let radius = self.transform.length(radius);

        if end_angle - start_angle == TAU {
            let statement = format!(
                "\\draw [{}] {center} circle ({});\n",
                self.stroke_style,
                fixed(radius, POSITION_DIGITS)
            );
            self.emit("circle", statement);
            return Ok(());
        }

        let (start, end) = normalize_sweep(start_angle, end_angle, ccw);
        let from = Point {
            x: center.x + radius * start.cos(),
            y: center.y + radius * start.sin(),
        };
        let statement = format!(
            "\\draw [{}] {from} arc ({}:{}:{});\n",
            self.stroke_style,
            fixed(start.to_degrees(), ANGLE_DIGITS),
            fixed(end.to_degrees(), ANGLE_DIGITS),
            fixed(radius, POSITION_DIGITS)
        );
        self.emit("arc", statement);
        Ok(())
    }

    fn rect(&mut self, _x: f64, _y: f64, _w: f64, _h: f64) -> Result<()> {
        Ok(())
    }

    fn fill(&mut self) -> Result<()> {
        self.emit_path("fill");
        Ok(())
    }

    fn stroke(&mut self) -> Result<()> {
        self.emit_path("draw");
        Ok(())
    }
}

impl<M: TextMeasure> CanvasText for TikzCanvas<M> {
    fn set_font(&mut self, value: String) -> Result<()> {
        self.font = value;
        Ok(())
    }

    fn font(&self) -> Result<String> {
        Ok(self.font.clone())
    }

    fn advanced_fill_text(
        &mut self,
        text: &str,
        original_text: &str,
        x: f64,
        y: f64,
        angle: Option<f64>,
    ) -> Result<()> {
        if text.chars().all(|c| c == ' ') {
            debug!("Skipping blank label");
            return Ok(());
        }

        // (x, y) is the label's center until a side is chosen.
        let (mut x, mut y) = (x, y);
        let side = match angle {
            Some(angle) => {
                let width = self.measure.measure_text(text)?.width;
                let side = LabelSide::from_direction(angle);
                match side {
                    LabelSide::Right => x -= width / 2.0,
                    LabelSide::Left => x += width / 2.0,
                    LabelSide::Below => y -= self.options.label_offset,
                    LabelSide::Above => y += self.options.label_offset,
                }
                Some(side)
            }
            None => None,
        };

        let anchor = self.transform.to_document(x, y);
        let params = side
            .map(|side| format!("[{}] ", side.as_str()))
            .unwrap_or_default();
        let statement = format!(
            "\\draw {anchor} node {params}{{${}$}};\n",
            escape_label(original_text)
        );
        self.emit("label", statement);
        Ok(())
    }
}
