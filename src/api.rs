use crate::error::Result;

#[derive(Clone, Debug, PartialEq)]
pub struct TextMetrics {
    pub width: f64,
}

pub trait CanvasState {
    /// Saves the current drawing state. Mirrors CanvasRenderingContext2D.save().
    fn save(&mut self) -> Result<()>;
    /// Restores the last saved drawing state. Mirrors CanvasRenderingContext2D.restore().
    fn restore(&mut self) -> Result<()>;
}

pub trait CanvasTransforms {
    /// Translates the current transform by (x, y). Mirrors translate().
    fn translate(&mut self, x: f64, y: f64) -> Result<()>;
}

pub trait CanvasLineStyles {
    /// Sets stroke thickness in user units. Mirrors lineWidth.
    fn set_line_width(&mut self, value: f64) -> Result<()>;
    /// Returns the current stroke thickness. Mirrors lineWidth.
    fn line_width(&self) -> Result<f64>;
}

pub trait CanvasFillStrokeStyles {
    /// Sets the color used for fills. Mirrors fillStyle.
    fn set_fill_style(&mut self, color: String) -> Result<()>;
    /// Returns the current fill color. Mirrors fillStyle.
    fn fill_style(&self) -> Result<String>;

    /// Sets the color used for strokes. Mirrors strokeStyle.
    fn set_stroke_style(&mut self, color: String) -> Result<()>;
    /// Returns the current stroke color. Mirrors strokeStyle.
    fn stroke_style(&self) -> Result<String>;
}

pub trait CanvasRectangles {
    /// Clears the specified rectangle. Mirrors clearRect().
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> Result<()>;
}

pub trait CanvasPaths {
    /// Starts a new empty path. Mirrors beginPath().
    fn begin_path(&mut self) -> Result<()>;
    /// Moves the current point without drawing. Mirrors moveTo().
    fn move_to(&mut self, x: f64, y: f64) -> Result<()>;
    /// Adds a straight line from the current point to (x, y). Mirrors lineTo().
    fn line_to(&mut self, x: f64, y: f64) -> Result<()>;
    /// Adds an arc centered at (x, y) with radius and angles in radians. Mirrors arc().
    fn arc(
        &mut self,
        x: f64,
        y: f64,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        ccw: bool,
    ) -> Result<()>;
    /// Adds a rect subpath. Mirrors rect().
    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> Result<()>;

    /// Fills the current path. Mirrors fill().
    fn fill(&mut self) -> Result<()>;
    /// Strokes the current path. Mirrors stroke().
    fn stroke(&mut self) -> Result<()>;
}

pub trait CanvasText {
    /// Sets the CSS font string used for text rendering. Mirrors font.
    fn set_font(&mut self, value: String) -> Result<()>;
    /// Returns the current font string. Mirrors font.
    fn font(&self) -> Result<String>;

    /// Draws a text label centered on (x, y).
    ///
    /// `text` is the rendered string used for measurement; `original_text` is
    /// the unescaped source the label displays. When `angle` is given it is the
    /// outward direction (radians) from the labelled geometry towards the
    /// label, and the label is pushed to that side of the point instead of
    /// being centered on it.
    fn advanced_fill_text(
        &mut self,
        text: &str,
        original_text: &str,
        x: f64,
        y: f64,
        angle: Option<f64>,
    ) -> Result<()>;
}

/// Measures the on-surface pixel width of rendered text.
pub trait TextMeasure {
    fn measure_text(&self, text: &str) -> Result<TextMetrics>;
}

impl<F> TextMeasure for F
where
    F: Fn(&str) -> f64,
{
    fn measure_text(&self, text: &str) -> Result<TextMetrics> {
        Ok(TextMetrics { width: self(text) })
    }
}

/// Approximates text width as a fixed advance per character.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonospaceMetrics {
    pub char_width: f64,
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        // Roughly the advance of a 20px sans-serif glyph.
        Self { char_width: 10.0 }
    }
}

impl TextMeasure for MonospaceMetrics {
    fn measure_text(&self, text: &str) -> Result<TextMetrics> {
        Ok(TextMetrics {
            width: text.chars().count() as f64 * self.char_width,
        })
    }
}

/// Everything a diagram traversal may call on the surface it draws into.
pub trait DrawingSurface:
    CanvasState
    + CanvasTransforms
    + CanvasLineStyles
    + CanvasFillStrokeStyles
    + CanvasRectangles
    + CanvasPaths
    + CanvasText
{
}

impl<T> DrawingSurface for T where
    T: CanvasState
        + CanvasTransforms
        + CanvasLineStyles
        + CanvasFillStrokeStyles
        + CanvasRectangles
        + CanvasPaths
        + CanvasText
{
}

/// Anything that knows how to draw itself onto a [`DrawingSurface`].
pub trait Drawable {
    fn draw_using(&self, surface: &mut dyn DrawingSurface) -> Result<()>;
}

impl<F> Drawable for F
where
    F: Fn(&mut dyn DrawingSurface) -> Result<()>,
{
    fn draw_using(&self, surface: &mut dyn DrawingSurface) -> Result<()> {
        self(surface)
    }
}
