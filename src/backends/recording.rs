use crate::api::*;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Save,
    Restore,
    Translate {
        x: f64,
        y: f64,
    },
    SetLineWidth(f64),
    SetFillStyle(String),
    SetStrokeStyle(String),
    SetFont(String),
    ClearRect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
    },
    BeginPath,
    MoveTo {
        x: f64,
        y: f64,
    },
    LineTo {
        x: f64,
        y: f64,
    },
    Arc {
        x: f64,
        y: f64,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        ccw: bool,
    },
    Rect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
    },
    Fill,
    Stroke,
    Text {
        text: String,
        original_text: String,
        x: f64,
        y: f64,
        angle: Option<f64>,
    },
}

#[derive(Clone, Debug)]
struct RecorderState {
    line_width: f64,
    fill_style: String,
    stroke_style: String,
    font: String,
}

impl Default for RecorderState {
    fn default() -> Self {
        Self {
            line_width: 1.0,
            fill_style: String::from("black"),
            stroke_style: String::from("black"),
            font: String::new(),
        }
    }
}

/// Drawing surface that keeps every call it receives, in order.
///
/// A recording is itself [`Drawable`]: replaying it onto another surface
/// reproduces the original call sequence, style changes included.
#[derive(Clone, Debug, Default)]
pub struct RecordingCanvas {
    ops: Vec<DrawOp>,
    state: RecorderState,
    stack: Vec<RecorderState>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<DrawOp> {
        self.ops
    }

    fn record_op(&mut self, op: DrawOp) {
        self.ops.push(op);
    }
}

impl CanvasState for RecordingCanvas {
    fn save(&mut self) -> Result<()> {
        self.stack.push(self.state.clone());
        self.record_op(DrawOp::Save);
        Ok(())
    }

    fn restore(&mut self) -> Result<()> {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
        self.record_op(DrawOp::Restore);
        Ok(())
    }
}

impl CanvasTransforms for RecordingCanvas {
    fn translate(&mut self, x: f64, y: f64) -> Result<()> {
        self.record_op(DrawOp::Translate { x, y });
        Ok(())
    }
}

impl CanvasLineStyles for RecordingCanvas {
    fn set_line_width(&mut self, value: f64) -> Result<()> {
        self.state.line_width = value;
        self.record_op(DrawOp::SetLineWidth(value));
        Ok(())
    }

    fn line_width(&self) -> Result<f64> {
        Ok(self.state.line_width)
    }
}

impl CanvasFillStrokeStyles for RecordingCanvas {
    fn set_fill_style(&mut self, color: String) -> Result<()> {
        self.state.fill_style = color.clone();
        self.record_op(DrawOp::SetFillStyle(color));
        Ok(())
    }

    fn fill_style(&self) -> Result<String> {
        Ok(self.state.fill_style.clone())
    }

    fn set_stroke_style(&mut self, color: String) -> Result<()> {
        self.state.stroke_style = color.clone();
        self.record_op(DrawOp::SetStrokeStyle(color));
        Ok(())
    }

    fn stroke_style(&self) -> Result<String> {
        Ok(self.state.stroke_style.clone())
    }
}

impl CanvasRectangles for RecordingCanvas {
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> Result<()> {
        self.record_op(DrawOp::ClearRect { x, y, w, h });
        Ok(())
    }
}

impl CanvasPaths for RecordingCanvas {
    fn begin_path(&mut self) -> Result<()> {
        self.record_op(DrawOp::BeginPath);
        Ok(())
    }

    fn move_to(&mut self, x: f64, y: f64) -> Result<()> {
        self.record_op(DrawOp::MoveTo { x, y });
        Ok(())
    }

    fn line_to(&mut self, x: f64, y: f64) -> Result<()> {
        self.record_op(DrawOp::LineTo { x, y });
        Ok(())
    }

    fn arc(
        &mut self,
        x: f64,
        y: f64,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        ccw: bool,
    ) -> Result<()> {
        self.record_op(DrawOp::Arc {
            x,
            y,
            radius,
            start_angle,
            end_angle,
            ccw,
        });
        Ok(())
    }

    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> Result<()> {
        self.record_op(DrawOp::Rect { x, y, w, h });
        Ok(())
    }

    fn fill(&mut self) -> Result<()> {
        self.record_op(DrawOp::Fill);
        Ok(())
    }

    fn stroke(&mut self) -> Result<()> {
        self.record_op(DrawOp::Stroke);
        Ok(())
    }
}

impl CanvasText for RecordingCanvas {
    fn set_font(&mut self, value: String) -> Result<()> {
        self.state.font = value.clone();
        self.record_op(DrawOp::SetFont(value));
        Ok(())
    }

    fn font(&self) -> Result<String> {
        Ok(self.state.font.clone())
    }

    fn advanced_fill_text(
        &mut self,
        text: &str,
        original_text: &str,
        x: f64,
        y: f64,
        angle: Option<f64>,
    ) -> Result<()> {
        self.record_op(DrawOp::Text {
            text: text.to_string(),
            original_text: original_text.to_string(),
            x,
            y,
            angle,
        });
        Ok(())
    }
}

impl Drawable for RecordingCanvas {
    fn draw_using(&self, surface: &mut dyn DrawingSurface) -> Result<()> {
        for op in &self.ops {
            match op {
                DrawOp::Save => surface.save()?,
                DrawOp::Restore => surface.restore()?,
                DrawOp::Translate { x, y } => surface.translate(*x, *y)?,
                DrawOp::SetLineWidth(value) => surface.set_line_width(*value)?,
                DrawOp::SetFillStyle(color) => surface.set_fill_style(color.clone())?,
                DrawOp::SetStrokeStyle(color) => surface.set_stroke_style(color.clone())?,
                DrawOp::SetFont(font) => surface.set_font(font.clone())?,
                DrawOp::ClearRect { x, y, w, h } => surface.clear_rect(*x, *y, *w, *h)?,
                DrawOp::BeginPath => surface.begin_path()?,
                DrawOp::MoveTo { x, y } => surface.move_to(*x, *y)?,
                DrawOp::LineTo { x, y } => surface.line_to(*x, *y)?,
                DrawOp::Arc {
                    x,
                    y,
                    radius,
                    start_angle,
                    end_angle,
                    ccw,
                } => surface.arc(*x, *y, *radius, *start_angle, *end_angle, *ccw)?,
                DrawOp::Rect { x, y, w, h } => surface.rect(*x, *y, *w, *h)?,
                DrawOp::Fill => surface.fill()?,
                DrawOp::Stroke => surface.stroke()?,
                DrawOp::Text {
                    text,
                    original_text,
                    x,
                    y,
                    angle,
                } => surface.advanced_fill_text(text, original_text, *x, *y, *angle)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::tikz::TikzCanvas;

    #[test]
    fn records_path_calls_in_order() {
        let mut c = RecordingCanvas::new();
        c.set_stroke_style("red".into()).unwrap();
        c.begin_path().unwrap();
        c.move_to(0.0, 0.0).unwrap();
        c.line_to(10.0, 0.0).unwrap();
        c.stroke().unwrap();

        assert_eq!(
            c.ops(),
            &[
                DrawOp::SetStrokeStyle("red".into()),
                DrawOp::BeginPath,
                DrawOp::MoveTo { x: 0.0, y: 0.0 },
                DrawOp::LineTo { x: 10.0, y: 0.0 },
                DrawOp::Stroke,
            ]
        );
    }

    #[test]
    fn restore_pops_saved_styles() {
        let mut c = RecordingCanvas::new();
        c.set_fill_style("blue".into()).unwrap();
        c.save().unwrap();
        c.set_fill_style("green".into()).unwrap();
        c.set_line_width(3.0).unwrap();
        assert_eq!(c.fill_style().unwrap(), "green");
        c.restore().unwrap();

        assert_eq!(c.fill_style().unwrap(), "blue");
        assert_eq!(c.line_width().unwrap(), 1.0);
        assert_eq!(c.ops().len(), 5);
    }

    #[test]
    fn replay_matches_direct_drawing() {
        fn draw(surface: &mut dyn DrawingSurface) -> Result<()> {
            surface.set_stroke_style("black".into())?;
            surface.begin_path()?;
            surface.move_to(0.0, 0.0)?;
            surface.line_to(30.0, 40.0)?;
            surface.stroke()?;
            surface.arc(30.0, 40.0, 5.0, 0.0, std::f64::consts::PI, false)?;
            surface.advanced_fill_text("A", "A", 30.0, 40.0, Some(0.0))
        }

        let mut recording = RecordingCanvas::new();
        draw(&mut recording).unwrap();

        let mut direct = TikzCanvas::new();
        draw(&mut direct).unwrap();
        let mut replayed = TikzCanvas::new();
        recording.draw_using(&mut replayed).unwrap();

        assert_eq!(direct.to_latex(), replayed.to_latex());
        assert_eq!(replayed.primitive_count(), 3);
    }
}
