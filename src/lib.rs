//! Canvas-style drawing surfaces that emit TikZ instead of pixels.
//!
//! The traits in [`api`] mirror the subset of the HTML Canvas 2D context that a
//! diagram traversal uses. Draw into a [`TikzCanvas`] exactly as you would draw
//! onto a real canvas, then call [`TikzCanvas::to_latex`] for a standalone
//! LaTeX document.

pub mod api;
pub mod backends;
pub mod error;
pub mod export;

pub use api::{Drawable, DrawingSurface, MonospaceMetrics, TextMeasure, TextMetrics};
pub use backends::recording::{DrawOp, RecordingCanvas};
pub use backends::tikz::{CoordinateTransform, LabelSide, Point, TikzCanvas, TikzOptions};
pub use error::{CanvasError, Result};
pub use export::{export_to_latex, export_with, write_document};

#[cfg(feature = "clipboard")]
pub use export::copy_to_clipboard;
