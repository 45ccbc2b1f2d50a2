//! Entry points that run a [`Drawable`] through a TikZ canvas and deliver the
//! resulting document.

use std::io::Write;

use log::info;

use crate::api::{Drawable, TextMeasure};
use crate::backends::tikz::TikzCanvas;
use crate::error::Result;

/// Exports `drawable` with default options and approximate text metrics.
pub fn export_to_latex<D: Drawable + ?Sized>(drawable: &D) -> Result<String> {
    export_with(drawable, TikzCanvas::new())
}

/// Draws `drawable` onto `canvas` and returns the finished document.
///
/// The canvas is consumed: a session is finalized exactly once.
pub fn export_with<D, M>(drawable: &D, mut canvas: TikzCanvas<M>) -> Result<String>
where
    D: Drawable + ?Sized,
    M: TextMeasure,
{
    drawable.draw_using(&mut canvas)?;
    let document = canvas.to_latex();
    info!(
        primitives = canvas.primitive_count(),
        bytes = document.len();
        "LaTeX export complete"
    );
    Ok(document)
}

/// Writes a finished document to `writer` and flushes it.
pub fn write_document<W: Write>(document: &str, mut writer: W) -> Result<()> {
    writer.write_all(document.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Places the document on the system clipboard.
#[cfg(feature = "clipboard")]
pub fn copy_to_clipboard(document: &str) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(document.to_owned())?;
    info!(bytes = document.len(); "LaTeX copied to clipboard");
    Ok(())
}
