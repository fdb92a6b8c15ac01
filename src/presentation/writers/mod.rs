use crate::domain::ports::OutputWriter;
use crate::infrastructure::config::{OutputConfig, OutputFormat};
use crate::presentation::colorize::Palette;

use self::{json::JsonWriter, text::TextWriter};

pub mod json;
pub mod text;

/// Pick the writer for the configured format.
///
/// Colour only ever applies to text; `palette` is ignored for JSON and when
/// `output.color` is off.
pub fn writer_for(output: &OutputConfig, palette: Palette) -> Box<dyn OutputWriter> {
    match output.format {
        OutputFormat::Json => Box::new(JsonWriter),
        OutputFormat::Text if output.color => Box::new(TextWriter::colored(palette)),
        OutputFormat::Text => Box::new(TextWriter::plain()),
    }
}
