//! Parse, summarize and render one finite-fault file.

use anyhow::{Context, Result};
use fault_common::{Event, Segment};
use fault_geojson::GeoJsonAssembler;
use fsp_parser::FspFile;
use rupture::RuptureSummary;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};

use crate::config::CliConfig;

/// What to write for a parsed file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    GeoJson,
    Summary,
}

/// Parse `input` and render the requested output as JSON text.
pub fn convert(config: &CliConfig, input: &Path, kind: OutputKind) -> Result<String> {
    let layout = config.layout()?;
    let fsp = FspFile::from_path_with_layout(input, &layout)
        .with_context(|| format!("Failed to parse {}", input.display()))?;
    let (event, segments) = fsp.into_parts();
    info!(
        input = %input.display(),
        location = %event.location,
        magnitude = event.magnitude,
        segments = segments.len(),
        "Parsed finite-fault file"
    );

    let summaries = summarize(&event, &segments);
    match kind {
        OutputKind::Summary => {
            if config.pretty {
                serde_json::to_string_pretty(&summaries)
            } else {
                serde_json::to_string(&summaries)
            }
            .context("Failed to serialize rupture summaries")
        }
        OutputKind::GeoJson => {
            let assembler = match config.palette_scale()? {
                Some(palette) => GeoJsonAssembler::with_palette(palette),
                None => GeoJsonAssembler::new()?,
            };
            let collection = assembler.assemble(&event, &segments)?;
            Ok(collection.to_json(config.pretty)?)
        }
    }
}

/// Rupture summaries for every segment that has one.
///
/// A segment whose slip falls entirely below threshold is logged and skipped.
pub fn summarize(event: &Event, segments: &[Segment]) -> Vec<RuptureSummary> {
    let mut summaries = Vec::with_capacity(segments.len());
    for (index, segment) in segments.iter().enumerate() {
        match RuptureSummary::for_segment(event, index, segment) {
            Ok(summary) => {
                if summary.window.is_none() {
                    warn!(segment = index, "Rupture window undetermined");
                }
                info!(
                    segment = index,
                    threshold = summary.threshold,
                    length_km = summary.size.length,
                    width_km = summary.size.width,
                    "Rupture summary"
                );
                summaries.push(summary);
            }
            Err(e) => warn!(segment = index, error = %e, "Skipping rupture summary"),
        }
    }
    summaries
}

/// Write `text` to `output`, or to stdout when no path is given.
pub fn write_output(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(output = %path.display(), bytes = text.len(), "Wrote output");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", text).context("Failed to write to stdout")?;
        }
    }
    Ok(())
}
