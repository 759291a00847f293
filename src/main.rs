//! smfexport - Converts a JSON score into a Standard MIDI File.
//!
//! # Usage
//!
//! ```bash
//! smfexport song.json                  # writes song.mid
//! smfexport song.json -o out.mid -s 1  # exports the second sheet
//! RUST_LOG=debug smfexport song.json   # logs chunk sizes
//! ```

use anyhow::{bail, Context, Result};
use smfexport::{ClockPolicy, Document, EventSource, ExportOptions, SmfEncoder};
use std::fs;
use std::path::{Path, PathBuf};

/// Command-line options for the exporter.
struct CliOptions {
    /// Score document (JSON).
    input: PathBuf,
    /// Output file. Defaults to the input path with a `.mid` extension.
    output: Option<PathBuf>,
    /// Export this sheet instead of the document's first one.
    sheet: Option<usize>,
    /// JSON file with export options.
    options_file: Option<PathBuf>,
    /// Overrides the clock policy from the options file.
    policy: Option<ClockPolicy>,
    /// Overrides the control track banner; may be repeated.
    banner: Vec<String>,
}

impl CliOptions {
    /// Parses command-line arguments.
    ///
    /// Supports:
    /// - `<input.json>`: the score to export
    /// - `--output <path>` or `-o <path>`: output file
    /// - `--sheet <index>` or `-s <index>`: sheet to export (0-based)
    /// - `--options <path>`: export options as JSON
    /// - `--policy <clamp|strict|sort>`: out-of-order event handling
    /// - `--banner <text>`: control track text line (repeatable)
    /// - `--help` or `-h`: print help and exit
    fn parse() -> Result<Self> {
        let args: Vec<String> = std::env::args().collect();
        let mut input: Option<PathBuf> = None;
        let mut output: Option<PathBuf> = None;
        let mut sheet: Option<usize> = None;
        let mut options_file: Option<PathBuf> = None;
        let mut policy: Option<ClockPolicy> = None;
        let mut banner = Vec::new();
        let mut i = 1;

        let value = |i: usize, flag: &str| -> Result<String> {
            match args.get(i) {
                Some(v) => Ok(v.clone()),
                None => bail!("{} requires an argument", flag),
            }
        };

        while i < args.len() {
            match args[i].as_str() {
                "--output" | "-o" => {
                    i += 1;
                    output = Some(PathBuf::from(value(i, "--output")?));
                }
                "--sheet" | "-s" => {
                    i += 1;
                    let raw = value(i, "--sheet")?;
                    sheet = Some(raw.parse().with_context(|| format!("Invalid sheet index: {}", raw))?);
                }
                "--options" => {
                    i += 1;
                    options_file = Some(PathBuf::from(value(i, "--options")?));
                }
                "--policy" | "-p" => {
                    i += 1;
                    let raw = value(i, "--policy")?;
                    policy = Some(raw.parse().map_err(anyhow::Error::msg)?);
                }
                "--banner" => {
                    i += 1;
                    banner.push(value(i, "--banner")?);
                }
                "--help" | "-h" => {
                    print_help(args.first().map(String::as_str).unwrap_or("smfexport"));
                    std::process::exit(0);
                }
                other if other.starts_with('-') => {
                    bail!("Unknown option: {}\nUse --help for usage information", other);
                }
                other => {
                    if input.is_some() {
                        bail!("Only one input file may be given");
                    }
                    input = Some(PathBuf::from(other));
                }
            }
            i += 1;
        }

        let Some(input) = input else {
            bail!("No input file given\nUse --help for usage information");
        };

        Ok(Self {
            input,
            output,
            sheet,
            options_file,
            policy,
            banner,
        })
    }

    fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.input.with_extension("mid"))
    }

    /// Options file first, then command-line overrides.
    fn export_options(&self) -> Result<ExportOptions> {
        let mut options = match &self.options_file {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read options file {}", path.display()))?;
                serde_json::from_str(&json)
                    .with_context(|| format!("Invalid options file {}", path.display()))?
            }
            None => ExportOptions::default(),
        };
        if let Some(policy) = self.policy {
            options.clock_policy = policy;
        }
        if !self.banner.is_empty() {
            options.banner = Some(self.banner.clone());
        }
        Ok(options)
    }
}

fn print_help(program: &str) {
    eprintln!("smfexport - Standard MIDI File exporter");
    eprintln!();
    eprintln!("Usage: {} [OPTIONS] <score.json>", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -o, --output PATH     Output file (default: input with .mid extension)");
    eprintln!("  -s, --sheet INDEX     Export the given sheet (default: first sheet)");
    eprintln!("      --options PATH    Export options as JSON");
    eprintln!("  -p, --policy POLICY   Out-of-order events: clamp, strict or sort");
    eprintln!("      --banner TEXT     Control track text line (repeatable)");
    eprintln!("  -h, --help            Print this help message");
}

/// Removes a partially written output file, logging when that fails.
///
/// Returns true if the file was removed.
fn remove_partial_output(path: &Path) -> bool {
    match fs::remove_file(path) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Could not remove partial output {:?}: {}", path, e);
            false
        }
    }
}

/// Main entry point.
fn main() -> Result<()> {
    let cli = CliOptions::parse()?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let document = Document::load_from_file(&cli.input)
        .with_context(|| format!("Failed to load score {}", cli.input.display()))?;
    let encoder = SmfEncoder::new(cli.export_options()?);

    let source: &dyn EventSource = match cli.sheet {
        Some(index) => match document.sheet_at(index) {
            Some(sheet) => sheet,
            None => bail!(
                "Sheet {} does not exist ({} sheets in document)",
                index,
                document.sheets().len()
            ),
        },
        None => &document,
    };

    // Encode fully before touching the output so a failed export creates nothing.
    let mut data = Vec::new();
    encoder
        .export_source(source, &mut data)
        .context("MIDI export failed")?;

    let output = cli.output_path();
    if let Err(e) = fs::write(&output, &data) {
        tracing::error!("MIDI export failed: {:?}", e);
        // Never leave a file that looks complete.
        remove_partial_output(&output);
        return Err(e).with_context(|| format!("Failed to write {}", output.display()));
    }

    tracing::info!("Exported {} bytes to {:?}", data.len(), output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_partial_output() {
        let path = std::env::temp_dir()
            .join(format!("smfexport-partial-{}.mid", std::process::id()));
        fs::write(&path, b"MThd").unwrap();
        assert!(remove_partial_output(&path));
        assert!(!path.exists());

        // Already gone: reported, not panicking.
        assert!(!remove_partial_output(&path));
    }
}
