//! Labelkit: geometry and payloads for browser-based image labeling.
//!
//! Labelkit sits between a host application and a browser labeling widget.
//! The geometry core converts bounding boxes between layout formats and
//! coordinate spaces; the widget layer builds the JSON payload each labeling
//! tool sends to the widget and parses what comes back.
//!
//! # Modules
//!
//! - [`geometry`]: box layouts, format tags, extents, and conversions
//! - [`display`]: display fitting and the display-to-original scale
//! - [`widget`]: payload builders for detection, annotation, segmentation
//! - [`io_boxes`]: CSV/JSON box-list interchange
//! - [`error`]: error types for labelkit operations

pub mod display;
pub mod error;
pub mod geometry;
pub mod io_boxes;
pub mod widget;

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

pub use error::LabelKitError;

use geometry::{BBox, BoxFormat, ImageExtent};

/// The labelkit CLI application.
#[derive(Parser)]
#[command(name = "labelkit")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Convert a box list between tagged formats.
    Convert(ConvertArgs),
    /// Probe an image's pixel extent and display fit.
    Probe(ProbeArgs),
}

/// Arguments for the convert subcommand.
#[derive(clap::Args)]
struct ConvertArgs {
    /// Input file holding the box list.
    input: PathBuf,

    /// Source format tag (XYWH, XYXY, CXYWH or REL_-prefixed).
    #[arg(long = "from")]
    from: String,

    /// Destination format tag.
    #[arg(long = "to")]
    to: String,

    /// Image width in pixels, required when either format is relative.
    #[arg(long)]
    image_width: Option<u32>,

    /// Image height in pixels, required when either format is relative.
    #[arg(long)]
    image_height: Option<u32>,

    /// Input encoding ('csv' or 'json').
    #[arg(long, default_value = "csv")]
    input_format: String,

    /// Output encoding ('csv' or 'json').
    #[arg(long, default_value = "csv")]
    output_format: String,
}

/// Arguments for the probe subcommand.
#[derive(clap::Args)]
struct ProbeArgs {
    /// Image file to probe.
    image: PathBuf,

    /// Display frame width; with a height, also prints the fit and scale.
    #[arg(long)]
    frame_width: Option<u32>,

    /// Display frame height.
    #[arg(long)]
    frame_height: Option<u32>,
}

/// Run the labelkit CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), LabelKitError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Convert(args)) => run_convert(args),
        Some(Commands::Probe(args)) => run_probe(args),
        None => {
            // No subcommand: just print a banner and exit successfully
            println!("labelkit {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Geometry and payloads for image labeling widgets.");
            println!();
            println!("Run 'labelkit --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the convert subcommand.
fn run_convert(args: ConvertArgs) -> Result<(), LabelKitError> {
    let from: BoxFormat = args.from.parse()?;
    let to: BoxFormat = args.to.parse()?;

    // An extent is needed exactly when normalization changes hands.
    let extent = if from.relative || to.relative {
        let (Some(width), Some(height)) = (args.image_width, args.image_height) else {
            return Err(LabelKitError::InvalidExtent {
                width: args.image_width.unwrap_or(0),
                height: args.image_height.unwrap_or(0),
            });
        };
        Some(ImageExtent::new(width, height)?)
    } else {
        None
    };

    let content = fs::read_to_string(&args.input)?;
    let boxes = read_boxes(&content, &args.input_format)?;

    let converted: Vec<BBox> = boxes
        .into_iter()
        .map(|bbox| match extent {
            Some(ref extent) => bbox
                .into_layout(from, to.layout, extent)
                .from_layout(to.layout, to, extent),
            None => bbox.convert(from.layout, to.layout),
        })
        .collect();

    let rendered = match args.output_format.as_str() {
        "csv" => io_boxes::to_csv_string(&converted)?,
        "json" => io_boxes::to_json_string(&converted)?,
        other => {
            return Err(LabelKitError::UnsupportedFormat(format!(
                "'{}' (supported: csv, json)",
                other
            )));
        }
    };

    print!("{rendered}");
    if !rendered.ends_with('\n') {
        println!();
    }
    Ok(())
}

fn read_boxes(content: &str, input_format: &str) -> Result<Vec<BBox>, LabelKitError> {
    match input_format {
        "csv" => io_boxes::from_csv_str(content),
        "json" => io_boxes::from_json_str(content),
        other => Err(LabelKitError::UnsupportedFormat(format!(
            "'{}' (supported: csv, json)",
            other
        ))),
    }
}

/// Execute the probe subcommand.
fn run_probe(args: ProbeArgs) -> Result<(), LabelKitError> {
    let extent = display::probe_extent(&args.image)?;
    println!(
        "{}: {}x{}",
        file_label(&args.image),
        extent.width(),
        extent.height()
    );

    if let (Some(width), Some(height)) = (args.frame_width, args.frame_height) {
        let frame = ImageExtent::new(width, height)?;
        let geometry = display::DisplayGeometry::fit(extent, &frame);
        println!(
            "display: {}x{} (scale {:.4})",
            geometry.display.width(),
            geometry.display.height(),
            geometry.scale()
        );
    }

    Ok(())
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
