//! Local hosting runtime: feeds a storage event to the handler over a filesystem store

use crate::augment::{AugmentConfig, CompositionPolicy};
use crate::io::configuration::{DEFAULT_JPEG_QUALITY, DEFAULT_OUTPUT_COUNT};
use crate::io::error::{AugmentError, Result};
use crate::io::handler::{EventHandler, HandlerSettings, ObjectReport};
use crate::io::image::{ChannelOrder, EncodeOptions, decode_image};
use crate::io::preview::save_preview;
use crate::io::progress::ProgressReporter;
use crate::io::storage::{FsStore, ObjectStore};
use clap::{Parser, ValueEnum};
use log::info;
use std::path::{Path, PathBuf};

/// Composition policy names accepted on the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    /// Apply rotation, distortion and noise in order
    #[default]
    Chain,
    /// Cycle through one stage per output
    RoundRobin,
    /// Keep a random non-empty subset of stages per output
    RandomSubset,
}

impl From<PolicyArg> for CompositionPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Chain => Self::Chain,
            PolicyArg::RoundRobin => Self::RoundRobin,
            PolicyArg::RandomSubset => Self::RandomSubset,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "augmento")]
#[command(
    author,
    version,
    about = "Generate augmented variants of images named by a storage event"
)]
/// Command-line arguments and environment configuration for the runtime
pub struct Cli {
    /// Storage event JSON document, or `-` to read it from standard input
    #[arg(value_name = "EVENT")]
    pub event: PathBuf,

    /// Directory holding one sub-directory per bucket
    #[arg(long, env = "STORE_ROOT", default_value = ".")]
    pub store_root: PathBuf,

    /// Number of augmented images generated per source image
    #[arg(short = 'n', long, env = "NUM_OF_IMAGES_GENERATED", default_value_t = DEFAULT_OUTPUT_COUNT)]
    pub count: usize,

    /// Bucket receiving the augmented images
    #[arg(short, long, env = "OUTPUT_BUCKET")]
    pub output_bucket: String,

    /// Random seed for reproducible batches
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// How rotation, distortion and noise are combined per output
    #[arg(short, long, value_enum, default_value_t = PolicyArg::Chain)]
    pub policy: PolicyArg,

    /// Crop every output to this many rows (implies square if width not specified)
    #[arg(long)]
    pub crop_height: Option<usize>,

    /// Crop every output to this many columns
    #[arg(long)]
    pub crop_width: Option<usize>,

    /// JPEG quality of the outputs
    #[arg(long, default_value_t = DEFAULT_JPEG_QUALITY, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: u8,

    /// Treat decoded arrays as BGR and swap channels before encoding
    #[arg(long)]
    pub bgr: bool,

    /// Save a grid preview of each object's outputs to this PNG path
    #[arg(long, value_name = "PNG")]
    pub preview: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Crop size requested on the command line, if any
    pub const fn crop_size(&self) -> Option<(usize, usize)> {
        match (self.crop_height, self.crop_width) {
            (Some(h), Some(w)) => Some((h, w)),
            (Some(h), None) => Some((h, h)),
            (None, Some(w)) => Some((w, w)),
            (None, None) => None,
        }
    }

    /// Handler settings described by the arguments
    pub fn settings(&self) -> HandlerSettings {
        HandlerSettings {
            count: self.count,
            output_bucket: self.output_bucket.clone(),
            augment: AugmentConfig {
                policy: self.policy.into(),
                crop_size: self.crop_size(),
                ..AugmentConfig::default()
            },
            seed: self.seed,
            encode: EncodeOptions {
                quality: self.quality,
                channel_order: if self.bgr {
                    ChannelOrder::Bgr
                } else {
                    ChannelOrder::Rgb
                },
            },
        }
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Runs one invocation of the handler as a hosting environment would
pub struct Invocation {
    cli: Cli,
}

impl Invocation {
    /// Create an invocation from parsed arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Read the event, process it, and optionally write previews
    ///
    /// # Errors
    ///
    /// Returns an error if the event cannot be read or processing fails
    pub fn run(&self) -> Result<Vec<ObjectReport>> {
        let json = self.read_event()?;
        let store = FsStore::new(&self.cli.store_root);

        let mut handler = EventHandler::new(store, self.cli.settings())?;
        if self.cli.should_show_progress() {
            handler = handler.with_progress(ProgressReporter::new());
        }

        let reports = handler.handle_event(&json)?;

        if let Some(ref preview) = self.cli.preview {
            let multiple = reports.len() > 1;
            for report in &reports {
                self.write_preview(handler.store(), report, preview, multiple)?;
            }
        }

        info!("Image Augmentation Completed!");
        Ok(reports)
    }

    fn read_event(&self) -> Result<String> {
        let io_error = |source| AugmentError::FileSystem {
            path: self.cli.event.clone(),
            operation: "read event",
            source,
        };
        if self.cli.event.as_os_str() == "-" {
            std::io::read_to_string(std::io::stdin()).map_err(io_error)
        } else {
            std::fs::read_to_string(&self.cli.event).map_err(io_error)
        }
    }

    // Reads the outputs back from the store so the preview shows what was written
    fn write_preview(
        &self,
        store: &FsStore,
        report: &ObjectReport,
        preview: &Path,
        multiple: bool,
    ) -> Result<()> {
        let mut images = Vec::with_capacity(report.outputs.len());
        for name in &report.outputs {
            let bytes = store.read(&self.cli.output_bucket, name)?;
            images.push(decode_image(&bytes, name)?);
        }
        if images.is_empty() {
            return Ok(());
        }

        save_preview(&images, &Self::preview_path(preview, report, multiple))
    }

    /// Preview destination for `report`, suffixed with its base name when an
    /// event names several objects
    pub fn preview_path(preview: &Path, report: &ObjectReport, multiple: bool) -> PathBuf {
        if !multiple {
            return preview.to_path_buf();
        }
        let stem = preview.file_stem().unwrap_or_default();
        let name = format!("{}_{}.png", stem.to_string_lossy(), report.source.base_name());
        if let Some(parent) = preview.parent() {
            parent.join(name)
        } else {
            PathBuf::from(name)
        }
    }
}
