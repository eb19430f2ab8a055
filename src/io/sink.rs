//! Naming, encoding and writing of generated images

use crate::io::configuration::{OUTPUT_EXTENSION, OUTPUT_INFIX};
use crate::io::error::{AugmentError, Result};
use crate::io::image::{EncodeOptions, encode_jpeg};
use crate::io::progress::ProgressReporter;
use crate::io::storage::ObjectStore;
use crate::transform::PixelArray;
use log::{info, warn};

/// Output object name for result `index` of a source whose base name is `stem`
///
/// `stem` is used verbatim; see [`crate::io::event::ObjectRef::base_name`].
pub fn output_name(stem: &str, index: usize) -> String {
    format!("{stem}{OUTPUT_INFIX}{index}.{OUTPUT_EXTENSION}")
}

/// Writes every generated image to an object store
pub struct ResultSink<'a, S: ObjectStore + ?Sized> {
    store: &'a S,
    options: EncodeOptions,
    progress: Option<&'a ProgressReporter>,
}

impl<'a, S: ObjectStore + ?Sized> ResultSink<'a, S> {
    /// Create a sink writing into `store`
    pub const fn new(store: &'a S, options: EncodeOptions) -> Self {
        Self {
            store,
            options,
            progress: None,
        }
    }

    /// Report each successful write to `progress`
    #[must_use]
    pub const fn with_progress(mut self, progress: &'a ProgressReporter) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Encode and write each result to `destination`, in index order
    ///
    /// Every result is attempted even when an earlier one fails; writes that
    /// succeeded stay in place. Returns the names written.
    ///
    /// # Errors
    ///
    /// Returns [`AugmentError::PartialWrite`] listing every output whose
    /// encoding or write failed
    pub fn write(
        &self,
        results: &[PixelArray],
        destination: &str,
        stem: &str,
    ) -> Result<Vec<String>> {
        let mut written = Vec::with_capacity(results.len());
        let mut failures = Vec::new();

        for (index, image) in results.iter().enumerate() {
            let name = output_name(stem, index);
            match self.write_one(image, destination, &name) {
                Ok(()) => {
                    info!("Uploaded image: {name}");
                    if let Some(progress) = self.progress {
                        progress.output_written(&name);
                    }
                    written.push(name);
                }
                Err(error) => {
                    warn!("Failed to write {name}: {error}");
                    failures.push((name, Box::new(error)));
                }
            }
        }

        if failures.is_empty() {
            Ok(written)
        } else {
            Err(AugmentError::PartialWrite {
                attempted: results.len(),
                failures,
            })
        }
    }

    fn write_one(&self, image: &PixelArray, destination: &str, name: &str) -> Result<()> {
        let bytes = encode_jpeg(image.view(), self.options, name)?;
        self.store.write(destination, name, &bytes)
    }
}
