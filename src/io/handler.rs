//! Storage event handling: read, decode, augment and write back
//!
//! Each object is processed synchronously to completion. The first failing
//! object stops the event; outputs already written for earlier objects stay.

use crate::augment::{AugmentConfig, Augmenter};
use crate::io::configuration::DEFAULT_OUTPUT_COUNT;
use crate::io::error::Result;
use crate::io::event::{ObjectRef, parse_event};
use crate::io::image::{EncodeOptions, decode_image};
use crate::io::progress::ProgressReporter;
use crate::io::sink::ResultSink;
use crate::io::storage::ObjectStore;
use log::info;

/// Settings supplied by the hosting environment
#[derive(Debug, Clone)]
pub struct HandlerSettings {
    /// Number of augmented outputs per source object
    pub count: usize,
    /// Bucket receiving the outputs
    pub output_bucket: String,
    /// Parameter ranges and composition policy
    pub augment: AugmentConfig,
    /// Optional seed for reproducible batches
    pub seed: Option<u64>,
    /// Output encoding settings
    pub encode: EncodeOptions,
}

impl HandlerSettings {
    /// Settings with default augmentation and encoding for `output_bucket`
    pub fn new(output_bucket: impl Into<String>) -> Self {
        Self {
            count: DEFAULT_OUTPUT_COUNT,
            output_bucket: output_bucket.into(),
            augment: AugmentConfig::default(),
            seed: None,
            encode: EncodeOptions::default(),
        }
    }
}

/// Outcome of processing one source object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectReport {
    /// Object that triggered the work
    pub source: ObjectRef,
    /// Names written to the output bucket, in index order
    pub outputs: Vec<String>,
}

/// Wires storage events to the augmentation driver and result sink
pub struct EventHandler<S: ObjectStore> {
    store: S,
    settings: HandlerSettings,
    augmenter: Augmenter,
    progress: Option<ProgressReporter>,
}

impl<S: ObjectStore> EventHandler<S> {
    /// Create a handler over `store`
    ///
    /// # Errors
    ///
    /// Returns an error if the augmentation configuration is invalid
    pub fn new(store: S, settings: HandlerSettings) -> Result<Self> {
        let augmenter = Augmenter::new(&settings.augment, settings.seed)?;
        Ok(Self {
            store,
            settings,
            augmenter,
            progress: None,
        })
    }

    /// Display progress while writing outputs
    #[must_use]
    pub fn with_progress(mut self, progress: ProgressReporter) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Underlying object store
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Active settings
    pub const fn settings(&self) -> &HandlerSettings {
        &self.settings
    }

    /// Parse a notification document and process every object it names
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed or any object fails
    pub fn handle_event(&mut self, json: &str) -> Result<Vec<ObjectReport>> {
        let objects = parse_event(json)?;
        let mut reports = Vec::with_capacity(objects.len());
        for object in objects {
            reports.push(self.handle_object(object)?);
        }
        if let Some(ref progress) = self.progress {
            progress.finish();
        }
        Ok(reports)
    }

    /// Read, decode, augment and write back a single object
    ///
    /// # Errors
    ///
    /// Returns an error if the object cannot be read or decoded, augmentation
    /// fails, or any output write fails
    pub fn handle_object(&mut self, object: ObjectRef) -> Result<ObjectReport> {
        info!("Processing {}/{}", object.bucket, object.key);
        let bytes = self.store.read(&object.bucket, &object.key)?;
        let image = decode_image(&bytes, &object.key)?;

        let generated = self.augmenter.generate(&image, self.settings.count)?;
        info!("Image augmentation completed!");

        let mut sink = ResultSink::new(&self.store, self.settings.encode);
        if let Some(ref progress) = self.progress {
            progress.start_object(object.file_name(), generated.len());
            sink = sink.with_progress(progress);
        }
        let outputs = sink.write(&generated, &self.settings.output_bucket, object.base_name())?;

        Ok(ObjectReport {
            source: object,
            outputs,
        })
    }
}
