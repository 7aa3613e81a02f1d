//! The transform client: drives one session from upload to export.

use crate::error::Result;
use crate::headshot::{failure_message, OptionKey, TransformOptions, TransformationService};
use crate::image::{EncodedImage, ImageEditor};
use crate::workflow::state::WorkflowState;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Weak};

/// File name used when exporting the transformed headshot.
pub const EXPORT_FILE_NAME: &str = "professional-resume-photo.png";

/// Owns the workflow and option state for one session.
///
/// At most one transform is outstanding at a time. Each transform is tagged
/// with the load generation it started from; a result that comes back after
/// a new photo was loaded, or after a reset, is dropped. A job that is
/// dropped without finishing frees its slot.
#[derive(Debug, Default)]
pub struct TransformClient {
    state: WorkflowState,
    options: TransformOptions,
    generation: u64,
    in_flight: Option<InFlight>,
}

/// The outstanding job's generation and a handle that dies with it.
#[derive(Debug)]
struct InFlight {
    generation: u64,
    slot: Weak<()>,
}

impl InFlight {
    fn is_alive(&self) -> bool {
        self.slot.strong_count() > 0
    }

    fn owns(&self, slot: &Arc<()>) -> bool {
        std::ptr::eq(self.slot.as_ptr(), Arc::as_ptr(slot))
    }
}

/// A transform that has been started but not yet sent.
///
/// Produced by [`TransformClient::begin_transform`]; its outcome must be
/// handed back through [`TransformClient::finish_transform`].
#[derive(Debug)]
#[must_use = "a started transform must be run and finished"]
pub struct TransformJob {
    generation: u64,
    image: EncodedImage,
    options: TransformOptions,
    slot: Arc<()>,
}

/// The resolved result of a [`TransformJob`].
#[derive(Debug)]
pub struct TransformOutcome {
    generation: u64,
    result: Result<EncodedImage>,
    slot: Arc<()>,
}

impl TransformJob {
    /// The photo being transformed.
    pub fn image(&self) -> &EncodedImage {
        &self.image
    }

    /// The options captured when the job started.
    pub fn options(&self) -> &TransformOptions {
        &self.options
    }

    /// Sends the request and waits for it to resolve.
    pub async fn run<E: ImageEditor>(self, service: &TransformationService<E>) -> TransformOutcome {
        let result = service.transform(&self.image, &self.options).await;
        TransformOutcome {
            generation: self.generation,
            result,
            slot: self.slot,
        }
    }
}

impl TransformOutcome {
    /// Returns the raw service result.
    pub fn result(&self) -> &Result<EncodedImage> {
        &self.result
    }
}

impl TransformClient {
    /// Creates a client with empty state and default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a client with the given starting options.
    pub fn with_options(options: TransformOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Current workflow state.
    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    /// Current options.
    pub fn options(&self) -> &TransformOptions {
        &self.options
    }

    /// True while a started transform has not been finished, including one
    /// whose result will be discarded.
    pub fn has_pending_job(&self) -> bool {
        self.in_flight.as_ref().is_some_and(InFlight::is_alive)
    }

    /// Loads a new photo, replacing the whole state.
    ///
    /// Missing or empty input is ignored.
    pub fn load_image(&mut self, file: Option<&[u8]>) -> &WorkflowState {
        let Some(bytes) = file.filter(|b| !b.is_empty()) else {
            return &self.state;
        };

        self.generation += 1;
        self.state = WorkflowState::with_original(EncodedImage::from_bytes(bytes));
        tracing::debug!(
            generation = self.generation,
            size = bytes.len(),
            "loaded photo"
        );
        &self.state
    }

    /// Reads a photo from disk and loads it.
    ///
    /// On a read error the state is left untouched.
    pub async fn load_file(&mut self, path: impl AsRef<Path>) -> Result<&WorkflowState> {
        let bytes = tokio::fs::read(path.as_ref()).await?;
        Ok(self.load_image(Some(&bytes)))
    }

    /// Replaces one option from its text form.
    pub fn set_option(&mut self, key: OptionKey, value: &str) -> Result<&TransformOptions> {
        self.options = self.options.with_option(key, value)?;
        Ok(&self.options)
    }

    /// Replaces all options.
    pub fn set_options(&mut self, options: TransformOptions) -> &TransformOptions {
        self.options = options;
        &self.options
    }

    /// Marks the state as processing and hands back the job to run.
    ///
    /// Returns `None` when no photo is loaded or a job is still outstanding.
    pub fn begin_transform(&mut self) -> Option<TransformJob> {
        if let Some(generation) = self
            .in_flight
            .as_ref()
            .filter(|f| !f.is_alive())
            .map(|f| f.generation)
        {
            self.abandon(generation);
        }
        if self.state.is_processing() || self.in_flight.is_some() {
            return None;
        }
        let image = self.state.original()?.clone();

        let slot = Arc::new(());
        self.state.mark_processing();
        self.in_flight = Some(InFlight {
            generation: self.generation,
            slot: Arc::downgrade(&slot),
        });

        Some(TransformJob {
            generation: self.generation,
            image,
            options: self.options.clone(),
            slot,
        })
    }

    /// Frees the slot of a job that went away without an outcome.
    fn abandon(&mut self, generation: u64) {
        if self
            .in_flight
            .as_ref()
            .is_some_and(|f| f.generation == generation)
        {
            self.in_flight = None;
        }
        if generation == self.generation && self.state.is_processing() {
            tracing::debug!(generation, "transform abandoned before it resolved");
            self.state.abandon();
        }
    }

    /// Applies a job's outcome.
    ///
    /// Returns `false` when the outcome belongs to an earlier photo and was
    /// discarded.
    pub fn finish_transform(&mut self, outcome: TransformOutcome) -> bool {
        if self.in_flight.as_ref().is_some_and(|f| f.owns(&outcome.slot)) {
            self.in_flight = None;
        }

        if outcome.generation != self.generation {
            tracing::debug!(
                job_generation = outcome.generation,
                current_generation = self.generation,
                succeeded = outcome.result.is_ok(),
                "discarding stale transform result"
            );
            return false;
        }

        match outcome.result {
            Ok(image) => self.state.succeed(image),
            Err(e) => {
                tracing::warn!(
                    generation_failure = e.is_generation_failure(),
                    "transform failed, showing user message: {e}"
                );
                self.state.fail(failure_message(self.options.locale));
            }
        }
        true
    }

    /// Runs a transform to completion.
    ///
    /// A no-op when no photo is loaded or a transform is already outstanding.
    /// Dropping the returned future before it resolves leaves the client
    /// idle again.
    pub async fn start_transform<E: ImageEditor>(
        &mut self,
        service: &TransformationService<E>,
    ) -> &WorkflowState {
        let Some(job) = self.begin_transform() else {
            return &self.state;
        };

        let mut guard = AbandonOnDrop {
            generation: job.generation,
            client: &mut *self,
            armed: true,
        };
        let outcome = job.run(service).await;
        guard.armed = false;
        guard.client.finish_transform(outcome);
        drop(guard);

        &self.state
    }

    /// Returns to the empty state.
    pub fn reset(&mut self) -> &WorkflowState {
        self.generation += 1;
        self.state = WorkflowState::empty();
        &self.state
    }

    /// Writes the transformed headshot into `dir` as
    /// [`EXPORT_FILE_NAME`].
    ///
    /// Returns `Ok(None)` without touching the filesystem when there is no
    /// result yet.
    pub async fn export_result(&self, dir: impl AsRef<Path>) -> Result<Option<PathBuf>> {
        let Some(image) = self.state.transformed() else {
            return Ok(None);
        };

        let bytes = image.decode()?;
        let path = dir.as_ref().join(EXPORT_FILE_NAME);
        tokio::fs::write(&path, &bytes).await?;

        tracing::debug!(path = %path.display(), size = bytes.len(), "exported headshot");
        Ok(Some(path))
    }
}

/// Releases the client if `start_transform` is cancelled mid-flight.
struct AbandonOnDrop<'a> {
    client: &'a mut TransformClient,
    generation: u64,
    armed: bool,
}

impl Drop for AbandonOnDrop<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.client.abandon(self.generation);
        }
    }
}
