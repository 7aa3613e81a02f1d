//! Workflow state shown to the user.

use crate::image::EncodedImage;
use serde::Serialize;

/// Where the workflow currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// No photo loaded.
    Empty,
    /// Photo loaded, nothing in flight. A previous failure may be recorded.
    Loaded,
    /// Transform request outstanding.
    Processing,
    /// Transformed headshot available.
    Done,
}

/// Upload, preview and result state for one session.
///
/// Only [`TransformClient`](super::TransformClient) mutates it, which keeps
/// the processing flag and result in step with the request lifecycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkflowState {
    original: Option<EncodedImage>,
    transformed: Option<EncodedImage>,
    is_processing: bool,
    error: Option<String>,
}

impl WorkflowState {
    /// Returns the empty state.
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn with_original(original: EncodedImage) -> Self {
        Self {
            original: Some(original),
            ..Self::default()
        }
    }

    /// The photo the user supplied.
    pub fn original(&self) -> Option<&EncodedImage> {
        self.original.as_ref()
    }

    /// The headshot from the last successful transform.
    pub fn transformed(&self) -> Option<&EncodedImage> {
        self.transformed.as_ref()
    }

    /// True while a transform request is outstanding.
    pub fn is_processing(&self) -> bool {
        self.is_processing
    }

    /// User-facing message from the last failed transform.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True when nothing has been loaded.
    pub fn is_empty(&self) -> bool {
        self.original.is_none()
    }

    /// Derives the state-machine phase.
    ///
    /// A recorded failure puts a loaded photo back in `Loaded`, even when an
    /// earlier result is still kept.
    pub fn phase(&self) -> Phase {
        if self.is_processing {
            Phase::Processing
        } else if self.error.is_some() && self.original.is_some() {
            Phase::Loaded
        } else if self.transformed.is_some() {
            Phase::Done
        } else if self.original.is_some() {
            Phase::Loaded
        } else {
            Phase::Empty
        }
    }

    pub(crate) fn abandon(&mut self) {
        self.is_processing = false;
    }

    pub(crate) fn mark_processing(&mut self) {
        self.is_processing = true;
        self.error = None;
    }

    pub(crate) fn succeed(&mut self, transformed: EncodedImage) {
        self.transformed = Some(transformed);
        self.is_processing = false;
    }

    pub(crate) fn fail(&mut self, message: impl Into<String>) {
        self.is_processing = false;
        self.error = Some(message.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_transitions() {
        let mut state = WorkflowState::empty();
        assert_eq!(state.phase(), Phase::Empty);
        assert!(state.is_empty());

        state = WorkflowState::with_original(EncodedImage::png_from_base64("QQ=="));
        assert_eq!(state.phase(), Phase::Loaded);

        state.mark_processing();
        assert_eq!(state.phase(), Phase::Processing);

        state.succeed(EncodedImage::png_from_base64("Qg=="));
        assert_eq!(state.phase(), Phase::Done);
        assert!(!state.is_processing());
    }

    #[test]
    fn test_failure_returns_to_loaded() {
        let mut state = WorkflowState::with_original(EncodedImage::png_from_base64("QQ=="));
        state.mark_processing();
        state.fail("oops");

        assert_eq!(state.phase(), Phase::Loaded);
        assert_eq!(state.error(), Some("oops"));

        state.mark_processing();
        assert_eq!(state.error(), None);
    }

    #[test]
    fn test_failure_after_success_is_loaded() {
        let mut state = WorkflowState::with_original(EncodedImage::png_from_base64("QQ=="));
        state.mark_processing();
        state.succeed(EncodedImage::png_from_base64("Qg=="));
        state.mark_processing();
        state.fail("oops");

        assert!(state.transformed().is_some());
        assert_eq!(state.phase(), Phase::Loaded);
    }

    #[test]
    fn test_abandon_clears_processing() {
        let mut state = WorkflowState::with_original(EncodedImage::png_from_base64("QQ=="));
        state.mark_processing();
        state.abandon();

        assert_eq!(state.phase(), Phase::Loaded);
        assert_eq!(state.error(), None);
    }
}
