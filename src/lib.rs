#![warn(missing_docs)]
//! ProPhoto - turn a personal photo into a studio-style resume headshot.
//!
//! The crate has three layers:
//! - [`image`]: the data-URI [`EncodedImage`] and the [`ImageEditor`] trait,
//!   with a Gemini implementation.
//! - [`headshot`]: styling options, instruction text and the
//!   [`TransformationService`].
//! - [`workflow`]: the [`TransformClient`] that owns session state from
//!   upload to export.
//!
//! # Quick Start
//!
//! ```no_run
//! use prophoto::{BackgroundTone, GeminiEditor, TransformClient, TransformationService};
//!
//! #[tokio::main]
//! async fn main() -> prophoto::Result<()> {
//!     let service = TransformationService::new(GeminiEditor::builder().build()?);
//!
//!     let mut client = TransformClient::new();
//!     client.load_file("me.jpg").await?;
//!     client.set_options(
//!         client.options().clone().with_background(BackgroundTone::White),
//!     );
//!
//!     let state = client.start_transform(&service).await;
//!     if let Some(message) = state.error() {
//!         eprintln!("{message}");
//!     }
//!     client.export_result(".").await?;
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `gemini`: Gemini (Google) image editor
//! - `cli`: Command-line interface

mod error;
pub mod headshot;
pub mod image;
pub mod workflow;

// Re-export error types at crate root
pub use error::{ProPhotoError, Result};

pub use headshot::{
    build_instruction, failure_message, BackgroundTone, GenderHint, Locale, OptionKey,
    SuitColor, TransformOptions, TransformationService,
};
pub use image::{EditorKind, EncodedImage, ImageEditor, ImageFormat};
pub use workflow::{
    Phase, TransformClient, TransformJob, TransformOutcome, WorkflowState, EXPORT_FILE_NAME,
};

#[cfg(feature = "gemini")]
pub use image::providers::{GeminiEditor, GeminiEditorBuilder, GeminiModel};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{ProPhotoError, Result};
    pub use crate::headshot::{TransformOptions, TransformationService};
    pub use crate::image::{EncodedImage, ImageEditor};
    pub use crate::workflow::{TransformClient, WorkflowState};

    #[cfg(feature = "gemini")]
    pub use crate::image::providers::GeminiEditor;
}
