//! Session workflow: upload, transform, export.

mod client;
mod state;

pub use client::{TransformClient, TransformJob, TransformOutcome, EXPORT_FILE_NAME};
pub use state::{Phase, WorkflowState};
