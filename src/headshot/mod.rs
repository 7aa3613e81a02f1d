//! Headshot styling options, instruction text and the transformation service.

mod options;
mod prompt;
mod service;

pub use options::{
    BackgroundTone, GenderHint, Locale, OptionKey, SuitColor, TransformOptions,
};
pub use prompt::{build_instruction, failure_message};
pub use service::TransformationService;
