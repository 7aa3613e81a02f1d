//! Image types and hosted image editors.

mod provider;
pub mod providers;
mod types;

pub use provider::ImageEditor;
pub use types::{EditorKind, EncodedImage, ImageFormat};
