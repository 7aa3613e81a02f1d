//! Image editor trait.

use crate::error::Result;
use crate::image::types::{EditorKind, EncodedImage};
use async_trait::async_trait;

/// Trait for hosted image-editing models.
///
/// One image and one instruction go in; an edited image or a failure comes
/// out. Implementations make a single round trip per call.
#[async_trait]
pub trait ImageEditor: Send + Sync {
    /// Edits `image` according to `instruction`.
    async fn edit(&self, image: &EncodedImage, instruction: &str) -> Result<EncodedImage>;

    /// Returns the kind of this editor.
    fn kind(&self) -> EditorKind;

    /// Returns the name of this editor for display.
    fn name(&self) -> &str {
        match self.kind() {
            EditorKind::Gemini => "Gemini (Google)",
            EditorKind::Local => "Local",
        }
    }
}

#[async_trait]
impl<T: ImageEditor + ?Sized> ImageEditor for Box<T> {
    async fn edit(&self, image: &EncodedImage, instruction: &str) -> Result<EncodedImage> {
        (**self).edit(image, instruction).await
    }

    fn kind(&self) -> EditorKind {
        (**self).kind()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
