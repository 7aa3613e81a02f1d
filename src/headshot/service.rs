//! The transformation service: options in, studio headshot out.

use crate::error::Result;
use crate::headshot::options::TransformOptions;
use crate::headshot::prompt::build_instruction;
use crate::image::{EncodedImage, ImageEditor};
use std::time::Instant;

/// Turns a photo into a professional headshot through an [`ImageEditor`].
pub struct TransformationService<E> {
    editor: E,
}

impl<E: ImageEditor> TransformationService<E> {
    /// Creates a service backed by `editor`.
    pub fn new(editor: E) -> Self {
        Self { editor }
    }

    /// Returns the underlying editor.
    pub fn editor(&self) -> &E {
        &self.editor
    }

    /// Runs one transform round trip.
    ///
    /// Generation failures and service failures are both returned to the
    /// caller after being logged.
    pub async fn transform(
        &self,
        image: &EncodedImage,
        options: &TransformOptions,
    ) -> Result<EncodedImage> {
        let instruction = build_instruction(options);
        let start = Instant::now();

        tracing::debug!(
            editor = self.editor.name(),
            mime_type = image.mime_type(),
            gender = %options.gender,
            suit_color = %options.suit_color,
            background = %options.background,
            instruction_len = instruction.len(),
            "starting headshot transform"
        );

        match self.editor.edit(image, &instruction).await {
            Ok(result) => {
                tracing::debug!(
                    editor = self.editor.name(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "headshot transform complete"
                );
                // Editors may label their output differently; the result is
                // always presented as PNG.
                Ok(EncodedImage::png_from_base64(result.base64_data()))
            }
            Err(e) => {
                tracing::error!(
                    editor = self.editor.name(),
                    generation_failure = e.is_generation_failure(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "headshot transform failed: {e}"
                );
                Err(e)
            }
        }
    }
}
