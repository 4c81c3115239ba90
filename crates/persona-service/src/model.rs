//! Seam for the external vision-language model.

use crate::error::BoxError;

/// A model that answers a text prompt about an image.
///
/// Implementations wrap a concrete client; the pipeline only needs the reply
/// text and treats the model as a black box.
pub trait VisionModel {
    fn describe(&self, prompt: &str, image: &[u8]) -> Result<String, BoxError>;
}
