//! Single-frame generation with an optional reference image.

use std::io::Cursor;

use flipbook_core::data_url::{DataUrl, PNG_MIME};
use flipbook_gemini::{GenerativeBackend, InlineImage};
use image::ImageFormat;

use crate::error::PipelineError;

/// Generate frame `frame_number` from a fully composed prompt.
///
/// When `previous` is given it is decoded and attached as the reference
/// image. The first inline image of the response is returned as a PNG
/// data URL.
pub async fn generate_frame(
    backend: &dyn GenerativeBackend,
    frame_number: usize,
    prompt: &str,
    previous: Option<&DataUrl>,
) -> Result<DataUrl, PipelineError> {
    let reference = previous
        .map(|url| {
            url.to_parts()
                .map(|(data, mime_type)| InlineImage { mime_type, data })
        })
        .transpose()?;

    tracing::debug!(
        frame = frame_number,
        has_reference = reference.is_some(),
        "Requesting frame image",
    );

    let image = backend
        .generate_image(prompt, reference.as_ref())
        .await
        .map_err(|e| {
            PipelineError::remote(e, |source| PipelineError::FrameGeneration {
                frame: frame_number,
                source,
            })
        })?
        .ok_or(PipelineError::NoImageReturned {
            frame: frame_number,
        })?;

    let png = to_png(&image).map_err(|reason| PipelineError::InvalidFrameImage {
        frame: frame_number,
        reason,
    })?;

    Ok(DataUrl::from_bytes(PNG_MIME, &png))
}

/// PNG bytes for an inline image, transcoding anything that is not PNG.
fn to_png(image: &InlineImage) -> Result<Vec<u8>, String> {
    if image.mime_type.eq_ignore_ascii_case(PNG_MIME) {
        return Ok(image.data.clone());
    }

    let decoded = image::load_from_memory(&image.data).map_err(|e| e.to_string())?;
    let mut png = Vec::new();
    decoded
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| e.to_string())?;
    Ok(png)
}
