//! Animated GIF export.
//!
//! Every frame is decoded before encoding starts, so a single unreadable
//! frame fails the export without producing any output.

use flipbook_core::data_url::DataUrl;
use flipbook_core::error::CoreError;
use flipbook_core::playback::frame_period_ms;
use image::codecs::gif::{GifEncoder, Repeat};
use image::imageops::FilterType;
use image::{Delay, Frame, RgbaImage};

use crate::error::PipelineError;

/// GIF frame delays are stored in hundredths of a second.
const GIF_DELAY_STEP_MS: u32 = 10;

/// Encode `frames` as a looping GIF, each frame shown for the playback
/// period of `speed` (`1100 - speed` ms).
///
/// The period is rounded to the nearest 10 ms, the finest delay a GIF can
/// store: speed 605 (495 ms) plays at 500 ms per frame.
pub fn export_gif(frames: &[DataUrl], speed: u32) -> Result<Vec<u8>, PipelineError> {
    if frames.is_empty() {
        return Err(CoreError::Validation("cannot export an empty animation".to_string()).into());
    }
    let period_ms = frame_period_ms(speed)?;
    let delay_ms = gif_delay_ms(period_ms);
    if delay_ms != period_ms {
        tracing::debug!(period_ms, delay_ms, "Rounded frame period to GIF delay resolution");
    }

    let images = load_frames(frames)?;
    let gif = encode_gif(images, delay_ms)?;

    tracing::info!(
        frames = frames.len(),
        delay_ms,
        bytes = gif.len(),
        "Animation exported as GIF",
    );
    Ok(gif)
}

/// Decode every frame into RGBA, failing on the first unreadable one.
///
/// Frames whose size differs from the first are scaled to match it.
pub fn load_frames(frames: &[DataUrl]) -> Result<Vec<RgbaImage>, PipelineError> {
    let mut images: Vec<RgbaImage> = Vec::with_capacity(frames.len());

    for (i, url) in frames.iter().enumerate() {
        let frame = i + 1;
        let bytes = url.decode().map_err(|e| PipelineError::FrameLoad {
            frame,
            reason: e.to_string(),
        })?;
        let mut image = image::load_from_memory(&bytes)
            .map_err(|e| PipelineError::FrameLoad {
                frame,
                reason: e.to_string(),
            })?
            .to_rgba8();

        if let Some(first) = images.first() {
            if image.dimensions() != first.dimensions() {
                tracing::debug!(frame, "Resizing frame to match the first frame");
                image = image::imageops::resize(
                    &image,
                    first.width(),
                    first.height(),
                    FilterType::Triangle,
                );
            }
        }
        images.push(image);
    }

    Ok(images)
}

/// Round a playback period to the nearest whole GIF delay step.
fn gif_delay_ms(period_ms: u32) -> u32 {
    (period_ms + GIF_DELAY_STEP_MS / 2) / GIF_DELAY_STEP_MS * GIF_DELAY_STEP_MS
}

fn encode_gif(images: Vec<RgbaImage>, delay_ms: u32) -> Result<Vec<u8>, PipelineError> {
    let delay = Delay::from_numer_denom_ms(delay_ms, 1);
    let mut out = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut out);
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| PipelineError::Encoding(e.to_string()))?;
        encoder
            .encode_frames(
                images
                    .into_iter()
                    .map(|image| Frame::from_parts(image, 0, 0, delay)),
            )
            .map_err(|e| PipelineError::Encoding(e.to_string()))?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use assert_matches::assert_matches;
    use image::codecs::gif::GifDecoder;
    use image::{AnimationDecoder, ImageFormat, Rgba};

    use super::*;

    fn png_frame(color: [u8; 4], size: u32) -> DataUrl {
        let img = RgbaImage::from_pixel(size, size, Rgba(color));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        DataUrl::from_bytes("image/png", &bytes)
    }

    fn decode(gif: &[u8]) -> Vec<image::Frame> {
        GifDecoder::new(Cursor::new(gif))
            .unwrap()
            .into_frames()
            .collect_frames()
            .unwrap()
    }

    #[test]
    fn encodes_every_frame_in_order_with_equal_delay() {
        let frames = vec![
            png_frame([255, 0, 0, 255], 8),
            png_frame([0, 255, 0, 255], 8),
            png_frame([0, 0, 255, 255], 8),
        ];

        let gif = export_gif(&frames, 600).unwrap();
        let decoded = decode(&gif);

        assert_eq!(decoded.len(), 3);
        for frame in &decoded {
            assert_eq!(frame.delay().numer_denom_ms(), (500, 1));
        }

        let dominant: Vec<usize> = decoded
            .iter()
            .map(|f| {
                let px = f.buffer().get_pixel(4, 4).0;
                (0..3).max_by_key(|&c| px[c]).unwrap()
            })
            .collect();
        assert_eq!(dominant, vec![0, 1, 2], "frames must stay in order");
    }

    #[test]
    fn delay_is_rounded_to_gif_resolution() {
        assert_eq!(gif_delay_ms(500), 500);
        assert_eq!(gif_delay_ms(495), 500);
        assert_eq!(gif_delay_ms(494), 490);
        assert_eq!(gif_delay_ms(100), 100);
        assert_eq!(gif_delay_ms(1000), 1000);
    }

    #[test]
    fn off_step_speed_plays_at_rounded_delay() {
        let frames = vec![png_frame([255, 0, 0, 255], 8), png_frame([0, 255, 0, 255], 8)];

        let gif = export_gif(&frames, 605).unwrap();

        for frame in &decode(&gif) {
            assert_eq!(frame.delay().numer_denom_ms(), (500, 1));
        }
    }

    #[test]
    fn mismatched_sizes_are_scaled_to_first_frame() {
        let frames = vec![png_frame([255, 0, 0, 255], 8), png_frame([0, 255, 0, 255], 16)];

        let images = load_frames(&frames).unwrap();

        assert_eq!(images[1].dimensions(), (8, 8));
    }

    #[test]
    fn unreadable_frame_fails_whole_export() {
        let frames = vec![
            png_frame([255, 0, 0, 255], 8),
            DataUrl::from_bytes("image/png", b"definitely not a png"),
            png_frame([0, 0, 255, 255], 8),
        ];

        assert_matches!(
            export_gif(&frames, 600),
            Err(PipelineError::FrameLoad { frame: 2, .. })
        );
    }

    #[test]
    fn empty_sequence_is_rejected() {
        assert_matches!(export_gif(&[], 600), Err(PipelineError::Core(_)));
    }

    #[test]
    fn invalid_speed_is_rejected_before_decoding() {
        let frames = vec![DataUrl::from_bytes("image/png", b"junk")];
        assert_matches!(
            export_gif(&frames, 5),
            Err(PipelineError::Core(CoreError::Validation(_)))
        );
    }
}
