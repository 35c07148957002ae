//! Writing generated frames and the exported GIF to disk.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use flipbook_core::frame::FrameSequence;

/// File name of the exported animation.
pub const GIF_FILE_NAME: &str = "animation.gif";

/// Paths written by [`write_animation`], in frame order.
pub struct WrittenAnimation {
    pub frames: Vec<PathBuf>,
    pub gif: PathBuf,
}

/// `frame_01.png`, `frame_02.png`, ... (1-based, zero-padded).
pub fn frame_file_name(frame_number: usize) -> String {
    format!("frame_{frame_number:02}.png")
}

/// Write every frame and the encoded GIF into `dir`, creating it if needed.
///
/// Callers encode the GIF first so a failed export leaves nothing on disk.
pub async fn write_animation(
    dir: &Path,
    frames: &FrameSequence,
    gif: &[u8],
) -> Result<WrittenAnimation> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let mut paths = Vec::with_capacity(frames.len());
    for (i, frame) in frames.iter().enumerate() {
        let path = dir.join(frame_file_name(i + 1));
        let bytes = frame.decode()?;
        tokio::fs::write(&path, bytes)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        paths.push(path);
    }

    let gif_path = dir.join(GIF_FILE_NAME);
    tokio::fs::write(&gif_path, gif)
        .await
        .with_context(|| format!("Failed to write {}", gif_path.display()))?;

    tracing::info!(frames = paths.len(), dir = %dir.display(), "Animation written");
    Ok(WrittenAnimation {
        frames: paths,
        gif: gif_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_names_are_one_based_and_padded() {
        assert_eq!(frame_file_name(1), "frame_01.png");
        assert_eq!(frame_file_name(12), "frame_12.png");
        assert_eq!(frame_file_name(100), "frame_100.png");
    }
}
