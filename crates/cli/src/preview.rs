//! Terminal playback of a written animation.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use flipbook_core::playback::PlaybackCycle;

/// Cycle through `frames` at `speed`, redrawing one status line per tick,
/// for `loops` full passes.
pub async fn play(frames: &[PathBuf], speed: u32, loops: usize) -> Result<()> {
    let mut cycle = PlaybackCycle::new(frames.len(), speed)?;
    let Some(mut index) = cycle.current() else {
        return Ok(());
    };

    let mut interval = tokio::time::interval(cycle.period());
    let mut stdout = std::io::stdout();
    for _ in 0..loops * cycle.len() {
        interval.tick().await;
        let name = frames[index]
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        write!(stdout, "\r[{}/{}] {name}   ", index + 1, cycle.len())?;
        stdout.flush()?;
        index = cycle.advance().unwrap_or(0);
    }
    writeln!(stdout)?;
    Ok(())
}
