use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::{ImageFormat, RgbaImage};

use rtlab_renderer::FrameBuffer;

/// Path for frame `index` of `count`: the output path itself for a single
/// frame, otherwise `stem_0001.png` style numbering starting at 1.
pub fn frame_path(output: &Path, index: u32, count: u32) -> PathBuf {
    if count <= 1 {
        return output.to_path_buf();
    }

    let stem = output
        .file_stem()
        .map_or_else(|| "render".into(), |s| s.to_string_lossy());
    let extension = output
        .extension()
        .map_or_else(|| "png".into(), |e| e.to_string_lossy());
    output.with_file_name(format!("{stem}_{:04}.{extension}", index + 1))
}

/// Write the frame as an 8-bit RGBA PNG.
pub fn save_png(frame: &FrameBuffer, path: &Path) -> Result<()> {
    let image = RgbaImage::from_raw(frame.width(), frame.height(), frame.to_rgba())
        .context("Frame buffer does not match its dimensions")?;

    image
        .save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    log::info!("Saved {}", path.display());
    Ok(())
}
