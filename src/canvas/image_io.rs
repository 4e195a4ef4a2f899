use anyhow::{anyhow, bail, Context, Result};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

pub const CAPTURE_SUBDIR: &str = "captures";

/// Byte offset of the pixel rows: 14-byte file header + 40-byte info header.
const PIXEL_DATA_OFFSET: u32 = 54;
const INFO_HEADER_SIZE: u32 = 40;
const BITS_PER_PIXEL: u16 = 24;
const PELS_PER_METER: i32 = 45089;

/// Writes the given top-down RGBA framebuffer as a 24-bit bitmap file:
/// `BM` file header, uncompressed info header, then bottom-up BGR rows
/// each padded to a 4-byte boundary.
pub fn write_bitmap(path: &Path, width: u32, height: u32, rgba: &[u8]) -> Result<()> {
    let expected = width as usize * height as usize * 4;
    if rgba.len() != expected {
        bail!(
            "framebuffer is {} bytes, expected {} for {}x{}",
            rgba.len(),
            expected,
            width,
            height
        );
    }

    let row_stride = (width * 3).div_ceil(4) * 4;
    let image_size = row_stride * height;
    let file_size = PIXEL_DATA_OFFSET + image_size;

    let mut data = Vec::with_capacity(file_size as usize);
    data.extend_from_slice(b"BM");
    data.extend_from_slice(&file_size.to_le_bytes());
    data.extend_from_slice(&0u16.to_le_bytes());
    data.extend_from_slice(&0u16.to_le_bytes());
    data.extend_from_slice(&PIXEL_DATA_OFFSET.to_le_bytes());

    data.extend_from_slice(&INFO_HEADER_SIZE.to_le_bytes());
    data.extend_from_slice(&(width as i32).to_le_bytes());
    data.extend_from_slice(&(height as i32).to_le_bytes());
    data.extend_from_slice(&1u16.to_le_bytes());
    data.extend_from_slice(&BITS_PER_PIXEL.to_le_bytes());
    data.extend_from_slice(&0u32.to_le_bytes());
    data.extend_from_slice(&image_size.to_le_bytes());
    data.extend_from_slice(&PELS_PER_METER.to_le_bytes());
    data.extend_from_slice(&PELS_PER_METER.to_le_bytes());
    data.extend_from_slice(&0u32.to_le_bytes());
    data.extend_from_slice(&0u32.to_le_bytes());

    let pad = (row_stride - width * 3) as usize;
    for y in (0..height as usize).rev() {
        let row = y * width as usize * 4;
        for x in 0..width as usize {
            let px = row + x * 4;
            data.push(rgba[px + 2]);
            data.push(rgba[px + 1]);
            data.push(rgba[px]);
        }
        data.extend(std::iter::repeat(0u8).take(pad));
    }

    fs::write(path, &data).with_context(|| format!("write capture file {}", path.display()))
}

/// Reads a headerless RGB backdrop file and validates it against the
/// window size it will cover.
pub fn read_backdrop_rgb(path: &Path, width: u32, height: u32) -> Result<Vec<u8>> {
    let data =
        fs::read(path).with_context(|| format!("read backdrop file {}", path.display()))?;
    let expected = width as usize * height as usize * 3;
    if data.len() != expected {
        bail!(
            "backdrop file {} is {} bytes, expected {} for {}x{}",
            path.display(),
            data.len(),
            expected,
            width,
            height
        );
    }
    Ok(data)
}

pub fn capture_folder_from_exe_path(exe_path: &Path) -> Result<PathBuf> {
    let parent = exe_path
        .parent()
        .ok_or_else(|| anyhow!("executable path has no parent: {}", exe_path.display()))?;
    Ok(parent.join(CAPTURE_SUBDIR))
}

pub fn ensure_capture_folder() -> Result<PathBuf> {
    let exe_path = std::env::current_exe().context("resolve current executable")?;
    let folder = capture_folder_from_exe_path(&exe_path)?;
    fs::create_dir_all(&folder)
        .with_context(|| format!("create capture folder {}", folder.display()))?;
    Ok(folder)
}

pub fn timestamped_capture_name(now: chrono::DateTime<Local>) -> String {
    format!("canvas_{}.bmp", now.format("%Y%m%d_%H%M%S"))
}
