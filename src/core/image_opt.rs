//! In-place image re-encoding for the "Optimize image" development tasks.

use crate::errors::{AppError, AppResult};
use crate::utils::human_bytes;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{DynamicImage, ImageReader};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizeReport {
    pub original_size: u64,
    pub optimized_size: u64,
    pub width: u32,
    pub height: u32,
}

impl OptimizeReport {
    pub fn savings(&self) -> u64 {
        self.original_size.saturating_sub(self.optimized_size)
    }

    pub fn savings_percent(&self) -> f64 {
        if self.original_size == 0 {
            return 0.0;
        }
        self.savings() as f64 / self.original_size as f64 * 100.0
    }

    pub fn dimensions(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }

    pub fn message(&self) -> String {
        if self.savings() == 0 {
            "Already optimized".to_string()
        } else {
            format!(
                "Reduced by {:.1}% ({} → {})",
                self.savings_percent(),
                human_bytes(self.original_size),
                human_bytes(self.optimized_size)
            )
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Jpeg,
    Png,
}

fn target_for(path: &Path) -> AppResult<Target> {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "jpg" | "jpeg" => Ok(Target::Jpeg),
        "png" => Ok(Target::Png),
        _ => Err(AppError::UnsupportedImage(path.display().to_string())),
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".optimized");
    PathBuf::from(name)
}

fn encode(img: DynamicImage, target: Target, quality: u8, out: &Path) -> AppResult<()> {
    let mut writer = BufWriter::new(File::create(out)?);
    match target {
        Target::Jpeg => {
            let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
            rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut writer, quality))?;
        }
        Target::Png => {
            img.write_with_encoder(PngEncoder::new_with_quality(
                &mut writer,
                CompressionType::Best,
                FilterType::Adaptive,
            ))?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Re-encode `path` next to itself and keep the result only if it is smaller.
/// The file keeps its format: JPEG at `quality`, PNG at best compression.
pub fn optimize_image(path: &Path, quality: u8) -> AppResult<OptimizeReport> {
    let target = target_for(path)?;
    let original_size = fs::metadata(path)?.len();

    let img = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    let (width, height) = (img.width(), img.height());

    let tmp = temp_path(path);
    if let Err(e) = encode(img, target, quality, &tmp) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }

    let optimized_size = fs::metadata(&tmp)?.len();
    tracing::debug!(
        path = %path.display(),
        original_size,
        optimized_size,
        "re-encoded image"
    );

    if optimized_size < original_size {
        fs::rename(&tmp, path)?;
        Ok(OptimizeReport {
            original_size,
            optimized_size,
            width,
            height,
        })
    } else {
        fs::remove_file(&tmp)?;
        Ok(OptimizeReport {
            original_size,
            optimized_size: original_size,
            width,
            height,
        })
    }
}
