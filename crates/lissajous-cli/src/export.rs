//! Saving the current figure as PNG or JPEG.
//!
//! The image is encoded completely in memory and written to a temporary
//! sibling file that is renamed into place, so a failed save never leaves a
//! truncated image behind.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use image::{DynamicImage, ImageFormat};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Jpeg,
}

impl ExportFormat {
    /// Extension appended when the file name has none.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpg",
        }
    }

    /// Case-insensitive; `None` for anything we don't write.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(ExportFormat::Png),
            "jpg" | "jpeg" => Some(ExportFormat::Jpeg),
            _ => None,
        }
    }

    /// Label shown in the save prompt's format filter.
    pub fn filter_label(self) -> &'static str {
        match self {
            ExportFormat::Png => "PNG (*.png)",
            ExportFormat::Jpeg => "JPEG (*.jpg *.jpeg)",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ExportFormat::Png => ExportFormat::Jpeg,
            ExportFormat::Jpeg => ExportFormat::Png,
        }
    }

    fn image_format(self) -> ImageFormat {
        match self {
            ExportFormat::Png => ImageFormat::Png,
            ExportFormat::Jpeg => ImageFormat::Jpeg,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Where and how a save request writes, or `None` if it should do nothing.
///
/// - blank name, or a directory (`out/`): nothing
/// - `.png` / `.jpg` / `.jpeg`: that format, whatever the filter says
/// - no extension: the filter's format, extension appended
/// - any other extension: nothing
pub fn resolve_target(file_name: &str, filter: ExportFormat) -> Option<(PathBuf, ExportFormat)> {
    let name = file_name.trim();
    // A trailing separator names a directory, not a file
    if name.is_empty() || name.ends_with(std::path::is_separator) {
        return None;
    }

    let path = PathBuf::from(name);
    match path.extension() {
        Some(ext) => {
            let format = ExportFormat::from_extension(ext.to_str()?)?;
            Some((path, format))
        }
        None => {
            // A bare directory has nothing to name the file after
            path.file_name()?;
            let mut with_ext = path.into_os_string();
            with_ext.push(".");
            with_ext.push(filter.extension());
            Some((PathBuf::from(with_ext), filter))
        }
    }
}

/// Default file name offered by the save prompt.
pub fn default_file_name(format: ExportFormat, now: DateTime<Local>) -> String {
    format!("lissajous_{}.{}", now.format("%Y%m%d_%H%M%S"), format.extension())
}

/// Encode `image` as `format`. JPEG has no alpha channel, so it gets RGB.
pub fn encode(image: &DynamicImage, format: ExportFormat) -> Result<Vec<u8>, ExportError> {
    let mut bytes = Cursor::new(Vec::new());
    match format {
        ExportFormat::Png => image.write_to(&mut bytes, format.image_format())?,
        ExportFormat::Jpeg => {
            DynamicImage::ImageRgb8(image.to_rgb8()).write_to(&mut bytes, format.image_format())?
        }
    }
    Ok(bytes.into_inner())
}

/// Encode and write `image` to `path`.
pub fn save_image(image: &DynamicImage, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
    let bytes = encode(image, format)?;

    let tmp = temp_sibling(path);
    let io_err = |source| ExportError::Io {
        path: path.display().to_string(),
        source,
    };

    if let Err(e) = fs::write(&tmp, &bytes) {
        let _ = fs::remove_file(&tmp);
        return Err(io_err(e));
    }
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(io_err(e));
    }

    log::info!("wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.part", name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use image::{GenericImageView, Rgba, RgbaImage};

    fn sample_image() -> DynamicImage {
        let mut img = RgbaImage::from_pixel(16, 12, Rgba([255, 255, 255, 255]));
        img.put_pixel(3, 4, Rgba([25, 25, 112, 255]));
        DynamicImage::ImageRgba8(img)
    }

    #[test]
    fn extension_decides_format() {
        let (path, fmt) = resolve_target("out.png", ExportFormat::Jpeg).unwrap();
        assert_eq!(path, PathBuf::from("out.png"));
        assert_eq!(fmt, ExportFormat::Png);

        let (_, fmt) = resolve_target("out.JPEG", ExportFormat::Png).unwrap();
        assert_eq!(fmt, ExportFormat::Jpeg);

        let (_, fmt) = resolve_target("dir/out.jpg", ExportFormat::Png).unwrap();
        assert_eq!(fmt, ExportFormat::Jpeg);
    }

    #[test]
    fn missing_extension_uses_filter() {
        let (path, fmt) = resolve_target("figure", ExportFormat::Jpeg).unwrap();
        assert_eq!(path, PathBuf::from("figure.jpg"));
        assert_eq!(fmt, ExportFormat::Jpeg);

        let (path, _) = resolve_target("  figure  ", ExportFormat::Png).unwrap();
        assert_eq!(path, PathBuf::from("figure.png"));
    }

    #[test]
    fn blank_or_unsupported_is_nothing() {
        assert_eq!(resolve_target("", ExportFormat::Png), None);
        assert_eq!(resolve_target("   ", ExportFormat::Png), None);
        assert_eq!(resolve_target("figure.bmp", ExportFormat::Png), None);
        assert_eq!(resolve_target("figure.svg", ExportFormat::Jpeg), None);
        assert_eq!(resolve_target("..", ExportFormat::Png), None);
    }

    #[test]
    fn directory_name_is_nothing() {
        assert_eq!(resolve_target("out/", ExportFormat::Png), None);
        assert_eq!(resolve_target("out/  ", ExportFormat::Jpeg), None);
        assert_eq!(resolve_target("/", ExportFormat::Png), None);
        #[cfg(windows)]
        assert_eq!(resolve_target("out\\", ExportFormat::Png), None);
    }

    #[test]
    fn default_name_has_timestamp() {
        let now = Local.with_ymd_and_hms(2026, 10, 19, 14, 28, 0).unwrap();
        assert_eq!(
            default_file_name(ExportFormat::Png, now),
            "lissajous_20261019_142800.png"
        );
        assert!(default_file_name(ExportFormat::Jpeg, now).ends_with(".jpg"));
    }

    #[test]
    fn saves_decodable_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("figure.png");
        save_image(&sample_image(), &path, ExportFormat::Png).unwrap();

        let back = image::open(&path).unwrap();
        assert_eq!(back.dimensions(), (16, 12));
        assert_eq!(back.to_rgba8().get_pixel(3, 4).0, [25, 25, 112, 255]);
    }

    #[test]
    fn saves_decodable_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("figure.jpg");
        save_image(&sample_image(), &path, ExportFormat::Jpeg).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]); // JPEG SOI marker
        let back = image::open(&path).unwrap();
        assert_eq!(back.dimensions(), (16, 12));
    }

    #[test]
    fn no_temp_file_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("figure.png");
        save_image(&sample_image(), &path, ExportFormat::Png).unwrap();

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("figure.png")]);
    }

    #[test]
    fn unwritable_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("figure.png");
        let err = save_image(&sample_image(), &path, ExportFormat::Png).unwrap_err();
        assert!(matches!(err, ExportError::Io { .. }));
        assert!(!path.exists());
    }
}
