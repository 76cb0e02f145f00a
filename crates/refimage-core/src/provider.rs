//! File-backed image providers.

use image::DynamicImage;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use crate::error::LoadError;

/// A handle that knows where one logical image lives on disk and how to
/// decode it.
///
/// Providers are cheap to construct; decoding happens when the image set
/// asks for pixels.
#[derive(Debug, Clone)]
pub struct FileImageProvider {
    image_name: String,
    directory: PathBuf,
    file_name: String,
}

impl FileImageProvider {
    /// Create a provider for `file_name` under `directory`, registered as
    /// `image_name`.
    pub fn new(
        image_name: impl Into<String>,
        directory: impl Into<PathBuf>,
        file_name: impl Into<String>,
    ) -> Self {
        Self {
            image_name: image_name.into(),
            directory: directory.into(),
            file_name: file_name.into(),
        }
    }

    /// The logical name downstream stages fetch this image by.
    pub fn image_name(&self) -> &str {
        &self.image_name
    }

    /// The filename portion, without the directory.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// The directory the file is loaded from.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// The full path to the file.
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }

    /// Read and decode the image from disk.
    ///
    /// Fatal on a missing or undecodable file; there is no retry and no
    /// partial result.
    pub fn load(&self) -> Result<DynamicImage, LoadError> {
        let path = self.path();
        if !path.is_file() {
            return Err(LoadError::FileNotFound(path));
        }
        let bytes = std::fs::read(&path).map_err(|e| LoadError::Read {
            path: path.clone(),
            message: e.to_string(),
        })?;
        decode_bytes(bytes, &path)
    }
}

/// Decode image bytes, guessing the format from content before falling back
/// to the file extension.
fn decode_bytes(bytes: Vec<u8>, path: &Path) -> Result<DynamicImage, LoadError> {
    let mut reader = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| LoadError::Decode {
            path: path.to_path_buf(),
            message: format!("Cannot detect image format: {}", e),
        })?;
    if reader.format().is_none() {
        if let Ok(format) = image::ImageFormat::from_path(path) {
            reader.set_format(format);
        }
    }
    reader.decode().map_err(|e| LoadError::Decode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
