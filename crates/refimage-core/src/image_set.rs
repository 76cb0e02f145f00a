//! Run-scoped registry of named images.

use image::DynamicImage;

use crate::error::LoadError;
use crate::provider::FileImageProvider;

struct Entry {
    provider: FileImageProvider,
    image: Option<DynamicImage>,
}

/// Ordered collection of image providers for one run.
///
/// Providers decode on first `provide` and the result is cached, so later
/// cycles fetch the image by name without touching the filesystem again.
/// Execution is single-threaded within a run; no locking.
#[derive(Default)]
pub struct ImageSet {
    entries: Vec<Entry>,
}

impl ImageSet {
    /// Create an empty image set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a provider. Registering a second provider under the same
    /// logical name is a loud error.
    pub fn register(&mut self, provider: FileImageProvider) -> Result<(), LoadError> {
        if self
            .entries
            .iter()
            .any(|e| e.provider.image_name() == provider.image_name())
        {
            return Err(LoadError::DuplicateImageName(
                provider.image_name().to_string(),
            ));
        }
        self.entries.push(Entry {
            provider,
            image: None,
        });
        Ok(())
    }

    /// Fetch the image registered under `image_name`, decoding it on first
    /// use.
    pub fn provide(&mut self, image_name: &str) -> Result<&DynamicImage, LoadError> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.provider.image_name() == image_name)
            .ok_or_else(|| LoadError::UnknownImageName(image_name.to_string()))?;
        match entry.image {
            Some(ref image) => Ok(image),
            None => {
                tracing::debug!("Decoding {:?} for {:?}", entry.provider.path(), image_name);
                let image = entry.provider.load()?;
                Ok(entry.image.insert(image))
            }
        }
    }

    /// The already-decoded image registered under `image_name`, if any.
    pub fn get(&self, image_name: &str) -> Option<&DynamicImage> {
        self.entries
            .iter()
            .find(|e| e.provider.image_name() == image_name)
            .and_then(|e| e.image.as_ref())
    }

    /// Logical names of every registered image, in registration order.
    pub fn image_names(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|e| e.provider.image_name())
            .collect()
    }

    /// Number of registered images.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_provider(dir: &std::path::Path, name: &str, file: &str) -> FileImageProvider {
        let image = image::RgbImage::from_pixel(2, 2, image::Rgb([1, 2, 3]));
        image.save(dir.join(file)).unwrap();
        FileImageProvider::new(name, dir, file)
    }

    #[test]
    fn test_register_and_provide() {
        let dir = tempfile::tempdir().unwrap();
        let mut set = ImageSet::new();
        set.register(png_provider(dir.path(), "Ref", "ref.png"))
            .unwrap();

        assert!(set.get("Ref").is_none());
        let image = set.provide("Ref").unwrap();
        assert_eq!(image.width(), 2);
        assert!(set.get("Ref").is_some());
    }

    #[test]
    fn test_provide_caches_across_calls() {
        let dir = tempfile::tempdir().unwrap();
        let mut set = ImageSet::new();
        set.register(png_provider(dir.path(), "Ref", "ref.png"))
            .unwrap();

        set.provide("Ref").unwrap();
        // The source file is gone, but the decoded image is cached.
        std::fs::remove_file(dir.path().join("ref.png")).unwrap();
        assert!(set.provide("Ref").is_ok());
    }

    #[test]
    fn test_duplicate_name_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut set = ImageSet::new();
        set.register(png_provider(dir.path(), "Ref", "a.png"))
            .unwrap();
        let err = set
            .register(FileImageProvider::new("Ref", dir.path(), "b.png"))
            .unwrap_err();
        assert!(matches!(err, LoadError::DuplicateImageName(_)));
    }

    #[test]
    fn test_unknown_name_is_rejected() {
        let mut set = ImageSet::new();
        let err = set.provide("Nope").unwrap_err();
        assert!(matches!(err, LoadError::UnknownImageName(_)));
    }

    #[test]
    fn test_image_names_preserve_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut set = ImageSet::new();
        set.register(png_provider(dir.path(), "B", "b.png")).unwrap();
        set.register(png_provider(dir.path(), "A", "a.png")).unwrap();
        assert_eq!(set.image_names(), vec!["B", "A"]);
    }
}
