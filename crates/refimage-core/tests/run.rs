//! End-to-end: configure images, run the loader, check what the host sees.

use std::path::Path;

use refimage_core::{
    FolderChoice, ImageEntry, ImageSet, LoaderConfig, Measurements, RefimageError, RunContext,
    SingleImageLoader, IMAGE,
};

fn write_png(dir: &Path, name: &str, seed: u8) {
    let image = image::RgbImage::from_fn(8, 8, |x, y| {
        image::Rgb([seed, (x * 16) as u8, (y * 16) as u8])
    });
    image.save(dir.join(name)).unwrap();
}

fn is_lower_hex_32(s: &str) -> bool {
    s.len() == 32
        && s.chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}

#[test]
fn run_records_measurements_and_registers_image() {
    let input = tempfile::tempdir().unwrap();
    write_png(input.path(), "img.png", 7);

    let config = LoaderConfig {
        folder: FolderChoice::DefaultInput,
        custom_path: ".".to_string(),
        entries: vec![ImageEntry::new("img.png", "OrigBlue")],
    };
    let ctx = RunContext::new(input.path(), input.path());

    let loader = SingleImageLoader::new(config);
    let mut image_set = ImageSet::new();
    let mut measurements = Measurements::new();
    let summary = loader.run(&ctx, &mut image_set, &mut measurements).unwrap();

    assert_eq!(measurements.get(IMAGE, "FileName_OrigBlue"), Some("img.png"));
    assert_eq!(
        measurements.get(IMAGE, "PathName_OrigBlue"),
        Some(input.path().display().to_string().as_str())
    );
    let digest = measurements.get(IMAGE, "MD5Digest_OrigBlue").unwrap();
    assert!(is_lower_hex_32(digest), "bad digest {digest:?}");

    let image = image_set.get("OrigBlue").unwrap();
    assert_eq!((image.width(), image.height()), (8, 8));

    // Header row plus one row per image.
    assert_eq!(summary.rows.len(), 2);
    assert_eq!(summary.rows[0], ("Image name".to_string(), "File".to_string()));
    assert_eq!(
        summary.rows[1],
        ("OrigBlue".to_string(), "img.png".to_string())
    );
}

#[test]
fn identical_pixel_content_yields_identical_digest() {
    let input = tempfile::tempdir().unwrap();
    write_png(input.path(), "a.png", 42);
    write_png(input.path(), "b.png", 42);
    write_png(input.path(), "c.png", 43);

    let config = LoaderConfig {
        folder: FolderChoice::DefaultInput,
        custom_path: ".".to_string(),
        entries: vec![
            ImageEntry::new("a.png", "A"),
            ImageEntry::new("b.png", "B"),
            ImageEntry::new("c.png", "C"),
        ],
    };
    let ctx = RunContext::new(input.path(), input.path());

    let loader = SingleImageLoader::new(config);
    let mut image_set = ImageSet::new();
    let mut measurements = Measurements::new();
    loader.run(&ctx, &mut image_set, &mut measurements).unwrap();

    let a = measurements.get(IMAGE, "MD5Digest_A").unwrap();
    let b = measurements.get(IMAGE, "MD5Digest_B").unwrap();
    let c = measurements.get(IMAGE, "MD5Digest_C").unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn metadata_folder_and_filename_resolution_end_to_end() {
    let input = tempfile::tempdir().unwrap();
    let plate_dir = input.path().join("P01");
    std::fs::create_dir(&plate_dir).unwrap();
    write_png(&plate_dir, "illum_P01.png", 9);

    let config = LoaderConfig {
        folder: FolderChoice::CustomWithMetadata,
        custom_path: "./\\g<Plate>".to_string(),
        entries: vec![ImageEntry::new("illum_\\g<Plate>.png", "Illum")],
    };
    let ctx = RunContext::new(input.path(), input.path()).with_metadata("Plate", "P01");

    let loader = SingleImageLoader::new(config);
    let mut image_set = ImageSet::new();
    let mut measurements = Measurements::new();
    loader.run(&ctx, &mut image_set, &mut measurements).unwrap();

    assert_eq!(
        measurements.get(IMAGE, "FileName_Illum"),
        Some("illum_P01.png")
    );
    assert_eq!(
        measurements.get(IMAGE, "PathName_Illum"),
        Some(plate_dir.display().to_string().as_str())
    );
    assert!(image_set.get("Illum").is_some());
}

#[test]
fn missing_file_aborts_the_run() {
    let input = tempfile::tempdir().unwrap();
    write_png(input.path(), "present.png", 1);

    let config = LoaderConfig {
        folder: FolderChoice::DefaultInput,
        custom_path: ".".to_string(),
        entries: vec![
            ImageEntry::new("present.png", "Present"),
            ImageEntry::new("absent.png", "Absent"),
        ],
    };
    let ctx = RunContext::new(input.path(), input.path());

    let loader = SingleImageLoader::new(config);
    let mut image_set = ImageSet::new();
    let mut measurements = Measurements::new();
    let err = loader
        .run(&ctx, &mut image_set, &mut measurements)
        .unwrap_err();
    assert!(matches!(err, RefimageError::Load(_)));

    // The first image made it through before the abort.
    assert!(measurements.get(IMAGE, "MD5Digest_Present").is_some());
    assert!(measurements.get(IMAGE, "MD5Digest_Absent").is_none());
}

#[test]
fn measurement_columns_match_what_run_writes() {
    let input = tempfile::tempdir().unwrap();
    write_png(input.path(), "img.png", 5);

    let config = LoaderConfig {
        folder: FolderChoice::DefaultInput,
        custom_path: ".".to_string(),
        entries: vec![ImageEntry::new("img.png", "Ref")],
    };
    let ctx = RunContext::new(input.path(), input.path());

    let loader = SingleImageLoader::new(config);
    let columns = loader.measurement_columns();

    let mut image_set = ImageSet::new();
    let mut measurements = Measurements::new();
    loader.run(&ctx, &mut image_set, &mut measurements).unwrap();

    assert_eq!(columns.len(), measurements.len());
    for column in &columns {
        assert!(
            measurements.get(&column.entity, &column.feature).is_some(),
            "no value recorded for declared column {:?}",
            column.feature
        );
    }
}
