use std::fs;

use hazard_report_core::codec::keys;
use hazard_report_core::pipeline::submit_report;
use hazard_report_core::{
    AssetRef, AssetStager, CodecError, FieldValue, HazardPhoto, HazardReport, InMemoryRecordStore,
    PhotoError, PhotoQuality, RecordCodec, RecordTransport,
};
use image::{DynamicImage, Rgb, RgbImage};
use tempfile::TempDir;

fn sample_photo() -> HazardPhoto {
    let img = RgbImage::from_fn(24, 16, |x, y| Rgb([(x * 10) as u8, (y * 15) as u8, 90]));
    HazardPhoto::new(DynamicImage::ImageRgb8(img))
}

#[test]
fn test_photo_survives_store_round_trip() {
    let dir = TempDir::new().unwrap();
    let codec = RecordCodec::new(AssetStager::in_dir(dir.path()), PhotoQuality::DEFAULT);
    let store = InMemoryRecordStore::new();
    let report = HazardReport::new("Sinkhole", None, Some(sample_photo()), true, false);

    let converted = submit_report(&codec, &store, &report).unwrap();
    assert!(!converted.has_photo_issue());

    let photo = converted.value.photo.expect("photo restored");
    assert_eq!(photo.dimensions(), (24, 16));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_unwritable_scratch_dir_keeps_scalars() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("does-not-exist");
    let codec = RecordCodec::new(AssetStager::in_dir(&missing), PhotoQuality::DEFAULT);
    let report = HazardReport::new("Broken glass", None, Some(sample_photo()), false, true);

    let converted = codec.encode_for_submission(&report).unwrap();
    assert!(matches!(converted.photo_issue, Some(PhotoError::Staging { .. })));

    let record = converted.value;
    assert!(!record.contains(keys::PHOTO));
    assert_eq!(record.get(keys::DESCRIPTION), Some(&FieldValue::from("Broken glass")));
    assert_eq!(record.get(keys::IS_RESOLVED), Some(&FieldValue::Int64(1)));
}

#[test]
fn test_removed_asset_file_decodes_without_photo() {
    let dir = TempDir::new().unwrap();
    let codec = RecordCodec::new(AssetStager::in_dir(dir.path()), PhotoQuality::DEFAULT);
    let store = InMemoryRecordStore::new();
    let report = HazardReport::new("Gas smell", None, Some(sample_photo()), true, false);

    let saved = store
        .submit(codec.encode_for_submission(&report).unwrap().value)
        .unwrap();
    for entry in fs::read_dir(dir.path()).unwrap() {
        fs::remove_file(entry.unwrap().path()).unwrap();
    }

    let converted = codec.decode_from_remote(&saved).unwrap();
    assert!(matches!(
        converted.photo_issue,
        Some(PhotoError::AssetUnavailable { .. })
    ));
    assert!(converted.value.photo.is_none());
    assert_eq!(converted.value.description, "Gas smell");
    assert!(converted.value.is_synced());
}

#[test]
fn test_unlocalized_asset_is_a_photo_issue() {
    let codec = RecordCodec::default();
    let store = InMemoryRecordStore::new();
    let report = HazardReport::new("Fallen power line", None, None, true, false);

    let mut saved = store
        .submit(codec.encode_for_submission(&report).unwrap().value)
        .unwrap();
    saved.set(keys::PHOTO, AssetRef::not_localized());

    let converted = codec.decode_from_remote(&saved).unwrap();
    assert!(matches!(converted.photo_issue, Some(PhotoError::NotLocalized)));
}

#[test]
fn test_garbage_asset_bytes_are_a_photo_issue() {
    let dir = TempDir::new().unwrap();
    let bogus = dir.path().join("bogus.jpg");
    fs::write(&bogus, b"definitely not a jpeg").unwrap();

    let codec = RecordCodec::new(AssetStager::in_dir(dir.path()), PhotoQuality::DEFAULT);
    let store = InMemoryRecordStore::new();
    let report = HazardReport::new("Oil spill", None, None, false, false);
    let mut saved = store
        .submit(codec.encode_for_submission(&report).unwrap().value)
        .unwrap();
    saved.set(keys::PHOTO, AssetRef::local(&bogus));

    let converted = codec.decode_from_remote(&saved).unwrap();
    assert!(matches!(converted.photo_issue, Some(PhotoError::ImageDecode(_))));
}

#[test]
fn test_mistyped_description_is_fatal_even_with_photo() {
    let dir = TempDir::new().unwrap();
    let codec = RecordCodec::new(AssetStager::in_dir(dir.path()), PhotoQuality::DEFAULT);
    let store = InMemoryRecordStore::new();
    let report = HazardReport::new("Ice", None, Some(sample_photo()), false, false);

    let mut saved = store
        .submit(codec.encode_for_submission(&report).unwrap().value)
        .unwrap();
    saved.set(keys::DESCRIPTION, FieldValue::Int64(3));

    let err = codec.decode_from_remote(&saved).unwrap_err();
    assert!(matches!(err, CodecError::FieldType { field: "hazardDescription", .. }));
}
