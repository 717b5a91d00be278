//! Malformed-input tests against encoded TAL files.

use tinyalpha_codec::{ErrorKind, Pixel, Raster, TalError, decode, encode, inspect, is_tal};

/// 6x2, two colors and a transparent gap. Palette: [red, green].
fn sample() -> Vec<u8> {
    let red = Pixel::new(0xFF0000FF);
    let green = Pixel::new(0x00FF00FF);
    let pixels = vec![
        red, red, red, Pixel::TRANSPARENT, Pixel::TRANSPARENT, green, //
        green, green, red, red, red, red,
    ];
    encode(&Raster::new(6, 2, pixels).unwrap()).expect("encode failed")
}

/// Offset of the streak count: prefix, two palette entries, three lengths.
const STREAK_COUNT_AT: usize = 13 + 8 + 12;

#[test]
fn test_sample_is_valid() {
    let bytes = sample();
    assert!(is_tal(&bytes));
    assert_eq!(decode(&bytes).unwrap().pixels().len(), 12);
    // red x3, transparent x2, green x3, red x4
    assert_eq!(inspect(&bytes).unwrap().streak_count, 4);
}

#[test]
fn test_short_buffers() {
    for len in [0, 1, 4, 18] {
        let bytes = sample();
        let err = decode(&bytes[..len]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ImageSize, "length {}", len);
    }
}

#[test]
fn test_truncated_after_minimum() {
    let bytes = sample();
    for len in [19, 24, STREAK_COUNT_AT + 2] {
        let err = decode(&bytes[..len]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CorruptStream, "length {}", len);
    }
}

#[test]
fn test_wrong_signature() {
    let mut bytes = sample();
    bytes[0] = 0x07;
    let err = decode(&bytes).unwrap_err();
    match err {
        TalError::UnrecognizedSignature { expected, found } => {
            assert_eq!(expected, vec![0x08, 0x09, 0x03]);
            assert_eq!(found, vec![0x07, 0x09, 0x03]);
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_wrong_version() {
    let mut bytes = sample();
    bytes[3] = 0x00;
    assert_eq!(decode(&bytes).unwrap_err().kind(), ErrorKind::VersionMismatch);
}

#[test]
fn test_oversized_height() {
    let mut bytes = sample();
    bytes[8..12].copy_from_slice(&9000u32.to_be_bytes());
    assert_eq!(decode(&bytes).unwrap_err().kind(), ErrorKind::ImageSize);
}

#[test]
fn test_dimensions_disagree_with_streaks() {
    let mut bytes = sample();
    // 6x3 needs 18 pixels, the streaks describe 12.
    bytes[8..12].copy_from_slice(&3u32.to_be_bytes());
    assert_eq!(decode(&bytes).unwrap_err().kind(), ErrorKind::CorruptStream);

    let mut bytes = sample();
    // 6x1 holds 6 pixels, the streaks describe 12.
    bytes[8..12].copy_from_slice(&1u32.to_be_bytes());
    assert_eq!(decode(&bytes).unwrap_err().kind(), ErrorKind::CorruptStream);
}

#[test]
fn test_streak_count_too_small() {
    let mut bytes = sample();
    bytes[STREAK_COUNT_AT..STREAK_COUNT_AT + 4].copy_from_slice(&3u32.to_be_bytes());
    assert_eq!(decode(&bytes).unwrap_err().kind(), ErrorKind::CorruptStream);
}

#[test]
fn test_truncated_body() {
    let bytes = sample();
    let err = decode(&bytes[..bytes.len() - 2]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfRange);
}

#[test]
fn test_palette_entry_out_of_range() {
    let mut bytes = sample();
    // Drop green from the palette: shift everything after it left by 4.
    bytes[12] = 1;
    bytes.drain(17..21);
    let err = decode(&bytes).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CorruptStream);
}

#[test]
fn test_inspect_does_not_need_valid_body() {
    let bytes = sample();
    let truncated = &bytes[..bytes.len() - 1];
    let info = inspect(truncated).unwrap();
    assert_eq!((info.width, info.height), (6, 2));
    assert_eq!(info.file_size, bytes.len() - 1);
}
