use gcicon_core::compositor::crop_upscale_icon;
use gcicon_core::palette::rotate270_flip_into;
use gcicon_core::rle::{decompress, decompress_truncating, decompress_until};
use gcicon_core::{
    DecodeError, ICON_SIZE, ICON_WINDOW_LEN, IconSource, IndexedBitmap, RgbaImage,
    UPSCALED_ICON_SIZE,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn transform_is_a_bijection(width in 1usize..=48, height in 1usize..=48) {
        let src: Vec<u32> = (0..(width * height) as u32).collect();
        let mut out = RgbaImage::filled(width, height, u32::MAX);
        rotate270_flip_into(&src, &mut out).expect("sizes match");

        let mut seen = vec![false; width * height];
        for &px in out.pixels() {
            prop_assert!(px != u32::MAX, "cell left unwritten");
            prop_assert!(!seen[px as usize], "source pixel {} used twice", px);
            seen[px as usize] = true;
        }
        prop_assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn rle_never_writes_past_capacity(
        input in prop::collection::vec(any::<u8>(), 0..512),
        capacity in 0usize..2048,
    ) {
        let mut out = vec![0u8; capacity];
        match decompress(&input, &mut out) {
            Ok(written) => prop_assert!(written <= capacity),
            Err(DecodeError::CodecOverrun { capacity: cap, required }) => {
                prop_assert_eq!(cap, capacity);
                prop_assert!(required > capacity);
            }
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }

    #[test]
    fn trailing_data_never_affects_a_complete_icon(
        value in any::<u8>(),
        tail in prop::collection::vec(any::<u8>(), 0..ICON_WINDOW_LEN),
    ) {
        let icon_len = IndexedBitmap::packed_len(ICON_SIZE, ICON_SIZE);
        let mut stream = vec![0xC0, 0x00, 0x04, value];
        stream.extend_from_slice(&tail);

        let mut out = vec![0u8; ICON_WINDOW_LEN];
        prop_assert_eq!(decompress_until(&stream, &mut out, icon_len), Ok(icon_len));
        prop_assert!(out[..icon_len].iter().all(|&b| b == value));
        prop_assert!(out[icon_len..].iter().all(|&b| b == 0));
    }

    #[test]
    fn truncating_agrees_with_strict_when_it_fits(
        input in prop::collection::vec(any::<u8>(), 0..64),
    ) {
        // At most 16 full-length 16-bit runs plus a cut-off tail.
        let mut strict = vec![0u8; 17 * 0xFFFF];
        let written = decompress(&input, &mut strict).expect("fits the worst case");

        let mut lenient = vec![0u8; written];
        prop_assert_eq!(decompress_truncating(&input, &mut lenient), written);
        prop_assert_eq!(&lenient[..], &strict[..written]);
    }

    #[test]
    fn upscale_maps_pixels_to_blocks(
        pixels in prop::collection::vec(any::<u32>(), ICON_SIZE * ICON_SIZE),
    ) {
        let src = RgbaImage::from_pixels(ICON_SIZE, ICON_SIZE, pixels).expect("64x64");
        let mut dest = vec![0u32; UPSCALED_ICON_SIZE * UPSCALED_ICON_SIZE];
        crop_upscale_icon(&src, &mut dest, true, IconSource::Standalone).expect("composites");

        for (i, &px) in dest.iter().enumerate() {
            let (row, col) = (i / UPSCALED_ICON_SIZE, i % UPSCALED_ICON_SIZE);
            prop_assert_eq!(Some(px), src.pixel(row / 2, col / 2));
        }
    }
}
