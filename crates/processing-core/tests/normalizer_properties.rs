use image::{Rgb, RgbImage};
use proptest::prelude::*;
use quickdraw_common::config::BlurMode;
use quickdraw_processing_core::Normalizer;

// --- STRATEGIES ---

prop_compose! {
    fn arb_background()(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) -> Rgb<u8> {
        Rgb([r, g, b])
    }
}

prop_compose! {
    fn arb_sketch()(
        size in 28u32..160,
        strokes in proptest::collection::vec(
            (0.0..1.0f64, 0.0..1.0f64, 0.0..0.5f64, 0.0..0.5f64, any::<u8>()),
            0..12
        )
    ) -> RgbImage {
        let mut raster = RgbImage::from_pixel(size, size, Rgb([255, 255, 255]));
        let extent = size as f64;
        for (x, y, w, h, ink) in strokes {
            let x0 = (x * extent) as u32;
            let y0 = (y * extent) as u32;
            let x1 = ((x + w) * extent).min(extent) as u32;
            let y1 = ((y + h) * extent).min(extent) as u32;
            for py in y0..y1 {
                for px in x0..x1 {
                    raster.put_pixel(px, py, Rgb([ink, ink / 2, 0]));
                }
            }
        }
        raster
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn output_shape_and_range_hold_for_any_raster(raster in arb_sketch()) {
        let normalizer = Normalizer::with_defaults();
        for mode in [BlurMode::Auto, BlurMode::Always, BlurMode::Never] {
            let tensor = normalizer.normalize_with(&raster, mode);
            prop_assert_eq!(tensor.shape(), [1, 28, 28, 1]);
            prop_assert_eq!(tensor.as_slice().len(), 28 * 28);
            prop_assert!(tensor.as_slice().iter().all(|v| (0.0..=1.0).contains(v)));
        }
    }

    #[test]
    fn uniform_raster_is_treated_as_blank(color in arb_background(), size in 1u32..120) {
        let raster = RgbImage::from_pixel(size, size, color);
        let normalizer = Normalizer::with_defaults();

        let auto = normalizer.normalize(&raster);
        prop_assert!(!auto.blurred());
        prop_assert!(auto.source_std_dev() < normalizer.config().blank_std_threshold);
        prop_assert!(auto.stats().std_dev * 255.0 < normalizer.config().blank_std_threshold);

        let forced = normalizer.normalize_with(&raster, BlurMode::Always);
        prop_assert!(forced.blurred());
    }

    #[test]
    fn auto_mode_matches_one_of_the_forced_paths(raster in arb_sketch()) {
        let normalizer = Normalizer::with_defaults();
        let auto = normalizer.normalize(&raster);
        let expected = if auto.blurred() {
            normalizer.normalize_with(&raster, BlurMode::Always)
        } else {
            normalizer.normalize_with(&raster, BlurMode::Never)
        };
        prop_assert_eq!(auto.as_slice(), expected.as_slice());
        prop_assert_eq!(
            auto.blurred(),
            auto.source_std_dev() >= normalizer.config().blank_std_threshold
        );
    }
}
