//! Classify an image file as if it were the canvas.

use std::path::PathBuf;

use quickdraw_classifier::ClassifierAdapter;
use quickdraw_common::config::{AppConfig, BlurMode};
use quickdraw_processing_core::Normalizer;
use quickdraw_sketch_model::tensor::MODEL_INPUT_SIZE;

pub fn run(config: &AppConfig, image: PathBuf, preview: bool, blur: BlurMode) -> anyhow::Result<()> {
    let adapter = ClassifierAdapter::try_load(&config.model_path, &config.labels_path)
        .map_err(|e| anyhow::anyhow!("Failed to load classifier: {e}"))?;

    let raster = image::open(&image)
        .map_err(|e| anyhow::anyhow!("Failed to read image {}: {e}", image.display()))?
        .to_rgb8();
    println!(
        "Image: {} ({}x{})",
        image.display(),
        raster.width(),
        raster.height()
    );

    let mut normalizer = Normalizer::new(config.normalizer);
    normalizer.set_diagnostics(config.inference.diagnostics);
    let tensor = normalizer.normalize_with(&raster, blur);
    let stats = tensor.stats();
    println!(
        "  grayscale std {:.2}, blur {}, tensor mean {:.3}",
        tensor.source_std_dev(),
        if tensor.blurred() { "applied" } else { "skipped" },
        stats.mean
    );

    if preview {
        println!();
        print!("{}", tensor.ascii_preview(MODEL_INPUT_SIZE));
        println!();
    }

    let prediction = adapter.predict(&tensor);
    match prediction.label.as_deref() {
        Some(label) => println!(
            "Prediction: {label} ({:.1}%)",
            prediction.confidence * 100.0
        ),
        None => println!("Prediction: none"),
    }
    Ok(())
}
