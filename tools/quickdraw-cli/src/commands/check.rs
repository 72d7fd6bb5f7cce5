//! Check that the classifier loads.

use quickdraw_classifier::ClassifierAdapter;
use quickdraw_common::config::AppConfig;

pub fn run(config: &AppConfig) -> anyhow::Result<()> {
    println!("Quickdraw Check");
    println!("{}", "=".repeat(50));
    println!("Model:  {}", config.model_path.display());
    println!("Labels: {}", config.labels_path.display());
    println!();

    let adapter = ClassifierAdapter::load(&config.model_path, &config.labels_path);
    match adapter.load_error() {
        None => {
            println!("[OK] Classifier loaded: {} categories", adapter.labels().len());
            let preview: Vec<&str> = adapter.labels().iter().take(5).collect();
            if !preview.is_empty() {
                println!("     first labels: {}", preview.join(", "));
            }
            println!();
            println!("Quickdraw is ready.");
            Ok(())
        }
        Some(reason) => {
            println!("[FAIL] Classifier disabled: {reason}");
            println!();
            println!("Rounds cannot start until the model and labels load.");
            anyhow::bail!("classifier not ready")
        }
    }
}
