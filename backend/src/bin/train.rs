use std::fs;

use backend::sentiment::model::SentimentModel;
use backend::sentiment::train::{TrainOptions, fit, training_corpus};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let (texts, labels) = training_corpus();
    log::info!("Training sentiment classifier on {} examples", texts.len());
    let artifact = fit(&texts, &labels, &TrainOptions::default());

    fs::create_dir_all("models")?;
    let model_path = "models/sentiment_model.json";
    fs::write(model_path, serde_json::to_string_pretty(&artifact)?)?;
    log::info!("Model saved to {}", model_path);

    // Smoke predictions on the freshly written artifact.
    let model = SentimentModel::load(model_path)?;
    for text in ["This is great!", "This is terrible!"] {
        let prediction = model.predict(text);
        println!(
            "'{}' -> {} (confidence: {:.2})",
            text, prediction.label, prediction.confidence
        );
    }
    Ok(())
}
