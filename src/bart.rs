use std::sync::Mutex;

use rust_bert::bart::{
    BartConfigResources, BartGenerator, BartMergesResources, BartModelResources,
    BartVocabResources,
};
use rust_bert::pipelines::common::ModelResource;
use rust_bert::pipelines::generation_utils::{GenerateConfig, GenerateOptions, LanguageGenerator};
use rust_bert::resources::RemoteResource;
use tch::Device;

use crate::error::{AppError, Result};
use crate::summarizer::{
    GenerationParams, SummaryBackend, DEFAULT_BEAM_COUNT, DEFAULT_LENGTH_PENALTY,
    DEFAULT_MAX_LENGTH, DEFAULT_MIN_LENGTH,
};

/// BART large model fine-tuned on CNN/DailyMail, loaded once at startup.
/// The generator is not `Sync`, so calls are serialized through a mutex;
/// generation itself is single-threaded either way.
pub struct BartBackend {
    generator: Mutex<BartGenerator>,
}

impl BartBackend {
    /// Downloads (or reuses cached) model weights and builds the beam
    /// search generator. Any failure here is fatal: the model capability
    /// is simply unavailable.
    pub fn load() -> Result<Self> {
        let generate_config = GenerateConfig {
            model_resource: ModelResource::Torch(Box::new(RemoteResource::from_pretrained(
                BartModelResources::BART_CNN,
            ))),
            config_resource: Box::new(RemoteResource::from_pretrained(
                BartConfigResources::BART_CNN,
            )),
            vocab_resource: Box::new(RemoteResource::from_pretrained(
                BartVocabResources::BART_CNN,
            )),
            merges_resource: Some(Box::new(RemoteResource::from_pretrained(
                BartMergesResources::BART_CNN,
            ))),
            min_length: DEFAULT_MIN_LENGTH,
            max_length: Some(DEFAULT_MAX_LENGTH),
            do_sample: false,
            early_stopping: true,
            num_beams: DEFAULT_BEAM_COUNT,
            length_penalty: DEFAULT_LENGTH_PENALTY,
            device: Device::cuda_if_available(),
            ..Default::default()
        };

        tracing::info!("loading BART CNN/DailyMail generator");
        let generator = BartGenerator::new(generate_config)
            .map_err(|e| AppError::Dependency(format!("failed to load BART model: {e}")))?;

        Ok(BartBackend {
            generator: Mutex::new(generator),
        })
    }
}

impl SummaryBackend for BartBackend {
    fn generate(&self, text: &str, params: &GenerationParams) -> Result<String> {
        let options = GenerateOptions {
            min_length: Some(params.min_length),
            max_length: Some(params.max_length),
            num_beams: Some(params.beam_count),
            length_penalty: Some(params.length_penalty),
            early_stopping: Some(params.early_stopping),
            ..Default::default()
        };

        let generator = self
            .generator
            .lock()
            .map_err(|_| AppError::Dependency("BART generator lock poisoned".to_string()))?;

        // Input longer than the model's position budget is truncated by
        // the generator's tokenizer, not rejected.
        let mut outputs = generator
            .generate(Some(&[text]), Some(options))
            .map_err(|e| AppError::Dependency(format!("BART generation failed: {e}")))?;

        let output = outputs
            .pop()
            .ok_or_else(|| AppError::Dependency("model returned no output".to_string()))?;

        Ok(output.text)
    }
}
