//! Normalize command implementation.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use vntext_core::{
    DictionaryConfig, PassthroughSentenceNormalizer, ProcessOptions, TextNormalizer,
};
use vntext_pipeline::Pipeline;

/// Options for the normalize command.
#[derive(Debug)]
pub struct NormalizeOptions {
    pub input: String,
    pub strip_diacritics: bool,
    pub debug_stages: bool,
    pub teencode: Option<PathBuf>,
    pub vocabulary: Vec<PathBuf>,
}

/// Run the normalize command.
pub fn run(options: NormalizeOptions) -> Result<()> {
    let mut config = DictionaryConfig::empty();
    if let Some(path) = options.teencode {
        config = config.with_teencode(path);
    }
    for path in options.vocabulary {
        config = config.with_vocabulary(path);
    }

    let pipeline = Pipeline::from_config(&config, Arc::new(PassthroughSentenceNormalizer));
    let result = pipeline.normalize(
        &options.input,
        ProcessOptions::new()
            .with_strip_diacritics(options.strip_diacritics)
            .with_trace_stages(options.debug_stages),
    )?;

    println!("Input:      {}", options.input);
    println!("Normalized: {}", result.text);

    if !result.trace.is_empty() {
        println!("Stages:");
        for record in &result.trace {
            println!("  {:<30} {}", record.stage, record.output);
        }
    }

    Ok(())
}
