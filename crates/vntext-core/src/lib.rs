//! # vntext-core
//!
//! Core types, traits, and error definitions for the vntext engine.
//!
//! This crate provides the foundational abstractions used across the other
//! crates in the workspace, including:
//!
//! - Common data types (`CleanedText`, `StageTrace`, `ProcessOptions`)
//! - Trait definitions for pipeline components and external collaborators
//! - Unified error handling via `NormError`
//! - Dictionary resource configuration

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use config::DictionaryConfig;
pub use error::{NormError, NormResult};
pub use traits::{PassthroughSentenceNormalizer, SentenceNormalizer, TextNormalizer};
pub use types::{CleanedText, ProcessOptions, StageTrace};
