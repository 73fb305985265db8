//! Input Validation & Feature Preparation for NEO Hazard Prediction
//!
//! This library guards the prediction boundary of a near-Earth-object
//! hazard classifier: raw CSV text (or JSON row-objects) goes in, and a
//! clean, fully populated, deduplicated feature table in the exact order
//! the classifier expects comes out, or a typed, caller-facing error.
//!
//! # Overview
//!
//! The pipeline runs these stages, in order:
//!
//! 1. **Ingestion**: parse CSV text, trim column names
//! 2. **Column validation**: heal up to two absent required columns
//!    with default means; reject three or more
//! 3. **Row validation**: reject any dataset with a row carrying more
//!    than two missing values; fill remaining gaps with default means
//! 4. **Type validation**: strict or coercing numeric checks
//! 5. **Row-count check and deduplication**
//! 6. **Feature selection**: project to the six required features
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use neo_validation::{ValidationPipeline, PipelineConfig, CoercionMode};
//!
//! // Production defaults: strict type checking, six-feature schema
//! let pipeline = ValidationPipeline::neo_hazard();
//! let outcome = pipeline.validate_csv(csv_text)?;
//! println!("{} clean rows", outcome.data.height());
//!
//! // Coercing variant
//! let config = PipelineConfig::builder()
//!     .coercion_mode(CoercionMode::Coerce)
//!     .build()?;
//! let pipeline = ValidationPipeline::new(
//!     neo_validation::FeatureSchema::neo_hazard(),
//!     config,
//! );
//! ```

pub mod config;
pub mod error;
pub mod ingest;
pub mod pipeline;
pub mod record;
pub mod report;
pub mod schema;
pub mod select;
pub mod utils;
pub mod validators;

// Re-exports for convenient access
pub use config::{CoercionMode, ConfigValidationError, PipelineConfig, PipelineConfigBuilder};
pub use error::{Result as ValidationResult, ValidationError};
pub use pipeline::{ValidationOutcome, ValidationPipeline};
pub use record::{Record, dataframe_to_records, records_to_dataframe};
pub use report::ValidationReport;
pub use schema::{FeatureSchema, FeatureSpec, LABEL_COLUMN};
