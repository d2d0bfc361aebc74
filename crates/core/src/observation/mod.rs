//! Observation run summarization engine.
//!
//! A run is one field-sampling session producing many discrete spots of
//! raw measurements. The template attached to the run defines which
//! data keys exist, which of two pipelines applies (quantitative
//! "calculated" vs. qualitative "observational") and which derived
//! metrics to compute. This module tree is the pure computation core:
//! given the loaded context it always produces the same summary and
//! never mutates spot data.

pub mod biosecurity;
pub mod categorical;
pub mod confidence;
pub mod context;
pub mod derived;
pub mod dispatch;
pub mod field_value;
pub mod flags;
pub mod labels;
pub mod notes;
pub mod numeric;
pub mod service;
pub mod severity;
pub mod stats;
pub mod summary;
pub mod template_config;

pub use service::{summarize_run, ObservationStore};
pub use summary::RunSummary;
pub use template_config::{SummaryMode, TemplateConfig};
