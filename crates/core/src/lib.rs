//! Pure domain logic for the vinea platform.
//!
//! The heart of this crate is the observation run summarization engine
//! (see [`observation`]): it turns a completed field-sampling run into
//! a structured summary document without touching the database. All
//! storage access goes through the injected
//! [`observation::service::ObservationStore`] trait.

pub mod error;
pub mod observation;
pub mod types;
