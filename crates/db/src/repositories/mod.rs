//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&PgPool` as the first argument.

pub mod block_repo;
pub mod observation_run_repo;
pub mod spot_repo;

pub use block_repo::BlockRepo;
pub use observation_run_repo::ObservationRunRepo;
pub use spot_repo::SpotRepo;
