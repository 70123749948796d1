pub mod cancellation;
pub mod recorder;
