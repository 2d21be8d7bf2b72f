//! Domain models for the Crop Stress Advisory Platform

mod advisory;
mod crop;
mod report;
mod stress;
mod symptom;
mod weather;

pub use advisory::*;
pub use crop::*;
pub use report::*;
pub use stress::*;
pub use symptom::*;
pub use weather::*;
