//! Business logic services for the Crop Stress Advisory Platform

pub mod advisory;
pub mod augmentation;
pub mod classifier;
pub mod report_store;

pub use advisory::AdvisoryService;
pub use augmentation::AugmentationChain;
pub use classifier::load_classifier;
pub use report_store::{InMemoryReportStore, PgReportStore, ReportStore};
