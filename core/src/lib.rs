//! Ingestion and aggregation core for the parking agent.
//!
//! Scans arrive as batches of spot detections. They are classified into an
//! occupancy tier, screened for low-confidence spots that need visual
//! corroboration, and appended to an in-memory scan log that backs the
//! daily dashboard statistics.

pub mod agent;
pub mod analysis;
pub mod curation;
pub mod math;
pub mod prelude;
pub mod scan;
pub mod store;
pub mod telemetry;

pub use agent::{ParkingAgent, ParkingSummary, ScanView};
pub use prelude::{SpotDetection, SpotStatus};
