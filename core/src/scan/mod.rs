pub mod detection;
pub mod record;

pub use detection::{SpotDetection, SpotStatus};
pub use record::ScanRecord;
