pub mod clock;
pub mod scan_log;

pub use clock::{Clock, FixedClock, SystemClock};
pub use scan_log::ScanLog;
