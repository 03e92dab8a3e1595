pub mod category;
pub mod combined;
pub mod review;

pub use category::{INSTANT_VIDEO_CATEGORY, UNKNOWN_CATEGORY};
pub use combined::{CombinedRecord, COLUMNS};
pub use review::ReviewRecord;
