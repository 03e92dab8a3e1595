/// Category used when a text dump block lists no categories.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// Category stamped on review JSON rows and on metadata rows lacking one.
pub const INSTANT_VIDEO_CATEGORY: &str = "Amazon Instant Video";

pub const VIDEO_ENTERTAINMENT_CATEGORY: &str = "Video & Entertainment";

pub const BOOKS_LABEL: &str = "Books";

pub const BOOKS_LITERATURE_LABEL: &str = "Books & Literature";
