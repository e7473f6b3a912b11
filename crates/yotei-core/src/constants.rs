/// Wire format for dates exchanged with the surrounding application.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Category code for schedules shared with the whole workgroup.
pub const CATEGORY_SHARED: &str = "2";

/// Display color occurrences of shared schedules are rendered with.
pub const SHARED_SCHEDULE_COLOR: &str = "#1e6bb8";
