pub const TRIPLOGS_PATH: &str = "triplogs";
pub const RIDES_PATH: &str = "rides";

pub const SCOOTER: &str = "scooter";
pub const SCOOTER_ID: &str = "scooterid";
pub const LIMIT: &str = "limit";
pub const SORT: &str = "sort";

pub const TRIPLOG_SORT_FIELD: &str = "start_time_tz";
pub const RIDE_SORT_FIELD: &str = "ride_start_time";
