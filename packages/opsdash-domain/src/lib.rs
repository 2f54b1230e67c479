pub mod metric;
pub mod progress;
pub mod records;
pub mod status;
pub mod time_ago;

pub use metric::{MetricValue, get_metric};
pub use progress::estimate_progress;
pub use records::{ActivityRecord, MetricRecord, ProjectRecord, Trend};
pub use status::{CanonicalStatus, map_activity_status, map_project_status};
pub use time_ago::{UNKNOWN_TIME, parse_timestamp, time_ago};
