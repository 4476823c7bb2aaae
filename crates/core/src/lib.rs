pub mod error;
pub mod metric;
pub mod reading;
pub mod series;
pub mod session;
pub mod status;

pub use error::{DashboardError, Result};
pub use metric::MetricKey;
pub use reading::Reading;
pub use series::{Sample, Series, DEFAULT_CAPACITY};
pub use session::{ExportRow, Session};
pub use status::AqiCategory;
