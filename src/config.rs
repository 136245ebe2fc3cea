use serde::{Deserialize, Serialize};

/// Column header of the exported table. Column order is fixed.
pub const CSV_HEADER: &str = "Account Executive,Workspace ID,Timestamp";

/// Suggested filename for the CSV export.
pub const CSV_FILENAME: &str = "demo-clicks.csv";

/// Content type the CSV payload is served or saved as.
pub const CSV_MIME: &str = "text/csv;charset=utf-8;";

/// One "book a demo" click recovered from the raw event log.
///
/// Every field is a plain string; a field that could not be recovered is
/// empty rather than absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub timestamp: String,
    pub workspace_id: String,
    pub ae_name: String,
}
