//! Where the dashboard keeps its daily counters.

pub const DEFAULT_SPREADSHEET_ID: &str = "1TZiqBvutsozibzfIxxbn_n-q1rkqArjFCw2XhFb8HW0";
pub const DEFAULT_SHEET_NAME: &str = "DashBoard(Weekly_FY25)";

/// Row holding the `M/D` date labels.
pub const DATE_ROW: u32 = 6;
/// First date column (G).
pub const DATE_START_COL: u32 = 7;
pub const QA_ROW: u32 = 327;
pub const INBOUND_CALL_ROW: u32 = 328;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetLayout {
    pub spreadsheet_id: String,
    pub sheet_name: String,
    pub date_row: u32,
    pub date_start_col: u32,
    pub qa_row: u32,
    pub inbound_call_row: u32,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            spreadsheet_id: DEFAULT_SPREADSHEET_ID.to_string(),
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            date_row: DATE_ROW,
            date_start_col: DATE_START_COL,
            qa_row: QA_ROW,
            inbound_call_row: INBOUND_CALL_ROW,
        }
    }
}

impl SheetLayout {
    /// Default layout with the spreadsheet and/or tab replaced when given.
    #[must_use]
    pub fn with_overrides(spreadsheet_id: Option<&str>, sheet_name: Option<&str>) -> Self {
        let mut layout = Self::default();
        if let Some(id) = spreadsheet_id {
            layout.spreadsheet_id = id.to_string();
        }
        if let Some(name) = sheet_name {
            layout.sheet_name = name.to_string();
        }
        layout
    }
}
