//! Placing a day's counters in the dashboard.

use chrono::NaiveDate;
use cstrack_core::{date_label, DailyStats};

use crate::a1::{cell_range, column_letters, row_range};
use crate::client::SheetsClient;
use crate::credentials::ServiceAccountKey;
use crate::error::SheetsError;
use crate::layout::SheetLayout;

/// 1-indexed column whose header cell reads `date_label(date)`.
///
/// Every column is scanned from column 1. Cells are compared after trimming;
/// the first exact match wins.
#[must_use]
pub fn find_column_for_date(header: &[String], date: NaiveDate) -> Option<u32> {
    let label = date_label(date);
    header
        .iter()
        .enumerate()
        .find(|(_, cell)| cell.trim() == label)
        .and_then(|(index, _)| u32::try_from(index + 1).ok())
}

pub struct SheetWriter {
    client: SheetsClient,
    layout: SheetLayout,
}

impl SheetWriter {
    #[must_use]
    pub fn new(client: SheetsClient, layout: SheetLayout) -> Self {
        Self { client, layout }
    }

    /// Authenticate with `key` and target `layout`.
    ///
    /// # Errors
    ///
    /// Returns any credential or HTTP error from [`SheetsClient::connect`].
    pub async fn connect(
        key: &ServiceAccountKey,
        layout: SheetLayout,
        timeout_secs: u64,
    ) -> Result<Self, SheetsError> {
        let client = SheetsClient::connect(key, timeout_secs).await?;
        Ok(Self::new(client, layout))
    }

    #[must_use]
    pub fn layout(&self) -> &SheetLayout {
        &self.layout
    }

    /// Column for `date`, read from the header row.
    ///
    /// # Errors
    ///
    /// - [`SheetsError::ColumnNotFound`] if no header cell matches.
    /// - Any API error from reading the header row.
    pub async fn resolve_column(&self, date: NaiveDate) -> Result<u32, SheetsError> {
        let layout = &self.layout;
        let header = self
            .client
            .row_values(
                &layout.spreadsheet_id,
                &row_range(&layout.sheet_name, layout.date_row),
            )
            .await?;

        let column =
            find_column_for_date(&header, date).ok_or_else(|| SheetsError::ColumnNotFound {
                label: date_label(date),
                row: layout.date_row,
            })?;
        if column < layout.date_start_col {
            tracing::warn!(
                label = %date_label(date),
                column,
                date_start_col = layout.date_start_col,
                "date label found left of the date columns"
            );
        }

        tracing::info!(
            label = %date_label(date),
            column,
            column_letters = %column_letters(column),
            "date column resolved"
        );
        Ok(column)
    }

    /// Write the Q&A count, then the inbound-call count, into `stats`' date
    /// column. Returns the column written.
    ///
    /// The two cells are written by separate calls. If the second fails the
    /// first stays written.
    ///
    /// # Errors
    ///
    /// - [`SheetsError::ColumnNotFound`] before anything is written.
    /// - Any API error from either write.
    pub async fn write_daily_stats(&self, stats: &DailyStats) -> Result<u32, SheetsError> {
        let column = self.resolve_column(stats.target_date).await?;
        let layout = &self.layout;

        for (row, value, counter) in [
            (layout.qa_row, stats.qa_count, "qa_count"),
            (layout.inbound_call_row, stats.inbound_call_count, "inbound_call_count"),
        ] {
            let range = cell_range(&layout.sheet_name, column, row);
            self.client
                .update_cell(&layout.spreadsheet_id, &range, value)
                .await?;
            tracing::info!(counter, value, row, column, range = %range, "cell written");
        }

        Ok(column)
    }
}
