//! Writes the daily CS counters into the Google Sheets dashboard.

pub mod a1;
pub mod auth;
pub mod client;
pub mod credentials;
pub mod error;
pub mod layout;
pub mod writer;

pub use a1::{cell_range, column_letters, quote_sheet_name, row_range};
pub use auth::{fetch_access_token, AccessToken, SHEETS_SCOPE};
pub use client::SheetsClient;
pub use credentials::{load_service_account_key, ServiceAccountKey};
pub use error::SheetsError;
pub use layout::SheetLayout;
pub use writer::{find_column_for_date, SheetWriter};
