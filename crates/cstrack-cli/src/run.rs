//! One end-to-end run: resolve the date, collect from the portal, write the sheet.

use std::path::Path;

use anyhow::Context;
use cstrack_core::{date_label, load_app_config_from_env, resolve_target_date_now, DailyStats};
use cstrack_portal::{collect_daily_stats, PortalSettings};
use cstrack_sheets::{load_service_account_key, SheetLayout, SheetWriter};

/// Execute the daily job for `date_arg` (or yesterday).
///
/// The service-account key is loaded before the browser starts so that a
/// missing or broken key fails the run without touching the portal.
///
/// # Errors
///
/// Returns the first failure, with context naming the stage it came from.
pub async fn run(date_arg: Option<&str>, program_dir: &Path) -> anyhow::Result<DailyStats> {
    let target_date = resolve_target_date_now(date_arg)?;
    tracing::info!(
        target_date = %target_date,
        label = %date_label(target_date),
        "daily tracking started"
    );

    let config = load_app_config_from_env(program_dir).context("failed to load configuration")?;
    let key = load_service_account_key(&config.service_account_key_path)
        .context("service-account key check failed")?;

    let settings = PortalSettings::from_app_config(&config);
    let stats = collect_daily_stats(&settings, &config.credentials, target_date)
        .await
        .context("failed to collect counters from the portal")?;
    tracing::info!(
        target_date = %stats.target_date,
        qa_count = stats.qa_count,
        inbound_call_count = stats.inbound_call_count,
        "portal counters collected"
    );

    let layout = SheetLayout::with_overrides(
        config.spreadsheet_id.as_deref(),
        config.sheet_name.as_deref(),
    );
    let writer = SheetWriter::connect(&key, layout, config.http_timeout_secs)
        .await
        .context("failed to authenticate to Google Sheets")?;
    let column = writer
        .write_daily_stats(&stats)
        .await
        .context("failed to write counters to the dashboard")?;

    tracing::info!(
        target_date = %stats.target_date,
        qa_count = stats.qa_count,
        inbound_call_count = stats.inbound_call_count,
        column,
        "daily tracking finished"
    );
    Ok(stats)
}
