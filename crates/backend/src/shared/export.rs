use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use contracts::shared::view::DataTable;

/// Serializes the displayed table (header row first) as CSV
pub fn table_to_csv(table: &DataTable) -> anyhow::Result<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(&table.columns)?;
    for row in &table.rows {
        wtr.write_record(row)?;
    }
    wtr.into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV export: {}", e.error()))
}

/// Download response carrying `table` as `filename`
pub fn csv_download(filename: &str, table: &DataTable) -> Result<Response, StatusCode> {
    let body = table_to_csv(table).map_err(|e| {
        tracing::error!("CSV export {} failed: {}", filename, e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    )
        .into_response())
}
