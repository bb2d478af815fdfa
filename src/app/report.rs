use crate::config::OutputFormat;
use crate::domain::model::{RankedResult, RankingUpdate};
use crate::utils::error::{LocatorError, Result};
use serde::Serialize;

pub const EMPTY_MESSAGE: &str = "No ambulances found within range";

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    distance_km: f64,
    unit_id: &'a str,
    registration: &'a str,
    unit_type: &'a str,
    status: &'a str,
    phone: &'a str,
    location_id: &'a str,
    location_name: &'a str,
    latitude: f64,
    longitude: f64,
}

impl<'a> From<&'a RankedResult> for CsvRow<'a> {
    fn from(result: &'a RankedResult) -> Self {
        Self {
            distance_km: result.distance_km,
            unit_id: &result.unit_id,
            registration: &result.registration,
            unit_type: &result.unit_type,
            status: result.status.as_str(),
            phone: &result.phone,
            location_id: &result.location_id,
            location_name: &result.location_name,
            latitude: result.coordinate.latitude,
            longitude: result.coordinate.longitude,
        }
    }
}

pub fn render(results: &[RankedResult], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(render_table(results)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(results)?),
        OutputFormat::Csv => render_csv(results),
    }
}

/// 含 advisory 的輸出；JSON 模式輸出整個 update
pub fn render_update(update: &RankingUpdate, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(update)?),
        OutputFormat::Csv => render_csv(&update.results),
        OutputFormat::Table => {
            let mut out = format!("📍 {}\n", update.position);
            if let Some(advisory) = update.advisory {
                out.push_str(&format!("⚠️ {}\n", advisory.message()));
            }
            out.push_str(&render_table(&update.results));
            Ok(out)
        }
    }
}

fn render_table(results: &[RankedResult]) -> String {
    if results.is_empty() {
        return format!("{}\n", EMPTY_MESSAGE);
    }

    let headers = ["KM", "UNIT", "REGISTRATION", "TYPE", "STATUS", "LOCATION", "PHONE"];
    let rows: Vec<[String; 7]> = results
        .iter()
        .map(|r| {
            [
                format!("{:.1}", r.distance_km),
                r.unit_id.clone(),
                r.registration.clone(),
                r.unit_type.clone(),
                r.status.to_string(),
                r.location_name.clone(),
                r.phone.clone(),
            ]
        })
        .collect();

    let mut widths = headers.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, headers.iter().copied(), &widths);
    for row in &rows {
        push_row(&mut out, row.iter().map(String::as_str), &widths);
    }
    out
}

fn push_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line: Vec<String> = cells
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

fn render_csv(results: &[RankedResult]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for result in results {
        writer.serialize(CsvRow::from(result))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| LocatorError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| LocatorError::MalformedInput {
        message: format!("CSV output is not UTF-8: {}", e),
    })
}
