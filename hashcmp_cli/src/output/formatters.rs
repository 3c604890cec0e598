use super::{OutputFormatter, column_name};
use anyhow::Result;
use colored::*;
use hashcmp_core::{FileProcessingResult, HashAlgorithm};
use serde::Serialize;
use std::collections::BTreeMap;

const FILE_HEADER: &str = "File";
const SIZE_HEADER: &str = "Size(bytes)";

/// GitHub-flavoured markdown table
pub struct TableFormatter {
    columns: Vec<HashAlgorithm>,
    use_color: bool,
}

enum Align {
    Left,
    Right,
}

impl TableFormatter {
    pub fn new(columns: Vec<HashAlgorithm>, use_color: bool) -> Self {
        Self { columns, use_color }
    }

    fn headers(&self) -> Vec<&'static str> {
        let mut headers = vec![FILE_HEADER, SIZE_HEADER];
        headers.extend(self.columns.iter().copied().map(column_name));
        headers
    }

    fn row(&self, result: &FileProcessingResult) -> Vec<String> {
        let mut row = vec![
            result.file_path.display().to_string(),
            result.file_size.to_string(),
        ];
        for algorithm in &self.columns {
            row.push(result.hashes.get(algorithm).cloned().unwrap_or_default());
        }
        row
    }

    fn alignment(column: usize) -> Align {
        if column == 1 { Align::Right } else { Align::Left }
    }

    fn pad(text: &str, width: usize, align: Align) -> String {
        match align {
            Align::Left => format!("{text:<width$}"),
            Align::Right => format!("{text:>width$}"),
        }
    }
}

impl OutputFormatter for TableFormatter {
    fn format_batch(&self, results: &[FileProcessingResult]) -> Result<String> {
        let headers = self.headers();
        let rows: Vec<Vec<String>> = results.iter().map(|r| self.row(r)).collect();

        let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut lines = Vec::with_capacity(rows.len() + 2);

        // Pad before colouring so escape codes do not count towards width
        let header_cells: Vec<String> = headers
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(i, (header, &width))| {
                let padded = Self::pad(header, width, Self::alignment(i));
                if self.use_color {
                    padded.bold().to_string()
                } else {
                    padded
                }
            })
            .collect();
        lines.push(format!("| {} |", header_cells.join(" | ")));

        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(w + 2)).collect();
        lines.push(format!("|{}|", rule.join("|")));

        for row in &rows {
            let cells: Vec<String> = row
                .iter()
                .zip(&widths)
                .enumerate()
                .map(|(i, (cell, &width))| Self::pad(cell, width, Self::alignment(i)))
                .collect();
            lines.push(format!("| {} |", cells.join(" | ")));
        }

        Ok(lines.join("\n"))
    }
}

#[derive(Serialize)]
struct JsonRow<'a> {
    file: String,
    size: u64,
    hashes: &'a BTreeMap<HashAlgorithm, String>,
    processing_time_ms: u128,
}

impl<'a> From<&'a FileProcessingResult> for JsonRow<'a> {
    fn from(result: &'a FileProcessingResult) -> Self {
        Self {
            file: result.file_path.display().to_string(),
            size: result.file_size,
            hashes: &result.hashes,
            processing_time_ms: result.processing_time.as_millis(),
        }
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_batch(&self, results: &[FileProcessingResult]) -> Result<String> {
        let rows: Vec<JsonRow<'_>> = results.iter().map(JsonRow::from).collect();

        if self.pretty {
            Ok(serde_json::to_string_pretty(&rows)?)
        } else {
            Ok(serde_json::to_string(&rows)?)
        }
    }
}

/// CSV formatter with the same columns as the table
pub struct CsvFormatter {
    columns: Vec<HashAlgorithm>,
}

impl CsvFormatter {
    pub fn new(columns: Vec<HashAlgorithm>) -> Self {
        Self { columns }
    }

    fn headers(&self) -> Vec<&'static str> {
        let mut headers = vec![FILE_HEADER, SIZE_HEADER];
        headers.extend(self.columns.iter().copied().map(column_name));
        headers
    }

    fn result_to_record(&self, result: &FileProcessingResult) -> Vec<String> {
        let mut record = vec![
            result.file_path.to_string_lossy().to_string(),
            result.file_size.to_string(),
        ];
        for algorithm in &self.columns {
            record.push(result.hashes.get(algorithm).cloned().unwrap_or_default());
        }
        record
    }
}

impl OutputFormatter for CsvFormatter {
    fn format_batch(&self, results: &[FileProcessingResult]) -> Result<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        wtr.write_record(self.headers())?;
        for result in results {
            wtr.write_record(self.result_to_record(result))?;
        }

        let data = wtr.into_inner()?;
        Ok(String::from_utf8(data)?)
    }
}
