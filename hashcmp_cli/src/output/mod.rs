mod formatters;

pub use formatters::{CsvFormatter, JsonFormatter, TableFormatter};

use anyhow::Result;
use hashcmp_core::{FileProcessingResult, HashAlgorithm};

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// GitHub-flavoured markdown table
    Table,
    /// Pretty-printed JSON array
    Json,
    /// CSV with a header row
    Csv,
}

impl OutputFormat {
    /// Parse output format from string
    pub fn from_string(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => anyhow::bail!("Unknown output format: {}", s),
        }
    }
}

/// Column header for an algorithm
pub fn column_name(algorithm: HashAlgorithm) -> &'static str {
    algorithm.display_name()
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format a batch of results, one row per file
    fn format_batch(&self, results: &[FileProcessingResult]) -> Result<String>;

    /// Format a single result
    fn format_single(&self, result: &FileProcessingResult) -> Result<String> {
        self.format_batch(std::slice::from_ref(result))
    }
}

/// Create a formatter showing one column per entry of `algorithms`
pub fn create_formatter(
    format: OutputFormat,
    algorithms: &[HashAlgorithm],
    use_color: bool,
) -> Box<dyn OutputFormatter> {
    let mut columns = algorithms.to_vec();
    columns.sort();
    columns.dedup();

    match format {
        OutputFormat::Table => Box::new(TableFormatter::new(columns, use_color)),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
        OutputFormat::Csv => Box::new(CsvFormatter::new(columns)),
    }
}
