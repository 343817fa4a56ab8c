use std::io::Read;

use finexpert_core::{FilingStatus, StandardDeduction, TaxBracket};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading tax table data.
#[derive(Debug, Error, PartialEq)]
pub enum TaxTableLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    /// `row` is 1-based, not counting the header.
    #[error("unrecognised filing status '{status}' on row {row}")]
    InvalidFilingStatus { status: String, row: usize },

    #[error("max_income {max_income} is not above min_income {min_income} on row {row}")]
    InvalidBracketRange {
        min_income: Decimal,
        max_income: Decimal,
        row: usize,
    },

    #[error("rate {rate} on row {row} is not a fraction between 0 and 1")]
    InvalidRate { rate: Decimal, row: usize },
}

impl From<csv::Error> for TaxTableLoaderError {
    fn from(err: csv::Error) -> Self {
        TaxTableLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from the tax brackets CSV file.
///
/// - `filing_status`: `S`, `MFJ` or `HOH`
/// - `min_income`: exclusive lower bound of the bracket
/// - `max_income`: inclusive upper bound (empty for the top bracket)
/// - `rate`: the marginal tax rate as a decimal (e.g., 0.10 for 10%)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TaxBracketRecord {
    pub filing_status: String,
    pub min_income: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub max_income: Option<Decimal>,
    pub rate: Decimal,
}

/// A single record from the standard deductions CSV file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StandardDeductionRecord {
    pub filing_status: String,
    pub amount: Decimal,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

fn parse_filing_status(
    code: &str,
    row: usize,
) -> Result<FilingStatus, TaxTableLoaderError> {
    FilingStatus::parse(code.trim()).ok_or_else(|| TaxTableLoaderError::InvalidFilingStatus {
        status: code.to_string(),
        row,
    })
}

/// Loader for tax brackets and standard deductions from CSV files.
///
/// The loaded rows replace the corresponding half of a
/// [`TaxTable`](finexpert_core::TaxTable), for example
/// `TaxTable::builtin().with_brackets(brackets)`.
pub struct TaxTableLoader;

impl TaxTableLoader {
    /// Parse tax bracket records from a CSV reader.
    pub fn parse_brackets<R: Read>(
        reader: R
    ) -> Result<Vec<TaxBracketRecord>, TaxTableLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: TaxBracketRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Parse standard deduction records from a CSV reader.
    pub fn parse_standard_deductions<R: Read>(
        reader: R
    ) -> Result<Vec<StandardDeductionRecord>, TaxTableLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: StandardDeductionRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Validates parsed records and converts them into brackets.
    pub fn brackets(
        records: &[TaxBracketRecord]
    ) -> Result<Vec<TaxBracket>, TaxTableLoaderError> {
        records
            .iter()
            .enumerate()
            .map(|(idx, record)| {
                let row = idx + 1;
                let filing_status = parse_filing_status(&record.filing_status, row)?;

                if let Some(max_income) = record.max_income
                    && max_income <= record.min_income
                {
                    return Err(TaxTableLoaderError::InvalidBracketRange {
                        min_income: record.min_income,
                        max_income,
                        row,
                    });
                }
                if !(Decimal::ZERO..=Decimal::ONE).contains(&record.rate) {
                    return Err(TaxTableLoaderError::InvalidRate {
                        rate: record.rate,
                        row,
                    });
                }

                Ok(TaxBracket {
                    filing_status,
                    min_income: record.min_income,
                    max_income: record.max_income,
                    tax_rate: record.rate,
                })
            })
            .collect()
    }

    /// Validates parsed records and converts them into standard deductions.
    pub fn standard_deductions(
        records: &[StandardDeductionRecord]
    ) -> Result<Vec<StandardDeduction>, TaxTableLoaderError> {
        records
            .iter()
            .enumerate()
            .map(|(idx, record)| {
                Ok(StandardDeduction {
                    filing_status: parse_filing_status(&record.filing_status, idx + 1)?,
                    amount: record.amount,
                })
            })
            .collect()
    }

    /// Parse and convert a brackets CSV in one step.
    pub fn load_brackets<R: Read>(reader: R) -> Result<Vec<TaxBracket>, TaxTableLoaderError> {
        let records = Self::parse_brackets(reader)?;
        let brackets = Self::brackets(&records)?;
        debug!(count = brackets.len(), "loaded tax brackets");
        Ok(brackets)
    }

    /// Parse and convert a standard deductions CSV in one step.
    pub fn load_standard_deductions<R: Read>(
        reader: R
    ) -> Result<Vec<StandardDeduction>, TaxTableLoaderError> {
        let records = Self::parse_standard_deductions(reader)?;
        let deductions = Self::standard_deductions(&records)?;
        debug!(count = deductions.len(), "loaded standard deductions");
        Ok(deductions)
    }
}
