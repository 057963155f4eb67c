use std::io::Write;

use csv::WriterBuilder;

use crate::error::ExtractError;
use crate::model::{Field, InvoiceRecord};

const PART_HEADERS: [&str; 5] = [
    "document",
    "part_id",
    "description",
    "unit_price",
    "extended_price",
];

/// One row per invoice, absent fields left blank.
///
/// # Errors
///
/// Returns [`ExtractError::Csv`] when the writer fails.
pub fn write_summary_csv<W: Write>(
    out: W,
    documents: &[(&str, &InvoiceRecord)],
    delimiter: u8,
) -> Result<(), ExtractError> {
    let mut writer = WriterBuilder::new().delimiter(delimiter).from_writer(out);

    let mut headers = vec!["document"];
    headers.extend(Field::ALL.iter().map(|field| field.label()));
    headers.push("part_count");
    writer.write_record(&headers)?;

    for (name, record) in documents {
        let mut row = vec![(*name).to_string()];
        row.extend(
            Field::ALL
                .iter()
                .map(|field| record.field(*field).unwrap_or_default().to_string()),
        );
        row.push(record.parts.len().to_string());
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Flattened part rows across every document.
///
/// # Errors
///
/// Returns [`ExtractError::Csv`] when the writer fails.
pub fn write_parts_csv<W: Write>(
    out: W,
    documents: &[(&str, &InvoiceRecord)],
    delimiter: u8,
) -> Result<(), ExtractError> {
    let mut writer = WriterBuilder::new().delimiter(delimiter).from_writer(out);
    writer.write_record(PART_HEADERS)?;
    for (name, record) in documents {
        for part in &record.parts {
            writer.write_record([
                *name,
                part.part_id.as_str(),
                part.description.as_str(),
                part.unit_price.as_deref().unwrap_or_default(),
                part.extended_price.as_deref().unwrap_or_default(),
            ])?;
        }
    }
    writer.flush()?;
    Ok(())
}
