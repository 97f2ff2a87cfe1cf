use crate::error::EstatError;
use crate::types::{ExampleRecord, FlatMasterRow, EXAMPLE_COLUMNS, FLAT_MASTER_COLUMNS};
use serde::Serialize;
use std::io::Write;

/// Writes the flat master table as headered CSV. Absent descriptions are
/// written as empty fields. The header is written even for an empty table.
pub fn write_flat_master_csv<W: Write>(
    rows: &[FlatMasterRow],
    writer: W,
) -> Result<(), EstatError> {
    write_records(&FLAT_MASTER_COLUMNS, rows, writer)
}

pub fn write_examples_csv<W: Write>(
    records: &[ExampleRecord],
    writer: W,
) -> Result<(), EstatError> {
    write_records(&EXAMPLE_COLUMNS, records, writer)
}

fn write_records<T: Serialize, W: Write>(
    header: &[&str],
    records: &[T],
    writer: W,
) -> Result<(), EstatError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(header)?;
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}
