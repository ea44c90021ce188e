// src/store/tabular.rs

use std::io::Write;

use crate::dataset::{Dataset, Field};
use crate::error::Result;

/// Write `dataset` as CSV: header row, then one row per record, each led by
/// its zero-based row index under an empty column name.
pub fn write_csv<W: Write>(dataset: &Dataset, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = Vec::with_capacity(dataset.columns.len() + 1);
    header.push("");
    header.extend(dataset.columns.iter().map(String::as_str));
    wtr.write_record(&header)?;

    for (i, record) in dataset.records.iter().enumerate() {
        let mut row = Vec::with_capacity(record.len() + 1);
        row.push(i.to_string());
        row.extend(record.iter().map(render));
        wtr.write_record(&row)?;
    }

    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Render the whole dataset into memory.
pub fn to_csv_bytes(dataset: &Dataset) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_csv(dataset, &mut buf)?;
    Ok(buf)
}

fn render(field: &Field) -> String {
    match field {
        Field::Text(s) => s.clone(),
        Field::Number(v) => format_number(*v),
        Field::Missing => String::new(),
    }
}

/// Integral values keep a trailing `.0` so float columns read back as floats
/// (`12300000.0`); everything else uses the shortest round-trip form.
pub fn format_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e16 {
        format!("{:.1}", v)
    } else {
        format!("{}", v)
    }
}
