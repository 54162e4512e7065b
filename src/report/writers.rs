/*!

Displays that serialize snapshots to any `std::io::Write`: a CSV table with one row per
region per day, and JSON lines with one document per day. Neither can take back what it has
written, so `clear` only flushes.

*/

use crate::{
    error::SpreadError,
    report::{DaySnapshot, SimulationDisplay},
};
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct CsvRow<'a> {
    day: usize,
    region: &'a str,
    susceptible: u64,
    infected: u64,
}

/// `day,region,susceptible,infected` rows.
pub struct CsvDisplay<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvDisplay<W> {
    pub fn new(writer: W) -> Self {
        CsvDisplay {
            writer: csv::Writer::from_writer(writer),
        }
    }

    pub fn into_inner(self) -> Result<W, SpreadError> {
        self.writer
            .into_inner()
            .map_err(|e| SpreadError::Io(e.into_error()))
    }
}

impl<W: Write> SimulationDisplay for CsvDisplay<W> {
    fn publish(&mut self, snapshot: &DaySnapshot) -> Result<(), SpreadError> {
        for counts in &snapshot.regions {
            self.writer.serialize(CsvRow {
                day: snapshot.day,
                region: &counts.name,
                susceptible: counts.susceptible,
                infected: counts.infected,
            })?;
        }
        self.writer.flush()?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), SpreadError> {
        self.writer.flush()?;
        Ok(())
    }
}

/// One JSON-serialized [`DaySnapshot`] per line.
pub struct JsonLinesDisplay<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesDisplay<W> {
    pub fn new(writer: W) -> Self {
        JsonLinesDisplay { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> SimulationDisplay for JsonLinesDisplay<W> {
    fn publish(&mut self, snapshot: &DaySnapshot) -> Result<(), SpreadError> {
        serde_json::to_writer(&mut self.writer, snapshot)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), SpreadError> {
        self.writer.flush()?;
        Ok(())
    }
}
