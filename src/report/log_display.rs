use crate::{
    error::SpreadError,
    log::{debug, info},
    report::{DaySnapshot, SimulationDisplay},
};

/// Writes each day's results through the logger: a headline at `info` and one line per
/// region at `debug`.
#[derive(Default)]
pub struct LogDisplay;

impl SimulationDisplay for LogDisplay {
    fn publish(&mut self, snapshot: &DaySnapshot) -> Result<(), SpreadError> {
        info!(
            "day {}: {} infected across {} regions",
            snapshot.day,
            snapshot.total_infected(),
            snapshot.regions.len()
        );
        for counts in &snapshot.regions {
            debug!(
                "day {} {}: susceptible {}, infected {}",
                snapshot.day, counts.name, counts.susceptible, counts.infected
            );
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<(), SpreadError> {
        info!("results cleared");
        Ok(())
    }
}
