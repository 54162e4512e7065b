use crate::{
    context::Context,
    error::SpreadError,
    log::{error, trace},
    new_trait::New,
    report::DaySnapshot,
};

/// A consumer of the simulation's daily output: a results panel, a map, a file.
pub trait SimulationDisplay {
    /// Receives the rounded counts of every region for one day.
    fn publish(&mut self, snapshot: &DaySnapshot) -> Result<(), SpreadError>;

    /// Receives the rounded infected count of every region, for placing map markers.
    fn render(&mut self, _infected: &[(&str, u64)]) -> Result<(), SpreadError> {
        Ok(())
    }

    /// Drops everything published so far. Called when the simulation is reset.
    fn clear(&mut self) -> Result<(), SpreadError> {
        Ok(())
    }
}

#[derive(Default)]
struct DisplayData {
    displays: Vec<Box<dyn SimulationDisplay>>,
}

impl New for DisplayData {
    const new: &'static dyn Fn() -> Self = &DisplayData::default;
}

pub trait ContextDisplayExt {
    fn add_display(&mut self, display: impl SimulationDisplay + 'static);

    fn display_count(&self) -> usize;

    /// Publishes `snapshot` to every display, then renders its infected counts. A failing
    /// display is logged and skipped; the others still receive the snapshot.
    fn publish_snapshot(&mut self, snapshot: &DaySnapshot);

    /// Clears every display.
    fn clear_displays(&mut self);
}

impl ContextDisplayExt for Context {
    fn add_display(&mut self, display: impl SimulationDisplay + 'static) {
        self.get_data_container_mut::<DisplayData>()
            .displays
            .push(Box::new(display));
    }

    fn display_count(&self) -> usize {
        self.get_data_container::<DisplayData>()
            .map_or(0, |display_data| display_data.displays.len())
    }

    fn publish_snapshot(&mut self, snapshot: &DaySnapshot) {
        trace!("publishing day {} to {} displays", snapshot.day, self.display_count());
        let infected = snapshot.infected_counts();
        for display in &mut self.get_data_container_mut::<DisplayData>().displays {
            if let Err(e) = display.publish(snapshot) {
                error!("failed to publish day {}: {e}", snapshot.day);
            }
            if let Err(e) = display.render(&infected) {
                error!("failed to render day {}: {e}", snapshot.day);
            }
        }
    }

    fn clear_displays(&mut self) {
        for display in &mut self.get_data_container_mut::<DisplayData>().displays {
            if let Err(e) = display.clear() {
                error!("failed to clear display: {e}");
            }
        }
    }
}
