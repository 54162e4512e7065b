/*!

The simulation driver: a state machine that advances the model once per tick for
`num_days` days.

```text
Idle --start--> Running <--pause_or_resume--> Paused
                   |
                   +--(current_day == num_days, next tick)--> Finished --start--> Running

any state --reset--> Idle
```

Ticks are plans on the context's queue, spaced `tick_interval` apart. At most one tick is ever
pending and the driver keeps its `PlanId`, so pausing and resetting cancel it outright; no tick
fires once the run is paused, reset, or finished.

*/

use crate::{
    context::Context,
    error::SpreadError,
    log::{debug, info},
    model::ContextModelExt,
    new_trait::New,
    parameters::{ContextParametersExt, Parameters},
    plan::PlanId,
    random::ContextRandomExt,
    region::{ContextRegionExt, RegionSpec},
    report::ContextDisplayExt,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SimulationStatus {
    Idle,
    Running,
    Paused,
    Finished,
}

struct DriverData {
    status: SimulationStatus,
    current_day: usize,
    pending_tick: Option<PlanId>,
}

impl New for DriverData {
    const new: &'static dyn Fn() -> Self = &|| DriverData {
        status: SimulationStatus::Idle,
        current_day: 0,
        pending_tick: None,
    };
}

/// Validates and stores `parameters`, seeds the random module with `parameters.seed`, and
/// installs the region graph built from `regions`.
pub fn initialize(
    context: &mut Context,
    parameters: Parameters,
    regions: impl IntoIterator<Item = RegionSpec>,
) -> Result<(), SpreadError> {
    let seed = parameters.seed;
    context.set_parameters(parameters)?;
    context.init_random(seed);
    context.add_regions(regions)?;
    Ok(())
}

pub trait ContextDriverExt {
    /// Starts ticking from day 0. Only acts when Idle or Finished; from Finished the run
    /// continues from the regions' current state. No-op when Running or Paused.
    fn start_simulation(&mut self);

    /// Running -> Paused or Paused -> Running. No-op when Idle or Finished.
    fn pause_or_resume(&mut self);

    /// Cancels the pending tick, sets the day back to 0, clears every region and every display,
    /// and returns to Idle.
    fn reset_simulation(&mut self);

    fn simulation_status(&self) -> SimulationStatus;

    /// Number of days processed since the last start.
    fn current_day(&self) -> usize;
}

fn schedule_tick(context: &mut Context) {
    let time = context.get_current_time() + context.get_parameters_or_default().tick_interval;
    let plan_id = context.add_plan(time, tick);
    context.get_data_container_mut::<DriverData>().pending_tick = Some(plan_id);
}

fn cancel_pending_tick(context: &mut Context) {
    if let Some(plan_id) = context.get_data_container_mut::<DriverData>().pending_tick.take() {
        context.cancel_plan(&plan_id);
    }
}

fn tick(context: &mut Context) {
    let num_days = context.get_parameters_or_default().num_days;
    let driver = context.get_data_container_mut::<DriverData>();
    driver.pending_tick = None;
    if driver.status != SimulationStatus::Running {
        return;
    }

    let day = driver.current_day;
    if day < num_days {
        let snapshot = context.advance_day(day + 1);
        context.publish_snapshot(&snapshot);
        context.get_data_container_mut::<DriverData>().current_day += 1;
        schedule_tick(context);
    } else {
        driver.status = SimulationStatus::Finished;
        info!("simulation finished after {day} days");
    }
}

impl ContextDriverExt for Context {
    fn start_simulation(&mut self) {
        let driver = self.get_data_container_mut::<DriverData>();
        match driver.status {
            SimulationStatus::Idle | SimulationStatus::Finished => {
                driver.status = SimulationStatus::Running;
                driver.current_day = 0;
                info!("simulation started at time {}", self.get_current_time());
                schedule_tick(self);
            }
            status @ (SimulationStatus::Running | SimulationStatus::Paused) => {
                debug!("start ignored, simulation is {status:?}");
            }
        }
    }

    fn pause_or_resume(&mut self) {
        let driver = self.get_data_container_mut::<DriverData>();
        match driver.status {
            SimulationStatus::Running => {
                driver.status = SimulationStatus::Paused;
                info!("simulation paused on day {}", driver.current_day);
                cancel_pending_tick(self);
            }
            SimulationStatus::Paused => {
                driver.status = SimulationStatus::Running;
                info!("simulation resumed on day {}", driver.current_day);
                schedule_tick(self);
            }
            status @ (SimulationStatus::Idle | SimulationStatus::Finished) => {
                debug!("pause ignored, simulation is {status:?}");
            }
        }
    }

    fn reset_simulation(&mut self) {
        cancel_pending_tick(self);
        let driver = self.get_data_container_mut::<DriverData>();
        driver.status = SimulationStatus::Idle;
        driver.current_day = 0;
        self.reset_regions();
        self.clear_displays();
        info!("simulation reset");
    }

    fn simulation_status(&self) -> SimulationStatus {
        self.get_data_container::<DriverData>()
            .map_or(SimulationStatus::Idle, |driver| driver.status)
    }

    fn current_day(&self) -> usize {
        self.get_data_container::<DriverData>()
            .map_or(0, |driver| driver.current_day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::reference_districts;
    use crate::report::SnapshotRecorder;
    use std::{cell::RefCell, rc::Rc};

    fn setup(num_days: usize) -> (Context, SnapshotRecorder) {
        let mut context = Context::new();
        let parameters = Parameters {
            num_days,
            non_neighbor_transmission_chance: 0.0,
            ..Parameters::default()
        };
        initialize(&mut context, parameters, reference_districts()).unwrap();
        let recorder = SnapshotRecorder::new();
        context.add_display(recorder.clone());
        (context, recorder)
    }

    fn published_days(recorder: &SnapshotRecorder) -> Vec<usize> {
        recorder.snapshots().iter().map(|snapshot| snapshot.day).collect()
    }

    #[test]
    fn starts_idle() {
        let (context, recorder) = setup(5);
        assert_eq!(context.simulation_status(), SimulationStatus::Idle);
        assert_eq!(context.current_day(), 0);
        assert!(recorder.is_empty());
    }

    #[test]
    fn runs_to_completion() {
        let (mut context, recorder) = setup(5);
        context.start_simulation();
        assert_eq!(context.simulation_status(), SimulationStatus::Running);

        context.execute();
        assert_eq!(context.simulation_status(), SimulationStatus::Finished);
        assert_eq!(context.current_day(), 5);
        assert_eq!(published_days(&recorder), vec![1, 2, 3, 4, 5]);
        // Five ticks that advance a day, then one that observes the end.
        assert_eq!(context.get_current_time(), 6.0);
        assert_eq!(context.remaining_plan_count(), 0);
    }

    #[test]
    fn zero_days_finishes_on_first_tick() {
        let (mut context, recorder) = setup(0);
        context.start_simulation();
        context.execute();
        assert_eq!(context.simulation_status(), SimulationStatus::Finished);
        assert!(recorder.is_empty());
    }

    #[test]
    fn start_while_running_is_ignored() {
        let (mut context, recorder) = setup(5);
        context.start_simulation();
        context.add_plan(2.5, |context| context.start_simulation());
        context.execute();

        assert_eq!(published_days(&recorder), vec![1, 2, 3, 4, 5]);
        assert_eq!(context.get_current_time(), 6.0);
    }

    #[test]
    fn start_while_paused_is_ignored() {
        let (mut context, recorder) = setup(5);
        let observed = Rc::new(RefCell::new(None));

        context.start_simulation();
        context.add_plan(2.5, |context| context.pause_or_resume());
        let seen = observed.clone();
        context.add_plan(3.0, move |context| {
            context.start_simulation();
            *seen.borrow_mut() = Some((
                context.simulation_status(),
                context.current_day(),
                context.remaining_plan_count(),
            ));
        });
        context.execute();

        assert_eq!(*observed.borrow(), Some((SimulationStatus::Paused, 2, 0)));
        assert_eq!(context.simulation_status(), SimulationStatus::Paused);
        assert_eq!(published_days(&recorder), vec![1, 2]);
    }

    #[test]
    fn pause_freezes_the_day() {
        let (mut context, recorder) = setup(5);
        let observed = Rc::new(RefCell::new(None));

        context.start_simulation();
        context.add_plan(3.5, |context| context.pause_or_resume());
        let seen = observed.clone();
        context.add_plan(9.5, move |context| {
            *seen.borrow_mut() = Some((context.simulation_status(), context.current_day()));
        });
        context.add_plan(10.0, |context| context.pause_or_resume());
        context.execute();

        assert_eq!(*observed.borrow(), Some((SimulationStatus::Paused, 3)));
        assert_eq!(published_days(&recorder), vec![1, 2, 3, 4, 5]);
        // Days 4 and 5 at 11 and 12, the end is observed at 13.
        assert_eq!(context.get_current_time(), 13.0);
        assert_eq!(context.simulation_status(), SimulationStatus::Finished);
    }

    #[test]
    fn pause_is_ignored_when_idle_or_finished() {
        let (mut context, _recorder) = setup(2);
        context.pause_or_resume();
        assert_eq!(context.simulation_status(), SimulationStatus::Idle);
        assert_eq!(context.remaining_plan_count(), 0);

        context.start_simulation();
        context.execute();
        context.pause_or_resume();
        assert_eq!(context.simulation_status(), SimulationStatus::Finished);
        assert_eq!(context.remaining_plan_count(), 0);
    }

    #[test]
    fn reset_stops_the_run_and_clears_everything() {
        let (mut context, recorder) = setup(10);
        context.start_simulation();
        context.add_plan(3.5, |context| context.reset_simulation());
        context.execute();

        assert_eq!(context.simulation_status(), SimulationStatus::Idle);
        assert_eq!(context.current_day(), 0);
        assert_eq!(context.get_current_time(), 3.5);
        assert_eq!(context.remaining_plan_count(), 0);
        assert!(recorder.is_empty());
        for region in context.get_region_graph().unwrap().regions() {
            assert_eq!(region.infected(), 0.0);
            assert_eq!(region.susceptible(), region.population() as f64);
        }
    }

    #[test]
    fn reset_while_paused_or_finished() {
        let (mut context, recorder) = setup(3);
        context.start_simulation();
        context.add_plan(1.5, |context| context.pause_or_resume());
        context.add_plan(2.0, |context| context.reset_simulation());
        context.execute();
        assert_eq!(context.simulation_status(), SimulationStatus::Idle);

        context.start_simulation();
        context.execute();
        context.reset_simulation();
        assert_eq!(context.simulation_status(), SimulationStatus::Idle);
        assert!(recorder.is_empty());
        let graph = context.get_region_graph().unwrap();
        assert!(graph.regions().all(|region| region.infected() == 0.0));
    }

    #[test]
    fn a_reset_run_stays_uninfected() {
        let (mut context, recorder) = setup(4);
        context.reset_simulation();
        context.start_simulation();
        context.execute();

        assert_eq!(recorder.len(), 4);
        assert!(recorder.snapshots().iter().all(|snapshot| snapshot.total_infected() == 0));
    }

    #[test]
    fn restart_after_finish_continues_from_current_state() {
        let (mut context, recorder) = setup(3);
        context.start_simulation();
        context.execute();
        let first_run_end = recorder.last().unwrap().total_infected();

        context.start_simulation();
        assert_eq!(context.current_day(), 0);
        context.execute();

        assert_eq!(published_days(&recorder), vec![1, 2, 3, 1, 2, 3]);
        assert!(recorder.last().unwrap().total_infected() > first_run_end);
    }

    #[test]
    fn reseeding_after_reset_replays_the_first_run() {
        let (mut context, recorder) = setup(3);
        context.start_simulation();
        context.execute();
        let first_run = recorder.snapshots();

        context.reset_simulation();
        context.restore_region_seeding();
        context.start_simulation();
        context.execute();
        assert_eq!(recorder.snapshots(), first_run);
    }
}
