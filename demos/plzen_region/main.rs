//! Runs the seven-district Plzeň scenario.
//!
//! ```text
//! cargo run --example plzen-region [parameters.json] [regions.json]
//! ```
//!
//! Results are logged day by day and written as CSV to `plzen_region.csv`. A scripted pause
//! between days 10 and 15 stands in for the UI's pause button.

use district_spread::{
    initialize, load_parameters_from_json, load_region_specs, reference_districts,
    log::{enable_logging, info},
    Context, ContextDisplayExt, ContextDriverExt, ContextRegionExt, CsvDisplay, LogDisplay,
    MarkerLayer, Parameters, SpreadError,
};
use std::{fs::File, io::BufWriter};

fn main() -> Result<(), SpreadError> {
    enable_logging()?;

    let mut args = std::env::args().skip(1);
    let parameters = match args.next() {
        Some(path) => load_parameters_from_json(path)?,
        None => Parameters::default(),
    };
    let regions = match args.next() {
        Some(path) => load_region_specs(path)?,
        None => reference_districts(),
    };
    let tick_interval = parameters.tick_interval;
    let seed = parameters.seed;

    let mut context = Context::new();
    initialize(&mut context, parameters, regions)?;

    let graph = context.get_region_graph().ok_or(SpreadError::EmptyGraph)?;
    let markers = MarkerLayer::new(graph, seed)?;
    let marker_view = markers.view();
    context.add_display(LogDisplay);
    context.add_display(CsvDisplay::new(BufWriter::new(File::create("plzen_region.csv")?)));
    context.add_display(markers);

    context.start_simulation();
    context.add_plan(10.5 * tick_interval, |context| context.pause_or_resume());
    context.add_plan(15.5 * tick_interval, |context| context.pause_or_resume());
    context.execute();

    info!(
        "finished on day {} with {} map markers",
        context.current_day(),
        marker_view.len()
    );
    Ok(())
}
