use crate::{
    error::SpreadError,
    region::RegionSpec,
};
use std::{fs::File, io::BufReader, path::Path};

/// Reads region definitions from a JSON array of [`RegionSpec`]s:
///
/// ```json
/// [
///   { "name": "Tachov", "population": 34943, "coords": { "lat": 49.7956, "lng": 12.6309 },
///     "neighbors": ["Plzeň-sever", "Domažlice"], "infected": 10 }
/// ]
/// ```
///
/// `neighbors` and `infected` may be omitted. The definitions are not validated here;
/// `RegionGraph::from_specs` does that.
pub fn load_region_specs(path: impl AsRef<Path>) -> Result<Vec<RegionSpec>, SpreadError> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}
