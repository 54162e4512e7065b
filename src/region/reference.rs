/*!

The seven districts of the Plzeň region used by the reference run. Tachov starts with ten
infected people; every other district starts clean.

*/

use crate::region::RegionSpec;

pub fn reference_districts() -> Vec<RegionSpec> {
    vec![
        RegionSpec::new("Plzeň-město", 169_033, 49.7384, 13.3736)
            .neighbors(["Plzeň-jih", "Plzeň-sever"]),
        RegionSpec::new("Plzeň-jih", 63_852, 49.6116, 13.4858)
            .neighbors(["Plzeň-město", "Plzeň-sever", "Rokycany", "Klatovy"]),
        RegionSpec::new("Plzeň-sever", 79_527, 49.8533, 13.3693)
            .neighbors(["Plzeň-město", "Plzeň-jih", "Rokycany", "Tachov"]),
        RegionSpec::new("Klatovy", 86_542, 49.3954, 13.2957)
            .neighbors(["Plzeň-jih", "Domažlice"]),
        RegionSpec::new("Domažlice", 60_930, 49.4403, 12.9303)
            .neighbors(["Klatovy", "Tachov"]),
        RegionSpec::new("Rokycany", 47_175, 49.7422, 13.5942)
            .neighbors(["Plzeň-jih", "Plzeň-sever"]),
        RegionSpec::new("Tachov", 34_943, 49.7956, 12.6309)
            .neighbors(["Plzeň-sever", "Domažlice"])
            .infected(10.0),
    ]
}
