//! Synthetic street grid for the demo.
//!
//! Six ways around a small inner-city block (coordinates loosely follow
//! Stuttgart-Mitte), one of them a single-node turning circle.  Mittelgasse
//! is one-way against its node order.

use std::io::Cursor;

use wm_spatial::{load_ways_reader, SpatialResult, Way};

const NODES_CSV: &str = "\
node_id,lat,lon\n\
1,48.77600,9.17600\n\
2,48.77600,9.17900\n\
3,48.77600,9.18200\n\
4,48.77800,9.17600\n\
5,48.77800,9.17900\n\
6,48.77800,9.18200\n\
7,48.77700,9.18350\n\
";

const WAYS_CSV: &str = "\
way_id,nodes,tags\n\
1001,1 2 3,highway=residential;name=Südstraße\n\
1002,4 5 6,highway=residential;name=Nordstraße;oneway=yes\n\
1003,1 4,highway=residential;name=Westweg\n\
1004,5 2,highway=living_street;name=Mittelgasse;oneway=-1\n\
1005,3 7 6,highway=cycleway;name=Ostbogen\n\
1006,7,highway=turning_circle\n\
";

/// Load the demo ways.
pub fn build_ways() -> SpatialResult<Vec<Way>> {
    load_ways_reader(Cursor::new(NODES_CSV), Cursor::new(WAYS_CSV))
}
