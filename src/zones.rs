// src/zones.rs
//
// Named polygonal regions of the camera frame, split into entry approaches
// and exit legs. Lookup order is a contract: zones are scanned in the order
// they were registered, and the first polygon containing the point wins, so
// overlap between polygons resolves deterministically.

use geo::{Contains, LineString, Point, Polygon};

/// Whether a zone is an approach into the intersection or a leg out of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneKind {
    Entry,
    Exit,
}

/// A named polygonal region in video pixel space.
#[derive(Debug, Clone)]
pub struct Zone {
    pub name: &'static str,
    pub kind: ZoneKind,
    polygon: Polygon<f64>,
}

impl Zone {
    /// `points` is the polygon's exterior ring; at least 3 vertices, simple
    /// (non-self-intersecting). The ring closes itself.
    pub fn new(name: &'static str, kind: ZoneKind, points: &[(f64, f64)]) -> Self {
        debug_assert!(points.len() >= 3, "zone {} needs at least 3 vertices", name);
        let polygon = Polygon::new(LineString::from(points.to_vec()), vec![]);
        Self {
            name,
            kind,
            polygon,
        }
    }

    /// Interior containment test. Points exactly on the boundary are not
    /// contained; the same rule applies to every zone test in the system.
    pub fn contains(&self, point: (i64, i64)) -> bool {
        self.polygon
            .contains(&Point::new(point.0 as f64, point.1 as f64))
    }
}

/// An ordered set of zones of one kind. Entry and exit sets are kept
/// separate and never mixed in a single lookup.
#[derive(Debug, Clone)]
pub struct ZoneSet {
    zones: Vec<Zone>,
}

impl ZoneSet {
    pub fn new(zones: Vec<Zone>) -> Self {
        Self { zones }
    }

    /// First zone (in registration order) whose polygon contains the point.
    /// Read-only and side-effect free.
    pub fn locate(&self, point: (i64, i64)) -> Option<&'static str> {
        self.zones
            .iter()
            .find(|zone| zone.contains(point))
            .map(|zone| zone.name)
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Zone> {
        self.zones.iter()
    }
}

/// Entry and exit zone sets for one camera view.
#[derive(Debug, Clone)]
pub struct ZoneRegistry {
    pub entry: ZoneSet,
    pub exit: ZoneSet,
}

impl ZoneRegistry {
    pub fn new(entry: ZoneSet, exit: ZoneSet) -> Self {
        Self { entry, exit }
    }

    /// The compiled-in four-way intersection layout. Coordinates are in the
    /// pixel space of the calibrated camera; they are not configurable at
    /// runtime.
    pub fn intersection_default() -> Self {
        let entry = ZoneSet::new(vec![
            Zone::new(
                "north_in",
                ZoneKind::Entry,
                &[
                    (768.82, 333.13),
                    (815.88, 368.43),
                    (994.31, 137.05),
                    (927.64, 115.49),
                ],
            ),
            Zone::new(
                "south_in",
                ZoneKind::Entry,
                &[
                    (982.54, 988.03),
                    (1208.03, 737.05),
                    (1245.29, 784.11),
                    (1059.01, 1003.72),
                ],
            ),
            Zone::new(
                "east_in",
                ZoneKind::Entry,
                &[
                    (1231.56, 348.82),
                    (1270.78, 309.60),
                    (1482.54, 491.96),
                    (1470.78, 550.78),
                ],
            ),
            Zone::new(
                "west_in",
                ZoneKind::Entry,
                &[
                    (796.27, 793.92),
                    (560.98, 650.78),
                    (547.25, 709.60),
                    (747.25, 833.13),
                ],
            ),
        ]);

        let exit = ZoneSet::new(vec![
            Zone::new(
                "north_out",
                ZoneKind::Exit,
                &[
                    (562.94, 621.37),
                    (796.27, 388.03),
                    (749.21, 352.74),
                    (555.09, 552.74),
                ],
            ),
            Zone::new(
                "south_out",
                ZoneKind::Exit,
                &[
                    (1229.60, 717.45),
                    (1472.74, 531.17),
                    (1484.50, 615.49),
                    (1280.58, 758.62),
                ],
            ),
            Zone::new(
                "east_out",
                ZoneKind::Exit,
                &[
                    (1204.11, 323.33),
                    (1006.07, 140.98),
                    (1076.66, 117.45),
                    (1239.41, 286.07),
                ],
            ),
            Zone::new(
                "west_out",
                ZoneKind::Exit,
                &[
                    (774.70, 839.01),
                    (811.96, 803.72),
                    (1008.03, 995.88),
                    (919.80, 997.84),
                ],
            ),
        ]);

        Self::new(entry, exit)
    }
}
