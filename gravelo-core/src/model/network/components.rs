//! Network components - nodes and road/trail segments

use geo::Point;

use crate::OsmNodeId;

/// Network graph node
#[derive(Debug, Clone)]
pub struct CycleNode {
    /// OSM ID of the node
    pub id: OsmNodeId,
    /// Node coordinates (x = lon, y = lat)
    pub geometry: Point<f64>,
}

/// Bicycle access annotation of a segment, from the OSM `bicycle` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BicycleAccess {
    /// The way is signposted for bicycles (`bicycle=designated`)
    Designated,
    /// Bicycles are explicitly banned (`bicycle=no`)
    No,
    /// Tag absent or carrying any other value
    #[default]
    Unspecified,
}

impl BicycleAccess {
    pub(crate) fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("designated") => Self::Designated,
            Some("no") => Self::No,
            _ => Self::Unspecified,
        }
    }
}

/// Network graph edge (road or trail segment).
///
/// Attributes are validated when the network is built: `length_m` is
/// strictly positive and finite, so cost evaluation never divides by zero.
#[derive(Debug, Clone)]
pub struct CycleEdge {
    /// Segment length in meters
    pub length_m: f64,
    /// OSM highway classification, if tagged
    pub highway: Option<String>,
    /// OSM surface classification; may be composite (`;`-separated)
    pub surface: Option<String>,
    /// Bicycle access annotation
    pub bicycle: BicycleAccess,
    /// Display name; does not affect cost
    pub name: Option<String>,
}
