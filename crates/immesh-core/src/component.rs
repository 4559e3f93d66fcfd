//! Assembled components
//!
//! A [`Component`] is the renderer-ready bundle for one tag: named groups
//! of coordinates, topology, field values, colors, and highlight markers.
//! Components are produced once per assembly pass and handed off immutable.

use serde::{Deserialize, Serialize};

use immesh_io::{HighlightLocation, Vec3d};

/// Axis-aligned bounding box of a component's coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Vec3d,
    pub max: Vec3d,
}

impl BoundingBox {
    /// Coordinate-wise min/max of a point set; `None` for an empty set
    pub fn from_points(points: &[Vec3d]) -> Option<Self> {
        let first = points.first()?;
        let mut min = *first;
        let mut max = *first;
        for p in &points[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            min.z = min.z.min(p.z);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            max.z = max.z.max(p.z);
        }
        Some(Self { min, max })
    }

    /// As a flat (min_x, min_y, min_z, max_x, max_y, max_z) array
    pub fn to_array(&self) -> [f64; 6] {
        [
            self.min.x, self.min.y, self.min.z, self.max.x, self.max.y, self.max.z,
        ]
    }
}

/// The assembled geometry and fields for one tag
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Component {
    /// Tag value naming this component
    pub name: String,

    /// Node positions
    pub coordinates: Option<Vec<Vec3d>>,

    /// Triangle topology as node-index triples
    pub triangle_topology: Option<Vec<[u32; 3]>>,

    /// Line topology as node-index pairs
    pub line_topology: Option<Vec<[u32; 2]>>,

    /// Sharp-edge topology as node-index pairs
    pub sharp_edge_topology: Option<Vec<[u32; 2]>>,

    /// Solution field values
    pub field_values: Option<Vec<f64>>,

    /// Component color channels
    pub color: Option<Vec<f64>>,

    /// Labeled markers attached to this component
    pub highlight_locations: Option<Vec<HighlightLocation>>,

    /// Defined iff `coordinates` is defined and non-empty
    pub bounding_box: Option<BoundingBox>,

    /// Cleared when any included highlight entry is null
    pub visible: bool,
}

impl Component {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visible: true,
            ..Self::default()
        }
    }

    /// Whether this component carries basic renderable geometry:
    /// coordinates plus either triangles-with-sharp-edges or lines
    pub fn is_basic(&self) -> bool {
        self.coordinates.is_some()
            && ((self.triangle_topology.is_some() && self.sharp_edge_topology.is_some())
                || self.line_topology.is_some())
    }

    /// Compute the bounding box once all fields are in place
    ///
    /// The box is set iff coordinates are present and non-empty.
    pub fn finalize(&mut self) {
        self.bounding_box = self
            .coordinates
            .as_deref()
            .and_then(BoundingBox::from_points);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box_from_points() {
        let points = vec![Vec3d::new(0.0, 0.0, 0.0), Vec3d::new(2.0, 3.0, 4.0)];
        let bbox = BoundingBox::from_points(&points).unwrap();
        assert_eq!(bbox.to_array(), [0.0, 0.0, 0.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_bounding_box_of_empty_set_is_none() {
        assert_eq!(BoundingBox::from_points(&[]), None);
    }

    #[test]
    fn test_finalize_requires_nonempty_coordinates() {
        let mut component = Component::new("hull");
        component.finalize();
        assert!(component.bounding_box.is_none());

        component.coordinates = Some(Vec::new());
        component.finalize();
        assert!(component.bounding_box.is_none());

        component.coordinates = Some(vec![Vec3d::new(1.0, -2.0, 3.0)]);
        component.finalize();
        let bbox = component.bounding_box.unwrap();
        assert_eq!(bbox.min, bbox.max);
    }

    #[test]
    fn test_is_basic() {
        let mut component = Component::new("hull");
        assert!(!component.is_basic());

        component.coordinates = Some(vec![Vec3d::default()]);
        component.triangle_topology = Some(vec![[0, 0, 0]]);
        assert!(!component.is_basic());

        component.sharp_edge_topology = Some(vec![[0, 0]]);
        assert!(component.is_basic());

        let mut wire = Component::new("wire");
        wire.coordinates = Some(vec![Vec3d::default()]);
        wire.line_topology = Some(vec![[0, 0]]);
        assert!(wire.is_basic());
    }
}
