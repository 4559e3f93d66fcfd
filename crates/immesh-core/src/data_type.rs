//! Column classification and the capability table
//!
//! Every dataset column maps to exactly one [`DataType`]. All downstream
//! behavior (decode path, tuple arity, rescaling, solution-field handling)
//! is driven by one capability table so the answers can never drift apart.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::column::RoleFlags;

/// A column's role flags match no known data type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Column role flags match no data type")]
pub struct ClassificationError;

/// The closed set of column semantics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    Coordinates,
    ElementalCoordinates,
    TriangleIndices,
    LineIndices,
    SharpEdgeIndices,
    NodalFieldValues,
    ElementalFieldValues,
    ComponentColors,
    ComponentTags,
    HighlightLocations,
}

/// How a data type's cells are transported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Encoding {
    /// Whitespace/semicolon separated numeric text
    Text,
    /// Base64-encoded raster image packing one u32 per pixel
    Base64Raster,
}

/// Which solution-field family a data type belongs to, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    Nodal,
    Elemental,
}

/// Static capabilities of one data type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub encoding: Encoding,
    /// Values per tuple in the decoded output (1 = flat)
    pub arity: usize,
    /// Whether decoded integers are divided by the scale constant
    pub rescale: bool,
    pub field_kind: Option<FieldKind>,
}

impl DataType {
    /// All data types, in classification precedence order
    pub const ALL: [DataType; 10] = [
        DataType::Coordinates,
        DataType::ElementalCoordinates,
        DataType::TriangleIndices,
        DataType::LineIndices,
        DataType::SharpEdgeIndices,
        DataType::NodalFieldValues,
        DataType::ElementalFieldValues,
        DataType::ComponentColors,
        DataType::ComponentTags,
        DataType::HighlightLocations,
    ];

    /// Classify a column by its role flags
    ///
    /// Flags are tested in the fixed precedence order of [`DataType::ALL`];
    /// the first set flag wins.
    pub fn classify(roles: &RoleFlags) -> Result<Self, ClassificationError> {
        if roles.coordinates {
            Ok(DataType::Coordinates)
        } else if roles.elemental_coordinates {
            Ok(DataType::ElementalCoordinates)
        } else if roles.topology_3d {
            Ok(DataType::TriangleIndices)
        } else if roles.topology_1d {
            Ok(DataType::LineIndices)
        } else if roles.topology_sharp_edge {
            Ok(DataType::SharpEdgeIndices)
        } else if roles.nodal_field_value {
            Ok(DataType::NodalFieldValues)
        } else if roles.elemental_field_value {
            Ok(DataType::ElementalFieldValues)
        } else if roles.component_color {
            Ok(DataType::ComponentColors)
        } else if roles.component_tag {
            Ok(DataType::ComponentTags)
        } else if roles.highlight_location {
            Ok(DataType::HighlightLocations)
        } else {
            Err(ClassificationError)
        }
    }

    /// The capability table; the single source of truth for per-type
    /// behavior
    pub fn capabilities(self) -> Capabilities {
        use Encoding::*;
        match self {
            DataType::Coordinates => Capabilities {
                encoding: Base64Raster,
                arity: 3,
                rescale: true,
                field_kind: None,
            },
            DataType::ElementalCoordinates => Capabilities {
                encoding: Text,
                arity: 3,
                rescale: false,
                field_kind: None,
            },
            DataType::TriangleIndices => Capabilities {
                encoding: Base64Raster,
                arity: 3,
                rescale: false,
                field_kind: None,
            },
            DataType::LineIndices => Capabilities {
                encoding: Base64Raster,
                arity: 2,
                rescale: false,
                field_kind: None,
            },
            DataType::SharpEdgeIndices => Capabilities {
                encoding: Base64Raster,
                arity: 2,
                rescale: false,
                field_kind: None,
            },
            DataType::NodalFieldValues => Capabilities {
                encoding: Base64Raster,
                arity: 1,
                rescale: true,
                field_kind: Some(FieldKind::Nodal),
            },
            DataType::ElementalFieldValues => Capabilities {
                encoding: Text,
                arity: 1,
                rescale: false,
                field_kind: Some(FieldKind::Elemental),
            },
            DataType::ComponentColors => Capabilities {
                encoding: Text,
                arity: 1,
                rescale: false,
                field_kind: None,
            },
            DataType::ComponentTags => Capabilities {
                encoding: Text,
                arity: 1,
                rescale: false,
                field_kind: None,
            },
            DataType::HighlightLocations => Capabilities {
                encoding: Text,
                arity: 1,
                rescale: false,
                field_kind: None,
            },
        }
    }

    /// Whether this type's cells carry a base64 raster payload
    pub fn uses_binary_encoding(self) -> bool {
        self.capabilities().encoding == Encoding::Base64Raster
    }

    /// Values per decoded tuple (1 = flat sequence)
    pub fn tuple_arity(self) -> usize {
        self.capabilities().arity
    }

    /// Whether decoded integers are divided by the scale constant
    pub fn needs_rescale(self) -> bool {
        self.capabilities().rescale
    }

    /// Whether this type is a per-field solution value column
    pub fn is_solution_field(self) -> bool {
        self.capabilities().field_kind.is_some()
    }

    /// Whether this type contributes to basic renderable geometry
    /// (coordinates, topology, or color)
    pub fn is_basic_component_type(self) -> bool {
        matches!(
            self,
            DataType::Coordinates
                | DataType::TriangleIndices
                | DataType::LineIndices
                | DataType::SharpEdgeIndices
                | DataType::ComponentColors
        )
    }
}

/// Whether a set of decoded types is enough for basic renderable geometry:
/// coordinates plus either triangles-with-sharp-edges or lines
pub fn has_basic_data_types(types: &HashSet<DataType>) -> bool {
    types.contains(&DataType::Coordinates)
        && ((types.contains(&DataType::TriangleIndices)
            && types.contains(&DataType::SharpEdgeIndices))
            || types.contains(&DataType::LineIndices))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_every_single_flag() {
        for data_type in DataType::ALL {
            let flags = RoleFlags::single(data_type);
            assert_eq!(DataType::classify(&flags).unwrap(), data_type);
        }
    }

    #[test]
    fn test_classify_follows_precedence_order() {
        // Both coordinates and tag flags set: coordinates wins
        let mut flags = RoleFlags::single(DataType::ComponentTags);
        flags.coordinates = true;
        assert_eq!(DataType::classify(&flags).unwrap(), DataType::Coordinates);

        let mut flags = RoleFlags::single(DataType::HighlightLocations);
        flags.nodal_field_value = true;
        assert_eq!(
            DataType::classify(&flags).unwrap(),
            DataType::NodalFieldValues
        );
    }

    #[test]
    fn test_classify_empty_flags_fails() {
        assert_eq!(
            DataType::classify(&RoleFlags::default()),
            Err(ClassificationError)
        );
    }

    #[test]
    fn test_binary_types_match_capability_table() {
        let binary: Vec<DataType> = DataType::ALL
            .into_iter()
            .filter(|t| t.uses_binary_encoding())
            .collect();
        assert_eq!(
            binary,
            vec![
                DataType::Coordinates,
                DataType::TriangleIndices,
                DataType::LineIndices,
                DataType::SharpEdgeIndices,
                DataType::NodalFieldValues,
            ]
        );
    }

    #[test]
    fn test_arity_and_rescale() {
        assert_eq!(DataType::Coordinates.tuple_arity(), 3);
        assert_eq!(DataType::LineIndices.tuple_arity(), 2);
        assert_eq!(DataType::NodalFieldValues.tuple_arity(), 1);
        assert!(DataType::Coordinates.needs_rescale());
        assert!(DataType::NodalFieldValues.needs_rescale());
        assert!(!DataType::TriangleIndices.needs_rescale());
    }

    #[test]
    fn test_solution_field_types() {
        assert!(DataType::NodalFieldValues.is_solution_field());
        assert!(DataType::ElementalFieldValues.is_solution_field());
        assert!(!DataType::Coordinates.is_solution_field());
    }

    #[test]
    fn test_has_basic_data_types() {
        let surface = HashSet::from([
            DataType::Coordinates,
            DataType::TriangleIndices,
            DataType::SharpEdgeIndices,
        ]);
        assert!(has_basic_data_types(&surface));

        let wire = HashSet::from([DataType::Coordinates, DataType::LineIndices]);
        assert!(has_basic_data_types(&wire));

        let incomplete = HashSet::from([DataType::Coordinates, DataType::TriangleIndices]);
        assert!(!has_basic_data_types(&incomplete));

        let no_coords = HashSet::from([DataType::TriangleIndices, DataType::LineIndices]);
        assert!(!has_basic_data_types(&no_coords));
    }
}
