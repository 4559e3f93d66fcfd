//! Dataset columns and their role flags
//!
//! The host data-binding collaborator supplies one [`ModelColumn`] per
//! dataset field. All columns of one dataset share the same row count.

use serde::{Deserialize, Serialize};

use crate::data_type::DataType;

/// Per-column metadata naming which semantic role the column carries
///
/// Exactly one flag is expected to be set; classification picks the first
/// match in precedence order when several are.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleFlags {
    pub coordinates: bool,
    pub elemental_coordinates: bool,
    pub topology_3d: bool,
    pub topology_1d: bool,
    pub topology_sharp_edge: bool,
    pub nodal_field_value: bool,
    pub elemental_field_value: bool,
    pub component_color: bool,
    pub component_tag: bool,
    pub highlight_location: bool,
}

impl RoleFlags {
    /// Flags with only the role matching `data_type` set
    pub fn single(data_type: DataType) -> Self {
        let mut flags = Self::default();
        match data_type {
            DataType::Coordinates => flags.coordinates = true,
            DataType::ElementalCoordinates => flags.elemental_coordinates = true,
            DataType::TriangleIndices => flags.topology_3d = true,
            DataType::LineIndices => flags.topology_1d = true,
            DataType::SharpEdgeIndices => flags.topology_sharp_edge = true,
            DataType::NodalFieldValues => flags.nodal_field_value = true,
            DataType::ElementalFieldValues => flags.elemental_field_value = true,
            DataType::ComponentColors => flags.component_color = true,
            DataType::ComponentTags => flags.component_tag = true,
            DataType::HighlightLocations => flags.highlight_location = true,
        }
        flags
    }

    /// True when no role flag is set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// One dataset column: role flags plus the raw cell values
///
/// `values` has one entry per row; a `None` cell carries no data for that
/// row. `highlights` is an optional parallel sequence driving component
/// visibility, and `field_name` names the solution field a
/// nodal/elemental-value column belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelColumn {
    pub roles: RoleFlags,
    pub values: Vec<Option<String>>,
    pub highlights: Option<Vec<Option<String>>>,
    pub field_name: Option<String>,
}

impl ModelColumn {
    pub fn new(roles: RoleFlags, values: Vec<Option<String>>) -> Self {
        Self {
            roles,
            values,
            highlights: None,
            field_name: None,
        }
    }

    /// Attach a parallel highlight sequence
    pub fn with_highlights(mut self, highlights: Vec<Option<String>>) -> Self {
        self.highlights = Some(highlights);
        self
    }

    /// Name the solution field this column belongs to
    pub fn with_field_name(mut self, name: impl Into<String>) -> Self {
        self.field_name = Some(name.into());
        self
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
