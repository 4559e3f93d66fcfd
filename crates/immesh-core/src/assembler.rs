//! Component assembly
//!
//! The assembler drives one full decoding pass: classify columns, group
//! rows by tag, and for each tag decode every preferred data type through
//! the path the capability table selects (binary raster codec or text
//! transform), producing one [`Component`] per tag in tag-discovery order.

use std::collections::HashMap;

use futures_util::future::join_all;
use serde::{Deserialize, Serialize};

use immesh_io::{codec, text, HighlightLocation, PixelDecode, RowSet, Vec3d};
use immesh_io::{DecodeError, ParseError};

use crate::column::ModelColumn;
use crate::component::Component;
use crate::data_type::{DataType, FieldKind};
use crate::error::{AssemblyError, AssemblyResult};
use crate::grouping::TagGroups;

/// What to do when a binary payload fails to decode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecodePolicy {
    /// Drop that data type for that tag, log it, and record it in the
    /// assembly report; the rest of the pass completes
    #[default]
    SkipAndReport,

    /// Fail the whole assembly pass on the first decode error
    Abort,
}

/// Caller-tunable knobs for one assembly pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssemblyOptions {
    /// Divisor applied to rescaled data types
    pub scale: f64,

    /// Decode failure policy
    pub policy: DecodePolicy,

    /// Which solution field to decode when several field columns share a
    /// data type; the first column wins when unset
    pub active_field: Option<String>,
}

impl Default for AssemblyOptions {
    fn default() -> Self {
        Self {
            scale: codec::DEFAULT_SCALE,
            policy: DecodePolicy::default(),
            active_field: None,
        }
    }
}

/// A data type dropped from one tag by the skip-and-report policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DroppedField {
    pub tag: String,
    pub data_type: DataType,
    pub reason: String,
}

/// The outcome of one assembly pass: every component, in tag-discovery
/// order, plus a structured account of what was dropped
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Assembly {
    pub components: Vec<Component>,
    pub dropped: Vec<DroppedField>,
}

/// Field names available per solution family
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldNames {
    pub nodal: Vec<String>,
    pub elemental: Vec<String>,
}

/// Classified view of a dataset's columns
///
/// Mesh data types map to one column each; solution-field data types may
/// have several columns, one per field name. Columns whose role flags
/// match nothing are recorded rather than failing the pass.
#[derive(Debug, Clone, Default)]
pub struct ColumnIndex {
    mesh: HashMap<DataType, usize>,
    solution: HashMap<DataType, Vec<(String, usize)>>,
    /// Positions of columns that failed classification
    pub unclassified: Vec<usize>,
}

impl ColumnIndex {
    /// Classify every column of the dataset
    pub fn build(columns: &[ModelColumn]) -> Self {
        let mut index = Self::default();
        for (at, column) in columns.iter().enumerate() {
            match DataType::classify(&column.roles) {
                Ok(data_type) if data_type.is_solution_field() => {
                    let field = column.field_name.clone().unwrap_or_default();
                    index
                        .solution
                        .entry(data_type)
                        .or_default()
                        .push((field, at));
                }
                Ok(data_type) => {
                    index.mesh.insert(data_type, at);
                }
                Err(_) => {
                    tracing::warn!(column = at, "column role flags match no data type; skipping");
                    index.unclassified.push(at);
                }
            }
        }
        index
    }

    /// The column carrying `data_type`, honoring the active solution field
    pub fn column_for(&self, data_type: DataType, active_field: Option<&str>) -> Option<usize> {
        if data_type.is_solution_field() {
            let fields = self.solution.get(&data_type)?;
            match active_field {
                Some(name) => fields.iter().find(|(f, _)| f == name).map(|&(_, at)| at),
                None => fields.first().map(|&(_, at)| at),
            }
        } else {
            self.mesh.get(&data_type).copied()
        }
    }

    /// The component-tag column, if any
    pub fn tag_column(&self) -> Option<usize> {
        self.mesh.get(&DataType::ComponentTags).copied()
    }

    /// Solution field names present in the dataset, per family
    pub fn available_field_names(&self) -> FieldNames {
        let mut names = FieldNames::default();
        for (&data_type, fields) in &self.solution {
            let bucket = match data_type.capabilities().field_kind {
                Some(FieldKind::Nodal) => &mut names.nodal,
                Some(FieldKind::Elemental) => &mut names.elemental,
                None => continue,
            };
            for (field, _) in fields {
                if !bucket.contains(field) {
                    bucket.push(field.clone());
                }
            }
        }
        names
    }
}

/// One decoded column slice, tagged with the component field it fills
enum DecodedValue {
    Coordinates(Vec<Vec3d>),
    Triangles(Vec<[u32; 3]>),
    Lines(Vec<[u32; 2]>),
    SharpEdges(Vec<[u32; 2]>),
    FieldValues(Vec<f64>),
    Color(Vec<f64>),
    Highlights(Vec<HighlightLocation>),
}

enum FieldFailure {
    Decode(DecodeError),
    Parse(ParseError),
}

impl From<DecodeError> for FieldFailure {
    fn from(err: DecodeError) -> Self {
        FieldFailure::Decode(err)
    }
}

impl From<ParseError> for FieldFailure {
    fn from(err: ParseError) -> Self {
        FieldFailure::Parse(err)
    }
}

/// Decode one data type's cells for one tag slice
///
/// Returns `Ok(None)` when the column contributes nothing for this tag
/// (e.g. an empty binary payload).
async fn decode_field(
    data_type: DataType,
    column: &ModelColumn,
    rows: &RowSet,
    decoder: &dyn PixelDecode,
    scale: f64,
) -> Result<Option<DecodedValue>, FieldFailure> {
    let cells = &column.values;
    if data_type.uses_binary_encoding() {
        let Some(payload) = codec::concat_cells(cells, Some(rows)) else {
            return Ok(None);
        };
        let value = match data_type {
            DataType::Coordinates => {
                DecodedValue::Coordinates(codec::decode_coordinates(&payload, decoder, scale).await?)
            }
            DataType::TriangleIndices => {
                DecodedValue::Triangles(codec::decode_index_triples(&payload, decoder).await?)
            }
            DataType::LineIndices => {
                DecodedValue::Lines(codec::decode_index_pairs(&payload, decoder).await?)
            }
            DataType::SharpEdgeIndices => {
                DecodedValue::SharpEdges(codec::decode_index_pairs(&payload, decoder).await?)
            }
            DataType::NodalFieldValues => {
                DecodedValue::FieldValues(codec::decode_scalars(&payload, decoder, scale).await?)
            }
            _ => return Ok(None),
        };
        return Ok(Some(value));
    }

    let value = match data_type {
        DataType::ElementalCoordinates => {
            DecodedValue::Coordinates(text::parse_coordinates(cells, Some(rows))?)
        }
        DataType::ElementalFieldValues => {
            DecodedValue::FieldValues(text::parse_scalars(cells, Some(rows))?)
        }
        DataType::ComponentColors => DecodedValue::Color(text::parse_scalars(cells, Some(rows))?),
        DataType::HighlightLocations => {
            DecodedValue::Highlights(text::parse_highlight_locations(cells, Some(rows))?)
        }
        // The tag column is the grouping key, not component data
        _ => return Ok(None),
    };
    Ok(Some(value))
}

fn store(component: &mut Component, value: DecodedValue) {
    match value {
        DecodedValue::Coordinates(v) => component.coordinates = Some(v),
        DecodedValue::Triangles(v) => component.triangle_topology = Some(v),
        DecodedValue::Lines(v) => component.line_topology = Some(v),
        DecodedValue::SharpEdges(v) => component.sharp_edge_topology = Some(v),
        DecodedValue::FieldValues(v) => component.field_values = Some(v),
        DecodedValue::Color(v) => component.color = Some(v),
        DecodedValue::Highlights(v) => component.highlight_locations = Some(v),
    }
}

/// A component is hidden when any included row of a highlighted column has
/// no highlight entry
fn is_hidden(highlights: &[Option<String>], rows: &RowSet) -> bool {
    rows.iter()
        .any(|&row| highlights.get(row).map_or(false, Option::is_none))
}

async fn assemble_component(
    tag: &str,
    rows: &RowSet,
    columns: &[ModelColumn],
    index: &ColumnIndex,
    preferred: &[DataType],
    decoder: &dyn PixelDecode,
    options: &AssemblyOptions,
) -> AssemblyResult<(Component, Vec<DroppedField>)> {
    let mut component = Component::new(tag);
    let mut dropped = Vec::new();

    for &data_type in preferred {
        let Some(at) = index.column_for(data_type, options.active_field.as_deref()) else {
            continue;
        };
        let column = &columns[at];

        if let Some(highlights) = &column.highlights {
            if is_hidden(highlights, rows) {
                component.visible = false;
            }
        }

        match decode_field(data_type, column, rows, decoder, options.scale).await {
            Ok(Some(value)) => store(&mut component, value),
            Ok(None) => {}
            Err(FieldFailure::Parse(source)) => {
                return Err(AssemblyError::Parse {
                    tag: tag.to_string(),
                    data_type,
                    source,
                });
            }
            Err(FieldFailure::Decode(source)) => match options.policy {
                DecodePolicy::Abort => {
                    return Err(AssemblyError::Decode {
                        tag: tag.to_string(),
                        data_type,
                        source,
                    });
                }
                DecodePolicy::SkipAndReport => {
                    tracing::warn!(
                        tag,
                        ?data_type,
                        error = %source,
                        "dropping undecodable field from component"
                    );
                    dropped.push(DroppedField {
                        tag: tag.to_string(),
                        data_type,
                        reason: source.to_string(),
                    });
                }
            },
        }
    }

    component.finalize();
    Ok((component, dropped))
}

/// Run one assembly pass over the dataset
///
/// Emits one component per tag, in tag-discovery order. Every tag's decode
/// work runs as its own task with exclusive ownership of its accumulator;
/// tags proceed concurrently and the pass resolves once all of them have
/// settled.
pub async fn assemble(
    columns: &[ModelColumn],
    preferred: &[DataType],
    decoder: &dyn PixelDecode,
    options: &AssemblyOptions,
) -> AssemblyResult<Assembly> {
    let index = ColumnIndex::build(columns);
    let tag_column = index.tag_column().ok_or(AssemblyError::MissingTagColumn)?;
    let groups = TagGroups::from_tags(&columns[tag_column].values);

    let tasks = groups
        .iter()
        .map(|(tag, rows)| assemble_component(tag, rows, columns, &index, preferred, decoder, options));
    let results = join_all(tasks).await;

    let mut assembly = Assembly::default();
    for result in results {
        let (component, dropped) = result?;
        assembly.components.push(component);
        assembly.dropped.extend(dropped);
    }
    Ok(assembly)
}
