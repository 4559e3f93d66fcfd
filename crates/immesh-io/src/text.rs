//! Plain-text cell transforms
//!
//! Each dataset cell holds whitespace-separated numeric tokens (or one
//! semicolon-delimited highlight record). These functions turn the cells
//! selected by an optional row filter into typed sequences. Null and empty
//! cells are always skipped, whether or not a filter is supplied.

use crate::error::{ParseError, ParseResult};
use crate::types::{HighlightLocation, RowSet, Vec3d};

fn included<'a>(
    cells: &'a [Option<String>],
    rows: Option<&'a RowSet>,
) -> impl Iterator<Item = (usize, &'a str)> {
    cells.iter().enumerate().filter_map(move |(row, cell)| {
        if let Some(rows) = rows {
            if !rows.contains(&row) {
                return None;
            }
        }
        match cell.as_deref() {
            Some(text) if !text.is_empty() => Some((row, text)),
            _ => None,
        }
    })
}

fn parse_f64(token: &str, row: usize) -> ParseResult<f64> {
    token
        .parse()
        .map_err(|_| ParseError::InvalidToken {
            row,
            token: token.to_string(),
        })
}

fn parse_u32(token: &str, row: usize) -> ParseResult<u32> {
    token
        .parse()
        .map_err(|_| ParseError::InvalidToken {
            row,
            token: token.to_string(),
        })
}

/// Parse coordinate cells into 3D points
///
/// Tokens are grouped into triples within each cell; a trailing group of
/// fewer than three tokens is dropped. Tokens never span cell boundaries.
pub fn parse_coordinates(
    cells: &[Option<String>],
    rows: Option<&RowSet>,
) -> ParseResult<Vec<Vec3d>> {
    let mut points = Vec::new();
    for (row, text) in included(cells, rows) {
        let tokens = text
            .split_whitespace()
            .map(|t| parse_f64(t, row))
            .collect::<ParseResult<Vec<f64>>>()?;
        for triple in tokens.chunks_exact(3) {
            points.push(Vec3d::new(triple[0], triple[1], triple[2]));
        }
    }
    Ok(points)
}

fn parse_index_tuples<const N: usize>(
    cells: &[Option<String>],
    rows: Option<&RowSet>,
) -> ParseResult<Vec<[u32; N]>> {
    let mut tuples = Vec::new();
    for (row, text) in included(cells, rows) {
        let tokens = text
            .split_whitespace()
            .map(|t| parse_u32(t, row))
            .collect::<ParseResult<Vec<u32>>>()?;
        for group in tokens.chunks_exact(N) {
            let mut tuple = [0u32; N];
            tuple.copy_from_slice(group);
            tuples.push(tuple);
        }
    }
    Ok(tuples)
}

/// Parse index cells into pairs (line and sharp-edge topology)
pub fn parse_index_pairs(
    cells: &[Option<String>],
    rows: Option<&RowSet>,
) -> ParseResult<Vec<[u32; 2]>> {
    parse_index_tuples::<2>(cells, rows)
}

/// Parse index cells into triples (triangle topology)
pub fn parse_index_triples(
    cells: &[Option<String>],
    rows: Option<&RowSet>,
) -> ParseResult<Vec<[u32; 3]>> {
    parse_index_tuples::<3>(cells, rows)
}

/// Parse scalar cells into one flat sequence
///
/// All tokens of all included cells are flattened; there is no grouping and
/// no per-cell boundary rule.
pub fn parse_scalars(cells: &[Option<String>], rows: Option<&RowSet>) -> ParseResult<Vec<f64>> {
    let mut values = Vec::new();
    for (row, text) in included(cells, rows) {
        for token in text.split_whitespace() {
            values.push(parse_f64(token, row)?);
        }
    }
    Ok(values)
}

/// Parse highlight cells into labeled markers
///
/// Each included cell is one semicolon-delimited record of exactly 8 fields:
/// x, y, z, label, r, g, b, a.
pub fn parse_highlight_locations(
    cells: &[Option<String>],
    rows: Option<&RowSet>,
) -> ParseResult<Vec<HighlightLocation>> {
    let mut locations = Vec::new();
    for (row, text) in included(cells, rows) {
        let fields: Vec<&str> = text.split(';').map(str::trim).collect();
        if fields.len() != 8 {
            return Err(ParseError::MalformedRecord {
                row,
                fields: fields.len(),
            });
        }
        let position = Vec3d::new(
            parse_f64(fields[0], row)?,
            parse_f64(fields[1], row)?,
            parse_f64(fields[2], row)?,
        );
        let color = [
            parse_f64(fields[4], row)?,
            parse_f64(fields[5], row)?,
            parse_f64(fields[6], row)?,
            parse_f64(fields[7], row)?,
        ];
        locations.push(HighlightLocation::new(position, fields[3], color));
    }
    Ok(locations)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[Option<&str>]) -> Vec<Option<String>> {
        values.iter().map(|v| v.map(str::to_string)).collect()
    }

    #[test]
    fn test_parse_coordinates_skips_null_cells() {
        let cells = cells(&[Some("1 2 3"), None, Some("4 5 6")]);
        let points = parse_coordinates(&cells, None).unwrap();
        assert_eq!(
            points,
            vec![Vec3d::new(1.0, 2.0, 3.0), Vec3d::new(4.0, 5.0, 6.0)]
        );
    }

    #[test]
    fn test_parse_coordinates_drops_incomplete_trailing_group() {
        let cells = cells(&[Some("1 2 3 4 5")]);
        let points = parse_coordinates(&cells, None).unwrap();
        assert_eq!(points, vec![Vec3d::new(1.0, 2.0, 3.0)]);
    }

    #[test]
    fn test_coordinates_do_not_span_cell_boundaries() {
        // Two leftover tokens in the first cell do not combine with the
        // first token of the second cell.
        let cells = cells(&[Some("1 2 3 4 5"), Some("6 7 8 9")]);
        let points = parse_coordinates(&cells, None).unwrap();
        assert_eq!(
            points,
            vec![Vec3d::new(1.0, 2.0, 3.0), Vec3d::new(6.0, 7.0, 8.0)]
        );
    }

    #[test]
    fn test_parse_coordinates_with_row_filter() {
        let cells = cells(&[Some("1 2 3"), Some("4 5 6"), Some("7 8 9")]);
        let rows = RowSet::from([0, 2]);
        let points = parse_coordinates(&cells, Some(&rows)).unwrap();
        assert_eq!(
            points,
            vec![Vec3d::new(1.0, 2.0, 3.0), Vec3d::new(7.0, 8.0, 9.0)]
        );
    }

    #[test]
    fn test_parse_index_triples_drops_trailing_pair() {
        let cells = cells(&[Some("1 2 3 4 5")]);
        let triples = parse_index_triples(&cells, None).unwrap();
        assert_eq!(triples, vec![[1, 2, 3]]);
    }

    #[test]
    fn test_parse_index_pairs() {
        let cells = cells(&[Some("0 1 1 2 2")]);
        let pairs = parse_index_pairs(&cells, None).unwrap();
        assert_eq!(pairs, vec![[0, 1], [1, 2]]);
    }

    #[test]
    fn test_parse_scalars_flattens_across_cells() {
        let cells = cells(&[Some("1.5 2.5"), None, Some(""), Some("3.5")]);
        let values = parse_scalars(&cells, None).unwrap();
        assert_eq!(values, vec![1.5, 2.5, 3.5]);
    }

    #[test]
    fn test_parse_scalars_rejects_non_numeric_token() {
        let cells = cells(&[Some("1.5 abc")]);
        let err = parse_scalars(&cells, None).unwrap_err();
        assert!(matches!(err, ParseError::InvalidToken { row: 0, .. }));
    }

    #[test]
    fn test_parse_highlight_locations() {
        let cells = cells(&[Some("1;2;3;probe A;0.9;0.1;0.1;1")]);
        let locations = parse_highlight_locations(&cells, None).unwrap();
        assert_eq!(locations.len(), 1);
        assert_eq!(locations[0].position, Vec3d::new(1.0, 2.0, 3.0));
        assert_eq!(locations[0].label, "probe A");
        assert_eq!(locations[0].color, [0.9, 0.1, 0.1, 1.0]);
    }

    #[test]
    fn test_parse_highlight_locations_rejects_short_record() {
        let cells = cells(&[Some("1;2;3;label")]);
        let err = parse_highlight_locations(&cells, None).unwrap_err();
        assert!(matches!(
            err,
            ParseError::MalformedRecord { row: 0, fields: 4 }
        ));
    }
}
