//! Row-tag grouping
//!
//! The component-tag column assigns every row to one tag. [`TagGroups`]
//! partitions row indices by tag value while preserving the order in which
//! tags are first seen, so the assembled component list is stable across
//! passes.

use std::collections::HashMap;

use immesh_io::RowSet;

/// Ordered partition of row indices by tag value
///
/// Groups are pairwise disjoint and jointly cover every row exactly once.
#[derive(Debug, Clone, Default)]
pub struct TagGroups {
    entries: Vec<(String, RowSet)>,
    index: HashMap<String, usize>,
}

impl TagGroups {
    /// Partition rows by tag cell value, in discovery order
    ///
    /// A null tag cell groups its row under the empty tag.
    pub fn from_tags(tags: &[Option<String>]) -> Self {
        let mut groups = Self::default();
        for (row, tag) in tags.iter().enumerate() {
            let tag = tag.as_deref().unwrap_or("");
            let at = match groups.index.get(tag) {
                Some(&at) => at,
                None => {
                    groups.entries.push((tag.to_string(), RowSet::new()));
                    groups
                        .index
                        .insert(tag.to_string(), groups.entries.len() - 1);
                    groups.entries.len() - 1
                }
            };
            groups.entries[at].1.insert(row);
        }
        groups
    }

    /// Number of distinct tags
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Row set for one tag
    pub fn get(&self, tag: &str) -> Option<&RowSet> {
        self.index.get(tag).map(|&at| &self.entries[at].1)
    }

    /// Iterate groups in tag-discovery order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RowSet)> {
        self.entries.iter().map(|(tag, rows)| (tag.as_str(), rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(values: &[Option<&str>]) -> Vec<Option<String>> {
        values.iter().map(|v| v.map(str::to_string)).collect()
    }

    #[test]
    fn test_groups_partition_rows() {
        let groups = TagGroups::from_tags(&tags(&[Some("A"), Some("B"), Some("A")]));
        assert_eq!(groups.len(), 2);
        assert_eq!(groups.get("A"), Some(&RowSet::from([0, 2])));
        assert_eq!(groups.get("B"), Some(&RowSet::from([1])));

        // Disjoint and jointly covering
        let total: usize = groups.iter().map(|(_, rows)| rows.len()).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn test_discovery_order_is_preserved() {
        let groups = TagGroups::from_tags(&tags(&[
            Some("wing"),
            Some("hull"),
            Some("wing"),
            Some("fin"),
        ]));
        let order: Vec<&str> = groups.iter().map(|(tag, _)| tag).collect();
        assert_eq!(order, vec!["wing", "hull", "fin"]);
    }

    #[test]
    fn test_null_tag_groups_under_empty_string() {
        let groups = TagGroups::from_tags(&tags(&[Some("A"), None, Some("A")]));
        assert_eq!(groups.get(""), Some(&RowSet::from([1])));
    }
}
