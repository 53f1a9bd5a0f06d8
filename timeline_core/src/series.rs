// Series grouping: series id → member indices, built once after load.

use std::collections::HashMap;

use crate::dataset::{Dataset, WorkRecord};

/// Read-only index of series members, in dataset order.
#[derive(Debug, Clone, Default)]
pub struct SeriesIndex {
    groups: HashMap<String, Vec<usize>>,
}

impl SeriesIndex {
    pub fn build(dataset: &Dataset) -> Self {
        let mut groups: HashMap<String, Vec<usize>> = HashMap::new();
        for (index, record) in dataset.records().iter().enumerate() {
            if let Some(series_id) = record.series_id() {
                groups.entry(series_id.to_string()).or_default().push(index);
            }
        }
        SeriesIndex { groups }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// All members of a series, including the record itself.
    pub fn members(&self, series_id: &str) -> &[usize] {
        self.groups.get(series_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Indices of the other members of `record`'s series. Empty for standalone works.
    pub fn sibling_indices(&self, dataset: &Dataset, record: &WorkRecord) -> Vec<usize> {
        let Some(series_id) = record.series_id() else {
            return Vec::new();
        };
        self.members(series_id)
            .iter()
            .copied()
            .filter(|&i| dataset.records()[i].id != record.id)
            .collect()
    }

    pub fn siblings_of<'a>(&self, dataset: &'a Dataset, record: &WorkRecord) -> Vec<&'a WorkRecord> {
        self.sibling_indices(dataset, record)
            .into_iter()
            .map(|i| &dataset.records()[i])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            WorkRecord::new("a", 1990.0, 2100.0).with_series("S1"),
            WorkRecord::new("b", 1995.0, 2100.0).with_series("S1"),
            WorkRecord::new("c", 2000.0, 2100.0).with_series("S1"),
            WorkRecord::new("d", 2001.0, 2100.0).with_series("S2"),
            WorkRecord::new("e", 2002.0, 2100.0),
            WorkRecord::new("f", 2003.0, 2100.0).with_series("  "),
        ])
    }

    #[test]
    fn siblings_exclude_self_in_load_order() {
        let dataset = dataset();
        let index = SeriesIndex::build(&dataset);
        let b = &dataset.records()[1];
        let ids: Vec<&str> = index
            .siblings_of(&dataset, b)
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn lone_series_member_has_no_siblings() {
        let dataset = dataset();
        let index = SeriesIndex::build(&dataset);
        assert!(index.siblings_of(&dataset, &dataset.records()[3]).is_empty());
    }

    #[test]
    fn standalone_and_blank_series_have_no_siblings() {
        let dataset = dataset();
        let index = SeriesIndex::build(&dataset);
        assert!(index.siblings_of(&dataset, &dataset.records()[4]).is_empty());
        assert!(index.siblings_of(&dataset, &dataset.records()[5]).is_empty());
        assert_eq!(index.len(), 2);
    }
}
