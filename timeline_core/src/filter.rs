// Medium filter and title search: which arcs are active, and how they render at rest.
// The same predicate gates pointer interaction, not just visuals.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::config::{
    medium_color, DEFAULT_OPACITY, DEFAULT_STROKE, FALLBACK_COLOR, FILTERED_STROKE, GHOST_OPACITY,
    MEDIUM_COLORS, SEARCH_OPACITY_BOOST, SEARCH_OPACITY_CAP,
};
use crate::dataset::{Dataset, WorkRecord};
use crate::types::ArcStyle;

/// State of a medium filter button. `medium == None` is the "All" button.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediumButton {
    pub medium: Option<String>,
    pub label: String,
    pub color: String,
    pub count: usize,
    pub active: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    mediums: BTreeSet<String>,
    multi_select: bool,
    /// Lower-cased, trimmed search text. Empty means no search.
    query: String,
}

impl FilterState {
    pub fn new(multi_select: bool) -> Self {
        FilterState {
            multi_select,
            ..Default::default()
        }
    }

    pub fn is_searching(&self) -> bool {
        !self.query.is_empty()
    }

    /// Any medium filter or search narrowing the view.
    pub fn is_filtering(&self) -> bool {
        self.is_searching() || !self.mediums.is_empty()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn multi_select(&self) -> bool {
        self.multi_select
    }

    pub fn active_mediums(&self) -> impl Iterator<Item = &str> {
        self.mediums.iter().map(String::as_str)
    }

    /// Search takes precedence over the medium filter.
    pub fn is_active(&self, record: &WorkRecord) -> bool {
        if self.is_searching() {
            return record
                .title()
                .is_some_and(|t| t.to_lowercase().contains(&self.query));
        }
        if !self.mediums.is_empty() {
            return record.medium().is_some_and(|m| self.mediums.contains(m));
        }
        true
    }

    pub fn opacity(&self, record: &WorkRecord) -> f64 {
        if !self.is_active(record) {
            return GHOST_OPACITY;
        }
        if self.is_searching() {
            (DEFAULT_OPACITY * SEARCH_OPACITY_BOOST).min(SEARCH_OPACITY_CAP)
        } else {
            DEFAULT_OPACITY
        }
    }

    pub fn stroke_width(&self, record: &WorkRecord) -> f64 {
        if self.is_filtering() && self.is_active(record) {
            FILTERED_STROKE
        } else {
            DEFAULT_STROKE
        }
    }

    pub fn style(&self, record: &WorkRecord) -> ArcStyle {
        ArcStyle::new(self.opacity(record), self.stroke_width(record))
    }

    /// Draw order for the filter view: while filtering, inactive arcs go first so
    /// active ones are never buried. Otherwise dataset order.
    pub fn draw_order(&self, dataset: &Dataset) -> Vec<usize> {
        let records = dataset.records();
        if !self.is_filtering() {
            return (0..records.len()).collect();
        }
        let (active, inactive): (Vec<usize>, Vec<usize>) =
            (0..records.len()).partition(|&i| self.is_active(&records[i]));
        inactive.into_iter().chain(active).collect()
    }

    /// Press a medium button. `None` is "All".
    pub fn toggle_medium(&mut self, medium: Option<&str>) {
        let Some(medium) = medium.map(str::trim) else {
            self.mediums.clear();
            return;
        };

        if self.multi_select {
            if !self.mediums.remove(medium) {
                self.mediums.insert(medium.to_string());
            }
        } else if self.mediums.len() == 1 && self.mediums.contains(medium) {
            self.mediums.clear();
        } else {
            self.mediums.clear();
            self.mediums.insert(medium.to_string());
        }
    }

    /// Switching modes keeps the current medium set.
    pub fn set_multi_select(&mut self, multi_select: bool) {
        self.multi_select = multi_select;
    }

    pub fn set_query(&mut self, raw: &str) {
        self.query = raw.trim().to_lowercase();
    }

    pub fn clear_query(&mut self) {
        self.query.clear();
    }

    /// "All" followed by every palette medium present in the data, most common first.
    pub fn medium_buttons(&self, dataset: &Dataset) -> Vec<MediumButton> {
        let counts = dataset.medium_counts();
        let count_of = |medium: &str| {
            counts
                .iter()
                .find(|(m, _)| m == medium)
                .map(|(_, n)| *n)
                .unwrap_or(0)
        };

        let mut present: Vec<(&str, usize)> = MEDIUM_COLORS
            .iter()
            .map(|&(medium, _)| (medium, count_of(medium)))
            .filter(|(_, n)| *n > 0)
            .collect();
        present.sort_by(|a, b| b.1.cmp(&a.1));

        let mut buttons = vec![MediumButton {
            medium: None,
            label: "All".to_string(),
            color: FALLBACK_COLOR.to_string(),
            count: dataset.len(),
            active: self.mediums.is_empty(),
        }];
        buttons.extend(present.into_iter().map(|(medium, count)| MediumButton {
            medium: Some(medium.to_string()),
            label: medium.to_string(),
            color: medium_color(Some(medium)).to_string(),
            count,
            active: self.mediums.contains(medium),
        }));
        buttons
    }
}
