//! WITSML object hierarchy across loaded fixtures.
//!
//! Fixtures hold wells, wellbores and logs in separate documents linked by
//! `uidWell` / `uidWellbore`. [`Hierarchy`] stitches them back together so the
//! server can answer well → wellbore → log → data queries the way a live
//! WITSML store would.

use crate::models::{LogData, LogInfo, StoredFile, WellInfo, WellboreInfo};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Inclusive index range for log data queries.
///
/// Bounds are compared numerically when both sides parse as numbers (depth
/// indexes), otherwise as strings (RFC 3339 time indexes sort lexically).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexRange {
    /// Lower bound, inclusive.
    pub start_index: Option<String>,
    /// Upper bound, inclusive.
    pub end_index: Option<String>,
}

impl IndexRange {
    /// Creates an unbounded range.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets both bounds.
    #[must_use]
    pub fn between(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start_index: Some(start.into()),
            end_index: Some(end.into()),
        }
    }

    /// Returns `true` if `index` lies inside the range.
    #[must_use]
    pub fn contains(&self, index: &str) -> bool {
        let above_start = self
            .start_index
            .as_deref()
            .map_or(true, |start| compare_index(index, start) != Ordering::Less);
        let below_end = self
            .end_index
            .as_deref()
            .map_or(true, |end| compare_index(index, end) != Ordering::Greater);
        above_start && below_end
    }
}

fn compare_index(a: &str, b: &str) -> Ordering {
    match (a.trim().parse::<f64>(), b.trim().parse::<f64>()) {
        (Ok(a), Ok(b)) => a.total_cmp(&b),
        _ => a.cmp(b),
    }
}

/// Read-only view of the WITSML objects contained in a set of fixtures.
#[derive(Debug, Clone, Copy)]
pub struct Hierarchy<'a> {
    files: &'a [StoredFile],
}

impl<'a> Hierarchy<'a> {
    /// Creates a view over `files`.
    #[must_use]
    pub fn new(files: &'a [StoredFile]) -> Self {
        Self { files }
    }

    fn all_wells(&self) -> impl Iterator<Item = &'a WellInfo> {
        self.files
            .iter()
            .filter_map(|f| f.content.data.content.wells.as_ref())
            .flatten()
    }

    fn all_wellbores(&self) -> impl Iterator<Item = &'a WellboreInfo> {
        self.files
            .iter()
            .filter_map(|f| f.content.data.content.wellbores.as_ref())
            .flatten()
    }

    fn all_logs(&self) -> impl Iterator<Item = &'a LogInfo> {
        self.files
            .iter()
            .filter_map(|f| f.content.data.content.logs.as_ref())
            .flatten()
    }

    /// All wells, first occurrence of each uid wins.
    #[must_use]
    pub fn wells(&self) -> Vec<WellInfo> {
        let mut wells: Vec<WellInfo> = Vec::new();
        for well in self.all_wells() {
            if !wells.iter().any(|w| w.uid == well.uid) {
                wells.push(well.clone());
            }
        }
        wells
    }

    /// Returns `true` if any fixture defines or references the well.
    #[must_use]
    pub fn has_well(&self, well_uid: &str) -> bool {
        self.all_wells().any(|w| w.uid == well_uid)
            || self.all_wellbores().any(|wb| wb.metadata.well_uid == well_uid)
            || self.all_logs().any(|l| l.metadata.well_uid == well_uid)
    }

    /// Returns `true` if any fixture defines or references the wellbore.
    #[must_use]
    pub fn has_wellbore(&self, well_uid: &str, wellbore_uid: &str) -> bool {
        self.all_wellbores()
            .any(|wb| wb.uid == wellbore_uid && wb.metadata.well_uid == well_uid)
            || self.all_logs().any(|l| {
                l.metadata.well_uid == well_uid && l.metadata.wellbore_uid == wellbore_uid
            })
    }

    /// Wellbores of a well.
    #[must_use]
    pub fn wellbores(&self, well_uid: &str) -> Vec<WellboreInfo> {
        let mut wellbores: Vec<WellboreInfo> = Vec::new();
        for wellbore in self
            .all_wellbores()
            .filter(|wb| wb.metadata.well_uid == well_uid)
        {
            if !wellbores.iter().any(|wb| wb.uid == wellbore.uid) {
                wellbores.push(wellbore.clone());
            }
        }
        wellbores
    }

    /// Log headers of a wellbore, without data rows.
    #[must_use]
    pub fn logs(&self, well_uid: &str, wellbore_uid: &str) -> Vec<LogInfo> {
        self.all_logs()
            .filter(|l| l.metadata.well_uid == well_uid && l.metadata.wellbore_uid == wellbore_uid)
            .map(|l| LogInfo {
                data: None,
                ..l.clone()
            })
            .collect()
    }

    /// A log with only the rows whose index lies inside `range`.
    ///
    /// Returns `None` when the log does not exist under the given wellbore.
    #[must_use]
    pub fn log_data(
        &self,
        well_uid: &str,
        wellbore_uid: &str,
        log_uid: &str,
        range: &IndexRange,
    ) -> Option<LogInfo> {
        let log = self.all_logs().find(|l| {
            l.uid == log_uid
                && l.metadata.well_uid == well_uid
                && l.metadata.wellbore_uid == wellbore_uid
        })?;

        let index_column = log.index_column();
        let values: Vec<Vec<String>> = log
            .data
            .iter()
            .flat_map(|d| d.values.iter())
            .filter(|row| row.get(index_column).is_some_and(|index| range.contains(index)))
            .cloned()
            .collect();

        Some(LogInfo {
            data: Some(LogData { values }),
            ..log.clone()
        })
    }
}
