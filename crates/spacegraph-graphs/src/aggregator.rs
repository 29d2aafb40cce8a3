//! Aggregation of flattened records into the counts the charts display

use serde::{Deserialize, Serialize};
use spacegraph_common::{ApodEntry, AsteroidRecord};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// An asteroid record tagged with the year of the interval it was fetched for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedAsteroid {
    pub year: i32,
    pub record: AsteroidRecord,
}

/// Asteroid records from several intervals, each tagged with its query year.
///
/// Rows keep the order in which tables were appended; nothing is sorted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YearTaggedAsteroidTable {
    rows: Vec<TaggedAsteroid>,
}

impl YearTaggedAsteroidTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append every record of one table under `year`
    pub fn append(&mut self, records: impl IntoIterator<Item = AsteroidRecord>, year: i32) {
        self.rows
            .extend(records.into_iter().map(|record| TaggedAsteroid { year, record }));
    }

    pub fn rows(&self) -> &[TaggedAsteroid] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct years present, ascending
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.rows.iter().map(|row| row.year).collect();
        years.sort_unstable();
        years.dedup();
        years
    }
}

/// Concatenate two asteroid tables, tagging each with its year.
///
/// The result holds `table_a` rows first, then `table_b` rows, in input order.
pub fn combine_by_year(
    table_a: Vec<AsteroidRecord>,
    year_a: i32,
    table_b: Vec<AsteroidRecord>,
    year_b: i32,
) -> YearTaggedAsteroidTable {
    let mut combined = YearTaggedAsteroidTable::new();
    combined.append(table_a, year_a);
    combined.append(table_b, year_b);
    combined
}

/// Number of asteroid records per year
#[instrument(skip(table), fields(rows = table.len()))]
pub fn count_per_year(table: &YearTaggedAsteroidTable) -> BTreeMap<i32, usize> {
    let mut counts = BTreeMap::new();
    for row in table.rows() {
        *counts.entry(row.year).or_insert(0) += 1;
    }
    debug!("Counted asteroids for {} years", counts.len());
    counts
}

/// Hazardous and non-hazardous totals for one year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HazardSplit {
    pub year: i32,
    pub hazardous: usize,
    pub non_hazardous: usize,
}

/// Record counts keyed by year and hazardous flag.
///
/// Only combinations that occur are stored. [`HazardCounts::get`] reads an
/// absent combination as zero, [`HazardCounts::zero_filled`] materializes it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HazardCounts {
    counts: BTreeMap<(i32, bool), usize>,
}

impl HazardCounts {
    pub fn get(&self, year: i32, hazardous: bool) -> usize {
        self.counts.get(&(year, hazardous)).copied().unwrap_or(0)
    }

    /// Whether the combination was observed at all
    pub fn contains(&self, year: i32, hazardous: bool) -> bool {
        self.counts.contains_key(&(year, hazardous))
    }

    /// Stored (year, hazardous, count) triples, ascending
    pub fn iter(&self) -> impl Iterator<Item = (i32, bool, usize)> + '_ {
        self.counts
            .iter()
            .map(|(&(year, hazardous), &count)| (year, hazardous, count))
    }

    /// Number of stored combinations
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// One split per requested year, in the given order, absent counts as 0
    pub fn zero_filled(&self, years: &[i32]) -> Vec<HazardSplit> {
        years
            .iter()
            .map(|&year| HazardSplit {
                year,
                hazardous: self.get(year, true),
                non_hazardous: self.get(year, false),
            })
            .collect()
    }
}

/// Count records per (year, hazardous flag)
#[instrument(skip(table), fields(rows = table.len()))]
pub fn count_hazardous_per_year(table: &YearTaggedAsteroidTable) -> HazardCounts {
    let mut counts = BTreeMap::new();
    for row in table.rows() {
        *counts.entry((row.year, row.record.hazardous)).or_insert(0) += 1;
    }
    HazardCounts { counts }
}

/// Number of APOD entries per interval, in input order
pub fn count_apod_per_interval(intervals: &[Vec<ApodEntry>]) -> Vec<usize> {
    intervals.iter().map(Vec::len).collect()
}
