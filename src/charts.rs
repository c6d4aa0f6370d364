//! Projection of the aggregated buckets into chart series.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use indexmap::IndexMap;

use crate::dates::{chart_label, iso_date};
use crate::model::{Bucket, Category, ChartSeries};

/// The daily chart never shows more than two weeks.
pub const MAX_DAILY_POINTS: u32 = 14;

/// Hours per day from `start`, one point per day for `min(days, 14)` days.
pub fn daily_series(by_date: &BTreeMap<String, Bucket>, start: NaiveDate, days: u32) -> ChartSeries {
  let points = days.min(MAX_DAILY_POINTS);
  let mut series = ChartSeries::default();

  for offset in 0..points {
    let day = start + Duration::days(i64::from(offset));
    series.labels.push(chart_label(day));
    series.data.push(by_date.get(&iso_date(day)).map(|b| b.hours).unwrap_or(0.0));
  }

  series
}

/// Categories by descending hours; the sort is stable so ties keep first-seen order.
pub fn category_series(by_category: &IndexMap<Category, Bucket>) -> ChartSeries {
  let mut entries: Vec<(&Category, &Bucket)> = by_category.iter().collect();
  entries.sort_by(|a, b| b.1.hours.total_cmp(&a.1.hours));

  let mut series = ChartSeries::default();

  for (cat, bucket) in entries {
    series.labels.push(format!("{} ({:.1}h)", cat.display_name(), bucket.hours));
    series.data.push(bucket.hours);
  }

  series
}

#[cfg(test)]
mod tests {
  use super::*;

  fn bucket(count: usize, hours: f64) -> Bucket {
    Bucket { count, hours }
  }

  #[test]
  fn daily_series_is_capped_at_fourteen_points() {
    let start = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
    let empty = BTreeMap::new();
    assert_eq!(daily_series(&empty, start, 7).labels.len(), 7);
    assert_eq!(daily_series(&empty, start, 30).data.len(), 14);
    assert_eq!(daily_series(&empty, start, 0).labels.len(), 0);
  }

  #[test]
  fn daily_series_fills_gaps_with_zero() {
    let start = NaiveDate::from_ymd_opt(2025, 8, 30).unwrap();
    let mut by_date = BTreeMap::new();
    by_date.insert("2025-08-31".to_string(), bucket(2, 3.5));
    by_date.insert("2025-09-01".to_string(), bucket(1, 1.0));
    let s = daily_series(&by_date, start, 4);
    assert_eq!(s.labels, vec!["8/30", "8/31", "9/1", "9/2"]);
    assert_eq!(s.data, vec![0.0, 3.5, 1.0, 0.0]);
  }

  #[test]
  fn category_series_sorts_descending_and_keeps_tie_order() {
    let mut by_cat = IndexMap::new();
    by_cat.insert(Category::Docs, bucket(1, 0.5));
    by_cat.insert(Category::Feat, bucket(1, 2.5));
    by_cat.insert(Category::Other, bucket(1, 0.5));
    by_cat.insert(Category::Refactor, bucket(2, 7.5));
    let s = category_series(&by_cat);
    assert_eq!(
      s.labels,
      vec!["Refactor (7.5h)", "Feature (2.5h)", "Documentation (0.5h)", "Other (0.5h)"]
    );
    assert_eq!(s.data, vec![7.5, 2.5, 0.5, 0.5]);
  }
}
