//! Folding of 3-hour forecast entries into per-day temperature ranges.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate};

use crate::model::ForecastEntry;

/// Daily summaries keyed by UTC date. Iterates in ascending date order.
pub type DailyForecast = BTreeMap<NaiveDate, DailySummary>;

/// Min/max temperature (Kelvin) seen on one calendar date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailySummary {
    pub max: f64,
    pub min: f64,
}

impl DailySummary {
    /// Identity of the fold: nothing seen yet.
    pub const EMPTY: Self = Self {
        max: f64::NEG_INFINITY,
        min: f64::INFINITY,
    };

    pub fn absorb(&mut self, entry: &ForecastEntry) {
        self.max = self.max.max(entry.main.temp_max);
        self.min = self.min.min(entry.main.temp_min);
    }
}

impl Default for DailySummary {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// UTC calendar date of a Unix timestamp. The queried location's own
/// timezone is deliberately not applied.
pub fn date_key(timestamp: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(timestamp, 0).map(|dt| dt.date_naive())
}

pub fn aggregate_daily(entries: &[ForecastEntry]) -> DailyForecast {
    let mut daily = DailyForecast::new();

    for entry in entries {
        let Some(date) = date_key(entry.dt) else {
            tracing::warn!(dt = entry.dt, "Skipping forecast entry with out-of-range timestamp");
            continue;
        };
        daily.entry(date).or_default().absorb(entry);
    }

    daily
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    // 2023-11-14T00:00:00Z
    const T0: i64 = 1_699_920_000;

    #[test]
    fn empty_input_yields_empty_mapping() {
        assert!(aggregate_daily(&[]).is_empty());
    }

    #[test]
    fn same_day_entries_fold_into_one_summary() {
        let entries = [
            ForecastEntry::new(T0, 290.0, 300.0),
            ForecastEntry::new(T0 + 3600, 285.0, 295.0),
        ];

        let daily = aggregate_daily(&entries);

        assert_eq!(daily.len(), 1);
        let (date, summary) = daily.iter().next().unwrap();
        assert_eq!(date.to_string(), "2023-11-14");
        assert_eq!(*summary, DailySummary { max: 300.0, min: 285.0 });
    }

    #[test]
    fn date_key_is_utc_day() {
        assert_eq!(date_key(T0 - 1).unwrap().to_string(), "2023-11-13");
        assert_eq!(date_key(T0).unwrap().to_string(), "2023-11-14");
        assert_eq!(date_key(T0 + 86_399).unwrap().to_string(), "2023-11-14");
    }

    #[test]
    fn keys_match_distinct_dates_and_iterate_ascending() {
        // Deliberately unordered, spanning four days with 3-hour steps.
        let offsets = [3, 0, 10, 1, 25, 7, 16, 2, 24, 31];
        let entries: Vec<_> = offsets
            .iter()
            .map(|step| ForecastEntry::new(T0 + step * 3 * 3600, 270.0, 280.0))
            .collect();

        let daily = aggregate_daily(&entries);

        let expected: BTreeSet<NaiveDate> =
            entries.iter().filter_map(|e| date_key(e.dt)).collect();
        let keys: Vec<NaiveDate> = daily.keys().copied().collect();

        assert_eq!(keys, expected.into_iter().collect::<Vec<_>>());
        assert!(keys.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn max_is_never_below_min() {
        let entries: Vec<_> = (0..40)
            .map(|i| {
                let base = 260.0 + f64::from((i * 37) % 23);
                ForecastEntry::new(T0 + i64::from(i) * 10_800, base, base + f64::from(i % 5))
            })
            .collect();

        for summary in aggregate_daily(&entries).values() {
            assert!(summary.max >= summary.min, "{summary:?}");
        }
    }

    #[test]
    fn fold_order_does_not_matter() {
        let mut entries = vec![
            ForecastEntry::new(T0, 281.0, 283.5),
            ForecastEntry::new(T0 + 10_800, 279.2, 290.1),
            ForecastEntry::new(T0 + 21_600, 284.0, 286.0),
        ];
        let forward = aggregate_daily(&entries);
        entries.reverse();
        assert_eq!(forward, aggregate_daily(&entries));
    }

    #[test]
    fn out_of_range_timestamps_are_skipped() {
        let entries = [
            ForecastEntry::new(i64::MAX, 1.0, 2.0),
            ForecastEntry::new(T0, 280.0, 281.0),
        ];
        assert_eq!(aggregate_daily(&entries).len(), 1);
    }
}
