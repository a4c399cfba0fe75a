//! # Pickup Scheduler
//!
//! Computes the ready time sent with a pickup request.
//!
//! The ready time is local noon at the pickup address on the first business
//! day that is at least `delay_days` days after the earliest bookable day.
//! Requests made at or after local noon can no longer book the same day.
//!
//! The current instant comes from an injected [`Clock`] and the zone lookup
//! from an explicit [`ZoneTable`], so results are reproducible in tests.
//!
//! # Examples
//!
//! ```
//! use carrier_client::domain::services::pickup_scheduler::{FixedClock, PickupScheduler, ZoneTable};
//! use carrier_client::domain::value_objects::Address;
//! use chrono::{TimeZone, Utc};
//! use std::sync::Arc;
//!
//! // Wednesday 10:00 in Los Angeles.
//! let now = Utc.with_ymd_and_hms(2024, 3, 6, 18, 0, 0).unwrap();
//! let scheduler = PickupScheduler::new(ZoneTable::us_default(), Arc::new(FixedClock::new(now)));
//! let address = Address::new(vec![], "Santa Monica", "CA", "90401", "US");
//!
//! let ready = scheduler.ready_time(&address, 0);
//! assert_eq!(ready.to_rfc3339(), "2024-03-06T12:00:00-08:00");
//! ```

use crate::domain::value_objects::Address;
use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, TimeDelta, TimeZone, Timelike, Utc, Weekday};
use chrono_tz::Tz;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Local hour from which same-day pickups are no longer offered.
pub const SAME_DAY_CUTOFF_HOUR: u32 = 12;

/// Zone used when a region has no entry.
pub const DEFAULT_ZONE: Tz = Tz::America__Los_Angeles;

/// Source of the current instant.
pub trait Clock: Send + Sync + fmt::Debug {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock stopped at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    /// Creates a clock that always returns `now`.
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(now)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Region code to time zone lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneTable {
    zones: HashMap<String, Tz>,
    default_zone: Tz,
}

impl ZoneTable {
    /// Creates a table with no regions; every lookup uses `default_zone`.
    #[must_use]
    pub fn empty(default_zone: Tz) -> Self {
        Self {
            zones: HashMap::new(),
            default_zone,
        }
    }

    /// The bundled table of US states, defaulting to Pacific time.
    #[must_use]
    pub fn us_default() -> Self {
        const CENTRAL: &[&str] = &[
            "AL", "AR", "IL", "IA", "KS", "KY", "LA", "MN", "MS", "MO", "NE", "ND", "OK", "SD",
            "TN", "TX", "WI",
        ];
        const MOUNTAIN: &[&str] = &["AZ", "CO", "ID", "MT", "NM", "UT", "WY"];
        const EASTERN: &[&str] = &[
            "CT", "DE", "FL", "GA", "IN", "ME", "MD", "MA", "MI", "NH", "NJ", "NY", "NC", "OH",
            "PA", "RI", "SC", "VT", "VA", "WV",
        ];

        let mut table = Self::empty(DEFAULT_ZONE)
            .with_region("AK", Tz::America__Anchorage)
            .with_region("HI", Tz::Pacific__Honolulu);
        for (regions, zone) in [
            (CENTRAL, Tz::America__Chicago),
            (MOUNTAIN, Tz::America__Denver),
            (EASTERN, Tz::America__New_York),
        ] {
            for region in regions {
                table = table.with_region(region, zone);
            }
        }
        table
    }

    /// Maps a region code to a zone.
    #[must_use]
    pub fn with_region(mut self, region: &str, zone: Tz) -> Self {
        self.zones.insert(normalize(region), zone);
        self
    }

    /// Sets the fallback zone.
    #[must_use]
    pub fn with_default_zone(mut self, zone: Tz) -> Self {
        self.default_zone = zone;
        self
    }

    /// Returns the fallback zone.
    #[inline]
    #[must_use]
    pub fn default_zone(&self) -> Tz {
        self.default_zone
    }

    /// Returns the zone mapped to `region`, if any.
    #[must_use]
    pub fn get(&self, region: &str) -> Option<Tz> {
        self.zones.get(&normalize(region)).copied()
    }

    /// Returns the zone for `region`, or the fallback zone.
    #[must_use]
    pub fn resolve(&self, region: &str) -> Tz {
        self.get(region).unwrap_or_else(|| {
            tracing::debug!(
                region = %region,
                zone = %self.default_zone,
                "no time zone for region, using default"
            );
            self.default_zone
        })
    }
}

impl Default for ZoneTable {
    fn default() -> Self {
        Self::us_default()
    }
}

fn normalize(region: &str) -> String {
    region.trim().to_ascii_uppercase()
}

/// Computes pickup ready times.
#[derive(Debug, Clone)]
pub struct PickupScheduler {
    zones: ZoneTable,
    clock: Arc<dyn Clock>,
}

impl PickupScheduler {
    /// Creates a scheduler.
    #[must_use]
    pub fn new(zones: ZoneTable, clock: Arc<dyn Clock>) -> Self {
        Self { zones, clock }
    }

    /// Creates a scheduler on the wall clock.
    #[must_use]
    pub fn with_system_clock(zones: ZoneTable) -> Self {
        Self::new(zones, Arc::new(SystemClock))
    }

    /// Returns the zone table.
    #[inline]
    #[must_use]
    pub fn zones(&self) -> &ZoneTable {
        &self.zones
    }

    /// Ready time for a pickup at `address`, `delay_days` days after the
    /// earliest bookable day.
    #[must_use]
    pub fn ready_time(&self, address: &Address, delay_days: u32) -> DateTime<Tz> {
        let zone = self.zones.resolve(&address.state_or_province_code);
        let local = self.clock.now().with_timezone(&zone);

        let mut date = local.date_naive();
        if local.hour() >= SAME_DAY_CUTOFF_HOUR {
            date = date + Days::new(1);
        }
        date = skip_weekend(date + Days::new(u64::from(delay_days)));

        local_noon(zone, date)
    }
}

fn skip_weekend(date: NaiveDate) -> NaiveDate {
    match date.weekday() {
        Weekday::Sat => date + Days::new(2),
        Weekday::Sun => date + Days::new(1),
        _ => date,
    }
}

fn local_noon(zone: Tz, date: NaiveDate) -> DateTime<Tz> {
    let noon = date.and_time(NaiveTime::MIN) + TimeDelta::hours(i64::from(SAME_DAY_CUTOFF_HOUR));
    zone.from_local_datetime(&noon)
        .earliest()
        .unwrap_or_else(|| zone.from_utc_datetime(&noon))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn scheduler_at(now: DateTime<Utc>) -> PickupScheduler {
        PickupScheduler::new(ZoneTable::us_default(), Arc::new(FixedClock::new(now)))
    }

    fn address(region: &str) -> Address {
        Address::new(vec!["1 Main St".to_string()], "Town", region, "00000", "US")
    }

    fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    mod zone_table {
        use super::*;

        #[test]
        fn bundled_regions() {
            let table = ZoneTable::us_default();
            assert_eq!(table.get("TX"), Some(Tz::America__Chicago));
            assert_eq!(table.get("ny"), Some(Tz::America__New_York));
            assert_eq!(table.get("CO"), Some(Tz::America__Denver));
            assert_eq!(table.get("AK"), Some(Tz::America__Anchorage));
            assert_eq!(table.get("HI"), Some(Tz::Pacific__Honolulu));
            assert_eq!(table.get("CA"), None);
        }

        #[test]
        fn unknown_region_uses_default() {
            let table = ZoneTable::us_default().with_default_zone(Tz::Europe__London);
            assert_eq!(table.resolve("ON"), Tz::Europe__London);
            assert_eq!(table.resolve(""), Tz::Europe__London);
        }
    }

    mod ready_time {
        use super::*;

        #[test]
        fn before_noon_books_same_day() {
            // Wednesday 10:00 PST.
            let ready = scheduler_at(utc(2024, 3, 6, 18)).ready_time(&address("CA"), 0);
            assert_eq!(ready.to_rfc3339(), "2024-03-06T12:00:00-08:00");
        }

        #[test]
        fn at_noon_moves_to_next_day() {
            // Wednesday 12:00 PST.
            let ready = scheduler_at(utc(2024, 3, 6, 20)).ready_time(&address("CA"), 0);
            assert_eq!(ready.date_naive(), NaiveDate::from_ymd_opt(2024, 3, 7).unwrap());
        }

        #[test]
        fn friday_afternoon_moves_to_monday() {
            // Friday 13:00 PST; the following Monday is after the DST switch.
            let ready = scheduler_at(utc(2024, 3, 8, 21)).ready_time(&address("CA"), 0);
            assert_eq!(ready.to_rfc3339(), "2024-03-11T12:00:00-07:00");
        }

        #[test]
        fn delay_lands_on_weekend() {
            // Wednesday morning + 3 days is Saturday.
            let ready = scheduler_at(utc(2024, 3, 6, 18)).ready_time(&address("CA"), 3);
            assert_eq!(ready.weekday(), Weekday::Mon);
            assert_eq!(ready.day(), 11);
        }

        #[test]
        fn uses_zone_of_region() {
            // 17:00 UTC is 11:00 in Chicago but 12:00 in New York.
            let now = utc(2024, 3, 6, 17);
            let chicago = scheduler_at(now).ready_time(&address("TX"), 0);
            let new_york = scheduler_at(now).ready_time(&address("NY"), 0);
            assert_eq!(chicago.to_rfc3339(), "2024-03-06T12:00:00-06:00");
            assert_eq!(new_york.to_rfc3339(), "2024-03-07T12:00:00-05:00");
        }
    }

    const REGIONS: &[&str] = &["CA", "TX", "NY", "CO", "AK", "HI", "WA", "ON", "", "zz"];

    proptest! {
        #[test]
        fn never_on_weekend_and_deterministic(
            secs in 946_684_800i64..4_102_444_800,
            region in prop::sample::select(REGIONS),
            delay in 0u32..=5,
        ) {
            let now = DateTime::from_timestamp(secs, 0).unwrap();
            let scheduler = scheduler_at(now);
            let first = scheduler.ready_time(&address(region), delay);
            let second = scheduler.ready_time(&address(region), delay);

            prop_assert_eq!(first, second);
            prop_assert!(!matches!(first.weekday(), Weekday::Sat | Weekday::Sun));
            prop_assert_eq!(first.hour(), 12);
            prop_assert_eq!(first.minute(), 0);
            prop_assert!(first.date_naive() >= now.with_timezone(&first.timezone()).date_naive());
        }

        #[test]
        fn unmapped_region_behaves_like_default_zone(
            secs in 946_684_800i64..4_102_444_800,
            delay in 0u32..=5,
        ) {
            let now = DateTime::from_timestamp(secs, 0).unwrap();
            let clock = Arc::new(FixedClock::new(now));
            let bundled = PickupScheduler::new(ZoneTable::us_default(), clock.clone());
            let bare = PickupScheduler::new(ZoneTable::empty(DEFAULT_ZONE), clock);

            prop_assert_eq!(
                bundled.ready_time(&address("QC"), delay),
                bare.ready_time(&address("TX"), delay)
            );
        }
    }
}
