use chrono::{DateTime, Duration, Local, NaiveDate, NaiveTime, TimeZone};

use crate::models::SearchEntry;
use crate::timestamp::Timestamp;

/// One local calendar day. Both bounds are inclusive; `end` is the last
/// nanosecond before the next local midnight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySpan {
    day: NaiveDate,
    start: DateTime<Local>,
    end: DateTime<Local>,
}

impl DaySpan {
    pub fn for_day(day: NaiveDate) -> Self {
        let start = local_midnight(day);
        let end = match day.succ_opt() {
            Some(next) => local_midnight(next) - Duration::nanoseconds(1),
            None => start + Duration::days(1) - Duration::nanoseconds(1),
        };
        Self { day, start, end }
    }

    pub fn day(&self) -> NaiveDate {
        self.day
    }

    pub fn start(&self) -> DateTime<Local> {
        self.start
    }

    pub fn end(&self) -> DateTime<Local> {
        self.end
    }

    pub fn contains(&self, ts: &Timestamp) -> bool {
        let local = ts.to_local();
        local >= self.start && local <= self.end
    }

    pub fn to_search(&self, limit: u32) -> SearchEntry {
        SearchEntry {
            limit,
            start: Some(Timestamp::from(self.start)),
            end: Some(Timestamp::from(self.end)),
        }
    }
}

pub fn parse_day(value: &str) -> Result<NaiveDate, String> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("today") {
        return Ok(Local::now().date_naive());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| format!("Invalid day {value:?}. Use YYYY-MM-DD or \"today\"."))
}

// Midnight can fall in a DST gap; the UTC reading is used then.
fn local_midnight(day: NaiveDate) -> DateTime<Local> {
    let naive = day.and_time(NaiveTime::MIN);
    Local
        .from_local_datetime(&naive)
        .earliest()
        .unwrap_or_else(|| Local.from_utc_datetime(&naive))
}
