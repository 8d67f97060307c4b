use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, TimeZone, Utc};

/// Thailand does not observe DST; Asia/Bangkok is a fixed UTC+7
const BANGKOK_OFFSET_SECS: i32 = 7 * 3600;

/// Business calendar of the billing engine. Timestamps are stored as UTC;
/// calendar notions (document year, "today", "this month") are Bangkok time.
pub struct BusinessCalendar;

impl BusinessCalendar {
    pub fn offset() -> FixedOffset {
        FixedOffset::east_opt(BANGKOK_OFFSET_SECS).expect("Valid offset")
    }

    /// Convert UTC timestamp to Asia/Bangkok
    pub fn to_local(utc_time: DateTime<Utc>) -> DateTime<FixedOffset> {
        utc_time.with_timezone(&Self::offset())
    }

    /// Calendar date in Bangkok at the given instant
    pub fn today(now: DateTime<Utc>) -> NaiveDate {
        Self::to_local(now).date_naive()
    }

    /// Calendar year used for document numbering
    pub fn year(now: DateTime<Utc>) -> i32 {
        Self::to_local(now).year()
    }

    /// First instant of the Bangkok calendar year containing `now`, in UTC
    pub fn start_of_year(now: DateTime<Utc>) -> DateTime<Utc> {
        Self::local_midnight(Self::year(now), 1)
    }

    /// First instant of the Bangkok calendar month containing `now`, in UTC
    pub fn start_of_month(now: DateTime<Utc>) -> DateTime<Utc> {
        let local = Self::to_local(now);
        Self::local_midnight(local.year(), local.month())
    }

    /// First instant of the month following the one containing `now`
    pub fn start_of_next_month(now: DateTime<Utc>) -> DateTime<Utc> {
        let local = Self::to_local(now);
        if local.month() == 12 {
            Self::local_midnight(local.year() + 1, 1)
        } else {
            Self::local_midnight(local.year(), local.month() + 1)
        }
    }

    fn local_midnight(year: i32, month: u32) -> DateTime<Utc> {
        Self::offset()
            .with_ymd_and_hms(year, month, 1, 0, 0, 0)
            .single()
            .expect("Fixed offsets have no ambiguous times")
            .with_timezone(&Utc)
    }
}

/// Format timestamp as ISO 8601 UTC for API responses
pub fn format_iso8601(utc_time: DateTime<Utc>) -> String {
    utc_time.to_rfc3339()
}
