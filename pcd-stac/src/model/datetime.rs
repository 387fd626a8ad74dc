use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde::{Serialize, Serializer};

pub type Interval = [Option<DateTime<Utc>>; 2];

/// `2019-09-13T14:00:00Z`
pub fn format(datetime: &DateTime<Utc>) -> String {
    datetime.to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub fn utc(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, sec).single()
}

/// Parses an RFC 3339 timestamp into UTC.
pub fn parse(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

pub fn serialize_option<S: Serializer>(
    value: &Option<DateTime<Utc>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    value.as_ref().map(format).serialize(serializer)
}

#[allow(clippy::ptr_arg)]
pub fn serialize_intervals<S: Serializer>(
    intervals: &Vec<Interval>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    intervals
        .iter()
        .map(|[start, end]| [start.as_ref().map(format), end.as_ref().map(format)])
        .collect::<Vec<_>>()
        .serialize(serializer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_whole_seconds_with_z() {
        let dt = utc(2019, 9, 13, 23, 59, 59).unwrap();
        assert_eq!(format(&dt), "2019-09-13T23:59:59Z");
    }

    #[test]
    fn parses_offsets_into_utc() {
        assert_eq!(
            parse("2023-05-26T02:00:00+02:00"),
            utc(2023, 5, 26, 0, 0, 0)
        );
        assert_eq!(parse("yesterday"), None);
    }

    #[test]
    fn invalid_calendar_date_is_none() {
        assert_eq!(utc(2023, 2, 30, 0, 0, 0), None);
    }
}
