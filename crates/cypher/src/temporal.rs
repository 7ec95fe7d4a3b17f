use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt::Write;

/// Temporal values, each rendered as a constructor call around an ISO-8601 string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Temporal {
    Date(NaiveDate),
    LocalTime(NaiveTime),
    LocalDateTime(NaiveDateTime),
    DateTime(DateTime<FixedOffset>),
    Duration(Duration),
}

impl Temporal {
    /// Name of the Cypher constructor function for this value.
    pub fn constructor(&self) -> &'static str {
        match self {
            Temporal::Date(_) => "date",
            Temporal::LocalTime(_) => "localTime",
            Temporal::LocalDateTime(_) => "localDateTime",
            Temporal::DateTime(_) => "datetime",
            Temporal::Duration(_) => "duration",
        }
    }

    pub fn iso8601(&self) -> String {
        match self {
            Temporal::Date(d) => d.format("%Y-%m-%d").to_string(),
            Temporal::LocalTime(t) => t.format("%H:%M:%S%.f").to_string(),
            Temporal::LocalDateTime(dt) => dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string(),
            Temporal::DateTime(dt) => dt.to_rfc3339(),
            Temporal::Duration(d) => iso_duration(d),
        }
    }
}

/// `P[nD][T[nH][nM][n[.f]S]]`, with a leading `-` for negative spans.
fn iso_duration(duration: &Duration) -> String {
    let negative = *duration < Duration::zero();
    let span = if negative { -*duration } else { *duration };

    let total_seconds = span.num_seconds();
    let nanos = (span - Duration::seconds(total_seconds))
        .num_nanoseconds()
        .unwrap_or(0);

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3_600;
    let minutes = (total_seconds % 3_600) / 60;
    let seconds = total_seconds % 60;

    let mut out = String::from(if negative { "-P" } else { "P" });
    if days > 0 {
        let _ = write!(out, "{}D", days);
    }

    let mut time = String::new();
    if hours > 0 {
        let _ = write!(time, "{}H", hours);
    }
    if minutes > 0 {
        let _ = write!(time, "{}M", minutes);
    }
    if nanos > 0 {
        let fraction = format!("{:09}", nanos);
        let _ = write!(time, "{}.{}S", seconds, fraction.trim_end_matches('0'));
    } else if seconds > 0 || (days == 0 && time.is_empty()) {
        let _ = write!(time, "{}S", seconds);
    }

    if !time.is_empty() {
        out.push('T');
        out.push_str(&time);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_and_times() {
        let date = NaiveDate::from_ymd_opt(2023, 7, 4).unwrap();
        assert_eq!(Temporal::Date(date).iso8601(), "2023-07-04");

        let time = NaiveTime::from_hms_milli_opt(9, 30, 5, 250).unwrap();
        assert_eq!(Temporal::LocalTime(time).iso8601(), "09:30:05.250");

        let whole = NaiveTime::from_hms_opt(9, 30, 5).unwrap();
        assert_eq!(Temporal::LocalTime(whole).iso8601(), "09:30:05");

        let dt = date.and_hms_opt(23, 59, 0).unwrap();
        assert_eq!(Temporal::LocalDateTime(dt).iso8601(), "2023-07-04T23:59:00");
    }

    #[test]
    fn test_zoned_datetime_keeps_offset() {
        let dt = DateTime::parse_from_rfc3339("2024-01-02T10:00:00+01:00").unwrap();
        assert_eq!(Temporal::DateTime(dt).iso8601(), "2024-01-02T10:00:00+01:00");
    }

    #[test]
    fn test_durations() {
        let d = Duration::days(1) + Duration::hours(2) + Duration::minutes(3) + Duration::seconds(4);
        assert_eq!(iso_duration(&d), "P1DT2H3M4S");
        assert_eq!(iso_duration(&Duration::days(3)), "P3D");
        assert_eq!(iso_duration(&Duration::zero()), "PT0S");
        assert_eq!(iso_duration(&Duration::milliseconds(1500)), "PT1.5S");
        assert_eq!(iso_duration(&-Duration::minutes(90)), "-PT1H30M");
    }
}
