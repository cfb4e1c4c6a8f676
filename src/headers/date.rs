//! RFC 1123 / RFC 850 / asctime date parsing and RFC 1123 formatting,
//! independent of locale (no `strptime`/`setlocale` reliance, matching
//! the source's own rationale for hand-rolling this).

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

struct Fields {
    day: u32,
    month_name: String,
    year: i32,
    hour: u32,
    min: u32,
    sec: u32,
}

fn month_from_name(name: &str) -> Option<u32> {
    MONTH_NAMES
        .iter()
        .position(|m| m.eq_ignore_ascii_case(name))
        .map(|i| i as u32 + 1)
}

fn normalize_year(mut year: i32) -> i32 {
    if (0..70).contains(&year) {
        year += 2000;
    } else if (70..=99).contains(&year) {
        year += 1900;
    }
    if year < 1970 {
        year = 1970;
    }
    year
}

/// RFC 822/1123: `Wed, 09 Jun 2021 10:18:14 GMT`
fn try_rfc1123(s: &str) -> Option<Fields> {
    let s = s.trim_start();
    let comma = s.find(',')?;
    let rest = s[comma + 1..].trim_start();
    let mut parts = rest.split_whitespace();
    let day: u32 = parts.next()?.parse().ok()?;
    let month_name = parts.next()?.to_string();
    let year: i32 = parts.next()?.parse().ok()?;
    let time = parts.next()?;
    let (hour, min, sec) = split_time(time)?;
    Some(Fields {
        day,
        month_name,
        year,
        hour,
        min,
        sec,
    })
}

/// RFC 850/1036: `Wednesday, 09-Jun-21 10:18:14`
fn try_rfc850(s: &str) -> Option<Fields> {
    let s = s.trim_start();
    let comma = s.find(',')?;
    let rest = s[comma + 1..].trim_start();
    let mut parts = rest.split_whitespace();
    let date_part = parts.next()?;
    let time = parts.next()?;
    let mut date_fields = date_part.split('-');
    let day: u32 = date_fields.next()?.parse().ok()?;
    let month_name = date_fields.next()?.to_string();
    let year: i32 = date_fields.next()?.parse().ok()?;
    let (hour, min, sec) = split_time(time)?;
    Some(Fields {
        day,
        month_name,
        year,
        hour,
        min,
        sec,
    })
}

/// asctime(): `Wed Jun 09 10:18:14 2021`
fn try_asctime(s: &str) -> Option<Fields> {
    let mut parts = s.trim().split_whitespace();
    let _weekday = parts.next()?;
    let month_name = parts.next()?.to_string();
    let day: u32 = parts.next()?.parse().ok()?;
    let time = parts.next()?;
    let year: i32 = parts.next()?.parse().ok()?;
    let (hour, min, sec) = split_time(time)?;
    Some(Fields {
        day,
        month_name,
        year,
        hour,
        min,
        sec,
    })
}

fn split_time(s: &str) -> Option<(u32, u32, u32)> {
    let mut it = s.splitn(3, ':');
    let hour: u32 = it.next()?.parse().ok()?;
    let min: u32 = it.next()?.parse().ok()?;
    let sec: u32 = it.next()?.parse().ok()?;
    Some((hour, min, sec))
}

/// Parses one of the three date formats into a UTC instant. Returns
/// `None` on any malformed or out-of-range input (callers treat the
/// cookie as a session cookie in that case, matching the source).
pub fn parse_http_date(s: &str) -> Option<DateTime<Utc>> {
    let fields = try_rfc1123(s).or_else(|| try_rfc850(s)).or_else(|| try_asctime(s))?;

    let month = month_from_name(&fields.month_name)?;
    let year = normalize_year(fields.year);

    if fields.hour > 23 || fields.min > 60 || fields.sec > 60 {
        return None;
    }

    let date = NaiveDate::from_ymd_opt(year, month, fields.day)?;
    let time = NaiveTime::from_hms_opt(fields.hour, fields.min.min(59), fields.sec.min(59))?;
    let naive = NaiveDateTime::new(date, time);
    Some(DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc))
}

/// Formats strictly in the RFC 1123 form, e.g. `Wed, 09 Jun 2021 10:18:14 GMT`.
pub fn format_http_date(dt: &DateTime<Utc>) -> String {
    use chrono::Datelike;
    use chrono::Timelike;

    let weekday = DAY_NAMES[dt.weekday().num_days_from_sunday() as usize];
    let month = MONTH_NAMES[(dt.month0()) as usize];
    format!(
        "{}, {:02} {} {:04} {:02}:{:02}:{:02} GMT",
        weekday,
        dt.day(),
        month,
        dt.year(),
        dt.hour(),
        dt.minute(),
        dt.second()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rfc1123() {
        let dt = parse_http_date("Wed, 09 Jun 2021 10:18:14 GMT").unwrap();
        assert_eq!(format_http_date(&dt), "Wed, 09 Jun 2021 10:18:14 GMT");
    }

    #[test]
    fn parses_rfc850() {
        let dt = parse_http_date("Wednesday, 09-Jun-21 10:18:14").unwrap();
        assert_eq!(dt.format("%Y").to_string(), "2021");
    }

    #[test]
    fn parses_asctime() {
        let dt = parse_http_date("Wed Jun 09 10:18:14 2021").unwrap();
        assert_eq!(format_http_date(&dt), "Wed, 09 Jun 2021 10:18:14 GMT");
    }

    #[test]
    fn two_digit_year_before_70_maps_to_2000s() {
        let dt = parse_http_date("Wednesday, 01-Jan-05 00:00:00").unwrap();
        assert_eq!(dt.format("%Y").to_string(), "2005");
    }

    #[test]
    fn two_digit_year_70_to_99_maps_to_1900s() {
        let dt = parse_http_date("Wednesday, 01-Jan-99 00:00:00").unwrap();
        assert_eq!(dt.format("%Y").to_string(), "1999");
    }

    #[test]
    fn year_before_1970_clamps_to_1970() {
        let dt = parse_http_date("Wed, 01 Jan 1900 00:00:00 GMT").unwrap();
        assert_eq!(dt.format("%Y").to_string(), "1970");
    }

    #[test]
    fn malformed_date_returns_none() {
        assert!(parse_http_date("not a date").is_none());
    }

    #[test]
    fn roundtrip_identity_within_representable_range() {
        let original = "Fri, 31 Dec 9999 23:59:59 GMT";
        let dt = parse_http_date(original).unwrap();
        assert_eq!(format_http_date(&dt), original);
    }
}
