use chrono::{DateTime, Utc};

pub fn fmt_dt(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone as _;

    #[test]
    fn fmt_dt_is_minute_precise() {
        let dt = Utc.with_ymd_and_hms(2025, 1, 31, 18, 5, 59).unwrap();
        assert_eq!(fmt_dt(&dt), "2025-01-31 18:05");
    }
}
