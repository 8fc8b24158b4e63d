use chrono::{DateTime, SecondsFormat, Utc};

/// Current UTC time
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Format a timestamp the way the client expects (`2024-05-01T09:30:00.000Z`)
pub fn to_iso(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Generate a row identifier (random UUID v4)
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_to_iso_has_millis_and_z() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
        assert_eq!(to_iso(&ts), "2024-05-01T09:30:00.000Z");
    }

    #[test]
    fn test_generate_id_is_unique() {
        let a = generate_id();
        let b = generate_id();
        assert_ne!(a, b);
        assert_eq!(a.len(), 36);
    }
}
