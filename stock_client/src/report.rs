//! Human-readable rendering of securities for the log.
use chrono::DateTime;
use log::info;
use stock_common::SecuritySnapshot;

/// Format a millisecond UTC timestamp as RFC 3339, falling back to the raw number.
pub fn format_timestamp(timestamp: u64) -> String {
    i64::try_from(timestamp)
        .ok()
        .and_then(DateTime::from_timestamp_millis)
        .map_or_else(|| timestamp.to_string(), |time| time.to_rfc3339())
}

/// Log a security and its full history.
pub fn log_security(snapshot: &SecuritySnapshot) {
    info!(
        "STOCK: {} ({} prices)",
        snapshot.name,
        snapshot.history.len()
    );
    for point in &snapshot.history {
        info!(
            "  {} Price={:.2}",
            format_timestamp(point.timestamp),
            point.price
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_epoch_millis() {
        assert_eq!(format_timestamp(0), "1970-01-01T00:00:00+00:00");
        assert_eq!(
            format_timestamp(1_700_000_000_123),
            "2023-11-14T22:13:20.123+00:00"
        );
    }

    #[test]
    fn out_of_range_falls_back_to_number() {
        assert_eq!(format_timestamp(u64::MAX), u64::MAX.to_string());
    }
}
