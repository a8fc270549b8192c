use anyhow::{Context, Result};
use time::OffsetDateTime;
use time::format_description::FormatItem;

// Millisecond precision in UTC, e.g. 2024-01-01T00:00:00.000Z
static TIMESTAMP_FORMAT: &[FormatItem<'static>] = time::macros::format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
);

pub fn format_timestamp(moment: OffsetDateTime) -> Result<String> {
    moment
        .to_offset(time::UtcOffset::UTC)
        .format(TIMESTAMP_FORMAT)
        .context("failed to format timestamp")
}

pub fn now_timestamp() -> Result<String> {
    format_timestamp(OffsetDateTime::now_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn formats_with_milliseconds() {
        let moment = datetime!(2024-01-02 03:04:05.6789 UTC);
        assert_eq!(format_timestamp(moment).unwrap(), "2024-01-02T03:04:05.678Z");
    }

    #[test]
    fn converts_to_utc() {
        let moment = datetime!(2024-01-02 09:00:00 +09:00);
        assert_eq!(format_timestamp(moment).unwrap(), "2024-01-02T00:00:00.000Z");
    }

    #[test]
    fn now_is_well_formed() {
        let stamp = now_timestamp().unwrap();
        assert_eq!(stamp.len(), 24);
        assert!(stamp.ends_with('Z'));
    }
}
