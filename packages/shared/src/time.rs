//! Time helpers. All timestamps are Unix epoch milliseconds in UTC.

use chrono::{DateTime, SecondsFormat, Utc};

/// Current Unix timestamp in milliseconds.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Format a Unix timestamp (milliseconds) as RFC 3339 with millisecond precision.
///
/// Out-of-range values fall back to the Unix epoch.
pub fn millis_to_rfc3339(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .unwrap_or(DateTime::UNIX_EPOCH)
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_millis_to_rfc3339() {
        // テスト項目: ミリ秒タイムスタンプが RFC 3339 (UTC) に変換される
        // given (前提条件):
        let millis = 1_672_498_800_123;

        // when (操作):
        let formatted = millis_to_rfc3339(millis);

        // then (期待する結果):
        assert_eq!(formatted, "2022-12-31T15:00:00.123Z");
    }

    #[test]
    fn test_millis_to_rfc3339_out_of_range() {
        // テスト項目: 範囲外の値は Unix エポックとして扱われる
        assert_eq!(millis_to_rfc3339(i64::MAX), "1970-01-01T00:00:00.000Z");
    }
}
