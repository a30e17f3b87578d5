use chrono::{DateTime, FixedOffset, Offset, Utc};

const JST_OFFSET_SECONDS: i32 = 9 * 3600;

fn jst() -> FixedOffset {
    // 9 * 3600 is always within the valid offset range
    FixedOffset::east_opt(JST_OFFSET_SECONDS).unwrap_or_else(|| Utc.fix())
}

/// Get current Unix timestamp in JST (milliseconds)
pub fn get_jst_timestamp() -> i64 {
    let now_jst: DateTime<FixedOffset> = Utc::now().with_timezone(&jst());
    now_jst.timestamp_millis()
}

/// Format a Unix timestamp (milliseconds) as a JST wall clock, e.g. `"09:05:03"`.
///
/// Out-of-range timestamps render as `"--:--:--"`.
pub fn timestamp_to_jst_clock(timestamp_ms: i64) -> String {
    match DateTime::from_timestamp_millis(timestamp_ms) {
        Some(utc) => utc.with_timezone(&jst()).format("%H:%M:%S").to_string(),
        None => "--:--:--".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_to_jst_clock() {
        // テスト項目: UTC 00:00:00 は JST 09:00:00 として表示される
        // given (前提条件):
        let epoch = 0i64;

        // when (操作):
        let clock = timestamp_to_jst_clock(epoch);

        // then (期待する結果):
        assert_eq!(clock, "09:00:00");
    }

    #[test]
    fn test_timestamp_to_jst_clock_out_of_range() {
        // テスト項目: 範囲外のタイムスタンプはプレースホルダーになる
        // when (操作):
        let clock = timestamp_to_jst_clock(i64::MAX);

        // then (期待する結果):
        assert_eq!(clock, "--:--:--");
    }

    #[test]
    fn test_get_jst_timestamp_is_positive() {
        // テスト項目: 現在時刻のタイムスタンプは正の値
        // then (期待する結果):
        assert!(get_jst_timestamp() > 0);
    }
}
