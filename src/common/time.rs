use chrono::{DateTime, FixedOffset, TimeZone, Utc};

/// Get current Unix timestamp in JST (milliseconds)
pub fn get_jst_timestamp() -> i64 {
    let jst_offset = FixedOffset::east_opt(9 * 3600).unwrap(); // JST is UTC+9
    let now_utc = Utc::now();
    let now_jst: DateTime<FixedOffset> = now_utc.with_timezone(&jst_offset);
    now_jst.timestamp_millis()
}

/// Render a Unix millisecond timestamp as an RFC 3339 string in JST.
pub fn timestamp_to_jst_rfc3339(timestamp_millis: i64) -> String {
    let jst_offset = FixedOffset::east_opt(9 * 3600).unwrap();
    match Utc.timestamp_millis_opt(timestamp_millis) {
        chrono::LocalResult::Single(dt) => dt.with_timezone(&jst_offset).to_rfc3339(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_to_jst_rfc3339() {
        // テスト項目: ミリ秒タイムスタンプが JST の RFC 3339 文字列に変換される
        // given (前提条件):
        let timestamp = 1672498800000i64; // 2022-12-31T15:00:00Z = 2023-01-01T00:00:00+09:00

        // when (操作):
        let rendered = timestamp_to_jst_rfc3339(timestamp);

        // then (期待する結果):
        assert_eq!(rendered, "2023-01-01T00:00:00+09:00");
    }

    #[test]
    fn test_get_jst_timestamp_is_positive() {
        // テスト項目: 現在時刻のタイムスタンプが取得できる
        assert!(get_jst_timestamp() > 0);
    }
}
