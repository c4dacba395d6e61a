use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 数値IDの値オブジェクトを定義する
///
/// IDはストアが採番する。ドメイン層は値を生成しない。
macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            pub fn new(value: i64) -> Self {
                Self(value)
            }

            pub fn value(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

numeric_id!(
    /// ユーザーID
    UserId
);
numeric_id!(
    /// アイテムID
    ItemId
);
numeric_id!(
    /// 予約ID
    BookingId
);
numeric_id!(
    /// コメントID
    CommentId
);
numeric_id!(
    /// アイテムリクエストID
    RequestId
);

/// 予約期間のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingWindowError {
    /// 開始が終了より前ではない
    StartNotBeforeEnd,
}

/// 予約期間 `[start, end)`
///
/// 不変条件：start < end
/// コンストラクタでのみ検証し、不正な期間を作成できないようにする。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl BookingWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, BookingWindowError> {
        if start >= end {
            return Err(BookingWindowError::StartNotBeforeEnd);
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// 半開区間同士が重なっているか
    pub fn overlaps(&self, other: &BookingWindow) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// 既に終了しているか
    pub fn has_ended_before(&self, now: DateTime<Utc>) -> bool {
        self.end < now
    }

    /// まだ開始していないか
    pub fn starts_after(&self, now: DateTime<Utc>) -> bool {
        self.start > now
    }

    /// 利用中か（開始済みかつ未終了）
    pub fn is_in_progress_at(&self, now: DateTime<Utc>) -> bool {
        self.start < now && self.end > now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_booking_window_accepts_start_before_end() {
        let start = Utc::now();
        let end = start + Duration::days(1);

        let window = BookingWindow::new(start, end).unwrap();
        assert_eq!(window.start(), start);
        assert_eq!(window.end(), end);
    }

    #[test]
    fn test_booking_window_rejects_equal_bounds() {
        let at = Utc::now();
        assert_eq!(
            BookingWindow::new(at, at),
            Err(BookingWindowError::StartNotBeforeEnd)
        );
    }

    #[test]
    fn test_booking_window_rejects_reversed_bounds() {
        let start = Utc::now();
        let end = start - Duration::hours(1);
        assert_eq!(
            BookingWindow::new(start, end),
            Err(BookingWindowError::StartNotBeforeEnd)
        );
    }

    #[test]
    fn test_booking_window_overlap_is_half_open() {
        let base = Utc::now();
        let first = BookingWindow::new(base, base + Duration::days(2)).unwrap();
        let touching =
            BookingWindow::new(base + Duration::days(2), base + Duration::days(3)).unwrap();
        let inside =
            BookingWindow::new(base + Duration::days(1), base + Duration::days(4)).unwrap();

        // 終了時刻ちょうどに始まる予約は重ならない
        assert!(!first.overlaps(&touching));
        assert!(first.overlaps(&inside));
        assert!(inside.overlaps(&first));
    }

    #[test]
    fn test_booking_window_temporal_predicates() {
        let now = Utc::now();
        let past = BookingWindow::new(now - Duration::days(3), now - Duration::days(2)).unwrap();
        let future = BookingWindow::new(now + Duration::days(1), now + Duration::days(2)).unwrap();
        let running = BookingWindow::new(now - Duration::days(1), now + Duration::days(1)).unwrap();

        assert!(past.has_ended_before(now));
        assert!(!past.is_in_progress_at(now));
        assert!(future.starts_after(now));
        assert!(!future.has_ended_before(now));
        assert!(running.is_in_progress_at(now));
        assert!(!running.starts_after(now));
    }

    #[test]
    fn test_ids_compare_by_value() {
        assert_eq!(UserId::new(7), UserId::new(7));
        assert_ne!(ItemId::new(1), ItemId::new(2));
        assert_eq!(BookingId::new(42).value(), 42);
        assert_eq!(RequestId::new(3).to_string(), "3");
    }
}
