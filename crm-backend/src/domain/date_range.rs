// src/domain/date_range.rs
//! 期間キーや from/to 文字列から UTC の境界時刻を求める。

use super::period::Period;
use crate::error::{AppError, AppResult};
use chrono::{
    DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc,
};

/// from/to の最大許容幅（日）
pub const MAX_RANGE_DAYS: i64 = 366;

const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// 期間キーから解決した閉区間 `[start, end]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ResolvedRange {
    pub fn start_date(&self) -> NaiveDate {
        self.start.date_naive()
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end.date_naive()
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }
}

/// 期間キーの開始（週は月曜始まり）から `now` までを返す
pub fn resolve_period(period: Period, now: DateTime<Utc>) -> ResolvedRange {
    let today = now.date_naive();
    let first_day = match period {
        Period::Weekly => {
            today - Duration::days(i64::from(today.weekday().num_days_from_monday()))
        }
        Period::Monthly => today.with_day(1).unwrap_or(today),
        Period::Quarterly => {
            let quarter_start_month = today.month0() / 3 * 3 + 1;
            NaiveDate::from_ymd_opt(today.year(), quarter_start_month, 1).unwrap_or(today)
        }
    };

    ResolvedRange {
        start: Utc.from_utc_datetime(&first_day.and_time(NaiveTime::MIN)),
        end: now,
    }
}

/// 片側ずつ任意の閉区間。未指定側はフィルタしない
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateBounds {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl DateBounds {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.from.map_or(true, |from| from <= instant)
            && self.to.map_or(true, |to| instant <= to)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BoundSide {
    From,
    To,
}

/// from/to 文字列を個別に解析し、幅を検証する
///
/// 解析できない値は未指定として扱う。日付のみの `to` はその日の終わりまで含める。
pub fn parse_bounds(from: Option<&str>, to: Option<&str>) -> AppResult<DateBounds> {
    let bounds = DateBounds {
        from: from.and_then(|raw| parse_instant(raw, BoundSide::From)),
        to: to.and_then(|raw| parse_instant(raw, BoundSide::To)),
    };

    if let (Some(from), Some(to)) = (bounds.from, bounds.to) {
        if to - from > Duration::days(MAX_RANGE_DAYS) {
            return Err(AppError::InvalidDateRange(format!(
                "Date range must not exceed {} days",
                MAX_RANGE_DAYS
            )));
        }
    }

    Ok(bounds)
}

/// 受け付ける年の範囲（西暦 1 年から 9999 年）
const SUPPORTED_YEARS: std::ops::RangeInclusive<i32> = 1..=9999;

fn parse_instant(raw: &str, side: BoundSide) -> Option<DateTime<Utc>> {
    // 範囲外の年は DB に渡さず未指定扱い
    parse_any_instant(raw, side).filter(|instant| SUPPORTED_YEARS.contains(&instant.year()))
}

fn parse_any_instant(raw: &str, side: BoundSide) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Some(naive) = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
    {
        return Some(Utc.from_utc_datetime(&naive));
    }

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    let time = match side {
        BoundSide::From => NaiveTime::MIN,
        // PostgreSQL の timestamptz はマイクロ秒精度
        BoundSide::To => NaiveTime::from_hms_micro_opt(23, 59, 59, 999_999)?,
    };
    Some(Utc.from_utc_datetime(&date.and_time(time)))
}
