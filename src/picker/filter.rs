//! 过滤排序引擎
//!
//! 从（快照，日期过滤，艺术家过滤，排序）纯函数式推导可见子集。
//! 每次过滤或排序变化时整体重算，不做增量维护。

use std::cmp::Ordering;

use chrono::{DateTime, Days, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Media;

/// 日期过滤档位
///
/// 截止时间在每次调用时以传入的 `now` 现算，不缓存。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DateFilter {
    /// 不限
    #[default]
    All,
    /// 今天（当日零点起）
    Today,
    /// 最近 7 天
    Week,
    /// 最近 30 天
    Month,
}

impl DateFilter {
    /// 计算入选截止时间；`All` 无截止
    pub fn cutoff(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            DateFilter::All => None,
            DateFilter::Today => Some(now.date_naive().and_time(NaiveTime::MIN).and_utc()),
            // 按日历日回退，而非固定小时数
            DateFilter::Week => now.checked_sub_days(Days::new(7)),
            DateFilter::Month => now.checked_sub_days(Days::new(30)),
        }
    }
}

/// 排序方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MediaSort {
    /// 最新在前
    #[default]
    DateDesc,
    /// 最旧在前
    DateAsc,
    /// 文件名升序
    NameAsc,
    /// 文件名降序
    NameDesc,
}

/// 会话内的过滤状态
///
/// 均为临时状态，重新打开选择器时重置（宿主提供的默认艺术家除外）。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub date: DateFilter,
    pub artist_id: Option<String>,
}

/// 文件名比较
///
/// 先按 Unicode 小写折叠比较，折叠后相等再按原始串比较，
/// 保证排序结果确定。代替原实现的 locale 感知比较。
fn compare_filenames(a: &str, b: &str) -> Ordering {
    match a.to_lowercase().cmp(&b.to_lowercase()) {
        Ordering::Equal => a.cmp(b),
        ordering => ordering,
    }
}

fn compare(sort: MediaSort, a: &Media, b: &Media) -> Ordering {
    match sort {
        MediaSort::DateDesc => b.created_at.cmp(&a.created_at),
        MediaSort::DateAsc => a.created_at.cmp(&b.created_at),
        MediaSort::NameAsc => compare_filenames(&a.filename, &b.filename),
        MediaSort::NameDesc => compare_filenames(&b.filename, &a.filename),
    }
}

/// 推导可见子集及展示顺序
///
/// 过滤条件彼此独立（先后顺序不影响结果集），排序最后施加且稳定：
/// 比较相等的条目保持快照中的相对顺序。
pub fn visible<'a>(
    items: &'a [Media],
    filters: &FilterState,
    sort: MediaSort,
    now: DateTime<Utc>,
) -> Vec<&'a Media> {
    let cutoff = filters.date.cutoff(now);

    let mut result: Vec<&Media> = items
        .iter()
        .filter(|m| match &filters.artist_id {
            Some(artist_id) => m.artist_id.as_deref() == Some(artist_id.as_str()),
            None => true,
        })
        .filter(|m| match cutoff {
            Some(cutoff) => m.created_at >= cutoff,
            None => true,
        })
        .collect();

    // Vec::sort_by 为稳定排序
    result.sort_by(|a, b| compare(sort, a, b));
    result
}
