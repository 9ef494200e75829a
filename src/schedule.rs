//! 礼拜时间表与“正在直播”判断
//!
//! 判断逻辑是 `(schedule, now) -> bool` 的纯函数，时钟通过 [`Clock`] 注入。

use chrono::{Datelike, Days, Local, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::models::Service;

/// 查找下一次礼拜时向前搜索的天数上限（覆盖每月一次的礼拜）
const LOOKAHEAD_DAYS: u64 = 62;

/// 重复规则
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Recurrence {
    #[default]
    Weekly,
    /// 每月第一个指定星期几
    FirstOfMonth,
}

/// 礼拜时间窗口。`end <= start` 表示跨越午夜，在次日结束。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceWindow {
    pub day: Weekday,
    #[serde(default)]
    pub recurrence: Recurrence,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl ServiceWindow {
    pub fn weekly(day: Weekday, start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            day,
            recurrence: Recurrence::Weekly,
            start,
            end,
        }
    }

    pub fn first_of_month(day: Weekday, start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            day,
            recurrence: Recurrence::FirstOfMonth,
            start,
            end,
        }
    }

    pub fn crosses_midnight(&self) -> bool {
        self.end <= self.start
    }

    /// 该日期是否有一次礼拜开始
    pub fn occurs_on(&self, date: NaiveDate) -> bool {
        if date.weekday() != self.day {
            return false;
        }
        match self.recurrence {
            Recurrence::Weekly => true,
            Recurrence::FirstOfMonth => date.day() <= 7,
        }
    }

    /// `now` 是否落在某次礼拜的 `[start, end)` 内
    pub fn contains(&self, now: NaiveDateTime) -> bool {
        let date = now.date();
        let time = now.time();

        if !self.crosses_midnight() {
            return self.occurs_on(date) && time >= self.start && time < self.end;
        }

        let started_today = self.occurs_on(date) && time >= self.start;
        let started_yesterday = date
            .pred_opt()
            .is_some_and(|yesterday| self.occurs_on(yesterday))
            && time < self.end;
        started_today || started_yesterday
    }

    /// 严格晚于 `now` 的下一次开始时间
    pub fn next_start(&self, now: NaiveDateTime) -> Option<NaiveDateTime> {
        (0..=LOOKAHEAD_DAYS)
            .filter_map(|offset| now.date().checked_add_days(Days::new(offset)))
            .filter(|date| self.occurs_on(*date))
            .map(|date| date.and_time(self.start))
            .find(|start| *start > now)
    }

    /// 人类可读的描述，如 "Sundays 10:00 – 14:00"
    pub fn describe(&self) -> String {
        let day = weekday_name(self.day);
        let when = match self.recurrence {
            Recurrence::Weekly => format!("{day}s"),
            Recurrence::FirstOfMonth => format!("First {day}"),
        };
        format!(
            "{when} {} – {}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

// ============ 时间表查询 ============

pub fn is_live<'a>(
    windows: impl IntoIterator<Item = &'a ServiceWindow>,
    now: NaiveDateTime,
) -> bool {
    windows.into_iter().any(|window| window.contains(now))
}

/// 当前正在进行的礼拜
pub fn live_service(services: &[Service], now: NaiveDateTime) -> Option<&Service> {
    services.iter().find(|service| service.window.contains(now))
}

/// 下一次开始的礼拜及其开始时间
pub fn next_service(services: &[Service], now: NaiveDateTime) -> Option<(&Service, NaiveDateTime)> {
    services
        .iter()
        .filter_map(|service| service.window.next_start(now).map(|start| (service, start)))
        .min_by_key(|(_, start)| *start)
}

// ============ 时钟 ============

/// 可注入的时钟
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// 本地系统时间
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// 固定时间，用于测试
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
