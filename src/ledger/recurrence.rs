use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::errors::{ProjectionError, Result};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

/// Day-of-month constraint after short-month resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthDay {
    Day(u32),
    Last,
}

impl MonthDay {
    /// Days 29-31 collapse to the last day of the month so that short months
    /// still produce an occurrence. A rule on the 29th therefore lands on the
    /// 31st in long months.
    pub fn resolve(day_of_month: u32) -> MonthDay {
        if (29..=31).contains(&day_of_month) {
            MonthDay::Last
        } else {
            MonthDay::Day(day_of_month)
        }
    }

    fn in_month(self, year: i32, month: u32) -> Option<NaiveDate> {
        match self {
            MonthDay::Day(day) => NaiveDate::from_ymd_opt(year, month, day),
            MonthDay::Last => NaiveDate::from_ymd_opt(year, month, days_in_month(year, month)),
        }
    }
}

/// Immutable recurrence rule owned by a single recurring definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrenceSpec {
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub frequency: Frequency,
    pub interval: u32,
    pub day_of_week: Option<Weekday>,
    pub day_of_month: Option<u32>,
}

impl RecurrenceSpec {
    pub fn new(start_date: NaiveDate, frequency: Frequency) -> Self {
        Self {
            start_date,
            end_date: None,
            frequency,
            interval: 1,
            day_of_week: None,
            day_of_month: None,
        }
    }

    /// A rule that fires exactly once, on `date`.
    pub fn once(date: NaiveDate) -> Self {
        Self::new(date, Frequency::Daily).until(date)
    }

    pub fn until(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn every(mut self, interval: u32) -> Self {
        self.interval = interval;
        self
    }

    pub fn on_weekday(mut self, weekday: Weekday) -> Self {
        self.day_of_week = Some(weekday);
        self
    }

    pub fn on_day_of_month(mut self, day: u32) -> Self {
        self.day_of_month = Some(day);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.interval == 0 {
            return Err(ProjectionError::InvalidSpec(
                "recurrence interval must be at least 1".into(),
            ));
        }
        if let Some(day) = self.day_of_month {
            if !(1..=31).contains(&day) {
                return Err(ProjectionError::InvalidSpec(format!(
                    "day_of_month must be between 1 and 31, got {day}"
                )));
            }
        }
        Ok(())
    }

    /// Occurrence dates inside `[query_start, query_end]`, in ascending order.
    ///
    /// An unbounded rule is clipped to `query_end`; a bounded one to the
    /// earlier of its own end date and `query_end`.
    pub fn generate_dates(&self, query_start: NaiveDate, query_end: NaiveDate) -> Vec<NaiveDate> {
        let end = match self.end_date {
            Some(end_date) => end_date.min(query_end),
            None => query_end,
        };
        if end < self.start_date {
            return Vec::new();
        }
        let interval = self.interval.max(1);
        let mut dates = match self.frequency {
            Frequency::Daily => daily_dates(self.start_date, end, interval),
            Frequency::Weekly => {
                let weekday = self.day_of_week.unwrap_or_else(|| self.start_date.weekday());
                weekly_dates(self.start_date, end, interval, weekday)
            }
            Frequency::Monthly => {
                let day = self
                    .day_of_month
                    .map(MonthDay::resolve)
                    .unwrap_or_else(|| MonthDay::Day(self.start_date.day()));
                monthly_dates(self.start_date, end, interval, day)
            }
        };
        dates.retain(|date| *date >= query_start);
        dates
    }

    pub fn label(&self) -> String {
        match (self.interval, self.frequency) {
            (1, Frequency::Daily) => "Daily".into(),
            (1, Frequency::Weekly) => "Weekly".into(),
            (1, Frequency::Monthly) => "Monthly".into(),
            (n, Frequency::Daily) => format!("Every {n} Days"),
            (n, Frequency::Weekly) => format!("Every {n} Weeks"),
            (n, Frequency::Monthly) => format!("Every {n} Months"),
        }
    }
}

fn daily_dates(start: NaiveDate, end: NaiveDate, interval: u32) -> Vec<NaiveDate> {
    stepped_dates(Some(start), end, Days::new(u64::from(interval)))
}

fn weekly_dates(start: NaiveDate, end: NaiveDate, interval: u32, weekday: Weekday) -> Vec<NaiveDate> {
    // Weeks start on Monday and are counted from the week containing `start`,
    // so a weekday earlier than `start` in that week moves on by one interval.
    let step = Days::new(7 * u64::from(interval));
    let target = u64::from(weekday.num_days_from_monday());
    let current = u64::from(start.weekday().num_days_from_monday());
    let first = if target >= current {
        start.checked_add_days(Days::new(target - current))
    } else {
        start
            .checked_add_days(step)
            .and_then(|date| date.checked_sub_days(Days::new(current - target)))
    };
    stepped_dates(first, end, step)
}

/// Walks from `first` by `step` until past `end` or the end of the calendar.
fn stepped_dates(first: Option<NaiveDate>, end: NaiveDate, step: Days) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let mut next = first;
    while let Some(date) = next.filter(|date| *date <= end) {
        dates.push(date);
        next = date.checked_add_days(step);
    }
    dates
}

fn monthly_dates(start: NaiveDate, end: NaiveDate, interval: u32, day: MonthDay) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let step = i64::from(interval);
    let mut index = month_index(start);
    let last_index = month_index(end);
    while index <= last_index {
        let Some((year, month)) = from_month_index(index) else {
            break;
        };
        if let Some(date) = day.in_month(year, month) {
            if date > end {
                break;
            }
            if date >= start {
                dates.push(date);
            }
        }
        match index.checked_add(step) {
            Some(next) => index = next,
            None => break,
        }
    }
    dates
}

fn month_index(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 12 + i64::from(date.month0())
}

fn from_month_index(index: i64) -> Option<(i32, u32)> {
    let year = i32::try_from(index.div_euclid(12)).ok()?;
    Some((year, index.rem_euclid(12) as u32 + 1))
}

pub(crate) fn days_in_month(year: i32, month: u32) -> u32 {
    if month == 12 {
        return 31;
    }
    NaiveDate::from_ymd_opt(year, month + 1, 1)
        .and_then(|first_next| first_next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28)
}
