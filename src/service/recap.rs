//! # Recap
//!
//! Summaries of the pages dated within a day, week or month.
//!
//! Ranges are computed in UTC from a reference date:
//! - `day`: that calendar day
//! - `week`: Monday through Sunday of the week containing it
//! - `month`: the calendar month containing it
//!
//! Both bounds are inclusive; the end is the last nanosecond of the range.

use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::access::Access;
use crate::ordering::Position;
use crate::store::DocumentStore;

use super::errors::{ServiceError, ServiceResult};
use super::Journal;

/// Recap period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecapFilter {
    #[default]
    Day,
    Week,
    Month,
}

impl RecapFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecapFilter::Day => "day",
            RecapFilter::Week => "week",
            RecapFilter::Month => "month",
        }
    }
}

impl FromStr for RecapFilter {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(RecapFilter::Day),
            "week" => Ok(RecapFilter::Week),
            "month" => Ok(RecapFilter::Month),
            other => Err(ServiceError::validation(format!(
                "filter must be one of day, week, month (got '{}')",
                other
            ))),
        }
    }
}

impl fmt::Display for RecapFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl DateRange {
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start_date <= instant && instant <= self.end_date
    }
}

/// Compute the range `filter` covers around `reference`
pub fn date_range(filter: RecapFilter, reference: NaiveDate) -> ServiceResult<DateRange> {
    let out_of_range = || ServiceError::validation(format!("date {} is out of range", reference));

    let (start, end_exclusive) = match filter {
        RecapFilter::Day => (reference, reference.succ_opt().ok_or_else(out_of_range)?),
        RecapFilter::Week => {
            let since_monday = Duration::days(reference.weekday().num_days_from_monday() as i64);
            let monday = reference.checked_sub_signed(since_monday).ok_or_else(out_of_range)?;
            let next = monday.checked_add_signed(Duration::days(7)).ok_or_else(out_of_range)?;
            (monday, next)
        }
        RecapFilter::Month => {
            let first = reference.with_day(1).ok_or_else(out_of_range)?;
            let next = first.checked_add_months(Months::new(1)).ok_or_else(out_of_range)?;
            (first, next)
        }
    };

    Ok(DateRange {
        start_date: midnight(start),
        end_date: midnight(end_exclusive) - Duration::nanoseconds(1),
    })
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

/// One page in a recap
#[derive(Debug, Clone, Serialize)]
pub struct RecapPage {
    pub id: Uuid,
    pub title: String,
    pub date: DateTime<Utc>,
    pub order_idx: Position,
    pub element_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Recap {
    pub filter: RecapFilter,
    pub date_range: DateRange,
    pub page_count: usize,
    pub element_count: usize,
    /// Newest date first, then by `order_idx`
    pub pages: Vec<RecapPage>,
}

pub struct RecapService<'a, S: DocumentStore> {
    journal: &'a Journal<S>,
}

impl<'a, S: DocumentStore> RecapService<'a, S> {
    pub(super) fn new(journal: &'a Journal<S>) -> Self {
        Self { journal }
    }

    /// Recap a board. `reference` defaults to today (UTC).
    pub fn recap(
        &self,
        board_id: Uuid,
        secret: Option<&str>,
        filter: RecapFilter,
        reference: Option<NaiveDate>,
    ) -> ServiceResult<Recap> {
        self.journal.read(board_id, Access::PublicRead, secret, |document| {
            let reference = reference.unwrap_or_else(|| Utc::now().date_naive());
            let range = date_range(filter, reference)?;

            let mut pages: Vec<RecapPage> = document
                .pages()
                .into_iter()
                .filter(|page| range.contains(page.date))
                .map(|page| RecapPage {
                    id: page.id,
                    title: page.title.clone(),
                    date: page.date,
                    order_idx: page.order_idx,
                    element_count: document.element_count(page.id),
                    created_at: page.created_at,
                    updated_at: page.updated_at,
                })
                .collect();
            pages.sort_by_key(|page| (Reverse(page.date), page.order_idx));

            Ok(Recap {
                filter,
                date_range: range,
                page_count: pages.len(),
                element_count: pages.iter().map(|page| page.element_count).sum(),
                pages,
            })
        })
    }
}
