//! Dashboard counters, week-over-week trends, and the weekly series.
//!
//! All functions here are pure over a ticket slice; the board passes
//! its collection through and the CLI renders the results.

use crate::model::{Sentiment, Ticket};
use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, Utc, Weekday};
use serde::Serialize;

/// Counters over the full collection plus week-over-week trends.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardStats {
    pub total: usize,
    pub pending: usize,
    pub processed: usize,
    pub positive: usize,
    pub negative: usize,
    pub trends: StatTrends,
}

/// Week-over-week percentage change per headline metric.
///
/// `+100.0` means activity where the previous week had none; `0.0`
/// means either no change or two empty weeks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatTrends {
    pub total: f64,
    pub pending: f64,
    pub processed: f64,
    pub negative: f64,
}

/// Counts shown on the filter tabs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterCounts {
    pub all: usize,
    pub pending: usize,
    pub processed: usize,
    pub positive: usize,
    pub negative: usize,
}

/// One calendar day of the Monday-to-Sunday series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub total: usize,
    pub processed: usize,
    pub pending: usize,
    pub negative: usize,
}

impl DayBucket {
    /// Short Spanish weekday label, as the dashboard chart shows.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self.date.weekday() {
            Weekday::Mon => "lun",
            Weekday::Tue => "mar",
            Weekday::Wed => "mié",
            Weekday::Thu => "jue",
            Weekday::Fri => "vie",
            Weekday::Sat => "sáb",
            Weekday::Sun => "dom",
        }
    }
}

/// Roll-up over a week of buckets (the chart footer).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekSummary {
    pub total: usize,
    pub processed: usize,
    pub negative: usize,
    /// Processed share of the week's tickets, whole percent; `0` for
    /// an empty week.
    pub processing_rate: u32,
}

/// Compute the dashboard counters and trends as of `now`.
#[must_use]
pub fn compute(tickets: &[Ticket], now: DateTime<Utc>) -> BoardStats {
    let pending = tickets.iter().filter(|t| t.is_pending()).count();
    let negative = tickets
        .iter()
        .filter(|t| t.has_sentiment(&Sentiment::Negative))
        .count();

    BoardStats {
        total: tickets.len(),
        pending,
        processed: tickets.len() - pending,
        positive: tickets
            .iter()
            .filter(|t| t.has_sentiment(&Sentiment::Positive))
            .count(),
        negative,
        trends: StatTrends {
            total: trend(tickets, now, |_| true),
            pending: trend(tickets, now, |t| t.is_pending()),
            processed: trend(tickets, now, |t| t.processed),
            negative: trend(tickets, now, |t| t.has_sentiment(&Sentiment::Negative)),
        },
    }
}

/// Counts for the filter tabs.
#[must_use]
pub fn filter_counts(tickets: &[Ticket]) -> FilterCounts {
    let pending = tickets.iter().filter(|t| t.is_pending()).count();
    FilterCounts {
        all: tickets.len(),
        pending,
        processed: tickets.len() - pending,
        positive: tickets
            .iter()
            .filter(|t| t.has_sentiment(&Sentiment::Positive))
            .count(),
        negative: tickets
            .iter()
            .filter(|t| t.has_sentiment(&Sentiment::Negative))
            .count(),
    }
}

/// Week-over-week percentage change for tickets matching `predicate`.
///
/// `current` counts matches created in the last 7 days, `previous`
/// the 7-to-14-day window before that. An empty previous week maps to
/// `100` when there is new activity and `0` otherwise, so the division
/// never blows up and "new activity" reads as +100%.
fn trend(tickets: &[Ticket], now: DateTime<Utc>, predicate: impl Fn(&Ticket) -> bool) -> f64 {
    let week_ago = now - Duration::days(7);
    let two_weeks_ago = now - Duration::days(14);

    let current = tickets
        .iter()
        .filter(|t| predicate(t) && t.created_at > week_ago && t.created_at <= now)
        .count();
    let previous = tickets
        .iter()
        .filter(|t| predicate(t) && t.created_at > two_weeks_ago && t.created_at <= week_ago)
        .count();

    if previous == 0 {
        return if current > 0 { 100.0 } else { 0.0 };
    }

    #[allow(clippy::cast_precision_loss)]
    let change = (current as f64 - previous as f64) / previous as f64 * 100.0;
    round1(change)
}

/// Round to one decimal place.
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Bucket the collection into the Monday-to-Sunday week containing
/// `today`.
///
/// A ticket lands in a bucket when its `created_at`, taken as a local
/// calendar date with time-of-day ignored, equals the bucket's date.
#[must_use]
pub fn weekly_series(tickets: &[Ticket], today: NaiveDate) -> [DayBucket; 7] {
    let monday = today - Duration::days(i64::from(today.weekday().num_days_from_monday()));

    std::array::from_fn(|offset| {
        #[allow(clippy::cast_possible_wrap)]
        let date = monday + Duration::days(offset as i64);
        let day: Vec<&Ticket> = tickets
            .iter()
            .filter(|t| t.created_at.with_timezone(&Local).date_naive() == date)
            .collect();

        let pending = day.iter().filter(|t| t.is_pending()).count();
        DayBucket {
            date,
            total: day.len(),
            processed: day.len() - pending,
            pending,
            negative: day
                .iter()
                .filter(|t| t.has_sentiment(&Sentiment::Negative))
                .count(),
        }
    })
}

/// Roll the weekly buckets up into the chart footer summary.
#[must_use]
pub fn summarize_week(days: &[DayBucket]) -> WeekSummary {
    let total: usize = days.iter().map(|d| d.total).sum();
    let processed: usize = days.iter().map(|d| d.processed).sum();
    let negative: usize = days.iter().map(|d| d.negative).sum();

    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let processing_rate = if total == 0 {
        0
    } else {
        (processed as f64 / total as f64 * 100.0).round() as u32
    };

    WeekSummary {
        total,
        processed,
        negative,
        processing_rate,
    }
}
