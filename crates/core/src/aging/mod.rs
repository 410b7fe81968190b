//! Aging of unsettled receivables and payables.
//!
//! Each unsettled transaction is placed in one of four fixed buckets by the
//! number of days between its date and an injected "as of" date. All four
//! buckets are always present so charts keep a stable shape.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::Transaction;
use crate::metrics::percent_of;


/// One of the four aging buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AgingBucketKind {
    /// 0 to 30 days.
    Current,
    /// 31 to 60 days.
    Days31To60,
    /// 61 to 90 days.
    Days61To90,
    /// More than 90 days.
    Over90,
}

impl AgingBucketKind {
    /// All buckets, youngest first.
    pub const ALL: [Self; 4] = [Self::Current, Self::Days31To60, Self::Days61To90, Self::Over90];

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Current => "0-30 days",
            Self::Days31To60 => "31-60 days",
            Self::Days61To90 => "61-90 days",
            Self::Over90 => "90+ days",
        }
    }

    /// Bucket for a number of days outstanding. Upper bounds are inclusive.
    #[must_use]
    pub const fn for_days(days: i64) -> Self {
        match days {
            ..=30 => Self::Current,
            31..=60 => Self::Days31To60,
            61..=90 => Self::Days61To90,
            _ => Self::Over90,
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Current => 0,
            Self::Days31To60 => 1,
            Self::Days61To90 => 2,
            Self::Over90 => 3,
        }
    }
}

/// Whole days from `date` to `as_of`, never negative.
#[must_use]
pub fn days_outstanding(date: NaiveDate, as_of: NaiveDate) -> i64 {
    (as_of - date).num_days().max(0)
}

/// Amount outstanding in one bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgingBucket {
    /// Bucket.
    pub bucket: AgingBucketKind,
    /// Display label, e.g. `"31-60 days"`.
    pub label: String,
    /// Sum of amounts in the bucket.
    pub amount: Decimal,
    /// Number of transactions in the bucket.
    pub count: usize,
    /// Share of the classified total.
    pub percentage: Decimal,
}

/// Buckets unsettled transactions by days outstanding as of `as_of`.
///
/// The caller passes only unsettled rows. Amounts of the four buckets sum to
/// the input total.
pub fn classify<'a, I>(unsettled: I, as_of: NaiveDate) -> [AgingBucket; 4]
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut amounts = [Decimal::ZERO; 4];
    let mut counts = [0usize; 4];
    for tx in unsettled {
        let i = AgingBucketKind::for_days(days_outstanding(tx.date, as_of)).index();
        amounts[i] += tx.amount;
        counts[i] += 1;
    }
    let total: Decimal = amounts.iter().copied().sum();

    AgingBucketKind::ALL.map(|bucket| {
        let i = bucket.index();
        AgingBucket {
            bucket,
            label: bucket.label().to_string(),
            amount: amounts[i],
            count: counts[i],
            percentage: percent_of(amounts[i], total),
        }
    })
}
