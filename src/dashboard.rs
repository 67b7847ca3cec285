use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Duration, Months, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::{Client, ClientId, Payment};

/// reporting window over the payment history
///
/// all windows end at the current instant except `PreviousYear`, which is
/// the whole previous calendar year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PeriodWindow {
    CurrentMonth,
    TrailingThirtyDays,
    TrailingThreeMonths,
    TrailingSixMonths,
    PreviousYear,
    CurrentYear,
}

impl PeriodWindow {
    /// inclusive `[start, end]` bounds relative to `now`
    pub fn bounds(&self, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        match self {
            PeriodWindow::CurrentMonth => {
                let start = Utc
                    .with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
                    .unwrap();
                (start, now)
            }
            PeriodWindow::TrailingThirtyDays => (now - Duration::days(30), now),
            PeriodWindow::TrailingThreeMonths => {
                (now.checked_sub_months(Months::new(3)).unwrap_or(now), now)
            }
            PeriodWindow::TrailingSixMonths => {
                (now.checked_sub_months(Months::new(6)).unwrap_or(now), now)
            }
            PeriodWindow::PreviousYear => {
                let year = now.year() - 1;
                let start = Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).unwrap();
                let end = Utc.with_ymd_and_hms(year, 12, 31, 23, 59, 59).unwrap();
                (start, end)
            }
            PeriodWindow::CurrentYear => {
                let start = Utc.with_ymd_and_hms(now.year(), 1, 1, 0, 0, 0).unwrap();
                (start, now)
            }
        }
    }

    /// whether a payment timestamp falls inside the window
    pub fn contains(&self, timestamp: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        let (start, end) = self.bounds(now);
        timestamp >= start && timestamp <= end
    }
}

/// capital and interest sums over a payment set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct CategoryTotals {
    pub capital: Money,
    pub interest: Money,
}

impl CategoryTotals {
    pub fn total(&self) -> Money {
        self.capital + self.interest
    }
}

/// per-client sums within the window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientTotals {
    pub client_id: ClientId,
    /// resolved from the client list; absent for payments referencing an
    /// unknown client
    pub name: Option<String>,
    pub capital_paid: Money,
    pub interest_paid: Money,
    pub last_payment_date: DateTime<Utc>,
}

impl ClientTotals {
    pub fn total_paid(&self) -> Money {
        self.capital_paid + self.interest_paid
    }
}

/// dashboard aggregation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub totals: CategoryTotals,
    pub per_client: Vec<ClientTotals>,
}

/// aggregate payments falling inside the window
///
/// per-client entries are sorted by total paid descending, with the client
/// id as tie-break
pub fn summarize(
    payments: &[Payment],
    clients: &[Client],
    window: PeriodWindow,
    now: DateTime<Utc>,
) -> DashboardSummary {
    let names: BTreeMap<&str, &str> = clients
        .iter()
        .map(|c| (c.id.as_str(), c.name.as_str()))
        .collect();

    let mut totals = CategoryTotals::default();
    let mut grouped: BTreeMap<&str, ClientTotals> = BTreeMap::new();

    for payment in payments {
        if !window.contains(payment.date, now) {
            continue;
        }

        totals.capital += payment.capital_amount;
        totals.interest += payment.interest_amount;

        let entry = grouped
            .entry(payment.client_id.as_str())
            .or_insert_with(|| ClientTotals {
                client_id: payment.client_id.clone(),
                name: names.get(payment.client_id.as_str()).map(|n| n.to_string()),
                capital_paid: Money::ZERO,
                interest_paid: Money::ZERO,
                last_payment_date: payment.date,
            });

        entry.capital_paid += payment.capital_amount;
        entry.interest_paid += payment.interest_amount;
        if payment.date > entry.last_payment_date {
            entry.last_payment_date = payment.date;
        }
    }

    let mut per_client: Vec<ClientTotals> = grouped.into_values().collect();
    per_client.sort_by(|a, b| {
        b.total_paid()
            .cmp(&a.total_paid())
            .then_with(|| a.client_id.cmp(&b.client_id))
    });

    DashboardSummary { totals, per_client }
}
