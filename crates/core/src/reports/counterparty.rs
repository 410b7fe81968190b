//! Customer and supplier contribution reports.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::str::FromStr;

use ledgerlens_shared::types::{CategoryId, CounterpartyId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::ReportError;
use super::types::{CategorySummary, CounterpartyReport, CounterpartySummary, MonthSummary};
use crate::aggregate::{
    SettlementTotals, StatusFilter, aggregate, by_calendar_month, by_counterparty, total,
};
use crate::ledger::{Counterparty, CounterpartyRole, LedgerSnapshot, Transaction};
use crate::metrics::percent_of;

/// Ordering of a counterparty list. Numeric keys sort descending, names ascending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CounterpartySort {
    /// Alphabetical.
    Name,
    /// Received (customers) or paid (suppliers).
    Settled,
    /// Pending (customers) or unpaid (suppliers).
    Unsettled,
    /// Share of the ledger total.
    Percentage,
    /// Total amount.
    #[default]
    Total,
}

impl FromStr for CounterpartySort {
    type Err = std::convert::Infallible;

    /// Accepts the ledger-specific aliases; anything else sorts by total.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "name" => Self::Name,
            "settled" | "received" | "paid" => Self::Settled,
            "unsettled" | "pending" | "unpaid" => Self::Unsettled,
            "percentage" => Self::Percentage,
            _ => Self::Total,
        })
    }
}

impl CounterpartySort {
    fn compare(self, a: &CounterpartyReport, b: &CounterpartyReport) -> Ordering {
        let primary = match self {
            Self::Name => Ordering::Equal,
            Self::Settled => b.settled_amount.cmp(&a.settled_amount),
            Self::Unsettled => b.unsettled_amount.cmp(&a.unsettled_amount),
            Self::Percentage => b
                .percentage_of_ledger_total
                .cmp(&a.percentage_of_ledger_total),
            Self::Total => b.total_amount.cmp(&a.total_amount),
        };
        primary
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.counterparty_id.cmp(&b.counterparty_id))
    }

    /// Sorts reports in place.
    pub fn apply(self, reports: &mut [CounterpartyReport]) {
        reports.sort_by(|a, b| self.compare(a, b));
    }
}

/// Contribution of one counterparty to its ledger in `snapshot`.
///
/// The percentage is taken against the whole ledger total. Month and
/// category breakdowns list only entries with a non-zero amount.
#[must_use]
pub fn counterparty_report(
    snapshot: &LedgerSnapshot,
    counterparty: &Counterparty,
) -> CounterpartyReport {
    let ledger = snapshot.ledger(counterparty.role.ledger_kind());
    let ledger_total = total(ledger, StatusFilter::All);
    let rows: Vec<&Transaction> = ledger
        .iter()
        .filter(|tx| tx.counterparty_id == Some(counterparty.id))
        .collect();
    let totals = SettlementTotals::of(rows.iter().copied());

    let by_month = aggregate(rows.iter().copied(), by_calendar_month, StatusFilter::All);
    let transactions_by_month = by_month
        .into_iter()
        .filter(|(_, tally)| !tally.amount.is_zero())
        .map(|((year, month), tally)| MonthSummary {
            year,
            month,
            transaction_count: tally.count,
            amount: tally.amount,
            percentage: percent_of(tally.amount, totals.total),
        })
        .collect();

    CounterpartyReport {
        counterparty_id: counterparty.id,
        name: counterparty.name.clone(),
        email: counterparty.email.clone(),
        phone: counterparty.phone.clone(),
        role: counterparty.role,
        total_amount: totals.total,
        settled_amount: totals.settled,
        unsettled_amount: totals.unsettled,
        percentage_of_ledger_total: percent_of(totals.total, ledger_total),
        transactions_by_month,
        transactions_by_category: by_category_breakdown(&rows, totals.total),
    }
}

fn by_category_breakdown(rows: &[&Transaction], whole: Decimal) -> Vec<CategorySummary> {
    let mut sums: BTreeMap<CategoryId, (String, Decimal)> = BTreeMap::new();
    for tx in rows {
        sums.entry(tx.category_id)
            .or_insert_with(|| (tx.category_name.clone(), Decimal::ZERO))
            .1 += tx.amount;
    }

    let mut categories: Vec<CategorySummary> = sums
        .into_iter()
        .filter(|(_, (_, amount))| !amount.is_zero())
        .map(|(category_id, (category_name, amount))| CategorySummary {
            category_id,
            category_name,
            amount,
            percentage: percent_of(amount, whole),
        })
        .collect();
    categories.sort_by(|a, b| {
        b.amount
            .cmp(&a.amount)
            .then_with(|| a.category_name.cmp(&b.category_name))
            .then_with(|| a.category_id.cmp(&b.category_id))
    });
    categories
}

/// Reports for every active counterparty of `role` with a non-zero total.
#[must_use]
pub fn counterparty_reports(
    snapshot: &LedgerSnapshot,
    role: CounterpartyRole,
    directory: &[Counterparty],
    sort: CounterpartySort,
) -> Vec<CounterpartyReport> {
    let mut reports: Vec<CounterpartyReport> = directory
        .iter()
        .filter(|c| c.role == role && c.is_active)
        .map(|c| counterparty_report(snapshot, c))
        .filter(|r| !r.total_amount.is_zero())
        .collect();
    sort.apply(&mut reports);
    reports
}

/// Detail report for one counterparty, inactive ones included.
///
/// # Errors
///
/// `NotFound` when `id` is not a counterparty of `role`.
pub fn counterparty_detail(
    snapshot: &LedgerSnapshot,
    role: CounterpartyRole,
    directory: &[Counterparty],
    id: CounterpartyId,
) -> Result<CounterpartyReport, ReportError> {
    directory
        .iter()
        .find(|c| c.id == id && c.role == role)
        .map(|c| counterparty_report(snapshot, c))
        .ok_or_else(|| ReportError::NotFound {
            entity: role.entity_name(),
            id: id.to_string(),
        })
}

/// Ledger totals plus one entry per counterparty seen in the transactions.
///
/// Counterparties missing from `directory` are reported under the name
/// carried by their transactions, without contact details.
#[must_use]
pub fn counterparty_summary(
    snapshot: &LedgerSnapshot,
    role: CounterpartyRole,
    directory: &[Counterparty],
    sort: CounterpartySort,
) -> CounterpartySummary {
    let ledger = snapshot.ledger(role.ledger_kind());
    let totals = SettlementTotals::of(ledger);

    let mut entities: Vec<_> = aggregate(ledger, by_counterparty, StatusFilter::All)
        .into_keys()
        .map(|id| {
            let known = directory.iter().find(|c| c.id == id && c.role == role);
            match known {
                Some(c) => counterparty_report(snapshot, c),
                None => {
                    let name = ledger
                        .iter()
                        .find(|tx| tx.counterparty_id == Some(id))
                        .map_or("Unknown", Transaction::counterparty_label);
                    let stand_in = Counterparty {
                        id,
                        ..Counterparty::new(name, role)
                    };
                    counterparty_report(snapshot, &stand_in)
                }
            }
        })
        .collect();
    sort.apply(&mut entities);

    CounterpartySummary {
        role,
        range: snapshot.range,
        total_amount: totals.total,
        settled_amount: totals.settled,
        unsettled_amount: totals.unsettled,
        entities,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::PaymentStatus;
    use crate::period::DateRange;
    use chrono::NaiveDate;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn sale(
        m: u32,
        amount: Decimal,
        status: PaymentStatus,
        who: &Counterparty,
        cat: CategoryId,
    ) -> Transaction {
        let date = NaiveDate::from_ymd_opt(2024, m, 3).unwrap();
        Transaction::new(date, amount, status, cat, "Sales")
            .with_counterparty(who.id, who.name.clone())
    }

    struct Fixture {
        acme: Counterparty,
        globex: Counterparty,
        dormant: Counterparty,
        snapshot: LedgerSnapshot,
    }

    fn fixture() -> Fixture {
        let acme = Counterparty::new("Acme", CounterpartyRole::Customer);
        let globex = Counterparty::new("Globex", CounterpartyRole::Customer);
        let dormant = Counterparty::new("Dormant", CounterpartyRole::Customer);
        let (sales, consulting) = (CategoryId::new(), CategoryId::new());
        let snapshot = LedgerSnapshot::new(
            DateRange::year(2024).unwrap(),
            vec![
                sale(5, dec!(100), PaymentStatus::Received, &acme, sales),
                sale(5, dec!(50), PaymentStatus::Pending, &acme, consulting),
                sale(7, dec!(250), PaymentStatus::Pending, &globex, sales),
                sale(7, dec!(0), PaymentStatus::Received, &acme, sales),
            ],
            Vec::new(),
        );
        Fixture {
            acme,
            globex,
            dormant,
            snapshot,
        }
    }

    #[test]
    fn test_share_is_against_ledger_total() {
        let f = fixture();
        let report = counterparty_report(&f.snapshot, &f.acme);

        assert_eq!(report.total_amount, dec!(150));
        assert_eq!(report.settled_amount, dec!(100));
        assert_eq!(report.unsettled_amount, dec!(50));
        assert_eq!(report.percentage_of_ledger_total, dec!(37.50));
        // zero-amount July row is dropped
        assert_eq!(report.transactions_by_month.len(), 1);
        assert_eq!(report.transactions_by_month[0].transaction_count, 2);
        assert_eq!(report.transactions_by_month[0].percentage, dec!(100));
        assert_eq!(report.transactions_by_category[0].amount, dec!(100));
        assert_eq!(report.transactions_by_category[1].percentage, dec!(33.33));
    }

    #[test]
    fn test_list_excludes_empty_and_inactive() {
        let mut f = fixture();
        f.globex.is_active = false;

        let directory = vec![f.acme.clone(), f.globex.clone(), f.dormant.clone()];
        let reports = counterparty_reports(
            &f.snapshot,
            CounterpartyRole::Customer,
            &directory,
            CounterpartySort::Total,
        );
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].name, "Acme");
    }

    #[rstest]
    #[case(CounterpartySort::Total, ["Globex", "Acme"])]
    #[case(CounterpartySort::Settled, ["Acme", "Globex"])]
    #[case(CounterpartySort::Unsettled, ["Globex", "Acme"])]
    #[case(CounterpartySort::Name, ["Acme", "Globex"])]
    fn test_sort_orders(#[case] sort: CounterpartySort, #[case] expected: [&str; 2]) {
        let f = fixture();
        let directory = vec![f.globex.clone(), f.acme.clone()];
        let reports =
            counterparty_reports(&f.snapshot, CounterpartyRole::Customer, &directory, sort);
        let names: Vec<&str> = reports.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, expected);
    }

    #[rstest]
    #[case("received", CounterpartySort::Settled)]
    #[case("PAID", CounterpartySort::Settled)]
    #[case("unpaid", CounterpartySort::Unsettled)]
    #[case("pending", CounterpartySort::Unsettled)]
    #[case("name", CounterpartySort::Name)]
    #[case("percentage", CounterpartySort::Percentage)]
    #[case("amount", CounterpartySort::Total)]
    #[case("bogus", CounterpartySort::Total)]
    fn test_sort_parsing(#[case] input: &str, #[case] expected: CounterpartySort) {
        assert_eq!(input.parse::<CounterpartySort>().unwrap(), expected);
    }

    #[test]
    fn test_detail_for_unknown_id_is_not_found() {
        let f = fixture();
        let directory = vec![f.acme.clone()];
        let err = counterparty_detail(
            &f.snapshot,
            CounterpartyRole::Customer,
            &directory,
            f.globex.id,
        )
        .unwrap_err();
        assert!(matches!(err, ReportError::NotFound { entity: "customer", .. }));

        // wrong role is also unknown
        let err =
            counterparty_detail(&f.snapshot, CounterpartyRole::Supplier, &directory, f.acme.id)
                .unwrap_err();
        assert!(matches!(err, ReportError::NotFound { entity: "supplier", .. }));
    }

    #[test]
    fn test_detail_of_idle_counterparty_is_zero() {
        let f = fixture();
        let directory = vec![f.dormant.clone()];
        let report =
            counterparty_detail(&f.snapshot, CounterpartyRole::Customer, &directory, f.dormant.id)
                .unwrap();
        assert_eq!(report.total_amount, dec!(0));
        assert_eq!(report.percentage_of_ledger_total, dec!(0));
        assert!(report.transactions_by_month.is_empty());
    }

    #[test]
    fn test_report_field_names() {
        let f = fixture();
        let json = serde_json::to_value(counterparty_report(&f.snapshot, &f.acme)).unwrap();
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        for key in [
            "total_amount",
            "settled_amount",
            "unsettled_amount",
            "percentage_of_ledger_total",
            "transactions_by_month",
            "transactions_by_category",
        ] {
            assert!(keys.contains(&key), "missing {key} in {keys:?}");
        }
        assert!(!keys.contains(&"percentage"));
    }

    #[test]
    fn test_summary_includes_counterparties_missing_from_directory() {
        let f = fixture();
        let summary = counterparty_summary(
            &f.snapshot,
            CounterpartyRole::Customer,
            std::slice::from_ref(&f.acme),
            CounterpartySort::Total,
        );

        assert_eq!(summary.total_amount, dec!(400));
        assert_eq!(summary.settled_amount, dec!(100));
        assert_eq!(summary.unsettled_amount, dec!(300));
        assert_eq!(summary.entities.len(), 2);
        assert_eq!(summary.entities[0].name, "Globex");
        assert_eq!(summary.entities[0].counterparty_id, f.globex.id);
        assert_eq!(summary.entities[0].email, None);
    }
}
