//! Period balance series and the overall balance.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use serde::Serialize;

use hielitos_core::{CashMovementKind, PeriodGranularity};

use super::period::period_key;
use crate::models::{CashMovement, ProductionOrder, Sale};

/// Sums for one period plus the running balance up to and including it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodTotals {
    pub period: String,
    pub income: Decimal,
    pub expense: Decimal,
    pub withdrawal: Decimal,
    pub investment: Decimal,
    /// `income - expense - withdrawal + investment`.
    pub net: Decimal,
    pub balance: Decimal,
}

/// Per-period totals in ascending period order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSeries {
    pub granularity: PeriodGranularity,
    pub periods: Vec<PeriodTotals>,
}

impl BalanceSeries {
    /// Balance after the last period, or zero for an empty series.
    #[must_use]
    pub fn closing_balance(&self) -> Decimal {
        self.periods.last().map(|p| p.balance).unwrap_or_default()
    }
}

fn add(map: &mut BTreeMap<String, Decimal>, key: String, amount: Decimal) {
    *map.entry(key).or_default() += amount;
}

/// Group sales, orders and cash movements into periods.
///
/// Records without a timestamp are skipped. The period axis is the union of
/// the keys of all four sums.
#[must_use]
pub fn balance_series(
    sales: &[Sale],
    orders: &[ProductionOrder],
    cash_movements: &[CashMovement],
    granularity: PeriodGranularity,
) -> BalanceSeries {
    let mut income = BTreeMap::new();
    let mut expense = BTreeMap::new();
    let mut withdrawal = BTreeMap::new();
    let mut investment = BTreeMap::new();

    for sale in sales {
        if let Some(at) = sale.created_at {
            add(&mut income, period_key(at, granularity), sale.revenue());
        }
    }
    for order in orders {
        if let Some(at) = order.created_at {
            add(&mut expense, period_key(at, granularity), order.expense());
        }
    }
    for movement in cash_movements {
        let Some(at) = movement.created_at else {
            continue;
        };
        let bucket = match movement.kind {
            CashMovementKind::Withdrawal => &mut withdrawal,
            CashMovementKind::Investment => &mut investment,
            CashMovementKind::Expense => &mut expense,
        };
        add(bucket, period_key(at, granularity), movement.amount);
    }

    let axis: BTreeSet<&String> = income
        .keys()
        .chain(expense.keys())
        .chain(withdrawal.keys())
        .chain(investment.keys())
        .collect();

    let amount = |map: &BTreeMap<String, Decimal>, key: &str| map.get(key).copied().unwrap_or_default();
    let mut running = Decimal::ZERO;
    let periods = axis
        .into_iter()
        .map(|key| {
            let income = amount(&income, key);
            let expense = amount(&expense, key);
            let withdrawal = amount(&withdrawal, key);
            let investment = amount(&investment, key);
            let net = income - expense - withdrawal + investment;
            running += net;
            PeriodTotals {
                period: key.clone(),
                income,
                expense,
                withdrawal,
                investment,
                net,
                balance: running,
            }
        })
        .collect();

    BalanceSeries {
        granularity,
        periods,
    }
}

/// All-time balance with its components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallBalance {
    pub sales_revenue: Decimal,
    pub order_cost: Decimal,
    pub cash_expense: Decimal,
    pub withdrawals: Decimal,
    pub investments: Decimal,
    /// `sales_revenue - order_cost - cash_expense - withdrawals + investments`.
    pub balance: Decimal,
}

/// Balance over every record, timestamped or not.
///
/// Cash expense is the total of all movements of any kind, so withdrawals
/// and investments also appear in their own components on top of it.
/// Order cost is the stored `totalCost` only. The result can differ from
/// [`BalanceSeries::closing_balance`] over the same records.
#[must_use]
pub fn overall_balance(
    sales: &[Sale],
    orders: &[ProductionOrder],
    cash_movements: &[CashMovement],
) -> OverallBalance {
    let sales_revenue: Decimal = sales.iter().map(Sale::revenue).sum();
    let order_cost: Decimal = orders.iter().map(ProductionOrder::production_cost).sum();
    let total_of = |kind: CashMovementKind| -> Decimal {
        cash_movements
            .iter()
            .filter(|m| m.kind == kind)
            .map(|m| m.amount)
            .sum()
    };
    let cash_expense: Decimal = cash_movements.iter().map(|m| m.amount).sum();
    let withdrawals = total_of(CashMovementKind::Withdrawal);
    let investments = total_of(CashMovementKind::Investment);

    OverallBalance {
        sales_revenue,
        order_cost,
        cash_expense,
        withdrawals,
        investments,
        balance: sales_revenue - order_cost - cash_expense - withdrawals + investments,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};

    use hielitos_core::CashMovementId;

    use super::*;
    use crate::ledger::fulfillment::tests::{order, sale};

    fn at(m: u32, d: u32) -> Option<DateTime<Utc>> {
        Some(Utc.with_ymd_and_hms(2024, m, d, 12, 0, 0).unwrap())
    }

    fn movement(kind: CashMovementKind, amount: i64, when: Option<DateTime<Utc>>) -> CashMovement {
        CashMovement {
            id: CashMovementId::new(format!("{kind}-{amount}")),
            amount: Decimal::from(amount),
            kind,
            comment: String::new(),
            user: "ana".to_string(),
            created_at: when,
        }
    }

    #[test]
    fn test_monthly_series() {
        let mut o = order("o1", 2, 10);
        o.created_at = at(3, 1);
        let mut s = sale("o1", 10, 0, 2);
        s.created_at = at(3, 5);
        let mut later = sale("o1", 5, 0, 2);
        later.created_at = at(4, 2);
        let cash = vec![
            movement(CashMovementKind::Expense, 5, at(3, 5)),
            movement(CashMovementKind::Withdrawal, 3, at(4, 1)),
            movement(CashMovementKind::Investment, 100, at(5, 1)),
        ];

        let series = balance_series(&[s, later], &[o], &cash, PeriodGranularity::Month);
        let keys: Vec<_> = series.periods.iter().map(|p| p.period.as_str()).collect();
        assert_eq!(keys, vec!["2024-03", "2024-04", "2024-05"]);

        let march = &series.periods[0];
        assert_eq!(march.income, Decimal::from(20));
        assert_eq!(march.expense, Decimal::from(21));
        assert_eq!(march.balance, Decimal::from(-1));

        let april = &series.periods[1];
        assert_eq!(april.net, Decimal::from(7));
        assert_eq!(april.balance, Decimal::from(6));

        assert_eq!(series.closing_balance(), Decimal::from(106));
    }

    #[test]
    fn test_running_balance_differences_equal_net() {
        let mut s1 = sale("o1", 4, 0, 3);
        s1.created_at = at(1, 10);
        let mut s2 = sale("o1", 1, 0, 7);
        s2.created_at = at(2, 10);
        let cash = vec![movement(CashMovementKind::Expense, 9, at(2, 11))];

        let series = balance_series(&[s1, s2], &[], &cash, PeriodGranularity::Day);
        let mut previous = Decimal::ZERO;
        for period in &series.periods {
            assert_eq!(period.balance - previous, period.net);
            previous = period.balance;
        }
    }

    #[test]
    fn test_untimestamped_records_are_skipped() {
        let s = sale("o1", 10, 0, 2);
        let cash = vec![movement(CashMovementKind::Expense, 5, None)];
        let series = balance_series(&[s], &[order("o1", 1, 1)], &cash, PeriodGranularity::Day);
        assert!(series.periods.is_empty());
        assert_eq!(series.closing_balance(), Decimal::ZERO);
    }

    #[test]
    fn test_order_without_total_uses_ingredients() {
        let mut o = order("o1", 1, 10);
        o.total_cost = None;
        o.extra_cost = Decimal::from(2);
        o.ingredients = vec![crate::models::Ingredient::new(
            "sugar",
            Decimal::from(3),
            "kg",
            Decimal::from(4),
        )];
        o.created_at = at(6, 1);
        let series = balance_series(&[], &[o], &[], PeriodGranularity::Year);
        assert_eq!(series.periods[0].period, "2024");
        assert_eq!(series.periods[0].expense, Decimal::from(14));
    }

    #[test]
    fn test_overall_balance() {
        let orders = vec![order("o1", 2, 10)];
        let sales = vec![sale("o1", 10, 0, 2), sale("gone", 5, 0, 1)];
        let cash = vec![
            movement(CashMovementKind::Expense, 5, None),
            movement(CashMovementKind::Withdrawal, 3, at(1, 1)),
            movement(CashMovementKind::Investment, 10, at(1, 1)),
        ];

        let overall = overall_balance(&sales, &orders, &cash);
        assert_eq!(overall.sales_revenue, Decimal::from(25));
        assert_eq!(overall.order_cost, Decimal::from(16));
        assert_eq!(overall.cash_expense, Decimal::from(18));
        assert_eq!(overall.withdrawals, Decimal::from(3));
        assert_eq!(overall.investments, Decimal::from(10));
        // 25 - 16 - 18 - 3 + 10
        assert_eq!(overall.balance, Decimal::from(-2));
    }

    #[test]
    fn test_overall_balance_counts_stored_totals_only() {
        let mut o = order("o1", 1, 10);
        o.total_cost = None;
        o.extra_cost = Decimal::from(2);
        o.ingredients = vec![crate::models::Ingredient::new(
            "sugar",
            Decimal::from(3),
            "kg",
            Decimal::from(4),
        )];
        let overall = overall_balance(&[], &[o], &[]);
        assert_eq!(overall.order_cost, Decimal::ZERO);
        assert_eq!(overall.balance, Decimal::ZERO);
    }

    #[test]
    fn test_overall_and_closing_balance_differ_with_withdrawals() {
        let cash = vec![
            movement(CashMovementKind::Withdrawal, 3, at(1, 1)),
            movement(CashMovementKind::Investment, 10, at(1, 2)),
        ];
        let series = balance_series(&[], &[], &cash, PeriodGranularity::Month);
        assert_eq!(series.closing_balance(), Decimal::from(7));
        // 0 - 0 - 13 - 3 + 10
        assert_eq!(overall_balance(&[], &[], &cash).balance, Decimal::from(-6));
    }

    #[test]
    fn test_overall_balance_without_cash_movements() {
        let overall = overall_balance(&[sale("o1", 1, 0, 5)], &[], &[]);
        assert_eq!(overall.balance, Decimal::from(5));
    }
}
