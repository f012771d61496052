//! Ledger views on the command line.
//!
//! # Usage
//!
//! ```bash
//! hielitos-cli balance --period week
//! hielitos-cli top-recipes
//! ```

use tracing::info;

use hielitos_admin::services::LedgerService;
use hielitos_core::{Money, PeriodGranularity};

use super::connect;

/// Log the overall balance and the series for `period`.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a read fails.
pub async fn balance(period: PeriodGranularity) -> Result<(), Box<dyn std::error::Error>> {
    let store = connect().await?;
    let snapshot = LedgerService::new(&store).snapshot().await?;

    let overall = snapshot.overall_balance();
    info!("Overall balance");
    info!("===============");
    info!("  Sales revenue: {}", Money::new(overall.sales_revenue));
    info!("  Production cost: {}", Money::new(overall.order_cost));
    info!("  Cash expenses: {}", Money::new(overall.cash_expense));
    info!("  Withdrawals: {}", Money::new(overall.withdrawals));
    info!("  Investments: {}", Money::new(overall.investments));
    info!("  Balance: {}", Money::new(overall.balance));

    let series = snapshot.balance_series(period);
    info!("Balance by {period}");
    for row in &series.periods {
        info!(
            "  {}: income {}, expense {}, withdrawal {}, investment {}, net {}, balance {}",
            row.period,
            Money::new(row.income),
            Money::new(row.expense),
            Money::new(row.withdrawal),
            Money::new(row.investment),
            Money::new(row.net),
            Money::new(row.balance),
        );
    }
    if series.periods.is_empty() {
        info!("  (no dated records)");
    }

    Ok(())
}

/// Log the top recipes by revenue.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a read fails.
pub async fn top_recipes() -> Result<(), Box<dyn std::error::Error>> {
    let store = connect().await?;
    let snapshot = LedgerService::new(&store).snapshot().await?;
    let ranking = snapshot.top_recipes();

    info!("Top recipes by revenue");
    info!("======================");
    for (rank, entry) in ranking.iter().enumerate() {
        info!(
            "  {}. {} - {} ({} units)",
            rank + 1,
            entry.name,
            Money::new(entry.revenue),
            entry.units_sold
        );
    }
    if ranking.is_empty() {
        info!("  (no sales yet)");
    }

    Ok(())
}
