//! Status and classification enums for ledger entities.

use serde::{Deserialize, Serialize};

/// Kind of a non-production cash movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CashMovementKind {
    /// Money taken out of the business.
    Withdrawal,
    /// Money put into the business.
    Investment,
    /// Any other outgoing expense.
    #[default]
    Expense,
}

impl CashMovementKind {
    /// Human-readable label for reports.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Withdrawal => "Withdrawal",
            Self::Investment => "Investment",
            Self::Expense => "Expense",
        }
    }
}

impl std::fmt::Display for CashMovementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Withdrawal => write!(f, "withdrawal"),
            Self::Investment => write!(f, "investment"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

impl std::str::FromStr for CashMovementKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "withdrawal" => Ok(Self::Withdrawal),
            "investment" => Ok(Self::Investment),
            "expense" => Ok(Self::Expense),
            _ => Err(format!("invalid cash movement kind: {s}")),
        }
    }
}

/// Fulfillment status of a production order.
///
/// An order is open while fewer units have been sold or spoiled than were
/// produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Open,
    Closed,
}

impl OrderStatus {
    /// Returns `true` if units are still available for sale.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

/// Time bucket used to group monetary events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PeriodGranularity {
    Day,
    Week,
    #[default]
    Month,
    Year,
}

impl std::fmt::Display for PeriodGranularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Day => write!(f, "day"),
            Self::Week => write!(f, "week"),
            Self::Month => write!(f, "month"),
            Self::Year => write!(f, "year"),
        }
    }
}

impl std::str::FromStr for PeriodGranularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            _ => Err(format!("invalid period granularity: {s}")),
        }
    }
}

/// Sort direction for ordered collection reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cash_movement_kind_round_trip() {
        for kind in [
            CashMovementKind::Withdrawal,
            CashMovementKind::Investment,
            CashMovementKind::Expense,
        ] {
            let parsed: CashMovementKind = kind.to_string().parse().expect("parse");
            assert_eq!(parsed, kind);
        }
        assert!("gasto".parse::<CashMovementKind>().is_err());
    }

    #[test]
    fn test_cash_movement_kind_serde() {
        let json = serde_json::to_string(&CashMovementKind::Withdrawal).expect("serialize");
        assert_eq!(json, "\"withdrawal\"");
        assert_eq!(CashMovementKind::default(), CashMovementKind::Expense);
    }

    #[test]
    fn test_period_granularity_parse() {
        assert_eq!("week".parse(), Ok(PeriodGranularity::Week));
        assert_eq!(PeriodGranularity::default(), PeriodGranularity::Month);
        assert!("fortnight".parse::<PeriodGranularity>().is_err());
    }

    #[test]
    fn test_order_status() {
        assert!(OrderStatus::Open.is_open());
        assert!(!OrderStatus::Closed.is_open());
        assert_eq!(OrderStatus::Closed.to_string(), "closed");
    }
}
