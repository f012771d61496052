//! Sales history report for one production order.

use super::{
    EmbeddedImage, PLACEHOLDER, ReportContext, ReportDocument, ReportTable, footer, money,
    timestamp,
};
use crate::ledger;
use crate::models::{ProductionOrder, Recipe, Sale};

/// Build the sales history report of `order`.
///
/// `sales` may hold sales of other orders; only those referencing `order`
/// are listed. Rows keep the given order and are numbered from 1.
#[must_use]
pub fn sales_history_report(
    order: &ProductionOrder,
    sales: &[Sale],
    recipe: Option<&Recipe>,
    context: &ReportContext,
) -> ReportDocument {
    let recipe_name = order
        .snapshot_name()
        .or_else(|| recipe.map(|r| r.name.as_str()).filter(|n| !n.is_empty()))
        .unwrap_or(PLACEHOLDER);

    let mut header = ReportTable::new(&["Recipe", "Batches", "Date", "Production cost"]);
    header.push_row(vec![
        recipe_name.to_string(),
        order.batch_count.to_string(),
        timestamp(order.created_at),
        money(order.production_cost()),
    ]);

    let mut body = ReportTable::new(&["#", "Date", "Sold", "Spoiled", "Price", "Comment"])
        .with_heading("Sales history")
        .with_empty_message("No sales recorded.");
    let own_sales = sales.iter().filter(|s| s.is_for(&order.id));
    for (n, sale) in own_sales.enumerate() {
        let comment = if sale.comment.trim().is_empty() {
            PLACEHOLDER.to_string()
        } else {
            sale.comment.clone()
        };
        body.push_row(vec![
            (n + 1).to_string(),
            timestamp(sale.created_at),
            sale.units_sold.to_string(),
            sale.units_spoiled.to_string(),
            money(sale.unit_price),
            comment,
        ]);
    }

    let totals = ledger::fulfillment(order, sales);
    let mut summary = ReportTable::new(&["Total", "Value"]).with_heading("Summary");
    for (label, value) in [
        ("Total sold", totals.units_sold.to_string()),
        ("Total spoiled", totals.units_spoiled.to_string()),
        ("Total income", money(totals.revenue)),
        ("Production cost", money(totals.production_cost)),
        ("Profitability", money(totals.profitability)),
    ] {
        summary.push_row(vec![label.to_string(), value]);
    }

    let image = EmbeddedImage::first_of([
        order.photo.as_deref(),
        recipe.and_then(|r| r.photo.as_deref()),
    ]);

    ReportDocument {
        title: "SALES REPORT".to_string(),
        brand: context.brand.clone(),
        fields: Vec::new(),
        header: Some(header),
        image_caption: image.as_ref().map(|_| recipe_name.to_string()),
        image,
        body,
        summary: Some(summary),
        footer: footer(&context.brand),
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::ledger::fulfillment::tests::{order, sale};

    fn summary_value<'a>(report: &'a ReportDocument, label: &str) -> Option<&'a str> {
        report
            .summary
            .as_ref()?
            .rows
            .iter()
            .find(|row| row.first().is_some_and(|l| l == label))
            .and_then(|row| row.get(1))
            .map(String::as_str)
    }

    #[test]
    fn test_lists_only_sales_of_the_order() {
        let o = order("o1", 2, 10);
        let mut first = sale("o1", 3, 1, 2);
        first.comment = "market".to_string();
        let sales = vec![first, sale("o2", 5, 0, 2), sale("o1", 4, 0, 3)];

        let report = sales_history_report(&o, &sales, None, &ReportContext::default());

        assert_eq!(report.body.rows.len(), 2);
        let first_row = report.body.rows.first().expect("row");
        assert_eq!(first_row.first().map(String::as_str), Some("1"));
        assert_eq!(first_row.get(5).map(String::as_str), Some("market"));
        let second_row = report.body.rows.get(1).expect("row");
        assert_eq!(second_row.get(5).map(String::as_str), Some("-"));

        assert_eq!(summary_value(&report, "Total sold"), Some("7"));
        assert_eq!(summary_value(&report, "Total spoiled"), Some("1"));
        assert_eq!(summary_value(&report, "Total income"), Some("$18.00"));
        assert_eq!(summary_value(&report, "Production cost"), Some("$16.00"));
        assert_eq!(summary_value(&report, "Profitability"), Some("$2.00"));
    }

    #[test]
    fn test_header_row() {
        let o = order("o1", 2, 10);
        let report = sales_history_report(&o, &[], None, &ReportContext::default());
        let header = report.header.as_ref().expect("header");
        assert_eq!(
            header.rows,
            vec![vec![
                "Mango".to_string(),
                "2".to_string(),
                "-".to_string(),
                "$16.00".to_string(),
            ]]
        );
        assert!(report.body.rows.is_empty());
        assert!(report.image.is_none());
    }

    #[test]
    fn test_empty_history_renders_message() {
        let mut o = order("o9", 1, 15);
        o.total_cost = Some(Decimal::ZERO);
        let report = sales_history_report(&o, &[], None, &ReportContext::default());
        let html = super::super::render_html(&report).expect("render");
        assert!(html.contains("SALES REPORT"));
        assert!(html.contains("No sales recorded."));
    }
}
