//! Printable report documents.
//!
//! A report is described as a [`ReportDocument`] (label/value fields, an
//! optional one-row header table, an optional image, a body table and an
//! optional totals table) and rendered to a standalone HTML page by
//! [`render_html`]. Every value is pre-formatted as a string before it
//! reaches the template.

pub mod image;
pub mod production;
pub mod sales_history;

use askama::Template;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use hielitos_core::Money;

pub use image::{EmbeddedImage, ImageFormat};
pub use production::production_order_report;
pub use sales_history::sales_history_report;

/// Placeholder for values that are unknown.
pub const PLACEHOLDER: &str = "-";

/// Who and what a report is generated for.
#[derive(Debug, Clone)]
pub struct ReportContext {
    /// Brand line in the page header and footer.
    pub brand: String,
    /// User named on production order reports.
    pub user: String,
}

impl Default for ReportContext {
    fn default() -> Self {
        Self {
            brand: "Hielitos".to_string(),
            user: PLACEHOLDER.to_string(),
        }
    }
}

/// A labelled value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportField {
    pub label: String,
    pub value: String,
}

impl ReportField {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// A table with a header row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReportTable {
    pub heading: Option<String>,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Shown instead of the table when there are no rows.
    pub empty_message: Option<String>,
}

impl ReportTable {
    pub fn new(columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|c| (*c).to_string()).collect(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_heading(mut self, heading: impl Into<String>) -> Self {
        self.heading = Some(heading.into());
        self
    }

    #[must_use]
    pub fn with_empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = Some(message.into());
        self
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }
}

/// Structured description of one report.
#[derive(Debug, Clone)]
pub struct ReportDocument {
    pub title: String,
    pub brand: String,
    pub fields: Vec<ReportField>,
    pub header: Option<ReportTable>,
    pub image: Option<EmbeddedImage>,
    pub image_caption: Option<String>,
    pub body: ReportTable,
    pub summary: Option<ReportTable>,
    pub footer: String,
}

impl ReportDocument {
    /// Value of the field with this label, if present.
    #[must_use]
    pub fn field(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.label == label)
            .map(|f| f.value.as_str())
    }
}

#[derive(Template)]
#[template(path = "reports/document.html")]
struct ReportTemplate<'a> {
    report: &'a ReportDocument,
}

/// Render a report as a printable HTML page.
///
/// # Errors
///
/// Returns the template error if rendering fails.
pub fn render_html(report: &ReportDocument) -> Result<String, askama::Error> {
    ReportTemplate { report }.render()
}

// =============================================================================
// Formatting
// =============================================================================

fn money(amount: Decimal) -> String {
    Money::new(amount).to_string()
}

fn number(value: Decimal) -> String {
    value.normalize().to_string()
}

fn timestamp(value: Option<DateTime<Utc>>) -> String {
    value.map_or_else(
        || PLACEHOLDER.to_string(),
        |ts| ts.format("%Y-%m-%d %H:%M UTC").to_string(),
    )
}

fn footer(brand: &str) -> String {
    format!("Generated by {brand}")
}
