//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use stockscribe_domain::{InventoryUpdateBatch, InventoryUpdateRow, ProductCatalogEntry, ResolvedItem};
use stockscribe_extractor::ExtractionReport;
use stockscribe_review::{ItemStatus, ReviewSession};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format an extraction report: items, then skipped fragments.
    pub fn format_report(&self, report: &ExtractionReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            OutputFormat::Quiet => Ok(quiet_items(&report.items)),
            OutputFormat::Table => {
                let mut out = self.items_table(&report.items);
                for skipped in &report.skipped {
                    out.push('\n');
                    out.push_str(&self.warning(&format!(
                        "Skipped #{} \"{}\": {}",
                        skipped.position, skipped.fragment, skipped.reason
                    )));
                }
                let pending = report.pending_review().count();
                if pending > 0 {
                    out.push('\n');
                    out.push_str(&self.info(&format!("{} item(s) need review", pending)));
                }
                Ok(out)
            }
        }
    }

    /// Format a reconciled batch.
    pub fn format_batch(&self, batch: &InventoryUpdateBatch) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(batch)?),
            OutputFormat::Quiet => Ok(format!("{} {}", batch.saved_count, batch.error_count)),
            OutputFormat::Table => {
                let mut out = self.rows_table(&batch.items);
                out.push('\n');
                out.push_str(&self.success(&format!("Saved {} row(s)", batch.saved_count)));
                for error in &batch.errors {
                    out.push('\n');
                    out.push_str(&self.error(&format!(
                        "{}: {}",
                        error.item.product_name, error.reason
                    )));
                }
                Ok(out)
            }
        }
    }

    /// Format catalog entries.
    pub fn format_products(&self, products: &[ProductCatalogEntry]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(products)?),
            OutputFormat::Quiet => Ok(products
                .iter()
                .map(|p| p.id.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if products.is_empty() {
                    return Ok(self.colorize("No products found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["ID", "Name", "Unit", "Price", "Location"]);
                for product in products {
                    builder.push_record([
                        product.id.clone(),
                        product.name.clone(),
                        product.unit.to_string(),
                        format_price(product.price),
                        product.location.clone().unwrap_or_default(),
                    ]);
                }
                Ok(finish(builder))
            }
        }
    }

    /// Format saved inventory rows.
    pub fn format_updates(&self, rows: &[InventoryUpdateRow]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(rows)?),
            OutputFormat::Quiet => Ok(rows
                .iter()
                .map(|r| format!("{} {} {}", r.quantity, r.unit, r.product_name))
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => Ok(self.rows_table(rows)),
        }
    }

    /// Format the items of a review session with their index and status.
    pub fn format_session(&self, session: &ReviewSession) -> Result<String> {
        if let OutputFormat::Json = self.format {
            return Ok(serde_json::to_string_pretty(session)?);
        }
        if session.is_empty() {
            return Ok(self.colorize("Session has no items.", "yellow"));
        }

        let mut builder = Builder::default();
        builder.push_record(["#", "Status", "Product", "Qty", "Unit", "Price", "Location", "Conf."]);
        for (index, entry) in session.items().iter().enumerate() {
            let item = &entry.item;
            builder.push_record([
                index.to_string(),
                self.status(entry.status),
                display_name(item),
                format_quantity(item.quantity),
                item.unit.to_string(),
                format_price(item.price),
                item.location.clone().unwrap_or_default(),
                format!("{:.2}", item.confidence),
            ]);
        }
        Ok(finish(builder))
    }

    fn items_table(&self, items: &[ResolvedItem]) -> String {
        if items.is_empty() {
            return self.colorize("No items found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Action", "Product", "Qty", "Unit", "Price", "Location", "Conf.", "Review"]);
        for item in items {
            builder.push_record([
                item.action.to_string(),
                display_name(item),
                format_quantity(item.quantity),
                item.unit.to_string(),
                format_price(item.price),
                item.location.clone().unwrap_or_default(),
                format!("{:.2}", item.confidence),
                if item.needs_review {
                    self.colorize("yes", "yellow")
                } else {
                    "no".to_string()
                },
            ]);
        }
        finish(builder)
    }

    fn rows_table(&self, rows: &[InventoryUpdateRow]) -> String {
        if rows.is_empty() {
            return self.colorize("No rows.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Product", "Action", "Qty", "Unit", "Location", "Price"]);
        for row in rows {
            builder.push_record([
                row.product_name.clone(),
                row.action.to_string(),
                format_quantity(row.quantity),
                row.unit.to_string(),
                row.location.clone(),
                format_price(row.price),
            ]);
        }
        finish(builder)
    }

    fn status(&self, status: ItemStatus) -> String {
        match status {
            ItemStatus::Confirmed => self.colorize(status.as_str(), "green"),
            ItemStatus::Pending => self.colorize(status.as_str(), "yellow"),
            ItemStatus::Removed => self.colorize(status.as_str(), "red"),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn finish(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

fn quiet_items(items: &[ResolvedItem]) -> String {
    items
        .iter()
        .map(|i| format!("{} {} {}", format_quantity(i.quantity), i.unit, display_name(i)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Unmatched items are shown with a `?` so reviewers spot them.
fn display_name(item: &ResolvedItem) -> String {
    match item.product_id {
        Some(_) => item.product_name.clone(),
        None => format!("{} ?", item.product_name),
    }
}

fn format_quantity(quantity: f64) -> String {
    if quantity.fract() == 0.0 {
        format!("{}", quantity as i64)
    } else {
        format!("{}", quantity)
    }
}

fn format_price(price: Option<f64>) -> String {
    price.map(|p| format!("{:.2}", p)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockscribe_domain::{ReviewThreshold, Unit};

    fn wine() -> ResolvedItem {
        ResolvedItem::new(
            Some("p-wine".into()),
            "Wine",
            6.0,
            Unit::Bottle,
            1.0,
            "6 bottles of wine",
            ReviewThreshold::default(),
        )
        .with_price(Some(12.5))
    }

    #[test]
    fn test_table_products() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let products = vec![ProductCatalogEntry::new("p-wine", "Wine", Unit::Bottle).with_price(12.5)];
        let output = formatter.format_products(&products).unwrap();
        assert!(output.contains("Name"));
        assert!(output.contains("12.50"));
    }

    #[test]
    fn test_quiet_products() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let products = vec![
            ProductCatalogEntry::new("p-wine", "Wine", Unit::Bottle),
            ProductCatalogEntry::new("p-gin", "Gin", Unit::Bottle),
        ];
        assert_eq!(formatter.format_products(&products).unwrap(), "p-wine\np-gin");
    }

    #[test]
    fn test_empty_products() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_products(&[]).unwrap();
        assert!(output.contains("No products found"));
    }

    #[test]
    fn test_batch_json() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_batch(&InventoryUpdateBatch::default()).unwrap();
        assert!(output.contains("saved_count"));
    }

    #[test]
    fn test_quiet_items_mark_unmatched() {
        let unmatched = ResolvedItem::new(
            None,
            "Zythum",
            2.0,
            Unit::Can,
            0.0,
            "2 cans of zythum",
            ReviewThreshold::default(),
        );
        assert_eq!(quiet_items(&[wine(), unmatched]), "6 bottle Wine\n2 can Zythum ?");
    }

    #[test]
    fn test_quantity_formatting() {
        assert_eq!(format_quantity(8.0), "8");
        assert_eq!(format_quantity(2.5), "2.5");
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let msg = formatter.success("test");
        assert_eq!(msg, "✓ test");
    }
}
