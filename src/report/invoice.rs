use rust_decimal::Decimal;

use super::{
    error::ReportError,
    table::{Cell, Row, Table},
};
use crate::model::{
    date::Timestamp,
    entities::{Entry, Invoice, Owner},
    Book,
};

#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceLine {
    pub description: String,
    pub quantity: Decimal,
    pub price: Decimal,
    pub total: Decimal,
}

/// The amounts of an invoice as they appear on the printed document.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceSummary {
    pub id: String,
    pub date: Timestamp,
    pub owner: Option<String>,
    pub address: Vec<String>,
    pub lines: Vec<InvoiceLine>,
    pub subtotal: Decimal,
    /// Tax per label, in order of first use.
    pub taxes: Vec<(String, Decimal)>,
    pub tax_total: Decimal,
    pub total: Decimal,
}

impl InvoiceSummary {
    pub fn build(book: &Book, invoice: &Invoice) -> Result<Self, ReportError> {
        let (owner, address) = match invoice.owner {
            Some(Owner::Customer(c)) => {
                let c = book.customer(c);
                (Some(c.name.clone()), c.address.clone())
            }
            Some(Owner::Vendor(v)) => (Some(book.vendor(v).name.clone()), Vec::new()),
            None => (None, Vec::new()),
        };
        let mut lines = Vec::new();
        let mut taxes: Vec<(String, Decimal)> = Vec::new();
        for entry in invoice.entries.iter().map(|e| book.entry(*e)) {
            let line = line(entry)?;
            if let Some((label, tax)) = tax(book, entry, line.total)? {
                match taxes.iter_mut().find(|(l, _)| *l == label) {
                    Some((_, sum)) => *sum += tax,
                    None => taxes.push((label, tax)),
                }
            }
            lines.push(line);
        }
        let subtotal = lines.iter().map(|l| l.total).sum::<Decimal>();
        let tax_total = taxes.iter().map(|(_, t)| *t).sum::<Decimal>();
        Ok(InvoiceSummary {
            id: invoice.business_id.clone(),
            date: invoice.date,
            owner,
            address,
            lines,
            subtotal,
            taxes,
            tax_total,
            total: subtotal + tax_total,
        })
    }

    pub fn to_table(&self) -> Table {
        let mut table = Table::new();
        table.add_row(Row::Separator);
        table.add_row(Row::new(vec![
            Cell::left(format!("Invoice {}", self.id)),
            Cell::Empty,
            Cell::Empty,
            Cell::right(self.date.format("%d-%m-%Y").to_string()),
        ]));
        if let Some(owner) = &self.owner {
            table.add_row(Row::new(vec![Cell::left(owner.clone())]));
        }
        for line in &self.address {
            table.add_row(Row::new(vec![Cell::indented(line.clone(), 2)]));
        }
        table.add_row(Row::Separator);
        table.add_row(Row::new(vec![
            Cell::center("Description"),
            Cell::center("Quantity"),
            Cell::center("Price"),
            Cell::center("Total"),
        ]));
        table.add_row(Row::Separator);
        for line in &self.lines {
            table.add_row(Row::new(vec![
                Cell::left(line.description.clone()),
                Cell::Decimal {
                    value: line.quantity,
                },
                Cell::Decimal { value: line.price },
                Cell::Decimal { value: line.total },
            ]));
        }
        table.add_row(Row::Separator);
        table.add_row(total_row("Subtotal", self.subtotal));
        for (label, tax) in &self.taxes {
            table.add_row(total_row(label, *tax));
        }
        table.add_row(Row::Separator);
        table.add_row(total_row("Total", self.total));
        table.add_row(Row::Separator);
        table
    }
}

fn total_row(label: &str, value: Decimal) -> Row {
    Row::new(vec![
        Cell::left(label),
        Cell::Empty,
        Cell::Empty,
        Cell::Decimal { value },
    ])
}

fn line(entry: &Entry) -> Result<InvoiceLine, ReportError> {
    let missing = |field| ReportError::MissingAmount {
        entry: entry.guid.clone(),
        field,
    };
    let quantity = entry.quantity.ok_or_else(|| missing("quantity"))?;
    let price = entry.price.ok_or_else(|| missing("price"))?;
    Ok(InvoiceLine {
        description: entry.description.clone().unwrap_or_default(),
        quantity,
        price,
        total: quantity * price,
    })
}

/// The tax label and amount of a taxable entry. Tax tables used on invoices
/// must carry exactly one rate.
fn tax(
    book: &Book,
    entry: &Entry,
    total: Decimal,
) -> Result<Option<(String, Decimal)>, ReportError> {
    if entry.taxable != Some(true) {
        return Ok(None);
    }
    let taxtable = entry
        .taxtable
        .map(|t| book.taxtable(t))
        .ok_or_else(|| ReportError::MissingTaxtable(entry.guid.clone()))?;
    let rate = match taxtable.entries.as_slice() {
        [rate] => rate,
        entries => {
            return Err(ReportError::AmbiguousTaxtable {
                name: taxtable.name.clone(),
                entries: entries.len(),
            })
        }
    };
    let label = format!("{} ({}%)", taxtable.name, rate.amount);
    Ok(Some((label, total * rate.amount / Decimal::ONE_HUNDRED)))
}

#[cfg(test)]
mod test_invoice {
    use super::*;
    use crate::model::from_bytes;
    use crate::report::table::TextRenderer;
    use pretty_assertions::assert_eq;

    const FIXTURE: &str = include_str!("../../testdata/minimal.gnucash");

    fn dec(s: &str) -> Decimal {
        Decimal::from_str_exact(s).unwrap()
    }

    fn summary(doc: &str) -> Result<InvoiceSummary, ReportError> {
        let book = from_bytes(doc.as_bytes().to_vec()).unwrap();
        InvoiceSummary::build(&book, &book.invoices()[0])
    }

    #[test]
    fn test_summary() {
        let s = summary(FIXTURE).unwrap();
        assert_eq!(s.id, "2017-0001");
        assert_eq!(s.owner.as_deref(), Some("Acme B.V."));
        assert_eq!(
            s.lines
                .iter()
                .map(|l| (l.description.as_str(), l.total))
                .collect::<Vec<_>>(),
            vec![("Travel expenses", dec("25")), ("Consultancy", dec("600"))]
        );
        assert_eq!(s.subtotal, dec("625"));
        assert_eq!(s.taxes, vec![("BTW hoog (21.00%)".to_string(), dec("131.25"))]);
        assert_eq!(s.tax_total, dec("131.25"));
        assert_eq!(s.total, dec("756.25"));
    }

    #[test]
    fn test_ambiguous_taxtable() {
        let entry = "<gnc:GncTaxTableEntry>
      <tte:amount>900000/100000</tte:amount>
      <tte:type>PERCENT</tte:type>
    </gnc:GncTaxTableEntry>
  </taxtable:entries>";
        let doc = FIXTURE.replace("</taxtable:entries>", entry);
        assert!(matches!(
            summary(&doc),
            Err(ReportError::AmbiguousTaxtable { entries: 2, .. })
        ));
    }

    #[test]
    fn test_missing_price() {
        let doc = FIXTURE.replace("<entry:i-price>2500/100</entry:i-price>", "");
        assert!(matches!(
            summary(&doc),
            Err(ReportError::MissingAmount { field: "price", .. })
        ));
    }

    #[test]
    fn test_taxable_without_taxtable() {
        let doc = FIXTURE.replace(
            r#"<entry:i-taxtable type="guid">x0000000000000000000000000000001</entry:i-taxtable>"#,
            "",
        );
        assert!(matches!(
            summary(&doc),
            Err(ReportError::MissingTaxtable(_))
        ));
    }

    #[test]
    fn test_untaxed_lines() {
        let doc = FIXTURE.replace(
            "<entry:i-taxable>1</entry:i-taxable>",
            "<entry:i-taxable>0</entry:i-taxable>",
        );
        let s = summary(&doc).unwrap();
        assert!(s.taxes.is_empty());
        assert_eq!(s.total, dec("625"));
    }

    #[test]
    fn test_to_table() {
        let s = summary(FIXTURE).unwrap();
        let mut out = Vec::new();
        TextRenderer {
            table: s.to_table(),
            round: 2,
        }
        .render(&mut out)
        .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("| Invoice 2017-0001"));
        assert!(text.contains("| Consultancy "));
        assert!(text.contains("|   Main Street 1 "));
        assert!(text.contains("| BTW hoog (21.00%) "));
        assert!(text.contains(" 756.25 |"));
    }
}
