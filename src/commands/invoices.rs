use std::{
    error::Error,
    io::{self, BufWriter, Write},
    path::PathBuf,
};

use clap::Args;
use regex::Regex;
use tracing::{debug, info};

use crate::{
    config::Config,
    model::{entities::Invoice, export, from_path, Book},
    report::{invoice::InvoiceSummary, table::TextRenderer},
};

#[derive(Args)]
pub struct Command {
    /// The book to read, overrides the book of the config file
    book: Option<PathBuf>,

    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Only invoices whose id matches this regular expression
    #[arg(short, long)]
    filter: Option<String>,

    /// Include invoices owned by vendors and other non-customers
    #[arg(long)]
    all_owners: bool,

    /// Print summary tables instead of JSON
    #[arg(long)]
    summary: bool,
}

impl Command {
    pub fn run(&self) -> Result<(), Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => Config::from_path(path)?,
            None => Config::default(),
        };
        if let Some(book) = &self.book {
            config.book = Some(book.clone());
        }
        if let Some(filter) = &self.filter {
            config.invoice_filter = Some(filter.clone());
        }
        if self.all_owners {
            config.customers_only = false;
        }
        let path = config
            .book
            .as_ref()
            .ok_or("no book given, pass a path or set `book` in the config")?;
        let book = from_path(path)?;
        let invoices = select(&book, config.filter()?.as_ref(), config.customers_only);
        info!("{} of {} invoices selected", invoices.len(), book.invoices().len());

        let mut out = BufWriter::new(io::stdout().lock());
        if self.summary {
            for invoice in invoices {
                debug!("summarizing invoice {}", invoice.business_id);
                let summary = InvoiceSummary::build(&book, invoice)?;
                TextRenderer {
                    table: summary.to_table(),
                    round: 2,
                }
                .render(&mut out)?;
                writeln!(out)?;
            }
        } else {
            let values = invoices
                .into_iter()
                .map(|i| export::invoice(&book, i))
                .collect::<Vec<_>>();
            serde_json::to_writer_pretty(&mut out, &values)?;
            writeln!(out)?;
        }
        out.flush()?;
        Ok(())
    }
}

/// The invoices to process, ordered by date.
pub fn select<'a>(
    book: &'a Book,
    filter: Option<&Regex>,
    customers_only: bool,
) -> Vec<&'a Invoice> {
    book.invoices_by_date()
        .into_iter()
        .filter(|i| !customers_only || i.customer().is_some())
        .filter(|i| filter.map_or(true, |f| f.is_match(&i.business_id)))
        .collect()
}

#[cfg(test)]
mod test_invoices {
    use super::*;
    use crate::model::from_bytes;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_select() {
        let book =
            from_bytes(include_bytes!("../../testdata/minimal.gnucash").to_vec()).unwrap();
        assert_eq!(select(&book, None, true).len(), 1);
        let year = Regex::new("^2017-").unwrap();
        assert_eq!(select(&book, Some(&year), true).len(), 1);
        let other = Regex::new("^2016-").unwrap();
        assert!(select(&book, Some(&other), true).is_empty());
    }

    #[test]
    fn test_select_owner() {
        let doc = include_str!("../../testdata/minimal.gnucash")
            .replace("<owner:type>gncCustomer</owner:type>", "<owner:type>gncJob</owner:type>");
        let book = from_bytes(doc.into_bytes()).unwrap();
        assert!(select(&book, None, true).is_empty());
        assert_eq!(select(&book, None, false).len(), 1);
    }
}
