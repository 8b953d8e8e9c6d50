use std::{error::Error, path::PathBuf};

use clap::Args;
use tracing::info;

use crate::model::from_path;

#[derive(Args)]
pub struct Command {
    book: PathBuf,
}

impl Command {
    pub fn run(&self) -> Result<(), Box<dyn Error>> {
        let book = from_path(&self.book)?;
        info!("loaded book {} from {}", book.guid(), self.book.display());
        println!("commodities:  {}", book.commodities().count());
        println!("prices:       {}", book.prices().len());
        println!("accounts:     {}", book.accounts().count());
        println!("transactions: {}", book.transactions().len());
        println!("splits:       {}", book.splits().len());
        println!("customers:    {}", book.customers().len());
        println!("vendors:      {}", book.vendors().len());
        println!("tax tables:   {}", book.taxtables().len());
        println!("entries:      {}", book.entries().len());
        println!("invoices:     {}", book.invoices().len());
        Ok(())
    }
}
