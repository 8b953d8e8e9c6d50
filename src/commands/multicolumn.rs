use std::{error::Error, io, path::PathBuf};

use chrono::NaiveDate;
use clap::Args;

use crate::{
    model::from_path,
    report::{multicolumn::build, ReportError},
};

#[derive(Args)]
pub struct Command {
    book: PathBuf,

    /// Name of the account, without its parents
    #[arg(short, long)]
    account: String,

    /// First day of the report, inclusive
    #[arg(long)]
    from: NaiveDate,

    /// Last day of the report, inclusive
    #[arg(long)]
    to: NaiveDate,
}

impl Command {
    pub fn run(&self) -> Result<(), Box<dyn Error>> {
        let book = from_path(&self.book)?;
        let account = book
            .find_account(&self.account)
            .ok_or_else(|| ReportError::UnknownAccount(self.account.clone()))?;
        let report = build(&book, account.id, self.from, self.to);
        report.write_csv(io::stdout().lock())?;
        Ok(())
    }
}
