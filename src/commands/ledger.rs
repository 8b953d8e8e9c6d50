use std::{
    error::Error,
    io::{self, BufWriter, Write},
    path::PathBuf,
};

use clap::Args;

use crate::model::from_path;

#[derive(Args)]
pub struct Command {
    book: PathBuf,
}

impl Command {
    pub fn run(&self) -> Result<(), Box<dyn Error>> {
        let book = from_path(&self.book)?;
        let mut out = BufWriter::new(io::stdout().lock());
        writeln!(out, "{}", book.ledger())?;
        out.flush()?;
        Ok(())
    }
}
