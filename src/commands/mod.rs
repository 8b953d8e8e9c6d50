use clap::Subcommand;

pub mod invoices;
pub mod ledger;
pub mod multicolumn;
pub mod parse;
pub mod tree;

#[derive(Subcommand)]
pub enum Commands {
    /// Load a book and print what it contains
    Parse(parse::Command),
    /// Print the book in ledger format
    Ledger(ledger::Command),
    /// Print the account tree
    Tree(tree::Command),
    /// Print invoices as JSON or as summary tables
    Invoices(invoices::Command),
    /// Print the splits of an account with one column per counter account
    Multicolumn(multicolumn::Command),
}

impl Commands {
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        match self {
            Commands::Parse(c) => c.run(),
            Commands::Ledger(c) => c.run(),
            Commands::Tree(c) => c.run(),
            Commands::Invoices(c) => c.run(),
            Commands::Multicolumn(c) => c.run(),
        }
    }
}
