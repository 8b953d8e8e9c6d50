use std::{
    error::Error,
    io::{self, BufWriter, Write},
    path::PathBuf,
};

use clap::Args;

use crate::model::{entities::Account, from_path, Book};

#[derive(Args)]
pub struct Command {
    book: PathBuf,
}

impl Command {
    pub fn run(&self) -> Result<(), Box<dyn Error>> {
        let book = from_path(&self.book)?;
        let mut out = BufWriter::new(io::stdout().lock());
        render(&book, &mut out)?;
        out.flush()?;
        Ok(())
    }
}

fn depth(book: &Book, account: &Account) -> usize {
    std::iter::successors(account.parent, |p| book.account(*p).parent).count()
}

/// Writes one line per account in walk order, indented by depth.
pub fn render<W: Write>(book: &Book, w: &mut W) -> io::Result<()> {
    for (account, _, splits) in book.walk() {
        if account.is_root() {
            continue;
        }
        writeln!(
            w,
            "{}{} [{}] {} splits",
            "  ".repeat(depth(book, account) - 1),
            account.name,
            account.account_type,
            splits.len()
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod test_tree {
    use super::*;
    use crate::model::from_bytes;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render() {
        let doc = include_str!("../../testdata/minimal.gnucash").replace(
            "<act:parent type=\"guid\">a0000000000000000000000000000001</act:parent>\n</gnc:account>\n<gnc:transaction",
            "<act:parent type=\"guid\">a0000000000000000000000000000002</act:parent>\n</gnc:account>\n<gnc:transaction",
        );
        let book = from_bytes(doc.into_bytes()).unwrap();
        let mut out = Vec::new();
        render(&book, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Bank [BANK] 1 splits\n  Revenue [INCOME] 1 splits\n"
        );
    }
}
