use std::fmt::{self, Display};

use super::{
    book::Book,
    entities::{Account, Split, Transaction},
};

/// Plain-text ledger rendering of a book: commodities, accounts sorted by
/// full name, then transactions by posted date.
pub struct Ledger<'a> {
    book: &'a Book,
}

impl Book {
    pub fn ledger(&self) -> Ledger<'_> {
        Ledger { book: self }
    }
}

impl<'a> Ledger<'a> {
    fn commodity_of(&self, account: &Account) -> &'a str {
        account
            .commodity
            .map(|c| self.book.registry().commodity_name(c))
            .unwrap_or_default()
    }

    fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for commodity in self.book.commodities() {
            lines.push(format!("commodity {}", commodity.name));
            lines.push(format!("\tnamespace {}", commodity.space));
            lines.push(String::new());
        }
        for (name, account) in self.book.accounts_by_name() {
            lines.push(format!("account {}", name));
            if let Some(description) = &account.description {
                lines.push(format!("\tnote {}", description));
            }
            lines.push(format!(
                "\tcheck commodity == \"{}\"",
                self.commodity_of(account)
            ));
            lines.push(String::new());
        }
        for transaction in self.book.transactions_by_date() {
            self.transaction(transaction, &mut lines);
        }
        lines
    }

    fn transaction(&self, transaction: &Transaction, lines: &mut Vec<String>) {
        lines.push(format!(
            "{} * {}",
            transaction.date.format("%Y/%m/%d"),
            transaction.description
        ));
        for split in transaction.splits.iter().map(|s| self.book.split(*s)) {
            lines.push(self.split(split));
        }
        lines.push(String::new());
    }

    fn split(&self, split: &Split) -> String {
        let account = self.book.account(split.account);
        let mut line = format!(
            "\t{:<50} {:>12.2} {}",
            self.book.fullname(account.id),
            split.value,
            self.commodity_of(account)
        );
        if let Some(memo) = &split.memo {
            line.push_str(" ; ");
            line.push_str(memo);
        }
        line
    }
}

impl Display for Ledger<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines().join("\n"))
    }
}

#[cfg(test)]
mod test_printing {
    use crate::model::from_bytes;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_ledger() {
        let book = from_bytes(include_bytes!("../../testdata/minimal.gnucash").to_vec()).unwrap();
        let expected = [
            "commodity EUR",
            "\tnamespace ISO4217",
            "",
            "commodity USD",
            "\tnamespace ISO4217",
            "",
            "account Bank",
            "\tnote Checking account",
            "\tcheck commodity == \"EUR\"",
            "",
            "account Revenue",
            "\tcheck commodity == \"EUR\"",
            "",
            "2017/01/15 * Invoice 2017-0001 paid",
            &format!("\t{:<50} {:>12} EUR ; payment", "Bank", "121.00"),
            &format!("\t{:<50} {:>12} EUR", "Revenue", "-121.00"),
            "",
        ]
        .join("\n");
        assert_eq!(book.ledger().to_string(), expected);
    }

    #[test]
    fn test_empty_note() {
        let doc = include_str!("../../testdata/minimal.gnucash").replace(
            "<act:description>Checking account</act:description>",
            "<act:description/>",
        );
        let book = from_bytes(doc.into_bytes()).unwrap();
        assert_eq!(book.find_account("Bank").unwrap().description, None);
        assert!(!book.ledger().to_string().contains("\tnote"));
    }

    #[test]
    fn test_ledger_shape() {
        let book = from_bytes(include_bytes!("../../testdata/minimal.gnucash").to_vec()).unwrap();
        let ledger = book.ledger().to_string();
        let lines = ledger.lines().collect::<Vec<_>>();
        assert_eq!(
            lines.iter().filter(|l| l.starts_with("commodity ")).count(),
            2
        );
        assert_eq!(lines.iter().filter(|l| l.starts_with("account ")).count(), 2);
        let splits = lines
            .iter()
            .filter(|l| l.starts_with('\t') && l.contains(" EUR"))
            .map(|l| {
                l.split_whitespace()
                    .rev()
                    .find_map(|w| w.parse::<rust_decimal::Decimal>().ok())
                    .unwrap()
            })
            .collect::<Vec<_>>();
        assert_eq!(splits.len(), 2);
        assert_eq!(splits.iter().sum::<rust_decimal::Decimal>(), rust_decimal::Decimal::ZERO);
    }
}
