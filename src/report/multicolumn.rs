use std::io::Write;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::error::ReportError;
use crate::model::{
    entities::{AccountID, Split},
    Book,
};

#[derive(Debug, Clone, PartialEq)]
pub struct MultiColumnRow {
    pub date: NaiveDate,
    pub values: Vec<Decimal>,
    pub description: String,
}

/// The splits of one account in a date range, with one column for every
/// account touched by their transactions.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiColumn {
    pub columns: Vec<AccountID>,
    pub headers: Vec<String>,
    pub rows: Vec<MultiColumnRow>,
    pub totals: Vec<Decimal>,
}

/// Builds the report for `account` over the inclusive range `from..=to`.
pub fn build(book: &Book, account: AccountID, from: NaiveDate, to: NaiveDate) -> MultiColumn {
    let mut splits = book
        .account(account)
        .splits
        .iter()
        .map(|s| book.split(*s))
        .filter(|s| {
            let date = book.transaction(s.transaction).date.date_naive();
            from <= date && date <= to
        })
        .collect::<Vec<_>>();

    let mut columns = Vec::new();
    for split in &splits {
        for other in &book.transaction(split.transaction).splits {
            let id = book.split(*other).account;
            if !columns.contains(&id) {
                columns.push(id);
            }
        }
    }

    splits.sort_by_key(|s| book.transaction(s.transaction).date);
    let mut totals = vec![Decimal::ZERO; columns.len()];
    let rows = splits
        .iter()
        .map(|split| {
            let values = column_values(book, split, &columns);
            totals
                .iter_mut()
                .zip(&values)
                .for_each(|(total, value)| *total += *value);
            let transaction = book.transaction(split.transaction);
            MultiColumnRow {
                date: transaction.date.date_naive(),
                values,
                description: transaction.description.clone(),
            }
        })
        .collect();

    MultiColumn {
        headers: columns.iter().map(|c| book.fullname(*c)).collect(),
        columns,
        rows,
        totals,
    }
}

fn column_values(book: &Book, split: &Split, columns: &[AccountID]) -> Vec<Decimal> {
    let transaction = book.transaction(split.transaction);
    columns
        .iter()
        .map(|column| {
            transaction
                .splits
                .iter()
                .map(|s| book.split(*s))
                .filter(|s| s.account == *column)
                .map(|s| s.value)
                .sum::<Decimal>()
        })
        .collect()
}

impl MultiColumn {
    pub fn write_csv<W: Write>(&self, w: W) -> Result<(), ReportError> {
        let mut writer = csv::Writer::from_writer(w);
        let mut header = vec!["Date".to_string()];
        header.extend(self.headers.iter().cloned());
        header.push("Description".into());
        writer.write_record(&header)?;
        for row in &self.rows {
            let mut record = vec![row.date.format("%Y-%m-%d").to_string()];
            record.extend(row.values.iter().map(Decimal::to_string));
            record.push(row.description.clone());
            writer.write_record(&record)?;
        }
        let mut record = vec![String::new()];
        record.extend(self.totals.iter().map(Decimal::to_string));
        record.push("Total".into());
        writer.write_record(&record)?;
        writer.flush()?;
        Ok(())
    }
}
