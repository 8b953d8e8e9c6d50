use std::collections::VecDeque;

use super::{
    entities::{
        Account, AccountID, Commodity, CommodityID, Customer, CustomerID, Entry, EntryID,
        Invoice, InvoiceID, Price, Split, SplitID, Taxtable, TaxtableID, Transaction,
        TransactionID, Vendor, VendorID,
    },
    registry::Registry,
    slots::Slots,
};

/// The loaded ledger. All cross references are indices into the vectors
/// owned here; the book is immutable once built.
#[derive(Debug, Clone)]
pub struct Book {
    pub(super) guid: String,
    pub(super) slots: Slots,
    pub(super) registry: Registry,
    pub(super) commodities: Vec<CommodityID>,
    pub(super) prices: Vec<Price>,
    pub(super) accounts: Vec<Account>,
    pub(super) root: AccountID,
    pub(super) linked: Vec<AccountID>,
    pub(super) transactions: Vec<Transaction>,
    pub(super) splits: Vec<Split>,
    pub(super) customers: Vec<Customer>,
    pub(super) vendors: Vec<Vendor>,
    pub(super) taxtables: Vec<Taxtable>,
    pub(super) entries: Vec<Entry>,
    pub(super) invoices: Vec<Invoice>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuidRef {
    Account(AccountID),
    Transaction(TransactionID),
}

impl Book {
    pub fn guid(&self) -> &str {
        &self.guid
    }

    pub fn slots(&self) -> &Slots {
        &self.slots
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn root(&self) -> &Account {
        self.account(self.root)
    }

    pub fn account(&self, id: AccountID) -> &Account {
        &self.accounts[id.0]
    }

    /// The non-root accounts, in document order.
    pub fn accounts(&self) -> impl Iterator<Item = &Account> + '_ {
        self.linked.iter().map(|id| self.account(*id))
    }

    pub fn transaction(&self, id: TransactionID) -> &Transaction {
        &self.transactions[id.0]
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn split(&self, id: SplitID) -> &Split {
        &self.splits[id.0]
    }

    pub fn splits(&self) -> &[Split] {
        &self.splits
    }

    /// The commodities declared at book level, in document order. Commodities
    /// only referenced by prices are reachable through the registry.
    pub fn commodities(&self) -> impl Iterator<Item = &Commodity> + '_ {
        self.commodities.iter().map(|id| self.registry.commodity(*id))
    }

    pub fn commodity(&self, id: CommodityID) -> &Commodity {
        self.registry.commodity(id)
    }

    pub fn prices(&self) -> &[Price] {
        &self.prices
    }

    pub fn customer(&self, id: CustomerID) -> &Customer {
        &self.customers[id.0]
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn vendor(&self, id: VendorID) -> &Vendor {
        &self.vendors[id.0]
    }

    pub fn vendors(&self) -> &[Vendor] {
        &self.vendors
    }

    pub fn taxtable(&self, id: TaxtableID) -> &Taxtable {
        &self.taxtables[id.0]
    }

    pub fn taxtables(&self) -> &[Taxtable] {
        &self.taxtables
    }

    pub fn entry(&self, id: EntryID) -> &Entry {
        &self.entries[id.0]
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn invoice(&self, id: InvoiceID) -> &Invoice {
        &self.invoices[id.0]
    }

    pub fn invoices(&self) -> &[Invoice] {
        &self.invoices
    }

    /// Colon separated path from the top of the tree. The root contributes
    /// nothing, so the root itself has an empty full name.
    pub fn fullname(&self, id: AccountID) -> String {
        let mut names = Vec::new();
        let mut current = Some(id);
        while let Some(id) = current {
            let account = self.account(id);
            if account.parent.is_none() {
                break;
            }
            names.push(account.name.as_str());
            current = account.parent;
        }
        names.reverse();
        names.join(":")
    }

    pub fn walk(&self) -> Walk<'_> {
        self.walk_from(self.root)
    }

    pub fn walk_from(&self, start: AccountID) -> Walk<'_> {
        Walk {
            book: self,
            queue: VecDeque::from([start]),
        }
    }

    pub fn find_account(&self, name: &str) -> Option<&Account> {
        self.find_account_in(self.root, name)
    }

    pub fn find_account_in(&self, start: AccountID, name: &str) -> Option<&Account> {
        self.walk_from(start)
            .map(|(account, _, _)| account)
            .find(|account| account.name == name)
    }

    pub fn find_guid(&self, guid: &str) -> Option<GuidRef> {
        self.accounts()
            .find(|a| a.guid == guid)
            .map(|a| GuidRef::Account(a.id))
            .or_else(|| {
                self.transactions
                    .iter()
                    .find(|t| t.guid == guid)
                    .map(|t| GuidRef::Transaction(t.id))
            })
    }

    /// Every split in the subtree below `start`, ordered by posted date.
    pub fn all_splits(&self, start: AccountID) -> Vec<&Split> {
        let mut splits = self
            .walk_from(start)
            .flat_map(|(_, _, splits)| splits.iter().map(|id| self.split(*id)))
            .collect::<Vec<_>>();
        splits.sort_by_key(|s| self.transaction(s.transaction).date);
        splits
    }

    pub fn transactions_by_date(&self) -> Vec<&Transaction> {
        let mut res = self.transactions.iter().collect::<Vec<_>>();
        res.sort_by_key(|t| t.date);
        res
    }

    pub fn accounts_by_name(&self) -> Vec<(String, &Account)> {
        let mut res = self
            .accounts()
            .map(|a| (self.fullname(a.id), a))
            .collect::<Vec<_>>();
        res.sort_by(|(n1, _), (n2, _)| n1.cmp(n2));
        res
    }

    pub fn invoices_by_date(&self) -> Vec<&Invoice> {
        let mut res = self.invoices.iter().collect::<Vec<_>>();
        res.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.business_id.cmp(&b.business_id)));
        res
    }
}

/// Breadth-first traversal of an account subtree.
pub struct Walk<'a> {
    book: &'a Book,
    queue: VecDeque<AccountID>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (&'a Account, &'a [AccountID], &'a [SplitID]);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.queue.pop_front()?;
        let account = self.book.account(id);
        self.queue.extend(account.children.iter().copied());
        Some((account, &account.children, &account.splits))
    }
}

#[cfg(test)]
mod test_book {
    use std::collections::HashSet;

    use super::*;
    use crate::model::{entities::AccountType, from_bytes};
    use pretty_assertions::assert_eq;

    fn book() -> Book {
        from_bytes(include_bytes!("../../testdata/minimal.gnucash").to_vec()).unwrap()
    }

    #[test]
    fn test_accounts_in_document_order() {
        let book = book();
        assert_eq!(
            book.accounts().map(|a| a.name.as_str()).collect::<Vec<_>>(),
            vec!["Bank", "Revenue"]
        );
        assert_eq!(book.root().account_type, AccountType::Root);
        assert_eq!(book.root().children.len(), 2);
    }

    #[test]
    fn test_fullname() {
        let book = book();
        assert_eq!(book.fullname(book.root().id), "");
        for account in book.accounts() {
            let parent = book.account(account.parent.unwrap());
            let expected = if parent.is_root() {
                account.name.clone()
            } else {
                format!("{}:{}", book.fullname(parent.id), account.name)
            };
            assert_eq!(book.fullname(account.id), expected);
        }
    }

    #[test]
    fn test_walk_visits_everything_once() {
        let book = book();
        let visited = book.walk().map(|(a, _, _)| a.id).collect::<Vec<_>>();
        assert_eq!(visited.len(), book.accounts().count() + 1);
        assert_eq!(visited.iter().collect::<HashSet<_>>().len(), visited.len());
        assert_eq!(visited[0], book.root().id);

        let splits = book
            .walk()
            .flat_map(|(_, _, splits)| splits.iter().copied())
            .collect::<Vec<_>>();
        assert_eq!(splits.len(), book.splits().len());
        assert_eq!(
            splits.iter().collect::<HashSet<_>>(),
            book.splits().iter().map(|s| &s.id).collect::<HashSet<_>>()
        );
    }

    #[test]
    fn test_find() {
        let book = book();
        let bank = book.find_account("Bank").unwrap();
        assert_eq!(bank.description.as_deref(), Some("Checking account"));
        assert!(book.find_account("Nope").is_none());
        assert_eq!(
            book.find_account_in(bank.id, "Revenue").map(|a| a.id),
            None
        );
        assert_eq!(book.find_guid(&bank.guid), Some(GuidRef::Account(bank.id)));
        let trx = &book.transactions()[0];
        assert_eq!(
            book.find_guid(&trx.guid),
            Some(GuidRef::Transaction(trx.id))
        );
        assert_eq!(book.find_guid("0000"), None);
    }

    #[test]
    fn test_all_splits() {
        let book = book();
        assert_eq!(book.all_splits(book.root().id).len(), 2);
        let bank = book.find_account("Bank").unwrap();
        let splits = book.all_splits(bank.id);
        assert_eq!(splits.len(), 1);
        assert_eq!(splits[0].account, bank.id);
    }

    #[test]
    fn test_orderings() {
        let book = book();
        assert_eq!(
            book.accounts_by_name()
                .into_iter()
                .map(|(name, _)| name)
                .collect::<Vec<_>>(),
            vec!["Bank", "Revenue"]
        );
        assert_eq!(book.transactions_by_date().len(), 1);
        assert_eq!(
            book.invoices_by_date()
                .iter()
                .map(|i| i.business_id.as_str())
                .collect::<Vec<_>>(),
            vec!["2017-0001"]
        );
    }
}
