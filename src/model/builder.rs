use std::collections::{HashMap, VecDeque};

use tracing::{debug, trace};

use super::{
    book::Book,
    date::{parse_timestamp, Timestamp},
    entities::{
        Account, AccountID, AccountType, AmountType, CommodityID, Customer, CustomerID, Entry,
        EntryID, Invoice, InvoiceID, Owner, Price, ReconcileState, Split, SplitID, Taxtable,
        TaxtableEntry, TaxtableID, Transaction, TransactionID, Vendor, VendorID,
    },
    error::LoadError,
    numeric::{parse_integer, parse_number},
    registry::Registry,
    slots::parse_slots,
    tags::*,
};
use crate::xml::{Element, Tag};

/// Builds the book from the `gnc-v2` root element of a document.
pub fn build_book(root: &Element) -> Result<Book, LoadError> {
    if !root.is(GNC_V2) {
        return Err(LoadError::Format(format!(
            "unexpected root element {}",
            root.name
        )));
    }
    let book = root.require(&[GNC_BOOK])?;
    Builder::new().build(book)
}

/// The elements describing one side of a business entry: invoices use the
/// `i-` family, vendor bills the `b-` family.
struct EntrySide {
    owner: Tag,
    price: Tag,
    taxable: Tag,
    taxtable: Tag,
}

const INVOICE_SIDE: EntrySide = EntrySide {
    owner: ENTRY_INVOICE,
    price: ENTRY_I_PRICE,
    taxable: ENTRY_I_TAXABLE,
    taxtable: ENTRY_I_TAXTABLE,
};

const BILL_SIDE: EntrySide = EntrySide {
    owner: ENTRY_BILL,
    price: ENTRY_B_PRICE,
    taxable: ENTRY_B_TAXABLE,
    taxtable: ENTRY_B_TAXTABLE,
};

struct Builder {
    registry: Registry,

    accounts: Vec<Account>,
    account_index: HashMap<String, AccountID>,

    transactions: Vec<Transaction>,
    splits: Vec<Split>,

    customers: Vec<Customer>,
    customer_index: HashMap<String, CustomerID>,
    vendors: Vec<Vendor>,
    vendor_index: HashMap<String, VendorID>,
    taxtables: Vec<Taxtable>,
    taxtable_index: HashMap<String, TaxtableID>,
    entries: Vec<Entry>,
    invoices: Vec<Invoice>,
}

impl Builder {
    fn new() -> Self {
        Builder {
            registry: Registry::new(),
            accounts: Vec::new(),
            account_index: HashMap::new(),
            transactions: Vec::new(),
            splits: Vec::new(),
            customers: Vec::new(),
            customer_index: HashMap::new(),
            vendors: Vec::new(),
            vendor_index: HashMap::new(),
            taxtables: Vec::new(),
            taxtable_index: HashMap::new(),
            entries: Vec::new(),
            invoices: Vec::new(),
        }
    }

    fn build(mut self, tree: &Element) -> Result<Book, LoadError> {
        let guid = tree.require_text(&[BOOK_ID])?.to_string();
        debug!("building book {}", guid);

        let commodities = tree
            .children_of(GNC_COMMODITY)
            .map(|c| self.commodity(c))
            .collect::<Result<Vec<_>, _>>()?;
        debug!("{} commodities", commodities.len());

        let prices = tree
            .find_all(&[GNC_PRICEDB, PRICE])
            .into_iter()
            .map(|p| self.price(p))
            .collect::<Result<Vec<_>, _>>()?;
        debug!("{} prices", prices.len());

        let (root, linked) = self.accounts(tree)?;
        debug!("{} accounts", self.accounts.len());

        for t in tree.children_of(GNC_TRANSACTION) {
            self.transaction(t)?;
        }
        debug!(
            "{} transactions with {} splits",
            self.transactions.len(),
            self.splits.len()
        );

        for c in tree.children_of(GNC_CUSTOMER) {
            self.customer(c)?;
        }
        for v in tree.children_of(GNC_VENDOR) {
            self.vendor(v)?;
        }
        for t in tree.children_of(GNC_TAXTABLE) {
            self.taxtable(t)?;
        }
        debug!(
            "{} customers, {} vendors and {} tax tables",
            self.customers.len(),
            self.vendors.len(),
            self.taxtables.len()
        );

        for e in tree.children_of(GNC_ENTRY) {
            self.entry(e)?;
        }
        let mut groups: HashMap<String, Vec<EntryID>> = HashMap::new();
        for entry in &self.entries {
            if let Some(invoice) = &entry.invoice {
                groups.entry(invoice.clone()).or_default().push(entry.id);
            }
        }
        for i in tree.children_of(GNC_INVOICE) {
            self.invoice(i, &mut groups)?;
        }
        debug!(
            "{} invoices with {} entries",
            self.invoices.len(),
            self.entries.len()
        );
        for (invoice, entries) in &groups {
            debug!("{} entries reference unknown invoice {}", entries.len(), invoice);
        }

        let slots = parse_slots(tree.child(BOOK_SLOTS))?;

        Ok(Book {
            guid,
            slots,
            registry: self.registry,
            commodities,
            prices,
            accounts: self.accounts,
            root,
            linked,
            transactions: self.transactions,
            splits: self.splits,
            customers: self.customers,
            vendors: self.vendors,
            taxtables: self.taxtables,
            entries: self.entries,
            invoices: self.invoices,
        })
    }

    fn commodity(&mut self, tree: &Element) -> Result<CommodityID, LoadError> {
        let space = tree.require_text(&[CMDTY_SPACE])?;
        let name = tree.require_text(&[CMDTY_ID])?;
        trace!("commodity {}:{}", space, name);
        Ok(self.registry.commodity_id(space, name))
    }

    fn commodity_ref(&mut self, tree: &Element, tag: Tag) -> Result<CommodityID, LoadError> {
        let space = tree.require_text(&[tag, CMDTY_SPACE])?;
        let name = tree.require_text(&[tag, CMDTY_ID])?;
        Ok(self.registry.commodity_id(space, name))
    }

    fn resolve_commodity(&self, tree: &Element, tag: Tag) -> Result<CommodityID, LoadError> {
        let space = tree.require_text(&[tag, CMDTY_SPACE])?;
        let name = tree.require_text(&[tag, CMDTY_ID])?;
        self.registry.resolve(space, name)
    }

    fn price(&mut self, tree: &Element) -> Result<Price, LoadError> {
        let guid = tree.require_text(&[PRICE_ID])?.to_string();
        trace!("price {}", guid);
        Ok(Price {
            commodity: self.commodity_ref(tree, PRICE_COMMODITY)?,
            currency: self.commodity_ref(tree, PRICE_CURRENCY)?,
            date: timestamp(tree, PRICE_TIME)?,
            value: parse_number(tree.require_text(&[PRICE_VALUE])?)?,
            guid,
        })
    }

    /// Creates all accounts, then links each non-root account to its parent
    /// in document order. Returns the root and the linked accounts.
    fn accounts(&mut self, tree: &Element) -> Result<(AccountID, Vec<AccountID>), LoadError> {
        let mut parents = Vec::new();
        for a in tree.children_of(GNC_ACCOUNT) {
            let (account, parent) = self.account(a)?;
            trace!("account {} ({})", account.name, account.guid);
            self.account_index.insert(account.guid.clone(), account.id);
            self.accounts.push(account);
            parents.push(parent);
        }

        let mut roots = self.accounts.iter().filter(|a| a.is_root()).map(|a| a.id);
        let root = match (roots.next(), roots.next()) {
            (Some(root), None) => root,
            (None, _) => return Err(LoadError::Format("no root account".into())),
            (Some(_), Some(_)) => {
                return Err(LoadError::Format("more than one root account".into()))
            }
        };

        let mut linked = Vec::new();
        for (i, parent) in parents.into_iter().enumerate() {
            let Some(parent) = parent else {
                continue;
            };
            let id = AccountID(i);
            let parent = *self
                .account_index
                .get(&parent)
                .ok_or_else(|| LoadError::unresolved("account", &parent))?;
            self.accounts[parent.0].children.push(id);
            self.accounts[i].parent = Some(parent);
            linked.push(id);
        }

        let mut seen = vec![false; self.accounts.len()];
        let mut queue = VecDeque::from([root]);
        while let Some(id) = queue.pop_front() {
            seen[id.0] = true;
            queue.extend(self.accounts[id.0].children.iter().copied());
        }
        if let Some(i) = seen.iter().position(|s| !s) {
            return Err(LoadError::Format(format!(
                "account {} is not connected to the root account",
                self.accounts[i].guid
            )));
        }
        Ok((root, linked))
    }

    fn account(&self, tree: &Element) -> Result<(Account, Option<String>), LoadError> {
        let account_type = AccountType::from(tree.require_text(&[ACT_TYPE])?);
        let (parent, commodity, commodity_scu) = if account_type == AccountType::Root {
            (None, None, None)
        } else {
            (
                Some(tree.require_text(&[ACT_PARENT])?.to_string()),
                Some(self.resolve_commodity(tree, ACT_COMMODITY)?),
                Some(parse_integer(tree.require_text(&[ACT_COMMODITY_SCU])?)?),
            )
        };
        let account = Account {
            id: AccountID(self.accounts.len()),
            guid: tree.require_text(&[ACT_ID])?.to_string(),
            name: tree.require_text(&[ACT_NAME])?.to_string(),
            account_type,
            description: tree
                .optional_text(&[ACT_DESCRIPTION])
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            commodity,
            commodity_scu,
            parent: None,
            children: Vec::new(),
            splits: Vec::new(),
            slots: parse_slots(tree.child(ACT_SLOTS))?,
        };
        Ok((account, parent))
    }

    fn transaction(&mut self, tree: &Element) -> Result<(), LoadError> {
        let id = TransactionID(self.transactions.len());
        let guid = tree.require_text(&[TRN_ID])?.to_string();
        trace!("transaction {}", guid);
        let mut transaction = Transaction {
            id,
            guid,
            currency: self.resolve_commodity(tree, TRN_CURRENCY)?,
            date: timestamp(tree, TRN_DATE_POSTED)?,
            date_entered: timestamp(tree, TRN_DATE_ENTERED)?,
            description: tree.require_text(&[TRN_DESCRIPTION])?.to_string(),
            num: tree.optional_text(&[TRN_NUM]).map(str::to_string),
            splits: Vec::new(),
            slots: parse_slots(tree.child(TRN_SLOTS))?,
        };
        for s in tree.find_all(&[TRN_SPLITS, TRN_SPLIT]) {
            let split = self.split(s, id)?;
            transaction.splits.push(split.id);
            self.accounts[split.account.0].splits.push(split.id);
            self.splits.push(split);
        }
        self.transactions.push(transaction);
        Ok(())
    }

    fn split(&self, tree: &Element, transaction: TransactionID) -> Result<Split, LoadError> {
        let account_guid = tree.require_text(&[SPLIT_ACCOUNT])?;
        let account = *self
            .account_index
            .get(account_guid)
            .ok_or_else(|| LoadError::unresolved("account", account_guid))?;
        let reconcile_date = tree
            .child(SPLIT_RECONCILE_DATE)
            .map(|d| d.require_text(&[TS_DATE]).map_err(LoadError::from))
            .transpose()?
            .map(parse_timestamp)
            .transpose()?;
        Ok(Split {
            id: SplitID(self.splits.len()),
            guid: tree.require_text(&[SPLIT_ID])?.to_string(),
            memo: tree.optional_text(&[SPLIT_MEMO]).map(str::to_string),
            action: tree.optional_text(&[SPLIT_ACTION]).map(str::to_string),
            reconciled_state: ReconcileState::try_from(
                tree.require_text(&[SPLIT_RECONCILED_STATE])?,
            )?,
            reconcile_date,
            value: parse_number(tree.require_text(&[SPLIT_VALUE])?)?,
            quantity: parse_number(tree.require_text(&[SPLIT_QUANTITY])?)?,
            account,
            transaction,
            slots: parse_slots(tree.child(SPLIT_SLOTS))?,
        })
    }

    fn customer(&mut self, tree: &Element) -> Result<(), LoadError> {
        let id = CustomerID(self.customers.len());
        let guid = tree.require_text(&[CUST_GUID])?.to_string();
        let addr = tree.require(&[CUST_ADDR])?;
        let customer = Customer {
            id,
            name: tree.require_text(&[CUST_NAME])?.to_string(),
            address: ADDR_LINES
                .iter()
                .filter_map(|line| addr.optional_text(&[*line]))
                .map(str::to_string)
                .collect(),
            guid,
        };
        trace!("customer {}", customer.name);
        self.customer_index.insert(customer.guid.clone(), id);
        self.customers.push(customer);
        Ok(())
    }

    fn vendor(&mut self, tree: &Element) -> Result<(), LoadError> {
        let id = VendorID(self.vendors.len());
        let vendor = Vendor {
            id,
            guid: tree.require_text(&[VENDOR_GUID])?.to_string(),
            name: tree.require_text(&[VENDOR_NAME])?.to_string(),
        };
        trace!("vendor {}", vendor.name);
        self.vendor_index.insert(vendor.guid.clone(), id);
        self.vendors.push(vendor);
        Ok(())
    }

    fn taxtable(&mut self, tree: &Element) -> Result<(), LoadError> {
        let id = TaxtableID(self.taxtables.len());
        let entries = tree
            .find_all(&[TAXTABLE_ENTRIES, GNC_TAXTABLE_ENTRY])
            .into_iter()
            .map(|e| {
                Ok(TaxtableEntry {
                    amount: parse_number(e.require_text(&[TTE_AMOUNT])?)?,
                    amount_type: AmountType::from(e.require_text(&[TTE_TYPE])?),
                })
            })
            .collect::<Result<Vec<_>, LoadError>>()?;
        let taxtable = Taxtable {
            id,
            guid: tree.require_text(&[TAXTABLE_GUID])?.to_string(),
            name: tree.require_text(&[TAXTABLE_NAME])?.to_string(),
            entries,
        };
        trace!("tax table {}", taxtable.name);
        self.taxtable_index.insert(taxtable.guid.clone(), id);
        self.taxtables.push(taxtable);
        Ok(())
    }

    fn entry(&mut self, tree: &Element) -> Result<(), LoadError> {
        let side = if tree.child(ENTRY_INVOICE).is_none() && tree.child(ENTRY_BILL).is_some() {
            &BILL_SIDE
        } else {
            &INVOICE_SIDE
        };
        let (taxable, taxtable) = match tree.optional_text(&[side.taxable]) {
            Some(flag) => {
                // The table is only written when one is set.
                let taxtable = tree
                    .optional_text(&[side.taxtable])
                    .map(|guid| {
                        self.taxtable_index
                            .get(guid)
                            .copied()
                            .ok_or_else(|| LoadError::unresolved("taxtable", guid))
                    })
                    .transpose()?;
                (Some(parse_flag(flag)?), taxtable)
            }
            None => (None, None),
        };
        let entry = Entry {
            id: EntryID(self.entries.len()),
            guid: tree.require_text(&[ENTRY_GUID])?.to_string(),
            description: tree.optional_text(&[ENTRY_DESCRIPTION]).map(str::to_string),
            action: tree.optional_text(&[ENTRY_ACTION]).map(str::to_string),
            price: tree.optional_text(&[side.price]).map(parse_number).transpose()?,
            quantity: tree.optional_text(&[ENTRY_QTY]).map(parse_number).transpose()?,
            taxable,
            taxtable,
            invoice: tree.optional_text(&[side.owner]).map(str::to_string),
        };
        trace!("entry {}", entry.guid);
        self.entries.push(entry);
        Ok(())
    }

    fn invoice(
        &mut self,
        tree: &Element,
        groups: &mut HashMap<String, Vec<EntryID>>,
    ) -> Result<(), LoadError> {
        let guid = tree.require_text(&[INVOICE_GUID])?.to_string();
        let owner_type = tree.require_text(&[INVOICE_OWNER, OWNER_TYPE])?;
        let owner_id = tree.require_text(&[INVOICE_OWNER, OWNER_ID])?;
        let owner = match owner_type {
            "gncCustomer" => Some(Owner::Customer(
                *self
                    .customer_index
                    .get(owner_id)
                    .ok_or_else(|| LoadError::unresolved("customer", owner_id))?,
            )),
            "gncVendor" => Some(Owner::Vendor(
                *self
                    .vendor_index
                    .get(owner_id)
                    .ok_or_else(|| LoadError::unresolved("vendor", owner_id))?,
            )),
            other => {
                debug!("invoice {} has unsupported owner type {}", guid, other);
                None
            }
        };
        let invoice = Invoice {
            id: InvoiceID(self.invoices.len()),
            business_id: tree.require_text(&[INVOICE_ID])?.to_string(),
            date: timestamp(tree, INVOICE_OPENED)?,
            active: parse_flag(tree.require_text(&[INVOICE_ACTIVE])?)?,
            owner,
            entries: groups.remove(&guid).unwrap_or_default(),
            guid,
        };
        trace!(
            "invoice {} with {} entries",
            invoice.business_id,
            invoice.entries.len()
        );
        self.invoices.push(invoice);
        Ok(())
    }
}

fn timestamp(tree: &Element, tag: Tag) -> Result<Timestamp, LoadError> {
    parse_timestamp(tree.require_text(&[tag, TS_DATE])?)
}

fn parse_flag(s: &str) -> Result<bool, LoadError> {
    match s.trim() {
        "1" => Ok(true),
        "0" => Ok(false),
        other => Err(LoadError::Format(format!("invalid flag {:?}", other))),
    }
}
