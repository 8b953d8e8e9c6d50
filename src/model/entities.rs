use std::fmt::Display;

use rust_decimal::Decimal;

use super::{date::Timestamp, error::LoadError, slots::Slots};

macro_rules! id_type {
    ($($name:ident),*) => {
        $(
            #[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Ord, PartialOrd)]
            pub struct $name(pub usize);
        )*
    };
}

id_type!(
    CommodityID,
    AccountID,
    TransactionID,
    SplitID,
    CustomerID,
    VendorID,
    TaxtableID,
    EntryID,
    InvoiceID
);

#[derive(Debug, Clone, Hash, PartialEq, Eq, Ord, PartialOrd)]
pub struct Commodity {
    pub id: CommodityID,
    pub space: String,
    pub name: String,
}

impl Display for Commodity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum AccountType {
    Root,
    Bank,
    Cash,
    Asset,
    Credit,
    Liability,
    Stock,
    Mutual,
    Currency,
    Income,
    Expense,
    Equity,
    Receivable,
    Payable,
    Trading,
    Other(String),
}

impl From<&str> for AccountType {
    fn from(value: &str) -> Self {
        match value {
            "ROOT" => AccountType::Root,
            "BANK" => AccountType::Bank,
            "CASH" => AccountType::Cash,
            "ASSET" => AccountType::Asset,
            "CREDIT" => AccountType::Credit,
            "LIABILITY" => AccountType::Liability,
            "STOCK" => AccountType::Stock,
            "MUTUAL" => AccountType::Mutual,
            "CURRENCY" => AccountType::Currency,
            "INCOME" => AccountType::Income,
            "EXPENSE" => AccountType::Expense,
            "EQUITY" => AccountType::Equity,
            "RECEIVABLE" => AccountType::Receivable,
            "PAYABLE" => AccountType::Payable,
            "TRADING" => AccountType::Trading,
            other => AccountType::Other(other.to_string()),
        }
    }
}

impl Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use AccountType::*;
        let s = match self {
            Root => "ROOT",
            Bank => "BANK",
            Cash => "CASH",
            Asset => "ASSET",
            Credit => "CREDIT",
            Liability => "LIABILITY",
            Stock => "STOCK",
            Mutual => "MUTUAL",
            Currency => "CURRENCY",
            Income => "INCOME",
            Expense => "EXPENSE",
            Equity => "EQUITY",
            Receivable => "RECEIVABLE",
            Payable => "PAYABLE",
            Trading => "TRADING",
            Other(s) => s,
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: AccountID,
    pub guid: String,
    pub name: String,
    pub account_type: AccountType,
    pub description: Option<String>,
    pub commodity: Option<CommodityID>,
    pub commodity_scu: Option<i64>,
    pub parent: Option<AccountID>,
    pub children: Vec<AccountID>,
    pub splits: Vec<SplitID>,
    pub slots: Slots,
}

impl Account {
    pub fn is_root(&self) -> bool {
        self.account_type == AccountType::Root
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: TransactionID,
    pub guid: String,
    pub currency: CommodityID,
    pub date: Timestamp,
    pub date_entered: Timestamp,
    pub description: String,
    pub num: Option<String>,
    pub splits: Vec<SplitID>,
    pub slots: Slots,
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum ReconcileState {
    NotReconciled,
    Cleared,
    Reconciled,
    Frozen,
    Voided,
}

impl TryFrom<&str> for ReconcileState {
    type Error = LoadError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "n" => Ok(ReconcileState::NotReconciled),
            "c" => Ok(ReconcileState::Cleared),
            "y" => Ok(ReconcileState::Reconciled),
            "f" => Ok(ReconcileState::Frozen),
            "v" => Ok(ReconcileState::Voided),
            other => Err(LoadError::Format(format!(
                "invalid reconcile state {:?}",
                other
            ))),
        }
    }
}

impl Display for ReconcileState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let c = match self {
            ReconcileState::NotReconciled => "n",
            ReconcileState::Cleared => "c",
            ReconcileState::Reconciled => "y",
            ReconcileState::Frozen => "f",
            ReconcileState::Voided => "v",
        };
        write!(f, "{}", c)
    }
}

/// One line of a transaction. `value` is in the transaction currency,
/// `quantity` in the commodity of the account.
#[derive(Debug, Clone, PartialEq)]
pub struct Split {
    pub id: SplitID,
    pub guid: String,
    pub memo: Option<String>,
    pub action: Option<String>,
    pub reconciled_state: ReconcileState,
    pub reconcile_date: Option<Timestamp>,
    pub value: Decimal,
    pub quantity: Decimal,
    pub account: AccountID,
    pub transaction: TransactionID,
    pub slots: Slots,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Price {
    pub guid: String,
    pub commodity: CommodityID,
    pub currency: CommodityID,
    pub date: Timestamp,
    pub value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub id: CustomerID,
    pub guid: String,
    pub name: String,
    pub address: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vendor {
    pub id: VendorID,
    pub guid: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountType {
    Percent,
    Value,
    Other(String),
}

impl From<&str> for AmountType {
    fn from(value: &str) -> Self {
        match value {
            "PERCENT" => AmountType::Percent,
            "VALUE" => AmountType::Value,
            other => AmountType::Other(other.to_string()),
        }
    }
}

impl Display for AmountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AmountType::Percent => write!(f, "PERCENT"),
            AmountType::Value => write!(f, "VALUE"),
            AmountType::Other(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxtableEntry {
    pub amount: Decimal,
    pub amount_type: AmountType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Taxtable {
    pub id: TaxtableID,
    pub guid: String,
    pub name: String,
    pub entries: Vec<TaxtableEntry>,
}

/// An invoice or bill line. The owning invoice is referenced by guid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: EntryID,
    pub guid: String,
    pub description: Option<String>,
    pub action: Option<String>,
    pub price: Option<Decimal>,
    pub quantity: Option<Decimal>,
    pub taxable: Option<bool>,
    pub taxtable: Option<TaxtableID>,
    pub invoice: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
    Customer(CustomerID),
    Vendor(VendorID),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Invoice {
    pub id: InvoiceID,
    pub guid: String,
    pub business_id: String,
    pub date: Timestamp,
    pub active: bool,
    pub owner: Option<Owner>,
    pub entries: Vec<EntryID>,
}

impl Invoice {
    pub fn customer(&self) -> Option<CustomerID> {
        match self.owner {
            Some(Owner::Customer(c)) => Some(c),
            _ => None,
        }
    }

    pub fn vendor(&self) -> Option<VendorID> {
        match self.owner {
            Some(Owner::Vendor(v)) => Some(v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod test_entities {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_account_type() {
        for s in ["ROOT", "BANK", "INCOME", "EXPENSE", "RECEIVABLE", "TRADING"] {
            assert_eq!(AccountType::from(s).to_string(), s);
        }
        assert_eq!(
            AccountType::from("MONEYMRKT"),
            AccountType::Other("MONEYMRKT".into())
        );
        assert_eq!(AccountType::from("MONEYMRKT").to_string(), "MONEYMRKT");
    }

    #[test]
    fn test_reconcile_state() {
        for s in ["n", "c", "y", "f", "v"] {
            assert_eq!(ReconcileState::try_from(s).unwrap().to_string(), s);
        }
        assert!(matches!(
            ReconcileState::try_from("x"),
            Err(LoadError::Format(_))
        ));
    }

    #[test]
    fn test_invoice_owner() {
        let mut invoice = Invoice {
            id: InvoiceID(0),
            guid: "g".into(),
            business_id: "2017-0001".into(),
            date: crate::model::date::parse_timestamp("2017-01-10 00:00:00 +0100").unwrap(),
            active: true,
            owner: Some(Owner::Customer(CustomerID(3))),
            entries: vec![],
        };
        assert_eq!(invoice.customer(), Some(CustomerID(3)));
        assert_eq!(invoice.vendor(), None);
        invoice.owner = Some(Owner::Vendor(VendorID(1)));
        assert_eq!(invoice.customer(), None);
        assert_eq!(invoice.vendor(), Some(VendorID(1)));
        invoice.owner = None;
        assert_eq!((invoice.customer(), invoice.vendor()), (None, None));
    }
}
