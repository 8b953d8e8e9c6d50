//! Element names of the GnuCash v2 format, grouped by the record that uses them.

use crate::xml::{Ns, Tag};

pub const GNC_V2: Tag = Ns::Bare.tag("gnc-v2");
pub const GNC_BOOK: Tag = Ns::Gnc.tag("book");
pub const GNC_COMMODITY: Tag = Ns::Gnc.tag("commodity");
pub const GNC_PRICEDB: Tag = Ns::Gnc.tag("pricedb");
pub const GNC_ACCOUNT: Tag = Ns::Gnc.tag("account");
pub const GNC_TRANSACTION: Tag = Ns::Gnc.tag("transaction");
pub const GNC_CUSTOMER: Tag = Ns::Gnc.tag("GncCustomer");
pub const GNC_VENDOR: Tag = Ns::Gnc.tag("GncVendor");
pub const GNC_TAXTABLE: Tag = Ns::Gnc.tag("GncTaxTable");
pub const GNC_TAXTABLE_ENTRY: Tag = Ns::Gnc.tag("GncTaxTableEntry");
pub const GNC_ENTRY: Tag = Ns::Gnc.tag("GncEntry");
pub const GNC_INVOICE: Tag = Ns::Gnc.tag("GncInvoice");

pub const BOOK_ID: Tag = Ns::Book.tag("id");
pub const BOOK_SLOTS: Tag = Ns::Book.tag("slots");

pub const CMDTY_SPACE: Tag = Ns::Cmdty.tag("space");
pub const CMDTY_ID: Tag = Ns::Cmdty.tag("id");

pub const TS_DATE: Tag = Ns::Ts.tag("date");

pub const PRICE: Tag = Ns::Bare.tag("price");
pub const PRICE_ID: Tag = Ns::Price.tag("id");
pub const PRICE_COMMODITY: Tag = Ns::Price.tag("commodity");
pub const PRICE_CURRENCY: Tag = Ns::Price.tag("currency");
pub const PRICE_TIME: Tag = Ns::Price.tag("time");
pub const PRICE_VALUE: Tag = Ns::Price.tag("value");

pub const ACT_NAME: Tag = Ns::Act.tag("name");
pub const ACT_ID: Tag = Ns::Act.tag("id");
pub const ACT_TYPE: Tag = Ns::Act.tag("type");
pub const ACT_DESCRIPTION: Tag = Ns::Act.tag("description");
pub const ACT_COMMODITY: Tag = Ns::Act.tag("commodity");
pub const ACT_COMMODITY_SCU: Tag = Ns::Act.tag("commodity-scu");
pub const ACT_PARENT: Tag = Ns::Act.tag("parent");
pub const ACT_SLOTS: Tag = Ns::Act.tag("slots");

pub const TRN_ID: Tag = Ns::Trn.tag("id");
pub const TRN_CURRENCY: Tag = Ns::Trn.tag("currency");
pub const TRN_DATE_POSTED: Tag = Ns::Trn.tag("date-posted");
pub const TRN_DATE_ENTERED: Tag = Ns::Trn.tag("date-entered");
pub const TRN_DESCRIPTION: Tag = Ns::Trn.tag("description");
pub const TRN_NUM: Tag = Ns::Trn.tag("num");
pub const TRN_SLOTS: Tag = Ns::Trn.tag("slots");
pub const TRN_SPLITS: Tag = Ns::Trn.tag("splits");
pub const TRN_SPLIT: Tag = Ns::Trn.tag("split");

pub const SPLIT_ID: Tag = Ns::Split.tag("id");
pub const SPLIT_MEMO: Tag = Ns::Split.tag("memo");
pub const SPLIT_ACTION: Tag = Ns::Split.tag("action");
pub const SPLIT_RECONCILED_STATE: Tag = Ns::Split.tag("reconciled-state");
pub const SPLIT_RECONCILE_DATE: Tag = Ns::Split.tag("reconcile-date");
pub const SPLIT_VALUE: Tag = Ns::Split.tag("value");
pub const SPLIT_QUANTITY: Tag = Ns::Split.tag("quantity");
pub const SPLIT_ACCOUNT: Tag = Ns::Split.tag("account");
pub const SPLIT_SLOTS: Tag = Ns::Split.tag("slots");

pub const CUST_GUID: Tag = Ns::Cust.tag("guid");
pub const CUST_NAME: Tag = Ns::Cust.tag("name");
pub const CUST_ADDR: Tag = Ns::Cust.tag("addr");
pub const ADDR_LINES: [Tag; 4] = [
    Ns::Addr.tag("addr1"),
    Ns::Addr.tag("addr2"),
    Ns::Addr.tag("addr3"),
    Ns::Addr.tag("addr4"),
];

pub const VENDOR_GUID: Tag = Ns::Vendor.tag("guid");
pub const VENDOR_NAME: Tag = Ns::Vendor.tag("name");

pub const TAXTABLE_GUID: Tag = Ns::Taxtable.tag("guid");
pub const TAXTABLE_NAME: Tag = Ns::Taxtable.tag("name");
pub const TAXTABLE_ENTRIES: Tag = Ns::Taxtable.tag("entries");
pub const TTE_AMOUNT: Tag = Ns::Tte.tag("amount");
pub const TTE_TYPE: Tag = Ns::Tte.tag("type");

pub const ENTRY_GUID: Tag = Ns::Entry.tag("guid");
pub const ENTRY_DESCRIPTION: Tag = Ns::Entry.tag("description");
pub const ENTRY_ACTION: Tag = Ns::Entry.tag("action");
pub const ENTRY_QTY: Tag = Ns::Entry.tag("qty");
pub const ENTRY_INVOICE: Tag = Ns::Entry.tag("invoice");
pub const ENTRY_BILL: Tag = Ns::Entry.tag("bill");
pub const ENTRY_I_PRICE: Tag = Ns::Entry.tag("i-price");
pub const ENTRY_I_TAXABLE: Tag = Ns::Entry.tag("i-taxable");
pub const ENTRY_I_TAXTABLE: Tag = Ns::Entry.tag("i-taxtable");
pub const ENTRY_B_PRICE: Tag = Ns::Entry.tag("b-price");
pub const ENTRY_B_TAXABLE: Tag = Ns::Entry.tag("b-taxable");
pub const ENTRY_B_TAXTABLE: Tag = Ns::Entry.tag("b-taxtable");

pub const INVOICE_GUID: Tag = Ns::Invoice.tag("guid");
pub const INVOICE_ID: Tag = Ns::Invoice.tag("id");
pub const INVOICE_OWNER: Tag = Ns::Invoice.tag("owner");
pub const INVOICE_OPENED: Tag = Ns::Invoice.tag("opened");
pub const INVOICE_ACTIVE: Tag = Ns::Invoice.tag("active");
pub const OWNER_TYPE: Tag = Ns::Owner.tag("type");
pub const OWNER_ID: Tag = Ns::Owner.tag("id");

pub const SLOT: Tag = Ns::Bare.tag("slot");
pub const SLOT_KEY: Tag = Ns::Slot.tag("key");
pub const SLOT_VALUE: Tag = Ns::Slot.tag("value");
pub const GDATE: Tag = Ns::Bare.tag("gdate");
