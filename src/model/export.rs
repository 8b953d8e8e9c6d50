//! Key/value export of the book and of single invoices. References to other
//! entities are written as guids.

use rust_decimal::{prelude::ToPrimitive, Decimal};
use serde_json::{json, Map, Value};

use super::{
    book::Book,
    entities::{Account, Entry, Invoice, Owner, Price, Split, Transaction},
    slots::{SlotValue, Slots},
};

fn decimal(d: Decimal) -> Value {
    d.to_f64().map(Value::from).unwrap_or(Value::Null)
}

fn opt_decimal(d: Option<Decimal>) -> Value {
    d.map(decimal).unwrap_or(Value::Null)
}

pub fn slots(slots: &Slots) -> Value {
    Value::Object(
        slots
            .iter()
            .map(|(k, v)| (k.clone(), slot_value(v)))
            .collect::<Map<_, _>>(),
    )
}

fn slot_value(value: &SlotValue) -> Value {
    match value {
        SlotValue::Integer(i) => json!(i),
        SlotValue::Numeric(d) => decimal(*d),
        SlotValue::Text(s) => json!(s),
        SlotValue::Date(d) => json!(d.format("%Y-%m-%d").to_string()),
        SlotValue::DateTime(t) => json!(t.to_rfc3339()),
        SlotValue::Frame(f) => slots(f),
    }
}

fn account(book: &Book, a: &Account) -> Value {
    json!({
        "guid": a.guid,
        "name": a.name,
        "fullname": book.fullname(a.id),
        "type": a.account_type.to_string(),
        "description": a.description,
        "commodity": a.commodity.map(|c| book.commodity(c).name.clone()),
        "commodity_scu": a.commodity_scu,
        "parent": a.parent.map(|p| book.account(p).guid.clone()),
        "children": a.children.iter().map(|c| book.account(*c).guid.clone()).collect::<Vec<_>>(),
        "slots": slots(&a.slots),
    })
}

fn split(book: &Book, s: &Split) -> Value {
    json!({
        "guid": s.guid,
        "memo": s.memo,
        "action": s.action,
        "reconciled_state": s.reconciled_state.to_string(),
        "reconcile_date": s.reconcile_date.map(|d| d.to_rfc3339()),
        "value": decimal(s.value),
        "quantity": decimal(s.quantity),
        "account": book.account(s.account).guid,
        "slots": slots(&s.slots),
    })
}

fn transaction(book: &Book, t: &Transaction) -> Value {
    json!({
        "guid": t.guid,
        "currency": book.commodity(t.currency).name,
        "date": t.date.to_rfc3339(),
        "date_entered": t.date_entered.to_rfc3339(),
        "description": t.description,
        "num": t.num,
        "splits": t.splits.iter().map(|s| split(book, book.split(*s))).collect::<Vec<_>>(),
        "slots": slots(&t.slots),
    })
}

fn price(book: &Book, p: &Price) -> Value {
    json!({
        "guid": p.guid,
        "commodity": book.commodity(p.commodity).name,
        "currency": book.commodity(p.currency).name,
        "date": p.date.to_rfc3339(),
        "value": decimal(p.value),
    })
}

fn entry(book: &Book, e: &Entry) -> Value {
    json!({
        "guid": e.guid,
        "description": e.description,
        "action": e.action,
        "price": opt_decimal(e.price),
        "quantity": opt_decimal(e.quantity),
        "taxable": e.taxable,
        "taxtable": e.taxtable.map(|t| {
            let t = book.taxtable(t);
            json!({
                "guid": t.guid,
                "name": t.name,
                "entries": t.entries.iter().map(|te| json!({
                    "amount": decimal(te.amount),
                    "type": te.amount_type.to_string(),
                })).collect::<Vec<_>>(),
            })
        }),
        "invoice": e.invoice,
    })
}

pub fn invoice(book: &Book, i: &Invoice) -> Value {
    let owner = match i.owner {
        Some(Owner::Customer(c)) => {
            let c = book.customer(c);
            json!({
                "type": "customer",
                "guid": c.guid,
                "name": c.name,
                "address": c.address,
            })
        }
        Some(Owner::Vendor(v)) => {
            let v = book.vendor(v);
            json!({
                "type": "vendor",
                "guid": v.guid,
                "name": v.name,
            })
        }
        None => Value::Null,
    };
    json!({
        "guid": i.guid,
        "id": i.business_id,
        "date": i.date.to_rfc3339(),
        "active": i.active,
        "owner": owner,
        "entries": i.entries.iter().map(|e| entry(book, book.entry(*e))).collect::<Vec<_>>(),
    })
}

pub fn book(book: &Book) -> Value {
    json!({
        "guid": book.guid(),
        "commodities": book.commodities().map(|c| json!({
            "space": c.space,
            "name": c.name,
        })).collect::<Vec<_>>(),
        "prices": book.prices().iter().map(|p| price(book, p)).collect::<Vec<_>>(),
        "root": book.root().guid,
        "accounts": book.accounts().map(|a| account(book, a)).collect::<Vec<_>>(),
        "transactions": book.transactions().iter().map(|t| transaction(book, t)).collect::<Vec<_>>(),
        "invoices": book.invoices().iter().map(|i| invoice(book, i)).collect::<Vec<_>>(),
        "slots": slots(book.slots()),
    })
}
