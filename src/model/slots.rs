use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::{
    date::{parse_date, parse_timestamp, Timestamp},
    error::LoadError,
    numeric::{parse_integer, parse_number},
    tags::{GDATE, SLOT, SLOT_KEY, SLOT_VALUE, TS_DATE},
};
use crate::xml::Element;

/// Key/value metadata attached to the book, accounts, transactions and splits.
pub type Slots = BTreeMap<String, SlotValue>;

#[derive(Debug, Clone, PartialEq)]
pub enum SlotValue {
    Integer(i64),
    Numeric(Decimal),
    Text(String),
    Date(NaiveDate),
    DateTime(Timestamp),
    Frame(Slots),
}

impl SlotValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            SlotValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_frame(&self) -> Option<&Slots> {
        match self {
            SlotValue::Frame(f) => Some(f),
            _ => None,
        }
    }
}

/// Parses the `slot` children of `tree`. A missing element yields no slots.
pub fn parse_slots(tree: Option<&Element>) -> Result<Slots, LoadError> {
    let Some(tree) = tree else {
        return Ok(Slots::new());
    };
    tree.children_of(SLOT).map(parse_slot).collect()
}

fn parse_slot(slot: &Element) -> Result<(String, SlotValue), LoadError> {
    let key = slot.require_text(&[SLOT_KEY])?.to_string();
    let value = slot.require(&[SLOT_VALUE])?;
    let value = match value.attribute("type").unwrap_or("string") {
        "integer" | "double" => SlotValue::Integer(parse_integer(value.text())?),
        "numeric" => SlotValue::Numeric(parse_number(value.text())?),
        "string" | "guid" => SlotValue::Text(value.text().to_string()),
        "gdate" => SlotValue::Date(parse_date(value.require_text(&[GDATE])?)?),
        "timespec" => SlotValue::DateTime(parse_timestamp(value.require_text(&[TS_DATE])?)?),
        "frame" => SlotValue::Frame(parse_slots(Some(value))?),
        other => return Err(LoadError::UnsupportedSlotType(other.to_string())),
    };
    Ok((key, value))
}
