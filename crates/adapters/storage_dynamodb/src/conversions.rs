//! Conversions between domain [`Item`]s and `DynamoDB` attribute maps.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;

use itemshim_domain::item::Item;
use itemshim_domain::time;

use crate::error::DecodeError;

const ID: &str = "id";
const NAME: &str = "name";
const DESCRIPTION: &str = "description";
const PRICE: &str = "price";
const CREATED_AT: &str = "createdAt";
const UPDATED_AT: &str = "updatedAt";

pub(crate) type Record = HashMap<String, AttributeValue>;

pub(crate) fn to_record(item: &Item) -> Record {
    HashMap::from([
        (ID.to_string(), AttributeValue::S(item.id.clone())),
        (NAME.to_string(), AttributeValue::S(item.name.clone())),
        (
            DESCRIPTION.to_string(),
            AttributeValue::S(item.description.clone()),
        ),
        (PRICE.to_string(), AttributeValue::N(item.price.to_string())),
        (
            CREATED_AT.to_string(),
            AttributeValue::S(time::to_iso8601(&item.created_at)),
        ),
        (
            UPDATED_AT.to_string(),
            AttributeValue::S(time::to_iso8601(&item.updated_at)),
        ),
    ])
}

/// Decode a stored record. `description` and `price` fall back to their
/// defaults when absent; everything else is required.
pub(crate) fn from_record(record: &Record) -> Result<Item, DecodeError> {
    let created_at = timestamp(record, CREATED_AT)?;
    Ok(Item {
        id: required_string(record, ID)?,
        name: required_string(record, NAME)?,
        description: optional_string(record, DESCRIPTION)?.unwrap_or_default(),
        price: optional_number(record, PRICE)?.unwrap_or_default(),
        created_at,
        updated_at: match record.get(UPDATED_AT) {
            Some(_) => timestamp(record, UPDATED_AT)?,
            None => created_at,
        },
    })
}

/// Decode one scanned page. Records that cannot be decoded are logged and
/// left out so the rest of the page is still returned.
pub(crate) fn from_page(records: &[Record]) -> Vec<Item> {
    records
        .iter()
        .filter_map(|record| match from_record(record) {
            Ok(item) => Some(item),
            Err(err) => {
                let id = match record.get(ID) {
                    Some(AttributeValue::S(id)) => id.as_str(),
                    _ => "<unknown>",
                };
                tracing::warn!(id, error = %err, "skipping undecodable record");
                None
            }
        })
        .collect()
}

fn optional_string(record: &Record, attribute: &'static str) -> Result<Option<String>, DecodeError> {
    match record.get(attribute) {
        None | Some(AttributeValue::Null(_)) => Ok(None),
        Some(AttributeValue::S(value)) => Ok(Some(value.clone())),
        Some(_) => Err(DecodeError::WrongType(attribute)),
    }
}

fn required_string(record: &Record, attribute: &'static str) -> Result<String, DecodeError> {
    optional_string(record, attribute)?.ok_or(DecodeError::MissingAttribute(attribute))
}

fn optional_number(record: &Record, attribute: &'static str) -> Result<Option<f64>, DecodeError> {
    match record.get(attribute) {
        None | Some(AttributeValue::Null(_)) => Ok(None),
        Some(AttributeValue::N(value)) => value
            .parse()
            .map(Some)
            .map_err(|source| DecodeError::InvalidNumber { attribute, source }),
        Some(_) => Err(DecodeError::WrongType(attribute)),
    }
}

fn timestamp(record: &Record, attribute: &'static str) -> Result<time::Timestamp, DecodeError> {
    let raw = required_string(record, attribute)?;
    time::parse_iso8601(&raw).map_err(|source| DecodeError::InvalidTimestamp { attribute, source })
}
