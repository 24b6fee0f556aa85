use std::collections::HashMap;

use serde::{Deserialize, Deserializer};
use uuid::Uuid;

use crate::{error::AppError, services::card_service::ChecklistItem};

pub const BOARD_TITLE: (usize, usize) = (3, 50);
pub const LIST_TITLE: (usize, usize) = (3, 50);
pub const CARD_TITLE: (usize, usize) = (3, 100);
pub const USERNAME: (usize, usize) = (3, 50);
pub const BOARD_DESCRIPTION_MAX: usize = 200;
pub const CARD_DESCRIPTION_MAX: usize = 500;
pub const CHECKLIST_TEXT: (usize, usize) = (1, 200);

/// Trims `value` and checks its length in characters.
pub fn bounded(field: &str, value: &str, (min, max): (usize, usize)) -> Result<String, AppError> {
    let value = value.trim();
    let len = value.chars().count();
    if len < min || len > max {
        return Err(AppError::bad_request(format!(
            "{field} must be between {min} and {max} characters"
        )));
    }
    Ok(value.to_string())
}

pub fn optional_bounded(
    field: &str,
    value: Option<String>,
    limits: (usize, usize),
) -> Result<Option<String>, AppError> {
    value.map(|value| bounded(field, &value, limits)).transpose()
}

pub fn max_len(field: &str, value: Option<String>, max: usize) -> Result<Option<String>, AppError> {
    match value {
        Some(value) if value.chars().count() > max => Err(AppError::bad_request(format!(
            "{field} must be at most {max} characters"
        ))),
        other => Ok(other),
    }
}

pub fn order(field: &str, value: Option<i64>) -> Result<Option<i64>, AppError> {
    match value {
        Some(value) if value < 0 => Err(AppError::bad_request(format!(
            "{field} must be greater than or equal to 0"
        ))),
        other => Ok(other),
    }
}

pub fn email(value: &str) -> Result<String, AppError> {
    let value = value.trim();
    let valid = value
        .split_once('@')
        .is_some_and(|(local, domain)| {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        });
    if !valid {
        return Err(AppError::bad_request("email must be a valid email address"));
    }
    Ok(value.to_ascii_lowercase())
}

pub fn checklist(items: Vec<ChecklistItem>) -> Result<Vec<ChecklistItem>, AppError> {
    items
        .into_iter()
        .map(|item| {
            let text = bounded("checklist item text", &item.text, CHECKLIST_TEXT)?;
            Ok(ChecklistItem { text, ..item })
        })
        .collect()
}

/// Accepts `#rrggbb` colors only.
pub fn hex_color(value: Option<String>) -> Result<Option<String>, AppError> {
    match value {
        Some(value) => {
            let value = value.trim();
            let valid = value.len() == 7
                && value.starts_with('#')
                && value[1..].chars().all(|c| c.is_ascii_hexdigit());
            if !valid {
                return Err(AppError::bad_request(
                    "background_color must be a hex color like #3b82f6",
                ));
            }
            Ok(Some(value.to_string()))
        }
        None => Ok(None),
    }
}

/// For `#[serde(default, deserialize_with = "nullable")]` fields: absent
/// stays `None`, an explicit `null` becomes `Some(None)`.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Keys that are not ids are dropped the same way unknown ids are; negative
/// orders are rejected.
///
/// Values are checked before keys, so a negative order fails the whole map
/// even when its key would have been skipped.
pub fn reorder_map(raw: HashMap<String, i64>) -> Result<HashMap<Uuid, i64>, AppError> {
    let mut orders = HashMap::with_capacity(raw.len());
    for (key, value) in raw {
        order("order", Some(value))?;
        if let Ok(id) = Uuid::parse_str(&key) {
            orders.insert(id, value);
        }
    }
    Ok(orders)
}
