//! Reconciliation of JSON records compared field by field.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::compare::{fx_hash, Comparator};
use crate::config::{KeyTransform, RecordDiffConfig};
use crate::engine::{reconcile_indexed_with, reconcile_with};
use crate::error::DiffError;
use crate::model::{DiffResult, IndexedDiffResult, Side};

/// [`Comparator`] for `serde_json::Value` objects.
///
/// Identity is the tuple of identity-field values, rendered as text (strings
/// as-is, other values as JSON, missing or `null` as the empty string) and
/// normalized with the configured [`KeyTransform`]. Content changes when any
/// compared field differs; a missing field compares equal to `null`.
///
/// Elements that are not objects have no fields, so they all share the
/// empty identity. Use [`check_records`] to reject them up front.
#[derive(Debug, Clone)]
pub struct RecordComparator {
    identity: Vec<String>,
    compare: Option<Vec<String>>,
    ignore: Vec<String>,
    key_transform: KeyTransform,
}

impl RecordComparator {
    pub fn from_config(config: &RecordDiffConfig) -> Self {
        Self {
            identity: config.identity.clone(),
            compare: config.compare.clone(),
            ignore: config.ignore.clone(),
            key_transform: config.key_transform,
        }
    }

    /// Normalized identity values of `record`, one per identity field.
    pub fn identity_key(&self, record: &Value) -> Vec<String> {
        self.identity
            .iter()
            .map(|field| self.key_transform.apply(&key_text(record.get(field))))
            .collect()
    }

    /// Compared fields whose values differ between the two records.
    ///
    /// With an explicit `compare` list the result follows that list;
    /// otherwise fields are reported in name order.
    pub fn changed_fields(&self, current: &Value, previous: &Value) -> Vec<String> {
        match self.compare {
            Some(ref fields) => fields
                .iter()
                .filter(|f| differs(current, previous, f.as_str()))
                .cloned()
                .collect(),
            None => {
                let fields: BTreeSet<&str> = object_keys(current).chain(object_keys(previous)).collect();
                fields
                    .into_iter()
                    .filter(|f| self.is_implicitly_compared(f) && differs(current, previous, f))
                    .map(str::to_string)
                    .collect()
            }
        }
    }

    fn is_implicitly_compared(&self, field: &str) -> bool {
        !self.identity.iter().any(|i| i.as_str() == field) && !self.ignore.iter().any(|i| i.as_str() == field)
    }
}

impl Comparator<Value> for RecordComparator {
    fn same_identity(&self, a: &Value, b: &Value) -> bool {
        self.identity.iter().all(|field| {
            self.key_transform.apply(&key_text(a.get(field)))
                == self.key_transform.apply(&key_text(b.get(field)))
        })
    }

    fn identity_hash(&self, item: &Value) -> u64 {
        fx_hash(&self.identity_key(item))
    }

    fn content_changed(&self, current: &Value, previous: &Value) -> bool {
        match self.compare {
            Some(ref fields) => fields.iter().any(|f| differs(current, previous, f.as_str())),
            None => object_keys(current)
                .chain(object_keys(previous))
                .any(|f| self.is_implicitly_compared(f) && differs(current, previous, f)),
        }
    }
}

fn key_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn field_value<'v>(record: &'v Value, field: &str) -> &'v Value {
    record.get(field).unwrap_or(&Value::Null)
}

fn differs(current: &Value, previous: &Value, field: &str) -> bool {
    field_value(current, field) != field_value(previous, field)
}

fn object_keys(record: &Value) -> impl Iterator<Item = &str> {
    record.as_object().into_iter().flat_map(|object| object.keys().map(String::as_str))
}

/// Reject the first element of `records` that is not a JSON object.
pub fn check_records(side: Side, records: &[Value]) -> Result<(), DiffError> {
    match records.iter().position(|r| !r.is_object()) {
        Some(position) => Err(DiffError::NotAnObject { side, position }),
        None => Ok(()),
    }
}

/// Validate `config`, check both inputs hold only objects, then reconcile.
pub fn reconcile_records<'a>(
    current: &'a [Value],
    baseline: &'a [Value],
    config: &RecordDiffConfig,
) -> Result<DiffResult<'a, Value>, DiffError> {
    config.validate()?;
    check_records(Side::Current, current)?;
    check_records(Side::Baseline, baseline)?;
    let comparator = RecordComparator::from_config(config);
    Ok(reconcile_with(current, baseline, &comparator))
}

/// Positional counterpart of [`reconcile_records`].
pub fn reconcile_records_indexed<'a>(
    current: &'a [Value],
    baseline: &'a [Value],
    config: &RecordDiffConfig,
) -> Result<IndexedDiffResult<'a, Value>, DiffError> {
    config.validate()?;
    check_records(Side::Current, current)?;
    check_records(Side::Baseline, baseline)?;
    let comparator = RecordComparator::from_config(config);
    Ok(reconcile_indexed_with(current, baseline, &comparator))
}
