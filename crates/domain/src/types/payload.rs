//! Dataset upload payload
//!
//! The upload endpoint expects dataset options and data merged into one
//! JSON object whose top-level keys are lower-cased. Nested keys keep their
//! own spelling.
//!
//! Key set, in order:
//!
//! | key                    | source                         |
//! |------------------------|--------------------------------|
//! | `groupid`              | options.group_id               |
//! | `datasetid`            | options.dataset_id             |
//! | `datasetname`          | options.dataset_name           |
//! | `datasettype`          | options.dataset_type           |
//! | `begin`                | options.begin (omitted if unset) |
//! | `end`                  | options.end (omitted if unset) |
//! | `primarydate`          | options.primary_date (omitted if unset) |
//! | `periods`              | options.periods (omitted if unset) |
//! | `dimensionfields`      | data dimension fields          |
//! | `datefields`           | data date fields               |
//! | `valuefields`          | data value fields              |
//! | `descriptionfields`    | data description fields        |
//! | `rows`                 | data rows                      |
//! | `dimensionhierarchies` | data hierarchies               |

use serde::Serialize;
use serde_json::{Map, Value};

use super::dataset::{
    DataSetData, DataSetOptions, DataSetPeriod, DataSetRow, DimensionField, DimensionHierarchy,
    FieldDefinition,
};
use crate::errors::Result;

/// Borrowed view of a dataset serialized in upload shape.
#[derive(Debug, Serialize)]
pub struct DataSetPayload<'a> {
    #[serde(rename = "groupid")]
    group_id: &'a str,
    #[serde(rename = "datasetid")]
    dataset_id: &'a str,
    #[serde(rename = "datasetname")]
    dataset_name: &'a str,
    #[serde(rename = "datasettype")]
    dataset_type: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    begin: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end: Option<&'a str>,
    #[serde(rename = "primarydate", skip_serializing_if = "Option::is_none")]
    primary_date: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    periods: Option<&'a [DataSetPeriod]>,
    #[serde(rename = "dimensionfields")]
    dimension_fields: &'a [DimensionField],
    #[serde(rename = "datefields")]
    date_fields: &'a [FieldDefinition],
    #[serde(rename = "valuefields")]
    value_fields: &'a [FieldDefinition],
    #[serde(rename = "descriptionfields")]
    description_fields: &'a [FieldDefinition],
    rows: &'a [DataSetRow],
    #[serde(rename = "dimensionhierarchies")]
    dimension_hierarchies: &'a [DimensionHierarchy],
}

impl<'a> DataSetPayload<'a> {
    pub fn new(options: &'a DataSetOptions, data: &'a DataSetData) -> Self {
        Self {
            group_id: &options.group_id,
            dataset_id: &options.dataset_id,
            dataset_name: &options.dataset_name,
            dataset_type: &options.dataset_type,
            begin: options.begin.as_deref(),
            end: options.end.as_deref(),
            primary_date: options.primary_date.as_deref(),
            periods: options.periods.as_deref(),
            dimension_fields: data.dimension_fields(),
            date_fields: data.date_fields(),
            value_fields: data.value_fields(),
            description_fields: data.description_fields(),
            rows: data.rows(),
            dimension_hierarchies: data.dimension_hierarchies(),
        }
    }

    /// # Errors
    /// [`FuusorError::Serialization`](crate::FuusorError::Serialization) if encoding fails.
    pub fn to_json(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// # Errors
    /// [`FuusorError::Serialization`](crate::FuusorError::Serialization) if encoding fails.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}

/// Lower-case the top-level keys of a JSON object; other values pass through.
///
/// Keys that collide after lower-casing keep the value of the key that sorts
/// last in the original object.
pub fn minimize_object_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key.to_lowercase(), value))
                .collect::<Map<String, Value>>(),
        ),
        other => other,
    }
}
