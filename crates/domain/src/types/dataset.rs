//! Dataset model
//!
//! A dataset is the unit of tabular data uploaded to Fuusor: a set of typed
//! field registries (dimension, date, value, description), optional dimension
//! hierarchies for drill-down, and the rows themselves.
//!
//! Registries are append-only. Rows are type-checked on insertion (every
//! value is a string, number or null) and cross-checked against the field
//! registries by [`DataSetData::validate`].

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use fuusor_common::validation::is_valid_date;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::errors::{FuusorError, Result};
use crate::impl_wire_enum_conversions;

// ============================================================================
// Options
// ============================================================================

/// Reporting period (e.g. a financial year).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSetPeriod {
    pub begin: String,
    pub end: String,
}

impl DataSetPeriod {
    pub fn new(begin: impl Into<String>, end: impl Into<String>) -> Self {
        Self { begin: begin.into(), end: end.into() }
    }

    /// Both dates must be `YYYY-MM-DD`.
    ///
    /// # Errors
    /// [`FuusorError::Config`] quoting the malformed date.
    pub fn validate(&self) -> Result<()> {
        if !is_valid_date(&self.begin) {
            return Err(FuusorError::Config(format!(
                "Incorrect period.begin format: \"{}\", use YYYY-MM-DD",
                self.begin
            )));
        }

        if !is_valid_date(&self.end) {
            return Err(FuusorError::Config(format!(
                "Incorrect period.end format: \"{}\", use YYYY-MM-DD",
                self.end
            )));
        }

        Ok(())
    }
}

/// Identity and time frame of a dataset.
///
/// Setting `begin`/`end` together with `primary_date` replaces existing
/// Fuusor data in that time frame. `periods` overrides the default
/// January–December financial year.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSetOptions {
    /// Company id from Fuusor settings.
    pub group_id: String,
    /// Dataset identifier; uploading again with the same id updates it.
    pub dataset_id: String,
    pub dataset_name: String,
    /// Dataset type, simple naming such as "Invoices".
    pub dataset_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub begin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    /// Field id holding the primary date of each row.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub periods: Option<Vec<DataSetPeriod>>,
}

impl DataSetOptions {
    pub fn new(
        group_id: impl Into<String>,
        dataset_id: impl Into<String>,
        dataset_name: impl Into<String>,
        dataset_type: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            dataset_id: dataset_id.into(),
            dataset_name: dataset_name.into(),
            dataset_type: dataset_type.into(),
            ..Self::default()
        }
    }

    /// Restrict the upload to `begin..=end`, keyed on `primary_date`.
    pub fn with_range(
        mut self,
        begin: impl Into<String>,
        end: impl Into<String>,
        primary_date: impl Into<String>,
    ) -> Self {
        self.begin = Some(begin.into());
        self.end = Some(end.into());
        self.primary_date = Some(primary_date.into());
        self
    }

    pub fn with_periods(mut self, periods: Vec<DataSetPeriod>) -> Self {
        self.periods = Some(periods);
        self
    }

    /// Replace the reporting periods. Existing periods are kept if any of
    /// the new ones is malformed.
    ///
    /// # Errors
    /// [`FuusorError::Config`] quoting the malformed date.
    pub fn set_periods(&mut self, periods: Vec<DataSetPeriod>) -> Result<()> {
        periods.iter().try_for_each(DataSetPeriod::validate)?;
        self.periods = Some(periods);
        Ok(())
    }

    /// Check required options, the begin/end pairing and date formats.
    ///
    /// Empty strings count as absent.
    ///
    /// # Errors
    /// [`FuusorError::Config`] naming the missing or malformed option.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("group_id", &self.group_id),
            ("dataset_id", &self.dataset_id),
            ("dataset_name", &self.dataset_name),
            ("dataset_type", &self.dataset_type),
        ];
        if let Some((name, _)) = required.iter().find(|(_, value)| value.is_empty()) {
            return Err(FuusorError::Config(format!("Missing options.{name}")));
        }

        match (present(&self.begin), present(&self.end)) {
            (Some(_), None) => {
                return Err(FuusorError::Config(
                    "Missing options.end although options.begin is set".to_string(),
                ));
            }
            (None, Some(_)) => {
                return Err(FuusorError::Config(
                    "Missing options.begin although options.end is set".to_string(),
                ));
            }
            (Some(begin), Some(end)) => {
                if !is_valid_date(begin) {
                    return Err(FuusorError::Config(
                        "Incorrect options.begin format, use YYYY-MM-DD".to_string(),
                    ));
                }
                if !is_valid_date(end) {
                    return Err(FuusorError::Config(
                        "Incorrect options.end format, use YYYY-MM-DD".to_string(),
                    ));
                }
                if present(&self.primary_date).is_none() {
                    return Err(FuusorError::Config(
                        "Missing options.primary_date (required when begin and end are set)"
                            .to_string(),
                    ));
                }
            }
            (None, None) => {}
        }

        if let Some(periods) = &self.periods {
            periods.iter().try_for_each(DataSetPeriod::validate)?;
        }

        Ok(())
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

// ============================================================================
// Fields and hierarchies
// ============================================================================

/// Role of a field in the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Categorical field, used as an automatic filter in reports.
    Dimension,
    /// `YYYY-MM-DD` date or null.
    Date,
    /// Number or null.
    Value,
    /// Free text.
    Description,
}

impl_wire_enum_conversions!(FieldKind {
    Dimension => "dimension",
    Date => "date",
    Value => "value",
    Description => "description",
});

/// Identifier of a dimension item: the API accepts strings and numbers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Number(Number),
    Text(String),
}

impl ItemId {
    /// An empty string id counts as missing.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Text(text) if text.is_empty())
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) => write!(f, "{number}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for ItemId {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<i32> for ItemId {
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

impl From<u64> for ItemId {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

/// Selectable item of a dimension field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionFieldItem {
    pub id: ItemId,
    pub name: String,
}

impl DimensionFieldItem {
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into() }
    }
}

/// Dimension field with its known items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionField {
    pub id: String,
    pub name: String,
    pub items: Vec<DimensionFieldItem>,
}

/// Date, value or description field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub id: String,
    pub name: String,
}

/// Node of a dimension hierarchy tree.
///
/// `items` lists the dimension item ids grouped under this node; `children`
/// nests further nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionHierarchyItem {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<ItemId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<DimensionHierarchyItem>>,
}

impl DimensionHierarchyItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into(), items: None, children: None }
    }

    pub fn with_items<I, T>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ItemId>,
    {
        self.items = Some(items.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_child(mut self, child: DimensionHierarchyItem) -> Self {
        self.children.get_or_insert_with(Vec::new).push(child);
        self
    }
}

/// Named tree over one dimension field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionHierarchy {
    pub id: String,
    pub name: String,
    #[serde(rename = "dimensionid")]
    pub dimension_id: String,
    pub items: Vec<DimensionHierarchyItem>,
}

// ============================================================================
// Rows
// ============================================================================

/// Cell value: string, number or null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowValue {
    Null,
    Number(Number),
    Text(String),
}

impl RowValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(number) => number.as_f64(),
            _ => None,
        }
    }
}

impl fmt::Display for RowValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Number(number) => write!(f, "{number}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl TryFrom<Value> for RowValue {
    type Error = Value;

    fn try_from(value: Value) -> std::result::Result<Self, Self::Error> {
        match value {
            Value::Null => Ok(Self::Null),
            Value::Number(number) => Ok(Self::Number(number)),
            Value::String(text) => Ok(Self::Text(text)),
            other => Err(other),
        }
    }
}

impl From<&str> for RowValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RowValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for RowValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<i32> for RowValue {
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

impl From<u64> for RowValue {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

/// Non-finite floats have no JSON representation and become null.
impl From<f64> for RowValue {
    fn from(value: f64) -> Self {
        Number::from_f64(value).map_or(Self::Null, Self::Number)
    }
}

impl<T: Into<RowValue>> From<Option<T>> for RowValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// One data row: field id → value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataSetRow(BTreeMap<String, RowValue>);

impl DataSetRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<RowValue>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<RowValue>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&RowValue> {
        self.0.get(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RowValue)> {
        self.0.iter().map(|(field, value)| (field.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for DataSetRow
where
    K: Into<String>,
    V: Into<RowValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(field, value)| (field.into(), value.into())).collect())
    }
}

/// Accepts a JSON object whose values are strings, numbers or null.
impl TryFrom<Value> for DataSetRow {
    type Error = FuusorError;

    fn try_from(value: Value) -> Result<Self> {
        let map = match value {
            Value::Object(map) => map,
            other => {
                return Err(FuusorError::Validation(format!(
                    "Data set row must be a JSON object, got: {other}"
                )));
            }
        };

        map.into_iter()
            .map(|(field, value)| match RowValue::try_from(value) {
                Ok(value) => Ok((field, value)),
                Err(value) => Err(FuusorError::Validation(format!(
                    "Incorrect row value for {field}: {value}"
                ))),
            })
            .collect::<Result<BTreeMap<_, _>>>()
            .map(Self)
    }
}

// ============================================================================
// Accumulated data
// ============================================================================

/// Field registries, hierarchies and rows of a dataset, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSetData {
    dimension_fields: Vec<DimensionField>,
    date_fields: Vec<FieldDefinition>,
    value_fields: Vec<FieldDefinition>,
    description_fields: Vec<FieldDefinition>,
    rows: Vec<DataSetRow>,
    dimension_hierarchies: Vec<DimensionHierarchy>,
}

impl DataSetData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a field of the given kind. `items` only applies to
    /// dimension fields and is ignored otherwise.
    pub fn define_field(
        &mut self,
        kind: FieldKind,
        id: impl Into<String>,
        name: impl Into<String>,
        items: Vec<DimensionFieldItem>,
    ) {
        match kind {
            FieldKind::Dimension => self.define_dimension_field(id, name, items),
            FieldKind::Date => self.define_date_field(id, name),
            FieldKind::Value => self.define_value_field(id, name),
            FieldKind::Description => self.define_description_field(id, name),
        }
    }

    pub fn define_dimension_field(
        &mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        items: Vec<DimensionFieldItem>,
    ) {
        self.dimension_fields.push(DimensionField { id: id.into(), name: name.into(), items });
    }

    pub fn define_date_field(&mut self, id: impl Into<String>, name: impl Into<String>) {
        self.date_fields.push(FieldDefinition { id: id.into(), name: name.into() });
    }

    pub fn define_value_field(&mut self, id: impl Into<String>, name: impl Into<String>) {
        self.value_fields.push(FieldDefinition { id: id.into(), name: name.into() });
    }

    pub fn define_description_field(&mut self, id: impl Into<String>, name: impl Into<String>) {
        self.description_fields.push(FieldDefinition { id: id.into(), name: name.into() });
    }

    /// Add an empty hierarchy over an already defined dimension field.
    ///
    /// # Errors
    /// [`FuusorError::NotFound`] if `dimension_id` is not a defined dimension.
    pub fn define_dimension_hierarchy(
        &mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        dimension_id: &str,
    ) -> Result<()> {
        if self.dimension_field(dimension_id).is_none() {
            return Err(FuusorError::NotFound(format!("Unknown dimension id: {dimension_id}")));
        }

        self.dimension_hierarchies.push(DimensionHierarchy {
            id: id.into(),
            name: name.into(),
            dimension_id: dimension_id.to_string(),
            items: Vec::new(),
        });

        Ok(())
    }

    /// Append a top-level node to a hierarchy.
    ///
    /// # Errors
    /// - [`FuusorError::NotFound`] if the hierarchy is unknown
    /// - [`FuusorError::Validation`] if the item lacks id or name
    pub fn push_dimension_hierarchy_item(
        &mut self,
        hierarchy_id: &str,
        item: DimensionHierarchyItem,
    ) -> Result<()> {
        let hierarchy = self
            .dimension_hierarchies
            .iter_mut()
            .find(|hierarchy| hierarchy.id == hierarchy_id)
            .ok_or_else(|| FuusorError::NotFound(format!("Unknown hierarchy id: {hierarchy_id}")))?;

        if item.id.is_empty() || item.name.is_empty() {
            return Err(FuusorError::Validation(format!(
                "Missing required properties for dimension hierarchy item (id: {}, name: {})",
                item.id, item.name
            )));
        }

        hierarchy.items.push(item);
        Ok(())
    }

    /// Append an item to a dimension field.
    ///
    /// # Errors
    /// - [`FuusorError::Validation`] if the item lacks id or name
    /// - [`FuusorError::NotFound`] if the dimension is unknown
    pub fn push_dimension_field_dimension(
        &mut self,
        dimension_id: &str,
        item: DimensionFieldItem,
    ) -> Result<()> {
        if item.id.is_empty() || item.name.is_empty() {
            return Err(FuusorError::Validation(format!(
                "Missing required properties for dimension item (id: {}, name: {})",
                item.id, item.name
            )));
        }

        let dimension = self
            .dimension_fields
            .iter_mut()
            .find(|dimension| dimension.id == dimension_id)
            .ok_or_else(|| FuusorError::NotFound(format!("Unknown dimension id: {dimension_id}")))?;

        dimension.items.push(item);
        Ok(())
    }

    /// Append a row given as a JSON object.
    ///
    /// Only the value types are checked here; field-specific rules are
    /// applied by [`DataSetData::validate`].
    ///
    /// # Errors
    /// [`FuusorError::Validation`] for non-object rows or values that are not
    /// string, number or null. Nothing is appended on error.
    pub fn add_row(&mut self, row: Value) -> Result<()> {
        let row = DataSetRow::try_from(row)?;
        self.rows.push(row);
        Ok(())
    }

    /// Append rows in order, stopping at the first invalid one. Rows before
    /// the invalid one stay appended.
    ///
    /// # Errors
    /// See [`DataSetData::add_row`].
    pub fn add_rows<I>(&mut self, rows: I) -> Result<()>
    where
        I: IntoIterator<Item = Value>,
    {
        rows.into_iter().try_for_each(|row| self.add_row(row))
    }

    /// Append an already typed row.
    pub fn push_row(&mut self, row: DataSetRow) {
        self.rows.push(row);
    }

    /// Cross-check every row against the field registries: value fields hold
    /// numbers or null, date fields hold `YYYY-MM-DD` strings or null.
    ///
    /// # Errors
    /// [`FuusorError::Validation`] citing the first offending field and value.
    pub fn validate(&self) -> Result<()> {
        let value_fields: HashSet<&str> =
            self.value_fields.iter().map(|field| field.id.as_str()).collect();
        let date_fields: HashSet<&str> =
            self.date_fields.iter().map(|field| field.id.as_str()).collect();

        for row in &self.rows {
            for (field, value) in row.iter() {
                if value_fields.contains(field) {
                    if !matches!(value, RowValue::Number(_) | RowValue::Null) {
                        return Err(FuusorError::Validation(format!(
                            "Value field expecting number or null. \
                             Incorrect row value for {field}: {value}"
                        )));
                    }
                } else if date_fields.contains(field) {
                    let valid = match value {
                        RowValue::Null => true,
                        RowValue::Text(text) => is_valid_date(text),
                        RowValue::Number(number) => is_valid_date(&number.to_string()),
                    };
                    if !valid {
                        return Err(FuusorError::Validation(format!(
                            "Date field expecting YYYY-MM-DD formatted value or null. \
                             Incorrect row value for {field}: {value}"
                        )));
                    }
                }
            }
        }

        Ok(())
    }

    pub fn dimension_field(&self, id: &str) -> Option<&DimensionField> {
        self.dimension_fields.iter().find(|field| field.id == id)
    }

    pub fn dimension_hierarchy(&self, id: &str) -> Option<&DimensionHierarchy> {
        self.dimension_hierarchies.iter().find(|hierarchy| hierarchy.id == id)
    }

    pub fn dimension_fields(&self) -> &[DimensionField] {
        &self.dimension_fields
    }

    pub fn date_fields(&self) -> &[FieldDefinition] {
        &self.date_fields
    }

    pub fn value_fields(&self) -> &[FieldDefinition] {
        &self.value_fields
    }

    pub fn description_fields(&self) -> &[FieldDefinition] {
        &self.description_fields
    }

    pub fn dimension_hierarchies(&self) -> &[DimensionHierarchy] {
        &self.dimension_hierarchies
    }

    pub fn rows(&self) -> &[DataSetRow] {
        &self.rows
    }
}
