//! Dataset builder bound to an API client
//!
//! Wraps the pure [`DataSetData`] model with the client needed to upload it.

use fuusor_domain::constants::SCOPE_FILE_UPLOAD;
use fuusor_domain::{
    DataSetData, DataSetOptions, DataSetPayload, DataSetPeriod, DataSetRow, DimensionFieldItem,
    DimensionHierarchy, DimensionHierarchyItem, FieldKind, Result,
};
use serde_json::Value;
use tracing::{info, instrument};

use crate::api::FuusorApiClient;

/// Dataset under construction. Created by
/// [`FuusorApiClient::create_data_set`].
#[derive(Debug, Clone)]
pub struct DataSet {
    client: FuusorApiClient,
    options: DataSetOptions,
    data: DataSetData,
}

impl DataSet {
    /// Validate `options` and start an empty dataset.
    ///
    /// # Errors
    /// [`fuusor_domain::FuusorError::Config`] naming the missing or malformed
    /// option.
    pub fn new(client: FuusorApiClient, options: DataSetOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { client, options, data: DataSetData::new() })
    }

    pub fn options(&self) -> &DataSetOptions {
        &self.options
    }

    pub fn data(&self) -> &DataSetData {
        &self.data
    }

    /// Replace the reporting periods.
    ///
    /// # Errors
    /// [`fuusor_domain::FuusorError::Config`] quoting the malformed date.
    pub fn set_periods(&mut self, periods: Vec<DataSetPeriod>) -> Result<()> {
        self.options.set_periods(periods)
    }

    pub fn define_field(
        &mut self,
        kind: FieldKind,
        id: impl Into<String>,
        name: impl Into<String>,
        items: Vec<DimensionFieldItem>,
    ) {
        self.data.define_field(kind, id, name, items);
    }

    pub fn define_dimension_field(
        &mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        items: Vec<DimensionFieldItem>,
    ) {
        self.data.define_dimension_field(id, name, items);
    }

    pub fn define_date_field(&mut self, id: impl Into<String>, name: impl Into<String>) {
        self.data.define_date_field(id, name);
    }

    pub fn define_value_field(&mut self, id: impl Into<String>, name: impl Into<String>) {
        self.data.define_value_field(id, name);
    }

    pub fn define_description_field(&mut self, id: impl Into<String>, name: impl Into<String>) {
        self.data.define_description_field(id, name);
    }

    /// See [`DataSetData::define_dimension_hierarchy`].
    pub fn define_dimension_hierarchy(
        &mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        dimension_id: &str,
    ) -> Result<()> {
        self.data.define_dimension_hierarchy(id, name, dimension_id)
    }

    pub fn dimension_hierarchy(&self, id: &str) -> Option<&DimensionHierarchy> {
        self.data.dimension_hierarchy(id)
    }

    /// See [`DataSetData::push_dimension_hierarchy_item`].
    pub fn push_dimension_hierarchy_item(
        &mut self,
        hierarchy_id: &str,
        item: DimensionHierarchyItem,
    ) -> Result<()> {
        self.data.push_dimension_hierarchy_item(hierarchy_id, item)
    }

    /// See [`DataSetData::push_dimension_field_dimension`].
    pub fn push_dimension_field_dimension(
        &mut self,
        dimension_id: &str,
        item: DimensionFieldItem,
    ) -> Result<()> {
        self.data.push_dimension_field_dimension(dimension_id, item)
    }

    /// See [`DataSetData::add_row`].
    pub fn add_row(&mut self, row: Value) -> Result<()> {
        self.data.add_row(row)
    }

    /// See [`DataSetData::add_rows`].
    pub fn add_rows<I>(&mut self, rows: I) -> Result<()>
    where
        I: IntoIterator<Item = Value>,
    {
        self.data.add_rows(rows)
    }

    pub fn push_row(&mut self, row: DataSetRow) {
        self.data.push_row(row);
    }

    /// Re-check options and every row against the field registries.
    ///
    /// # Errors
    /// [`fuusor_domain::FuusorError::Config`] for options,
    /// [`fuusor_domain::FuusorError::Validation`] for rows.
    pub fn validate(&self) -> Result<()> {
        self.options.validate()?;
        self.data.validate()
    }

    /// Validate, then upload with a cached `fileupload` token.
    ///
    /// Nothing is sent if validation fails.
    ///
    /// # Errors
    /// Validation errors, token endpoint failures or the upload's
    /// [`fuusor_domain::FuusorError::Http`].
    #[instrument(
        skip(self),
        fields(dataset_id = %self.options.dataset_id, rows = self.data.rows().len())
    )]
    pub async fn save(&self) -> Result<()> {
        self.validate()?;

        let token = self.client.access_token(SCOPE_FILE_UPLOAD).await?;
        let payload = DataSetPayload::new(&self.options, &self.data);
        self.client.upload_data_set(&token, &payload).await?;

        info!("dataset saved");
        Ok(())
    }
}
