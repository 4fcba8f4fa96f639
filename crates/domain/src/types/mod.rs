//! Domain types and models

pub mod dataset;
pub mod payload;
pub mod user;

pub use dataset::{
    DataSetData, DataSetOptions, DataSetPeriod, DataSetRow, DimensionField, DimensionFieldItem,
    DimensionHierarchy, DimensionHierarchyItem, FieldDefinition, FieldKind, ItemId, RowValue,
};
pub use payload::{minimize_object_keys, DataSetPayload};
pub use user::{AuthenticationType, CreateUserOutcome, Language, User, UserGroup};
