//! Value types shared across services.

use serde::{Deserialize, Deserializer};

mod common;
mod identifiers;
mod query;
mod results;

pub use common::{
    Application, ByteUnits, ByteValueWithUnits, Date, Download, IdEntity, Image,
    LangDescription, NamedMultiValue, NamedValue, OptionalEntity, OptionalLong, OptionalString,
    PriorityType, SizeLimit, Time,
};
pub use identifiers::{DateTimeStamp, KId, UtcDateTime, UtcTime, Watermark};
pub use query::{
    CompareOperator, LogicalOperator, SearchQuery, SortDirection, SortOrder, SubCondition,
    UNLIMITED,
};
pub use results::{
    BatchResult, CreateResult, ItemError, LocalizableMessage, LocalizableMessageParameters,
    ManipulationError, Page, SetResult,
};
pub(crate) use results::{ErrorsResult, ListResult};

/// Reads an explicit `null` as the default value of the field type.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
