//! Small value types shared by several services.

use serde::{Deserialize, Serialize};

use super::identifiers::KId;

/// Name-value pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamedValue {
    /// Name.
    pub name: String,
    /// Value.
    pub value: String,
}

/// Name with several values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamedMultiValue {
    /// Name.
    pub name: String,
    /// Values.
    pub value: Vec<String>,
}

/// Id and display name of an entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdEntity {
    /// Entity id.
    pub id: KId,
    /// Display name.
    pub name: String,
}

/// A user interface language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LangDescription {
    /// Language name in its own form.
    pub name: String,
    /// Language code, e.g. `en-gb`.
    pub code: String,
    /// Short code naming the language file, e.g. `en`.
    pub short_code: String,
}

/// Download descriptor for a file prepared by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Download {
    /// Download URL.
    pub url: String,
    /// File name.
    pub name: String,
    /// File size in bytes.
    pub length: i64,
}

/// Uploaded image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Image {
    /// URL to fetch the image.
    pub url: String,
    /// Image id.
    pub id: String,
}

/// Item priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriorityType {
    /// Normal priority.
    #[default]
    Normal,
    /// Low priority.
    Low,
    /// High priority.
    High,
    /// Value not known to this client.
    #[serde(other)]
    Unknown,
}

/// Client application descriptor sent on login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Application {
    /// Application name.
    pub name: String,
    /// Vendor name.
    pub vendor: String,
    /// Application version.
    pub version: String,
}

impl Application {
    const DEFAULT_NAME: &'static str = "TempApp";
    const DEFAULT_VENDOR: &'static str = "TempVendor";
    const DEFAULT_VERSION: &'static str = "v1.0.1";

    /// Creates a descriptor. Empty fields fall back to placeholder values.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        vendor: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        fn or_default(value: String, default: &str) -> String {
            if value.is_empty() {
                default.to_string()
            } else {
                value
            }
        }

        Self {
            name: or_default(name.into(), Self::DEFAULT_NAME),
            vendor: or_default(vendor.into(), Self::DEFAULT_VENDOR),
            version: or_default(version.into(), Self::DEFAULT_VERSION),
        }
    }
}

impl Default for Application {
    fn default() -> Self {
        Self::new("", "", "")
    }
}

/// String that may be switched off.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionalString {
    /// Whether the value applies.
    pub enabled: bool,
    /// Value.
    pub value: String,
}

/// Number that may be switched off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionalLong {
    /// Whether the value applies.
    pub enabled: bool,
    /// Value.
    pub value: i64,
}

/// Entity reference that may be switched off.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionalEntity {
    /// Whether the value applies.
    pub enabled: bool,
    /// Entity id.
    pub id: KId,
    /// Entity name.
    pub name: String,
}

/// Time of day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Time {
    /// 0-23.
    pub hour: i32,
    /// 0-59.
    pub min: i32,
}

/// Calendar date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Date {
    /// Year.
    pub year: i32,
    /// Month, 0-11.
    pub month: i32,
    /// Day of month, 1-31.
    pub day: i32,
}

/// Unit of a byte quantity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ByteUnits {
    /// Bytes.
    #[default]
    Bytes,
    /// KiB.
    KiloBytes,
    /// MiB.
    MegaBytes,
    /// GiB.
    GigaBytes,
    /// TiB.
    TeraBytes,
    /// PiB.
    PetaBytes,
    /// Value not known to this client.
    #[serde(other)]
    Unknown,
}

impl ByteUnits {
    /// Returns the number of bytes in one unit. Unknown units count as bytes.
    #[must_use]
    pub const fn multiplier(self) -> u64 {
        match self {
            Self::Bytes | Self::Unknown => 1,
            Self::KiloBytes => 1 << 10,
            Self::MegaBytes => 1 << 20,
            Self::GigaBytes => 1 << 30,
            Self::TeraBytes => 1 << 40,
            Self::PetaBytes => 1 << 50,
        }
    }
}

/// Byte quantity with unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ByteValueWithUnits {
    /// Amount.
    pub value: i64,
    /// Unit.
    pub units: ByteUnits,
}

impl ByteValueWithUnits {
    /// Returns the quantity in bytes, saturating on overflow.
    #[must_use]
    pub fn to_bytes(self) -> u64 {
        u64::try_from(self.value)
            .unwrap_or(0)
            .saturating_mul(self.units.multiplier())
    }
}

/// Size limit that may be switched off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SizeLimit {
    /// Whether the limit applies.
    pub is_active: bool,
    /// Limit.
    pub limit: ByteValueWithUnits,
}
