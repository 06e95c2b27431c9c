use serde::{Deserialize, Serialize};

pub mod fields;
pub mod forms;

pub use fields::{Charset, FieldErrors, FieldRule, ReferenceRule, optional_text};
pub use forms::{AssetForm, DeviceForm, SignalForm};

/// Unique identifier for a device. Assigned by the backend; the client never
/// generates identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceId(pub u64);

/// Unique identifier for an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetId(pub u64);

/// Unique identifier for a signal measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignalId(pub u64);

macro_rules! impl_id_conversions {
    ($($id:ident),*) => {
        $(
            impl From<u64> for $id {
                fn from(raw: u64) -> Self {
                    Self(raw)
                }
            }

            impl std::fmt::Display for $id {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    write!(f, "{}", self.0)
                }
            }
        )*
    };
}

impl_id_conversions!(DeviceId, AssetId, SignalId);

/// A registered device, in the canonical shape used by every view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    pub id: DeviceId,
    pub name: String,
    pub description: Option<String>,
}

/// An asset attached to a device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub id: AssetId,
    pub name: String,
    /// Owning device. Opaque reference; no client-side integrity check.
    pub device_id: DeviceId,
}

/// A signal measurement point on an asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signal {
    pub id: SignalId,
    pub tag: String,
    pub register_address: String,
    /// Owning asset. Opaque reference; no client-side integrity check.
    pub asset_id: AssetId,
}

// Raw wire records.
//
// The backend is inconsistent about key casing: both `DeviceId` and
// `deviceId` are observed in responses. Every field therefore carries aliases
// for both conventions and decodes defensively, with absent fields resolving
// to defaults instead of a decode error. These shapes never leave the API
// boundary; views only see the canonical types above.

/// Raw device record as returned by the backend.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DeviceRecord {
    #[serde(alias = "deviceId", alias = "DeviceId")]
    pub device_id: u64,
    #[serde(alias = "deviceName", alias = "DeviceName")]
    pub device_name: String,
    #[serde(alias = "description", alias = "Description")]
    pub description: Option<String>,
}

impl From<DeviceRecord> for Device {
    fn from(raw: DeviceRecord) -> Self {
        Self {
            id: DeviceId(raw.device_id),
            name: raw.device_name,
            description: raw.description,
        }
    }
}

/// Raw asset record as returned by the backend.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AssetRecord {
    #[serde(alias = "assetId", alias = "AssetId")]
    pub asset_id: u64,
    #[serde(alias = "assetName", alias = "AssetName")]
    pub asset_name: String,
    #[serde(alias = "deviceId", alias = "DeviceId")]
    pub device_id: u64,
}

impl From<AssetRecord> for Asset {
    fn from(raw: AssetRecord) -> Self {
        Self {
            id: AssetId(raw.asset_id),
            name: raw.asset_name,
            device_id: DeviceId(raw.device_id),
        }
    }
}

/// Raw signal record as returned by the backend.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SignalRecord {
    #[serde(alias = "signalId", alias = "SignalId")]
    pub signal_id: u64,
    #[serde(alias = "signalTag", alias = "SignalTag")]
    pub signal_tag: String,
    #[serde(alias = "registerAddress", alias = "RegisterAddress")]
    pub register_address: String,
    #[serde(alias = "assetId", alias = "AssetId")]
    pub asset_id: u64,
}

impl From<SignalRecord> for Signal {
    fn from(raw: SignalRecord) -> Self {
        Self {
            id: SignalId(raw.signal_id),
            tag: raw.signal_tag,
            register_address: raw.register_address,
            asset_id: AssetId(raw.asset_id),
        }
    }
}

// Request drafts.
//
// Payloads use the backend's PascalCase key convention. Optional text fields
// serialize as an explicit `null` when absent, and numeric references are
// JSON numbers, never strings.

/// Create/update payload for a device.
#[derive(Debug, Clone, Serialize)]
pub struct DeviceDraft {
    #[serde(rename = "DeviceName")]
    pub name: String,
    #[serde(rename = "Description")]
    pub description: Option<String>,
}

/// Create/update payload for an asset.
#[derive(Debug, Clone, Serialize)]
pub struct AssetDraft {
    #[serde(rename = "AssetName")]
    pub name: String,
    #[serde(rename = "DeviceId")]
    pub device_id: u64,
}

/// Create/update payload for a signal measurement.
#[derive(Debug, Clone, Serialize)]
pub struct SignalDraft {
    #[serde(rename = "SignalTag")]
    pub tag: String,
    #[serde(rename = "RegisterAddress")]
    pub register_address: String,
    #[serde(rename = "AssetId")]
    pub asset_id: u64,
}
