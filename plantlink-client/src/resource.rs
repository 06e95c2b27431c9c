use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;

use plantlink_core::{
    Asset, AssetDraft, AssetId, AssetRecord, Device, DeviceDraft, DeviceId, DeviceRecord, Signal,
    SignalDraft, SignalId, SignalRecord,
};

/// Descriptor for one backend collection.
///
/// The client, the collection view, and the console commands are all generic
/// over this, so the three entity verticals share a single CRUD
/// implementation; an entity contributes only its types and its path.
pub trait Resource {
    /// Collection segment under the API base URL.
    const PATH: &'static str;
    /// Lower-case singular noun for user-facing messages.
    const NOUN: &'static str;

    type Id: Copy + Eq + From<u64> + fmt::Display + Send + Sync;
    /// Raw wire record, tolerant of either key casing.
    type Record: DeserializeOwned + Send;
    /// Canonical shape handed to views.
    type Entity: Clone + Send;
    /// Request payload for create and full-replace update.
    type Draft: Serialize + Sync;

    /// Map a raw wire record onto the canonical shape.
    fn normalize(record: Self::Record) -> Self::Entity;
    fn id(entity: &Self::Entity) -> Self::Id;
}

pub struct Devices;

impl Resource for Devices {
    const PATH: &'static str = "Device";
    const NOUN: &'static str = "device";

    type Id = DeviceId;
    type Record = DeviceRecord;
    type Entity = Device;
    type Draft = DeviceDraft;

    fn normalize(record: DeviceRecord) -> Device {
        record.into()
    }

    fn id(entity: &Device) -> DeviceId {
        entity.id
    }
}

pub struct Assets;

impl Resource for Assets {
    const PATH: &'static str = "Asset";
    const NOUN: &'static str = "asset";

    type Id = AssetId;
    type Record = AssetRecord;
    type Entity = Asset;
    type Draft = AssetDraft;

    fn normalize(record: AssetRecord) -> Asset {
        record.into()
    }

    fn id(entity: &Asset) -> AssetId {
        entity.id
    }
}

pub struct Signals;

impl Resource for Signals {
    // The backend names this collection after the measurement, not the
    // signal.
    const PATH: &'static str = "SignalMeasurement";
    const NOUN: &'static str = "signal";

    type Id = SignalId;
    type Record = SignalRecord;
    type Entity = Signal;
    type Draft = SignalDraft;

    fn normalize(record: SignalRecord) -> Signal {
        record.into()
    }

    fn id(entity: &Signal) -> SignalId {
        entity.id
    }
}
