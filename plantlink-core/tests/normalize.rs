use plantlink_core::{
    Asset, AssetRecord, Device, DeviceRecord, Signal, SignalId, SignalRecord,
};
use serde_json::json;

fn device_from(value: serde_json::Value) -> Device {
    serde_json::from_value::<DeviceRecord>(value)
        .expect("record decodes")
        .into()
}

#[test]
fn pascal_and_camel_device_records_normalize_identically() {
    let pascal = device_from(json!({
        "DeviceId": 4,
        "DeviceName": "Pump-01",
        "Description": "Primary coolant pump",
    }));
    let camel = device_from(json!({
        "deviceId": 4,
        "deviceName": "Pump-01",
        "description": "Primary coolant pump",
    }));

    assert_eq!(pascal, camel);
    assert_eq!(pascal.id.0, 4);
    assert_eq!(pascal.name, "Pump-01");
}

#[test]
fn pascal_and_camel_asset_records_normalize_identically() {
    let pascal: Asset = serde_json::from_value::<AssetRecord>(json!({
        "AssetId": 2, "AssetName": "Tank A", "DeviceId": 7,
    }))
    .unwrap()
    .into();
    let camel: Asset = serde_json::from_value::<AssetRecord>(json!({
        "assetId": 2, "assetName": "Tank A", "deviceId": 7,
    }))
    .unwrap()
    .into();

    assert_eq!(pascal, camel);
    assert_eq!(pascal.device_id.0, 7);
}

#[test]
fn pascal_and_camel_signal_records_normalize_identically() {
    let pascal: Signal = serde_json::from_value::<SignalRecord>(json!({
        "SignalId": 9, "SignalTag": "Flow", "RegisterAddress": "HR-4001", "AssetId": 2,
    }))
    .unwrap()
    .into();
    let camel: Signal = serde_json::from_value::<SignalRecord>(json!({
        "signalId": 9, "signalTag": "Flow", "registerAddress": "HR-4001", "assetId": 2,
    }))
    .unwrap()
    .into();

    assert_eq!(pascal, camel);
    assert_eq!(pascal.id, SignalId(9));
}

#[test]
fn absent_fields_resolve_to_defaults_not_errors() {
    let device = device_from(json!({ "DeviceName": "Pump-01" }));
    assert_eq!(device.id.0, 0);
    assert_eq!(device.description, None);

    let device = device_from(json!({}));
    assert_eq!(device.name, "");
}

#[test]
fn unknown_keys_are_ignored() {
    let device = device_from(json!({
        "deviceId": 1,
        "deviceName": "Pump-01",
        "createdBy": "someone",
        "Revision": 3,
    }));
    assert_eq!(device.id.0, 1);
}
