//! String-typed entity forms.
//!
//! A form holds field values exactly as a UI collects them (everything is a
//! string, numeric references included) and produces a request draft once the
//! full-form check passes. Per-field checks and the full-form check run the
//! same rules, so the two can never disagree.

use crate::fields::{Charset, FieldErrors, FieldRule, ReferenceRule, optional_text};
use crate::{AssetDraft, DeviceDraft, SignalDraft};

pub const DEVICE_NAME: FieldRule = FieldRule {
    name: "DeviceName",
    label: "Device name",
    required: true,
    min_len: 2,
    max_len: 100,
    charset: Charset::Name,
};

pub const DEVICE_DESCRIPTION: FieldRule = FieldRule {
    name: "Description",
    label: "Description",
    required: false,
    min_len: 0,
    max_len: 250,
    charset: Charset::Prose,
};

pub const ASSET_NAME: FieldRule = FieldRule {
    name: "AssetName",
    label: "Asset name",
    required: true,
    min_len: 2,
    max_len: 100,
    charset: Charset::Name,
};

pub const ASSET_DEVICE_ID: ReferenceRule = ReferenceRule {
    name: "DeviceId",
    label: "Device id",
};

pub const SIGNAL_TAG: FieldRule = FieldRule {
    name: "SignalTag",
    label: "Signal tag",
    required: true,
    min_len: 2,
    max_len: 100,
    charset: Charset::Name,
};

pub const SIGNAL_REGISTER_ADDRESS: FieldRule = FieldRule {
    name: "RegisterAddress",
    label: "Register address",
    required: true,
    min_len: 1,
    max_len: 50,
    charset: Charset::Address,
};

pub const SIGNAL_ASSET_ID: ReferenceRule = ReferenceRule {
    name: "AssetId",
    label: "Asset id",
};

/// Device create/edit form.
#[derive(Debug, Clone, Default)]
pub struct DeviceForm {
    pub name: String,
    pub description: String,
}

impl DeviceForm {
    /// Validate a single field by its backend name, as a change handler
    /// would. Unknown names validate clean.
    pub fn field_error(&self, field: &str) -> Option<String> {
        match field {
            "DeviceName" => DEVICE_NAME.check(optional_text(&self.name).as_deref()),
            "Description" => DEVICE_DESCRIPTION.check(optional_text(&self.description).as_deref()),
            _ => None,
        }
    }

    /// Full-form check: at most one error per field.
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        for rule in [DEVICE_NAME, DEVICE_DESCRIPTION] {
            if let Some(message) = self.field_error(rule.name) {
                errors.insert(rule.name.to_string(), message);
            }
        }
        errors
    }

    /// Convert into the request payload, gated on the full-form check.
    pub fn to_draft(&self) -> Result<DeviceDraft, FieldErrors> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(DeviceDraft {
            name: self.name.clone(),
            description: optional_text(&self.description),
        })
    }
}

/// Asset create/edit form. `device_id` is string-typed here and a number in
/// the payload.
#[derive(Debug, Clone, Default)]
pub struct AssetForm {
    pub name: String,
    pub device_id: String,
}

impl AssetForm {
    pub fn field_error(&self, field: &str) -> Option<String> {
        match field {
            "AssetName" => ASSET_NAME.check(optional_text(&self.name).as_deref()),
            "DeviceId" => ASSET_DEVICE_ID.check(&self.device_id).err(),
            _ => None,
        }
    }

    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        for name in [ASSET_NAME.name, ASSET_DEVICE_ID.name] {
            if let Some(message) = self.field_error(name) {
                errors.insert(name.to_string(), message);
            }
        }
        errors
    }

    pub fn to_draft(&self) -> Result<AssetDraft, FieldErrors> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(errors);
        }
        // validate() already proved the reference parses
        let device_id = ASSET_DEVICE_ID
            .check(&self.device_id)
            .expect("reference validated");
        Ok(AssetDraft {
            name: self.name.clone(),
            device_id,
        })
    }
}

/// Signal create/edit form. `asset_id` is string-typed here and a number in
/// the payload.
#[derive(Debug, Clone, Default)]
pub struct SignalForm {
    pub tag: String,
    pub register_address: String,
    pub asset_id: String,
}

impl SignalForm {
    pub fn field_error(&self, field: &str) -> Option<String> {
        match field {
            "SignalTag" => SIGNAL_TAG.check(optional_text(&self.tag).as_deref()),
            "RegisterAddress" => {
                SIGNAL_REGISTER_ADDRESS.check(optional_text(&self.register_address).as_deref())
            }
            "AssetId" => SIGNAL_ASSET_ID.check(&self.asset_id).err(),
            _ => None,
        }
    }

    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        for name in [
            SIGNAL_TAG.name,
            SIGNAL_REGISTER_ADDRESS.name,
            SIGNAL_ASSET_ID.name,
        ] {
            if let Some(message) = self.field_error(name) {
                errors.insert(name.to_string(), message);
            }
        }
        errors
    }

    pub fn to_draft(&self) -> Result<SignalDraft, FieldErrors> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(errors);
        }
        let asset_id = SIGNAL_ASSET_ID
            .check(&self.asset_id)
            .expect("reference validated");
        Ok(SignalDraft {
            tag: self.tag.clone(),
            register_address: self.register_address.clone(),
            asset_id,
        })
    }
}
