//! Declarative field validation.
//!
//! Each entity form is driven by a table of [`FieldRule`]s instead of
//! hand-written per-field control flow. The rules mirror the constraints the
//! backend is known to enforce, so a form that passes here is expected to
//! pass server-side validation too.

use std::collections::BTreeMap;

/// Field errors keyed by the backend's field name (`DeviceName`, `DeviceId`,
/// ...). Backend validation errors use the same keys, so client- and
/// server-reported errors merge into one map.
pub type FieldErrors = BTreeMap<String, String>;

/// Allowed character class for a text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    /// Letters, digits, hyphen, underscore, whitespace.
    Name,
    /// Letters, digits, dot, comma, hyphen, underscore, whitespace.
    Prose,
    /// Letters, digits, hyphen, underscore. No whitespace.
    Address,
}

impl Charset {
    pub fn allows(self, c: char) -> bool {
        if c.is_ascii_alphanumeric() {
            return true;
        }
        match self {
            Charset::Name => matches!(c, '-' | '_') || c.is_ascii_whitespace(),
            Charset::Prose => matches!(c, '.' | ',' | '-' | '_') || c.is_ascii_whitespace(),
            Charset::Address => matches!(c, '-' | '_'),
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Charset::Name => "letters, digits, hyphens, underscores, and spaces",
            Charset::Prose => {
                "letters, digits, spaces, dots, commas, hyphens, and underscores"
            }
            Charset::Address => "letters, digits, hyphens, and underscores",
        }
    }
}

/// Validation rule for one text field.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    /// Backend field name; also the error key.
    pub name: &'static str,
    /// Human label used in error messages.
    pub label: &'static str,
    pub required: bool,
    pub min_len: usize,
    pub max_len: usize,
    pub charset: Charset,
}

impl FieldRule {
    /// Check one value against this rule, returning at most one error.
    ///
    /// `None` means the field was left blank (empty or whitespace-only input
    /// collapsed by [`optional_text`]); that is an error only for required
    /// fields.
    pub fn check(&self, value: Option<&str>) -> Option<String> {
        let Some(value) = value else {
            return self
                .required
                .then(|| format!("{} is required.", self.label));
        };

        let len = value.chars().count();
        if len < self.min_len || len > self.max_len {
            if self.min_len >= 2 {
                return Some(format!(
                    "{} must be between {} and {} characters.",
                    self.label, self.min_len, self.max_len
                ));
            }
            return Some(format!(
                "{} cannot exceed {} characters.",
                self.label, self.max_len
            ));
        }

        if !value.chars().all(|c| self.charset.allows(c)) {
            return Some(format!(
                "{} may only contain {}.",
                self.label,
                self.charset.describe()
            ));
        }

        None
    }
}

/// Validation rule for a string-typed numeric reference field (`DeviceId`,
/// `AssetId`). The UI collects these as text; payloads carry numbers.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceRule {
    /// Backend field name; also the error key.
    pub name: &'static str,
    /// Human label used in error messages.
    pub label: &'static str,
}

impl ReferenceRule {
    /// Parse a reference as a positive integer.
    pub fn check(&self, raw: &str) -> Result<u64, String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(format!("{} is required.", self.label));
        }
        match trimmed.parse::<u64>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(format!("{} must be a positive integer.", self.label)),
        }
    }
}

/// Collapse empty or whitespace-only input to `None`, matching the backend's
/// optional-field contract: an absent value, not an empty string.
pub fn optional_text(raw: &str) -> Option<String> {
    if raw.trim().is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAME: FieldRule = FieldRule {
        name: "DeviceName",
        label: "Device name",
        required: true,
        min_len: 2,
        max_len: 100,
        charset: Charset::Name,
    };

    #[test]
    fn blank_required_field_is_an_error() {
        assert_eq!(NAME.check(None), Some("Device name is required.".into()));
    }

    #[test]
    fn length_bounds_are_inclusive() {
        assert!(NAME.check(Some("ab")).is_none());
        assert!(NAME.check(Some("a")).is_some());
        assert!(NAME.check(Some(&"a".repeat(100))).is_none());
        assert!(NAME.check(Some(&"a".repeat(101))).is_some());
    }

    #[test]
    fn charset_rejects_punctuation_outside_the_class() {
        assert!(NAME.check(Some("Pump-01 A_B")).is_none());
        assert!(NAME.check(Some("Pump!01")).is_some());
        assert!(Charset::Prose.allows('.'));
        assert!(!Charset::Address.allows(' '));
    }

    #[test]
    fn optional_text_collapses_whitespace() {
        assert_eq!(optional_text("   "), None);
        assert_eq!(optional_text(""), None);
        assert_eq!(optional_text(" x "), Some(" x ".to_string()));
    }

    #[test]
    fn reference_rejects_non_positive_values() {
        let rule = ReferenceRule {
            name: "DeviceId",
            label: "Device id",
        };
        assert_eq!(rule.check("7"), Ok(7));
        assert_eq!(rule.check(" 7 "), Ok(7));
        assert!(rule.check("").is_err());
        assert!(rule.check("0").is_err());
        assert!(rule.check("-3").is_err());
        assert!(rule.check("7.5").is_err());
        assert!(rule.check("abc").is_err());
    }
}
