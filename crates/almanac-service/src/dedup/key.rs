//! Identity keys and the normalization rules behind them.

use std::fmt;

use serde::Serialize;

use almanac_core::types::DuplicateDetectionConfig;

use super::candidate::{DuplicateCandidate, FieldValue};

/// The value two records must share to be duplicates.
///
/// A UID key never equals a composite key, so a record matched through its
/// UID cannot collide with one matched through its fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum IdentityKey {
    Uid(String),
    /// Normalized values of the enabled fields; `None` for disabled or
    /// not applicable ones.
    Composite {
        name: Option<String>,
        email: Option<String>,
        phone: Option<String>,
    },
}

impl IdentityKey {
    /// ## Summary
    /// Computes the identity key of a record.
    ///
    /// A non-empty UID is decisive when `use_uid` is set. Otherwise every
    /// enabled field the record type supports must carry a usable value;
    /// a record missing one has no key and never collides.
    #[must_use]
    pub fn for_record<T: DuplicateCandidate + ?Sized>(
        record: &T,
        config: &DuplicateDetectionConfig,
    ) -> Option<Self> {
        if config.use_uid
            && let Some(uid) = record.uid().map(str::trim).filter(|uid| !uid.is_empty())
        {
            return Some(Self::Uid(uid.to_string()));
        }
        if !config.has_composite_fields() {
            return None;
        }

        let name = component(config.use_name, record.name(), normalize_name)?;
        let email = component(config.use_email, record.primary_email(), normalize_email)?;
        let phone = component(config.use_phone, record.phone(), normalize_phone)?;

        if name.is_none() && email.is_none() && phone.is_none() {
            return None;
        }
        Some(Self::Composite { name, email, phone })
    }
}

/// `Some(None)` when the field takes no part in matching, `None` when the
/// record lacks a value it needs.
#[expect(clippy::option_option)]
fn component(
    enabled: bool,
    value: FieldValue<'_>,
    normalize: fn(&str) -> String,
) -> Option<Option<String>> {
    if !enabled {
        return Some(None);
    }
    match value {
        FieldValue::NotApplicable => Some(None),
        FieldValue::Missing => None,
        FieldValue::Present(raw) => {
            let normalized = normalize(raw);
            (!normalized.is_empty()).then_some(Some(normalized))
        }
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uid(uid) => write!(f, "uid:{uid}"),
            Self::Composite { name, email, phone } => {
                let parts: Vec<String> = [("name", name), ("email", email), ("phone", phone)]
                    .into_iter()
                    .filter_map(|(label, value)| value.as_ref().map(|v| format!("{label}:{v}")))
                    .collect();
                f.write_str(&parts.join("|"))
            }
        }
    }
}

impl From<IdentityKey> for String {
    fn from(key: IdentityKey) -> Self {
        key.to_string()
    }
}

/// Lowercases and collapses runs of whitespace into single spaces.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Keeps only the digits.
#[must_use]
pub fn normalize_phone(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dedup::candidate::{DuplicateCheckContact, DuplicateCheckEvent};

    fn contact(uid: Option<&str>, name: &str, emails: &[&str], phones: &[&str]) -> DuplicateCheckContact {
        DuplicateCheckContact {
            id: "c".to_string(),
            uid: uid.map(str::to_string),
            name: name.to_string(),
            emails: emails.iter().map(ToString::to_string).collect(),
            phones: phones.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn normalization() {
        assert_eq!(normalize_name("  John\t  SMITH \n"), "john smith");
        assert_eq!(normalize_email(" John@Example.COM "), "john@example.com");
        assert_eq!(normalize_phone("+1 (555) 010-0199"), "15550100199");
    }

    #[test]
    fn uid_is_decisive() {
        let config = DuplicateDetectionConfig::default();
        let a = IdentityKey::for_record(&contact(Some("x"), "A", &[], &[]), &config);
        let b = IdentityKey::for_record(&contact(Some(" x "), "B", &["b@example.com"], &[]), &config);
        assert_eq!(a, Some(IdentityKey::Uid("x".to_string())));
        assert_eq!(a, b);
    }

    #[test]
    fn blank_uid_falls_back_to_fields() {
        let config = DuplicateDetectionConfig::default();
        let key = IdentityKey::for_record(&contact(Some("  "), "John  Smith", &["J@X.org"], &[]), &config);
        assert_eq!(key.unwrap().to_string(), "name:john smith|email:j@x.org");
    }

    #[test]
    fn ignored_uid_when_disabled() {
        let config = DuplicateDetectionConfig {
            use_uid: false,
            ..DuplicateDetectionConfig::default()
        };
        let key = IdentityKey::for_record(&contact(Some("x"), "A", &["a@example.com"], &[]), &config);
        assert!(matches!(key, Some(IdentityKey::Composite { .. })));
    }

    #[test]
    fn missing_enabled_field_means_no_key() {
        let config = DuplicateDetectionConfig::default();
        assert_eq!(IdentityKey::for_record(&contact(None, "John", &[], &[]), &config), None);
        assert_eq!(IdentityKey::for_record(&contact(None, " ", &["a@b.c"], &[]), &config), None);

        let phone_only = DuplicateDetectionConfig {
            use_uid: false,
            use_name: false,
            use_email: false,
            use_phone: true,
        };
        assert_eq!(
            IdentityKey::for_record(&contact(None, "John", &[], &["ext."]), &phone_only),
            None
        );
    }

    #[test]
    fn nothing_enabled_means_no_key() {
        let config = DuplicateDetectionConfig {
            use_uid: true,
            use_name: false,
            use_email: false,
            use_phone: false,
        };
        assert_eq!(IdentityKey::for_record(&contact(None, "John", &["j@x.org"], &[]), &config), None);
    }

    #[test]
    fn events_match_on_title_alone() {
        let event = DuplicateCheckEvent {
            id: "e".to_string(),
            uid: None,
            name: "Team  Standup".to_string(),
        };
        let key = IdentityKey::for_record(&event, &DuplicateDetectionConfig::default());
        assert_eq!(key.unwrap().to_string(), "name:team standup");
    }

    #[test]
    fn serializes_as_string() {
        let key = IdentityKey::Uid("abc".to_string());
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"uid:abc\"");
    }
}
