//! Generator settings shared by the iCalendar and vCard writers.

use almanac_core::config::CodecConfig;
use almanac_core::constants::{DEFAULT_UID_DOMAIN, PRODUCT_ID};

use crate::error::RfcResult;

/// Values stamped into generated documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// `PRODID` property value.
    pub product_id: String,
    /// Domain used for generated `<uuid>@<domain>` UIDs.
    pub uid_domain: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            product_id: PRODUCT_ID.to_string(),
            uid_domain: DEFAULT_UID_DOMAIN.to_string(),
        }
    }
}

impl GeneratorOptions {
    /// ## Summary
    /// Builds generator options from the codec section of the settings.
    ///
    /// ## Errors
    /// Returns an error if the configured values cannot be written into a content line.
    pub fn from_config(config: &CodecConfig) -> RfcResult<Self> {
        config.validate()?;
        Ok(Self {
            product_id: config.product_id.clone(),
            uid_domain: config.uid_domain.clone(),
        })
    }

    /// Generates a fresh globally unique identifier (`<uuid>@<domain>`).
    #[must_use]
    pub fn generate_uid(&self) -> String {
        format!("{}@{}", uuid::Uuid::new_v4(), self.uid_domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_uid_uses_domain() {
        let options = GeneratorOptions {
            product_id: PRODUCT_ID.to_string(),
            uid_domain: "example.org".to_string(),
        };
        let uid = options.generate_uid();
        let (id, domain) = uid.split_once('@').unwrap();
        assert_eq!(domain, "example.org");
        assert!(uuid::Uuid::parse_str(id).is_ok());
    }

    #[test]
    fn generated_uids_differ() {
        let options = GeneratorOptions::default();
        assert_ne!(options.generate_uid(), options.generate_uid());
    }

    #[test]
    fn from_config_rejects_invalid_domain() {
        let config = CodecConfig {
            product_id: PRODUCT_ID.to_string(),
            uid_domain: String::new(),
        };
        assert!(GeneratorOptions::from_config(&config).is_err());
    }
}
