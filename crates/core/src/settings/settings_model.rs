//! Core settings model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_DOCUMENT_NUMBER_PREFIX, DEFAULT_DUE_DAYS, DEFAULT_TAX_RATE, MAX_DUE_DAYS,
};
use crate::errors::{Error, Result};

/// Settings shared by the ledger and the document assembler.
///
/// Every field has a default, so a partial JSON document (or `{}`) is a valid
/// configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreSettings {
    /// Tax rate applied to each line total, as a fraction (0.15 = 15%).
    pub tax_rate: Decimal,
    /// Days added to the issue date to obtain the due date.
    pub due_days: i64,
    pub document_number_prefix: String,
}

impl Default for CoreSettings {
    fn default() -> Self {
        Self {
            tax_rate: DEFAULT_TAX_RATE,
            due_days: DEFAULT_DUE_DAYS,
            document_number_prefix: DEFAULT_DOCUMENT_NUMBER_PREFIX.to_string(),
        }
    }
}

impl CoreSettings {
    /// Parses settings from JSON, filling missing keys with defaults, and
    /// validates the result.
    pub fn from_json(raw: &str) -> Result<Self> {
        let settings: CoreSettings = serde_json::from_str(raw)?;
        settings.validate()?;
        log::debug!("Loaded core settings: {:?}", settings);
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tax_rate < Decimal::ZERO || self.tax_rate > Decimal::ONE {
            return Err(Error::Settings(format!(
                "tax_rate must be between 0 and 1, got {}",
                self.tax_rate
            )));
        }
        if !(0..=MAX_DUE_DAYS).contains(&self.due_days) {
            return Err(Error::Settings(format!(
                "due_days must be between 0 and {}, got {}",
                MAX_DUE_DAYS, self.due_days
            )));
        }
        if self.document_number_prefix.trim().is_empty() {
            return Err(Error::Settings(
                "document_number_prefix must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults() {
        let settings = CoreSettings::default();
        assert_eq!(settings.tax_rate, dec!(0.15));
        assert_eq!(settings.due_days, 7);
        assert_eq!(settings.document_number_prefix, "INV-");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_from_json_fills_missing_keys() {
        let settings = CoreSettings::from_json(r#"{"due_days": 30}"#).unwrap();
        assert_eq!(settings.due_days, 30);
        assert_eq!(settings.tax_rate, dec!(0.15));
        assert_eq!(settings.document_number_prefix, "INV-");
    }

    #[test]
    fn test_from_json_empty_object() {
        let settings = CoreSettings::from_json("{}").unwrap();
        assert_eq!(settings, CoreSettings::default());
    }

    #[test]
    fn test_rejects_out_of_range_tax_rate() {
        let err = CoreSettings::from_json(r#"{"tax_rate": 1.5}"#).unwrap_err();
        assert!(matches!(err, Error::Settings(_)));
    }

    #[test]
    fn test_rejects_negative_due_days() {
        let err = CoreSettings::from_json(r#"{"due_days": -1}"#).unwrap_err();
        assert!(matches!(err, Error::Settings(_)));
    }

    #[test]
    fn test_due_days_bounds() {
        assert_eq!(CoreSettings::from_json(r#"{"due_days": 0}"#).unwrap().due_days, 0);
        assert_eq!(
            CoreSettings::from_json(r#"{"due_days": 3650}"#).unwrap().due_days,
            3650
        );
        assert!(matches!(
            CoreSettings::from_json(r#"{"due_days": 3651}"#),
            Err(Error::Settings(_))
        ));
        assert!(matches!(
            CoreSettings::from_json(r#"{"due_days": 100000000}"#),
            Err(Error::Settings(_))
        ));
    }

    #[test]
    fn test_rejects_blank_prefix() {
        let err = CoreSettings::from_json(r#"{"document_number_prefix": " "}"#).unwrap_err();
        assert!(matches!(err, Error::Settings(_)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            CoreSettings::from_json("not json"),
            Err(Error::Settings(_))
        ));
    }
}
