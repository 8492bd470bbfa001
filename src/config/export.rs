//! Export sink configuration

use chrono::FixedOffset;
use serde::Deserialize;

use crate::ports::SheetFormat;

use super::error::ValidationError;

/// Largest offset any inhabited zone uses, in minutes.
const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

/// Which spreadsheet writer renders the export, and which wall clock stamps
/// its file name
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportConfig {
    /// `xlsx` (default) or `json`
    #[serde(default)]
    pub format: SheetFormat,

    /// Minutes east of UTC for the file-name stamp, e.g. `540` for Tokyo.
    /// Unset means the host's local zone.
    pub utc_offset_minutes: Option<i32>,
}

impl ExportConfig {
    /// The pinned stamp zone, if one is configured.
    pub fn utc_offset(&self) -> Option<FixedOffset> {
        self.utc_offset_minutes
            .and_then(|minutes| FixedOffset::east_opt(minutes * 60))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.utc_offset_minutes {
            Some(minutes) if minutes.abs() > MAX_UTC_OFFSET_MINUTES => {
                Err(ValidationError::InvalidUtcOffset(minutes))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_format_is_xlsx() {
        let config = ExportConfig::default();
        assert_eq!(config.format, SheetFormat::Xlsx);
        assert!(config.utc_offset().is_none());
    }

    #[test]
    fn test_json_format_deserializes() {
        let config: ExportConfig = serde_json::from_str(r#"{"format": "json"}"#).unwrap();
        assert_eq!(config.format, SheetFormat::Json);
    }

    #[test]
    fn test_offset_minutes_become_fixed_offset() {
        let config: ExportConfig = serde_json::from_str(r#"{"utc_offset_minutes": 540}"#).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.utc_offset().unwrap().local_minus_utc(), 9 * 3600);
    }

    #[test]
    fn test_offset_beyond_fourteen_hours_fails_validation() {
        let config = ExportConfig {
            utc_offset_minutes: Some(-15 * 60),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidUtcOffset(-900))
        ));
    }
}
