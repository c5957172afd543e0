use crate::domain::model::NewSwim;
use crate::utils::error::{Result, TrackerError};
use chrono::{DateTime, Local, NaiveDate};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

const INPUT_DATE_FORMATS: [&str; 2] = [DATE_FORMAT, "%d.%m.%Y"];

/// Normalizes a picked date to `yyyy-MM-dd`. No date means today.
pub fn format_date(input: Option<&str>) -> Result<String> {
    let Some(raw) = input.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(Local::now().date_naive().format(DATE_FORMAT).to_string());
    };

    for format in INPUT_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Ok(date.format(DATE_FORMAT).to_string());
        }
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp
            .with_timezone(&Local)
            .date_naive()
            .format(DATE_FORMAT)
            .to_string());
    }

    Err(TrackerError::ValidationError {
        message: format!("'{}' is not a date (expected yyyy-MM-dd or dd.MM.yyyy)", raw),
    })
}

/// Controlled input state of the add form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SwimForm {
    pub datum: String,
    pub strecke: String,
    pub dolphin: String,
    pub etappe: String,
}

impl SwimForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_field(&mut self, name: &str, value: &str) -> Result<()> {
        let slot = match name {
            "strecke" => &mut self.strecke,
            "dolphin" => &mut self.dolphin,
            "etappe" => &mut self.etappe,
            other => {
                return Err(TrackerError::ValidationError {
                    message: format!("Unknown form field: {}", other),
                })
            }
        };
        *slot = value.to_string();
        Ok(())
    }

    pub fn set_date(&mut self, date: Option<&str>) -> Result<()> {
        self.datum = format_date(date)?;
        Ok(())
    }

    pub fn submit(&self) -> Result<NewSwim> {
        if self.datum.is_empty() {
            return Err(TrackerError::ValidationError {
                message: "Datum is required".to_string(),
            });
        }

        let raw = self.strecke.trim();
        if raw.is_empty() {
            return Err(TrackerError::ValidationError {
                message: "Strecke is required".to_string(),
            });
        }
        let strecke: f64 = raw.parse().map_err(|_| TrackerError::ValidationError {
            message: format!("Strecke must be a number, got '{}'", raw),
        })?;
        if !strecke.is_finite() || strecke < 0.0 {
            return Err(TrackerError::ValidationError {
                message: format!("Strecke must be at least 0, got {}", strecke),
            });
        }

        Ok(NewSwim {
            datum: self.datum.clone(),
            strecke,
            dolphin: self.dolphin.trim().to_string(),
            etappe: self.etappe.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date_accepts_iso_and_german_dates() {
        assert_eq!(format_date(Some("2023-07-01")).unwrap(), "2023-07-01");
        assert_eq!(format_date(Some("01.07.2023")).unwrap(), "2023-07-01");
        assert!(format_date(Some("July 1st")).is_err());
    }

    #[test]
    fn test_format_date_defaults_to_today() {
        let today = Local::now().date_naive().format(DATE_FORMAT).to_string();
        assert_eq!(format_date(None).unwrap(), today);
        assert_eq!(format_date(Some("  ")).unwrap(), today);
    }

    #[test]
    fn test_submit_builds_payload() {
        let mut form = SwimForm::new();
        form.set_date(Some("02.07.2023")).unwrap();
        form.set_field("strecke", "1500").unwrap();
        form.set_field("dolphin", " Flipper ").unwrap();
        form.set_field("etappe", "Kiel - Laboe").unwrap();

        let swim = form.submit().unwrap();
        assert_eq!(swim.datum, "2023-07-02");
        assert_eq!(swim.strecke, 1500.0);
        assert_eq!(swim.dolphin, "Flipper");
        assert_eq!(swim.etappe, "Kiel - Laboe");
    }

    #[test]
    fn test_submit_requires_date_and_non_negative_distance() {
        let mut form = SwimForm::new();
        form.set_field("strecke", "100").unwrap();
        assert!(form.submit().is_err());

        form.set_date(Some("2023-07-01")).unwrap();
        form.set_field("strecke", "-5").unwrap();
        assert!(form.submit().is_err());

        form.set_field("strecke", "abc").unwrap();
        assert!(form.submit().is_err());

        form.set_field("strecke", "0").unwrap();
        assert!(form.submit().is_ok());
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let mut form = SwimForm::new();
        assert!(form.set_field("datum", "2023-07-01").is_err());
        assert!(form.set_field("speed", "3").is_err());
    }
}
