//! Core domain types for the patient record service.
//!
//! This crate provides the fundamental types shared across the service:
//!
//! - [`Patient`] — A validated record with derived `bmi`/`verdict` fields
//! - [`PatientInput`] — Raw input fields accepted on create
//! - [`PatientPatch`] — Partial update payload (every field optional)
//! - [`Gender`], [`UpdateGender`], [`Verdict`] — Enumerated field values
//! - [`SortField`] and [`SortOrder`] — Sort query parameters
//! - [`ValidationError`] — Aggregated constraint violations
//!
//! # Example
//!
//! ```rust
//! use patients_core::{Gender, Patient, PatientInput, Verdict};
//!
//! let patient = Patient::new(PatientInput {
//!     name: "Ananya".to_string(),
//!     city: "Pune".to_string(),
//!     age: 30,
//!     gender: Gender::Female,
//!     height: 1.7,
//!     weight: 70.0,
//! })?;
//!
//! assert_eq!(patient.bmi, 24.22);
//! assert_eq!(patient.verdict, Verdict::Normal);
//! # Ok::<(), patients_core::ValidationError>(())
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One or more field constraints were violated.
///
/// `fields` holds a human-readable message per violated constraint, so a
/// single error reports everything wrong with the input at once.
#[derive(Error, Debug, Clone)]
#[error("invalid patient: {}", .fields.join("; "))]
pub struct ValidationError {
    /// One message per violated field constraint.
    pub fields: Vec<String>,
}

/// Gender of a patient as accepted on create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Others,
}

/// Gender values accepted by the update patch.
///
/// Narrower than [`Gender`]: the edit endpoint only accepts `male` and
/// `female`, while create also accepts `others`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateGender {
    Male,
    Female,
}

impl From<UpdateGender> for Gender {
    fn from(g: UpdateGender) -> Self {
        match g {
            UpdateGender::Male => Gender::Male,
            UpdateGender::Female => Gender::Female,
        }
    }
}

/// Categorical BMI verdict.
///
/// | BMI | Verdict |
/// |-----|---------|
/// | < 18.5 | `Underweight` |
/// | 18.5 – 24.99 | `Normal` |
/// | 25.0 – 29.99 | `Overweight` |
/// | ≥ 30.0 | `Obese` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl Verdict {
    /// Classifies a BMI value against the fixed thresholds.
    ///
    /// Boundaries belong to the upper class: 18.5 is `Normal`,
    /// 25.0 is `Overweight`, 30.0 is `Obese`.
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            Verdict::Underweight
        } else if bmi < 25.0 {
            Verdict::Normal
        } else if bmi < 30.0 {
            Verdict::Overweight
        } else {
            Verdict::Obese
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Verdict::Underweight => "Underweight",
            Verdict::Normal => "Normal",
            Verdict::Overweight => "Overweight",
            Verdict::Obese => "Obese",
        };
        write!(f, "{}", s)
    }
}

/// Body-mass index: weight (kg) over height (m) squared, rounded to two
/// decimals (half away from zero).
pub fn bmi(weight: f64, height: f64) -> f64 {
    (weight / (height * height) * 100.0).round() / 100.0
}

/// Raw patient fields as accepted by the create endpoint.
///
/// Carries no derived fields; `bmi` and `verdict` are computed by
/// [`Patient::new`] and never trusted from external input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientInput {
    pub name: String,
    pub city: String,
    pub age: u32,
    pub gender: Gender,
    /// Height in meters.
    pub height: f64,
    /// Weight in kilograms.
    pub weight: f64,
}

/// A validated patient record, including the derived fields.
///
/// Only [`Patient::new`] produces fresh records, so `bmi` and `verdict`
/// always agree with `height` and `weight` at construction time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub name: String,
    pub city: String,
    pub age: u32,
    pub gender: Gender,
    pub height: f64,
    pub weight: f64,
    pub bmi: f64,
    pub verdict: Verdict,
}

impl Patient {
    /// Validates the input and computes the derived fields.
    ///
    /// Returns a [`ValidationError`] listing every violated constraint:
    /// non-empty `name` and `city`, `0 < age < 120`, positive `height`
    /// and `weight`.
    pub fn new(input: PatientInput) -> Result<Self, ValidationError> {
        let mut fields = Vec::new();

        if input.name.trim().is_empty() {
            fields.push("name must be non-empty".to_string());
        }
        if input.city.trim().is_empty() {
            fields.push("city must be non-empty".to_string());
        }
        if !(1..120).contains(&input.age) {
            fields.push("age must be between 1 and 119".to_string());
        }
        if input.height <= 0.0 {
            fields.push("height must be greater than 0".to_string());
        }
        if input.weight <= 0.0 {
            fields.push("weight must be greater than 0".to_string());
        }

        if !fields.is_empty() {
            return Err(ValidationError { fields });
        }

        let bmi = bmi(input.weight, input.height);
        Ok(Patient {
            name: input.name,
            city: input.city,
            age: input.age,
            gender: input.gender,
            height: input.height,
            weight: input.weight,
            bmi,
            verdict: Verdict::from_bmi(bmi),
        })
    }

    /// Merges a partial patch onto this record and re-validates the result.
    ///
    /// Fields absent from the patch keep their stored values. The merged
    /// record passes through [`Patient::new`], so `bmi` and `verdict` are
    /// recomputed whenever `height` or `weight` changed.
    pub fn apply(&self, patch: PatientPatch) -> Result<Self, ValidationError> {
        Patient::new(PatientInput {
            name: patch.name.unwrap_or_else(|| self.name.clone()),
            city: patch.city.unwrap_or_else(|| self.city.clone()),
            age: patch.age.unwrap_or(self.age),
            gender: patch.gender.map(Gender::from).unwrap_or(self.gender),
            height: patch.height.unwrap_or(self.height),
            weight: patch.weight.unwrap_or(self.weight),
        })
    }
}

/// Partial update payload: any subset of the updatable fields.
///
/// Absent fields are left untouched on merge (exclude-unset semantics).
/// Deliberately has no `bmi`/`verdict` fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PatientPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: Option<UpdateGender>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub weight: Option<f64>,
}

/// Numeric field a sort request may order by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Height,
    Weight,
    Bmi,
}

impl SortField {
    /// Accepted `sort_by` query values, for error messages.
    pub const VALUES: [&'static str; 3] = ["height", "weight", "bmi"];

    /// Extracts this field's numeric value from a record.
    pub fn value(&self, patient: &Patient) -> f64 {
        match self {
            SortField::Height => patient.height,
            SortField::Weight => patient.weight,
            SortField::Bmi => patient.bmi,
        }
    }
}

impl FromStr for SortField {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "height" => Ok(Self::Height),
            "weight" => Ok(Self::Weight),
            "bmi" => Ok(Self::Bmi),
            _ => Err(()),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Height => "height",
            Self::Weight => "weight",
            Self::Bmi => "bmi",
        };
        write!(f, "{}", s)
    }
}

/// Direction of a sort request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Accepted `order` query values, for error messages.
    pub const VALUES: [&'static str; 2] = ["asc", "desc"];
}

impl FromStr for SortOrder {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(()),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> PatientInput {
        PatientInput {
            name: "Ananya".to_string(),
            city: "Pune".to_string(),
            age: 30,
            gender: Gender::Female,
            height: 1.7,
            weight: 70.0,
        }
    }

    #[test]
    fn bmi_rounds_to_two_decimals() {
        assert_eq!(bmi(70.0, 1.7), 24.22);
        assert_eq!(bmi(90.0, 1.6), 35.16);
        assert_eq!(bmi(50.0, 2.0), 12.5);
    }

    #[test]
    fn verdict_thresholds_at_boundaries() {
        assert_eq!(Verdict::from_bmi(18.49), Verdict::Underweight);
        assert_eq!(Verdict::from_bmi(18.5), Verdict::Normal);
        assert_eq!(Verdict::from_bmi(24.99), Verdict::Normal);
        assert_eq!(Verdict::from_bmi(25.0), Verdict::Overweight);
        assert_eq!(Verdict::from_bmi(29.99), Verdict::Overweight);
        assert_eq!(Verdict::from_bmi(30.0), Verdict::Obese);
    }

    #[test]
    fn new_computes_derived_fields() {
        let patient = Patient::new(valid_input()).unwrap();
        assert_eq!(patient.bmi, 24.22);
        assert_eq!(patient.verdict, Verdict::Normal);
    }

    #[test]
    fn new_reports_every_violation() {
        let err = Patient::new(PatientInput {
            name: "".to_string(),
            city: "  ".to_string(),
            age: 0,
            gender: Gender::Male,
            height: 0.0,
            weight: -1.0,
        })
        .unwrap_err();
        assert_eq!(err.fields.len(), 5);
        assert!(err.to_string().contains("name must be non-empty"));
        assert!(err.to_string().contains("age must be between 1 and 119"));
    }

    #[test]
    fn age_bounds_are_exclusive() {
        let mut input = valid_input();
        input.age = 119;
        assert!(Patient::new(input.clone()).is_ok());
        input.age = 120;
        assert!(Patient::new(input).is_err());
    }

    #[test]
    fn apply_keeps_unpatched_fields() {
        let patient = Patient::new(valid_input()).unwrap();
        let updated = patient
            .apply(PatientPatch {
                weight: Some(90.0),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(updated.name, "Ananya");
        assert_eq!(updated.city, "Pune");
        assert_eq!(updated.height, 1.7);
        assert_eq!(updated.weight, 90.0);
    }

    #[test]
    fn apply_recomputes_derived_fields() {
        let patient = Patient::new(valid_input()).unwrap();
        let updated = patient
            .apply(PatientPatch {
                weight: Some(90.0),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(updated.bmi, 31.14);
        assert_eq!(updated.verdict, Verdict::Obese);
    }

    #[test]
    fn apply_rejects_invalid_merge() {
        let patient = Patient::new(valid_input()).unwrap();
        let err = patient
            .apply(PatientPatch {
                height: Some(-2.0),
                ..Default::default()
            })
            .unwrap_err();
        assert_eq!(err.fields, vec!["height must be greater than 0"]);
    }

    #[test]
    fn gender_accepts_others_on_create_only() {
        assert_eq!(
            serde_json::from_str::<Gender>("\"others\"").unwrap(),
            Gender::Others
        );
        assert!(serde_json::from_str::<UpdateGender>("\"others\"").is_err());
    }

    #[test]
    fn verdict_serializes_as_capitalized_label() {
        assert_eq!(
            serde_json::to_string(&Verdict::Underweight).unwrap(),
            "\"Underweight\""
        );
        assert_eq!(Verdict::Normal.to_string(), "Normal");
    }

    #[test]
    fn sort_params_parse_from_query_values() {
        assert_eq!("bmi".parse::<SortField>(), Ok(SortField::Bmi));
        assert!("name".parse::<SortField>().is_err());
        assert_eq!("desc".parse::<SortOrder>(), Ok(SortOrder::Desc));
        assert!("descending".parse::<SortOrder>().is_err());
    }
}
