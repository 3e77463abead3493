//! Profile domain models.
//!
//! The profile lives on the server. The client holds a transient copy while
//! a screen edits it and sends partial updates.

use serde::{Deserialize, Serialize};

use crate::validation::{ValidationErrors, Validator};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub height_cm: Option<f64>,
    #[serde(default)]
    pub bmi: Option<f64>,

    #[serde(default)]
    pub has_hiatal_hernia: Option<bool>,
    #[serde(default)]
    pub has_motility_disorder: Option<bool>,
    #[serde(default)]
    pub has_delayed_emptying: Option<bool>,
    #[serde(default)]
    pub has_dry_mouth: Option<bool>,
    #[serde(default)]
    pub has_constipation: Option<bool>,
    #[serde(default)]
    pub has_high_stress: Option<bool>,

    #[serde(default, flatten)]
    pub tests: DiagnosticTests,

    #[serde(default)]
    pub onboarding_complete: bool,
}

impl Profile {
    pub fn clinical_factors(&self) -> ClinicalFactorsForm {
        ClinicalFactorsForm {
            has_hiatal_hernia: self.has_hiatal_hernia,
            has_motility_disorder: self.has_motility_disorder,
            has_delayed_emptying: self.has_delayed_emptying,
            has_dry_mouth: self.has_dry_mouth,
            has_constipation: self.has_constipation,
            has_high_stress: self.has_high_stress,
        }
    }
}

/// Partial profile update. Absent fields are left untouched server-side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfilePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_hiatal_hernia: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_motility_disorder: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_delayed_emptying: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_dry_mouth: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_constipation: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_high_stress: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub onboarding_complete: Option<bool>,
}

impl ProfilePatch {
    pub fn onboarding_complete() -> Self {
        Self {
            onboarding_complete: Some(true),
            ..Default::default()
        }
    }
}

/// Body mass index rounded to one decimal.
pub fn bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let meters = height_cm / 100.0;
    let raw = weight_kg / (meters * meters);
    (raw * 10.0).round() / 10.0
}

/// Raw input of the general-info step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralInfoForm {
    pub name: String,
    pub weight: String,
    pub height: String,
}

impl GeneralInfoForm {
    /// Prefill from a previously saved profile. Missing values stay empty.
    pub fn from_profile(profile: &Profile) -> Self {
        Self {
            name: profile.first_name.clone().unwrap_or_default(),
            weight: profile.weight_kg.map(format_number).unwrap_or_default(),
            height: profile.height_cm.map(format_number).unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<GeneralInfo, ValidationErrors> {
        let mut v = Validator::new();
        let name = v.required_text("name", &self.name);
        let weight_kg = v.positive_number("weight", &self.weight);
        let height_cm = v.positive_number("height", &self.height);
        v.finish(|| {
            Some(GeneralInfo {
                name: name?,
                weight_kg: weight_kg?,
                height_cm: height_cm?,
            })
        })
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralInfo {
    pub name: String,
    pub weight_kg: f64,
    pub height_cm: f64,
}

impl GeneralInfo {
    pub fn bmi(&self) -> f64 {
        bmi(self.weight_kg, self.height_cm)
    }

    pub fn to_patch(&self) -> ProfilePatch {
        ProfilePatch {
            first_name: Some(self.name.clone()),
            weight_kg: Some(self.weight_kg),
            height_cm: Some(self.height_cm),
            ..Default::default()
        }
    }
}

/// Clinical-factor answers as entered; `None` means unanswered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicalFactorsForm {
    pub has_hiatal_hernia: Option<bool>,
    pub has_motility_disorder: Option<bool>,
    pub has_delayed_emptying: Option<bool>,
    pub has_dry_mouth: Option<bool>,
    pub has_constipation: Option<bool>,
    pub has_high_stress: Option<bool>,
}

impl ClinicalFactorsForm {
    pub fn validate(&self) -> Result<ClinicalFactors, ValidationErrors> {
        let mut v = Validator::new();
        let hernia = v.required("has_hiatal_hernia", self.has_hiatal_hernia);
        let motility = v.required("has_motility_disorder", self.has_motility_disorder);
        let emptying = v.required("has_delayed_emptying", self.has_delayed_emptying);
        let dry_mouth = v.required("has_dry_mouth", self.has_dry_mouth);
        let constipation = v.required("has_constipation", self.has_constipation);
        let stress = v.required("has_high_stress", self.has_high_stress);
        v.finish(|| {
            Some(ClinicalFactors {
                has_hiatal_hernia: hernia?,
                has_motility_disorder: motility?,
                has_delayed_emptying: emptying?,
                has_dry_mouth: dry_mouth?,
                has_constipation: constipation?,
                has_high_stress: stress?,
            })
        })
    }
}

/// The six clinical-factor answers, all present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicalFactors {
    pub has_hiatal_hernia: bool,
    pub has_motility_disorder: bool,
    pub has_delayed_emptying: bool,
    pub has_dry_mouth: bool,
    pub has_constipation: bool,
    pub has_high_stress: bool,
}

impl ClinicalFactors {
    pub fn to_patch(&self) -> ProfilePatch {
        ProfilePatch {
            has_hiatal_hernia: Some(self.has_hiatal_hernia),
            has_motility_disorder: Some(self.has_motility_disorder),
            has_delayed_emptying: Some(self.has_delayed_emptying),
            has_dry_mouth: Some(self.has_dry_mouth),
            has_constipation: Some(self.has_constipation),
            has_high_stress: Some(self.has_high_stress),
            ..Default::default()
        }
    }

    /// Names of the fields whose saved value differs from what was sent.
    pub fn mismatches(&self, saved: &Profile) -> Vec<&'static str> {
        let pairs = [
            ("has_hiatal_hernia", self.has_hiatal_hernia, saved.has_hiatal_hernia),
            (
                "has_motility_disorder",
                self.has_motility_disorder,
                saved.has_motility_disorder,
            ),
            (
                "has_delayed_emptying",
                self.has_delayed_emptying,
                saved.has_delayed_emptying,
            ),
            ("has_dry_mouth", self.has_dry_mouth, saved.has_dry_mouth),
            ("has_constipation", self.has_constipation, saved.has_constipation),
            ("has_high_stress", self.has_high_stress, saved.has_high_stress),
        ];
        pairs
            .into_iter()
            .filter(|(_, sent, stored)| *stored != Some(*sent))
            .map(|(name, _, _)| name)
            .collect()
    }
}

/// Diagnostic test flags and free-text results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticTests {
    #[serde(default)]
    pub endoscopy_done: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endoscopy_result: Option<String>,
    #[serde(default)]
    pub ph_monitoring_done: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ph_monitoring_result: Option<String>,
    #[serde(default)]
    pub manometry_done: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manometry_result: Option<String>,
}

impl DiagnosticTests {
    /// A test marked as done needs a result; results of tests not done are
    /// dropped.
    pub fn validate(&self) -> Result<DiagnosticTests, ValidationErrors> {
        let mut v = Validator::new();
        let endoscopy = check_result(&mut v, "endoscopy_result", self.endoscopy_done, &self.endoscopy_result);
        let ph = check_result(
            &mut v,
            "ph_monitoring_result",
            self.ph_monitoring_done,
            &self.ph_monitoring_result,
        );
        let manometry = check_result(&mut v, "manometry_result", self.manometry_done, &self.manometry_result);
        v.finish(|| {
            Some(DiagnosticTests {
                endoscopy_done: self.endoscopy_done,
                endoscopy_result: endoscopy,
                ph_monitoring_done: self.ph_monitoring_done,
                ph_monitoring_result: ph,
                manometry_done: self.manometry_done,
                manometry_result: manometry,
            })
        })
    }
}

fn check_result(
    v: &mut Validator,
    field: &str,
    done: bool,
    result: &Option<String>,
) -> Option<String> {
    if !done {
        return None;
    }
    match result.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => Some(text.to_string()),
        _ => {
            v.push(field, "required when the test was done");
            None
        }
    }
}
