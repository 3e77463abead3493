//! Onboarding step registry.
//!
//! The six steps are strictly ordered. The screen name of a step is the value
//! persisted as the onboarding checkpoint, so it must never change once
//! shipped.

use serde::{Deserialize, Serialize};

/// One screen of the onboarding flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OnboardingStep {
    General,
    GerdQ,
    Rsi,
    ClinicalFactors,
    DiagnosticTests,
    Habits,
}

impl OnboardingStep {
    /// All steps in flow order.
    pub const ALL: [OnboardingStep; 6] = [
        OnboardingStep::General,
        OnboardingStep::GerdQ,
        OnboardingStep::Rsi,
        OnboardingStep::ClinicalFactors,
        OnboardingStep::DiagnosticTests,
        OnboardingStep::Habits,
    ];

    pub fn index(self) -> usize {
        match self {
            OnboardingStep::General => 0,
            OnboardingStep::GerdQ => 1,
            OnboardingStep::Rsi => 2,
            OnboardingStep::ClinicalFactors => 3,
            OnboardingStep::DiagnosticTests => 4,
            OnboardingStep::Habits => 5,
        }
    }

    pub fn first() -> Self {
        OnboardingStep::General
    }

    /// The step after this one, `None` for the last step.
    pub fn next(self) -> Option<Self> {
        Self::ALL.get(self.index() + 1).copied()
    }

    pub fn is_last(self) -> bool {
        self.next().is_none()
    }

    /// Persisted checkpoint value for this step.
    pub fn screen_name(self) -> &'static str {
        match self {
            OnboardingStep::General => "OnboardingGeneral",
            OnboardingStep::GerdQ => "OnboardingGerdQ",
            OnboardingStep::Rsi => "OnboardingRsi",
            OnboardingStep::ClinicalFactors => "OnboardingClinicalFactors",
            OnboardingStep::DiagnosticTests => "OnboardingDiagnosticTests",
            OnboardingStep::Habits => "OnboardingHabits",
        }
    }

    pub fn from_screen_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|step| step.screen_name() == name)
    }

    /// Fraction of the flow reached once this step is shown, in `(0, 1]`.
    pub fn progress(self) -> f32 {
        (self.index() + 1) as f32 / Self::ALL.len() as f32
    }

    /// Whether this step is one of the diagnostic questionnaires that a
    /// completed user may re-take during a cycle renewal.
    pub fn is_renewable(self) -> bool {
        matches!(self, OnboardingStep::GerdQ | OnboardingStep::Rsi)
    }
}

impl std::fmt::Display for OnboardingStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.screen_name())
    }
}

/// True when every step of the flow appears in `completed`.
pub fn all_steps_complete(completed: &[OnboardingStep]) -> bool {
    OnboardingStep::ALL
        .iter()
        .all(|step| completed.contains(step))
}
