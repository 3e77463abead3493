//! Per-step onboarding handlers.

mod clinical;
mod diagnostic;
mod general;
mod habits;
mod questionnaire;

pub use clinical::ClinicalFactorsStep;
pub use diagnostic::DiagnosticTestsStep;
pub use general::GeneralInfoStep;
pub use habits::HabitsStep;
pub use questionnaire::QuestionnaireStep;
