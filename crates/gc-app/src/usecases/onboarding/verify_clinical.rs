//! Save-then-verify for clinical factors.
//!
//! Each attempt sends the six answers and re-fetches the saved profile. An
//! attempt counts as verified when every field reads back as sent.

use std::sync::Arc;

use tracing::{info, info_span, warn, Instrument};

use gc_core::ports::{ApiError, ApiResult, ProfileApiPort, SleeperPort};
use gc_core::profile::{ClinicalFactors, Profile};
use gc_core::RetryPolicy;

#[derive(Debug, Clone, PartialEq)]
pub enum ClinicalOutcome {
    Verified {
        profile: Profile,
        attempts: u32,
    },
    /// Attempts exhausted. `last_profile` is the last profile the server
    /// acknowledged, if any attempt got that far.
    Unverified {
        last_profile: Option<Profile>,
        mismatches: Vec<&'static str>,
        last_error: Option<ApiError>,
        attempts: u32,
    },
}

impl ClinicalOutcome {
    pub fn attempts(&self) -> u32 {
        match self {
            ClinicalOutcome::Verified { attempts, .. }
            | ClinicalOutcome::Unverified { attempts, .. } => *attempts,
        }
    }

    pub fn is_verified(&self) -> bool {
        matches!(self, ClinicalOutcome::Verified { .. })
    }
}

pub struct VerifyClinicalFactors {
    profile_api: Arc<dyn ProfileApiPort>,
    sleeper: Arc<dyn SleeperPort>,
    policy: RetryPolicy,
}

impl VerifyClinicalFactors {
    pub fn new(
        profile_api: Arc<dyn ProfileApiPort>,
        sleeper: Arc<dyn SleeperPort>,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            profile_api,
            sleeper,
            policy,
        }
    }

    /// Save `factors` and verify the read-back, retrying per the policy.
    ///
    /// A 401 aborts immediately with [`ApiError::Unauthorized`]; every other
    /// outcome is reported through [`ClinicalOutcome`].
    pub async fn execute(&self, factors: &ClinicalFactors) -> ApiResult<ClinicalOutcome> {
        let span = info_span!(
            "usecase.verify_clinical_factors.execute",
            max_attempts = self.policy.max_attempts
        );
        async {
            let mut attempts = 0;
            let mut last_profile = None;
            let mut mismatches = Vec::new();
            let mut last_error = None;

            while self.policy.has_attempts_left(attempts) {
                attempts += 1;
                match self.attempt(factors).await {
                    Ok(profile) => {
                        let diff = factors.mismatches(&profile);
                        if diff.is_empty() {
                            info!(attempts, "clinical factors verified");
                            return Ok(ClinicalOutcome::Verified { profile, attempts });
                        }
                        warn!(attempts, fields = ?diff, "clinical factors read back differently");
                        last_profile = Some(profile);
                        mismatches = diff;
                        last_error = None;
                    }
                    Err(ApiError::Unauthorized) => return Err(ApiError::Unauthorized),
                    Err(err) => {
                        warn!(attempts, error = %err, "clinical factors save attempt failed");
                        last_error = Some(err);
                    }
                }

                if self.policy.has_attempts_left(attempts) {
                    self.sleeper.sleep(self.policy.delay_after(attempts)).await;
                }
            }

            warn!(attempts, "clinical factors unverified after all attempts");
            Ok(ClinicalOutcome::Unverified {
                last_profile,
                mismatches,
                last_error,
                attempts,
            })
        }
        .instrument(span)
        .await
    }

    async fn attempt(&self, factors: &ClinicalFactors) -> ApiResult<Profile> {
        self.profile_api.patch_profile(&factors.to_patch()).await?;
        self.profile_api.get_profile().await
    }
}
