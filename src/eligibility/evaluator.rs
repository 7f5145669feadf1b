//! Eligibility evaluator — formats a finalized profile into an
//! evaluation request and parses the structured result.
//!
//! The evaluator never raises to its caller. Service absence, call
//! failure, and unparseable output all degrade to the deterministic
//! fallback rule, with the degradation noted in the reasoning string.

use std::sync::Arc;

use serde::Deserialize;

use super::catalog::catalog_text;
use super::parse::extract_json_object;
use crate::error::LlmError;
use crate::intake::session::Profile;
use crate::llm::{ChatMessage, CompletionRequest, LlmProvider};

const MAX_TOKENS: u32 = 500;
const TEMPERATURE: f32 = 0.1;

/// Result of an eligibility evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct EligibilityOutcome {
    /// Scheme names in the order the service (or rule) produced them.
    pub eligible_schemes: Vec<String>,
    pub reasoning: String,
    /// True when the fallback rule produced this outcome.
    pub degraded: bool,
}

/// The JSON object expected somewhere in the service reply.
#[derive(Debug, Deserialize)]
struct RawOutcome {
    #[serde(default)]
    eligible_schemes: Vec<String>,
    #[serde(default)]
    reasoning: String,
}

pub struct EligibilityEvaluator {
    llm: Option<Arc<dyn LlmProvider>>,
}

impl EligibilityEvaluator {
    /// `None` runs the evaluator in fallback-only mode.
    pub fn new(llm: Option<Arc<dyn LlmProvider>>) -> Self {
        Self { llm }
    }

    /// Evaluate a finalized profile. Infallible by contract.
    pub async fn evaluate(&self, profile: &Profile) -> EligibilityOutcome {
        let Some(llm) = &self.llm else {
            tracing::info!("No eligibility service configured; using fallback rules");
            return fallback_outcome(profile);
        };

        match self.evaluate_remote(llm.as_ref(), profile).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(error = %e, "Eligibility service failed; using fallback rules");
                fallback_outcome(profile)
            }
        }
    }

    async fn evaluate_remote(
        &self,
        llm: &dyn LlmProvider,
        profile: &Profile,
    ) -> Result<EligibilityOutcome, LlmError> {
        let request = CompletionRequest::new(vec![ChatMessage::user(evaluation_prompt(profile))])
            .with_max_tokens(MAX_TOKENS)
            .with_temperature(TEMPERATURE);

        let response = llm.complete(request).await?;

        let object =
            extract_json_object(&response.content).ok_or_else(|| LlmError::InvalidResponse {
                provider: llm.model_name().to_string(),
                reason: "no JSON object in response".to_string(),
            })?;
        let raw: RawOutcome =
            serde_json::from_str(object).map_err(|e| LlmError::InvalidResponse {
                provider: llm.model_name().to_string(),
                reason: format!("malformed eligibility object: {e}"),
            })?;

        Ok(EligibilityOutcome {
            eligible_schemes: raw.eligible_schemes,
            reasoning: raw.reasoning,
            degraded: false,
        })
    }
}

/// Deterministic rule applied when the service is unavailable or its
/// reply is unparseable. Identical profiles always produce identical
/// lists.
pub fn fallback_outcome(profile: &Profile) -> EligibilityOutcome {
    let eligible_schemes: Vec<String> = if profile.age < 60 && profile.income < 500_000.0 {
        vec!["Ayushman Bharat".to_string(), "PM Awas Yojana".to_string()]
    } else if profile.age >= 60 {
        vec!["Atal Pension Yojana".to_string(), "PM Kisan".to_string()]
    } else {
        Vec::new()
    };

    EligibilityOutcome {
        eligible_schemes,
        reasoning: "Eligibility determined using fallback logic due to service issues".to_string(),
        degraded: true,
    }
}

/// The natural-language evaluation request.
fn evaluation_prompt(profile: &Profile) -> String {
    format!(
        "Based on the following user profile, determine eligibility for Indian government \
         welfare schemes:\n\n\
         Name: {name}\n\
         Age: {age}\n\
         Annual Income: ₹{income}\n\
         State: {state}\n\n\
         Consider major Indian government welfare schemes like:\n\
         {catalog}\n\n\
         Also consider state-specific schemes based on the state: {state}\n\n\
         Return a JSON response with:\n\
         {{\n\
         \x20   \"eligible_schemes\": [\"scheme_name_1\", \"scheme_name_2\", ...],\n\
         \x20   \"reasoning\": \"brief explanation of eligibility\"\n\
         }}\n\n\
         Focus on schemes where the user likely qualifies based on age, income, and location.",
        name = profile.name,
        age = profile.age,
        income = profile.income,
        state = profile.state_name,
        catalog = catalog_text(),
    )
}
