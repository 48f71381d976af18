// ABOUTME: LLM-backed semantic assessor reviewing plans for subtle safety concerns
// ABOUTME: Parses collaborator findings leniently; errors surface for degraded mode
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sage Health Intelligence

use std::sync::Arc;

use async_trait::async_trait;
use sage_core::models::{EnvironmentContext, UserProfile};
use sage_core::{PlannerError, PlannerResult};
use sage_intelligence::{PlanInput, SemanticAssessor, SemanticFindings};
use serde_json::Value;
use tracing::debug;

use crate::llm::{extract_json_block, prompts, ChatMessage, ChatRequest, LlmProvider};

/// Semantic safety review backed by an LLM collaborator
///
/// The safety engine treats any error from here as an empty contribution,
/// so this implementation reports failures honestly instead of masking
/// them.
pub struct LlmSemanticAssessor {
    provider: Arc<dyn LlmProvider>,
}

impl LlmSemanticAssessor {
    /// Create an assessor over a provider
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl SemanticAssessor for LlmSemanticAssessor {
    async fn assess(
        &self,
        plan: &PlanInput<'_>,
        profile: &UserProfile,
        environment: &EnvironmentContext,
        context: Option<&str>,
    ) -> PlannerResult<SemanticFindings> {
        let plan_json = plan.to_json();
        let prompt = prompts::assessment_prompt(&plan_json, profile, environment, context);
        let request = ChatRequest::new(vec![
            ChatMessage::system(prompts::ASSESSMENT_SYSTEM_PROMPT),
            ChatMessage::user(prompt),
        ])
        .with_temperature(0.2);

        let response = self.provider.complete(&request).await?;
        let block = extract_json_block(&response.content)
            .ok_or_else(|| PlannerError::assessment("no JSON payload in assessment response"))?;
        let value: Value = serde_json::from_str(block)
            .map_err(|e| PlannerError::assessment(format!("invalid assessment payload: {e}")))?;

        let findings = SemanticFindings::from_json_value(&value);
        debug!(
            provider = self.provider.name(),
            risk_factors = findings.risk_factors.len(),
            checks = findings.safety_checks.len(),
            "parsed semantic findings"
        );
        Ok(findings)
    }
}
