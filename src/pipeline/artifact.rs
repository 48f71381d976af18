// ABOUTME: End-of-run artifact persistence for ranked plan candidates
// ABOUTME: Written exactly once per pipeline run; candidates embed their assessments
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sage Health Intelligence

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use sage_core::models::SafetyAssessment;
use sage_core::PlannerResult;
use serde::Serialize;
use tracing::info;

/// The durable record of one pipeline run
///
/// `all_plans` is the full ranked candidate set, `top_plans` the selected
/// head, and `assessments` an id-keyed duplicate of each candidate's
/// embedded assessment for callers that only want the verdicts.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineArtifact<T> {
    /// Every surviving candidate, ranked
    pub all_plans: Vec<T>,
    /// The top-K candidates
    pub top_plans: Vec<T>,
    /// Assessments keyed by candidate id
    pub assessments: BTreeMap<u64, SafetyAssessment>,
    /// When this run completed
    pub generated_at: DateTime<Utc>,
}

impl<T: Serialize> PipelineArtifact<T> {
    /// Assemble an artifact stamped with the current time
    #[must_use]
    pub fn new(
        all_plans: Vec<T>,
        top_plans: Vec<T>,
        assessments: BTreeMap<u64, SafetyAssessment>,
    ) -> Self {
        Self {
            all_plans,
            top_plans,
            assessments,
            generated_at: Utc::now(),
        }
    }

    /// Write the artifact as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the filesystem write fails.
    pub async fn write(&self, path: &Path) -> PlannerResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, json).await?;
        info!(
            path = %path.display(),
            candidates = self.all_plans.len(),
            top = self.top_plans.len(),
            "wrote pipeline artifact"
        );
        Ok(())
    }
}
