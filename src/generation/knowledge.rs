// ABOUTME: Retrieval-context boundary supplying opaque domain-knowledge text
// ABOUTME: The core never parses or validates the returned block
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sage Health Intelligence

use async_trait::async_trait;
use sage_core::models::{PlanKind, UserProfile};
use sage_core::PlannerResult;

/// Supplies an opaque domain-knowledge text block for generation and
/// assessment prompts
///
/// Backed by a knowledge graph or vector store in production deployments;
/// the planner treats the result as opaque text either way.
#[async_trait]
pub trait KnowledgeSource: Send + Sync {
    /// Fetch context for one plan kind and user
    async fn retrieve(
        &self,
        kind: PlanKind,
        profile: &UserProfile,
    ) -> PlannerResult<Option<String>>;
}

/// Knowledge source returning a fixed text block
///
/// Useful for offline runs and tests; `None` content disables retrieval
/// context entirely.
#[derive(Debug, Clone, Default)]
pub struct StaticKnowledge {
    content: Option<String>,
}

impl StaticKnowledge {
    /// Create a source that always returns the given block
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
        }
    }

    /// Create a source that returns no context
    #[must_use]
    pub fn empty() -> Self {
        Self { content: None }
    }
}

#[async_trait]
impl KnowledgeSource for StaticKnowledge {
    async fn retrieve(
        &self,
        _kind: PlanKind,
        _profile: &UserProfile,
    ) -> PlannerResult<Option<String>> {
        Ok(self.content.clone())
    }
}
