// src/problem_manager.rs
// Problem resource collaborator over the judge API.

use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::api::{ApiClient, MessageResponse, ProblemListResponse, ProblemResponse};
use crate::errors::ApiError;
use crate::models::{Difficulty, Example, LanguageSet, Problem, TestCase};

pub struct ProblemManager {
    api: Arc<ApiClient>,
}

impl ProblemManager {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn list_problems(&self) -> Result<Vec<Problem>, ApiError> {
        let response: ProblemListResponse = self.api.get("/problems").await?;
        debug!("Fetched {} problems", response.problems.len());
        Ok(response.problems)
    }

    pub async fn get_problem(&self, id: Uuid) -> Result<Problem, ApiError> {
        let response: ProblemResponse = self.api.get(&format!("/problems/{}", id)).await?;
        Ok(response.problem)
    }

    /// Updates a problem definition. The argument order is the platform's
    /// edit contract; hints and editorial are not part of it even though the
    /// editor form carries them.
    #[allow(clippy::too_many_arguments)]
    pub async fn update_problem(
        &self,
        title: String,
        description: String,
        examples: LanguageSet<Example>,
        difficulty: Difficulty,
        tags: Vec<String>,
        constraints: String,
        testcases: Vec<TestCase>,
        code_snippets: LanguageSet<String>,
        reference_solutions: LanguageSet<String>,
        id: Uuid,
    ) -> Result<Problem, ApiError> {
        let body = UpdateProblemBody {
            title,
            description,
            examples,
            difficulty,
            tags,
            constraints,
            testcases,
            code_snippets,
            reference_solutions,
        };
        let response: ProblemResponse = self.api.put(&format!("/problems/{}", id), &body).await?;
        info!("Updated problem {}", id);
        Ok(response.problem)
    }

    pub async fn delete_problem(&self, id: Uuid) -> Result<(), ApiError> {
        let response: MessageResponse = self.api.delete(&format!("/problems/{}", id)).await?;
        info!("Deleted problem {}: {}", id, response.message);
        Ok(())
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct UpdateProblemBody {
    title: String,
    description: String,
    examples: LanguageSet<Example>,
    difficulty: Difficulty,
    tags: Vec<String>,
    constraints: String,
    testcases: Vec<TestCase>,
    code_snippets: LanguageSet<String>,
    reference_solutions: LanguageSet<String>,
}
