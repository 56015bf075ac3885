use tracing::debug;

use crate::api::{ApiClient, ApiError};
use crate::models::{Project, ProjectPayload};

const PROJECTS_PATH: &str = "projects/";

fn project_path(id: i64) -> String {
    format!("{}{}/", PROJECTS_PATH, id)
}

/// CRUD calls for the caller's projects.
#[derive(Clone)]
pub struct ProjectService {
    api: ApiClient,
}

impl ProjectService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<Project>, ApiError> {
        let projects: Vec<Project> = self.api.get(PROJECTS_PATH).await?;
        debug!(count = projects.len(), "Fetched projects");
        Ok(projects)
    }

    pub async fn get(&self, id: i64) -> Result<Project, ApiError> {
        self.api.get(&project_path(id)).await
    }

    pub async fn create(&self, payload: &ProjectPayload) -> Result<Project, ApiError> {
        self.api.post(PROJECTS_PATH, payload).await
    }

    /// Partial update; fields absent from `payload` are left unchanged.
    pub async fn update(&self, id: i64, payload: &ProjectPayload) -> Result<Project, ApiError> {
        self.api.patch(&project_path(id), payload).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.api.delete(&project_path(id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_path() {
        assert_eq!(project_path(42), "projects/42/");
    }
}
