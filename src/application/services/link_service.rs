//! Link creation, resolution, and removal service.

use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{CodeGenerator, validate_code};
use crate::utils::target_normalizer::normalize_target;
use serde_json::json;

/// Service implementing the business rules for short links.
///
/// Orchestrates the code generator and the link repository. All uniqueness
/// and atomicity guarantees are delegated to the repository; this layer only
/// decides how to react to conflicts.
pub struct LinkService<R: LinkRepository> {
    repository: Arc<R>,
    generator: CodeGenerator,
    max_generate_attempts: usize,
}

impl<R: LinkRepository> LinkService<R> {
    /// Creates a new link service.
    ///
    /// `max_generate_attempts` bounds the collision-retry loop for generated
    /// codes (policy constant, 10 by default at the config layer).
    pub fn new(repository: Arc<R>, generator: CodeGenerator, max_generate_attempts: usize) -> Self {
        Self {
            repository,
            generator,
            max_generate_attempts,
        }
    }

    /// Creates a short link.
    ///
    /// The target gets an `https://` prefix when it lacks a scheme, then must
    /// parse as an absolute http(s) URL. A custom code is validated and used
    /// as-is; it is never retried or mutated on conflict. Without a custom
    /// code, candidates are generated and inserted until one sticks.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidTarget`] - target missing or malformed
    /// - [`AppError::InvalidCode`] - custom code fails the 6-8 alphanumeric pattern
    /// - [`AppError::Conflict`] - custom code already exists
    /// - [`AppError::GenerationExhausted`] - every generated candidate collided
    pub async fn create_link(
        &self,
        target: String,
        custom_code: Option<String>,
    ) -> Result<Link, AppError> {
        let target = normalize_target(&target).map_err(|e| {
            AppError::invalid_target(e.to_string(), json!({ "reason": e.to_string() }))
        })?;

        if let Some(code) = custom_code {
            validate_code(&code)?;

            return match self
                .repository
                .create(NewLink {
                    code: code.clone(),
                    target,
                })
                .await
            {
                Err(AppError::Conflict { .. }) => Err(AppError::conflict(
                    "Code already exists",
                    json!({ "code": code }),
                )),
                other => other,
            };
        }

        self.create_with_generated_code(target).await
    }

    /// Resolves a code to its target, recording the visit in the same
    /// logical step.
    ///
    /// The repository's atomic increment is the only lookup performed, so a
    /// link is never "found" without its visit being recorded, and a race
    /// with delete yields a clean `NotFound`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code has no link.
    pub async fn resolve_and_record_visit(&self, code: &str) -> Result<String, AppError> {
        let link = self
            .repository
            .record_visit(code)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))?;

        tracing::debug!(code, clicks = link.clicks, "visit recorded");

        Ok(link.target)
    }

    /// Retrieves a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches the code.
    pub async fn get_link(&self, code: &str) -> Result<Link, AppError> {
        self.repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))
    }

    /// Permanently deletes a link.
    ///
    /// The store-level delete is idempotent; at this boundary a missing code
    /// is reported as `NotFound`.
    pub async fn delete_link(&self, code: &str) -> Result<(), AppError> {
        if !self.repository.delete(code).await? {
            return Err(AppError::not_found(
                "Short link not found",
                json!({ "code": code }),
            ));
        }

        Ok(())
    }

    /// Lists all links, newest first.
    pub async fn list_links(&self) -> Result<Vec<Link>, AppError> {
        self.repository.list().await
    }

    /// Storage connectivity check for the health endpoint.
    pub async fn health_check(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }

    /// Generates candidates and inserts until the uniqueness constraint
    /// accepts one.
    ///
    /// Each iteration is a single atomic insert; a conflict merely triggers a
    /// fresh draw. Exhausting the attempt budget signals a pathologically
    /// full keyspace (or a broken generator) and surfaces as a server error.
    async fn create_with_generated_code(&self, target: String) -> Result<Link, AppError> {
        for _ in 0..self.max_generate_attempts {
            let code = self.generator.generate();

            match self
                .repository
                .create(NewLink {
                    code,
                    target: target.clone(),
                })
                .await
            {
                Err(AppError::Conflict { .. }) => continue,
                other => return other,
            }
        }

        Err(AppError::generation_exhausted(
            "Failed to generate unique code",
            json!({ "attempts": self.max_generate_attempts }),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;
    use chrono::Utc;

    fn create_test_link(code: &str, target: &str) -> Link {
        Link::new(code.to_string(), target.to_string(), 0, None, Utc::now())
    }

    fn make_service(repo: MockLinkRepository) -> LinkService<MockLinkRepository> {
        LinkService::new(Arc::new(repo), CodeGenerator::with_seed(6, 7), 10)
    }

    #[tokio::test]
    async fn test_create_link_with_generated_code() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_create()
            .withf(|new_link| {
                new_link.code.len() == 6
                    && new_link.code.chars().all(|c| c.is_ascii_alphanumeric())
                    && new_link.target == "https://example.com"
            })
            .times(1)
            .returning(|new_link| Ok(create_test_link(&new_link.code, &new_link.target)));

        let service = make_service(mock_repo);

        let result = service
            .create_link("https://example.com".to_string(), None)
            .await;

        let link = result.unwrap();
        assert_eq!(link.target, "https://example.com");
        assert_eq!(link.clicks, 0);
        assert!(link.last_clicked.is_none());
    }

    #[tokio::test]
    async fn test_create_link_prepends_scheme() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_create()
            .withf(|new_link| new_link.target == "https://example.com")
            .times(1)
            .returning(|new_link| Ok(create_test_link(&new_link.code, &new_link.target)));

        let service = make_service(mock_repo);

        let result = service.create_link("example.com".to_string(), None).await;

        assert_eq!(result.unwrap().target, "https://example.com");
    }

    #[tokio::test]
    async fn test_create_link_invalid_target_no_write() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_create().times(0);

        let service = make_service(mock_repo);

        let result = service.create_link("not a url".to_string(), None).await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::InvalidTarget { .. }
        ));
    }

    #[tokio::test]
    async fn test_create_link_empty_target() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_create().times(0);

        let service = make_service(mock_repo);

        let result = service.create_link(String::new(), None).await;

        let err = result.unwrap_err();
        assert!(matches!(err, AppError::InvalidTarget { .. }));
        assert!(err.to_string().contains("target is required"));
    }

    #[tokio::test]
    async fn test_create_link_with_custom_code() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_create()
            .withf(|new_link| new_link.code == "myLink1")
            .times(1)
            .returning(|new_link| Ok(create_test_link(&new_link.code, &new_link.target)));

        let service = make_service(mock_repo);

        let result = service
            .create_link(
                "https://example.com".to_string(),
                Some("myLink1".to_string()),
            )
            .await;

        assert_eq!(result.unwrap().code, "myLink1");
    }

    #[tokio::test]
    async fn test_create_link_custom_code_too_short_no_write() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_create().times(0);

        let service = make_service(mock_repo);

        let result = service
            .create_link("https://a.com".to_string(), Some("abc12".to_string()))
            .await;

        assert!(matches!(result.unwrap_err(), AppError::InvalidCode { .. }));
    }

    #[tokio::test]
    async fn test_create_link_custom_code_conflict_not_retried() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_create()
            .withf(|new_link| new_link.code == "taken12")
            .times(1)
            .returning(|_| {
                Err(AppError::conflict(
                    "Unique constraint violation",
                    serde_json::json!({}),
                ))
            });

        let service = make_service(mock_repo);

        let result = service
            .create_link(
                "https://example.com".to_string(),
                Some("taken12".to_string()),
            )
            .await;

        let err = result.unwrap_err();
        assert!(matches!(err, AppError::Conflict { .. }));
        assert!(err.to_string().contains("already exists"));
    }

    #[tokio::test]
    async fn test_generated_code_retries_on_collision() {
        let mut mock_repo = MockLinkRepository::new();
        let mut calls = 0;

        mock_repo.expect_create().times(3).returning(move |new_link| {
            calls += 1;
            if calls < 3 {
                Err(AppError::conflict(
                    "Unique constraint violation",
                    serde_json::json!({}),
                ))
            } else {
                Ok(create_test_link(&new_link.code, &new_link.target))
            }
        });

        let service = make_service(mock_repo);

        let result = service
            .create_link("https://example.com".to_string(), None)
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_generation_exhausted_after_budget() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo.expect_create().times(10).returning(|_| {
            Err(AppError::conflict(
                "Unique constraint violation",
                serde_json::json!({}),
            ))
        });

        let service = make_service(mock_repo);

        let result = service
            .create_link("https://example.com".to_string(), None)
            .await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::GenerationExhausted { .. }
        ));
    }

    #[tokio::test]
    async fn test_generated_code_non_conflict_error_propagates() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_create()
            .times(1)
            .returning(|_| Err(AppError::internal("Database error", serde_json::json!({}))));

        let service = make_service(mock_repo);

        let result = service
            .create_link("https://example.com".to_string(), None)
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_resolve_and_record_visit() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_record_visit()
            .withf(|code| code == "abc123")
            .times(1)
            .returning(|code| {
                Ok(Some(Link::new(
                    code.to_string(),
                    "https://example.com".to_string(),
                    1,
                    Some(Utc::now()),
                    Utc::now(),
                )))
            });

        let service = make_service(mock_repo);

        let target = service.resolve_and_record_visit("abc123").await.unwrap();
        assert_eq!(target, "https://example.com");
    }

    #[tokio::test]
    async fn test_resolve_unknown_code() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_record_visit()
            .times(1)
            .returning(|_| Ok(None));

        let service = make_service(mock_repo);

        let result = service.resolve_and_record_visit("zzzzzz").await;
        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_get_link_not_found() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_find_by_code()
            .times(1)
            .returning(|_| Ok(None));

        let service = make_service(mock_repo);

        let result = service.get_link("ghost1").await;
        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_link_not_found() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo.expect_delete().times(1).returning(|_| Ok(false));

        let service = make_service(mock_repo);

        let result = service.delete_link("ghost1").await;
        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_link_success() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_delete()
            .withf(|code| code == "abc123")
            .times(1)
            .returning(|_| Ok(true));

        let service = make_service(mock_repo);

        assert!(service.delete_link("abc123").await.is_ok());
    }
}
