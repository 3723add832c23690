use std::sync::Arc;

use crate::models::{CastMember, MovieDetails, TmdbId};
use crate::services::providers::MetadataProvider;

/// Non-raising metadata surface the page is rendered from.
///
/// Provider failures never reach the handlers: every lookup degrades to a
/// placeholder value (title "N/A", empty overview, no poster, empty cast)
/// and the failure is logged at warn level.
#[derive(Clone)]
pub struct MetadataService {
    provider: Arc<dyn MetadataProvider>,
}

impl MetadataService {
    pub fn new(provider: Arc<dyn MetadataProvider>) -> Self {
        Self { provider }
    }

    /// Title and overview, placeholder on any provider failure
    pub async fn details(&self, tmdb_id: TmdbId) -> MovieDetails {
        match self.provider.fetch_details(tmdb_id).await {
            Ok(details) => details,
            Err(err) => {
                tracing::warn!(
                    tmdb_id = tmdb_id,
                    provider = self.provider.name(),
                    error = %err,
                    "Details fetch failed, using placeholder"
                );
                MovieDetails::placeholder()
            }
        }
    }

    /// Poster URL; `None` covers both "no poster" and provider failure
    pub async fn poster(&self, tmdb_id: TmdbId) -> Option<String> {
        match self.provider.fetch_poster(tmdb_id).await {
            Ok(poster) => poster,
            Err(err) => {
                tracing::warn!(
                    tmdb_id = tmdb_id,
                    provider = self.provider.name(),
                    error = %err,
                    "Poster fetch failed"
                );
                None
            }
        }
    }

    /// Cast list, empty on provider failure
    pub async fn cast(&self, tmdb_id: TmdbId) -> Vec<CastMember> {
        match self.provider.fetch_cast(tmdb_id).await {
            Ok(cast) => cast,
            Err(err) => {
                tracing::warn!(
                    tmdb_id = tmdb_id,
                    provider = self.provider.name(),
                    error = %err,
                    "Cast fetch failed"
                );
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::services::providers::MockMetadataProvider;

    fn failing_provider() -> MockMetadataProvider {
        let mut provider = MockMetadataProvider::new();
        provider
            .expect_fetch_details()
            .returning(|_| Err(AppError::ExternalApi("status 404".to_string())));
        provider
            .expect_fetch_poster()
            .returning(|_| Err(AppError::ExternalApi("status 404".to_string())));
        provider
            .expect_fetch_cast()
            .returning(|_| Err(AppError::ExternalApi("status 404".to_string())));
        provider.expect_name().return_const("mock");
        provider
    }

    #[tokio::test]
    async fn test_details_degrade_to_placeholder() {
        let service = MetadataService::new(Arc::new(failing_provider()));
        let details = service.details(42).await;
        assert_eq!(details.title, "N/A");
        assert_eq!(details.overview, "");
    }

    #[tokio::test]
    async fn test_poster_degrades_to_none() {
        let service = MetadataService::new(Arc::new(failing_provider()));
        assert_eq!(service.poster(42).await, None);
    }

    #[tokio::test]
    async fn test_cast_degrades_to_empty() {
        let service = MetadataService::new(Arc::new(failing_provider()));
        assert!(service.cast(42).await.is_empty());
    }

    #[tokio::test]
    async fn test_success_passes_through() {
        let mut provider = MockMetadataProvider::new();
        provider.expect_fetch_details().returning(|_| {
            Ok(MovieDetails {
                title: "Inception".to_string(),
                overview: "Dreams within dreams".to_string(),
            })
        });
        provider.expect_name().return_const("mock");

        let service = MetadataService::new(Arc::new(provider));
        let details = service.details(27205).await;
        assert_eq!(details.title, "Inception");
        assert_eq!(details.overview, "Dreams within dreams");
    }
}
