/// TMDB API provider
///
/// Queries The Movie Database's REST API, keyed by an API key passed as a
/// query parameter:
///
/// 1. Details/poster: /movie/{tmdb_id} → title, overview, poster_path
/// 2. Cast: /movie/{tmdb_id}/credits → cast[].name, cast[].profile_path
///
/// Poster images resolve against the TMDB image CDN at size w342, cast
/// portraits at w185.
use std::time::Duration;

use reqwest::Client as HttpClient;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{
        ApiCredits, ApiMovieDetails, CastMember, MovieDetails, TmdbId, PLACEHOLDER_PORTRAIT_URL,
    },
    services::providers::MetadataProvider,
};

/// Cast entries shown in the 3x3 grid
const CAST_LIMIT: usize = 9;

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    image_url: String,
}

impl TmdbProvider {
    /// Creates a TMDB provider with the configured outbound timeout
    pub fn new(config: &Config) -> AppResult<Self> {
        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()?;

        Ok(Self {
            http_client,
            api_key: config.tmdb_api_key.clone(),
            api_url: config.tmdb_api_url.clone(),
            image_url: config.tmdb_image_url.clone(),
        })
    }

    /// Full CDN URL for a poster path
    fn poster_url(&self, poster_path: &str) -> String {
        format!("{}/w342{}", self.image_url, poster_path)
    }

    /// Full CDN URL for a cast portrait, placeholder when the member has no photo
    fn portrait_url(&self, profile_path: Option<String>) -> String {
        profile_path
            .map(|path| format!("{}/w185{}", self.image_url, path))
            .unwrap_or_else(|| PLACEHOLDER_PORTRAIT_URL.to_string())
    }

    /// Fetch and deserialize /movie/{id}, shared by details and poster lookups
    async fn get_movie(&self, tmdb_id: TmdbId) -> AppResult<ApiMovieDetails> {
        let url = format!("{}/movie/{}", self.api_url, tmdb_id);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {} for movie {}",
                status, tmdb_id
            )));
        }

        Ok(response.json().await?)
    }
}

#[async_trait::async_trait]
impl MetadataProvider for TmdbProvider {
    async fn fetch_details(&self, tmdb_id: TmdbId) -> AppResult<MovieDetails> {
        let details: MovieDetails = self.get_movie(tmdb_id).await?.into();

        tracing::debug!(
            tmdb_id = tmdb_id,
            title = %details.title,
            provider = "tmdb",
            "Details fetched"
        );

        Ok(details)
    }

    async fn fetch_poster(&self, tmdb_id: TmdbId) -> AppResult<Option<String>> {
        let movie = self.get_movie(tmdb_id).await?;

        Ok(movie.poster_path.map(|path| self.poster_url(&path)))
    }

    async fn fetch_cast(&self, tmdb_id: TmdbId) -> AppResult<Vec<CastMember>> {
        let url = format!("{}/movie/{}/credits", self.api_url, tmdb_id);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {} for credits of movie {}",
                status, tmdb_id
            )));
        }

        let credits: ApiCredits = response.json().await?;

        let cast: Vec<CastMember> = credits
            .cast
            .into_iter()
            .take(CAST_LIMIT)
            .map(|entry| CastMember {
                name: entry.name,
                image_url: self.portrait_url(entry.profile_path),
            })
            .collect();

        tracing::debug!(
            tmdb_id = tmdb_id,
            cast = cast.len(),
            provider = "tmdb",
            "Cast fetched"
        );

        Ok(cast)
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_provider() -> TmdbProvider {
        TmdbProvider {
            http_client: HttpClient::new(),
            api_key: "test_key".to_string(),
            api_url: "http://test.local/3".to_string(),
            image_url: "http://images.test.local/t/p".to_string(),
        }
    }

    #[test]
    fn test_provider_name() {
        assert_eq!(test_provider().name(), "tmdb");
    }

    #[test]
    fn test_poster_url() {
        let provider = test_provider();
        assert_eq!(
            provider.poster_url("/abc.jpg"),
            "http://images.test.local/t/p/w342/abc.jpg"
        );
    }

    #[test]
    fn test_portrait_url_with_photo() {
        let provider = test_provider();
        assert_eq!(
            provider.portrait_url(Some("/leo.jpg".to_string())),
            "http://images.test.local/t/p/w185/leo.jpg"
        );
    }

    #[test]
    fn test_portrait_url_without_photo() {
        let provider = test_provider();
        assert_eq!(provider.portrait_url(None), PLACEHOLDER_PORTRAIT_URL);
    }
}
