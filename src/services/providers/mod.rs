/// Movie metadata provider abstraction
///
/// The page needs three lookups per movie (details, poster, cast), all keyed
/// by the TMDB id from the movie table. Keeping them behind one trait lets
/// tests swap the remote service out and leaves room for a different
/// metadata backend without touching the handlers.
use crate::{
    error::AppResult,
    models::{CastMember, MovieDetails, TmdbId},
};

pub mod tmdb;

/// Trait for movie metadata providers
///
/// Every method is fallible; graceful degradation to placeholder values is
/// the job of `MetadataService`, not of providers.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Fetch title and overview for a movie
    async fn fetch_details(&self, tmdb_id: TmdbId) -> AppResult<MovieDetails>;

    /// Fetch the poster URL for a movie, if it has one
    async fn fetch_poster(&self, tmdb_id: TmdbId) -> AppResult<Option<String>>;

    /// Fetch the top-billed cast for a movie, at most 9 entries
    async fn fetch_cast(&self, tmdb_id: TmdbId) -> AppResult<Vec<CastMember>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
