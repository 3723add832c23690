use serde::{Deserialize, Serialize};

use super::movie::TmdbId;

/// Portrait shown for cast members without a profile photo
pub const PLACEHOLDER_PORTRAIT_URL: &str =
    "https://upload.wikimedia.org/wikipedia/commons/8/89/Portrait_Placeholder.png";

/// Poster shown for recommendations without a poster of their own
pub const PLACEHOLDER_POSTER_URL: &str =
    "https://upload.wikimedia.org/wikipedia/commons/thumb/6/63/Film_camera_icon.svg/256px-Film_camera_icon.svg.png";

/// Title and synopsis of a movie as shown in the metadata panel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetails {
    pub title: String,
    pub overview: String,
}

impl MovieDetails {
    /// Placeholder shown when the metadata service is unavailable
    pub fn placeholder() -> Self {
        Self {
            title: "N/A".to_string(),
            overview: String::new(),
        }
    }
}

/// One cast entry in the 3x3 grid
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CastMember {
    pub name: String,
    pub image_url: String,
}

/// One entry of the recommendation strip.
///
/// `row` is the movie's ordinal position in the table, captured while
/// candidates are collected so duplicate titles elsewhere in the table
/// cannot remap the result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub row: usize,
    pub tmdb_id: TmdbId,
    pub title: String,
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// Raw response from GET /movie/{id}
#[derive(Debug, Clone, Deserialize)]
pub struct ApiMovieDetails {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

impl From<ApiMovieDetails> for MovieDetails {
    fn from(api: ApiMovieDetails) -> Self {
        Self {
            title: api.title.unwrap_or_else(|| "N/A".to_string()),
            overview: api.overview.unwrap_or_default(),
        }
    }
}

/// Raw response from GET /movie/{id}/credits
#[derive(Debug, Clone, Deserialize)]
pub struct ApiCredits {
    #[serde(default)]
    pub cast: Vec<ApiCastEntry>,
}

/// One cast entry of the credits response
#[derive(Debug, Clone, Deserialize)]
pub struct ApiCastEntry {
    pub name: String,
    #[serde(default)]
    pub profile_path: Option<String>,
}
