use serde::{Deserialize, Serialize};

/// TMDB's own primary key for a movie. Used only to query the metadata
/// service, never as a table position.
pub type TmdbId = u64;

/// One row of the precomputed movie table.
///
/// The title is the internal lookup key (exact, case-sensitive). The tag
/// string is the bag-of-words text the row's feature vector was derived
/// from; it is carried for inspection only, vectorization happens offline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieRecord {
    pub tmdb_id: TmdbId,
    pub title: String,
    pub tags: String,
}
