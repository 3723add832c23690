mod details;
mod movie;

pub use details::{
    ApiCastEntry, ApiCredits, ApiMovieDetails, CastMember, MovieDetails, Recommendation,
    PLACEHOLDER_PORTRAIT_URL, PLACEHOLDER_POSTER_URL,
};
pub use movie::{MovieRecord, TmdbId};
