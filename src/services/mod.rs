pub mod metadata;
pub mod neighbors;
pub mod providers;
pub mod recommender;

pub use metadata::MetadataService;
pub use neighbors::NeighborIndex;
pub use recommender::Recommender;
