use std::sync::Arc;

use crate::config::Config;
use crate::data::{FeatureMatrix, MovieTable};
use crate::services::providers::MetadataProvider;
use crate::services::{MetadataService, NeighborIndex, Recommender};

/// Shared application state.
///
/// Everything here is immutable after startup; the currently selected movie
/// is request-scoped (the `?movie=` parameter), never process state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub table: Arc<MovieTable>,
    pub recommender: Arc<Recommender>,
    pub metadata: MetadataService,
}

impl AppState {
    /// Wires the state from loaded artifacts and a metadata provider
    pub fn build(
        config: Config,
        table: MovieTable,
        matrix: FeatureMatrix,
        provider: Arc<dyn MetadataProvider>,
    ) -> Self {
        let table = Arc::new(table);
        let index = NeighborIndex::build(matrix);
        let recommender = Arc::new(Recommender::new(Arc::clone(&table), index));

        Self {
            config: Arc::new(config),
            table,
            recommender,
            metadata: MetadataService::new(provider),
        }
    }

    /// The movie shown when no valid selection arrives with the request:
    /// the configured default if the table has it, else the first table row.
    pub fn default_title(&self) -> &str {
        if self.table.contains_title(&self.config.default_movie) {
            &self.config.default_movie
        } else {
            self.table.titles().next().unwrap_or("")
        }
    }
}
