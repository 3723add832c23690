use std::sync::Arc;

use tracing::{debug, instrument};

use crate::data::MovieTable;
use crate::error::{AppError, AppResult};
use crate::models::Recommendation;
use crate::services::neighbors::NeighborIndex;

/// Number of neighbors fetched per query. More than the 5 slots on the page
/// so that the query movie itself and near-duplicate tag rows can be skipped
/// without starving the strip.
const NEIGHBOR_POOL: usize = 11;

/// Number of recommendations shown on the page
pub const MAX_RECOMMENDATIONS: usize = 5;

/// Similar-movie lookup over the immutable table and neighbor index
pub struct Recommender {
    table: Arc<MovieTable>,
    index: NeighborIndex,
}

impl Recommender {
    pub fn new(table: Arc<MovieTable>, index: NeighborIndex) -> Self {
        Self { table, index }
    }

    /// Up to 5 distinct movies most similar to `query_title`, ascending by
    /// distance, never including the query itself.
    ///
    /// Returns `NotFound` when the title is not in the table. Duplicate
    /// titles among the neighbors collapse into one recommendation, keeping
    /// the row seen first; the strip may come up short of 5 when the
    /// neighbor pool holds too few distinct titles.
    #[instrument(skip(self))]
    pub fn recommend(&self, query_title: &str) -> AppResult<Vec<Recommendation>> {
        let query_row = self
            .table
            .position_of(query_title)
            .ok_or_else(|| AppError::NotFound(format!("Unknown movie title: {query_title}")))?;

        let neighbors = self.index.nearest_to_row(query_row, NEIGHBOR_POOL);

        let mut recommendations: Vec<Recommendation> = Vec::with_capacity(MAX_RECOMMENDATIONS);
        for neighbor in neighbors {
            let record = match self.table.get(neighbor.row) {
                Some(record) => record,
                None => continue,
            };

            if record.title == query_title {
                continue;
            }
            if recommendations.iter().any(|r| r.title == record.title) {
                continue;
            }

            recommendations.push(Recommendation {
                row: neighbor.row,
                tmdb_id: record.tmdb_id,
                title: record.title.clone(),
            });

            if recommendations.len() == MAX_RECOMMENDATIONS {
                break;
            }
        }

        debug!(
            query = %query_title,
            count = recommendations.len(),
            "Computed recommendations"
        );

        Ok(recommendations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::FeatureMatrix;
    use crate::models::MovieRecord;

    fn record(tmdb_id: u64, title: &str) -> MovieRecord {
        MovieRecord {
            tmdb_id,
            title: title.to_string(),
            tags: String::new(),
        }
    }

    fn recommender(records: Vec<MovieRecord>, rows: Vec<Vec<f32>>) -> Recommender {
        let table = Arc::new(MovieTable::from_records(records));
        let index = NeighborIndex::build(FeatureMatrix::from_rows(rows).unwrap());
        Recommender::new(table, index)
    }

    /// Six titles at strictly increasing distance from A
    fn line_fixture() -> Recommender {
        recommender(
            vec![
                record(1, "A"),
                record(2, "B"),
                record(3, "C"),
                record(4, "D"),
                record(5, "E"),
                record(6, "F"),
            ],
            vec![
                vec![0.0],
                vec![1.0],
                vec![2.0],
                vec![3.0],
                vec![4.0],
                vec![5.0],
            ],
        )
    }

    #[test]
    fn test_ordered_by_ascending_distance() {
        let rec = line_fixture();
        let titles: Vec<String> = rec
            .recommend("A")
            .unwrap()
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(titles, vec!["B", "C", "D", "E", "F"]);
    }

    #[test]
    fn test_never_recommends_the_query() {
        let rec = line_fixture();
        for title in ["A", "B", "C", "D", "E", "F"] {
            let result = rec.recommend(title).unwrap();
            assert!(result.iter().all(|r| r.title != title));
        }
    }

    #[test]
    fn test_no_duplicate_titles() {
        let rec = line_fixture();
        for title in ["A", "B", "C", "D", "E", "F"] {
            let result = rec.recommend(title).unwrap();
            let mut titles: Vec<&str> = result.iter().map(|r| r.title.as_str()).collect();
            titles.sort_unstable();
            titles.dedup();
            assert_eq!(titles.len(), result.len());
        }
    }

    #[test]
    fn test_at_most_five() {
        let records = (0..20).map(|i| record(i, &format!("M{i}"))).collect();
        let rows = (0..20).map(|i| vec![i as f32]).collect();
        let rec = recommender(records, rows);
        assert_eq!(rec.recommend("M0").unwrap().len(), 5);
    }

    #[test]
    fn test_unknown_title_is_not_found() {
        let rec = line_fixture();
        let err = rec.recommend("Not In Table").unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_deterministic() {
        let rec = line_fixture();
        assert_eq!(rec.recommend("C").unwrap(), rec.recommend("C").unwrap());
    }

    #[test]
    fn test_duplicate_titled_rows_collapse() {
        // Two "Twin" rows right next to the query; only the nearer survives,
        // and its own row is the one reported.
        let rec = recommender(
            vec![
                record(1, "A"),
                record(2, "Twin"),
                record(3, "Twin"),
                record(4, "B"),
            ],
            vec![vec![0.0], vec![1.0], vec![2.0], vec![3.0]],
        );

        let result = rec.recommend("A").unwrap();
        let titles: Vec<&str> = result.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Twin", "B"]);
        assert_eq!(result[0].row, 1);
        assert_eq!(result[0].tmdb_id, 2);
    }

    #[test]
    fn test_short_strip_when_candidates_run_out() {
        let rec = recommender(
            vec![record(1, "A"), record(2, "B"), record(3, "C")],
            vec![vec![0.0], vec![1.0], vec![2.0]],
        );
        assert_eq!(rec.recommend("A").unwrap().len(), 2);
    }

    #[test]
    fn test_self_titled_duplicate_rows_are_skipped() {
        // A second row titled "A" sits nearer than any real candidate; it
        // must be excluded just like the query row itself.
        let rec = recommender(
            vec![record(1, "A"), record(2, "A"), record(3, "B")],
            vec![vec![0.0], vec![0.1], vec![5.0]],
        );

        let result = rec.recommend("A").unwrap();
        let titles: Vec<&str> = result.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["B"]);
    }
}
