use crate::data::FeatureMatrix;

/// One nearest-neighbor hit: a table row and its distance from the query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub row: usize,
    pub distance: f32,
}

/// Exact k-nearest-neighbor index over the feature matrix.
///
/// Queries scan every row under Euclidean distance. The matrix is loaded
/// once at startup and never mutated.
#[derive(Debug)]
pub struct NeighborIndex {
    matrix: FeatureMatrix,
}

impl NeighborIndex {
    /// Build the index over a loaded matrix
    pub fn build(matrix: FeatureMatrix) -> Self {
        Self { matrix }
    }

    /// Number of indexed rows
    pub fn len(&self) -> usize {
        self.matrix.rows()
    }

    pub fn is_empty(&self) -> bool {
        self.matrix.rows() == 0
    }

    /// The k nearest rows to `query`, ascending by distance.
    ///
    /// Equal distances are ordered by row so repeated queries return
    /// identical output. A query row is always its own nearest neighbor at
    /// distance zero.
    pub fn nearest(&self, query: &[f32], k: usize) -> Vec<Neighbor> {
        let mut neighbors: Vec<Neighbor> = self
            .matrix
            .iter()
            .enumerate()
            .map(|(row, vector)| Neighbor {
                row,
                distance: euclidean(query, vector),
            })
            .collect();

        neighbors.sort_unstable_by(|a, b| {
            a.distance.total_cmp(&b.distance).then(a.row.cmp(&b.row))
        });
        neighbors.truncate(k);
        neighbors
    }

    /// The k nearest rows to an indexed row, the row itself included
    pub fn nearest_to_row(&self, row: usize, k: usize) -> Vec<Neighbor> {
        match self.matrix.row(row) {
            Some(query) => self.nearest(query, k),
            None => Vec::new(),
        }
    }
}

fn euclidean(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f32>()
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_index(rows: Vec<Vec<f32>>) -> NeighborIndex {
        NeighborIndex::build(FeatureMatrix::from_rows(rows).unwrap())
    }

    #[test]
    fn test_euclidean_distance() {
        assert_eq!(euclidean(&[0.0, 0.0], &[3.0, 4.0]), 5.0);
        assert_eq!(euclidean(&[1.0, 1.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn test_query_row_is_its_own_nearest() {
        let index = build_index(vec![
            vec![1.0, 0.0],
            vec![0.0, 1.0],
            vec![5.0, 5.0],
        ]);

        let neighbors = index.nearest_to_row(1, 3);
        assert_eq!(neighbors[0].row, 1);
        assert_eq!(neighbors[0].distance, 0.0);
    }

    #[test]
    fn test_ascending_distance_order() {
        let index = build_index(vec![
            vec![0.0],
            vec![3.0],
            vec![1.0],
            vec![2.0],
        ]);

        let neighbors = index.nearest_to_row(0, 4);
        let rows: Vec<usize> = neighbors.iter().map(|n| n.row).collect();
        assert_eq!(rows, vec![0, 2, 3, 1]);
    }

    #[test]
    fn test_ties_broken_by_row_order() {
        // Rows 1 and 2 are both at distance 1 from row 0
        let index = build_index(vec![
            vec![0.0, 0.0],
            vec![0.0, 1.0],
            vec![1.0, 0.0],
        ]);

        let neighbors = index.nearest_to_row(0, 3);
        let rows: Vec<usize> = neighbors.iter().map(|n| n.row).collect();
        assert_eq!(rows, vec![0, 1, 2]);
    }

    #[test]
    fn test_k_larger_than_index() {
        let index = build_index(vec![vec![0.0], vec![1.0]]);
        assert_eq!(index.nearest_to_row(0, 11).len(), 2);
    }

    #[test]
    fn test_out_of_range_row_yields_nothing() {
        let index = build_index(vec![vec![0.0]]);
        assert!(index.nearest_to_row(7, 5).is_empty());
    }

    #[test]
    fn test_deterministic_queries() {
        let index = build_index(vec![
            vec![0.5, 0.5],
            vec![0.1, 0.9],
            vec![0.9, 0.1],
            vec![0.5, 0.6],
        ]);

        let first = index.nearest_to_row(0, 4);
        let second = index.nearest_to_row(0, 4);
        assert_eq!(first, second);
    }
}
