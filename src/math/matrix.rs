use serde::{Serialize, Deserialize};
use std::ops::Sub;

use crate::error::Error;

/// Weights connecting one layer to the next.
///
/// Row `r` holds the weights feeding output node `r`. Column 0 is that
/// node's bias weight; column `j + 1` is the weight on input node `j`.
/// A matrix therefore has `output_count` rows and `input_count + 1` columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawWeightMatrix")]
pub struct WeightMatrix {
    rows: usize,
    cols: usize,
    data: Vec<Vec<f64>>,
}

impl WeightMatrix {
    /// All-zero matrix for `output_count` nodes fed by `input_count` inputs
    /// (the bias column is added on top).
    pub fn zeros(output_count: usize, input_count: usize) -> WeightMatrix {
        let cols = input_count + 1;
        WeightMatrix {
            rows: output_count,
            cols,
            data: vec![vec![0.0; cols]; output_count],
        }
    }

    /// Builds a matrix from raw rows, bias column first.
    ///
    /// # Panics
    /// Panics if `data` is empty, a row is empty, or the rows are ragged.
    pub fn from_data(data: Vec<Vec<f64>>) -> WeightMatrix {
        assert!(!data.is_empty(), "weight matrix needs at least one row");
        let cols = data[0].len();
        assert!(cols > 0, "weight matrix needs a bias column");
        assert!(
            data.iter().all(|row| row.len() == cols),
            "weight matrix rows must have equal length"
        );
        WeightMatrix {
            rows: data.len(),
            cols,
            data,
        }
    }

    /// Fills a matrix by calling `f(row, col)` in row-major order.
    pub fn from_fn<F>(output_count: usize, input_count: usize, mut f: F) -> WeightMatrix
    where
        F: FnMut(usize, usize) -> f64,
    {
        let cols = input_count + 1;
        let data = (0..output_count)
            .map(|r| (0..cols).map(|c| f(r, c)).collect())
            .collect();
        WeightMatrix {
            rows: output_count,
            cols,
            data,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of nodes this matrix feeds.
    pub fn output_count(&self) -> usize {
        self.rows
    }

    /// Number of inputs, not counting the bias.
    pub fn input_count(&self) -> usize {
        self.cols - 1
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row][col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row][col] = value;
    }

    pub fn bias(&self, node: usize) -> f64 {
        self.data[node][0]
    }

    pub fn input_weight(&self, node: usize, input: usize) -> f64 {
        self.data[node][input + 1]
    }

    /// Full row for `node`, bias first.
    pub fn row(&self, node: usize) -> &[f64] {
        &self.data[node]
    }

    /// Row for `node` without the bias weight.
    pub fn input_weights(&self, node: usize) -> &[f64] {
        &self.data[node][1..]
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.iter().map(|row| row.as_slice())
    }

    pub fn same_shape(&self, other: &WeightMatrix) -> bool {
        self.rows == other.rows && self.cols == other.cols
    }

    pub fn map<F>(&self, functor: F) -> WeightMatrix
    where
        F: Fn(f64) -> f64,
    {
        WeightMatrix {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .map(|row| row.iter().map(|&x| functor(x)).collect())
                .collect(),
        }
    }

    /// Sum of squared weights, bias column excluded.
    pub fn input_weight_square_sum(&self) -> f64 {
        self.data
            .iter()
            .flat_map(|row| row[1..].iter())
            .map(|w| w * w)
            .sum()
    }
}

#[derive(Deserialize)]
struct RawWeightMatrix {
    rows: usize,
    cols: usize,
    data: Vec<Vec<f64>>,
}

impl TryFrom<RawWeightMatrix> for WeightMatrix {
    type Error = Error;

    fn try_from(raw: RawWeightMatrix) -> Result<Self, Self::Error> {
        if raw.rows == 0 || raw.cols == 0 {
            return Err(Error::InvalidShape("weight matrix needs a row and a bias column".into()));
        }
        if raw.data.len() != raw.rows || raw.data.iter().any(|row| row.len() != raw.cols) {
            return Err(Error::InvalidShape(format!(
                "weight data does not match its {}x{} shape",
                raw.rows, raw.cols
            )));
        }
        Ok(WeightMatrix {
            rows: raw.rows,
            cols: raw.cols,
            data: raw.data,
        })
    }
}

impl Sub for &WeightMatrix {
    type Output = WeightMatrix;

    fn sub(self, rhs: Self) -> Self::Output {
        if !self.same_shape(rhs) {
            panic!("Matrices are of incorrect sizes")
        }

        let data = self.data.iter().zip(rhs.data.iter())
            .map(|(row_a, row_b)| {
                row_a.iter().zip(row_b.iter()).map(|(a, b)| a - b).collect()
            })
            .collect();

        WeightMatrix {
            rows: self.rows,
            cols: self.cols,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_includes_bias_column() {
        let m = WeightMatrix::zeros(3, 2);
        assert_eq!(m.rows(), 3);
        assert_eq!(m.cols(), 3);
        assert_eq!(m.output_count(), 3);
        assert_eq!(m.input_count(), 2);
    }

    #[test]
    fn bias_and_input_accessors_split_the_row() {
        let m = WeightMatrix::from_data(vec![
            vec![0.5, 1.0, 2.0],
            vec![-0.5, 3.0, 4.0],
        ]);
        assert_eq!(m.bias(0), 0.5);
        assert_eq!(m.bias(1), -0.5);
        assert_eq!(m.input_weight(0, 0), 1.0);
        assert_eq!(m.input_weight(1, 1), 4.0);
        assert_eq!(m.input_weights(1), &[3.0, 4.0]);
        assert_eq!(m.row(0), &[0.5, 1.0, 2.0]);
    }

    #[test]
    fn square_sum_skips_bias() {
        let m = WeightMatrix::from_data(vec![vec![10.0, 1.0, 2.0], vec![10.0, 3.0, 0.0]]);
        assert_eq!(m.input_weight_square_sum(), 14.0);
    }

    #[test]
    fn sub_is_elementwise() {
        let a = WeightMatrix::from_data(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let b = WeightMatrix::from_data(vec![vec![0.5, 0.5], vec![1.0, 1.0]]);
        let c = &a - &b;
        assert_eq!(c, WeightMatrix::from_data(vec![vec![0.5, 1.5], vec![2.0, 3.0]]));
    }

    #[test]
    #[should_panic]
    fn sub_rejects_mismatched_shapes() {
        let a = WeightMatrix::zeros(2, 2);
        let b = WeightMatrix::zeros(2, 3);
        let _ = &a - &b;
    }

    #[test]
    fn deserializing_checks_the_shape() {
        let m = WeightMatrix::from_data(vec![vec![0.5, 1.0], vec![-0.5, 2.0]]);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(serde_json::from_str::<WeightMatrix>(&json).unwrap(), m);

        for bad in [
            r#"{"rows":0,"cols":0,"data":[]}"#,
            r#"{"rows":2,"cols":2,"data":[[1.0,2.0]]}"#,
            r#"{"rows":1,"cols":2,"data":[[1.0]]}"#,
        ] {
            assert!(serde_json::from_str::<WeightMatrix>(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn from_fn_fills_row_major() {
        let m = WeightMatrix::from_fn(2, 1, |r, c| (r * 10 + c) as f64);
        assert_eq!(m.row(0), &[0.0, 1.0]);
        assert_eq!(m.row(1), &[10.0, 11.0]);
    }
}
