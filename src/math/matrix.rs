use rand::Rng;
use rand_distr::StandardNormal;
use std::ops::Index;

/// Dense row-major matrix. For a layer's weights, `rows` is the number of
/// neurons (outputs) and `cols` the fan-in (inputs).
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows],
        }
    }

    /// Overwrites every entry in place with a fresh draw from N(0, dev²).
    ///
    /// Every entry is sampled separately, so no two rows end up equal.
    pub fn fill_normal<R: Rng + ?Sized>(&mut self, dev: f64, rng: &mut R) {
        for row in &mut self.data {
            for x in row.iter_mut() {
                *x = dev * rng.sample::<f64, _>(StandardNormal);
            }
        }
    }

    /// Matrix-vector product: `out[r] = Σ_c self[r][c] * v[c]`.
    ///
    /// Callers validate `v.len() == self.cols`.
    pub fn mul_vec(&self, v: &[f64]) -> Vec<f64> {
        debug_assert_eq!(v.len(), self.cols);
        self.data.iter().map(|row| dot(row, v)).collect()
    }

    /// Transposed matrix-vector product: `out[c] = Σ_r self[r][c] * v[r]`.
    pub fn transpose_mul_vec(&self, v: &[f64]) -> Vec<f64> {
        debug_assert_eq!(v.len(), self.rows);
        let mut out = vec![0.0; self.cols];
        for (row, &scale) in self.data.iter().zip(v) {
            for (o, w) in out.iter_mut().zip(row) {
                *o += w * scale;
            }
        }
        out
    }

    /// Rank-one update: `self[r][c] += alpha * left[r] * right[c]`.
    pub fn add_outer(&mut self, alpha: f64, left: &[f64], right: &[f64]) {
        debug_assert_eq!(left.len(), self.rows);
        debug_assert_eq!(right.len(), self.cols);
        for (row, &l) in self.data.iter_mut().zip(left) {
            let scale = alpha * l;
            for (w, &r) in row.iter_mut().zip(right) {
                *w += scale * r;
            }
        }
    }
}

pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        &self.data[row][col]
    }
}
