use crate::error::DimensionMismatch;

/// Immutable matrix value.
///
/// Storage is row-major and flat: element (row, col) lives at
/// `data[row * cols + col]`. Every operation returns a new `Matrix`; nothing
/// mutates in place. Transform constructors produce 4x4 homogeneous matrices.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Builds a matrix from explicit rows.
    ///
    /// Fails when rows have unequal lengths.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, DimensionMismatch> {
        let cols = rows.first().map_or(0, Vec::len);
        for row in &rows {
            if row.len() != cols {
                return Err(DimensionMismatch::new("from_rows", (1, cols), (1, row.len())));
            }
        }
        let n_rows = rows.len();
        let data = rows.into_iter().flatten().collect();
        Ok(Self { rows: n_rows, cols, data })
    }

    /// n x n identity.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zero(n, n);
        for i in 0..n {
            m.data[i * n + i] = 1.0;
        }
        m
    }

    /// All-zero matrix of the given shape.
    pub fn zero(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// 4x4 translation: identity with last column (dx, dy, dz, 1).
    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        let mut m = Self::identity(4);
        m.data[3] = dx;
        m.data[7] = dy;
        m.data[11] = dz;
        m
    }

    /// Uniform scaling: diagonal 3x3 lifted to homogeneous 4x4.
    pub fn scaling(s: f64) -> Self {
        Self::scaling_xyz(s, s, s)
    }

    /// Per-axis scaling: diagonal 3x3 lifted to homogeneous 4x4.
    pub fn scaling_xyz(sx: f64, sy: f64, sz: f64) -> Self {
        let mut m = Self::zero(3, 3);
        m.data[0] = sx;
        m.data[4] = sy;
        m.data[8] = sz;
        lift_3x3(&m)
    }

    /// Rotation about the Z axis by `theta` radians, lifted to homogeneous 4x4.
    ///
    /// Embedded 3x3 rows: `[cos, -sin, 0], [sin, cos, 0], [0, 0, 1]`.
    pub fn rotation_around_z(theta: f64) -> Self {
        let (sin, cos) = theta.sin_cos();
        let mut m = Self::identity(3);
        m.data[0] = cos;
        m.data[1] = -sin;
        m.data[3] = sin;
        m.data[4] = cos;
        lift_3x3(&m)
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Element at (row, col). Panics on out-of-range indices, like slice indexing.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        assert!(row < self.rows && col < self.cols, "matrix index out of range");
        self.data[row * self.cols + col]
    }

    /// Lifts a 3x3 matrix to 4x4 homogeneous form: a zero is appended to each
    /// row and the final row is `[0, 0, 0, 1]`.
    ///
    /// Only 3x3 input is supported; any other shape is a dimension error.
    pub fn to_homogeneous(&self) -> Result<Self, DimensionMismatch> {
        if self.shape() != (3, 3) {
            return Err(DimensionMismatch::new("to_homogeneous", self.shape(), (3, 3)));
        }
        Ok(lift_3x3(self))
    }

    /// Standard matrix product `self * other`.
    ///
    /// Fails unless `self.cols == other.rows`.
    pub fn multiply(&self, other: &Matrix) -> Result<Self, DimensionMismatch> {
        if self.cols != other.rows {
            return Err(DimensionMismatch::new("multiply", self.shape(), other.shape()));
        }
        let mut out = Self::zero(self.rows, other.cols);
        for i in 0..self.rows {
            for k in 0..self.cols {
                let a = self.data[i * self.cols + k];
                for j in 0..other.cols {
                    out.data[i * other.cols + j] += a * other.data[k * other.cols + j];
                }
            }
        }
        Ok(out)
    }

    /// Left-to-right fold of [`multiply`](Self::multiply) over `factors`.
    ///
    /// A single factor is returned unchanged; an empty slice is an error.
    pub fn multiply_array(factors: &[Matrix]) -> Result<Self, DimensionMismatch> {
        let (first, rest) = factors
            .split_first()
            .ok_or(DimensionMismatch::new("multiply_array", (0, 0), (0, 0)))?;
        let mut acc = first.clone();
        for m in rest {
            acc = acc.multiply(m)?;
        }
        Ok(acc)
    }

    /// Swaps row and column indices.
    pub fn transpose(&self) -> Self {
        let mut out = Self::zero(self.cols, self.rows);
        for i in 0..self.rows {
            for j in 0..self.cols {
                out.data[j * self.rows + i] = self.data[i * self.cols + j];
            }
        }
        out
    }

    /// Element-wise sum. Shapes must match.
    pub fn add(&self, other: &Matrix) -> Result<Self, DimensionMismatch> {
        self.zip_elementwise(other, "add", |a, b| a + b)
    }

    /// Element-wise difference. Shapes must match.
    pub fn subtract(&self, other: &Matrix) -> Result<Self, DimensionMismatch> {
        self.zip_elementwise(other, "subtract", |a, b| a - b)
    }

    /// Multiplies every element by `scalar`.
    pub fn scale(&self, scalar: f64) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|v| v * scalar).collect(),
        }
    }

    /// Exports a 4x4 matrix as a column-major `[f32; 16]` ready for a
    /// `mat4x4<f32>` uniform upload.
    pub fn to_column_major_4x4(&self) -> Result<[f32; 16], DimensionMismatch> {
        if self.shape() != (4, 4) {
            return Err(DimensionMismatch::new("to_column_major_4x4", self.shape(), (4, 4)));
        }
        let mut out = [0.0f32; 16];
        for row in 0..4 {
            for col in 0..4 {
                out[col * 4 + row] = self.data[row * 4 + col] as f32;
            }
        }
        Ok(out)
    }

    /// True when both matrices share a shape and differ by at most `eps`
    /// per element. Intended for tests and float-tolerant comparisons.
    pub fn approx_eq(&self, other: &Matrix, eps: f64) -> bool {
        self.shape() == other.shape()
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(a, b)| (a - b).abs() <= eps)
    }

    fn zip_elementwise(
        &self,
        other: &Matrix,
        op: &'static str,
        f: impl Fn(f64, f64) -> f64,
    ) -> Result<Self, DimensionMismatch> {
        if self.shape() != other.shape() {
            return Err(DimensionMismatch::new(op, self.shape(), other.shape()));
        }
        Ok(Self {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(a, b)| f(*a, *b))
                .collect(),
        })
    }
}

/// Homogeneous lift for a known 3x3 matrix.
fn lift_3x3(m: &Matrix) -> Matrix {
    debug_assert_eq!(m.shape(), (3, 3));
    let mut out = Matrix::zero(4, 4);
    for row in 0..3 {
        for col in 0..3 {
            out.data[row * 4 + col] = m.data[row * 3 + col];
        }
    }
    out.data[15] = 1.0;
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn m(rows: Vec<Vec<f64>>) -> Matrix {
        Matrix::from_rows(rows).unwrap()
    }

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn identity_has_unit_diagonal() {
        let id = Matrix::identity(3);
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(id.get(i, j), if i == j { 1.0 } else { 0.0 });
            }
        }
    }

    #[test]
    fn from_rows_rejects_ragged_input() {
        let err = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert_eq!(err.op, "from_rows");
    }

    #[test]
    fn translation_sets_last_column() {
        let t = Matrix::translation(2.0, -3.0, 4.0);
        assert_eq!(t.get(0, 3), 2.0);
        assert_eq!(t.get(1, 3), -3.0);
        assert_eq!(t.get(2, 3), 4.0);
        assert_eq!(t.get(3, 3), 1.0);
        assert_eq!(t.get(0, 0), 1.0);
    }

    #[test]
    fn scaling_is_homogeneous_diagonal() {
        let s = Matrix::scaling_xyz(2.0, 3.0, 4.0);
        assert_eq!(s.shape(), (4, 4));
        assert_eq!(s.get(0, 0), 2.0);
        assert_eq!(s.get(1, 1), 3.0);
        assert_eq!(s.get(2, 2), 4.0);
        assert_eq!(s.get(3, 3), 1.0);
        assert_eq!(s.get(0, 1), 0.0);
    }

    #[test]
    fn uniform_scaling_matches_per_axis() {
        assert_eq!(Matrix::scaling(2.5), Matrix::scaling_xyz(2.5, 2.5, 2.5));
    }

    #[test]
    fn rotation_quarter_turn() {
        let r = Matrix::rotation_around_z(FRAC_PI_2);
        let expected = m(vec![
            vec![0.0, -1.0, 0.0, 0.0],
            vec![1.0, 0.0, 0.0, 0.0],
            vec![0.0, 0.0, 1.0, 0.0],
            vec![0.0, 0.0, 0.0, 1.0],
        ]);
        assert!(r.approx_eq(&expected, 1e-12));
    }

    #[test]
    fn zero_rotation_is_identity() {
        assert!(Matrix::rotation_around_z(0.0).approx_eq(&Matrix::identity(4), 0.0));
    }

    // ── homogeneous lift ──────────────────────────────────────────────────

    #[test]
    fn to_homogeneous_appends_unit_row_and_column() {
        let h = m(vec![
            vec![1.0, 2.0, 3.0],
            vec![4.0, 5.0, 6.0],
            vec![7.0, 8.0, 9.0],
        ])
        .to_homogeneous()
        .unwrap();

        assert_eq!(h.shape(), (4, 4));
        // Original block preserved.
        assert_eq!(h.get(1, 2), 6.0);
        // Added entries are zero except the corner.
        for i in 0..3 {
            assert_eq!(h.get(i, 3), 0.0);
            assert_eq!(h.get(3, i), 0.0);
        }
        assert_eq!(h.get(3, 3), 1.0);
    }

    #[test]
    fn to_homogeneous_rejects_non_3x3() {
        assert!(Matrix::identity(4).to_homogeneous().is_err());
        assert!(Matrix::zero(2, 3).to_homogeneous().is_err());
    }

    // ── multiply ──────────────────────────────────────────────────────────

    #[test]
    fn identity_is_multiplicative_unit() {
        let a = m(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        assert_eq!(Matrix::identity(2).multiply(&a).unwrap(), a);
        assert_eq!(a.multiply(&Matrix::identity(2)).unwrap(), a);
    }

    #[test]
    fn multiply_known_product() {
        let a = m(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let b = m(vec![vec![5.0, 6.0], vec![7.0, 8.0]]);
        let expected = m(vec![vec![19.0, 22.0], vec![43.0, 50.0]]);
        assert_eq!(a.multiply(&b).unwrap(), expected);
    }

    #[test]
    fn multiply_rectangular_shapes() {
        let a = m(vec![vec![1.0, 0.0, 2.0]]); // 1x3
        let b = m(vec![vec![1.0], vec![2.0], vec![3.0]]); // 3x1
        assert_eq!(a.multiply(&b).unwrap(), m(vec![vec![7.0]]));
    }

    #[test]
    fn multiply_rejects_incompatible_shapes() {
        let err = Matrix::identity(4).multiply(&Matrix::identity(3)).unwrap_err();
        assert_eq!(err.op, "multiply");
        assert_eq!(err.lhs, (4, 4));
        assert_eq!(err.rhs, (3, 3));
    }

    #[test]
    fn multiply_array_single_element_is_unchanged() {
        let a = Matrix::translation(1.0, 2.0, 3.0);
        assert_eq!(Matrix::multiply_array(std::slice::from_ref(&a)).unwrap(), a);
    }

    #[test]
    fn multiply_array_folds_left_to_right() {
        let a = m(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let b = m(vec![vec![0.0, 1.0], vec![1.0, 0.0]]);
        let c = m(vec![vec![2.0, 0.0], vec![0.0, 2.0]]);
        let folded = Matrix::multiply_array(&[a.clone(), b.clone(), c.clone()]).unwrap();
        let manual = a.multiply(&b).unwrap().multiply(&c).unwrap();
        assert_eq!(folded, manual);
    }

    #[test]
    fn multiply_array_rejects_empty_input() {
        assert!(Matrix::multiply_array(&[]).is_err());
    }

    // ── transpose ─────────────────────────────────────────────────────────

    #[test]
    fn transpose_swaps_indices() {
        let a = m(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
        let t = a.transpose();
        assert_eq!(t.shape(), (3, 2));
        assert_eq!(t.get(2, 1), 6.0);
        assert_eq!(t.get(0, 1), 4.0);
    }

    #[test]
    fn transpose_is_involution() {
        let a = m(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
        assert_eq!(a.transpose().transpose(), a);
    }

    // ── element-wise ops ──────────────────────────────────────────────────

    #[test]
    fn add_and_subtract_roundtrip() {
        let a = m(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let b = m(vec![vec![0.5, 0.5], vec![0.5, 0.5]]);
        assert_eq!(a.add(&b).unwrap().subtract(&b).unwrap(), a);
    }

    #[test]
    fn add_rejects_shape_mismatch() {
        let err = Matrix::zero(2, 2).add(&Matrix::zero(2, 3)).unwrap_err();
        assert_eq!(err.op, "add");
    }

    #[test]
    fn subtract_rejects_shape_mismatch() {
        assert!(Matrix::zero(3, 1).subtract(&Matrix::zero(1, 3)).is_err());
    }

    #[test]
    fn scale_multiplies_every_element() {
        let a = m(vec![vec![1.0, -2.0], vec![0.0, 4.0]]);
        assert_eq!(a.scale(0.5), m(vec![vec![0.5, -1.0], vec![0.0, 2.0]]));
    }

    // ── uniform export ────────────────────────────────────────────────────

    #[test]
    fn column_major_export_transposes_layout() {
        let t = Matrix::translation(5.0, 6.0, 7.0);
        let cols = t.to_column_major_4x4().unwrap();
        // Translation lives in the last column => elements 12..15 in
        // column-major order.
        assert_eq!(&cols[12..16], &[5.0, 6.0, 7.0, 1.0]);
        assert_eq!(cols[0], 1.0);
    }

    #[test]
    fn column_major_export_rejects_non_4x4() {
        assert!(Matrix::identity(3).to_column_major_4x4().is_err());
    }
}
