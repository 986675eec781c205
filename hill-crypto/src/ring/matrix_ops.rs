use crate::errors::HillCryptoError;
use crate::ring::helper::map_matrix;
use crate::ring::{Matrix, Ring, Vector};

use itertools::iproduct;

/// A·x where A is an m×n matrix and x is a length–n vector, reduced into the ring.
/// Returns an m‐vector.
///
/// This is the per-block step of the cipher: a key (or inverse key) times one column block.
pub fn matrix_vector_mul(a: &Matrix, x: &[i64], ring: &Ring) -> Result<Vector, HillCryptoError> {
    a.iter()
        .enumerate()
        .map(|(i, row)| {
            if row.len() != x.len() {
                return Err(HillCryptoError::DimensionMismatch(format!(
                    "Row {} has length {} but the vector has length {}",
                    i,
                    row.len(),
                    x.len()
                )));
            }
            Ok(row
                .iter()
                .zip(x)
                .fold(0, |sum, (&a_ij, &x_j)| ring.add(sum, ring.mul(a_ij, x_j))))
        })
        .collect()
}

/// Computes the matrix product `C = AB` modulo `m`, where `m` is the modulus of the ring.
///
/// # Errors
///
/// Returns `HillCryptoError::DimensionMismatch` if the inner dimensions of the matrices do not match
/// or if rows within the matrices have inconsistent lengths.
pub fn matrix_mul(a: &Matrix, b: &Matrix, ring: &Ring) -> Result<Matrix, HillCryptoError> {
    let Some(first) = b.first() else {
        return Ok(vec![Vec::new(); a.len()]);
    };
    let p = first.len();
    if let Some(k) = b.iter().position(|row| row.len() != p) {
        return Err(HillCryptoError::DimensionMismatch(format!(
            "Matrix B row {} has incorrect length (expected {})",
            k, p
        )));
    }

    // C = (B^T · A_i^T)^T, one row of A at a time
    let b_t: Matrix = (0..p).map(|j| b.iter().map(|row| row[j]).collect()).collect();
    a.iter()
        .map(|row| {
            if row.len() != b.len() {
                return Err(HillCryptoError::DimensionMismatch(format!(
                    "Inner dimensions must match for matrix multiplication ({} vs {})",
                    row.len(),
                    b.len()
                )));
            }
            matrix_vector_mul(&b_t, row, ring)
        })
        .collect()
}

/// Creates an identity matrix of size `n`.
pub fn identity_matrix(n: usize) -> Matrix {
    let mut identity = vec![vec![0; n]; n];
    #[allow(clippy::needless_range_loop)]
    for i in 0..n {
        identity[i][i] = 1;
    }
    identity
}

/// Checks that `matrix` is square and returns its order.
fn square_order(matrix: &Matrix) -> Result<usize, HillCryptoError> {
    let n = matrix.len();
    for (i, row) in matrix.iter().enumerate() {
        if row.len() != n {
            return Err(HillCryptoError::DimensionMismatch(format!(
                "Row {} has length {} but a square matrix of order {} was expected",
                i,
                row.len(),
                n
            )));
        }
    }
    Ok(n)
}

/// Signed 2×2 minor cofactor of a 3×3 matrix at `(row, col)`.
fn cofactor3(matrix: &Matrix, row: usize, col: usize) -> i64 {
    let rows: Vec<usize> = (0..3).filter(|&r| r != row).collect();
    let cols: Vec<usize> = (0..3).filter(|&c| c != col).collect();

    let minor = matrix[rows[0]][cols[0]] * matrix[rows[1]][cols[1]]
        - matrix[rows[0]][cols[1]] * matrix[rows[1]][cols[0]];

    if (row + col) % 2 == 0 { minor } else { -minor }
}

/// Computes the exact determinant of a 2×2 or 3×3 matrix over the integers.
///
/// No modular reduction happens here; callers reduce with [`Ring::normalize`].
///
/// # Errors
///
/// Returns `HillCryptoError::DimensionMismatch` if the matrix is not square and
/// `HillCryptoError::UnsupportedSize` for any order other than 2 or 3.
pub fn determinant(matrix: &Matrix) -> Result<i64, HillCryptoError> {
    let m = matrix;
    match square_order(m)? {
        2 => Ok(m[0][0] * m[1][1] - m[0][1] * m[1][0]),
        3 => Ok(m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])),
        n => Err(HillCryptoError::UnsupportedSize(n)),
    }
}

/// Whether a determinant makes its matrix invertible over `ring`.
///
/// The reduced determinant must be nonzero and coprime with the modulus; for Z_26 these are
/// exactly the odd residues other than 13.
pub fn is_invertible(determinant: i64, ring: &Ring) -> bool {
    ring.is_unit(determinant)
}

/// Builds the adjugate (transposed cofactor matrix) of a 2×2 or 3×3 matrix.
///
/// Every entry is reduced into `[0, modulus - 1]` on its own, since cofactors are often negative.
pub fn adjugate(matrix: &Matrix, ring: &Ring) -> Result<Matrix, HillCryptoError> {
    let m = matrix;
    match square_order(m)? {
        2 => Ok(vec![
            vec![ring.normalize(m[1][1]), ring.neg(m[0][1])],
            vec![ring.neg(m[1][0]), ring.normalize(m[0][0])],
        ]),
        3 => {
            let mut adj = vec![vec![0i64; 3]; 3];
            for (i, j) in iproduct!(0..3, 0..3) {
                // transposed position
                adj[i][j] = ring.normalize(cofactor3(m, j, i));
            }
            Ok(adj)
        }
        n => Err(HillCryptoError::UnsupportedSize(n)),
    }
}

/// Computes the inverse of a 2×2 or 3×3 matrix modulo the ring's modulus.
///
/// `inv = (det^-1 · adj) mod m`, entrywise, with every entry in `[0, m - 1]`.
///
/// # Errors
///
/// * `HillCryptoError::UnsupportedSize` / `DimensionMismatch` for unusable shapes.
/// * `HillCryptoError::NotInvertible` if the determinant is zero or not coprime with the modulus.
/// * `HillCryptoError::NoModularInverse` if no inverse of the determinant was found.
pub fn matrix_mod_inv(matrix: &Matrix, ring: &Ring) -> Result<Matrix, HillCryptoError> {
    let det = ring.normalize(determinant(matrix)?);
    log::debug!("determinant: {} (mod {})", det, ring.modulus());

    if !is_invertible(det, ring) {
        return Err(HillCryptoError::NotInvertible { determinant: det });
    }

    let det_inv = ring.inv(det)?;
    let adj = adjugate(matrix, ring)?;

    Ok(map_matrix(&adj, &|v| ring.mul(det_inv, v)))
}
