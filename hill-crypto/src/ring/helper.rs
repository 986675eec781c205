use crate::ring::Matrix;

use num_integer::Integer;

/// Computes the greatest common divisor of two numbers.
///
/// The result is always non-negative.
pub fn gcd(a: i64, b: i64) -> i64 {
    a.gcd(&b)
}

/// Check if two numbers are coprime.
pub fn is_coprime(a: i64, b: i64) -> bool {
    gcd(a, b) == 1
}

/// Finds the unique `x` in `[1, m - 1]` with `(a * x) mod m == 1`.
///
/// Plain exhaustive search: the cipher only ever asks about m = 26.
/// `a` does not have to be reduced beforehand. Returns `None` when
/// `gcd(a, m) != 1` or when `m <= 1`.
pub fn mod_inverse(a: i64, m: u64) -> Option<i64> {
    if m <= 1 {
        return None;
    }

    let m = m as i64;
    let a = a.mod_floor(&m);

    (1..m).find(|&x| (a * x).mod_floor(&m) == 1)
}

/// Maps each element of a matrix using the provided mapping function.
pub fn map_matrix(matrix: &Matrix, mapper: &dyn Fn(i64) -> i64) -> Matrix {
    matrix
        .iter()
        .map(|row| row.iter().map(|&val| mapper(val)).collect())
        .collect()
}
