use crate::errors::HillCryptoError;
use crate::preset::alphabet::ALPHABET_SIZE;
use crate::ring::matrix_ops::{determinant, identity_matrix, is_invertible};
use crate::ring::{Matrix, Ring};

use itertools::Itertools;

use rand::Rng;

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Key orders the cipher accepts.
pub const SUPPORTED_ORDERS: [usize; 2] = [2, 3];

/// How many random matrices `KeyMatrix::random` draws before giving up.
const RANDOM_KEY_ATTEMPTS: usize = 1000;

/// A validated Hill cipher key: a 2×2 or 3×3 matrix with entries in `[0, 25]`.
///
/// Serializes as a nested array of rows; deserializing goes through [`KeyMatrix::try_with`],
/// so an invalid key never comes out of JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Matrix", into = "Matrix")]
pub struct KeyMatrix {
    rows: Matrix,
}

impl KeyMatrix {
    /// Validates `rows` as a key matrix.
    ///
    /// # Errors
    ///
    /// * `HillCryptoError::InvalidKey` if the matrix is empty, ragged, not square,
    ///   or has an entry outside `[0, 25]`.
    /// * `HillCryptoError::UnsupportedSize` if it is square but neither 2×2 nor 3×3.
    pub fn try_with(rows: Matrix) -> Result<Self, HillCryptoError> {
        let order = rows.len();
        if order == 0 {
            return Err(HillCryptoError::InvalidKey(
                "Key matrix must not be empty".to_string(),
            ));
        }

        if let Some((i, row)) = rows.iter().find_position(|row| row.len() != order) {
            return Err(HillCryptoError::InvalidKey(format!(
                "Key matrix must be square: row {} has {} entries, expected {}",
                i,
                row.len(),
                order
            )));
        }

        if !SUPPORTED_ORDERS.contains(&order) {
            return Err(HillCryptoError::UnsupportedSize(order));
        }

        let max = ALPHABET_SIZE as i64;
        if let Some(value) = rows.iter().flatten().find(|&&v| !(0..max).contains(&v)) {
            return Err(HillCryptoError::InvalidKey(format!(
                "All key matrix values must be integers between 0 and {}, got {}",
                max - 1,
                value
            )));
        }

        Ok(Self { rows })
    }

    /// The identity key of the given order; encrypts every message to its padded self.
    pub fn identity(order: usize) -> Result<Self, HillCryptoError> {
        Self::try_with(identity_matrix(order))
    }

    /// Draws a random key of the given order that is invertible mod 26.
    pub fn random<R: Rng>(order: usize, rng: &mut R) -> Result<Self, HillCryptoError> {
        if !SUPPORTED_ORDERS.contains(&order) {
            return Err(HillCryptoError::UnsupportedSize(order));
        }

        let ring = Ring::alphabet();
        let max = ALPHABET_SIZE as i64;
        for _ in 0..RANDOM_KEY_ATTEMPTS {
            let rows: Matrix = (0..order)
                .map(|_| (0..order).map(|_| rng.random_range(0..max)).collect())
                .collect();

            if is_invertible(determinant(&rows)?, &ring) {
                return Self::try_with(rows);
            }
        }

        Err(HillCryptoError::InternalError(format!(
            "could not generate an invertible {}x{} key after {} tries",
            order, order, RANDOM_KEY_ATTEMPTS
        )))
    }

    /// Reads a key from a JSON nested array, e.g. `[[3, 3], [2, 5]]`.
    pub fn from_json(json: &str) -> Result<Self, HillCryptoError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, HillCryptoError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Matrix order `n` (the block length).
    pub fn order(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &Matrix {
        &self.rows
    }

    /// Exact determinant, before any reduction.
    pub fn determinant(&self) -> Result<i64, HillCryptoError> {
        determinant(&self.rows)
    }

    /// Whether the key can be used to decrypt.
    pub fn is_invertible(&self) -> Result<bool, HillCryptoError> {
        Ok(is_invertible(self.determinant()?, &Ring::alphabet()))
    }

    /// Inverse key mod 26, see [`crate::cipher::invert_key`].
    pub fn inverse(&self) -> Result<Self, HillCryptoError> {
        crate::cipher::invert_key(self, ALPHABET_SIZE)
    }
}

impl TryFrom<Matrix> for KeyMatrix {
    type Error = HillCryptoError;

    fn try_from(rows: Matrix) -> Result<Self, Self::Error> {
        Self::try_with(rows)
    }
}

impl From<KeyMatrix> for Matrix {
    fn from(key: KeyMatrix) -> Self {
        key.rows
    }
}

/// Formats the key as rows separated by `;` and entries by `,`: `6,24,1;13,16,10;20,17,15`.
impl fmt::Display for KeyMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self.rows.iter().map(|row| row.iter().join(",")).join(";");
        write!(f, "{}", rows)
    }
}

/// Parses the [`Display`](fmt::Display) form back; whitespace around entries is ignored.
impl FromStr for KeyMatrix {
    type Err = HillCryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .trim()
            .split(';')
            .map(|row| {
                row.split(',')
                    .map(|entry| {
                        entry.trim().parse::<i64>().map_err(|e| {
                            HillCryptoError::InvalidKey(format!(
                                "Key entry {:?} is not an integer: {}",
                                entry.trim(),
                                e
                            ))
                        })
                    })
                    .collect::<Result<Vec<i64>, _>>()
            })
            .collect::<Result<Matrix, _>>()?;

        Self::try_with(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_valid_keys() -> Result<(), HillCryptoError> {
        let key = KeyMatrix::try_with(vec![vec![3, 3], vec![2, 5]])?;
        assert_eq!(key.order(), 2);
        assert_eq!(key.determinant()?, 9);
        assert!(key.is_invertible()?);

        let key = KeyMatrix::try_with(vec![vec![6, 24, 1], vec![13, 16, 10], vec![20, 17, 15]])?;
        assert_eq!(key.order(), 3);
        assert_eq!(key.determinant()?, 441);
        Ok(())
    }

    #[test]
    fn test_non_invertible_key_is_still_a_key() -> Result<(), HillCryptoError> {
        let key = KeyMatrix::try_with(vec![vec![2, 4], vec![6, 8]])?;
        assert!(!key.is_invertible()?);
        Ok(())
    }

    #[test]
    fn test_shape_errors() {
        assert!(matches!(
            KeyMatrix::try_with(Vec::new()),
            Err(HillCryptoError::InvalidKey(_))
        ));
        assert!(matches!(
            KeyMatrix::try_with(vec![vec![1, 2, 3], vec![4, 5, 6]]),
            Err(HillCryptoError::InvalidKey(_))
        ));
        assert!(matches!(
            KeyMatrix::try_with(vec![vec![1, 2], vec![3]]),
            Err(HillCryptoError::InvalidKey(_))
        ));
        assert!(matches!(
            KeyMatrix::try_with(identity_matrix(4)),
            Err(HillCryptoError::UnsupportedSize(4))
        ));
        assert!(matches!(
            KeyMatrix::try_with(vec![vec![1]]),
            Err(HillCryptoError::UnsupportedSize(1))
        ));
    }

    #[test]
    fn test_entry_range() {
        assert!(matches!(
            KeyMatrix::try_with(vec![vec![26, 0], vec![0, 1]]),
            Err(HillCryptoError::InvalidKey(_))
        ));
        assert!(matches!(
            KeyMatrix::try_with(vec![vec![1, -1], vec![0, 1]]),
            Err(HillCryptoError::InvalidKey(_))
        ));
        assert!(KeyMatrix::try_with(vec![vec![25, 0], vec![0, 25]]).is_ok());
    }

    #[test]
    fn test_display_and_parse() -> Result<(), HillCryptoError> {
        let key: KeyMatrix = "6,24,1; 13,16,10 ;20, 17, 15".parse()?;
        assert_eq!(key.to_string(), "6,24,1;13,16,10;20,17,15");
        assert_eq!(key.to_string().parse::<KeyMatrix>()?, key);

        assert!(matches!(
            "1,2;3,x".parse::<KeyMatrix>(),
            Err(HillCryptoError::InvalidKey(_))
        ));
        assert!(matches!(
            "1,2,3;4,5,6".parse::<KeyMatrix>(),
            Err(HillCryptoError::InvalidKey(_))
        ));
        Ok(())
    }

    #[test]
    fn test_json() -> Result<(), HillCryptoError> {
        let key = KeyMatrix::from_json("[[3, 3], [2, 5]]")?;
        assert_eq!(key.rows(), &vec![vec![3, 3], vec![2, 5]]);
        assert_eq!(key.to_json()?, "[[3,3],[2,5]]");

        assert!(matches!(
            KeyMatrix::from_json("[[30, 3], [2, 5]]"),
            Err(HillCryptoError::SerializationError(_))
        ));
        assert!(KeyMatrix::from_json("not json").is_err());
        Ok(())
    }

    #[test]
    fn test_random_keys_are_invertible() -> Result<(), HillCryptoError> {
        let mut rng = StdRng::seed_from_u64(12345);
        for order in SUPPORTED_ORDERS {
            for _ in 0..20 {
                let key = KeyMatrix::random(order, &mut rng)?;
                assert_eq!(key.order(), order);
                assert!(key.is_invertible()?);
            }
        }

        assert!(matches!(
            KeyMatrix::random(4, &mut rng),
            Err(HillCryptoError::UnsupportedSize(4))
        ));
        Ok(())
    }
}
