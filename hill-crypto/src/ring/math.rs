//! Implementation of ring ops using modular arithmetic.

use crate::errors::HillCryptoError;
use crate::preset::alphabet::ALPHABET_SIZE;

use super::mod_inverse;

/// Represents a finite ring Z_m using modular arithmetic.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Ring {
    pub modulus: u64,
}

impl Default for Ring {
    fn default() -> Self {
        Ring::alphabet()
    }
}

impl Ring {
    /// Create a new Ring with the given modulus.
    ///
    /// The modulus must be greater than 1.
    pub fn try_with(modulus: u64) -> Result<Self, HillCryptoError> {
        if modulus <= 1 {
            return Err(HillCryptoError::InvalidModulus(format!(
                "Modulus must be greater than 1, got {}",
                modulus
            )));
        }

        Ok(Ring { modulus })
    }

    /// The ring Z_26 every Hill cipher operation works in.
    ///
    /// ```
    /// # use hill_crypto::ring::Ring;
    /// assert_eq!(Ring::alphabet().modulus(), 26);
    /// ```
    pub const fn alphabet() -> Self {
        Ring {
            modulus: ALPHABET_SIZE,
        }
    }

    /// Returns the modulus of the ring.
    ///
    /// # Example
    ///
    /// ```
    /// # use hill_crypto::ring::Ring;
    /// let ring = Ring::try_with(13).unwrap();
    /// assert_eq!(ring.modulus(), 13);
    /// ```
    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    /// Reduces a value into `[0, modulus - 1]`.
    ///
    /// This is a true mathematical modulo: `%` alone keeps the sign of negative dividends,
    /// which cofactors routinely are.
    ///
    /// # Example
    ///
    /// ```
    /// # use hill_crypto::ring::Ring;
    /// let ring = Ring::alphabet();
    /// assert_eq!(ring.normalize(441), 25);
    /// assert_eq!(ring.normalize(-99), 5);
    /// assert_eq!(ring.normalize(-26), 0);
    /// ```
    pub fn normalize(&self, value: i64) -> i64 {
        let m = self.modulus as i64;

        let rem = value % m;
        if rem < 0 {
            return rem + m;
        }

        rem
    }

    /// Computes `(a + b) mod modulus`.
    ///
    /// ```
    /// # use hill_crypto::ring::Ring;
    /// let ring = Ring::alphabet();
    /// assert_eq!(ring.add(20, 10), 4);
    /// assert_eq!(ring.add(-2, 5), 3);
    /// ```
    pub fn add(&self, a: i64, b: i64) -> i64 {
        self.normalize(self.normalize(a) + self.normalize(b))
    }

    /// Computes `(a * b) mod modulus`.
    ///
    /// Uses `i128` internally to prevent overflow during multiplication before the modulo operation.
    ///
    /// ```
    /// # use hill_crypto::ring::Ring;
    /// let ring = Ring::alphabet();
    /// assert_eq!(ring.mul(24, 2), 22);
    /// assert_eq!(ring.mul(25, 25), 1);
    /// assert_eq!(ring.mul(-2, 13), 0);
    /// ```
    pub fn mul(&self, a: i64, b: i64) -> i64 {
        let a_norm = self.normalize(a);
        let b_norm = self.normalize(b);

        let result = (a_norm as i128 * b_norm as i128) % (self.modulus as i128);

        result as i64
    }

    /// Computes the additive inverse `-a mod modulus`.
    ///
    /// ```
    /// # use hill_crypto::ring::Ring;
    /// let ring = Ring::alphabet();
    /// assert_eq!(ring.neg(3), 23);
    /// assert_eq!(ring.neg(0), 0);
    /// assert_eq!(ring.neg(-5), 5);
    /// ```
    pub fn neg(&self, a: i64) -> i64 {
        self.normalize(-self.normalize(a))
    }

    /// Computes the modular multiplicative inverse `a^-1 mod modulus`.
    ///
    /// The inverse exists if and only if `gcd(a, modulus) == 1`.
    ///
    /// # Errors
    ///
    /// Returns `HillCryptoError::NoModularInverse` if the inverse does not exist, `a = 0` included.
    ///
    /// # Example
    ///
    /// ```
    /// # use hill_crypto::ring::Ring;
    /// let ring = Ring::alphabet();
    /// assert_eq!(ring.inv(3).unwrap(), 9); // 3 * 9 = 27 = 1 mod 26
    /// assert_eq!(ring.inv(25).unwrap(), 25);
    /// assert_eq!(ring.inv(-1).unwrap(), 25);
    /// assert!(ring.inv(13).is_err()); // gcd(13, 26) = 13
    /// assert!(ring.inv(0).is_err());
    /// ```
    pub fn inv(&self, a: i64) -> Result<i64, HillCryptoError> {
        let a_norm = self.normalize(a);

        mod_inverse(a_norm, self.modulus).ok_or(HillCryptoError::NoModularInverse {
            value: a_norm,
            modulus: self.modulus,
        })
    }

    /// Whether `a` is a unit of the ring: nonzero once reduced and coprime with the modulus.
    ///
    /// ```
    /// # use hill_crypto::ring::Ring;
    /// let ring = Ring::alphabet();
    /// assert!(ring.is_unit(441)); // 441 mod 26 = 25
    /// assert!(!ring.is_unit(26));
    /// assert!(!ring.is_unit(-2));
    /// ```
    pub fn is_unit(&self, a: i64) -> bool {
        let a_norm = self.normalize(a);

        a_norm != 0 && super::is_coprime(a_norm, self.modulus as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_creation() {
        assert!(Ring::try_with(11).is_ok());
        assert!(Ring::try_with(26).is_ok());
        assert!(Ring::try_with(1).is_err());
        assert!(Ring::try_with(0).is_err());
        assert_eq!(Ring::try_with(26).ok(), Some(Ring::alphabet()));
    }

    #[test]
    fn test_element_normalization() -> Result<(), HillCryptoError> {
        let ring = Ring::try_with(11)?;
        assert_eq!(ring.normalize(5), 5);
        assert_eq!(ring.normalize(16), 5);
        assert_eq!(ring.normalize(-6), 5);
        assert_eq!(ring.normalize(i64::MIN), ring.normalize(i64::MIN % 11 + 11));
        Ok(())
    }

    #[test]
    fn test_addition_and_negation() -> Result<(), HillCryptoError> {
        let ring = Ring::try_with(11)?;
        assert_eq!(ring.add(5, 8), 2);
        assert_eq!(ring.add(-3, 8), 5);
        assert_eq!(ring.neg(5), 6);
        assert_eq!(ring.add(7, ring.neg(7)), 0);
        Ok(())
    }

    #[test]
    fn test_multiplication() -> Result<(), HillCryptoError> {
        let ring = Ring::try_with(11)?;
        assert_eq!(ring.mul(5, 8), 7);
        assert_eq!(ring.mul(-2, 8), 6);
        assert_eq!(ring.mul(i64::MAX, i64::MAX), ring.mul(i64::MAX % 11, i64::MAX % 11));
        Ok(())
    }

    #[test]
    fn test_inversion() -> Result<(), HillCryptoError> {
        let ring = Ring::try_with(11)?;
        assert_eq!(ring.inv(5)?, 9);

        let ring = Ring::alphabet();
        assert_eq!(ring.inv(9)?, 3);
        assert!(matches!(
            ring.inv(2),
            Err(HillCryptoError::NoModularInverse {
                value: 2,
                modulus: 26
            })
        ));
        Ok(())
    }

    #[test]
    fn test_units_of_alphabet_ring() {
        let ring = Ring::alphabet();
        let units: Vec<i64> = (0..26).filter(|&a| ring.is_unit(a)).collect();
        assert_eq!(units, vec![1, 3, 5, 7, 9, 11, 15, 17, 19, 21, 23, 25]);
    }
}
