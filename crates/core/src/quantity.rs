//! Exact, non-negative stock quantity.
//!
//! Weight-based items are measured in pounds and count-based items in units;
//! both share one decimal representation so the checkout comparisons
//! (`<`, `==`, `>`) are exact.
//!
//! A single quantity is capped at [`Quantity::MAX`]; sums of capped values stay
//! far below `Decimal::MAX`, and addition saturates rather than panicking.

use core::iter::Sum;
use core::ops::{Add, AddAssign};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// A quantity of stock, never negative.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Quantity(Decimal);

impl Quantity {
    pub const ZERO: Quantity = Quantity(Decimal::ZERO);

    /// Largest quantity a single lot or cart request may hold (10^15).
    pub const MAX: Quantity = Quantity(Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0));

    pub fn new(value: Decimal) -> DomainResult<Self> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(DomainError::validation(format!(
                "quantity cannot be negative (got {value})"
            )));
        }
        if value > Self::MAX.0 {
            return Err(DomainError::validation(format!(
                "quantity cannot exceed {} (got {value})",
                Self::MAX
            )));
        }
        Ok(Self(value.normalize()))
    }

    pub fn value(self) -> Decimal {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// `self - other`, or `None` when the result would be negative.
    pub fn checked_sub(self, other: Quantity) -> Option<Quantity> {
        if other.0 > self.0 {
            return None;
        }
        Some(Self((self.0 - other.0).normalize()))
    }

    /// `self - other`, clamped at zero.
    pub fn saturating_sub(self, other: Quantity) -> Quantity {
        self.checked_sub(other).unwrap_or(Self::ZERO)
    }
}

impl ValueObject for Quantity {}

impl core::fmt::Display for Quantity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl TryFrom<Decimal> for Quantity {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for Decimal {
    fn from(value: Quantity) -> Self {
        value.0
    }
}

impl From<u32> for Quantity {
    fn from(value: u32) -> Self {
        Self(Decimal::from(value))
    }
}

impl Add for Quantity {
    type Output = Quantity;

    fn add(self, rhs: Quantity) -> Quantity {
        Self(self.0.saturating_add(rhs.0).normalize())
    }
}

impl AddAssign for Quantity {
    fn add_assign(&mut self, rhs: Quantity) {
        *self = *self + rhs;
    }
}

impl Sum for Quantity {
    fn sum<I: Iterator<Item = Quantity>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Quantity> for Quantity {
    fn sum<I: Iterator<Item = &'a Quantity>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn qty(units: i64, scale: u32) -> Quantity {
        Quantity::new(Decimal::new(units, scale)).unwrap()
    }

    #[test]
    fn negative_quantity_is_rejected() {
        let err = Quantity::new(Decimal::new(-1, 0)).unwrap_err();
        match err {
            DomainError::Validation(msg) if msg.contains("negative") => {}
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn negative_zero_is_zero() {
        let q = Quantity::new(-Decimal::new(0, 2)).unwrap();
        assert!(q.is_zero());
    }

    #[test]
    fn max_is_ten_to_the_fifteenth() {
        assert_eq!(Quantity::MAX.value(), Decimal::from(1_000_000_000_000_000u64));
        assert!(Quantity::new(Quantity::MAX.value()).is_ok());
    }

    #[test]
    fn oversized_quantity_is_rejected() {
        let huge: Decimal = "50000000000000000000000000000".parse().unwrap();
        let err = Quantity::new(huge).unwrap_err();
        match err {
            DomainError::Validation(msg) if msg.contains("exceed") => {}
            other => panic!("Expected Validation error, got {other:?}"),
        }
        assert!(serde_json::from_str::<Quantity>("\"50000000000000000000000000000\"").is_err());
    }

    #[test]
    fn sums_of_capped_quantities_do_not_overflow() {
        let total: Quantity = std::iter::repeat(Quantity::MAX).take(1_000).sum();
        assert_eq!(total.value(), Quantity::MAX.value() * Decimal::from(1_000));
    }

    #[test]
    fn equality_ignores_scale() {
        assert_eq!(qty(50, 1), Quantity::from(5));
        assert_eq!(qty(250, 2) + qty(25, 1), Quantity::from(5));
    }

    #[test]
    fn checked_sub_refuses_to_go_negative() {
        assert_eq!(Quantity::from(3).checked_sub(Quantity::from(4)), None);
        assert_eq!(
            Quantity::from(3).checked_sub(qty(15, 1)),
            Some(qty(15, 1))
        );
        assert_eq!(Quantity::from(3).saturating_sub(Quantity::from(4)), Quantity::ZERO);
    }

    #[test]
    fn deserialize_rejects_negative_values() {
        let ok: Quantity = serde_json::from_str("2.5").unwrap();
        assert_eq!(ok, qty(25, 1));
        assert!(serde_json::from_str::<Quantity>("-2").is_err());
    }

    proptest! {
        /// Property: adding then subtracting the same amount gives back the original.
        #[test]
        fn add_then_checked_sub_is_identity(a in 0i64..1_000_000, b in 0i64..1_000_000, scale in 0u32..4) {
            let a = qty(a, scale);
            let b = qty(b, scale);
            prop_assert_eq!((a + b).checked_sub(b), Some(a));
        }
    }
}
