//! Fixed-point money amounts, no floating point.
//!
//! Amounts are counted in minor units with two decimal places
//! (`Amount::from_major(350)` is 350.00). The value is unsigned, so a
//! negative amount cannot be constructed.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypesError;

/// A non-negative money amount in minor units (2 decimal places).
///
/// # Examples
///
/// ```
/// use giftcircle_types::Amount;
///
/// let gift = Amount::from_major(100);
/// let tip = Amount::parse_decimal("20.5").unwrap();
/// assert_eq!(gift.checked_add(tip).unwrap().to_decimal_string(), "120.50");
/// ```
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Amount(u64);

impl Amount {
    pub const ZERO: Self = Amount(0);

    const DECIMALS: usize = 2;
    const SCALE: u64 = 100;

    /// Create from raw minor units (cents).
    #[inline]
    pub const fn from_minor(minor: u64) -> Self {
        Amount(minor)
    }

    /// Create from whole units (`350` → `350.00`).
    #[inline]
    pub fn from_major(major: u64) -> Self {
        Amount(major.saturating_mul(Self::SCALE))
    }

    /// Parse a decimal string such as `"100"`, `"20.5"` or `"0.01"`.
    ///
    /// Signs, more than two decimals and non-digits are rejected.
    pub fn parse_decimal(s: &str) -> Result<Self, TypesError> {
        let s = s.trim();
        let invalid = |why: &str| TypesError::InvalidAmount(format!("'{}': {}", s, why));

        if s.is_empty() {
            return Err(invalid("empty"));
        }
        if s.starts_with('-') {
            return Err(invalid("must not be negative"));
        }

        let (whole, frac) = s.split_once('.').unwrap_or((s, ""));
        if whole.is_empty() && frac.is_empty() {
            return Err(invalid("no digits"));
        }
        if frac.len() > Self::DECIMALS {
            return Err(invalid("too many decimal places (max 2)"));
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid("not a number"));
        }

        let whole_val: u64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid("overflow"))?
        };
        let frac_val: u64 = if frac.is_empty() {
            0
        } else {
            format!("{:0<2}", frac).parse().map_err(|_| invalid("not a number"))?
        };

        whole_val
            .checked_mul(Self::SCALE)
            .and_then(|v| v.checked_add(frac_val))
            .map(Amount)
            .ok_or_else(|| invalid("overflow"))
    }

    #[inline]
    pub fn minor_units(&self) -> u64 {
        self.0
    }

    /// Format as `"120.50"` (always two decimals).
    pub fn to_decimal_string(&self) -> String {
        format!("{}.{:02}", self.0 / Self::SCALE, self.0 % Self::SCALE)
    }

    /// Checked addition; `None` on overflow.
    #[inline]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Amount)
    }

    /// Checked subtraction; `None` if the result would be negative.
    #[inline]
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Amount)
    }

    #[inline]
    pub fn saturating_add(self, rhs: Self) -> Self {
        Amount(self.0.saturating_add(rhs.0))
    }

    #[inline]
    pub fn saturating_sub(self, rhs: Self) -> Self {
        Amount(self.0.saturating_sub(rhs.0))
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Floor of `self / of * 100`, capped at 100. Zero when `of` is zero.
    pub fn percent_of(&self, of: Amount) -> u8 {
        if of.is_zero() {
            return 0;
        }
        let pct = (self.0 as u128 * 100) / of.0 as u128;
        pct.min(100) as u8
    }

    /// Sum without panicking; saturates at the maximum representable amount.
    pub fn saturating_sum<I: IntoIterator<Item = Amount>>(iter: I) -> Amount {
        iter.into_iter().fold(Amount::ZERO, Amount::saturating_add)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_decimal_string())
    }
}

impl std::str::FromStr for Amount {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Amount::parse_decimal(s)
    }
}
