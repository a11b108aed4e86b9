//! Quantity type for the numeric measures of a sales row.
//!
//! Measures in the source data are mostly plain decimals like `12.5`, but exported spreadsheets
//! sometimes carry a dollar sign or thousands separators. Anything that still does not parse is
//! treated as zero by [`Quantity::lenient`].

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;
use tracing::warn;

/// The number of decimal places that finalized sums are rounded to.
pub const ROUND_DP: u32 = 2;

/// A decimal sales measure: retail sales, warehouse sales or retail transfers.
///
/// Values are exact decimals, so sums never accumulate floating point error and are always
/// finite. Negative values (returns) are kept as they are.
///
/// # Examples
///
/// ```
/// # use sales_trends::model::Quantity;
/// # use std::str::FromStr;
/// let q = Quantity::from_str("$1,250.50").unwrap();
/// assert_eq!(q.to_string(), "1250.50");
/// assert!(Quantity::from_str("N/A").is_err());
/// assert!(Quantity::lenient("N/A").is_zero());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Quantity(Decimal);

impl Quantity {
    pub const ZERO: Quantity = Quantity(Decimal::ZERO);

    /// Parses `s`, substituting zero for anything that is not a number.
    pub fn lenient(s: &str) -> Self {
        Self::from_str(s).unwrap_or_default()
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Rounds to [`ROUND_DP`] places. Midpoints round away from zero, so `2.345` becomes `2.35`
    /// and `-2.345` becomes `-2.35`.
    pub fn rounded(&self) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(ROUND_DP, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Formats with thousands separators and two decimal places, e.g. `-60,000.00`.
    pub fn to_grouped_string(&self) -> String {
        let sign = if self.0.is_sign_negative() && !self.0.is_zero() {
            "-"
        } else {
            ""
        };
        let abs = self.0.abs().to_f64().unwrap_or_default();
        format!("{sign}{}", format_num::format_num!(",.2", abs))
    }
}

/// An error that can occur when parsing strings into `Quantity` values.
pub struct QuantityError(rust_decimal::Error);

impl Debug for QuantityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

impl Display for QuantityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl std::error::Error for QuantityError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.0)
    }
}

impl FromStr for Quantity {
    type Err = QuantityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(Quantity::default());
        }

        // "-$50.00", "$50.00" and "50.00" are all accepted
        let without_dollar = match trimmed.strip_prefix('-') {
            Some(after_minus) => match after_minus.strip_prefix('$') {
                Some(after_dollar) => format!("-{after_dollar}"),
                None => trimmed.to_string(),
            },
            None => trimmed.strip_prefix('$').unwrap_or(trimmed).to_string(),
        };

        let without_commas = without_dollar.replace(',', "");
        Decimal::from_str(&without_commas)
            .map(Quantity)
            .map_err(QuantityError)
    }
}

impl Display for Quantity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// Addition saturates at `Decimal::MAX` or `Decimal::MIN` instead of overflowing.
impl Add for Quantity {
    type Output = Quantity;

    fn add(self, rhs: Self) -> Self::Output {
        match self.0.checked_add(rhs.0) {
            Some(sum) => Quantity(sum),
            None => {
                warn!("The sum of {self} and {rhs} is out of range and was clamped");
                if rhs.0.is_sign_negative() {
                    Quantity(Decimal::MIN)
                } else {
                    Quantity(Decimal::MAX)
                }
            }
        }
    }
}

impl AddAssign for Quantity {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for Quantity {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Quantity::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Quantity> for Quantity {
    fn sum<I: Iterator<Item = &'a Quantity>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Serialized as an exact decimal string without trailing zeros, e.g. `"12.5"`.
impl Serialize for Quantity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0.normalize().to_string())
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        let s = match value {
            serde_json::Value::String(s) => s,
            serde_json::Value::Number(n) => n.to_string(),
            other => {
                return Err(serde::de::Error::custom(format!(
                    "expected a number or string, got {other}"
                )))
            }
        };
        Quantity::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl From<Decimal> for Quantity {
    fn from(value: Decimal) -> Self {
        Quantity(value)
    }
}

impl From<Quantity> for Decimal {
    fn from(q: Quantity) -> Self {
        q.0
    }
}
