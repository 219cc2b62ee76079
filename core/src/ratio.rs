//! Exact rational numbers over a signed primitive integer.
//!
//! Values are always kept in lowest terms with a positive denominator, and
//! zero is always stored as `0/1`, so the derived equality and hashing agree
//! with numeric equality. Every operation is checked: the `checked_*` methods
//! report [`Error::DivideByZero`] and [`Error::Overflow`], while the operator
//! impls treat both as fatal and panic instead of wrapping around.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use num_traits::{CheckedNeg, CheckedRem, PrimInt, Signed};

use crate::error::{fatal, Error, Result};

pub trait RatioInt: PrimInt + Signed + CheckedNeg + CheckedRem + fmt::Debug + fmt::Display {}

impl<T> RatioInt for T where T: PrimInt + Signed + CheckedNeg + CheckedRem + fmt::Debug + fmt::Display {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ratio<T> {
  numer: T,
  denom: T,
}

// sign(gcd) follows the sign of the last non-zero remainder
fn gcd<T: RatioInt>(mut a: T, mut b: T) -> Result<T> {
  while !b.is_zero() {
    let t = a.checked_rem(&b).ok_or_else(|| Error::overflow("gcd"))?;
    a = b;
    b = t;
  }
  if a.is_negative() {
    a.checked_neg().ok_or_else(|| Error::overflow("gcd"))
  } else {
    Ok(a)
  }
}

impl<T: RatioInt> Ratio<T> {
  pub fn new(numer: T, denom: T) -> Result<Ratio<T>> {
    if denom.is_zero() {
      return Err(Error::DivideByZero);
    }
    if numer.is_zero() {
      return Ok(Ratio::zero());
    }

    let g = gcd(numer, denom)?;
    let mut numer = numer / g;
    let mut denom = denom / g;
    if denom.is_negative() {
      numer = numer.checked_neg().ok_or_else(|| Error::overflow("ratio sign"))?;
      denom = denom.checked_neg().ok_or_else(|| Error::overflow("ratio sign"))?;
    }
    Ok(Ratio { numer, denom })
  }

  /// Builds a ratio that is already known to be in lowest terms with a
  /// positive denominator.
  pub(crate) const fn new_raw(numer: T, denom: T) -> Ratio<T> {
    Ratio { numer, denom }
  }

  pub fn from_integer(value: T) -> Ratio<T> {
    Ratio {
      numer: value,
      denom: T::one(),
    }
  }

  pub fn zero() -> Ratio<T> {
    Ratio::from_integer(T::zero())
  }

  pub fn one() -> Ratio<T> {
    Ratio::from_integer(T::one())
  }

  pub fn numer(&self) -> T {
    self.numer
  }

  pub fn denom(&self) -> T {
    self.denom
  }

  pub fn is_zero(&self) -> bool {
    self.numer.is_zero()
  }

  pub fn is_negative(&self) -> bool {
    self.numer.is_negative()
  }

  pub fn is_integer(&self) -> bool {
    self.denom == T::one()
  }

  pub fn recip(self) -> Result<Ratio<T>> {
    Ratio::new(self.denom, self.numer)
  }

  pub fn checked_neg(self) -> Result<Ratio<T>> {
    let numer = self
      .numer
      .checked_neg()
      .ok_or_else(|| Error::overflow("ratio negation"))?;
    Ok(Ratio {
      numer,
      denom: self.denom,
    })
  }

  pub fn checked_add(self, rhs: Ratio<T>) -> Result<Ratio<T>> {
    self.add_scaled(rhs, "ratio addition", |a, b| a.checked_add(&b))
  }

  pub fn checked_sub(self, rhs: Ratio<T>) -> Result<Ratio<T>> {
    self.add_scaled(rhs, "ratio subtraction", |a, b| a.checked_sub(&b))
  }

  // a/b (op) c/d over the common denominator lcm(b, d)
  fn add_scaled<F>(self, rhs: Ratio<T>, operation: &'static str, op: F) -> Result<Ratio<T>>
  where
    F: Fn(T, T) -> Option<T>,
  {
    let overflow = || Error::overflow(operation);
    let g = gcd(self.denom, rhs.denom)?;
    let lhs_scale = rhs.denom / g;
    let rhs_scale = self.denom / g;
    let lhs_numer = self.numer.checked_mul(&lhs_scale).ok_or_else(overflow)?;
    let rhs_numer = rhs.numer.checked_mul(&rhs_scale).ok_or_else(overflow)?;
    let numer = op(lhs_numer, rhs_numer).ok_or_else(overflow)?;
    let denom = self.denom.checked_mul(&lhs_scale).ok_or_else(overflow)?;
    Ratio::new(numer, denom)
  }

  pub fn checked_mul(self, rhs: Ratio<T>) -> Result<Ratio<T>> {
    let overflow = || Error::overflow("ratio multiplication");
    // cross-reduce first to keep the intermediate products small
    let g1 = gcd(self.numer, rhs.denom)?;
    let g2 = gcd(rhs.numer, self.denom)?;
    let numer = (self.numer / g1)
      .checked_mul(&(rhs.numer / g2))
      .ok_or_else(overflow)?;
    let denom = (self.denom / g2)
      .checked_mul(&(rhs.denom / g1))
      .ok_or_else(overflow)?;
    Ratio::new(numer, denom)
  }

  pub fn checked_div(self, rhs: Ratio<T>) -> Result<Ratio<T>> {
    if rhs.is_zero() {
      return Err(Error::DivideByZero);
    }
    self.checked_mul(rhs.recip()?)
  }

  /// Exact comparison by cross multiplication.
  pub fn checked_cmp(&self, other: &Ratio<T>) -> Result<Ordering> {
    let lhs_sign = self.numer.signum();
    let rhs_sign = other.numer.signum();
    if lhs_sign != rhs_sign {
      return Ok(lhs_sign.cmp(&rhs_sign));
    }
    let overflow = || Error::overflow("ratio comparison");
    let lhs = self.numer.checked_mul(&other.denom).ok_or_else(overflow)?;
    let rhs = other.numer.checked_mul(&self.denom).ok_or_else(overflow)?;
    Ok(lhs.cmp(&rhs))
  }

  pub fn checked_max(self, other: Ratio<T>) -> Result<Ratio<T>> {
    match self.checked_cmp(&other)? {
      Ordering::Less => Ok(other),
      _ => Ok(self),
    }
  }

  pub fn checked_min(self, other: Ratio<T>) -> Result<Ratio<T>> {
    match self.checked_cmp(&other)? {
      Ordering::Greater => Ok(other),
      _ => Ok(self),
    }
  }

  /// Lossy conversion, only meant for the final seconds computation.
  pub fn to_f64(&self) -> f64 {
    match (self.numer.to_f64(), self.denom.to_f64()) {
      (Some(numer), Some(denom)) => numer / denom,
      _ => std::f64::NAN,
    }
  }
}

impl<T: RatioInt> From<T> for Ratio<T> {
  fn from(value: T) -> Self {
    Ratio::from_integer(value)
  }
}

impl<T: RatioInt> PartialOrd for Ratio<T> {
  fn partial_cmp(&self, other: &Ratio<T>) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl<T: RatioInt> Ord for Ratio<T> {
  fn cmp(&self, other: &Ratio<T>) -> Ordering {
    fatal(self.checked_cmp(other))
  }
}

impl<T: RatioInt> Neg for Ratio<T> {
  type Output = Ratio<T>;

  fn neg(self) -> Ratio<T> {
    fatal(self.checked_neg())
  }
}

impl<T: RatioInt> Add for Ratio<T> {
  type Output = Ratio<T>;

  fn add(self, rhs: Ratio<T>) -> Ratio<T> {
    fatal(self.checked_add(rhs))
  }
}

impl<T: RatioInt> Sub for Ratio<T> {
  type Output = Ratio<T>;

  fn sub(self, rhs: Ratio<T>) -> Ratio<T> {
    fatal(self.checked_sub(rhs))
  }
}

impl<T: RatioInt> Mul for Ratio<T> {
  type Output = Ratio<T>;

  fn mul(self, rhs: Ratio<T>) -> Ratio<T> {
    fatal(self.checked_mul(rhs))
  }
}

impl<T: RatioInt> Div for Ratio<T> {
  type Output = Ratio<T>;

  fn div(self, rhs: Ratio<T>) -> Ratio<T> {
    fatal(self.checked_div(rhs))
  }
}

impl<T: RatioInt> fmt::Display for Ratio<T> {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    if self.numer.is_zero() {
      write!(f, "0")
    } else {
      write!(f, "{}/{}", self.numer, self.denom)
    }
  }
}
