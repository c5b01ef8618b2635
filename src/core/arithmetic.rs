use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Rem, Sub};

use crate::error::ArithmeticError;
use crate::models::Operation;

/// A numeric operand accepted by the arithmetic functions.
///
/// Implemented for every primitive integer and for `f32`/`f64`. The checked
/// methods return `None` when the result cannot be represented: integer
/// overflow, a zero divisor, or (for floats) finite operands producing a
/// non-finite result. The wrapping methods never fail: integers wrap around
/// in two's complement, floats follow IEEE 754.
pub trait Number:
    Copy
    + PartialEq
    + PartialOrd
    + Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Rem<Output = Self>
{
    const ZERO: Self;
    const ONE: Self;

    fn wrapping_add_val(self, rhs: Self) -> Self;
    fn wrapping_sub_val(self, rhs: Self) -> Self;
    fn wrapping_mul_val(self, rhs: Self) -> Self;
    fn checked_add_val(self, rhs: Self) -> Option<Self>;
    fn checked_sub_val(self, rhs: Self) -> Option<Self>;
    fn checked_mul_val(self, rhs: Self) -> Option<Self>;
    fn checked_div_val(self, rhs: Self) -> Option<Self>;
    fn checked_rem_val(self, rhs: Self) -> Option<Self>;
    fn checked_pow_val(self, exp: u32) -> Option<Self>;
}

macro_rules! int_number_impl {
    ($($t:ty),*) => {$(
        impl Number for $t {
            const ZERO: Self = 0;
            const ONE: Self = 1;

            #[inline]
            fn wrapping_add_val(self, rhs: Self) -> Self {
                <$t>::wrapping_add(self, rhs)
            }

            #[inline]
            fn wrapping_sub_val(self, rhs: Self) -> Self {
                <$t>::wrapping_sub(self, rhs)
            }

            #[inline]
            fn wrapping_mul_val(self, rhs: Self) -> Self {
                <$t>::wrapping_mul(self, rhs)
            }

            #[inline]
            fn checked_add_val(self, rhs: Self) -> Option<Self> {
                <$t>::checked_add(self, rhs)
            }

            #[inline]
            fn checked_sub_val(self, rhs: Self) -> Option<Self> {
                <$t>::checked_sub(self, rhs)
            }

            #[inline]
            fn checked_mul_val(self, rhs: Self) -> Option<Self> {
                <$t>::checked_mul(self, rhs)
            }

            #[inline]
            fn checked_div_val(self, rhs: Self) -> Option<Self> {
                <$t>::checked_div(self, rhs)
            }

            #[inline]
            fn checked_rem_val(self, rhs: Self) -> Option<Self> {
                <$t>::checked_rem(self, rhs)
            }

            #[inline]
            fn checked_pow_val(self, exp: u32) -> Option<Self> {
                <$t>::checked_pow(self, exp)
            }
        }
    )*};
}

int_number_impl!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! float_number_impl {
    ($($t:ty),*) => {$(
        impl Number for $t {
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;

            #[inline]
            fn wrapping_add_val(self, rhs: Self) -> Self {
                self + rhs
            }

            #[inline]
            fn wrapping_sub_val(self, rhs: Self) -> Self {
                self - rhs
            }

            #[inline]
            fn wrapping_mul_val(self, rhs: Self) -> Self {
                self * rhs
            }

            #[inline]
            fn checked_add_val(self, rhs: Self) -> Option<Self> {
                finite_result(self.is_finite() && rhs.is_finite(), self + rhs)
            }

            #[inline]
            fn checked_sub_val(self, rhs: Self) -> Option<Self> {
                finite_result(self.is_finite() && rhs.is_finite(), self - rhs)
            }

            #[inline]
            fn checked_mul_val(self, rhs: Self) -> Option<Self> {
                finite_result(self.is_finite() && rhs.is_finite(), self * rhs)
            }

            #[inline]
            fn checked_div_val(self, rhs: Self) -> Option<Self> {
                if rhs == 0.0 {
                    return None;
                }
                finite_result(self.is_finite() && rhs.is_finite(), self / rhs)
            }

            #[inline]
            fn checked_rem_val(self, rhs: Self) -> Option<Self> {
                if rhs == 0.0 {
                    return None;
                }
                Some(self % rhs)
            }

            #[inline]
            fn checked_pow_val(self, exp: u32) -> Option<Self> {
                let result = match i32::try_from(exp) {
                    Ok(exp) => self.powi(exp),
                    // f64 holds every u32 exactly, so odd exponents keep their sign
                    Err(_) => (self as f64).powf(f64::from(exp)) as $t,
                };
                finite_result(self.is_finite(), result)
            }
        }
    )*};
}

float_number_impl!(f32, f64);

/// A float result is rejected only when finite inputs overflowed into inf/NaN.
#[inline]
fn finite_result<T: FiniteCheck>(inputs_finite: bool, result: T) -> Option<T> {
    if inputs_finite && !result.is_finite_val() {
        None
    } else {
        Some(result)
    }
}

trait FiniteCheck: Copy {
    fn is_finite_val(self) -> bool;
}

impl FiniteCheck for f32 {
    fn is_finite_val(self) -> bool {
        self.is_finite()
    }
}

impl FiniteCheck for f64 {
    fn is_finite_val(self) -> bool {
        self.is_finite()
    }
}

/// Adds two numbers.
///
/// Never panics: integer results that leave the type's range wrap around
/// (`add(i64::MAX, 1) == i64::MIN`) in debug and release builds alike. Use
/// [`checked_add`] to detect overflow instead.
pub fn add<T: Number>(a: T, b: T) -> T {
    a.wrapping_add_val(b)
}

/// Subtracts `b` from `a`, wrapping on integer overflow.
pub fn subtract<T: Number>(a: T, b: T) -> T {
    a.wrapping_sub_val(b)
}

/// Multiplies two numbers, wrapping on integer overflow.
pub fn multiply<T: Number>(a: T, b: T) -> T {
    a.wrapping_mul_val(b)
}

/// Divides `a` by `b`.
///
/// Returns [`ArithmeticError::DivisionByZero`] when `b` is zero (including
/// `-0.0`). Integer operands follow Rust's truncating division; the one
/// unrepresentable integer quotient (`MIN / -1`) is reported as an overflow.
pub fn divide<T: Number>(a: T, b: T) -> Result<T, ArithmeticError> {
    if b == T::ZERO {
        return Err(ArithmeticError::DivisionByZero);
    }
    a.checked_div_val(b)
        .ok_or(ArithmeticError::Overflow {
            operation: Operation::Divide,
        })
}

/// Adds two numbers, reporting overflow instead of wrapping or panicking.
pub fn checked_add<T: Number>(a: T, b: T) -> Result<T, ArithmeticError> {
    a.checked_add_val(b).ok_or(ArithmeticError::Overflow {
        operation: Operation::Add,
    })
}

/// Subtracts `b` from `a`, reporting overflow.
pub fn checked_subtract<T: Number>(a: T, b: T) -> Result<T, ArithmeticError> {
    a.checked_sub_val(b).ok_or(ArithmeticError::Overflow {
        operation: Operation::Subtract,
    })
}

/// Multiplies two numbers, reporting overflow.
pub fn checked_multiply<T: Number>(a: T, b: T) -> Result<T, ArithmeticError> {
    a.checked_mul_val(b).ok_or(ArithmeticError::Overflow {
        operation: Operation::Multiply,
    })
}

/// Remainder of `a / b`, with the sign of `a`.
pub fn remainder<T: Number>(a: T, b: T) -> Result<T, ArithmeticError> {
    if b == T::ZERO {
        return Err(ArithmeticError::DivisionByZero);
    }
    // MIN % -1 is the only failing case left
    a.checked_rem_val(b).ok_or(ArithmeticError::Overflow {
        operation: Operation::Remainder,
    })
}

/// Raises `base` to a non-negative integer power.
pub fn power<T: Number>(base: T, exp: u32) -> Result<T, ArithmeticError> {
    base.checked_pow_val(exp).ok_or(ArithmeticError::Overflow {
        operation: Operation::Power,
    })
}

/// Squares a number.
pub fn square<T: Number>(x: T) -> Result<T, ArithmeticError> {
    power(x, 2)
}

/// Square root of a non-negative number.
pub fn square_root(x: f64) -> Result<f64, ArithmeticError> {
    if x < 0.0 {
        return Err(ArithmeticError::Domain(format!(
            "square root of negative number {}",
            x
        )));
    }
    Ok(x.sqrt())
}

/// Converts a percentage into its fraction (`50` -> `0.5`).
pub fn percentage(x: f64) -> f64 {
    x / 100.0
}
