//! Purpose: Numeric-to-numeric and numeric-to-text conversions for primitive kinds.
//! Exports: `IntegerKind`, `FloatKind`, `NativeFloat`.
//! Role: One generic implementation per capability ("is an integer", "is a float")
//! instead of per-type copies.
//! Invariants: Float-to-integer truncates toward zero, saturates at `i64` bounds,
//! and maps NaN to 0 (Rust `as` semantics, pinned by tests).
//! Invariants: Text output is the `Display` rendering of the value.
use std::fmt;

/// Float whose width follows the target's pointer width.
#[cfg(target_pointer_width = "64")]
pub type NativeFloat = f64;
/// Float whose width follows the target's pointer width.
#[cfg(not(target_pointer_width = "64"))]
pub type NativeFloat = f32;

// 2^63, the first f64 above i64::MAX.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

mod sealed {
    pub trait Sealed {}
}

/// Conversions available on every primitive integer type.
pub trait IntegerKind: Copy + fmt::Display + sealed::Sealed {
    /// Converts to `i64`. Values outside the `i64` range wrap, as `as` does.
    fn to_int(self) -> i64;

    /// Nearest representable `f32`; large magnitudes lose precision.
    fn to_float(self) -> f32;

    /// Nearest representable `f64`; exact up to 2^53.
    fn to_double(self) -> f64;

    /// Nearest representable [`NativeFloat`].
    fn to_native_float(self) -> NativeFloat;

    /// Decimal text.
    fn to_text(self) -> String {
        self.to_string()
    }
}

/// Conversions available on `f32` and `f64`.
pub trait FloatKind: Copy + fmt::Display + sealed::Sealed {
    /// Truncates toward zero.
    ///
    /// Out-of-range values saturate to `i64::MIN`/`i64::MAX` and NaN becomes 0.
    /// Use [`FloatKind::try_to_int`] to detect those cases.
    fn to_int(self) -> i64;

    /// Narrows or widens to `f32`. Narrowing may round or overflow to infinity.
    fn to_float(self) -> f32;

    /// Widens or keeps as `f64`.
    fn to_double(self) -> f64;

    /// Narrows or widens to [`NativeFloat`].
    fn to_native_float(self) -> NativeFloat;

    /// `Display` text.
    fn to_text(self) -> String {
        self.to_string()
    }

    /// Truncates toward zero, or `None` for NaN, infinities, and values whose
    /// integral part does not fit in an `i64`.
    fn try_to_int(self) -> Option<i64> {
        let value = self.to_double();
        if !value.is_finite() {
            return None;
        }
        let truncated = value.trunc();
        if !(-I64_BOUND..I64_BOUND).contains(&truncated) {
            return None;
        }
        Some(truncated as i64)
    }
}

macro_rules! integer_kind {
    ($($ty:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}

            impl IntegerKind for $ty {
                #[inline]
                fn to_int(self) -> i64 {
                    self as i64
                }

                #[inline]
                fn to_float(self) -> f32 {
                    self as f32
                }

                #[inline]
                fn to_double(self) -> f64 {
                    self as f64
                }

                #[inline]
                fn to_native_float(self) -> NativeFloat {
                    self as NativeFloat
                }
            }
        )*
    };
}

macro_rules! float_kind {
    ($($ty:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}

            impl FloatKind for $ty {
                #[inline]
                fn to_int(self) -> i64 {
                    self as i64
                }

                #[inline]
                fn to_float(self) -> f32 {
                    self as f32
                }

                #[inline]
                fn to_double(self) -> f64 {
                    self as f64
                }

                #[inline]
                fn to_native_float(self) -> NativeFloat {
                    self as NativeFloat
                }
            }
        )*
    };
}

integer_kind!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
float_kind!(f32, f64);
