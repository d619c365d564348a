use num_traits as num;

/// This trait represents the operations a histogram must be able to perform on its
/// underlying bin count type. The `ToPrimitive` trait is needed to perform floating point
/// operations on the counts (usually for quantiles and interpolation), `FromPrimitive` to
/// convert back into an integer count. `Saturating` is what lets recording be total: a bin
/// whose count reaches the top of `C` stays there instead of overflowing, so a histogram
/// with a deliberately narrow counter under-reports that bin rather than failing. Partial
/// ordering is used for thresholding.
pub trait Counter:
    num::Num
    + num::ToPrimitive
    + num::FromPrimitive
    + num::Saturating
    + Copy
    + PartialOrd<Self>
    + std::fmt::Debug
{
    /// Counter as a f64.
    fn as_f64(&self) -> f64;
    /// Counter as a u64.
    fn as_u64(&self) -> u64;
}

impl Counter for u8 {
    #[inline]
    fn as_f64(&self) -> f64 {
        f64::from(*self)
    }
    #[inline]
    fn as_u64(&self) -> u64 {
        u64::from(*self)
    }
}

impl Counter for u16 {
    #[inline]
    fn as_f64(&self) -> f64 {
        f64::from(*self)
    }
    #[inline]
    fn as_u64(&self) -> u64 {
        u64::from(*self)
    }
}

impl Counter for u32 {
    #[inline]
    fn as_f64(&self) -> f64 {
        f64::from(*self)
    }
    #[inline]
    fn as_u64(&self) -> u64 {
        u64::from(*self)
    }
}

impl Counter for u64 {
    #[inline]
    fn as_f64(&self) -> f64 {
        *self as f64
    }
    #[inline]
    fn as_u64(&self) -> u64 {
        *self
    }
}
