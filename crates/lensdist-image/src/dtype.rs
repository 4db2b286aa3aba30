/// Trait for image sample types.
///
/// Resampling kernels accumulate in `f64` and convert back through
/// [`ImageDtype::from_f64`], which clamps to the valid sample range of the type.
///
/// Send and Sync are required to process image rows on the rayon pool.
pub trait ImageDtype: Copy + Default + Send + Sync + 'static {
    /// Smallest representable sample value.
    const MIN_VALUE: f64;

    /// Largest representable sample value.
    const MAX_VALUE: f64;

    /// Convert the sample to `f64`.
    fn to_f64(self) -> f64;

    /// Convert a `f64` value to the sample type, clamping to `[MIN_VALUE, MAX_VALUE]`.
    fn from_f64(x: f64) -> Self;
}

macro_rules! impl_integer_dtype {
    ($($t:ty),*) => {
        $(
            impl ImageDtype for $t {
                const MIN_VALUE: f64 = <$t>::MIN as f64;
                const MAX_VALUE: f64 = <$t>::MAX as f64;

                fn to_f64(self) -> f64 {
                    self as f64
                }

                fn from_f64(x: f64) -> Self {
                    // truncates toward zero, NaN saturates to zero through the `as` cast
                    x.clamp(Self::MIN_VALUE, Self::MAX_VALUE).trunc() as $t
                }
            }
        )*
    };
}

macro_rules! impl_float_dtype {
    ($($t:ty),*) => {
        $(
            impl ImageDtype for $t {
                // floating point images share the 8-bit intensity range
                const MIN_VALUE: f64 = 0.0;
                const MAX_VALUE: f64 = 255.0;

                fn to_f64(self) -> f64 {
                    self as f64
                }

                fn from_f64(x: f64) -> Self {
                    x.clamp(Self::MIN_VALUE, Self::MAX_VALUE) as $t
                }
            }
        )*
    };
}

impl_integer_dtype!(u8, u16);
impl_float_dtype!(f32, f64);
