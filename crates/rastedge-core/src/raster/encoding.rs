//! Sample encodings and runtime dispatch
//!
//! A raster stores every sample in one encoding chosen at runtime from a
//! closed set. Generic algorithms are written once over [`Sample`] and
//! instantiated for the concrete type through [`Encoding::dispatch`], which
//! selects the monomorphized variant from the runtime tag. Complex encodings
//! can be stored but never dispatched.

use super::Samples;
use crate::error::{Error, Result};
use std::fmt;

/// Numeric storage type of a raster's samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// 8-bit signed integer
    Int8,
    /// 8-bit unsigned integer
    UInt8,
    /// 16-bit signed integer
    Int16,
    /// 16-bit unsigned integer
    UInt16,
    /// 32-bit signed integer
    Int32,
    /// 32-bit unsigned integer
    UInt32,
    /// 32-bit IEEE float
    Float32,
    /// 64-bit IEEE float
    Float64,
    /// Complex value with 16-bit signed integer parts
    ComplexInt16,
    /// Complex value with 32-bit float parts
    ComplexFloat32,
}

impl Encoding {
    /// Every encoding, in declaration order.
    pub const ALL: [Encoding; 10] = [
        Encoding::Int8,
        Encoding::UInt8,
        Encoding::Int16,
        Encoding::UInt16,
        Encoding::Int32,
        Encoding::UInt32,
        Encoding::Float32,
        Encoding::Float64,
        Encoding::ComplexInt16,
        Encoding::ComplexFloat32,
    ];

    /// Storage size of one sample in bytes.
    pub fn bytes_per_element(self) -> u32 {
        match self {
            Self::Int8 | Self::UInt8 => 1,
            Self::Int16 | Self::UInt16 => 2,
            Self::Int32 | Self::UInt32 | Self::Float32 | Self::ComplexInt16 => 4,
            Self::Float64 | Self::ComplexFloat32 => 8,
        }
    }

    /// Check whether samples are complex numbers.
    pub fn is_complex(self) -> bool {
        matches!(self, Self::ComplexInt16 | Self::ComplexFloat32)
    }

    /// Check whether samples are real floating-point values.
    pub fn is_float(self) -> bool {
        matches!(self, Self::Float32 | Self::Float64)
    }

    /// Short lowercase name of the encoding.
    pub fn name(self) -> &'static str {
        match self {
            Self::Int8 => "int8",
            Self::UInt8 => "uint8",
            Self::Int16 => "int16",
            Self::UInt16 => "uint16",
            Self::Int32 => "int32",
            Self::UInt32 => "uint32",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::ComplexInt16 => "complex-int16",
            Self::ComplexFloat32 => "complex-float32",
        }
    }

    /// Run a generic algorithm instantiated for this encoding's sample type.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedEncoding`] for complex encodings; the
    /// visitor is not called in that case.
    pub fn dispatch<V: EncodingVisitor>(self, visitor: V) -> Result<V::Output> {
        match self {
            Self::Int8 => Ok(visitor.visit::<i8>()),
            Self::UInt8 => Ok(visitor.visit::<u8>()),
            Self::Int16 => Ok(visitor.visit::<i16>()),
            Self::UInt16 => Ok(visitor.visit::<u16>()),
            Self::Int32 => Ok(visitor.visit::<i32>()),
            Self::UInt32 => Ok(visitor.visit::<u32>()),
            Self::Float32 => Ok(visitor.visit::<f32>()),
            Self::Float64 => Ok(visitor.visit::<f64>()),
            Self::ComplexInt16 | Self::ComplexFloat32 => Err(Error::UnsupportedEncoding(self)),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A generic algorithm over one real sample type.
///
/// Closures cannot be generic, so algorithms that need the concrete sample
/// type implement this trait and are handed to [`Encoding::dispatch`].
pub trait EncodingVisitor {
    /// Value produced by the algorithm.
    type Output;

    /// Run the algorithm for sample type `T`.
    fn visit<T: Sample>(self) -> Self::Output;
}

/// A real numeric sample type that a raster can store.
///
/// Conversions follow Rust `as` semantics: float to integer truncates toward
/// zero, saturates at the type bounds and maps NaN to zero.
pub trait Sample: Copy + Default + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Encoding tag for this sample type.
    const ENCODING: Encoding;

    /// Widen to `f64`.
    fn to_f64(self) -> f64;

    /// Narrow from `f64`.
    fn from_f64(value: f64) -> Self;

    /// Borrow the typed storage, if `samples` holds this type.
    fn slice(samples: &Samples) -> Option<&[Self]>;

    /// Mutably borrow the typed storage, if `samples` holds this type.
    fn slice_mut(samples: &mut Samples) -> Option<&mut [Self]>;

    /// Wrap a typed vector as raster storage.
    fn into_samples(values: Vec<Self>) -> Samples;
}

macro_rules! impl_sample {
    ($t:ty, $variant:ident) => {
        impl Sample for $t {
            const ENCODING: Encoding = Encoding::$variant;

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn from_f64(value: f64) -> Self {
                value as $t
            }

            #[inline]
            fn slice(samples: &Samples) -> Option<&[Self]> {
                match samples {
                    Samples::$variant(values) => Some(values),
                    _ => None,
                }
            }

            #[inline]
            fn slice_mut(samples: &mut Samples) -> Option<&mut [Self]> {
                match samples {
                    Samples::$variant(values) => Some(values),
                    _ => None,
                }
            }

            fn into_samples(values: Vec<Self>) -> Samples {
                Samples::$variant(values)
            }
        }
    };
}

impl_sample!(i8, Int8);
impl_sample!(u8, UInt8);
impl_sample!(i16, Int16);
impl_sample!(u16, UInt16);
impl_sample!(i32, Int32);
impl_sample!(u32, UInt32);
impl_sample!(f32, Float32);
impl_sample!(f64, Float64);
