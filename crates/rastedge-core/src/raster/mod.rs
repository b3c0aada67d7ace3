//! Raster - The main sample container
//!
//! A raster is a named `rows x columns` grid of samples with one or more
//! bands, all stored in a single [`Encoding`].
//!
//! # Sample layout
//!
//! - Storage is band-sequential: band 0 is a full row-major plane, followed
//!   by band 1, and so on
//! - The sample at (row, column, band) is at index
//!   `band * rows * columns + row * columns + column`
//! - Each encoding has its own typed vector in [`Samples`]
//!
//! # Ownership model
//!
//! `Raster` uses `Arc` for cheap cloning and is read-only. Writable rasters
//! are [`RasterMut`], which own their storage exclusively and convert into
//! `Raster` with `Into<Raster>` once they are complete. Use
//! [`Raster::try_into_mut`] or [`Raster::to_mut`] to go the other way.

mod access;
mod encoding;

pub use access::{DataAccessor, DataAccessorMut, DataRequest};
pub use encoding::{Encoding, EncodingVisitor, Sample};

use crate::error::{Error, Result};
use std::sync::Arc;

/// Complex sample with 16-bit signed integer parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IntegerComplex {
    pub real: i16,
    pub imaginary: i16,
}

/// Complex sample with 32-bit float parts.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FloatComplex {
    pub real: f32,
    pub imaginary: f32,
}

/// Typed sample storage, one variant per [`Encoding`].
#[derive(Debug, Clone, PartialEq)]
pub enum Samples {
    Int8(Vec<i8>),
    UInt8(Vec<u8>),
    Int16(Vec<i16>),
    UInt16(Vec<u16>),
    Int32(Vec<i32>),
    UInt32(Vec<u32>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
    ComplexInt16(Vec<IntegerComplex>),
    ComplexFloat32(Vec<FloatComplex>),
}

fn try_zeroed<T: Copy + Default>(len: usize) -> Result<Vec<T>> {
    let mut values = Vec::new();
    values
        .try_reserve_exact(len)
        .map_err(|_| Error::AllocationFailed)?;
    values.resize(len, T::default());
    Ok(values)
}

impl Samples {
    /// Allocate `len` zero samples of the given encoding.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailed`] if the storage cannot be reserved.
    pub fn zeroed(encoding: Encoding, len: usize) -> Result<Self> {
        Ok(match encoding {
            Encoding::Int8 => Samples::Int8(try_zeroed(len)?),
            Encoding::UInt8 => Samples::UInt8(try_zeroed(len)?),
            Encoding::Int16 => Samples::Int16(try_zeroed(len)?),
            Encoding::UInt16 => Samples::UInt16(try_zeroed(len)?),
            Encoding::Int32 => Samples::Int32(try_zeroed(len)?),
            Encoding::UInt32 => Samples::UInt32(try_zeroed(len)?),
            Encoding::Float32 => Samples::Float32(try_zeroed(len)?),
            Encoding::Float64 => Samples::Float64(try_zeroed(len)?),
            Encoding::ComplexInt16 => Samples::ComplexInt16(try_zeroed(len)?),
            Encoding::ComplexFloat32 => Samples::ComplexFloat32(try_zeroed(len)?),
        })
    }

    /// Encoding of the stored samples.
    pub fn encoding(&self) -> Encoding {
        match self {
            Samples::Int8(_) => Encoding::Int8,
            Samples::UInt8(_) => Encoding::UInt8,
            Samples::Int16(_) => Encoding::Int16,
            Samples::UInt16(_) => Encoding::UInt16,
            Samples::Int32(_) => Encoding::Int32,
            Samples::UInt32(_) => Encoding::UInt32,
            Samples::Float32(_) => Encoding::Float32,
            Samples::Float64(_) => Encoding::Float64,
            Samples::ComplexInt16(_) => Encoding::ComplexInt16,
            Samples::ComplexFloat32(_) => Encoding::ComplexFloat32,
        }
    }

    /// Number of stored samples across all bands.
    pub fn len(&self) -> usize {
        match self {
            Samples::Int8(v) => v.len(),
            Samples::UInt8(v) => v.len(),
            Samples::Int16(v) => v.len(),
            Samples::UInt16(v) => v.len(),
            Samples::Int32(v) => v.len(),
            Samples::UInt32(v) => v.len(),
            Samples::Float32(v) => v.len(),
            Samples::Float64(v) => v.len(),
            Samples::ComplexInt16(v) => v.len(),
            Samples::ComplexFloat32(v) => v.len(),
        }
    }

    /// Check whether there are no samples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Shape and encoding of a raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RasterDescriptor {
    pub rows: u32,
    pub columns: u32,
    pub bands: u32,
    pub encoding: Encoding,
}

impl RasterDescriptor {
    /// Create a single-band descriptor.
    pub fn new(rows: u32, columns: u32, encoding: Encoding) -> Self {
        Self {
            rows,
            columns,
            bands: 1,
            encoding,
        }
    }

    /// Set the band count.
    pub fn with_bands(mut self, bands: u32) -> Self {
        self.bands = bands;
        self
    }

    /// Samples in one band.
    #[inline]
    pub fn band_len(&self) -> usize {
        (self.rows as usize) * (self.columns as usize)
    }

    /// Total sample count, or `None` on overflow.
    pub fn sample_count(&self) -> Option<usize> {
        self.band_len().checked_mul(self.bands as usize)
    }

    fn validate(&self) -> Result<usize> {
        if self.rows == 0 || self.columns == 0 || self.bands == 0 {
            return Err(Error::InvalidDimension {
                rows: self.rows,
                columns: self.columns,
                bands: self.bands,
            });
        }
        self.sample_count().ok_or(Error::AllocationFailed)
    }
}

/// Internal raster data
#[derive(Debug, Clone)]
struct RasterData {
    /// Element name
    name: String,
    /// Shape and encoding
    descriptor: RasterDescriptor,
    /// Band-sequential sample storage
    samples: Samples,
}

impl RasterData {
    fn new(name: &str, descriptor: RasterDescriptor) -> Result<Self> {
        let len = descriptor.validate()?;
        Ok(Self {
            name: name.to_string(),
            descriptor,
            samples: Samples::zeroed(descriptor.encoding, len)?,
        })
    }

    fn from_samples(name: &str, rows: u32, columns: u32, samples: Samples) -> Result<Self> {
        let band_len = (rows as usize) * (columns as usize);
        if rows == 0 || columns == 0 || samples.is_empty() || samples.len() % band_len != 0 {
            return Err(Error::InvalidParameter(format!(
                "{} samples cannot fill whole bands of {}x{}",
                samples.len(),
                rows,
                columns
            )));
        }
        let bands = u32::try_from(samples.len() / band_len)
            .map_err(|_| Error::InvalidParameter("too many bands".to_string()))?;
        let descriptor = RasterDescriptor {
            rows,
            columns,
            bands,
            encoding: samples.encoding(),
        };
        Ok(Self {
            name: name.to_string(),
            descriptor,
            samples,
        })
    }

    fn band_range(&self, band: u32) -> Option<std::ops::Range<usize>> {
        if band >= self.descriptor.bands {
            return None;
        }
        let len = self.descriptor.band_len();
        let start = band as usize * len;
        Some(start..start + len)
    }

    fn index(&self, row: u32, column: u32, band: u32) -> Result<usize> {
        let d = &self.descriptor;
        if row >= d.rows || column >= d.columns || band >= d.bands {
            return Err(Error::IndexOutOfBounds {
                index: band as usize * d.band_len()
                    + row as usize * d.columns as usize
                    + column as usize,
                len: self.samples.len(),
            });
        }
        Ok(band as usize * d.band_len() + row as usize * d.columns as usize + column as usize)
    }
}

/// Read-only raster, shared by reference counting.
///
/// # Examples
///
/// ```
/// use rastedge_core::{Encoding, Raster};
///
/// let raster = Raster::from_vec("cube", 2, 3, vec![1u16, 2, 3, 4, 5, 6]).unwrap();
/// assert_eq!(raster.rows(), 2);
/// assert_eq!(raster.columns(), 3);
/// assert_eq!(raster.encoding(), Encoding::UInt16);
/// assert_eq!(raster.get_value::<u16>(1, 2).unwrap(), 6);
/// ```
#[derive(Debug, Clone)]
pub struct Raster {
    inner: Arc<RasterData>,
}

impl Raster {
    /// Create a zero-filled single-band raster.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if rows or columns is 0, or
    /// [`Error::AllocationFailed`] if the storage cannot be reserved.
    pub fn new(name: &str, rows: u32, columns: u32, encoding: Encoding) -> Result<Self> {
        Self::with_descriptor(name, RasterDescriptor::new(rows, columns, encoding))
    }

    /// Create a zero-filled raster with an arbitrary shape.
    pub fn with_descriptor(name: &str, descriptor: RasterDescriptor) -> Result<Self> {
        Ok(RasterMut::new(name, descriptor)?.into())
    }

    /// Create a single-band raster from row-major typed values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `values` does not fill whole
    /// bands of `rows x columns`.
    pub fn from_vec<T: Sample>(name: &str, rows: u32, columns: u32, values: Vec<T>) -> Result<Self> {
        Self::from_samples(name, rows, columns, T::into_samples(values))
    }

    /// Create a raster from band-sequential storage of any encoding.
    ///
    /// The band count is inferred from the sample count.
    pub fn from_samples(name: &str, rows: u32, columns: u32, samples: Samples) -> Result<Self> {
        Ok(Raster {
            inner: Arc::new(RasterData::from_samples(name, rows, columns, samples)?),
        })
    }

    /// Element name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Shape and encoding.
    #[inline]
    pub fn descriptor(&self) -> RasterDescriptor {
        self.inner.descriptor
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> u32 {
        self.inner.descriptor.rows
    }

    /// Number of columns.
    #[inline]
    pub fn columns(&self) -> u32 {
        self.inner.descriptor.columns
    }

    /// Number of bands.
    #[inline]
    pub fn bands(&self) -> u32 {
        self.inner.descriptor.bands
    }

    /// Sample encoding.
    #[inline]
    pub fn encoding(&self) -> Encoding {
        self.inner.descriptor.encoding
    }

    /// Raw sample storage.
    #[inline]
    pub fn samples(&self) -> &Samples {
        &self.inner.samples
    }

    /// Get the number of strong references to this raster.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Check if two rasters have the same shape and encoding.
    pub fn sizes_equal(&self, other: &Raster) -> bool {
        self.inner.descriptor == other.inner.descriptor
    }

    /// Get the band-0 sample at (row, column).
    pub fn get_value<T: Sample>(&self, row: u32, column: u32) -> Result<T> {
        self.get_band_value(row, column, 0)
    }

    /// Get the sample at (row, column, band).
    ///
    /// # Errors
    ///
    /// Returns [`Error::EncodingMismatch`] if `T` is not the raster's sample
    /// type, or [`Error::IndexOutOfBounds`] for a position outside the raster.
    pub fn get_band_value<T: Sample>(&self, row: u32, column: u32, band: u32) -> Result<T> {
        let values = T::slice(&self.inner.samples).ok_or(Error::EncodingMismatch {
            expected: self.encoding(),
            actual: T::ENCODING,
        })?;
        Ok(values[self.inner.index(row, column, band)?])
    }

    /// Copy band 0 out as row-major typed values.
    pub fn to_vec<T: Sample>(&self) -> Result<Vec<T>> {
        let values = T::slice(&self.inner.samples).ok_or(Error::EncodingMismatch {
            expected: self.encoding(),
            actual: T::ENCODING,
        })?;
        Ok(values[..self.inner.descriptor.band_len()].to_vec())
    }

    /// Create a read cursor over one band.
    ///
    /// The cursor is invalid (never dereferenceable) if the requested band
    /// does not exist or `T` does not match the encoding.
    pub fn data_accessor<T: Sample>(&self, request: &DataRequest) -> DataAccessor<'_, T> {
        let data = self
            .inner
            .band_range(request.band())
            .and_then(|range| T::slice(&self.inner.samples).map(|values| &values[range]));
        DataAccessor::new(data, self.rows(), self.columns())
    }

    /// Try to take exclusive ownership of the storage.
    ///
    /// Returns the raster back unchanged if other references exist.
    pub fn try_into_mut(self) -> std::result::Result<RasterMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(RasterMut { inner: data }),
            Err(arc) => Err(Raster { inner: arc }),
        }
    }

    /// Create a writable copy of this raster.
    pub fn to_mut(&self) -> RasterMut {
        RasterMut {
            inner: (*self.inner).clone(),
        }
    }
}

/// Writable raster with exclusive ownership of its samples.
#[derive(Debug)]
pub struct RasterMut {
    inner: RasterData,
}

impl RasterMut {
    /// Create a zero-filled raster.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for an empty shape, or
    /// [`Error::AllocationFailed`] if the storage cannot be reserved.
    pub fn new(name: &str, descriptor: RasterDescriptor) -> Result<Self> {
        Ok(RasterMut {
            inner: RasterData::new(name, descriptor)?,
        })
    }

    /// Element name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Shape and encoding.
    #[inline]
    pub fn descriptor(&self) -> RasterDescriptor {
        self.inner.descriptor
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> u32 {
        self.inner.descriptor.rows
    }

    /// Number of columns.
    #[inline]
    pub fn columns(&self) -> u32 {
        self.inner.descriptor.columns
    }

    /// Sample encoding.
    #[inline]
    pub fn encoding(&self) -> Encoding {
        self.inner.descriptor.encoding
    }

    /// Set the band-0 sample at (row, column).
    ///
    /// # Errors
    ///
    /// Returns [`Error::EncodingMismatch`] or [`Error::IndexOutOfBounds`].
    pub fn set_value<T: Sample>(&mut self, row: u32, column: u32, value: T) -> Result<()> {
        let index = self.inner.index(row, column, 0)?;
        let encoding = self.encoding();
        let values = T::slice_mut(&mut self.inner.samples).ok_or(Error::EncodingMismatch {
            expected: encoding,
            actual: T::ENCODING,
        })?;
        values[index] = value;
        Ok(())
    }

    /// Create a write cursor over one band.
    ///
    /// The cursor is invalid if the requested band does not exist or `T`
    /// does not match the encoding.
    pub fn data_accessor_mut<T: Sample>(&mut self, request: &DataRequest) -> DataAccessorMut<'_, T> {
        let rows = self.rows();
        let columns = self.columns();
        let range = self.inner.band_range(request.band());
        let data = match range {
            Some(range) => T::slice_mut(&mut self.inner.samples).map(|values| &mut values[range]),
            None => None,
        };
        DataAccessorMut::new(data, rows, columns)
    }
}

impl From<RasterMut> for Raster {
    fn from(raster: RasterMut) -> Self {
        Raster {
            inner: Arc::new(raster.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raster_creation() {
        let raster = Raster::new("cube", 4, 5, Encoding::Int16).unwrap();
        assert_eq!(raster.name(), "cube");
        assert_eq!(raster.rows(), 4);
        assert_eq!(raster.columns(), 5);
        assert_eq!(raster.bands(), 1);
        assert_eq!(raster.encoding(), Encoding::Int16);
        assert_eq!(raster.samples().len(), 20);
        assert_eq!(raster.get_value::<i16>(3, 4).unwrap(), 0);
    }

    #[test]
    fn test_raster_creation_invalid() {
        assert!(matches!(
            Raster::new("cube", 0, 5, Encoding::UInt8),
            Err(Error::InvalidDimension { .. })
        ));
        assert!(Raster::new("cube", 5, 0, Encoding::UInt8).is_err());
        let bandless = RasterDescriptor::new(2, 2, Encoding::UInt8).with_bands(0);
        assert!(Raster::with_descriptor("cube", bandless).is_err());
    }

    #[test]
    fn test_from_vec_checks_length() {
        assert!(Raster::from_vec("cube", 2, 2, vec![1u8, 2, 3]).is_err());
        let two_bands = Raster::from_vec("cube", 2, 2, vec![0u8; 8]).unwrap();
        assert_eq!(two_bands.bands(), 2);
    }

    #[test]
    fn test_complex_raster_can_be_stored() {
        let samples = Samples::ComplexFloat32(vec![FloatComplex::default(); 6]);
        let raster = Raster::from_samples("cube", 2, 3, samples).unwrap();
        assert_eq!(raster.encoding(), Encoding::ComplexFloat32);
        assert!(raster.get_value::<f32>(0, 0).is_err());
    }

    #[test]
    fn test_get_value_checks_type_and_bounds() {
        let raster = Raster::from_vec("cube", 2, 2, vec![1.5f64, 2.5, 3.5, 4.5]).unwrap();
        assert_eq!(raster.get_value::<f64>(1, 0).unwrap(), 3.5);
        assert!(matches!(
            raster.get_value::<f32>(0, 0),
            Err(Error::EncodingMismatch { .. })
        ));
        assert!(matches!(
            raster.get_value::<f64>(2, 0),
            Err(Error::IndexOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_band_values() {
        let raster = Raster::from_vec("cube", 1, 2, vec![1i32, 2, 10, 20]).unwrap();
        assert_eq!(raster.get_band_value::<i32>(0, 1, 1).unwrap(), 20);
        assert_eq!(raster.to_vec::<i32>().unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_clone_shares_data() {
        let raster1 = Raster::new("cube", 3, 3, Encoding::UInt8).unwrap();
        let raster2 = raster1.clone();
        assert_eq!(raster1.ref_count(), 2);
        let raster1 = raster1.try_into_mut().unwrap_err();
        drop(raster2);
        assert_eq!(raster1.ref_count(), 1);
        assert!(raster1.try_into_mut().is_ok());
    }

    #[test]
    fn test_mut_round_trip() {
        let mut raster = RasterMut::new("out", RasterDescriptor::new(2, 2, Encoding::UInt32)).unwrap();
        raster.set_value(1, 1, 7u32).unwrap();
        assert!(raster.set_value(1, 1, 7u8).is_err());
        let raster: Raster = raster.into();
        assert_eq!(raster.to_vec::<u32>().unwrap(), vec![0, 0, 0, 7]);

        let mut copy = raster.to_mut();
        copy.set_value(0, 0, 1u32).unwrap();
        assert_eq!(raster.get_value::<u32>(0, 0).unwrap(), 0);
    }
}
