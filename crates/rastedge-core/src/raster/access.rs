//! Cursor-style sample access
//!
//! A data accessor is bound to one band of one raster and carries a current
//! position. It is moved with [`to_pixel`](DataAccessor::to_pixel) or the
//! sequential `next_column` / `next_row` steps, and must be valid before it
//! is dereferenced.
//!
//! An accessor is valid when it has backing storage and its position lies
//! inside the raster. Storage is missing when the requested band does not
//! exist or the sample type does not match the raster encoding.

use super::Sample;
use crate::error::{Error, Result};

/// Selects what part of a raster an accessor is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DataRequest {
    band: u32,
}

impl DataRequest {
    /// Request band 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a specific band.
    pub fn with_band(mut self, band: u32) -> Self {
        self.band = band;
        self
    }

    /// Requested band.
    #[inline]
    pub fn band(&self) -> u32 {
        self.band
    }
}

#[derive(Debug, Clone, Copy)]
struct Position {
    rows: u32,
    columns: u32,
    row: u32,
    column: u32,
}

impl Position {
    fn new(rows: u32, columns: u32) -> Self {
        Self {
            rows,
            columns,
            row: 0,
            column: 0,
        }
    }

    #[inline]
    fn in_bounds(&self) -> bool {
        self.row < self.rows && self.column < self.columns
    }

    #[inline]
    fn offset(&self) -> usize {
        self.row as usize * self.columns as usize + self.column as usize
    }

    #[inline]
    fn next_column(&mut self) {
        self.column = self.column.saturating_add(1);
    }

    #[inline]
    fn next_row(&mut self) {
        self.row = self.row.saturating_add(1);
        self.column = 0;
    }

    fn invalid(&self) -> Error {
        Error::InvalidAccessor {
            row: self.row,
            column: self.column,
        }
    }
}

/// Read cursor over one raster band.
#[derive(Debug, Clone)]
pub struct DataAccessor<'a, T> {
    data: Option<&'a [T]>,
    position: Position,
}

impl<'a, T: Sample> DataAccessor<'a, T> {
    pub(crate) fn new(data: Option<&'a [T]>, rows: u32, columns: u32) -> Self {
        Self {
            data,
            position: Position::new(rows, columns),
        }
    }

    /// Seek to (row, column).
    #[inline]
    pub fn to_pixel(&mut self, row: u32, column: u32) {
        self.position.row = row;
        self.position.column = column;
    }

    /// Advance one column within the current row.
    #[inline]
    pub fn next_column(&mut self) {
        self.position.next_column();
    }

    /// Advance to the first column of the next row.
    #[inline]
    pub fn next_row(&mut self) {
        self.position.next_row();
    }

    /// Check whether the cursor can be dereferenced.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.data.is_some() && self.position.in_bounds()
    }

    /// Current row.
    #[inline]
    pub fn row(&self) -> u32 {
        self.position.row
    }

    /// Current column.
    #[inline]
    pub fn column(&self) -> u32 {
        self.position.column
    }

    /// Read the sample at the current position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAccessor`] if the cursor is not valid.
    #[inline]
    pub fn value(&self) -> Result<T> {
        match self.data {
            Some(data) if self.position.in_bounds() => Ok(data[self.position.offset()]),
            _ => Err(self.position.invalid()),
        }
    }
}

/// Write cursor over one raster band.
#[derive(Debug)]
pub struct DataAccessorMut<'a, T> {
    data: Option<&'a mut [T]>,
    position: Position,
}

impl<'a, T: Sample> DataAccessorMut<'a, T> {
    pub(crate) fn new(data: Option<&'a mut [T]>, rows: u32, columns: u32) -> Self {
        Self {
            data,
            position: Position::new(rows, columns),
        }
    }

    /// Seek to (row, column).
    #[inline]
    pub fn to_pixel(&mut self, row: u32, column: u32) {
        self.position.row = row;
        self.position.column = column;
    }

    /// Advance one column within the current row.
    #[inline]
    pub fn next_column(&mut self) {
        self.position.next_column();
    }

    /// Advance to the first column of the next row.
    #[inline]
    pub fn next_row(&mut self) {
        self.position.next_row();
    }

    /// Check whether the cursor can be dereferenced.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.data.is_some() && self.position.in_bounds()
    }

    /// Current row.
    #[inline]
    pub fn row(&self) -> u32 {
        self.position.row
    }

    /// Current column.
    #[inline]
    pub fn column(&self) -> u32 {
        self.position.column
    }

    /// Read back the sample at the current position.
    pub fn value(&self) -> Result<T> {
        match self.data.as_deref() {
            Some(data) if self.position.in_bounds() => Ok(data[self.position.offset()]),
            _ => Err(self.position.invalid()),
        }
    }

    /// Write the sample at the current position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAccessor`] if the cursor is not valid.
    #[inline]
    pub fn set_value(&mut self, value: T) -> Result<()> {
        let in_bounds = self.position.in_bounds();
        let offset = self.position.offset();
        match self.data.as_deref_mut() {
            Some(data) if in_bounds => {
                data[offset] = value;
                Ok(())
            }
            _ => Err(self.position.invalid()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::raster::{Encoding, Raster, RasterDescriptor, RasterMut};

    use super::*;

    #[test]
    fn test_accessor_seek_and_read() {
        let raster = Raster::from_vec("cube", 2, 3, vec![1u8, 2, 3, 4, 5, 6]).unwrap();
        let mut acc = raster.data_accessor::<u8>(&DataRequest::new());
        assert!(acc.is_valid());
        acc.to_pixel(1, 2);
        assert_eq!(acc.value().unwrap(), 6);
        acc.to_pixel(0, 1);
        assert_eq!(acc.value().unwrap(), 2);
    }

    #[test]
    fn test_accessor_out_of_bounds_is_invalid() {
        let raster = Raster::from_vec("cube", 2, 2, vec![1u8, 2, 3, 4]).unwrap();
        let mut acc = raster.data_accessor::<u8>(&DataRequest::new());
        acc.to_pixel(2, 0);
        assert!(!acc.is_valid());
        assert!(matches!(
            acc.value(),
            Err(Error::InvalidAccessor { row: 2, column: 0 })
        ));
        acc.to_pixel(0, 2);
        assert!(acc.value().is_err());
    }

    #[test]
    fn test_accessor_without_storage() {
        let raster = Raster::from_vec("cube", 2, 2, vec![1u8, 2, 3, 4]).unwrap();
        let wrong_type = raster.data_accessor::<i16>(&DataRequest::new());
        assert!(!wrong_type.is_valid());
        let wrong_band = raster.data_accessor::<u8>(&DataRequest::new().with_band(1));
        assert!(!wrong_band.is_valid());
        assert!(wrong_band.value().is_err());
    }

    #[test]
    fn test_accessor_reads_requested_band() {
        let raster = Raster::from_vec("cube", 1, 2, vec![1.0f32, 2.0, 10.0, 20.0]).unwrap();
        let mut acc = raster.data_accessor::<f32>(&DataRequest::new().with_band(1));
        acc.to_pixel(0, 1);
        assert_eq!(acc.value().unwrap(), 20.0);
    }

    #[test]
    fn test_sequential_write() {
        let descriptor = RasterDescriptor::new(2, 2, Encoding::Int32);
        let mut out = RasterMut::new("out", descriptor).unwrap();
        {
            let mut acc = out.data_accessor_mut::<i32>(&DataRequest::new());
            let mut next = 1;
            for _ in 0..2 {
                assert!(acc.is_valid());
                for _ in 0..2 {
                    acc.set_value(next).unwrap();
                    next += 1;
                    acc.next_column();
                }
                assert!(!acc.is_valid());
                acc.next_row();
            }
            assert_eq!((acc.row(), acc.column()), (2, 0));
            assert!(acc.set_value(99).is_err());
        }
        let raster: Raster = out.into();
        assert_eq!(raster.to_vec::<i32>().unwrap(), vec![1, 2, 3, 4]);
    }
}
