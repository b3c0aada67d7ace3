//! Roberts edge detection over a whole raster
//!
//! [`RobertsEdge`] validates the input, allocates a result raster of the
//! same shape and encoding, and runs [`edge_value`] over every pixel in
//! row-major order. The sample type is resolved once per run through
//! [`Encoding::dispatch`].
//!
//! Each row starts with a progress report and an abort check. Any failure
//! drops the partially written result; only a completed raster is returned.
//!
//! # Example
//!
//! ```
//! use rastedge_core::Raster;
//! use rastedge_filter::roberts_edge;
//!
//! let cube = Raster::from_vec("cube", 2, 2, vec![10u8, 20, 30, 40]).unwrap();
//! let edges = roberts_edge(&cube).unwrap();
//! assert_eq!(edges.name(), "cube_Edge_Detection_Result");
//! assert_eq!(edges.to_vec::<u8>().unwrap(), vec![31, 28, 14, 0]);
//! ```

use crate::edge::edge_value;
use crate::{FilterError, FilterResult};
use log::debug;
use rastedge_core::{
    AbortFlag, DataRequest, EncodingVisitor, HeapRasterFactory, Progress, Raster,
    RasterDescriptor, RasterFactory, RasterMut, ReportingLevel, Sample, Step, StepOutcome,
};

// ============================================================================
// Default parameters
// ============================================================================

/// Default step name recorded in the log
pub const DEFAULT_STEP_NAME: &str = "Robert Edge Detection";

/// Default suffix appended to the input name to name the result
pub const DEFAULT_RESULT_SUFFIX: &str = "_Edge_Detection_Result";

/// Progress text reported at the start of every row
pub const PROGRESS_TEXT: &str = "Calculating result";

/// Progress text reported on completion
pub const COMPLETE_TEXT: &str = "Edge detection is complete.";

// ============================================================================
// Options
// ============================================================================

/// Options for Roberts edge detection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobertsOptions {
    /// Name of the logged step
    pub step_name: String,
    /// Suffix appended to the input raster name for the result
    pub result_suffix: String,
    /// Input band to filter
    pub band: u32,
}

impl Default for RobertsOptions {
    fn default() -> Self {
        Self {
            step_name: DEFAULT_STEP_NAME.to_string(),
            result_suffix: DEFAULT_RESULT_SUFFIX.to_string(),
            band: 0,
        }
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Roberts edge detector
pub struct RobertsEdge {
    options: RobertsOptions,
    factory: Box<dyn RasterFactory>,
}

impl Default for RobertsEdge {
    fn default() -> Self {
        Self::new(RobertsOptions::default())
    }
}

impl std::fmt::Debug for RobertsEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RobertsEdge")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl RobertsEdge {
    /// Create a detector that allocates results on the heap.
    pub fn new(options: RobertsOptions) -> Self {
        Self {
            options,
            factory: Box::new(HeapRasterFactory),
        }
    }

    /// Use a different factory for the result raster.
    pub fn with_factory(mut self, factory: impl RasterFactory + 'static) -> Self {
        self.factory = Box::new(factory);
        self
    }

    /// Current options.
    pub fn options(&self) -> &RobertsOptions {
        &self.options
    }

    /// Run edge detection.
    ///
    /// # Arguments
    /// * `input` - Raster to filter; `None` fails with `InvalidInput`
    /// * `progress` - Optional sink for progress and error reports
    /// * `abort` - Polled once per row
    ///
    /// # Returns
    /// A single-band raster with the input's rows, columns and encoding.
    /// On failure nothing is returned; the error message is also reported
    /// to `progress` at 0% with `Errors` level, or `Abort` level for
    /// [`FilterError::Aborted`].
    pub fn execute(
        &self,
        input: Option<&Raster>,
        mut progress: Option<&mut dyn Progress>,
        abort: &AbortFlag,
    ) -> FilterResult<Raster> {
        let mut step = Step::new(&self.options.step_name);

        match self.run(input, &mut progress, abort) {
            Ok(result) => {
                report(&mut progress, COMPLETE_TEXT, 100, ReportingLevel::Normal);
                step.finalize(StepOutcome::Success, COMPLETE_TEXT);
                Ok(result)
            }
            Err(err) => {
                let message = err.to_string();
                let (outcome, level) = if err.is_aborted() {
                    (StepOutcome::Abort, ReportingLevel::Abort)
                } else {
                    (StepOutcome::Failure, ReportingLevel::Errors)
                };
                step.finalize(outcome, &message);
                report(&mut progress, &message, 0, level);
                Err(err)
            }
        }
    }

    fn run(
        &self,
        input: Option<&Raster>,
        progress: &mut Option<&mut dyn Progress>,
        abort: &AbortFlag,
    ) -> FilterResult<Raster> {
        let input = input.ok_or(FilterError::InvalidInput("a raster must be specified"))?;
        let encoding = input.encoding();
        if encoding.is_complex() {
            return Err(FilterError::UnsupportedEncoding(encoding));
        }
        if self.options.band >= input.bands() {
            return Err(FilterError::InvalidInput(
                "the requested band does not exist in the raster",
            ));
        }

        let name = format!("{}{}", input.name(), self.options.result_suffix);
        let descriptor = RasterDescriptor::new(input.rows(), input.columns(), encoding);
        let mut output = self
            .factory
            .create_raster(&name, descriptor)
            .map_err(FilterError::AllocationFailure)?;
        if output.descriptor() != descriptor {
            return Err(FilterError::AllocationFailure(
                rastedge_core::Error::InvalidParameter(format!(
                    "factory returned {:?}, requested {:?}",
                    output.descriptor(),
                    descriptor
                )),
            ));
        }

        debug!(
            "roberts edge on '{}': {}x{} {} band {}",
            input.name(),
            input.rows(),
            input.columns(),
            encoding,
            self.options.band
        );

        let scan = RowScan {
            input,
            request: DataRequest::new().with_band(self.options.band),
            output: &mut output,
            progress,
            abort,
        };
        encoding
            .dispatch(scan)
            .map_err(|_| FilterError::UnsupportedEncoding(encoding))??;

        Ok(output.into())
    }
}

/// Run Roberts edge detection with default options, no progress sink and
/// no way to abort.
pub fn roberts_edge(raster: &Raster) -> FilterResult<Raster> {
    RobertsEdge::default().execute(Some(raster), None, &AbortFlag::new())
}

/// Run Roberts edge detection with default options.
pub fn roberts_edge_with(
    raster: &Raster,
    progress: Option<&mut dyn Progress>,
    abort: &AbortFlag,
) -> FilterResult<Raster> {
    RobertsEdge::default().execute(Some(raster), progress, abort)
}

// ============================================================================
// Internal: row loop
// ============================================================================

fn report(
    progress: &mut Option<&mut dyn Progress>,
    text: &str,
    percent: u32,
    level: ReportingLevel,
) {
    if let Some(sink) = progress.as_deref_mut() {
        sink.update_progress(text, percent, level);
    }
}

struct RowScan<'a, 'p> {
    input: &'a Raster,
    request: DataRequest,
    output: &'a mut RasterMut,
    progress: &'a mut Option<&'p mut dyn Progress>,
    abort: &'a AbortFlag,
}

impl EncodingVisitor for RowScan<'_, '_> {
    type Output = FilterResult<()>;

    fn visit<T: Sample>(self) -> Self::Output {
        let RowScan {
            input,
            request,
            output,
            progress,
            abort,
        } = self;
        let rows = input.rows();
        let cols = input.columns();

        let mut src = input.data_accessor::<T>(&request);
        let mut dest = output.data_accessor_mut::<T>(&DataRequest::new());

        for row in 0..rows {
            let percent = (u64::from(row) * 100 / u64::from(rows)) as u32;
            report(progress, PROGRESS_TEXT, percent, ReportingLevel::Normal);
            if abort.is_aborted() {
                return Err(FilterError::Aborted);
            }
            if !dest.is_valid() {
                return Err(FilterError::AccessFailure {
                    row: dest.row(),
                    column: dest.column(),
                });
            }
            for col in 0..cols {
                let value = edge_value(&mut src, row, col, rows, cols)?;
                dest.set_value(value)
                    .map_err(|_| FilterError::AccessFailure { row, column: col })?;
                dest.next_column();
            }
            dest.next_row();
        }
        Ok(())
    }
}
