//! Roberts edge detection regression test
//!
//! Checks the filter against a direct evaluation of the gradient formula
//! for every real encoding, the edge replication at the last row and
//! column, and band selection on multi-band input.

use rastedge_core::{Encoding, Raster, Sample};
use rastedge_filter::{RobertsEdge, RobertsOptions, roberts_edge};
use rastedge_test::{RegParams, init_logging, raster_from_fn, raster_from_rows};

const ROWS: u32 = 5;
const COLS: u32 = 7;

fn pattern(row: u32, col: u32) -> f64 {
    ((row * 7 + col * col * 3) % 50) as f64
}

/// Evaluate the operator on plain row-major values.
fn reference<T: Sample>(values: &[T], rows: u32, cols: u32) -> Vec<T> {
    let at = |r: u32, c: u32| values[(r * cols + c) as usize].to_f64();
    let mut out = Vec::with_capacity(values.len());
    for r in 0..rows {
        for c in 0..cols {
            let nr = (r + 1).min(rows - 1);
            let nc = (c + 1).min(cols - 1);
            let gx = at(r, c) - at(nr, nc);
            let gy = at(r, nc) - at(nr, c);
            out.push(T::from_f64((gx * gx + gy * gy).sqrt()));
        }
    }
    out
}

fn check_encoding<T: Sample>(rp: &mut RegParams) {
    let cube = raster_from_fn::<T>("cube", ROWS, COLS, pattern).expect("build cube");
    let edges = roberts_edge(&cube).expect("roberts_edge");
    eprintln!("  {}: {}x{}", edges.encoding(), edges.rows(), edges.columns());

    rp.compare_values(ROWS as f64, edges.rows() as f64, 0.0);
    rp.compare_values(COLS as f64, edges.columns() as f64, 0.0);
    rp.compare_values(1.0, if edges.encoding() == T::ENCODING { 1.0 } else { 0.0 }, 0.0);

    let expected = reference(&cube.to_vec::<T>().unwrap(), ROWS, COLS);
    rp.compare_samples(&edges, &expected);
}

#[test]
fn roberts_reg() {
    init_logging();
    let mut rp = RegParams::new("roberts");

    // --- Test 1: 2x2 uint8 scenario ---
    let cube = raster_from_rows::<u8>("cube", &[&[10, 20], &[30, 40]]).unwrap();
    let edges = roberts_edge(&cube).expect("roberts_edge");
    rp.compare_samples(&edges, &[31u8, 28, 14, 0]);

    // --- Test 2: every real encoding against the formula ---
    check_encoding::<i8>(&mut rp);
    check_encoding::<u8>(&mut rp);
    check_encoding::<i16>(&mut rp);
    check_encoding::<u16>(&mut rp);
    check_encoding::<i32>(&mut rp);
    check_encoding::<u32>(&mut rp);
    check_encoding::<f32>(&mut rp);
    check_encoding::<f64>(&mut rp);

    // --- Test 3: input is left untouched ---
    let cube = raster_from_fn::<u16>("cube", ROWS, COLS, pattern).unwrap();
    let before = cube.to_mut();
    let _ = roberts_edge(&cube).expect("roberts_edge");
    rp.compare_rasters(&cube, &before.into());

    assert!(rp.cleanup(), "roberts regression test failed");
}

#[test]
fn roberts_boundary_reg() {
    init_logging();
    let mut rp = RegParams::new("roberts_boundary");

    let cube = raster_from_fn::<f64>("cube", ROWS, COLS, |r, c| (r * r) as f64 + 0.5 * c as f64)
        .unwrap();
    let edges = roberts_edge(&cube).unwrap();
    let v = |raster: &Raster, r: u32, c: u32| raster.get_value::<f64>(r, c).unwrap();

    // Last row: down and lower-right are taken from the row itself,
    // so only the horizontal difference remains
    let last = ROWS - 1;
    for c in 0..COLS - 1 {
        let diff = v(&cube, last, c) - v(&cube, last, c + 1);
        let expected = (2.0 * diff * diff).sqrt();
        rp.compare_values(expected, v(&edges, last, c), 0.0);
    }

    // Last column: right and lower-right are taken from the column itself
    let last = COLS - 1;
    for r in 0..ROWS - 1 {
        let diff = v(&cube, r, last) - v(&cube, r + 1, last);
        let expected = (2.0 * diff * diff).sqrt();
        rp.compare_values(expected, v(&edges, r, last), 0.0);
    }

    // Corner compares the pixel with itself
    rp.compare_values(0.0, v(&edges, ROWS - 1, COLS - 1), 0.0);

    // Single row and single column rasters
    let row = raster_from_rows::<i32>("row", &[&[0, 3, 9, 4]]).unwrap();
    let edges = roberts_edge(&row).unwrap();
    let expected: Vec<i32> = [3.0f64, 6.0, 5.0, 0.0]
        .iter()
        .map(|d| (2.0 * d * d).sqrt() as i32)
        .collect();
    rp.compare_samples(&edges, &expected);

    let column = raster_from_rows::<i32>("column", &[&[0], &[3], &[9], &[4]]).unwrap();
    let edges = roberts_edge(&column).unwrap();
    rp.compare_samples(&edges, &expected);

    assert!(rp.cleanup(), "roberts boundary regression test failed");
}

#[test]
fn roberts_band_reg() {
    init_logging();
    let mut rp = RegParams::new("roberts_band");

    // Two bands of 2x2; band 1 holds the scenario values
    let cube = Raster::from_vec("cube", 2, 2, vec![0u8, 0, 0, 0, 10, 20, 30, 40]).unwrap();
    rp.compare_values(2.0, cube.bands() as f64, 0.0);

    let band0 = roberts_edge(&cube).unwrap();
    rp.compare_samples(&band0, &[0u8, 0, 0, 0]);

    let options = RobertsOptions {
        band: 1,
        ..Default::default()
    };
    let band1 = RobertsEdge::new(options)
        .execute(Some(&cube), None, &Default::default())
        .unwrap();
    rp.compare_values(1.0, band1.bands() as f64, 0.0);
    rp.compare_values(1.0, if band1.encoding() == Encoding::UInt8 { 1.0 } else { 0.0 }, 0.0);
    rp.compare_samples(&band1, &[31u8, 28, 14, 0]);

    assert!(rp.cleanup(), "roberts band regression test failed");
}
