//! Raster container regression test
//!
//! Exercises creation for every encoding, sequential accessor traversal
//! and the shared/exclusive ownership round trip.

use rastedge_core::{
    DataRequest, Encoding, HeapRasterFactory, Raster, RasterDescriptor, RasterFactory, Sample,
};
use rastedge_test::{RegParams, raster_from_fn};

fn traverse<T: Sample>(rp: &mut RegParams) {
    let raster = raster_from_fn::<T>("ramp", 3, 4, |r, c| (r * 4 + c) as f64).unwrap();
    let mut acc = raster.data_accessor::<T>(&DataRequest::new());
    let mut seen = Vec::new();
    for r in 0..raster.rows() {
        for c in 0..raster.columns() {
            acc.to_pixel(r, c);
            seen.push(acc.value().unwrap().to_f64());
        }
    }
    let expected: Vec<f64> = (0..12).map(f64::from).collect();
    rp.compare_values(1.0, if seen == expected { 1.0 } else { 0.0 }, 0.0);
}

#[test]
fn raster_reg() {
    let mut rp = RegParams::new("raster");

    // --- Test 1: zero-filled creation for every encoding ---
    for encoding in Encoding::ALL {
        let descriptor = RasterDescriptor::new(5, 6, encoding).with_bands(2);
        let raster: Raster = HeapRasterFactory
            .create_raster("cube", descriptor)
            .unwrap()
            .into();
        rp.compare_values(60.0, raster.samples().len() as f64, 0.0);
        rp.compare_values(1.0, if raster.encoding() == encoding { 1.0 } else { 0.0 }, 0.0);
        rp.compare_values(1.0, if raster.descriptor() == descriptor { 1.0 } else { 0.0 }, 0.0);
    }

    // --- Test 2: seek-and-read traversal ---
    traverse::<i8>(&mut rp);
    traverse::<u16>(&mut rp);
    traverse::<u32>(&mut rp);
    traverse::<f32>(&mut rp);

    // --- Test 3: exclusive ownership round trip ---
    let raster = Raster::new("cube", 2, 2, Encoding::Float64).unwrap();
    let mut owned = raster.try_into_mut().expect("unique raster");
    owned.set_value(1, 1, 2.5f64).unwrap();
    let raster: Raster = owned.into();
    rp.compare_values(2.5, raster.get_value::<f64>(1, 1).unwrap(), 0.0);

    assert!(rp.cleanup(), "raster regression test failed");
}
