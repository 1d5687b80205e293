//! Integration tests for the layer archive writer and driver table files.

use chrono::NaiveDate;
use ndarray::{Array2, array};
use sdcmap_calendar::TimeWindow;
use sdcmap_io::{DriverFormat, IoError, load_driver, read_driver, write_layers_netcdf};
use tempfile::tempdir;

#[test]
fn layers_roundtrip_through_netcdf() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("layers.nc");
    let corr = array![[0.5, f64::NAN, -0.25], [0.1, 0.2, 0.3]];
    let count = array![[2.0, f64::NAN, 3.0], [4.0, 5.0, 6.0]];
    let lats = [10.0, 0.0];
    let lons = [-170.0, -160.0, -150.0];

    let written = write_layers_netcdf(
        &path,
        &[("corr_mean", &corr), ("n_selected", &count)],
        &lats,
        &lons,
    )
    .unwrap();
    assert_eq!(written, path);

    let file = netcdf::open(&path).unwrap();
    let lat: Vec<f64> = file.variable("lat").unwrap().get_values(..).unwrap();
    assert_eq!(lat, lats);
    let var = file.variable("corr_mean").unwrap();
    assert_eq!(var.dimensions().len(), 2);
    let values: Vec<f64> = var.get_values(..).unwrap();
    assert_eq!(values[0], 0.5);
    assert!(values[1].is_nan());
    assert_eq!(values[5], 0.3);
    let values: Vec<f64> = file.variable("n_selected").unwrap().get_values(..).unwrap();
    assert_eq!(values[3], 4.0);
}

#[test]
fn layer_shape_mismatch_is_error() {
    let dir = tempdir().unwrap();
    let layer = Array2::<f64>::zeros((2, 2));
    let err = write_layers_netcdf(
        &dir.path().join("bad.nc"),
        &[("corr_mean", &layer)],
        &[0.0, 1.0, 2.0],
        &[0.0, 1.0],
    )
    .unwrap_err();
    assert!(matches!(err, IoError::DimensionMismatch { expected: 3, got: 2, .. }));
}

#[test]
fn duplicate_layer_name_is_error() {
    let dir = tempdir().unwrap();
    let layer = Array2::<f64>::zeros((1, 1));
    let err = write_layers_netcdf(
        &dir.path().join("dup.nc"),
        &[("a", &layer), ("a", &layer)],
        &[0.0],
        &[0.0],
    )
    .unwrap_err();
    assert!(matches!(err, IoError::Validation { .. }));
}

#[test]
fn psl_file_drops_sentinels() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("pdo.data");
    std::fs::write(
        &path,
        " 2015 2016\n\
         2015  0.1  0.2  0.3  0.4  0.5  0.6  0.7  0.8  0.9  1.0  1.1  1.2\n\
         2016  1.3  1.4  1.5 -9.90 -9.90 -9.90 -9.90 -9.90 -9.90 -9.90 -9.90 -9.90\n\
         -9.90\n\
         PDO\n",
    )
    .unwrap();

    let series = read_driver(&path, DriverFormat::PslTable, -9.9).unwrap();
    assert_eq!(series.len(), 15);
    assert_eq!(series.dates()[14], NaiveDate::from_ymd_opt(2016, 3, 1).unwrap());
}

#[test]
fn nino34_csv_windowed() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nina34.anom.csv");
    std::fs::write(
        &path,
        "Date,Nino34\n2015-09-01,1.5\n2015-10-01,2.0\n2015-11-01,2.5\n2015-12-01,2.6\n2016-01-01,-99.99\n",
    )
    .unwrap();

    let window = TimeWindow::parse("2015-10-01", "2015-12-01").unwrap();
    let series = load_driver(&path, "nino34", &window).unwrap();
    assert_eq!(series.len(), 3);
    assert_eq!(series.values()[1], 2.5);
}

#[test]
fn driver_missing_file() {
    let err = read_driver(
        std::path::Path::new("/nonexistent/pdo.data"),
        DriverFormat::PslTable,
        -9.9,
    )
    .unwrap_err();
    assert!(matches!(err, IoError::FileNotFound { .. }));
}
