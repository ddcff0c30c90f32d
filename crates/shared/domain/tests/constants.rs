use fcheck_domain::constants::{ACRES_PER_SQUARE_METER, DEFAULT_BAND, DEFAULT_DATASET};
use fcheck_domain::landcover::{CROPLAND, FOREST, QualifyingClasses};

#[test]
fn acre_conversion_constant_is_exact() {
    assert_eq!(ACRES_PER_SQUARE_METER.to_bits(), 0.000_247_105_f64.to_bits());
}

#[test]
fn dataset_constants_match_worldcover() {
    assert_eq!(DEFAULT_DATASET, "ESA/WorldCover/v100/2020");
    assert_eq!(DEFAULT_BAND, "Map");
}

#[test]
fn qualifying_labels_round_trip_through_flags() {
    assert_eq!(QualifyingClasses::from_label(CROPLAND), Some(QualifyingClasses::CROPLAND));
    assert_eq!(QualifyingClasses::from_label(FOREST), Some(QualifyingClasses::FOREST));
    assert_eq!(QualifyingClasses::from_label("water"), None);

    let labels: Vec<_> = QualifyingClasses::default().labels().collect();
    assert_eq!(labels, ["cropland", "forest"]);
}
