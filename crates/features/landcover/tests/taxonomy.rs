use fcheck_kernel::domain::landcover::QualifyingClasses;
use fcheck_landcover::{LandCoverClass, Taxonomy, classify};

#[test]
fn legend_matches_worldcover() {
    let table = [
        (10, "cropland", true),
        (20, "forest", true),
        (30, "shrubland", false),
        (40, "grassland", false),
        (50, "wetland", false),
        (60, "water", false),
        (70, "built-up", false),
        (80, "bare/sparse vegetation", false),
        (90, "snow/ice", false),
    ];

    for (code, label, qualifies) in table {
        let result = classify(code);
        assert_eq!(result.label(), label, "code {code}");
        assert_eq!(result.qualifies_for_area(), qualifies, "code {code}");
    }
}

#[test]
fn codes_outside_the_legend_are_unknown() {
    for code in [999, 0, -10, 95, 100, i64::MAX] {
        let result = classify(code);
        assert_eq!(result.class(), LandCoverClass::Unknown, "code {code}");
        assert_eq!(result.label(), "unknown");
        assert!(!result.qualifies_for_area());
        assert!(result.qualified().is_none());
    }
}

#[test]
fn missing_code_is_unknown() {
    let result = Taxonomy::default().classify(None);
    assert_eq!(result.class(), LandCoverClass::Unknown);
    assert!(!result.qualifies_for_area());
}

#[test]
fn policy_decides_which_classes_qualify() {
    let narrow = Taxonomy::new(QualifyingClasses::CROPLAND);
    assert!(narrow.classify(Some(10)).qualifies_for_area());
    assert!(!narrow.classify(Some(20)).qualifies_for_area());

    let none = Taxonomy::new(QualifyingClasses::empty());
    assert!(!none.classify(Some(10)).qualifies_for_area());
    assert_eq!(none.rejection_message(), "Selected area does not qualify for measurement.");
}
