use wirebend_core::data::materials::{self, MaterialId, PinPosition};

#[test]
fn test_presets_loaded_into_standard_library() {
    let library = materials::init_standard_library();

    for id in [
        "steel_1085_1mm",
        "steel_1085_1_5mm",
        "galvanized_2mm",
        "mild_steel_3mm",
        "mild_steel_1_8in",
        "spring_steel_3mm",
    ] {
        assert!(
            library.get_material(&MaterialId(id.to_string())).is_some(),
            "missing {id}"
        );
    }
}

#[test]
fn test_preset_pins_pass_the_guard() {
    let library = materials::init_standard_library();
    for m in library.get_all_materials() {
        let params = m.bend_parameters();
        assert!(!params.pin_overridden, "{} overridden", m.name);
        assert_eq!(params.pin_position, m.pin_position);
    }
}

#[test]
fn test_spring_steel_uses_outer_pin() {
    let library = materials::init_standard_library();
    let m = library
        .get_material(&MaterialId("spring_steel_3mm".to_string()))
        .unwrap();
    assert_eq!(m.pin_position, PinPosition::Pin27_5);
    assert_eq!(m.calibration_file.to_str(), Some("Spring Steel - 3mm.csv"));
}

#[test]
fn test_imperial_preset_diameter() {
    let library = materials::init_standard_library();
    let m = library
        .get_material(&MaterialId("mild_steel_1_8in".to_string()))
        .unwrap();
    assert!((m.wire_diameter_mm - 3.175).abs() < 1e-12);
}
