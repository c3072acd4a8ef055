use std::path::Path;
use wirebend_core::data::materials::*;

fn custom(id: &str, diameter: f64) -> WireMaterial {
    WireMaterial::new(
        MaterialId(id.to_string()),
        format!("Custom {id}"),
        WireAlloy::Other,
        diameter,
        PinPosition::Custom(20.0),
        format!("{id}.csv"),
    )
}

#[test]
fn test_material_id_display() {
    let id = MaterialId("test_material".to_string());
    assert_eq!(id.to_string(), "test_material");
}

#[test]
fn test_material_creation() {
    let material = custom("brass", 1.2);

    assert_eq!(material.id.0, "brass");
    assert_eq!(material.name, "Custom brass");
    assert_eq!(material.alloy, WireAlloy::Other);
    assert!(!material.custom);
}

#[test]
fn test_material_library_add_and_get() {
    let mut library = MaterialLibrary::new();
    library.add_material(custom("test", 1.0));

    assert_eq!(library.len(), 1);
    assert!(library.get_material(&MaterialId("test".to_string())).is_some());
    assert!(library.require(&MaterialId("nope".to_string())).is_err());
}

#[test]
fn test_listing_is_sorted_by_diameter() {
    let mut library = MaterialLibrary::new();
    library.add_material(custom("thick", 3.0));
    library.add_material(custom("thin", 0.8));
    library.add_material(custom("mid", 1.5));

    let diameters: Vec<f64> = library
        .get_all_materials()
        .iter()
        .map(|m| m.wire_diameter_mm)
        .collect();
    assert_eq!(diameters, vec![0.8, 1.5, 3.0]);
}

#[test]
fn test_search_by_name() {
    let library = init_standard_library();
    let results = library.search_by_name("mild");
    assert_eq!(results.len(), 2);
}

#[test]
fn test_merge_custom_materials() {
    let mut library = init_standard_library();
    let before = library.len();
    let json = serde_json::to_string(&vec![custom("copper", 1.0)]).unwrap();

    assert_eq!(library.merge_json(&json).unwrap(), 1);
    assert_eq!(library.len(), before + 1);
    let copper = library.get_material(&MaterialId("copper".to_string())).unwrap();
    assert!(copper.custom);
    assert!(library.merge_json("{\"not\": \"a list\"}").is_err());
}

#[test]
fn test_bend_parameters_from_material() {
    let material = custom("custom", 1.0);
    let params = material.bend_parameters();
    assert_eq!(params.material, Some(MaterialId("custom".to_string())));
    assert_eq!(params.pin_mm(), 20.0);
    assert_eq!(
        material.calibration_path(Path::new("/data")),
        Path::new("/data/custom.csv")
    );
}

#[test]
fn test_materials_by_alloy() {
    let library = init_standard_library();
    let mild = library.get_materials_by_alloy(WireAlloy::MildSteel);
    assert_eq!(mild.len(), 2);
    assert!(mild.iter().all(|m| m.alloy == WireAlloy::MildSteel));
    assert!(library.get_materials_by_alloy(WireAlloy::Other).is_empty());
}
