//! Static (hard-coded) wire presets.
//!
//! Each preset names the spring-back table measured for it on the machine.
//! Tables live in the materials directory and are read at planning time.
//!
//! The tables shipped under these names store the motor angle in the first
//! column and the realized angle in the second. Reading them needs
//! `layout = "motor_then_desired"` in the `[compensation]` config section;
//! the default layout expects the desired angle first.

use crate::data::materials::{MaterialId, PinPosition, WireAlloy, WireMaterial};

pub fn load_preset_materials() -> Vec<WireMaterial> {
    let mut out = Vec::new();

    // 1085 carbon steel
    {
        let m = WireMaterial::new(
            MaterialId("steel_1085_1mm".to_string()),
            "1085 Steel 1 mm".to_string(),
            WireAlloy::CarbonSteel,
            1.0,
            PinPosition::Pin12,
            "1085 Steel - 1mm.csv",
        );
        out.push(m);
    }

    {
        let m = WireMaterial::new(
            MaterialId("steel_1085_1_5mm".to_string()),
            "1085 Steel 1.5 mm".to_string(),
            WireAlloy::CarbonSteel,
            1.5,
            PinPosition::Pin12,
            "1085 Steel - 1_5mm.csv",
        );
        out.push(m);
    }

    // Galvanized
    {
        let m = WireMaterial::new(
            MaterialId("galvanized_2mm".to_string()),
            "Galvanized Steel 2 mm".to_string(),
            WireAlloy::GalvanizedSteel,
            2.0,
            PinPosition::Pin12,
            "Galvanized Steel - 2mm.csv",
        );
        out.push(m);
    }

    // Mild steel
    {
        let m = WireMaterial::new(
            MaterialId("mild_steel_3mm".to_string()),
            "Mild Steel 3 mm".to_string(),
            WireAlloy::MildSteel,
            3.0,
            PinPosition::Pin16_5,
            "Mild Steel - 3mm.csv",
        );
        out.push(m);
    }

    {
        let mut m = WireMaterial::new(
            MaterialId("mild_steel_1_8in".to_string()),
            "Mild Steel 1/8 in".to_string(),
            WireAlloy::MildSteel,
            3.175,
            PinPosition::Pin16_5,
            "1_8in Mild Steel.csv",
        );
        m.notes = "Imperial stock, 1/8 in = 3.175 mm".to_string();
        out.push(m);
    }

    // Spring steel
    {
        let m = WireMaterial::new(
            MaterialId("spring_steel_3mm".to_string()),
            "Spring Steel 3 mm".to_string(),
            WireAlloy::SpringSteel,
            3.0,
            PinPosition::Pin27_5,
            "Spring Steel - 3mm.csv",
        );
        out.push(m);
    }

    out
}
