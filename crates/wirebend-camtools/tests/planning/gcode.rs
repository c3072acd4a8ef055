//! Bender instruction streams

use wirebend_camtools::{GCodeEmitter, PinSide};
use wirebend_core::MachineProfile;

fn emitter() -> GCodeEmitter {
    GCodeEmitter::new(&MachineProfile::default())
}

#[test]
fn test_opposite_bend_ducks_once() {
    let program = emitter().emit_sequences(
        &[10.0, 10.0],
        &[0.0, 0.0],
        &[30.0, -30.0],
        &[30.0, -30.0],
        12.0,
    );
    assert_eq!(program.count("M106 P0 S1.0"), 1);
    assert_eq!(program.count("M106 P0 S0"), 1);
    assert_eq!(program.count("G0 Z-30"), 1);
    assert_eq!(program.count("G0 Z30"), 2);
}

#[test]
fn test_full_program_text() {
    let program = emitter().emit_sequences(
        &[9.856, 10.144],
        &[0.0, 0.0],
        &[90.0, 0.0],
        &[95.5, 0.0],
        16.5,
    );
    let expected = "%\n\
; For use with 16.5 mm pin only\n\
M98 P\"not12mm.g\"\n\
G1 X9.86\n\
G1 Z95.50\n\
G0 Z-30\n\
G1 X20.00\n\
%\n";
    assert_eq!(program.to_text(), expected);
}

#[test]
fn test_negative_first_bend_ducks() {
    let program = emitter().emit_sequences(&[10.0], &[0.0], &[-45.0], &[-50.0], 12.0);
    let codes: Vec<&str> = program
        .instructions()
        .iter()
        .map(|i| i.code.as_str())
        .collect();
    let bend = codes.iter().position(|c| *c == "G1 Z-50.00").unwrap();
    assert_eq!(&codes[bend - 3..bend], &["M106 P0 S1.0", "G0 Z30", "M106 P0 S0"]);
    assert_eq!(codes[bend + 1], "G0 Z30");
}

#[test]
fn test_tiny_moves_are_skipped() {
    let program = emitter().emit_sequences(&[0.005], &[0.005], &[0.01], &[0.0], 12.0);
    assert_eq!(program.len(), 3);
}

#[test]
fn test_pin_side_for_angle() {
    assert_eq!(PinSide::for_angle(10.0), PinSide::Positive);
    assert_eq!(PinSide::for_angle(-0.5), PinSide::Negative);
}
