//! Bender G-code generation
//!
//! Axis usage on the bender:
//! - `X` feeds wire (cumulative mm)
//! - `Y` twists the wire about the feed axis (cumulative degrees)
//! - `Z` drives the bend pin (motor degrees for bends, fixed offsets to park)
//! - `M106 P0` lifts the pin so it can pass under the wire
//!
//! The pin sits on one side of the wire and can only bend towards the other
//! side. Before a bend in the opposite direction it is lifted, moved across
//! and lowered again ("ducked").

use crate::profile::WireProfile;
use serde::{Deserialize, Serialize};
use std::fmt;
use wirebend_core::MachineProfile;

/// Feeds at or below this length (mm) are not emitted.
pub const MIN_FEED_MM: f64 = 0.01;
/// Twists at or below this angle (degrees) are not emitted.
pub const MIN_TWIST_DEG: f64 = 0.01;
/// Bends at or below this angle (degrees) are not emitted.
pub const MIN_BEND_DEG: f64 = 0.02;

/// Default comment column for annotated output
pub const DEFAULT_COMMENT_COLUMN: usize = 20;

/// Which bend direction the pin is staged for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PinSide {
    Positive,
    Negative,
}

impl PinSide {
    /// Side needed for a bend of `angle_deg`
    pub fn for_angle(angle_deg: f64) -> Self {
        if angle_deg < 0.0 {
            Self::Negative
        } else {
            Self::Positive
        }
    }
}

impl fmt::Display for PinSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positive => write!(f, "positive"),
            Self::Negative => write!(f, "negative"),
        }
    }
}

/// One output line and its explanation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    pub code: String,
    /// Empty when the line needs no explanation
    pub comment: String,
}

impl Instruction {
    fn new(code: impl Into<String>, comment: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            comment: comment.into(),
        }
    }
}

/// Generated instruction stream
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GCodeProgram {
    instructions: Vec<Instruction>,
}

impl GCodeProgram {
    fn push(&mut self, code: impl Into<String>, comment: impl Into<String>) {
        self.instructions.push(Instruction::new(code, comment));
    }

    fn last_mut(&mut self) -> Option<&mut Instruction> {
        self.instructions.last_mut()
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Number of lines whose code is exactly `code`
    pub fn count(&self, code: &str) -> usize {
        self.instructions.iter().filter(|i| i.code == code).count()
    }

    /// Instructions only, one per line
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for i in &self.instructions {
            out.push_str(&i.code);
            out.push('\n');
        }
        out
    }

    /// Instructions padded to `column` with their comments appended
    pub fn to_annotated(&self, column: usize) -> String {
        let mut out = String::new();
        for i in &self.instructions {
            if i.comment.is_empty() {
                out.push_str(&i.code);
            } else {
                out.push_str(&format!("{:<column$}; {}", i.code, i.comment));
            }
            out.push('\n');
        }
        out
    }
}

/// Translates bend sequences into bender G-code
#[derive(Debug, Clone)]
pub struct GCodeEmitter {
    duck_offset_mm: f64,
    macro_pin_threshold_mm: f64,
}

impl GCodeEmitter {
    pub fn new(machine: &MachineProfile) -> Self {
        Self {
            duck_offset_mm: machine.duck_offset_mm,
            macro_pin_threshold_mm: machine.macro_pin_threshold_mm,
        }
    }

    /// Pin move that stages the pin for bends towards `side`
    fn park_move(&self, side: PinSide) -> String {
        match side {
            PinSide::Positive => format!("G0 Z-{}", self.duck_offset_mm),
            PinSide::Negative => format!("G0 Z{}", self.duck_offset_mm),
        }
    }

    /// Generate the program for a compensated profile
    pub fn emit(&self, profile: &WireProfile) -> GCodeProgram {
        self.emit_sequences(
            &profile.lengths,
            &profile.rotations,
            &profile.angles,
            &profile.motor_angles,
            profile.pin_position_mm,
        )
    }

    /// Generate a program from raw sequences in feed order
    ///
    /// A missing motor angle falls back to the desired angle.
    pub fn emit_sequences(
        &self,
        lengths: &[f64],
        rotations: &[f64],
        angles: &[f64],
        motor_angles: &[f64],
        pin_position_mm: f64,
    ) -> GCodeProgram {
        let mut program = GCodeProgram::default();
        program.push("%", "");
        program.push(
            format!("; For use with {:.1} mm pin only", pin_position_mm),
            "",
        );
        if pin_position_mm > self.macro_pin_threshold_mm {
            program.push("M98 P\"not12mm.g\"", "Pin setup for large pin positions");
        }

        let mut side = PinSide::Positive;
        let mut feed = 0.0;
        let mut twist = 0.0;

        for (i, &length) in lengths.iter().enumerate() {
            let rotation = rotations.get(i).copied().unwrap_or(0.0);
            let angle = angles.get(i).copied().unwrap_or(0.0);
            let motor = motor_angles.get(i).copied().unwrap_or(angle);

            let mut fed = false;
            if length.abs() > MIN_FEED_MM {
                feed += length;
                program.push(
                    format!("G1 X{:.2}", feed),
                    format!("Feed {:.2} mm", length),
                );
                fed = true;
            }

            if rotation.abs() > MIN_TWIST_DEG {
                twist += rotation;
                if fed {
                    if let Some(line) = program.last_mut() {
                        line.code.push_str(&format!(" Y{:.2}", twist));
                        line.comment
                            .push_str(&format!(" and twist {:.2} deg", rotation));
                    }
                } else {
                    program.push(
                        format!("G1 Y{:.2}", twist),
                        format!("Twist {:.2} deg", rotation),
                    );
                }
            }

            if angle.abs() > MIN_BEND_DEG {
                let needed = PinSide::for_angle(angle);
                if needed != side {
                    program.push("M106 P0 S1.0", format!("Duck pin for {} bend", needed));
                    program.push(self.park_move(needed), "");
                    program.push("M106 P0 S0", "");
                }
                program.push(
                    format!("G1 Z{:.2}", motor),
                    format!("Motor to {:.2} deg for a {:.2} deg bend", motor, angle),
                );
                program.push(self.park_move(needed), "Return pin");
                side = needed;
            }
        }

        program.push("%", "");
        program
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emitter() -> GCodeEmitter {
        GCodeEmitter::new(&MachineProfile::default())
    }

    #[test]
    fn test_header_and_macro() {
        let program = emitter().emit_sequences(&[10.0], &[0.0], &[0.0], &[0.0], 16.5);
        let text = program.to_text();
        assert!(text.starts_with("%\n; For use with 16.5 mm pin only\nM98 P\"not12mm.g\"\n"));
        assert!(text.ends_with("%\n"));

        let program = emitter().emit_sequences(&[10.0], &[0.0], &[0.0], &[0.0], 12.0);
        assert_eq!(program.count("M98 P\"not12mm.g\""), 0);
    }

    #[test]
    fn test_feed_and_twist_share_a_line() {
        let program = emitter().emit_sequences(&[10.0, 5.0], &[0.0, 45.0], &[0.0, 0.0], &[], 12.0);
        assert_eq!(program.count("G1 X10.00"), 1);
        assert_eq!(program.count("G1 X15.00 Y45.00"), 1);
    }

    #[test]
    fn test_twist_without_feed() {
        let program = emitter().emit_sequences(&[0.0], &[30.0], &[0.0], &[], 12.0);
        assert_eq!(program.count("G1 Y30.00"), 1);
    }

    #[test]
    fn test_same_sign_bends_do_not_duck() {
        let program = emitter().emit_sequences(
            &[10.0, 10.0],
            &[0.0, 0.0],
            &[30.0, 45.0],
            &[33.0, 49.0],
            12.0,
        );
        assert_eq!(program.count("M106 P0 S1.0"), 0);
        assert_eq!(program.count("G0 Z-30"), 2);
    }

    #[test]
    fn test_annotated_output() {
        let program = emitter().emit_sequences(&[10.0], &[0.0], &[0.0], &[], 12.0);
        let annotated = program.to_annotated(DEFAULT_COMMENT_COLUMN);
        assert!(annotated.contains("G1 X10.00           ; Feed 10.00 mm\n"));
    }
}
