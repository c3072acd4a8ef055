//! Minimum bend distance
//!
//! A bend needs enough straight wire ahead of the die for the bend pin to
//! reach it. The pin contact point `(x, y)` in the bend plane satisfies two
//! equations:
//!
//! ```text
//! |sinθ·(x - x0) + cosθ·(y - y0)| = pin_diameter / 2     (touches the wire)
//! sqrt(x² + y²)                   = pin_position         (on the pin orbit)
//! ```
//!
//! where `(x0, y0)` is the tangent point of the bent wire. The system is
//! solved with a damped Newton iteration. The shortest feed that still lets
//! the pin bend is the contact-to-tangent distance plus the arc consumed
//! around the die.
//!
//! [`MinBendDistanceSolver::filter`] walks a point sequence and drops
//! vertices that follow too closely, or extends the final segment when the
//! tail is too short.

use nalgebra::{Matrix2, Point2, Vector2};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use wirebend_core::{distance, turn_angle, BendParameters, GeometryError, MachineProfile, Point3};

/// Newton iteration settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NewtonConfig {
    /// Maximum number of Newton iterations.
    pub max_iterations: usize,
    /// Stop when the largest residual is below this.
    pub tolerance: f64,
    /// A root is accepted only when both residuals are below this.
    pub acceptance: f64,
    /// Maximum halvings per line search.
    pub line_search_max_iter: usize,
    /// Step scale per backtracking step (0-1).
    pub line_search_alpha: f64,
}

impl Default for NewtonConfig {
    fn default() -> Self {
        Self {
            max_iterations: 50,
            tolerance: 1e-10,
            acceptance: 1e-6,
            line_search_max_iter: 20,
            line_search_alpha: 0.5,
        }
    }
}

/// Wire tangent line in normal form
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TangentLine {
    /// Tangent point of the bent wire
    pub point: Point2<f64>,
    /// Unit normal `(sinθ, cosθ)`
    pub normal: Vector2<f64>,
}

impl TangentLine {
    pub fn signed_distance(&self, q: &Point2<f64>) -> f64 {
        self.normal.dot(&(q - self.point))
    }
}

/// Solved pin contact for one bend angle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinContact {
    /// Contact point of the pin center
    pub point: Point2<f64>,
    /// Tangent line the pin touches
    pub line: TangentLine,
    /// Largest absolute residual of the two equations at `point`
    pub residual: f64,
    /// Iterations used
    pub iterations: usize,
}

/// What [`MinBendDistanceSolver::filter`] changed
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FilterOutcome {
    /// Number of vertices removed
    pub deleted_vertices: usize,
    /// Distance the last point was moved outwards (mm), if any
    pub tail_extension_mm: Option<f64>,
}

/// Minimum-distance solver for one wire and pin setup
#[derive(Debug, Clone)]
pub struct MinBendDistanceSolver {
    machine: MachineProfile,
    wire_diameter_mm: f64,
    pin_position_mm: f64,
    config: NewtonConfig,
}

impl MinBendDistanceSolver {
    pub fn new(machine: MachineProfile, params: &BendParameters) -> Self {
        Self {
            machine,
            wire_diameter_mm: params.wire_diameter_mm,
            pin_position_mm: params.pin_mm(),
            config: NewtonConfig::default(),
        }
    }

    /// Half the wire consumed around the die by a bend of `angle_rad`
    fn half_arc(&self, angle_rad: f64) -> f64 {
        self.machine.half_arc_length(angle_rad, self.wire_diameter_mm)
    }

    /// Tangent line of the wire after a bend of `angle_rad`
    pub fn tangent_line(&self, angle_rad: f64) -> TangentLine {
        let theta = angle_rad.abs();
        let (s, c) = theta.sin_cos();
        let r = self.machine.die_radius_mm;
        let d = self.wire_diameter_mm;
        TangentLine {
            point: Point2::new(
                (r + d) * s + self.machine.tooling_offset_mm,
                (r + d) * c - (r + d / 2.0),
            ),
            normal: Vector2::new(s, c),
        }
    }

    fn residual(&self, q: &Point2<f64>, line: &TangentLine) -> Vector2<f64> {
        Vector2::new(
            line.signed_distance(q).abs() - self.machine.bend_pin_diameter_mm / 2.0,
            q.coords.norm() - self.pin_position_mm,
        )
    }

    fn jacobian(&self, q: &Point2<f64>, line: &TangentLine) -> Option<Matrix2<f64>> {
        let r = q.coords.norm();
        if r < f64::EPSILON {
            return None;
        }
        let side = if line.signed_distance(q) >= 0.0 { 1.0 } else { -1.0 };
        Some(Matrix2::new(
            side * line.normal.x,
            side * line.normal.y,
            q.x / r,
            q.y / r,
        ))
    }

    /// Starting points for the iteration, most likely first
    fn seeds(&self, theta: f64, line: &TangentLine) -> [Point2<f64>; 2] {
        let p = self.pin_position_mm;
        let phi = theta - (0.2762 + 0.81 * theta / std::f64::consts::PI);
        let orbit = Point2::new(p * phi.cos(), -p * phi.sin());

        let t = line.point.coords;
        let projected = if t.norm() > f64::EPSILON {
            Point2::from(t.normalize() * p)
        } else {
            Point2::new(p, 0.0)
        };
        [orbit, projected]
    }

    fn newton(&self, seed: Point2<f64>, line: &TangentLine) -> PinContact {
        let cfg = &self.config;
        let mut q = seed;
        let mut f = self.residual(&q, line);
        let mut iterations = 0;

        while iterations < cfg.max_iterations && f.amax() >= cfg.tolerance {
            iterations += 1;
            let Some(inverse) = self.jacobian(&q, line).and_then(|j| j.try_inverse()) else {
                break;
            };
            let step = -(inverse * f);

            // Backtracking line search on the residual norm
            let norm0 = f.norm();
            let mut alpha = 1.0;
            let mut accepted = None;
            for _ in 0..cfg.line_search_max_iter {
                let candidate = q + step * alpha;
                let fc = self.residual(&candidate, line);
                if fc.norm() < norm0 {
                    accepted = Some((candidate, fc));
                    break;
                }
                alpha *= cfg.line_search_alpha;
            }
            match accepted {
                Some((candidate, fc)) => {
                    q = candidate;
                    f = fc;
                }
                None => break,
            }
        }

        PinContact {
            point: q,
            line: *line,
            residual: f.amax(),
            iterations,
        }
    }

    /// Solve the pin contact for a bend of `angle_rad`
    pub fn solve_contact(&self, angle_rad: f64) -> Result<PinContact, GeometryError> {
        let theta = angle_rad.abs();
        let line = self.tangent_line(theta);

        let mut best: Option<PinContact> = None;
        for seed in self.seeds(theta, &line) {
            let contact = self.newton(seed, &line);
            if contact.residual < self.config.acceptance {
                return Ok(contact);
            }
            if best.is_none_or(|b| contact.residual < b.residual) {
                best = Some(contact);
            }
        }

        let residual = best.map_or(f64::INFINITY, |b| b.residual);
        Err(GeometryError::Unsolvable {
            angle_deg: theta.to_degrees(),
            residual,
        })
    }

    /// Shortest feed (mm) before a bend of `angle_rad` the tooling can make
    pub fn minimum_distance(&self, angle_rad: f64) -> Result<f64, GeometryError> {
        let contact = self.solve_contact(angle_rad)?;
        let arc = self
            .machine
            .arc_length(angle_rad, self.wire_diameter_mm);
        Ok((contact.point - contact.line.point).norm() + arc)
    }

    /// Remove unreachable vertices in place
    ///
    /// Walks vertices `1..n-1`. For an interior vertex `i` the corrected
    /// length of segment `i → i+1` is checked against the minimum for the
    /// bend at `i+1`; a short segment deletes vertex `i+1` and the same `i` is
    /// checked again. The terminal segment is checked against the bend at
    /// `i`; a short tail moves the last point outward by the deficiency.
    pub fn filter(&self, points: &mut Vec<Point3>) -> Result<FilterOutcome, GeometryError> {
        let mut outcome = FilterOutcome::default();
        let die = self.machine.die_radius_mm;

        let mut i = 1;
        while i + 1 < points.len() {
            let n = points.len();
            let d = distance(&points[i], &points[i + 1]);
            let angle1 = turn_angle(&points[i - 1], &points[i], &points[i + 1]);

            if i + 2 < n {
                let angle2 = turn_angle(&points[i], &points[i + 1], &points[i + 2]);
                let corrected = d - self.half_arc(angle2) + self.half_arc(angle1);
                let minimum = self.minimum_distance(angle2)?;
                if corrected < minimum {
                    debug!(
                        "Deleting vertex {}: {:.3} mm < {:.3} mm for {:.2} deg",
                        i + 1,
                        corrected,
                        minimum,
                        angle2.to_degrees()
                    );
                    points.remove(i + 1);
                    outcome.deleted_vertices += 1;
                } else {
                    i += 1;
                }
            } else {
                let corrected = d + self.half_arc(angle1) - die;
                let minimum = self.minimum_distance(angle1)?;
                if corrected < minimum {
                    let deficiency = minimum - corrected;
                    let direction = (points[i + 1] - points[i]).normalize();
                    points[i + 1] += direction * deficiency;
                    warn!(
                        "Final segment too short for a {:.2} deg bend, extended by {:.3} mm",
                        angle1.to_degrees(),
                        deficiency
                    );
                    outcome.tail_extension_mm = Some(deficiency);
                }
                i += 1;
            }
        }

        Ok(outcome)
    }
}
