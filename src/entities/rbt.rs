//! Rigid-body transforms and Catmull-Rom evaluation.
//!
//! An `Rbt` is one node's pose: translation + rotation, no scale.
//! Spline evaluation takes four control transforms and blends between
//! the middle two; the outer two only shape the tangents.
//!
//! Rotation hull points are built with conditional negation so the
//! spline always takes the shorter arc between neighboring keys.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Rigid-body transform: translation + rotation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rbt {
    pub t: Vec3,
    pub r: Quat,
}

impl Rbt {
    pub const IDENTITY: Rbt = Rbt {
        t: Vec3::ZERO,
        r: Quat::IDENTITY,
    };

    pub fn new(t: Vec3, r: Quat) -> Self {
        Self { t, r }
    }

    pub fn from_translation(t: Vec3) -> Self {
        Self {
            t,
            r: Quat::IDENTITY,
        }
    }

    pub fn from_rotation(r: Quat) -> Self {
        Self { t: Vec3::ZERO, r }
    }

    /// Catmull-Rom blend between `first` and `second`.
    ///
    /// `prev` and `after` are the neighboring keys shaping the tangents.
    /// `alpha` = 0 yields `first`, 1 yields `second`.
    pub fn spline(prev: &Rbt, first: &Rbt, second: &Rbt, after: &Rbt, alpha: f32) -> Rbt {
        Rbt {
            t: spline_vec3(prev.t, first.t, second.t, after.t, alpha),
            r: spline_quat(prev.r, first.r, second.r, after.r, alpha).normalize(),
        }
    }
}

impl Default for Rbt {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Conditional negation: flip to the hemisphere with non-negative w.
///
/// q and -q encode the same rotation; picking w >= 0 before taking
/// roots keeps the hull on the shorter arc.
#[inline]
fn cn(q: Quat) -> Quat {
    if q.w < 0.0 { -q } else { q }
}

/// Quaternion power via axis-angle scaling. Handles negative exponents.
#[inline]
fn quat_pow(q: Quat, exp: f32) -> Quat {
    let q = cn(q.normalize());
    let (axis, angle) = q.to_axis_angle();
    if angle.abs() < 1e-6 {
        Quat::IDENTITY
    } else {
        Quat::from_axis_angle(axis, angle * exp)
    }
}

/// Catmull-Rom on Vec3: build the cubic Bezier hull (d, e) from the
/// neighbors, then evaluate with de Casteljau lerps.
fn spline_vec3(prev: Vec3, first: Vec3, second: Vec3, after: Vec3, alpha: f32) -> Vec3 {
    let d = first + (second - prev) / 6.0;
    let e = second - (after - first) / 6.0;

    let p01 = first.lerp(d, alpha);
    let p12 = d.lerp(e, alpha);
    let p23 = e.lerp(second, alpha);
    let p012 = p01.lerp(p12, alpha);
    let p123 = p12.lerp(p23, alpha);
    p012.lerp(p123, alpha)
}

/// Catmull-Rom on Quat: same hull construction in the group sense,
/// sixth roots of the neighbor-to-neighbor rotations, then slerp-based
/// de Casteljau.
fn spline_quat(prev: Quat, first: Quat, second: Quat, after: Quat, alpha: f32) -> Quat {
    let d = quat_pow(second * prev.inverse(), 1.0 / 6.0) * first;
    let e = quat_pow(after * first.inverse(), -1.0 / 6.0) * second;

    let p01 = first.slerp(d, alpha);
    let p12 = d.slerp(e, alpha);
    let p23 = e.slerp(second, alpha);
    let p012 = p01.slerp(p12, alpha);
    let p123 = p12.slerp(p23, alpha);
    p012.slerp(p123, alpha)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn assert_vec3_near(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-4, "{a:?} != {b:?}");
    }

    fn assert_quat_near(a: Quat, b: Quat) {
        // q and -q are the same rotation
        let dot = a.dot(b).abs();
        assert!(dot > 1.0 - 1e-4, "{a:?} != {b:?} (|dot|={dot})");
    }

    #[test]
    fn test_spline_endpoints() {
        let k = [
            Rbt::from_translation(Vec3::new(-1.0, 0.0, 0.0)),
            Rbt::new(Vec3::ZERO, Quat::from_rotation_y(0.3)),
            Rbt::new(Vec3::X, Quat::from_rotation_y(1.1)),
            Rbt::from_translation(Vec3::new(2.0, 1.0, 0.0)),
        ];

        let at0 = Rbt::spline(&k[0], &k[1], &k[2], &k[3], 0.0);
        assert_vec3_near(at0.t, k[1].t);
        assert_quat_near(at0.r, k[1].r);

        let at1 = Rbt::spline(&k[0], &k[1], &k[2], &k[3], 1.0);
        assert_vec3_near(at1.t, k[2].t);
        assert_quat_near(at1.r, k[2].r);
    }

    #[test]
    fn test_spline_straight_line_midpoint() {
        // Collinear, evenly spaced keys: the spline degenerates to the
        // straight segment between the middle two.
        let p = |x: f32| Rbt::from_translation(Vec3::new(x, 0.0, 0.0));
        let mid = Rbt::spline(&p(0.0), &p(1.0), &p(2.0), &p(3.0), 0.5);
        assert_vec3_near(mid.t, Vec3::new(1.5, 0.0, 0.0));
    }

    #[test]
    fn test_spline_uniform_rotation_midpoint() {
        // Evenly spaced Y rotations: midpoint is halfway between keys.
        let r = |a: f32| Rbt::from_rotation(Quat::from_rotation_y(a));
        let step = FRAC_PI_2 / 3.0;
        let mid = Rbt::spline(&r(0.0), &r(step), &r(2.0 * step), &r(3.0 * step), 0.5);
        assert_quat_near(mid.r, Quat::from_rotation_y(1.5 * step));
    }

    #[test]
    fn test_quat_pow_identity_safe() {
        assert_quat_near(quat_pow(Quat::IDENTITY, 1.0 / 6.0), Quat::IDENTITY);
    }

    #[test]
    fn test_cn_picks_positive_hemisphere() {
        let q = Quat::from_rotation_z(0.7);
        assert!(cn(-q).w >= 0.0);
        assert_quat_near(cn(-q), q);
    }
}
