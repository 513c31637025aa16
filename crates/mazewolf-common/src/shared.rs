// shared.rs — math library and definitions shared by all modules

pub type Vec3 = [f32; 3];

pub const VEC3_ORIGIN: Vec3 = [0.0, 0.0, 0.0];

/// World up axis. The world is Y-up: X/Z span the cell grid, Y is height.
pub const WORLD_UP: Vec3 = [0.0, 1.0, 0.0];

// angle indexes
pub const PITCH: usize = 0; // up / down
pub const YAW: usize = 1; // left / right
pub const ROLL: usize = 2; // fall over

/// Pitch is clamped short of straight up/down so the view basis never
/// degenerates (forward parallel to WORLD_UP).
pub const PITCH_CLAMP: f32 = 89.0;

// ============================================================
// Cvar flags
// ============================================================

pub const CVAR_ARCHIVE: i32 = 1; // saved to config
pub const CVAR_NOSET: i32 = 2; // can only be changed with force_set

// ============================================================
// Error levels for com_error
// ============================================================

pub const ERR_FATAL: i32 = 0; // exit the entire program with a popup window
pub const ERR_DROP: i32 = 1; // print to console and recover
pub const ERR_QUIT: i32 = 2; // clean exit

// ============================================================
// Movement buttons — the held-key snapshot crossing the input boundary
// ============================================================

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct MoveButtons: u8 {
        const FORWARD   = 0x01;
        const BACK      = 0x02;
        const MOVELEFT  = 0x04;
        const MOVERIGHT = 0x08;
    }
}

// ============================================================
// MATHLIB — Vector operations
// ============================================================

#[inline]
pub fn dot_product(a: &Vec3, b: &Vec3) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[inline]
pub fn vector_add(a: &Vec3, b: &Vec3) -> Vec3 {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

#[inline]
pub fn vector_subtract(a: &Vec3, b: &Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

#[inline]
pub fn vector_scale(v: &Vec3, scale: f32) -> Vec3 {
    [v[0] * scale, v[1] * scale, v[2] * scale]
}

/// veca + scale * vecb
#[inline]
pub fn vector_ma(veca: &Vec3, scale: f32, vecb: &Vec3) -> Vec3 {
    [
        veca[0] + scale * vecb[0],
        veca[1] + scale * vecb[1],
        veca[2] + scale * vecb[2],
    ]
}

pub fn vector_length(v: &Vec3) -> f32 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

/// Normalize in place, returns original length.
pub fn vector_normalize(v: &mut Vec3) -> f32 {
    let length = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if length != 0.0 {
        let ilength = 1.0 / length;
        v[0] *= ilength;
        v[1] *= ilength;
        v[2] *= ilength;
    }
    length
}

pub fn cross_product(v1: &Vec3, v2: &Vec3) -> Vec3 {
    [
        v1[1] * v2[2] - v1[2] * v2[1],
        v1[2] * v2[0] - v1[0] * v2[2],
        v1[0] * v2[1] - v1[1] * v2[0],
    ]
}

pub fn vector_compare(v1: &Vec3, v2: &Vec3) -> bool {
    v1[0] == v2[0] && v1[1] == v2[1] && v1[2] == v2[2]
}

// ============================================================
// Angle functions
// ============================================================

/// Derive the view basis from Euler angles (degrees, `[pitch, yaw, roll]`;
/// roll is ignored). The result is a right-handed orthonormal basis:
/// `right = normalize(forward x WORLD_UP)`, `up = normalize(right x forward)`.
pub fn angle_vectors(
    angles: &Vec3,
    forward: Option<&mut Vec3>,
    right: Option<&mut Vec3>,
    up: Option<&mut Vec3>,
) {
    let angle_yaw = angles[YAW].to_radians();
    let sy = angle_yaw.sin();
    let cy = angle_yaw.cos();

    let angle_pitch = angles[PITCH].to_radians();
    let sp = angle_pitch.sin();
    let cp = angle_pitch.cos();

    let mut fwd: Vec3 = [cp * cy, sp, cp * sy];
    vector_normalize(&mut fwd);

    let mut rgt = cross_product(&fwd, &WORLD_UP);
    vector_normalize(&mut rgt);

    if let Some(f) = forward {
        *f = fwd;
    }
    if let Some(r) = right {
        *r = rgt;
    }
    if let Some(u) = up {
        let mut upv = cross_product(&rgt, &fwd);
        vector_normalize(&mut upv);
        *u = upv;
    }
}

/// Convenience version of angle_vectors that returns a tuple (forward, right, up).
pub fn angle_vectors_tuple(angles: &Vec3) -> (Vec3, Vec3, Vec3) {
    let mut forward = [0.0f32; 3];
    let mut right = [0.0f32; 3];
    let mut up = [0.0f32; 3];
    angle_vectors(angles, Some(&mut forward), Some(&mut right), Some(&mut up));
    (forward, right, up)
}

// ============================================================
// Tests
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_and_cross() {
        let x: Vec3 = [1.0, 0.0, 0.0];
        let y: Vec3 = [0.0, 1.0, 0.0];
        assert_eq!(dot_product(&x, &y), 0.0);
        let z = cross_product(&x, &y);
        assert!(vector_compare(&z, &[0.0, 0.0, 1.0]));
    }

    #[test]
    fn test_vector_ma() {
        let a: Vec3 = [1.0, 2.0, 3.0];
        let b: Vec3 = [1.0, 0.0, -1.0];
        let r = vector_ma(&a, 2.0, &b);
        assert!(vector_compare(&r, &[3.0, 2.0, 1.0]));
    }

    #[test]
    fn test_normalize_zero_vector() {
        let mut v: Vec3 = VEC3_ORIGIN;
        let len = vector_normalize(&mut v);
        assert_eq!(len, 0.0);
        assert!(vector_compare(&v, &VEC3_ORIGIN));
    }

    #[test]
    fn test_angle_vectors_level() {
        // yaw 0, pitch 0 looks down +X
        let (forward, right, up) = angle_vectors_tuple(&[0.0, 0.0, 0.0]);
        assert!((forward[0] - 1.0).abs() < 1e-6);
        assert!(forward[1].abs() < 1e-6);
        assert!(forward[2].abs() < 1e-6);
        // right-handed: facing +X under Y-up puts right on +Z
        assert!(right[0].abs() < 1e-6);
        assert!((right[2] - 1.0).abs() < 1e-6);
        assert!((up[1] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_angle_vectors_yaw_90() {
        // yaw 90 swings forward onto +Z
        let (forward, _, _) = angle_vectors_tuple(&[0.0, 90.0, 0.0]);
        assert!(forward[0].abs() < 1e-6);
        assert!((forward[2] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_angle_vectors_orthonormal() {
        let (forward, right, up) = angle_vectors_tuple(&[35.0, -120.0, 0.0]);
        assert!((vector_length(&forward) - 1.0).abs() < 1e-5);
        assert!((vector_length(&right) - 1.0).abs() < 1e-5);
        assert!((vector_length(&up) - 1.0).abs() < 1e-5);
        assert!(dot_product(&forward, &right).abs() < 1e-5);
        assert!(dot_product(&forward, &up).abs() < 1e-5);
        assert!(dot_product(&right, &up).abs() < 1e-5);
    }

    #[test]
    fn test_angle_vectors_pitch_sign() {
        // positive pitch looks up
        let (forward, _, _) = angle_vectors_tuple(&[45.0, 0.0, 0.0]);
        assert!(forward[1] > 0.0);
        let (forward, _, _) = angle_vectors_tuple(&[-45.0, 0.0, 0.0]);
        assert!(forward[1] < 0.0);
    }

    #[test]
    fn test_move_buttons_flags() {
        let mut b = MoveButtons::default();
        assert!(b.is_empty());
        b |= MoveButtons::FORWARD | MoveButtons::MOVELEFT;
        assert!(b.contains(MoveButtons::FORWARD));
        assert!(!b.contains(MoveButtons::BACK));
        b &= !MoveButtons::FORWARD;
        assert_eq!(b, MoveButtons::MOVELEFT);
    }
}
