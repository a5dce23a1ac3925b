//! Warps from the unit square to surfaces.
//!
//! Every function takes a pair of uniform values in `[0, 1)` supplied by the
//! caller; nothing here owns a random generator.

use crate::consts::{FRAC_PI_2, FRAC_PI_4, PI};
use crate::{Real, Vec2, Vec3};

/// Low-distortion square to triangle map.
///
/// Returns barycentric weights `(w0, w1)` with `w0, w1 >= 0` and
/// `w0 + w1 <= 1`. From Heitz, "A Low-Distortion Map Between Triangle and
/// Square" (2019): the smaller coordinate is halved and the larger shifted,
/// instead of the classical square-root warp.
pub fn square_to_triangle(u: Vec2) -> Vec2 {
    let (mut x, mut y) = (u.x, u.y);
    if y > x {
        x *= 0.5;
        y -= x;
    } else {
        y *= 0.5;
        x -= y;
    }
    Vec2::new(x, y)
}

/// Shirley-Chiu concentric map onto the unit disk.
pub fn square_to_disk_concentric(u: Vec2) -> Vec2 {
    let r1 = 2.0 * u.x - 1.0;
    let r2 = 2.0 * u.y - 1.0;

    if r1 == 0.0 && r2 == 0.0 {
        return Vec2::ZERO;
    }

    let (r, phi) = if r1 * r1 > r2 * r2 {
        (r1, FRAC_PI_4 * (r2 / r1))
    } else {
        (r2, FRAC_PI_2 - FRAC_PI_4 * (r1 / r2))
    };

    let (sin_phi, cos_phi) = phi.sin_cos();
    Vec2::new(r * cos_phi, r * sin_phi)
}

/// Uniform point on the unit sphere: `z = 2 u.x - 1`, azimuth `2 pi u.y`.
pub fn square_to_sphere(u: Vec2) -> Vec3 {
    let z = 2.0 * u.x - 1.0;
    let r = (1.0 - z * z).max(0.0).sqrt();
    let phi = 2.0 * PI * u.y;
    let (sin_phi, cos_phi) = phi.sin_cos();
    Vec3::new(r * cos_phi, r * sin_phi, z)
}

/// Cosine weighted direction around +z.
pub fn square_to_cosine_hemisphere(u: Vec2) -> Vec3 {
    let p = square_to_disk_concentric(u);
    let z = (1.0 - p.x * p.x - p.y * p.y).max(0.0).sqrt();
    Vec3::new(p.x, p.y, z)
}

/// Density of [`square_to_cosine_hemisphere`] for a direction with the
/// given cosine to +z.
pub fn cosine_hemisphere_pdf(cos_theta: Real) -> Real {
    cos_theta.max(0.0) / PI
}
