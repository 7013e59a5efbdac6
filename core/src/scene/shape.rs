//! Shapes

use super::*;

/// Surface hit on a shape.
#[derive(Copy, Clone, Debug)]
pub struct ShapeHit {
    /// Parametric distance along the ray.
    pub t: Float,

    /// Hit point.
    pub point: Point3f,

    /// Outward facing geometric normal.
    pub normal: Vector3f,

    /// Surface tangent.
    pub tangent: Vector3f,
}

/// Analytic surfaces of the demo scenes.
#[derive(Copy, Clone, Debug)]
pub enum Shape {
    /// Sphere.
    Sphere {
        /// Centre.
        center: Point3f,

        /// Radius.
        radius: Float,
    },

    /// Parallelogram spanned by two edges from a corner. The normal is
    /// `edge_u × edge_v`.
    Rectangle {
        /// Corner.
        corner: Point3f,

        /// First edge.
        edge_u: Vector3f,

        /// Second edge.
        edge_v: Vector3f,
    },
}

impl Shape {
    /// Returns the nearest hit in front of the ray origin that is closer
    /// than `t_max`.
    ///
    /// * `ray`   - The ray.
    /// * `t_max` - Maximum parametric distance.
    pub fn intersect(&self, ray: &Ray, t_max: Float) -> Option<ShapeHit> {
        match *self {
            Self::Sphere { center, radius } => intersect_sphere(&center, radius, ray, t_max),
            Self::Rectangle { corner, edge_u, edge_v } => intersect_rectangle(&corner, &edge_u, &edge_v, ray, t_max),
        }
    }

    /// Returns the surface area.
    pub fn area(&self) -> Float {
        match self {
            Self::Sphere { radius, .. } => 4.0 * PI * radius * radius,
            Self::Rectangle { edge_u, edge_v, .. } => edge_u.cross(edge_v).length(),
        }
    }

    /// Samples a point uniformly by area and returns it with the outward
    /// normal.
    ///
    /// * `u` - The 2D uniform random values.
    pub fn sample_point(&self, u: &[Float; 2]) -> (Point3f, Vector3f) {
        match *self {
            Self::Sphere { center, radius } => {
                let n = uniform_sample_sphere(u);
                (center.offset(&n, radius), n)
            }
            Self::Rectangle { corner, edge_u, edge_v } => {
                let p = corner + edge_u * u[0] + edge_v * u[1];
                (p, edge_u.cross(&edge_v).normalize())
            }
        }
    }
}

/// Ray-sphere intersection with the numerically stable form of the
/// quadratic roots.
fn intersect_sphere(center: &Point3f, radius: Float, ray: &Ray, t_max: Float) -> Option<ShapeHit> {
    let oc = ray.origin - *center;
    let a = ray.direction.length_squared();
    let b = 2.0 * ray.direction.dot(&oc);
    let c = oc.length_squared() - radius * radius;

    let discrim = b * b - 4.0 * a * c;
    if discrim < 0.0 {
        return None;
    }
    let root = discrim.sqrt();
    let q = if b < 0.0 { -0.5 * (b - root) } else { -0.5 * (b + root) };
    let (mut t0, mut t1) = (q / a, c / q);
    if t0 > t1 {
        std::mem::swap(&mut t0, &mut t1);
    }

    let t = if t0 > RAY_EPSILON { t0 } else { t1 };
    if t <= RAY_EPSILON || t >= t_max || !t.is_finite() {
        return None;
    }

    let point = ray.at(t);
    let normal = (point - *center) / radius;
    let tangent = Vector3f::new(-normal.z, 0.0, normal.x);
    Some(ShapeHit {
        t,
        point,
        normal,
        tangent,
    })
}

/// Ray-parallelogram intersection.
fn intersect_rectangle(
    corner: &Point3f,
    edge_u: &Vector3f,
    edge_v: &Vector3f,
    ray: &Ray,
    t_max: Float,
) -> Option<ShapeHit> {
    let n = edge_u.cross(edge_v);
    let denom = n.dot(&ray.direction);
    if denom.abs() < 1e-12 {
        return None;
    }
    let t = n.dot(&(*corner - ray.origin)) / denom;
    if t <= RAY_EPSILON || t >= t_max {
        return None;
    }

    let point = ray.at(t);
    let d = point - *corner;
    let u = d.dot(edge_u) / edge_u.length_squared();
    let v = d.dot(edge_v) / edge_v.length_squared();
    if !(0.0..=1.0).contains(&u) || !(0.0..=1.0).contains(&v) {
        return None;
    }

    Some(ShapeHit {
        t,
        point,
        normal: n.normalize(),
        tangent: edge_u.normalize(),
    })
}
