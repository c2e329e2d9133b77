/// Vector utility: component-wise sum
#[inline]
pub fn vector_add(a: (f64, f64, f64), b: (f64, f64, f64)) -> (f64, f64, f64) {
    (a.0 + b.0, a.1 + b.1, a.2 + b.2)
}

/// Vector utility: component-wise difference `a - b`
#[inline]
pub fn vector_sub(a: (f64, f64, f64), b: (f64, f64, f64)) -> (f64, f64, f64) {
    (a.0 - b.0, a.1 - b.1, a.2 - b.2)
}

#[inline]
pub fn vector_scale(v: (f64, f64, f64), s: f64) -> (f64, f64, f64) {
    (v.0 * s, v.1 * s, v.2 * s)
}

/// returns the inverse of the vector
#[inline]
pub fn negate_vector(v: (f64, f64, f64)) -> (f64, f64, f64) {
    (-v.0, -v.1, -v.2)
}

/// Calculates the dot product of two 3D vectors.
///
/// # Example
/// ```
/// use rs_epa::utils::dot_product;
///
/// let v1 = (1.0, 2.0, 3.0);
/// let v2 = (4.0, 5.0, 6.0);
///
/// assert_eq!(dot_product(v1, v2), 32.0); // 1*4 + 2*5 + 3*6 = 32
/// ```
#[inline]
pub fn dot_product(a: (f64, f64, f64), b: (f64, f64, f64)) -> f64 {
    a.0 * b.0 + a.1 * b.1 + a.2 * b.2
}

/// Calculates the cross product of two 3D vectors.
///
/// # Example
/// ```
/// use rs_epa::utils::cross_product;
///
/// let v1 = (1.0, 0.0, 0.0);
/// let v2 = (0.0, 1.0, 0.0);
///
/// assert_eq!(cross_product(v1, v2), (0.0, 0.0, 1.0));
/// ```
#[inline]
pub fn cross_product(a: (f64, f64, f64), b: (f64, f64, f64)) -> (f64, f64, f64) {
    (
        a.1 * b.2 - a.2 * b.1,
        a.2 * b.0 - a.0 * b.2,
        a.0 * b.1 - a.1 * b.0
    )
}

/// Vector utility: magnitude calculation
#[inline]
pub fn vector_magnitude(v: (f64, f64, f64)) -> f64 {
    dot_product(v, v).sqrt()
}

/// Normalizes a 3D vector, returning `None` for vectors too short to carry a direction.
#[inline]
pub fn try_normalize_vector(v: (f64, f64, f64)) -> Option<(f64, f64, f64)> {
    let mag = vector_magnitude(v);
    if mag > 1e-12 && mag.is_finite() {
        Some((v.0 / mag, v.1 / mag, v.2 / mag))
    } else {
        None
    }
}

/// Vector utility: normalization
///
/// Falls back to the x axis if the vector is too small.
#[inline]
pub fn normalize_vector(v: (f64, f64, f64)) -> (f64, f64, f64) {
    try_normalize_vector(v).unwrap_or((1.0, 0.0, 0.0))
}

/// Returns a unit vector perpendicular to `v`.
pub fn perpendicular_vector(v: (f64, f64, f64)) -> (f64, f64, f64) {
    // Cross with the axis least aligned with v
    let axis = if v.0.abs() <= v.1.abs() && v.0.abs() <= v.2.abs() {
        (1.0, 0.0, 0.0)
    } else if v.1.abs() <= v.2.abs() {
        (0.0, 1.0, 0.0)
    } else {
        (0.0, 0.0, 1.0)
    };
    normalize_vector(cross_product(v, axis))
}

/// Barycentric coordinates `(u, v, w)` of the point of triangle `abc` closest to `p`.
///
/// Voronoi region test from Ericson, Real-Time Collision Detection 5.1.5. The weights always
/// lie in [0, 1] and sum to one; a `p` whose projection falls outside the triangle is clamped
/// to the nearest edge or vertex. Zero-area triangles use the nearest of their edges.
pub fn closest_point_barycentric(
    a: (f64, f64, f64),
    b: (f64, f64, f64),
    c: (f64, f64, f64),
    p: (f64, f64, f64)
) -> (f64, f64, f64) {
    let ab = vector_sub(b, a);
    let ac = vector_sub(c, a);

    let normal = cross_product(ab, ac);
    if dot_product(normal, normal) <= 1e-12 * dot_product(ab, ab) * dot_product(ac, ac) {
        return closest_point_on_edges(a, b, c, p);
    }

    let ap = vector_sub(p, a);
    let d1 = dot_product(ab, ap);
    let d2 = dot_product(ac, ap);
    if d1 <= 0.0 && d2 <= 0.0 {
        return (1.0, 0.0, 0.0);
    }

    let bp = vector_sub(p, b);
    let d3 = dot_product(ab, bp);
    let d4 = dot_product(ac, bp);
    if d3 >= 0.0 && d4 <= d3 {
        return (0.0, 1.0, 0.0);
    }

    let vc = d1 * d4 - d3 * d2;
    if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
        let v = clamped_ratio(d1, d1 - d3);
        return (1.0 - v, v, 0.0);
    }

    let cp = vector_sub(p, c);
    let d5 = dot_product(ab, cp);
    let d6 = dot_product(ac, cp);
    if d6 >= 0.0 && d5 <= d6 {
        return (0.0, 0.0, 1.0);
    }

    let vb = d5 * d2 - d1 * d6;
    if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
        let w = clamped_ratio(d2, d2 - d6);
        return (1.0 - w, 0.0, w);
    }

    let va = d3 * d6 - d5 * d4;
    if va <= 0.0 && d4 - d3 >= 0.0 && d5 - d6 >= 0.0 {
        let w = clamped_ratio(d4 - d3, (d4 - d3) + (d5 - d6));
        return (0.0, 1.0 - w, w);
    }

    let denom = va + vb + vc;
    if denom <= f64::MIN_POSITIVE {
        return closest_point_on_edges(a, b, c, p);
    }
    let v = (vb / denom).clamp(0.0, 1.0);
    let w = (vc / denom).clamp(0.0, 1.0 - v);
    (1.0 - v - w, v, w)
}

// Sliver triangles: the nearest of the three edge segments
fn closest_point_on_edges(
    a: (f64, f64, f64),
    b: (f64, f64, f64),
    c: (f64, f64, f64),
    p: (f64, f64, f64)
) -> (f64, f64, f64) {
    let on_segment = |from: (f64, f64, f64), to: (f64, f64, f64)| {
        let edge = vector_sub(to, from);
        let t = clamped_ratio(dot_product(vector_sub(p, from), edge), dot_product(edge, edge));
        let offset = vector_sub(p, vector_add(from, vector_scale(edge, t)));
        (t, dot_product(offset, offset))
    };

    let (t_ab, dist_ab) = on_segment(a, b);
    let (t_ac, dist_ac) = on_segment(a, c);
    let (t_bc, dist_bc) = on_segment(b, c);

    if dist_ab <= dist_ac && dist_ab <= dist_bc {
        (1.0 - t_ab, t_ab, 0.0)
    } else if dist_ac <= dist_bc {
        (1.0 - t_ac, 0.0, t_ac)
    } else {
        (0.0, 1.0 - t_bc, t_bc)
    }
}

// n / d limited to [0, 1], zero for an empty denominator
#[inline]
fn clamped_ratio(n: f64, d: f64) -> f64 {
    if d > 0.0 { (n / d).clamp(0.0, 1.0) } else { 0.0 }
}

/// Blends three points with barycentric weights.
#[inline]
pub fn barycentric_blend(
    weights: (f64, f64, f64),
    a: (f64, f64, f64),
    b: (f64, f64, f64),
    c: (f64, f64, f64)
) -> (f64, f64, f64) {
    (
        weights.0 * a.0 + weights.1 * b.0 + weights.2 * c.0,
        weights.0 * a.1 + weights.1 * b.1 + weights.2 * c.1,
        weights.0 * a.2 + weights.1 * b.2 + weights.2 * c.2
    )
}
