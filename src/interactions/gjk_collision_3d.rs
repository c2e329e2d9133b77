use log::debug;
use crate::models::{minkowski_support, Simplex, SupportMap, TerminalSimplex};
use crate::utils::{
    cross_product, dot_product, negate_vector, perpendicular_vector, try_normalize_vector, vector_magnitude,
    vector_sub, GJK_EPSILON,
};

/// GJK (Gilbert-Johnson-Keerthi) algorithm for collision detection between convex shapes
///
/// Searches the Minkowski difference `shape_a - shape_b` for a tetrahedron enclosing the origin.
///
/// # Arguments
/// * `shape_a` - First shape
/// * `shape_b` - Second shape
/// * `initial_direction` - First search direction, typically `center_a - center_b`
/// * `max_iterations` - Support queries allowed before giving up
///
/// # Returns
/// `Some(TerminalSimplex)` if the shapes overlap, ready to hand to EPA.
/// `None` if they are separated, only touching, or the budget ran out.
pub fn gjk_intersection<A, B>(
    shape_a: &A,
    shape_b: &B,
    initial_direction: (f64, f64, f64),
    max_iterations: u32
) -> Option<TerminalSimplex>
where
    A: SupportMap + ?Sized,
    B: SupportMap + ?Sized,
{
    let direction = if vector_magnitude(initial_direction) < 1e-10 {
        (1.0, 0.0, 0.0)
    } else {
        initial_direction
    };

    let mut simplex = Simplex::new();
    let first = minkowski_support(shape_a, shape_b, direction);
    simplex.add(first);
    let mut direction = negate_vector(first.minkowski);

    for _ in 0..max_iterations {
        if vector_magnitude(direction) < 1e-12 {
            // The origin lies on the current simplex
            direction = fallback_direction(&simplex);
        }

        let point = minkowski_support(shape_a, shape_b, direction);
        if dot_product(point.minkowski, direction) <= 0.0 {
            // The new point did not pass the origin, so the origin is outside the difference
            return None;
        }

        simplex.add(point);
        if do_simplex(&mut simplex, &mut direction) {
            return simplex.to_terminal();
        }
    }

    debug!("GJK gave up after {} iterations with {} simplex points", max_iterations, simplex.size());
    None
}

/// Process simplex to determine if it contains the origin
fn do_simplex(simplex: &mut Simplex, direction: &mut (f64, f64, f64)) -> bool {
    match simplex.size() {
        2 => handle_line_case(simplex, direction),
        3 => handle_triangle_case(simplex, direction),
        4 => handle_tetrahedron_case(simplex, direction),
        _ => false,
    }
}

/// Triple product (a × b) × c
fn triple_product(a: (f64, f64, f64), b: (f64, f64, f64), c: (f64, f64, f64)) -> (f64, f64, f64) {
    cross_product(cross_product(a, b), c)
}

/// Search direction used when the origin lies exactly on the current simplex.
fn fallback_direction(simplex: &Simplex) -> (f64, f64, f64) {
    match simplex.size() {
        2 => perpendicular_vector(vector_sub(simplex.get_b().minkowski, simplex.get_a().minkowski)),
        3 => {
            let a = simplex.get_a().minkowski;
            let ab = vector_sub(simplex.get_b().minkowski, a);
            let ac = vector_sub(simplex.get_c().minkowski, a);
            match try_normalize_vector(cross_product(ab, ac)) {
                Some(normal) if dot_product(normal, a) < 0.0 => normal,
                Some(normal) => negate_vector(normal),
                None => perpendicular_vector(ab),
            }
        },
        _ => (1.0, 0.0, 0.0),
    }
}

/// Handle the line case for GJK algorithm
pub fn handle_line_case(simplex: &mut Simplex, direction: &mut (f64, f64, f64)) -> bool {
    let a = *simplex.get_a();
    let b = *simplex.get_b();

    let ab = vector_sub(b.minkowski, a.minkowski);
    let a0 = negate_vector(a.minkowski);

    if dot_product(ab, a0) > 0.0 {
        // Origin is beside the segment, search perpendicular to it
        *direction = triple_product(ab, a0, ab);
    } else {
        // Origin is behind A
        simplex.set_a(a);
        *direction = a0;
    }

    false
}

/// Handle the triangle case for GJK algorithm
pub fn handle_triangle_case(simplex: &mut Simplex, direction: &mut (f64, f64, f64)) -> bool {
    let a = *simplex.get_a();
    let b = *simplex.get_b();
    let c = *simplex.get_c();

    let ab = vector_sub(b.minkowski, a.minkowski);
    let ac = vector_sub(c.minkowski, a.minkowski);
    let a0 = negate_vector(a.minkowski);
    let abc = cross_product(ab, ac);

    if dot_product(cross_product(abc, ac), a0) > 0.0 {
        if dot_product(ac, a0) > 0.0 {
            // Voronoi region of AC
            simplex.set_ab(a, c);
            *direction = triple_product(ac, a0, ac);
            return false;
        }
        simplex.set_ab(a, b);
        return handle_line_case(simplex, direction);
    }

    if dot_product(cross_product(ab, abc), a0) > 0.0 {
        simplex.set_ab(a, b);
        return handle_line_case(simplex, direction);
    }

    if dot_product(abc, a0) > 0.0 {
        // Origin is above the triangle
        *direction = abc;
    } else {
        // Origin is below, flip the winding so the next point lands on the positive side
        simplex.set_abc(a, c, b);
        *direction = negate_vector(abc);
    }

    false
}

/// Handle the tetrahedron case for GJK algorithm
///
/// BCD is the previous triangle and the origin is known to be on A's side of it, so only the
/// three faces touching A are tested. An origin lying on one of those faces counts as enclosed.
pub fn handle_tetrahedron_case(simplex: &mut Simplex, direction: &mut (f64, f64, f64)) -> bool {
    let a = *simplex.get_a();
    let b = *simplex.get_b();
    let c = *simplex.get_c();
    let d = *simplex.get_d();

    let ab = vector_sub(b.minkowski, a.minkowski);
    let ac = vector_sub(c.minkowski, a.minkowski);
    let ad = vector_sub(d.minkowski, a.minkowski);
    let a0 = negate_vector(a.minkowski);

    let outside = |normal: (f64, f64, f64)| match try_normalize_vector(normal) {
        Some(unit) => dot_product(unit, a0) > GJK_EPSILON,
        None => false,
    };

    if outside(cross_product(ab, ac)) {
        simplex.set_abc(a, b, c);
        return handle_triangle_case(simplex, direction);
    }

    if outside(cross_product(ac, ad)) {
        simplex.set_abc(a, c, d);
        return handle_triangle_case(simplex, direction);
    }

    if outside(cross_product(ad, ab)) {
        simplex.set_abc(a, d, b);
        return handle_triangle_case(simplex, direction);
    }

    true
}
