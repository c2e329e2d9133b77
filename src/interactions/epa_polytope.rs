use crate::models::{SupportPoint, TerminalSimplex};
use crate::errors::CollisionError;
use crate::utils::{
    cross_product, dot_product, negate_vector, normalize_vector, try_normalize_vector, vector_magnitude,
    vector_sub, EPA_MAX_CAPACITY, EPA_MIN_CAPACITY, EPA_VISIBILITY_EPSILON,
};

/// Marks an edge reference that has not been linked yet.
pub const INVALID_INDEX: u16 = u16::MAX;

const MASK_WORDS: usize = EPA_MAX_CAPACITY / 32;

/// A face of the EPA polytope.
///
/// `a`, `b`, `c` are wound counter-clockwise seen from outside. `edge_opposite_a` is the edge
/// `b -> c` (or `c -> b`), and so on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpaTriangle {
    pub a: u16,
    pub b: u16,
    pub c: u16,

    pub edge_opposite_a: u16,
    pub edge_opposite_b: u16,
    pub edge_opposite_c: u16,

    pub normal: (f64, f64, f64),
    pub distance_to_origin: f64,
}

impl Default for EpaTriangle {
    fn default() -> Self {
        Self {
            a: INVALID_INDEX,
            b: INVALID_INDEX,
            c: INVALID_INDEX,
            edge_opposite_a: INVALID_INDEX,
            edge_opposite_b: INVALID_INDEX,
            edge_opposite_c: INVALID_INDEX,
            normal: (0.0, 0.0, 0.0),
            distance_to_origin: 0.0,
        }
    }
}

impl EpaTriangle {
    pub fn vertices(&self) -> [u16; 3] {
        [self.a, self.b, self.c]
    }

    /// The three edges in winding order: `a -> b`, `b -> c`, `c -> a`.
    pub fn edges_in_winding_order(&self) -> [(u16, u16, u16); 3] {
        [
            (self.a, self.b, self.edge_opposite_c),
            (self.b, self.c, self.edge_opposite_a),
            (self.c, self.a, self.edge_opposite_b),
        ]
    }
}

/// Edge from `a` to `b`. Seen from outside, `triangle_a` is on the left (its winding
/// contains `a -> b`) and `triangle_b` is on the right (its winding contains `b -> a`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpaEdge {
    pub a: u16,
    pub b: u16,
    pub triangle_a: u16,
    pub triangle_b: u16,
}

impl Default for EpaEdge {
    fn default() -> Self {
        Self { a: INVALID_INDEX, b: INVALID_INDEX, triangle_a: INVALID_INDEX, triangle_b: INVALID_INDEX }
    }
}

impl EpaEdge {
    /// The triangle across this edge from `triangle`.
    pub fn other_triangle(&self, triangle: u16) -> u16 {
        if self.triangle_a == triangle { self.triangle_b } else { self.triangle_a }
    }
}

/// Plane of a face: outward unit normal and distance from the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpaTriangleInfo {
    pub normal: (f64, f64, f64),
    pub distance_to_origin: f64,
}

/// Silhouette edge `from -> to` in the winding of the retired face it was found on.
#[derive(Debug, Clone, Copy, Default)]
struct SilhouetteEdge {
    from: u16,
    to: u16,
    edge: u16,
    new_triangle: u16,
}

/// Fixed-capacity polytope for one EPA run.
///
/// Triangles are never removed; replaced faces are only flagged inactive so every index stays
/// valid until the polytope is dropped. Nothing here allocates.
#[derive(Debug, Clone)]
pub struct EpaPolytope {
    points: [SupportPoint; EPA_MAX_CAPACITY],
    triangles: [EpaTriangle; EPA_MAX_CAPACITY],
    edges: [EpaEdge; EPA_MAX_CAPACITY],

    active_triangles_mask: [u32; MASK_WORDS],
    num_points: u16,
    num_triangles: u16,
    num_edges: u16,
    capacity: u16,

    // Scratch space for the expansion step
    visible: [u16; EPA_MAX_CAPACITY],
    num_visible: usize,
    silhouette: [SilhouetteEdge; EPA_MAX_CAPACITY],
}

impl Default for EpaPolytope {
    fn default() -> Self {
        Self::new(EPA_MAX_CAPACITY)
    }
}

impl EpaPolytope {
    /// Creates an empty polytope. `capacity` is clamped to `EPA_MIN_CAPACITY..=EPA_MAX_CAPACITY`.
    pub fn new(capacity: usize) -> Self {
        Self {
            points: [SupportPoint::default(); EPA_MAX_CAPACITY],
            triangles: [EpaTriangle::default(); EPA_MAX_CAPACITY],
            edges: [EpaEdge::default(); EPA_MAX_CAPACITY],
            active_triangles_mask: [0; MASK_WORDS],
            num_points: 0,
            num_triangles: 0,
            num_edges: 0,
            capacity: capacity.clamp(EPA_MIN_CAPACITY, EPA_MAX_CAPACITY) as u16,
            visible: [0; EPA_MAX_CAPACITY],
            num_visible: 0,
            silhouette: [SilhouetteEdge::default(); EPA_MAX_CAPACITY],
        }
    }

    /// Seeds a polytope with the 4 points, 4 faces and 6 edges of a GJK tetrahedron.
    ///
    /// The adjacency below is fixed by the tetrahedron's topology. It assumes `d` lies behind
    /// face `(a, c, b)`; if the simplex is wound the other way, `b` and `c` are swapped first.
    pub fn from_tetrahedron(simplex: &TerminalSimplex, capacity: usize) -> Self {
        let [a, mut b, mut c, d] = simplex.points;

        let orientation = dot_product(
            cross_product(vector_sub(b.minkowski, a.minkowski), vector_sub(c.minkowski, a.minkowski)),
            vector_sub(d.minkowski, a.minkowski),
        );
        if orientation < 0.0 {
            std::mem::swap(&mut b, &mut c);
        }

        let mut polytope = Self::new(capacity);
        polytope.num_points = 4;
        polytope.points[..4].copy_from_slice(&[a, b, c, d]);

        polytope.seed_triangle(0, 1, 3, 4, 3, 0);
        polytope.seed_triangle(1, 2, 3, 5, 4, 1);
        polytope.seed_triangle(2, 0, 3, 3, 5, 2);
        polytope.seed_triangle(0, 2, 1, 1, 0, 2);

        polytope.seed_edge(0, 1, 0, 3);
        polytope.seed_edge(1, 2, 1, 3);
        polytope.seed_edge(2, 0, 2, 3);
        polytope.seed_edge(0, 3, 2, 0);
        polytope.seed_edge(1, 3, 0, 1);
        polytope.seed_edge(2, 3, 1, 2);

        polytope
    }

    // Capacity is at least EPA_MIN_CAPACITY, so the seed always fits
    fn seed_triangle(&mut self, a: u16, b: u16, c: u16, ea: u16, eb: u16, ec: u16) {
        let info = Self::triangle_info(
            &self.points[a as usize],
            &self.points[b as usize],
            &self.points[c as usize],
        );
        let index = self.num_triangles;
        self.triangles[index as usize] = EpaTriangle {
            a, b, c,
            edge_opposite_a: ea,
            edge_opposite_b: eb,
            edge_opposite_c: ec,
            normal: info.normal,
            distance_to_origin: info.distance_to_origin,
        };
        self.num_triangles += 1;
        self.set_triangle_active(index as usize);
    }

    fn seed_edge(&mut self, a: u16, b: u16, triangle_a: u16, triangle_b: u16) {
        self.edges[self.num_edges as usize] = EpaEdge { a, b, triangle_a, triangle_b };
        self.num_edges += 1;
    }

    pub fn capacity(&self) -> usize {
        self.capacity as usize
    }

    pub fn num_points(&self) -> usize {
        self.num_points as usize
    }

    pub fn num_triangles(&self) -> usize {
        self.num_triangles as usize
    }

    pub fn num_edges(&self) -> usize {
        self.num_edges as usize
    }

    pub fn point(&self, index: u16) -> &SupportPoint {
        &self.points[..self.num_points()][index as usize]
    }

    pub fn triangle(&self, index: u16) -> &EpaTriangle {
        &self.triangles[..self.num_triangles()][index as usize]
    }

    pub fn edge(&self, index: u16) -> &EpaEdge {
        &self.edges[..self.num_edges()][index as usize]
    }

    #[inline]
    pub fn is_triangle_active(&self, index: usize) -> bool {
        self.active_triangles_mask[index / 32] & (1 << (index % 32)) != 0
    }

    #[inline]
    pub fn set_triangle_active(&mut self, index: usize) {
        self.active_triangles_mask[index / 32] |= 1 << (index % 32);
    }

    #[inline]
    pub fn set_triangle_inactive(&mut self, index: usize) {
        self.active_triangles_mask[index / 32] &= !(1 << (index % 32));
    }

    pub fn num_active_triangles(&self) -> usize {
        self.active_triangles_mask.iter().map(|word| word.count_ones() as usize).sum()
    }

    /// Indices of the faces currently on the polytope boundary.
    pub fn active_triangles(&self) -> impl Iterator<Item = u16> + '_ {
        (0..self.num_triangles).filter(move |&i| self.is_triangle_active(i as usize))
    }

    pub fn push_point(&mut self, point: SupportPoint) -> Option<u16> {
        if self.num_points >= self.capacity {
            return None;
        }
        let index = self.num_points;
        self.points[index as usize] = point;
        self.num_points += 1;
        Some(index)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn push_triangle(
        &mut self,
        a: u16,
        b: u16,
        c: u16,
        edge_opposite_a: u16,
        edge_opposite_b: u16,
        edge_opposite_c: u16,
        info: EpaTriangleInfo,
    ) -> Option<u16> {
        if self.num_triangles >= self.capacity {
            return None;
        }
        let index = self.num_triangles;
        self.triangles[index as usize] = EpaTriangle {
            a, b, c,
            edge_opposite_a,
            edge_opposite_b,
            edge_opposite_c,
            normal: info.normal,
            distance_to_origin: info.distance_to_origin,
        };
        self.num_triangles += 1;
        self.set_triangle_active(index as usize);
        Some(index)
    }

    pub fn push_edge(&mut self, a: u16, b: u16, triangle_a: u16, triangle_b: u16) -> Option<u16> {
        if self.num_edges >= self.capacity {
            return None;
        }
        let index = self.num_edges;
        self.edges[index as usize] = EpaEdge { a, b, triangle_a, triangle_b };
        self.num_edges += 1;
        Some(index)
    }

    /// Outward normal and origin distance of the plane through `a`, `b`, `c`.
    ///
    /// The normal follows the winding and is flipped only when it clearly points toward the
    /// origin; faces whose plane passes through the origin keep their winding normal so noise
    /// cannot turn them inside out. The distance is clamped to be non-negative.
    pub fn triangle_info(a: &SupportPoint, b: &SupportPoint, c: &SupportPoint) -> EpaTriangleInfo {
        let ab = vector_sub(b.minkowski, a.minkowski);
        let ac = vector_sub(c.minkowski, a.minkowski);

        let mut normal = match try_normalize_vector(cross_product(ab, ac)) {
            Some(normal) => normal,
            // Zero-area face, the best guess is the direction of the face from the origin
            None => normalize_vector(a.minkowski),
        };

        let mut distance = dot_product(normal, a.minkowski);
        if distance < -EPA_VISIBILITY_EPSILON * vector_magnitude(a.minkowski).max(1.0) {
            normal = negate_vector(normal);
            distance = -distance;
        }

        EpaTriangleInfo {
            normal,
            distance_to_origin: distance.max(0.0),
        }
    }

    /// Active face with the smallest distance to the origin, a lower bound on the penetration
    /// depth. Returns `None` only if no face is active.
    pub fn find_triangle_closest_to_origin(&self) -> Option<u16> {
        let mut closest = None;
        let mut min_distance = f64::INFINITY;

        for (word_index, &word) in self.active_triangles_mask.iter().enumerate() {
            let mut bits = word;
            while bits != 0 {
                let index = word_index * 32 + bits.trailing_zeros() as usize;
                bits &= bits - 1;

                let distance = self.triangles[index].distance_to_origin;
                if distance < min_distance {
                    min_distance = distance;
                    closest = Some(index as u16);
                }
            }
        }

        closest
    }

    fn is_visible_from(&self, triangle: u16, point: (f64, f64, f64)) -> bool {
        let triangle = &self.triangles[triangle as usize];
        dot_product(triangle.normal, point) - triangle.distance_to_origin > EPA_VISIBILITY_EPSILON
    }

    /// Adds `new_point` to the hull.
    ///
    /// Starting at `visible_triangle` (a face the point lies beyond), every face the point can
    /// see is retired. Each silhouette edge between a retired and a surviving face is then
    /// connected to the new point with a fresh triangle.
    ///
    /// Returns `false` if any array would overflow. In that case the polytope is left exactly as
    /// it was before the call.
    pub fn add_new_point_and_update(&mut self, new_point: SupportPoint, visible_triangle: u16) -> bool {
        debug_assert!(self.is_triangle_active(visible_triangle as usize));

        let Some(new_index) = self.push_point(new_point) else {
            return false;
        };

        let Some(num_silhouette) = self.retire_visible_triangles(new_point.minkowski, visible_triangle) else {
            self.rollback(new_index);
            return false;
        };

        // Check every slot the stitching needs up front so a failure never leaves a half-built hull
        let num_spokes = self.count_silhouette_vertices(num_silhouette);
        if self.num_triangles() + num_silhouette > self.capacity()
            || self.num_edges() + num_spokes > self.capacity()
        {
            self.rollback(new_index);
            return false;
        }

        self.stitch_silhouette(new_index, num_silhouette).is_some()
    }

    /// Flood-fills the faces visible from `point`, deactivating them, and records the
    /// silhouette. Returns the number of silhouette edges, or `None` if the scratch space ran out.
    ///
    /// The retired faces stay listed in `visible[..num_visible]`, which doubles as the work
    /// queue, so a failed expansion can bring them back.
    fn retire_visible_triangles(&mut self, point: (f64, f64, f64), start: u16) -> Option<usize> {
        self.visible[0] = start;
        self.num_visible = 1;
        self.set_triangle_inactive(start as usize);

        let mut num_silhouette = 0;
        let mut cursor = 0;

        while cursor < self.num_visible {
            let current = self.visible[cursor];
            cursor += 1;

            for (from, to, edge_index) in self.triangles[current as usize].edges_in_winding_order() {
                let neighbor = self.edges[edge_index as usize].other_triangle(current);
                if !self.is_triangle_active(neighbor as usize) {
                    // Retired already, the edge is interior to the visible region
                    continue;
                }

                if self.is_visible_from(neighbor, point) {
                    self.set_triangle_inactive(neighbor as usize);
                    self.visible[self.num_visible] = neighbor;
                    self.num_visible += 1;
                } else {
                    if num_silhouette == self.silhouette.len() {
                        return None;
                    }
                    self.silhouette[num_silhouette] = SilhouetteEdge {
                        from,
                        to,
                        edge: edge_index,
                        new_triangle: INVALID_INDEX,
                    };
                    num_silhouette += 1;
                }
            }
        }

        Some(num_silhouette)
    }

    /// Undoes a partial expansion: revives the retired faces and drops the new point.
    fn rollback(&mut self, new_point: u16) {
        for i in 0..self.num_visible {
            let triangle = self.visible[i];
            self.set_triangle_active(triangle as usize);
        }
        self.num_visible = 0;

        debug_assert_eq!(new_point + 1, self.num_points);
        self.num_points = new_point;
    }

    /// Number of distinct vertices on the silhouette, i.e. the spoke edges stitching will add.
    fn count_silhouette_vertices(&self, num_silhouette: usize) -> usize {
        let silhouette = &self.silhouette[..num_silhouette];
        let mut count = 0;
        for (i, edge) in silhouette.iter().enumerate() {
            if !silhouette[..i].iter().any(|other| other.from == edge.from || other.to == edge.from) {
                count += 1;
            }
            if !silhouette[..i].iter().any(|other| other.from == edge.to || other.to == edge.to) {
                count += 1;
            }
        }
        count
    }

    /// Spoke edge `vertex -> apex` created during the current expansion, if any.
    fn find_spoke(&self, first_new_edge: u16, vertex: u16) -> Option<u16> {
        (first_new_edge..self.num_edges).find(|&e| self.edges[e as usize].a == vertex)
    }

    /// Connects every silhouette edge to `apex` with a new face and links the new faces to each
    /// other through one spoke edge per silhouette vertex.
    fn stitch_silhouette(&mut self, apex: u16, num_silhouette: usize) -> Option<()> {
        let first_new_edge = self.num_edges;

        for i in 0..num_silhouette {
            let SilhouetteEdge { from, to, edge, .. } = self.silhouette[i];
            let info = Self::triangle_info(
                &self.points[from as usize],
                &self.points[to as usize],
                &self.points[apex as usize],
            );

            // Edges opposite `from` and `to` are the spokes, linked in the second pass
            let triangle = self.push_triangle(from, to, apex, INVALID_INDEX, INVALID_INDEX, edge, info)?;

            let silhouette_edge = &mut self.edges[edge as usize];
            if silhouette_edge.a == from {
                silhouette_edge.triangle_a = triangle;
            } else {
                silhouette_edge.triangle_b = triangle;
            }
            self.silhouette[i].new_triangle = triangle;
        }

        for i in 0..num_silhouette {
            let SilhouetteEdge { from, to, new_triangle, .. } = self.silhouette[i];

            // The new face's winding contains `to -> apex`, so it sits left of that spoke
            let spoke_to = match self.find_spoke(first_new_edge, to) {
                Some(spoke) => {
                    self.edges[spoke as usize].triangle_a = new_triangle;
                    spoke
                },
                None => self.push_edge(to, apex, new_triangle, INVALID_INDEX)?,
            };

            // ... and `apex -> from`, so it sits right of the `from -> apex` spoke
            let spoke_from = match self.find_spoke(first_new_edge, from) {
                Some(spoke) => {
                    self.edges[spoke as usize].triangle_b = new_triangle;
                    spoke
                },
                None => self.push_edge(from, apex, INVALID_INDEX, new_triangle)?,
            };

            let triangle = &mut self.triangles[new_triangle as usize];
            triangle.edge_opposite_a = spoke_to;
            triangle.edge_opposite_b = spoke_from;
        }

        self.num_visible = 0;
        Some(())
    }

    /// Checks that the active faces form a closed, consistently wound 2-manifold: every edge of
    /// an active face references that face on the side its winding implies, and the face on the
    /// other side is active too.
    pub fn check_topology(&self) -> Result<(), CollisionError> {
        if self.num_active_triangles() == 0 {
            return Err(CollisionError::TopologyViolation("no active triangles".to_string()));
        }

        for triangle_index in self.active_triangles() {
            let triangle = &self.triangles[triangle_index as usize];
            if triangle.distance_to_origin.is_nan()
                || triangle.distance_to_origin < 0.0
                || !vector_magnitude(triangle.normal).is_finite()
            {
                return Err(CollisionError::TopologyViolation(format!(
                    "triangle {} has an invalid plane", triangle_index
                )));
            }

            for (from, to, edge_index) in triangle.edges_in_winding_order() {
                if edge_index >= self.num_edges {
                    return Err(CollisionError::TopologyViolation(format!(
                        "triangle {} references unknown edge {}", triangle_index, edge_index
                    )));
                }

                let edge = &self.edges[edge_index as usize];
                let linked = if edge.a == from && edge.b == to {
                    edge.triangle_a == triangle_index
                } else if edge.a == to && edge.b == from {
                    edge.triangle_b == triangle_index
                } else {
                    false
                };
                if !linked {
                    return Err(CollisionError::TopologyViolation(format!(
                        "edge {} ({} -> {}) is not linked to triangle {} along {} -> {}",
                        edge_index, edge.a, edge.b, triangle_index, from, to
                    )));
                }

                let neighbor = edge.other_triangle(triangle_index);
                if neighbor >= self.num_triangles || !self.is_triangle_active(neighbor as usize) {
                    return Err(CollisionError::TopologyViolation(format!(
                        "edge {} borders triangle {} and inactive neighbor {}",
                        edge_index, triangle_index, neighbor
                    )));
                }
            }
        }

        Ok(())
    }
}
