use crate::models::SupportPoint;

/// simplex (for use with GJK)
///
/// Points are stored oldest first; `get_a` is always the most recently added point.
#[derive(Debug, Clone)]
pub struct Simplex {
    pub points: Vec<SupportPoint>,
}

impl Default for Simplex {
    fn default() -> Self {
        Self::new()
    }
}

impl Simplex {
    pub fn new() -> Self {
        Self { points: Vec::with_capacity(4) }
    }

    pub fn add(&mut self, point: SupportPoint) {
        self.points.push(point);
    }

    pub fn size(&self) -> usize {
        self.points.len()
    }

    pub fn get_a(&self) -> &SupportPoint {
        &self.points[self.points.len() - 1]
    }

    pub fn get_b(&self) -> &SupportPoint {
        &self.points[self.points.len() - 2]
    }

    pub fn get_c(&self) -> &SupportPoint {
        &self.points[self.points.len() - 3]
    }

    pub fn get_d(&self) -> &SupportPoint {
        &self.points[self.points.len() - 4]
    }

    pub fn set_abc(&mut self, a: SupportPoint, b: SupportPoint, c: SupportPoint) {
        self.points.clear();
        self.points.push(c);
        self.points.push(b);
        self.points.push(a);
    }

    pub fn set_ab(&mut self, a: SupportPoint, b: SupportPoint) {
        self.points.clear();
        self.points.push(b);
        self.points.push(a);
    }

    pub fn set_a(&mut self, a: SupportPoint) {
        self.points.clear();
        self.points.push(a);
    }

    /// Converts a full simplex into the tetrahedron handed to EPA.
    pub fn to_terminal(&self) -> Option<TerminalSimplex> {
        if self.points.len() != 4 {
            return None;
        }
        Some(TerminalSimplex {
            points: [self.points[0], self.points[1], self.points[2], self.points[3]],
        })
    }
}

/// The tetrahedron GJK terminates with once it has enclosed the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerminalSimplex {
    pub points: [SupportPoint; 4],
}

impl TerminalSimplex {
    pub fn new(a: SupportPoint, b: SupportPoint, c: SupportPoint, d: SupportPoint) -> Self {
        Self { points: [a, b, c, d] }
    }
}
