use crate::maze::Pos;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Advanced,
    Retreated,
}

/// The player's trail: a stack that is never empty and whose top is the
/// current position. Stepping onto the previous tile pops instead of pushing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trail {
    cells: Vec<Pos>,
}

impl Trail {
    pub fn new(start: Pos) -> Self {
        Self { cells: vec![start] }
    }

    pub fn follow(&mut self, pos: Pos) -> Step {
        let len = self.cells.len();
        if len >= 2 && self.cells[len - 2] == pos {
            self.cells.pop();
            Step::Retreated
        } else {
            self.cells.push(pos);
            Step::Advanced
        }
    }

    pub fn current(&self) -> Pos {
        self.cells[self.cells.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn as_slice(&self) -> &[Pos] {
        &self.cells
    }

    /// Index of the first visit to `pos`, if the trail passes through it.
    pub fn position_of(&self, pos: Pos) -> Option<usize> {
        self.cells.iter().position(|p| *p == pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: Pos = Pos::new(1, 5);
    const B: Pos = Pos::new(1, 4);
    const C: Pos = Pos::new(1, 3);
    const D: Pos = Pos::new(2, 3);

    #[test]
    fn starts_with_one_cell() {
        let trail = Trail::new(A);
        assert_eq!(trail.as_slice(), &[A]);
        assert_eq!(trail.current(), A);
        assert!(!trail.is_empty());
    }

    #[test]
    fn stepping_back_pops() {
        let mut trail = Trail::new(A);
        assert_eq!(trail.follow(B), Step::Advanced);
        assert_eq!(trail.follow(C), Step::Advanced);
        assert_eq!(trail.follow(B), Step::Retreated);
        assert_eq!(trail.as_slice(), &[A, B]);
        assert_eq!(trail.follow(A), Step::Retreated);
        assert_eq!(trail.as_slice(), &[A]);
    }

    #[test]
    fn single_cell_trail_never_pops() {
        let mut trail = Trail::new(A);
        assert_eq!(trail.follow(B), Step::Advanced);
        assert_eq!(trail.follow(A), Step::Retreated);
        assert_eq!(trail.follow(B), Step::Advanced);
        assert_eq!(trail.len(), 2);
    }

    #[test]
    fn revisiting_older_cell_pushes_again() {
        let mut trail = Trail::new(A);
        for pos in [B, C, D] {
            trail.follow(pos);
        }
        // B is two back from D, so it is appended, not popped to.
        assert_eq!(trail.follow(B), Step::Advanced);
        assert_eq!(trail.as_slice(), &[A, B, C, D, B]);
        assert_eq!(trail.position_of(B), Some(1));
        assert_eq!(trail.position_of(Pos::new(9, 9)), None);
    }
}
