//! Step granularity model
//!
//! Every step an algorithm yields has one of three granularities, ordered
//! from finest to coarsest:
//!
//! - [`StepKind::Code`]: one step per meaningful statement execution
//! - [`StepKind::Significant`]: a step worth narrating (a swap, a shift,
//!   a pivot choice)
//! - [`StepKind::Algorithmic`]: one whole algorithmic unit of progress
//!   (a bubble pass, an insertion, a partition)
//!
//! Coarser kinds subsume finer ones temporally: every Algorithmic step is
//! also a Significant boundary, and both ride the same Code-level stream.

/// Granularity of a single step, ordered `Code < Significant < Algorithmic`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StepKind {
    Code,
    Significant,
    Algorithmic,
}

impl StepKind {
    /// Position of this kind in the granularity hierarchy (`Code` = 0).
    pub fn hierarchical_index(self) -> usize {
        match self {
            StepKind::Code => 0,
            StepKind::Significant => 1,
            StepKind::Algorithmic => 2,
        }
    }

    /// The next coarser kind. With `wrap_around`, `Algorithmic` cycles back
    /// to `Code`; otherwise it has no coarser neighbor.
    pub fn coarser(self, wrap_around: bool) -> Option<StepKind> {
        match self {
            StepKind::Code => Some(StepKind::Significant),
            StepKind::Significant => Some(StepKind::Algorithmic),
            StepKind::Algorithmic => wrap_around.then_some(StepKind::Code),
        }
    }

    /// The next finer kind. With `wrap_around`, `Code` cycles back to
    /// `Algorithmic`; otherwise it has no finer neighbor.
    pub fn finer(self, wrap_around: bool) -> Option<StepKind> {
        match self {
            StepKind::Code => wrap_around.then_some(StepKind::Algorithmic),
            StepKind::Significant => Some(StepKind::Code),
            StepKind::Algorithmic => Some(StepKind::Significant),
        }
    }

    /// Cycle through the granularities in coarsening order, wrapping at the
    /// top. Used by the granularity-toggle key.
    pub fn cycled(self) -> StepKind {
        match self {
            StepKind::Code => StepKind::Significant,
            StepKind::Significant => StepKind::Algorithmic,
            StepKind::Algorithmic => StepKind::Code,
        }
    }

    /// Short label for the status bar.
    pub fn label(self) -> &'static str {
        match self {
            StepKind::Code => "code",
            StepKind::Significant => "sub",
            StepKind::Algorithmic => "full",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_granularity_order() {
        assert!(StepKind::Code < StepKind::Significant);
        assert!(StepKind::Significant < StepKind::Algorithmic);
        assert_eq!(StepKind::Code.hierarchical_index(), 0);
        assert_eq!(StepKind::Significant.hierarchical_index(), 1);
        assert_eq!(StepKind::Algorithmic.hierarchical_index(), 2);
    }

    #[test]
    fn test_relative_kinds() {
        assert_eq!(
            StepKind::Code.coarser(false),
            Some(StepKind::Significant)
        );
        assert_eq!(StepKind::Algorithmic.coarser(false), None);
        assert_eq!(
            StepKind::Algorithmic.coarser(true),
            Some(StepKind::Code)
        );
        assert_eq!(StepKind::Code.finer(false), None);
        assert_eq!(StepKind::Code.finer(true), Some(StepKind::Algorithmic));
    }

    #[test]
    fn test_cycling_visits_all_kinds() {
        let mut kind = StepKind::Code;
        let mut seen = Vec::new();
        for _ in 0..3 {
            seen.push(kind);
            kind = kind.cycled();
        }
        assert_eq!(kind, StepKind::Code);
        assert_eq!(
            seen,
            vec![StepKind::Code, StepKind::Significant, StepKind::Algorithmic]
        );
    }
}
