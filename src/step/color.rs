//! Semantic highlight tags
//!
//! Steps never name concrete colors. They tag array positions, pseudocode
//! lines, and variables with one of these semantic roles, and the active
//! theme maps each role to a terminal color at draw time.

/// Semantic role of a highlight, resolved to a concrete color by the theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticColor {
    /// Elements currently being compared.
    Compare,
    /// Elements being swapped or moved this step.
    Swap,
    /// Positions whose value is settled in its final place.
    Sorted,
    /// The pivot or key element an algorithm is working around.
    Pivot,
    /// A running candidate, such as the current minimum or the larger child.
    Candidate,
    /// The boundaries of the sub-range the algorithm is working on.
    Range,
    /// Stale or de-emphasized content, such as a copied-out slot.
    Muted,
    /// Neutral emphasis, such as the pseudocode line being executed.
    Accent,
}
