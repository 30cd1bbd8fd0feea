//! Watched algorithm variables
//!
//! Each step carries the loop indices, flags, and working values that are
//! live at that point. A variable may also name an array position to draw
//! a pointer marker at; index-like variables default that position to their
//! own value.

use std::fmt;

use super::color::SemanticColor;

/// Value of a watched variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarValue {
    Int(i64),
    Bool(bool),
}

impl fmt::Display for VarValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            VarValue::Int(n) => write!(f, "{}", n),
            VarValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// One watched variable at a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Variable {
    pub name: &'static str,
    pub value: VarValue,
    /// Semantic tint for the variable's marker and its watch-list entry.
    pub color: Option<SemanticColor>,
    /// Array position to draw a pointer marker at, when this variable
    /// points into the array.
    pub draw_at: Option<usize>,
}

impl Variable {
    /// An index-like variable, drawn at its own value when in bounds.
    pub fn index(name: &'static str, value: i64) -> Self {
        Variable {
            name,
            value: VarValue::Int(value),
            color: None,
            draw_at: usize::try_from(value).ok(),
        }
    }

    /// A plain watched value with no array marker.
    pub fn plain(name: &'static str, value: i64) -> Self {
        Variable {
            name,
            value: VarValue::Int(value),
            color: None,
            draw_at: None,
        }
    }

    /// A boolean flag, such as bubble sort's `swapped`.
    pub fn flag(name: &'static str, value: bool) -> Self {
        Variable {
            name,
            value: VarValue::Bool(value),
            color: None,
            draw_at: None,
        }
    }

    /// A value drawn at an explicitly resolved position, for variables whose
    /// value is not the position they track (quicksort's pivot).
    pub fn at(name: &'static str, value: i64, position: usize) -> Self {
        Variable {
            name,
            value: VarValue::Int(value),
            color: None,
            draw_at: Some(position),
        }
    }

    pub fn colored(mut self, color: SemanticColor) -> Self {
        self.color = Some(color);
        self
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} = {}", self.name, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_variable_marker_follows_value() {
        let j = Variable::index("j", 3);
        assert_eq!(j.draw_at, Some(3));
        assert_eq!(j.value, VarValue::Int(3));

        // negative indices are legal values but draw no marker
        let j = Variable::index("j", -1);
        assert_eq!(j.draw_at, None);
        assert_eq!(j.value, VarValue::Int(-1));
    }

    #[test]
    fn test_explicit_marker_position() {
        let pivot = Variable::at("pivot", 42, 6).colored(SemanticColor::Pivot);
        assert_eq!(pivot.draw_at, Some(6));
        assert_eq!(pivot.value, VarValue::Int(42));
        assert_eq!(pivot.color, Some(SemanticColor::Pivot));
        assert_eq!(format!("{}", pivot), "pivot = 42");
    }
}
