//! Step data model
//!
//! Everything an algorithm emits while it runs is expressed in this
//! module's types: granularities, semantic highlight roles, sortable items
//! with stable identity, watched variables, call stack snapshots, and the
//! step records that tie them together.

pub mod call_stack;
pub mod color;
pub mod errors;
pub mod item;
pub mod kind;
pub mod result;
pub mod variable;

pub use call_stack::{CallFrame, CallStack, FrozenCallStack};
pub use color::SemanticColor;
pub use errors::StepError;
pub use item::{index_input, IndexedNumber};
pub use kind::StepKind;
pub use result::{ArraySnapshot, NamedArray, StepBuilder, StepPayload, StepResult};
pub use variable::{VarValue, Variable};
