//! Error taxonomy for the simulation core.
//!
//! Catalog problems are fatal at startup. Everything that can go wrong during a
//! tick is reported through the same enum but handled by keeping the previous
//! state, so a bad frame never reaches the renderer.

use thiserror::Error;

/// Errors produced by the simulation core.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    /// A catalog entry failed validation. Fatal at startup.
    #[error("invalid definition for body `{body}`: {problem}")]
    InvalidDefinition {
        body: String,
        problem: DefinitionProblem,
    },

    /// An API argument was rejected; the receiver's state is unchanged.
    #[error("invalid input for {operation}: {value}")]
    InvalidInput { operation: &'static str, value: f64 },

    /// A computed transform was not finite; the previous transform is kept.
    #[error("degenerate orbit for `{body}` (distance {distance}, speed {speed}, time {time})")]
    DegenerateOrbit {
        body: String,
        distance: f64,
        speed: f64,
        time: f64,
    },

    /// No body with this name exists (names are case-insensitive).
    #[error("no body named `{0}`")]
    NotFound(String),
}

/// Reason a body definition was rejected by the catalog.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DefinitionProblem {
    #[error("name must not be empty")]
    EmptyName,

    #[error("radius must be positive, got {0}")]
    NonPositiveRadius(f64),

    #[error("orbital distance must not be negative, got {0}")]
    NegativeDistance(f64),

    #[error("name collides with an earlier body")]
    DuplicateName,

    #[error("parent `{0}` does not exist")]
    UnknownParent(String),

    #[error("parent chain loops back on itself")]
    ParentCycle,

    #[error("parent `{0}` orbits another body itself (only one level is supported)")]
    NestedParent(String),

    #[error("ring bounds invalid (inner {inner}, outer {outer})")]
    InvalidRings { inner: f64, outer: f64 },
}

impl SimError {
    /// Whether this error must abort startup.
    pub fn is_fatal(&self) -> bool {
        matches!(self, SimError::InvalidDefinition { .. })
    }
}
