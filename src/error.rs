//! Module containing the crate's universal error type
use thiserror::Error;

/// Universal error type for this crate
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq)]
pub enum Error {
    /// Key is not present in this `Bimap`
    #[error("key is not present in this `Bimap`")]
    KeyNotFound,

    /// Cursor does not refer to a live pair in this `Bimap`
    ///
    /// Returned when the pair a cursor denoted has since been erased
    /// (even if its slot was reused by a later insert).
    #[error("cursor does not refer to a live pair in this `Bimap`")]
    BadCursor,

    /// Operation is not valid on the end cursor
    #[error("operation is not valid on the end cursor")]
    EndCursor,

    /// `Bimap` is empty
    #[error("`Bimap` is empty")]
    EmptyMap,
}
