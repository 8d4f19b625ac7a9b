//! Error types for the B-tree index.

use thiserror::Error;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
/// This is a common Rust pattern (see `std::io::Result`).
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors raised by the index.
///
/// The tree operations themselves are total: a missing key is `None`, not an
/// error. Errors only come from configuration and from structural validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The tree was constructed with a minimum degree outside `[min, max]`.
    ///
    /// A degree below 2 cannot satisfy the split invariants, and one above
    /// `usize::MAX / 2` overflows the node capacity `2t - 1`.
    #[error("invalid minimum degree {degree}: must be between {min} and {max}")]
    InvalidDegree { degree: usize, min: usize, max: usize },

    /// A structural invariant does not hold.
    ///
    /// Only produced by [`BTree::validate`](crate::BTree::validate).
    /// Seeing this indicates a bug in the insertion path.
    #[error("tree corrupted: {0}")]
    Corrupted(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidDegree { degree: 1, min: 2, max: 9 };
        assert_eq!(
            format!("{}", err),
            "invalid minimum degree 1: must be between 2 and 9"
        );

        let err = Error::Corrupted("node 3 holds 6 keys".to_string());
        assert_eq!(format!("{}", err), "tree corrupted: node 3 holds 6 keys");
    }

    #[test]
    fn test_error_is_std_error() {
        fn assert_std_error<E: std::error::Error>(_: &E) {}
        assert_std_error(&Error::InvalidDegree { degree: 0, min: 2, max: 9 });
    }

    #[test]
    fn test_result_type_alias() {
        // This function returns our Result type
        fn might_fail() -> Result<u32> {
            Ok(42)
        }

        assert_eq!(might_fail().unwrap(), 42);
    }
}
