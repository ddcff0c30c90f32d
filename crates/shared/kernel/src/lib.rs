//! Kernel utilities shared across slices.
//! Keep this crate lightweight: config loading, request ids and, behind `server`,
//! the Axum state and the system routes.
//!
//! ```rust
//! let id = fcheck_kernel::request_id();
//! assert_eq!(id.len(), fcheck_kernel::REQUEST_ID_LEN);
//! ```

pub mod config;
pub mod prelude;
#[cfg(feature = "server")]
pub mod server;

pub use fcheck_domain as domain;

/// Alphabet without visually ambiguous characters (I, O, l, 0, 1).
pub const SAFE_ALPHABET: &[char; 55] = &[
    '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'J', 'K', 'L',
    'M', 'N', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', 'a', 'b', 'c', 'd', 'e', 'f',
    'g', 'h', 'j', 'k', 'm', 'n', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

pub const REQUEST_ID_LEN: usize = 12;

/// Short, unambiguous id used to correlate the log lines of one request.
#[must_use]
pub fn request_id() -> String {
    nanoid::nanoid!(REQUEST_ID_LEN, SAFE_ALPHABET)
}
