//! Core data model: everything a generated patient record is made of.
//!
//! All types serialize with serde so export collaborators (JSON, Markdown,
//! FHIR, CCDA) can consume a completed `Patient` without reaching into
//! generator internals.

mod clinical;
mod demographics;
mod encounter;
mod enums;
mod growth;
mod patient;
mod seed;

pub use clinical::*;
pub use demographics::*;
pub use encounter::*;
pub use enums::*;
pub use growth::*;
pub use patient::*;
pub use seed::*;

use uuid::Uuid;

/// Short record identifier: the first 8 hex characters of a v4 UUID.
pub fn short_id() -> String {
    let full = Uuid::new_v4().simple().to_string();
    full[..8].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_id_is_eight_hex_chars() {
        let id = short_id();
        assert_eq!(id.len(), 8);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn short_ids_are_unique_enough() {
        let a = short_id();
        let b = short_id();
        assert_ne!(a, b);
    }
}
