//! Random identifier generation.

use uuid::Uuid;

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SUFFIX_LEN: usize = 9;

/// Generates an identifier of the form `<prefix>-<9 base36 chars>`.
///
/// ```rust
/// let id = edutron_core::ids::generate_id("person");
/// assert!(id.starts_with("person-"));
/// assert_eq!(id.len(), "person-".len() + 9);
/// ```
pub fn generate_id(prefix: &str) -> String {
    let mut entropy = Uuid::new_v4().as_u128();
    let mut suffix = String::with_capacity(SUFFIX_LEN);
    for _ in 0..SUFFIX_LEN {
        suffix.push(ALPHABET[(entropy % 36) as usize] as char);
        entropy /= 36;
    }
    format!("{prefix}-{suffix}")
}
