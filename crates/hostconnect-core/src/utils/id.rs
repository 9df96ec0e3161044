// Record id generation.

/// Generate a unique record id (21 url-safe characters).
pub fn generate_id() -> String {
    nanoid::nanoid!()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_length() {
        let id = generate_id();
        assert_eq!(id.len(), 21);
    }

    #[test]
    fn test_ids_are_unique() {
        let id1 = generate_id();
        let id2 = generate_id();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_ids_are_url_safe() {
        let id = generate_id();
        assert!(id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }
}
