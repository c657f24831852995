use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand_core::{OsRng, RngCore};

/// 128 bits of OS entropy rendered URL-safe (22 chars). Guessing one is not a
/// realistic attack; the unique index exists for the collision case anyway.
pub fn new_invite_code() -> String {
    let mut buf = [0u8; 16];
    let mut rng = OsRng;
    rng.fill_bytes(&mut buf);
    URL_SAFE_NO_PAD.encode(buf)
}

#[cfg(test)]
mod tests {
    use super::new_invite_code;
    use std::collections::HashSet;

    #[test]
    fn codes_are_url_safe_and_fixed_length() {
        let code = new_invite_code();
        assert_eq!(code.len(), 22);
        assert!(code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn codes_do_not_repeat_in_practice() {
        let codes: HashSet<String> = (0..1000).map(|_| new_invite_code()).collect();
        assert_eq!(codes.len(), 1000);
    }
}
