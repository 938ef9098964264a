use super::tokens_match;

#[test]
fn matching_token_is_accepted() {
    assert!(tokens_match("bootstrap-token", "bootstrap-token"));
}

#[test]
fn differing_or_truncated_tokens_are_rejected() {
    assert!(!tokens_match("bootstrap-tokem", "bootstrap-token"));
    assert!(!tokens_match("bootstrap", "bootstrap-token"));
    assert!(!tokens_match("bootstrap-token-extra", "bootstrap-token"));
    assert!(!tokens_match("", "bootstrap-token"));
}

#[test]
fn empty_configured_token_matches_nothing() {
    assert!(!tokens_match("", ""));
}
