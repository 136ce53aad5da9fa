// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use axum::http::HeaderValue;

use super::*;

fn headers(auth: Option<&str>) -> HeaderMap {
    let mut h = HeaderMap::new();
    if let Some(v) = auth {
        h.insert("authorization", HeaderValue::from_str(v).expect("header"));
    }
    h
}

#[yare::parameterized(
    disabled      = { None, None, true },
    disabled_any  = { None, Some("Bearer whatever"), true },
    matching      = { Some("s3cret"), Some("Bearer s3cret"), true },
    missing       = { Some("s3cret"), None, false },
    wrong_token   = { Some("s3cret"), Some("Bearer s3creT"), false },
    wrong_scheme  = { Some("s3cret"), Some("Basic s3cret"), false },
    prefix_only   = { Some("s3cret"), Some("Bearer s3"), false },
)]
fn bearer_validation(expected: Option<&str>, auth: Option<&str>, ok: bool) {
    let result = check_bearer(&headers(auth), expected);
    assert_eq!(result.is_ok(), ok);
    if !ok {
        assert_eq!(result, Err(ErrorCode::Unauthorized));
    }
}

#[test]
fn tokens_match_is_plain_equality() {
    assert!(tokens_match("abc", "abc"));
    assert!(!tokens_match("abc", "abd"));
    assert!(!tokens_match("abc", "abcd"));
    assert!(tokens_match("", ""));
}
