// Property-based tests for authentication

use common::auth::JwtService;
use proptest::prelude::*;

// Property 1: Token round trip preserves identity claims
// For any user id and username, encoding then decoding a token with the
// same service returns the original claims.
#[test]
fn property_token_round_trip() {
    proptest!(|(
        user_id in "[a-f0-9]{8}-[a-f0-9]{4}-[a-f0-9]{4}-[a-f0-9]{4}-[a-f0-9]{12}",
        username in "[a-zA-Z][a-zA-Z0-9_]{0,31}",
        expiration_hours in 1u64..8760
    )| {
        let service = JwtService::new("property-test-secret", expiration_hours);
        let token = service.encode_token(&user_id, &username).unwrap();
        let claims = service.decode_token(&token).unwrap();

        prop_assert_eq!(claims.sub, user_id);
        prop_assert_eq!(claims.username, username);
        prop_assert!(claims.exp > claims.iat);
    });
}

// Property 2: A token never validates under a different secret
// For any pair of distinct secrets, a token issued under one is rejected by
// a service constructed with the other.
#[test]
fn property_token_bound_to_secret() {
    proptest!(|(
        secret_a in "[a-z]{8,32}",
        secret_b in "[a-z]{8,32}",
        username in "[a-zA-Z]{1,16}"
    )| {
        prop_assume!(secret_a != secret_b);

        let issuing = JwtService::new(&secret_a, 24);
        let verifying = JwtService::new(&secret_b, 24);

        let token = issuing.encode_token("user-1", &username).unwrap();
        prop_assert!(verifying.decode_token(&token).is_err());
    });
}

// Property 3: Garbage input is rejected, never panics
// For any arbitrary printable string, token validation returns an error
// instead of panicking.
#[test]
fn property_garbage_tokens_rejected() {
    proptest!(|(garbage in "[ -~]{0,64}")| {
        let service = JwtService::new("property-test-secret", 24);
        prop_assert!(service.decode_token(&garbage).is_err());
    });
}
