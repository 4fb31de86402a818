//! Tests for domain error construction and validation.

use super::*;
use rstest::rstest;

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::unauthorized("login required"), ErrorCode::Unauthorized)]
#[case(Error::forbidden("admin role required"), ErrorCode::Forbidden)]
#[case(Error::not_found("missing"), ErrorCode::NotFound)]
#[case(Error::already_exists("User a b exists."), ErrorCode::AlreadyExists)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
#[case("")]
#[case("   ")]
fn try_new_rejects_blank_messages(#[case] message: &str) {
    let result = Error::try_new(ErrorCode::InternalError, message);
    assert_eq!(result, Err(ErrorValidationError::EmptyMessage));
}

#[rstest]
fn display_renders_message_only() {
    let error = Error::not_found("User with id = 7 not found");
    assert_eq!(error.to_string(), "User with id = 7 not found");
}

#[rstest]
#[should_panic(expected = "error messages must satisfy validation")]
fn new_panics_on_blank_message() {
    let _ = Error::new(ErrorCode::InvalidRequest, " ");
}

#[rstest]
#[case(ErrorCode::NotFound, "not_found")]
#[case(ErrorCode::AlreadyExists, "already_exists")]
fn error_code_display_is_snake_case(#[case] code: ErrorCode, #[case] expected: &str) {
    assert_eq!(code.to_string(), expected);
}
