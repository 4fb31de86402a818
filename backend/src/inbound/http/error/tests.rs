//! Tests for HTTP error mapping.

use super::*;
use actix_web::body::to_bytes;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("no auth"), StatusCode::UNAUTHORIZED)]
#[case(Error::forbidden("denied"), StatusCode::FORBIDDEN)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::already_exists("dup"), StatusCode::INTERNAL_SERVER_ERROR)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] err: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&err), status);
}

#[rstest]
#[case(Error::not_found("User with id = 3 not found"))]
#[case(Error::already_exists("User last name exists."))]
#[case(Error::internal("connection refused"))]
#[actix_web::test]
async fn body_carries_only_the_message(#[case] err: Error) {
    let response = ResponseError::error_response(&err);
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");
    assert_eq!(body, json!({ "errorMessage": err.message() }));
}

#[actix_web::test]
async fn malformed_json_is_a_server_error() {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .route(
                "/",
                web::post().to(|_: web::Json<serde_json::Value>| async { "ok" }),
            ),
    )
    .await;

    let req = actix_test::TestRequest::post()
        .uri("/")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: ErrorResponse = actix_test::read_body_json(res).await;
    assert!(!body.error_message.is_empty());
}

#[rstest]
#[case("/abc")]
#[case("/99999999999")]
#[actix_web::test]
async fn unparsable_id_is_a_server_error(#[case] uri: &str) {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::PathConfig::default().error_handler(path_error_handler))
            .route(
                "/{id}",
                web::get().to(|_: web::Path<i32>| async { "ok" }),
            ),
    )
    .await;

    let req = actix_test::TestRequest::get().uri(uri).to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: ErrorResponse = actix_test::read_body_json(res).await;
    assert!(!body.error_message.is_empty());
}
