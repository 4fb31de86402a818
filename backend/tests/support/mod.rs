//! Shared helpers for backend integration tests.

pub mod pg_embed;

/// Render a `postgres` error with the server message and SQLSTATE when the
/// generic `Display` output would only say `db error`.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };

    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    summary
}

/// Report that an embedded-cluster test is being skipped.
///
/// Hosts without the PostgreSQL binaries, or sandboxes that forbid starting
/// them, still run the rest of the suite.
pub fn skip_cluster_test(reason: impl std::fmt::Display) {
    eprintln!("SKIP-TEST-CLUSTER: {reason}");
}
