//! Tests for db::repository::error module.

use encore_rust::db::repository::{ErrorContext, RepositoryError};

#[test]
fn test_error_context_new() {
    let ctx = ErrorContext::new("test_operation");
    assert_eq!(ctx.operation, Some("test_operation".to_string()));
    assert!(ctx.entity.is_none());
    assert!(ctx.entity_id.is_none());
    assert!(ctx.details.is_none());
    assert!(!ctx.retryable);
}

#[test]
fn test_error_context_chaining() {
    let ctx = ErrorContext::new("delete_venue")
        .with_entity("venue")
        .with_entity_id(42)
        .with_details("The Musical Hop")
        .retryable();

    assert_eq!(ctx.operation, Some("delete_venue".to_string()));
    assert_eq!(ctx.entity, Some("venue".to_string()));
    assert_eq!(ctx.entity_id, Some("42".to_string()));
    assert_eq!(ctx.details, Some("The Musical Hop".to_string()));
    assert!(ctx.retryable);
}

#[test]
fn test_error_context_display() {
    let ctx = ErrorContext::new("get_venue")
        .with_entity("venue")
        .with_entity_id("123");

    let display = format!("{}", ctx);
    assert!(display.contains("operation=get_venue"));
    assert!(display.contains("entity=venue"));
    assert!(display.contains("id=123"));
}

#[test]
fn test_not_found_is_not_retryable() {
    let err = RepositoryError::not_found("venue not found");
    assert!(!err.is_retryable());
    assert!(err.is_not_found());
}

#[test]
fn test_connection_error_is_retryable() {
    let err = RepositoryError::connection("pool exhausted");
    assert!(err.is_retryable());
    assert!(!err.is_not_found());
}

#[test]
fn test_timeout_error_is_retryable() {
    let err = RepositoryError::timeout("statement timeout");
    assert!(err.is_retryable());
}

#[test]
fn test_validation_error_is_not_retryable() {
    let err = RepositoryError::validation("missing required field 'name'");
    assert!(!err.is_retryable());
    assert!(matches!(err, RepositoryError::ValidationError { .. }));
}

#[test]
fn test_foreign_key_violation_variant() {
    let err = RepositoryError::foreign_key("venue 99 does not exist");
    assert!(matches!(err, RepositoryError::ForeignKeyViolation { .. }));
    assert!(!err.is_retryable());
}

#[test]
fn test_conflict_error_carries_entity_name() {
    let err = RepositoryError::conflict_with_context(
        "venue 'The Musical Hop' still has 2 scheduled show(s)",
        ErrorContext::new("delete_venue")
            .with_entity("venue")
            .with_details("The Musical Hop"),
    );

    let display = err.to_string();
    assert!(display.contains("The Musical Hop"));
    assert_eq!(err.context().details, Some("The Musical Hop".to_string()));
}

#[test]
fn test_with_operation_updates_context() {
    let err = RepositoryError::query("syntax error").with_operation("search_venues_by_name");
    assert_eq!(
        err.context().operation,
        Some("search_venues_by_name".to_string())
    );
}

#[test]
fn test_with_entity_and_details_update_context() {
    let err = RepositoryError::query("commit failed")
        .with_entity("artist")
        .with_details("Guns N Petals");
    assert_eq!(err.context().entity, Some("artist".to_string()));
    assert_eq!(err.context().details, Some("Guns N Petals".to_string()));
}

#[test]
fn test_error_display_includes_context() {
    let err = RepositoryError::not_found_with_context(
        "venue not found",
        ErrorContext::new("get_venue").with_entity_id(7),
    );
    let display = err.to_string();
    assert!(display.starts_with("Not found:"));
    assert!(display.contains("id=7"));
}
