use livemarks::types::errors::*;

// === ValidationError Tests ===

#[test]
fn validation_error_empty_fields_display() {
    assert_eq!(
        ValidationError::EmptyFields.to_string(),
        "Both URL and title are required."
    );
}

#[test]
fn validation_error_invalid_url_display_hides_input() {
    let err = ValidationError::InvalidUrl("not a url".to_string());
    assert_eq!(
        err.to_string(),
        "Please enter a valid URL (e.g., https://example.com)."
    );
}

// === StoreError Tests ===

#[test]
fn store_error_display_variants() {
    assert_eq!(
        StoreError::Database("disk full".to_string()).to_string(),
        "Bookmark database error: disk full"
    );
    assert_eq!(
        StoreError::Feed("channel closed".to_string()).to_string(),
        "Change feed error: channel closed"
    );
}

#[test]
fn store_error_from_rusqlite() {
    let err: StoreError = rusqlite::Error::QueryReturnedNoRows.into();
    assert!(matches!(err, StoreError::Database(_)));
    assert!(err.to_string().starts_with("Bookmark database error:"));
}

// === BookmarkError Tests ===

#[test]
fn bookmark_error_unauthorized_names_the_action() {
    assert_eq!(
        BookmarkError::Unauthorized(BookmarkAction::Add).to_string(),
        "You must be logged in to add bookmarks."
    );
    assert_eq!(
        BookmarkError::Unauthorized(BookmarkAction::Delete).to_string(),
        "You must be logged in to delete bookmarks."
    );
}

#[test]
fn bookmark_error_wraps_validation_transparently() {
    let err: BookmarkError = ValidationError::EmptyFields.into();
    assert_eq!(err, BookmarkError::Validation(ValidationError::EmptyFields));
    assert_eq!(err.to_string(), "Both URL and title are required.");
}

#[test]
fn bookmark_error_wraps_store_transparently() {
    let err: BookmarkError = StoreError::Database("locked".to_string()).into();
    assert_eq!(err.to_string(), "Bookmark database error: locked");
}

#[test]
fn bookmark_error_implements_error_trait() {
    let err: Box<dyn std::error::Error> = Box::new(BookmarkError::Unauthorized(BookmarkAction::Add));
    assert!(err.source().is_none());
}

// === SettingsError Tests ===

#[test]
fn settings_error_display_variants() {
    assert_eq!(
        SettingsError::IoError("permission denied".to_string()).to_string(),
        "Settings I/O error: permission denied"
    );
    assert_eq!(
        SettingsError::InvalidKey("ui.nope".to_string()).to_string(),
        "Invalid settings key: ui.nope"
    );
    assert_eq!(
        SettingsError::InvalidValue("expected bool".to_string()).to_string(),
        "Invalid settings value: expected bool"
    );
}
