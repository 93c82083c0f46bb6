//! End-to-end behaviour of the registry and reporter

use serde_json::json;

use status_logger::{
    report, LogLevel, RecordingSink, ReportRequest, SchemaError, Severity, StatusConfig,
    StatusReporter, StatusRegistry, StatusSchema, UNCLASSIFIED_ERROR,
};

fn reporter_for<'a>(
    registry: &'a StatusRegistry,
    sink: &'a RecordingSink,
) -> StatusReporter<'a, &'a RecordingSink> {
    StatusReporter::with_sink(registry, sink)
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_success_scenario() {
    let registry = StatusRegistry::new();
    let sink = RecordingSink::new();

    let envelope = reporter_for(&registry, &sink)
        .report(&ReportRequest::new(200).payload(json!({ "data": "example data" })));

    assert_eq!(
        serde_json::to_value(&envelope).unwrap(),
        json!({
            "status": { "code": 200, "message": "Success" },
            "data": { "data": "example data" }
        })
    );
}

#[test]
fn test_not_found_scenario() {
    let registry = StatusRegistry::new();
    let sink = RecordingSink::new();

    let envelope = reporter_for(&registry, &sink)
        .report(&ReportRequest::new(404).payload(json!({})).error("Not Found"));

    assert_eq!(
        serde_json::to_value(&envelope).unwrap(),
        json!({
            "status": { "code": 404, "message": "Not Found" },
            "error": "Not Found"
        })
    );
}

#[test]
fn test_created_after_update_scenario() {
    let mut registry = StatusRegistry::new();
    registry.update_status(Severity::Success, 201, "Created");
    let sink = RecordingSink::new();

    let envelope = reporter_for(&registry, &sink).log_status(201);

    assert_eq!(
        serde_json::to_value(&envelope).unwrap(),
        json!({
            "status": { "code": 201, "message": "Created" },
            "data": {}
        })
    );
}

// =============================================================================
// Properties over the seeded table
// =============================================================================

#[test]
fn test_every_success_code_carries_data() {
    let registry = StatusRegistry::new();
    let sink = RecordingSink::new();
    let reporter = reporter_for(&registry, &sink);
    let schema = registry.schema();

    for (code, message) in schema.bucket(Severity::Success).unwrap() {
        let envelope = reporter.log_status(*code);
        assert!(envelope.data_value().is_some());
        assert!(envelope.error_value().is_none());
        assert_eq!(&envelope.status.message, message);
    }
}

#[test]
fn test_every_error_code_carries_error() {
    let registry = StatusRegistry::new();
    let sink = RecordingSink::new();
    let reporter = reporter_for(&registry, &sink);
    let schema = registry.schema();

    for (code, message) in schema.bucket(Severity::Error).unwrap() {
        let with_error = reporter.report(&ReportRequest::new(*code).error("X"));
        assert_eq!(with_error.error_value(), Some(&json!("X")));

        let without_error = reporter.log_status(*code);
        assert_eq!(without_error.error_value(), Some(&json!(message)));
    }
}

#[test]
fn test_unregistered_codes_are_internal_errors() {
    let registry = StatusRegistry::new();
    let sink = RecordingSink::new();
    let reporter = reporter_for(&registry, &sink);

    for code in [0, 201, 418, 999, -1, 70000, i64::MIN, i64::MAX] {
        let request = ReportRequest::new(code)
            .payload(json!({ "ignored": true }))
            .error(json!({ "detail": "also ignored" }))
            .silent(false);
        let envelope = reporter.report(&request);
        assert_eq!(envelope.error_value(), Some(&json!(UNCLASSIFIED_ERROR)));
    }
}

#[test]
fn test_codes_beyond_http_range() {
    let mut registry = StatusRegistry::new();
    let sink = RecordingSink::new();

    for code in [-1, 70000] {
        let envelope = reporter_for(&registry, &sink).log_status(code);
        assert_eq!(envelope.status.message, "Unknown status");
        assert_eq!(envelope.error_value(), Some(&json!(UNCLASSIFIED_ERROR)));
    }
    assert_eq!(
        sink.lines(),
        vec![
            (LogLevel::Error, "Invalid status code: -1".to_string()),
            (LogLevel::Error, "Invalid status code: 70000".to_string()),
        ]
    );

    registry.update_status(Severity::Success, 70000, "Batch accepted");
    let envelope = reporter_for(&registry, &sink).log_status(70000);
    assert_eq!(envelope.status.message, "Batch accepted");
    assert_eq!(envelope.data_value(), Some(&json!({})));
}

#[test]
fn test_update_then_remove_restores_absence() {
    let mut registry = StatusRegistry::empty();
    registry.update_status(Severity::Warn, 307, "Temporary Redirect");
    assert_eq!(registry.status_message(Severity::Warn, 307), Some("Temporary Redirect"));

    registry.remove_status(Severity::Warn, 307);
    assert_eq!(registry.status_message(Severity::Warn, 307), None);
    assert!(!registry.schema().contains_class(Severity::Warn));
    assert_eq!(registry.schema(), StatusSchema::empty());
}

// =============================================================================
// Silent mode
// =============================================================================

#[test]
fn test_silent_mode_suppresses_all_classes() {
    let mut registry = StatusRegistry::new();
    let codes = [200, 302, 403, 999];

    let loud_sink = RecordingSink::new();
    let loud: Vec<_> = codes
        .iter()
        .map(|code| reporter_for(&registry, &loud_sink).log_status(*code))
        .collect();
    assert_eq!(loud_sink.lines().len(), 2 + 2 + 2 + 1);

    registry.set_silent_mode(true);
    let quiet_sink = RecordingSink::new();
    let quiet: Vec<_> = codes
        .iter()
        .map(|code| reporter_for(&registry, &quiet_sink).log_status(*code))
        .collect();

    assert!(quiet_sink.is_empty());
    assert_eq!(loud, quiet);
}

#[test]
fn test_per_call_silent_does_not_stick() {
    let registry = StatusRegistry::new();
    let sink = RecordingSink::new();
    let reporter = reporter_for(&registry, &sink);

    reporter.report(&ReportRequest::new(200).silent(true));
    assert!(sink.is_empty());

    reporter.log_status(200);
    assert_eq!(
        sink.lines(),
        vec![
            (LogLevel::Info, "Success".to_string()),
            (LogLevel::Info, "Data: {}".to_string()),
        ]
    );
}

// =============================================================================
// Configuration and the shared registry
// =============================================================================

#[test]
fn test_registry_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("status.toml");
    std::fs::write(
        &path,
        r#"
[registry]
silent_mode = true

[statuses.success]
201 = "Created"

[statuses.error]
418 = "I'm a teapot"
"#,
    )
    .unwrap();

    let config = StatusConfig::load_from(path.to_str()).unwrap();
    let registry = StatusRegistry::from_config(&config).unwrap();

    assert!(registry.silent_mode());
    assert_eq!(registry.status_message(Severity::Success, 201), Some("Created"));
    assert_eq!(registry.status_message(Severity::Error, 418), Some("I'm a teapot"));
    assert_eq!(registry.status_message(Severity::Success, 200), Some("Success"));
}

#[test]
fn test_config_save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("saved.toml");
    let path = path.to_str().unwrap();

    let mut config = StatusConfig::default();
    config.registry.seed_defaults = false;
    config.statuses.error.insert("418".to_string(), "Teapot".to_string());
    config.statuses.warn.insert("70000".to_string(), "Large".to_string());
    config.save(path).unwrap();

    let loaded = StatusConfig::load_from(Some(path)).unwrap();
    assert!(!loaded.registry.seed_defaults);
    assert_eq!(loaded.statuses.error.get("418").map(String::as_str), Some("Teapot"));

    let registry = StatusRegistry::from_config(&loaded).unwrap();
    assert_eq!(registry.schema().len(), 2);
    assert_eq!(registry.status_message(Severity::Error, 418), Some("Teapot"));
    assert_eq!(registry.classify(70000), Some(Severity::Warn));
}

#[test]
fn test_unique_codes_config_rejects_duplicates() {
    let mut config = StatusConfig::default();
    config.registry.unique_codes = true;
    config.statuses.error.insert("200".to_string(), "Broken".to_string());

    let result = StatusRegistry::from_config(&config);
    assert!(matches!(result, Err(SchemaError::CodeConflict { code: 200, .. })));

    config.registry.unique_codes = false;
    let registry = StatusRegistry::from_config(&config).unwrap();
    assert_eq!(registry.classify(200), Some(Severity::Success));
}

#[test]
fn test_config_without_defaults() {
    let mut config = StatusConfig::default();
    config.registry.seed_defaults = false;
    config.statuses.warn.insert("299".to_string(), "Soft limit".to_string());

    let registry = StatusRegistry::from_config(&config).unwrap();
    assert_eq!(registry.schema().len(), 1);
    assert_eq!(registry.classify(200), None);
}

#[test]
fn test_global_registry_is_shared() {
    {
        let mut registry = StatusRegistry::global().write().unwrap();
        registry.update_status(Severity::Warn, 299, "Soft limit");
    }

    let envelope = report(&ReportRequest::new(299).silent(true));
    assert_eq!(envelope.status.message, "Soft limit");
    assert_eq!(envelope.data_value(), Some(&json!({})));

    StatusRegistry::global().write().unwrap().remove_status(Severity::Warn, 299);
    let envelope = report(&ReportRequest::new(299).silent(true));
    assert_eq!(envelope.error_value(), Some(&json!(UNCLASSIFIED_ERROR)));
}
