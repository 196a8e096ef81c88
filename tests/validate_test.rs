//! Integration tests for validation runs.

use futures_util::FutureExt;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use triage::{
    Engine, FieldError, Filter, RuleOptions, RuleSet, RunContext, ValidateError,
    ValidationRule, Validator, ValueBlock,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn failure_pairs(err: &ValidateError) -> Vec<(String, String)> {
    err.failure()
        .expect("expected a validation failure")
        .errors()
        .iter()
        .map(|e| (e.path.clone(), e.message.clone()))
        .collect()
}

#[tokio::test]
async fn test_all_rules_pass() {
    let engine = Engine::new();
    let rules = vec![
        ValidationRule::new("name", "isPresent", "must be present"),
        ValidationRule::new("email", "isEmail", "must be an email"),
        ValidationRule::new("age", "isInt", "must be 18+").options(json!({"min": 18})),
    ];
    let input = json!({"name": "Ann", "email": "ann@example.com", "age": 30});

    let result = engine.validate_input(&input, &rules, &RunContext::new()).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_missing_field_fails_is_present() {
    let engine = Engine::new();
    let rules = vec![ValidationRule::new("name", "isPresent", "must be present")];

    let err = engine
        .validate_input(&json!({}), &rules, &RunContext::new())
        .await
        .unwrap_err();

    let failure = err.failure().unwrap();
    assert_eq!(failure.kind(), "ValidationError");
    assert_eq!(failure.code(), 422);
    assert_eq!(
        failure.errors().clone().into_vec(),
        vec![FieldError::new("name", "must be present")]
    );
}

#[tokio::test]
async fn test_is_length_bounds() {
    let engine = Engine::new();
    let rules = vec![
        ValidationRule::new("name", "isLength", "name must be 3 to 5 characters")
            .options(json!({"min": 3, "max": 5})),
    ];
    let context = RunContext::new();

    assert!(engine
        .validate_input(&json!({"name": "John Smith"}), &rules, &context)
        .await
        .is_err());
    assert!(engine
        .validate_input(&json!({"name": "John"}), &rules, &context)
        .await
        .is_ok());
}

#[tokio::test]
async fn test_every_failure_is_reported_in_rule_order() {
    init_tracing();
    let engine = Engine::new();
    let rules = vec![
        ValidationRule::new("email", "isEmail", "bad email"),
        ValidationRule::new("name", "isPresent", "name required"),
        ValidationRule::new("zip", "isNumeric", "zip must be numeric"),
        ValidationRule::new("role", "isIn", "unknown role")
            .options(json!({"values": ["admin", "user"]})),
    ];
    let input = json!({"email": "nope", "zip": "0150", "role": "guest"});

    let err = engine
        .validate_input(&input, &rules, &RunContext::new())
        .await
        .unwrap_err();

    assert_eq!(
        failure_pairs(&err),
        vec![
            ("email".to_string(), "bad email".to_string()),
            ("name".to_string(), "name required".to_string()),
            ("role".to_string(), "unknown role".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_same_path_can_fail_several_rules() {
    let engine = Engine::new();
    let rules = vec![
        ValidationRule::new("password", "isLength", "too short").options(json!({"min": 8})),
        ValidationRule::new("password", "matches", "needs a digit")
            .options(json!({"pattern": "[0-9]"})),
    ];

    let err = engine
        .validate_input(&json!({"password": "abc"}), &rules, &RunContext::new())
        .await
        .unwrap_err();

    assert_eq!(err.failure().unwrap().errors().at_path("password").len(), 2);
}

#[tokio::test]
async fn test_nested_paths() {
    let engine = Engine::new();
    let rules = vec![
        ValidationRule::new("user.address.city", "isPresent", "city required"),
        ValidationRule::new("items.0.sku", "isMongoId", "bad sku"),
    ];
    let input = json!({
        "user": {"address": {}},
        "items": [{"sku": "507f1f77bcf86cd799439011"}]
    });

    let err = engine
        .validate_input(&input, &rules, &RunContext::new())
        .await
        .unwrap_err();

    assert_eq!(
        failure_pairs(&err),
        vec![("user.address.city".to_string(), "city required".to_string())]
    );
}

#[tokio::test]
async fn test_unknown_validator_is_fatal() {
    init_tracing();
    let engine = Engine::new();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    engine.registry().register(
        "counted",
        Validator::from_fn(move |_, _, _| {
            counter.fetch_add(1, Ordering::SeqCst);
            false
        }),
    );

    let rules = vec![
        ValidationRule::new("a", "counted", "a failed"),
        ValidationRule::new("b", "isFancy", "b failed"),
        ValidationRule::new("c", "counted", "c failed"),
    ];

    let err = engine
        .validate_input(&json!({}), &rules, &RunContext::new())
        .await
        .unwrap_err();

    assert!(matches!(err, ValidateError::UnknownValidator(ref name) if name == "isFancy"));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_predicate_error_ends_the_run() {
    let engine = Engine::new();
    let rules = vec![
        ValidationRule::new("name", "isPresent", "required"),
        ValidationRule::new("code", "matches", "bad code").options(json!({"modifiers": "i"})),
    ];

    let err = engine
        .validate_input(&json!({"code": "x"}), &rules, &RunContext::new())
        .await
        .unwrap_err();

    match err {
        ValidateError::Predicate {
            validator, path, ..
        } => {
            assert_eq!(validator, "matches");
            assert_eq!(path, "code");
        }
        other => panic!("expected a predicate error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_async_validator_is_awaited() {
    let engine = Engine::new();
    engine.registry().register(
        "isAvailable",
        Validator::new(|value, _, _| {
            async move {
                tokio::time::sleep(Duration::from_millis(5)).await;
                Ok(value.as_str() != Some("taken"))
            }
            .boxed()
        }),
    );
    let rules = vec![ValidationRule::new("username", "isAvailable", "already taken")];

    let err = engine
        .validate_input(&json!({"username": "taken"}), &rules, &RunContext::new())
        .await
        .unwrap_err();
    assert_eq!(err.failure().unwrap().errors().first().message, "already taken");

    assert!(engine
        .validate_input(&json!({"username": "free"}), &rules, &RunContext::new())
        .await
        .is_ok());
}

#[tokio::test]
async fn test_rules_are_evaluated_sequentially() {
    let engine = Engine::new();
    engine.registry().register(
        "record",
        Validator::new(|value, _, context| {
            async move {
                let mut seen = context.get("seen").unwrap_or_else(|| json!([]));
                if let Some(list) = seen.as_array_mut() {
                    list.push(value.clone());
                }
                context.insert("seen", seen);
                Ok(true)
            }
            .boxed()
        }),
    );
    let rules = vec![
        ValidationRule::new("c", "record", "-"),
        ValidationRule::new("a", "record", "-"),
        ValidationRule::new("b", "record", "-"),
    ];
    let context = RunContext::new();

    engine
        .validate_input(&json!({"a": 1, "b": 2, "c": 3}), &rules, &context)
        .await
        .unwrap();

    assert_eq!(context.get("seen"), Some(json!([3, 1, 2])));
}

#[tokio::test]
async fn test_is_valid_uses_rule_block() {
    let engine = Engine::new();
    let matches_confirmation = ValueBlock::new(|value, context| {
        async move { Ok(context.get("password").as_ref() == Some(value)) }.boxed()
    });
    let rules = vec![
        ValidationRule::new("confirm", "isValid", "passwords differ").block(matches_confirmation),
        ValidationRule::new("other", "isValid", "no block means failure"),
    ];
    let context = RunContext::new();
    context.insert("password", json!("s3cret"));

    let err = engine
        .validate_input(&json!({"confirm": "s3cret"}), &rules, &context)
        .await
        .unwrap_err();

    assert_eq!(
        failure_pairs(&err),
        vec![("other".to_string(), "no block means failure".to_string())]
    );
}

#[tokio::test]
async fn test_filter_runs_before_validator() {
    let engine = Engine::new();
    let trim = Filter::new(|value| match value {
        Value::String(s) => Value::String(s.trim().to_string()),
        other => other,
    });
    let rules = vec![
        ValidationRule::new("name", "isLength", "3 to 5 characters")
            .options(json!({"min": 3, "max": 5}))
            .filter(trim),
    ];

    let result = engine
        .validate_input(&json!({"name": "   John   "}), &rules, &RunContext::new())
        .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_malformed_rule_fails_fast() {
    let engine = Engine::new();
    let rules = vec![ValidationRule::new("name", "isPresent", "")];

    let err = engine
        .validate_input(&json!({"name": "x"}), &rules, &RunContext::new())
        .await
        .unwrap_err();

    assert!(matches!(err, ValidateError::InvalidRule { index: 0, .. }));
}

#[tokio::test]
async fn test_validate_rule_set() {
    let engine = Engine::new();
    let set = RuleSet::from_value(json!({
        "rules": [
            {"path": "email", "validator": "isEmail", "message": "bad email"},
            {"path": "age", "validator": "isInt", "options": {"min": 0}, "message": "bad age"}
        ]
    }))
    .unwrap();

    let err = engine
        .validate_rule_set(&json!({"email": "a@b.co", "age": -1}), &set, &RunContext::new())
        .await
        .unwrap_err();

    assert_eq!(
        failure_pairs(&err),
        vec![("age".to_string(), "bad age".to_string())]
    );
}

#[tokio::test]
async fn test_check_single_validator() {
    let engine = Engine::new();

    let uuid = json!("550e8400-e29b-41d4-a716-446655440000");
    assert!(engine.check("isUUID", &uuid, &RuleOptions::new()).await.unwrap());
    assert!(!engine.check("isUUID", &json!(7), &RuleOptions::new()).await.unwrap());

    let err = engine
        .check("isFancy", &uuid, &RuleOptions::new())
        .await
        .unwrap_err();
    assert!(matches!(err, ValidateError::UnknownValidator(_)));
}

#[tokio::test]
async fn test_format_validators_reject_wrong_types() {
    let engine = Engine::new();
    let names = [
        "isEmail",
        "isURL",
        "isFQDN",
        "isUUID",
        "isISBN",
        "isISIN",
        "isHexadecimal",
        "isHexColor",
        "isMACAddress",
        "isCreditCard",
        "isDate",
        "isJSON",
        "isBase64",
        "isMongoId",
        "isIP",
        "isUppercase",
        "isLowercase",
        "isAlpha",
        "isAlphanumeric",
        "isNumeric",
        "isAscii",
        "isLength",
        "isByteLength",
    ];

    for name in names {
        for value in [json!(12), json!(true), json!(null), json!([]), json!({})] {
            let passed = engine.check(name, &value, &RuleOptions::new()).await.unwrap();
            assert!(!passed, "{} accepted {}", name, value);
        }
    }
}
