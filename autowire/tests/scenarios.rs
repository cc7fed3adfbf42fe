//! End-to-end resolution scenarios through the public API.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};

use autowire::prelude::*;
use serde_json::json;

static INIT_LOGGER: Once = Once::new();

fn init_test_logger() {
    INIT_LOGGER.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("autowire_container=debug")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

// ── Fixtures ──

struct Logger {
    id: usize,
}

static LOGGERS: AtomicUsize = AtomicUsize::new(0);

impl Injectable for Logger {
    fn construct(_: &mut Arguments) -> Result<Self> {
        Ok(Logger {
            id: LOGGERS.fetch_add(1, Ordering::SeqCst),
        })
    }
}

struct Mailer {
    logger: Arc<Logger>,
    sender: String,
}

impl Injectable for Mailer {
    fn parameters() -> Vec<Parameter> {
        vec![
            Parameter::typed("logger", "Logger"),
            Parameter::named("sender").with_literal_default("noreply@example.com"),
        ]
    }

    fn construct(args: &mut Arguments) -> Result<Self> {
        let logger = args.take()?;
        let sender = args.take::<serde_json::Value>()?;
        Ok(Mailer {
            logger,
            sender: sender.as_str().unwrap_or_default().to_owned(),
        })
    }
}

struct Widget;

impl Injectable for Widget {
    fn construct(_: &mut Arguments) -> Result<Self> {
        Ok(Widget)
    }
}

struct Counter {
    count: serde_json::Value,
}

impl Injectable for Counter {
    fn parameters() -> Vec<Parameter> {
        vec![Parameter::named("count")]
    }

    fn construct(args: &mut Arguments) -> Result<Self> {
        Ok(Counter { count: args.take_cloned()? })
    }
}

/// Submitted to the process-wide catalog instead of a single container.
struct Clock;

impl Injectable for Clock {
    fn class_name() -> String {
        "system.Clock".to_string()
    }

    fn construct(_: &mut Arguments) -> Result<Self> {
        Ok(Clock)
    }
}

autowire::inventory::submit! {
    ClassRegistration::new(ClassDescriptor::of::<Clock>)
}

fn container() -> Container {
    init_test_logger();
    Container::builder()
        .injectable::<Logger>()
        .injectable::<Mailer>()
        .injectable::<Widget>()
        .injectable::<Counter>()
        .build()
        .unwrap()
}

// ── Scenarios ──

#[test]
fn bound_factory_is_shared() {
    let container = container();
    container
        .bind(
            "Logger",
            Definition::factory_of(|_| {
                Ok(Logger {
                    id: LOGGERS.fetch_add(1, Ordering::SeqCst),
                })
            }),
        )
        .unwrap();

    let a = container.get_as::<Logger>("Logger").unwrap();
    let b = container.get_as::<Logger>("Logger").unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(a.id, b.id);
}

#[test]
fn nested_dependency_is_the_shared_instance() {
    let container = container();
    container.bind("Logger", Definition::class("Logger")).unwrap();
    container.bind("Mailer", Definition::class("Mailer")).unwrap();

    let mailer = container.get_as::<Mailer>("Mailer").unwrap();
    let logger = container.get_as::<Logger>("Logger").unwrap();
    assert!(Arc::ptr_eq(&mailer.logger, &logger));
    assert_eq!(mailer.sender, "noreply@example.com");
}

#[test]
fn set_literal_round_trips() {
    let container = container();
    container.set("Config", json!({"debug": true}));

    let config = container.get("Config").unwrap();
    let literal = config.as_literal().unwrap();
    assert_eq!(literal, &json!({"debug": true}));
    assert_eq!(literal["debug"], json!(true));
}

#[test]
fn make_builds_get_caches() {
    let container = container();
    container.bind("X", Definition::class("Widget")).unwrap();

    let made_a = container.make_as::<Widget>("X").unwrap();
    let made_b = container.make_as::<Widget>("X").unwrap();
    assert!(!Arc::ptr_eq(&made_a, &made_b));

    let got_a = container.get_as::<Widget>("X").unwrap();
    let got_b = container.get_as::<Widget>("X").unwrap();
    assert!(Arc::ptr_eq(&got_a, &got_b));
}

#[test]
fn bulk_load_skips_invalid_entry() {
    let container = container();
    let document = ConfigDocument::from_json(json!({
        "shared": {
            "answer": 42,
            "Logger": "Logger",
            "app.config": { "env": "test" }
        },
        "fresh": { "Widget": "Widget" },
        "parameters": { "count": 10 }
    }))
    .unwrap();

    let report = container.load(&document);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].key, "answer");
    assert_eq!(report.loaded, 4);

    assert!(container.get("Logger").is_ok());
    assert!(container.get("app.config").is_ok());
    assert!(container.get("Widget").is_ok());
    assert!(container.get("answer").is_err());
}

#[test]
fn untyped_parameter_without_fallback_fails() {
    let container = container();
    match container.get("Counter") {
        Err(AutowireError::UnresolvableParameter(err)) => {
            assert_eq!(err.parameter, "count");
            assert!(err.to_string().contains("count"));
        }
        other => panic!("Expected UnresolvableParameter, got: {:?}", other.map(|_| ())),
    }

    container.set_parameter("count", 5);
    let counter = container.get_as::<Counter>("Counter").unwrap();
    assert_eq!(counter.count, json!(5));
}

// ── Beyond the basics ──

#[test]
fn fresh_keys_rebuild_their_dependencies() {
    let container = container();
    container.bind_fresh("Logger", Definition::class("Logger")).unwrap();

    let a = container.resolve_as::<Mailer>("Mailer").unwrap();
    let b = container.make_as::<Mailer>("Mailer").unwrap();
    assert_ne!(a.logger.id, b.logger.id);
}

#[test]
fn fresh_factory_key_reached_through_every_path() {
    struct Notifier {
        logger: Arc<Logger>,
    }

    let container = container();
    container.add_class(
        ClassDescriptor::new("Notifier", |args| Ok(Notifier { logger: args.take()? }))
            .param(Parameter::typed("logger", "notify.logger")),
    );
    container
        .bind_fresh(
            "notify.logger",
            Definition::factory_of(|_| {
                Ok(Logger {
                    id: LOGGERS.fetch_add(1, Ordering::SeqCst),
                })
            }),
        )
        .unwrap();

    let a = container.make_as::<Notifier>("Notifier").unwrap();
    let b = container.make_as::<Notifier>("Notifier").unwrap();
    assert_ne!(a.logger.id, b.logger.id);

    let first = container.resolve_as::<Logger>("notify.logger").unwrap();
    let second = container.resolve_as::<Logger>("notify.logger").unwrap();
    assert_ne!(first.id, second.id);

    let registered = container.register("notify.logger", None).unwrap();
    assert!(registered.is::<Logger>());
}

#[test]
fn cycles_fail_fast() {
    let container = container();
    container.add_class(
        ClassDescriptor::new("Chicken", |args| args.take_instance().map(|_| ()))
            .param(Parameter::typed("egg", "Egg")),
    );
    container.add_class(
        ClassDescriptor::new("Egg", |args| args.take_instance().map(|_| ()))
            .param(Parameter::typed("chicken", "Chicken")),
    );

    let err = container.get("Chicken").err().expect("cycle must fail");
    assert!(matches!(err, AutowireError::CircularDependency(_)));
    assert!(err.to_string().contains("Chicken"));
    assert!(container.validate().is_err());
}

#[test]
fn ambient_instance_comes_from_host() {
    struct Request {
        app: Arc<String>,
    }

    let container = Container::builder()
        .class(
            ClassDescriptor::new("Request", |args| Ok(Request { app: args.take()? }))
                .param(Parameter::ambient("app")),
        )
        .host(|| Instance::new(String::from("shop")))
        .build()
        .unwrap();

    let request = container.get_as::<Request>("Request").unwrap();
    assert_eq!(request.app.as_str(), "shop");
}

#[test]
fn global_catalog_classes_are_constructible() {
    let container = container();
    assert!(container.is_class("system.Clock"));
    assert!(container.get("system.Clock").unwrap().is::<Clock>());
}

#[test]
fn suggestions_point_at_close_keys() {
    let container = container();
    match container.get("Mailerr") {
        Err(AutowireError::ServiceNotFound(err)) => {
            assert!(err.suggestions.iter().any(|s| s == "Mailer"));
        }
        other => panic!("Expected ServiceNotFound, got: {:?}", other.map(|_| ())),
    }
}

#[test]
fn file_backed_container() {
    init_test_logger();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "shared": {{ "Mailer": "Mailer" }},
            "interfaces": {{ "LoggerInterface": "Logger" }},
            "parameters": {{ "sender": "ops@example.com" }}
        }}"#
    )
    .unwrap();

    let container = Container::builder()
        .injectable::<Logger>()
        .injectable::<Mailer>()
        .config_file(file.path())
        .build()
        .unwrap();

    let mailer = container.get_as::<Mailer>("Mailer").unwrap();
    assert_eq!(mailer.sender, "noreply@example.com");
    assert!(container.get("LoggerInterface").unwrap().is::<Logger>());
}

#[test]
fn missing_file_fails_the_build() {
    init_test_logger();
    let dir = tempfile::tempdir().unwrap();
    let result = Container::builder()
        .config_file(dir.path().join("absent.json"))
        .build();
    assert!(matches!(result, Err(AutowireError::ConfigFileMissing { .. })));
}
