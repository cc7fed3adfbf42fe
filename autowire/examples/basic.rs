//! Wires a small mail service and prints what the container built.
//!
//! Run with `RUST_LOG=autowire_container=debug` to watch resolution.

use std::sync::Arc;

use autowire::prelude::*;
use serde_json::json;
use tracing_subscriber::EnvFilter;

struct Logger;

impl Injectable for Logger {
    fn construct(_: &mut Arguments) -> Result<Self> {
        Ok(Logger)
    }
}

struct SmtpTransport {
    host: String,
}

impl Injectable for SmtpTransport {
    fn parameters() -> Vec<Parameter> {
        vec![Parameter::named("smtp_host")]
    }

    fn construct(args: &mut Arguments) -> Result<Self> {
        let host = args.take::<serde_json::Value>()?;
        Ok(SmtpTransport {
            host: host.as_str().unwrap_or("localhost").to_owned(),
        })
    }
}

struct Mailer {
    logger: Arc<Logger>,
    transport: Arc<SmtpTransport>,
}

impl Injectable for Mailer {
    fn parameters() -> Vec<Parameter> {
        vec![
            Parameter::typed("logger", "Logger"),
            Parameter::typed("transport", "Transport"),
        ]
    }

    fn construct(args: &mut Arguments) -> Result<Self> {
        Ok(Mailer {
            logger: args.take()?,
            transport: args.take()?,
        })
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let document = ConfigDocument::from_json(json!({
        "shared": { "Mailer": "Mailer", "answer": 42 },
        "interfaces": { "Transport": "SmtpTransport" },
        "parameters": { "smtp_host": "mail.example.com" }
    }))?;

    let container = Container::builder()
        .injectable::<Logger>()
        .injectable::<SmtpTransport>()
        .injectable::<Mailer>()
        .document(document)
        .build()?;

    let mailer = container.get_as::<Mailer>("Mailer")?;
    let logger = container.get_as::<Logger>("Logger")?;
    println!("transport host: {}", mailer.transport.host);
    println!("shared logger:  {}", Arc::ptr_eq(&mailer.logger, &logger));
    println!("container:      {container:?}");

    if let Err(err) = container.get("Mailr") {
        println!("\n{err}");
    }

    Ok(())
}
