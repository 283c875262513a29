use anyhow::Context;
use singletonize::config::publish_default_config;
use singletonize::prelude::*;
use std::env;
use tracing_subscriber::EnvFilter;

mod services;

use services::{Clock, EnglishGreeter, Greeter, Mailer, MailTransport, Report};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!("Starting example app...");

    // 1. Configuration: defaults file, then APP__* environment overrides
    let config_dir = env::temp_dir().join("singletonize-example");
    let config_file = publish_default_config(&config_dir).context("publishing default config")?;
    let config = ConfigRepository::empty();
    config
        .load_file(&config_file)
        .context("loading published config")?;
    let config = config.with_env_overrides("APP");

    // 2. Container with the demo types
    let container = ContainerBuilder::new()
        .register_type::<MailTransport>()
        .register_type::<Mailer>()
        .register_type::<Report>()
        .factory("clock", |_, _| Ok(instance(Clock::now())))
        .build();
    container.bind_trait::<dyn Greeter, _>(|_, _| Ok(Arc::new(EnglishGreeter) as Arc<dyn Greeter>));

    let logger = Arc::new(ResolutionLogger::new());
    logger.attach(&container);

    // 3. Application: the provider activates singleton enforcement on boot
    let app = Application::builder()
        .container(container)
        .config(config)
        .provider(SingletonizeServiceProvider)
        .build()
        .context("booting application")?;

    let enforcer = app.make::<SingletonEnforcer>()?;
    tracing::info!(
        enabled = enforcer.policy().enabled,
        strategy = %enforcer.strategy_kind(),
        "Enforcer ready"
    );

    // 4. Zero-parameter resolutions are shared, even for the transient "clock" factory
    let container = app.container();
    let first = app.make::<Mailer>()?;
    let second = app.make::<Mailer>()?;
    tracing::info!(same = Arc::ptr_eq(&first, &second), "Mailer resolved twice");
    tracing::info!(
        same = Arc::ptr_eq(&first.transport, &app.make::<MailTransport>()?),
        "Nested transport shared"
    );

    let clock_a = container.resolve("clock")?;
    let clock_b = container.resolve("clock")?;
    let started_at = clock_a.downcast_ref::<Clock>().map(|clock| clock.started_at);
    tracing::info!(
        same = Arc::ptr_eq(&clock_a, &clock_b),
        started_at = ?started_at,
        "Transient factory enforced"
    );

    // 5. Parameterized resolutions are always fresh
    let params = Parameters::new().with("title", String::from("Quarterly"));
    let report_a = container.make_with::<Report>(&params)?;
    let report_b = container.make_with::<Report>(&params)?;
    tracing::info!(
        title = %report_a.title,
        sender = %report_a.mailer.sender,
        same = Arc::ptr_eq(&report_a, &report_b),
        "Parameterized reports"
    );

    // 6. Forgetting drops the captured singleton
    container.forget_instance(type_key::<Mailer>());
    let third = app.make::<Mailer>()?;
    tracing::info!(same = Arc::ptr_eq(&first, &third), "Mailer after forget");

    let greeter = container.make_trait::<dyn Greeter>()?;
    println!("{}", greeter.greet(&third.sender));

    Ok(())
}
