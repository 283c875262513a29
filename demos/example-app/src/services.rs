use singletonize::prelude::*;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Constructable)]
pub struct MailTransport;

#[derive(Constructable)]
pub struct Mailer {
    pub transport: Arc<MailTransport>,
    #[inject(default = String::from("noreply@example.com"))]
    pub sender: String,
}

#[derive(Constructable)]
pub struct Report {
    pub mailer: Arc<Mailer>,
    pub title: String,
}

pub struct Clock {
    pub started_at: u128,
}

impl Clock {
    pub fn now() -> Self {
        let started_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis())
            .unwrap_or_default();
        Self { started_at }
    }
}

pub trait Greeter: Send + Sync {
    fn greet(&self, name: &str) -> String;
}

pub struct EnglishGreeter;

impl Greeter for EnglishGreeter {
    fn greet(&self, name: &str) -> String {
        format!("Hello, {}!", name)
    }
}
