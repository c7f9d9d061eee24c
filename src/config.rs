use dotenv::dotenv;
use once_cell::sync::Lazy;
use std::env;
use std::net::SocketAddr;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3030";
const DEFAULT_TIMEZONE: &str = "America/New_York";

#[derive(Debug, Clone)]
pub struct MailerConfig {
    pub sendgrid_api_key: Option<String>,
    pub from_address: String,
    pub from_name: String,
    pub bind_addr: SocketAddr,
    pub default_timezone: String,
    pub receipt_base_url: String,
}

impl MailerConfig {
    pub fn from_env() -> MailerConfig {
        dotenv().ok();
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| String::from(DEFAULT_BIND_ADDR));
        let bind_addr = bind_addr.parse().unwrap_or_else(|_| {
            tracing::warn!(bind_addr = %bind_addr, "BIND_ADDR is not a socket address, using default");
            SocketAddr::from(([127, 0, 0, 1], 3030))
        });
        MailerConfig {
            sendgrid_api_key: env::var("SENDGRID_API_KEY").ok().filter(|k| !k.is_empty()),
            from_address: env::var("MAIL_FROM_ADDRESS")
                .unwrap_or_else(|_| String::from("no-reply@rvmail.local")),
            from_name: env::var("MAIL_FROM_NAME").unwrap_or_else(|_| String::from("RV Rentals")),
            bind_addr,
            default_timezone: env::var("DEFAULT_TIMEZONE")
                .unwrap_or_else(|_| String::from(DEFAULT_TIMEZONE)),
            receipt_base_url: env::var("RECEIPT_BASE_URL")
                .unwrap_or_else(|_| String::from("https://example.com"))
                .trim_end_matches('/')
                .to_string(),
        }
    }
}

pub static CONFIG: Lazy<MailerConfig> = Lazy::new(MailerConfig::from_env);
