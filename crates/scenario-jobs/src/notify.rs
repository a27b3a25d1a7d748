use std::path::{Path, PathBuf};

use lettre::message::{header::ContentType, Attachment, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::{info, warn};

/// SMTP settings read from the environment. Absent when `SMTP_HOST` is
/// unset — callers treat `None` as "notification disabled", never an error.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub from_address: String,
}

impl SmtpConfig {
    /// `None` unless `SMTP_HOST`, `SMTP_USER`, and `SMTP_PASSWORD` are all
    /// set to a non-blank value — a host with no credentials is not
    /// "configured", it just fails every send.
    pub fn from_env() -> Option<Self> {
        let host = non_blank_env("SMTP_HOST")?;
        let user = non_blank_env("SMTP_USER")?;
        let password = non_blank_env("SMTP_PASSWORD")?;
        Some(SmtpConfig {
            host,
            port: std::env::var("SMTP_PORT").ok().and_then(|p| p.parse().ok()).unwrap_or(587),
            user,
            password,
            from_address: std::env::var("SMTP_FROM").unwrap_or_else(|_| "noreply@localhost".to_string()),
        })
    }
}

fn non_blank_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Sends a completion email with a textual summary and whichever of the six
/// result artifacts are present on disk, as attachments. Every failure path
/// here is logged and swallowed — a notification error is never allowed to
/// flip a completed job back to failed.
pub fn notify_completion(
    config: &SmtpConfig,
    to_address: &str,
    scenario_name: &str,
    summary: &str,
    artifact_paths: &[PathBuf],
) {
    let message = match build_message(config, to_address, scenario_name, summary, artifact_paths) {
        Ok(message) => message,
        Err(e) => {
            warn!(error = %e, "failed to build completion email, skipping notification");
            return;
        }
    };
    send(config, message);
}

fn build_message(
    config: &SmtpConfig,
    to_address: &str,
    scenario_name: &str,
    summary: &str,
    artifact_paths: &[PathBuf],
) -> Result<Message, Box<dyn std::error::Error>> {
    let mut multipart = MultiPart::mixed()
        .singlepart(SinglePart::builder().header(ContentType::TEXT_PLAIN).body(summary.to_string()));

    for path in artifact_paths {
        match std::fs::read(path) {
            Ok(bytes) => {
                let filename = path.file_name().and_then(|n| n.to_str()).unwrap_or("attachment").to_string();
                multipart = multipart.singlepart(Attachment::new(filename).body(bytes, guess_content_type(path)));
            }
            Err(e) => warn!(path = %path.display(), error = %e, "artifact missing, omitting from email"),
        }
    }

    let message = Message::builder()
        .from(config.from_address.parse()?)
        .to(to_address.parse()?)
        .subject(format!("Scenario results: {scenario_name}"))
        .multipart(multipart)?;
    Ok(message)
}

fn guess_content_type(path: &Path) -> ContentType {
    match path.extension().and_then(|e| e.to_str()) {
        Some("png") => ContentType::parse("image/png").unwrap_or(ContentType::TEXT_PLAIN),
        Some("json") => ContentType::parse("application/json").unwrap_or(ContentType::TEXT_PLAIN),
        _ => ContentType::TEXT_PLAIN,
    }
}

fn send(config: &SmtpConfig, message: Message) {
    let creds = Credentials::new(config.user.clone(), config.password.clone());
    let transport = match SmtpTransport::relay(&config.host) {
        Ok(builder) => builder.port(config.port).credentials(creds).build(),
        Err(e) => {
            warn!(error = %e, "failed to construct smtp transport, skipping notification");
            return;
        }
    };
    match transport.send(&message) {
        Ok(_) => info!("sent scenario completion email"),
        Err(e) => warn!(error = %e, "failed to send scenario completion email"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_smtp_host_disables_notification() {
        std::env::remove_var("SMTP_HOST");
        std::env::remove_var("SMTP_USER");
        std::env::remove_var("SMTP_PASSWORD");
        assert!(SmtpConfig::from_env().is_none());
    }

    #[test]
    fn host_without_credentials_does_not_count_as_configured() {
        std::env::set_var("SMTP_HOST", "smtp.example.com");
        std::env::remove_var("SMTP_USER");
        std::env::remove_var("SMTP_PASSWORD");
        assert!(SmtpConfig::from_env().is_none());
        std::env::remove_var("SMTP_HOST");
    }

    #[test]
    fn host_user_and_password_together_are_configured() {
        std::env::set_var("SMTP_HOST", "smtp.example.com");
        std::env::set_var("SMTP_USER", "bot");
        std::env::set_var("SMTP_PASSWORD", "secret");
        assert!(SmtpConfig::from_env().is_some());
        std::env::remove_var("SMTP_HOST");
        std::env::remove_var("SMTP_USER");
        std::env::remove_var("SMTP_PASSWORD");
    }
}
