//! Notification sink — emails the eligibility summary to the user.
//!
//! SMTP via lettre with STARTTLS. A send failure is returned to the
//! controller, which logs it and leaves the reply and session untouched.

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use secrecy::ExposeSecret;

use crate::config::EmailConfig;
use crate::error::NotifyError;
use crate::intake::session::Profile;

const SUBJECT: &str = "Your Government Welfare Scheme Eligibility Results";

#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn send(&self, profile: &Profile, schemes: &[String]) -> Result<(), NotifyError>;
}

/// SMTP notifier.
pub struct EmailNotifier {
    config: EmailConfig,
}

impl EmailNotifier {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    fn build_message(&self, profile: &Profile, schemes: &[String]) -> Result<Message, NotifyError> {
        let from: Mailbox = self.config.from_address.parse()?;
        let to: Mailbox = profile.email.parse()?;

        Ok(Message::builder()
            .from(from.clone())
            .reply_to(from)
            .to(to)
            .subject(SUBJECT)
            .multipart(MultiPart::alternative_plain_html(
                render_text_body(profile, schemes),
                render_html_body(profile, schemes),
            ))?)
    }
}

#[async_trait]
impl NotificationSink for EmailNotifier {
    async fn send(&self, profile: &Profile, schemes: &[String]) -> Result<(), NotifyError> {
        let message = self.build_message(profile, schemes)?;

        let credentials = Credentials::new(
            self.config.username.clone(),
            self.config.password.expose_secret().to_string(),
        );
        let transport = SmtpTransport::starttls_relay(&self.config.smtp_host)?
            .port(self.config.smtp_port)
            .credentials(credentials)
            .build();

        transport.send(&message)?;
        tracing::info!(to = %profile.email, "Eligibility email sent");
        Ok(())
    }
}

/// Plain-text body.
pub fn render_text_body(profile: &Profile, schemes: &[String]) -> String {
    let schemes_text = if schemes.is_empty() {
        "• No specific schemes identified".to_string()
    } else {
        schemes
            .iter()
            .map(|s| format!("• {s}"))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "Dear {name},\n\n\
         Thank you for using our Government Welfare Scheme Assistant!\n\n\
         Based on your information:\n\
         - Age: {age} years\n\
         - Annual Income: ₹{income}\n\
         - State: {state}\n\
         - Phone: {phone}\n\n\
         You may be eligible for the following government welfare schemes:\n\
         {schemes_text}\n\n\
         Please visit your nearest government office or the respective scheme website \
         for detailed information and application procedures.\n\n\
         For more information about specific schemes, you can:\n\
         1. Visit the official government websites\n\
         2. Contact your local government offices\n\
         3. Use our chat assistant for more details\n\n\
         Best regards,\n\
         Government Welfare Scheme Assistant",
        name = profile.name,
        age = profile.age,
        income = profile.income,
        state = profile.state_name,
        phone = profile.phone,
    )
}

/// HTML body, mirroring the plain-text content.
pub fn render_html_body(profile: &Profile, schemes: &[String]) -> String {
    let scheme_items: String = if schemes.is_empty() {
        "<li>No specific schemes identified</li>".to_string()
    } else {
        schemes
            .iter()
            .map(|s| format!("<li>{s}</li>"))
            .collect()
    };

    format!(
        "<html>\n\
         <body style=\"font-family: Arial, sans-serif; line-height: 1.6; color: #333;\">\n\
         <h2 style=\"color: #2c5aa0;\">{SUBJECT}</h2>\n\
         <p>Dear <strong>{name}</strong>,</p>\n\
         <p>Thank you for using our Government Welfare Scheme Assistant!</p>\n\
         <h3>Your Information:</h3>\n\
         <ul>\n\
         <li><strong>Age:</strong> {age} years</li>\n\
         <li><strong>Annual Income:</strong> ₹{income}</li>\n\
         <li><strong>State:</strong> {state}</li>\n\
         <li><strong>Phone:</strong> {phone}</li>\n\
         </ul>\n\
         <h3>You may be eligible for the following government welfare schemes:</h3>\n\
         <ul>{scheme_items}</ul>\n\
         <p>Please visit your nearest government office or the respective scheme website \
         for detailed information and application procedures.</p>\n\
         <h3>For more information about specific schemes, you can:</h3>\n\
         <ol>\n\
         <li>Visit the official government websites</li>\n\
         <li>Contact your local government offices</li>\n\
         <li>Use our chat assistant for more details</li>\n\
         </ol>\n\
         <p>Best regards,<br>\n\
         <strong>Government Welfare Scheme Assistant</strong></p>\n\
         </body>\n\
         </html>",
        name = profile.name,
        age = profile.age,
        income = profile.income,
        state = profile.state_name,
        phone = profile.phone,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn test_profile() -> Profile {
        Profile {
            name: "Priya".to_string(),
            age: 30,
            income: 300000.0,
            state_name: "Maharashtra".to_string(),
            phone: "9876543210".to_string(),
            email: "priya@example.com".to_string(),
        }
    }

    fn test_config() -> EmailConfig {
        EmailConfig {
            smtp_host: "smtp.test.com".to_string(),
            smtp_port: 587,
            username: "bot@test.com".to_string(),
            password: SecretString::from("secret"),
            from_address: "bot@test.com".to_string(),
        }
    }

    #[test]
    fn text_body_lists_profile_and_schemes() {
        let schemes = vec!["Ayushman Bharat".to_string(), "PM Awas Yojana".to_string()];
        let body = render_text_body(&test_profile(), &schemes);
        assert!(body.contains("Dear Priya,"));
        assert!(body.contains("Age: 30 years"));
        assert!(body.contains("₹300000"));
        assert!(body.contains("Maharashtra"));
        assert!(body.contains("9876543210"));
        assert!(body.contains("• Ayushman Bharat"));
        assert!(body.contains("• PM Awas Yojana"));
    }

    #[test]
    fn html_body_mirrors_text_content() {
        let schemes = vec!["PM Kisan".to_string()];
        let html = render_html_body(&test_profile(), &schemes);
        assert!(html.contains("<strong>Priya</strong>"));
        assert!(html.contains("<li>PM Kisan</li>"));
        assert!(html.contains("<li><strong>State:</strong> Maharashtra</li>"));
    }

    #[test]
    fn empty_scheme_list_still_renders() {
        let body = render_text_body(&test_profile(), &[]);
        assert!(body.contains("No specific schemes identified"));
        let html = render_html_body(&test_profile(), &[]);
        assert!(html.contains("<li>No specific schemes identified</li>"));
    }

    #[test]
    fn message_builds_with_both_parts() {
        let notifier = EmailNotifier::new(test_config());
        let message = notifier.build_message(&test_profile(), &["PM Kisan".to_string()]);
        assert!(message.is_ok());
    }

    #[test]
    fn message_build_fails_on_bad_address() {
        let notifier = EmailNotifier::new(test_config());
        let mut profile = test_profile();
        profile.email = "not an address".to_string();
        assert!(notifier.build_message(&profile, &[]).is_err());
    }
}
