//! Canned assistant replies for the intake flow.

use super::field::Field;

/// Greeting — also the re-prompt when a name is rejected.
pub const GREETING: &str = "Hello! I'm here to help you find government welfare schemes \
     you may be eligible for. What is your name?";

/// Fixed post-completion reply when the user asks for scheme details.
pub const SCHEME_DETAILS: &str = "I can provide more details about specific schemes. \
     Please mention which scheme you'd like to know more about.";

/// Fixed post-completion reply for anything else.
pub const ALREADY_ASSESSED: &str = "I've already assessed your eligibility. Check your email \
     for detailed results, or start over with different information?";

/// Generic reply when message processing fails internally.
pub const APOLOGY: &str = "Sorry, I encountered an error. Please try again.";

/// The question asked once `field` becomes the one being collected.
pub fn field_prompt(field: Field) -> &'static str {
    match field {
        Field::Name => GREETING,
        Field::Age => "What is your age?",
        Field::Income => "What is your annual income (in rupees)?",
        Field::State => "Which state do you live in?",
        Field::Phone => "What is your phone number?",
        Field::Email => "What is your email address?",
        Field::Complete => ALREADY_ASSESSED,
    }
}

/// The help message emitted when `field`'s validator rejects the input.
pub fn rejection_prompt(field: Field) -> &'static str {
    match field {
        Field::Name => GREETING,
        Field::Age => "Please provide a valid age (numbers only, between 1-120).",
        Field::Income => "Please provide a valid annual income (numbers only, e.g., 120000).",
        Field::State => "Please provide a valid state name.",
        Field::Phone => "Please provide a valid phone number (10 digits, e.g., 9876543210).",
        Field::Email => "Please provide a valid email address (e.g., user@example.com).",
        Field::Complete => ALREADY_ASSESSED,
    }
}

/// The final summary emitted on the completion transition.
pub fn completion_summary(schemes: &[String]) -> String {
    let schemes_text = if schemes.is_empty() {
        "No specific schemes identified".to_string()
    } else {
        schemes
            .iter()
            .map(|s| format!("• {s}"))
            .collect::<Vec<_>>()
            .join("\n")
    };
    format!(
        "Based on your details, you may be eligible for:\n{schemes_text}\n\n\
         You will receive a detailed email with your eligibility results."
    )
}
