use crate::error::{AdoptError, ErrorContext};
use colored::Colorize;

pub fn format_error_chain(error: &AdoptError) -> String {
    let context = ErrorContext::new(error);
    context.to_string()
}

/// Format error for display on a terminal, optionally coloured
pub fn format_error_with_color(error: &AdoptError, use_color: bool) -> String {
    colored::control::set_override(use_color);

    let context = ErrorContext::new(error);
    let mut output = String::new();

    output.push_str(&format!("{} {error}\n", "Error:".red().bold()));

    if let Some(details) = &context.details {
        output.push_str(&format!("\n{details}\n"));
    }

    if let Some(suggestion) = &context.suggestion {
        output.push_str(&format!("\n{}\n", "Suggestions:".yellow().bold()));
        for line in suggestion.lines() {
            if !line.trim().is_empty() {
                output.push_str(&format!("{}\n", format!("• {line}").cyan()));
            }
        }
    }

    colored::control::unset_override();
    output
}
