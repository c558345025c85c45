//! Alert messages for surfacing errors to the user.
//!
//! Alerts are rendered into the `#alert-container` element via HTMX response
//! targets and can be dismissed by clicking them.

use maud::{Markup, html};

/// Renders an error alert with a headline and optional details.
#[derive(Debug, Clone)]
pub struct AlertTemplate<'a> {
    message: &'a str,
    details: &'a str,
}

impl<'a> AlertTemplate<'a> {
    /// Create a new error alert
    pub fn error(message: &'a str, details: &'a str) -> Self {
        Self { message, details }
    }
}

impl maud::Render for AlertTemplate<'_> {
    fn render(&self) -> Markup {
        html!(
            div
                class="flex flex-col p-4 mb-4 text-sm rounded-lg shadow \
                    text-red-800 bg-red-50 dark:bg-gray-800 dark:text-red-400"
                role="alert"
                onclick="this.parentElement.classList.add('hidden'); this.remove();"
            {
                span class="font-medium" { (self.message) }

                @if !self.details.is_empty() {
                    span { (self.details) }
                }
            }
        )
    }
}
