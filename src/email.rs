//! Email drafts: fixed boilerplate around the composed invitation.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Embedded default boilerplate.
pub const EMAIL_YAML: &str = include_str!("templates/email.yaml");

/// Boilerplate sections of an outreach email.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailTemplate {
    /// `From:` header value.
    pub from: String,
    /// `Reply-to:` header value.
    pub reply_to: String,
    /// `Subject:` header value.
    pub subject: String,
    /// Program name used in the invitation headline.
    pub program: String,
    /// Greeting for people we have not met in person.
    pub greeting: String,
    /// Greeting for people who stopped by the booth.
    pub booth_greeting: String,
    /// General program information.
    pub general_info: String,
    /// Closing and signature.
    pub closing: String,
}

impl EmailTemplate {
    /// Loads the template compiled into the binary.
    pub fn embedded() -> Result<Self> {
        Self::from_yaml(EMAIL_YAML).context("Failed to load embedded email template")
    }

    /// Parses a template from YAML text.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse email template YAML")
    }

    /// Loads a template from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).with_context(|| {
            format!("Failed to read email template: {}", path.as_ref().display())
        })?;
        Self::from_yaml(&content)
            .with_context(|| format!("Invalid email template: {}", path.as_ref().display()))
    }

    /// Loads `path` when given, the embedded template otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Self::embedded(),
        }
    }

    fn header(&self, to: &str) -> String {
        format!(
            "From: {}\nTo: {to}\nReply-to: {}\nSubject: {}\n",
            self.from, self.reply_to, self.subject
        )
    }

    /// Full email carrying a composed invitation. Every extracted address
    /// is listed as a recipient; at-booth visitors get the booth greeting.
    pub fn assemble(&self, recipients: &[String], at_booth: bool, invitation: &str) -> String {
        let greeting = if at_booth {
            self.booth_greeting.as_str()
        } else {
            self.greeting.as_str()
        };

        render(
            &self.header(&recipients.join(", ")),
            &[
                greeting,
                self.general_info.as_str(),
                invitation,
                self.closing.as_str(),
            ],
        )
    }

    /// Email without an invitation paragraph, sent to the canonical address.
    pub fn generic(&self, recipient: Option<&str>) -> String {
        render(
            &self.header(recipient.unwrap_or("")),
            &[
                self.greeting.as_str(),
                self.general_info.as_str(),
                self.closing.as_str(),
            ],
        )
    }
}

/// Header, then every non-empty section separated by a blank line.
fn render(header: &str, sections: &[&str]) -> String {
    let body = sections
        .iter()
        .map(|section| section.trim_end())
        .filter(|section| !section.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");
    format!("{header}\n{body}\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template() -> EmailTemplate {
        EmailTemplate {
            from: "Coordinator <c@example.org>".to_string(),
            reply_to: "admins@example.org".to_string(),
            subject: "Internships".to_string(),
            program: "Outreachy".to_string(),
            greeting: "Hello!\n".to_string(),
            booth_greeting: "Nice to meet you!\n".to_string(),
            general_info: "Programs are open.\n\n".to_string(),
            closing: "Thanks\n".to_string(),
        }
    }

    #[test]
    fn embedded_template_loads() {
        let template = EmailTemplate::embedded().unwrap();
        assert_eq!(template.program, "Outreachy");
        assert!(template.greeting.starts_with("Greetings!"));
        assert!(template
            .general_info
            .contains("Outreachy's application process runs from Feb 16 to Mar 30."));
        assert!(template
            .general_info
            .contains("Outreachy also requires applicants to make project contributions."));
    }

    #[test]
    fn assemble_lists_all_recipients() {
        let email = template().assemble(
            &["a@example.com".to_string(), "b@example.com".to_string()],
            false,
            "You fit.",
        );
        assert_eq!(
            email,
            "From: Coordinator <c@example.org>\n\
             To: a@example.com, b@example.com\n\
             Reply-to: admins@example.org\n\
             Subject: Internships\n\
             \n\
             Hello!\n\
             \n\
             Programs are open.\n\
             \n\
             You fit.\n\
             \n\
             Thanks\n"
        );
    }

    #[test]
    fn booth_visitors_get_booth_greeting() {
        let email = template().assemble(&[], true, "You fit.");
        assert!(email.contains("Nice to meet you!"));
        assert!(!email.contains("Hello!"));
        assert!(email.contains("To: \n"));
    }

    #[test]
    fn generic_email_has_no_invitation() {
        let email = template().generic(None);
        assert_eq!(
            email,
            "From: Coordinator <c@example.org>\n\
             To: \n\
             Reply-to: admins@example.org\n\
             Subject: Internships\n\
             \n\
             Hello!\n\
             \n\
             Programs are open.\n\
             \n\
             Thanks\n"
        );
    }
}
