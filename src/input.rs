//! Résumé and booth-contact ingestion.

pub mod contacts;
pub mod resume;

pub use contacts::{find_booth_contacts, read_booth_emails, BoothContact, BoothList};
pub use resume::{duplicate_emails, read_resume_dir, DuplicateEmail, Resume, ResumeId};
