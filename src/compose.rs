//! Invitation text composition.

pub mod invitation;
pub mod text;

pub use invitation::{InvitationComposer, InvitationKind};
pub use text::{join_list, wrap_paragraphs, LINE_WIDTH};
