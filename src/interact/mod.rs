//! User interaction seams: confirmations and URL opening

mod confirm;
mod open;

pub use confirm::{is_affirmative, AlwaysNo, AssumeYes, Confirmer, StdinConfirmer};
pub use open::{CommandOpener, NoOpOpener, SystemOpener, UrlOpener};
