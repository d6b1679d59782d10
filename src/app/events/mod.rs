//! AppIntent- und AppCommand-Enums für den Intent/Command-Datenfluss.

mod command;
mod hit;
mod intent;

pub use command::AppCommand;
pub use hit::{HitTarget, LabelGrip};
pub use intent::AppIntent;
