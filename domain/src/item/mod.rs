//! Test-item domain
//!
//! An [`Item`](entities::Item) is one educational test question: content,
//! kind, answer, and an open attribute map (options for multiple choice,
//! difficulty tags, ...). Items are created by the generator or supplied
//! from a prior bank, and are immutable once scored within a run.

pub mod bank;
pub mod entities;
pub mod parsing;

pub use bank::{ItemBank, ItemBanks};
pub use entities::{Item, ItemId, ItemKind};
pub use parsing::{parse_item_batch, ItemParseError};
