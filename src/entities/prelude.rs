pub use super::lines::Entity as Lines;
pub use super::lists::Entity as Lists;
pub use super::sequence_items::Entity as SequenceItems;
pub use super::sequences::Entity as Sequences;
