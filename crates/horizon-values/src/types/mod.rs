//! Value types with a textual form.

mod brush;
mod color;
mod color_tables;
mod command;
mod date_time;
mod grid_length;
mod key;
mod key_gesture;
mod known_color;
mod modifier_keys;

pub use brush::Brush;
pub use color::Color;
pub use color_tables::{
    ColorConstants, ColorTables, ColorTablesBuilder, NamedColorTable, NamedConstants, SystemColors,
    WebColors,
};
pub use command::{Command, CommandTable};
pub use date_time::{DateTimeKind, DateTimeValue};
pub use grid_length::{GridLength, GridUnitType};
pub use key::Key;
pub use key_gesture::KeyGesture;
pub use known_color::KnownColor;
pub use modifier_keys::ModifierKeys;
