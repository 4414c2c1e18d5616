//! ビューモジュール

pub mod roster;
pub mod settings;

pub use roster::RosterView;
pub use settings::SettingsPanel;
