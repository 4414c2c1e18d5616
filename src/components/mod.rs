//! UIコンポーネントモジュール

pub mod detail_modal;
pub mod edit_modal;
pub mod player_card;

pub use detail_modal::DetailModal;
pub use edit_modal::EditModal;
pub use player_card::PlayerCard;
