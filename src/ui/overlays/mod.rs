//! Popups drawn over the active tab

pub mod protocol_picker;
pub mod toast;
