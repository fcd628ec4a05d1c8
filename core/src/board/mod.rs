pub mod layout;
pub mod lifecycle;
pub mod reconciler;
pub mod urgency;
