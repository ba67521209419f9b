pub mod event;
pub mod event_type;
pub mod shift;

pub use event::RawEvent;
pub use event_type::EventType;
pub use shift::ShiftRecord;
