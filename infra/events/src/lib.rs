//! # Event Bus
//!
//! Typed in-process fan-out channels shared by the HR Hub slices.
//!
//! Events are identified by their Rust type. Every subscriber of a type receives every event of
//! that type published after it subscribed; publishing with no subscribers is not an error.
//!
//! # Example
//!
//! ```rust
//! use hrhub_event_bus::{EventBus, EventBusError, EventReceiverExt};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct SectionRelinked { section: String }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), EventBusError> {
//!     let bus = EventBus::new();
//!
//!     let mut rx = bus.subscribe::<SectionRelinked>()?;
//!     bus.publish(SectionRelinked { section: "payroll".into() })?;
//!
//!     if let Some(event) = rx.recv_event().await {
//!         assert_eq!(event.section, "payroll");
//!     }
//!     Ok(())
//! }
//! ```

mod bus;
mod error;
mod receiver;

pub use bus::{Event, EventBus};
pub use error::{EventBusError, EventBusErrorExt};
pub use receiver::EventReceiverExt;
