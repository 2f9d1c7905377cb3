//! Notification fan-out engine for the PawHaven platform.
//!
//! On a triggering event (new adoption event, forum admin broadcast, global
//! chat message) the engine resolves the recipient set, composes one message
//! with a push and an in-app projection, and delivers it best-effort through
//! both channels in fixed-size concurrent batches.
//!
//! Entry points live on [`service::BroadcastService`]; everything below it
//! (resolver, composer, dispatcher, coordinator) is exported for reuse and
//! testing.

pub mod composer;
pub mod coordinator;
pub mod dispatcher;
pub mod inbox;
pub mod push;
pub mod resolver;
pub mod service;
