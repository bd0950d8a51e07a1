//! # roomhub-mailer
//!
//! Outbound email for RoomHub. Handlers never wait on SMTP: they hand an
//! [`OutboundEmail`](roomhub_core::traits::mailer::OutboundEmail) to the
//! [`MailDispatcher`], which delivers through a bounded worker queue with
//! bounded retries.

pub mod dispatcher;
pub mod transport;

pub use dispatcher::MailDispatcher;
pub use transport::TracingMailer;
