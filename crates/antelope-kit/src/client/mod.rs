//! Client module for talking to an Antelope node.
//!
//! - [`Net`]: The main client, carrying every chain API call
//! - [`NetBuilder`]: Fluent builder for configuring the client
//! - [`Session`]: Scoped connection reuse, released on drop
//! - [`RpcClient`]: Low-level executor: one POST per call, no retries
//!
//! # Connections
//!
//! | Configuration | Connection per call | Closed by the client |
//! |---------------|---------------------|----------------------|
//! | default | fresh | after each call |
//! | [`NetBuilder::transport`] | the caller's | never |
//! | inside [`Net::open`] | one per session | when the session ends |

mod chain;
mod net;
mod paginate;
mod rpc;
mod session;

pub use net::{Net, NetBuilder, Session};
pub use paginate::MAX_PAGE_REQUESTS;
pub use rpc::{RpcClient, USER_AGENT};
