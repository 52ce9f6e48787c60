//! Core types for the Antelope chain API.

mod network;
mod rpc;
mod table;
mod transaction;

pub use network::Network;
pub use rpc::{NodeError, NodeErrorDetail, NodeErrorInfo, NodeReply, RawCodeAndAbi};
pub use table::{DEFAULT_TABLE_LIMIT, TableByScopeQuery, TableRowsQuery};
pub use transaction::{PackedTransaction, PushOptions, SignedTransaction};
