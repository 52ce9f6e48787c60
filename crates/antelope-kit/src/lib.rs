//! A small, synchronous client for the chain API of Antelope nodes
//! (EOS, WAX, Telos, Proton and friends).
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use antelope_kit::*;
//!
//! fn main() -> Result<(), antelope_kit::Error> {
//!     let net = Net::builder(Network::WaxMainnet).build()?;
//!
//!     let info = net.get_info()?;
//!     println!("chain id: {}", info["chain_id"]);
//!
//!     let query = TableRowsQuery::new("eosio.token", "stat", "WAX");
//!     if let NodeReply::Data(rows) = net.get_table_rows(&query, false)? {
//!         println!("supply: {}", rows[0]["supply"]);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Design Principles
//!
//! 1. **One round trip per call**: no retries or backoff; resilience is the caller's job
//! 2. **Node errors are data**: HTTP 500 bodies come back as JSON, everything else
//!    unexpected is an [`RpcError`]
//! 3. **Explicit connection lifetime**: reuse a connection with [`Net::open`];
//!    a closed client fails loudly instead of reconnecting
//! 4. **Bounded pagination**: full table reads stop after [`MAX_PAGE_REQUESTS`]
//!
//! # Configuration
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use antelope_kit::*;
//!
//! # fn example() -> Result<(), Error> {
//! // From ANTELOPE_NETWORK, ANTELOPE_RPC_USER, ANTELOPE_RPC_PASSWORD,
//! // ANTELOPE_RPC_TIMEOUT_SECS
//! let net = Net::from_env()?;
//!
//! // Or explicitly
//! let net = Net::custom("https://eos.example.com")
//!     .header("x-api-key", "secret")
//!     .timeout(Duration::from_secs(5))
//!     .build()?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod endpoints;
pub mod error;
pub mod transport;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{Error, ParseNetworkError, RpcError, TransportError};
pub use types::*;

pub use transport::{
    BasicAuth, Connector, HttpConnector, HttpRequest, HttpResponse, HttpTransport, Transport,
};

pub use client::{MAX_PAGE_REQUESTS, Net, NetBuilder, RpcClient, Session, USER_AGENT};
