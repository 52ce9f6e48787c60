//! Chain API endpoint paths.
//!
//! Paths start with `/`, so joining them onto a host replaces whatever path
//! the host carried.

pub const GET_INFO: &str = "/v1/chain/get_info";
pub const GET_ACCOUNT: &str = "/v1/chain/get_account";
pub const GET_ABI: &str = "/v1/chain/get_abi";
pub const GET_BLOCK: &str = "/v1/chain/get_block";
pub const GET_BLOCK_INFO: &str = "/v1/chain/get_block_info";
pub const GET_RAW_CODE_AND_ABI: &str = "/v1/chain/get_raw_code_and_abi";
/// Removed from recent node releases.
pub const ABI_JSON_TO_BIN: &str = "/v1/chain/abi_json_to_bin";
/// Removed from recent node releases.
pub const ABI_BIN_TO_JSON: &str = "/v1/chain/abi_bin_to_json";
pub const GET_TABLE_BY_SCOPE: &str = "/v1/chain/get_table_by_scope";
pub const GET_TABLE_ROWS: &str = "/v1/chain/get_table_rows";
pub const PUSH_TRANSACTION: &str = "/v1/chain/push_transaction";
