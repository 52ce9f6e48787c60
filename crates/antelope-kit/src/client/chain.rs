//! Chain API calls.
//!
//! Most calls hand back the node's JSON untouched. A few reshape it (decoding
//! base64 or hex fields); those return a [`NodeReply`] so that a structured
//! node error arriving in place of the expected fields is still visible.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Value, json};

use crate::endpoints;
use crate::error::Error;
use crate::types::{
    NodeReply, PushOptions, RawCodeAndAbi, SignedTransaction, TableByScopeQuery, TableRowsQuery,
};

use super::net::Net;
use super::paginate::paginate;

impl Net {
    /// Get general information about the node and its chain.
    pub fn get_info(&self) -> Result<Value, Error> {
        Ok(self.rpc().call(endpoints::GET_INFO, json!({}))?)
    }

    /// Get an account.
    ///
    /// An unknown account is not an error: the node answers with a
    /// structured error body, returned here as data.
    pub fn get_account(&self, account_name: &str) -> Result<Value, Error> {
        Ok(self
            .rpc()
            .call(endpoints::GET_ACCOUNT, json!({ "account_name": account_name }))?)
    }

    /// Get the ABI of a contract account, or `None` if it has none.
    pub fn get_abi(&self, account_name: &str) -> Result<Option<Value>, Error> {
        let data = self
            .rpc()
            .call(endpoints::GET_ABI, json!({ "account_name": account_name }))?;

        // Accounts without a contract come back as just `{"account_name": ...}`.
        if data.as_object().is_some_and(|map| map.len() == 1) {
            return Ok(None);
        }
        Ok(Some(data))
    }

    /// Get a block by number or id.
    ///
    /// ```rust,no_run
    /// # use antelope_kit::*;
    /// # fn example(net: &Net) -> Result<(), Error> {
    /// let by_num = net.get_block(1)?;
    /// let by_id = net.get_block(by_num["id"].as_str().unwrap_or_default())?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn get_block(&self, block_num_or_id: impl Into<Value>) -> Result<Value, Error> {
        Ok(self.rpc().call(
            endpoints::GET_BLOCK,
            json!({ "block_num_or_id": block_num_or_id.into() }),
        )?)
    }

    pub fn get_block_info(&self, block_num: u64) -> Result<Value, Error> {
        Ok(self
            .rpc()
            .call(endpoints::GET_BLOCK_INFO, json!({ "block_num": block_num }))?)
    }

    /// Get the contract code and ABI of an account, decoded from base64.
    pub fn get_raw_code_and_abi(
        &self,
        account_name: &str,
    ) -> Result<NodeReply<RawCodeAndAbi>, Error> {
        let data = self.rpc().call(
            endpoints::GET_RAW_CODE_AND_ABI,
            json!({ "account_name": account_name }),
        )?;

        let decoded = match (
            data.get("wasm").and_then(Value::as_str),
            data.get("abi").and_then(Value::as_str),
        ) {
            (Some(wasm), Some(abi)) => Some((
                STANDARD.decode(wasm).map_err(|e| Error::decode("wasm", e))?,
                STANDARD.decode(abi).map_err(|e| Error::decode("abi", e))?,
            )),
            _ => None,
        };
        let Some((wasm, abi)) = decoded else {
            return Ok(NodeReply::Raw(data));
        };

        let account_name = data
            .get("account_name")
            .and_then(Value::as_str)
            .unwrap_or(account_name)
            .to_string();
        Ok(NodeReply::Data(RawCodeAndAbi {
            account_name,
            wasm,
            abi,
        }))
    }

    /// Serialize action arguments with the contract's ABI.
    ///
    /// The endpoint was removed from recent node releases.
    pub fn abi_json_to_bin(
        &self,
        code: &str,
        action: &str,
        args: &Value,
    ) -> Result<NodeReply<Vec<u8>>, Error> {
        tracing::warn!(
            endpoint = endpoints::ABI_JSON_TO_BIN,
            "endpoint is deprecated and may be missing on newer nodes"
        );
        let data = self.rpc().call(
            endpoints::ABI_JSON_TO_BIN,
            json!({ "code": code, "action": action, "args": args }),
        )?;

        let binargs = data
            .get("binargs")
            .and_then(Value::as_str)
            .map(hex::decode)
            .transpose()
            .map_err(|e| Error::decode("binargs", e))?;
        Ok(match binargs {
            Some(binargs) => NodeReply::Data(binargs),
            None => NodeReply::Raw(data),
        })
    }

    /// Deserialize action arguments with the contract's ABI.
    ///
    /// The endpoint was removed from recent node releases.
    pub fn abi_bin_to_json(
        &self,
        code: &str,
        action: &str,
        binargs: &[u8],
    ) -> Result<NodeReply<Value>, Error> {
        tracing::warn!(
            endpoint = endpoints::ABI_BIN_TO_JSON,
            "endpoint is deprecated and may be missing on newer nodes"
        );
        let mut data = self.rpc().call(
            endpoints::ABI_BIN_TO_JSON,
            json!({ "code": code, "action": action, "binargs": hex::encode(binargs) }),
        )?;

        Ok(match data.as_object_mut().and_then(|map| map.remove("args")) {
            Some(args) => NodeReply::Data(args),
            None => NodeReply::Raw(data),
        })
    }

    /// List the scopes of a contract's tables.
    pub fn get_table_by_scope(&self, query: &TableByScopeQuery) -> Result<Value, Error> {
        Ok(self
            .rpc()
            .call(endpoints::GET_TABLE_BY_SCOPE, query.to_payload())?)
    }

    /// Read rows from a contract table.
    ///
    /// With `full == false` a single page of at most `query.limit` rows is
    /// returned. With `full == true` pages are fetched until the node reports
    /// no more rows, following `next_key`; a read that has not finished after
    /// [`MAX_PAGE_REQUESTS`](crate::MAX_PAGE_REQUESTS) requests fails with
    /// [`RpcError::TooManyRequests`](crate::RpcError::TooManyRequests).
    ///
    /// A response without `rows` (unknown table, account without contract)
    /// is returned as [`NodeReply::Raw`].
    ///
    /// ```rust,no_run
    /// # use antelope_kit::*;
    /// # fn example(net: &Net) -> Result<(), Error> {
    /// let query = TableRowsQuery::new("eosio.token", "accounts", "alice").limit(100);
    /// match net.get_table_rows(&query, true)? {
    ///     NodeReply::Data(rows) => println!("{} balances", rows.len()),
    ///     NodeReply::Raw(body) => println!("node error: {body}"),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn get_table_rows(
        &self,
        query: &TableRowsQuery,
        full: bool,
    ) -> Result<NodeReply<Vec<Value>>, Error> {
        let url = self.rpc().url_for(endpoints::GET_TABLE_ROWS)?;
        Ok(paginate(
            url.as_str(),
            query.to_payload(),
            full,
            |payload| self.rpc().call(endpoints::GET_TABLE_ROWS, payload.clone()),
        )?)
    }

    /// Submit a signed transaction.
    pub fn push_transaction<T>(&self, transaction: &T, options: &PushOptions) -> Result<Value, Error>
    where
        T: SignedTransaction + ?Sized,
    {
        let payload = json!({
            "signatures": transaction.signatures(),
            "compression": options.compression,
            "packed_context_free_data": options.packed_context_free_data,
            "packed_trx": hex::encode(transaction.pack()),
        });
        Ok(self.rpc().call(endpoints::PUSH_TRANSACTION, payload)?)
    }
}
