//! Bounded pagination over row-returning endpoints.

use serde_json::Value;

use crate::error::RpcError;
use crate::types::NodeReply;

/// Hard cap on requests issued by a single full-table read.
pub const MAX_PAGE_REQUESTS: usize = 1000;

/// Progress of one pagination run.
#[derive(Debug, Default)]
struct PageCursor {
    rows: Vec<Value>,
    lower_bound: Option<Value>,
    more: bool,
    requests: usize,
}

/// Fetch pages through `fetch` until the node reports no further rows.
///
/// `url` is the full request URL, used for logging and in
/// [`RpcError::InvalidResponse`].
///
/// - A response without `rows` is returned unchanged as [`NodeReply::Raw`],
///   dropping whatever earlier pages accumulated.
/// - With `full == false` exactly one request is made.
/// - Otherwise `next_key` of each page becomes the `lower_bound` of the next
///   request, verbatim, for at most [`MAX_PAGE_REQUESTS`] requests.
pub(crate) fn paginate<F>(
    url: &str,
    mut payload: Value,
    full: bool,
    mut fetch: F,
) -> Result<NodeReply<Vec<Value>>, RpcError>
where
    F: FnMut(&Value) -> Result<Value, RpcError>,
{
    let mut cursor = PageCursor {
        lower_bound: payload.get("lower_bound").cloned(),
        ..Default::default()
    };

    loop {
        if cursor.requests == MAX_PAGE_REQUESTS {
            return Err(RpcError::TooManyRequests {
                requests: MAX_PAGE_REQUESTS,
            });
        }

        tracing::debug!(
            %url,
            page = cursor.requests + 1,
            lower_bound = ?cursor.lower_bound,
            "fetching page"
        );

        let mut data = fetch(&payload)?;
        cursor.requests += 1;

        let page = match data.get_mut("rows").map(Value::take) {
            Some(Value::Array(page)) => page,
            Some(other) => {
                return Err(RpcError::invalid_response(
                    url,
                    format!("expected 'rows' to be an array, got {other}"),
                ));
            }
            None => return Ok(NodeReply::Raw(data)),
        };
        cursor.rows.extend(page);
        cursor.more = is_truthy(data.get("more"));

        if !full || !cursor.more {
            tracing::debug!(
                %url,
                requests = cursor.requests,
                rows = cursor.rows.len(),
                "pagination finished"
            );
            return Ok(NodeReply::Data(cursor.rows));
        }

        let next_key = data
            .get_mut("next_key")
            .map(Value::take)
            .filter(|key| !key.is_null())
            .ok_or_else(|| {
                RpcError::invalid_response(url, "'more' is set but 'next_key' is missing")
            })?;

        if let Value::Object(map) = &mut payload {
            map.insert("lower_bound".to_string(), next_key.clone());
        }
        cursor.lower_bound = Some(next_key);
    }
}

/// Loose truthiness of the `more` flag. Older nodes send a string key
/// instead of a boolean.
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
    }
}
