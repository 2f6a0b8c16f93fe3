//! Address operations: create, get, delete and list.
//!
//! Each operation is a `build_*` step producing an `HttpRequest` and a
//! `parse_*` step consuming the classified `HttpResponse`. The plain
//! methods (`create`, `get`, ...) run both around `LobClient::execute`.

use serde_json::Value;

use crate::client::LobClient;
use crate::error::{Error, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Address, AddressList, AddressRequest, DeleteResponse};

const COLLECTION: &str = "addresses";

/// Page size used when the requested limit is outside `MIN_LIMIT..=MAX_LIMIT`.
pub const DEFAULT_LIMIT: i64 = 10;
pub const MIN_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

/// Service for address operations, borrowed from a `LobClient`.
///
/// # Example
///
/// ```no_run
/// # fn example(client: lob_core::LobClient) -> lob_core::Result<()> {
/// let page = client.addresses().list(0, 20)?;
/// for address in &page.data {
///     println!("{:?}", address.id);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Addresses<'a> {
    client: &'a LobClient,
}

impl<'a> Addresses<'a> {
    pub(crate) fn new(client: &'a LobClient) -> Self {
        Self { client }
    }

    /// Create an address.
    ///
    /// The answer is laid over a copy of `address`: fields it carries replace
    /// the input's, fields it omits or sends as `null` keep the input's value.
    /// `id` and timestamps assigned by the server are not part of the result.
    /// Use `list` or `get` to read the stored record.
    pub fn create(&self, address: &AddressRequest) -> Result<AddressRequest> {
        let request = self.build_create(address)?;
        let response = self.client.execute(&request)?;
        self.parse_create(address, &response)
    }

    pub fn get(&self, id: &str) -> Result<Address> {
        let request = self.build_get(id)?;
        let response = self.client.execute(&request)?;
        self.parse_get(&response)
    }

    /// Delete an address. Fails with `DeletionFailed` when the server reports
    /// `deleted: false`.
    pub fn delete(&self, id: &str) -> Result<DeleteResponse> {
        let request = self.build_delete(id)?;
        let response = self.client.execute(&request)?;
        self.parse_delete(id, &response)
    }

    /// Fetch one page of addresses.
    ///
    /// Offsets at or below zero are sent as 0. A limit outside 10..=100 is
    /// replaced by 10.
    pub fn list(&self, offset: i64, limit: i64) -> Result<AddressList> {
        let request = self.build_list(offset, limit)?;
        let response = self.client.execute(&request)?;
        self.parse_list(&response)
    }

    pub fn build_create(&self, address: &AddressRequest) -> Result<HttpRequest> {
        let body = serde_json::to_string(address).map_err(Error::Encode)?;
        self.client
            .new_request(HttpMethod::Post, COLLECTION, Some(body))
    }

    pub fn build_get(&self, id: &str) -> Result<HttpRequest> {
        self.client
            .new_request(HttpMethod::Get, &format!("{COLLECTION}/{id}"), None)
    }

    pub fn build_delete(&self, id: &str) -> Result<HttpRequest> {
        self.client
            .new_request(HttpMethod::Delete, &format!("{COLLECTION}/{id}"), None)
    }

    pub fn build_list(&self, offset: i64, limit: i64) -> Result<HttpRequest> {
        let (offset, limit) = clamp_page(offset, limit);
        self.client.new_request(
            HttpMethod::Get,
            &format!("{COLLECTION}/?limit={limit}&offset={offset}"),
            None,
        )
    }

    pub fn parse_create(
        &self,
        address: &AddressRequest,
        response: &HttpResponse,
    ) -> Result<AddressRequest> {
        let answer: Value = self.client.decode(response)?;
        let mut merged = serde_json::to_value(address).map_err(Error::Encode)?;
        match answer {
            Value::Object(_) => overlay(&mut merged, answer),
            other => merged = other,
        }
        Ok(serde_json::from_value(merged)?)
    }

    pub fn parse_get(&self, response: &HttpResponse) -> Result<Address> {
        self.client.decode(response)
    }

    pub fn parse_delete(&self, id: &str, response: &HttpResponse) -> Result<DeleteResponse> {
        let deleted: DeleteResponse = self.client.decode(response)?;
        if !deleted.deleted {
            let id = if deleted.id.is_empty() {
                id.to_string()
            } else {
                deleted.id
            };
            return Err(Error::DeletionFailed { id });
        }
        Ok(deleted)
    }

    pub fn parse_list(&self, response: &HttpResponse) -> Result<AddressList> {
        self.client.decode(response)
    }
}

/// Copy non-null values from `patch` into `base`, merging nested objects
/// key by key.
fn overlay(base: &mut Value, patch: Value) {
    let (Value::Object(base), Value::Object(patch)) = (base, patch) else {
        return;
    };
    for (key, value) in patch {
        if value.is_null() {
            continue;
        }
        let nested = value.is_object() && base.get(&key).is_some_and(Value::is_object);
        if nested {
            if let Some(existing) = base.get_mut(&key) {
                overlay(existing, value);
            }
        } else {
            base.insert(key, value);
        }
    }
}

/// Normalize paging arguments to what the API accepts.
pub fn clamp_page(offset: i64, limit: i64) -> (i64, i64) {
    let clamped_offset = if offset <= 0 { 0 } else { offset };
    let clamped_limit = if (MIN_LIMIT..=MAX_LIMIT).contains(&limit) {
        limit
    } else {
        DEFAULT_LIMIT
    };
    if (clamped_offset, clamped_limit) != (offset, limit) {
        tracing::debug!(offset, limit, clamped_offset, clamped_limit, "clamped list paging");
    }
    (clamped_offset, clamped_limit)
}
