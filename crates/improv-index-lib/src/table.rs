//! Pagination-transparent facade over the DynamoDB activities table.
//!
//! A [`Table`] pairs a DynamoDB client with a resolved table name and exposes
//! the handful of operations the API needs. Items cross the boundary as serde
//! types and are converted to and from `AttributeValue` maps with
//! `serde_dynamo`, so no schema is enforced at this layer. Scan and query
//! follow the store's continuation tokens until exhausted; batch reads are
//! chunked to the store's per-request key limit. No retries happen here --
//! backoff is the SDK's or the caller's concern, and every failure surfaces
//! as [`Error::TableOperation`] naming the operation and table.

use std::collections::HashMap;

use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::{AttributeValue, KeysAndAttributes, ReturnValue};
use aws_sdk_dynamodb::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_dynamo::aws_sdk_dynamodb_1::{from_item, from_items, to_item};
use tracing::{debug, error};

use crate::error::{Error, Result};

/// Environment variable consulted when no table name is given explicitly.
pub const TABLE_NAME_VAR: &str = "DYNAMODB_TABLE_NAME";

/// DynamoDB caps BatchGetItem at 100 keys per request.
const MAX_BATCH_GET_KEYS: usize = 100;

/// A raw table row or primary key, as the store represents it.
pub type Item = HashMap<String, AttributeValue>;

/// Build a single-attribute string key.
pub fn string_key(attribute: &str, value: &str) -> Item {
    HashMap::from([(
        attribute.to_string(),
        AttributeValue::S(value.to_string()),
    )])
}

/// A DynamoDB expression with its attribute name and value substitutions.
///
/// Used for update expressions, filter expressions, and key conditions.
#[derive(Debug, Clone, Default)]
pub struct Expression {
    expression: String,
    names: HashMap<String, String>,
    values: HashMap<String, AttributeValue>,
}

impl Expression {
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            names: HashMap::new(),
            values: HashMap::new(),
        }
    }

    /// Bind an attribute name placeholder (`#n`) to a real attribute name.
    pub fn name(mut self, placeholder: impl Into<String>, attribute: impl Into<String>) -> Self {
        self.names.insert(placeholder.into(), attribute.into());
        self
    }

    /// Bind a value placeholder (`:v`) to an attribute value.
    pub fn value(mut self, placeholder: impl Into<String>, value: AttributeValue) -> Self {
        self.values.insert(placeholder.into(), value);
        self
    }

    // DynamoDB rejects empty substitution maps, so absent maps stay None.
    fn names_opt(&self) -> Option<HashMap<String, String>> {
        (!self.names.is_empty()).then(|| self.names.clone())
    }

    fn values_opt(&self) -> Option<HashMap<String, AttributeValue>> {
        (!self.values.is_empty()).then(|| self.values.clone())
    }
}

/// Resolved handle to one table in the store.
#[derive(Debug, Clone)]
pub struct Table {
    client: Client,
    name: String,
}

impl Table {
    pub fn new(client: Client, name: impl Into<String>) -> Self {
        Self {
            client,
            name: name.into(),
        }
    }

    /// Resolve a table handle from an explicit name or the environment.
    ///
    /// Fails with [`Error::MissingTableName`] before any network call when
    /// neither an explicit name nor [`TABLE_NAME_VAR`] is set.
    pub fn resolve(client: Client, name: Option<String>) -> Result<Self> {
        let name = match name {
            Some(name) => name,
            None => std::env::var(TABLE_NAME_VAR)
                .ok()
                .filter(|name| !name.is_empty())
                .ok_or(Error::MissingTableName)?,
        };
        debug!(table = %name, "resolved table handle");
        Ok(Self::new(client, name))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fetch a single item by full primary key. A missing item is `Ok(None)`,
    /// not an error.
    pub async fn get<T: DeserializeOwned>(&self, key: Item) -> Result<Option<T>> {
        let output = self
            .client
            .get_item()
            .table_name(&self.name)
            .set_key(Some(key))
            .send()
            .await
            .map_err(|err| self.operation_error("get_item", err))?;

        match output.item {
            Some(item) => Ok(Some(self.convert_item(item)?)),
            None => {
                debug!(table = %self.name, "item not found");
                Ok(None)
            }
        }
    }

    /// Unconditional upsert of a full item.
    pub async fn put<T: Serialize>(&self, item: &T) -> Result<()> {
        let item: Item = to_item(item).map_err(|err| self.conversion_error(err))?;
        self.client
            .put_item()
            .table_name(&self.name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|err| self.operation_error("put_item", err))?;
        Ok(())
    }

    /// Apply a partial update and return the post-update values of the
    /// changed attributes.
    pub async fn update<T: DeserializeOwned>(
        &self,
        key: Item,
        update: &Expression,
    ) -> Result<Option<T>> {
        let output = self
            .client
            .update_item()
            .table_name(&self.name)
            .set_key(Some(key))
            .update_expression(&update.expression)
            .set_expression_attribute_names(update.names_opt())
            .set_expression_attribute_values(update.values_opt())
            .return_values(ReturnValue::UpdatedNew)
            .send()
            .await
            .map_err(|err| self.operation_error("update_item", err))?;

        match output.attributes {
            Some(attributes) => Ok(Some(self.convert_item(attributes)?)),
            None => Ok(None),
        }
    }

    /// Unconditional delete by key. Deleting an absent key is not an error.
    pub async fn delete(&self, key: Item) -> Result<()> {
        self.client
            .delete_item()
            .table_name(&self.name)
            .set_key(Some(key))
            .send()
            .await
            .map_err(|err| self.operation_error("delete_item", err))?;
        Ok(())
    }

    /// Retrieve every item in the table matching the optional filter,
    /// following continuation tokens until the store stops returning one.
    /// Page order is whatever the store yields.
    pub async fn scan<T: DeserializeOwned>(&self, filter: Option<&Expression>) -> Result<Vec<T>> {
        let mut items: Vec<Item> = Vec::new();
        let mut start_key: Option<Item> = None;

        loop {
            let mut request = self.client.scan().table_name(&self.name);
            if let Some(filter) = filter {
                request = request
                    .filter_expression(&filter.expression)
                    .set_expression_attribute_names(filter.names_opt())
                    .set_expression_attribute_values(filter.values_opt());
            }
            let output = request
                .set_exclusive_start_key(start_key.take())
                .send()
                .await
                .map_err(|err| self.operation_error("scan", err))?;

            items.extend(output.items.unwrap_or_default());
            match output.last_evaluated_key {
                Some(key) => start_key = Some(key),
                None => break,
            }
        }

        debug!(table = %self.name, count = items.len(), "scan complete");
        self.convert_items(items)
    }

    /// Query items under a key condition, with the same pagination
    /// transparency as [`Table::scan`].
    pub async fn query<T: DeserializeOwned>(
        &self,
        key_condition: &Expression,
        filter: Option<&Expression>,
    ) -> Result<Vec<T>> {
        let mut items: Vec<Item> = Vec::new();
        let mut start_key: Option<Item> = None;

        loop {
            let mut request = self
                .client
                .query()
                .table_name(&self.name)
                .key_condition_expression(&key_condition.expression);

            let mut names = key_condition.names.clone();
            let mut values = key_condition.values.clone();
            if let Some(filter) = filter {
                request = request.filter_expression(&filter.expression);
                names.extend(filter.names.clone());
                values.extend(filter.values.clone());
            }
            if !names.is_empty() {
                request = request.set_expression_attribute_names(Some(names));
            }
            if !values.is_empty() {
                request = request.set_expression_attribute_values(Some(values));
            }

            let output = request
                .set_exclusive_start_key(start_key.take())
                .send()
                .await
                .map_err(|err| self.operation_error("query", err))?;

            items.extend(output.items.unwrap_or_default());
            match output.last_evaluated_key {
                Some(key) => start_key = Some(key),
                None => break,
            }
        }

        debug!(table = %self.name, count = items.len(), "query complete");
        self.convert_items(items)
    }

    /// Fetch multiple items by key, splitting the key list into chunks of at
    /// most 100 per request. Keys with no matching item are silently omitted.
    pub async fn batch_get<T: DeserializeOwned>(&self, keys: Vec<Item>) -> Result<Vec<T>> {
        let mut items: Vec<Item> = Vec::new();

        for chunk in keys.chunks(MAX_BATCH_GET_KEYS) {
            let request_keys = KeysAndAttributes::builder()
                .set_keys(Some(chunk.to_vec()))
                .build()
                .map_err(|err| self.operation_error("batch_get", err))?;

            let output = self
                .client
                .batch_get_item()
                .request_items(&self.name, request_keys)
                .send()
                .await
                .map_err(|err| self.operation_error("batch_get", err))?;

            if let Some(mut responses) = output.responses {
                if let Some(found) = responses.remove(&self.name) {
                    items.extend(found);
                }
            }
        }

        debug!(table = %self.name, count = items.len(), "batch get complete");
        self.convert_items(items)
    }

    fn convert_item<T: DeserializeOwned>(&self, item: Item) -> Result<T> {
        from_item(item).map_err(|err| self.conversion_error(err))
    }

    fn convert_items<T: DeserializeOwned>(&self, items: Vec<Item>) -> Result<Vec<T>> {
        from_items(items).map_err(|err| self.conversion_error(err))
    }

    fn conversion_error(&self, err: serde_dynamo::Error) -> Error {
        Error::ItemConversion {
            table: self.name.clone(),
            message: err.to_string(),
        }
    }

    fn operation_error<E>(&self, operation: &'static str, err: E) -> Error
    where
        E: std::error::Error + 'static,
    {
        error!(
            table = %self.name,
            operation,
            error = %DisplayErrorContext(&err),
            "table operation failed"
        );
        Error::TableOperation {
            operation,
            table: self.name.clone(),
            message: format!("{}", DisplayErrorContext(&err)),
        }
    }
}
