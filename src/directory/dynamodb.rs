use crate::{
    customer::profile::{Role, Status, UserProfile},
    directory::{
        phone_key, user_key, DirectoryError, UserDirectory, PHONE_INDEX_KEY_ATTR,
        PRIMARY_KEY_ATTR,
    },
};
use async_trait::async_trait;
use aws_sdk_dynamodb::{error::DisplayErrorContext, types::AttributeValue, Client};
use std::collections::HashMap;
use tracing::{debug, info_span, instrument, warn, Instrument};

/// [`UserDirectory`] backed by a DynamoDB table with a phone number GSI.
#[derive(Debug, Clone)]
pub struct DynamoUserDirectory {
    client: Client,
    table: String,
    phone_index: String,
}

impl DynamoUserDirectory {
    #[must_use]
    pub fn new(client: Client, table: impl Into<String>, phone_index: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
            phone_index: phone_index.into(),
        }
    }
}

#[async_trait]
impl UserDirectory for DynamoUserDirectory {
    #[instrument(skip(self), fields(table = %self.table, index = %self.phone_index))]
    async fn find_by_phone(
        &self,
        phone_e164: &str,
    ) -> Result<Option<UserProfile>, DirectoryError> {
        let span = info_span!(
            "db.query",
            db.system = "dynamodb",
            db.operation = "Query",
            db.name = %self.table
        );

        let output = self
            .client
            .query()
            .table_name(&self.table)
            .index_name(&self.phone_index)
            .key_condition_expression("#pk = :pk")
            .expression_attribute_names("#pk", PHONE_INDEX_KEY_ATTR)
            .expression_attribute_values(":pk", AttributeValue::S(phone_key(phone_e164)))
            .send()
            .instrument(span)
            .await
            .map_err(|e| DirectoryError::Query(DisplayErrorContext(&e).to_string()))?;

        debug!("phone index returned {} item(s)", output.count());

        Ok(output.items().first().map(profile_from_item))
    }

    #[instrument(skip(self, profile), fields(table = %self.table, user_id = %profile.user_id))]
    async fn put_profile(&self, profile: &UserProfile) -> Result<(), DirectoryError> {
        let span = info_span!(
            "db.query",
            db.system = "dynamodb",
            db.operation = "PutItem",
            db.name = %self.table
        );

        self.client
            .put_item()
            .table_name(&self.table)
            .set_item(Some(profile_to_item(profile)))
            .send()
            .instrument(span)
            .await
            .map_err(|e| DirectoryError::Write(DisplayErrorContext(&e).to_string()))?;

        Ok(())
    }
}

#[must_use]
pub fn profile_to_item(profile: &UserProfile) -> HashMap<String, AttributeValue> {
    let s = |value: &str| AttributeValue::S(value.to_string());

    HashMap::from([
        (PRIMARY_KEY_ATTR.to_string(), s(&user_key(&profile.user_id))),
        (PHONE_INDEX_KEY_ATTR.to_string(), s(&phone_key(&profile.phone_e164))),
        ("user_id".to_string(), s(&profile.user_id)),
        ("name".to_string(), s(&profile.name)),
        ("phone".to_string(), s(&profile.phone_e164)),
        ("phone_digits".to_string(), s(&profile.phone_digits)),
        ("role".to_string(), s(profile.role.as_str())),
        ("status".to_string(), s(profile.status.as_str())),
    ])
}

fn string_attr<'a>(item: &'a HashMap<String, AttributeValue>, name: &str) -> Option<&'a str> {
    item.get(name)
        .and_then(|value| value.as_s().ok())
        .map(String::as_str)
}

/// Decode a stored item. Every attribute is optional: `role` and `status`
/// default to `CUSTOMER` and `ACTIVE`, unknown values are kept verbatim, and a
/// missing `user_id` is recovered from the `USER#<user_id>` primary key.
#[must_use]
pub fn profile_from_item(item: &HashMap<String, AttributeValue>) -> UserProfile {
    let user_id = string_attr(item, "user_id")
        .or_else(|| string_attr(item, PRIMARY_KEY_ATTR).and_then(|pk| pk.strip_prefix("USER#")))
        .unwrap_or_else(|| {
            warn!("profile record has no user_id");
            ""
        });

    UserProfile {
        user_id: user_id.to_string(),
        name: string_attr(item, "name").unwrap_or_default().to_string(),
        phone_e164: string_attr(item, "phone").unwrap_or_default().to_string(),
        phone_digits: string_attr(item, "phone_digits")
            .unwrap_or_default()
            .to_string(),
        role: string_attr(item, "role").map(Role::from).unwrap_or_default(),
        status: string_attr(item, "status")
            .map(Status::from)
            .unwrap_or_default(),
    }
}
