use crate::dispatch::{Contract, args, json, unknown};
use crate::{ContractResult, TransactionContext, records};
use plug_model::impl_record;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Tag {
    pub name: String,
    #[serde(rename = "creatorID")]
    pub creator_id: u32,
    pub description: String,
}

impl_record!(Tag {
    entity: "tag",
    identity: name,
    fields: [creator_id, description],
});

/// Forum tags, keyed by name.
#[derive(Debug, Clone, Copy, Default)]
pub struct TagContract;

impl TagContract {
    /// Creates a tag from a JSON payload and returns the stored record.
    pub fn create_tag(&self, ctx: &dyn TransactionContext, payload: &str) -> ContractResult<Tag> {
        let tag: Tag = serde_json::from_str(payload)?;
        records::insert(ctx, &tag)?;
        records::emit(ctx, "CreateTag", &tag)?;
        Ok(tag)
    }

    pub fn tag_exists(&self, ctx: &dyn TransactionContext, name: &str) -> ContractResult<bool> {
        records::exists::<Tag>(ctx, name)
    }

    pub fn read_tag(&self, ctx: &dyn TransactionContext, name: &str) -> ContractResult<Tag> {
        records::read(ctx, name)
    }

    /// Partial update: fields left at their zero value in the payload keep
    /// their stored value.
    pub fn update_tag(&self, ctx: &dyn TransactionContext, payload: &str) -> ContractResult<Tag> {
        let next: Tag = serde_json::from_str(payload)?;
        let merged = records::merge_update(ctx, &next)?;
        records::emit(ctx, "UpdateTag", &merged)?;
        Ok(merged)
    }

    pub fn get_all_tags(&self, ctx: &dyn TransactionContext) -> ContractResult<Vec<Tag>> {
        records::all(ctx)
    }
}

impl Contract for TagContract {
    fn name(&self) -> &'static str {
        "TagContract"
    }

    fn functions(&self) -> &'static [&'static str] {
        &["CreateTag", "TagExists", "ReadTag", "UpdateTag", "GetAllTags"]
    }

    fn invoke(
        &self,
        ctx: &dyn TransactionContext,
        function: &str,
        arguments: &[String],
    ) -> ContractResult<Option<Value>> {
        match function {
            "CreateTag" => {
                let [payload] = args(function, arguments)?;
                json(&self.create_tag(ctx, payload)?)
            }
            "TagExists" => {
                let [name] = args(function, arguments)?;
                json(&self.tag_exists(ctx, name)?)
            }
            "ReadTag" => {
                let [name] = args(function, arguments)?;
                json(&self.read_tag(ctx, name)?)
            }
            "UpdateTag" => {
                let [payload] = args(function, arguments)?;
                json(&self.update_tag(ctx, payload)?)
            }
            "GetAllTags" => {
                args::<0>(function, arguments)?;
                json(&self.get_all_tags(ctx)?)
            }
            _ => Err(unknown(self.name(), function)),
        }
    }
}
