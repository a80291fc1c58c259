use super::tx_time;
use crate::dispatch::{Contract, args, json, unknown};
use crate::{ContractResult, TransactionContext, records};
use plug_model::impl_record;
use plug_types::LedgerTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CategoryGroup {
    pub name: String,
    pub color: u32,
    /// Ids of the member categories. An update replaces the whole list.
    #[serde(deserialize_with = "plug_model::null_as_default")]
    pub categories: Vec<u32>,
    pub create_at: LedgerTime,
}

impl_record!(CategoryGroup {
    entity: "categoryGroup",
    identity: name,
    fields: [color, categories, create_at],
});

#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryGroupContract;

impl CategoryGroupContract {
    /// Creates a group. A payload without `createAt` is stamped with the
    /// transaction time.
    pub fn create_category_group(
        &self,
        ctx: &dyn TransactionContext,
        payload: &str,
    ) -> ContractResult<CategoryGroup> {
        let mut group: CategoryGroup = serde_json::from_str(payload)?;
        if group.create_at.is_zero() {
            group.create_at = tx_time(ctx)?;
        }
        records::insert(ctx, &group)?;
        records::emit(ctx, "CreateCategoryGroup", &group)?;
        Ok(group)
    }

    pub fn category_group_exists(
        &self,
        ctx: &dyn TransactionContext,
        name: &str,
    ) -> ContractResult<bool> {
        records::exists::<CategoryGroup>(ctx, name)
    }

    pub fn read_category_group(
        &self,
        ctx: &dyn TransactionContext,
        name: &str,
    ) -> ContractResult<CategoryGroup> {
        records::read(ctx, name)
    }

    pub fn update_category_group(
        &self,
        ctx: &dyn TransactionContext,
        payload: &str,
    ) -> ContractResult<CategoryGroup> {
        let next: CategoryGroup = serde_json::from_str(payload)?;
        let merged = records::merge_update(ctx, &next)?;
        records::emit(ctx, "UpdateCategoryGroup", &merged)?;
        Ok(merged)
    }

    pub fn get_all_category_groups(
        &self,
        ctx: &dyn TransactionContext,
    ) -> ContractResult<Vec<CategoryGroup>> {
        records::all(ctx)
    }
}

impl Contract for CategoryGroupContract {
    fn name(&self) -> &'static str {
        "CategoryGroupContract"
    }

    fn functions(&self) -> &'static [&'static str] {
        &[
            "CreateCategoryGroup",
            "CategoryGroupExists",
            "ReadCategoryGroup",
            "UpdateCategoryGroup",
            "GetAllCategoryGroups",
        ]
    }

    fn invoke(
        &self,
        ctx: &dyn TransactionContext,
        function: &str,
        arguments: &[String],
    ) -> ContractResult<Option<Value>> {
        match function {
            "CreateCategoryGroup" => {
                let [payload] = args(function, arguments)?;
                json(&self.create_category_group(ctx, payload)?)
            }
            "CategoryGroupExists" => {
                let [name] = args(function, arguments)?;
                json(&self.category_group_exists(ctx, name)?)
            }
            "ReadCategoryGroup" => {
                let [name] = args(function, arguments)?;
                json(&self.read_category_group(ctx, name)?)
            }
            "UpdateCategoryGroup" => {
                let [payload] = args(function, arguments)?;
                json(&self.update_category_group(ctx, payload)?)
            }
            "GetAllCategoryGroups" => {
                args::<0>(function, arguments)?;
                json(&self.get_all_category_groups(ctx)?)
            }
            _ => Err(unknown(self.name(), function)),
        }
    }
}
