use crate::dispatch::{Contract, args, json, unknown};
use crate::{ContractResult, TransactionContext, records};
use plug_model::impl_record;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Category {
    pub name: String,
    #[serde(rename = "categoryGroupID")]
    pub category_group_id: u32,
    pub color: u32,
}

impl_record!(Category {
    entity: "category",
    identity: name,
    fields: [category_group_id, color],
});

#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryContract;

impl CategoryContract {
    pub fn create_category(
        &self,
        ctx: &dyn TransactionContext,
        payload: &str,
    ) -> ContractResult<Category> {
        let category: Category = serde_json::from_str(payload)?;
        records::insert(ctx, &category)?;
        records::emit(ctx, "CreateCategory", &category)?;
        Ok(category)
    }

    pub fn category_exists(&self, ctx: &dyn TransactionContext, name: &str) -> ContractResult<bool> {
        records::exists::<Category>(ctx, name)
    }

    pub fn read_category(&self, ctx: &dyn TransactionContext, name: &str) -> ContractResult<Category> {
        records::read(ctx, name)
    }

    pub fn update_category(
        &self,
        ctx: &dyn TransactionContext,
        payload: &str,
    ) -> ContractResult<Category> {
        let next: Category = serde_json::from_str(payload)?;
        let merged = records::merge_update(ctx, &next)?;
        records::emit(ctx, "UpdateCategory", &merged)?;
        Ok(merged)
    }

    pub fn get_all_categories(&self, ctx: &dyn TransactionContext) -> ContractResult<Vec<Category>> {
        records::all(ctx)
    }
}

impl Contract for CategoryContract {
    fn name(&self) -> &'static str {
        "CategoryContract"
    }

    fn functions(&self) -> &'static [&'static str] {
        &[
            "CreateCategory",
            "CategoryExists",
            "ReadCategory",
            "UpdateCategory",
            "GetAllCategories",
        ]
    }

    fn invoke(
        &self,
        ctx: &dyn TransactionContext,
        function: &str,
        arguments: &[String],
    ) -> ContractResult<Option<Value>> {
        match function {
            "CreateCategory" => {
                let [payload] = args(function, arguments)?;
                json(&self.create_category(ctx, payload)?)
            }
            "CategoryExists" => {
                let [name] = args(function, arguments)?;
                json(&self.category_exists(ctx, name)?)
            }
            "ReadCategory" => {
                let [name] = args(function, arguments)?;
                json(&self.read_category(ctx, name)?)
            }
            "UpdateCategory" => {
                let [payload] = args(function, arguments)?;
                json(&self.update_category(ctx, payload)?)
            }
            "GetAllCategories" => {
                args::<0>(function, arguments)?;
                json(&self.get_all_categories(ctx)?)
            }
            _ => Err(unknown(self.name(), function)),
        }
    }
}
