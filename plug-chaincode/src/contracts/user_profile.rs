use crate::dispatch::{Contract, args, json, parse_arg, unknown};
use crate::{ContractResult, TransactionContext, records};
use plug_model::impl_record;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// A forum member, keyed by wallet address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Profile {
    pub username: String,
    pub wallet: String,
    pub avatar: String,
    pub signature: String,
    pub muted: bool,
    pub banned: bool,
    pub balance: i64,
    pub credibility: u32,
    pub active_role: u32,
    #[serde(deserialize_with = "plug_model::null_as_default")]
    pub roles_assigned: Vec<u32>,
    pub active_badge: u32,
    #[serde(deserialize_with = "plug_model::null_as_default")]
    pub badges_received: Vec<u32>,
}

impl_record!(Profile {
    entity: "user",
    identity: wallet,
    fields: [
        username,
        avatar,
        signature,
        muted,
        banned,
        balance,
        credibility,
        active_role,
        roles_assigned,
        active_badge,
        badges_received,
    ],
});

#[derive(Debug, Clone, Copy, Default)]
pub struct UserProfileContract;

impl UserProfileContract {
    pub fn create_user(&self, ctx: &dyn TransactionContext, payload: &str) -> ContractResult<Profile> {
        let user: Profile = serde_json::from_str(payload)?;
        records::insert(ctx, &user)?;
        records::emit(ctx, "CreateUser", &user)?;
        Ok(user)
    }

    pub fn user_exists(&self, ctx: &dyn TransactionContext, wallet: &str) -> ContractResult<bool> {
        records::exists::<Profile>(ctx, wallet)
    }

    pub fn read_user(&self, ctx: &dyn TransactionContext, wallet: &str) -> ContractResult<Profile> {
        records::read(ctx, wallet)
    }

    pub fn update_user(&self, ctx: &dyn TransactionContext, payload: &str) -> ContractResult<Profile> {
        let next: Profile = serde_json::from_str(payload)?;
        let merged = records::merge_update(ctx, &next)?;
        records::emit(ctx, "UpdateUser", &merged)?;
        Ok(merged)
    }

    /// Appends `role`. Assigning a role twice records it twice.
    pub fn assign_role(
        &self,
        ctx: &dyn TransactionContext,
        wallet: &str,
        role: u32,
    ) -> ContractResult<Profile> {
        self.modify(ctx, wallet, "AssignRole", |user| user.roles_assigned.push(role))
    }

    /// Removes the first occurrence of `role`, if any.
    pub fn remove_role(
        &self,
        ctx: &dyn TransactionContext,
        wallet: &str,
        role: u32,
    ) -> ContractResult<Profile> {
        self.modify(ctx, wallet, "RemoveRole", |user| {
            remove_first(&mut user.roles_assigned, role)
        })
    }

    pub fn assign_badge(
        &self,
        ctx: &dyn TransactionContext,
        wallet: &str,
        badge: u32,
    ) -> ContractResult<Profile> {
        self.modify(ctx, wallet, "AssignBadge", |user| {
            user.badges_received.push(badge)
        })
    }

    pub fn remove_badge(
        &self,
        ctx: &dyn TransactionContext,
        wallet: &str,
        badge: u32,
    ) -> ContractResult<Profile> {
        self.modify(ctx, wallet, "RemoveBadge", |user| {
            remove_first(&mut user.badges_received, badge)
        })
    }

    /// Every profile. The list is also emitted as the `GetAllUsers` event.
    pub fn get_all_users(&self, ctx: &dyn TransactionContext) -> ContractResult<Vec<Profile>> {
        let users: Vec<Profile> = records::all(ctx)?;
        records::emit(ctx, "GetAllUsers", &users)?;
        Ok(users)
    }

    fn modify(
        &self,
        ctx: &dyn TransactionContext,
        wallet: &str,
        event: &str,
        change: impl FnOnce(&mut Profile),
    ) -> ContractResult<Profile> {
        let mut user: Profile = records::read(ctx, wallet)?;
        change(&mut user);
        records::store(ctx, &user)?;
        records::emit(ctx, event, &user)?;
        debug!(wallet, event, "profile modified");
        Ok(user)
    }
}

fn remove_first(list: &mut Vec<u32>, value: u32) {
    if let Some(pos) = list.iter().position(|v| *v == value) {
        list.remove(pos);
    }
}

impl Contract for UserProfileContract {
    fn name(&self) -> &'static str {
        "UserProfileContract"
    }

    fn functions(&self) -> &'static [&'static str] {
        &[
            "CreateUser",
            "UserExists",
            "ReadUser",
            "UpdateUser",
            "AssignRole",
            "RemoveRole",
            "AssignBadge",
            "RemoveBadge",
            "GetAllUsers",
        ]
    }

    fn invoke(
        &self,
        ctx: &dyn TransactionContext,
        function: &str,
        arguments: &[String],
    ) -> ContractResult<Option<Value>> {
        match function {
            "CreateUser" => {
                let [payload] = args(function, arguments)?;
                json(&self.create_user(ctx, payload)?)
            }
            "UserExists" => {
                let [wallet] = args(function, arguments)?;
                json(&self.user_exists(ctx, wallet)?)
            }
            "ReadUser" => {
                let [wallet] = args(function, arguments)?;
                json(&self.read_user(ctx, wallet)?)
            }
            "UpdateUser" => {
                let [payload] = args(function, arguments)?;
                json(&self.update_user(ctx, payload)?)
            }
            "AssignRole" | "RemoveRole" | "AssignBadge" | "RemoveBadge" => {
                let [wallet, raw] = args(function, arguments)?;
                let value = parse_arg(function, "id", raw)?;
                let user = match function {
                    "AssignRole" => self.assign_role(ctx, wallet, value)?,
                    "RemoveRole" => self.remove_role(ctx, wallet, value)?,
                    "AssignBadge" => self.assign_badge(ctx, wallet, value)?,
                    _ => self.remove_badge(ctx, wallet, value)?,
                };
                json(&user)
            }
            "GetAllUsers" => {
                args::<0>(function, arguments)?;
                json(&self.get_all_users(ctx)?)
            }
            _ => Err(unknown(self.name(), function)),
        }
    }
}
