//! Function dispatch: maps host-facing function names onto contract
//! operations.
//!
//! The host addresses a transaction as `Contract:Function` or just
//! `Function` with a list of string arguments. [`Chaincode`] resolves the
//! name against its contracts and returns the operation's result as JSON
//! bytes.

use crate::contracts::{
    CategoryContract, CategoryGroupContract, PostContract, TagContract, TopicContract,
    UserProfileContract,
};
use crate::{ContractError, ContractResult, TransactionContext};
use serde::Serialize;
use serde_json::Value;
use std::fmt::Display;
use std::str::FromStr;
use tracing::debug;

/// A contract exposed to the host.
pub trait Contract: Send + Sync {
    /// Name used in `Contract:Function` addressing.
    fn name(&self) -> &'static str;

    /// Host-facing names of every function this contract exposes.
    fn functions(&self) -> &'static [&'static str];

    /// Runs one function. `Ok(None)` means the function returns nothing.
    fn invoke(
        &self,
        ctx: &dyn TransactionContext,
        function: &str,
        args: &[String],
    ) -> ContractResult<Option<Value>>;
}

/// Checks the argument count and borrows the arguments as a fixed array.
pub(crate) fn args<'a, const N: usize>(
    function: &str,
    args: &'a [String],
) -> ContractResult<[&'a str; N]> {
    if args.len() != N {
        return Err(ContractError::invalid_argument(
            function,
            format!("expected {N} arguments, got {}", args.len()),
        ));
    }
    Ok(std::array::from_fn(|i| args[i].as_str()))
}

pub(crate) fn parse_arg<T>(function: &str, name: &str, raw: &str) -> ContractResult<T>
where
    T: FromStr,
    T::Err: Display,
{
    raw.parse()
        .map_err(|e| ContractError::invalid_argument(function, format!("{name} {raw:?}: {e}")))
}

pub(crate) fn json<T: Serialize>(value: &T) -> ContractResult<Option<Value>> {
    Ok(Some(serde_json::to_value(value)?))
}

pub(crate) fn unknown(contract: &str, function: &str) -> ContractError {
    ContractError::UnknownFunction {
        contract: contract.to_string(),
        function: function.to_string(),
    }
}

/// A deployable chaincode: a namespace and the contracts it serves.
pub struct Chaincode {
    namespace: &'static str,
    contracts: Vec<Box<dyn Contract>>,
}

impl Chaincode {
    pub fn new(namespace: &'static str) -> Self {
        Self {
            namespace,
            contracts: Vec::new(),
        }
    }

    pub fn with_contract(mut self, contract: impl Contract + 'static) -> Self {
        self.contracts.push(Box::new(contract));
        self
    }

    /// Tags, categories and category groups.
    pub fn plug() -> Self {
        Self::new("plug")
            .with_contract(TagContract)
            .with_contract(CategoryContract)
            .with_contract(CategoryGroupContract)
    }

    pub fn post() -> Self {
        Self::new("post").with_contract(PostContract)
    }

    pub fn topic() -> Self {
        Self::new("topic").with_contract(TopicContract)
    }

    pub fn userprofile() -> Self {
        Self::new("userprofile").with_contract(UserProfileContract)
    }

    /// One of the four deployable chaincodes by namespace.
    pub fn by_name(namespace: &str) -> Option<Self> {
        match namespace {
            "plug" => Some(Self::plug()),
            "post" => Some(Self::post()),
            "topic" => Some(Self::topic()),
            "userprofile" => Some(Self::userprofile()),
            _ => None,
        }
    }

    pub fn namespace(&self) -> &'static str {
        self.namespace
    }

    pub fn contracts(&self) -> impl Iterator<Item = &dyn Contract> {
        self.contracts.iter().map(|c| c.as_ref())
    }

    /// Runs `function` (`Contract:Function` or a bare `Function`) and
    /// returns its JSON result, or no bytes if it returns nothing.
    ///
    /// A bare name resolves against the first contract that exposes it.
    pub fn invoke(
        &self,
        ctx: &dyn TransactionContext,
        function: &str,
        args: &[String],
    ) -> ContractResult<Vec<u8>> {
        let (contract, name) = self.resolve(function)?;
        debug!(
            namespace = self.namespace,
            contract = contract.name(),
            function = name,
            "invoking"
        );
        match contract.invoke(ctx, name, args)? {
            Some(value) => Ok(serde_json::to_vec(&value)?),
            None => Ok(Vec::new()),
        }
    }

    fn resolve<'f>(&self, function: &'f str) -> ContractResult<(&dyn Contract, &'f str)> {
        if let Some((contract_name, name)) = function.split_once(':') {
            let contract = self
                .contracts()
                .find(|c| c.name() == contract_name)
                .ok_or_else(|| unknown(contract_name, name))?;
            return Ok((contract, name));
        }
        self.contracts()
            .find(|c| c.functions().iter().any(|f| *f == function))
            .map(|c| (c, function))
            .ok_or_else(|| unknown(self.namespace, function))
    }
}
