//! Local transaction runner for plug chaincode.
//!
//! Loads a world-state file, runs one function of one chaincode against it
//! through the dispatcher and, if the function succeeds, writes the new
//! state back. A failed transaction leaves the file untouched, as the host
//! ledger discards the writes of an aborted transaction.
//!
//! The state file holds one object per chaincode namespace, mapping storage
//! keys to record JSON:
//!
//! ```json
//! { "plug": { "\u0000tag\u0000rust\u0000": { "name": "rust", "creatorID": 1 } } }
//! ```

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use plug_chaincode::{Chaincode, ClientIdentity, LocalContext, StaticIdentity};
use plug_storage::MemoryStub;
use plug_types::{ChaincodeEvent, ClientId, LedgerTime};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Namespace -> storage key -> record.
pub type WorldState = BTreeMap<String, BTreeMap<String, Value>>;

#[derive(Parser, Debug)]
#[command(name = "plug-runner")]
#[command(about = "Run one plug chaincode transaction against a local world state")]
pub struct Args {
    /// World-state file; created on first successful write
    #[arg(short, long, default_value = "world-state.json")]
    pub state: PathBuf,

    /// Chaincode to invoke
    #[arg(short, long, value_parser = ["plug", "post", "topic", "userprofile"])]
    pub chaincode: String,

    /// Submitting client id, in plain (not base64) form
    #[arg(long, env = "PLUG_CLIENT_ID")]
    pub client_id: String,

    /// Submitting client's MSP id
    #[arg(long, env = "PLUG_MSP_ID", default_value = "Org1MSP")]
    pub msp_id: String,

    /// Transaction timestamp (RFC 3339); defaults to now
    #[arg(long)]
    pub tx_time: Option<LedgerTime>,

    /// Chaincode package id, recorded for logging
    #[arg(long, env = "CHAINCODE_ID")]
    pub ccid: Option<String>,

    /// Chaincode server address, recorded for logging
    #[arg(long, env = "CHAINCODE_SERVER_ADDRESS")]
    pub address: Option<String>,

    /// Enable verbose debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Function name, `Function` or `Contract:Function`
    pub function: String,

    /// Function arguments
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// Everything needed to run a transaction. Built once from the command
/// line; nothing reads the environment after that.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    pub state_path: PathBuf,
    pub chaincode: String,
    pub client_id: ClientId,
    pub msp_id: String,
    pub tx_time: Option<LedgerTime>,
    pub ccid: Option<String>,
    pub address: Option<String>,
}

/// A function call with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub function: String,
    pub args: Vec<String>,
}

impl Args {
    pub fn into_parts(self) -> (RunnerConfig, Invocation) {
        let config = RunnerConfig {
            state_path: self.state,
            chaincode: self.chaincode,
            client_id: ClientId::new(self.client_id),
            msp_id: self.msp_id,
            tx_time: self.tx_time,
            ccid: self.ccid,
            address: self.address,
        };
        let invocation = Invocation {
            function: self.function,
            args: self.args,
        };
        (config, invocation)
    }
}

/// What a successful transaction produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    /// The function's return value; `None` if it returns nothing.
    pub result: Option<Value>,
    /// The transaction's event, if one was set.
    pub event: Option<ChaincodeEvent>,
}

/// Reads a state file. A missing file is an empty world state.
pub fn load_state(path: &Path) -> Result<WorldState> {
    if !path.exists() {
        debug!("No state file at {:?}, starting empty", path);
        return Ok(WorldState::new());
    }
    let bytes = fs::read(path).with_context(|| format!("Failed to read state file {path:?}"))?;
    serde_json::from_slice(&bytes).with_context(|| format!("Failed to parse state file {path:?}"))
}

pub fn save_state(path: &Path, state: &WorldState) -> Result<()> {
    let json = serde_json::to_vec_pretty(state).context("Failed to encode world state")?;
    fs::write(path, json).with_context(|| format!("Failed to write state file {path:?}"))
}

/// Runs one transaction and persists its writes.
pub fn run(config: &RunnerConfig, invocation: &Invocation) -> Result<Outcome> {
    let chaincode = Chaincode::by_name(&config.chaincode)
        .ok_or_else(|| anyhow!("Unknown chaincode {:?}", config.chaincode))?;
    let mut state = load_state(&config.state_path)?;

    let namespace = state.remove(chaincode.namespace()).unwrap_or_default();
    let snapshot = namespace
        .into_iter()
        .map(|(key, value)| Ok::<_, anyhow::Error>((key, serde_json::to_vec(&value)?)))
        .collect::<Result<BTreeMap<_, _>>>()?;

    let tx_time = config.tx_time.unwrap_or_else(LedgerTime::now);
    let stub = MemoryStub::from_snapshot(snapshot).with_tx_timestamp(tx_time);
    let identity = StaticIdentity::new(&config.client_id, config.msp_id.clone());
    let ctx = LocalContext::new(&stub, &identity);
    let msp_id = identity.msp_id()?;

    info!(
        "Invoking {} on {} as {} ({}) at {}",
        invocation.function,
        chaincode.namespace(),
        config.client_id,
        msp_id,
        tx_time
    );
    let bytes = chaincode
        .invoke(&ctx, &invocation.function, &invocation.args)
        .with_context(|| format!("{} failed", invocation.function))?;

    let mut written = BTreeMap::new();
    for (key, value) in stub.snapshot()? {
        let record = serde_json::from_slice(&value)
            .with_context(|| format!("Stored value under {key:?} is not JSON"))?;
        written.insert(key, record);
    }
    state.insert(chaincode.namespace().to_string(), written);
    save_state(&config.state_path, &state)?;

    let result = if bytes.is_empty() {
        None
    } else {
        Some(serde_json::from_slice(&bytes).context("Function returned invalid JSON")?)
    };
    Ok(Outcome {
        result,
        event: stub.last_event()?,
    })
}
