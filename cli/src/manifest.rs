//! Scenario manifests for `diamond run`.
//!
//! ```toml
//! [diamond]
//! owner = "alice"
//! facets = ["loupe", "ownership"]
//! init = "init"
//!
//! [[steps]]
//! kind = "cut"
//! cuts = [{ action = "add", facet = "data" }]
//!
//! [[steps]]
//! kind = "call"
//! signature = "getDataA()"
//! returns = ["bytes32"]
//! ```
//!
//! Account strings are either `0x` addresses, the name of a deployed catalog
//! facet, `diamond`, or any other label (hashed into a stable address).

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;

use diamond_core::CodeRegistry;
use diamond_core::facets::{
    DataFacet, DiamondInit, DiamondLoupeFacet, HandleRegistryFacet, HashingDataFacet,
    OwnershipFacet,
};
use alloy_dyn_abi::{DynSolType, DynSolValue};
use alloy_json_abi::Function;
use diamond_types::{Address, FacetCutAction, Selector, label_address};

/// Built-in facets a manifest can deploy, by name.
pub const CATALOG: &[&str] = &["loupe", "ownership", "init", "data", "hashing_data", "handles"];

const DEFAULT_INIT_CALL: &str = "init()";

#[derive(Debug, Deserialize)]
pub struct Manifest {
    pub diamond: DiamondSection,
    /// Catalog entries to deploy. Defaults to the whole catalog.
    pub deploy: Option<Vec<String>>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Deserialize)]
pub struct DiamondSection {
    pub owner: String,
    /// Facets added with all their selectors at construction.
    #[serde(default)]
    pub facets: Vec<String>,
    pub init: Option<String>,
    pub init_call: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Step {
    Cut(CutStep),
    Call(CallStep),
}

#[derive(Debug, Deserialize)]
pub struct CutStep {
    pub caller: Option<String>,
    pub cuts: Vec<CutSpec>,
    pub init: Option<String>,
    pub init_call: Option<String>,
    pub expect_revert: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CutSpec {
    pub action: FacetCutAction,
    pub facet: Option<String>,
    /// Signatures or `0x` selectors. Defaults to every selector of `facet`.
    pub selectors: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct CallStep {
    pub caller: Option<String>,
    pub signature: String,
    #[serde(default)]
    pub args: Vec<toml::Value>,
    /// Output types to decode the return data with.
    #[serde(default)]
    pub returns: Vec<String>,
    pub expect_revert: Option<String>,
}

impl Step {
    #[must_use]
    pub fn expect_revert(&self) -> Option<&str> {
        match self {
            Step::Cut(step) => step.expect_revert.as_deref(),
            Step::Call(step) => step.expect_revert.as_deref(),
        }
    }
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid manifest {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let manifest: Manifest = toml::from_str(content)?;
        if let Some(deploy) = &manifest.deploy {
            for name in deploy {
                if !CATALOG.contains(&name.as_str()) {
                    bail!("unknown catalog facet {name:?}; expected one of {CATALOG:?}");
                }
            }
        }
        Ok(manifest)
    }

    /// Catalog names to deploy, in catalog order for the default.
    #[must_use]
    pub fn deployments(&self) -> Vec<&str> {
        match &self.deploy {
            Some(names) => names.iter().map(String::as_str).collect(),
            None => CATALOG.to_vec(),
        }
    }
}

/// Deploy one catalog entry.
pub fn deploy_catalog_entry(code: &mut CodeRegistry, name: &str) -> Result<Address> {
    let address = match name {
        "loupe" => code.deploy(DiamondLoupeFacet),
        "ownership" => code.deploy(OwnershipFacet),
        "init" => code.deploy(DiamondInit),
        "data" => code.deploy(DataFacet),
        "hashing_data" => code.deploy(HashingDataFacet),
        "handles" => code.deploy(HandleRegistryFacet),
        other => bail!("unknown catalog facet {other:?}"),
    };
    Ok(address)
}

/// Maps manifest account strings to addresses.
#[derive(Debug, Default)]
pub struct Accounts {
    facets: BTreeMap<String, Address>,
    diamond: Option<Address>,
}

impl Accounts {
    pub fn insert_facet(&mut self, name: &str, address: Address) {
        self.facets.insert(name.to_string(), address);
    }

    pub fn set_diamond(&mut self, address: Address) {
        self.diamond = Some(address);
    }

    pub fn facet(&self, name: &str) -> Result<Address> {
        self.facets
            .get(name)
            .copied()
            .ok_or_else(|| anyhow!("facet {name:?} was not deployed"))
    }

    pub fn resolve(&self, account: &str) -> Result<Address> {
        if account.starts_with("0x") {
            return account
                .parse()
                .with_context(|| format!("invalid address {account:?}"));
        }
        if let Some(address) = self.facets.get(account) {
            return Ok(*address);
        }
        if account == "diamond"
            && let Some(address) = self.diamond
        {
            return Ok(address);
        }
        Ok(label_address(account))
    }
}

/// Parse a selector given either as `0x` hex or as a function signature.
pub fn parse_selector(input: &str) -> Result<Selector> {
    if input.starts_with("0x") {
        return input
            .parse()
            .with_context(|| format!("invalid selector {input:?}"));
    }
    let function =
        Function::parse(input).with_context(|| format!("invalid signature {input:?}"))?;
    Ok(function.selector())
}

/// Calldata for a zero-argument initializer call.
pub fn init_calldata(init_call: Option<&str>) -> Result<Vec<u8>> {
    let signature = init_call.unwrap_or(DEFAULT_INIT_CALL);
    let function =
        Function::parse(signature).with_context(|| format!("invalid signature {signature:?}"))?;
    if !function.inputs.is_empty() {
        bail!("initializer {} must take no arguments", function.signature());
    }
    Ok(function.selector().to_vec())
}

pub fn parse_types(types: &[String]) -> Result<Vec<DynSolType>> {
    types
        .iter()
        .map(|t| DynSolType::parse(t).with_context(|| format!("invalid type {t:?}")))
        .collect()
}

/// Coerce a TOML value into an ABI value of type `ty`.
///
/// Address strings go through [`Accounts`]; other strings use the usual
/// Solidity literal syntax (`0x` hex, decimal, `true`).
pub fn coerce_arg(ty: &DynSolType, value: &toml::Value, accounts: &Accounts) -> Result<DynSolValue> {
    use toml::Value;

    let coerced = match (ty, value) {
        (DynSolType::Address, Value::String(s)) => DynSolValue::Address(accounts.resolve(s)?),
        (DynSolType::Bool, Value::Boolean(b)) => DynSolValue::Bool(*b),
        (DynSolType::Uint(_) | DynSolType::Int(_), Value::Integer(n)) => ty
            .coerce_str(&n.to_string())
            .with_context(|| format!("cannot use {n} as {ty}"))?,
        (DynSolType::Array(inner), Value::Array(items)) => DynSolValue::Array(
            items
                .iter()
                .map(|item| coerce_arg(inner, item, accounts))
                .collect::<Result<_>>()?,
        ),
        (DynSolType::FixedArray(inner, len), Value::Array(items)) => {
            if items.len() != *len {
                bail!("{ty} takes {len} items, got {}", items.len());
            }
            DynSolValue::FixedArray(
                items
                    .iter()
                    .map(|item| coerce_arg(inner, item, accounts))
                    .collect::<Result<_>>()?,
            )
        }
        (DynSolType::Tuple(members), Value::Array(items)) => {
            if members.len() != items.len() {
                bail!(
                    "tuple {ty} takes {} members, got {}",
                    members.len(),
                    items.len()
                );
            }
            DynSolValue::Tuple(
                members
                    .iter()
                    .zip(items)
                    .map(|(member, item)| coerce_arg(member, item, accounts))
                    .collect::<Result<_>>()?,
            )
        }
        (
            DynSolType::Uint(_)
            | DynSolType::Int(_)
            | DynSolType::Bool
            | DynSolType::Bytes
            | DynSolType::FixedBytes(_)
            | DynSolType::String,
            Value::String(s),
        ) => ty
            .coerce_str(s)
            .with_context(|| format!("cannot use {s:?} as {ty}"))?,
        (ty, value) => bail!("cannot use {} value {value} as {ty}", value.type_str()),
    };
    Ok(coerced)
}
