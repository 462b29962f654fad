//! Executes a manifest against a fresh diamond and builds the report.

use std::collections::HashMap;
use std::fmt;

use anyhow::{Context, Result, bail};
use serde::Serialize;
use serde_json::Value;

use alloy_dyn_abi::{DynSolType, DynSolValue, JsonAbiExt, Specifier};
use alloy_json_abi::Function;
use diamond_core::{CodeRegistry, Diamond, DiamondArgs, DiamondClient, Facet};
use diamond_types::{Address, DiamondError, DiamondEvent, FacetCut, FacetCutAction, FacetInfo, hex};

use crate::manifest::{
    Accounts, CallStep, CutSpec, CutStep, Manifest, Step, coerce_arg, deploy_catalog_entry,
    init_calldata, parse_selector, parse_types,
};

#[derive(Debug, Serialize)]
pub struct RunReport {
    pub diamond: Address,
    pub owner: Address,
    pub deployments: Vec<Deployment>,
    pub steps: Vec<StepReport>,
    pub facets: Vec<FacetInfo>,
    pub events: Vec<DiamondEvent>,
    pub passed: bool,
}

#[derive(Debug, Serialize)]
pub struct Deployment {
    pub name: String,
    pub facet: &'static str,
    pub address: Address,
}

#[derive(Debug, Serialize)]
pub struct StepReport {
    pub index: usize,
    pub kind: &'static str,
    pub summary: String,
    #[serde(flatten)]
    pub outcome: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expect_revert: Option<String>,
    pub matched: bool,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Ok { output: Value },
    Reverted { error: String, message: String },
}

impl Outcome {
    fn from_error(err: &DiamondError) -> Self {
        Outcome::Reverted {
            error: err.name().to_string(),
            message: err.to_string(),
        }
    }

    /// Whether this outcome is what the step asked for.
    fn satisfies(&self, expect_revert: Option<&str>) -> bool {
        match (self, expect_revert) {
            (Outcome::Ok { .. }, None) => true,
            (Outcome::Reverted { error, .. }, Some(expected)) => error == expected,
            _ => false,
        }
    }
}

struct Session {
    code: CodeRegistry,
    diamond: Diamond,
    accounts: Accounts,
    owner: Address,
}

/// Deploy the catalog, construct the diamond and run every step.
///
/// Step failures are recorded in the report. Errors are returned only for
/// manifest problems or a failed construction.
pub fn run(manifest: &Manifest) -> Result<RunReport> {
    let mut code = CodeRegistry::new();
    let mut accounts = Accounts::default();
    let mut deployments = Vec::new();
    for name in manifest.deployments() {
        let address = deploy_catalog_entry(&mut code, name)?;
        accounts.insert_facet(name, address);
        let facet = code.get(address).map_or("?", |facet| facet.name());
        deployments.push(Deployment {
            name: name.to_string(),
            facet,
            address,
        });
    }

    let owner = accounts.resolve(&manifest.diamond.owner)?;
    let mut initial_cuts = Vec::new();
    for name in &manifest.diamond.facets {
        initial_cuts.push(full_cut(&code, &accounts, FacetCutAction::Add, name)?);
    }
    let mut args = DiamondArgs::new(owner);
    if let Some(init) = &manifest.diamond.init {
        args = args.with_init(
            accounts.facet(init)?,
            init_calldata(manifest.diamond.init_call.as_deref())?,
        );
    }
    let diamond = Diamond::deploy(&mut code, &initial_cuts, args)
        .context("Diamond construction failed")?;
    accounts.set_diamond(diamond.address());

    let mut session = Session {
        code,
        diamond,
        accounts,
        owner,
    };
    let mut steps = Vec::with_capacity(manifest.steps.len());
    for (i, step) in manifest.steps.iter().enumerate() {
        let index = i + 1;
        let (kind, summary, outcome) = match step {
            Step::Cut(cut) => ("cut", cut_summary(cut), session.run_cut(cut)?),
            Step::Call(call) => ("call", call.signature.clone(), session.run_call(call)?),
        };
        let expect_revert = step.expect_revert().map(str::to_string);
        let matched = outcome.satisfies(expect_revert.as_deref());
        if !matched {
            tracing::warn!(index, kind, %summary, "Step did not match its expectation");
        }
        steps.push(StepReport {
            index,
            kind,
            summary,
            outcome,
            expect_revert,
            matched,
        });
    }

    let passed = steps.iter().all(|step| step.matched);
    Ok(RunReport {
        diamond: session.diamond.address(),
        owner: session.diamond.owner(),
        deployments,
        steps,
        facets: session.diamond.loupe().facets(),
        events: session.diamond.events().to_vec(),
        passed,
    })
}

impl Session {
    fn client(&mut self, caller: Option<&str>) -> Result<DiamondClient<'_>> {
        let caller = match caller {
            Some(account) => self.accounts.resolve(account)?,
            None => self.owner,
        };
        Ok(DiamondClient::new(&mut self.diamond, &self.code, caller))
    }

    fn run_cut(&mut self, step: &CutStep) -> Result<Outcome> {
        let cuts = step
            .cuts
            .iter()
            .map(|spec| self.build_cut(spec))
            .collect::<Result<Vec<_>>>()?;
        let (init, calldata) = match &step.init {
            Some(init) => (
                self.accounts.facet(init)?,
                init_calldata(step.init_call.as_deref())?,
            ),
            None => (Address::ZERO, Vec::new()),
        };
        let result = self
            .client(step.caller.as_deref())?
            .diamond_cut(cuts, init, calldata);
        Ok(match result {
            Ok(()) => Outcome::Ok {
                output: Value::Null,
            },
            Err(e) => Outcome::from_error(&e),
        })
    }

    fn build_cut(&self, spec: &CutSpec) -> Result<FacetCut> {
        match (&spec.selectors, &spec.facet) {
            (None, Some(facet)) => full_cut(&self.code, &self.accounts, spec.action, facet),
            (Some(sigs), facet) => {
                let selectors = sigs
                    .iter()
                    .map(|s| parse_selector(s))
                    .collect::<Result<Vec<_>>>()?;
                let facet_address = match (spec.action, facet) {
                    (FacetCutAction::Remove, None) => Address::ZERO,
                    (_, Some(facet)) => self.accounts.resolve(facet)?,
                    (action, None) => bail!("{action} cut needs a facet"),
                };
                Ok(FacetCut {
                    facet_address,
                    action: spec.action,
                    function_selectors: selectors,
                })
            }
            (None, None) => bail!("{} cut needs a facet or selectors", spec.action),
        }
    }

    fn run_call(&mut self, step: &CallStep) -> Result<Outcome> {
        let function = Function::parse(&step.signature)
            .with_context(|| format!("invalid signature {:?}", step.signature))?;
        let signature = function.signature();
        if function.inputs.len() != step.args.len() {
            bail!(
                "{signature} takes {} arguments, got {}",
                function.inputs.len(),
                step.args.len()
            );
        }
        let values = function
            .inputs
            .iter()
            .zip(&step.args)
            .map(|(param, value)| coerce_arg(&param.resolve()?, value, &self.accounts))
            .collect::<Result<Vec<_>>>()
            .with_context(|| format!("invalid arguments for {signature}"))?;
        let returns = parse_types(&step.returns)?;

        let data = function
            .abi_encode_input(&values)
            .with_context(|| format!("cannot encode arguments for {signature}"))?;
        match self.client(step.caller.as_deref())?.call_raw(data) {
            Ok(raw) if returns.is_empty() => Ok(Outcome::Ok {
                output: Value::String(hex::encode_prefixed(&raw)),
            }),
            Ok(raw) => {
                let decoded = DynSolType::Tuple(returns)
                    .abi_decode_params(&raw)
                    .with_context(|| format!("{signature} returned undecodable data"))?;
                Ok(Outcome::Ok {
                    output: render_value(&decoded),
                })
            }
            Err(e) => Ok(Outcome::from_error(&e)),
        }
    }
}

/// A cut covering every selector the named facet implements.
fn full_cut(
    code: &CodeRegistry,
    accounts: &Accounts,
    action: FacetCutAction,
    name: &str,
) -> Result<FacetCut> {
    let address = accounts.facet(name)?;
    let Some(facet) = code.get(address) else {
        bail!("facet {name:?} has no code");
    };
    let facet_address = if action == FacetCutAction::Remove {
        Address::ZERO
    } else {
        address
    };
    Ok(FacetCut {
        facet_address,
        action,
        function_selectors: facet.selectors(),
    })
}

fn cut_summary(step: &CutStep) -> String {
    let parts: Vec<String> = step
        .cuts
        .iter()
        .map(|spec| {
            let target = spec.facet.as_deref().unwrap_or("-");
            match &spec.selectors {
                Some(sigs) => format!("{} {target} [{}]", spec.action, sigs.join(", ")),
                None => format!("{} {target}", spec.action),
            }
        })
        .collect();
    parts.join("; ")
}

fn render_value(value: &DynSolValue) -> Value {
    match value {
        DynSolValue::Address(a) => Value::String(a.to_string()),
        DynSolValue::Bool(b) => Value::Bool(*b),
        DynSolValue::Uint(n, _) => {
            u64::try_from(*n).map_or_else(|_| Value::String(n.to_string()), Value::from)
        }
        DynSolValue::Int(n, _) => Value::String(n.to_string()),
        DynSolValue::FixedBytes(word, size) => Value::String(hex::encode_prefixed(&word[..*size])),
        DynSolValue::Bytes(b) => Value::String(hex::encode_prefixed(b)),
        DynSolValue::String(s) => Value::String(s.clone()),
        DynSolValue::Function(f) => Value::String(f.to_string()),
        DynSolValue::Array(items) | DynSolValue::FixedArray(items) | DynSolValue::Tuple(items) => {
            Value::Array(items.iter().map(render_value).collect())
        }
    }
}

/// Human-readable rendering of a report.
#[must_use]
pub fn render_text(report: &RunReport) -> String {
    TextReport(report).to_string()
}

struct TextReport<'a>(&'a RunReport);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        let names: HashMap<Address, &str> = report
            .deployments
            .iter()
            .map(|d| (d.address, d.name.as_str()))
            .collect();
        writeln!(f, "diamond {}  owner {}", report.diamond, report.owner)?;

        writeln!(f, "\ndeployed:")?;
        for d in &report.deployments {
            writeln!(f, "  {:<14} {:<20} {}", d.name, d.facet, d.address)?;
        }

        writeln!(f, "\nsteps:")?;
        for step in &report.steps {
            let mark = if step.matched { "ok  " } else { "FAIL" };
            let result = match &step.outcome {
                Outcome::Ok { output: Value::Null } => "ok".to_string(),
                Outcome::Ok { output } => format!("ok {output}"),
                Outcome::Reverted { error, .. } => format!("reverted {error}"),
            };
            write!(
                f,
                "  [{}] {mark} {} {} -> {result}",
                step.index, step.kind, step.summary
            )?;
            if let Some(expected) = &step.expect_revert {
                write!(f, " (expected {expected})")?;
            }
            writeln!(f)?;
        }

        writeln!(f, "\nfacets:")?;
        for info in &report.facets {
            let name = names.get(&info.facet_address).copied().unwrap_or("?");
            writeln!(f, "  {} ({name})", info.facet_address)?;
            for selector in &info.function_selectors {
                writeln!(f, "    {selector}")?;
            }
        }

        writeln!(f, "\nevents: {}", report.events.len())?;
        for event in &report.events {
            match event {
                DiamondEvent::DiamondCut { cuts, init, .. } => {
                    writeln!(f, "  DiamondCut cuts={} init={init}", cuts.len())?;
                }
                DiamondEvent::OwnershipTransferred {
                    previous_owner,
                    new_owner,
                } => writeln!(f, "  OwnershipTransferred {previous_owner} -> {new_owner}")?,
                DiamondEvent::Log { topics, .. } => writeln!(f, "  Log topics={}", topics.len())?,
            }
        }

        writeln!(
            f,
            "\nresult: {}",
            if report.passed { "passed" } else { "failed" }
        )
    }
}
