//! Node registry - named pipeline entry points for graph hosts.
//!
//! Each node declares its inputs, return types, entry-point function and
//! display category in a [`NodeSpec`]. Hosts look nodes up by name in
//! [`registry`] and invoke them with a string-keyed input map. Invocation
//! never fails at this boundary: errors are logged and the node returns no
//! outputs.

use eyre::{Context, OptionExt, Result, eyre};
use fapmix_pipeline::config::ToolConfig;
use fapmix_pipeline::download::YtDlp;
use fapmix_pipeline::error::Error;
use fapmix_pipeline::stage::StageRunner;
use fapmix_pipeline::{mix, premix};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

const CATEGORY: &str = "Audio Processing";
const FUNCTION: &str = "process_audio";

/// Value kinds exchanged with the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldKind {
    DirectoryPath,
    String,
}

/// One required input of a node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InputField {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Value used when the host omits the field; `None` makes it mandatory
    pub default: Option<&'static str>,
}

impl InputField {
    const fn directory(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::DirectoryPath,
            default: None,
        }
    }
}

/// Metadata a host needs to place and call a node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NodeSpec {
    pub name: &'static str,
    pub category: &'static str,
    pub function: &'static str,
    pub inputs: Vec<InputField>,
    pub return_types: Vec<FieldKind>,
}

/// Registered nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Node {
    /// Post-processing mix pipeline
    FapMix,
    /// Pre-processing mix pipeline
    PreFapMix,
}

impl Node {
    pub const ALL: [Node; 2] = [Node::FapMix, Node::PreFapMix];

    pub fn name(self) -> &'static str {
        match self {
            Node::FapMix => "fapMix",
            Node::PreFapMix => "preFapMix",
        }
    }

    pub fn spec(self) -> NodeSpec {
        let (inputs, return_types) = match self {
            Node::FapMix => (
                vec![
                    InputField::directory("audio_input_dir"),
                    InputField::directory("output_dir"),
                    InputField {
                        name: "url",
                        kind: FieldKind::String,
                        default: Some(""),
                    },
                ],
                vec![FieldKind::DirectoryPath],
            ),
            Node::PreFapMix => (
                vec![
                    InputField::directory("audio_input_dir"),
                    InputField::directory("output_dir"),
                ],
                vec![],
            ),
        };

        NodeSpec {
            name: self.name(),
            category: CATEGORY,
            function: FUNCTION,
            inputs,
            return_types,
        }
    }

    /// Run the node. Failures are logged and yield an empty output.
    pub fn invoke(self, inputs: &BTreeMap<String, String>, tool: ToolConfig) -> Vec<PathBuf> {
        match self.try_invoke(inputs, tool) {
            Ok(outputs) => outputs,
            Err(e) => {
                tracing::error!(node = self.name(), error = %e, "node failed");
                Vec::new()
            }
        }
    }

    fn try_invoke(
        self,
        inputs: &BTreeMap<String, String>,
        tool: ToolConfig,
    ) -> fapmix_pipeline::error::Result<Vec<PathBuf>> {
        let values = resolve_inputs(&self.spec(), inputs)?;
        let mut runner = StageRunner::new(tool);

        match self {
            Node::FapMix => {
                let request = mix::MixRequest {
                    audio_input_dir: PathBuf::from(values["audio_input_dir"]),
                    output_dir: PathBuf::from(values["output_dir"]),
                    url: Some(values["url"].to_string()),
                };

                let out = mix::process_audio(&mut runner, &mut YtDlp::default(), &request)?;

                Ok(out.map(|o| o.run_dir).into_iter().collect())
            }
            Node::PreFapMix => {
                let request = premix::PreMixRequest {
                    audio_input_dir: PathBuf::from(values["audio_input_dir"]),
                    output_dir: PathBuf::from(values["output_dir"]),
                };

                premix::process_audio(&mut runner, &request)?;

                Ok(Vec::new())
            }
        }
    }
}

/// Name → node map consumed by hosts.
pub fn registry() -> BTreeMap<&'static str, Node> {
    Node::ALL.into_iter().map(|n| (n.name(), n)).collect()
}

/// Pick each declared input from `inputs`, falling back to its default.
fn resolve_inputs<'a>(
    spec: &NodeSpec,
    inputs: &'a BTreeMap<String, String>,
) -> fapmix_pipeline::error::Result<BTreeMap<&'static str, &'a str>> {
    for key in inputs.keys() {
        if !spec.inputs.iter().any(|f| f.name == key.as_str()) {
            tracing::warn!(node = spec.name, input = %key, "ignoring undeclared input");
        }
    }

    spec.inputs
        .iter()
        .map(|field| {
            inputs
                .get(field.name)
                .map(String::as_str)
                .or(field.default)
                .map(|value| (field.name, value))
                .ok_or_else(|| Error::MissingInput(format!("{}.{}", spec.name, field.name)))
        })
        .collect()
}

/// CLI arguments for invoking a registered node.
#[derive(clap::Args, Debug)]
pub struct Args {
    /// Registered node name (see `fapmix nodes`)
    pub node: String,

    /// Node input as key=value, repeatable
    #[arg(short, long = "input", value_parser = parse_key_val)]
    pub inputs: Vec<(String, String)>,

    #[command(flatten)]
    pub tool: ToolConfig,
}

/// Resolved configuration for a node invocation.
#[derive(Debug)]
pub struct Config {
    pub node: Node,
    pub inputs: BTreeMap<String, String>,
    pub tool: ToolConfig,
}

impl TryFrom<Args> for Config {
    type Error = eyre::Error;

    fn try_from(args: Args) -> Result<Self> {
        let node = registry()
            .get(args.node.as_str())
            .copied()
            .ok_or_else(|| eyre!("unknown node: {:?}", args.node))?;

        Ok(Self {
            node,
            inputs: args.inputs.into_iter().collect(),
            tool: args.tool,
        })
    }
}

pub fn execute(config: Config) -> Result<()> {
    tracing::info!(node = config.node.name(), "invoking node");

    for output in config.node.invoke(&config.inputs, config.tool) {
        println!("{}", output.display());
    }

    Ok(())
}

/// Print every node spec as JSON.
pub fn list() -> Result<()> {
    let specs = registry().values().map(|n| n.spec()).collect::<Vec<_>>();
    let json = serde_json::to_string_pretty(&specs).wrap_err("failed to serialize node specs")?;

    println!("{json}");

    Ok(())
}

fn parse_key_val(s: &str) -> Result<(String, String)> {
    let (key, value) = s.split_once('=').ok_or_eyre("expected key=value")?;

    Ok((key.trim().to_string(), value.to_string()))
}
