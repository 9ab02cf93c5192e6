//! JSON exporter for workbench consumption.
//!
//! Wraps a built graph in an envelope carrying the build parameters, so a
//! rendered view can always be traced back to the seed that produced it.

use crate::error::GraphError;
use crate::model::AgentGraph;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;

/// A built graph plus the parameters that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphExport {
    /// Build mode ("ego" or "sample").
    pub mode: String,

    /// Seed used
    pub seed: u64,

    /// Population bound the build ran against.
    pub sample_agents: u64,

    /// Focus or ensured agent, when one was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<u64>,

    pub node_count: usize,
    pub edge_count: usize,

    /// The graph itself.
    pub graph: AgentGraph,
}

impl GraphExport {
    /// Wraps a graph in its export envelope.
    pub fn new(
        mode: &str,
        seed: u64,
        sample_agents: u64,
        anchor: Option<u64>,
        graph: AgentGraph,
    ) -> Self {
        Self {
            mode: mode.to_string(),
            seed,
            sample_agents,
            anchor,
            node_count: graph.nodes.len(),
            edge_count: graph.edges.len(),
            graph,
        }
    }

    /// Serializes to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, GraphError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the export to a JSON file.
    pub fn write_to_file(&self, path: &str) -> Result<(), GraphError> {
        let json = self.to_json_pretty()?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}
