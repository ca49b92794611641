use super::definition::FlowDefinition;
use anyhow::{Context, Result};
use std::path::Path;

/// Loads every `*.yaml` flow definition from a metadata directory and
/// validates each one.
pub fn load_from_dir(dir: &Path) -> Result<Vec<FlowDefinition>> {
    let mut flows = vec![];
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("reading flow metadata dir {}", dir.display()))?
    {
        let p = entry?.path();
        if p.extension().and_then(|s| s.to_str()) == Some("yaml") {
            let flow: FlowDefinition = serde_yaml::from_str(&std::fs::read_to_string(&p)?)
                .with_context(|| format!("parsing flow definition {}", p.display()))?;
            flow.validate()?;
            flows.push(flow);
        }
    }
    flows.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(flows)
}
