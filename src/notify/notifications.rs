// Notifications - per-principal findings in discovery order

use crate::policy::Finding;
use std::collections::HashMap;

/// Findings grouped per principal, preserving insertion order.
///
/// The dispatch cap cuts off iteration, so order must match discovery
/// order. A principal key exists iff it has at least one finding;
/// `add` is the only mutator.
#[derive(Debug, Default)]
pub struct Notifications {
    order: Vec<String>,
    by_principal: HashMap<String, Vec<Finding>>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a finding for a principal, creating its list on first use.
    pub fn add(&mut self, principal: &str, finding: Finding) {
        match self.by_principal.get_mut(principal) {
            Some(findings) => findings.push(finding),
            None => {
                self.order.push(principal.to_string());
                self.by_principal
                    .insert(principal.to_string(), vec![finding]);
            }
        }
    }

    /// Number of principals with findings
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate principals and their findings in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Finding])> {
        self.order.iter().map(move |principal| {
            (
                principal.as_str(),
                self.by_principal[principal].as_slice(),
            )
        })
    }

    /// Findings recorded for one principal, if any
    pub fn findings_for(&self, principal: &str) -> Option<&[Finding]> {
        self.by_principal.get(principal).map(|f| f.as_slice())
    }
}
