//! Conceptual search path for one address.
//!
//! A path is the chain of guide-tree steps the persisted tree has to mirror
//! for an address: a descent through the guide tree for section 0, then,
//! once the octet matches, a fresh descent from the guide root for section 1,
//! and so on until section 3 matches. Every step except the last continues
//! through exactly one branch, so the chain is stored flat.

use std::cmp::Ordering;

use crate::address::{Ipv4Address, SECTIONS};
use crate::guide::{GuideTree, NodeId};
use crate::{Error, Result};

/// Which child of a record a step continues through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    Left,
    Right,
    NextSection,
}

impl Branch {
    pub fn name(&self) -> &'static str {
        match self {
            Branch::Left => "left",
            Branch::Right => "right",
            Branch::NextSection => "next-section",
        }
    }
}

/// One node of the conceptual path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathStep {
    /// Section (0..=3) this step searches.
    pub section: usize,
    /// Target address projected onto this step.
    pub address: Ipv4Address,
    /// Branch leading to the following step; `None` on the terminal step.
    pub branch: Option<Branch>,
}

impl PathStep {
    /// Whether this step ends the whole four-section search.
    pub fn is_terminal(&self) -> bool {
        self.branch.is_none()
    }
}

/// Ordered chain of steps from the section-0 root to the terminal step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPath {
    target: Ipv4Address,
    steps: Vec<PathStep>,
}

impl SearchPath {
    /// Build the path for `target`, starting at the guide root for section 0.
    pub fn build(guide: &GuideTree, target: &Ipv4Address) -> Result<Self> {
        let mut steps = Vec::with_capacity(SECTIONS * 9);
        let mut section = 0;
        let mut node_id: NodeId = guide.root();

        loop {
            let node = guide.node(node_id);
            let octet = target.section(section);
            let address = target.project(section, node.value);

            let (branch, next) = match octet.cmp(&node.value) {
                Ordering::Equal if section == SECTIONS - 1 => {
                    steps.push(PathStep {
                        section,
                        address,
                        branch: None,
                    });
                    break;
                }
                Ordering::Equal => (Branch::NextSection, Some(guide.root())),
                Ordering::Less => (Branch::Left, node.left),
                Ordering::Greater => (Branch::Right, node.right),
            };

            let next = next.ok_or_else(|| {
                Error::Structural(format!(
                    "guide tree has no {} child under {} while searching {} in section {}",
                    branch.name(),
                    node.value,
                    octet,
                    section
                ))
            })?;

            steps.push(PathStep {
                section,
                address,
                branch: Some(branch),
            });
            if branch == Branch::NextSection {
                section += 1;
            }
            node_id = next;
        }

        Ok(Self {
            target: *target,
            steps,
        })
    }

    /// The address this path searches for.
    pub fn target(&self) -> &Ipv4Address {
        &self.target
    }

    /// All steps, root first.
    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    /// First step (the section-0 guide root).
    pub fn root(&self) -> &PathStep {
        &self.steps[0]
    }

    /// Last step, which always matches the full target address.
    pub fn terminal(&self) -> &PathStep {
        &self.steps[self.steps.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
