//! Sequential breadcrumb expansion.

use crate::model::NodeId;
use std::collections::VecDeque;

/// One step of a breadcrumb walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanStep {
    /// Move to the cursor's `index`-th child and expand it immediately
    Expand { index: usize },
    /// Mark the cursor node as the current page
    Select,
    /// Scroll the selected row to the vertical center
    CenterSelected,
}

/// Task list that walks a breadcrumb path from the root.
///
/// Steps run in order. When a step starts a visual effect that has not
/// finished, the tree parks the plan and resumes it once the host reports
/// the effect as done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreadcrumbPlan {
    steps: VecDeque<PlanStep>,
    cursor: NodeId,
}

impl BreadcrumbPlan {
    /// Plan for an index path. An empty path plans nothing.
    pub fn new(path: &[usize]) -> Self {
        let mut steps: VecDeque<PlanStep> = path
            .iter()
            .map(|&index| PlanStep::Expand { index })
            .collect();
        if !path.is_empty() {
            steps.push_back(PlanStep::Select);
            steps.push_back(PlanStep::CenterSelected);
        }
        Self {
            steps,
            cursor: NodeId::ROOT,
        }
    }

    pub fn steps(&self) -> impl Iterator<Item = &PlanStep> {
        self.steps.iter()
    }

    pub fn is_finished(&self) -> bool {
        self.steps.is_empty()
    }

    /// Node reached so far.
    pub const fn cursor(&self) -> NodeId {
        self.cursor
    }

    pub(crate) fn next_step(&mut self) -> Option<PlanStep> {
        self.steps.pop_front()
    }

    pub(crate) const fn move_to(&mut self, node: NodeId) {
        self.cursor = node;
    }

    pub(crate) fn abandon(&mut self) {
        self.steps.clear();
    }
}
