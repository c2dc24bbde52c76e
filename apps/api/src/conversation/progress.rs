use serde::Serialize;

use crate::catalog::{Catalog, PHASE_COUNT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Completed,
    Active,
    Pending,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressStep {
    pub phase: u8,
    pub title: String,
    pub status: StepStatus,
}

/// State of the four-step indicator for the current phase.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Progress {
    pub phase: u8,
    pub steps: Vec<ProgressStep>,
}

impl Progress {
    pub fn for_phase(phase: u8, catalog: &Catalog) -> Self {
        let steps = (1..=PHASE_COUNT as u8)
            .map(|n| ProgressStep {
                phase: n,
                title: catalog
                    .phase(n)
                    .map(|p| p.title.clone())
                    .unwrap_or_default(),
                status: if n < phase {
                    StepStatus::Completed
                } else if n == phase {
                    StepStatus::Active
                } else {
                    StepStatus::Pending
                },
            })
            .collect();

        Progress { phase, steps }
    }
}
