//! Map rotation reconciliation.
//!
//! The remote rotation only supports appending and removing single entries,
//! and must never be observed empty. `reconcile` computes the shortest
//! add/remove sequence that converges the live list to the desired one
//! while upholding that invariant at every intermediate step.

use serde::Serialize;

use crate::error::{AdminError, AdminResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", content = "map", rename_all = "snake_case")]
pub enum RotationOp {
    Add(String),
    Remove(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RotationPlan {
    pub current: Vec<String>,
    pub desired: Vec<String>,
    pub ops: Vec<RotationOp>,
}

/// Plan the remote operations converging `current` to `desired`.
///
/// Preconditions, checked before any plan is produced: `desired` must be
/// non-empty and free of duplicates.
pub fn reconcile(current: &[String], desired: &[String]) -> AdminResult<RotationPlan> {
    if desired.is_empty() {
        return Err(AdminError::Precondition(
            "desired rotation must not be empty".to_string(),
        ));
    }
    for (i, map) in desired.iter().enumerate() {
        if desired[..i].contains(map) {
            return Err(AdminError::Precondition(format!(
                "desired rotation lists {map:?} more than once"
            )));
        }
    }

    let mut plan = RotationPlan {
        current: current.to_vec(),
        desired: desired.to_vec(),
        ops: Vec::new(),
    };
    if current == desired {
        return Ok(plan);
    }

    if current.len() == 1 {
        // Entry-at-a-time: with a single live entry, anything already
        // present may only be removed once a replacement landed.
        for (idx, map) in desired.iter().enumerate() {
            if !current.contains(map) {
                plan.ops.push(RotationOp::Add(map.clone()));
            } else if idx != 0 {
                plan.ops.push(RotationOp::Remove(map.clone()));
                plan.ops.push(RotationOp::Add(map.clone()));
            }
        }
        if !desired.contains(&current[0]) {
            plan.ops.push(RotationOp::Remove(current[0].clone()));
        }
        return Ok(plan);
    }

    let first = &desired[0];
    let to_remove: Vec<&String> = current.iter().filter(|m| *m != first).collect();
    if to_remove.len() == current.len() {
        // The anchor entry is not live yet; add it before any removal so
        // the rotation cannot drain to empty.
        plan.ops.push(RotationOp::Add(first.clone()));
    }
    for map in to_remove {
        plan.ops.push(RotationOp::Remove(map.clone()));
    }
    for map in &desired[1..] {
        plan.ops.push(RotationOp::Add(map.clone()));
    }
    Ok(plan)
}
