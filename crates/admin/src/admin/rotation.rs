//! Map rotation reads and the reconciler-driven rewrite.

use std::sync::Arc;

use rand::seq::SliceRandom;

use super::Admin;
use crate::channel::commands;
use crate::error::{AdminError, AdminResult};
use crate::invalidation::{rules, ReadSlot};
use crate::response;
use crate::rotation::{reconcile, RotationOp, RotationPlan};

impl Admin {
    /// Live rotation list, every entry validated as a map name.
    pub fn get_map_rotation(&self) -> AdminResult<Arc<Vec<String>>> {
        self.cached(ReadSlot::MapRotation, true, || {
            let maps = response::parse_list(&self.execute(commands::ROT_LIST, &[])?)?;
            for map in &maps {
                response::check_map_name(map)?;
            }
            Ok(maps)
        })
    }

    /// The map the server will switch to next: the rotation entry after the
    /// current map, wrapping at the end. A current map missing from the
    /// rotation falls back to the rotation's first entry.
    pub fn get_next_map(&self) -> AdminResult<Arc<String>> {
        self.cached(ReadSlot::NextMap, true, || {
            let current = self.get_map()?.replace("_RESTART", "");
            let rotation = self.get_map_rotation()?;
            if let Some(position) = rotation.iter().position(|map| *map == current) {
                let next = (position + 1) % rotation.len();
                return Ok(rotation[next].clone());
            }
            tracing::error!(
                current,
                "current map is not in the rotation, assuming the first entry is next"
            );
            rotation.first().cloned().ok_or(AdminError::Precondition(
                "map rotation is empty".to_owned(),
            ))
        })
    }

    pub fn do_add_map_to_rotation(&self, map_name: &str) -> AdminResult<()> {
        self.do_add_maps_to_rotation(&[map_name])
    }

    pub fn do_remove_map_from_rotation(&self, map_name: &str) -> AdminResult<()> {
        self.do_remove_maps_from_rotation(&[map_name])
    }

    pub fn do_add_maps_to_rotation(&self, maps: &[&str]) -> AdminResult<()> {
        self.mutate(rules::ROTATION_CHANGE, || {
            for &map in maps {
                self.execute_ok(commands::ROT_ADD, &[map])?;
            }
            Ok(())
        })
    }

    pub fn do_remove_maps_from_rotation(&self, maps: &[&str]) -> AdminResult<()> {
        self.mutate(rules::ROTATION_CHANGE, || {
            for &map in maps {
                self.execute_ok(commands::ROT_DEL, &[map])?;
            }
            Ok(())
        })
    }

    /// Rewrites the rotation to exactly `desired`, applying the reconciled
    /// add/remove sequence so the live list is never empty mid-flight.
    pub fn set_map_rotation(&self, desired: &[String]) -> AdminResult<RotationPlan> {
        let current = self.get_map_rotation()?;
        let plan = reconcile(&current, desired)?;
        tracing::info!(
            current = ?plan.current,
            desired = ?plan.desired,
            steps = plan.ops.len(),
            "rewriting map rotation"
        );
        self.mutate(rules::ROTATION_CHANGE, || {
            for op in &plan.ops {
                match op {
                    RotationOp::Add(map) => self.execute_ok(commands::ROT_ADD, &[map.as_str()])?,
                    RotationOp::Remove(map) => {
                        self.execute_ok(commands::ROT_DEL, &[map.as_str()])?
                    }
                }
            }
            Ok(())
        })?;
        Ok(plan)
    }

    /// Shuffles the given maps (or the full map list) into the rotation.
    /// Returns the shuffled order that was applied.
    pub fn do_randomize_map_rotation(
        &self,
        maps: Option<Vec<String>>,
    ) -> AdminResult<Vec<String>> {
        let mut maps = match maps {
            Some(maps) => maps,
            None => self.get_maps()?.as_ref().clone(),
        };
        let current = self.get_map_rotation()?;
        maps.shuffle(&mut rand::thread_rng());

        self.mutate(rules::ROTATION_CHANGE, || {
            for map in &maps {
                if current.contains(map) {
                    self.execute_ok(commands::ROT_DEL, &[map.as_str()])?;
                }
                self.execute_ok(commands::ROT_ADD, &[map.as_str()])?;
            }
            Ok(())
        })?;
        Ok(maps)
    }
}
