//! Depth-slot animation state for the card stack.
//!
//! Slot 0 sits immediately behind the active card; deeper slots recede with
//! a fixed vertical separation and scale step. Slots are an explicit indexed
//! sequence rebuilt whenever the stack size changes.

use swipedeck_animation::{Animatable, AnimationType, SpringSpec};
use swipedeck_core::RuntimeHandle;

/// Animated position/scale pair for one depth slot.
#[derive(Clone)]
pub struct StackSlot {
    pub position: Animatable<f32>,
    pub scale: Animatable<f32>,
}

/// The per-depth-slot animation state beneath the active card.
#[derive(Clone)]
pub struct StackSlots {
    runtime: RuntimeHandle,
    slots: Vec<StackSlot>,
    separation: f32,
    scale_step: f32,
    spring: SpringSpec,
}

impl StackSlots {
    pub fn new(
        runtime: RuntimeHandle,
        stack_size: usize,
        separation: f32,
        scale_step: f32,
        spring: SpringSpec,
    ) -> Self {
        let mut slots = Self {
            runtime,
            slots: Vec::new(),
            separation,
            scale_step,
            spring,
        };
        slots.rebuild(stack_size);
        slots
    }

    /// Resting vertical offset for a depth slot.
    pub fn resting_position(&self, slot: usize) -> f32 {
        self.separation * slot as f32
    }

    /// Resting scale for a depth slot. `scale_step` is in percent.
    pub fn resting_scale(&self, slot: usize) -> f32 {
        (100.0 - self.scale_step * slot as f32) / 100.0
    }

    /// Drops the current slots and seeds one animated pair per depth slot.
    pub fn rebuild(&mut self, stack_size: usize) {
        self.slots = (0..stack_size)
            .map(|slot| StackSlot {
                position: Animatable::new(self.resting_position(slot), self.runtime.clone()),
                scale: Animatable::new(self.resting_scale(slot), self.runtime.clone()),
            })
            .collect();
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slot(&self, index: usize) -> Option<&StackSlot> {
        self.slots.get(index)
    }

    /// Current `(position, scale)` of a slot, resting values if out of range.
    pub fn current(&self, index: usize) -> (f32, f32) {
        match self.slots.get(index) {
            Some(slot) => (slot.position.value(), slot.scale.value()),
            None => (self.resting_position(index), self.resting_scale(index)),
        }
    }

    /// Springs each occupied slot one position closer to the front, so the
    /// next card rises to fill the gap the committing card leaves. Only the
    /// first `occupied` slots hold cards; deeper slots stay put.
    pub fn shift_forward(&self, occupied: usize) {
        for slot_index in 1..occupied.min(self.slots.len()) {
            let slot = &self.slots[slot_index];
            let animation = AnimationType::Spring(self.spring);
            slot.position
                .animate_to(self.resting_position(slot_index - 1), animation);
            slot.scale
                .animate_to(self.resting_scale(slot_index - 1), animation);
        }
    }

    /// Snaps every slot back to its resting geometry. Runs after the
    /// post-commit index update so the advanced render starts at rest.
    pub fn snap_to_rest(&self) {
        for (slot_index, slot) in self.slots.iter().enumerate() {
            slot.position.snap_to(self.resting_position(slot_index));
            slot.scale.snap_to(self.resting_scale(slot_index));
        }
    }

    /// Cancels in-flight slot animations and detaches their listeners.
    pub fn teardown(&self) {
        for slot in &self.slots {
            slot.position.stop();
            slot.position.clear_listeners();
            slot.scale.stop();
            slot.scale.clear_listeners();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swipedeck_core::Runtime;

    fn drive(runtime: &Runtime, frames: u32) {
        let handle = runtime.handle();
        let mut time = 0u64;
        for _ in 0..frames {
            time += 16_666_667;
            handle.drain_frame_callbacks(time);
        }
    }

    #[test]
    fn slots_seed_with_monotonic_depth() {
        let runtime = Runtime::default();
        let stack = StackSlots::new(runtime.handle(), 3, 10.0, 3.0, SpringSpec::default());

        assert_eq!(stack.len(), 3);
        assert_eq!(stack.current(0), (0.0, 1.0));
        assert_eq!(stack.current(1), (10.0, 0.97));
        assert_eq!(stack.current(2), (20.0, 0.94));
    }

    #[test]
    fn rebuild_resizes_and_reseeds() {
        let runtime = Runtime::default();
        let mut stack = StackSlots::new(runtime.handle(), 2, 10.0, 3.0, SpringSpec::default());
        stack.slot(1).unwrap().position.snap_to(99.0);

        stack.rebuild(4);
        assert_eq!(stack.len(), 4);
        assert_eq!(stack.current(1), (10.0, 0.97));
        assert_eq!(stack.current(3), (30.0, 0.91));
    }

    #[test]
    fn shift_forward_moves_occupied_slots_one_position_up() {
        let runtime = Runtime::default();
        let stack = StackSlots::new(runtime.handle(), 3, 10.0, 3.0, SpringSpec::default());

        stack.shift_forward(3);
        drive(&runtime, 600);

        let (pos1, scale1) = stack.current(1);
        assert!((pos1 - 0.0).abs() < 0.01, "slot 1 position {}", pos1);
        assert!((scale1 - 1.0).abs() < 0.001, "slot 1 scale {}", scale1);

        let (pos2, scale2) = stack.current(2);
        assert!((pos2 - 10.0).abs() < 0.01, "slot 2 position {}", pos2);
        assert!((scale2 - 0.97).abs() < 0.001, "slot 2 scale {}", scale2);
    }

    #[test]
    fn shift_forward_leaves_unoccupied_slots_resting() {
        let runtime = Runtime::default();
        let stack = StackSlots::new(runtime.handle(), 3, 10.0, 3.0, SpringSpec::default());

        // Only one card behind the active one; slot 2 has no card.
        stack.shift_forward(2);
        drive(&runtime, 600);

        assert_eq!(stack.current(2), (20.0, 0.94));
    }

    #[test]
    fn snap_to_rest_restores_seeded_geometry() {
        let runtime = Runtime::default();
        let stack = StackSlots::new(runtime.handle(), 2, 10.0, 3.0, SpringSpec::default());

        stack.shift_forward(2);
        drive(&runtime, 120);
        stack.snap_to_rest();

        assert_eq!(stack.current(0), (0.0, 1.0));
        assert_eq!(stack.current(1), (10.0, 0.97));
    }
}
