// ascent_core/src/animation/animator.rs
use std::collections::HashMap;

/// A value pushed into an animation graph parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatorValue {
    Bool(bool),
    Integer(i32),
}

/// Parameter surface of an engine animation graph. The core only ever
/// pushes values; the readers exist for diagnostics.
#[derive(Debug, Clone, Default)]
pub struct Animator {
    /// Name of the runtime animation controller bound to this animator.
    runtime_controller: Option<String>,
    parameters: HashMap<String, AnimatorValue>,
    /// Number of times the graph has been rebound.
    rebinds: u32,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_bool(&mut self, name: &str, value: bool) {
        self.parameters.insert(name.to_string(), AnimatorValue::Bool(value));
    }

    pub fn set_integer(&mut self, name: &str, value: i32) {
        self.parameters.insert(name.to_string(), AnimatorValue::Integer(value));
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        match self.parameters.get(name) {
            Some(AnimatorValue::Bool(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn get_integer(&self, name: &str) -> Option<i32> {
        match self.parameters.get(name) {
            Some(AnimatorValue::Integer(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn runtime_controller(&self) -> Option<&str> {
        self.runtime_controller.as_deref()
    }

    pub fn set_runtime_controller(&mut self, controller: impl Into<String>) {
        self.runtime_controller = Some(controller.into());
    }

    /// Clears every parameter so the graph starts from its defaults.
    pub fn rebind(&mut self) {
        self.parameters.clear();
        self.rebinds += 1;
    }

    pub fn rebinds(&self) -> u32 {
        self.rebinds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_readers_ignore_other_kinds() {
        let mut animator = Animator::new();
        animator.set_bool("moving", true);
        animator.set_integer("progress", 2);

        assert_eq!(animator.get_bool("moving"), Some(true));
        assert_eq!(animator.get_integer("moving"), None);
        assert_eq!(animator.get_integer("progress"), Some(2));
    }

    #[test]
    fn rebind_clears_parameters() {
        let mut animator = Animator::new();
        animator.set_runtime_controller("BasementElevator");
        animator.set_bool("moving", true);
        animator.rebind();

        assert_eq!(animator.get_bool("moving"), None);
        assert_eq!(animator.runtime_controller(), Some("BasementElevator"));
        assert_eq!(animator.rebinds(), 1);
    }
}
