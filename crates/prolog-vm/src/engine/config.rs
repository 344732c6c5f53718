//! Resolver configuration, built the same way as the teacher's VM fuel
//! limits: small `Default` struct, consuming builder methods.

/// Resource limits and search policy for one [`super::Resolver`].
#[derive(Clone, Copy, Debug)]
pub struct ResolverConfig {
    /// Dispatched-instruction budget per solution search; `0` means
    /// unlimited. Exceeding it surfaces `max-steps-exceeded` rather than
    /// silently reporting no solution.
    max_steps: u32,
    trail_capacity: usize,
    heap_capacity: usize,
    /// Whether clause bodies resolve left to right (the only mode this
    /// engine implements; kept as a config bit since it's part of the
    /// documented external interface).
    left_to_right_bodies: bool,
    /// Strict mode surfaces a built-in's type-error/instantiation-error
    /// as a hard `Err`; lenient mode treats it as ordinary call failure.
    strict_errors: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_steps: 0,
            trail_capacity: 1024,
            heap_capacity: 1024,
            left_to_right_bodies: true,
            strict_errors: false,
        }
    }
}

impl ResolverConfig {
    pub fn max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn trail_capacity(mut self, capacity: usize) -> Self {
        self.trail_capacity = capacity;
        self
    }

    pub fn heap_capacity(mut self, capacity: usize) -> Self {
        self.heap_capacity = capacity;
        self
    }

    pub fn left_to_right_bodies(mut self, left_to_right: bool) -> Self {
        self.left_to_right_bodies = left_to_right;
        self
    }

    pub fn get_max_steps(&self) -> u32 {
        self.max_steps
    }

    pub fn get_trail_capacity(&self) -> usize {
        self.trail_capacity
    }

    pub fn get_heap_capacity(&self) -> usize {
        self.heap_capacity
    }

    pub fn get_left_to_right_bodies(&self) -> bool {
        self.left_to_right_bodies
    }

    pub fn strict_errors(mut self, strict: bool) -> Self {
        self.strict_errors = strict;
        self
    }

    pub fn get_strict_errors(&self) -> bool {
        self.strict_errors
    }
}
