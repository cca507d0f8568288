//! Growth stage state shared by crop blocks.

use masonry_engine::state::{DescribeState, Result, StateDescriber, StateError};

/// A growth stage in `MIN..=MAX`. Starts at `MIN`.
///
/// Packs into the bits needed for `MAX - MIN`, whatever the current age is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Age<const MIN: u32, const MAX: u32> {
    age: u32,
}

pub type WheatAge = Age<0, 7>;
pub type BeetrootAge = Age<0, 3>;

impl<const MIN: u32, const MAX: u32> Age<MIN, MAX> {
    pub const MIN_AGE: u32 = MIN;
    pub const MAX_AGE: u32 = MAX;

    pub const fn new() -> Self {
        Self { age: Self::MIN_AGE }
    }

    pub fn with_age(age: u32) -> Result<Self> {
        let mut state = Self::new();
        state.set_age(age)?;
        Ok(state)
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn set_age(&mut self, age: u32) -> Result<&mut Self> {
        if !(Self::MIN_AGE..=Self::MAX_AGE).contains(&age) {
            return Err(StateError::domain(
                "age",
                format!("must be in the range {} ... {}, got {}", Self::MIN_AGE, Self::MAX_AGE, age),
            ));
        }
        self.age = age;
        Ok(self)
    }

    pub fn is_mature(&self) -> bool {
        self.age == Self::MAX_AGE
    }

    /// Advance one stage. Returns false once mature.
    pub fn grow(&mut self) -> bool {
        if self.is_mature() {
            return false;
        }
        self.age += 1;
        true
    }
}

impl<const MIN: u32, const MAX: u32> Default for Age<MIN, MAX> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const MIN: u32, const MAX: u32> DescribeState for Age<MIN, MAX> {
    fn describe_state(&mut self, describer: &mut StateDescriber) -> Result<()> {
        describer.bounded_int("age", Self::MIN_AGE, Self::MAX_AGE, &mut self.age)
    }
}
