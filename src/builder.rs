//! Builder pattern walkthrough.
//!
//! Separates the construction of a composite value from its representation:
//! the same fluent step sequence can produce differently configured results.
//! This entry is illustrative only — a fixed step sequence with no branching
//! or error paths. The systems-grade content of this crate lives in the
//! singleton registry; see `registry.rs`.
//!
//! Run the demo with: `cargo run --example builder`

use std::fmt;

/// The composite value assembled by [`HouseBuilder`].
///
/// Fields are private; the only way to obtain a `House` is through the
/// builder, which guarantees every field was set by a named step.
#[derive(Debug, PartialEq, Eq)]
pub struct House {
    walls: u8,
    doors: u8,
    windows: u8,
    has_garage: bool,
    has_garden: bool,
}

impl House {
    /// Starting point of the fluent step sequence.
    pub fn builder() -> HouseBuilder {
        HouseBuilder::default()
    }

    pub fn has_garage(&self) -> bool {
        self.has_garage
    }

    pub fn has_garden(&self) -> bool {
        self.has_garden
    }
}

impl fmt::Display for House {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "House with {} walls, {} doors, {} windows",
            self.walls, self.doors, self.windows
        )?;
        if self.has_garage {
            write!(f, ", a garage")?;
        }
        if self.has_garden {
            write!(f, ", a garden")?;
        }
        Ok(())
    }
}

/// Step-by-step assembler for [`House`].
///
/// Every `with_*` step consumes and returns the builder, so a construction
/// reads as one fluent chain. Unset steps fall back to the defaults below.
#[derive(Debug, Clone)]
pub struct HouseBuilder {
    walls: u8,
    doors: u8,
    windows: u8,
    has_garage: bool,
    has_garden: bool,
}

impl Default for HouseBuilder {
    fn default() -> Self {
        HouseBuilder {
            walls: 4,
            doors: 1,
            windows: 0,
            has_garage: false,
            has_garden: false,
        }
    }
}

impl HouseBuilder {
    pub fn with_walls(mut self, walls: u8) -> Self {
        self.walls = walls;
        self
    }

    pub fn with_doors(mut self, doors: u8) -> Self {
        self.doors = doors;
        self
    }

    pub fn with_windows(mut self, windows: u8) -> Self {
        self.windows = windows;
        self
    }

    pub fn with_garage(mut self) -> Self {
        self.has_garage = true;
        self
    }

    pub fn with_garden(mut self) -> Self {
        self.has_garden = true;
        self
    }

    /// Final step: hand over the assembled value.
    pub fn build(self) -> House {
        House {
            walls: self.walls,
            doors: self.doors,
            windows: self.windows,
            has_garage: self.has_garage,
            has_garden: self.has_garden,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_build() {
        let house = House::builder().build();
        assert_eq!(house.to_string(), "House with 4 walls, 1 doors, 0 windows");
    }

    #[test]
    fn test_full_step_sequence() {
        let house = House::builder()
            .with_walls(6)
            .with_doors(2)
            .with_windows(8)
            .with_garage()
            .with_garden()
            .build();

        assert!(house.has_garage());
        assert!(house.has_garden());
        assert_eq!(
            house.to_string(),
            "House with 6 walls, 2 doors, 8 windows, a garage, a garden"
        );
    }

    #[test]
    fn test_same_steps_same_house() {
        let a = House::builder().with_windows(3).build();
        let b = House::builder().with_windows(3).build();
        assert_eq!(a, b);
    }
}
