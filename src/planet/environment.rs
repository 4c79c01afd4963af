//! Physical traits of a planet

use serde::{Deserialize, Serialize};

/// Smallest and largest allowed ground size
pub const MIN_GROUND_SIZE: u32 = 7;
pub const MAX_GROUND_SIZE: u32 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Gravity {
    Low = 0,
    Normal = 1,
    High = 2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Temperature {
    Frozen = 0,
    Cold = 1,
    Temperate = 2,
    Hot = 3,
    Volcanic = 4,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum WaterLevel {
    Barren = 0,
    Arid = 1,
    Humid = 2,
    Ocean = 3,
}

impl Gravity {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Gravity::Low),
            1 => Some(Gravity::Normal),
            2 => Some(Gravity::High),
            _ => None,
        }
    }
}

impl Temperature {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Temperature::Frozen),
            1 => Some(Temperature::Cold),
            2 => Some(Temperature::Temperate),
            3 => Some(Temperature::Hot),
            4 => Some(Temperature::Volcanic),
            _ => None,
        }
    }
}

impl WaterLevel {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(WaterLevel::Barren),
            1 => Some(WaterLevel::Arid),
            2 => Some(WaterLevel::Humid),
            3 => Some(WaterLevel::Ocean),
            _ => None,
        }
    }

    /// Food the planet yields with nobody farming
    pub fn food_baseline(self) -> i32 {
        self as i32
    }
}

/// Physical description of a planet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    /// Building slots, 7..=16
    pub ground_size: u32,
    pub gravity: Gravity,
    pub temperature: Temperature,
    pub water: WaterLevel,
    /// Radiation category, 0 (none) upwards
    pub radiation: u8,
    pub gas_giant: bool,
}

impl Environment {
    /// Create an environment, clamping ground size into the legal range
    pub fn new(ground_size: u32) -> Self {
        Self {
            ground_size: ground_size.clamp(MIN_GROUND_SIZE, MAX_GROUND_SIZE),
            gravity: Gravity::Normal,
            temperature: Temperature::Temperate,
            water: WaterLevel::Humid,
            radiation: 0,
            gas_giant: false,
        }
    }

    pub fn with_water(mut self, water: WaterLevel) -> Self {
        self.water = water;
        self
    }

    pub fn with_radiation(mut self, radiation: u8) -> Self {
        self.radiation = radiation;
        self
    }

    pub fn with_gravity(mut self, gravity: Gravity) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_temperature(mut self, temperature: Temperature) -> Self {
        self.temperature = temperature;
        self
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ground_size_clamped() {
        assert_eq!(Environment::new(3).ground_size, MIN_GROUND_SIZE);
        assert_eq!(Environment::new(40).ground_size, MAX_GROUND_SIZE);
        assert_eq!(Environment::new(12).ground_size, 12);
    }

    #[test]
    fn test_codes_round_trip() {
        for code in 0..=4u8 {
            let t = Temperature::from_code(code).unwrap();
            assert_eq!(t.code(), code);
        }
        assert_eq!(Gravity::from_code(9), None);
        assert_eq!(WaterLevel::from_code(3), Some(WaterLevel::Ocean));
    }

    #[test]
    fn test_food_baseline_by_water() {
        assert_eq!(WaterLevel::Barren.food_baseline(), 0);
        assert_eq!(WaterLevel::Arid.food_baseline(), 1);
        assert_eq!(WaterLevel::Humid.food_baseline(), 2);
        assert_eq!(WaterLevel::Ocean.food_baseline(), 3);
    }
}
