//! Workforce - the five worker roles of a colony

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::content::ProductionCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkerRole {
    Farmer,
    Miner,
    ProductionWorker,
    Scientist,
    Artist,
}

impl WorkerRole {
    pub const ALL: [WorkerRole; 5] = [
        WorkerRole::Farmer,
        WorkerRole::Miner,
        WorkerRole::ProductionWorker,
        WorkerRole::Scientist,
        WorkerRole::Artist,
    ];

    /// Order in which workers are lost to starvation and sacrifice
    pub const LOSS_PRIORITY: [WorkerRole; 5] = [
        WorkerRole::Artist,
        WorkerRole::Miner,
        WorkerRole::Scientist,
        WorkerRole::ProductionWorker,
        WorkerRole::Farmer,
    ];

    /// Role whose work feeds a production category
    pub fn for_category(category: ProductionCategory) -> Option<WorkerRole> {
        match category {
            ProductionCategory::Food => Some(WorkerRole::Farmer),
            ProductionCategory::Metal => Some(WorkerRole::Miner),
            ProductionCategory::Production => Some(WorkerRole::ProductionWorker),
            ProductionCategory::Research => Some(WorkerRole::Scientist),
            ProductionCategory::Culture => Some(WorkerRole::Artist),
            ProductionCategory::Credits => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            WorkerRole::Farmer => "farmer",
            WorkerRole::Miner => "miner",
            WorkerRole::ProductionWorker => "worker",
            WorkerRole::Scientist => "scientist",
            WorkerRole::Artist => "artist",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workforce {
    pub farmers: u32,
    pub miners: u32,
    pub production_workers: u32,
    pub scientists: u32,
    pub artists: u32,
}

impl Workforce {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> u32 {
        self.farmers + self.miners + self.production_workers + self.scientists + self.artists
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn get(&self, role: WorkerRole) -> u32 {
        match role {
            WorkerRole::Farmer => self.farmers,
            WorkerRole::Miner => self.miners,
            WorkerRole::ProductionWorker => self.production_workers,
            WorkerRole::Scientist => self.scientists,
            WorkerRole::Artist => self.artists,
        }
    }

    fn slot(&mut self, role: WorkerRole) -> &mut u32 {
        match role {
            WorkerRole::Farmer => &mut self.farmers,
            WorkerRole::Miner => &mut self.miners,
            WorkerRole::ProductionWorker => &mut self.production_workers,
            WorkerRole::Scientist => &mut self.scientists,
            WorkerRole::Artist => &mut self.artists,
        }
    }

    pub fn with(mut self, role: WorkerRole, count: u32) -> Self {
        *self.slot(role) = count;
        self
    }

    pub fn add(&mut self, role: WorkerRole, count: u32) {
        let slot = self.slot(role);
        *slot = slot.saturating_add(count);
    }

    /// Remove one worker of the role, returns false if there was none
    pub fn remove(&mut self, role: WorkerRole) -> bool {
        let slot = self.slot(role);
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }

    /// Remove one worker following the loss priority
    pub fn remove_by_priority(&mut self) -> Option<WorkerRole> {
        let role = WorkerRole::LOSS_PRIORITY
            .into_iter()
            .find(|role| self.get(*role) > 0)?;
        self.remove(role);
        Some(role)
    }

    /// Remove one worker from a uniformly random occupied role
    pub fn remove_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<WorkerRole> {
        let occupied: Vec<WorkerRole> = WorkerRole::ALL
            .into_iter()
            .filter(|role| self.get(*role) > 0)
            .collect();
        if occupied.is_empty() {
            return None;
        }
        let role = occupied[rng.gen_range(0..occupied.len())];
        self.remove(role);
        Some(role)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_total() {
        let workforce = Workforce::new()
            .with(WorkerRole::Farmer, 2)
            .with(WorkerRole::Artist, 1);
        assert_eq!(workforce.total(), 3);
        assert!(!workforce.is_empty());
        assert!(Workforce::new().is_empty());
    }

    #[test]
    fn test_remove_by_priority_order() {
        let mut workforce = Workforce::new()
            .with(WorkerRole::Farmer, 1)
            .with(WorkerRole::Miner, 1)
            .with(WorkerRole::ProductionWorker, 1)
            .with(WorkerRole::Scientist, 1)
            .with(WorkerRole::Artist, 1);

        let order: Vec<_> = std::iter::from_fn(|| workforce.remove_by_priority()).collect();
        assert_eq!(
            order,
            vec![
                WorkerRole::Artist,
                WorkerRole::Miner,
                WorkerRole::Scientist,
                WorkerRole::ProductionWorker,
                WorkerRole::Farmer,
            ]
        );
        assert!(workforce.is_empty());
    }

    #[test]
    fn test_remove_empty_role() {
        let mut workforce = Workforce::new();
        assert!(!workforce.remove(WorkerRole::Farmer));
        assert_eq!(workforce.remove_by_priority(), None);
    }

    #[test]
    fn test_remove_random_only_occupied_roles() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut workforce = Workforce::new().with(WorkerRole::Scientist, 3);
        for _ in 0..3 {
            assert_eq!(workforce.remove_random(&mut rng), Some(WorkerRole::Scientist));
        }
        assert_eq!(workforce.remove_random(&mut rng), None);
    }

    #[test]
    fn test_role_for_category() {
        assert_eq!(WorkerRole::for_category(ProductionCategory::Food), Some(WorkerRole::Farmer));
        assert_eq!(WorkerRole::for_category(ProductionCategory::Credits), None);
    }
}
