//! Applied statuses - timed or persistent planet modifiers

use serde::{Deserialize, Serialize};

use crate::content::{CategoryBonuses, ProductionCategory};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedStatus {
    pub id: String,
    pub name: String,
    pub bonuses: CategoryBonuses,
    pub happiness: i32,
    /// Remaining turns; None never expires
    pub turns_left: Option<u32>,
}

impl AppliedStatus {
    pub fn permanent(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            bonuses: CategoryBonuses::default(),
            happiness: 0,
            turns_left: None,
        }
    }

    pub fn timed(id: &str, name: &str, turns: u32) -> Self {
        Self {
            turns_left: Some(turns),
            ..Self::permanent(id, name)
        }
    }

    pub fn with_bonus(mut self, category: ProductionCategory, value: i32) -> Self {
        self.bonuses.set(category, value);
        self
    }

    pub fn with_happiness(mut self, happiness: i32) -> Self {
        self.happiness = happiness;
        self
    }
}

/// Count down timed statuses, returning the ones that expired
pub fn tick_statuses(statuses: &mut Vec<AppliedStatus>) -> Vec<AppliedStatus> {
    for status in statuses.iter_mut() {
        if let Some(turns) = status.turns_left.as_mut() {
            *turns = turns.saturating_sub(1);
        }
    }
    let (expired, active): (Vec<_>, Vec<_>) = statuses
        .drain(..)
        .partition(|s| s.turns_left == Some(0));
    *statuses = active;
    expired
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timed_status_expires() {
        let mut statuses = vec![
            AppliedStatus::timed("festival", "Festival", 2).with_happiness(2),
            AppliedStatus::permanent("lush", "Lush vegetation").with_bonus(ProductionCategory::Food, 1),
        ];

        assert!(tick_statuses(&mut statuses).is_empty());
        assert_eq!(statuses.len(), 2);

        let expired = tick_statuses(&mut statuses);
        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].id, "festival");
        assert_eq!(statuses.len(), 1);
        assert_eq!(statuses[0].id, "lush");
    }
}
