use serde::Serialize;

use crate::quantity::{
    cost::Euros,
    energy::KilowattHours,
    proportions::Percentage,
    rate::KilowattHourRate,
};

/// Split of the annual generation into self-consumed and exported energy.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Allocation {
    pub generation: KilowattHours,

    /// Targeted self-consumption share of the generation, already clamped into `0..=100`.
    pub target_share: Percentage,

    pub self_consumed: KilowattHours,
    pub exported: KilowattHours,
}

impl Allocation {
    /// Allocate the generation, targeting the share but never consuming more than the demand.
    pub fn new(
        generation: KilowattHours,
        consumption: KilowattHours,
        target_share: Percentage,
    ) -> Self {
        let target_share = target_share.clamped();
        let self_consumed = (generation * target_share).min(consumption);
        Self {
            generation,
            target_share,
            self_consumed,
            exported: (generation - self_consumed).max(KilowattHours::ZERO),
        }
    }

    /// Everything goes to the grid.
    pub const fn full_export(generation: KilowattHours) -> Self {
        Self {
            generation,
            target_share: Percentage::ZERO,
            self_consumed: KilowattHours::ZERO,
            exported: generation,
        }
    }

    /// Annual value: avoided purchases for the self-consumed part plus export revenue.
    pub fn value(&self, purchase_rate: KilowattHourRate, export_rate: KilowattHourRate) -> Euros {
        self.self_consumed * purchase_rate + self.exported * export_rate
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::quantity::rate::CentsPerKilowattHour;

    #[test]
    fn targets_share_of_generation() {
        let allocation = Allocation::new(
            KilowattHours::from(4500.0),
            KilowattHours::from(4000.0),
            Percentage(30.0),
        );
        assert_abs_diff_eq!(allocation.self_consumed.0, 1350.0, epsilon = 1e-9);
        assert_abs_diff_eq!(allocation.exported.0, 3150.0, epsilon = 1e-9);
    }

    #[test]
    fn never_exceeds_consumption() {
        let allocation = Allocation::new(
            KilowattHours::from(7000.0),
            KilowattHours::from(2000.0),
            Percentage(80.0),
        );
        assert_eq!(allocation.self_consumed, KilowattHours::from(2000.0));
        assert_eq!(allocation.exported, KilowattHours::from(5000.0));
    }

    #[test]
    fn clamps_share() {
        let consumption = KilowattHours::from(1000.0);
        let over = Allocation::new(KilowattHours::from(1000.0), consumption, Percentage(150.0));
        let full = Allocation::new(KilowattHours::from(1000.0), consumption, Percentage(100.0));
        assert_eq!(over, full);

        let under = Allocation::new(KilowattHours::from(1000.0), consumption, Percentage(-20.0));
        assert_eq!(under.self_consumed, KilowattHours::ZERO);
        assert_eq!(under.exported, KilowattHours::from(1000.0));
    }

    #[test]
    fn stays_within_bounds() {
        for generation in [0.0, 1.0, 999.0, 4500.0, 12_000.0] {
            for consumption in [0.0, 1.0, 4000.0, 20_000.0] {
                for share in [0.0, 0.5, 30.0, 99.9, 100.0] {
                    let generation = KilowattHours::from(generation);
                    let consumption = KilowattHours::from(consumption);
                    let allocation = Allocation::new(generation, consumption, Percentage(share));
                    assert!(allocation.self_consumed <= consumption);
                    assert!(allocation.self_consumed <= generation * Percentage(share));
                    assert!(allocation.exported >= KilowattHours::ZERO);
                    assert_abs_diff_eq!(
                        (allocation.self_consumed + allocation.exported).0,
                        generation.0,
                        epsilon = 1e-9
                    );
                }
            }
        }
    }

    #[test]
    fn values_both_streams() {
        let allocation = Allocation::new(
            KilowattHours::from(4500.0),
            KilowattHours::from(4000.0),
            Percentage(30.0),
        );
        let value = allocation.value(
            CentsPerKilowattHour(32.0).to_rate(),
            CentsPerKilowattHour(3.5).to_rate(),
        );
        assert_abs_diff_eq!(value.0, 542.25, epsilon = 1e-9);
    }

    #[test]
    fn full_export_sells_everything() {
        let allocation = Allocation::full_export(KilowattHours::from(4500.0));
        assert_eq!(allocation.self_consumed, KilowattHours::ZERO);
        assert_eq!(allocation.exported, KilowattHours::from(4500.0));
    }
}
