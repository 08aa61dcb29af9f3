//! Oxygen cylinder specifications.

use serde::Serialize;

// ═══════════════════════════════════════════
// Types
// ═══════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct OxygenTank {
    pub size: &'static str,
    pub capacity_liters: f64,
    pub service_pressure_psi: f64,
    pub weight_kg: f64,
    pub portable: bool,
}

// ═══════════════════════════════════════════
// Table
// ═══════════════════════════════════════════

pub const TANKS: &[OxygenTank] = &[
    OxygenTank {
        size: "D",
        capacity_liters: 425.0,
        service_pressure_psi: 2200.0,
        weight_kg: 3.5,
        portable: true,
    },
    OxygenTank {
        size: "E",
        capacity_liters: 680.0,
        service_pressure_psi: 2200.0,
        weight_kg: 5.5,
        portable: true,
    },
    OxygenTank {
        size: "M",
        capacity_liters: 3000.0,
        service_pressure_psi: 2200.0,
        weight_kg: 25.0,
        portable: false,
    },
    OxygenTank {
        size: "G",
        capacity_liters: 5300.0,
        service_pressure_psi: 2200.0,
        weight_kg: 45.0,
        portable: false,
    },
    OxygenTank {
        size: "H",
        capacity_liters: 6900.0,
        service_pressure_psi: 2200.0,
        weight_kg: 55.0,
        portable: false,
    },
    OxygenTank {
        size: "K",
        capacity_liters: 6900.0,
        service_pressure_psi: 2200.0,
        weight_kg: 55.0,
        portable: false,
    },
];

/// Case-insensitive lookup by cylinder letter.
pub fn find_tank(size: &str) -> Option<&'static OxygenTank> {
    TANKS.iter().find(|tank| tank.size.eq_ignore_ascii_case(size))
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(find_tank("e").unwrap().capacity_liters, 680.0);
        assert_eq!(find_tank("E").unwrap().capacity_liters, 680.0);
        assert!(find_tank("Z").is_none());
    }

    #[test]
    fn only_small_cylinders_are_portable() {
        let portable: Vec<&str> = TANKS
            .iter()
            .filter(|tank| tank.portable)
            .map(|tank| tank.size)
            .collect();
        assert_eq!(portable, ["D", "E"]);
    }

    #[test]
    fn all_share_service_pressure() {
        assert!(TANKS
            .iter()
            .all(|tank| tank.service_pressure_psi == 2200.0));
    }
}
