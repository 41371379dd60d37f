//! Fixed functional unit pool and derived occupancy.
//!
//! The machine has exactly one unit of each type (ALU, FPU, MEM). Units
//! carry no state of their own: occupancy is re-derived every cycle from
//! the set of [`Stage::Executing`] instructions holding a `unit_id`, so a
//! unit is implicitly released the moment its instruction stops executing.

use crate::program::{InstrType, Instruction, Stage, UnitId};

/// A typed execution resource in the fixed pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionalUnit {
    /// Fixed unit id.
    pub id: UnitId,
    /// The instruction class this unit executes.
    pub ty: InstrType,
    /// Human-readable label for presentation.
    pub label: &'static str,
}

/// The fixed unit pool: one ALU, one FPU, one MEM unit.
pub const UNITS: [FunctionalUnit; 3] = [
    FunctionalUnit {
        id: UnitId(0),
        ty: InstrType::Alu,
        label: "ALU 1",
    },
    FunctionalUnit {
        id: UnitId(1),
        ty: InstrType::Fpu,
        label: "FPU 1",
    },
    FunctionalUnit {
        id: UnitId(2),
        ty: InstrType::Mem,
        label: "MEM 1",
    },
];

/// Per-cycle view of which instruction occupies each unit.
///
/// Built from the instruction list at the start of the issue phase; the
/// issue scan then reserves units locally as it selects candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occupancy {
    slots: [Option<usize>; UNITS.len()],
}

impl Occupancy {
    /// Derives occupancy from the currently executing instructions.
    pub fn derive(instructions: &[Instruction]) -> Self {
        let mut slots = [None; UNITS.len()];
        for inst in instructions {
            if inst.stage != Stage::Executing {
                continue;
            }
            if let Some(UnitId(u)) = inst.unit_id {
                slots[u] = Some(inst.order);
            }
        }
        Self { slots }
    }

    /// Finds a free unit of the given type, if any.
    pub fn free_unit(&self, ty: InstrType) -> Option<UnitId> {
        UNITS
            .iter()
            .find(|unit| unit.ty == ty && self.slots[unit.id.0].is_none())
            .map(|unit| unit.id)
    }

    /// Marks a unit as taken for the remainder of this issue scan.
    pub fn reserve(&mut self, unit: UnitId, order: usize) {
        self.slots[unit.0] = Some(order);
    }

    /// The occupant (program-order index) of each unit, indexed by unit id.
    #[inline]
    pub fn slots(&self) -> [Option<usize>; UNITS.len()] {
        self.slots
    }
}
