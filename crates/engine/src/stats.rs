//! Run statistics collection and reporting.
//!
//! Tracks scheduling activity per run:
//! 1. **Throughput:** Cycles, decoded/issued/committed counts, CPI.
//! 2. **Stalls:** Cycle-granularity stall events by block reason.
//! 3. **Utilization:** Busy cycles per functional unit type.
//!
//! Counters are updated by the driver at the end of every tick and cleared
//! on reset.

use crate::core::units::UNITS;
use crate::program::{BlockReason, InstrType, Instruction, Stage};

/// Counters for one simulation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimStats {
    /// Cycles advanced (terminal no-op steps excluded).
    pub cycles: u64,
    /// Instructions decoded into the issue window.
    pub decoded: u64,
    /// Instructions issued to a functional unit.
    pub issued: u64,
    /// Instructions committed.
    pub committed: u64,
    /// Instruction-cycles stalled on an unmet dependency.
    pub stalls_dependency: u64,
    /// Instruction-cycles stalled on a busy functional unit.
    pub stalls_structural: u64,
    /// Instruction-cycles held for in-order commit.
    pub stalls_order: u64,
    /// Instruction-cycles held by a full write-back bus.
    pub stalls_write_bus: u64,
    /// Busy cycles per unit, indexed by unit id (ALU, FPU, MEM).
    pub unit_busy: [u64; UNITS.len()],
}

impl SimStats {
    /// Fresh, zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one finished tick into the counters.
    pub(crate) fn record_tick(
        &mut self,
        instructions: &[Instruction],
        decoded: usize,
        issued: usize,
        committed: usize,
    ) {
        self.cycles += 1;
        self.decoded += decoded as u64;
        self.issued += issued as u64;
        self.committed += committed as u64;

        for inst in instructions {
            match inst.block_reason {
                Some(BlockReason::Dependencies) => self.stalls_dependency += 1,
                Some(BlockReason::FunctionalUnitBusy) => self.stalls_structural += 1,
                Some(BlockReason::Order(_)) => self.stalls_order += 1,
                Some(BlockReason::WriteBusFull) => self.stalls_write_bus += 1,
                None => {}
            }
            if inst.stage == Stage::Executing {
                if let Some(unit) = inst.unit_id {
                    self.unit_busy[unit.0] += 1;
                }
            }
        }
    }

    /// Total stall events across all reasons.
    pub fn stalls_total(&self) -> u64 {
        self.stalls_dependency + self.stalls_structural + self.stalls_order + self.stalls_write_bus
    }

    /// Cycles per committed instruction.
    pub fn cpi(&self) -> f64 {
        let committed = self.committed.max(1);
        self.cycles as f64 / committed as f64
    }

    /// Busy-cycle fraction for the unit executing the given type.
    pub fn unit_utilization(&self, ty: InstrType) -> f64 {
        let cycles = self.cycles.max(1);
        UNITS
            .iter()
            .find(|u| u.ty == ty)
            .map_or(0.0, |u| self.unit_busy[u.id.0] as f64 / cycles as f64)
    }

    /// Prints the run report to stdout.
    pub fn print(&self) {
        println!("==========================================================");
        println!("SUPERSCALAR SCHEDULING STATISTICS");
        println!("==========================================================");
        println!("sim_cycles               {}", self.cycles);
        println!("sim_committed            {}", self.committed);
        println!("sim_cpi                  {:.4}", self.cpi());
        println!("stall_dependency         {}", self.stalls_dependency);
        println!("stall_structural         {}", self.stalls_structural);
        println!("stall_order              {}", self.stalls_order);
        println!("stall_write_bus          {}", self.stalls_write_bus);
        for unit in &UNITS {
            println!(
                "unit_busy[{}]          {:>6} ({:.1}%)",
                unit.label,
                self.unit_busy[unit.id.0],
                self.unit_utilization(unit.ty) * 100.0
            );
        }
    }
}
