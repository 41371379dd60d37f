//! Program model: instruction entities and load-time validation.
//!
//! This module provides:
//! 1. **Entities:** [`Instruction`], its stage/type/block-reason enums.
//! 2. **Specs:** [`InstructionSpec`], the serde-friendly input shape.
//! 3. **Validation:** [`Program::new`], which enforces unique ids,
//!    positive latencies, and backward-only dependency edges.
//!
//! A validated [`Program`] is immutable; it is the pristine initial state
//! the driver copies from on construction and on reset. The dependency
//! graph is checked exactly once here, never at step time.

pub mod instruction;

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::ConfigError;

pub use instruction::{BlockReason, InstrType, Instruction, Stage, UnitId};

/// One instruction of a program as supplied by the caller.
///
/// Dependencies reference earlier instructions by id. The shape matches the
/// JSON program format accepted by [`Program::from_json`]; the type arrives
/// as its wire name (`"ALU"`, `"FPU"`, `"MEM"`) and a name that matches no
/// unit type is rejected as [`ConfigError::UnknownType`].
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "RawInstructionSpec")]
pub struct InstructionSpec {
    /// Unique instruction id (e.g. `"I1"`).
    pub id: String,
    /// Instruction class.
    pub ty: InstrType,
    /// Ids of instructions this one depends on.
    pub deps: Vec<String>,
    /// Execution latency in cycles.
    pub latency: u32,
}

impl InstructionSpec {
    /// Convenience constructor used by tests and the built-in example.
    pub fn new(id: &str, ty: InstrType, deps: &[&str], latency: u32) -> Self {
        Self {
            id: id.to_owned(),
            ty,
            deps: deps.iter().map(|d| (*d).to_owned()).collect(),
            latency,
        }
    }
}

/// Wire shape of one instruction, with the type still a raw string.
#[derive(Debug, Deserialize)]
struct RawInstructionSpec {
    id: String,
    #[serde(rename = "type")]
    ty: String,
    #[serde(default)]
    deps: Vec<String>,
    latency: u32,
}

impl TryFrom<RawInstructionSpec> for InstructionSpec {
    type Error = ConfigError;

    fn try_from(raw: RawInstructionSpec) -> Result<Self, Self::Error> {
        let Some(ty) = InstrType::parse(&raw.ty) else {
            return Err(ConfigError::UnknownType {
                id: raw.id,
                ty: raw.ty,
            });
        };
        Ok(Self {
            id: raw.id,
            ty,
            deps: raw.deps,
            latency: raw.latency,
        })
    }
}

/// A validated, immutable-after-construction instruction sequence.
///
/// Program order is the position in the input sequence. After validation,
/// each instruction's dependencies are resolved to program-order indices,
/// all strictly smaller than the instruction's own order, so the
/// dependency graph is acyclic by construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    instructions: Vec<Instruction>,
}

impl Program {
    /// Validates the given specs into a program.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] on a duplicate id, a latency below 1, or a
    /// dependency that is unknown or does not strictly precede the
    /// referencing instruction in program order.
    pub fn new(specs: Vec<InstructionSpec>) -> Result<Self, ConfigError> {
        let mut order_of: HashMap<&str, usize> = HashMap::with_capacity(specs.len());
        for (order, spec) in specs.iter().enumerate() {
            if order_of.insert(spec.id.as_str(), order).is_some() {
                return Err(ConfigError::DuplicateId {
                    id: spec.id.clone(),
                });
            }
        }

        let mut instructions = Vec::with_capacity(specs.len());
        for (order, spec) in specs.iter().enumerate() {
            if spec.latency < 1 {
                return Err(ConfigError::InvalidLatency {
                    id: spec.id.clone(),
                    latency: spec.latency,
                });
            }

            let mut deps = Vec::with_capacity(spec.deps.len());
            for dep in &spec.deps {
                let dep_order =
                    *order_of
                        .get(dep.as_str())
                        .ok_or_else(|| ConfigError::UnknownDependency {
                            id: spec.id.clone(),
                            dep: dep.clone(),
                        })?;
                if dep_order >= order {
                    return Err(ConfigError::ForwardDependency {
                        id: spec.id.clone(),
                        dep: dep.clone(),
                    });
                }
                deps.push(dep_order);
            }
            deps.sort_unstable();
            deps.dedup();

            instructions.push(Instruction {
                label: spec.id.clone(),
                order,
                ty: spec.ty,
                deps,
                latency: spec.latency,
                stage: Stage::Decode,
                decode_at: None,
                issue_at: None,
                complete_at: None,
                fu_remaining: 0,
                unit_id: None,
                block_reason: None,
            });
        }

        Ok(Self { instructions })
    }

    /// Parses a JSON array of [`InstructionSpec`]s and validates it.
    ///
    /// # Errors
    ///
    /// Returns the underlying JSON error for malformed input, or a
    /// [`ConfigError`] (boxed through `serde_json`'s custom error) for an
    /// invalid program.
    pub fn from_json(json: &str) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let specs: Vec<InstructionSpec> = serde_json::from_str(json)?;
        Ok(Self::new(specs)?)
    }

    /// The six-instruction demonstration program (two-cycle FPU op, an ALU
    /// chain, and a MEM pair with one dependency).
    pub fn example() -> Self {
        let specs = vec![
            InstructionSpec::new("I1", InstrType::Fpu, &[], 2),
            InstructionSpec::new("I2", InstrType::Alu, &[], 1),
            InstructionSpec::new("I3", InstrType::Alu, &[], 1),
            InstructionSpec::new("I4", InstrType::Alu, &[], 1),
            InstructionSpec::new("I5", InstrType::Mem, &["I4"], 1),
            InstructionSpec::new("I6", InstrType::Mem, &[], 1),
        ];
        // The example is statically valid.
        match Self::new(specs) {
            Ok(program) => program,
            Err(_) => unreachable!(),
        }
    }

    /// Number of instructions in the program.
    #[inline]
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// True for the empty program.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// The validated instructions in program order, all in [`Stage::Decode`].
    #[inline]
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }
}
