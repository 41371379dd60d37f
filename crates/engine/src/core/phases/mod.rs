//! The four phase algorithms: decode, issue, execute, commit.
//!
//! Each phase is a total transformation over the instruction list for one
//! cycle: it inspects the output of the phases already run this tick,
//! mutates stages and stamps, and returns the indices it advanced. Phase
//! ordering and gating live in the [driver](crate::core::driver).

pub(crate) mod commit;
pub(crate) mod decode;
pub(crate) mod execute;
pub(crate) mod issue;
