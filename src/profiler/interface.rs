// src/profiler/interface.rs
// =============================================================================
// Operation manifests.
//
// Every capability trait that can be profiled lists its operations once, on
// its trait object type, and marks which ones are measured:
//
//   impl Interface for dyn PageParser {
//       const NAME: &'static str = "PageParser";
//       const OPERATIONS: &'static [Operation] = &[Operation::measured("parse")];
//   }
//
// The profiler reads the manifest at wrap time. The forwarding impl of the
// trait for Profiled<T> then times exactly the operations marked measured.
// =============================================================================

/// One method of a profiled capability
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub name: &'static str,
    pub measured: bool,
}

impl Operation {
    /// An operation whose calls are timed
    pub const fn measured(name: &'static str) -> Self {
        Self { name, measured: true }
    }

    /// An operation that is forwarded without timing
    pub const fn forwarded(name: &'static str) -> Self {
        Self {
            name,
            measured: false,
        }
    }
}

/// The manifest of a capability trait, implemented on `dyn Trait`
pub trait Interface {
    const NAME: &'static str;
    const OPERATIONS: &'static [Operation];

    fn measured_operations() -> Vec<&'static str> {
        Self::OPERATIONS
            .iter()
            .filter(|op| op.measured)
            .map(|op| op.name)
            .collect()
    }
}
