pub mod assembler;
pub mod reconciler;
pub mod store;

pub use assembler::{CompletionInput, LedgerAssembler};
pub use reconciler::{reconcile_manual_assignments, ReconciledAssignment};
pub use store::{CompletionStore, MemoryStore, StoreError};
