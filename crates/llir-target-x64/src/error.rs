//! Lowering errors.

use llir::{BlockId, Cond, Value};
use thiserror::Error;

/// Why lowering failed.
///
/// All variants are fatal: lowering converts a whole module or reports the
/// first problem found, with no partial output. Variants carry the failing
/// ids so an embedder can report context.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LowerError {
    /// A branch uses a comparison the backend cannot translate.
    #[error("unsupported branch condition `{cond}`; only `gt` is lowered")]
    UnsupportedCond { cond: Cond },

    /// A terminator or phi argument names a block the function does not
    /// define.
    #[error("{block} is not defined in the function")]
    UnknownBlock { block: BlockId },

    /// An operand or phi argument names a value the function does not
    /// declare.
    #[error("{value} is not declared in the function")]
    UnknownValue { value: Value },

    /// A phi has no incoming value for one of its block's predecessors.
    #[error("phi {phi} in {block} has no argument for predecessor {pred}")]
    MissingPhiArg {
        block: BlockId,
        pred: BlockId,
        phi: Value,
    },
}
