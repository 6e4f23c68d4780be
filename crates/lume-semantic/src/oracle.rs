//! # Type Oracle
//!
//! The indexing core treats type inference as a black box behind this trait.
//! The real engine lives elsewhere in the backend; tests and degraded setups
//! plug in [`NullOracle`].

use smol_str::SmolStr;

use lume_syntax::{FileId, NodeId};

/// Context an inference request is made in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InferContext {
    /// The file owning the expression.
    pub file: FileId,
    /// Whether the result feeds a write to the index (as opposed to an
    /// interactive query).
    pub for_write: bool,
}

impl InferContext {
    pub const fn for_index(file: FileId) -> Self {
        Self {
            file,
            for_write: true,
        }
    }
}

/// An inferred function signature, used for outline display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSig {
    pub params: Vec<SmolStr>,
}

impl FunctionSig {
    pub fn new(params: impl IntoIterator<Item = impl Into<SmolStr>>) -> Self {
        Self {
            params: params.into_iter().map(Into::into).collect(),
        }
    }

    /// Renders `(a, b)`.
    pub fn param_signature(&self) -> String {
        let mut out = String::from("(");
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(param);
        }
        out.push(')');
        out
    }
}

/// Best-effort type inference over expressions.
pub trait TypeOracle {
    /// Candidate nominal class types for `expr`, ordered most specific
    /// first. Zero candidates is a valid answer and must be handled by every
    /// caller.
    fn infer_types(&self, expr: NodeId, ctx: InferContext) -> Vec<SmolStr>;

    /// The function signature of a function-defining node, or `None` when
    /// inference does not see a function type there.
    fn infer_function(&self, func: NodeId, ctx: InferContext) -> Option<FunctionSig>;
}

/// An oracle that never knows anything. Every consumer of [`TypeOracle`]
/// must behave sensibly against it.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullOracle;

impl TypeOracle for NullOracle {
    fn infer_types(&self, _expr: NodeId, _ctx: InferContext) -> Vec<SmolStr> {
        Vec::new()
    }

    fn infer_function(&self, _func: NodeId, _ctx: InferContext) -> Option<FunctionSig> {
        None
    }
}
