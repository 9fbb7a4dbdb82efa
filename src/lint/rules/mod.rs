mod defined_types_are_used;
mod key_directive_fields;
mod relay;

pub use defined_types_are_used::*;
pub use key_directive_fields::*;
pub use relay::*;

use super::LintRule;

/// All rules this crate implements, in the order the [`Linter`](super::Linter) runs them.
pub fn default_rules() -> Vec<Box<dyn LintRule>> {
    vec![
        Box::new(DefinedTypesAreUsed),
        Box::new(KeyDirectiveFields),
        Box::new(RelayConnectionTypes),
        Box::new(RelayEdgeTypes),
        Box::new(RelayPageInfo),
    ]
}
