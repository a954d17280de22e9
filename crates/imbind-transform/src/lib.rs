/*! Translate C API vocabulary into Odin vocabulary.
 *
 * Names lose their library branding, C types become Odin types, and the small subset of constant
 * expressions found in enum values and array bounds gets evaluated. Everything here is a pure
 * function of the input and the `BindingConfig`; the emitters decide how results are laid out.
 */

pub mod constant_eval;
pub mod enums;
pub mod naming;
pub mod type_resolver;

pub use constant_eval::{parse_int, try_eval, Bound, ConstantEvaluator};
pub use enums::{
    classify, plain_value, split_operands, BackingMember, EnumClass, EnumNaming, FlagConstant,
    FlagValue, FlagsLayout,
};
pub use naming::{apply_override, strip_longest, NameTransformer};
pub use type_resolver::{TypeResolver, C_VARARGS};

use imbind_core::BindingConfig;

/// The leaf services every emitter pulls from, bound to one configuration.
#[derive(Debug, Clone, Copy)]
pub struct Translator<'a> {
    pub config: &'a BindingConfig,
    pub names: NameTransformer<'a>,
    pub constants: ConstantEvaluator<'a>,
    pub types: TypeResolver<'a>,
}

impl<'a> Translator<'a> {
    pub fn new(config: &'a BindingConfig) -> Self {
        Self {
            config,
            names: NameTransformer::new(config),
            constants: ConstantEvaluator::new(config),
            types: TypeResolver::new(config),
        }
    }
}
