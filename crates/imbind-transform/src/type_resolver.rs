use imbind_core::{
    ArgumentDef, BindError, BindingConfig, Result, TypeDescription, TypeDetails, TypeInfo,
};
use tracing::warn;

use crate::constant_eval::{Bound, ConstantEvaluator};
use crate::naming::NameTransformer;

/// Parameter spelling for a trailing `...`.
pub const C_VARARGS: &str = "#c_vararg args: ..any";

/// Turns C type descriptions into Odin type expressions.
#[derive(Debug, Clone, Copy)]
pub struct TypeResolver<'a> {
    config: &'a BindingConfig,
    names: NameTransformer<'a>,
    constants: ConstantEvaluator<'a>,
}

impl<'a> TypeResolver<'a> {
    pub fn new(config: &'a BindingConfig) -> Self {
        Self {
            config,
            names: NameTransformer::new(config),
            constants: ConstantEvaluator::new(config),
        }
    }

    pub fn resolve(&self, ty: &TypeInfo, in_function: bool) -> Result<String> {
        match &ty.type_details {
            Some(TypeDetails::FunctionPointer {
                return_type,
                arguments,
            }) => self.procedure(return_type, arguments, true),
            Some(TypeDetails::Unknown) => {
                Err(BindError::UnsupportedTypeDetails(ty.declaration.clone()))
            }
            None => self.resolve_description(&ty.description, in_function, &ty.declaration),
        }
    }

    /// `declaration` only feeds error messages.
    pub fn resolve_description(
        &self,
        desc: &TypeDescription,
        in_function: bool,
        declaration: &str,
    ) -> Result<String> {
        match desc {
            TypeDescription::Builtin { builtin_type } => Ok(self.named(builtin_type)),
            TypeDescription::User { name } => Ok(self.named(name)),
            TypeDescription::Named { inner_type, .. } => {
                self.resolve_description(inner_type, in_function, declaration)
            }
            TypeDescription::Pointer { inner_type } => {
                let inner = inner_type.unwrap_named();

                // Odin procedure types are already pointers.
                if matches!(inner, TypeDescription::FunctionPointer { .. }) {
                    return self.resolve_description(inner, in_function, declaration);
                }

                if let Some(alias) = inner
                    .named_type()
                    .and_then(|name| self.config.pointer_aliases.get(name))
                {
                    return Ok(alias.clone());
                }

                Ok(format!(
                    "^{}",
                    self.resolve_description(inner, in_function, declaration)?
                ))
            }
            TypeDescription::Array { inner_type, bounds } => {
                let bound = match bounds {
                    Some(expr) => self.array_bound(expr)?,
                    None => Bound::Unknown,
                };
                let element = self.resolve_description(inner_type, in_function, declaration)?;

                let prefix = match (in_function, bound.as_deref()) {
                    (true, Some(count)) => format!("^[{}]", count),
                    (true, None) => "[^]".to_string(),
                    (false, Some(count)) => format!("[{}]", count),
                    (false, None) => "[]".to_string(),
                };
                Ok(prefix + &element)
            }
            TypeDescription::FunctionPointer {
                return_type,
                parameters,
            } => {
                let params = parameters
                    .iter()
                    .map(|param| self.resolve_description(param, true, declaration))
                    .collect::<Result<Vec<_>>>()?;
                let ret = self.resolve_description(return_type, false, declaration)?;
                Ok(format!(
                    "proc \"c\" ({}){}",
                    params.join(", "),
                    Self::return_suffix(&ret)
                ))
            }
            TypeDescription::Unknown => Err(BindError::UnhandledTypeKind {
                kind: desc.kind_name().to_string(),
                declaration: declaration.to_string(),
            }),
        }
    }

    /// A procedure signature. The explicit calling convention is left out inside foreign blocks,
    /// which already default to "c".
    pub fn procedure(
        &self,
        return_type: &TypeInfo,
        arguments: &[ArgumentDef],
        explicit_cconv: bool,
    ) -> Result<String> {
        let params = arguments
            .iter()
            .map(|arg| self.argument(arg))
            .collect::<Result<Vec<_>>>()?;
        let ret = self.resolve(return_type, false)?;
        let head = if explicit_cconv { "proc \"c\" (" } else { "proc(" };

        Ok(format!(
            "{}{}){}",
            head,
            params.join(", "),
            Self::return_suffix(&ret)
        ))
    }

    pub fn argument(&self, arg: &ArgumentDef) -> Result<String> {
        if arg.is_varargs {
            return Ok(C_VARARGS.to_string());
        }

        let ty = arg
            .ty
            .as_ref()
            .ok_or_else(|| BindError::MissingArgumentType(arg.name.clone()))?;
        let resolved = self.resolve(ty, true)?;

        if arg.name.is_empty() {
            Ok(resolved)
        } else {
            Ok(format!(
                "{}: {}",
                self.names.make_identifier_valid(&arg.name),
                resolved
            ))
        }
    }

    /// Type alias lookup with branding removal as the fallback.
    pub fn named(&self, name: &str) -> String {
        match self.config.type_aliases.get(name) {
            Some(alias) => alias.clone(),
            None => self.names.strip_branding(name),
        }
    }

    /// Whether `ty` is the platform `va_list`.
    pub fn is_va_list(&self, ty: &TypeInfo) -> bool {
        ty.declaration.trim() == self.config.va_list_type
            || ty.description.named_type() == Some(self.config.va_list_type.as_str())
    }

    fn array_bound(&self, expr: &str) -> Result<Bound> {
        let bound = self.constants.resolve_array_bound(expr);
        if bound == Bound::Unknown {
            if self.config.strict_bounds {
                return Err(BindError::UnresolvedBound(expr.to_string()));
            }
            warn!(bounds = expr, "Couldn't resolve array bounds, dropping them");
        }
        Ok(bound)
    }

    fn return_suffix(ret: &str) -> String {
        if ret == "void" {
            String::new()
        } else {
            format!(" -> {}", ret)
        }
    }
}
