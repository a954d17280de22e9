use imbind_core::BindingConfig;

/// Outcome of array bound resolution. The caller decides how severe `Unknown` is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bound {
    Resolved(String),
    Unknown,
}

impl Bound {
    pub fn as_deref(&self) -> Option<&str> {
        match self {
            Bound::Resolved(value) => Some(value),
            Bound::Unknown => None,
        }
    }
}

fn strip_parens(expr: &str) -> &str {
    let mut expr = expr.trim();
    while let Some(inner) = expr.strip_prefix('(').and_then(|e| e.strip_suffix(')')) {
        expr = inner.trim();
    }
    expr
}

/// Integer literal in decimal, hex or binary, with optional sign and parentheses.
pub fn parse_int(literal: &str) -> Option<i64> {
    let literal = strip_parens(literal);
    let (negative, digits) = match literal.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, literal),
    };

    let value = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        i64::from_str_radix(hex, 16).ok()?
    } else if let Some(bin) = digits
        .strip_prefix("0b")
        .or_else(|| digits.strip_prefix("0B"))
    {
        i64::from_str_radix(bin, 2).ok()?
    } else if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
        digits.parse::<i64>().ok()?
    } else {
        return None;
    };

    Some(if negative { -value } else { value })
}

/// Best-effort evaluation of the restricted expression subset: literals and `a<<b`.
pub fn try_eval(expr: &str) -> Option<i64> {
    let expr = strip_parens(expr);
    if let Some((lhs, rhs)) = expr.split_once("<<") {
        let base = parse_int(lhs)?;
        let shift = u32::try_from(try_eval(rhs)?).ok()?;
        return base.checked_shl(shift).filter(|v| v >> shift == base);
    }
    parse_int(expr)
}

#[derive(Debug, Clone, Copy)]
pub struct ConstantEvaluator<'a> {
    config: &'a BindingConfig,
}

impl<'a> ConstantEvaluator<'a> {
    pub fn new(config: &'a BindingConfig) -> Self {
        Self { config }
    }

    pub fn evaluate(&self, expr: &str) -> Option<i64> {
        try_eval(expr)
    }

    /// `ImGuiKey_COUNT` -> `Key.COUNT`. `None` unless the expression looks like a library enum
    /// member reference.
    pub fn enum_literal(&self, expr: &str) -> Option<String> {
        let expr = expr.trim();
        let rest = expr.strip_prefix(self.config.enum_literal_prefix.as_str())?;
        let (group, member) = rest.split_once('_')?;
        if group.is_empty() || member.is_empty() {
            return None;
        }
        Some(format!("{}.{}", group, member))
    }

    pub fn resolve_array_bound(&self, expr: &str) -> Bound {
        if let Some(value) = parse_int(expr) {
            return Bound::Resolved(value.to_string());
        }

        if let Some(value) = self.config.bounds_overrides.get(expr) {
            return Bound::Resolved(value.clone());
        }

        if let Some(value) = self.enum_literal(expr) {
            return Bound::Resolved(value);
        }

        Bound::Unknown
    }
}
