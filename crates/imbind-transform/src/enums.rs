/*! Enum group classification and bit-flag analysis.
 *
 * A C enum can be a bitmask, an opaque table of integers, or an ordinary enumeration. Odin has a
 * different construct for each, so every group is classified once and the result drives which
 * declaration shape gets emitted.
 */

use imbind_core::{BindingConfig, EnumElement, EnumGroup};
use indexmap::IndexMap;
use tracing::warn;

use crate::constant_eval::{parse_int, ConstantEvaluator};
use crate::naming::{strip_longest, NameTransformer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumClass {
    /// Not emitted at all.
    Skip,
    /// Backing enumeration plus a `bit_set` over it.
    Flags,
    /// `distinct` integer plus one constant per element.
    Constants,
    /// Ordinary enumeration. Members from `stop_after` onwards are emitted disabled.
    Plain { stop_after: Option<String> },
}

/// Names derived from a group's C name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumNaming {
    /// Expected on every element, e.g. `ImGuiWindowFlags_`.
    pub field_prefix: String,
    /// Odin type name, e.g. `WindowFlags`.
    pub name: String,
}

impl EnumNaming {
    pub fn new(group_name: &str, config: &BindingConfig) -> Self {
        let field_prefix = if group_name.ends_with('_') {
            group_name.to_string()
        } else {
            format!("{}_", group_name)
        };
        let bare = group_name.strip_suffix('_').unwrap_or(group_name);
        let (_, name) = strip_longest(bare, &config.branding_prefixes);

        Self {
            field_prefix,
            name: name.to_string(),
        }
    }

    /// Element name without the group prefix. Names lacking it are kept whole.
    pub fn member<'n>(&self, element_name: &'n str) -> &'n str {
        element_name
            .strip_prefix(self.field_prefix.as_str())
            .unwrap_or(element_name)
    }

    /// Singular name of the backing enumeration of a flags group.
    pub fn flag_name(&self) -> &str {
        self.name.strip_suffix('s').unwrap_or(&self.name)
    }
}

pub fn classify(group: &EnumGroup, config: &BindingConfig) -> EnumClass {
    if config.enums_skip.contains(&group.name) {
        return EnumClass::Skip;
    }

    if config.enums_as_constants.contains(&group.name) {
        return EnumClass::Constants;
    }

    let naming = EnumNaming::new(&group.name, config);
    if naming.name.ends_with(config.flags_suffix.as_str()) {
        EnumClass::Flags
    } else {
        EnumClass::Plain {
            stop_after: config.enum_stop_after.get(&group.name).cloned(),
        }
    }
}

/// Operands of a `A | B | C` expression.
pub fn split_operands(expr: &str) -> Vec<&str> {
    expr.split('|')
        .map(|operand| operand.trim().trim_start_matches('(').trim_end_matches(')').trim())
        .filter(|operand| !operand.is_empty())
        .collect()
}

/// Value of a plain enumeration member: literals and shifts pass through, references to
/// sibling members become `Name.Member`.
///
/// `None` when an operand is not a plain reference to a member of the same group.
pub fn plain_value(expr: &str, naming: &EnumNaming) -> Option<String> {
    if expr.contains('<') || parse_int(expr).is_some() {
        return Some(expr.to_string());
    }

    let operands = split_operands(expr);
    if operands.is_empty() {
        return None;
    }

    operands
        .into_iter()
        .map(|operand| {
            let member = operand.strip_prefix(naming.field_prefix.as_str())?;
            let is_identifier = !member.is_empty()
                && member.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
            is_identifier.then(|| format!("{}.{}", naming.name, member))
        })
        .collect::<Option<Vec<_>>>()
        .map(|members| members.join(" | "))
}

/// A member of the backing enumeration of a flags group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackingMember {
    Bit { member: String, bit: u32 },
    /// A literal that is not a single bit. Kept visible but disabled.
    Irregular { member: String, value: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagValue {
    /// `{}`
    Empty,
    /// Members of the backing enumeration, in first-mention order.
    Set(Vec<String>),
    /// An integer that has no set spelling.
    Literal(String),
    /// An expression with an operand that is not an earlier member of the group.
    Unresolved(String),
}

#[derive(Debug, Clone)]
pub struct FlagConstant<'g> {
    pub element: &'g EnumElement,
    pub member: String,
    pub value: FlagValue,
}

/// Everything needed to emit a flags group.
#[derive(Debug, Clone)]
pub struct FlagsLayout<'g> {
    pub backing: Vec<(&'g EnumElement, BackingMember)>,
    pub constants: Vec<FlagConstant<'g>>,
}

impl<'g> FlagsLayout<'g> {
    pub fn analyze(group: &'g EnumGroup, naming: &EnumNaming, config: &BindingConfig) -> Self {
        let names = NameTransformer::new(config);
        let constants_eval = ConstantEvaluator::new(config);

        let mut backing = Vec::new();
        let mut constants = Vec::new();
        // Element name -> expanded set members, for resolving combinations.
        let mut known: IndexMap<&str, Vec<String>> = IndexMap::new();
        // Element name -> integer value, for combinations over irregular members.
        let mut numeric: IndexMap<&str, i64> = IndexMap::new();

        for element in &group.elements {
            let member = names.make_identifier_valid(naming.member(&element.name));
            let expr = element.value_expression.as_deref().unwrap_or("").trim();

            let literal = constants_eval.evaluate(expr);
            let evaluated = literal.or_else(|| Self::or_values(expr, &numeric));
            if let Some(v) = evaluated {
                numeric.insert(&element.name, v);
            }

            let value = match literal {
                Some(0) => {
                    known.insert(&element.name, Vec::new());
                    FlagValue::Empty
                }
                Some(v) if v > 0 && v & (v - 1) == 0 => {
                    backing.push((
                        element,
                        BackingMember::Bit {
                            member: member.clone(),
                            bit: v.trailing_zeros(),
                        },
                    ));
                    known.insert(&element.name, vec![member.clone()]);
                    FlagValue::Set(vec![member.clone()])
                }
                Some(v) => {
                    warn!(
                        group = %group.name,
                        element = %element.name,
                        value = v,
                        "Flag value is not a single bit"
                    );
                    backing.push((
                        element,
                        BackingMember::Irregular {
                            member: member.clone(),
                            value: v,
                        },
                    ));
                    FlagValue::Literal(expr.to_string())
                }
                None => match (Self::combine(expr, &known), evaluated) {
                    (Some(members), _) => {
                        known.insert(&element.name, members.clone());
                        FlagValue::Set(members)
                    }
                    (None, Some(v)) => {
                        warn!(
                            group = %group.name,
                            element = %element.name,
                            value = v,
                            "Flag combination includes a value that is not a single bit"
                        );
                        FlagValue::Literal(v.to_string())
                    }
                    (None, None) => {
                        warn!(
                            group = %group.name,
                            element = %element.name,
                            expr,
                            "Couldn't resolve flag combination"
                        );
                        FlagValue::Unresolved(expr.to_string())
                    }
                },
            };

            constants.push(FlagConstant {
                element,
                member,
                value,
            });
        }

        Self { backing, constants }
    }

    fn combine(expr: &str, known: &IndexMap<&str, Vec<String>>) -> Option<Vec<String>> {
        let operands = split_operands(expr);
        if operands.is_empty() {
            return None;
        }

        let mut members: Vec<String> = Vec::new();
        for operand in operands {
            for member in known.get(operand)? {
                if !members.contains(member) {
                    members.push(member.clone());
                }
            }
        }
        Some(members)
    }

    fn or_values(expr: &str, numeric: &IndexMap<&str, i64>) -> Option<i64> {
        let operands = split_operands(expr);
        if operands.is_empty() {
            return None;
        }
        operands
            .into_iter()
            .try_fold(0, |acc, operand| Some(acc | numeric.get(operand)?))
    }

    /// Bit position assigned to a backing member.
    pub fn bit_of(&self, member: &str) -> Option<u32> {
        self.backing.iter().find_map(|(_, backing)| match backing {
            BackingMember::Bit { member: m, bit } if m == member => Some(*bit),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imbind_core::Comments;
    use pretty_assertions::assert_eq;

    fn element(name: &str, value: &str) -> EnumElement {
        EnumElement {
            name: name.to_string(),
            value_expression: Some(value.to_string()),
            comments: Comments::default(),
        }
    }

    fn group(name: &str, elements: Vec<EnumElement>) -> EnumGroup {
        EnumGroup {
            name: name.to_string(),
            elements,
            comments: Comments::default(),
        }
    }

    #[test]
    fn test_naming() {
        let config = BindingConfig::default();

        let flags = EnumNaming::new("ImGuiWindowFlags_", &config);
        assert_eq!(flags.field_prefix, "ImGuiWindowFlags_");
        assert_eq!(flags.name, "WindowFlags");
        assert_eq!(flags.flag_name(), "WindowFlag");
        assert_eq!(flags.member("ImGuiWindowFlags_NoTitleBar"), "NoTitleBar");

        let key = EnumNaming::new("ImGuiKey", &config);
        assert_eq!(key.field_prefix, "ImGuiKey_");
        assert_eq!(key.name, "Key");
        assert_eq!(key.member("ImGuiMod_Ctrl"), "ImGuiMod_Ctrl");

        let draw = EnumNaming::new("ImDrawFlags_", &config);
        assert_eq!(draw.name, "DrawFlags");
    }

    #[test]
    fn test_classification() {
        let config = BindingConfig::default();

        assert_eq!(
            classify(&group("ImGuiWindowFlags_", vec![]), &config),
            EnumClass::Flags
        );
        assert_eq!(
            classify(&group("ImGuiPopupFlags_", vec![]), &config),
            EnumClass::Constants
        );
        assert_eq!(
            classify(&group("ImGuiModFlags_", vec![]), &config),
            EnumClass::Skip
        );
        assert_eq!(
            classify(&group("ImGuiCol_", vec![]), &config),
            EnumClass::Plain { stop_after: None }
        );
        assert_eq!(
            classify(&group("ImGuiKey", vec![]), &config),
            EnumClass::Plain {
                stop_after: Some("ImGuiKey_NamedKey_BEGIN".to_string())
            }
        );
    }

    #[test]
    fn test_plain_value() {
        let config = BindingConfig::default();
        let naming = EnumNaming::new("ImGuiKey", &config);

        assert_eq!(plain_value("512", &naming).as_deref(), Some("512"));
        assert_eq!(plain_value("1<<12", &naming).as_deref(), Some("1<<12"));
        assert_eq!(plain_value("ImGuiKey_Tab", &naming).as_deref(), Some("Key.Tab"));
        assert_eq!(
            plain_value("ImGuiKey_A | ImGuiKey_B", &naming).as_deref(),
            Some("Key.A | Key.B")
        );
    }

    #[test]
    fn test_plain_value_rejects_foreign_references() {
        let config = BindingConfig::default();
        let naming = EnumNaming::new("ImGuiKey", &config);

        assert_eq!(plain_value("ImGuiMod_Ctrl", &naming), None);
        assert_eq!(plain_value("ImGuiKey_A | ImGuiFoo_Bar", &naming), None);
        assert_eq!(
            plain_value("ImGuiKey_NamedKey_END - ImGuiKey_NamedKey_BEGIN", &naming),
            None
        );
        assert_eq!(plain_value("", &naming), None);
    }

    #[test]
    fn test_constants_list_overrides_suffix() {
        let mut config = BindingConfig::default();
        config.enums_as_constants.push("ImGuiMouseSource".to_string());

        assert_eq!(
            classify(&group("ImGuiMouseSource", vec![]), &config),
            EnumClass::Constants
        );
    }

    #[test]
    fn test_split_operands() {
        assert_eq!(
            split_operands("ImGuiFoo_A | (ImGuiFoo_B) |ImGuiFoo_C"),
            vec!["ImGuiFoo_A", "ImGuiFoo_B", "ImGuiFoo_C"]
        );
        assert!(split_operands("").is_empty());
    }

    #[test]
    fn test_flags_layout_widget() {
        let config = BindingConfig::default();
        let widget = group(
            "Widget_Flags_",
            vec![
                element("Widget_Flags_None", "0"),
                element("Widget_Flags_A", "1<<0"),
                element("Widget_Flags_B", "1<<1"),
                element("Widget_Flags_All", "Widget_Flags_A | Widget_Flags_B"),
            ],
        );
        let naming = EnumNaming::new(&widget.name, &config);
        let layout = FlagsLayout::analyze(&widget, &naming, &config);

        let backing: Vec<_> = layout.backing.iter().map(|(_, b)| b.clone()).collect();
        assert_eq!(
            backing,
            vec![
                BackingMember::Bit { member: "A".into(), bit: 0 },
                BackingMember::Bit { member: "B".into(), bit: 1 },
            ]
        );

        let values: Vec<_> = layout.constants.iter().map(|c| c.value.clone()).collect();
        assert_eq!(
            values,
            vec![
                FlagValue::Empty,
                FlagValue::Set(vec!["A".into()]),
                FlagValue::Set(vec!["B".into()]),
                FlagValue::Set(vec!["A".into(), "B".into()]),
            ]
        );
    }

    #[test]
    fn test_nested_combinations_expand() {
        let config = BindingConfig::default();
        let nav = group(
            "ImGuiWindowFlags_",
            vec![
                element("ImGuiWindowFlags_NoNavInputs", "1<<16"),
                element("ImGuiWindowFlags_NoNavFocus", "1<<17"),
                element("ImGuiWindowFlags_NoMouseInputs", "1<<9"),
                element(
                    "ImGuiWindowFlags_NoNav",
                    "ImGuiWindowFlags_NoNavInputs | ImGuiWindowFlags_NoNavFocus",
                ),
                element(
                    "ImGuiWindowFlags_NoInputs",
                    "ImGuiWindowFlags_NoMouseInputs | ImGuiWindowFlags_NoNav | ImGuiWindowFlags_NoNavFocus",
                ),
            ],
        );
        let naming = EnumNaming::new(&nav.name, &config);
        let layout = FlagsLayout::analyze(&nav, &naming, &config);

        assert_eq!(
            layout.constants[4].value,
            FlagValue::Set(vec![
                "NoMouseInputs".into(),
                "NoNavInputs".into(),
                "NoNavFocus".into()
            ])
        );
    }

    #[test]
    fn test_composite_constants_reproduce_values() {
        let config = BindingConfig::default();
        let flags = group(
            "ImGuiTreeNodeFlags_",
            vec![
                element("ImGuiTreeNodeFlags_None", "0"),
                element("ImGuiTreeNodeFlags_Selected", "1<<0"),
                element("ImGuiTreeNodeFlags_Framed", "1<<1"),
                element("ImGuiTreeNodeFlags_NoTreePushOnOpen", "1<<3"),
                element("ImGuiTreeNodeFlags_NoAutoOpenOnLog", "1<<4"),
                element(
                    "ImGuiTreeNodeFlags_CollapsingHeader",
                    "ImGuiTreeNodeFlags_Framed | ImGuiTreeNodeFlags_NoTreePushOnOpen | ImGuiTreeNodeFlags_NoAutoOpenOnLog",
                ),
            ],
        );
        let naming = EnumNaming::new(&flags.name, &config);
        let layout = FlagsLayout::analyze(&flags, &naming, &config);

        let expected = (1 << 1) | (1 << 3) | (1 << 4);
        match &layout.constants[5].value {
            FlagValue::Set(members) => {
                let rebuilt = members
                    .iter()
                    .map(|m| 1i64 << layout.bit_of(m).unwrap())
                    .fold(0, |acc, bit| acc | bit);
                assert_eq!(rebuilt, expected);
            }
            other => panic!("expected a set, got {:?}", other),
        }
    }

    #[test]
    fn test_combination_with_irregular_member_is_literal() {
        let config = BindingConfig::default();
        let odd = group(
            "ImGuiOddFlags_",
            vec![
                element("ImGuiOddFlags_Mask", "3"),
                element("ImGuiOddFlags_Big", "1<<4"),
                element("ImGuiOddFlags_Both", "ImGuiOddFlags_Mask | ImGuiOddFlags_Big"),
            ],
        );
        let naming = EnumNaming::new(&odd.name, &config);
        let layout = FlagsLayout::analyze(&odd, &naming, &config);

        assert_eq!(layout.constants[2].value, FlagValue::Literal("19".into()));
    }

    #[test]
    fn test_irregular_and_foreign_values() {
        let config = BindingConfig::default();
        let odd = group(
            "ImGuiOddFlags_",
            vec![
                element("ImGuiOddFlags_Low", "4"),
                element("ImGuiOddFlags_Mask", "3"),
                element("ImGuiOddFlags_Other", "ImGuiKey_Tab | ImGuiOddFlags_Low"),
            ],
        );
        let naming = EnumNaming::new(&odd.name, &config);
        let layout = FlagsLayout::analyze(&odd, &naming, &config);

        assert_eq!(
            layout.backing[0].1,
            BackingMember::Bit { member: "Low".into(), bit: 2 }
        );
        assert_eq!(
            layout.backing[1].1,
            BackingMember::Irregular { member: "Mask".into(), value: 3 }
        );
        assert_eq!(layout.constants[1].value, FlagValue::Literal("3".into()));
        assert_eq!(
            layout.constants[2].value,
            FlagValue::Unresolved("ImGuiKey_Tab | ImGuiOddFlags_Low".into())
        );
    }
}
