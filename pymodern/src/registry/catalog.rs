//! The builtin rule catalog.
//!
//! Rule content is data: configuration can select subsets of these entries
//! but cannot define new predicates at runtime.

use super::types::{rule, RuleCategory, RuleDescriptor, RuleSeverity};

/// Documentation page for typing modernization rules.
pub const DOC_TYPING: &str = "https://docs.python.org/3/library/typing.html#deprecated-aliases";
/// Documentation page for Pydantic v2 migration rules.
pub const DOC_PYDANTIC: &str = "https://docs.pydantic.dev/latest/migration/";
/// Documentation page for stdlib modernization rules.
pub const DOC_STDLIB: &str = "https://docs.python.org/3/library/pathlib.html";
/// Documentation page for style modernization rules.
pub const DOC_STYLE: &str =
    "https://docs.python.org/3/reference/lexical_analysis.html#f-strings";

/// All builtin rule descriptors, in identifier order.
pub const CATALOG: &[RuleDescriptor] = &[
    rule(
        "PM101",
        "legacy-typing-import",
        RuleCategory::Typing,
        RuleSeverity::Medium,
        "Importing deprecated typing aliases (List, Dict, Optional, ...)",
        "Use builtin generics (list, dict) and the X | None union syntax",
        DOC_TYPING,
    ),
    rule(
        "PM102",
        "optional-annotation",
        RuleCategory::Typing,
        RuleSeverity::Medium,
        "Optional[X] annotation form",
        "Use X | None (PEP 604)",
        DOC_TYPING,
    ),
    rule(
        "PM103",
        "union-annotation",
        RuleCategory::Typing,
        RuleSeverity::Medium,
        "Union[X, Y] annotation form",
        "Use X | Y (PEP 604)",
        DOC_TYPING,
    ),
    rule(
        "PM201",
        "pydantic-legacy-config",
        RuleCategory::Pydantic,
        RuleSeverity::High,
        "Nested `class Config` inside a Pydantic model",
        "Use model_config = ConfigDict(...)",
        DOC_PYDANTIC,
    ),
    rule(
        "PM202",
        "pydantic-legacy-validator",
        RuleCategory::Pydantic,
        RuleSeverity::High,
        "@validator / @root_validator decorators",
        "Use @field_validator / @model_validator",
        DOC_PYDANTIC,
    ),
    rule(
        "PM203",
        "pydantic-legacy-serializer",
        RuleCategory::Pydantic,
        RuleSeverity::Medium,
        ".dict() / .json() calls on Pydantic models",
        "Use .model_dump() / .model_dump_json()",
        DOC_PYDANTIC,
    ),
    rule(
        "PM301",
        "os-path-call",
        RuleCategory::Stdlib,
        RuleSeverity::Low,
        "os.path string manipulation",
        "Use pathlib.Path methods and the / operator",
        DOC_STDLIB,
    ),
    rule(
        "PM302",
        "datetime-utcnow",
        RuleCategory::Stdlib,
        RuleSeverity::High,
        "datetime.utcnow() / datetime.utcfromtimestamp() return naive datetimes",
        "Use datetime.now(timezone.utc) / datetime.fromtimestamp(ts, tz=timezone.utc)",
        DOC_STDLIB,
    ),
    rule(
        "PM303",
        "os-system-call",
        RuleCategory::Stdlib,
        RuleSeverity::Medium,
        "os.system() shells out through a string",
        "Use subprocess.run([...], check=True)",
        DOC_STDLIB,
    ),
    rule(
        "PM304",
        "namedtuple-factory",
        RuleCategory::Stdlib,
        RuleSeverity::Low,
        "collections.namedtuple factory",
        "Use a typing.NamedTuple subclass or @dataclass",
        DOC_STDLIB,
    ),
    rule(
        "PM401",
        "percent-format",
        RuleCategory::Style,
        RuleSeverity::Low,
        "%-formatting on a string literal",
        "Use an f-string",
        DOC_STYLE,
    ),
    rule(
        "PM402",
        "str-format-call",
        RuleCategory::Style,
        RuleSeverity::Low,
        "\"...\".format(...) on a string literal",
        "Use an f-string",
        DOC_STYLE,
    ),
    rule(
        "PM403",
        "mutable-default-argument",
        RuleCategory::Style,
        RuleSeverity::High,
        "Mutable default argument ([], {}, set())",
        "Default to None and create the value inside the function",
        DOC_STYLE,
    ),
    rule(
        "PM404",
        "type-comparison",
        RuleCategory::Style,
        RuleSeverity::Medium,
        "type(x) == T comparison",
        "Use isinstance(x, T)",
        DOC_STYLE,
    ),
    rule(
        "PM405",
        "super-with-arguments",
        RuleCategory::Style,
        RuleSeverity::Low,
        "super(C, self) with explicit arguments",
        "Use zero-argument super()",
        DOC_STYLE,
    ),
];
