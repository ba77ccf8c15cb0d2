// Syntax token colors (TextMate scopes and semantic tokens)

use serde_json::{json, Value};

use crate::palette::Palette;

/// TextMate scope rules. Accent slots 1-6 carry the syntax roles; slot 8
/// is used for comments and punctuation.
pub(super) fn token_colors(p: &Palette) -> Value {
    let rule = |name: &str, scope: &[&str], foreground: String, font_style: Option<&str>| {
        let mut settings = json!({ "foreground": foreground });
        if let Some(style) = font_style {
            settings["fontStyle"] = json!(style);
        }
        json!({ "name": name, "scope": scope, "settings": settings })
    };

    Value::Array(vec![
        rule(
            "Comment",
            &["comment", "punctuation.definition.comment"],
            p[8].to_hex(),
            Some("italic"),
        ),
        rule(
            "Variables",
            &["variable", "string constant.other.placeholder"],
            p[7].to_hex(),
            None,
        ),
        rule(
            "Colors",
            &["constant.other.color"],
            p[15].to_hex(),
            None,
        ),
        rule(
            "Invalid",
            &["invalid", "invalid.illegal"],
            p[1].to_hex(),
            None,
        ),
        rule(
            "Keyword, Storage",
            &["keyword", "storage.type", "storage.modifier"],
            p[5].to_hex(),
            None,
        ),
        rule(
            "Operator, Misc",
            &[
                "keyword.control",
                "constant.other.color",
                "punctuation",
                "meta.tag",
                "punctuation.definition.tag",
                "punctuation.separator.inheritance.php",
                "punctuation.definition.tag.html",
                "punctuation.definition.tag.begin.html",
                "punctuation.definition.tag.end.html",
                "punctuation.section.embedded",
                "keyword.other.template",
                "keyword.other.substitution",
            ],
            p[6].to_hex(),
            None,
        ),
        rule(
            "Tag",
            &["entity.name.tag", "meta.tag.sgml", "markup.deleted.git_gutter"],
            p[1].to_hex(),
            None,
        ),
        rule(
            "Function, Special Method",
            &[
                "entity.name.function",
                "meta.function-call",
                "variable.function",
                "support.function",
                "keyword.other.special-method",
            ],
            p[4].to_hex(),
            None,
        ),
        rule(
            "Block Level Variables",
            &["meta.block variable.other"],
            p[1].to_hex(),
            None,
        ),
        rule(
            "Other Variable, String Link",
            &["support.other.variable", "string.other.link"],
            p[1].to_hex(),
            None,
        ),
        rule(
            "Number, Constant, Function Argument, Tag Attribute, Embedded",
            &[
                "constant.numeric",
                "constant.language",
                "support.constant",
                "constant.character",
                "constant.escape",
                "variable.parameter",
                "keyword.other.unit",
                "keyword.other",
            ],
            p[3].to_hex(),
            None,
        ),
        rule(
            "String, Symbols, Inherited Class, Markup Heading",
            &[
                "string",
                "constant.other.symbol",
                "constant.other.key",
                "entity.other.inherited-class",
                "markup.heading",
                "markup.inserted.git_gutter",
                "meta.group.braces.curly constant.other.object.key.js string.unquoted.label.js",
            ],
            p[2].to_hex(),
            None,
        ),
        rule(
            "Class, Support",
            &[
                "entity.name",
                "support.type",
                "support.class",
                "support.orther.namespace.use.php",
                "meta.use.php",
                "support.other.namespace.php",
                "markup.changed.git_gutter",
                "support.type.sys-types",
            ],
            p[11].to_hex(),
            None,
        ),
        rule(
            "Entity Types",
            &["support.type"],
            p[14].to_hex(),
            None,
        ),
        rule(
            "CSS Class and Support",
            &[
                "source.css support.type.property-name",
                "source.sass support.type.property-name",
                "source.scss support.type.property-name",
                "source.less support.type.property-name",
                "source.stylus support.type.property-name",
                "source.postcss support.type.property-name",
            ],
            p[14].to_hex(),
            None,
        ),
        rule(
            "Attributes",
            &["entity.other.attribute-name"],
            p[3].to_hex(),
            None,
        ),
        rule(
            "Regular Expressions, Escape Characters",
            &["string.regexp", "constant.character.escape"],
            p[6].to_hex(),
            None,
        ),
        rule(
            "Markup Bold",
            &["markup.bold"],
            p[3].to_hex(),
            Some("bold"),
        ),
        rule(
            "Markup Italic",
            &["markup.italic"],
            p[5].to_hex(),
            Some("italic"),
        ),
        rule(
            "Markup Link",
            &["markup.underline.link", "string.other.link.title.markdown"],
            p[4].to_hex(),
            Some("underline"),
        ),
        rule(
            "Markup Quote",
            &["markup.quote"],
            p[8].to_hex(),
            Some("italic"),
        ),
        rule(
            "Markup Inline Code",
            &["markup.inline.raw", "markup.fenced_code.block"],
            p[2].to_hex(),
            None,
        ),
        rule(
            "Diff Inserted",
            &["markup.inserted"],
            p[2].to_hex(),
            None,
        ),
        rule(
            "Diff Deleted",
            &["markup.deleted"],
            p[1].to_hex(),
            None,
        ),
        rule(
            "Diff Changed",
            &["markup.changed"],
            p[3].to_hex(),
            None,
        ),
    ])
}

/// Semantic token overrides for language servers that emit them
pub(super) fn semantic_token_colors(p: &Palette) -> Value {
    json!({
        "namespace": p[11].to_hex(),
        "type": p[11].to_hex(),
        "enumMember": p[3].to_hex(),
        "parameter": p[3].to_hex(),
        "property": p[7].to_hex(),
        "macro": p[6].to_hex(),
        "lifetime": { "foreground": p[5].to_hex(), "italic": true },
        "*.mutable": { "underline": true },
    })
}
