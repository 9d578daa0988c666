//! Reserved words of the toy language

/// Every keyword of the language. None of these may be used as a name.
pub const KEYWORDS: [&str; 14] = [
    "dec", "func", "const", "if", "else", "return", "look", "when", "while", "do", "for",
    "break", "keep", "log",
];

/// Whether `name` is a reserved keyword
pub fn is_reserved(name: &str) -> bool {
    KEYWORDS.contains(&name)
}

/// Words JavaScript reserves that are not toy keywords. Emitted unchanged
/// as a binding or call target they would not parse as JavaScript.
pub const JS_RESERVED: &[&str] = &[
    "await", "case", "catch", "class", "continue", "debugger", "default", "delete", "enum",
    "export", "extends", "false", "finally", "function", "implements", "import", "in",
    "instanceof", "interface", "let", "new", "null", "package", "private", "protected",
    "public", "static", "super", "switch", "this", "throw", "true", "try", "typeof", "var",
    "void", "with", "yield",
];

/// Whether `name` is reserved by JavaScript but free in the toy language
pub fn is_js_reserved(name: &str) -> bool {
    JS_RESERVED.contains(&name)
}

/// Reserved words that are still valid JavaScript expressions when read
pub fn is_js_value_word(name: &str) -> bool {
    matches!(name, "this" | "true" | "false" | "null")
}

/// The JavaScript spelling a keyword is emitted as.
///
/// Keywords that JavaScript already spells the same way map to themselves.
pub fn js_spelling(keyword: &str) -> Option<&'static str> {
    let js = match keyword {
        "dec" => "let",
        "func" => "function",
        "look" => "switch",
        "when" => "case",
        "keep" => "continue",
        "log" => "console.log",
        "const" => "const",
        "if" => "if",
        "else" => "else",
        "return" => "return",
        "while" => "while",
        "do" => "do",
        "for" => "for",
        "break" => "break",
        _ => return None,
    };
    Some(js)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_is_total_over_keywords() {
        for kw in KEYWORDS {
            assert!(js_spelling(kw).is_some(), "no JS spelling for {kw}");
        }
        assert_eq!(js_spelling("x"), None);
    }

    #[test]
    fn reserved_check() {
        assert!(is_reserved("log"));
        assert!(is_reserved("keep"));
        assert!(!is_reserved("let"));
        assert!(!is_reserved("console"));
    }

    #[test]
    fn js_reserved_check() {
        assert!(is_js_reserved("let"));
        assert!(is_js_reserved("switch"));
        assert!(is_js_reserved("new"));
        assert!(!is_js_reserved("console"));
        assert!(!is_js_reserved("dec"));
        for kw in KEYWORDS {
            assert!(!is_js_reserved(kw), "{kw} is already a toy keyword");
        }
        assert!(is_js_value_word("this"));
        assert!(!is_js_value_word("new"));
    }
}
