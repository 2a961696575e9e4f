use once_cell::sync::Lazy;
use regex::Regex;

static ROOT_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)root").unwrap());
static DIGIT_THEN_ATOM: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d)([a-zA-Z(])").unwrap());
static CLOSE_THEN_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\))(\()").unwrap());
static CLOSE_THEN_ATOM: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\))([a-zA-Z0-9])").unwrap());

/// 將使用者手寫的數學符號轉成解析器可讀的形式，並補上隱含乘號
pub fn sanitize_input(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let text = text
        .replace('π', "pi")
        .replace('θ', "theta")
        .replace('√', "sqrt");

    let text = ROOT_WORD.replace_all(&text, "sqrt");
    let text = text.replace('^', "**");

    let text = DIGIT_THEN_ATOM.replace_all(&text, "${1}*${2}");
    let text = CLOSE_THEN_OPEN.replace_all(&text, "${1}*${2}");
    let text = CLOSE_THEN_ATOM.replace_all(&text, "${1}*${2}");

    text.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_replacement() {
        assert_eq!(sanitize_input("π/2"), "pi/2");
        assert_eq!(sanitize_input("θ"), "theta");
        assert_eq!(sanitize_input("√(2)"), "sqrt(2)");
        assert_eq!(sanitize_input("ROOT(3)"), "sqrt(3)");
    }

    #[test]
    fn test_implicit_multiplication() {
        assert_eq!(sanitize_input("2x^2+3x"), "2*x**2+3*x");
        assert_eq!(sanitize_input("(x+1)(x-1)"), "(x+1)*(x-1)");
        assert_eq!(sanitize_input("(x+1)x"), "(x+1)*x");
        assert_eq!(sanitize_input("3(x+2)"), "3*(x+2)");
        assert_eq!(sanitize_input("2π/3"), "2*pi/3");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(sanitize_input(""), "");
    }
}
