//! TeX math to Unicode text.
//!
//! Covers the notation that shows up in research answers: Greek letters,
//! operators, relations, scripts, fractions and roots. Anything unknown is
//! kept readable rather than dropped.

use once_cell::sync::Lazy;
use std::collections::HashMap;

static SYMBOLS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        // Greek lowercase
        ("alpha", "α"), ("beta", "β"), ("gamma", "γ"), ("delta", "δ"),
        ("epsilon", "ϵ"), ("varepsilon", "ε"), ("zeta", "ζ"), ("eta", "η"),
        ("theta", "θ"), ("vartheta", "ϑ"), ("iota", "ι"), ("kappa", "κ"),
        ("lambda", "λ"), ("mu", "μ"), ("nu", "ν"), ("xi", "ξ"), ("pi", "π"),
        ("varpi", "ϖ"), ("rho", "ρ"), ("varrho", "ϱ"), ("sigma", "σ"),
        ("varsigma", "ς"), ("tau", "τ"), ("upsilon", "υ"), ("phi", "ϕ"),
        ("varphi", "φ"), ("chi", "χ"), ("psi", "ψ"), ("omega", "ω"),
        // Greek uppercase
        ("Gamma", "Γ"), ("Delta", "Δ"), ("Theta", "Θ"), ("Lambda", "Λ"),
        ("Xi", "Ξ"), ("Pi", "Π"), ("Sigma", "Σ"), ("Upsilon", "Υ"),
        ("Phi", "Φ"), ("Psi", "Ψ"), ("Omega", "Ω"),
        // Operators
        ("times", "×"), ("div", "÷"), ("cdot", "·"), ("pm", "±"), ("mp", "∓"),
        ("ast", "∗"), ("star", "⋆"), ("circ", "∘"), ("bullet", "∙"),
        ("oplus", "⊕"), ("otimes", "⊗"),
        ("sum", "∑"), ("prod", "∏"), ("coprod", "∐"), ("int", "∫"),
        ("iint", "∬"), ("iiint", "∭"), ("oint", "∮"),
        ("partial", "∂"), ("nabla", "∇"), ("infty", "∞"),
        // Relations
        ("leq", "≤"), ("le", "≤"), ("geq", "≥"), ("ge", "≥"), ("neq", "≠"),
        ("ne", "≠"), ("approx", "≈"), ("equiv", "≡"), ("sim", "∼"),
        ("simeq", "≃"), ("cong", "≅"), ("propto", "∝"), ("ll", "≪"),
        ("gg", "≫"), ("perp", "⊥"), ("parallel", "∥"), ("mid", "∣"),
        // Sets and logic
        ("in", "∈"), ("notin", "∉"), ("ni", "∋"), ("subset", "⊂"),
        ("subseteq", "⊆"), ("supset", "⊃"), ("supseteq", "⊇"), ("cup", "∪"),
        ("cap", "∩"), ("emptyset", "∅"), ("varnothing", "∅"),
        ("forall", "∀"), ("exists", "∃"), ("neg", "¬"), ("lnot", "¬"),
        ("land", "∧"), ("wedge", "∧"), ("lor", "∨"), ("vee", "∨"),
        ("setminus", "∖"),
        // Arrows
        ("to", "→"), ("rightarrow", "→"), ("leftarrow", "←"),
        ("leftrightarrow", "↔"), ("Rightarrow", "⇒"), ("Leftarrow", "⇐"),
        ("Leftrightarrow", "⇔"), ("implies", "⟹"), ("iff", "⟺"),
        ("mapsto", "↦"), ("uparrow", "↑"), ("downarrow", "↓"),
        // Misc
        ("ldots", "…"), ("cdots", "⋯"), ("vdots", "⋮"), ("ddots", "⋱"),
        ("dots", "…"), ("prime", "′"), ("hbar", "ℏ"), ("ell", "ℓ"),
        ("angle", "∠"), ("degree", "°"), ("langle", "⟨"), ("rangle", "⟩"),
        ("lfloor", "⌊"), ("rfloor", "⌋"), ("lceil", "⌈"), ("rceil", "⌉"),
        ("vert", "|"), ("Vert", "‖"), ("lvert", "|"), ("rvert", "|"),
        // Named functions keep their name
        ("sin", "sin"), ("cos", "cos"), ("tan", "tan"), ("cot", "cot"),
        ("sec", "sec"), ("csc", "csc"), ("arcsin", "arcsin"),
        ("arccos", "arccos"), ("arctan", "arctan"), ("sinh", "sinh"),
        ("cosh", "cosh"), ("tanh", "tanh"), ("log", "log"), ("ln", "ln"),
        ("exp", "exp"), ("lim", "lim"), ("max", "max"), ("min", "min"),
        ("sup", "sup"), ("inf", "inf"), ("det", "det"), ("arg", "arg"),
        ("deg", "deg"), ("gcd", "gcd"), ("Pr", "Pr"), ("var", "var"),
    ]
    .into_iter()
    .collect()
});

const SUPERSCRIPTS: &[(char, char)] = &[
    ('0', '⁰'), ('1', '¹'), ('2', '²'), ('3', '³'), ('4', '⁴'),
    ('5', '⁵'), ('6', '⁶'), ('7', '⁷'), ('8', '⁸'), ('9', '⁹'),
    ('+', '⁺'), ('-', '⁻'), ('−', '⁻'), ('=', '⁼'), ('(', '⁽'), (')', '⁾'),
    ('n', 'ⁿ'), ('i', 'ⁱ'), ('a', 'ᵃ'), ('b', 'ᵇ'), ('c', 'ᶜ'), ('d', 'ᵈ'),
    ('e', 'ᵉ'), ('k', 'ᵏ'), ('m', 'ᵐ'), ('t', 'ᵗ'), ('x', 'ˣ'), ('T', 'ᵀ'),
    ('′', '′'),
];

const SUBSCRIPTS: &[(char, char)] = &[
    ('0', '₀'), ('1', '₁'), ('2', '₂'), ('3', '₃'), ('4', '₄'),
    ('5', '₅'), ('6', '₆'), ('7', '₇'), ('8', '₈'), ('9', '₉'),
    ('+', '₊'), ('-', '₋'), ('−', '₋'), ('=', '₌'), ('(', '₍'), (')', '₎'),
    ('a', 'ₐ'), ('e', 'ₑ'), ('h', 'ₕ'), ('i', 'ᵢ'), ('j', 'ⱼ'), ('k', 'ₖ'),
    ('l', 'ₗ'), ('m', 'ₘ'), ('n', 'ₙ'), ('o', 'ₒ'), ('p', 'ₚ'), ('r', 'ᵣ'),
    ('s', 'ₛ'), ('t', 'ₜ'), ('u', 'ᵤ'), ('v', 'ᵥ'), ('x', 'ₓ'),
];

/// Groups and commands nested deeper than this are left as literal text
const MAX_NESTING: usize = 64;

/// Convert a TeX math body (no delimiters) to Unicode text.
pub fn to_unicode(tex: &str) -> String {
    let mut parser = TexParser {
        chars: tex.chars().collect(),
        pos: 0,
        depth: 0,
    };
    parser.parse_until(None).trim().to_string()
}

struct TexParser {
    chars: Vec<char>,
    pos: usize,
    depth: usize,
}

impl TexParser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    /// Run `f` one nesting level down, or `None` past [`MAX_NESTING`]
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> Option<T> {
        if self.depth >= MAX_NESTING {
            return None;
        }
        self.depth += 1;
        let out = f(self);
        self.depth -= 1;
        Some(out)
    }

    fn skip_spaces(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    /// Parse until the closing `end` char (consumed) or end of input
    fn parse_until(&mut self, end: Option<char>) -> String {
        let mut out = String::new();
        while let Some(c) = self.next() {
            if Some(c) == end {
                break;
            }
            match c {
                '\\' => out.push_str(&self.command()),
                '{' => match self.nested(|p| p.parse_until(Some('}'))) {
                    Some(inner) => out.push_str(&inner),
                    None => out.push('{'),
                },
                '}' => {}
                '^' => {
                    let arg = self.argument();
                    out.push_str(&script(&arg, SUPERSCRIPTS, '^'));
                }
                '_' => {
                    let arg = self.argument();
                    out.push_str(&script(&arg, SUBSCRIPTS, '_'));
                }
                '~' => out.push(' '),
                '\'' => out.push('′'),
                '-' => out.push('−'),
                '&' => {}
                _ => out.push(c),
            }
        }
        out
    }

    /// A single argument: `{group}`, `\command` or one char
    fn argument(&mut self) -> String {
        self.skip_spaces();
        match self.next() {
            Some('{') => self
                .nested(|p| p.parse_until(Some('}')))
                .unwrap_or_else(|| "{".to_string()),
            Some('\\') => self.command(),
            Some(c) => c.to_string(),
            None => String::new(),
        }
    }

    /// Optional `[...]` argument
    fn optional_argument(&mut self) -> Option<String> {
        self.skip_spaces();
        if self.peek() != Some('[') {
            return None;
        }
        self.pos += 1;
        Some(self.parse_until(Some(']')))
    }

    /// Handle a command; the backslash is already consumed
    fn command(&mut self) -> String {
        let mut name = String::new();
        while let Some(c) = self.peek().filter(char::is_ascii_alphabetic) {
            name.push(c);
            self.pos += 1;
        }

        if name.is_empty() {
            return match self.next() {
                Some(',') | Some(':') | Some(';') | Some(' ') => " ".to_string(),
                Some('!') => String::new(),
                Some('\\') => " ".to_string(),
                Some(c) => c.to_string(),
                None => String::new(),
            };
        }

        match self.nested(|p| p.expand(&name)) {
            Some(out) => out,
            None => name,
        }
    }

    /// Expand a named command, reading its arguments
    fn expand(&mut self, name: &str) -> String {
        match name {
            "frac" | "dfrac" | "tfrac" => {
                let num = self.argument();
                let den = self.argument();
                format!("{}/{}", group(&num), group(&den))
            }
            "sqrt" => {
                let index = self.optional_argument();
                let radicand = self.argument();
                let root = match index.as_deref() {
                    Some("3") => "∛",
                    Some("4") => "∜",
                    _ => "√",
                };
                match index.filter(|i| i != "3" && i != "4") {
                    Some(i) => format!("{}{}{}", script(&i, SUPERSCRIPTS, '^'), root, group(&radicand)),
                    None => format!("{}{}", root, group(&radicand)),
                }
            }
            "text" | "textrm" | "textbf" | "textit" | "mathrm" | "mathbf" | "mathit"
            | "mathsf" | "mathtt" | "mathcal" | "operatorname" | "boldsymbol" => self.argument(),
            "mathbb" => self.argument().chars().map(double_struck).collect(),
            "hat" | "bar" | "overline" | "vec" | "tilde" | "dot" => {
                let arg = self.argument();
                let accent = match name {
                    "hat" => '\u{0302}',
                    "bar" | "overline" => '\u{0304}',
                    "vec" => '\u{20D7}',
                    "tilde" => '\u{0303}',
                    _ => '\u{0307}',
                };
                let mut out = arg;
                out.push(accent);
                out
            }
            "left" | "right" | "big" | "Big" | "bigg" | "Bigg" | "bigl" | "bigr"
            | "Bigl" | "Bigr" | "displaystyle" | "textstyle" | "limits" | "nolimits" => {
                // `\left.` is an invisible delimiter
                if self.peek() == Some('.') {
                    self.pos += 1;
                }
                String::new()
            }
            "quad" => " ".to_string(),
            "qquad" => "  ".to_string(),
            "begin" | "end" => {
                // Environment names carry no visible content
                self.argument();
                String::new()
            }
            _ => SYMBOLS
                .get(name)
                .map(|s| s.to_string())
                .unwrap_or_else(|| name.to_string()),
        }
    }
}

/// Render a super/subscript, falling back to `^(...)` when any char lacks a
/// Unicode script form.
fn script(arg: &str, table: &[(char, char)], marker: char) -> String {
    if arg.is_empty() {
        return String::new();
    }
    let mapped: Option<String> = arg
        .chars()
        .map(|c| table.iter().find(|(from, _)| *from == c).map(|(_, to)| *to))
        .collect();
    match mapped {
        Some(s) => s,
        None => format!("{marker}({arg})"),
    }
}

/// Parenthesize multi-char operands of `/` and `√`
fn group(s: &str) -> String {
    let s = s.trim();
    let simple = s.chars().count() <= 1 || s.chars().all(|c| c.is_ascii_digit() || c == '.');
    if simple {
        s.to_string()
    } else {
        format!("({s})")
    }
}

fn double_struck(c: char) -> char {
    match c {
        'N' => 'ℕ',
        'Z' => 'ℤ',
        'Q' => 'ℚ',
        'R' => 'ℝ',
        'C' => 'ℂ',
        'P' => 'ℙ',
        'H' => 'ℍ',
        'E' => '𝔼',
        _ => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greek_and_operators() {
        assert_eq!(to_unicode(r"\alpha + \beta \times \Gamma"), "α + β × Γ");
        assert_eq!(to_unicode(r"a \leq b \neq c"), "a ≤ b ≠ c");
    }

    #[test]
    fn test_superscripts_and_subscripts() {
        assert_eq!(to_unicode("x^2"), "x²");
        assert_eq!(to_unicode("x^{10}"), "x¹⁰");
        assert_eq!(to_unicode("a_1 + a_{n}"), "a₁ + aₙ");
        // 'y' has no superscript form
        assert_eq!(to_unicode("e^{y}"), "e^(y)");
        assert_eq!(to_unicode("e^{yz}"), "e^(yz)");
        assert_eq!(to_unicode("x^"), "x");
        assert_eq!(to_unicode("x_{}"), "x");
    }

    #[test]
    fn test_deep_nesting_stays_bounded() {
        let braces = "{".repeat(20_000) + "x";
        let out = to_unicode(&braces);
        assert!(out.ends_with('x'));
        assert_eq!(out.matches('{').count(), 20_000 - MAX_NESTING);

        let roots = r"\sqrt".repeat(2_000) + "x";
        assert!(to_unicode(&roots).contains('x'));

        let indices = r"\sqrt[".repeat(20_000);
        let _ = to_unicode(&indices);
    }

    #[test]
    fn test_fractions() {
        assert_eq!(to_unicode(r"\frac{1}{2}"), "1/2");
        assert_eq!(to_unicode(r"\frac{a+b}{c}"), "(a+b)/c");
        assert_eq!(to_unicode(r"\dfrac12"), "1/2");
    }

    #[test]
    fn test_roots() {
        assert_eq!(to_unicode(r"\sqrt{x}"), "√x");
        assert_eq!(to_unicode(r"\sqrt{x+1}"), "√(x+1)");
        assert_eq!(to_unicode(r"\sqrt[3]{8}"), "∛8");
        assert_eq!(to_unicode(r"\sqrt[n]{x}"), "ⁿ√x");
    }

    #[test]
    fn test_text_and_blackboard() {
        assert_eq!(to_unicode(r"x \in \mathbb{R}"), "x ∈ ℝ");
        assert_eq!(to_unicode(r"\text{rate}"), "rate");
    }

    #[test]
    fn test_delimiters_and_spacing() {
        assert_eq!(to_unicode(r"\left( x \right)"), "( x )");
        assert_eq!(to_unicode(r"\left. f \right|"), "f |");
        assert_eq!(to_unicode(r"a\,b"), "a b");
    }

    #[test]
    fn test_named_functions_and_unknown_commands() {
        assert_eq!(to_unicode(r"\sin x"), "sin x");
        assert_eq!(to_unicode(r"\foo"), "foo");
    }

    #[test]
    fn test_minus_and_prime() {
        assert_eq!(to_unicode("f'(x) - 1"), "f′(x) − 1");
    }

    #[test]
    fn test_integral_with_limits() {
        assert_eq!(to_unicode(r"\int_0^1 x\,dx"), "∫₀¹ x dx");
    }
}
