use regex::{Regex, RegexBuilder};

/// A single case-insensitive literal rewrite applied before synthesis,
/// e.g. `Labs => Labbz` so the speech service pronounces a brand correctly.
#[derive(Debug, Clone)]
pub struct PhoneticRule {
    replacement: String,
    matcher: Regex,
}

impl PhoneticRule {
    pub fn new(pattern: &str, replacement: &str) -> Result<Self, regex::Error> {
        let matcher = RegexBuilder::new(&regex::escape(pattern))
            .case_insensitive(true)
            .build()?;

        Ok(Self {
            replacement: replacement.to_string(),
            matcher,
        })
    }

    fn apply(&self, text: &str) -> String {
        self.matcher
            .replace_all(text, regex::NoExpand(&self.replacement))
            .into_owned()
    }
}

/// Ordered set of phonetic rules. Rules run in declaration order, each on
/// the output of the previous one.
#[derive(Debug, Clone, Default)]
pub struct PhoneticRules {
    rules: Vec<PhoneticRule>,
}

impl PhoneticRules {
    pub fn new(rules: Vec<PhoneticRule>) -> Self {
        Self { rules }
    }

    /// Parse `"Sundaram=>Suun-duh-ruhm;Labs=>Labbz"`.
    ///
    /// Empty entries are skipped so a trailing `;` is harmless.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let mut rules = Vec::new();

        for entry in raw.split(';').map(str::trim).filter(|e| !e.is_empty()) {
            let (pattern, replacement) = entry
                .split_once("=>")
                .ok_or_else(|| format!("phonetic rule '{}' is missing '=>'", entry))?;

            let pattern = pattern.trim();
            if pattern.is_empty() {
                return Err(format!("phonetic rule '{}' has an empty pattern", entry));
            }

            let rule = PhoneticRule::new(pattern, replacement.trim())
                .map_err(|e| format!("phonetic rule '{}' is invalid: {}", entry, e))?;
            rules.push(rule);
        }

        Ok(Self { rules })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn apply(&self, text: &str) -> String {
        self.rules
            .iter()
            .fold(text.to_string(), |acc, rule| rule.apply(&acc))
    }
}
