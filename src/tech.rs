//! Technology complexity table and the static technology taxonomies.
//!
//! Complexity is a heuristic in \[0.0, 1.0\]: 0.1 for plain HTML up to 0.9
//! for deep learning or blockchain work. Unknown technologies sit at the
//! neutral midpoint.

use std::collections::HashMap;

/// Complexity assumed for any technology the table does not know.
pub const DEFAULT_TECH_COMPLEXITY: f64 = 0.5;

/// Category name for technologies outside every skill category.
pub const OTHER_CATEGORY: &str = "other";

const DEFAULT_ENTRIES: &[(&str, f64)] = &[
    // Web
    ("html", 0.1),
    ("css", 0.2),
    ("javascript", 0.4),
    ("react", 0.6),
    ("vue", 0.5),
    ("angular", 0.7),
    ("node.js", 0.5),
    ("express", 0.4),
    ("django", 0.6),
    ("flask", 0.4),
    ("fastapi", 0.5),
    ("wordpress", 0.3),
    ("webflow", 0.2),
    ("shopify", 0.3),
    ("squarespace", 0.2),
    // Mobile
    ("ios", 0.7),
    ("android", 0.7),
    ("react native", 0.6),
    ("flutter", 0.6),
    ("ionic", 0.5),
    ("swift", 0.7),
    ("kotlin", 0.7),
    ("java", 0.6),
    ("objective-c", 0.8),
    // Backend
    ("python", 0.5),
    ("c#", 0.6),
    ("php", 0.4),
    ("ruby", 0.5),
    ("go", 0.7),
    ("mysql", 0.4),
    ("postgresql", 0.5),
    ("mongodb", 0.5),
    ("redis", 0.4),
    ("docker", 0.6),
    ("kubernetes", 0.8),
    ("aws", 0.7),
    ("azure", 0.7),
    ("gcp", 0.7),
    // AI/ML
    ("machine learning", 0.8),
    ("deep learning", 0.9),
    ("tensorflow", 0.8),
    ("pytorch", 0.8),
    ("nlp", 0.8),
    ("computer vision", 0.9),
    ("data science", 0.7),
    // Design
    ("figma", 0.3),
    ("sketch", 0.3),
    ("adobe xd", 0.4),
    ("photoshop", 0.4),
    ("illustrator", 0.5),
    ("ui/ux", 0.5),
    ("graphic design", 0.4),
    ("branding", 0.5),
    // Other
    ("api integration", 0.5),
    ("payment integration", 0.6),
    ("authentication", 0.5),
    ("real-time", 0.7),
    ("blockchain", 0.9),
    ("game development", 0.8),
];

/// Skill categories in lookup order. A technology belongs to the first
/// category that lists it (`ui/ux` is frontend, not design).
pub const SKILL_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "frontend",
        &["html", "css", "javascript", "react", "vue", "angular", "ui/ux"],
    ),
    (
        "backend",
        &["python", "java", "node.js", "django", "flask", "mysql", "postgresql"],
    ),
    (
        "mobile",
        &["ios", "android", "react native", "flutter", "swift", "kotlin"],
    ),
    ("devops", &["docker", "kubernetes", "aws", "azure", "gcp", "ci/cd"]),
    ("design", &["figma", "sketch", "ui/ux", "graphic design", "branding"]),
    (
        "ai/ml",
        &["machine learning", "deep learning", "tensorflow", "pytorch", "data science"],
    ),
    ("cms", &["wordpress", "webflow", "shopify", "drupal"]),
];

const TECH_ROLES: &[(&str, &str)] = &[
    ("react", "frontend developer"),
    ("vue", "frontend developer"),
    ("angular", "frontend developer"),
    ("django", "backend developer"),
    ("flask", "backend developer"),
    ("node.js", "backend developer"),
    ("ios", "ios developer"),
    ("android", "android developer"),
    ("react native", "mobile developer"),
    ("flutter", "mobile developer"),
    ("figma", "ui/ux designer"),
    ("sketch", "ui/ux designer"),
    ("aws", "devops engineer"),
    ("docker", "devops engineer"),
    ("machine learning", "data scientist"),
];

/// Skill category for a technology, or `"other"`.
pub fn category_of(technology: &str) -> &'static str {
    let tech = normalize(technology);
    SKILL_CATEGORIES
        .iter()
        .find(|(_, techs)| techs.contains(&tech.as_str()))
        .map(|(category, _)| *category)
        .unwrap_or(OTHER_CATEGORY)
}

/// The specialist role a technology calls for, if any.
pub fn role_for_technology(technology: &str) -> Option<&'static str> {
    let tech = normalize(technology);
    TECH_ROLES
        .iter()
        .find(|(t, _)| *t == tech)
        .map(|(_, role)| *role)
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Ordered mapping of technology name to complexity.
///
/// Order is significant: extraction from free text reports technologies in
/// table order.
#[derive(Debug, Clone)]
pub struct TechComplexityTable {
    entries: Vec<(String, f64)>,
    index: HashMap<String, usize>,
}

impl Default for TechComplexityTable {
    fn default() -> Self {
        let mut table = Self::empty();
        for (name, complexity) in DEFAULT_ENTRIES {
            table = table.with_entry(name, *complexity);
        }
        table
    }
}

impl TechComplexityTable {
    /// A table with no entries; every lookup returns the default complexity.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Insert or override an entry. Complexity is clamped to \[0.0, 1.0\].
    pub fn with_entry(mut self, name: &str, complexity: f64) -> Self {
        let key = normalize(name);
        let complexity = complexity.clamp(0.0, 1.0);
        match self.index.get(&key) {
            Some(&i) => self.entries[i].1 = complexity,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, complexity));
            }
        }
        self
    }

    /// Complexity of a technology, `0.5` when unknown.
    pub fn complexity_of(&self, technology: &str) -> f64 {
        self.get(technology).unwrap_or(DEFAULT_TECH_COMPLEXITY)
    }

    /// Complexity of a known technology.
    pub fn get(&self, technology: &str) -> Option<f64> {
        self.index
            .get(&normalize(technology))
            .map(|&i| self.entries[i].1)
    }

    pub fn contains(&self, technology: &str) -> bool {
        self.index.contains_key(&normalize(technology))
    }

    /// All entries in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(name, c)| (name.as_str(), *c))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Technologies whose names occur as substrings of `text` (case-insensitive).
    ///
    /// Plain substring matching: `java` is found inside `javascript` and `go`
    /// inside `google`. Callers rely on this being a cheap scan, not NLP.
    pub fn mentioned_in(&self, text: &str) -> Vec<&str> {
        let lower = text.to_lowercase();
        self.entries
            .iter()
            .filter(|(name, _)| lower.contains(name.as_str()))
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Number of technologies above the "new technology" complexity bar (0.7).
    pub fn count_complex(&self, technologies: &[String]) -> usize {
        technologies
            .iter()
            .filter(|t| self.complexity_of(t) > 0.7)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_technology_is_neutral() {
        let table = TechComplexityTable::default();
        assert_eq!(table.complexity_of("cobol-on-cogs"), 0.5);
        assert_eq!(table.complexity_of(""), 0.5);
        assert!(table.get("cobol-on-cogs").is_none());
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let table = TechComplexityTable::default();
        assert_eq!(table.complexity_of("React"), 0.6);
        assert_eq!(table.complexity_of("  KUBERNETES "), 0.8);
    }

    #[test]
    fn java_is_listed_once() {
        let table = TechComplexityTable::default();
        assert_eq!(table.iter().filter(|(n, _)| *n == "java").count(), 1);
        assert_eq!(table.complexity_of("java"), 0.6);
    }

    #[test]
    fn with_entry_overrides_and_clamps() {
        let table = TechComplexityTable::default()
            .with_entry("react", 0.95)
            .with_entry("zig", 1.7);
        assert_eq!(table.complexity_of("react"), 0.95);
        assert_eq!(table.complexity_of("zig"), 1.0);
        assert_eq!(table.len(), DEFAULT_ENTRIES.len() + 1);
    }

    #[test]
    fn mentioned_in_uses_table_order_and_substrings() {
        let table = TechComplexityTable::default();
        let found = table.mentioned_in("A JavaScript app on Django");
        // `java` hides in "javascript", `go` in "django".
        assert_eq!(found, vec!["javascript", "django", "java", "go"]);
    }

    #[test]
    fn categories_take_first_match() {
        assert_eq!(category_of("ui/ux"), "frontend");
        assert_eq!(category_of("Figma"), "design");
        assert_eq!(category_of("ci/cd"), "devops");
        assert_eq!(category_of("stripe"), OTHER_CATEGORY);
    }

    #[test]
    fn technology_roles() {
        assert_eq!(role_for_technology("react"), Some("frontend developer"));
        assert_eq!(role_for_technology("Docker"), Some("devops engineer"));
        assert_eq!(role_for_technology("postgresql"), None);
    }

    #[test]
    fn count_complex_uses_strict_threshold() {
        let table = TechComplexityTable::default();
        let techs: Vec<String> = ["kubernetes", "aws", "blockchain", "react"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        // aws is exactly 0.7 and does not count.
        assert_eq!(table.count_complex(&techs), 2);
    }
}
