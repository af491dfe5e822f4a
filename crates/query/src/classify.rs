//! Collection name → entity type name.
//!
//! Inflection mirrors ActiveSupport's English singular rules so that the
//! entity type we emit is the constant the application actually defines.

use once_cell::sync::Lazy;
use regex::Regex;

/// Words left untouched by [`singularize`].
const UNCOUNTABLE: &[&str] = &[
    "equipment",
    "information",
    "rice",
    "money",
    "species",
    "series",
    "fish",
    "sheep",
    "jeans",
    "police",
];

/// Singular/plural pairs that bypass the suffix rules.
const IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("man", "men"),
    ("child", "children"),
    ("sex", "sexes"),
    ("move", "moves"),
    ("zombie", "zombies"),
];

/// Suffix rules, highest precedence first. The first rule that matches wins.
const SINGULAR_RULES: &[(&str, &str)] = &[
    (r"(database)s$", "${1}"),
    (r"(quiz)zes$", "${1}"),
    (r"(matr)ices$", "${1}ix"),
    (r"(vert|ind)ices$", "${1}ex"),
    (r"^(ox)en", "${1}"),
    (r"(alias|status)(es)?$", "${1}"),
    (r"(octop|vir)(us|i)$", "${1}us"),
    (r"^(a)x[ie]s$", "${1}xis"),
    (r"(cris|test)(is|es)$", "${1}is"),
    (r"(shoe)s$", "${1}"),
    (r"(o)es$", "${1}"),
    (r"(bus)(es)?$", "${1}"),
    (r"^(m|l)ice$", "${1}ouse"),
    (r"(x|ch|ss|sh)es$", "${1}"),
    (r"(m)ovies$", "${1}ovie"),
    (r"(s)eries$", "${1}eries"),
    (r"([^aeiouy]|qu)ies$", "${1}y"),
    (r"([lr])ves$", "${1}f"),
    (r"(tive)s$", "${1}"),
    (r"(hive)s$", "${1}"),
    (r"([^f])ves$", "${1}fe"),
    (r"(^analy)(sis|ses)$", "${1}sis"),
    (
        r"((a)naly|(b)a|(d)iagno|(p)arenthe|(p)rogno|(s)ynop|(t)he)(sis|ses)$",
        "${1}sis",
    ),
    (r"([ti])a$", "${1}um"),
    (r"(n)ews$", "${1}ews"),
    (r"(ss)$", "${1}"),
    (r"s$", ""),
];

static SINGULARS: Lazy<Vec<(Regex, String)>> = Lazy::new(|| {
    let irregular = IRREGULAR.iter().flat_map(|(singular, plural)| {
        let (s0, srest) = singular.split_at(1);
        let (p0, prest) = plural.split_at(1);
        [
            (format!("(?i)({p0}){prest}$"), format!("${{1}}{srest}")),
            (format!("(?i)({s0}){srest}$"), format!("${{1}}{srest}")),
        ]
    });
    let suffix = SINGULAR_RULES
        .iter()
        .map(|(pattern, replacement)| (format!("(?i){pattern}"), replacement.to_string()));

    irregular
        .chain(suffix)
        .map(|(pattern, replacement)| {
            (
                Regex::new(&pattern).expect("static inflection pattern"),
                replacement,
            )
        })
        .collect()
});

static ACRONYM_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Z\d]+)([A-Z][a-z])").expect("static underscore pattern"));
static WORD_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z\d])([A-Z])").expect("static underscore pattern"));

/// Whether `name` is acceptable as a collection name.
///
/// Accepts ASCII letters, digits and underscores, starting with a letter.
/// Anything else must be rejected before [`classify`] sees it.
pub fn is_valid_collection_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Convert a plural collection name into its entity type name.
///
/// Only the last segment is singularized: `"blog_posts"` → `"BlogPost"`,
/// `"users"` → `"User"`. CamelCase input is underscored first, so
/// `"BlogPosts"` and `"BlogPost"` classify the same way.
pub fn classify(collection_name: &str) -> String {
    let snake = underscore(collection_name.trim());
    match snake.rsplit_once('_') {
        Some((head, last)) => {
            let mut out = camelize(head);
            out.push_str(&camelize(&singularize(last)));
            out
        }
        None => camelize(&singularize(&snake)),
    }
}

/// Convert a snake_case word into CamelCase without changing its number.
pub fn camelize(snake: &str) -> String {
    let mut out = String::with_capacity(snake.len());
    for segment in snake.split('_').filter(|s| !s.is_empty()) {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
            out.extend(chars.map(|c| c.to_ascii_lowercase()));
        }
    }
    out
}

/// `"BlogPost"` → `"blog_post"`, `"HTMLPage"` → `"html_page"`.
pub fn underscore(word: &str) -> String {
    let split = ACRONYM_BOUNDARY.replace_all(word, "${1}_${2}");
    let split = WORD_BOUNDARY.replace_all(&split, "${1}_${2}");
    split.replace('-', "_").to_ascii_lowercase()
}

/// Singularize one English word. Case of the untouched prefix is preserved.
pub fn singularize(word: &str) -> String {
    let lower = word.to_ascii_lowercase();
    if word.is_empty() || UNCOUNTABLE.contains(&lower.as_str()) {
        return word.to_string();
    }

    for (rule, replacement) in SINGULARS.iter() {
        if rule.is_match(word) {
            let singular = rule.replace(word, replacement.as_str()).into_owned();
            return if singular.is_empty() {
                word.to_string()
            } else {
                singular
            };
        }
    }
    word.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn classify_singularizes_and_camelizes() {
        assert_eq!(classify("users"), "User");
        assert_eq!(classify("posts"), "Post");
        assert_eq!(classify("blog_posts"), "BlogPost");
        assert_eq!(classify("user_profile_images"), "UserProfileImage");
    }

    #[test]
    fn each_singular_rule() {
        let cases = [
            ("databases", "database"),
            ("quizzes", "quiz"),
            ("matrices", "matrix"),
            ("vertices", "vertex"),
            ("indices", "index"),
            ("oxen", "ox"),
            ("aliases", "alias"),
            ("statuses", "status"),
            ("status", "status"),
            ("octopi", "octopus"),
            ("viri", "virus"),
            ("axes", "axis"),
            ("crises", "crisis"),
            ("testes", "testis"),
            ("shoes", "shoe"),
            ("heroes", "hero"),
            ("potatoes", "potato"),
            ("buses", "bus"),
            ("bus", "bus"),
            ("mice", "mouse"),
            ("lice", "louse"),
            ("boxes", "box"),
            ("matches", "match"),
            ("addresses", "address"),
            ("dishes", "dish"),
            ("movies", "movie"),
            ("categories", "category"),
            ("soliloquies", "soliloquy"),
            ("shelves", "shelf"),
            ("wolves", "wolf"),
            ("objectives", "objective"),
            ("archives", "archive"),
            ("wives", "wife"),
            ("knives", "knife"),
            ("analyses", "analysis"),
            ("bases", "basis"),
            ("diagnoses", "diagnosis"),
            ("parentheses", "parenthesis"),
            ("prognoses", "prognosis"),
            ("synopses", "synopsis"),
            ("theses", "thesis"),
            ("data", "datum"),
            ("media", "medium"),
            ("news", "news"),
            ("class", "class"),
            ("days", "day"),
            ("users", "user"),
        ];
        for (plural, singular) in cases {
            assert_eq!(singularize(plural), singular, "singularize({plural})");
        }
    }

    #[test]
    fn irregular_and_uncountable_words() {
        let cases = [
            ("people", "person"),
            ("salespeople", "salesperson"),
            ("person", "person"),
            ("men", "man"),
            ("women", "woman"),
            ("children", "child"),
            ("sexes", "sex"),
            ("moves", "move"),
            ("zombies", "zombie"),
            ("series", "series"),
            ("species", "species"),
            ("sheep", "sheep"),
            ("equipment", "equipment"),
            ("police", "police"),
        ];
        for (plural, singular) in cases {
            assert_eq!(singularize(plural), singular, "singularize({plural})");
        }
    }

    #[test]
    fn classify_handles_common_inflections() {
        assert_eq!(classify("heroes"), "Hero");
        assert_eq!(classify("book_shelves"), "BookShelf");
        assert_eq!(classify("analyses"), "Analysis");
        assert_eq!(classify("order_statuses"), "OrderStatus");
        assert_eq!(classify("line_items"), "LineItem");
        assert_eq!(classify("people"), "Person");
    }

    #[test]
    fn classify_keeps_already_singular_names() {
        assert_eq!(classify("class"), "Class");
        assert_eq!(classify("user"), "User");
        assert_eq!(classify("s"), "S");
    }

    #[test]
    fn camel_case_input_is_underscored_first() {
        assert_eq!(classify("BlogPosts"), "BlogPost");
        assert_eq!(classify("BlogPost"), "BlogPost");
        assert_eq!(classify("User"), "User");
        assert_eq!(classify("HTMLPages"), "HtmlPage");
        assert_eq!(underscore("HTMLPage"), "html_page");
        assert_eq!(underscore("blog_posts"), "blog_posts");
    }

    #[test]
    fn camelize_does_not_singularize() {
        assert_eq!(camelize("application_record"), "ApplicationRecord");
        assert_eq!(camelize("user_settings"), "UserSettings");
        assert_eq!(camelize("a__b"), "AB");
    }

    #[test]
    fn collection_name_validation() {
        assert!(is_valid_collection_name("posts"));
        assert!(is_valid_collection_name("blog_posts2"));
        assert!(is_valid_collection_name("BlogPosts"));
        assert!(!is_valid_collection_name(""));
        assert!(!is_valid_collection_name("_posts"));
        assert!(!is_valid_collection_name("posts;drop"));
        assert!(!is_valid_collection_name("Post.all"));
        assert!(!is_valid_collection_name("posts "));
    }
}
