//! The rule list applied to clip exports.

use super::rule::Rule;

/// Rejection rules for clips. A clip is valid only if none of these hold:
///
/// - `privacy` is not exactly `"anybody"`
/// - `total_likes` is at most 10
/// - `total_plays` is at most 200
/// - `title` is 30 or more characters long (derived via [`super::FieldAccessors::clips`])
pub fn clip_rules() -> Vec<Rule> {
    vec![
        Rule::new("privacy", "strict_neq", "anybody"),
        Rule::new("total_likes", "lte", 10),
        Rule::new("total_plays", "lte", 200),
        Rule::new("title", "gte", 30),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_builtin_operators_parse() {
        for rule in clip_rules() {
            rule.comparison_op().unwrap();
        }
    }

    #[test]
    fn builtin_attributes_in_order() {
        let attrs: Vec<String> = clip_rules().iter().map(|r| r.attribute().to_string()).collect();
        assert_eq!(attrs, vec!["privacy", "total_likes", "total_plays", "title"]);
    }
}
