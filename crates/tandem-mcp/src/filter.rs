use crate::client::ToolInfo;

/// Name-based tool filter.
///
/// Restricts the tools exposed to an agent to a literal allow-list, and can
/// report which advertised tools look like write operations. Matching is
/// case-sensitive; the allow pass preserves server order.
#[derive(Debug, Clone)]
pub struct ToolFilter {
    allowed: Vec<String>,
    blocked_substrings: Vec<String>,
}

impl ToolFilter {
    /// Filter to exactly the named tools.
    pub fn allow(names: &[&str]) -> Self {
        Self {
            allowed: names.iter().map(|n| n.to_string()).collect(),
            blocked_substrings: ["create", "update", "fork"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// Override the substrings used by the blocked-tool diagnostic.
    pub fn with_blocked_substrings(mut self, substrings: &[&str]) -> Self {
        self.blocked_substrings = substrings.iter().map(|s| s.to_string()).collect();
        self
    }

    /// The subsequence of `tools` whose name is in the allow-list, in the
    /// order the server advertised them.
    pub fn apply<'a>(&self, tools: &'a [ToolInfo]) -> Vec<&'a ToolInfo> {
        tools
            .iter()
            .filter(|t| self.allowed.iter().any(|name| name == &t.name))
            .collect()
    }

    /// Owned variant of [`apply`](Self::apply).
    pub fn apply_owned(&self, tools: &[ToolInfo]) -> Vec<ToolInfo> {
        self.apply(tools).into_iter().cloned().collect()
    }

    /// Diagnostic pass: tools whose name contains one of the blocked
    /// substrings. These are the ones the allow-list is keeping out.
    pub fn blocked<'a>(&self, tools: &'a [ToolInfo]) -> Vec<&'a ToolInfo> {
        tools
            .iter()
            .filter(|t| self.blocked_substrings.iter().any(|s| t.name.contains(s.as_str())))
            .collect()
    }

    pub fn allowed_names(&self) -> &[String] {
        &self.allowed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tool(name: &str) -> ToolInfo {
        ToolInfo {
            name: name.to_string(),
            description: None,
            input_schema: json!({"type": "object"}),
        }
    }

    #[test]
    fn allow_keeps_server_order() {
        let tools = vec![
            tool("create_issue"),
            tool("search_code"),
            tool("fork_repository"),
            tool("search_repositories"),
            tool("search_issues"),
        ];

        let filter = ToolFilter::allow(&["search_repositories", "search_code", "search_issues"]);
        let kept: Vec<&str> = filter.apply(&tools).iter().map(|t| t.name.as_str()).collect();

        // Server order, not allow-list order.
        assert_eq!(kept, vec!["search_code", "search_repositories", "search_issues"]);
    }

    #[test]
    fn allow_is_literal_and_case_sensitive() {
        let tools = vec![tool("Search_Code"), tool("search_code_v2")];
        let filter = ToolFilter::allow(&["search_code"]);

        assert!(filter.apply(&tools).is_empty());
    }

    #[test]
    fn empty_allow_list_yields_nothing() {
        let tools = vec![tool("search_code")];
        let filter = ToolFilter::allow(&[]);

        assert!(filter.apply(&tools).is_empty());
    }

    #[test]
    fn duplicates_are_preserved() {
        let tools = vec![tool("search_code"), tool("search_code")];
        let filter = ToolFilter::allow(&["search_code"]);

        assert_eq!(filter.apply(&tools).len(), 2);
    }

    #[test]
    fn blocked_matches_by_substring() {
        let tools = vec![
            tool("create_issue"),
            tool("update_file"),
            tool("fork_repository"),
            tool("search_code"),
            tool("recreate_index"),
        ];

        let filter = ToolFilter::allow(&["search_code"]);
        let blocked: Vec<&str> = filter.blocked(&tools).iter().map(|t| t.name.as_str()).collect();

        // "recreate_index" contains "create": substring containment, not equality.
        assert_eq!(
            blocked,
            vec!["create_issue", "update_file", "fork_repository", "recreate_index"]
        );
    }

    #[test]
    fn blocked_substrings_can_be_overridden() {
        let tools = vec![tool("delete_repo"), tool("create_issue")];
        let filter = ToolFilter::allow(&[]).with_blocked_substrings(&["delete"]);

        let blocked: Vec<&str> = filter.blocked(&tools).iter().map(|t| t.name.as_str()).collect();
        assert_eq!(blocked, vec!["delete_repo"]);
    }
}
