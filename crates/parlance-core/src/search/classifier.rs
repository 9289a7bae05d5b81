//! Heuristic classification of search hits.
//!
//! Each hit maps to exactly one `Category` via case-insensitive substring
//! rules evaluated in a fixed priority order -- first match wins, so
//! classification is total and deterministic. Grouping preserves the hits'
//! original relative order and lists categories in first-encountered order.

use parlance_types::search::{Category, ClassifiedGroup, SearchHit};

/// Assign a single hit to its category.
pub fn classify(hit: &SearchHit) -> Category {
    let title = hit.title.to_lowercase();
    let url = hit.url.to_lowercase();

    if url.contains("docs.")
        || url.contains("documentation")
        || title.contains("文档")
        || title.contains("api")
        || title.contains("guide")
    {
        return Category::TechDocs;
    }

    if url.contains("news")
        || url.contains("blog")
        || title.contains("新闻")
        || title.contains("资讯")
        || title.contains("发布")
    {
        return Category::News;
    }

    if title.contains("教程")
        || title.contains("tutorial")
        || title.contains("如何")
        || title.contains("how to")
    {
        return Category::Tutorials;
    }

    if url.contains("stackoverflow")
        || url.contains("zhihu")
        || url.contains("csdn")
        || title.contains("问答")
    {
        return Category::Qa;
    }

    if url.contains("github.com")
        || url.contains("官网")
        || title.contains("官方")
        || title.contains("official")
    {
        return Category::Official;
    }

    Category::Other
}

/// Group hits by category in a single pass.
///
/// Group order is the order in which each category is first encountered;
/// within a group, hits keep their provider rank order.
pub fn group_by_category(hits: &[SearchHit]) -> Vec<ClassifiedGroup> {
    let mut groups: Vec<ClassifiedGroup> = Vec::new();
    for hit in hits {
        let category = classify(hit);
        match groups.iter_mut().find(|g| g.category == category) {
            Some(group) => group.hits.push(hit.clone()),
            None => groups.push(ClassifiedGroup {
                category,
                hits: vec![hit.clone()],
            }),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(title: &str, url: &str) -> SearchHit {
        SearchHit {
            title: title.to_string(),
            url: url.to_string(),
            text: None,
        }
    }

    #[test]
    fn test_docs_url_is_tech_docs() {
        assert_eq!(
            classify(&hit("Example", "https://docs.example.com/api")),
            Category::TechDocs
        );
    }

    #[test]
    fn test_title_keywords() {
        assert_eq!(
            classify(&hit("教程：如何使用", "https://example.com")),
            Category::Tutorials
        );
        assert_eq!(
            classify(&hit("版本发布公告", "https://example.com")),
            Category::News
        );
        assert_eq!(
            classify(&hit("官方 FAQ", "https://example.com")),
            Category::Official
        );
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(
            classify(&hit("Rust Tutorial", "https://example.com")),
            Category::Tutorials
        );
        assert_eq!(
            classify(&hit("OFFICIAL site", "https://example.com")),
            Category::Official
        );
    }

    #[test]
    fn test_priority_order() {
        // "api" in the title outranks the github.com url rule.
        assert_eq!(
            classify(&hit("API reference", "https://github.com/x/y")),
            Category::TechDocs
        );
        // A news url outranks a tutorial title.
        assert_eq!(
            classify(&hit("Rust tutorial", "https://news.example.com/post")),
            Category::News
        );
    }

    #[test]
    fn test_qa_sites() {
        assert_eq!(
            classify(&hit("borrow checker error", "https://stackoverflow.com/q/1")),
            Category::Qa
        );
        assert_eq!(
            classify(&hit("x", "https://www.zhihu.com/question/1")),
            Category::Qa
        );
    }

    #[test]
    fn test_no_match_is_other() {
        assert_eq!(
            classify(&hit("random page", "https://example.com/page")),
            Category::Other
        );
    }

    #[test]
    fn test_grouping_preserves_order() {
        let hits = vec![
            hit("random one", "https://a.example.com"),
            hit("Rust tutorial", "https://b.example.com"),
            hit("random two", "https://c.example.com"),
        ];
        let groups = group_by_category(&hits);
        assert_eq!(groups.len(), 2);
        // First-encountered category leads.
        assert_eq!(groups[0].category, Category::Other);
        assert_eq!(groups[0].hits.len(), 2);
        assert_eq!(groups[0].hits[0].title, "random one");
        assert_eq!(groups[0].hits[1].title, "random two");
        assert_eq!(groups[1].category, Category::Tutorials);
    }

    #[test]
    fn test_membership_invariant_to_input_order() {
        let a = hit("random one", "https://a.example.com");
        let b = hit("Rust tutorial", "https://b.example.com");
        for ordering in [vec![a.clone(), b.clone()], vec![b.clone(), a.clone()]] {
            let groups = group_by_category(&ordering);
            let find = |title: &str| {
                groups
                    .iter()
                    .find(|g| g.hits.iter().any(|h| h.title == title))
                    .map(|g| g.category)
            };
            assert_eq!(find("random one"), Some(Category::Other));
            assert_eq!(find("Rust tutorial"), Some(Category::Tutorials));
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(group_by_category(&[]).is_empty());
    }
}
