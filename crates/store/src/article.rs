use serde::{Deserialize, Serialize};

/// A summarised research article shown alongside simulations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchArticle {
    pub id: String,
    pub title: String,
    pub authors: Vec<String>,
    pub source: String,
    /// Publication date as an ISO 8601 date string.
    pub pub_date: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub summary: String,
    pub why_it_matters: String,
    pub url: String,
    pub topics: Vec<String>,
}

/// An inclusive range of ISO 8601 date strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: String,
    pub to: String,
}

/// Criteria for narrowing a list of articles.
///
/// Every field is optional. An empty filter matches every article.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topics: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_query: Option<String>,
}

impl ResearchFilter {
    /// Returns `true` if `article` satisfies every criterion that is set.
    ///
    /// An article matches the topics if it carries any of them. The search
    /// query matches the title or abstract, ignoring case. Dates compare as
    /// strings, which orders ISO 8601 dates chronologically.
    #[must_use]
    pub fn matches(&self, article: &ResearchArticle) -> bool {
        let topic_ok = match &self.topics {
            Some(topics) if !topics.is_empty() => {
                topics.iter().any(|topic| article.topics.contains(topic))
            }
            _ => true,
        };

        let query_ok = match self.search_query.as_deref().map(str::to_lowercase) {
            Some(query) if !query.is_empty() => {
                article.title.to_lowercase().contains(&query)
                    || article.abstract_text.to_lowercase().contains(&query)
            }
            _ => true,
        };

        let date_ok = self.date_range.as_ref().is_none_or(|range| {
            range.from.as_str() <= article.pub_date.as_str()
                && article.pub_date.as_str() <= range.to.as_str()
        });

        topic_ok && query_ok && date_ok
    }

    /// Returns the articles that match, preserving their order.
    pub fn apply<'a>(
        &'a self,
        articles: &'a [ResearchArticle],
    ) -> impl Iterator<Item = &'a ResearchArticle> + 'a {
        articles.iter().filter(|article| self.matches(article))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(id: &str, title: &str, pub_date: &str, topics: &[&str]) -> ResearchArticle {
        ResearchArticle {
            id: id.to_owned(),
            title: title.to_owned(),
            authors: vec!["Hovorka R".to_owned()],
            source: "Diabetes Care".to_owned(),
            pub_date: pub_date.to_owned(),
            abstract_text: "Closed-loop control over 12 weeks in adolescents.".to_owned(),
            summary: "Hybrid closed loop improved time in range.".to_owned(),
            why_it_matters: "Supports wider access to automated delivery.".to_owned(),
            url: format!("https://pubmed.ncbi.nlm.nih.gov/{id}/"),
            topics: topics.iter().map(|&topic| topic.to_owned()).collect(),
        }
    }

    fn library() -> Vec<ResearchArticle> {
        vec![
            article("1", "Hybrid closed loop in adolescents", "2024-02-01", &["AID Systems", "Type 1"]),
            article("2", "CGM accuracy at low glucose", "2023-07-15", &["CGM"]),
            article("3", "Pump adherence in type 2 diabetes", "2024-11-30", &["Insulin Pumps", "Type 2"]),
        ]
    }

    fn ids(filter: &ResearchFilter, articles: &[ResearchArticle]) -> Vec<String> {
        filter.apply(articles).map(|article| article.id.clone()).collect()
    }

    #[test]
    fn empty_filter_matches_everything() {
        let articles = library();
        assert_eq!(ids(&ResearchFilter::default(), &articles), ["1", "2", "3"]);
    }

    #[test]
    fn any_topic_matches() {
        let filter = ResearchFilter {
            topics: Some(vec!["CGM".to_owned(), "Type 2".to_owned()]),
            ..ResearchFilter::default()
        };
        assert_eq!(ids(&filter, &library()), ["2", "3"]);
    }

    #[test]
    fn search_ignores_case_and_reads_the_abstract() {
        let articles = library();
        let by_title = ResearchFilter {
            search_query: Some("GLUCOSE".to_owned()),
            ..ResearchFilter::default()
        };
        assert_eq!(ids(&by_title, &articles), ["2"]);

        let by_abstract = ResearchFilter {
            search_query: Some("adolescents".to_owned()),
            ..ResearchFilter::default()
        };
        // Every article shares the same abstract.
        assert_eq!(ids(&by_abstract, &articles), ["1", "2", "3"]);
    }

    #[test]
    fn date_range_is_inclusive() {
        let filter = ResearchFilter {
            date_range: Some(DateRange {
                from: "2024-02-01".to_owned(),
                to: "2024-11-30".to_owned(),
            }),
            ..ResearchFilter::default()
        };
        assert_eq!(ids(&filter, &library()), ["1", "3"]);
    }

    #[test]
    fn criteria_combine() {
        let filter = ResearchFilter {
            topics: Some(vec!["Type 1".to_owned(), "Type 2".to_owned()]),
            search_query: Some("pump".to_owned()),
            date_range: None,
        };
        assert_eq!(ids(&filter, &library()), ["3"]);
    }

    #[test]
    fn abstract_keeps_its_wire_name() {
        let json = serde_json::to_value(&library()[0]).unwrap();
        assert!(json.get("abstract").is_some());
        assert_eq!(json["whyItMatters"], "Supports wider access to automated delivery.");
        assert_eq!(json["pubDate"], "2024-02-01");

        let filter: ResearchFilter =
            serde_json::from_str(r#"{"searchQuery":"cgm","dateRange":{"from":"2023-01-01","to":"2023-12-31"}}"#)
                .unwrap();
        assert_eq!(filter.topics, None);
        assert_eq!(ids(&filter, &library()), ["2"]);
    }
}
