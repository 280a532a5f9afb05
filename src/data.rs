//! Sample Data Model
//!
//! Plain literal records painted once per render. Nothing here is
//! persisted or mutated; `DashboardData::default()` is the embedded
//! concept data set.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Keyword {
    pub term: String,
    pub active: bool,
    /// 0-100, rendered through the tier mapping.
    pub weight: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub keywords: Vec<Keyword>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Opportunity {
    pub title: String,
    pub source: String,
    pub time: String,
    /// 0-100, rendered through the tier mapping.
    pub relevance: u8,
    pub trending: bool,
    pub keywords: Vec<String>,
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingItem {
    pub topic: String,
    pub mentions: u32,
    /// Signed percent text, e.g. "+23%". A leading '+' renders green.
    pub change: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertItem {
    pub title: String,
    pub time: String,
    pub urgency: Urgency,
}

/// Everything one render pass paints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardData {
    pub categories: Vec<Category>,
    pub opportunities: Vec<Opportunity>,
    pub trending: Vec<TrendingItem>,
    pub alerts: Vec<AlertItem>,
}

fn kw(term: &str, active: bool, weight: u8) -> Keyword {
    Keyword {
        term: term.to_string(),
        active,
        weight,
    }
}

impl Default for DashboardData {
    fn default() -> Self {
        Self {
            categories: vec![
                Category {
                    name: "Industry Terms".to_string(),
                    keywords: vec![
                        kw("AI Technology", true, 95),
                        kw("Machine Learning", true, 88),
                        kw("Data Science", false, 75),
                    ],
                },
                Category {
                    name: "Brand Values".to_string(),
                    keywords: vec![
                        kw("Innovation", true, 92),
                        kw("Excellence", true, 85),
                        kw("Customer Focus", true, 90),
                    ],
                },
                Category {
                    name: "Products".to_string(),
                    keywords: vec![
                        kw("Analytics Platform", true, 96),
                        kw("AI Solutions", false, 70),
                        kw("Cloud Services", true, 82),
                    ],
                },
            ],
            opportunities: vec![
                Opportunity {
                    title: "OpenAI Launches GPT-5 with Revolutionary Reasoning".to_string(),
                    source: "TechCrunch".to_string(),
                    time: "2 hours ago".to_string(),
                    relevance: 95,
                    trending: true,
                    keywords: vec!["AI Technology".to_string(), "Innovation".to_string()],
                    summary: "Major breakthrough in AI capabilities opens new content opportunities..."
                        .to_string(),
                },
                Opportunity {
                    title: "Machine Learning Transforming Healthcare Diagnostics".to_string(),
                    source: "Forbes".to_string(),
                    time: "4 hours ago".to_string(),
                    relevance: 88,
                    trending: true,
                    keywords: vec!["Machine Learning".to_string(), "Innovation".to_string()],
                    summary: "AI-powered diagnostic tools achieving 95% accuracy in early detection..."
                        .to_string(),
                },
                Opportunity {
                    title: "Data Science Ethics: New Framework Proposed".to_string(),
                    source: "Wired".to_string(),
                    time: "6 hours ago".to_string(),
                    relevance: 76,
                    trending: false,
                    keywords: vec!["Data Science".to_string()],
                    summary: "Industry leaders collaborate on comprehensive ethical guidelines..."
                        .to_string(),
                },
                Opportunity {
                    title: "Analytics Platform Market Reaches $50B".to_string(),
                    source: "Bloomberg".to_string(),
                    time: "8 hours ago".to_string(),
                    relevance: 92,
                    trending: true,
                    keywords: vec!["Analytics Platform".to_string(), "Innovation".to_string()],
                    summary: "Explosive growth driven by AI integration and cloud adoption..."
                        .to_string(),
                },
            ],
            trending: vec![
                TrendingItem {
                    topic: "AI Regulation".to_string(),
                    mentions: 15420,
                    change: "+23%".to_string(),
                },
                TrendingItem {
                    topic: "Cloud Security".to_string(),
                    mentions: 12350,
                    change: "+15%".to_string(),
                },
                TrendingItem {
                    topic: "Data Privacy".to_string(),
                    mentions: 9820,
                    change: "+8%".to_string(),
                },
                TrendingItem {
                    topic: "Tech Layoffs".to_string(),
                    mentions: 8450,
                    change: "-5%".to_string(),
                },
            ],
            alerts: vec![
                AlertItem {
                    title: "Breaking: Major AI Company Announcement".to_string(),
                    time: "5 min ago".to_string(),
                    urgency: Urgency::High,
                },
                AlertItem {
                    title: "New Industry Report Released".to_string(),
                    time: "1 hour ago".to_string(),
                    urgency: Urgency::Medium,
                },
                AlertItem {
                    title: "Market Update: Tech Stocks Surge".to_string(),
                    time: "2 hours ago".to_string(),
                    urgency: Urgency::Low,
                },
            ],
        }
    }
}

/// Format a mention count with thousands separators ("15,420").
pub fn format_mentions(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_data_shape() {
        let data = DashboardData::default();
        assert_eq!(data.categories.len(), 3);
        assert!(data.categories.iter().all(|c| c.keywords.len() == 3));
        assert_eq!(data.opportunities.len(), 4);
        assert_eq!(data.trending.len(), 4);
        assert_eq!(data.alerts.len(), 3);
    }

    #[test]
    fn mentions_grouping() {
        assert_eq!(format_mentions(0), "0");
        assert_eq!(format_mentions(999), "999");
        assert_eq!(format_mentions(8450), "8,450");
        assert_eq!(format_mentions(15420), "15,420");
        assert_eq!(format_mentions(1234567), "1,234,567");
    }

    #[test]
    fn urgency_serde_tag() {
        let json = serde_json::to_string(&Urgency::High).unwrap();
        assert_eq!(json, "\"high\"");
    }
}
